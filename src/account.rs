use std::{
	fs::File,
	io::BufReader,
	path::{Path, PathBuf},
	sync::Arc,
};

use log::*;
use reqwest::{cookie::Jar, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use steamconf::{
	transport::{webapi::STEAM_COOKIE_URL, WebTransport},
	ConfirmationExecutor, IdentitySecret, MobileConfClient,
};

/// The parts of a maFile needed to respond to confirmations. Other fields are ignored.
#[derive(Debug, Deserialize)]
pub struct AccountFile {
	#[serde(default)]
	pub account_name: String,
	pub identity_secret: SecretString,
	#[serde(default)]
	pub device_id: Option<String>,
	#[serde(rename = "Session")]
	pub session: Session,
}

/// Cookies from an existing login. steamconf never logs in by itself.
#[derive(Debug, Deserialize)]
pub struct Session {
	#[serde(rename = "SteamID")]
	pub steam_id: u64,
	#[serde(rename = "SteamLoginSecure")]
	pub steam_login_secure: SecretString,
	#[serde(default, rename = "SessionID")]
	pub session_id: Option<String>,
}

pub fn default_account_path() -> PathBuf {
	dirs::config_dir()
		.unwrap_or_else(|| PathBuf::from("."))
		.join("steamconf")
		.join("account.maFile")
}

impl AccountFile {
	pub fn load(path: &Path) -> anyhow::Result<Self> {
		debug!("loading account from {}", path.display());
		let file = File::open(path)
			.map_err(|e| anyhow!("Could not open account file {}: {}", path.display(), e))?;
		let mut deser = serde_json::Deserializer::from_reader(BufReader::new(file));
		let account: AccountFile = serde_path_to_error::deserialize(&mut deser)
			.map_err(|e| anyhow!("Invalid account file {}: {}", path.display(), e))?;
		Ok(account)
	}

	pub fn build_cookie_jar(&self, url: &Url) -> Jar {
		let cookies = Jar::default();
		cookies.add_cookie_str("mobileClient=android", url);
		cookies.add_cookie_str("Steam_Language=english", url);
		cookies.add_cookie_str(
			format!("steamid={}", self.session.steam_id).as_str(),
			url,
		);
		cookies.add_cookie_str(
			format!(
				"steamLoginSecure={}",
				self.session.steam_login_secure.expose_secret()
			)
			.as_str(),
			url,
		);
		if let Some(session_id) = &self.session.session_id {
			cookies.add_cookie_str(format!("sessionid={}", session_id).as_str(), url);
		}
		cookies
	}

	/// `base_url` overrides the `/mobileconf` root. Cookies are scoped to its host.
	pub fn build_executor(
		&self,
		base_url: Option<Url>,
	) -> anyhow::Result<ConfirmationExecutor<WebTransport>> {
		let cookie_url = match &base_url {
			Some(url) => url.clone(),
			None => STEAM_COOKIE_URL.clone(),
		};
		let jar = Arc::new(self.build_cookie_jar(&cookie_url));
		let transport = WebTransport::new(jar)?;
		let secret = IdentitySecret::parse(self.identity_secret.expose_secret())
			.map_err(|e| anyhow!("Invalid identity_secret: {}", e))?;

		let mut client = MobileConfClient::new(transport, self.session.steam_id, secret);
		if let Some(url) = base_url {
			client = client.with_base_url(url);
		}
		if let Some(device_id) = self.device_id.as_deref().filter(|d| !d.is_empty()) {
			client = client.with_device_id(device_id);
		}
		Ok(ConfirmationExecutor::new(client))
	}
}
