use log::*;
use reqwest::{
	header::{HeaderMap, HeaderName, HeaderValue},
	Url,
};

use crate::{
	signing::{Clock, IdentitySecret, SigningProvider, SteamGuardSigner, SystemClock},
	transport::{HttpResponse, Transport, TransportError},
};

lazy_static! {
	static ref MOBILECONF_BASE: Url = "https://steamcommunity.com/mobileconf"
		.parse::<Url>()
		.unwrap();
}

/// Builds and sends signed requests to the `/mobileconf` endpoints.
///
/// Every request reads the clock again, so each one carries its own timestamp and signature.
pub struct MobileConfClient<T: Transport> {
	transport: T,
	steam_id: u64,
	identity_secret: IdentitySecret,
	base_url: Url,
	device_id: Option<String>,
	signer: Box<dyn SigningProvider>,
	clock: Box<dyn Clock>,
}

impl<T: Transport> MobileConfClient<T> {
	pub fn new(transport: T, steam_id: u64, identity_secret: IdentitySecret) -> Self {
		Self {
			transport,
			steam_id,
			identity_secret,
			base_url: MOBILECONF_BASE.clone(),
			device_id: None,
			signer: Box::new(SteamGuardSigner),
			clock: Box::new(SystemClock),
		}
	}

	/// Point at a different `/mobileconf` root, eg. a mock server.
	pub fn with_base_url(mut self, base_url: Url) -> Self {
		self.base_url = base_url;
		self
	}

	/// Send this device id instead of deriving one from the steam id.
	pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
		self.device_id = Some(device_id.into());
		self
	}

	pub fn with_signer(mut self, signer: impl SigningProvider + 'static) -> Self {
		self.signer = Box::new(signer);
		self
	}

	pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
		self.clock = Box::new(clock);
		self
	}

	pub fn steam_id(&self) -> u64 {
		self.steam_id
	}

	pub fn transport(&self) -> &T {
		&self.transport
	}

	pub(crate) fn signed_params(&self, tag: &str) -> Vec<(&'static str, String)> {
		let time = self.clock.now();
		let device_id = self
			.device_id
			.clone()
			.unwrap_or_else(|| self.signer.device_id(self.steam_id));
		vec![
			("p", device_id),
			("a", self.steam_id.to_string()),
			("k", self.signer.sign(&self.identity_secret, tag, time)),
			("t", time.to_string()),
			("m", String::from("android")),
			("tag", String::from(tag)),
		]
	}

	/// `GET {base}/{path}` with freshly signed parameters for `tag`, followed by `extra`.
	pub(crate) fn signed_get(
		&self,
		path: &str,
		tag: &str,
		extra: &[(&'static str, String)],
		headers: HeaderMap,
	) -> Result<HttpResponse, TransportError> {
		let url = self.endpoint(path);
		let mut params = self.signed_params(tag);
		params.extend(extra.iter().cloned());
		trace!("signed request: {} tag={}", url, tag);
		self.transport.get(url, &params, headers)
	}

	fn endpoint(&self, path: &str) -> Url {
		let mut url = self.base_url.clone();
		let base = url.path().trim_end_matches('/').to_owned();
		url.set_path(&format!("{}/{}", base, path.trim_start_matches('/')));
		url
	}
}

/// `X-Requested-With`, which Steam uses to tell the app's requests from its web views.
pub(crate) fn requested_with(value: &'static str) -> HeaderMap {
	let mut headers = HeaderMap::new();
	headers.insert(
		HeaderName::from_static("x-requested-with"),
		HeaderValue::from_static(value),
	);
	headers
}
