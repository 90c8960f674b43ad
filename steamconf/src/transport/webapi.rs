use std::sync::Arc;

use log::{debug, trace};
use reqwest::{cookie::Jar, header::HeaderMap, Url};

use super::{HttpResponse, Transport, TransportError};

const USER_AGENT: &str = "Mozilla/5.0 (Linux; U; Android 4.1.1; en-us; Google Nexus 4 - 4.1.1 - API 16 - 768x1280 Build/JRO03S) AppleWebKit/534.30 (KHTML, like Gecko) Version/4.0 Mobile Safari/534.30";

lazy_static! {
	pub static ref STEAM_COOKIE_URL: Url = "https://steamcommunity.com".parse::<Url>().unwrap();
}

/// Sends requests over HTTPS with a cookie jar owned by whoever logged in.
#[derive(Debug, Clone)]
pub struct WebTransport {
	client: reqwest::blocking::Client,
}

impl WebTransport {
	pub fn new(cookies: Arc<Jar>) -> Result<Self, TransportError> {
		let client = reqwest::blocking::ClientBuilder::new()
			.cookie_provider(cookies)
			.user_agent(USER_AGENT)
			.build()?;
		Ok(Self { client })
	}
}

impl Transport for WebTransport {
	fn get(
		&self,
		url: Url,
		query: &[(&str, String)],
		headers: HeaderMap,
	) -> Result<HttpResponse, TransportError> {
		debug!("HTTP Request: GET {}", url);
		let resp = self
			.client
			.get(url)
			.headers(headers)
			.query(query)
			.send()?;
		let status = resp.status().as_u16();
		debug!("Response HTTP status: {}", status);

		let body = resp.text()?;
		trace!("Response body: {:?}", body);
		Ok(HttpResponse { status, body })
	}
}
