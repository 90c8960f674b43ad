pub mod webapi;

use reqwest::{header::HeaderMap, Url};
use serde::de::DeserializeOwned;
pub use webapi::WebTransport;

/// Something that can issue GET requests against steamcommunity.com on behalf of a logged in session.
///
/// Implementations only read the session. Keeping its cookies valid is the login subsystem's job.
pub trait Transport {
	fn get(
		&self,
		url: Url,
		query: &[(&str, String)],
		headers: HeaderMap,
	) -> Result<HttpResponse, TransportError>;
}

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
	pub status: u16,
	pub body: String,
}

impl HttpResponse {
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		Self {
			status,
			body: body.into(),
		}
	}

	pub fn is_success(&self) -> bool {
		self.status == 200
	}

	pub fn json<T: DeserializeOwned>(
		&self,
	) -> Result<T, serde_path_to_error::Error<serde_json::Error>> {
		let mut deser = serde_json::Deserializer::from_str(self.body.as_str());
		serde_path_to_error::deserialize(&mut deser)
	}
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
	#[error("HTTP request failed: {0}")]
	Request(#[from] reqwest::Error),
}
