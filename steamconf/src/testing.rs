//! Scripted transport and clock for exercising the confirmation flow without Steam.

use std::{
	cell::{Cell, RefCell},
	collections::VecDeque,
};

use reqwest::{header::HeaderMap, Url};

use crate::{
	client::MobileConfClient,
	signing::{Clock, IdentitySecret},
	transport::{HttpResponse, Transport, TransportError},
};

pub const TEST_STEAM_ID: u64 = 76561197960265728;
pub const TEST_IDENTITY_SECRET: &str = "GQP46b73Ws7gr8GmZFR0sDuau5c=";
pub const TEST_START_TIME: u64 = 1617591917;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
	pub url: Url,
	pub query: Vec<(String, String)>,
	pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
	pub fn path(&self) -> &str {
		self.url.path()
	}

	pub fn param(&self, key: &str) -> Option<&str> {
		self.query
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(k, _)| k.eq_ignore_ascii_case(name))
			.map(|(_, v)| v.as_str())
	}
}

enum Scripted {
	Response(HttpResponse),
	Fail,
}

/// Replies to requests in the order the responses were pushed, and records every request.
#[derive(Default)]
pub struct MockTransport {
	responses: RefCell<VecDeque<Scripted>>,
	requests: RefCell<Vec<RecordedRequest>>,
}

impl MockTransport {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
		self.responses
			.borrow_mut()
			.push_back(Scripted::Response(HttpResponse::new(status, body)));
		self
	}

	pub fn respond_json(self, body: serde_json::Value) -> Self {
		self.respond(200, body.to_string())
	}

	/// The next request fails with a transport error.
	pub fn fail(self) -> Self {
		self.responses.borrow_mut().push_back(Scripted::Fail);
		self
	}

	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.requests.borrow().clone()
	}
}

impl Transport for MockTransport {
	fn get(
		&self,
		url: Url,
		query: &[(&str, String)],
		headers: HeaderMap,
	) -> Result<HttpResponse, TransportError> {
		self.requests.borrow_mut().push(RecordedRequest {
			url: url.clone(),
			query: query
				.iter()
				.map(|(k, v)| (k.to_string(), v.clone()))
				.collect(),
			headers: headers
				.iter()
				.map(|(k, v)| {
					(
						k.as_str().to_owned(),
						v.to_str().unwrap_or_default().to_owned(),
					)
				})
				.collect(),
		});
		match self.responses.borrow_mut().pop_front() {
			Some(Scripted::Response(resp)) => Ok(resp),
			Some(Scripted::Fail) => Err(connection_refused()),
			None => panic!("unexpected request: {}", url),
		}
	}
}

/// A genuine connect error. Nothing accepts connections on port 0.
fn connection_refused() -> TransportError {
	let err = reqwest::blocking::Client::new()
		.get("http://127.0.0.1:0/")
		.send()
		.expect_err("connecting to port 0 should fail");
	TransportError::Request(err)
}

/// Starts at [`TEST_START_TIME`] and advances one second every time it is read.
pub struct StepClock(Cell<u64>);

impl StepClock {
	pub fn new(start: u64) -> Self {
		Self(Cell::new(start))
	}
}

impl Clock for StepClock {
	fn now(&self) -> u64 {
		let now = self.0.get();
		self.0.set(now + 1);
		now
	}
}

pub fn test_client(transport: MockTransport) -> MobileConfClient<MockTransport> {
	let secret = IdentitySecret::parse(TEST_IDENTITY_SECRET).unwrap();
	MobileConfClient::new(transport, TEST_STEAM_ID, secret).with_clock(StepClock::new(TEST_START_TIME))
}

/// One `/getlist` entry, shaped the way Steam sends it.
pub fn conf_json(id: u64, nonce: &str, creator_id: u64, conf_type: u32) -> serde_json::Value {
	serde_json::json!({
		"type": conf_type,
		"type_name": "Trade Offer",
		"id": id.to_string(),
		"creator_id": creator_id.to_string(),
		"nonce": nonce,
		"creation_time": 1687457923,
		"cancel": "Cancel",
		"accept": "Accept",
		"icon": "https://avatars.akamai.steamstatic.com/example_full.jpg",
		"multi": false,
		"headline": "example",
		"summary": ["You will give up 1 item"],
		"warn": null
	})
}

pub fn conf_list_json(confs: Vec<serde_json::Value>) -> serde_json::Value {
	serde_json::json!({ "success": true, "conf": confs })
}

pub fn details_json(html: &str) -> serde_json::Value {
	serde_json::json!({ "success": true, "html": html })
}

pub fn trade_details_html(trade_offer_id: &str) -> String {
	format!(
		r#"<div class="mobileconf_trade_area"><div class="tradeoffer" id="tradeofferid_{}"><div class="tradeoffer_items_ctn"></div></div></div>"#,
		trade_offer_id
	)
}
