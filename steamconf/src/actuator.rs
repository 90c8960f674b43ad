use std::collections::HashMap;

use log::*;
use serde::Deserialize;

use crate::{
	client::{requested_with, MobileConfClient},
	confirmation::Confirmation,
	errors::ConfirmerError,
	transport::Transport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationAction {
	Accept,
	Deny,
}

impl ConfirmationAction {
	/// The `op` Steam expects, which is also the tag the request is signed with.
	pub fn to_operation(self) -> &'static str {
		match self {
			ConfirmationAction::Accept => "allow",
			ConfirmationAction::Deny => "cancel",
		}
	}
}

/// Decoded body of `/mobileconf/ajaxop`. Whatever Steam sent besides `success` is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActuationResult {
	#[serde(default)]
	pub success: bool,
	#[serde(default)]
	pub needsauth: Option<bool>,
	#[serde(flatten)]
	pub extra: HashMap<String, serde_json::Value>,
}

/// Accepts or denies a single confirmation.
pub struct ConfirmationActuator<'a, T: Transport> {
	client: &'a MobileConfClient<T>,
}

impl<'a, T: Transport> ConfirmationActuator<'a, T> {
	pub fn new(client: &'a MobileConfClient<T>) -> Self {
		Self { client }
	}

	/// Respond to a confirmation. A rejected response is returned with `success: false`, not as an error,
	/// unless Steam flags the session with `needsauth`.
	///
	/// Host: https://steamcommunity.com
	/// Steam Endpoint: `GET /mobileconf/ajaxop`
	pub fn actuate(
		&self,
		conf: &Confirmation,
		action: ConfirmationAction,
	) -> Result<ActuationResult, ConfirmerError> {
		let operation = action.to_operation();
		let resp = self.client.signed_get(
			"ajaxop",
			operation,
			&[
				("op", operation.to_owned()),
				("cid", conf.id.to_string()),
				("ck", conf.nonce.clone()),
			],
			requested_with("XMLHttpRequest"),
		)?;
		debug!(
			"ajaxop {} for confirmation {} response status: {}",
			operation, conf.id, resp.status
		);
		debug!("ajaxop response body: {:?}", resp.body);

		match resp.json::<ActuationResult>() {
			Ok(result) if result.needsauth.unwrap_or(false) => {
				warn!("session expired while responding to confirmation {}", conf.id);
				Err(ConfirmerError::SessionExpired)
			}
			Ok(result) => {
				if !result.success {
					warn!("Steam refused to {} confirmation {}", operation, conf.id);
				}
				Ok(result)
			}
			Err(err) => {
				warn!("could not decode ajaxop response: {}", err);
				Err(ConfirmerError::ConfirmationExpected)
			}
		}
	}
}
