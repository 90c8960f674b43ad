use std::convert::TryFrom;

use log::*;

use crate::{
	client::{requested_with, MobileConfClient},
	confirmation::{Confirmation, ConfirmationEntry, ConfirmationListResponse},
	errors::ConfirmerError,
	transport::Transport,
};

/// Steam shows this instead of a list when the signature was made with the wrong identity secret.
const INVALID_AUTHENTICATOR_MARKER: &str =
	"Steam Guard Mobile Authenticator is providing incorrect Steam Guard codes.";

/// Lists the confirmations currently waiting on the account.
pub struct ConfirmationFetcher<'a, T: Transport> {
	client: &'a MobileConfClient<T>,
}

impl<'a, T: Transport> ConfirmationFetcher<'a, T> {
	pub fn new(client: &'a MobileConfClient<T>) -> Self {
		Self { client }
	}

	/// Steam Endpoint: `GET /mobileconf/getlist`
	pub fn fetch(&self) -> Result<Vec<Confirmation>, ConfirmerError> {
		let resp = self.client.signed_get(
			"getlist",
			"conf",
			&[],
			requested_with("com.valvesoftware.android.steam.community"),
		)?;
		debug!("getlist response status: {}", resp.status);
		trace!("getlist response body: {}", resp.body);

		if resp.body.contains(INVALID_AUTHENTICATOR_MARKER) {
			return Err(ConfirmerError::InvalidCredentials);
		}
		if !resp.is_success() {
			warn!("getlist responded with HTTP {}", resp.status);
			return Err(ConfirmerError::ConfirmationExpected);
		}

		let body: ConfirmationListResponse = match resp.json() {
			Ok(body) => body,
			Err(err) => {
				warn!("could not decode getlist response: {}", err);
				return Err(ConfirmerError::ConfirmationExpected);
			}
		};
		if body.needsauth.unwrap_or(false) {
			return Err(ConfirmerError::SessionExpired);
		}
		if !body.success.unwrap_or(true) {
			return Err(ConfirmerError::ConfirmationExpected);
		}
		let conf = match body.conf {
			Some(conf) => conf,
			None => {
				warn!("getlist response has no conf list");
				return Err(ConfirmerError::ConfirmationExpected);
			}
		};

		let confirmations = conf
			.into_iter()
			.enumerate()
			.map(|(i, value)| {
				let entry: ConfirmationEntry = serde_path_to_error::deserialize(value)
					.map_err(|err| {
						ConfirmerError::DecodeError(format!(
							"conf[{}]: {} (at {})",
							i,
							err.inner(),
							err.path()
						))
					})?;
				Confirmation::try_from(entry)
			})
			.collect::<Result<Vec<_>, _>>()?;
		debug!("fetched {} confirmations", confirmations.len());
		Ok(confirmations)
	}
}
