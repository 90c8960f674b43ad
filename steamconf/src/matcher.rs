use log::*;
use reqwest::header::HeaderMap;
use serde::Deserialize;

use crate::{
	client::MobileConfClient,
	confirmation::Confirmation,
	errors::ConfirmerError,
	extractor::{IdentifierExtractor, ListingExtractor, TradeOfferExtractor},
	transport::Transport,
};

/// What the caller wants confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
	TradeOffer(String),
	/// The asset id of the item being listed.
	Listing(String),
	ApiKey(String),
}

/// Picks the confirmation that belongs to a [`Criterion`] out of a fetched list.
///
/// The list only carries Steam's internal confirmation ids, so trade offers and listings are found
/// by loading each candidate's details page until one matches.
pub struct ConfirmationMatcher<'a, T: Transport> {
	client: &'a MobileConfClient<T>,
}

impl<'a, T: Transport> ConfirmationMatcher<'a, T> {
	pub fn new(client: &'a MobileConfClient<T>) -> Self {
		Self { client }
	}

	/// Returns the first confirmation, in list order, that satisfies `criterion`.
	pub fn select<'c>(
		&self,
		confirmations: &'c [Confirmation],
		criterion: &Criterion,
	) -> Result<&'c Confirmation, ConfirmerError> {
		match criterion {
			Criterion::TradeOffer(trade_offer_id) => {
				self.select_by_details(confirmations, &TradeOfferExtractor, trade_offer_id)
			}
			Criterion::Listing(asset_id) => {
				self.select_by_details(confirmations, &ListingExtractor, asset_id)
			}
			Criterion::ApiKey(request_id) => select_by_creator(confirmations, request_id),
		}
	}

	fn select_by_details<'c>(
		&self,
		confirmations: &'c [Confirmation],
		extractor: &dyn IdentifierExtractor,
		target: &str,
	) -> Result<&'c Confirmation, ConfirmerError> {
		for conf in confirmations {
			let html = self.get_confirmation_details(conf)?;
			match extractor.extract(&html) {
				Some(id) if id == target => {
					debug!("confirmation {} matches {}", conf.id, target);
					return Ok(conf);
				}
				Some(id) => trace!("confirmation {} is for {}, not {}", conf.id, id, target),
				None => debug!("no identifier found on details page for confirmation {}", conf.id),
			}
		}
		Err(ConfirmerError::ConfirmationExpected)
	}

	/// Steam Endpoint: `GET /mobileconf/details/:id`
	pub fn get_confirmation_details(&self, conf: &Confirmation) -> Result<String, ConfirmerError> {
		#[derive(Debug, Clone, Deserialize)]
		struct ConfirmationDetailsResponse {
			#[serde(default)]
			pub success: Option<bool>,
			pub html: String,
		}

		let tag = format!("details{}", conf.id);
		let resp = self
			.client
			.signed_get(&format!("details/{}", conf.id), &tag, &[], HeaderMap::new())?;
		if !resp.is_success() {
			warn!(
				"details for confirmation {} responded with HTTP {}",
				conf.id, resp.status
			);
			return Err(ConfirmerError::ConfirmationExpected);
		}

		let body: ConfirmationDetailsResponse = match resp.json() {
			Ok(body) => body,
			Err(err) => {
				warn!("could not decode details for confirmation {}: {}", conf.id, err);
				return Err(ConfirmerError::ConfirmationExpected);
			}
		};
		if !body.success.unwrap_or(true) {
			return Err(ConfirmerError::ConfirmationExpected);
		}
		Ok(body.html)
	}
}

fn select_by_creator<'c>(
	confirmations: &'c [Confirmation],
	request_id: &str,
) -> Result<&'c Confirmation, ConfirmerError> {
	confirmations
		.iter()
		.find(|conf| conf.creator_id.to_string() == request_id)
		.ok_or(ConfirmerError::ConfirmationExpected)
}
