use log::*;

use crate::{
	actuator::{ActuationResult, ConfirmationAction, ConfirmationActuator},
	client::MobileConfClient,
	confirmation::Confirmation,
	errors::ConfirmerError,
	fetcher::ConfirmationFetcher,
	matcher::{ConfirmationMatcher, Criterion},
	transport::Transport,
};

/// High level operations on mobile confirmations. Each call starts from a fresh confirmation list.
///
/// Calls block on the network and must not run concurrently against the same session.
pub struct ConfirmationExecutor<T: Transport> {
	client: MobileConfClient<T>,
}

impl<T: Transport> ConfirmationExecutor<T> {
	pub fn new(client: MobileConfClient<T>) -> Self {
		Self { client }
	}

	pub fn client(&self) -> &MobileConfClient<T> {
		&self.client
	}

	/// All confirmations currently waiting on the account.
	pub fn list(&self) -> Result<Vec<Confirmation>, ConfirmerError> {
		ConfirmationFetcher::new(&self.client).fetch()
	}

	/// Respond to a confirmation that came from [`Self::list`].
	pub fn respond(
		&self,
		conf: &Confirmation,
		action: ConfirmationAction,
	) -> Result<ActuationResult, ConfirmerError> {
		ConfirmationActuator::new(&self.client).actuate(conf, action)
	}

	pub fn approve_trade_offer(&self, trade_offer_id: &str) -> Result<ActuationResult, ConfirmerError> {
		self.approve(Criterion::TradeOffer(trade_offer_id.to_owned()))
	}

	/// Confirm the market listing for the item with `asset_id`.
	pub fn approve_sell_listing(&self, asset_id: &str) -> Result<ActuationResult, ConfirmerError> {
		self.approve(Criterion::Listing(asset_id.to_owned()))
	}

	pub fn approve_api_key_request(
		&self,
		request_id: &str,
	) -> Result<ActuationResult, ConfirmerError> {
		self.approve(Criterion::ApiKey(request_id.to_owned()))
	}

	pub fn approve(&self, criterion: Criterion) -> Result<ActuationResult, ConfirmerError> {
		let confirmations = self.list()?;
		let conf = ConfirmationMatcher::new(&self.client).select(&confirmations, &criterion)?;
		info!("approving confirmation {} for {:?}", conf.id, criterion);
		self.respond(conf, ConfirmationAction::Accept)
	}

	/// Deny every pending confirmation, in list order. Returns one result per confirmation.
	///
	/// A response with `success: false` is collected like any other. The first error aborts the
	/// loop and leaves the remaining confirmations pending.
	pub fn cancel_all(&self) -> Result<Vec<ActuationResult>, ConfirmerError> {
		let confirmations = self.list()?;
		info!("cancelling {} confirmations", confirmations.len());
		let actuator = ConfirmationActuator::new(&self.client);
		let mut results = Vec::with_capacity(confirmations.len());
		for conf in &confirmations {
			match actuator.actuate(conf, ConfirmationAction::Deny) {
				Ok(result) => results.push(result),
				Err(err) => {
					error!(
						"failed to cancel confirmation {}, not cancelling the remaining {}: {}",
						conf.id,
						confirmations.len() - results.len() - 1,
						err
					);
					return Err(err);
				}
			}
		}
		Ok(results)
	}
}
