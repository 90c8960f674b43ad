//! Pulls the real trade offer id or listing asset id out of a confirmation's details page.
//!
//! The markup is undocumented and changes without notice. Each confirmation type gets its own
//! extractor so that a change on Steam's side only touches one of them.

use log::*;
use scraper::{Html, Selector};

lazy_static! {
	static ref TRADE_OFFER_SELECTOR: Selector = Selector::parse(".tradeoffer").unwrap();
	static ref SCRIPT_SELECTOR: Selector = Selector::parse("script").unwrap();
}

const LISTING_INFO_START: &str = "'confiteminfo', ";
const LISTING_INFO_END: &str = ", UserYou";
/// The item info is built by the third script on the listing details page.
const LISTING_SCRIPT_INDEX: usize = 2;

pub trait IdentifierExtractor {
	/// Returns `None` when the page doesn't contain the identifier this extractor looks for.
	fn extract(&self, html: &str) -> Option<String>;
}

/// Finds the trade offer id in `<div class="tradeoffer" id="tradeofferid_1234">`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TradeOfferExtractor;

impl IdentifierExtractor for TradeOfferExtractor {
	fn extract(&self, html: &str) -> Option<String> {
		let fragment = Html::parse_fragment(html);
		let offer = fragment.select(&TRADE_OFFER_SELECTOR).next()?;
		let full_offer_id = offer.value().attr("id")?;
		let offer_id = full_offer_id.split('_').nth(1)?;
		if offer_id.is_empty() {
			return None;
		}
		Some(offer_id.to_owned())
	}
}

/// Finds the asset id in the item info json that the listing page passes to `BuildHover`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingExtractor;

impl IdentifierExtractor for ListingExtractor {
	fn extract(&self, html: &str) -> Option<String> {
		let fragment = Html::parse_fragment(html);
		let script = fragment
			.select(&SCRIPT_SELECTOR)
			.nth(LISTING_SCRIPT_INDEX)?
			.text()
			.collect::<String>();
		let script = script.trim();

		let start = script.find(LISTING_INFO_START)? + LISTING_INFO_START.len();
		let rest = &script[start..];
		let end = rest.find(LISTING_INFO_END)?;
		let raw = rest[..end].replace('\n', "");

		let info: serde_json::Value = match serde_json::from_str(&raw) {
			Ok(info) => info,
			Err(err) => {
				warn!("listing item info is not valid json: {}", err);
				return None;
			}
		};
		match &info["id"] {
			serde_json::Value::String(id) => Some(id.clone()),
			serde_json::Value::Number(id) => Some(id.to_string()),
			_ => None,
		}
	}
}
