use std::convert::TryFrom;

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Deserializer};

use crate::errors::ConfirmerError;

/// A mobile confirmation, as it was when the list was fetched. There are multiple things that can be confirmed, like trade offers.
///
/// `id` and `nonce` are only meaningful for the session and short window they were fetched in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
	pub id: u64,
	/// The confirmation key, sent back as `ck` when responding.
	pub nonce: String,
	/// Trade offer ID, market listing ID, or API key request ID, depending on `conf_type`.
	pub creator_id: u64,
	pub creation_time: DateTime<Local>,
	pub conf_type: ConfirmationType,
	pub type_name: Option<String>,
	pub icon: Option<String>,
	pub multi: bool,
	pub headline: String,
	pub summary: String,
	pub warn: Option<String>,
}

impl Confirmation {
	/// Human readable representation of this confirmation.
	pub fn description(&self) -> String {
		format!(
			"{:?} - {} - {}",
			self.conf_type, self.headline, self.summary
		)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "u32")]
pub enum ConfirmationType {
	Unknown = 1,
	Trade = 2,
	Listing = 3,
	ApiKey = 4,
}

impl From<u32> for ConfirmationType {
	/// Codes Steam adds later map to `Unknown` instead of failing.
	fn from(code: u32) -> Self {
		match code {
			2 => ConfirmationType::Trade,
			3 => ConfirmationType::Listing,
			4 => ConfirmationType::ApiKey,
			_ => ConfirmationType::Unknown,
		}
	}
}

/// Response body of `GET /mobileconf/getlist`. Entries are decoded separately so a malformed entry is distinguishable from a failed request.
#[derive(Debug, Deserialize)]
pub(crate) struct ConfirmationListResponse {
	#[serde(default)]
	pub success: Option<bool>,
	#[serde(default)]
	pub needsauth: Option<bool>,
	/// Missing when the session has expired.
	#[serde(default)]
	pub conf: Option<Vec<serde_json::Value>>,
}

/// One entry of the `conf` array, exactly as sent.
#[derive(Debug, Deserialize)]
pub(crate) struct ConfirmationEntry {
	#[serde(deserialize_with = "number_or_numeric_string")]
	pub id: u64,
	pub nonce: String,
	#[serde(deserialize_with = "number_or_numeric_string")]
	pub creator_id: u64,
	pub creation_time: i64,
	#[serde(rename = "type")]
	pub conf_type: ConfirmationType,
	#[serde(default)]
	pub type_name: Option<String>,
	#[serde(default)]
	pub icon: Option<String>,
	#[serde(default)]
	pub multi: bool,
	#[serde(default)]
	pub headline: String,
	pub summary: Vec<String>,
	#[serde(default)]
	pub warn: Option<String>,
}

impl TryFrom<ConfirmationEntry> for Confirmation {
	type Error = ConfirmerError;

	fn try_from(entry: ConfirmationEntry) -> Result<Self, Self::Error> {
		let summary = entry.summary.into_iter().next().ok_or_else(|| {
			ConfirmerError::DecodeError(format!(
				"confirmation {} has an empty summary",
				entry.id
			))
		})?;
		let creation_time = Local
			.timestamp_opt(entry.creation_time, 0)
			.single()
			.ok_or_else(|| {
				ConfirmerError::DecodeError(format!(
					"confirmation {} has an invalid creation_time: {}",
					entry.id, entry.creation_time
				))
			})?;

		Ok(Confirmation {
			id: entry.id,
			nonce: entry.nonce,
			creator_id: entry.creator_id,
			creation_time,
			conf_type: entry.conf_type,
			type_name: entry.type_name,
			icon: entry.icon,
			multi: entry.multi,
			headline: entry.headline,
			summary,
			warn: entry.warn,
		})
	}
}

/// Steam sends 64 bit ids as strings, older responses used plain numbers. Accept both.
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum NumberOrString {
		Number(u64),
		String(String),
	}

	match NumberOrString::deserialize(deserializer)? {
		NumberOrString::Number(n) => Ok(n),
		NumberOrString::String(s) => s.parse().map_err(serde::de::Error::custom),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_confirmation_type_from_code() {
		assert_eq!(ConfirmationType::from(1), ConfirmationType::Unknown);
		assert_eq!(ConfirmationType::from(2), ConfirmationType::Trade);
		assert_eq!(ConfirmationType::from(3), ConfirmationType::Listing);
		assert_eq!(ConfirmationType::from(4), ConfirmationType::ApiKey);
		for code in [0, 5, 6, 9, 12, u32::MAX] {
			assert_eq!(
				ConfirmationType::from(code),
				ConfirmationType::Unknown,
				"code {}",
				code
			);
		}
	}

	#[test]
	fn test_parse_confirmations() -> anyhow::Result<()> {
		let text = include_str!("fixtures/confirmations/multiple-confirmations.json");
		let body: ConfirmationListResponse = serde_json::from_str(text)?;
		let confirmations = body
			.conf
			.unwrap_or_default()
			.into_iter()
			.map(|v| {
				let entry: ConfirmationEntry = serde_json::from_value(v)
					.map_err(|e| ConfirmerError::DecodeError(e.to_string()))?;
				Confirmation::try_from(entry)
			})
			.collect::<Result<Vec<_>, ConfirmerError>>()?;

		assert_eq!(confirmations.len(), 3);

		let trade = &confirmations[0];
		assert_eq!(trade.id, 13186470891);
		assert_eq!(trade.nonce, "4617832946580498427");
		assert_eq!(trade.creator_id, 6309151723);
		assert_eq!(trade.conf_type, ConfirmationType::Trade);
		assert_eq!(trade.summary, "You will give up your Mann Co. Supply Crate Key");
		assert_eq!(trade.creation_time.timestamp(), 1687457923);
		assert_eq!(trade.warn, None);

		assert_eq!(confirmations[1].conf_type, ConfirmationType::Listing);
		assert_eq!(confirmations[1].creator_id, 4223418357396226398);
		assert_eq!(confirmations[2].conf_type, ConfirmationType::Unknown);
		assert_eq!(
			confirmations[2].warn.as_deref(),
			Some("This change cannot be undone.")
		);
		Ok(())
	}

	#[test]
	fn test_numeric_ids_accepted() -> anyhow::Result<()> {
		let entry: ConfirmationEntry = serde_json::from_value(serde_json::json!({
			"id": 1,
			"nonce": "n1",
			"creator_id": 111,
			"creation_time": 1687457923,
			"type": 2,
			"summary": ["x"]
		}))?;
		let conf = Confirmation::try_from(entry)?;
		assert_eq!(conf.id, 1);
		assert_eq!(conf.creator_id, 111);
		assert!(!conf.multi);
		Ok(())
	}

	#[test]
	fn test_empty_summary_is_decode_error() -> anyhow::Result<()> {
		let entry: ConfirmationEntry = serde_json::from_value(serde_json::json!({
			"id": "7",
			"nonce": "n7",
			"creator_id": "70",
			"creation_time": 1687457923,
			"type": 3,
			"summary": []
		}))?;
		let err = Confirmation::try_from(entry).unwrap_err();
		assert!(matches!(err, ConfirmerError::DecodeError(_)), "{:?}", err);
		Ok(())
	}

	#[test]
	fn test_description() -> anyhow::Result<()> {
		let entry: ConfirmationEntry = serde_json::from_value(serde_json::json!({
			"id": "7",
			"nonce": "n7",
			"creator_id": "70",
			"creation_time": 1687457923,
			"type": 2,
			"headline": "gaben",
			"summary": ["You will receive 1 item", "You will give up 2 items"]
		}))?;
		let conf = Confirmation::try_from(entry)?;
		assert_eq!(conf.description(), "Trade - gaben - You will receive 1 item");
		Ok(())
	}
}
