use chrono::NaiveDate;
use db::PensionType;
use pricing::{CartQuote, Guest, PrivacySelection};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator::Validate;

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestRequest {
	pub guest_type: String,
	#[serde(default)]
	pub room_id:    Option<i32>,
	#[serde(default)]
	pub bed_id:     Option<i32>,
}

impl From<GuestRequest> for Guest {
	fn from(value: GuestRequest) -> Self {
		Self {
			guest_type: value.guest_type,
			room_id:    value.room_id,
			bed_id:     value.bed_id,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacySelectionRequest {
	pub room_id: i32,
	pub night:   NaiveDate,
	pub bed_ids: Vec<i32>,
}

impl From<PrivacySelectionRequest> for PrivacySelection {
	fn from(value: PrivacySelectionRequest) -> Self {
		Self {
			room_id: value.room_id,
			night:   value.night,
			bed_ids: value.bed_ids,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
	pub check_in:                 NaiveDate,
	/// Exclusive check-out date
	pub check_out:                NaiveDate,
	pub pension_type:             PensionType,
	#[validate(length(min = 1))]
	pub guests:                   Vec<GuestRequest>,
	#[serde(default)]
	pub privacy_blocks:           Vec<PrivacySelectionRequest>,
	#[serde(default)]
	pub additional_services_cost: Decimal,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartQuoteResponse {
	pub check_in:     NaiveDate,
	pub check_out:    NaiveDate,
	pub nights:       u32,
	pub pension_type: PensionType,
	#[serde(flatten)]
	pub quote:        CartQuote,
}

impl From<(&QuoteRequest, u32, CartQuote)> for CartQuoteResponse {
	fn from(value: (&QuoteRequest, u32, CartQuote)) -> Self {
		let (request, nights, quote) = value;

		Self {
			check_in: request.check_in,
			check_out: request.check_out,
			nights,
			pension_type: request.pension_type,
			quote,
		}
	}
}
