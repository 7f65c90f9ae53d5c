use chrono::NaiveDate;
use db::PensionType;
use hold::HoldState;
use pricing::CartQuote;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::schemas::quote::{GuestRequest, PrivacySelectionRequest};

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
	pub hold_id:                  Uuid,
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
	#[validate(length(min = 1))]
	pub contact_name:             String,
	#[validate(email)]
	pub contact_email:            String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
	pub reservation_id: i32,
	pub hold_state:     HoldState,
	/// The charged totals, computed by the same function as every quote
	#[serde(flatten)]
	pub quote:          CartQuote,
}
