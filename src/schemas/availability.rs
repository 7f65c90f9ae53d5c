use availability::Availability;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Copy, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySearchRequest {
	pub check_in:    NaiveDate,
	/// Exclusive check-out date
	pub check_out:   NaiveDate,
	#[validate(range(min = 1))]
	pub guest_count: u32,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
	pub check_in:     NaiveDate,
	pub check_out:    NaiveDate,
	pub nights:       u32,
	#[serde(flatten)]
	pub availability: Availability,
}

impl From<(AvailabilitySearchRequest, Availability)> for AvailabilityResponse {
	fn from(value: (AvailabilitySearchRequest, Availability)) -> Self {
		let (request, availability) = value;

		#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
		let nights =
			(request.check_out - request.check_in).num_days().max(0) as u32;

		Self {
			check_in: request.check_in,
			check_out: request.check_out,
			nights,
			availability,
		}
	}
}
