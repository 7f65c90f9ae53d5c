use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::NaiveDate;
use common::{Error, SearchError};

pub mod availability;
pub mod blocked_day;
pub mod checkout;
pub mod hold;
pub mod quote;
pub mod room;

/// Simple healthcheck endpoint
pub async fn healthcheck() -> impl IntoResponse { StatusCode::OK }

/// Check that a stay covers at least one night
///
/// Every core component assumes check-out strictly after check-in, so
/// empty and inverted ranges are rejected at the door
pub(crate) fn check_stay_range(
	check_in: NaiveDate,
	check_out: NaiveDate,
) -> Result<(), Error> {
	if check_out <= check_in {
		return Err(SearchError::InvalidRange { check_in, check_out }.into());
	}

	Ok(())
}

/// The number of nights in `[check_in, check_out)`
///
/// Only valid after [`check_stay_range`] has passed
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> u32 {
	(check_out - check_in).num_days().max(0) as u32
}
