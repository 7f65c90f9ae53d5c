use availability::AvailabilitySnapshot;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use validator::Validate;

use crate::controllers::check_stay_range;
use crate::schemas::availability::{
	AvailabilityResponse,
	AvailabilitySearchRequest,
};

/// Search the free beds for a stay
///
/// Loads a fresh inventory snapshot and classifies the whole range; the
/// breakdown flags every bed per night so the UI can render a calendar
#[instrument(skip(pool))]
pub async fn search_availability(
	State(pool): State<DbPool>,
	Json(request): Json<AvailabilitySearchRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;
	check_stay_range(request.check_in, request.check_out)?;

	let conn = pool.get().await?;

	let snapshot =
		AvailabilitySnapshot::load(request.check_in, request.check_out, &conn)
			.await?;

	let availability = snapshot.calculate(
		request.check_in,
		request.check_out,
		request.guest_count,
	);

	let response = AvailabilityResponse::from((request, availability));

	Ok((StatusCode::OK, Json(response)))
}
