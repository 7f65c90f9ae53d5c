use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use pricing::{Guest, PrivacySelection, PrivacyTiers, quote_cart};
use primitive_bed::PrimitiveBed;
use primitive_guest_type::PrimitiveGuestTypeRule;
use primitive_privacy_tier::PrimitivePrivacyTier;
use validator::Validate;

use crate::controllers::{check_stay_range, nights_between};
use crate::schemas::pricing::PricingReferenceResponse;
use crate::schemas::quote::{CartQuoteResponse, QuoteRequest};

/// Quote a prospective cart
///
/// Runs the same pure computation as checkout, so what this returns is
/// exactly what would be charged
#[instrument(skip(pool))]
pub async fn create_quote(
	State(pool): State<DbPool>,
	Json(request): Json<QuoteRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;
	check_stay_range(request.check_in, request.check_out)?;

	let conn = pool.get().await?;

	let beds = PrimitiveBed::get_all(&conn).await?;
	let rules = PrimitiveGuestTypeRule::get_all(&conn).await?;
	let tiers =
		PrivacyTiers::from_table(PrimitivePrivacyTier::get_all(&conn).await?);

	let nights = nights_between(request.check_in, request.check_out);

	let guests: Vec<Guest> =
		request.guests.iter().cloned().map(Into::into).collect();
	let selections: Vec<PrivacySelection> =
		request.privacy_blocks.iter().cloned().map(Into::into).collect();

	let quote = quote_cart(
		&guests,
		&beds,
		&rules,
		&tiers,
		&selections,
		request.pension_type,
		nights,
		request.additional_services_cost,
	);

	let response = CartQuoteResponse::from((&request, nights, quote));

	Ok((StatusCode::OK, Json(response)))
}

/// Get the pricing reference data
///
/// Served to the UI so it can recompute live quotes client-side against
/// cached data on every cart change
#[instrument(skip(pool))]
pub async fn get_pricing_reference(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let rules = PrimitiveGuestTypeRule::get_all(&conn).await?;
	let tiers = PrimitivePrivacyTier::get_all(&conn).await?;

	let response = PricingReferenceResponse {
		guest_type_rules: rules.into_iter().map(Into::into).collect(),
		privacy_tiers:    tiers.into_iter().map(Into::into).collect(),
	};

	Ok((StatusCode::OK, Json(response)))
}
