use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{Error, HoldError, RedisConn};
use hold::{Hold, HoldAction};
use uuid::Uuid;

use crate::Config;
use crate::controllers::check_stay_range;
use crate::schemas::hold::{CreateHoldRequest, HoldResponse};

/// Acquire an exclusive hold on a date range
///
/// At most one live hold can cover any given night; a conflict is
/// reported as contention, not failure
#[instrument(skip(conn))]
pub async fn acquire_hold(
	State(config): State<Config>,
	State(mut conn): State<RedisConn>,
	Json(request): Json<CreateHoldRequest>,
) -> Result<impl IntoResponse, Error> {
	check_stay_range(request.check_in, request.check_out)?;

	let hold = Hold::acquire(
		request.check_in,
		request.check_out,
		config.hold_ttl,
		&mut conn,
	)
	.await?;

	Ok((StatusCode::CREATED, Json(HoldResponse::from(hold))))
}

/// Get the current state of a hold
#[instrument(skip(conn))]
pub async fn get_hold(
	State(mut conn): State<RedisConn>,
	Path(h_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
	let hold = Hold::get(h_id, &mut conn)
		.await?
		.ok_or(HoldError::NotFound(h_id))?;

	Ok((StatusCode::OK, Json(HoldResponse::from(hold))))
}

/// Extend an active hold's deadline
///
/// Clients fire this from a background worker at a sub-TTL interval for
/// as long as the shopping session is open. A heartbeat on a hold that
/// already reached a terminal state returns that state unchanged, the
/// client reads it and stops
#[instrument(skip(conn))]
pub async fn heartbeat_hold(
	State(config): State<Config>,
	State(mut conn): State<RedisConn>,
	Path(h_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
	let hold = Hold::heartbeat(h_id, config.hold_ttl, &mut conn).await?;

	Ok((StatusCode::OK, Json(HoldResponse::from(hold))))
}

/// Move an active hold into payment
///
/// Suspends heartbeat expiry so the hold cannot lapse while the shopper
/// is away at the payment gateway; the longer reconciliation deadline
/// takes over instead
#[instrument(skip(conn))]
pub async fn enter_payment_hold(
	State(config): State<Config>,
	State(mut conn): State<RedisConn>,
	Path(h_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
	let hold = Hold::apply(
		h_id,
		HoldAction::EnterPayment,
		config.payment_hold_ttl,
		&mut conn,
	)
	.await?;

	Ok((StatusCode::OK, Json(HoldResponse::from(hold))))
}

/// Cancel a hold and free its range immediately
#[instrument(skip(conn))]
pub async fn cancel_hold(
	State(config): State<Config>,
	State(mut conn): State<RedisConn>,
	Path(h_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
	let hold = Hold::apply(
		h_id,
		HoldAction::Cancel,
		config.payment_hold_ttl,
		&mut conn,
	)
	.await?;

	Ok((StatusCode::OK, Json(HoldResponse::from(hold))))
}
