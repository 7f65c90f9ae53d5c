use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::NaiveDate;
use common::{DbPool, Error};
use primitive_blocked_day::{NewBlockedDay, PrimitiveBlockedDay};

use crate::schemas::blocked_day::{
	BlockedDayResponse,
	CreateBlockedDayRequest,
};

/// Get all blocked days
#[instrument(skip(pool))]
pub async fn get_blocked_days(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let days = PrimitiveBlockedDay::get_all(&conn).await?;
	let response: Vec<BlockedDayResponse> =
		days.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

/// Block a day
///
/// Every bed in every room becomes unavailable on the blocked day;
/// searches touching it report the block rather than a sold-out state
#[instrument(skip(pool))]
pub async fn create_blocked_day(
	State(pool): State<DbPool>,
	Json(request): Json<CreateBlockedDayRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let new_blocked =
		NewBlockedDay { day: request.day, reason: request.reason };

	let blocked = new_blocked.insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(BlockedDayResponse::from(blocked))))
}

/// Unblock a day
#[instrument(skip(pool))]
pub async fn delete_blocked_day(
	State(pool): State<DbPool>,
	Path(day): Path<NaiveDate>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	PrimitiveBlockedDay::delete_by_day(day, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}
