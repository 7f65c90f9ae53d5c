use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use room::Room;

use crate::schemas::room::RoomResponse;

/// Get all rooms with their beds, in display order
#[instrument(skip(pool))]
pub async fn get_rooms(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let rooms = Room::get_all(&conn).await?;
	let response: Vec<RoomResponse> =
		rooms.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

/// Get a single room with its beds
#[instrument(skip(pool))]
pub async fn get_room(
	State(pool): State<DbPool>,
	Path(r_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let room = Room::get_by_id(r_id, &conn).await?;

	Ok((StatusCode::OK, Json(RoomResponse::from(room))))
}
