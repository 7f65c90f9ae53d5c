#[macro_use]
extern crate tracing;

use std::collections::HashMap;

use common::{DbConn, Error};
use primitive_bed::PrimitiveBed;
use primitive_room::PrimitiveRoom;
use serde::{Deserialize, Serialize};

/// A room together with its ordered list of beds
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Room {
	pub room: PrimitiveRoom,
	pub beds: Vec<PrimitiveBed>,
}

impl Room {
	/// Get a [`Room`] given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(r_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let room = PrimitiveRoom::get_by_id(r_id, conn).await?;
		let beds = PrimitiveBed::for_room(r_id, conn).await?;

		Ok(Self { room, beds })
	}

	/// Get all rooms with their beds, in display order
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let rooms = PrimitiveRoom::get_all(conn).await?;
		let beds = PrimitiveBed::get_all(conn).await?;

		let mut beds_by_room: HashMap<i32, Vec<PrimitiveBed>> = HashMap::new();

		for bed in beds {
			beds_by_room.entry(bed.room_id).or_default().push(bed);
		}

		let rooms = rooms
			.into_iter()
			.map(|room| {
				let beds = beds_by_room.remove(&room.id).unwrap_or_default();

				Self { room, beds }
			})
			.collect();

		Ok(rooms)
	}
}
