#[macro_use]
extern crate tracing;

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use common::{DbConn, Error};
use primitive_blocked_day::PrimitiveBlockedDay;
use reservation::Reservation;
use room::Room;
use serde::{Deserialize, Serialize};

/// Everything needed to answer an availability search for one date range
///
/// Loaded fresh per search and never persisted
#[derive(Clone, Debug)]
pub struct AvailabilitySnapshot {
	pub rooms:        Vec<Room>,
	/// Occupied bed ids per night
	pub occupied:     HashMap<NaiveDate, HashSet<i32>>,
	/// Admin-blocked days falling in the searched range
	pub blocked_days: Vec<NaiveDate>,
}

/// Availability of a single bed on a single night
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NightAvailability {
	pub night: NaiveDate,
	pub free:  bool,
}

/// Availability of a single bed over the whole searched range
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BedAvailability {
	pub bed_id:           i32,
	pub nights:           Vec<NightAvailability>,
	/// A bed is only sellable if it is free on every night of the stay,
	/// a mid-stay gap cannot be filled
	pub free_entire_stay: bool,
}

/// Availability of a single room over the whole searched range
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAvailability {
	pub room_id:         i32,
	pub beds:            Vec<BedAvailability>,
	/// Beds free on every night of the stay
	pub available_count: u32,
}

/// Overall search outcome, classified in priority order
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum AvailabilityStatus {
	/// An admin-blocked day falls inside the range
	#[serde(rename_all = "camelCase")]
	BlockedDays { days: Vec<NaiveDate> },
	/// No bed is free across the whole range
	SoldOut,
	/// Some beds are free, but fewer than the requested party size
	#[serde(rename_all = "camelCase")]
	TooLittleAvailability { requested: u32, available: u32, deficit: u32 },
	/// The stay can be booked
	#[serde(rename_all = "camelCase")]
	Enough { available: u32 },
}

/// The full result of an availability search
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
	#[serde(flatten)]
	pub status: AvailabilityStatus,
	pub rooms:  Vec<RoomAvailability>,
}

impl AvailabilitySnapshot {
	/// Load a snapshot for `[check_in, check_out)`
	#[instrument(skip(conn))]
	pub async fn load(
		check_in: NaiveDate,
		check_out: NaiveDate,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let rooms = Room::get_all(conn).await?;
		let occupied =
			Reservation::occupied_beds_by_night(check_in, check_out, conn)
				.await?;
		let blocked_days =
			PrimitiveBlockedDay::in_range(check_in, check_out, conn)
				.await?
				.into_iter()
				.map(|blocked| blocked.day)
				.collect();

		Ok(Self { rooms, occupied, blocked_days })
	}

	/// Compute the availability of every bed in every room for a stay of
	/// `[check_in, check_out)` with `guest_count` guests
	///
	/// The caller must guarantee that `check_out` is strictly after
	/// `check_in`
	#[must_use]
	pub fn calculate(
		&self,
		check_in: NaiveDate,
		check_out: NaiveDate,
		guest_count: u32,
	) -> Availability {
		let nights: Vec<NaiveDate> = check_in
			.iter_days()
			.take_while(|night| *night < check_out)
			.collect();

		let blocked: Vec<NaiveDate> = self
			.blocked_days
			.iter()
			.copied()
			.filter(|day| nights.contains(day))
			.collect();

		let rooms: Vec<RoomAvailability> = self
			.rooms
			.iter()
			.map(|room| self.room_availability(room, &nights, &blocked))
			.collect();

		let available: u32 = rooms.iter().map(|room| room.available_count).sum();

		let status = if !blocked.is_empty() {
			AvailabilityStatus::BlockedDays { days: blocked }
		} else if available == 0 {
			AvailabilityStatus::SoldOut
		} else if available < guest_count {
			AvailabilityStatus::TooLittleAvailability {
				requested: guest_count,
				available,
				deficit: guest_count - available,
			}
		} else {
			AvailabilityStatus::Enough { available }
		};

		debug!(
			"availability {} -> {}: {} nights, status {:?}",
			check_in,
			check_out,
			nights.len(),
			status,
		);

		Availability { status, rooms }
	}

	fn room_availability(
		&self,
		room: &Room,
		nights: &[NaiveDate],
		blocked: &[NaiveDate],
	) -> RoomAvailability {
		let beds: Vec<BedAvailability> = room
			.beds
			.iter()
			.map(|bed| {
				let nights: Vec<NightAvailability> = nights
					.iter()
					.map(|&night| {
						let occupied = self
							.occupied
							.get(&night)
							.is_some_and(|beds| beds.contains(&bed.id));
						let free = !occupied && !blocked.contains(&night);

						NightAvailability { night, free }
					})
					.collect();

				let free_entire_stay = nights.iter().all(|night| night.free);

				BedAvailability { bed_id: bed.id, nights, free_entire_stay }
			})
			.collect();

		#[allow(clippy::cast_possible_truncation)]
		let available_count =
			beds.iter().filter(|bed| bed.free_entire_stay).count() as u32;

		RoomAvailability { room_id: room.room.id, beds, available_count }
	}
}
