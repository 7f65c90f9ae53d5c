use std::collections::{HashMap, HashSet};

use availability::{AvailabilitySnapshot, AvailabilityStatus};
use chrono::{NaiveDate, NaiveDateTime};
use primitive_bed::PrimitiveBed;
use primitive_room::PrimitiveRoom;
use room::Room;
use rust_decimal::Decimal;

fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

fn room(id: i32, bed_ids: &[i32]) -> Room {
	let room = PrimitiveRoom {
		id,
		name: format!("room {id}"),
		description: None,
		sort_index: id,
		created_at: NaiveDateTime::default(),
		updated_at: NaiveDateTime::default(),
	};

	let beds = bed_ids
		.iter()
		.map(|&bed_id| {
			PrimitiveBed {
				id:         bed_id,
				room_id:    id,
				name:       format!("bed {bed_id}"),
				price_bb:   Decimal::from(50),
				price_hb:   Decimal::from(70),
				sort_index: bed_id,
				created_at: NaiveDateTime::default(),
				updated_at: NaiveDateTime::default(),
			}
		})
		.collect();

	Room { room, beds }
}

fn snapshot(
	rooms: Vec<Room>,
	occupied: &[(&str, &[i32])],
	blocked_days: &[&str],
) -> AvailabilitySnapshot {
	let occupied: HashMap<NaiveDate, HashSet<i32>> = occupied
		.iter()
		.map(|(night, beds)| (date(night), beds.iter().copied().collect()))
		.collect();

	let blocked_days = blocked_days.iter().map(|day| date(day)).collect();

	AvailabilitySnapshot { rooms, occupied, blocked_days }
}

#[test]
fn empty_property_is_fully_available() {
	let snapshot = snapshot(vec![room(1, &[1, 2]), room(2, &[3])], &[], &[]);

	let result = snapshot.calculate(date("2026-08-10"), date("2026-08-13"), 2);

	assert_eq!(result.status, AvailabilityStatus::Enough { available: 3 });
	assert_eq!(result.rooms.len(), 2);

	for room in &result.rooms {
		for bed in &room.beds {
			assert_eq!(bed.nights.len(), 3);
			assert!(bed.free_entire_stay);
			assert!(bed.nights.iter().all(|night| night.free));
		}
	}
}

#[test]
fn bed_occupied_one_night_is_not_offered_for_the_range() {
	let snapshot = snapshot(
		vec![room(1, &[1, 2])],
		&[("2026-08-11", &[1])],
		&[],
	);

	let result = snapshot.calculate(date("2026-08-10"), date("2026-08-13"), 1);

	assert_eq!(result.status, AvailabilityStatus::Enough { available: 1 });

	let beds = &result.rooms[0].beds;

	assert!(!beds[0].free_entire_stay);
	assert!(beds[1].free_entire_stay);

	// The partially occupied bed is still free on the other nights
	assert!(beds[0].nights[0].free);
	assert!(!beds[0].nights[1].free);
	assert!(beds[0].nights[2].free);

	assert_eq!(result.rooms[0].available_count, 1);
}

#[test]
fn occupancy_on_the_checkout_day_does_not_matter() {
	// Stays are half-open: a bed taken from the 13th onwards is free for
	// a stay checking out on the 13th
	let snapshot = snapshot(
		vec![room(1, &[1])],
		&[("2026-08-13", &[1])],
		&[],
	);

	let result = snapshot.calculate(date("2026-08-10"), date("2026-08-13"), 1);

	assert_eq!(result.status, AvailabilityStatus::Enough { available: 1 });
	assert!(result.rooms[0].beds[0].free_entire_stay);
}

#[test]
fn fully_occupied_range_is_sold_out() {
	let snapshot = snapshot(
		vec![room(1, &[1, 2])],
		&[("2026-08-10", &[1, 2]), ("2026-08-11", &[1, 2])],
		&[],
	);

	let result = snapshot.calculate(date("2026-08-10"), date("2026-08-12"), 2);

	assert_eq!(result.status, AvailabilityStatus::SoldOut);
}

#[test]
fn partial_occupancy_everywhere_is_still_sold_out() {
	// Each bed is free on some night, but none across the whole range
	let snapshot = snapshot(
		vec![room(1, &[1, 2])],
		&[("2026-08-10", &[1]), ("2026-08-11", &[2])],
		&[],
	);

	let result = snapshot.calculate(date("2026-08-10"), date("2026-08-12"), 1);

	assert_eq!(result.status, AvailabilityStatus::SoldOut);
}

#[test]
fn four_guests_for_three_beds_reports_the_deficit() {
	let snapshot = snapshot(vec![room(1, &[1, 2]), room(2, &[3])], &[], &[]);

	let result = snapshot.calculate(date("2026-08-10"), date("2026-08-12"), 4);

	assert_eq!(
		result.status,
		AvailabilityStatus::TooLittleAvailability {
			requested: 4,
			available: 3,
			deficit:   1,
		},
	);
}

#[test]
fn blocked_day_takes_priority_over_every_other_status() {
	let snapshot = snapshot(
		vec![room(1, &[1])],
		&[("2026-08-10", &[1]), ("2026-08-11", &[1])],
		&["2026-08-11"],
	);

	let result = snapshot.calculate(date("2026-08-10"), date("2026-08-12"), 1);

	assert_eq!(
		result.status,
		AvailabilityStatus::BlockedDays { days: vec![date("2026-08-11")] },
	);
}

#[test]
fn blocked_day_marks_every_bed_unavailable_that_night() {
	let snapshot =
		snapshot(vec![room(1, &[1, 2])], &[], &["2026-08-11"]);

	let result = snapshot.calculate(date("2026-08-10"), date("2026-08-13"), 1);

	for bed in &result.rooms[0].beds {
		assert!(bed.nights[0].free);
		assert!(!bed.nights[1].free);
		assert!(bed.nights[2].free);
		assert!(!bed.free_entire_stay);
	}

	assert_eq!(result.rooms[0].available_count, 0);
}

#[test]
fn blocked_day_outside_the_range_is_ignored() {
	let snapshot = snapshot(vec![room(1, &[1])], &[], &["2026-08-20"]);

	let result = snapshot.calculate(date("2026-08-10"), date("2026-08-12"), 1);

	assert_eq!(result.status, AvailabilityStatus::Enough { available: 1 });
}

#[test]
fn single_night_stay_is_valid() {
	let snapshot = snapshot(
		vec![room(1, &[1, 2])],
		&[("2026-08-10", &[2])],
		&[],
	);

	let result = snapshot.calculate(date("2026-08-10"), date("2026-08-11"), 1);

	assert_eq!(result.status, AvailabilityStatus::Enough { available: 1 });
	assert_eq!(result.rooms[0].beds[0].nights.len(), 1);
}

#[test]
fn available_beds_are_free_on_every_constituent_night() {
	// A bed counted as available must have every night flagged free
	let snapshot = snapshot(
		vec![room(1, &[1, 2, 3])],
		&[("2026-08-10", &[1]), ("2026-08-12", &[2])],
		&[],
	);

	let result = snapshot.calculate(date("2026-08-10"), date("2026-08-13"), 1);

	for room in &result.rooms {
		for bed in &room.beds {
			assert_eq!(
				bed.free_entire_stay,
				bed.nights.iter().all(|night| night.free),
			);
		}

		let full_range = room
			.beds
			.iter()
			.filter(|bed| bed.free_entire_stay)
			.count();

		assert_eq!(room.available_count, u32::try_from(full_range).unwrap());
	}
}
