use std::collections::{HashMap, HashSet};

use availability::{Availability, AvailabilitySnapshot, BedAvailability};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{CheckoutError, DbPool, Error, HoldError, RedisConn};
use hold::{Hold, HoldAction, HoldState};
use pricing::{Guest, PrivacySelection, PrivacyTiers, quote_cart};
use primitive_bed::PrimitiveBed;
use primitive_guest_type::PrimitiveGuestTypeRule;
use primitive_privacy_tier::PrimitivePrivacyTier;
use reservation::{NewPrivacyBlock, NewReservation, NewReservationGuest};
use validator::Validate;

use crate::Config;
use crate::controllers::{check_stay_range, nights_between};
use crate::schemas::checkout::{CheckoutRequest, CheckoutResponse};

/// Finalize a booking
///
/// Consumes a hold that entered payment, recomputes the price
/// server-side with the same function behind every quote, persists the
/// reservation in one transaction and finalizes the hold
#[instrument(skip(pool, conn))]
pub async fn checkout(
	State(config): State<Config>,
	State(pool): State<DbPool>,
	State(mut conn): State<RedisConn>,
	Json(request): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;
	check_stay_range(request.check_in, request.check_out)?;

	let held = Hold::get(request.hold_id, &mut conn)
		.await?
		.ok_or(HoldError::NotFound(request.hold_id))?;

	check_hold_in_payment(&held)?;
	check_hold_covers_stay(&held, &request)?;
	check_guests_assigned(&request)?;
	check_privacy_blocks(&request)?;

	let db_conn = pool.get().await?;

	// The hold only excludes concurrent shoppers; the beds themselves
	// still have to be free against persisted reservations
	let snapshot = AvailabilitySnapshot::load(
		request.check_in,
		request.check_out,
		&db_conn,
	)
	.await?;

	#[allow(clippy::cast_possible_truncation)]
	let availability = snapshot.calculate(
		request.check_in,
		request.check_out,
		request.guests.len() as u32,
	);

	check_beds_available(&availability, &request)?;

	let beds = PrimitiveBed::get_all(&db_conn).await?;
	let rules = PrimitiveGuestTypeRule::get_all(&db_conn).await?;
	let tiers = PrivacyTiers::from_table(
		PrimitivePrivacyTier::get_all(&db_conn).await?,
	);

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

	let new_reservation = NewReservation {
		check_in:                 request.check_in,
		check_out:                request.check_out,
		pension_type:             request.pension_type,
		contact_name:             request.contact_name.clone(),
		contact_email:            request.contact_email.clone(),
		additional_services_cost: request.additional_services_cost,
		total:                    quote.grand_total,
		city_tax_total:           quote.city_tax_total,
		guests:                   request
			.guests
			.iter()
			.filter_map(|guest| {
				Some(NewReservationGuest {
					guest_type: guest.guest_type.clone(),
					room_id:    guest.room_id?,
					bed_id:     guest.bed_id?,
				})
			})
			.collect(),
		privacy_blocks:           request
			.privacy_blocks
			.iter()
			.flat_map(|selection| {
				selection.bed_ids.iter().map(|&bed_id| {
					NewPrivacyBlock {
						room_id: selection.room_id,
						bed_id,
						night: selection.night,
					}
				})
			})
			.collect(),
	};

	let reservation = new_reservation.insert(&db_conn).await?;

	let hold = Hold::apply(
		held.id,
		HoldAction::Finalize,
		config.payment_hold_ttl,
		&mut conn,
	)
	.await?;

	info!(
		"checkout finalized reservation {} against hold {}",
		reservation.reservation.id, hold.id,
	);

	let response = CheckoutResponse {
		reservation_id: reservation.reservation.id,
		hold_state:     hold.state,
		quote,
	};

	Ok((StatusCode::CREATED, Json(response)))
}

fn check_hold_in_payment(held: &Hold) -> Result<(), Error> {
	if held.state != HoldState::EnteredPayment {
		return Err(
			CheckoutError::HoldNotInPayment(held.state.to_string()).into()
		);
	}

	Ok(())
}

fn check_hold_covers_stay(
	held: &Hold,
	request: &CheckoutRequest,
) -> Result<(), Error> {
	if held.check_in != request.check_in
		|| held.check_out != request.check_out
	{
		return Err(CheckoutError::StayMismatch {
			hold: (held.check_in, held.check_out),
			cart: (request.check_in, request.check_out),
		}
		.into());
	}

	Ok(())
}

fn check_guests_assigned(request: &CheckoutRequest) -> Result<(), Error> {
	let unassigned = request
		.guests
		.iter()
		.filter(|guest| guest.room_id.is_none() || guest.bed_id.is_none())
		.count();

	if unassigned > 0 {
		return Err(CheckoutError::UnassignedGuests(unassigned).into());
	}

	let mut assigned = HashSet::new();

	for guest in &request.guests {
		if let Some(bed_id) = guest.bed_id
			&& !assigned.insert(bed_id)
		{
			return Err(Error::ValidationError(format!(
				"bed {bed_id} is assigned to more than one guest"
			)));
		}
	}

	Ok(())
}

/// A privacy block must target a bed nobody sleeps in, on a night inside
/// the stay
fn check_privacy_blocks(request: &CheckoutRequest) -> Result<(), Error> {
	let assigned: HashSet<i32> =
		request.guests.iter().filter_map(|guest| guest.bed_id).collect();

	for selection in &request.privacy_blocks {
		if selection.night < request.check_in
			|| selection.night >= request.check_out
		{
			return Err(Error::ValidationError(format!(
				"privacy block on {} falls outside the stay",
				selection.night
			)));
		}

		for bed_id in &selection.bed_ids {
			if assigned.contains(bed_id) {
				return Err(Error::ValidationError(format!(
					"bed {bed_id} is assigned to a guest and cannot be \
					 privacy blocked"
				)));
			}
		}
	}

	Ok(())
}

fn check_beds_available(
	availability: &Availability,
	request: &CheckoutRequest,
) -> Result<(), Error> {
	let beds: HashMap<i32, &BedAvailability> = availability
		.rooms
		.iter()
		.flat_map(|room| room.beds.iter())
		.map(|bed| (bed.bed_id, bed))
		.collect();

	for guest in &request.guests {
		if let Some(bed_id) = guest.bed_id {
			let free = beds
				.get(&bed_id)
				.is_some_and(|bed| bed.free_entire_stay);

			if !free {
				return Err(Error::ValidationError(format!(
					"bed {bed_id} is not available for the whole stay"
				)));
			}
		}
	}

	for selection in &request.privacy_blocks {
		for &bed_id in &selection.bed_ids {
			let free = beds.get(&bed_id).is_some_and(|bed| {
				bed.nights
					.iter()
					.any(|night| night.night == selection.night && night.free)
			});

			if !free {
				return Err(Error::ValidationError(format!(
					"bed {bed_id} cannot be privacy blocked on {}",
					selection.night
				)));
			}
		}
	}

	Ok(())
}
