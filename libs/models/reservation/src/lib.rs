#[macro_use]
extern crate tracing;

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use common::{DbConn, Error};
use db::{
	PensionType,
	ReservationState,
	privacy_block,
	reservation,
	reservation_guest,
};
use diesel::pg::Pg;
use diesel::prelude::*;
use primitive_reservation::{
	PrimitivePrivacyBlock,
	PrimitiveReservation,
	PrimitiveReservationGuest,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A reservation together with its guest lines and privacy blocks
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Reservation {
	pub reservation:    PrimitiveReservation,
	pub guests:         Vec<PrimitiveReservationGuest>,
	pub privacy_blocks: Vec<PrimitivePrivacyBlock>,
}

impl Reservation {
	/// Get a [`Reservation`] given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(r_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let reservation = PrimitiveReservation::get_by_id(r_id, conn).await?;
		let guests =
			PrimitiveReservationGuest::for_reservation(r_id, conn).await?;
		let privacy_blocks =
			PrimitivePrivacyBlock::for_reservation(r_id, conn).await?;

		Ok(Self { reservation, guests, privacy_blocks })
	}

	/// Get the occupied bed ids per night for every night in `[from, to)`
	///
	/// A bed is occupied on a night if a guest of a non-cancelled reservation
	/// whose stay contains that night sleeps in it, or if a non-cancelled
	/// reservation privacy-blocks it for that night
	#[instrument(skip(conn))]
	pub async fn occupied_beds_by_night(
		from: NaiveDate,
		to: NaiveDate,
		conn: &DbConn,
	) -> Result<HashMap<NaiveDate, HashSet<i32>>, Error> {
		let spans: Vec<(i32, NaiveDate, NaiveDate)> = conn
			.interact(move |conn| {
				reservation_guest::table
					.inner_join(reservation::table)
					.filter(reservation::state.ne(ReservationState::Cancelled))
					.filter(reservation::check_in.lt(to))
					.filter(reservation::check_out.gt(from))
					.select((
						reservation_guest::bed_id,
						reservation::check_in,
						reservation::check_out,
					))
					.get_results(conn)
			})
			.await??;

		let blocks: Vec<(i32, NaiveDate)> = conn
			.interact(move |conn| {
				privacy_block::table
					.inner_join(reservation::table)
					.filter(reservation::state.ne(ReservationState::Cancelled))
					.filter(privacy_block::night.ge(from))
					.filter(privacy_block::night.lt(to))
					.select((privacy_block::bed_id, privacy_block::night))
					.get_results(conn)
			})
			.await??;

		let mut occupied: HashMap<NaiveDate, HashSet<i32>> = HashMap::new();

		for (bed_id, check_in, check_out) in spans {
			let first = check_in.max(from);
			let last = check_out.min(to);

			for night in first.iter_days().take_while(|night| *night < last) {
				occupied.entry(night).or_default().insert(bed_id);
			}
		}

		for (bed_id, night) in blocks {
			occupied.entry(night).or_default().insert(bed_id);
		}

		Ok(occupied)
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewReservationGuest {
	pub guest_type: String,
	pub room_id:    i32,
	pub bed_id:     i32,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewPrivacyBlock {
	pub room_id: i32,
	pub bed_id:  i32,
	pub night:   NaiveDate,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewReservation {
	pub check_in:                 NaiveDate,
	pub check_out:                NaiveDate,
	pub pension_type:             PensionType,
	pub contact_name:             String,
	pub contact_email:            String,
	pub additional_services_cost: Decimal,
	pub total:                    Decimal,
	pub city_tax_total:           Decimal,
	pub guests:                   Vec<NewReservationGuest>,
	pub privacy_blocks:           Vec<NewPrivacyBlock>,
}

#[derive(Insertable)]
#[diesel(table_name = reservation)]
#[diesel(check_for_backend(Pg))]
struct ReservationRow {
	state:                    ReservationState,
	check_in:                 NaiveDate,
	check_out:                NaiveDate,
	pension_type:             PensionType,
	contact_name:             String,
	contact_email:            String,
	additional_services_cost: Decimal,
	total:                    Decimal,
	city_tax_total:           Decimal,
}

#[derive(Insertable)]
#[diesel(table_name = reservation_guest)]
#[diesel(check_for_backend(Pg))]
struct GuestRow {
	reservation_id: i32,
	guest_type:     String,
	room_id:        i32,
	bed_id:         i32,
}

#[derive(Insertable)]
#[diesel(table_name = privacy_block)]
#[diesel(check_for_backend(Pg))]
struct PrivacyBlockRow {
	reservation_id: i32,
	room_id:        i32,
	bed_id:         i32,
	night:          NaiveDate,
}

impl NewReservation {
	/// Insert this [`NewReservation`] with all its guest lines and privacy
	/// blocks in a single transaction
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Reservation, Error> {
		let inserted = conn
			.interact(move |conn| {
				conn.transaction::<PrimitiveReservation, diesel::result::Error, _>(
					|conn| {
						let row = ReservationRow {
							state: ReservationState::Created,
							check_in: self.check_in,
							check_out: self.check_out,
							pension_type: self.pension_type,
							contact_name: self.contact_name,
							contact_email: self.contact_email,
							additional_services_cost: self
								.additional_services_cost,
							total: self.total,
							city_tax_total: self.city_tax_total,
						};

						let inserted: PrimitiveReservation =
							diesel::insert_into(reservation::table)
								.values(row)
								.returning(PrimitiveReservation::as_returning())
								.get_result(conn)?;

						let guest_rows: Vec<GuestRow> = self
							.guests
							.into_iter()
							.map(|guest| {
								GuestRow {
									reservation_id: inserted.id,
									guest_type:     guest.guest_type,
									room_id:        guest.room_id,
									bed_id:         guest.bed_id,
								}
							})
							.collect();

						diesel::insert_into(reservation_guest::table)
							.values(guest_rows)
							.execute(conn)?;

						let block_rows: Vec<PrivacyBlockRow> = self
							.privacy_blocks
							.into_iter()
							.map(|block| {
								PrivacyBlockRow {
									reservation_id: inserted.id,
									room_id:        block.room_id,
									bed_id:         block.bed_id,
									night:          block.night,
								}
							})
							.collect();

						diesel::insert_into(privacy_block::table)
							.values(block_rows)
							.execute(conn)?;

						Ok(inserted)
					},
				)
			})
			.await??;

		let reservation = Reservation::get_by_id(inserted.id, conn).await?;

		info!("created reservation {}", reservation.reservation.id);

		Ok(reservation)
	}
}
