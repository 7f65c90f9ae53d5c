#[macro_use]
extern crate tracing;

use chrono::{NaiveDate, NaiveDateTime};
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
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = reservation)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveReservation {
	pub id:                       i32,
	pub state:                    ReservationState,
	pub check_in:                 NaiveDate,
	pub check_out:                NaiveDate,
	pub pension_type:             PensionType,
	pub contact_name:             String,
	pub contact_email:            String,
	pub additional_services_cost: Decimal,
	pub total:                    Decimal,
	pub city_tax_total:           Decimal,
	pub created_at:               NaiveDateTime,
	pub updated_at:               NaiveDateTime,
}

impl PrimitiveReservation {
	/// Get a [`PrimitiveReservation`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(r_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let reservation = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				reservation
					.find(r_id)
					.select(Self::as_select())
					.get_result(conn)
			})
			.await??;

		Ok(reservation)
	}
}

/// A guest line of a persisted reservation
///
/// Persisted guests always have a bed, checkout refuses unassigned guests
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = reservation_guest)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveReservationGuest {
	pub id:             i32,
	pub reservation_id: i32,
	pub guest_type:     String,
	pub room_id:        i32,
	pub bed_id:         i32,
}

impl PrimitiveReservationGuest {
	/// Get all the guests of a given reservation
	#[instrument(skip(conn))]
	pub async fn for_reservation(
		r_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let guests = conn
			.interact(move |conn| {
				use self::reservation_guest::dsl::*;

				reservation_guest
					.filter(reservation_id.eq(r_id))
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(guests)
	}
}

/// A bed kept empty for one night by a reservation's privacy selection
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = privacy_block)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitivePrivacyBlock {
	pub id:             i32,
	pub reservation_id: i32,
	pub room_id:        i32,
	pub bed_id:         i32,
	pub night:          NaiveDate,
}

impl PrimitivePrivacyBlock {
	/// Get all the privacy blocks of a given reservation
	#[instrument(skip(conn))]
	pub async fn for_reservation(
		r_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let blocks = conn
			.interact(move |conn| {
				use self::privacy_block::dsl::*;

				privacy_block
					.filter(reservation_id.eq(r_id))
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(blocks)
	}
}
