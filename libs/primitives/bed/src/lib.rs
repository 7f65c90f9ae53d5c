#[macro_use]
extern crate tracing;

use chrono::NaiveDateTime;
use common::{DbConn, Error};
use db::{PensionType, bed};
use diesel::pg::Pg;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = bed)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveBed {
	pub id:         i32,
	pub room_id:    i32,
	pub name:       String,
	pub price_bb:   Decimal,
	pub price_hb:   Decimal,
	pub sort_index: i32,
	pub created_at: NaiveDateTime,
	pub updated_at: NaiveDateTime,
}

impl PrimitiveBed {
	/// The nightly base price of this bed for a given pension type
	#[must_use]
	pub fn nightly_price(&self, pension_type: PensionType) -> Decimal {
		match pension_type {
			PensionType::Bb => self.price_bb,
			PensionType::Hb => self.price_hb,
		}
	}

	/// Get a [`PrimitiveBed`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(b_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let bed = conn
			.interact(move |conn| {
				use self::bed::dsl::*;

				bed.find(b_id).select(Self::as_select()).get_result(conn)
			})
			.await??;

		Ok(bed)
	}

	/// Get all beds, grouped by room in display order
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let beds = conn
			.interact(move |conn| {
				use self::bed::dsl::*;

				bed.order((room_id.asc(), sort_index.asc()))
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(beds)
	}

	/// Get all the beds belonging to a specific room in display order
	#[instrument(skip(conn))]
	pub async fn for_room(r_id: i32, conn: &DbConn) -> Result<Vec<Self>, Error> {
		let beds = conn
			.interact(move |conn| {
				use self::bed::dsl::*;

				bed.filter(room_id.eq(r_id))
					.order(sort_index.asc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(beds)
	}
}
