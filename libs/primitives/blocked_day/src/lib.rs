#[macro_use]
extern crate tracing;

use chrono::{NaiveDate, NaiveDateTime};
use common::{DbConn, Error};
use db::blocked_day;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// An admin-imposed block on a single day
///
/// Every bed in every room is unavailable on a blocked day
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = blocked_day)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveBlockedDay {
	pub id:         i32,
	pub day:        NaiveDate,
	pub reason:     Option<String>,
	pub created_at: NaiveDateTime,
}

impl PrimitiveBlockedDay {
	/// Get all blocked days
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let days = conn
			.interact(move |conn| {
				use self::blocked_day::dsl::*;

				blocked_day
					.order(day.asc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(days)
	}

	/// Get the blocked days falling in `[from, to)`
	#[instrument(skip(conn))]
	pub async fn in_range(
		from: NaiveDate,
		to: NaiveDate,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let days = conn
			.interact(move |conn| {
				use self::blocked_day::dsl::*;

				blocked_day
					.filter(day.ge(from))
					.filter(day.lt(to))
					.order(day.asc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(days)
	}

	/// Delete a blocked day given its date
	#[instrument(skip(conn))]
	pub async fn delete_by_day(
		b_day: NaiveDate,
		conn: &DbConn,
	) -> Result<(), Error> {
		conn.interact(move |conn| {
			use self::blocked_day::dsl::*;

			diesel::delete(blocked_day.filter(day.eq(b_day))).execute(conn)
		})
		.await??;

		info!("deleted blocked day {b_day}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = blocked_day)]
#[diesel(check_for_backend(Pg))]
pub struct NewBlockedDay {
	pub day:    NaiveDate,
	pub reason: Option<String>,
}

impl NewBlockedDay {
	/// Insert this [`NewBlockedDay`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<PrimitiveBlockedDay, Error> {
		let blocked = conn
			.interact(|conn| {
				use self::blocked_day::dsl::*;

				diesel::insert_into(blocked_day)
					.values(self)
					.returning(PrimitiveBlockedDay::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created blocked day {blocked:?}");

		Ok(blocked)
	}
}
