#[macro_use]
extern crate tracing;

use common::{DbConn, Error};
use db::privacy_tier;
use diesel::pg::Pg;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One position in the progressive privacy-block price table
///
/// Blocking the first bed of a room/night costs the price at position 0,
/// the second the price at position 1, and so on
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = privacy_tier)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitivePrivacyTier {
	pub id:       i32,
	pub position: i32,
	pub price:    Decimal,
}

impl PrimitivePrivacyTier {
	/// Get the full tier table in position order
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let tiers = conn
			.interact(move |conn| {
				use self::privacy_tier::dsl::*;

				privacy_tier
					.order(position.asc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(tiers)
	}
}
