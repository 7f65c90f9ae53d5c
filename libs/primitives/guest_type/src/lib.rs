#[macro_use]
extern crate tracing;

use chrono::NaiveDateTime;
use common::{DbConn, Error};
use db::guest_type_rule;
use diesel::pg::Pg;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A pricing rule for one guest category (adult/child/infant semantics),
/// matched to a guest by its label
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = guest_type_rule)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveGuestTypeRule {
	pub id:              i32,
	pub label:           String,
	pub age_min:         Option<i32>,
	pub age_max:         Option<i32>,
	pub discount_pct:    Decimal,
	pub city_tax:        bool,
	pub city_tax_amount: Decimal,
	pub created_at:      NaiveDateTime,
	pub updated_at:      NaiveDateTime,
}

impl PrimitiveGuestTypeRule {
	/// Get all guest type rules
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let rules = conn
			.interact(move |conn| {
				use self::guest_type_rule::dsl::*;

				guest_type_rule
					.order(label.asc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(rules)
	}
}

/// Find the rule matching a guest's declared type label
///
/// Labels are unique so at most one rule can match; a guest type without a
/// rule prices at the full base rate with no city tax
#[must_use]
pub fn match_label<'r>(
	rules: &'r [PrimitiveGuestTypeRule],
	label: &str,
) -> Option<&'r PrimitiveGuestTypeRule> {
	rules.iter().find(|rule| rule.label == label)
}
