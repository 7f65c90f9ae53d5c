use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::sql_types::ReservationState"]
pub enum ReservationState {
	#[default]
	Created,
	Confirmed,
	Cancelled,
}

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::sql_types::PensionType"]
#[serde(rename_all = "lowercase")]
pub enum PensionType {
	/// Breakfast-only nightly rate
	#[default]
	Bb,
	/// Half-board nightly rate
	Hb,
}
