use chrono::{NaiveDate, NaiveDateTime};
use primitive_blocked_day::PrimitiveBlockedDay;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlockedDayRequest {
	pub day:    NaiveDate,
	#[serde(default)]
	pub reason: Option<String>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedDayResponse {
	pub id:         i32,
	pub day:        NaiveDate,
	pub reason:     Option<String>,
	pub created_at: NaiveDateTime,
}

impl From<PrimitiveBlockedDay> for BlockedDayResponse {
	fn from(blocked: PrimitiveBlockedDay) -> Self {
		Self {
			id:         blocked.id,
			day:        blocked.day,
			reason:     blocked.reason,
			created_at: blocked.created_at,
		}
	}
}
