use chrono::{NaiveDate, NaiveDateTime, Utc};
use hold::{Hold, HoldState};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHoldRequest {
	pub check_in:  NaiveDate,
	/// Exclusive check-out date
	pub check_out: NaiveDate,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldResponse {
	pub id:                 Uuid,
	pub check_in:           NaiveDate,
	pub check_out:          NaiveDate,
	pub state:              HoldState,
	pub created_at:         NaiveDateTime,
	pub last_heartbeat:     NaiveDateTime,
	pub deadline:           NaiveDateTime,
	pub payment_deadline:   Option<NaiveDateTime>,
	/// Seconds until the applicable deadline, for countdown display
	pub expires_in_seconds: Option<i64>,
}

impl From<Hold> for HoldResponse {
	fn from(hold: Hold) -> Self {
		let now = Utc::now().naive_utc();

		let expires_in_seconds = match hold.state {
			HoldState::Active => {
				Some((hold.deadline - now).num_seconds().max(0))
			},
			HoldState::EnteredPayment => {
				hold.payment_deadline
					.map(|deadline| (deadline - now).num_seconds().max(0))
			},
			_ => None,
		};

		Self {
			id: hold.id,
			check_in: hold.check_in,
			check_out: hold.check_out,
			state: hold.state,
			created_at: hold.created_at,
			last_heartbeat: hold.last_heartbeat,
			deadline: hold.deadline,
			payment_deadline: hold.payment_deadline,
			expires_in_seconds,
		}
	}
}
