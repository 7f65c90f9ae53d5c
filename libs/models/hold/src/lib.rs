//! Time-boxed exclusive holds on date ranges
//!
//! A hold is the overbooking guard: while a shopper assembles a booking
//! for a date range, no other shopper can start one for an overlapping
//! range. Holds live in redis, the one store shared by every instance;
//! the state machine itself is pure so its rules can be exercised with a
//! fixed clock.

#[macro_use]
extern crate tracing;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use common::HoldError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod store;

/// The lifecycle state of a [`Hold`]
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HoldState {
	/// Live, kept alive by client heartbeats
	Active,
	/// The shopper went to the payment gateway, heartbeat expiry is
	/// suspended
	EnteredPayment,
	Cancelled,
	Expired,
	Finalized,
}

impl HoldState {
	#[must_use]
	pub fn is_terminal(self) -> bool {
		matches!(self, Self::Cancelled | Self::Expired | Self::Finalized)
	}
}

impl std::fmt::Display for HoldState {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Self::Active => "active",
			Self::EnteredPayment => "entered-payment",
			Self::Cancelled => "cancelled",
			Self::Expired => "expired",
			Self::Finalized => "finalized",
		};

		write!(f, "{name}")
	}
}

/// An explicit state transition requested on a [`Hold`]
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HoldAction {
	EnterPayment,
	Cancel,
	Finalize,
}

impl std::fmt::Display for HoldAction {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Self::EnterPayment => "enter-payment",
			Self::Cancel => "cancel",
			Self::Finalize => "finalize",
		};

		write!(f, "{name}")
	}
}

/// A time-boxed exclusive claim on a date range
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Hold {
	pub id:               Uuid,
	pub check_in:         NaiveDate,
	pub check_out:        NaiveDate,
	pub state:            HoldState,
	pub created_at:       NaiveDateTime,
	pub last_heartbeat:   NaiveDateTime,
	/// Heartbeat deadline while [`HoldState::Active`]
	pub deadline:         NaiveDateTime,
	/// Reconciliation deadline once in [`HoldState::EnteredPayment`], the
	/// backstop for abandoned payment redirects
	pub payment_deadline: Option<NaiveDateTime>,
}

impl Hold {
	/// Create a new ACTIVE hold on `[check_in, check_out)`
	#[must_use]
	pub fn new(
		check_in: NaiveDate,
		check_out: NaiveDate,
		now: NaiveDateTime,
		ttl: TimeDelta,
	) -> Self {
		Self {
			id: Uuid::new_v4(),
			check_in,
			check_out,
			state: HoldState::Active,
			created_at: now,
			last_heartbeat: now,
			deadline: now + ttl,
			payment_deadline: None,
		}
	}

	/// The nights covered by this hold
	pub fn nights(&self) -> impl Iterator<Item = NaiveDate> + use<> {
		let check_out = self.check_out;

		self.check_in.iter_days().take_while(move |night| *night < check_out)
	}

	/// Whether this hold shares at least one night with `[check_in,
	/// check_out)`
	///
	/// Ranges are half-open, a check-out day may be someone else's
	/// check-in day
	#[must_use]
	pub fn overlaps(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
		self.check_in < check_out && check_in < self.check_out
	}

	/// Whether this hold's applicable deadline has elapsed at `now`
	#[must_use]
	pub fn is_expired_at(&self, now: NaiveDateTime) -> bool {
		match self.state {
			HoldState::Active => self.deadline < now,
			HoldState::EnteredPayment => {
				self.payment_deadline.is_some_and(|deadline| deadline < now)
			},
			_ => false,
		}
	}

	/// Whether this hold still excludes other holds from its range at `now`
	#[must_use]
	pub fn blocks_range_at(&self, now: NaiveDateTime) -> bool {
		!self.state.is_terminal() && !self.is_expired_at(now)
	}

	/// Mark this hold EXPIRED if its deadline has elapsed
	///
	/// Every reader applies this before trusting a stored record, a hold
	/// past its deadline must act expired even before the sweeper gets to
	/// it. Returns whether the state changed
	pub fn apply_lazy_expiry(&mut self, now: NaiveDateTime) -> bool {
		if self.is_expired_at(now) {
			self.state = HoldState::Expired;

			true
		} else {
			false
		}
	}

	/// Extend the heartbeat deadline to `now + ttl`
	///
	/// Only ACTIVE holds have a heartbeat deadline; anything else is a
	/// no-op. Returns whether the deadline was extended
	pub fn extend(&mut self, now: NaiveDateTime, ttl: TimeDelta) -> bool {
		if self.state != HoldState::Active || self.is_expired_at(now) {
			return false;
		}

		self.last_heartbeat = now;
		self.deadline = now + ttl;

		true
	}

	/// Apply an explicit transition
	///
	/// `CANCEL` on an already-terminal hold is an idempotent no-op; the
	/// other actions require the exact source state
	pub fn transition(
		&mut self,
		action: HoldAction,
		now: NaiveDateTime,
		payment_ttl: TimeDelta,
	) -> Result<(), HoldError> {
		match (action, self.state) {
			(HoldAction::EnterPayment, HoldState::Active) => {
				self.state = HoldState::EnteredPayment;
				self.payment_deadline = Some(now + payment_ttl);

				Ok(())
			},
			(
				HoldAction::Cancel,
				HoldState::Active | HoldState::EnteredPayment,
			) => {
				self.state = HoldState::Cancelled;

				Ok(())
			},
			(HoldAction::Cancel, _) => Ok(()),
			(HoldAction::Finalize, HoldState::EnteredPayment) => {
				self.state = HoldState::Finalized;

				Ok(())
			},
			(action, state) => {
				Err(HoldError::InvalidTransition {
					from:   state.to_string(),
					action: action.to_string(),
				})
			},
		}
	}
}
