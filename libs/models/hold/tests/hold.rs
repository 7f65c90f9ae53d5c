use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use common::HoldError;
use hold::{Hold, HoldAction, HoldState};

fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

fn at(s: &str) -> NaiveDateTime { s.parse().unwrap() }

fn ttl() -> TimeDelta { TimeDelta::seconds(900) }

fn payment_ttl() -> TimeDelta { TimeDelta::seconds(7200) }

fn active_hold() -> Hold {
	Hold::new(
		date("2026-08-10"),
		date("2026-08-13"),
		at("2026-08-01T12:00:00"),
		ttl(),
	)
}

#[test]
fn a_new_hold_is_active_until_its_deadline() {
	let hold = active_hold();

	assert_eq!(hold.state, HoldState::Active);
	assert_eq!(hold.deadline, at("2026-08-01T12:15:00"));
	assert_eq!(hold.nights().count(), 3);

	assert!(hold.blocks_range_at(at("2026-08-01T12:00:00")));
	assert!(hold.blocks_range_at(at("2026-08-01T12:15:00")));
	assert!(!hold.is_expired_at(at("2026-08-01T12:15:00")));
}

#[test]
fn overlap_means_sharing_at_least_one_night() {
	let hold = active_hold();

	assert!(hold.overlaps(date("2026-08-10"), date("2026-08-13")));
	assert!(hold.overlaps(date("2026-08-12"), date("2026-08-20")));
	assert!(hold.overlaps(date("2026-08-01"), date("2026-08-11")));
	assert!(hold.overlaps(date("2026-08-01"), date("2026-08-31")));
}

#[test]
fn back_to_back_stays_do_not_overlap() {
	// A check-out day is someone else's check-in day
	let hold = active_hold();

	assert!(!hold.overlaps(date("2026-08-13"), date("2026-08-15")));
	assert!(!hold.overlaps(date("2026-08-08"), date("2026-08-10")));
}

#[test]
fn a_hold_past_its_deadline_acts_expired_before_any_sweep() {
	let mut hold = active_hold();

	let past_deadline = at("2026-08-01T12:15:01");

	assert!(hold.is_expired_at(past_deadline));
	assert!(!hold.blocks_range_at(past_deadline));

	assert!(hold.apply_lazy_expiry(past_deadline));
	assert_eq!(hold.state, HoldState::Expired);

	// Already expired, nothing further to do
	assert!(!hold.apply_lazy_expiry(past_deadline));
}

#[test]
fn an_expired_hold_never_blocks_a_new_acquire() {
	let mut hold = active_hold();

	hold.apply_lazy_expiry(at("2026-08-02T00:00:00"));

	assert_eq!(hold.state, HoldState::Expired);
	assert!(!hold.blocks_range_at(at("2026-08-02T00:00:00")));
}

#[test]
fn a_heartbeat_strictly_extends_an_active_deadline() {
	let mut hold = active_hold();

	let old_deadline = hold.deadline;

	assert!(hold.extend(at("2026-08-01T12:10:00"), ttl()));

	assert!(hold.deadline > old_deadline);
	assert_eq!(hold.deadline, at("2026-08-01T12:25:00"));
	assert_eq!(hold.last_heartbeat, at("2026-08-01T12:10:00"));
}

#[test]
fn a_heartbeat_on_a_dead_hold_is_a_no_op() {
	let mut cancelled = active_hold();
	cancelled
		.transition(HoldAction::Cancel, at("2026-08-01T12:01:00"), payment_ttl())
		.unwrap();

	let deadline = cancelled.deadline;

	assert!(!cancelled.extend(at("2026-08-01T12:05:00"), ttl()));
	assert_eq!(cancelled.deadline, deadline);

	let mut expired = active_hold();
	expired.apply_lazy_expiry(at("2026-08-02T00:00:00"));

	assert!(!expired.extend(at("2026-08-02T00:00:01"), ttl()));
	assert_eq!(expired.state, HoldState::Expired);
}

#[test]
fn a_late_heartbeat_cannot_revive_a_hold() {
	let mut hold = active_hold();

	// The deadline elapsed but no reader marked the record yet
	assert!(!hold.extend(at("2026-08-01T13:00:00"), ttl()));
	assert_eq!(hold.deadline, at("2026-08-01T12:15:00"));
}

#[test]
fn entering_payment_suspends_deadline_expiry() {
	let mut hold = active_hold();

	hold.transition(
		HoldAction::EnterPayment,
		at("2026-08-01T12:10:00"),
		payment_ttl(),
	)
	.unwrap();

	assert_eq!(hold.state, HoldState::EnteredPayment);
	assert_eq!(hold.payment_deadline, Some(at("2026-08-01T14:10:00")));

	// Way past the heartbeat deadline, still blocking
	assert!(!hold.is_expired_at(at("2026-08-01T13:00:00")));
	assert!(hold.blocks_range_at(at("2026-08-01T13:00:00")));
}

#[test]
fn an_abandoned_payment_expires_at_the_reconciliation_deadline() {
	let mut hold = active_hold();

	hold.transition(
		HoldAction::EnterPayment,
		at("2026-08-01T12:10:00"),
		payment_ttl(),
	)
	.unwrap();

	let past_reconciliation = at("2026-08-01T14:10:01");

	assert!(hold.is_expired_at(past_reconciliation));
	assert!(hold.apply_lazy_expiry(past_reconciliation));
	assert_eq!(hold.state, HoldState::Expired);
}

#[test]
fn cancel_frees_the_range_from_both_live_states() {
	let mut hold = active_hold();
	hold.transition(HoldAction::Cancel, at("2026-08-01T12:01:00"), payment_ttl())
		.unwrap();

	assert_eq!(hold.state, HoldState::Cancelled);
	assert!(!hold.blocks_range_at(at("2026-08-01T12:01:00")));

	let mut in_payment = active_hold();
	in_payment
		.transition(
			HoldAction::EnterPayment,
			at("2026-08-01T12:01:00"),
			payment_ttl(),
		)
		.unwrap();
	in_payment
		.transition(HoldAction::Cancel, at("2026-08-01T12:02:00"), payment_ttl())
		.unwrap();

	assert_eq!(in_payment.state, HoldState::Cancelled);
}

#[test]
fn cancel_is_idempotent_on_terminal_holds() {
	let mut hold = active_hold();
	hold.transition(HoldAction::Cancel, at("2026-08-01T12:01:00"), payment_ttl())
		.unwrap();
	hold.transition(HoldAction::Cancel, at("2026-08-01T12:02:00"), payment_ttl())
		.unwrap();

	assert_eq!(hold.state, HoldState::Cancelled);

	let mut expired = active_hold();
	expired.apply_lazy_expiry(at("2026-08-02T00:00:00"));
	expired
		.transition(HoldAction::Cancel, at("2026-08-02T00:01:00"), payment_ttl())
		.unwrap();

	assert_eq!(expired.state, HoldState::Expired);
}

#[test]
fn only_an_active_hold_can_enter_payment() {
	let mut hold = active_hold();
	hold.transition(HoldAction::Cancel, at("2026-08-01T12:01:00"), payment_ttl())
		.unwrap();

	let err = hold
		.transition(
			HoldAction::EnterPayment,
			at("2026-08-01T12:02:00"),
			payment_ttl(),
		)
		.unwrap_err();

	assert!(matches!(err, HoldError::InvalidTransition { .. }));
}

#[test]
fn an_expired_hold_cannot_enter_payment() {
	let mut hold = active_hold();
	hold.apply_lazy_expiry(at("2026-08-02T00:00:00"));

	let err = hold
		.transition(
			HoldAction::EnterPayment,
			at("2026-08-02T00:01:00"),
			payment_ttl(),
		)
		.unwrap_err();

	assert!(matches!(err, HoldError::InvalidTransition { .. }));
}

#[test]
fn finalize_requires_entered_payment() {
	let mut hold = active_hold();

	let err = hold
		.transition(
			HoldAction::Finalize,
			at("2026-08-01T12:01:00"),
			payment_ttl(),
		)
		.unwrap_err();

	assert!(matches!(err, HoldError::InvalidTransition { .. }));

	hold.transition(
		HoldAction::EnterPayment,
		at("2026-08-01T12:02:00"),
		payment_ttl(),
	)
	.unwrap();
	hold.transition(
		HoldAction::Finalize,
		at("2026-08-01T12:30:00"),
		payment_ttl(),
	)
	.unwrap();

	assert_eq!(hold.state, HoldState::Finalized);
	assert!(!hold.blocks_range_at(at("2026-08-01T12:30:00")));
}
