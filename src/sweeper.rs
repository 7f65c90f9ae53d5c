//! Background worker that tidies expired holds
//!
//! Correctness never depends on this: every read of a hold applies lazy
//! expiry itself, and the per-night lock keys carry their own TTLs. The
//! sweeper only updates stale records so operators see EXPIRED states
//! instead of dangling ACTIVE ones.

use std::time::Duration;

use common::RedisConn;
use hold::Hold;
use tokio::time::MissedTickBehavior;

use crate::Config;

/// Spawn the periodic hold sweeper
pub fn spawn_hold_sweeper(config: &Config, conn: RedisConn) {
	let interval = config
		.sweep_interval
		.to_std()
		.unwrap_or_else(|_| Duration::from_secs(60));

	tokio::spawn(run_sweeper(interval, conn));
}

#[instrument(skip_all)]
async fn run_sweeper(interval: Duration, mut conn: RedisConn) {
	let mut ticker = tokio::time::interval(interval);
	ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

	loop {
		ticker.tick().await;

		if let Err(err) = Hold::sweep_expired(&mut conn).await {
			warn!("hold sweep failed -- {err:?}");
		}
	}
}
