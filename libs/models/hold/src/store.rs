//! The shared redis store behind the hold manager
//!
//! Layout: `hold:meta:{id}` holds the serialized [`Hold`], one
//! `hold:night:{date}` lock key per night of the range holds the owning
//! id, and `hold:index` tracks known ids for the sweeper. Acquisition
//! runs as a single script so the overlap check and the night-key writes
//! cannot interleave with a concurrent acquire

use std::sync::LazyLock;

use chrono::{NaiveDate, TimeDelta, Utc};
use common::{Error, HoldError, RedisConn};
use redis::{AsyncCommands, Script};
use uuid::Uuid;

use crate::{Hold, HoldAction};

const META_PREFIX: &str = "hold:meta:";
const NIGHT_PREFIX: &str = "hold:night:";
const INDEX_KEY: &str = "hold:index";

/// How long terminal hold records stay readable
const META_RETENTION_MS: i64 = 24 * 60 * 60 * 1000;

/// Check that no night in range is held, then claim every night and write
/// the meta record, as one atomic step
///
/// KEYS: meta key, index key, night keys; ARGV: id, night ttl (ms),
/// serialized hold, meta ttl (ms)
static ACQUIRE_SCRIPT: LazyLock<Script> = LazyLock::new(|| {
	Script::new(
		r"
		for i = 3, #KEYS do
			if redis.call('EXISTS', KEYS[i]) == 1 then
				return 0
			end
		end
		for i = 3, #KEYS do
			redis.call('SET', KEYS[i], ARGV[1], 'PX', ARGV[2])
		end
		redis.call('SET', KEYS[1], ARGV[3], 'PX', ARGV[4])
		redis.call('SADD', KEYS[2], ARGV[1])
		return 1
		",
	)
});

/// Delete every night key still owned by the given id
///
/// The ownership check keeps a stale release from clobbering a successor
/// hold's keys
static RELEASE_SCRIPT: LazyLock<Script> = LazyLock::new(|| {
	Script::new(
		r"
		for i = 1, #KEYS do
			if redis.call('GET', KEYS[i]) == ARGV[1] then
				redis.call('DEL', KEYS[i])
			end
		end
		return 1
		",
	)
});

/// Re-arm the expiry of every night key still owned by the given id
///
/// KEYS: night keys; ARGV: id, ttl (ms)
static REFRESH_SCRIPT: LazyLock<Script> = LazyLock::new(|| {
	Script::new(
		r"
		for i = 1, #KEYS do
			if redis.call('GET', KEYS[i]) == ARGV[1] then
				redis.call('PEXPIRE', KEYS[i], ARGV[2])
			end
		end
		return 1
		",
	)
});

impl Hold {
	fn meta_key(h_id: Uuid) -> String { format!("{META_PREFIX}{h_id}") }

	fn night_key(night: NaiveDate) -> String {
		format!("{NIGHT_PREFIX}{night}")
	}

	/// Try to acquire a new ACTIVE hold on `[check_in, check_out)`
	///
	/// The caller must guarantee that `check_out` is strictly after
	/// `check_in`
	///
	/// # Errors
	/// Fails with [`HoldError::BookingInProgress`] if any live hold
	/// overlaps the range
	#[instrument(skip(conn))]
	pub async fn acquire(
		check_in: NaiveDate,
		check_out: NaiveDate,
		ttl: TimeDelta,
		conn: &mut RedisConn,
	) -> Result<Self, Error> {
		let now = Utc::now().naive_utc();
		let hold = Self::new(check_in, check_out, now, ttl);
		let data = serde_json::to_string(&hold)?;

		let mut invocation = ACQUIRE_SCRIPT.prepare_invoke();
		invocation.key(Self::meta_key(hold.id)).key(INDEX_KEY);

		for night in hold.nights() {
			invocation.key(Self::night_key(night));
		}

		invocation
			.arg(hold.id.to_string())
			.arg(ttl.num_milliseconds())
			.arg(data)
			.arg(META_RETENTION_MS);

		let acquired: i32 = invocation.invoke_async(conn).await?;

		if acquired == 0 {
			debug!(
				"hold on {check_in} -> {check_out} refused, range already held"
			);

			return Err(HoldError::BookingInProgress.into());
		}

		info!("acquired hold {} on {check_in} -> {check_out}", hold.id);

		Ok(hold)
	}

	/// Get a [`Hold`] from the store, applying lazy expiry
	///
	/// A record whose deadline has elapsed is returned EXPIRED (and
	/// persisted as such) even if the sweeper has not reached it yet
	#[instrument(skip(conn))]
	pub async fn get(
		h_id: Uuid,
		conn: &mut RedisConn,
	) -> Result<Option<Self>, Error> {
		let data: Option<String> = conn.get(Self::meta_key(h_id)).await?;

		let Some(data) = data else {
			return Ok(None);
		};

		let mut hold: Self = serde_json::from_str(&data)?;

		if hold.apply_lazy_expiry(Utc::now().naive_utc()) {
			debug!("hold {} lazily expired", hold.id);

			hold.save(conn).await?;
			hold.release_nights(conn).await?;
		}

		Ok(Some(hold))
	}

	/// Extend an ACTIVE hold's deadline to now + `ttl`
	///
	/// A heartbeat on a terminal hold returns the record unchanged so
	/// callers can stop their heartbeat loop; only an unknown id is an
	/// error
	///
	/// # Errors
	/// Fails with [`HoldError::NotFound`] if no hold exists with this id
	#[instrument(skip(conn))]
	pub async fn heartbeat(
		h_id: Uuid,
		ttl: TimeDelta,
		conn: &mut RedisConn,
	) -> Result<Self, Error> {
		let Some(mut hold) = Self::get(h_id, conn).await? else {
			return Err(HoldError::NotFound(h_id).into());
		};

		let now = Utc::now().naive_utc();

		if !hold.extend(now, ttl) {
			return Ok(hold);
		}

		hold.save(conn).await?;
		hold.refresh_nights(ttl, conn).await?;

		Ok(hold)
	}

	/// Apply an explicit transition to a stored hold
	///
	/// # Errors
	/// Fails with [`HoldError::NotFound`] for an unknown id and
	/// [`HoldError::InvalidTransition`] if the action does not apply to
	/// the hold's current state
	#[instrument(skip(conn))]
	pub async fn apply(
		h_id: Uuid,
		action: HoldAction,
		payment_ttl: TimeDelta,
		conn: &mut RedisConn,
	) -> Result<Self, Error> {
		let Some(mut hold) = Self::get(h_id, conn).await? else {
			return Err(HoldError::NotFound(h_id).into());
		};

		let now = Utc::now().naive_utc();

		hold.transition(action, now, payment_ttl)?;
		hold.save(conn).await?;

		match action {
			HoldAction::EnterPayment => {
				// The heartbeat countdown stops here; the night keys get
				// re-armed with the longer reconciliation deadline instead
				hold.refresh_nights(payment_ttl, conn).await?;
			},
			HoldAction::Cancel | HoldAction::Finalize => {
				hold.release_nights(conn).await?;
			},
		}

		info!("hold {} is now {}", hold.id, hold.state);

		Ok(hold)
	}

	/// Mark every expired hold EXPIRED and release its nights
	///
	/// Lazy expiry on read is what guarantees correctness; the sweep just
	/// keeps the store tidy and the logs honest. Returns the number of
	/// holds swept
	#[instrument(skip(conn))]
	pub async fn sweep_expired(conn: &mut RedisConn) -> Result<u32, Error> {
		let ids: Vec<String> = conn.smembers(INDEX_KEY).await?;

		let mut swept = 0;

		for raw in ids {
			let Ok(h_id) = raw.parse::<Uuid>() else {
				let _: i32 = conn.srem(INDEX_KEY, &raw).await?;

				continue;
			};

			let data: Option<String> =
				conn.get(Self::meta_key(h_id)).await?;

			let Some(data) = data else {
				// The meta record aged out, nothing left to track
				let _: i32 = conn.srem(INDEX_KEY, &raw).await?;

				continue;
			};

			let mut hold: Self = serde_json::from_str(&data)?;

			if hold.apply_lazy_expiry(Utc::now().naive_utc()) {
				hold.save(conn).await?;
				hold.release_nights(conn).await?;

				swept += 1;
			} else if hold.state.is_terminal() {
				let _: i32 = conn.srem(INDEX_KEY, &raw).await?;
			}
		}

		if swept > 0 {
			info!("swept {swept} expired holds");
		}

		Ok(swept)
	}

	/// Persist this hold's current state
	async fn save(&self, conn: &mut RedisConn) -> Result<(), Error> {
		let data = serde_json::to_string(self)?;

		let _: bool = conn.set(Self::meta_key(self.id), &data).await?;
		let _: bool = conn
			.pexpire(Self::meta_key(self.id), META_RETENTION_MS)
			.await?;

		Ok(())
	}

	/// Release every night key this hold still owns
	async fn release_nights(&self, conn: &mut RedisConn) -> Result<(), Error> {
		let mut invocation = RELEASE_SCRIPT.prepare_invoke();

		for night in self.nights() {
			invocation.key(Self::night_key(night));
		}

		invocation.arg(self.id.to_string());

		let _: i32 = invocation.invoke_async(conn).await?;

		Ok(())
	}

	/// Re-arm the expiry of every night key this hold still owns
	async fn refresh_nights(
		&self,
		ttl: TimeDelta,
		conn: &mut RedisConn,
	) -> Result<(), Error> {
		let mut invocation = REFRESH_SCRIPT.prepare_invoke();

		for night in self.nights() {
			invocation.key(Self::night_key(night));
		}

		invocation.arg(self.id.to_string()).arg(ttl.num_milliseconds());

		let _: i32 = invocation.invoke_async(conn).await?;

		Ok(())
	}
}
