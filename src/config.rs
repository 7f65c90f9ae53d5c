use chrono::TimeDelta;
use common::RedisConn;
use deadpool_diesel::postgres::{Manager, Pool};

#[derive(Clone, Debug)]
pub struct Config {
	pub database_url: String,
	pub redis_url:    String,

	/// Heartbeat-extendable lifetime of an ACTIVE hold
	pub hold_ttl:         TimeDelta,
	/// Reconciliation lifetime of an ENTERED_PAYMENT hold
	pub payment_hold_ttl: TimeDelta,
	/// How often the background sweeper tidies expired holds
	pub sweep_interval:   TimeDelta,
}

impl Config {
	fn get_env_var(var: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| panic!("{var} must be set"))
	}

	fn get_env_var_or(var: &str, default: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| default.to_string())
	}

	fn get_seconds_var_or(var: &str, default: &str) -> TimeDelta {
		TimeDelta::seconds(
			Self::get_env_var_or(var, default)
				.parse::<i64>()
				.unwrap_or_else(|_| panic!("{var} must be a number of seconds")),
		)
	}

	/// Create a new [`Config`] from environment variables
	///
	/// # Panics
	/// Panics if a required environment variable is missing or malformed
	#[must_use]
	pub fn from_env() -> Self {
		let database_url = Self::get_env_var("DATABASE_URL");
		let redis_url = Self::get_env_var("REDIS_URL");

		let hold_ttl = Self::get_seconds_var_or("HOLD_TTL_SECONDS", "900");
		let payment_hold_ttl =
			Self::get_seconds_var_or("PAYMENT_HOLD_TTL_SECONDS", "7200");
		let sweep_interval =
			Self::get_seconds_var_or("HOLD_SWEEP_INTERVAL_SECONDS", "60");

		Self {
			database_url,
			redis_url,
			hold_ttl,
			payment_hold_ttl,
			sweep_interval,
		}
	}

	/// Create a database pool for the given config
	///
	/// # Panics
	/// Panics if creating the pool fails
	#[must_use]
	pub fn create_database_pool(&self) -> Pool {
		let manager = Manager::new(
			self.database_url.to_string(),
			deadpool_diesel::Runtime::Tokio1,
		);

		Pool::builder(manager).build().unwrap()
	}

	/// Create a redis connection for the given config
	///
	/// # Panics
	/// Panics if the redis server cannot be reached
	pub async fn create_redis_connection(&self) -> RedisConn {
		redis::Client::open(self.redis_url.as_str())
			.expect("COULD NOT CREATE REDIS CLIENT")
			.get_multiplexed_async_connection()
			.await
			.expect("COULD NOT CONNECT TO REDIS")
	}
}
