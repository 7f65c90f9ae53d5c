//! # Ostello backend library

#[macro_use]
extern crate tracing;

use axum::extract::FromRef;
use common::{DbPool, RedisConn};

mod config;

pub mod controllers;
pub mod routes;
pub mod schemas;
pub mod sweeper;

pub use config::*;

/// Common state of the app
#[derive(Clone)]
pub struct AppState {
	pub config:           Config,
	pub database_pool:    DbPool,
	pub redis_connection: RedisConn,
}

impl FromRef<AppState> for Config {
	fn from_ref(input: &AppState) -> Self { input.config.clone() }
}

impl FromRef<AppState> for DbPool {
	fn from_ref(input: &AppState) -> Self { input.database_pool.clone() }
}

impl FromRef<AppState> for RedisConn {
	fn from_ref(input: &AppState) -> Self { input.redis_connection.clone() }
}
