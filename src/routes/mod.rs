use std::time::Duration;

use axum::Router;
use axum::routing::{delete, get, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::availability::search_availability;
use crate::controllers::blocked_day::{
	create_blocked_day,
	delete_blocked_day,
	get_blocked_days,
};
use crate::controllers::checkout::checkout;
use crate::controllers::healthcheck;
use crate::controllers::hold::{
	acquire_hold,
	cancel_hold,
	enter_payment_hold,
	get_hold,
	heartbeat_hold,
};
use crate::controllers::quote::{create_quote, get_pricing_reference};
use crate::controllers::room::{get_room, get_rooms};

/// Get the app router
pub fn get_app_router(state: AppState) -> Router {
	let api_routes = Router::new()
		.route("/healthcheck", get(healthcheck))
		.nest("/availability", availability_routes())
		.nest("/holds", hold_routes())
		.nest("/quotes", quote_routes())
		.nest("/checkout", checkout_routes())
		.nest("/rooms", room_routes())
		.nest("/pricing", pricing_routes())
		.nest("/blocked-days", blocked_day_routes());

	Router::new()
		.merge(api_routes)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::new(Duration::from_secs(10)))
				.layer(CompressionLayer::new()),
		)
		.with_state(state)
}

/// Availability search routes
fn availability_routes() -> Router<AppState> {
	Router::new().route("/search", post(search_availability))
}

/// Hold lifecycle routes
fn hold_routes() -> Router<AppState> {
	Router::new()
		.route("/", post(acquire_hold))
		.route("/{id}", get(get_hold))
		.route("/{id}/heartbeat", post(heartbeat_hold))
		.route("/{id}/enter-payment", post(enter_payment_hold))
		.route("/{id}/cancel", post(cancel_hold))
}

/// Live quote routes
fn quote_routes() -> Router<AppState> {
	Router::new().route("/", post(create_quote))
}

/// Checkout routes
fn checkout_routes() -> Router<AppState> {
	Router::new().route("/", post(checkout))
}

/// Room reference data routes
fn room_routes() -> Router<AppState> {
	Router::new().route("/", get(get_rooms)).route("/{id}", get(get_room))
}

/// Pricing reference data routes
fn pricing_routes() -> Router<AppState> {
	Router::new().route("/reference", get(get_pricing_reference))
}

/// Admin blocked-day routes
fn blocked_day_routes() -> Router<AppState> {
	Router::new()
		.route("/", get(get_blocked_days).post(create_blocked_day))
		.route("/{day}", delete(delete_blocked_day))
}
