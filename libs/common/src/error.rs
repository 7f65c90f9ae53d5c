//! Library-wide error types and [`From`] impls

use std::collections::HashMap;
use std::sync::LazyLock;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use diesel::result::DatabaseErrorKind;
use thiserror::Error;
use uuid::Uuid;

/// Top level application error, can be converted into a [`Response`]
#[derive(Debug, Error)]
pub enum Error {
	/// Duplicate resource created
	#[error("{0}")]
	Duplicate(String),
	/// An error that should never happen
	#[error("{0}")]
	Infallible(String),
	/// Opaque internal server error
	#[error("internal server error")]
	InternalServerError,
	/// Resource not found
	#[error("not found - {0}")]
	NotFound(String),
	/// Any error related to an availability search
	#[error(transparent)]
	SearchError(#[from] SearchError),
	/// Any error related to a booking hold
	#[error(transparent)]
	HoldError(#[from] HoldError),
	/// Any error related to finalizing a checkout
	#[error(transparent)]
	CheckoutError(#[from] CheckoutError),
	/// Resource could not be validated
	#[error("{0}")]
	ValidationError(String),
}

impl Error {
	/// Return a unique identifying code for this error
	///
	/// When modifying this function the error code should only ever increase,
	/// an error code should never be reused once its assigned to avoid
	/// unexpectedly breaking the frontend
	fn code(&self) -> i32 {
		match self {
			Self::Duplicate(_) => 1,
			Self::Infallible(_) => 2,
			Self::InternalServerError => 3,
			Self::NotFound(_) => 4,
			Self::ValidationError(_) => 5,
			Self::SearchError(e) => {
				match e {
					SearchError::InvalidRange { .. } => 6,
				}
			},
			Self::HoldError(e) => {
				match e {
					HoldError::BookingInProgress => 7,
					HoldError::NotFound(_) => 8,
					HoldError::InvalidTransition { .. } => 9,
				}
			},
			Self::CheckoutError(e) => {
				match e {
					CheckoutError::UnassignedGuests(_) => 10,
					CheckoutError::HoldNotInPayment(_) => 11,
					CheckoutError::StayMismatch { .. } => 12,
				}
			},
		}
	}

	/// Return additional information about the error
	fn info(&self) -> Option<String> {
		match self {
			Self::Duplicate(m) | Self::NotFound(m) | Self::ValidationError(m) => {
				Some(m.to_owned())
			},
			Self::SearchError(SearchError::InvalidRange {
				check_in,
				check_out,
			}) => {
				Some(
					serde_json::json!({
						"checkIn": check_in,
						"checkOut": check_out,
					})
					.to_string(),
				)
			},
			Self::HoldError(e) => {
				match e {
					HoldError::NotFound(id) => {
						Some(serde_json::json!({"id": id}).to_string())
					},
					HoldError::InvalidTransition { from, action } => {
						Some(
							serde_json::json!({"from": from, "action": action})
								.to_string(),
						)
					},
					HoldError::BookingInProgress => None,
				}
			},
			Self::CheckoutError(e) => {
				match e {
					CheckoutError::UnassignedGuests(count) => {
						Some(serde_json::json!({"unassigned": count}).to_string())
					},
					CheckoutError::HoldNotInPayment(state) => {
						Some(serde_json::json!({"state": state}).to_string())
					},
					CheckoutError::StayMismatch { hold, cart } => {
						Some(
							serde_json::json!({"hold": hold, "cart": cart})
								.to_string(),
						)
					},
				}
			},
			_ => None,
		}
	}
}

/// Convert an error into a [`Response`]
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		error!("{self:?}");

		let message = self.to_string();

		let data = serde_json::json!({
			"message": message,
			"code": self.code(),
			"info": self.info(),
		});

		let status = match self {
			Self::Duplicate(_) => StatusCode::CONFLICT,
			Self::InternalServerError | Self::Infallible(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			},
			Self::NotFound(_) | Self::HoldError(HoldError::NotFound(_)) => {
				StatusCode::NOT_FOUND
			},
			Self::SearchError(_) => StatusCode::BAD_REQUEST,
			Self::HoldError(
				HoldError::BookingInProgress | HoldError::InvalidTransition { .. },
			) => StatusCode::CONFLICT,
			Self::CheckoutError(CheckoutError::HoldNotInPayment(_)) => {
				StatusCode::CONFLICT
			},
			Self::CheckoutError(_) | Self::ValidationError(_) => {
				StatusCode::UNPROCESSABLE_ENTITY
			},
		};

		(status, axum::Json(data)).into_response()
	}
}

/// Any error related to an availability search
#[derive(Debug, Error)]
pub enum SearchError {
	/// The requested check-out date is not strictly after the check-in date
	#[error("check-out must be strictly after check-in")]
	InvalidRange { check_in: NaiveDate, check_out: NaiveDate },
}

/// Any error related to a booking hold
#[derive(Debug, Error)]
pub enum HoldError {
	/// Another hold overlaps the requested range
	///
	/// This reflects legitimate contention between shoppers, not a fault,
	/// and the message is worded accordingly
	#[error(
		"another booking for these dates is already in progress, please try \
		 again shortly"
	)]
	BookingInProgress,
	/// No hold exists with the given id
	#[error("no hold found with id {0}")]
	NotFound(Uuid),
	/// The requested action is not valid for the hold's current state
	#[error("cannot {action} a {from} hold")]
	InvalidTransition { from: String, action: String },
}

/// Any error related to finalizing a checkout
#[derive(Debug, Error)]
pub enum CheckoutError {
	/// One or more guests have no bed assigned
	#[error("all guests must be assigned a bed before checkout")]
	UnassignedGuests(usize),
	/// The hold backing the checkout has not entered payment
	#[error("the hold for this checkout is not in payment")]
	HoldNotInPayment(String),
	/// The cart's stay range does not match the hold's range
	#[error("the cart dates do not match the held dates")]
	StayMismatch {
		hold: (NaiveDate, NaiveDate),
		cart: (NaiveDate, NaiveDate),
	},
}

/// A list of possible internal errors
///
/// API end users should never see these details
#[derive(Debug, Error)]
pub enum InternalServerError {
	/// Error executing some database operation
	#[error("database error -- {0:?}")]
	DatabaseError(diesel::result::Error),
	/// Error interacting with a database connection
	#[error("database interaction error -- {0:?}")]
	DatabaseInteractionError(deadpool_diesel::InteractError),
	/// Error acquiring database pool connection
	#[error("database pool error -- {0:?}")]
	PoolError(deadpool_diesel::PoolError),
	/// Error executing some redis operation
	#[error("redis error -- {0:?}")]
	RedisError(redis::RedisError),
	/// Error related to `serde_json`
	#[error("serde_json error -- {0:?}")]
	SerdeJsonError(serde_json::Error),
}

// Map internal server errors to application errors
impl From<InternalServerError> for Error {
	fn from(value: InternalServerError) -> Self {
		error!("internal server error -- {value}");

		Self::InternalServerError
	}
}

/// Map validation errors to application errors
impl From<validator::ValidationErrors> for Error {
	fn from(err: validator::ValidationErrors) -> Self {
		let errs = err.field_errors();
		let repr = errs
			.values()
			.map(|v| {
				v.iter()
					.map(ToString::to_string)
					.collect::<Vec<String>>()
					.join("\n")
			})
			.collect::<Vec<String>>()
			.join("\n");

		Self::ValidationError(repr)
	}
}

/// Map database interaction errors to application errors
impl From<deadpool_diesel::InteractError> for Error {
	fn from(value: deadpool_diesel::InteractError) -> Self {
		InternalServerError::DatabaseInteractionError(value).into()
	}
}

/// Map of constraint names to column names.
static CONSTRAINT_TO_COLUMN: LazyLock<HashMap<&str, &str>> =
	LazyLock::new(|| {
		HashMap::from([
			("blocked_day_day_key", "day"),
			("guest_type_rule_label_key", "label"),
			("privacy_tier_position_key", "position"),
		])
	});

/// Map database result errors to application errors.
impl From<diesel::result::Error> for Error {
	fn from(err: diesel::result::Error) -> Self {
		match &err {
			// No rows returned by query that expected at least one
			diesel::result::Error::NotFound => {
				Self::NotFound("no context provided".to_string())
			},
			// Unique constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::UniqueViolation,
				info,
			) => {
				let constraint_name = info.constraint_name().unwrap_or_default();

				match CONSTRAINT_TO_COLUMN.get(constraint_name) {
					Some(field) => {
						Self::Duplicate(format!("{field} is already in use"))
					},
					None => InternalServerError::DatabaseError(err).into(),
				}
			},
			// Foreign key constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::ForeignKeyViolation,
				info,
			) => Error::ValidationError(info.message().to_string()),
			_ => InternalServerError::DatabaseError(err).into(),
		}
	}
}

impl From<deadpool_diesel::PoolError> for Error {
	fn from(value: deadpool_diesel::PoolError) -> Self {
		InternalServerError::PoolError(value).into()
	}
}

impl From<redis::RedisError> for Error {
	fn from(err: redis::RedisError) -> Self {
		InternalServerError::RedisError(err).into()
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		InternalServerError::SerdeJsonError(err).into()
	}
}
