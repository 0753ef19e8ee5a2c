//! Host actions produced by the strategy.

// crates.io
use serde_json::{Map, Value};
// self
use crate::{_prelude::*, error::BadRequestError, obs::AuthOutcome};

/// Message attached to canceled authentications.
pub const CANCELED_MESSAGE: &str = "OpenID authentication canceled";
/// Message attached to assertions the provider did not authenticate.
pub const NOT_AUTHENTICATED_MESSAGE: &str = "OpenID authentication failed";

/// The single action a host must take for a request.
#[derive(Debug)]
pub enum Action<U> {
	/// Send the user agent to the provider.
	Redirect(Url),
	/// Authentication accepted.
	Success {
		/// Application user returned by the verify callback.
		user: U,
		/// Optional informational payload from the verify callback.
		info: Option<Info>,
	},
	/// Authentication rejected.
	Fail(Failure),
	/// Terminal error.
	Error(Error),
}
impl<U> Action<U> {
	/// Outcome label for observability.
	pub const fn outcome(&self) -> AuthOutcome {
		match self {
			Action::Redirect(_) => AuthOutcome::Redirect,
			Action::Success { .. } => AuthOutcome::Success,
			Action::Fail(_) => AuthOutcome::Fail,
			Action::Error(_) => AuthOutcome::Error,
		}
	}

	/// Redirect target, when the action is a redirect.
	pub fn redirect_url(&self) -> Option<&Url> {
		match self {
			Action::Redirect(url) => Some(url),
			_ => None,
		}
	}

	/// Consumes the action and returns the accepted user, if any.
	pub fn into_user(self) -> Option<U> {
		match self {
			Action::Success { user, .. } => Some(user),
			_ => None,
		}
	}
}

/// Why authentication was rejected.
#[derive(Clone, Debug, PartialEq)]
pub enum Failure {
	/// The user canceled at the provider.
	Canceled,
	/// No identifier could be found for an initiate request.
	BadRequest(BadRequestError),
	/// The provider did not authenticate the assertion.
	NotAuthenticated,
	/// The verify callback declined the user.
	Rejected(Option<Info>),
}
impl Failure {
	/// Human-readable message, when one exists.
	pub fn message(&self) -> Option<&str> {
		match self {
			Failure::Canceled => Some(CANCELED_MESSAGE),
			Failure::BadRequest(err) => Some(&err.message),
			Failure::NotAuthenticated => Some(NOT_AUTHENTICATED_MESSAGE),
			Failure::Rejected(info) => info.as_ref().and_then(|info| info.message.as_deref()),
		}
	}

	/// Informational payload handed to the host alongside the failure.
	pub fn info(&self) -> Option<Info> {
		match self {
			Failure::Rejected(info) => info.clone(),
			_ => self.message().map(Info::message),
		}
	}
}

/// Informational payload exchanged between the verify callback and the host.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Info {
	/// Human-readable message (flash message, log line, ...).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	/// Free-form fields.
	#[serde(flatten)]
	pub fields: Map<String, Value>,
}
impl Info {
	/// Creates a payload carrying only a message.
	pub fn message(message: impl Into<String>) -> Self {
		Self { message: Some(message.into()), fields: Map::new() }
	}

	/// Adds a free-form field.
	pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.fields.insert(key.into(), value.into());

		self
	}

	/// Looks up a free-form field.
	pub fn field(&self, key: &str) -> Option<&Value> {
		self.fields.get(key)
	}
}
