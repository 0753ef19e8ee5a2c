//! Optional observability helpers for the strategy.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to wrap each authentication in a span named
//!   `openid_strategy.authenticate` carrying the `kind` (initiate/return/cancel) field, and to
//!   emit a debug event with the resulting `outcome`.
//! - Enable `metrics` to increment the `openid_strategy_action_total` counter for every
//!   attempt and resulting action, labeled by `kind` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each authentication attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthOutcome {
	/// Entry to [`OpenIdStrategy::authenticate`](crate::strategy::OpenIdStrategy::authenticate).
	Attempt,
	/// User agent redirected to the provider.
	Redirect,
	/// Authentication accepted.
	Success,
	/// Authentication rejected.
	Fail,
	/// Terminal error.
	Error,
}
impl AuthOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			AuthOutcome::Attempt => "attempt",
			AuthOutcome::Redirect => "redirect",
			AuthOutcome::Success => "success",
			AuthOutcome::Fail => "fail",
			AuthOutcome::Error => "error",
		}
	}
}
impl Display for AuthOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
