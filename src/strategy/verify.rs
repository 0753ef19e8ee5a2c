//! Application verify callback contract.
//!
//! Which optional pieces reach the callback is decided by configuration flags, never by the
//! callback's shape: `pass_request` populates [`VerifyContext::request`], `profile` populates
//! [`VerifyContext::profile`], and configuring PAPE or the OAuth hybrid extension populates
//! [`VerifyContext::pape`] and [`VerifyContext::oauth`].

// self
use crate::{
	_prelude::*,
	extension::{OAuthResponse, Pape},
	profile::Profile,
	request::OpenIdRequest,
	strategy::Info,
};

/// Boxed future returned by [`Verifier::verify`].
pub type VerifyFuture<'a, U> =
	Pin<Box<dyn Future<Output = Result<Verdict<U>, BoxError>> + 'a + Send>>;

/// Maps a verified claimed identifier onto an application user.
pub trait Verifier<R>
where
	Self: Send + Sync,
	R: ?Sized + OpenIdRequest,
{
	/// Application user type.
	type User: Send;

	/// Looks up (or provisions) the user. Returning `Err` surfaces as a terminal error.
	fn verify<'a>(&'a self, ctx: VerifyContext<'a, R>) -> VerifyFuture<'a, Self::User>;
}

/// Everything the verify callback may need about a verified assertion.
pub struct VerifyContext<'a, R>
where
	R: ?Sized,
{
	/// Identifier the provider vouched for.
	pub claimed_identifier: String,
	/// Host request, when `pass_request` is enabled.
	pub request: Option<&'a R>,
	/// Normalized profile, when `profile` is enabled.
	pub profile: Option<Profile>,
	/// PAPE payload, when the PAPE extension is configured.
	pub pape: Option<Pape>,
	/// OAuth hybrid payload, when the OAuth extension is configured.
	pub oauth: Option<OAuthResponse>,
}
impl<R> Debug for VerifyContext<'_, R>
where
	R: ?Sized,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("VerifyContext")
			.field("claimed_identifier", &self.claimed_identifier)
			.field("request_set", &self.request.is_some())
			.field("profile", &self.profile)
			.field("pape", &self.pape)
			.field("oauth", &self.oauth)
			.finish()
	}
}

/// Decision returned by the verify callback.
#[derive(Clone, Debug, PartialEq)]
pub enum Verdict<U> {
	/// The user is accepted.
	Accept {
		/// Application user.
		user: U,
		/// Optional informational payload.
		info: Option<Info>,
	},
	/// The user is declined.
	Reject {
		/// Optional informational payload.
		info: Option<Info>,
	},
}
impl<U> Verdict<U> {
	/// Accepts the user without extra information.
	pub fn accept(user: U) -> Self {
		Self::Accept { user, info: None }
	}

	/// Accepts the user with an informational payload.
	pub fn accept_with(user: U, info: Info) -> Self {
		Self::Accept { user, info: Some(info) }
	}

	/// Declines without extra information.
	pub fn reject() -> Self {
		Self::Reject { info: None }
	}

	/// Declines with an informational payload.
	pub fn reject_with(info: Info) -> Self {
		Self::Reject { info: Some(info) }
	}
}
impl<U> From<Option<U>> for Verdict<U> {
	fn from(user: Option<U>) -> Self {
		match user {
			Some(user) => Self::accept(user),
			None => Self::reject(),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn missing_user_becomes_rejection() {
		assert_eq!(Verdict::from(Some("alice")), Verdict::accept("alice"));
		assert_eq!(Verdict::<&str>::from(None), Verdict::reject());
	}
}
