//! The OpenID authentication strategy.
//!
//! [`OpenIdStrategy::authenticate`] classifies a request and resolves it to exactly one
//! [`Action`]:
//!
//! - `openid.mode=cancel` fails with [`Failure::Canceled`].
//! - Any other `openid.mode` is verified through the [`RelyingParty`]; the verified claimed
//!   identifier is then handed to the application's [`Verifier`].
//! - Requests without a mode start discovery for the identifier found in the body, the query,
//!   or the configured provider URL, and redirect to the discovered provider.

/// Actions handed back to the host.
pub mod action;
/// Builder API for assembling strategies.
pub mod builder;
/// Verify callback contract.
pub mod verify;

pub use action::*;
pub use builder::*;
pub use verify::*;

// self
use crate::{
	_prelude::*,
	config::StrategyOptions,
	error::BadRequestError,
	extension::{OAuthResponse, Pape},
	obs::{self, AuthOutcome, AuthSpan},
	profile::Profile,
	relying_party::{Assertion, RelyingParty, RelyingPartyConfig},
	request::{OpenIdRequest, RequestKind},
};

/// Authentication strategy bridging a host framework to an OpenID relying party.
pub struct OpenIdStrategy<V> {
	options: StrategyOptions,
	relying_party_config: RelyingPartyConfig,
	relying_party: Arc<dyn RelyingParty>,
	verifier: V,
}
impl<V> OpenIdStrategy<V> {
	/// Name under which hosts register the strategy.
	pub const NAME: &'static str = "openid";

	/// Creates a new builder.
	pub fn builder() -> OpenIdStrategyBuilder<V> {
		OpenIdStrategyBuilder::new()
	}

	/// Name under which hosts register the strategy.
	pub fn name(&self) -> &'static str {
		Self::NAME
	}

	/// Validated options.
	pub fn options(&self) -> &StrategyOptions {
		&self.options
	}

	/// Settings forwarded to the relying party on every call.
	pub fn relying_party_config(&self) -> &RelyingPartyConfig {
		&self.relying_party_config
	}

	/// Authenticates a request and returns the action the host must take.
	pub async fn authenticate<R>(&self, request: &R) -> Action<V::User>
	where
		R: ?Sized + OpenIdRequest,
		V: Verifier<R>,
	{
		let kind = RequestKind::classify(request);
		let span = AuthSpan::new(kind);

		obs::record_outcome(kind, AuthOutcome::Attempt);

		let action = span
			.instrument(async {
				match kind {
					RequestKind::Cancel => Action::Fail(Failure::Canceled),
					RequestKind::Return => self.verify_return(request).await,
					RequestKind::Initiate => self.initiate(request).await,
				}
			})
			.await;
		let outcome = action.outcome();

		obs::trace_outcome(kind, outcome);
		obs::record_outcome(kind, outcome);

		action
	}

	async fn verify_return<R>(&self, request: &R) -> Action<V::User>
	where
		R: ?Sized + OpenIdRequest,
		V: Verifier<R>,
	{
		let assertion = match self
			.relying_party
			.verify_assertion(&self.relying_party_config, request.uri())
			.await
		{
			Ok(assertion) => assertion,
			Err(e) => return Action::Error(Error::verification(e)),
		};

		if !assertion.authenticated {
			return Action::Fail(Failure::NotAuthenticated);
		}

		let ctx = match self.verify_context(request, assertion) {
			Some(ctx) => ctx,
			None => return Action::Error(Error::MissingClaimedIdentifier),
		};

		match self.verifier.verify(ctx).await {
			Ok(Verdict::Accept { user, info }) => Action::Success { user, info },
			Ok(Verdict::Reject { info }) => Action::Fail(Failure::Rejected(info)),
			Err(e) => Action::Error(Error::verify(e)),
		}
	}

	fn verify_context<'a, R>(
		&self,
		request: &'a R,
		assertion: Assertion,
	) -> Option<VerifyContext<'a, R>>
	where
		R: ?Sized + OpenIdRequest,
	{
		let profile = self.options.profile.then(|| Profile::from_assertion(&assertion));
		let pape = self.options.pape.as_ref().map(|_| Pape::from_assertion(&assertion));
		let oauth = self.options.oauth.as_ref().map(|_| OAuthResponse::from_assertion(&assertion));
		let claimed_identifier = assertion.claimed_identifier.filter(|id| !id.is_empty())?;

		Some(VerifyContext {
			claimed_identifier,
			request: self.options.pass_request.then_some(request),
			profile,
			pape,
			oauth,
		})
	}

	async fn initiate<R>(&self, request: &R) -> Action<V::User>
	where
		R: ?Sized + OpenIdRequest,
		V: Verifier<R>,
	{
		let Some(identifier) = self.identifier(request) else {
			return Action::Fail(Failure::BadRequest(BadRequestError::missing_identifier()));
		};

		match self.relying_party.authenticate(&self.relying_party_config, identifier, false).await
		{
			Ok(Some(provider_url)) => Action::Redirect(provider_url),
			Ok(None) => Action::Error(Error::Discovery { source: None }),
			Err(e) => Action::Error(Error::discovery(e)),
		}
	}

	/// Identifier to discover: body field, then query field, then the configured provider URL.
	fn identifier<'r, R>(&'r self, request: &'r R) -> Option<&'r str>
	where
		R: ?Sized + OpenIdRequest,
	{
		let field = self.options.identifier_field.as_str();

		request
			.body_param(field)
			.filter(|value| !value.is_empty())
			.or_else(|| request.query_param(field).filter(|value| !value.is_empty()))
			.or_else(|| self.options.provider_url.as_deref().filter(|value| !value.is_empty()))
	}
}
impl<V> Debug for OpenIdStrategy<V> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OpenIdStrategy")
			.field("name", &Self::NAME)
			.field("options", &self.options)
			.field("relying_party_config", &self.relying_party_config)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::*, request::AuthRequest};

	struct IdentityVerifier;
	impl<R> Verifier<R> for IdentityVerifier
	where
		R: ?Sized + OpenIdRequest,
	{
		type User = String;

		fn verify<'a>(&'a self, ctx: VerifyContext<'a, R>) -> VerifyFuture<'a, Self::User> {
			Box::pin(async move { Ok(Verdict::accept(ctx.claimed_identifier)) })
		}
	}

	fn strategy(relying_party: StaticRelyingParty) -> OpenIdStrategy<IdentityVerifier> {
		OpenIdStrategy::builder()
			.return_url(url(TEST_RETURN_URL))
			.relying_party(Arc::new(relying_party))
			.verifier(IdentityVerifier)
			.build()
			.expect("Strategy fixture should build.")
	}

	#[test]
	fn strategy_is_named_openid() {
		assert_eq!(strategy(StaticRelyingParty::verified()).name(), "openid");
	}

	#[test]
	fn body_identifier_wins_over_query_and_provider() {
		let strategy = OpenIdStrategy::builder()
			.return_url(url(TEST_RETURN_URL))
			.provider_url("http://provider.example.net/openid")
			.relying_party(Arc::new(StaticRelyingParty::default()))
			.verifier(IdentityVerifier)
			.build()
			.expect("Strategy fixture should build.");
		let request = AuthRequest::new("/login?openid_identifier=query.example.org")
			.with_body_param("openid_identifier", "body.example.org");

		assert_eq!(strategy.identifier(&request), Some("body.example.org"));

		let request = AuthRequest::new("/login?openid_identifier=query.example.org")
			.with_body_param("openid_identifier", "");

		assert_eq!(strategy.identifier(&request), Some("query.example.org"));
		assert_eq!(
			strategy.identifier(&AuthRequest::new("/login")),
			Some("http://provider.example.net/openid")
		);
	}

	#[tokio::test]
	async fn empty_claimed_identifier_is_an_error() {
		let strategy = strategy(StaticRelyingParty::default().with_assertion(Assertion {
			authenticated: true,
			claimed_identifier: Some(String::new()),
			attributes: BTreeMap::new(),
		}));
		let action = strategy.authenticate(&AuthRequest::new("/return?openid.mode=id_res")).await;

		assert!(matches!(action, Action::Error(Error::MissingClaimedIdentifier)));
	}
}
