// self
use openid_strategy::{
	_preludet::*,
	config::PapeOptions,
	error::Error,
	extension::{OAuthRequest, Pape},
	profile::{Email, Name},
	relying_party::Assertion,
	request::{AuthRequest, OpenIdRequest},
	strategy::{
		Action, Failure, Info, OpenIdStrategy, OpenIdStrategyBuilder, Verdict, Verifier,
		VerifyContext, VerifyFuture,
	},
};

const RETURN_URI: &str = "/auth/openid/return?openid.mode=id_res";

#[derive(Clone, Debug, Default, PartialEq)]
struct User {
	identifier: String,
	foo: Option<String>,
	display_name: Option<String>,
	name: Option<Name>,
	emails: Vec<Email>,
	pape: Option<Pape>,
	request_token: Option<String>,
}

/// Exposes host-specific request data to the verifier.
trait Tagged {
	fn foo(&self) -> Option<&str>;
}
impl Tagged for AuthRequest {
	fn foo(&self) -> Option<&str> {
		None
	}
}

/// Host request carrying application data next to the OpenID parameters.
struct TaggedRequest {
	inner: AuthRequest,
	foo: String,
}
impl OpenIdRequest for TaggedRequest {
	fn uri(&self) -> &str {
		self.inner.uri()
	}

	fn query_param(&self, name: &str) -> Option<&str> {
		self.inner.query_param(name)
	}
}
impl Tagged for TaggedRequest {
	fn foo(&self) -> Option<&str> {
		Some(&self.foo)
	}
}

#[derive(Clone)]
enum Reply {
	Accept,
	AcceptWith(Info),
	Reject,
	RejectWith(Info),
	Fail(&'static str),
}

struct TestVerifier(Reply);
impl<R> Verifier<R> for TestVerifier
where
	R: ?Sized + OpenIdRequest + Tagged,
{
	type User = User;

	fn verify<'a>(&'a self, ctx: VerifyContext<'a, R>) -> VerifyFuture<'a, Self::User> {
		Box::pin(async move {
			let profile = ctx.profile.clone();
			let user = User {
				identifier: ctx.claimed_identifier.clone(),
				foo: ctx.request.and_then(|request| request.foo()).map(ToOwned::to_owned),
				display_name: profile.as_ref().and_then(|profile| profile.display_name.clone()),
				name: profile.as_ref().map(|profile| profile.name.clone()),
				emails: profile.map(|profile| profile.emails).unwrap_or_default(),
				pape: ctx.pape.clone(),
				request_token: ctx.oauth.and_then(|oauth| oauth.request_token),
			};

			match self.0.clone() {
				Reply::Accept => Ok(Verdict::accept(user)),
				Reply::AcceptWith(info) => Ok(Verdict::accept_with(user, info)),
				Reply::Reject => Ok(Verdict::reject()),
				Reply::RejectWith(info) => Ok(Verdict::reject_with(info)),
				Reply::Fail(message) => Err(BoxError::from(message)),
			}
		})
	}
}

fn builder(
	relying_party: Arc<StaticRelyingParty>,
	reply: Reply,
) -> OpenIdStrategyBuilder<TestVerifier> {
	OpenIdStrategy::builder()
		.return_url(url(TEST_RETURN_URL))
		.relying_party(relying_party)
		.verifier(TestVerifier(reply))
}

fn strategy(relying_party: StaticRelyingParty, reply: Reply) -> OpenIdStrategy<TestVerifier> {
	builder(Arc::new(relying_party), reply).build().expect("Strategy fixture should build.")
}

fn sreg_assertion() -> Assertion {
	Assertion::authenticated(TEST_CLAIMED_IDENTIFIER)
		.with_attribute("nickname", "Johnny")
		.with_attribute("email", "username@example.com")
		.with_attribute("fullname", "John Doe")
		.with_attribute("dob", "1955-05-25")
		.with_attribute("gender", "M")
		.with_attribute("postcode", "90210")
		.with_attribute("country", "US")
		.with_attribute("language", "EN")
		.with_attribute("timezone", "America/Los_Angeles")
}

fn ax_assertion() -> Assertion {
	Assertion::authenticated(TEST_CLAIMED_IDENTIFIER)
		.with_attribute("firstname", "John")
		.with_attribute("lastname", "Doe")
		.with_attribute("email", "username@example.com")
}

fn expect_success(action: Action<User>) -> (User, Option<Info>) {
	match action {
		Action::Success { user, info } => (user, info),
		other => panic!("Expected success, got {other:?}."),
	}
}

fn assert_ax_profile(user: &User) {
	assert_eq!(user.display_name.as_deref(), Some("John Doe"));

	let name = user.name.as_ref().expect("Profile name should be populated.");

	assert_eq!(name.family_name.as_deref(), Some("Doe"));
	assert_eq!(name.given_name.as_deref(), Some("John"));
	assert_eq!(user.emails.len(), 1);
	assert_eq!(user.emails[0].value, "username@example.com");
}

#[tokio::test]
async fn authorized_request_succeeds_with_claimed_identifier() {
	let relying_party = Arc::new(StaticRelyingParty::verified());
	let strategy = builder(relying_party.clone(), Reply::Accept)
		.build()
		.expect("Strategy fixture should build.");
	let (user, info) = expect_success(strategy.authenticate(&AuthRequest::new(RETURN_URI)).await);

	assert_eq!(user.identifier, TEST_CLAIMED_IDENTIFIER);
	assert_eq!(user.foo, None);
	assert_eq!(user.name, None, "Profile must not be parsed unless enabled.");
	assert!(info.is_none());
	assert_eq!(
		relying_party.calls(),
		vec![RelyingPartyCall::VerifyAssertion { request_uri: RETURN_URI.into() }]
	);
}

#[tokio::test]
async fn authorized_request_passes_request_when_enabled() {
	let strategy = builder(Arc::new(StaticRelyingParty::verified()), Reply::Accept)
		.pass_request(true)
		.build()
		.expect("Strategy fixture should build.");
	let request = TaggedRequest { inner: AuthRequest::new(RETURN_URI), foo: "bar".into() };
	let (user, _) = expect_success(strategy.authenticate(&request).await);

	assert_eq!(user.identifier, TEST_CLAIMED_IDENTIFIER);
	assert_eq!(user.foo.as_deref(), Some("bar"));
}

#[tokio::test]
async fn request_is_withheld_unless_enabled() {
	let strategy = strategy(StaticRelyingParty::verified(), Reply::Accept);
	let request = TaggedRequest { inner: AuthRequest::new(RETURN_URI), foo: "bar".into() };
	let (user, _) = expect_success(strategy.authenticate(&request).await);

	assert_eq!(user.foo, None);
}

#[tokio::test]
async fn authorized_request_forwards_additional_info() {
	let strategy =
		strategy(StaticRelyingParty::verified(), Reply::AcceptWith(Info::message("Welcome!")));
	let (user, info) = expect_success(strategy.authenticate(&AuthRequest::new(RETURN_URI)).await);

	assert_eq!(user.identifier, TEST_CLAIMED_IDENTIFIER);
	assert_eq!(info.and_then(|info| info.message).as_deref(), Some("Welcome!"));
}

#[tokio::test]
async fn simple_registration_attributes_are_parsed_into_profile() {
	let strategy = builder(
		Arc::new(StaticRelyingParty::default().with_assertion(sreg_assertion())),
		Reply::Accept,
	)
	.profile(true)
	.build()
	.expect("Strategy fixture should build.");
	let (user, _) = expect_success(strategy.authenticate(&AuthRequest::new(RETURN_URI)).await);

	assert_eq!(user.identifier, TEST_CLAIMED_IDENTIFIER);
	assert_eq!(user.display_name.as_deref(), Some("John Doe"));
	assert_eq!(user.emails.len(), 1);
	assert_eq!(user.emails[0].value, "username@example.com");
}

#[tokio::test]
async fn attribute_exchange_attributes_are_parsed_into_profile() {
	let strategy = builder(
		Arc::new(StaticRelyingParty::default().with_assertion(ax_assertion())),
		Reply::Accept,
	)
	.profile(true)
	.build()
	.expect("Strategy fixture should build.");
	let (user, _) = expect_success(strategy.authenticate(&AuthRequest::new(RETURN_URI)).await);

	assert_eq!(user.identifier, TEST_CLAIMED_IDENTIFIER);
	assert_ax_profile(&user);
}

#[tokio::test]
async fn attribute_exchange_profile_and_request_are_both_passed() {
	let strategy = builder(
		Arc::new(StaticRelyingParty::default().with_assertion(ax_assertion())),
		Reply::Accept,
	)
	.profile(true)
	.pass_request(true)
	.build()
	.expect("Strategy fixture should build.");
	let request = TaggedRequest { inner: AuthRequest::new(RETURN_URI), foo: "bar".into() };
	let (user, _) = expect_success(strategy.authenticate(&request).await);

	assert_eq!(user.foo.as_deref(), Some("bar"));
	assert_ax_profile(&user);
}

#[tokio::test]
async fn pape_and_oauth_payloads_follow_configuration() {
	let policy = "http://schemas.openid.net/pape/policies/2007/06/multi-factor";
	let assertion = ax_assertion()
		.with_attribute("auth_policies", policy)
		.with_attribute("request_token", "rt-42");
	let with_extensions = builder(
		Arc::new(StaticRelyingParty::default().with_assertion(assertion.clone())),
		Reply::Accept,
	)
	.pape(PapeOptions::default())
	.oauth(OAuthRequest::new("www.example.com"))
	.build()
	.expect("Strategy fixture should build.");
	let (user, _) =
		expect_success(with_extensions.authenticate(&AuthRequest::new(RETURN_URI)).await);
	let pape = user.pape.expect("PAPE payload should be passed when configured.");

	assert!(pape.satisfies(policy));
	assert_eq!(user.request_token.as_deref(), Some("rt-42"));

	let without_extensions =
		strategy(StaticRelyingParty::default().with_assertion(assertion), Reply::Accept);
	let (user, _) =
		expect_success(without_extensions.authenticate(&AuthRequest::new(RETURN_URI)).await);

	assert_eq!(user.pape, None);
	assert_eq!(user.request_token, None);
}

#[tokio::test]
async fn verification_error_maps_to_error() {
	let strategy = strategy(
		StaticRelyingParty::default().with_verification_error("something went wrong"),
		Reply::Accept,
	);
	let action = strategy.authenticate(&AuthRequest::new(RETURN_URI)).await;

	match action {
		Action::Error(err @ Error::Verification { .. }) => {
			assert_eq!(err.to_string(), "Failed to verify assertion.");
			assert_eq!(
				StdError::source(&err).map(ToString::to_string).as_deref(),
				Some("something went wrong")
			);
		},
		other => panic!("Expected a verification error, got {other:?}."),
	}
}

#[tokio::test]
async fn unauthenticated_assertion_fails() {
	let strategy = strategy(
		StaticRelyingParty::default().with_assertion(Assertion::unauthenticated()),
		Reply::Accept,
	);
	let action = strategy.authenticate(&AuthRequest::new(RETURN_URI)).await;

	match action {
		Action::Fail(failure @ Failure::NotAuthenticated) =>
			assert_eq!(failure.message(), Some("OpenID authentication failed")),
		other => panic!("Expected a failure, got {other:?}."),
	}
}

#[tokio::test]
async fn rejected_user_fails() {
	let strategy = strategy(StaticRelyingParty::verified(), Reply::Reject);
	let action = strategy.authenticate(&AuthRequest::new(RETURN_URI)).await;

	assert!(matches!(action, Action::Fail(Failure::Rejected(None))));
}

#[tokio::test]
async fn rejected_user_fails_with_additional_info() {
	let strategy =
		strategy(StaticRelyingParty::verified(), Reply::RejectWith(Info::message("Unwelcome.")));
	let action = strategy.authenticate(&AuthRequest::new(RETURN_URI)).await;

	match action {
		Action::Fail(failure) => {
			assert_eq!(failure.message(), Some("Unwelcome."));
			assert_eq!(failure.info(), Some(Info::message("Unwelcome.")));
		},
		other => panic!("Expected a failure, got {other:?}."),
	}
}

#[tokio::test]
async fn verify_callback_error_maps_to_error() {
	let strategy = strategy(StaticRelyingParty::verified(), Reply::Fail("something went wrong"));
	let action = strategy.authenticate(&AuthRequest::new(RETURN_URI)).await;

	match action {
		Action::Error(err @ Error::Verify { .. }) => assert_eq!(
			StdError::source(&err).map(ToString::to_string).as_deref(),
			Some("something went wrong")
		),
		other => panic!("Expected a verify error, got {other:?}."),
	}
}

#[tokio::test]
async fn canceled_request_fails_without_verification() {
	let relying_party = Arc::new(StaticRelyingParty::verified());
	let strategy = builder(relying_party.clone(), Reply::Accept)
		.build()
		.expect("Strategy fixture should build.");
	let action =
		strategy.authenticate(&AuthRequest::new("/auth/openid/return?openid.mode=cancel")).await;

	match action {
		Action::Fail(failure @ Failure::Canceled) => {
			assert_eq!(failure.message(), Some("OpenID authentication canceled"));
			assert_eq!(
				failure.info().and_then(|info| info.message).as_deref(),
				Some("OpenID authentication canceled")
			);
		},
		other => panic!("Expected a cancellation failure, got {other:?}."),
	}

	assert!(relying_party.calls().is_empty(), "Cancel must not reach the relying party.");
}
