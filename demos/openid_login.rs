//! Walks through both legs of an OpenID login: the initial redirect to the provider and the
//! provider's return to the application.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use url::Url;
// self
use openid_strategy::{
	error::BoxError,
	relying_party::{Assertion, RelyingParty, RelyingPartyConfig, RelyingPartyFuture},
	request::{AuthRequest, OpenIdRequest},
	store::{DiscoveredInfo, DiscoveryStore, MemoryStore},
	strategy::{Action, Info, OpenIdStrategy, Verdict, Verifier, VerifyContext, VerifyFuture},
};

/// Relying party that resolves every identifier to a fixed provider and trusts every return.
struct DemoRelyingParty {
	endpoint: Url,
}
impl RelyingParty for DemoRelyingParty {
	fn authenticate<'a>(
		&'a self,
		config: &'a RelyingPartyConfig,
		identifier: &'a str,
		immediate: bool,
	) -> RelyingPartyFuture<'a, Option<Url>> {
		Box::pin(async move {
			if let Some(store) = config.discovery_store.as_ref() {
				store
					.save_discovered_info(DiscoveredInfo::new(identifier, self.endpoint.clone()))
					.await?;
			}

			let mode = if immediate { "checkid_immediate" } else { "checkid_setup" };
			let mut redirect = self.endpoint.clone();

			redirect
				.query_pairs_mut()
				.append_pair("openid.ns", "http://specs.openid.net/auth/2.0")
				.append_pair("openid.mode", mode)
				.append_pair("openid.claimed_id", identifier)
				.append_pair("openid.identity", identifier)
				.append_pair("openid.return_to", config.return_url.as_str())
				.append_pair("openid.realm", config.effective_realm().as_str())
				.extend_pairs(config.extension_params());

			Ok(Some(redirect))
		})
	}

	fn verify_assertion<'a>(
		&'a self,
		_config: &'a RelyingPartyConfig,
		request_uri: &'a str,
	) -> RelyingPartyFuture<'a, Assertion> {
		Box::pin(async move {
			let request = AuthRequest::new(request_uri);
			let claimed_id = request
				.query_param("openid.claimed_id")
				.ok_or_else(|| BoxError::from("Return request carries no claimed identifier."))?;

			Ok(Assertion::authenticated(claimed_id)
				.with_attribute("fullname", "John Doe")
				.with_attribute("email", "username@example.com"))
		})
	}
}

/// Accepts every verified identifier and greets the user by display name.
struct WelcomeVerifier;
impl<R> Verifier<R> for WelcomeVerifier
where
	R: ?Sized + OpenIdRequest,
{
	type User = String;

	fn verify<'a>(&'a self, ctx: VerifyContext<'a, R>) -> VerifyFuture<'a, Self::User> {
		Box::pin(async move {
			let greeting = ctx
				.profile
				.and_then(|profile| profile.display_name)
				.map(|name| format!("Welcome, {name}!"))
				.unwrap_or_else(|| "Welcome!".into());

			Ok(Verdict::accept_with(ctx.claimed_identifier, Info::message(greeting)))
		})
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let discoveries = Arc::new(MemoryStore::default());
	let strategy = OpenIdStrategy::builder()
		.return_url(Url::parse("https://app.example.com/auth/openid/return")?)
		.profile(true)
		.relying_party(Arc::new(DemoRelyingParty {
			endpoint: Url::parse("https://provider.example.com/openid/login")?,
		}))
		.discovery_store(discoveries.clone())
		.verifier(WelcomeVerifier)
		.build()?;
	let login = AuthRequest::new("/auth/openid")
		.with_form_body(b"openid_identifier=https%3A%2F%2Fjohn.example.org%2F");
	let redirect = match strategy.authenticate(&login).await {
		Action::Redirect(url) => url,
		other => return Err(color_eyre::eyre::eyre!("Expected a redirect, got {other:?}.")),
	};

	println!("Send your user to {redirect}.");

	if let Some(info) = discoveries.load_discovered_info("https://john.example.org/").await? {
		println!("Discovered endpoint {} for {}.", info.endpoint, info.claimed_identifier);
	}

	// Simulate the provider sending the user back with a positive assertion.
	let callback = AuthRequest::new(
		"/auth/openid/return?openid.mode=id_res&openid.claimed_id=https%3A%2F%2Fjohn.example.org%2F",
	);

	match strategy.authenticate(&callback).await {
		Action::Success { user, info } => println!(
			"Signed in {user}: {}",
			info.and_then(|info| info.message).unwrap_or_default()
		),
		Action::Fail(failure) => eprintln!("Login failed: {:?}.", failure.message()),
		Action::Error(e) => return Err(e.into()),
		Action::Redirect(url) => eprintln!("Unexpected redirect to {url}."),
	}

	Ok(())
}
