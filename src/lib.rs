//! OpenID 2.0 relying-party authentication strategy.
//!
//! Incoming requests are classified by their `openid.mode`; discovery and assertion
//! verification are delegated to a pluggable relying party, and every outcome maps onto
//! exactly one host action.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod config;
pub mod error;
pub mod extension;
pub mod obs;
pub mod profile;
pub mod relying_party;
pub mod request;
pub mod store;
pub mod strategy;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and fixtures for integration tests; enabled via `cfg(test)` or the
	//! `test` feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		relying_party::{Assertion, RelyingParty, RelyingPartyConfig, RelyingPartyFuture},
		store::DiscoveredInfo,
	};

	/// Return URL used by every test strategy.
	pub const TEST_RETURN_URL: &str = "https://www.example.com/auth/openid/return";
	/// Claimed identifier asserted by [`StaticRelyingParty::verified`].
	pub const TEST_CLAIMED_IDENTIFIER: &str = "http://www.example.com/profiles/username";

	/// Canned relying party that replays fixed discovery and verification results while
	/// recording every call it receives.
	#[derive(Debug, Default)]
	pub struct StaticRelyingParty {
		discovery: Option<Result<Option<Url>, String>>,
		assertion: Option<Result<Assertion, String>>,
		calls: Mutex<Vec<RelyingPartyCall>>,
	}
	impl StaticRelyingParty {
		/// Relying party whose verification yields an authenticated assertion for
		/// [`TEST_CLAIMED_IDENTIFIER`].
		pub fn verified() -> Self {
			Self::default().with_assertion(Assertion::authenticated(TEST_CLAIMED_IDENTIFIER))
		}

		/// Replays the provided assertion on verification.
		pub fn with_assertion(mut self, assertion: Assertion) -> Self {
			self.assertion = Some(Ok(assertion));

			self
		}

		/// Fails verification with the provided message.
		pub fn with_verification_error(mut self, message: impl Into<String>) -> Self {
			self.assertion = Some(Err(message.into()));

			self
		}

		/// Resolves discovery to the provided endpoint (or to nothing).
		pub fn with_endpoint(mut self, endpoint: Option<Url>) -> Self {
			self.discovery = Some(Ok(endpoint));

			self
		}

		/// Fails discovery with the provided message.
		pub fn with_discovery_error(mut self, message: impl Into<String>) -> Self {
			self.discovery = Some(Err(message.into()));

			self
		}

		/// Returns a snapshot of the recorded calls.
		pub fn calls(&self) -> Vec<RelyingPartyCall> {
			self.calls.lock().clone()
		}
	}
	impl RelyingParty for StaticRelyingParty {
		fn authenticate<'a>(
			&'a self,
			config: &'a RelyingPartyConfig,
			identifier: &'a str,
			immediate: bool,
		) -> RelyingPartyFuture<'a, Option<Url>> {
			Box::pin(async move {
				self.calls.lock().push(RelyingPartyCall::Authenticate {
					identifier: identifier.to_owned(),
					immediate,
				});

				let endpoint = match self.discovery.clone() {
					Some(Ok(endpoint)) => endpoint,
					Some(Err(message)) => return Err(BoxError::from(message)),
					// Mirror the usual provider behavior of echoing the identifier back.
					None => Some(Url::parse(&format!(
						"http://provider.example.com/openid#{identifier}"
					))?),
				};

				if let (Some(store), Some(endpoint)) =
					(config.discovery_store.as_ref(), endpoint.as_ref())
				{
					store
						.save_discovered_info(DiscoveredInfo::new(identifier, endpoint.clone()))
						.await?;
				}

				Ok(endpoint)
			})
		}

		fn verify_assertion<'a>(
			&'a self,
			_config: &'a RelyingPartyConfig,
			request_uri: &'a str,
		) -> RelyingPartyFuture<'a, Assertion> {
			Box::pin(async move {
				self.calls
					.lock()
					.push(RelyingPartyCall::VerifyAssertion { request_uri: request_uri.to_owned() });

				match self.assertion.clone() {
					Some(Ok(assertion)) => Ok(assertion),
					Some(Err(message)) => Err(BoxError::from(message)),
					None => Err(BoxError::from("No assertion configured.")),
				}
			})
		}
	}

	/// Call recorded by [`StaticRelyingParty`].
	#[derive(Clone, Debug, PartialEq, Eq)]
	pub enum RelyingPartyCall {
		/// Discovery was requested for an identifier.
		Authenticate {
			/// User-supplied (or configured) identifier.
			identifier: String,
			/// Whether immediate mode was requested.
			immediate: bool,
		},
		/// Assertion verification was requested.
		VerifyAssertion {
			/// Request URI handed to the relying party.
			request_uri: String,
		},
	}

	/// Parses a URL fixture.
	pub fn url(value: &str) -> Url {
		Url::parse(value).expect("URL fixture should parse successfully.")
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{BoxError, Error, Result};
}

pub use url;
#[cfg(test)] use {color_eyre as _, tokio as _};
