//! Seam to the external OpenID relying-party library.
//!
//! Discovery, association, and signature checks live behind [`RelyingParty`]. The strategy
//! hands every call the [`RelyingPartyConfig`] derived from its options so implementations
//! stay stateless with respect to strategy configuration.

// self
use crate::{
	_prelude::*,
	config::StrategyOptions,
	extension::Extension,
	store::{AssociationStore, DiscoveryStore},
};

/// Boxed future returned by [`RelyingParty`] operations.
pub type RelyingPartyFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, BoxError>> + 'a + Send>>;

/// External relying-party library contract.
pub trait RelyingParty
where
	Self: Send + Sync,
{
	/// Performs discovery for `identifier` and returns the provider URL the user agent should
	/// be redirected to, or `None` when no OP endpoint was found.
	fn authenticate<'a>(
		&'a self,
		config: &'a RelyingPartyConfig,
		identifier: &'a str,
		immediate: bool,
	) -> RelyingPartyFuture<'a, Option<Url>>;

	/// Verifies the assertion carried by the callback request targeting `request_uri`.
	fn verify_assertion<'a>(
		&'a self,
		config: &'a RelyingPartyConfig,
		request_uri: &'a str,
	) -> RelyingPartyFuture<'a, Assertion>;
}

/// Result of assertion verification.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assertion {
	/// Whether the provider positively asserted the identity.
	pub authenticated: bool,
	/// Identifier the provider vouched for.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub claimed_identifier: Option<String>,
	/// Extension values keyed by their conventional alias (`fullname`, `email`,
	/// `firstname`, `auth_policies`, `request_token`, ...).
	#[serde(default)]
	pub attributes: BTreeMap<String, String>,
}
impl Assertion {
	/// Positive assertion for the provided claimed identifier.
	pub fn authenticated(claimed_identifier: impl Into<String>) -> Self {
		Self {
			authenticated: true,
			claimed_identifier: Some(claimed_identifier.into()),
			attributes: BTreeMap::new(),
		}
	}

	/// Assertion the provider refused to vouch for.
	pub fn unauthenticated() -> Self {
		Self::default()
	}

	/// Adds (or replaces) an extension attribute.
	pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.insert(name.into(), value.into());

		self
	}

	/// Returns an attribute value, treating empty strings as absent.
	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes.get(name).map(String::as_str).filter(|value| !value.is_empty())
	}
}

/// Relying-party settings derived from [`StrategyOptions`].
#[derive(Clone)]
pub struct RelyingPartyConfig {
	/// URL the provider sends the user agent back to.
	pub return_url: Url,
	/// Trust root presented to the provider; defaults to the return URL when absent.
	pub realm: Option<Url>,
	/// Use stateless (dumb) mode instead of associations.
	pub stateless: bool,
	/// Enforce strict checks on discovered endpoints and assertions.
	pub secure: bool,
	/// Extensions requested with every authentication request.
	pub extensions: Vec<Extension>,
	/// Optional persistence hook for associations.
	pub association_store: Option<Arc<dyn AssociationStore>>,
	/// Optional persistence hook for discovered provider information.
	pub discovery_store: Option<Arc<dyn DiscoveryStore>>,
}
impl RelyingPartyConfig {
	/// Derives the relying-party settings for the provided options.
	pub fn from_options(options: &StrategyOptions) -> Self {
		Self {
			return_url: options.return_url.clone(),
			realm: options.realm.clone(),
			stateless: options.stateless,
			secure: options.secure,
			extensions: options.extensions(),
			association_store: None,
			discovery_store: None,
		}
	}

	/// Realm to present, falling back to the return URL.
	pub fn effective_realm(&self) -> &Url {
		self.realm.as_ref().unwrap_or(&self.return_url)
	}

	/// Request arguments for every configured extension, in configuration order.
	pub fn extension_params(&self) -> Vec<(String, String)> {
		self.extensions.iter().flat_map(Extension::request_params).collect()
	}
}
impl Debug for RelyingPartyConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RelyingPartyConfig")
			.field("return_url", &self.return_url)
			.field("realm", &self.realm)
			.field("stateless", &self.stateless)
			.field("secure", &self.secure)
			.field("extensions", &self.extensions)
			.field("association_store_set", &self.association_store.is_some())
			.field("discovery_store_set", &self.discovery_store.is_some())
			.finish()
	}
}
