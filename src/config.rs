//! Strategy options shared by the builder and serialized configuration.
//!
//! Options can be assembled through
//! [`OpenIdStrategyBuilder`](crate::strategy::OpenIdStrategyBuilder) or loaded from JSON via
//! [`StrategyOptions::from_json_slice`], which reports the path of any malformed field.

// crates.io
use serde::Deserializer;
// self
use crate::{
	_prelude::*,
	error::ConfigError,
	extension::{
		AttributeExchange, Extension, OAuthRequest, PapeRequest, SimpleRegistration,
		UserInterface,
	},
	request::DEFAULT_IDENTIFIER_FIELD,
};

/// Validated strategy configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyOptions {
	/// URL the provider redirects back to after authentication.
	pub return_url: Url,
	/// Trust root presented to the provider.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub realm: Option<Url>,
	/// Identifier used when the request supplies none (e.g. a single fixed provider).
	///
	/// Kept as configured; discovery receives the exact string.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub provider_url: Option<String>,
	/// Body/query field holding a user-supplied identifier.
	#[serde(default = "default_identifier_field")]
	pub identifier_field: String,
	/// Hand the host request to the verify callback.
	#[serde(default)]
	pub pass_request: bool,
	/// Request SREG + AX attributes and hand a parsed profile to the verify callback.
	#[serde(default)]
	pub profile: bool,
	/// Skip associations and verify every assertion directly with the provider.
	#[serde(default)]
	pub stateless: bool,
	/// Enforce strict relying-party checks.
	#[serde(default = "default_secure")]
	pub secure: bool,
	/// Provider Authentication Policy Extension settings.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pape: Option<PapeOptions>,
	/// User Interface extension hints.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ui: Option<UserInterface>,
	/// OpenID + OAuth hybrid settings.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub oauth: Option<OAuthRequest>,
}
impl StrategyOptions {
	/// Creates options with defaults for everything but the return URL.
	pub fn new(return_url: Url) -> Self {
		Self {
			return_url,
			realm: None,
			provider_url: None,
			identifier_field: default_identifier_field(),
			pass_request: false,
			profile: false,
			stateless: false,
			secure: default_secure(),
			pape: None,
			ui: None,
			oauth: None,
		}
	}

	/// Parses and validates options from JSON.
	pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
		let mut de = serde_json::Deserializer::from_slice(bytes);
		let options: Self = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| ConfigError::InvalidOptions { source })?;

		options.validate()?;

		Ok(options)
	}

	/// Checks invariants that serde cannot express.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.identifier_field.trim().is_empty() {
			return Err(ConfigError::EmptyIdentifierField);
		}
		if self.oauth.as_ref().is_some_and(|oauth| oauth.consumer_key.trim().is_empty()) {
			return Err(ConfigError::EmptyConsumerKey);
		}

		Ok(())
	}

	/// Extensions implied by these options, in request order.
	pub fn extensions(&self) -> Vec<Extension> {
		let mut extensions = Vec::new();

		if self.profile {
			extensions.push(Extension::SimpleRegistration(SimpleRegistration::profile()));
			extensions.push(Extension::AttributeExchange(AttributeExchange::profile()));
		}
		if let Some(ui) = self.ui.as_ref() {
			extensions.push(Extension::UserInterface(ui.clone()));
		}
		if let Some(pape) = self.pape.as_ref() {
			extensions.push(Extension::Pape(pape.to_request()));
		}
		if let Some(oauth) = self.oauth.as_ref() {
			extensions.push(Extension::OAuth(oauth.clone()));
		}

		extensions
	}
}

/// PAPE settings as they appear in configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PapeOptions {
	/// Maximum authentication age in seconds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_auth_age: Option<u32>,
	/// Preferred policy URIs; accepts either a list or a space-separated string.
	#[serde(default, deserialize_with = "deserialize_policies")]
	pub preferred_auth_policies: Vec<String>,
}
impl PapeOptions {
	/// Converts configuration into the request descriptor.
	pub fn to_request(&self) -> PapeRequest {
		PapeRequest {
			max_auth_age: self.max_auth_age.map(|secs| Duration::seconds(i64::from(secs))),
			preferred_auth_policies: self.preferred_auth_policies.clone(),
		}
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PolicyList {
	Joined(String),
	List(Vec<String>),
}

fn deserialize_policies<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let policies = match PolicyList::deserialize(deserializer)? {
		PolicyList::Joined(joined) => joined.split_whitespace().map(ToOwned::to_owned).collect(),
		PolicyList::List(list) => list,
	};

	Ok(policies)
}

fn default_identifier_field() -> String {
	DEFAULT_IDENTIFIER_FIELD.to_owned()
}

fn default_secure() -> bool {
	true
}
