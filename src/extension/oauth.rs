//! OpenID + OAuth hybrid 1.0 request descriptor and response payload.

// self
use crate::{_prelude::*, extension::ExtensionParams, relying_party::Assertion};

/// OAuth hybrid extension namespace URI.
pub const NAMESPACE: &str = "http://specs.openid.net/extensions/oauth/1.0";

/// Hybrid request asking the provider to pre-authorize an OAuth request token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthRequest {
	/// OAuth consumer key registered with the provider.
	pub consumer_key: String,
	/// Provider-specific scope string.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub scope: Option<String>,
}
impl OAuthRequest {
	/// Creates a request for the provided consumer key.
	pub fn new(consumer_key: impl Into<String>) -> Self {
		Self { consumer_key: consumer_key.into(), scope: None }
	}

	/// Sets the requested scope.
	pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = Some(scope.into());

		self
	}

	pub(crate) fn write_params(&self, params: &mut ExtensionParams) {
		params.push("consumer", self.consumer_key.as_str());

		if let Some(scope) = self.scope.as_deref() {
			params.push("scope", scope);
		}
	}
}

/// Hybrid payload returned with a verified assertion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthResponse {
	/// Pre-authorized OAuth request token.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub request_token: Option<String>,
}
impl OAuthResponse {
	/// Extracts the hybrid payload from assertion attributes.
	pub fn from_assertion(assertion: &Assertion) -> Self {
		Self { request_token: assertion.attribute("request_token").map(ToOwned::to_owned) }
	}
}
