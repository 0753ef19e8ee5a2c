//! Provider Authentication Policy Extension 1.0 request descriptor and response payload.

// crates.io
use time::format_description::well_known::Rfc3339;
// self
use crate::{_prelude::*, extension::ExtensionParams, relying_party::Assertion};

/// PAPE namespace URI.
pub const NAMESPACE: &str = "http://specs.openid.net/extensions/pape/1.0";
/// Policy URI meaning "no particular policy".
pub const NONE_POLICY: &str = "http://schemas.openid.net/pape/policies/2007/06/none";

/// PAPE request forwarded to the provider.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PapeRequest {
	/// Maximum age of the user's last active authentication at the provider.
	pub max_auth_age: Option<Duration>,
	/// Policy URIs the relying party prefers, in order.
	pub preferred_auth_policies: Vec<String>,
}
impl PapeRequest {
	pub(crate) fn write_params(&self, params: &mut ExtensionParams) {
		if let Some(max_auth_age) = self.max_auth_age {
			params.push("max_auth_age", max_auth_age.whole_seconds().max(0).to_string());
		}

		let policies = if self.preferred_auth_policies.is_empty() {
			NONE_POLICY.to_owned()
		} else {
			self.preferred_auth_policies.join(" ")
		};

		params.push("preferred_auth_policies", policies);
	}
}

/// PAPE payload returned with a verified assertion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pape {
	/// Policies the provider claims to have satisfied.
	pub auth_policies: Vec<String>,
	/// Instant the user last actively authenticated at the provider.
	pub auth_time: Option<OffsetDateTime>,
}
impl Pape {
	/// Extracts the PAPE payload from assertion attributes.
	///
	/// An `auth_time` that is not valid RFC 3339 is dropped rather than rejected.
	pub fn from_assertion(assertion: &Assertion) -> Self {
		let auth_policies = assertion
			.attribute("auth_policies")
			.map(|policies| policies.split_whitespace().map(ToOwned::to_owned).collect())
			.unwrap_or_default();
		let auth_time = assertion
			.attribute("auth_time")
			.and_then(|raw| OffsetDateTime::parse(raw, &Rfc3339).ok());

		Self { auth_policies, auth_time }
	}

	/// Whether the provider reported satisfying the given policy URI.
	pub fn satisfies(&self, policy: &str) -> bool {
		self.auth_policies.iter().any(|candidate| candidate == policy)
	}
}
