//! Records persisted by [`AssociationStore`](crate::store::AssociationStore) and
//! [`DiscoveryStore`](crate::store::DiscoveryStore).

// self
use crate::_prelude::*;

/// OpenID 2.0 authentication protocol version URI.
pub const OPENID2_VERSION: &str = "http://specs.openid.net/auth/2.0";

/// MAC algorithm negotiated for an association.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssociationType {
	/// HMAC-SHA1.
	#[serde(rename = "HMAC-SHA1")]
	HmacSha1,
	#[default]
	/// HMAC-SHA256.
	#[serde(rename = "HMAC-SHA256")]
	HmacSha256,
}
impl AssociationType {
	/// Returns the protocol identifier.
	pub const fn as_str(self) -> &'static str {
		match self {
			AssociationType::HmacSha1 => "HMAC-SHA1",
			AssociationType::HmacSha256 => "HMAC-SHA256",
		}
	}
}
impl Display for AssociationType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Redacted MAC key wrapper keeping association secrets out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationSecret(String);
impl AssociationSecret {
	/// Wraps a base64-encoded MAC key.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the encoded key. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for AssociationSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AssociationSecret").field(&"<redacted>").finish()
	}
}
impl Display for AssociationSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Shared secret negotiated with a provider endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
	/// Provider endpoint the association belongs to.
	pub provider: Url,
	/// Provider-issued handle.
	pub handle: String,
	/// MAC algorithm.
	pub kind: AssociationType,
	/// MAC key.
	pub secret: AssociationSecret,
	/// Instant after which the association must not be used.
	pub expires_at: OffsetDateTime,
}
impl Association {
	/// Creates an association that expires `expires_in` after `issued_at`.
	pub fn new(
		provider: Url,
		handle: impl Into<String>,
		kind: AssociationType,
		secret: AssociationSecret,
		issued_at: OffsetDateTime,
		expires_in: Duration,
	) -> Self {
		Self { provider, handle: handle.into(), kind, secret, expires_at: issued_at + expires_in }
	}

	/// Whether the association has expired at `now`.
	pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		now >= self.expires_at
	}
}

/// Provider information resolved for a claimed identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredInfo {
	/// Claimed identifier the information was discovered for.
	pub claimed_identifier: String,
	/// OP endpoint URL.
	pub endpoint: Url,
	/// OP-local identifier, when it differs from the claimed identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub local_identifier: Option<String>,
	/// Protocol version URI advertised by the provider.
	pub version: String,
}
impl DiscoveredInfo {
	/// Creates OpenID 2.0 discovery information without an OP-local identifier.
	pub fn new(claimed_identifier: impl Into<String>, endpoint: Url) -> Self {
		Self {
			claimed_identifier: claimed_identifier.into(),
			endpoint,
			local_identifier: None,
			version: OPENID2_VERSION.into(),
		}
	}

	/// Sets the OP-local identifier.
	pub fn with_local_identifier(mut self, local_identifier: impl Into<String>) -> Self {
		self.local_identifier = Some(local_identifier.into());

		self
	}
}
