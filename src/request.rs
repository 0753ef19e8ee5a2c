//! Host request abstraction and request classification.
//!
//! The strategy never depends on a concrete web framework. Hosts either implement
//! [`OpenIdRequest`] for their own request type or convert into [`AuthRequest`].

// crates.io
use url::form_urlencoded;
// self
use crate::_prelude::*;

/// Query parameter carrying the OpenID protocol mode on return requests.
pub const MODE_PARAM: &str = "openid.mode";
/// Mode sent by providers when the user aborts authentication.
pub const CANCEL_MODE: &str = "cancel";
/// Default request field holding a user-supplied identifier.
pub const DEFAULT_IDENTIFIER_FIELD: &str = "openid_identifier";

/// Read-only view of an incoming HTTP request.
pub trait OpenIdRequest
where
	Self: Send + Sync,
{
	/// Original request target (path and query) handed to the relying party for verification.
	fn uri(&self) -> &str;

	/// Looks up a decoded query parameter.
	fn query_param(&self, name: &str) -> Option<&str>;

	/// Looks up a decoded form body parameter.
	///
	/// Hosts that never parse bodies can rely on the default, which reports nothing.
	fn body_param(&self, _name: &str) -> Option<&str> {
		None
	}
}

/// How the strategy treats a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestKind {
	/// No OpenID mode present; start discovery and redirect.
	Initiate,
	/// Provider callback carrying an assertion to verify.
	Return,
	/// Provider callback reporting that the user canceled.
	Cancel,
}
impl RequestKind {
	/// Classifies a request by its `openid.mode` query parameter.
	pub fn classify<R>(request: &R) -> Self
	where
		R: ?Sized + OpenIdRequest,
	{
		match request.query_param(MODE_PARAM).filter(|mode| !mode.is_empty()) {
			Some(CANCEL_MODE) => Self::Cancel,
			Some(_) => Self::Return,
			None => Self::Initiate,
		}
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestKind::Initiate => "initiate",
			RequestKind::Return => "return",
			RequestKind::Cancel => "cancel",
		}
	}
}
impl Display for RequestKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Framework-neutral request carrying the pieces the strategy inspects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthRequest {
	uri: String,
	query: BTreeMap<String, String>,
	body: BTreeMap<String, String>,
}
impl AuthRequest {
	/// Creates a request from its target (`/path?query`), decoding the query string.
	///
	/// When a key repeats, the first occurrence wins.
	pub fn new(uri: impl Into<String>) -> Self {
		let uri = uri.into();
		let query = uri.split_once('?').map(|(_, query)| decode_pairs(query.as_bytes()));

		Self { uri, query: query.unwrap_or_default(), body: BTreeMap::new() }
	}

	/// Attaches an `application/x-www-form-urlencoded` body.
	pub fn with_form_body(mut self, body: &[u8]) -> Self {
		self.body = decode_pairs(body);

		self
	}

	/// Adds (or replaces) a single decoded body parameter.
	pub fn with_body_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.body.insert(name.into(), value.into());

		self
	}
}
impl OpenIdRequest for AuthRequest {
	fn uri(&self) -> &str {
		&self.uri
	}

	fn query_param(&self, name: &str) -> Option<&str> {
		self.query.get(name).map(String::as_str)
	}

	fn body_param(&self, name: &str) -> Option<&str> {
		self.body.get(name).map(String::as_str)
	}
}

fn decode_pairs(input: &[u8]) -> BTreeMap<String, String> {
	let mut pairs = BTreeMap::new();

	for (key, value) in form_urlencoded::parse(input) {
		pairs.entry(key.into_owned()).or_insert_with(|| value.into_owned());
	}

	pairs
}
