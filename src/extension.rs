//! Request-side descriptors for the OpenID extensions the strategy can ask for, plus parsers
//! for the extension payloads that come back on a verified assertion.
//!
//! The relying party owns the wire protocol; these types only describe *what* to request.
//! [`Extension::request_params`] renders the `openid.ns.*` arguments so relying-party
//! implementations can append them to the `checkid_setup` request verbatim.

pub mod ax;
pub mod oauth;
pub mod pape;
pub mod sreg;
pub mod ui;

pub use ax::{AttributeExchange, AxAttribute};
pub use oauth::{OAuthRequest, OAuthResponse};
pub use pape::{NONE_POLICY, Pape, PapeRequest};
pub use sreg::{SimpleRegistration, SregField};
pub use ui::UserInterface;

// self
use crate::_prelude::*;

/// Extension requested alongside the authentication request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Extension {
	/// Simple Registration 1.1.
	SimpleRegistration(SimpleRegistration),
	/// Attribute Exchange 1.0 fetch request.
	AttributeExchange(AttributeExchange),
	/// User Interface 1.0.
	UserInterface(UserInterface),
	/// Provider Authentication Policy Extension 1.0.
	Pape(PapeRequest),
	/// OpenID + OAuth hybrid 1.0.
	OAuth(OAuthRequest),
}
impl Extension {
	/// Namespace URI announced via `openid.ns.<alias>`.
	pub const fn namespace(&self) -> &'static str {
		match self {
			Extension::SimpleRegistration(_) => sreg::NAMESPACE,
			Extension::AttributeExchange(_) => ax::NAMESPACE,
			Extension::UserInterface(_) => ui::NAMESPACE,
			Extension::Pape(_) => pape::NAMESPACE,
			Extension::OAuth(_) => oauth::NAMESPACE,
		}
	}

	/// Alias used as the `openid.<alias>.*` prefix.
	pub const fn alias(&self) -> &'static str {
		match self {
			Extension::SimpleRegistration(_) => "sreg",
			Extension::AttributeExchange(_) => "ax",
			Extension::UserInterface(_) => "ui",
			Extension::Pape(_) => "pape",
			Extension::OAuth(_) => "oauth",
		}
	}

	/// Renders the request arguments for this extension, namespace declaration first.
	pub fn request_params(&self) -> Vec<(String, String)> {
		let alias = self.alias();
		let mut params = ExtensionParams::new(alias);

		params.push_raw(format!("openid.ns.{alias}"), self.namespace());

		match self {
			Extension::SimpleRegistration(ext) => ext.write_params(&mut params),
			Extension::AttributeExchange(ext) => ext.write_params(&mut params),
			Extension::UserInterface(ext) => ext.write_params(&mut params),
			Extension::Pape(ext) => ext.write_params(&mut params),
			Extension::OAuth(ext) => ext.write_params(&mut params),
		}

		params.into_inner()
	}
}

/// Accumulates `openid.<alias>.<key>` arguments for a single extension.
#[derive(Debug)]
pub(crate) struct ExtensionParams {
	alias: &'static str,
	params: Vec<(String, String)>,
}
impl ExtensionParams {
	fn new(alias: &'static str) -> Self {
		Self { alias, params: Vec::new() }
	}

	pub(crate) fn push(&mut self, key: impl Display, value: impl Into<String>) {
		self.params.push((format!("openid.{}.{key}", self.alias), value.into()));
	}

	fn push_raw(&mut self, key: String, value: impl Into<String>) {
		self.params.push((key, value.into()));
	}

	fn into_inner(self) -> Vec<(String, String)> {
		self.params
	}
}
