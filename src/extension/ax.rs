//! Attribute Exchange 1.0 fetch request descriptor.

// self
use crate::{_prelude::*, extension::ExtensionParams};

/// Attribute Exchange namespace URI.
pub const NAMESPACE: &str = "http://openid.net/srv/ax/1.0";

/// Single attribute in an AX fetch request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxAttribute {
	/// Alias under which the value comes back (`firstname`, `email`, ...).
	pub alias: String,
	/// Attribute type URI.
	pub type_uri: String,
	/// Whether the provider is asked to return the attribute unconditionally.
	pub required: bool,
}
impl AxAttribute {
	/// Creates a required attribute.
	pub fn required(alias: impl Into<String>, type_uri: impl Into<String>) -> Self {
		Self { alias: alias.into(), type_uri: type_uri.into(), required: true }
	}

	/// Creates an attribute the provider may omit.
	pub fn if_available(alias: impl Into<String>, type_uri: impl Into<String>) -> Self {
		Self { alias: alias.into(), type_uri: type_uri.into(), required: false }
	}
}

/// Attribute Exchange fetch request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeExchange {
	/// Requested attributes in declaration order.
	pub attributes: Vec<AxAttribute>,
}
impl AttributeExchange {
	/// Requests full name, given name, family name, and email, all required.
	pub fn profile() -> Self {
		Self {
			attributes: vec![
				AxAttribute::required("fullname", "http://axschema.org/namePerson"),
				AxAttribute::required("firstname", "http://axschema.org/namePerson/first"),
				AxAttribute::required("lastname", "http://axschema.org/namePerson/last"),
				AxAttribute::required("email", "http://axschema.org/contact/email"),
			],
		}
	}

	pub(crate) fn write_params(&self, params: &mut ExtensionParams) {
		params.push("mode", "fetch_request");

		for attribute in &self.attributes {
			params.push(format_args!("type.{}", attribute.alias), attribute.type_uri.as_str());
		}

		let required = self.aliases(true);
		let if_available = self.aliases(false);

		if !required.is_empty() {
			params.push("required", required);
		}
		if !if_available.is_empty() {
			params.push("if_available", if_available);
		}
	}

	fn aliases(&self, required: bool) -> String {
		self.attributes
			.iter()
			.filter(|attribute| attribute.required == required)
			.map(|attribute| attribute.alias.as_str())
			.collect::<Vec<_>>()
			.join(",")
	}
}
