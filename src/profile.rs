//! Normalized user profile assembled from Simple Registration and Attribute Exchange values.

// self
use crate::{_prelude::*, relying_party::Assertion};

/// Provider-agnostic profile handed to the verify callback.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
	/// Name suitable for display.
	pub display_name: Option<String>,
	/// Structured name components.
	pub name: Name,
	/// Email addresses, at most one from OpenID extensions.
	pub emails: Vec<Email>,
}
impl Profile {
	/// Builds a profile from assertion attributes.
	///
	/// The display name prefers SREG `fullname` and falls back to the AX given and family
	/// names joined by a space when both are present.
	pub fn from_assertion(assertion: &Assertion) -> Self {
		let given_name = assertion.attribute("firstname");
		let family_name = assertion.attribute("lastname");
		let display_name = match (assertion.attribute("fullname"), given_name, family_name) {
			(Some(fullname), _, _) => Some(fullname.to_owned()),
			(None, Some(given), Some(family)) => Some(format!("{given} {family}")),
			_ => None,
		};
		let emails = assertion
			.attribute("email")
			.map(|value| vec![Email { value: value.to_owned() }])
			.unwrap_or_default();

		Self {
			display_name,
			name: Name {
				family_name: family_name.map(ToOwned::to_owned),
				given_name: given_name.map(ToOwned::to_owned),
			},
			emails,
		}
	}
}

/// Structured name components.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Name {
	/// Family (last) name.
	pub family_name: Option<String>,
	/// Given (first) name.
	pub given_name: Option<String>,
}

/// Email entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
	/// Address.
	pub value: String,
}
