//! Simple Registration 1.1 request descriptor.

// self
use crate::{_prelude::*, extension::ExtensionParams};

/// Simple Registration namespace URI.
pub const NAMESPACE: &str = "http://openid.net/extensions/sreg/1.1";

/// Profile fields defined by Simple Registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SregField {
	/// Preferred nickname.
	Nickname,
	/// Email address.
	Email,
	/// Full name.
	Fullname,
	/// Date of birth (`YYYY-MM-DD`).
	Dob,
	/// Gender (`M` or `F`).
	Gender,
	/// Postal code.
	Postcode,
	/// ISO 3166 country code.
	Country,
	/// ISO 639 language code.
	Language,
	/// Time zone database name.
	Timezone,
}
impl SregField {
	/// Field name as it appears on the wire.
	pub const fn as_str(self) -> &'static str {
		match self {
			SregField::Nickname => "nickname",
			SregField::Email => "email",
			SregField::Fullname => "fullname",
			SregField::Dob => "dob",
			SregField::Gender => "gender",
			SregField::Postcode => "postcode",
			SregField::Country => "country",
			SregField::Language => "language",
			SregField::Timezone => "timezone",
		}
	}
}
impl Display for SregField {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Simple Registration fetch request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimpleRegistration {
	/// Fields the provider must return.
	pub required: Vec<SregField>,
	/// Fields the provider may return.
	pub optional: Vec<SregField>,
	/// Optional privacy policy shown by the provider.
	pub policy_url: Option<Url>,
}
impl SimpleRegistration {
	/// Requests every field as optional, which is what profile parsing relies on.
	pub fn profile() -> Self {
		Self {
			required: Vec::new(),
			optional: vec![
				SregField::Fullname,
				SregField::Nickname,
				SregField::Email,
				SregField::Dob,
				SregField::Gender,
				SregField::Postcode,
				SregField::Country,
				SregField::Timezone,
				SregField::Language,
			],
			policy_url: None,
		}
	}

	pub(crate) fn write_params(&self, params: &mut ExtensionParams) {
		if !self.required.is_empty() {
			params.push("required", join(&self.required));
		}
		if !self.optional.is_empty() {
			params.push("optional", join(&self.optional));
		}
		if let Some(policy_url) = self.policy_url.as_ref() {
			params.push("policy_url", policy_url.as_str());
		}
	}
}

fn join(fields: &[SregField]) -> String {
	fields.iter().map(|field| field.as_str()).collect::<Vec<_>>().join(",")
}
