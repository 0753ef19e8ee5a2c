//! User Interface 1.0 request descriptor.

// self
use crate::{_prelude::*, extension::ExtensionParams};

/// User Interface extension namespace URI.
pub const NAMESPACE: &str = "http://specs.openid.net/extensions/ui/1.0";

/// Presentation hints forwarded to the provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInterface {
	/// Display mode, typically `popup`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub mode: Option<String>,
	/// Asks the provider to show the relying party's icon.
	#[serde(default)]
	pub icon: bool,
	/// Preferred language tag.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub lang: Option<String>,
}
impl UserInterface {
	/// Popup mode without further hints.
	pub fn popup() -> Self {
		Self { mode: Some("popup".into()), ..Self::default() }
	}

	pub(crate) fn write_params(&self, params: &mut ExtensionParams) {
		if let Some(mode) = self.mode.as_deref() {
			params.push("mode", mode);
		}
		if self.icon {
			params.push("icon", "true");
		}
		if let Some(lang) = self.lang.as_deref() {
			params.push("lang", lang);
		}
	}
}
