// self
use crate::{
	_prelude::*,
	config::{PapeOptions, StrategyOptions},
	error::ConfigError,
	extension::{OAuthRequest, UserInterface},
	relying_party::{RelyingParty, RelyingPartyConfig},
	request::DEFAULT_IDENTIFIER_FIELD,
	store::{AssociationStore, DiscoveryStore},
	strategy::OpenIdStrategy,
};

/// Builder for [`OpenIdStrategy`] values.
pub struct OpenIdStrategyBuilder<V> {
	/// URL the provider redirects back to.
	pub return_url: Option<Url>,
	/// Trust root presented to the provider.
	pub realm: Option<Url>,
	/// Fallback identifier when the request supplies none, forwarded to discovery verbatim.
	pub provider_url: Option<String>,
	/// Body/query field holding a user-supplied identifier.
	pub identifier_field: String,
	/// Hand the host request to the verify callback.
	pub pass_request: bool,
	/// Request profile attributes and hand a parsed profile to the verify callback.
	pub profile: bool,
	/// Use stateless mode.
	pub stateless: bool,
	/// Enforce strict relying-party checks.
	pub secure: bool,
	/// PAPE settings.
	pub pape: Option<PapeOptions>,
	/// User Interface hints.
	pub ui: Option<UserInterface>,
	/// OAuth hybrid settings.
	pub oauth: Option<OAuthRequest>,
	relying_party: Option<Arc<dyn RelyingParty>>,
	verifier: Option<V>,
	association_store: Option<Arc<dyn AssociationStore>>,
	discovery_store: Option<Arc<dyn DiscoveryStore>>,
}
impl<V> OpenIdStrategyBuilder<V> {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self {
			return_url: None,
			realm: None,
			provider_url: None,
			identifier_field: DEFAULT_IDENTIFIER_FIELD.into(),
			pass_request: false,
			profile: false,
			stateless: false,
			secure: true,
			pape: None,
			ui: None,
			oauth: None,
			relying_party: None,
			verifier: None,
			association_store: None,
			discovery_store: None,
		}
	}

	/// Seeds every option from a deserialized [`StrategyOptions`].
	pub fn options(mut self, options: StrategyOptions) -> Self {
		let StrategyOptions {
			return_url,
			realm,
			provider_url,
			identifier_field,
			pass_request,
			profile,
			stateless,
			secure,
			pape,
			ui,
			oauth,
		} = options;

		self.return_url = Some(return_url);
		self.realm = realm;
		self.provider_url = provider_url;
		self.identifier_field = identifier_field;
		self.pass_request = pass_request;
		self.profile = profile;
		self.stateless = stateless;
		self.secure = secure;
		self.pape = pape;
		self.ui = ui;
		self.oauth = oauth;

		self
	}

	/// Sets the return URL.
	pub fn return_url(mut self, url: Url) -> Self {
		self.return_url = Some(url);

		self
	}

	/// Sets the realm.
	pub fn realm(mut self, url: Url) -> Self {
		self.realm = Some(url);

		self
	}

	/// Sets the fallback provider URL.
	pub fn provider_url(mut self, url: impl Into<String>) -> Self {
		self.provider_url = Some(url.into());

		self
	}

	/// Overrides the identifier field name.
	pub fn identifier_field(mut self, field: impl Into<String>) -> Self {
		self.identifier_field = field.into();

		self
	}

	/// Toggles passing the host request to the verify callback.
	pub fn pass_request(mut self, enabled: bool) -> Self {
		self.pass_request = enabled;

		self
	}

	/// Toggles profile attribute requests and parsing.
	pub fn profile(mut self, enabled: bool) -> Self {
		self.profile = enabled;

		self
	}

	/// Toggles stateless mode.
	pub fn stateless(mut self, enabled: bool) -> Self {
		self.stateless = enabled;

		self
	}

	/// Toggles strict relying-party checks.
	pub fn secure(mut self, enabled: bool) -> Self {
		self.secure = enabled;

		self
	}

	/// Requests the PAPE extension.
	pub fn pape(mut self, pape: PapeOptions) -> Self {
		self.pape = Some(pape);

		self
	}

	/// Requests the User Interface extension.
	pub fn ui(mut self, ui: UserInterface) -> Self {
		self.ui = Some(ui);

		self
	}

	/// Requests the OAuth hybrid extension.
	pub fn oauth(mut self, oauth: OAuthRequest) -> Self {
		self.oauth = Some(oauth);

		self
	}

	/// Sets the relying party that performs discovery and verification.
	pub fn relying_party(mut self, relying_party: Arc<dyn RelyingParty>) -> Self {
		self.relying_party = Some(relying_party);

		self
	}

	/// Sets the verify callback.
	pub fn verifier(mut self, verifier: V) -> Self {
		self.verifier = Some(verifier);

		self
	}

	/// Forwards an association store to the relying party.
	pub fn association_store(mut self, store: Arc<dyn AssociationStore>) -> Self {
		self.association_store = Some(store);

		self
	}

	/// Forwards a discovery store to the relying party.
	pub fn discovery_store(mut self, store: Arc<dyn DiscoveryStore>) -> Self {
		self.discovery_store = Some(store);

		self
	}

	/// Consumes the builder and validates the resulting strategy.
	pub fn build(self) -> Result<OpenIdStrategy<V>, ConfigError> {
		let return_url = self.return_url.ok_or(ConfigError::MissingReturnUrl)?;
		let verifier = self.verifier.ok_or(ConfigError::MissingVerifier)?;
		let relying_party = self.relying_party.ok_or(ConfigError::MissingRelyingParty)?;
		let options = StrategyOptions {
			return_url,
			realm: self.realm,
			provider_url: self.provider_url,
			identifier_field: self.identifier_field,
			pass_request: self.pass_request,
			profile: self.profile,
			stateless: self.stateless,
			secure: self.secure,
			pape: self.pape,
			ui: self.ui,
			oauth: self.oauth,
		};

		options.validate()?;

		let mut relying_party_config = RelyingPartyConfig::from_options(&options);

		relying_party_config.association_store = self.association_store;
		relying_party_config.discovery_store = self.discovery_store;

		Ok(OpenIdStrategy { options, relying_party_config, relying_party, verifier })
	}
}
impl<V> Default for OpenIdStrategyBuilder<V> {
	fn default() -> Self {
		Self::new()
	}
}
impl<V> Debug for OpenIdStrategyBuilder<V> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OpenIdStrategyBuilder")
			.field("return_url", &self.return_url)
			.field("realm", &self.realm)
			.field("provider_url", &self.provider_url)
			.field("identifier_field", &self.identifier_field)
			.field("pass_request", &self.pass_request)
			.field("profile", &self.profile)
			.field("stateless", &self.stateless)
			.field("secure", &self.secure)
			.field("pape", &self.pape)
			.field("ui", &self.ui)
			.field("oauth", &self.oauth)
			.field("relying_party_set", &self.relying_party.is_some())
			.field("verifier_set", &self.verifier.is_some())
			.finish()
	}
}
