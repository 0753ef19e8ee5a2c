//! Strategy-level error types shared by configuration, discovery, and verification.

// self
use crate::_prelude::*;

/// Strategy-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Type-erased error used at the relying-party and verifier seams.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical terminal error surfaced through [`Action::Error`](crate::strategy::Action::Error).
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// The relying party could not verify the returned assertion.
	#[error("Failed to verify assertion.")]
	Verification {
		/// Relying-party failure.
		#[source]
		source: BoxError,
	},
	/// Discovery failed or did not yield an OP endpoint.
	#[error("Failed to discover OP endpoint URL.")]
	Discovery {
		/// Relying-party failure, absent when discovery simply found nothing.
		#[source]
		source: Option<BoxError>,
	},
	/// The relying party reported success without a claimed identifier.
	#[error("Authenticated assertion is missing a claimed identifier.")]
	MissingClaimedIdentifier,
	/// The application's verify callback failed.
	#[error("Verify callback failed.")]
	Verify {
		/// Callback failure.
		#[source]
		source: BoxError,
	},
}
impl Error {
	/// Wraps a relying-party verification failure.
	pub fn verification(src: impl Into<BoxError>) -> Self {
		Self::Verification { source: src.into() }
	}

	/// Wraps a relying-party discovery failure.
	pub fn discovery(src: impl Into<BoxError>) -> Self {
		Self::Discovery { source: Some(src.into()) }
	}

	/// Wraps a verify callback failure.
	pub fn verify(src: impl Into<BoxError>) -> Self {
		Self::Verify { source: src.into() }
	}
}

/// Configuration and validation failures raised while building a strategy.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// No return URL was supplied.
	#[error("OpenID authentication requires a return URL.")]
	MissingReturnUrl,
	/// No relying party was supplied.
	#[error("OpenID authentication requires a relying party.")]
	MissingRelyingParty,
	/// No verify callback was supplied.
	#[error("OpenID authentication strategy requires a verify callback.")]
	MissingVerifier,
	/// The identifier field name is blank.
	#[error("Identifier field name cannot be empty.")]
	EmptyIdentifierField,
	/// The OAuth hybrid extension was configured without a consumer key.
	#[error("OAuth consumer key cannot be empty.")]
	EmptyConsumerKey,
	/// Serialized options could not be parsed.
	#[error("Strategy options are malformed.")]
	InvalidOptions {
		/// Structured parsing failure including the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Structured bad-request indicator handed to the host alongside a failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
#[error("{message}")]
pub struct BadRequestError {
	/// Human-readable explanation.
	pub message: String,
}
impl BadRequestError {
	/// Creates a new bad-request error with the provided message.
	pub fn new(message: impl Into<String>) -> Self {
		Self { message: message.into() }
	}

	/// Error raised when neither the request nor the configuration supplies an identifier.
	pub fn missing_identifier() -> Self {
		Self::new("Missing OpenID identifier")
	}
}
