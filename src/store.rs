//! Persistence hooks the relying party consults for associations and discovered provider
//! information.
//!
//! The strategy itself never reads these stores; it forwards them through
//! [`RelyingPartyConfig`](crate::relying_party::RelyingPartyConfig) so a relying-party
//! implementation can share state across processes instead of keeping it in memory.

pub mod memory;
pub mod record;

pub use memory::MemoryStore;
pub use record::*;

// self
use crate::_prelude::*;

/// Boxed future returned by store operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage contract for shared-secret associations with providers.
pub trait AssociationStore
where
	Self: Send + Sync,
{
	/// Persists or replaces the association keyed by its handle.
	fn save_association(&self, association: Association) -> StoreFuture<'_, ()>;

	/// Loads an association that is still valid at `now`.
	fn load_association<'a>(
		&'a self,
		handle: &'a str,
		now: OffsetDateTime,
	) -> StoreFuture<'a, Option<Association>>;

	/// Removes an association (e.g. after the provider invalidated its handle).
	fn remove_association<'a>(&'a self, handle: &'a str) -> StoreFuture<'a, Option<Association>>;
}

/// Storage contract for provider information discovered for a claimed identifier.
pub trait DiscoveryStore
where
	Self: Send + Sync,
{
	/// Persists or replaces the discovered information keyed by claimed identifier.
	fn save_discovered_info(&self, info: DiscoveredInfo) -> StoreFuture<'_, ()>;

	/// Loads previously discovered information.
	fn load_discovered_info<'a>(
		&'a self,
		claimed_identifier: &'a str,
	) -> StoreFuture<'a, Option<DiscoveredInfo>>;
}

/// Error type produced by store implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn store_error_boxes_for_the_relying_party_seam() {
		let store_error = StoreError::Backend { message: "database unreachable".into() };
		let boxed: BoxError = store_error.clone().into();

		assert_eq!(boxed.to_string(), "Backend failure: database unreachable.");
	}
}
