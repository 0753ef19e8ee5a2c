//! Thread-safe in-memory store for local development and tests.

// self
use crate::{
	_prelude::*,
	store::{
		Association, AssociationStore, DiscoveredInfo, DiscoveryStore, StoreError, StoreFuture,
	},
};

type AssociationMap = Arc<RwLock<HashMap<String, Association>>>;
type DiscoveryMap = Arc<RwLock<HashMap<String, DiscoveredInfo>>>;

/// Keeps associations and discovered information in-process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
	associations: AssociationMap,
	discoveries: DiscoveryMap,
}
impl MemoryStore {
	/// Number of associations currently held, expired ones included.
	pub fn association_count(&self) -> usize {
		self.associations.read().len()
	}

	fn load_association_now(
		map: AssociationMap,
		handle: &str,
		now: OffsetDateTime,
	) -> Option<Association> {
		let mut guard = map.write();

		if guard.get(handle)?.is_expired_at(now) {
			guard.remove(handle);

			return None;
		}

		guard.get(handle).cloned()
	}
}
impl AssociationStore for MemoryStore {
	fn save_association(&self, association: Association) -> StoreFuture<'_, ()> {
		let map = self.associations.clone();

		Box::pin(async move {
			map.write().insert(association.handle.clone(), association);

			Ok::<_, StoreError>(())
		})
	}

	fn load_association<'a>(
		&'a self,
		handle: &'a str,
		now: OffsetDateTime,
	) -> StoreFuture<'a, Option<Association>> {
		let map = self.associations.clone();

		Box::pin(async move { Ok(Self::load_association_now(map, handle, now)) })
	}

	fn remove_association<'a>(&'a self, handle: &'a str) -> StoreFuture<'a, Option<Association>> {
		let map = self.associations.clone();

		Box::pin(async move { Ok(map.write().remove(handle)) })
	}
}
impl DiscoveryStore for MemoryStore {
	fn save_discovered_info(&self, info: DiscoveredInfo) -> StoreFuture<'_, ()> {
		let map = self.discoveries.clone();

		Box::pin(async move {
			map.write().insert(info.claimed_identifier.clone(), info);

			Ok::<_, StoreError>(())
		})
	}

	fn load_discovered_info<'a>(
		&'a self,
		claimed_identifier: &'a str,
	) -> StoreFuture<'a, Option<DiscoveredInfo>> {
		let map = self.discoveries.clone();

		Box::pin(async move { Ok(map.read().get(claimed_identifier).cloned()) })
	}
}
