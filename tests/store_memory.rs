// crates.io
use time::macros;
// self
use openid_strategy::{
	_preludet::*,
	store::{
		Association, AssociationSecret, AssociationStore, AssociationType, DiscoveredInfo,
		DiscoveryStore, MemoryStore,
	},
};

fn build_association(handle: &str) -> Association {
	Association::new(
		url("https://provider.example.com/openid"),
		handle,
		AssociationType::HmacSha256,
		AssociationSecret::new("c2VjcmV0LWtleQ=="),
		macros::datetime!(2025-11-10 12:00 UTC),
		Duration::hours(2),
	)
}

#[tokio::test]
async fn save_and_load_association_round_trip() {
	let store = MemoryStore::default();
	let association = build_association("handle-1");

	store
		.save_association(association.clone())
		.await
		.expect("Saving association fixture into memory store should succeed.");

	let loaded = store
		.load_association("handle-1", macros::datetime!(2025-11-10 13:00 UTC))
		.await
		.expect("Loading association from memory store should succeed.")
		.expect("Stored association should remain present.");

	assert_eq!(loaded, association);
	assert_eq!(loaded.secret.expose(), "c2VjcmV0LWtleQ==");
	assert_eq!(store.association_count(), 1);
}

#[tokio::test]
async fn expired_association_is_evicted_on_load() {
	let store = MemoryStore::default();

	store
		.save_association(build_association("handle-1"))
		.await
		.expect("Saving association fixture into memory store should succeed.");

	let loaded = store
		.load_association("handle-1", macros::datetime!(2025-11-10 14:00 UTC))
		.await
		.expect("Loading association from memory store should succeed.");

	assert!(loaded.is_none(), "Associations expire at their deadline.");
	assert_eq!(store.association_count(), 0);
}

#[tokio::test]
async fn remove_association_returns_previous_value() {
	let store = MemoryStore::default();

	store
		.save_association(build_association("handle-1"))
		.await
		.expect("Saving association fixture into memory store should succeed.");

	let removed = store
		.remove_association("handle-1")
		.await
		.expect("Removing association from memory store should succeed.");

	assert_eq!(removed.map(|association| association.handle), Some("handle-1".into()));
	assert!(
		store
			.remove_association("handle-1")
			.await
			.expect("Removing a missing association should succeed.")
			.is_none()
	);
}

#[tokio::test]
async fn discovered_info_is_keyed_by_claimed_identifier() {
	let store = MemoryStore::default();
	let info = DiscoveredInfo::new(
		"http://www.example.com/profiles/username",
		url("https://provider.example.com/openid"),
	)
	.with_local_identifier("http://username.provider.example.com/");

	store
		.save_discovered_info(info.clone())
		.await
		.expect("Saving discovered info into memory store should succeed.");

	let loaded = store
		.load_discovered_info("http://www.example.com/profiles/username")
		.await
		.expect("Loading discovered info from memory store should succeed.");

	assert_eq!(loaded, Some(info));
	assert!(
		store
			.load_discovered_info("http://www.example.com/profiles/other")
			.await
			.expect("Loading unknown discovered info should succeed.")
			.is_none()
	);
}

#[tokio::test]
async fn clones_share_state() {
	let store = MemoryStore::default();
	let shared: Arc<dyn AssociationStore> = Arc::new(store.clone());

	shared
		.save_association(build_association("handle-2"))
		.await
		.expect("Saving through a shared handle should succeed.");

	assert_eq!(store.association_count(), 1);
}
