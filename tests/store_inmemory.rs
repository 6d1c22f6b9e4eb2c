// std
use std::sync::Arc;
// crates.io
use http::Request;
use time::{Duration, OffsetDateTime};
// self
use oauth1_provider::{
	request::RequestHead,
	secret::ClientSecret,
	signature::SignatureMethod,
	store::{ClientStore, MemoryStore, StoreError},
};

fn fixture_request() -> Request<()> {
	Request::builder()
		.uri("https://api.example.com/v1/items")
		.body(())
		.expect("Request fixture should build.")
}

#[tokio::test]
async fn registered_client_resolves_usable_signer() {
	let store = MemoryStore::default();
	let req = fixture_request();

	store.register(
		"client-1",
		ClientSecret::new("secret-1"),
		[SignatureMethod::HmacSha1, SignatureMethod::HmacSha256],
	);

	let lookup = store.resolve_signer("client-1", "HMAC-SHA256", RequestHead::of(&req)).await;

	assert_eq!(lookup.outcome, Ok(()));

	let signature = lookup
		.signer
		.expect("Registered client should yield a signer.")
		.sign("", "POST&base")
		.expect("Signing should succeed.");

	assert_eq!(signature.len(), 44);
}

#[tokio::test]
async fn unknown_client_gets_stand_in_signer() {
	let store = MemoryStore::default();
	let req = fixture_request();
	let lookup = store.resolve_signer("missing", "HMAC-SHA1", RequestHead::of(&req)).await;

	assert_eq!(lookup.outcome, Err(StoreError::UnknownClient));
	assert!(
		lookup.signer.expect("Stand-in signer should be present.").sign("", "base").is_ok(),
		"Stand-in signer must be able to sign."
	);
}

#[tokio::test]
async fn replaced_client_uses_new_secret() {
	let store = MemoryStore::default();
	let req = fixture_request();

	store.register("client-1", ClientSecret::new("old"), [SignatureMethod::Plaintext]);
	store.register("client-1", ClientSecret::new("new"), [SignatureMethod::Plaintext]);

	let signature = store
		.resolve_signer("client-1", "PLAINTEXT", RequestHead::of(&req))
		.await
		.signer
		.expect("Registered client should yield a signer.")
		.sign("", "ignored")
		.expect("Signing should succeed.");

	assert_eq!(signature, "new&");
}

#[tokio::test]
async fn concurrent_nonce_checks_allow_single_winner() {
	let store = Arc::new(MemoryStore::default());
	let mut handles = Vec::new();

	for _ in 0..16 {
		let store = store.clone();

		handles.push(tokio::spawn(async move {
			let req = fixture_request();

			store.check_nonce("client-1", "shared-nonce", 1_700_000_000, RequestHead::of(&req)).await
		}));
	}

	let mut accepted = 0;

	for handle in handles {
		match handle.await.expect("Nonce task should not panic.") {
			Ok(()) => accepted += 1,
			Err(e) => assert_eq!(e, StoreError::NonceReplayed),
		}
	}

	assert_eq!(accepted, 1);
	assert_eq!(store.nonce_count(), 1);
}

#[tokio::test]
async fn skew_window_uses_current_time() {
	let store = MemoryStore::default().with_max_skew(Duration::minutes(5));
	let req = fixture_request();
	let now = OffsetDateTime::now_utc().unix_timestamp();

	store
		.check_nonce("client-1", "fresh", now, RequestHead::of(&req))
		.await
		.expect("Current timestamp should be accepted.");

	let err = store
		.check_nonce("client-1", "stale", now - 3_600, RequestHead::of(&req))
		.await
		.expect_err("Hour-old timestamp should be rejected.");

	assert_eq!(err, StoreError::TimestampOutOfWindow { timestamp: now - 3_600 });
}
