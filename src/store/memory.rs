//! Thread-safe in-memory [`ClientStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	request::RequestHead,
	secret::ClientSecret,
	signature::SignatureMethod,
	store::{ClientStore, SignerFuture, SignerLookup, StoreError, StoreFuture},
};

type ClientMap = Arc<RwLock<HashMap<String, ClientEntry>>>;
type NonceLog = Arc<Mutex<HashSet<NonceKey>>>;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct NonceKey {
	client_key: String,
	nonce: String,
	timestamp: i64,
}

#[derive(Clone, Debug)]
struct ClientEntry {
	secret: ClientSecret,
	methods: HashSet<SignatureMethod>,
}

/// Client registry and nonce log kept in-process.
///
/// Unknown clients and disallowed methods resolve to a stand-in `HMAC-SHA1` signer with an
/// empty secret alongside the rejection. Nonces are retained for the lifetime of the store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
	clients: ClientMap,
	nonces: NonceLog,
	max_skew: Option<Duration>,
}
impl MemoryStore {
	/// Rejects timestamps further than `skew` from the current time.
	pub fn with_max_skew(mut self, skew: Duration) -> Self {
		self.max_skew = Some(skew.abs());

		self
	}

	/// Registers (or replaces) a client and the signature methods it may use.
	pub fn register(
		&self,
		client_key: impl Into<String>,
		secret: ClientSecret,
		methods: impl IntoIterator<Item = SignatureMethod>,
	) {
		let entry = ClientEntry { secret, methods: methods.into_iter().collect() };

		self.clients.write().insert(client_key.into(), entry);
	}

	/// Removes a client, returning whether it was registered.
	pub fn remove(&self, client_key: &str) -> bool {
		self.clients.write().remove(client_key).is_some()
	}

	/// Number of nonces recorded so far.
	pub fn nonce_count(&self) -> usize {
		self.nonces.lock().len()
	}

	fn resolve_now(clients: &ClientMap, client_key: &str, signature_method: &str) -> SignerLookup {
		let guard = clients.read();
		let Some(entry) = guard.get(client_key) else {
			return SignerLookup::rejected(Some(Self::stand_in()), StoreError::UnknownClient);
		};

		match signature_method.parse::<SignatureMethod>() {
			Ok(method) if entry.methods.contains(&method) =>
				SignerLookup::found(method.signer(entry.secret.clone())),
			_ => SignerLookup::rejected(
				Some(Self::stand_in()),
				StoreError::UnsupportedSignatureMethod { method: signature_method.to_owned() },
			),
		}
	}

	fn check_now(
		nonces: &NonceLog,
		max_skew: Option<Duration>,
		key: NonceKey,
		now: OffsetDateTime,
	) -> Result<(), StoreError> {
		if let Some(skew) = max_skew {
			let drift = now.unix_timestamp().abs_diff(key.timestamp);

			if drift > skew.whole_seconds().unsigned_abs() {
				return Err(StoreError::TimestampOutOfWindow { timestamp: key.timestamp });
			}
		}
		if !nonces.lock().insert(key) {
			return Err(StoreError::NonceReplayed);
		}

		Ok(())
	}

	fn stand_in() -> Arc<dyn crate::signature::Signer> {
		SignatureMethod::HmacSha1.signer(ClientSecret::new(""))
	}
}
impl ClientStore for MemoryStore {
	fn resolve_signer<'a>(
		&'a self,
		client_key: &'a str,
		signature_method: &'a str,
		_request: RequestHead<'a>,
	) -> SignerFuture<'a> {
		Box::pin(async move { Self::resolve_now(&self.clients, client_key, signature_method) })
	}

	fn check_nonce<'a>(
		&'a self,
		client_key: &'a str,
		nonce: &'a str,
		timestamp: i64,
		_request: RequestHead<'a>,
	) -> StoreFuture<'a, ()> {
		let key = NonceKey { client_key: client_key.to_owned(), nonce: nonce.to_owned(), timestamp };

		Box::pin(async move {
			Self::check_now(&self.nonces, self.max_skew, key, OffsetDateTime::now_utc())
		})
	}
}
