//! Client-store contracts consulted by the verifier and the built-in memory store.

pub mod memory;

pub use memory::MemoryStore;

// self
use crate::{_prelude::*, request::RequestHead, signature::Signer};

/// Boxed future returned by [`ClientStore::check_nonce`].
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;
/// Boxed future returned by [`ClientStore::resolve_signer`].
pub type SignerFuture<'a> = Pin<Box<dyn Future<Output = SignerLookup> + 'a + Send>>;

/// Client credential and nonce lookups implemented by the host application.
///
/// Backends may block or perform I/O; the verifier awaits each call once, without retries or
/// timeouts. Dropping the verifier's future drops any in-flight lookup.
pub trait ClientStore
where
	Self: Send + Sync,
{
	/// Resolves the signer for `client_key` and `signature_method`.
	///
	/// Unknown clients and unsupported methods should still return a signer alongside the
	/// rejection so that signature verification costs the same for every client key.
	fn resolve_signer<'a>(
		&'a self,
		client_key: &'a str,
		signature_method: &'a str,
		request: RequestHead<'a>,
	) -> SignerFuture<'a>;

	/// Records the `(client_key, nonce, timestamp)` triple, failing if it was seen before or
	/// violates the store's timestamp policy.
	fn check_nonce<'a>(
		&'a self,
		client_key: &'a str,
		nonce: &'a str,
		timestamp: i64,
		request: RequestHead<'a>,
	) -> StoreFuture<'a, ()>;
}

/// Outcome of [`ClientStore::resolve_signer`]: a signer and a verdict, kept independent.
#[derive(Clone)]
pub struct SignerLookup {
	/// Signer to verify with; may be a stand-in for rejected clients.
	pub signer: Option<Arc<dyn Signer>>,
	/// Client verdict.
	pub outcome: Result<(), StoreError>,
}
impl SignerLookup {
	/// A recognized client and its signer.
	pub fn found(signer: Arc<dyn Signer>) -> Self {
		Self { signer: Some(signer), outcome: Ok(()) }
	}

	/// A rejected client, optionally paired with a stand-in signer.
	pub fn rejected(signer: Option<Arc<dyn Signer>>, error: StoreError) -> Self {
		Self { signer, outcome: Err(error) }
	}
}
impl Debug for SignerLookup {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SignerLookup")
			.field("signer", &self.signer.as_ref().map(|_| "<signer>"))
			.field("outcome", &self.outcome)
			.finish()
	}
}

/// Error type produced by [`ClientStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// No client is registered under the key.
	#[error("Unknown client.")]
	UnknownClient,
	/// The client may not use the declared signature method.
	#[error("Signature method `{method}` is not allowed for this client.")]
	UnsupportedSignatureMethod {
		/// Declared method name.
		method: String,
	},
	/// The `(client, nonce, timestamp)` triple was already accepted.
	#[error("Nonce has already been used.")]
	NonceReplayed,
	/// The timestamp falls outside the store's accepted window.
	#[error("Timestamp {timestamp} is outside the accepted window.")]
	TimestampOutOfWindow {
		/// Request timestamp.
		timestamp: i64,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
impl StoreError {
	/// Returns `true` for infrastructure failures as opposed to verdicts about the request.
	pub fn is_backend(&self) -> bool {
		matches!(self, StoreError::Backend { .. })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn store_error_can_be_serialized() {
		let payload = serde_json::to_string(&StoreError::NonceReplayed)
			.expect("StoreError should serialize to JSON.");

		assert_eq!(payload, "\"NonceReplayed\"");

		let round_trip: StoreError = serde_json::from_str(&payload)
			.expect("Serialized error should deserialize from JSON.");

		assert_eq!(round_trip, StoreError::NonceReplayed);
	}

	#[test]
	fn backend_errors_are_classified() {
		assert!(StoreError::Backend { message: "database unreachable".into() }.is_backend());
		assert!(!StoreError::UnknownClient.is_backend());
		assert!(!StoreError::TimestampOutOfWindow { timestamp: 1 }.is_backend());
	}

	#[test]
	fn signer_lookup_debug_hides_signer() {
		let lookup = SignerLookup::rejected(None, StoreError::UnknownClient);

		assert_eq!(format!("{lookup:?}"), "SignerLookup { signer: None, outcome: Err(UnknownClient) }");
	}
}
