//! Inbound request normalization: Authorization header parsing, parameter collection, and
//! protocol guards feeding the immutable [`ProviderRequest`].

pub mod collect;
pub mod guard;
pub mod header;

pub(crate) mod encoding;

pub use collect::*;
pub use guard::*;
pub use header::*;

// self
use crate::{_prelude::*, signature::base, verifier::VerifierConfig};

/// `oauth_signature` parameter name.
pub const OAUTH_SIGNATURE: &str = "oauth_signature";
/// `oauth_consumer_key` parameter name.
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
/// `oauth_nonce` parameter name.
pub const OAUTH_NONCE: &str = "oauth_nonce";
/// `oauth_timestamp` parameter name.
pub const OAUTH_TIMESTAMP: &str = "oauth_timestamp";
/// `oauth_signature_method` parameter name.
pub const OAUTH_SIGNATURE_METHOD: &str = "oauth_signature_method";
/// `oauth_version` parameter name.
pub const OAUTH_VERSION: &str = "oauth_version";
/// `oauth_token` parameter name.
pub const OAUTH_TOKEN: &str = "oauth_token";
/// The only protocol version accepted in `oauth_version`.
pub const OAUTH_VERSION_1_0: &str = "1.0";

/// Canonical parameter map: decoded name to decoded value, names unique.
pub type ParamMap = BTreeMap<String, String>;

/// Borrowed view over the parts of an HTTP request that stores and signers may inspect.
#[derive(Clone, Copy, Debug)]
pub struct RequestHead<'r> {
	/// Request method.
	pub method: &'r Method,
	/// Request target as received.
	pub uri: &'r Uri,
	/// Request headers.
	pub headers: &'r HeaderMap,
}
impl<'r> RequestHead<'r> {
	/// Borrows the head of `request`.
	pub fn of<B>(request: &'r Request<B>) -> Self {
		Self { method: request.method(), uri: request.uri(), headers: request.headers() }
	}
}

/// Verification view of a single inbound request.
///
/// Built once per [`Verifier::validate`](crate::Verifier::validate) call and dropped when it
/// returns. The parameter map never contains `oauth_signature`; the supplied signature is kept
/// separately in [`signature`](Self::signature).
#[derive(Debug)]
pub struct ProviderRequest<'r> {
	head: RequestHead<'r>,
	params: ParamMap,
	signature: String,
	signature_method: String,
	timestamp: i64,
	client_key: String,
	nonce: String,
	base_uri: String,
}
impl<'r> ProviderRequest<'r> {
	/// Normalizes `request` and enforces the protocol guards.
	///
	/// Fails on malformed Authorization headers, bad percent-encoding, duplicate parameters,
	/// missing mandatory parameters, bad timestamps or versions, token-credential requests, and
	/// requests whose URI cannot be normalized.
	pub fn parse<B>(request: &'r Request<B>, config: &VerifierConfig) -> Result<Self>
	where
		B: AsRef<[u8]>,
	{
		let head = RequestHead::of(request);
		let header_params = header::parse_authorization(head.headers, &config.auth_scheme)?;
		let body = config.collect_body_params.then(|| request.body().as_ref());
		let mut params = collect::collect_parameters(head, body, header_params)?;
		let fields = guard::enforce(&mut params)?;
		let base_uri = base::base_string_uri(head, &config.default_uri_scheme)?;

		Ok(Self {
			head,
			params,
			signature: fields.signature,
			signature_method: fields.signature_method,
			timestamp: fields.timestamp,
			client_key: fields.client_key,
			nonce: fields.nonce,
			base_uri,
		})
	}

	/// Borrowed request head.
	pub fn head(&self) -> RequestHead<'r> {
		self.head
	}

	/// Canonical parameters, signature excluded.
	pub fn params(&self) -> &ParamMap {
		&self.params
	}

	/// Signature supplied by the client.
	pub fn signature(&self) -> &str {
		&self.signature
	}

	/// Declared signature method name.
	pub fn signature_method(&self) -> &str {
		&self.signature_method
	}

	/// Strictly positive request timestamp.
	pub fn timestamp(&self) -> i64 {
		self.timestamp
	}

	/// Client (consumer) key.
	pub fn client_key(&self) -> &str {
		&self.client_key
	}

	/// Request nonce.
	pub fn nonce(&self) -> &str {
		&self.nonce
	}

	/// Normalized base string URI (scheme, host, non-default port, path).
	pub fn base_uri(&self) -> &str {
		&self.base_uri
	}
}
