//! Verifier-level error types shared across parsing, protocol guards, stores, and signatures.

// self
use crate::{_prelude::*, store::StoreError};

/// Verifier-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical rejection returned by [`Verifier::validate`](crate::Verifier::validate).
///
/// Every variant means "reject the request". None of them signal that a fallback
/// authentication path may be attempted.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The request could not be parsed (header syntax, encoding, URI).
	#[error(transparent)]
	Request(#[from] RequestError),
	/// Required OAuth parameters are missing or carry invalid values.
	#[error(transparent)]
	Protocol(#[from] ProtocolError),
	/// The store rejected the nonce/timestamp pair.
	#[error("Nonce rejected: {0}")]
	Replay(#[source] StoreError),
	/// Storage backend failure surfaced by the client store.
	#[error("{0}")]
	Storage(#[source] StoreError),

	/// Unknown client, disallowed method, or a signature that does not verify.
	#[error("Signature mismatch.")]
	SignatureMismatch,
}
impl Error {
	/// Returns a stable label suitable for log fields or metric labels.
	pub const fn label(&self) -> &'static str {
		match self {
			Error::Request(_) => "malformed_request",
			Error::Protocol(_) => "invalid_protocol",
			Error::Replay(_) => "replay",
			Error::Storage(_) => "storage",
			Error::SignatureMismatch => "signature_mismatch",
		}
	}
}

/// Structural failures raised while normalizing the inbound request.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum RequestError {
	/// A segment of the Authorization header does not look like `name="value"`.
	#[error("Invalid Authorization header.")]
	InvalidAuthorizationHeader,
	/// A value carries a `%` that is not followed by two hex digits.
	#[error("Invalid percent-encoding in `{value}`.")]
	InvalidPercentEncoding {
		/// Raw (still encoded) value.
		value: String,
	},
	/// A decoded value is not valid UTF-8.
	#[error("Decoded value `{value}` is not valid UTF-8.")]
	InvalidUtf8 {
		/// Raw (still encoded) value.
		value: String,
	},
	/// The same parameter name was supplied more than once.
	#[error("Parameter `{name}` was supplied more than once.")]
	DuplicateParameter {
		/// Decoded parameter name.
		name: String,
	},
	/// A form-encoded body is not valid UTF-8.
	#[error("Form body is not valid UTF-8.")]
	InvalidBody,
	/// Neither the request URI nor the `Host` header names a host.
	#[error("Request does not name a host.")]
	MissingHost,
	/// The request URI cannot be normalized for the signature base string.
	#[error("Request URI is invalid.")]
	InvalidUri {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}

/// Protocol-level failures detected before any cryptographic work.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ProtocolError {
	/// One or more mandatory parameters are absent.
	#[error("Missing required OAuth parameters: {}.", .params.join(", "))]
	MissingParameters {
		/// Every missing parameter, in check order.
		params: Vec<&'static str>,
	},
	/// `oauth_version` was supplied with an unsupported value.
	#[error("Incorrect OAuth version {version}.")]
	UnsupportedVersion {
		/// Version string sent by the client.
		version: String,
	},
	/// `oauth_timestamp` is not a base-10 64-bit integer.
	#[error("Unable to parse timestamp `{value}`: {source}.")]
	UnparseableTimestamp {
		/// Raw timestamp value.
		value: String,
		/// Integer parsing failure.
		#[source]
		source: std::num::ParseIntError,
	},
	/// `oauth_timestamp` is zero or negative.
	#[error("Invalid timestamp {timestamp}.")]
	NonPositiveTimestamp {
		/// Parsed timestamp.
		timestamp: i64,
	},
	/// The request carries `oauth_token`, which this verifier does not support.
	#[error("Token signature validation not implemented.")]
	TokenNotImplemented,
}

/// Configuration failures raised by [`VerifierConfig::validate`](crate::VerifierConfig::validate).
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ConfigError {
	/// The Authorization scheme token is empty or contains whitespace.
	#[error("Authorization scheme `{scheme}` is invalid.")]
	InvalidAuthScheme {
		/// Configured scheme token.
		scheme: String,
	},
	/// The fallback URI scheme is neither `http` nor `https`.
	#[error("Default URI scheme `{scheme}` is not supported.")]
	UnsupportedUriScheme {
		/// Configured URI scheme.
		scheme: String,
	},
}
