//! Signer capability, signature methods, and timing-aware signature verification.

pub mod base;
pub mod signers;

pub use signers::*;

// self
use crate::{_prelude::*, obs, request::ProviderRequest, secret::ClientSecret};

/// Computes signatures over signature base strings with a secret it owns.
///
/// Stores hand one signer to the verifier per call; the verifier never caches it.
pub trait Signer
where
	Self: Send + Sync,
{
	/// Signs `base` using the signer's client secret combined with `token_secret`.
	///
	/// The verifier always passes an empty `token_secret` because token credentials are
	/// rejected before signing.
	fn sign(&self, token_secret: &str, base: &str) -> Result<String, SignerError>;
}

/// Failure reported by a [`Signer`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum SignerError {
	/// The signer's key material or backing service failed.
	#[error("Signer failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
impl SignerError {
	/// Wraps any displayable failure as a backend error.
	pub fn backend(src: impl Display) -> Self {
		Self::Backend { message: src.to_string() }
	}
}

/// Signature methods with built-in signers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureMethod {
	/// `HMAC-SHA1` (RFC 5849 §3.4.2).
	#[serde(rename = "HMAC-SHA1")]
	HmacSha1,
	/// `HMAC-SHA256`.
	#[serde(rename = "HMAC-SHA256")]
	HmacSha256,
	/// `PLAINTEXT` (RFC 5849 §3.4.4); only safe over TLS.
	#[serde(rename = "PLAINTEXT")]
	Plaintext,
}
impl SignatureMethod {
	/// Returns the wire name used in `oauth_signature_method`.
	pub const fn as_str(self) -> &'static str {
		match self {
			SignatureMethod::HmacSha1 => "HMAC-SHA1",
			SignatureMethod::HmacSha256 => "HMAC-SHA256",
			SignatureMethod::Plaintext => "PLAINTEXT",
		}
	}

	/// Builds the signer for this method keyed by `secret`.
	pub fn signer(self, secret: ClientSecret) -> Arc<dyn Signer> {
		match self {
			SignatureMethod::HmacSha1 => Arc::new(HmacSha1Signer::new(secret)),
			SignatureMethod::HmacSha256 => Arc::new(HmacSha256Signer::new(secret)),
			SignatureMethod::Plaintext => Arc::new(PlaintextSigner::new(secret)),
		}
	}
}
impl Display for SignatureMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for SignatureMethod {
	type Err = UnknownSignatureMethod;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"HMAC-SHA1" => Ok(SignatureMethod::HmacSha1),
			"HMAC-SHA256" => Ok(SignatureMethod::HmacSha256),
			"PLAINTEXT" => Ok(SignatureMethod::Plaintext),
			_ => Err(UnknownSignatureMethod { method: s.to_owned() }),
		}
	}
}

/// Error returned when parsing an unsupported signature method name.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Signature method `{method}` is not supported.")]
pub struct UnknownSignatureMethod {
	/// Method name as received.
	pub method: String,
}

/// Result of [`compare_signatures`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignatureComparison {
	/// Same length and same bytes.
	Equal,
	/// Lengths differ; no byte was inspected.
	LengthMismatch,
	/// Same length, at least one differing byte.
	ContentMismatch,
}

/// Compares two signatures without exiting early on the first differing byte.
///
/// Lengths are compared first. Equal-length inputs are folded over every byte with a
/// cumulative OR of XOR differences.
pub fn compare_signatures(expected: &str, candidate: &str) -> SignatureComparison {
	let (expected, candidate) = (expected.as_bytes(), candidate.as_bytes());

	if expected.len() != candidate.len() {
		return SignatureComparison::LengthMismatch;
	}

	let diff = expected
		.iter()
		.zip(candidate)
		.fold(0_u8, |acc, (a, b)| std::hint::black_box(acc | (a ^ b)));

	if diff == 0 { SignatureComparison::Equal } else { SignatureComparison::ContentMismatch }
}

/// Re-derives the expected signature for `request` and compares it with the supplied one.
///
/// Without a signer, a fallback HMAC-SHA1 signer with an empty secret still computes and
/// compares a signature before the mismatch is reported. Every failure is
/// [`Error::SignatureMismatch`].
pub fn verify_signature(request: &ProviderRequest<'_>, signer: Option<&dyn Signer>) -> Result<()> {
	let base = base::signature_base(request.head().method, request.base_uri(), request.params());
	let absent = signer.is_none();
	let fallback;
	let signer = match signer {
		Some(signer) => signer,
		None => {
			fallback = HmacSha1Signer::new(ClientSecret::new(""));

			&fallback as &dyn Signer
		},
	};
	let expected = match signer.sign("", &base) {
		Ok(signature) => signature,
		Err(e) => {
			obs::trace_collapsed("signer", &e);

			return Err(Error::SignatureMismatch);
		},
	};
	let comparison = std::hint::black_box(compare_signatures(&expected, request.signature()));

	if absent {
		obs::trace_collapsed("signer", &"no signer resolved");

		return Err(Error::SignatureMismatch);
	}
	if comparison != SignatureComparison::Equal {
		obs::trace_collapsed("comparison", &format_args!("{comparison:?}"));

		return Err(Error::SignatureMismatch);
	}

	Ok(())
}
