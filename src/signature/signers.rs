//! Built-in signers for the `HMAC-SHA1`, `HMAC-SHA256`, and `PLAINTEXT` methods.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;
// self
use crate::{
	_prelude::*,
	secret::ClientSecret,
	signature::{Signer, SignerError},
};

macro_rules! def_hmac_signer {
	($name:ident, $digest:ty, $doc:literal) => {
		#[doc = $doc]
		#[derive(Clone, Debug)]
		pub struct $name {
			secret: ClientSecret,
		}
		impl $name {
			/// Creates a signer keyed by the client's shared secret.
			pub fn new(secret: ClientSecret) -> Self {
				Self { secret }
			}
		}
		impl Signer for $name {
			fn sign(&self, token_secret: &str, base: &str) -> Result<String, SignerError> {
				let key = self.secret.signing_key(token_secret);
				let mut mac =
					Hmac::<$digest>::new_from_slice(key.as_bytes()).map_err(SignerError::backend)?;

				mac.update(base.as_bytes());

				Ok(STANDARD.encode(mac.finalize().into_bytes()))
			}
		}
	};
}

def_hmac_signer! { HmacSha1Signer, Sha1, "`HMAC-SHA1` signer producing base64 digests." }
def_hmac_signer! { HmacSha256Signer, Sha256, "`HMAC-SHA256` signer producing base64 digests." }

/// `PLAINTEXT` signer; the signature is the signing key itself.
#[derive(Clone, Debug)]
pub struct PlaintextSigner {
	secret: ClientSecret,
}
impl PlaintextSigner {
	/// Creates a signer keyed by the client's shared secret.
	pub fn new(secret: ClientSecret) -> Self {
		Self { secret }
	}
}
impl Signer for PlaintextSigner {
	fn sign(&self, token_secret: &str, _base: &str) -> Result<String, SignerError> {
		Ok(self.secret.signing_key(token_secret))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const RFC_BASE: &str = "GET&http%3A%2F%2Fphotos.example.net%2Fphotos&file%3Dvacation.jpg%26\
		oauth_consumer_key%3Ddpf43f3p2l4k3l03%26oauth_nonce%3Dkllo9940pd9333jh%26\
		oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1191242096%26\
		oauth_token%3Dnnch734d00sl2jdk%26oauth_version%3D1.0%26size%3Doriginal";

	#[test]
	fn hmac_sha1_matches_rfc_example() {
		let signer = HmacSha1Signer::new(ClientSecret::new("kd94hf93k423kf44"));
		let signature =
			signer.sign("pfkkdhi9sl3r4s00", RFC_BASE).expect("HMAC signing should succeed.");

		assert_eq!(signature, "tR3+Ty81lMeYAr/Fid0kMTYa/WM=");
	}

	#[test]
	fn hmac_sha256_differs_from_sha1() {
		let secret = ClientSecret::new("kd94hf93k423kf44");
		let sha1 = HmacSha1Signer::new(secret.clone()).sign("", RFC_BASE).expect("Sign.");
		let sha256 = HmacSha256Signer::new(secret).sign("", RFC_BASE).expect("Sign.");

		assert_eq!(sha1.len(), 28);
		assert_eq!(sha256.len(), 44);
	}

	#[test]
	fn plaintext_encodes_both_secrets() {
		let signer = PlaintextSigner::new(ClientSecret::new("djr9rjt0jd78jf88"));

		assert_eq!(signer.sign("", "ignored").as_deref(), Ok("djr9rjt0jd78jf88&"));
		assert_eq!(signer.sign("jjd99$tj88uiths3", "ignored").as_deref(), Ok("djr9rjt0jd78jf88&jjd99%24tj88uiths3"));
	}

	#[test]
	fn signer_debug_redacts_secret() {
		let signer = HmacSha1Signer::new(ClientSecret::new("kd94hf93k423kf44"));

		assert!(!format!("{signer:?}").contains("kd94hf93k423kf44"));
	}
}
