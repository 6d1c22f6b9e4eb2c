//! Client shared secrets and the signing keys derived from them.

// self
use crate::{_prelude::*, request::encoding};

/// Client shared secret that keeps sensitive material out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);
impl ClientSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner secret value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Derives the RFC 5849 signing key `enc(client_secret)&enc(token_secret)`.
	///
	/// An empty `token_secret` still leaves the trailing `&`.
	pub fn signing_key(&self, token_secret: &str) -> String {
		format!("{}&{}", encoding::encode(&self.0), encoding::encode(token_secret))
	}
}
impl Debug for ClientSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ClientSecret").field(&"<redacted>").finish()
	}
}
impl Display for ClientSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = ClientSecret::new("kd94hf93k423kf44");

		assert_eq!(format!("{secret:?}"), "ClientSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
		assert_eq!(secret.expose(), "kd94hf93k423kf44");
	}

	#[test]
	fn signing_key_encodes_both_halves() {
		assert_eq!(ClientSecret::new("kd94hf93k423kf44").signing_key(""), "kd94hf93k423kf44&");
		assert_eq!(
			ClientSecret::new("s3cr&t").signing_key("tok en"),
			"s3cr%26t&tok%20en"
		);
		assert_eq!(ClientSecret::new("").signing_key(""), "&");
	}
}
