// std
use std::borrow::Cow;
// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
// self
use crate::error::RequestError;

/// RFC 3986 unreserved characters stay literal; everything else is encoded.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Percent-encodes `value` for the signature base string.
pub(crate) fn encode(value: &str) -> String {
	utf8_percent_encode(value, UNRESERVED).to_string()
}

/// Decodes `raw` exactly once, rejecting dangling or non-hex escapes.
///
/// With `plus_as_space`, `+` decodes to a space (form encoding); otherwise it stays literal.
pub(crate) fn decode(raw: &str, plus_as_space: bool) -> Result<String, RequestError> {
	let mut bytes = raw.bytes();

	while let Some(byte) = bytes.next() {
		if byte == b'%' {
			let escaped = matches!(
				(bytes.next(), bytes.next()),
				(Some(hi), Some(lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
			);

			if !escaped {
				return Err(RequestError::InvalidPercentEncoding { value: raw.to_owned() });
			}
		}
	}

	let view = if plus_as_space && raw.contains('+') {
		Cow::Owned(raw.replace('+', " "))
	} else {
		Cow::Borrowed(raw)
	};

	percent_decode_str(&view)
		.decode_utf8()
		.map(Cow::into_owned)
		.map_err(|_| RequestError::InvalidUtf8 { value: raw.to_owned() })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn encode_keeps_unreserved_only() {
		assert_eq!(encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
		assert_eq!(encode("a-b.c_d~e"), "a-b.c_d~e");
		assert_eq!(encode("caf\u{e9}"), "caf%C3%A9");
	}

	#[test]
	fn decode_is_strict() {
		assert_eq!(decode("74KNZJeDHnMBp0EMJ9ZHt%2FXKycU%3D", false).as_deref(), Ok("74KNZJeDHnMBp0EMJ9ZHt/XKycU="));
		assert_eq!(decode("a+b", false).as_deref(), Ok("a+b"));
		assert_eq!(decode("a+b%2B", true).as_deref(), Ok("a b+"));
		assert!(matches!(decode("bad%zz", false), Err(RequestError::InvalidPercentEncoding { .. })));
		assert!(matches!(decode("dangling%4", false), Err(RequestError::InvalidPercentEncoding { .. })));
		assert!(matches!(decode("%FF", false), Err(RequestError::InvalidUtf8 { .. })));
	}
}
