//! `Authorization: OAuth ...` header parsing.

// crates.io
use http::header::AUTHORIZATION;
// self
use crate::{
	_prelude::*,
	error::RequestError,
	request::{ParamMap, collect, encoding},
};

/// Header parameter excluded from the canonical map.
const REALM: &str = "realm";

/// Extracts the parameters carried by an Authorization header using `scheme`.
///
/// Headers that are absent, too short, or that use another scheme yield an empty map. More than
/// one Authorization header is rejected. Every comma-separated segment must look like
/// `name="value"`; values are percent-decoded once and `realm` is dropped.
pub fn parse_authorization(headers: &HeaderMap, scheme: &str) -> Result<ParamMap, RequestError> {
	let mut params = ParamMap::new();
	let mut values = headers.get_all(AUTHORIZATION).iter();
	let Some(value) = values.next() else {
		return Ok(params);
	};

	if values.next().is_some() {
		return Err(RequestError::InvalidAuthorizationHeader);
	}

	let raw = value.as_bytes();
	let prefix_len = scheme.len() + 1;

	if raw.len() <= prefix_len || !has_scheme_prefix(raw, scheme) {
		return Ok(params);
	}

	let rest = std::str::from_utf8(&raw[prefix_len..])
		.map_err(|_| RequestError::InvalidAuthorizationHeader)?;

	for segment in rest.split(',') {
		let (name, value) = parse_segment(segment)?;

		if name == REALM {
			continue;
		}

		collect::insert_unique(&mut params, name, value)?;
	}

	Ok(params)
}

fn has_scheme_prefix(raw: &[u8], scheme: &str) -> bool {
	raw[..scheme.len()].eq_ignore_ascii_case(scheme.as_bytes()) && raw[scheme.len()] == b' '
}

fn parse_segment(segment: &str) -> Result<(String, String), RequestError> {
	let (name, value) =
		segment.trim().split_once('=').ok_or(RequestError::InvalidAuthorizationHeader)?;

	if name.is_empty() || name.chars().any(char::is_whitespace) {
		return Err(RequestError::InvalidAuthorizationHeader);
	}

	let value = value.strip_prefix('"').unwrap_or(value);
	let value = value.strip_suffix('"').unwrap_or(value);

	if value.chars().any(|c| c.is_whitespace() || c == '=' || c == '"') {
		return Err(RequestError::InvalidAuthorizationHeader);
	}

	Ok((encoding::decode(name, false)?, encoding::decode(value, false)?))
}

#[cfg(test)]
mod tests {
	// crates.io
	use http::HeaderValue;
	// self
	use super::*;

	fn headers(value: &str) -> HeaderMap {
		let mut map = HeaderMap::new();

		map.insert(AUTHORIZATION, HeaderValue::from_str(value).expect("Header fixture should be valid."));

		map
	}

	#[test]
	fn parses_quoted_and_bare_values() {
		let params = parse_authorization(
			&headers("oauth oauth_nonce=\"abc\",oauth_timestamp=42, oauth_version=\"1.0\""),
			"OAuth",
		)
		.expect("Header should parse.");

		assert_eq!(params.get("oauth_nonce").map(String::as_str), Some("abc"));
		assert_eq!(params.get("oauth_timestamp").map(String::as_str), Some("42"));
		assert_eq!(params.get("oauth_version").map(String::as_str), Some("1.0"));
	}

	#[test]
	fn other_schemes_and_short_headers_are_ignored() {
		assert!(parse_authorization(&headers("Bearer abc"), "OAuth").expect("Ignored.").is_empty());
		assert!(parse_authorization(&headers("OAuth "), "OAuth").expect("Ignored.").is_empty());
		assert!(parse_authorization(&HeaderMap::new(), "OAuth").expect("Ignored.").is_empty());
	}

	#[test]
	fn realm_is_dropped() {
		let params = parse_authorization(&headers("OAuth realm=\"Photos\", oauth_nonce=\"n\""), "OAuth")
			.expect("Header should parse.");

		assert_eq!(params.len(), 1);
		assert!(params.contains_key("oauth_nonce"));
	}

	#[test]
	fn malformed_segments_fail() {
		for value in [
			"OAuth foo",
			"OAuth oauth_nonce=\"a=b\"",
			"OAuth oauth_nonce=\"a\",",
			"OAuth =\"value\"",
			"OAuth oauth nonce=\"a\"",
			"OAuth oauth_nonce=\"a b\"",
		] {
			assert_eq!(
				parse_authorization(&headers(value), "OAuth"),
				Err(RequestError::InvalidAuthorizationHeader),
				"`{value}` should be rejected."
			);
		}
	}

	#[test]
	fn repeated_authorization_headers_fail() {
		let mut map = headers("OAuth oauth_nonce=\"a\"");

		map.append(AUTHORIZATION, HeaderValue::from_static("OAuth oauth_nonce=\"b\""));

		assert_eq!(parse_authorization(&map, "OAuth"), Err(RequestError::InvalidAuthorizationHeader));

		let mut map = headers("OAuth oauth_nonce=\"a\"");

		map.append(AUTHORIZATION, HeaderValue::from_static("Bearer token"));

		assert_eq!(parse_authorization(&map, "OAuth"), Err(RequestError::InvalidAuthorizationHeader));
	}

	#[test]
	fn bad_percent_encoding_propagates() {
		let err = parse_authorization(&headers("OAuth oauth_signature=\"abc%2\""), "OAuth")
			.expect_err("Dangling escape should fail.");

		assert!(matches!(err, RequestError::InvalidPercentEncoding { .. }));
	}

	#[test]
	fn duplicate_header_parameters_fail() {
		let err = parse_authorization(&headers("OAuth oauth_nonce=\"a\", oauth_nonce=\"b\""), "OAuth")
			.expect_err("Duplicate names should fail.");

		assert_eq!(err, RequestError::DuplicateParameter { name: "oauth_nonce".into() });
	}
}
