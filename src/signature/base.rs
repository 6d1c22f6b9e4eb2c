//! Signature base string construction (RFC 5849 §3.4.1).

// crates.io
use http::header::HOST;
// self
use crate::{
	_prelude::*,
	error::RequestError,
	request::{ParamMap, RequestHead, encoding},
};

/// Builds `METHOD&enc(base_uri)&enc(normalized_params)`.
///
/// Parameters are encoded, sorted by encoded name then encoded value, and joined as `k=v`
/// pairs separated by `&`.
pub fn signature_base(method: &Method, base_uri: &str, params: &ParamMap) -> String {
	let mut pairs = params
		.iter()
		.map(|(name, value)| (encoding::encode(name), encoding::encode(value)))
		.collect::<Vec<_>>();

	pairs.sort();

	let normalized =
		pairs.iter().map(|(name, value)| format!("{name}={value}")).collect::<Vec<_>>().join("&");

	format!(
		"{}&{}&{}",
		method.as_str().to_ascii_uppercase(),
		encoding::encode(base_uri),
		encoding::encode(&normalized)
	)
}

/// Resolves the base string URI: lowercase scheme and host, non-default port, path only.
///
/// Origin-form targets take their host from the `Host` header and use `default_scheme`.
pub fn base_string_uri(
	head: RequestHead<'_>,
	default_scheme: &str,
) -> Result<String, RequestError> {
	let scheme = head.uri.scheme_str().unwrap_or(default_scheme);
	let authority = match head.uri.authority() {
		Some(authority) => authority.as_str(),
		None => head
			.headers
			.get(HOST)
			.and_then(|value| value.to_str().ok())
			.ok_or(RequestError::MissingHost)?,
	};
	let url = Url::parse(&format!("{scheme}://{authority}{}", head.uri.path()))
		.map_err(|source| RequestError::InvalidUri { source })?;
	let host = url.host_str().ok_or(RequestError::MissingHost)?;
	let mut uri = format!("{}://{host}", url.scheme());

	if let Some(port) = url.port() {
		uri.push_str(&format!(":{port}"));
	}

	uri.push_str(url.path());

	Ok(uri)
}
