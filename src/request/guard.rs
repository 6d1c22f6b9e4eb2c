//! Protocol invariants checked before any cryptographic work.

// self
use crate::{
	error::ProtocolError,
	request::{
		OAUTH_CONSUMER_KEY, OAUTH_NONCE, OAUTH_SIGNATURE, OAUTH_SIGNATURE_METHOD, OAUTH_TIMESTAMP,
		OAUTH_TOKEN, OAUTH_VERSION, OAUTH_VERSION_1_0, ParamMap,
	},
};

/// Parameters every signed request must carry, in the order they are reported.
pub const MANDATORY_PARAMS: [&str; 5] =
	[OAUTH_SIGNATURE, OAUTH_CONSUMER_KEY, OAUTH_NONCE, OAUTH_TIMESTAMP, OAUTH_SIGNATURE_METHOD];

/// Values lifted out of the parameter map by [`enforce`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OAuthFields {
	/// Signature to verify; removed from the map.
	pub signature: String,
	/// Declared signature method.
	pub signature_method: String,
	/// Parsed, strictly positive timestamp.
	pub timestamp: i64,
	/// Client (consumer) key.
	pub client_key: String,
	/// Request nonce.
	pub nonce: String,
}

/// Runs every protocol guard and removes `oauth_signature` from `params`.
pub fn enforce(params: &mut ParamMap) -> Result<OAuthFields, ProtocolError> {
	check_mandatory_params(params)?;

	let signature = params.remove(OAUTH_SIGNATURE).unwrap_or_default();
	let timestamp = parse_timestamp(field(params, OAUTH_TIMESTAMP))?;

	check_version(params)?;

	Ok(OAuthFields {
		signature,
		signature_method: field(params, OAUTH_SIGNATURE_METHOD).to_owned(),
		timestamp,
		client_key: field(params, OAUTH_CONSUMER_KEY).to_owned(),
		nonce: field(params, OAUTH_NONCE).to_owned(),
	})
}

/// Reports every absent mandatory parameter at once, then rejects token credentials.
pub fn check_mandatory_params(params: &ParamMap) -> Result<(), ProtocolError> {
	let missing = MANDATORY_PARAMS
		.into_iter()
		.filter(|name| !params.contains_key(*name))
		.collect::<Vec<_>>();

	if !missing.is_empty() {
		return Err(ProtocolError::MissingParameters { params: missing });
	}
	if params.contains_key(OAUTH_TOKEN) {
		return Err(ProtocolError::TokenNotImplemented);
	}

	Ok(())
}

/// Parses a base-10 timestamp that must be strictly positive.
pub fn parse_timestamp(raw: &str) -> Result<i64, ProtocolError> {
	let timestamp = raw.parse::<i64>().map_err(|source| ProtocolError::UnparseableTimestamp {
		value: raw.to_owned(),
		source,
	})?;

	if timestamp <= 0 {
		return Err(ProtocolError::NonPositiveTimestamp { timestamp });
	}

	Ok(timestamp)
}

fn check_version(params: &ParamMap) -> Result<(), ProtocolError> {
	match params.get(OAUTH_VERSION) {
		Some(version) if version != OAUTH_VERSION_1_0 =>
			Err(ProtocolError::UnsupportedVersion { version: version.clone() }),
		_ => Ok(()),
	}
}

fn field<'a>(params: &'a ParamMap, name: &str) -> &'a str {
	params.get(name).map(String::as_str).unwrap_or_default()
}
