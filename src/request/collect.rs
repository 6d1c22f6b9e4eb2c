//! Query-string and form-body parameter collection merged with header parameters.

// std
use std::collections::btree_map::Entry;
// crates.io
use http::header::CONTENT_TYPE;
// self
use crate::{
	_prelude::*,
	error::RequestError,
	request::{ParamMap, RequestHead, encoding},
};

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Merges header parameters with query parameters and, for form-encoded requests, `body`.
///
/// Any repeated name, inside one source or across sources, fails with
/// [`RequestError::DuplicateParameter`].
pub fn collect_parameters(
	head: RequestHead<'_>,
	body: Option<&[u8]>,
	header_params: ParamMap,
) -> Result<ParamMap, RequestError> {
	let mut params = header_params;

	if let Some(query) = head.uri.query() {
		merge_form(&mut params, query)?;
	}
	if let Some(body) = body.filter(|_| is_form_encoded(head.headers)) {
		let body = std::str::from_utf8(body).map_err(|_| RequestError::InvalidBody)?;

		merge_form(&mut params, body)?;
	}

	Ok(params)
}

/// Inserts `name`, failing if it is already present.
pub(crate) fn insert_unique(
	params: &mut ParamMap,
	name: String,
	value: String,
) -> Result<(), RequestError> {
	match params.entry(name) {
		Entry::Vacant(slot) => {
			slot.insert(value);

			Ok(())
		},
		Entry::Occupied(slot) => Err(RequestError::DuplicateParameter { name: slot.key().clone() }),
	}
}

fn merge_form(params: &mut ParamMap, raw: &str) -> Result<(), RequestError> {
	for pair in raw.split('&').filter(|pair| !pair.is_empty()) {
		let (name, value) = pair.split_once('=').unwrap_or((pair, ""));

		insert_unique(params, encoding::decode(name, true)?, encoding::decode(value, true)?)?;
	}

	Ok(())
}

fn is_form_encoded(headers: &HeaderMap) -> bool {
	headers
		.get(CONTENT_TYPE)
		.and_then(|value| value.to_str().ok())
		.and_then(|value| value.split(';').next())
		.is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_URLENCODED))
}
