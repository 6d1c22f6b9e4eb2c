//! Server-side OAuth 1.0 request verification: strict Authorization parsing, protocol guards,
//! replay checks, and timing-aware signature comparison behind pluggable client stores.
//!
//! The entry point is [`verifier::Verifier`] (or the [`verifier::validate_signature`] shortcut),
//! which accepts any [`http::Request`] whose body can be viewed as bytes and consults a
//! [`store::ClientStore`] for signers and nonce bookkeeping.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod error;
pub mod obs;
pub mod request;
pub mod secret;
pub mod signature;
pub mod store;
pub mod verifier;

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap, HashSet},
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use http::{HeaderMap, Method, Request, Uri};
	pub use parking_lot::{Mutex, RwLock};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use http;
pub use verifier::{Verifier, VerifierConfig, validate_signature};
#[cfg(test)] use {color_eyre as _, serde_json as _};
