//! Optional observability helpers for request validation.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to wrap each validation in a span named `oauth1_provider.validate` with a
//!   `stage` field, and to emit `debug` events describing rejections. Events carry labels and
//!   store verdicts only, never secrets or signatures.
//! - Enable `metrics` to increment the `oauth1_provider_validation_total` counter for every
//!   attempt/acceptance/rejection, labeled by `outcome` + `reason`.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::_prelude::*;

/// Outcome labels recorded for each validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValidationOutcome {
	/// Entry to the verifier.
	Attempt,
	/// The request was authenticated.
	Accepted,
	/// The request was rejected.
	Rejected,
}
impl ValidationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ValidationOutcome::Attempt => "attempt",
			ValidationOutcome::Accepted => "accepted",
			ValidationOutcome::Rejected => "rejected",
		}
	}
}
impl Display for ValidationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
