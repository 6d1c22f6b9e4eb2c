// self
use crate::obs::ValidationOutcome;

/// Records a validation outcome via the global metrics recorder (when enabled).
///
/// `reason` is an [`Error::label`](crate::Error::label) for rejections and `"none"` otherwise.
pub fn record_validation_outcome(outcome: ValidationOutcome, reason: &'static str) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth1_provider_validation_total",
			"outcome" => outcome.as_str(),
			"reason" => reason
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (outcome, reason);
	}
}
