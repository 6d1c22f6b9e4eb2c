// self
use crate::_prelude::*;

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedValidation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedValidation<F> = F;

/// A span builder used by the verifier.
#[derive(Clone, Debug)]
pub struct ValidationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl ValidationSpan {
	/// Creates a new span tagged with the provided stage.
	pub fn new(stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::debug_span!("oauth1_provider.validate", stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = stage;

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedValidation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a `debug` event for a rejection returned to the caller.
pub fn trace_rejection(error: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(reason = error.label(), error = %error, "request rejected");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = error;
	}
}

/// Emits a `debug` event for a failure that is reported as a plain signature mismatch.
pub fn trace_collapsed(stage: &'static str, cause: &dyn Display) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(stage, cause = %cause, "failure collapsed into signature mismatch");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (stage, cause);
	}
}
