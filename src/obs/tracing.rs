// self
use crate::{_prelude::*, obs::AuthOutcome, request::RequestKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedAuth<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedAuth<F> = F;

/// Span wrapping a single authentication attempt.
#[derive(Clone, Debug)]
pub struct AuthSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl AuthSpan {
	/// Creates a new span tagged with the request kind.
	pub fn new(kind: RequestKind) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("openid_strategy.authenticate", kind = kind.as_str());

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = kind;

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedAuth<Fut>
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

/// Emits a debug event describing the action chosen for the current request.
pub fn trace_outcome(kind: RequestKind, outcome: AuthOutcome) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(kind = kind.as_str(), outcome = outcome.as_str(), "OpenID action selected.");
	}

	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, outcome);
	}
}
