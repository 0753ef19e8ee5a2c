// self
use crate::{obs::AuthOutcome, request::RequestKind};

/// Records an authentication outcome via the global metrics recorder (when enabled).
pub fn record_outcome(kind: RequestKind, outcome: AuthOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"openid_strategy_action_total",
			"kind" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}
