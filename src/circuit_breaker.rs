use failsafe::backoff::{self, Exponential};
use failsafe::failure_policy::{self, ConsecutiveFailures};
use failsafe::{Config, StateMachine};
use std::time::Duration;

/// Circuit breaker guarding the remote predictor.
pub type PredictorBreaker = StateMachine<ConsecutiveFailures<Exponential>, ()>;

/// Creates a circuit breaker for remote prediction calls.
///
/// # Configuration
///
/// - **Failure threshold**: `failure_threshold` consecutive outages (see `PredictionError::is_outage`) trigger OPEN state.
/// - **Backoff**: Exponential backoff from 10s to 60s before attempting recovery.
///
/// # States
///
/// - **CLOSED**: Normal operation, requests reach the predictor.
/// - **OPEN**: Too many failures, requests are refused and the local estimate is used.
/// - **HALF_OPEN**: Testing if the predictor recovered.
///
/// # Returns
///
/// * `PredictorBreaker` - The configured circuit breaker instance.
pub fn create_predictor_circuit_breaker(failure_threshold: u32) -> PredictorBreaker {
    let backoff_strategy = backoff::exponential(
        Duration::from_secs(10), // Initial delay
        Duration::from_secs(60), // Maximum delay
    );

    let failure_policy = failure_policy::consecutive_failures(failure_threshold, backoff_strategy);

    Config::new().failure_policy(failure_policy).build()
}
