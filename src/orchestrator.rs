/// Footprint orchestration shared by the HTTP handlers and the CLI.
///
/// The flow for one questionnaire:
/// 1. Ask the remote predictor (if one is configured)
/// 2. On any failure, estimate locally
/// 3. Derive local suggestions from the local breakdown
///
/// Exactly one path contributes to a result and no failure escapes.
use crate::estimator;
use crate::models::{EstimateSource, FootprintResult, LifestyleInput};
use crate::predictor_client::PredictorClient;
use crate::recommendations;

/// Purely local estimate plus advice.
pub fn compute_locally(input: &LifestyleInput) -> FootprintResult {
    let breakdown = estimator::estimate(input);
    let suggestions = recommendations::generate(&breakdown, input);

    FootprintResult {
        source: EstimateSource::Local,
        breakdown,
        suggestions,
    }
}

/// Prefers the remote predictor and degrades to the local estimator.
#[derive(Clone)]
pub struct EstimationOrchestrator {
    predictor: Option<PredictorClient>,
}

impl EstimationOrchestrator {
    pub fn new(predictor: PredictorClient) -> Self {
        Self {
            predictor: Some(predictor),
        }
    }

    /// An orchestrator that never leaves the process.
    pub fn local_only() -> Self {
        Self { predictor: None }
    }

    pub fn predictor(&self) -> Option<&PredictorClient> {
        self.predictor.as_ref()
    }

    /// Computes the footprint for one questionnaire. Never fails.
    pub async fn compute_footprint(&self, input: &LifestyleInput) -> FootprintResult {
        let Some(predictor) = &self.predictor else {
            return compute_locally(input);
        };

        match predictor.predict(input).await {
            Ok(remote) => {
                tracing::info!(
                    "Remote prediction accepted: {:.1} kg CO2/month",
                    remote.breakdown.total
                );
                FootprintResult {
                    source: EstimateSource::Remote,
                    breakdown: remote.breakdown,
                    suggestions: remote.suggestions,
                }
            }
            Err(e) => {
                tracing::warn!(
                    kind = e.kind(),
                    "Remote prediction unavailable, using local estimate: {}",
                    e
                );
                compute_locally(input)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AcUsage, TransportMode};

    fn sample() -> LifestyleInput {
        LifestyleInput {
            travel_km_per_day: 8.0,
            transport_mode: TransportMode::Bus,
            carpool: false,
            electricity_units: 120.0,
            ac_usage: AcUsage::Never,
            renewable_energy: true,
            meat_meals_per_week: 3.0,
            dairy_liters_per_day: 0.5,
            local_food: true,
            waste_kg_per_week: 4.0,
            recycle: true,
            water_usage_liters: 150.0,
            shopping_freq: 2.0,
            online_orders: 1.0,
        }
    }

    #[tokio::test]
    async fn test_local_only_matches_compute_locally() {
        let input = sample();
        let result = EstimationOrchestrator::local_only()
            .compute_footprint(&input)
            .await;

        assert_eq!(result.source, EstimateSource::Local);
        assert_eq!(result, compute_locally(&input));
    }

    #[test]
    fn test_compute_locally_ends_with_offset() {
        let result = compute_locally(&sample());
        let last = result.suggestions.last().unwrap();
        assert!(last.as_str().starts_with("🌳 Plant"));
    }
}
