use crate::circuit_breaker::{create_predictor_circuit_breaker, PredictorBreaker};
use crate::errors::PredictionError;
use crate::models::{EmissionBreakdown, LifestyleInput, Suggestion};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Per-category breakdown as the predictor reports it (no total).
#[derive(Debug, Deserialize)]
struct RemoteBreakdown {
    transportation: f64,
    electricity: f64,
    diet: f64,
    waste: f64,
    lifestyle: f64,
}

/// Body of `POST /api/predict`. Every field is optional so that a partial
/// answer decodes and can be classified instead of failing opaquely.
#[derive(Debug, Deserialize)]
struct PredictResponse {
    status: Option<String>,
    #[serde(default)]
    error: Option<Value>,
    prediction: Option<Value>,
    emissions_breakdown: Option<RemoteBreakdown>,
    #[serde(default)]
    recommendations: Option<Vec<String>>,
}

/// A usable answer from the remote predictor.
#[derive(Debug, Clone, PartialEq)]
pub struct RemotePrediction {
    pub breakdown: EmissionBreakdown,
    pub suggestions: Vec<Suggestion>,
}

/// Client for the remote footprint predictor.
#[derive(Clone)]
pub struct PredictorClient {
    client: reqwest::Client,
    base_url: String,
    breaker: PredictorBreaker,
}

impl PredictorClient {
    /// Creates a new `PredictorClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the predictor service (no trailing path).
    /// * `timeout` - Upper bound for a whole request, connect included.
    /// * `failure_threshold` - Consecutive failures before the breaker opens.
    pub fn new(
        base_url: String,
        timeout: Duration,
        failure_threshold: u32,
    ) -> Result<Self, PredictionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                PredictionError::Transport(format!("Failed to create predictor client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            breaker: create_predictor_circuit_breaker(failure_threshold),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Asks the predictor for a breakdown and advice.
    ///
    /// Calls go through the circuit breaker; while it is open this returns
    /// `PredictionError::CircuitOpen` without touching the network. Only
    /// outages count against the breaker, so an error payload for one
    /// questionnaire never diverts other requests to the local path.
    pub async fn predict(&self, input: &LifestyleInput) -> Result<RemotePrediction, PredictionError> {
        match failsafe::futures::CircuitBreaker::call_with(
            &self.breaker,
            PredictionError::is_outage,
            self.request_prediction(input),
        )
        .await
        {
            Ok(prediction) => Ok(prediction),
            Err(failsafe::Error::Inner(e)) => Err(e),
            Err(failsafe::Error::Rejected) => Err(PredictionError::CircuitOpen),
        }
    }

    async fn request_prediction(
        &self,
        input: &LifestyleInput,
    ) -> Result<RemotePrediction, PredictionError> {
        let url = format!("{}/api/predict", self.base_url);
        tracing::debug!("Requesting prediction from {}", url);

        let response = self.client.post(&url).json(input).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = format!("predictor returned {}: {}", status, error_text);
            // A proxy answering for a dead upstream is an outage, not a verdict on the input
            return Err(match status {
                StatusCode::BAD_GATEWAY
                | StatusCode::SERVICE_UNAVAILABLE
                | StatusCode::GATEWAY_TIMEOUT => PredictionError::Transport(message),
                _ => PredictionError::Protocol(message),
            });
        }

        let body = response.bytes().await?;
        parse_body(&body)
    }

    /// Checks whether the predictor answers its liveness route.
    pub async fn is_reachable(&self) -> bool {
        let url = format!("{}/test", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("Predictor probe failed: {}", e);
                false
            }
        }
    }
}

/// Decodes a raw `/api/predict` body and classifies it.
fn parse_body(body: &[u8]) -> Result<RemotePrediction, PredictionError> {
    let decoded: PredictResponse = serde_json::from_slice(body).map_err(|e| {
        PredictionError::Data(format!("Failed to parse predictor response: {}", e))
    })?;

    interpret(decoded)
}

/// Classifies a decoded body as usable or as a protocol/data failure.
fn interpret(response: PredictResponse) -> Result<RemotePrediction, PredictionError> {
    if response.status.as_deref() == Some("error") {
        let detail = response
            .error
            .as_ref()
            .and_then(|e| e.as_str())
            .unwrap_or("Unknown prediction error");
        return Err(PredictionError::Protocol(detail.to_string()));
    }

    if let Some(error) = response.error.filter(|e| !e.is_null()) {
        return Err(PredictionError::Protocol(error.to_string()));
    }

    let prediction = match response.prediction {
        Some(value) => value
            .as_f64()
            .filter(|p| p.is_finite())
            .ok_or_else(|| PredictionError::Data(format!("invalid prediction value: {}", value)))?,
        None => return Err(PredictionError::Data("missing prediction".to_string())),
    };

    let remote = response
        .emissions_breakdown
        .ok_or_else(|| PredictionError::Data("missing emissions_breakdown".to_string()))?;

    Ok(RemotePrediction {
        breakdown: EmissionBreakdown {
            transportation: remote.transportation,
            electricity: remote.electricity,
            diet: remote.diet,
            waste: remote.waste,
            lifestyle: remote.lifestyle,
            total: prediction,
        },
        suggestions: response
            .recommendations
            .unwrap_or_default()
            .into_iter()
            .map(Suggestion::new)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> PredictResponse {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = PredictorClient::new(
            "http://127.0.0.1:5000/".to_string(),
            Duration::from_secs(4),
            3,
        );
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url(), "http://127.0.0.1:5000");
    }

    #[test]
    fn test_interpret_success() {
        let result = interpret(decode(json!({
            "status": "success",
            "prediction": 500.0,
            "emissions_breakdown": {
                "transportation": 135.0,
                "electricity": 145.0,
                "diet": 130.0,
                "waste": 25.0,
                "lifestyle": 65.0
            },
            "recommendations": ["🚗 TOP PRIORITY: Carpooling can cut your transport emissions in half."]
        })))
        .unwrap();

        assert_eq!(result.breakdown.total, 500.0);
        assert_eq!(result.breakdown.electricity, 145.0);
        assert_eq!(result.suggestions.len(), 1);
    }

    #[test]
    fn test_interpret_error_status() {
        let err = interpret(decode(json!({"status": "error", "error": "model not loaded"})))
            .unwrap_err();
        assert_eq!(err, PredictionError::Protocol("model not loaded".to_string()));
    }

    #[test]
    fn test_interpret_error_field_without_status() {
        let err = interpret(decode(json!({
            "error": "boom",
            "prediction": 10.0,
            "emissions_breakdown": {
                "transportation": 1.0, "electricity": 1.0, "diet": 1.0,
                "waste": 1.0, "lifestyle": 1.0
            }
        })))
        .unwrap_err();
        assert_eq!(err.kind(), "protocol");
    }

    #[test]
    fn test_interpret_non_numeric_prediction() {
        let err = interpret(decode(json!({
            "status": "success",
            "prediction": "lots",
            "emissions_breakdown": {
                "transportation": 1.0, "electricity": 1.0, "diet": 1.0,
                "waste": 1.0, "lifestyle": 1.0
            }
        })))
        .unwrap_err();
        assert_eq!(err.kind(), "data");
    }

    #[test]
    fn test_interpret_missing_breakdown() {
        let err = interpret(decode(json!({"status": "success", "prediction": 12.5})))
            .unwrap_err();
        assert_eq!(err, PredictionError::Data("missing emissions_breakdown".to_string()));
    }

    #[test]
    fn test_non_numeric_breakdown_field_is_data_failure() {
        let body = json!({
            "status": "success",
            "prediction": 12.5,
            "emissions_breakdown": {
                "transportation": 1.0, "electricity": 1.0, "diet": "x",
                "waste": 1.0, "lifestyle": 1.0
            }
        })
        .to_string();

        let err = parse_body(body.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), "data");
        assert!(!err.is_outage());
    }

    #[test]
    fn test_parse_body_rejects_non_json() {
        let err = parse_body(b"<html>502 Bad Gateway</html>").unwrap_err();
        assert_eq!(err.kind(), "data");
    }

    #[test]
    fn test_interpret_missing_recommendations_is_empty() {
        let result = interpret(decode(json!({
            "prediction": 5.0,
            "emissions_breakdown": {
                "transportation": 1.0, "electricity": 1.0, "diet": 1.0,
                "waste": 1.0, "lifestyle": 1.0
            }
        })))
        .unwrap();
        assert!(result.suggestions.is_empty());
    }
}
