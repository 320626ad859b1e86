//! Population statistics and feature ranking for comparison views.
//!
//! Loaded once at start-up and handed to the HTTP layer; the estimator never
//! reads any of this.

use serde::{Deserialize, Serialize};
use std::path::Path;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Percentiles {
    #[serde(rename = "25")]
    pub p25: f64,
    #[serde(rename = "50")]
    pub p50: f64,
    #[serde(rename = "75")]
    pub p75: f64,
}

/// Aggregate monthly footprint statistics (kg CO2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CarbonStats {
    pub average_footprint: f64,
    pub min_footprint: f64,
    pub max_footprint: f64,
    pub percentiles: Percentiles,
}

impl Default for CarbonStats {
    fn default() -> Self {
        Self {
            average_footprint: 750.0,
            min_footprint: 300.0,
            max_footprint: 1500.0,
            percentiles: Percentiles {
                p25: 500.0,
                p50: 750.0,
                p75: 1000.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// Feature importance enriched for display.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RankedFeature {
    pub feature: String,
    pub display_name: String,
    pub importance: f64,
}

pub fn default_feature_importance() -> Vec<FeatureImportance> {
    [
        ("electricityUnits", 0.3),
        ("transportMode", 0.2),
        ("meatMealsPerWeek", 0.15),
        ("waterUsageLiters", 0.1),
        ("wasteKgPerWeek", 0.1),
        ("onlineOrders", 0.05),
        ("shoppingFreq", 0.05),
        ("dairyLitersPerDay", 0.05),
    ]
    .into_iter()
    .map(|(feature, importance)| FeatureImportance {
        feature: feature.to_string(),
        importance,
    })
    .collect()
}

/// Label shown for a questionnaire field; unknown fields keep their key.
pub fn feature_display_name(feature: &str) -> &str {
    match feature {
        "electricityUnits" => "Electricity Usage",
        "renewableEnergy" => "Renewable Energy",
        "shoppingFreq" => "Shopping Frequency",
        "meatMealsPerWeek" => "Meat Consumption",
        "travelKmPerDay" => "Daily Travel Distance",
        "dairyLitersPerDay" => "Dairy Consumption",
        "transportMode" => "Transport Mode",
        "wasteKgPerWeek" => "Waste Generation",
        "onlineOrders" => "Online Orders",
        "waterUsageLiters" => "Water Usage",
        "acUsage" => "AC Usage",
        "carpool" => "Carpooling",
        "recycle" => "Recycling",
        "localFood" => "Local Food",
        other => other,
    }
}

/// Signed percentage of `total` above (+) or below (-) the average.
pub fn compare_to_average(total: f64, stats: &CarbonStats) -> f64 {
    if stats.average_footprint == 0.0 {
        return 0.0;
    }
    (total - stats.average_footprint) / stats.average_footprint * 100.0
}

/// Everything the comparison views need.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DisplayData {
    pub stats: CarbonStats,
    pub features: Vec<RankedFeature>,
}

impl DisplayData {
    pub fn new(stats: CarbonStats, mut importance: Vec<FeatureImportance>) -> Self {
        importance.sort_by(|a, b| b.importance.total_cmp(&a.importance));
        let features = importance
            .into_iter()
            .map(|f| RankedFeature {
                display_name: feature_display_name(&f.feature).to_string(),
                feature: f.feature,
                importance: f.importance,
            })
            .collect();

        Self { stats, features }
    }

    /// Loads statistics and feature importance from optional JSON files,
    /// substituting the built-in defaults for anything missing or unreadable.
    pub async fn load(stats_path: Option<&str>, importance_path: Option<&str>) -> Self {
        let stats = match stats_path {
            Some(path) => read_json(path).await.unwrap_or_else(|e| {
                tracing::warn!("Using default carbon stats, {} unusable: {}", path, e);
                CarbonStats::default()
            }),
            None => CarbonStats::default(),
        };

        let importance = match importance_path {
            Some(path) => read_json(path).await.unwrap_or_else(|e| {
                tracing::warn!("Using default feature importance, {} unusable: {}", path, e);
                default_feature_importance()
            }),
            None => default_feature_importance(),
        };

        Self::new(stats, importance)
    }
}

impl Default for DisplayData {
    fn default() -> Self {
        Self::new(CarbonStats::default(), default_feature_importance())
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}
