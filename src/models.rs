use crate::errors::ValidationError;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

// ============ Questionnaire Choices ============

/// How the respondent usually travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Car,
    Bus,
    /// Motorbike.
    Bike,
    Metro,
    Bicycle,
    Walk,
}

impl TransportMode {
    pub const ALL: [TransportMode; 6] = [
        TransportMode::Car,
        TransportMode::Bus,
        TransportMode::Bike,
        TransportMode::Metro,
        TransportMode::Bicycle,
        TransportMode::Walk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Car => "car",
            TransportMode::Bus => "bus",
            TransportMode::Bike => "bike",
            TransportMode::Metro => "metro",
            TransportMode::Bicycle => "bicycle",
            TransportMode::Walk => "walk",
        }
    }

    /// Human-powered modes with no tailpipe emissions.
    pub fn is_active(&self) -> bool {
        matches!(self, TransportMode::Bicycle | TransportMode::Walk)
    }
}

impl FromStr for TransportMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        TransportMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == wanted)
            .ok_or_else(|| ValidationError::UnknownChoice {
                field: "transportMode",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Air-conditioning usage tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AcUsage {
    Never,
    Occasionally,
    Daily,
}

impl AcUsage {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcUsage::Never => "never",
            AcUsage::Occasionally => "occasionally",
            AcUsage::Daily => "daily",
        }
    }

    /// Maps the numeric form encoding (0 / 4 / 8) onto a tier.
    pub fn from_tier(tier: f64) -> Result<Self, ValidationError> {
        // Exact comparison: the form only ever emits these three values.
        if tier == 0.0 {
            Ok(AcUsage::Never)
        } else if tier == 4.0 {
            Ok(AcUsage::Occasionally)
        } else if tier == 8.0 {
            Ok(AcUsage::Daily)
        } else {
            Err(ValidationError::UnknownChoice {
                field: "acUsage",
                value: tier.to_string(),
            })
        }
    }
}

impl FromStr for AcUsage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "never" => Ok(AcUsage::Never),
            "occasionally" => Ok(AcUsage::Occasionally),
            "daily" => Ok(AcUsage::Daily),
            _ => Err(ValidationError::UnknownChoice {
                field: "acUsage",
                value: s.to_string(),
            }),
        }
    }
}

/// The five emission categories, in tie-break precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Transportation,
    Electricity,
    Diet,
    Waste,
    Lifestyle,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Transportation,
        Category::Electricity,
        Category::Diet,
        Category::Waste,
        Category::Lifestyle,
    ];
}

// ============ Raw Questionnaire ============

/// A yes/no answer as the form may send it: a JSON boolean or a word.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlagAnswer {
    Bool(bool),
    Word(String),
}

impl FlagAnswer {
    fn resolve(self, field: &'static str) -> Result<bool, ValidationError> {
        match self {
            FlagAnswer::Bool(b) => Ok(b),
            FlagAnswer::Word(w) => match w.trim().to_ascii_lowercase().as_str() {
                "yes" | "true" => Ok(true),
                "no" | "false" => Ok(false),
                _ => Err(ValidationError::UnknownChoice { field, value: w }),
            },
        }
    }
}

/// AC usage as the form may send it: numeric tier or a word.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AcAnswer {
    Tier(f64),
    Word(String),
}

impl AcAnswer {
    fn resolve(self) -> Result<AcUsage, ValidationError> {
        match self {
            AcAnswer::Tier(t) => AcUsage::from_tier(t),
            AcAnswer::Word(w) => w.parse(),
        }
    }
}

/// Questionnaire answers exactly as submitted, before validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifestyleForm {
    pub travel_km_per_day: f64,
    pub transport_mode: String,
    pub carpool: FlagAnswer,
    pub electricity_units: f64,
    pub ac_usage: AcAnswer,
    pub renewable_energy: FlagAnswer,
    pub meat_meals_per_week: f64,
    pub dairy_liters_per_day: f64,
    pub local_food: FlagAnswer,
    pub waste_kg_per_week: f64,
    pub recycle: FlagAnswer,
    pub water_usage_liters: f64,
    pub shopping_freq: f64,
    pub online_orders: f64,
}

// Largest plausible answer per numeric field. Anything above is a typo or
// garbage, and letting it through can push a category past f64::MAX.
pub const MAX_TRAVEL_KM_PER_DAY: f64 = 5_000.0;
pub const MAX_ELECTRICITY_UNITS: f64 = 1_000_000.0;
pub const MAX_MEAT_MEALS_PER_WEEK: f64 = 100.0;
pub const MAX_DAIRY_LITERS_PER_DAY: f64 = 100.0;
pub const MAX_WASTE_KG_PER_WEEK: f64 = 10_000.0;
pub const MAX_WATER_USAGE_LITERS: f64 = 1_000_000.0;
pub const MAX_SHOPPING_FREQ: f64 = 1_000.0;
pub const MAX_ONLINE_ORDERS: f64 = 1_000.0;

fn bounded(field: &'static str, value: f64, max: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    if value > max {
        return Err(ValidationError::TooLarge { field, value, max });
    }
    Ok(value)
}

fn yes_no<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *flag { "yes" } else { "no" })
}

// ============ Validated Input ============

/// Validated questionnaire answers for one estimation call.
///
/// Deserializing goes through `LifestyleForm`, so a deserialized value has
/// already passed validation. Serializing yields the canonical form that is
/// sent to the remote predictor: choices as words, flags as `"yes"`/`"no"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", try_from = "LifestyleForm")]
pub struct LifestyleInput {
    pub travel_km_per_day: f64,
    pub transport_mode: TransportMode,
    #[serde(serialize_with = "yes_no")]
    pub carpool: bool,
    pub electricity_units: f64,
    pub ac_usage: AcUsage,
    #[serde(serialize_with = "yes_no")]
    pub renewable_energy: bool,
    pub meat_meals_per_week: f64,
    pub dairy_liters_per_day: f64,
    #[serde(serialize_with = "yes_no")]
    pub local_food: bool,
    pub waste_kg_per_week: f64,
    #[serde(serialize_with = "yes_no")]
    pub recycle: bool,
    pub water_usage_liters: f64,
    pub shopping_freq: f64,
    pub online_orders: f64,
}

impl TryFrom<LifestyleForm> for LifestyleInput {
    type Error = ValidationError;

    fn try_from(form: LifestyleForm) -> Result<Self, Self::Error> {
        Ok(Self {
            travel_km_per_day: bounded(
                "travelKmPerDay",
                form.travel_km_per_day,
                MAX_TRAVEL_KM_PER_DAY,
            )?,
            transport_mode: form.transport_mode.parse()?,
            carpool: form.carpool.resolve("carpool")?,
            electricity_units: bounded(
                "electricityUnits",
                form.electricity_units,
                MAX_ELECTRICITY_UNITS,
            )?,
            ac_usage: form.ac_usage.resolve()?,
            renewable_energy: form.renewable_energy.resolve("renewableEnergy")?,
            meat_meals_per_week: bounded(
                "meatMealsPerWeek",
                form.meat_meals_per_week,
                MAX_MEAT_MEALS_PER_WEEK,
            )?,
            dairy_liters_per_day: bounded(
                "dairyLitersPerDay",
                form.dairy_liters_per_day,
                MAX_DAIRY_LITERS_PER_DAY,
            )?,
            local_food: form.local_food.resolve("localFood")?,
            waste_kg_per_week: bounded(
                "wasteKgPerWeek",
                form.waste_kg_per_week,
                MAX_WASTE_KG_PER_WEEK,
            )?,
            recycle: form.recycle.resolve("recycle")?,
            water_usage_liters: bounded(
                "waterUsageLiters",
                form.water_usage_liters,
                MAX_WATER_USAGE_LITERS,
            )?,
            shopping_freq: bounded("shoppingFreq", form.shopping_freq, MAX_SHOPPING_FREQ)?,
            online_orders: bounded("onlineOrders", form.online_orders, MAX_ONLINE_ORDERS)?,
        })
    }
}

// ============ Results ============

/// Monthly kg CO2 per category, each rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmissionBreakdown {
    pub transportation: f64,
    pub electricity: f64,
    pub diet: f64,
    pub waste: f64,
    pub lifestyle: f64,
    pub total: f64,
}

impl EmissionBreakdown {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Transportation => self.transportation,
            Category::Electricity => self.electricity,
            Category::Diet => self.diet,
            Category::Waste => self.waste,
            Category::Lifestyle => self.lifestyle,
        }
    }

    /// Sum of the five category values.
    pub fn category_sum(&self) -> f64 {
        Category::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

/// One piece of advice. The leading symbol carries its theme and
/// "TOP PRIORITY" marks the most urgent ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Suggestion(String);

impl Suggestion {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_top_priority(&self) -> bool {
        self.0.contains("TOP PRIORITY")
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which computation path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EstimateSource {
    Remote,
    Local,
}

/// What the engine hands back for one questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FootprintResult {
    pub source: EstimateSource,
    pub breakdown: EmissionBreakdown,
    #[schema(value_type = Vec<String>)]
    pub suggestions: Vec<Suggestion>,
}
