//! Deterministic monthly footprint estimate.

use crate::emission_model as ef;
use crate::models::{EmissionBreakdown, LifestyleInput};

/// Rounds to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn transportation(input: &LifestyleInput) -> f64 {
    input.travel_km_per_day
        * ef::DAYS_PER_MONTH
        * ef::transport_per_km(input.transport_mode)
        * ef::carpool_factor(input.carpool)
}

/// The AC addend sits inside the renewable discount: a renewable plan
/// discounts all electricity, including what the AC draws.
pub fn electricity(input: &LifestyleInput) -> f64 {
    (input.electricity_units * ef::ELECTRICITY_PER_UNIT + ef::ac_monthly(input.ac_usage))
        * ef::renewable_factor(input.renewable_energy)
}

pub fn diet(input: &LifestyleInput) -> f64 {
    (input.meat_meals_per_week * ef::MEAT_PER_MEAL * ef::WEEKS_PER_MONTH
        + input.dairy_liters_per_day * ef::DAIRY_PER_LITER * ef::DAYS_PER_MONTH)
        * ef::local_food_factor(input.local_food)
}

pub fn waste(input: &LifestyleInput) -> f64 {
    (input.waste_kg_per_week * ef::WASTE_PER_KG * ef::WEEKS_PER_MONTH
        + input.water_usage_liters * ef::WATER_PER_LITER * ef::DAYS_PER_MONTH)
        * ef::recycle_factor(input.recycle)
}

pub fn lifestyle(input: &LifestyleInput) -> f64 {
    input.shopping_freq * ef::SHOPPING_TRIP + input.online_orders * ef::ONLINE_ORDER
}

/// Estimates the monthly breakdown for a validated questionnaire.
///
/// Each category is rounded independently; the total is the rounded sum of
/// the rounded categories so that it always matches what is displayed.
pub fn estimate(input: &LifestyleInput) -> EmissionBreakdown {
    let transportation = round1(transportation(input));
    let electricity = round1(electricity(input));
    let diet = round1(diet(input));
    let waste = round1(waste(input));
    let lifestyle = round1(lifestyle(input));

    EmissionBreakdown {
        transportation,
        electricity,
        diet,
        waste,
        lifestyle,
        total: round1(transportation + electricity + diet + waste + lifestyle),
    }
}
