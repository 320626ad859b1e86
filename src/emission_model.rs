//! Emission factor tables.
//!
//! Factors follow EPA, CarbonFootprint.com and FAO figures. Every lookup is
//! total over its closed input type, so there is no unknown-key path: a
//! category that is not modelled cannot reach this module because it is
//! rejected when the questionnaire is validated.

use crate::models::{AcUsage, TransportMode};

/// Days per month used to scale daily answers.
pub const DAYS_PER_MONTH: f64 = 30.0;
/// Weeks per month used to scale weekly answers.
pub const WEEKS_PER_MONTH: f64 = 4.3;

/// kg CO2 per kWh of grid electricity.
pub const ELECTRICITY_PER_UNIT: f64 = 0.5;
/// kg CO2 per meat-based meal.
pub const MEAT_PER_MEAL: f64 = 3.5;
/// kg CO2 per litre of dairy.
pub const DAIRY_PER_LITER: f64 = 2.5;
/// kg CO2 per kg of household waste.
pub const WASTE_PER_KG: f64 = 0.5;
/// kg CO2 per litre of water (treatment and pumping).
pub const WATER_PER_LITER: f64 = 0.0003;
/// kg CO2 per shopping trip.
pub const SHOPPING_TRIP: f64 = 5.0;
/// kg CO2 per online order (packaging and delivery).
pub const ONLINE_ORDER: f64 = 6.0;

/// kg CO2 per km travelled.
pub fn transport_per_km(mode: TransportMode) -> f64 {
    match mode {
        TransportMode::Car => 0.21,
        TransportMode::Bus => 0.08,
        TransportMode::Bike => 0.05,
        TransportMode::Metro => 0.04,
        TransportMode::Bicycle | TransportMode::Walk => 0.0,
    }
}

/// Carpooling halves the per-person transport share.
pub fn carpool_factor(carpool: bool) -> f64 {
    if carpool {
        0.5
    } else {
        1.0
    }
}

/// Flat monthly kg CO2 added for air conditioning.
pub fn ac_monthly(usage: AcUsage) -> f64 {
    match usage {
        AcUsage::Never => 0.0,
        AcUsage::Occasionally => 50.0,
        AcUsage::Daily => 150.0,
    }
}

pub fn renewable_factor(renewable: bool) -> f64 {
    if renewable {
        0.7
    } else {
        1.0
    }
}

pub fn local_food_factor(local: bool) -> f64 {
    if local {
        0.85
    } else {
        1.0
    }
}

pub fn recycle_factor(recycle: bool) -> f64 {
    if recycle {
        0.7
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_factors_span_zero_to_car() {
        let max = TransportMode::ALL
            .iter()
            .map(|m| transport_per_km(*m))
            .fold(f64::MIN, f64::max);
        assert_eq!(max, transport_per_km(TransportMode::Car));
        assert_eq!(transport_per_km(TransportMode::Walk), 0.0);
        assert_eq!(transport_per_km(TransportMode::Bicycle), 0.0);
    }

    #[test]
    fn test_discounts_are_neutral_when_off() {
        assert_eq!(carpool_factor(false), 1.0);
        assert_eq!(renewable_factor(false), 1.0);
        assert_eq!(local_food_factor(false), 1.0);
        assert_eq!(recycle_factor(false), 1.0);

        assert!(carpool_factor(true) < 1.0);
        assert!(renewable_factor(true) < 1.0);
        assert!(local_food_factor(true) < 1.0);
        assert!(recycle_factor(true) < 1.0);
    }

    #[test]
    fn test_ac_tiers_increase() {
        assert_eq!(ac_monthly(AcUsage::Never), 0.0);
        assert!(ac_monthly(AcUsage::Occasionally) < ac_monthly(AcUsage::Daily));
    }
}
