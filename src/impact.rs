//! Environmental and financial impact of drinking purified tap water
//! instead of bottled water.

use serde::{Deserialize, Serialize};

// ---

/// Grams of CO2 avoided per liter of bottled water not consumed.
pub const CO2_GRAMS_PER_LITER: f64 = 321.0;

/// Grams of plastic avoided per liter of bottled water not consumed.
pub const PLASTIC_GRAMS_PER_LITER: f64 = 40.0;

const CO2_KG_PER_CAR_KM: f64 = 0.12;
const CO2_KG_PER_TREE_YEAR: f64 = 20.0;
const CO2_KG_PER_PHONE_CHARGE: f64 = 0.01;
const RECYCLING_FACTOR: f64 = 1.5;

/// Bottle assumptions used to convert liters into bottles and money.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactConfig {
    // ---
    /// Liters per bottle. Must be positive.
    pub bottle_size: f64,
    /// Price of one bottle.
    pub bottle_cost: f64,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            bottle_size: 0.5,
            bottle_cost: 1.1,
        }
    }
}

/// Everyday equivalents of the CO2 and plastic saved, rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equivalents {
    // ---
    pub car_km: i64,
    pub trees: i64,
    pub smartphone_charges: i64,
    pub recycling: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactMetrics {
    // ---
    pub liters: f64,
    pub bottles_saved: f64,
    pub money_saved: f64,
    pub co2_saved_kg: f64,
    pub plastic_saved_kg: f64,
    pub equivalents: Equivalents,
}

/// Convert a consumption figure into impact metrics.
///
/// `config.bottle_size` must be greater than zero. This is not checked: a
/// zero size yields infinite or NaN bottle and money figures.
pub fn calculate_impact(liters: f64, config: &ImpactConfig) -> ImpactMetrics {
    // ---
    let bottles_saved = liters / config.bottle_size;
    let co2_saved_kg = liters * CO2_GRAMS_PER_LITER / 1000.0;
    let plastic_saved_kg = liters * PLASTIC_GRAMS_PER_LITER / 1000.0;

    ImpactMetrics {
        liters,
        bottles_saved,
        money_saved: bottles_saved * config.bottle_cost,
        co2_saved_kg,
        plastic_saved_kg,
        equivalents: Equivalents {
            car_km: (co2_saved_kg / CO2_KG_PER_CAR_KM).round() as i64,
            trees: (co2_saved_kg / CO2_KG_PER_TREE_YEAR).round() as i64,
            smartphone_charges: (co2_saved_kg / CO2_KG_PER_PHONE_CHARGE).round() as i64,
            recycling: (plastic_saved_kg * RECYCLING_FACTOR).round() as i64,
        },
    }
}

/// Time span the impact calculator is shown for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    Month,
    Year,
    /// Since installation, in days of service.
    AllTime(u32),
}

impl Period {
    // ---
    pub fn days(self) -> u32 {
        match self {
            Period::Day => 1,
            Period::Month => 30,
            Period::Year => 365,
            Period::AllTime(days) => days,
        }
    }
}

/// Liters consumed over a period at a constant daily intake.
pub fn liters_for_period(daily_intake: f64, period: Period) -> f64 {
    daily_intake * f64::from(period.days())
}
