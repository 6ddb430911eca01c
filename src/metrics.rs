use crate::units::{lbs_to_kg, round2, MassUnit};

// one carbon credit offsets one metric ton of CO2
static LBS_PER_CARBON_CREDIT: f64 = 2204.62;
static KG_PER_CARBON_CREDIT: f64 = 1000.0;

// annual CO2 absorption of one urban tree. The Imperial and Metric figures
// are independently calibrated; neither is derived from the other.
static TREE_LBS_PER_YEAR: f64 = 86.17;
static TREE_KG_PER_YEAR: f64 = 39.14;

// average US passenger vehicle, 4.6 t CO2/year,
// https://www.epa.gov/greenvehicles/greenhouse-gas-emissions-typical-passenger-vehicle
static US_VEHICLE_KG_CO2_PER_YEAR: f64 = 4600.0;

/// Returns the carbon credits (metric tons of CO2) needed to offset a yearly
/// emission figure, rounded to 2 decimals.
pub fn carbon_credits(year: f64, unit: MassUnit) -> f64 {
    let credits = match unit {
        MassUnit::Lbs => year / LBS_PER_CARBON_CREDIT,
        MassUnit::Kg => year / KG_PER_CARBON_CREDIT,
    };
    round2(credits)
}

/// Returns how many urban trees absorb a yearly emission figure, rounded to
/// 2 decimals. The figure stays in its display unit; each unit has its own
/// per-tree constant.
pub fn urban_trees(year: f64, unit: MassUnit) -> f64 {
    let trees = match unit {
        MassUnit::Lbs => year / TREE_LBS_PER_YEAR,
        MassUnit::Kg => year / TREE_KG_PER_YEAR,
    };
    round2(trees)
}

/// Returns the ratio of a yearly emission figure to the average US passenger
/// vehicle, rounded to 2 decimals.
pub fn vs_us_average(year: f64, unit: MassUnit) -> f64 {
    let kg = match unit {
        MassUnit::Lbs => lbs_to_kg(year),
        MassUnit::Kg => year,
    };
    round2(kg / US_VEHICLE_KG_CO2_PER_YEAR)
}

/// Severity of a daily emission figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactLevel {
    Low,
    Moderate,
    High,
}

impl std::fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImpactLevel::Low => write!(f, "low"),
            ImpactLevel::Moderate => write!(f, "moderate"),
            ImpactLevel::High => write!(f, "high"),
        }
    }
}

/// Classifies the per-day emission figure in the active display unit.
///
/// The thresholds are applied to the raw figure whichever unit it is in, so
/// the effective severity scale differs between lbs and kg. Intentional:
/// this matches the published behavior.
pub fn impact_level(day: f64) -> ImpactLevel {
    if day < 10.0 {
        ImpactLevel::Low
    } else if day < 50.0 {
        ImpactLevel::Moderate
    } else {
        ImpactLevel::High
    }
}
