use crate::units::{km_to_miles, l_per_100km_to_mpg, lbs_to_kg, round2, MassUnit, UnitSystem};
use crate::vehicles::{VehicleCategory, VehicleProfile};

// EPA emission factor for motor gasoline,
// https://www.epa.gov/greenvehicles/greenhouse-gas-emissions-typical-passenger-vehicle
static GASOLINE_LBS_CO2_PER_GALLON: f64 = 19.6;
// EPA emission factor for diesel, burnt by transit buses
static DIESEL_LBS_CO2_PER_GALLON: f64 = 22.45;
// riders of a transit bus at half occupancy; the per-person share divides by this
static SHARED_TRANSIT_RIDERS: f64 = 15.0;
// energy content of one gallon of gasoline, the MPGe baseline,
// https://www.fueleconomy.gov/feg/label/calculations-information.shtml
static KWH_PER_GALLON_EQUIVALENT: f64 = 33.7;
// US average grid intensity, https://www.epa.gov/egrid
static GRID_LBS_CO2_PER_KWH: f64 = 0.92;

static COMMUTE_DAYS_PER_WEEK: f64 = 5.0;
static WEEKS_PER_YEAR: f64 = 52.0;

// MPG claims above this are flagged for explicit confirmation
static SUSPICIOUS_MPG: f64 = 150.0;

/// A calculation input rejected before the formulas run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The distance is not a finite number greater than zero.
    InvalidDistance,
    /// The combustion-vehicle efficiency is not a finite number greater than zero.
    InvalidEfficiency,
}

impl std::error::Error for ValidationError {}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDistance => write!(f, "distance must be a number greater than zero"),
            Self::InvalidEfficiency => write!(f, "efficiency must be a number greater than zero"),
        }
    }
}

/// A soft flag the caller may override explicitly, unlike a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    /// The claimed MPG exceeds what production vehicles achieve.
    SuspiciousEfficiency,
}

/// Checks a calculation input before [`compute`] runs.
///
/// `efficiency` is the user-facing override, in MPG under Imperial units and
/// L/100km under Metric. It only applies to combustion vehicles; for the
/// other categories it is ignored here as it is in [`compute`].
pub fn validate(
    units: UnitSystem,
    profile: &VehicleProfile,
    distance: f64,
    efficiency: Option<f64>,
) -> Result<Option<Advisory>, ValidationError> {
    if !distance.is_finite() || distance <= 0.0 {
        return Err(ValidationError::InvalidDistance);
    }
    if profile.category != VehicleCategory::Combustion {
        return Ok(None);
    }
    if let Some(value) = efficiency {
        if !value.is_finite() || value <= 0.0 {
            return Err(ValidationError::InvalidEfficiency);
        }
    }
    let advisory = (units == UnitSystem::Imperial
        && efficiency.unwrap_or(profile.efficiency) > SUSPICIOUS_MPG)
        .then_some(Advisory::SuspiciousEfficiency);
    Ok(advisory)
}

/// CO2 emitted by one daily commute, extrapolated to a week and a year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Co2 {
    pub day: f64,
    pub week: f64,
    pub year: f64,
    pub unit: MassUnit,
}

/// The unrounded daily emission in lbs for a commute of `miles`.
fn daily_lbs(
    miles: f64,
    profile: &VehicleProfile,
    units: UnitSystem,
    efficiency: Option<f64>,
) -> f64 {
    match profile.category {
        VehicleCategory::SharedTransit => {
            // the vehicle burns diesel; each rider carries a fixed share
            miles * DIESEL_LBS_CO2_PER_GALLON / profile.efficiency / SHARED_TRANSIT_RIDERS
        }
        VehicleCategory::ElectricEquivalent => {
            let kwh_per_mile = KWH_PER_GALLON_EQUIVALENT / profile.efficiency;
            miles * kwh_per_mile * GRID_LBS_CO2_PER_KWH
        }
        VehicleCategory::Combustion => {
            let mpg = match (efficiency, units) {
                (Some(value), UnitSystem::Imperial) => value,
                (Some(value), UnitSystem::Metric) => l_per_100km_to_mpg(value),
                // the catalog default is already MPG
                (None, _) => profile.efficiency,
            };
            miles / mpg * GASOLINE_LBS_CO2_PER_GALLON
        }
    }
}

/// Returns the commute CO2 of travelling `distance` each commuting day, in
/// the mass unit matching `units`.
///
/// `distance` is miles under Imperial units and km under Metric.
/// `efficiency` is the user-facing override for combustion vehicles (MPG or
/// L/100km per `units`); electric-equivalent and shared-transit vehicles
/// always use their catalog figure.
///
/// Callers are expected to have run [`validate`] first.
pub fn compute(
    distance: f64,
    units: UnitSystem,
    profile: &VehicleProfile,
    efficiency: Option<f64>,
) -> Co2 {
    let miles = match units {
        UnitSystem::Imperial => distance,
        UnitSystem::Metric => km_to_miles(distance),
    };
    let day = daily_lbs(miles, profile, units, efficiency);
    // week and year extrapolate from the unrounded daily rate; each figure is
    // then rounded on its own so rounding does not compound
    let week = day * COMMUTE_DAYS_PER_WEEK;
    let year = week * WEEKS_PER_YEAR;
    let unit = units.mass_unit();
    let [day, week, year] = match unit {
        MassUnit::Lbs => [day, week, year],
        MassUnit::Kg => [lbs_to_kg(day), lbs_to_kg(week), lbs_to_kg(year)],
    };
    Co2 {
        day: round2(day),
        week: round2(week),
        year: round2(year),
        unit,
    }
}
