static KM_PER_MILE: f64 = 1.60934;
static L_PER_100KM_MPG: f64 = 235.214;
static KG_PER_LB: f64 = 0.453592;

/// The display unit system, a single global user preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum UnitSystem {
    /// miles, MPG, lbs
    Imperial,
    /// km, L/100km, kg
    Metric,
}

impl UnitSystem {
    pub fn distance_unit(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "mi",
            UnitSystem::Metric => "km",
        }
    }

    pub fn mass_unit(&self) -> MassUnit {
        match self {
            UnitSystem::Imperial => MassUnit::Lbs,
            UnitSystem::Metric => MassUnit::Kg,
        }
    }

    /// The unit a user-entered efficiency for a combustion vehicle is expressed in.
    pub fn efficiency_unit(&self) -> EfficiencyUnit {
        match self {
            UnitSystem::Imperial => EfficiencyUnit::Mpg,
            UnitSystem::Metric => EfficiencyUnit::LPer100Km,
        }
    }
}

/// Unit of a persisted emissions figure. Recorded per record because the
/// global [`UnitSystem`] preference can change after the record is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MassUnit {
    #[serde(rename = "lbs")]
    Lbs,
    #[serde(rename = "kg")]
    Kg,
}

impl std::fmt::Display for MassUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MassUnit::Lbs => write!(f, "lbs"),
            MassUnit::Kg => write!(f, "kg"),
        }
    }
}

/// Unit of a persisted efficiency figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum EfficiencyUnit {
    #[serde(rename = "mpg")]
    Mpg,
    #[serde(rename = "l_per_100km")]
    LPer100Km,
    #[serde(rename = "mpge")]
    Mpge,
}

impl std::fmt::Display for EfficiencyUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EfficiencyUnit::Mpg => write!(f, "MPG"),
            EfficiencyUnit::LPer100Km => write!(f, "L/100km"),
            EfficiencyUnit::Mpge => write!(f, "MPGe"),
        }
    }
}

pub fn miles_to_km(miles: f64) -> f64 {
    miles * KM_PER_MILE
}

pub fn km_to_miles(km: f64) -> f64 {
    km / KM_PER_MILE
}

/// Converts MPG to L/100km. The relation is self-inverse: applying it twice
/// returns the original value. Callers must guard `mpg != 0`.
pub fn mpg_to_l_per_100km(mpg: f64) -> f64 {
    L_PER_100KM_MPG / mpg
}

/// Converts L/100km to MPG. Callers must guard `l_per_100km != 0`.
pub fn l_per_100km_to_mpg(l_per_100km: f64) -> f64 {
    L_PER_100KM_MPG / l_per_100km
}

pub fn lbs_to_kg(lbs: f64) -> f64 {
    lbs * KG_PER_LB
}

pub fn kg_to_lbs(kg: f64) -> f64 {
    kg / KG_PER_LB
}

/// Rounds to 2 decimal places. Persisted emission figures are rounded with
/// this before being stored, so later unit conversions apply to the
/// already-rounded values.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
