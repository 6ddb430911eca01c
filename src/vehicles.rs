use std::collections::HashMap;

// defaults and their provenance live in the csv next to this file
static VEHICLES: &'static [u8] = include_bytes!("./vehicles.csv");

/// How a vehicle type turns distance into CO2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub enum VehicleCategory {
    /// Burns gasoline; efficiency is MPG and user-overridable.
    #[serde(rename = "combustion")]
    Combustion,
    /// Electric drive rated in MPGe; the catalog figure always applies.
    #[serde(rename = "electric")]
    ElectricEquivalent,
    /// Fixed-efficiency shared vehicle; emissions are split across riders.
    #[serde(rename = "transit")]
    SharedTransit,
}

/// The in-memory representation of one vehicle type of the catalog.
#[derive(Debug, serde::Deserialize, Clone)]
pub struct VehicleProfile {
    /// the key a [`crate::CalculationRecord`] stores (e.g. `SUV`)
    pub type_id: String,
    pub category: VehicleCategory,
    /// MPG for combustion and shared-transit vehicles, MPGe for
    /// electric-equivalent ones. Always in this unit space, regardless of the
    /// active display unit system.
    pub efficiency: f64,
    pub description: String,
    /// the source of the efficiency figure
    pub source: String,
    /// the date of when the source was retrieved
    pub date: String,
}

pub type Vehicles = HashMap<String, VehicleProfile>;

/// Returns the vehicle catalog as a map `type_id: VehicleProfile`.
pub fn load_vehicles() -> Vehicles {
    let rdr = csv::Reader::from_reader(std::io::Cursor::new(VEHICLES));
    rdr.into_deserialize()
        .map(|r| {
            let profile: VehicleProfile = r.expect("src/vehicles.csv to be deserializable");
            (profile.type_id.clone(), profile)
        })
        .collect()
}

/// Resolves a stored vehicle-type key for re-display. Keys that no longer
/// resolve against the catalog fall back to the literal stored string.
pub fn display_name<'a>(vehicles: &'a Vehicles, type_id: &'a str) -> &'a str {
    vehicles
        .get(type_id)
        .map(|profile| profile.description.as_str())
        .unwrap_or(type_id)
}
