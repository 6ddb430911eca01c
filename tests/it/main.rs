use std::error::Error;

use commutes::history::{self, CalculationRecord};
use commutes::{
    carbon_credits, compute, km_to_miles, l_per_100km_to_mpg, load_vehicles, miles_to_km,
    mpg_to_l_per_100km, round2, urban_trees, Co2, EfficiencyUnit, LocalDisk, MassUnit, UnitSystem,
};

fn abs_difference<T: std::ops::Sub<Output = T> + PartialOrd>(x: T, y: T) -> T {
    if x < y {
        y - x
    } else {
        x - y
    }
}

/// For a combustion vehicle under Imperial units, the published formula is
/// `day = (d / mpg) * 19.6`, with week and year extrapolated from the
/// unrounded daily rate and each figure rounded on its own.
#[test]
fn acceptance_combustion_formula() {
    let vehicles = load_vehicles();
    let suv = &vehicles["SUV"];

    for (d, mpg) in [(35.0, 23.0), (10.0, 32.0), (3.5, 50.0)] {
        let co2 = compute(d, UnitSystem::Imperial, suv, Some(mpg));
        let day = d / mpg * 19.6;
        assert_eq!(co2.day, round2(day));
        assert_eq!(co2.week, round2(day * 5.0));
        assert_eq!(co2.year, round2(day * 260.0));
    }
}

/// 35 miles in an SUV at its default 23 MPG: 35/23 = 1.5217 gallons,
/// 1.5217 * 19.6 = 29.8261 lbs per day.
#[test]
fn acceptance_suv_scenario() {
    let vehicles = load_vehicles();
    let co2 = compute(35.0, UnitSystem::Imperial, &vehicles["SUV"], None);
    assert_eq!(co2.day, 29.83);
    assert_eq!(co2.week, 149.13);
    assert_eq!(co2.year, 7754.78);
}

/// A bus rider carries a fixed share: 22.45/6/15 = 0.24944 lbs per mile.
#[test]
fn acceptance_bus_scenario() {
    let vehicles = load_vehicles();
    let co2 = compute(10.0, UnitSystem::Imperial, &vehicles["Bus"], None);
    assert_eq!(co2.day, 2.49);
}

/// An e-bike at 842 MPGe: 33.7/842 = 0.040024 kWh per mile, 0.036822 lbs per
/// mile at the US average grid intensity.
#[test]
fn acceptance_ebike_scenario() {
    let vehicles = load_vehicles();
    let co2 = compute(10.0, UnitSystem::Imperial, &vehicles["E-bike"], None);
    assert_eq!(co2.day, 0.37);
}

/// Weekly and yearly figures are not multiples of the rounded daily figure.
#[test]
fn rounding_does_not_compound() {
    let vehicles = load_vehicles();
    let co2 = compute(1.0, UnitSystem::Imperial, &vehicles["SUV"], Some(3.0));
    // 1/3 * 19.6 = 6.53333; the week is 32.67, not round(6.53) * 5 = 32.65
    assert_eq!(co2.day, 6.53);
    assert_eq!(co2.week, 32.67);
}

/// `mpg -> L/100km -> mpg` is an identity law.
#[test]
fn efficiency_conversion_identity() {
    for mpg in [8.0, 23.0, 55.5, 150.0] {
        let twice = l_per_100km_to_mpg(mpg_to_l_per_100km(mpg));
        assert!(abs_difference(twice, mpg) < 1e-9);
    }
}

/// Toggling the unit system and back restores a displayed distance to within
/// 2-decimal rounding tolerance.
#[test]
fn unit_toggle_roundtrip() {
    for miles in [1.0, 35.0, 120.75] {
        let displayed_km = round2(miles_to_km(miles));
        let restored = round2(km_to_miles(displayed_km));
        assert!(abs_difference(restored, miles) <= 0.01);
    }
}

#[test]
fn acceptance_derived_metrics() {
    // 2204.62 lbs is exactly one metric ton
    assert_eq!(carbon_credits(2204.62, MassUnit::Lbs), 1.0);
    // one urban tree absorbs 86.17 lbs per year
    assert_eq!(urban_trees(86.17, MassUnit::Lbs), 1.0);
}

#[tokio::test]
async fn clearing_the_store_empties_the_log() -> Result<(), Box<dyn Error>> {
    let mut root = std::env::temp_dir();
    root.push(format!(
        "commutes-it-{}",
        time::OffsetDateTime::now_utc().unix_timestamp_nanos()
    ));
    let client = LocalDisk::new(root);

    let vehicles = load_vehicles();
    let co2 = compute(35.0, UnitSystem::Imperial, &vehicles["SUV"], None);
    let record = CalculationRecord::new(
        time::OffsetDateTime::now_utc(),
        35.0,
        "SUV".to_string(),
        23.0,
        EfficiencyUnit::Mpg,
        co2,
    );
    history::append(&client, record.clone()).await?;
    assert_eq!(history::records(&client).await, vec![record]);

    history::clear(&client).await?;
    assert_eq!(history::records(&client).await, vec![]);
    Ok(())
}

/// A record decodes back to the exact figures that were persisted.
#[test]
fn record_roundtrips_through_json() {
    let co2 = Co2 {
        day: 29.83,
        week: 149.13,
        year: 7754.78,
        unit: MassUnit::Lbs,
    };
    let record = CalculationRecord::new(
        time::macros::datetime!(2024-03-02 09:30:00 UTC),
        35.0,
        "SUV".to_string(),
        23.0,
        EfficiencyUnit::Mpg,
        co2,
    );
    let data = serde_json::to_vec(&record).unwrap();
    let decoded: CalculationRecord = serde_json::from_slice(&data).unwrap();
    assert_eq!(decoded, record);
}
