use std::error::Error;

use clap::Parser;
use num_format::{Locale, ToFormattedString};
use simple_logger::SimpleLogger;

use commutes::history::{self, CalculationRecord};
use commutes::{
    carbon_credits, compute, impact_level, km_to_miles, load_vehicles, urban_trees, validate,
    vs_us_average, Advisory, EfficiencyUnit, LocalDisk, Settings, UnitSystem, VehicleCategory,
};

static TEMPLATE_NAME: &'static str = "t";
static TEMPLATE: &'static str = include_str!("./template.md");

// the result is held back this long before it is shown
static PACING: std::time::Duration = std::time::Duration::from_millis(800);

const ABOUT: &'static str = r#"Estimates the CO2 emissions of a daily commute and appends the result to the local history.
Distances are miles under Imperial units and km under Metric. The unit system is a preference
persisted across runs; pass --units to change it.
"#;

#[derive(Parser, Debug)]
#[command(author, version, about = ABOUT)]
struct Cli {
    /// Distance travelled each commuting day, in miles or km per the active unit system
    #[arg(long)]
    distance: f64,

    /// Vehicle type from the catalog (e.g. SUV, Sedan, Bus, E-bike)
    #[arg(long)]
    vehicle: String,

    /// Fuel-efficiency override for combustion vehicles, in MPG or L/100km
    /// per the active unit system. Ignored for electric and transit vehicles.
    #[arg(long)]
    efficiency: Option<f64>,

    /// Changes the persisted unit-system preference before calculating
    #[arg(long, value_enum)]
    units: Option<Units>,

    /// Proceed even when the efficiency claim is flagged as suspicious
    #[arg(long)]
    allow_suspicious: bool,

    /// Directory of the local store
    #[arg(long, default_value = "database")]
    database: String,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
enum Units {
    Imperial,
    Metric,
}

impl From<Units> for UnitSystem {
    fn from(units: Units) -> Self {
        match units {
            Units::Imperial => UnitSystem::Imperial,
            Units::Metric => UnitSystem::Metric,
        }
    }
}

#[derive(serde::Serialize)]
struct Context {
    distance: String,
    distance_unit: String,
    vehicle: String,
    day: String,
    week: String,
    year: String,
    mass_unit: String,
    impact: String,
    credits: String,
    trees: String,
    ratio: String,
}

/// Formats a pre-rounded figure with thousands separators ("7,754.78").
fn thousands(x: f64) -> String {
    let whole = (x.trunc() as i64).to_formatted_string(&Locale::en);
    format!("{whole}.{:02}", (x.fract() * 100.0).round() as i64)
}

fn render(context: &Context) -> Result<String, Box<dyn Error>> {
    let mut tt = tinytemplate::TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template(TEMPLATE_NAME, TEMPLATE)?;
    Ok(tt.render(TEMPLATE_NAME, context)?)
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    let cli = Cli::parse();
    let client = LocalDisk::new(&cli.database);

    let vehicles = load_vehicles();
    let profile = vehicles.get(&cli.vehicle).ok_or_else(|| {
        let mut known = vehicles.keys().map(String::as_str).collect::<Vec<_>>();
        known.sort_unstable();
        Into::<Box<dyn Error>>::into(format!(
            "unknown vehicle type \"{}\" (known: {})",
            cli.vehicle,
            known.join(", ")
        ))
    })?;

    let mut settings = Settings::load(&client).await;
    if let Some(units) = cli.units {
        settings.set_units(units.into());
        if let Err(e) = settings.save(&client).await {
            log::warn!("could not persist the unit preference ({e})");
        }
    }
    let units = settings.units();

    if let Some(Advisory::SuspiciousEfficiency) =
        validate(units, profile, cli.distance, cli.efficiency)?
    {
        if !cli.allow_suspicious {
            return Err("an efficiency above 150 MPG looks like a typo; \
                        pass --allow-suspicious to use it anyway"
                .into());
        }
        log::warn!("proceeding with a suspicious efficiency claim");
    }

    let co2 = compute(cli.distance, units, profile, cli.efficiency);

    // the record stores the distance normalized to miles and the efficiency
    // tagged with the unit it was expressed in
    let distance_miles = match units {
        UnitSystem::Imperial => cli.distance,
        UnitSystem::Metric => km_to_miles(cli.distance),
    };
    let (efficiency, efficiency_unit) = match profile.category {
        VehicleCategory::Combustion => match cli.efficiency {
            Some(value) => (value, units.efficiency_unit()),
            None => (profile.efficiency, EfficiencyUnit::Mpg),
        },
        VehicleCategory::ElectricEquivalent => (profile.efficiency, EfficiencyUnit::Mpge),
        VehicleCategory::SharedTransit => (profile.efficiency, EfficiencyUnit::Mpg),
    };
    let record = CalculationRecord::new(
        time::OffsetDateTime::now_utc(),
        distance_miles,
        profile.type_id.clone(),
        efficiency,
        efficiency_unit,
        co2,
    );

    // the append runs under the pacing window
    let (_, appended) = futures::join!(
        tokio::time::sleep(PACING),
        history::append(&client, record)
    );
    if let Err(e) = appended {
        log::warn!("the calculation could not be appended to the history ({e})");
    }

    let context = Context {
        distance: format!("{}", cli.distance),
        distance_unit: units.distance_unit().to_string(),
        vehicle: profile.description.clone(),
        day: thousands(co2.day),
        week: thousands(co2.week),
        year: thousands(co2.year),
        mass_unit: co2.unit.to_string(),
        impact: impact_level(co2.day).to_string(),
        credits: format!("{:.2}", carbon_credits(co2.year, co2.unit)),
        trees: format!("{:.2}", urban_trees(co2.year, co2.unit)),
        ratio: format!("{:.2}", vs_us_average(co2.year, co2.unit)),
    };
    println!("{}", render(&context)?);

    Ok(())
}
