use std::error::Error;

use clap::Parser;
use itertools::Itertools;
use simple_logger::SimpleLogger;

use commutes::{display_name, history, load_vehicles, LocalDisk};

const ABOUT: &'static str = r#"Lists the stored commute calculations, most recent first.
Can also export the whole log as CSV, or erase it entirely.
"#;

#[derive(Parser, Debug)]
#[command(author, version, about = ABOUT)]
struct Cli {
    /// Directory of the local store
    #[arg(long, default_value = "database")]
    database: String,

    /// Writes the whole log as CSV to this path instead of listing it
    #[arg(long)]
    export: Option<String>,

    /// Erases the whole log. Irreversible; requires --yes.
    #[arg(long)]
    clear: bool,

    /// Confirms --clear
    #[arg(long)]
    yes: bool,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    let cli = Cli::parse();
    let client = LocalDisk::new(&cli.database);

    if cli.clear {
        if !cli.yes {
            return Err(
                "--clear erases the whole history and cannot be undone; pass --yes to confirm"
                    .into(),
            );
        }
        history::clear(&client).await?;
        println!("History cleared.");
        return Ok(());
    }

    let records = history::records(&client).await;
    if records.is_empty() {
        println!("No calculations stored.");
        return Ok(());
    }

    if let Some(path) = cli.export {
        let mut wtr = csv::Writer::from_writer(std::fs::File::create(&path)?);
        for record in &records {
            wtr.serialize(record)?;
        }
        wtr.flush()?;
        println!("{} records written to {path}", records.len());
        return Ok(());
    }

    let vehicles = load_vehicles();
    for record in records.iter().rev() {
        println!(
            "{}  {:<32}  {:>8.2} mi  {:>10.2} {} CO2/yr",
            record.timestamp.date(),
            display_name(&vehicles, &record.vehicle_type),
            record.distance_miles,
            record.emissions_per_year,
            record.emissions_unit,
        );
    }

    // yearly totals per vehicle type, in the unit each record was stored in
    println!();
    for ((vehicle_type, unit), years) in records
        .iter()
        .map(|r| ((r.vehicle_type.as_str(), r.emissions_unit), r.emissions_per_year))
        .into_group_map()
        .into_iter()
        .sorted_by(|(a, _), (b, _)| a.0.cmp(b.0))
    {
        let total: f64 = years.iter().sum();
        println!(
            "{vehicle_type}: {} calculations, {total:.2} {unit} CO2/yr combined",
            years.len()
        );
    }

    Ok(())
}
