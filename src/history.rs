use crate::emissions::Co2;
use crate::fs::BlobStorageProvider;
use crate::units::{EfficiencyUnit, MassUnit};

static RECORDS_KEY: &'static str = "history/records.json";

// records written before the unit tags existed can only be Imperial
fn legacy_efficiency_unit() -> EfficiencyUnit {
    EfficiencyUnit::Mpg
}

fn legacy_mass_unit() -> MassUnit {
    MassUnit::Lbs
}

/// One completed calculation, as persisted in the append-only log.
///
/// A record is created exactly once, when a calculation completes, and is
/// immutable thereafter; the only way to destroy it is [`clear`], which
/// erases the whole log.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CalculationRecord {
    /// derived from the creation timestamp (unix milliseconds)
    pub id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: time::OffsetDateTime,
    /// The input distance normalized to miles, regardless of the unit system
    /// active at calculation time, so records stay comparable across later
    /// unit-system toggles.
    pub distance_miles: f64,
    /// the catalog key active at calculation time
    pub vehicle_type: String,
    pub efficiency: f64,
    /// The unit `efficiency` was expressed in at calculation time. The global
    /// preference can change afterwards, so it is recorded per record.
    #[serde(default = "legacy_efficiency_unit")]
    pub efficiency_unit: EfficiencyUnit,
    pub emissions_per_day: f64,
    pub emissions_per_week: f64,
    pub emissions_per_year: f64,
    #[serde(default = "legacy_mass_unit")]
    pub emissions_unit: MassUnit,
}

impl CalculationRecord {
    pub fn new(
        timestamp: time::OffsetDateTime,
        distance_miles: f64,
        vehicle_type: String,
        efficiency: f64,
        efficiency_unit: EfficiencyUnit,
        co2: Co2,
    ) -> Self {
        Self {
            id: (timestamp.unix_timestamp_nanos() / 1_000_000).to_string(),
            timestamp,
            distance_miles,
            vehicle_type,
            efficiency,
            efficiency_unit,
            emissions_per_day: co2.day,
            emissions_per_week: co2.week,
            emissions_per_year: co2.year,
            emissions_unit: co2.unit,
        }
    }
}

/// Returns all stored calculation records in insertion order.
///
/// An absent or undecodable log is logged and treated as empty; this function
/// never fails the caller.
pub async fn records(client: &dyn BlobStorageProvider) -> Vec<CalculationRecord> {
    let data = match client.maybe_get(RECORDS_KEY).await {
        Ok(Some(data)) => data,
        Ok(None) => return vec![],
        Err(e) => {
            log::warn!("{RECORDS_KEY} could not be read ({e}); treating the log as empty");
            return vec![];
        }
    };
    match serde_json::from_slice(&data) {
        Ok(records) => records,
        Err(e) => {
            log::warn!("{RECORDS_KEY} could not be decoded ({e}); treating the log as empty");
            vec![]
        }
    }
}

/// Appends `record` to the log: reads the existing list, pushes, writes the
/// whole list back.
pub async fn append(
    client: &dyn BlobStorageProvider,
    record: CalculationRecord,
) -> Result<(), std::io::Error> {
    let mut all = records(client).await;
    all.push(record);
    let data = serde_json::to_vec(&all).map_err(std::io::Error::other)?;
    client.put(RECORDS_KEY, data).await
}

/// Erases the whole log in one operation. Irreversible; callers must have
/// gotten explicit confirmation first.
pub async fn clear(client: &dyn BlobStorageProvider) -> Result<(), std::io::Error> {
    client.delete(RECORDS_KEY).await
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fs::LocalDisk;
    use crate::units::UnitSystem;
    use time::macros::datetime;

    fn scratch(name: &str) -> LocalDisk {
        let mut root = std::env::temp_dir();
        root.push(format!(
            "commutes-history-{name}-{}",
            time::OffsetDateTime::now_utc().unix_timestamp_nanos()
        ));
        LocalDisk::new(root)
    }

    fn record(distance_miles: f64) -> CalculationRecord {
        CalculationRecord::new(
            datetime!(2024-03-02 09:30:00 UTC),
            distance_miles,
            "SUV".to_string(),
            23.0,
            EfficiencyUnit::Mpg,
            Co2 {
                day: 29.83,
                week: 149.13,
                year: 7754.78,
                unit: UnitSystem::Imperial.mass_unit(),
            },
        )
    }

    #[test]
    fn id_derives_from_the_timestamp() {
        assert_eq!(record(35.0).id, "1709371800000");
    }

    #[tokio::test]
    async fn append_preserves_insertion_order() -> Result<(), std::io::Error> {
        let disk = scratch("append");

        append(&disk, record(35.0)).await?;
        append(&disk, record(12.0)).await?;

        let all = records(&disk).await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].distance_miles, 35.0);
        assert_eq!(all[1].distance_miles, 12.0);
        Ok(())
    }

    #[tokio::test]
    async fn clear_then_list_is_empty() -> Result<(), std::io::Error> {
        let disk = scratch("clear");

        append(&disk, record(35.0)).await?;
        clear(&disk).await?;
        assert_eq!(records(&disk).await, vec![]);
        Ok(())
    }

    #[tokio::test]
    async fn undecodable_log_is_treated_as_empty() -> Result<(), std::io::Error> {
        let disk = scratch("corrupt");

        disk.put(RECORDS_KEY, b"not json".to_vec()).await?;
        assert_eq!(records(&disk).await, vec![]);
        Ok(())
    }

    #[test]
    fn records_without_unit_tags_decode_with_legacy_units() {
        let legacy = r#"{
            "id": "1709371800000",
            "timestamp": "2024-03-02T09:30:00Z",
            "distance_miles": 35.0,
            "vehicle_type": "SUV",
            "efficiency": 23.0,
            "emissions_per_day": 29.83,
            "emissions_per_week": 149.13,
            "emissions_per_year": 7754.78
        }"#;
        let record: CalculationRecord = serde_json::from_str(legacy).unwrap();
        assert_eq!(record.efficiency_unit, EfficiencyUnit::Mpg);
        assert_eq!(record.emissions_unit, MassUnit::Lbs);
    }
}
