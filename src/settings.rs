use crate::fs::BlobStorageProvider;
use crate::units::UnitSystem;

static SETTINGS_KEY: &'static str = "preferences/settings.json";

/// User preferences persisted across sessions.
///
/// The stored layout is the boolean metric flag; the API speaks
/// [`UnitSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    metric: bool,
}

impl Settings {
    pub fn units(&self) -> UnitSystem {
        if self.metric {
            UnitSystem::Metric
        } else {
            UnitSystem::Imperial
        }
    }

    pub fn set_units(&mut self, units: UnitSystem) {
        self.metric = units == UnitSystem::Metric;
    }

    /// Loads the stored preferences. Absent or undecodable preferences are
    /// logged and fall back to the defaults (Imperial units); this function
    /// never fails the caller.
    pub async fn load(client: &dyn BlobStorageProvider) -> Self {
        let data = match client.maybe_get(SETTINGS_KEY).await {
            Ok(Some(data)) => data,
            Ok(None) => return Self::default(),
            Err(e) => {
                log::warn!("{SETTINGS_KEY} could not be read ({e}); using defaults");
                return Self::default();
            }
        };
        serde_json::from_slice(&data).unwrap_or_else(|e| {
            log::warn!("{SETTINGS_KEY} could not be decoded ({e}); using defaults");
            Self::default()
        })
    }

    pub async fn save(&self, client: &dyn BlobStorageProvider) -> Result<(), std::io::Error> {
        let data = serde_json::to_vec(self).map_err(std::io::Error::other)?;
        client.put(SETTINGS_KEY, data).await
    }
}
