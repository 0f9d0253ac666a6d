use log::{info, warn};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::api::{self, ZoneAdd, ZoneToggle, ZoneUpdate};
use crate::client::SprinklerClient;
use crate::error::{Error, Result};

/// A zone as the controller reports it.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub id: i64,
    pub name: String,
    pub gpio: i64,
    pub time: i64,
    pub enabled: bool,
    pub auto_off: bool,
    pub system_order: i64,
    pub state: bool,
}

/// The part of a zone that can be configured.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSettings {
    pub name: String,
    pub gpio: i64,
    pub time: i64,
    pub enabled: bool,
    pub auto_off: bool,
    pub system_order: i64,
}

/// Body of `zone/info/{id}`, which leaves out the id.
#[derive(Deserialize)]
struct ZoneInfo {
    #[serde(flatten)]
    settings: ZoneSettings,
    state: bool,
}

impl ZoneRecord {
    pub fn settings(&self) -> ZoneSettings {
        ZoneSettings {
            name: self.name.clone(),
            gpio: self.gpio,
            time: self.time,
            enabled: self.enabled,
            auto_off: self.auto_off,
            system_order: self.system_order,
        }
    }

    /// A copy of this record with its configuration replaced by `settings`.
    /// `id` and `state` are kept.
    pub fn merge(&self, settings: &ZoneSettings) -> ZoneRecord {
        ZoneRecord {
            id: self.id,
            name: settings.name.clone(),
            gpio: settings.gpio,
            time: settings.time,
            enabled: settings.enabled,
            auto_off: settings.auto_off,
            system_order: settings.system_order,
            state: self.state,
        }
    }

    fn to_update(&self) -> ZoneUpdate {
        ZoneUpdate {
            id: self.id,
            name: self.name.clone(),
            gpio: self.gpio,
            time: self.time,
            enabled: self.enabled,
            auto_off: self.auto_off,
            system_order: self.system_order,
        }
    }
}

impl fmt::Display for ZoneRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {} | {} | {} | {}",
            self.name,
            self.gpio,
            self.time,
            self.enabled,
            self.auto_off,
            self.system_order,
            self.state,
            self.id
        )
    }
}

impl From<&ZoneSettings> for ZoneAdd {
    fn from(settings: &ZoneSettings) -> Self {
        ZoneAdd {
            name: settings.name.clone(),
            gpio: settings.gpio,
            time: settings.time,
            enabled: settings.enabled,
            auto_off: settings.auto_off,
        }
    }
}

impl From<&ZoneRecord> for ZoneAdd {
    fn from(record: &ZoneRecord) -> Self {
        ZoneAdd::from(&record.settings())
    }
}

impl From<&Zone> for ZoneAdd {
    fn from(zone: &Zone) -> Self {
        ZoneAdd::from(&zone.record)
    }
}

/// Represents a SQLSprinkler zone on a remote controller.
///
/// Setters push the whole zone configuration to the controller straight away.
/// Reads never touch the network; call [`Zone::update`] to re-sync.
#[derive(Debug, Clone)]
pub struct Zone {
    client: SprinklerClient,
    record: ZoneRecord,
}

impl Zone {
    pub fn from_record(client: SprinklerClient, record: ZoneRecord) -> Zone {
        Zone { client, record }
    }

    /// Reads zone `id` from the controller.
    pub async fn fetch(client: SprinklerClient, id: i64) -> Result<Zone> {
        let mut zone = Zone::from_record(
            client,
            ZoneRecord {
                id,
                ..ZoneRecord::default()
            },
        );
        zone.update().await?;
        Ok(zone)
    }

    pub fn id(&self) -> i64 {
        self.record.id
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn gpio(&self) -> i64 {
        self.record.gpio
    }

    pub fn time(&self) -> i64 {
        self.record.time
    }

    pub fn is_enabled(&self) -> bool {
        self.record.enabled
    }

    pub fn auto_off(&self) -> bool {
        self.record.auto_off
    }

    pub fn system_order(&self) -> i64 {
        self.record.system_order
    }

    /// Whether this zone was on when last seen.
    pub fn is_on(&self) -> bool {
        self.record.state
    }

    pub fn settings(&self) -> ZoneSettings {
        self.record.settings()
    }

    pub fn record(&self) -> &ZoneRecord {
        &self.record
    }

    pub fn into_record(self) -> ZoneRecord {
        self.record
    }

    /// Turns on this zone.
    pub async fn turn_on(&mut self) -> Result<()> {
        self.toggle(true).await
    }

    /// Turns off this zone.
    pub async fn turn_off(&mut self) -> Result<()> {
        self.toggle(false).await
    }

    // The local state flips before the request goes out and stays flipped
    // whatever the controller answers.
    async fn toggle(&mut self, state: bool) -> Result<()> {
        self.record.state = state;
        let body = ZoneToggle { id: self.record.id, state };
        let status = self.client.send(Method::PUT, api::ZONE_URL, &body).await?;
        let action = if state { "on" } else { "off" };
        if status != StatusCode::OK {
            if self.client.checks_toggle_status() {
                return Err(Error::operation(
                    format!("turn {} zone {}", action, self.record.id),
                    status,
                ));
            }
            warn!(
                "Controller answered {} when turning {} zone {}",
                status, action, self.record.id
            );
            return Ok(());
        }
        info!("Turned {} {}", action, self.record);
        Ok(())
    }

    /// Refreshes every field of this zone from the controller.
    pub async fn update(&mut self) -> Result<()> {
        let path = format!("{}/{}", api::ZONE_INFO_URL, self.record.id);
        let info: ZoneInfo = self.client.get(&path).await?;
        self.record = ZoneRecord {
            id: self.record.id,
            name: info.settings.name,
            gpio: info.settings.gpio,
            time: info.settings.time,
            enabled: info.settings.enabled,
            auto_off: info.settings.auto_off,
            system_order: info.settings.system_order,
            state: info.state,
        };
        Ok(())
    }

    pub async fn enable(&mut self) -> Result<()> {
        let settings = ZoneSettings {
            enabled: true,
            ..self.settings()
        };
        self.update_other(&settings).await
    }

    pub async fn disable(&mut self) -> Result<()> {
        let settings = ZoneSettings {
            enabled: false,
            ..self.settings()
        };
        self.update_other(&settings).await
    }

    pub async fn set_time(&mut self, time: i64) -> Result<()> {
        let settings = ZoneSettings {
            time,
            ..self.settings()
        };
        self.update_other(&settings).await
    }

    pub async fn set_gpio(&mut self, gpio: i64) -> Result<()> {
        let settings = ZoneSettings {
            gpio,
            ..self.settings()
        };
        self.update_other(&settings).await
    }

    pub async fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let settings = ZoneSettings {
            name: name.into(),
            ..self.settings()
        };
        self.update_other(&settings).await
    }

    pub async fn set_auto_off(&mut self, auto_off: bool) -> Result<()> {
        let settings = ZoneSettings {
            auto_off,
            ..self.settings()
        };
        self.update_other(&settings).await
    }

    pub async fn set_system_order(&mut self, system_order: i64) -> Result<()> {
        let settings = ZoneSettings {
            system_order,
            ..self.settings()
        };
        self.update_other(&settings).await
    }

    /// Updates this zone to the given `settings` on the controller.
    ///
    /// Local fields only change once the controller has accepted the update.
    pub async fn update_other(&mut self, settings: &ZoneSettings) -> Result<()> {
        let merged = self.record.merge(settings);
        let body = merged.to_update();
        let status = self
            .client
            .send(Method::PUT, api::ZONE_UPDATE_URL, &body)
            .await?;
        if status != StatusCode::OK {
            return Err(Error::Operation {
                operation: format!("update zone {}", merged.id),
                status,
                payload: serde_json::to_string(&body).ok(),
            });
        }
        info!("Updated zone {}", merged);
        self.record = merged;
        Ok(())
    }
}
