use log::info;
use reqwest::{Method, StatusCode};

use crate::api::{self, SystemState, ZoneAdd, ZoneDelete, ZoneOrder};
use crate::client::SprinklerClient;
use crate::error::{Error, Result};
use crate::zone::{Zone, ZoneRecord};

/// Every zone of one controller plus its schedule switch.
///
/// The zones are a snapshot. Mutations made through a `System` re-fetch the
/// list afterwards; mutations made through a cloned-out [`Zone`] do not, so
/// call [`System::get_zones`] after those.
#[derive(Debug, Clone)]
pub struct System {
    client: SprinklerClient,
    zones: Vec<Zone>,
    system_state: bool,
}

impl System {
    /// Connects to the controller and loads its zones and system state.
    pub async fn new(client: SprinklerClient) -> Result<System> {
        let mut system = System {
            client,
            zones: Vec::new(),
            system_state: false,
        };
        system.refresh_zones().await?;
        system.refresh_system_state().await?;
        Ok(system)
    }

    pub fn client(&self) -> &SprinklerClient {
        &self.client
    }

    /// The zones as of the last fetch.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// The system state as of the last fetch.
    pub fn system_state(&self) -> bool {
        self.system_state
    }

    /// Gets a list of all the zones on the controller
    /// # Returns
    /// The zones in the order the controller lists them.
    pub async fn get_zones(&mut self) -> Result<&[Zone]> {
        self.refresh_zones().await?;
        Ok(&self.zones)
    }

    async fn refresh_zones(&mut self) -> Result<()> {
        let records: Vec<ZoneRecord> = self.client.get(api::ZONE_INFO_URL).await?;
        let client = &self.client;
        self.zones = records
            .into_iter()
            .map(|record| Zone::from_record(client.clone(), record))
            .collect();
        Ok(())
    }

    /// Gets whether the system schedule is enabled or disabled
    pub async fn get_system_state(&mut self) -> Result<bool> {
        self.refresh_system_state().await?;
        Ok(self.system_state)
    }

    async fn refresh_system_state(&mut self) -> Result<()> {
        let state: SystemState = self.client.get(api::SYSTEM_STATE_URL).await?;
        self.system_state = state.system_state;
        Ok(())
    }

    /// Enables or disables the system schedule. The new state is read back
    /// from the controller rather than assumed.
    pub async fn set_system_state(&mut self, state: bool) -> Result<()> {
        let body = SystemState {
            system_state: state,
        };
        let status = self
            .client
            .send(Method::PUT, api::SYSTEM_STATE_URL, &body)
            .await?;
        if status != StatusCode::OK {
            return Err(Error::operation(
                format!("set system state {}", state),
                status,
            ));
        }
        info!("System status set to {}", state);
        self.refresh_system_state().await
    }

    /// Turns zone `zone_id` on or off, then re-fetches the zones.
    pub async fn update_zone_state(&mut self, zone_id: i64, state: bool) -> Result<()> {
        let zone = self
            .zones
            .iter_mut()
            .find(|zone| zone.id() == zone_id)
            .ok_or(Error::NotFound(zone_id))?;
        if state {
            zone.turn_on().await?;
        } else {
            zone.turn_off().await?;
        }
        self.refresh_zones().await
    }

    pub fn get_zone_by_id(&self, zone_id: i64) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.id() == zone_id)
    }

    /// Adds a new zone. The controller assigns its id.
    pub async fn add_zone(&mut self, zone: &ZoneAdd) -> Result<()> {
        let status = self.client.send(Method::POST, api::ZONE_URL, zone).await?;
        if status != StatusCode::OK {
            return Err(Error::operation(format!("add zone {}", zone.name), status));
        }
        info!("Added zone {}", zone.name);
        self.refresh_zones().await
    }

    /// Deletes zone `zone_id`, then re-fetches the zones.
    pub async fn delete_zone(&mut self, zone_id: i64) -> Result<()> {
        let body = ZoneDelete { id: zone_id };
        let status = self
            .client
            .send(Method::DELETE, api::ZONE_URL, &body)
            .await?;
        if status != StatusCode::OK {
            return Err(Error::operation(
                format!("delete zone {}", zone_id),
                status,
            ));
        }
        info!("Deleted zone {}", zone_id);
        self.refresh_zones().await
    }

    /// Pushes the configuration of `zone` to the zone with the same id.
    pub async fn update_zone(&mut self, zone: &ZoneRecord) -> Result<()> {
        let existing = self
            .zones
            .iter_mut()
            .find(|known| known.id() == zone.id)
            .ok_or(Error::NotFound(zone.id))?;
        existing.update_other(&zone.settings()).await?;
        self.refresh_zones().await
    }

    /// Updates the order of all zones in the system
    /// # Params
    /// * `order` Zone ids in their new order
    pub async fn update_zone_order(&mut self, order: &[i64]) -> Result<()> {
        let body = ZoneOrder {
            order: order.to_vec(),
        };
        let status = self
            .client
            .send(Method::PUT, api::ZONE_ORDER_URL, &body)
            .await?;
        if status != StatusCode::OK {
            return Err(Error::operation(
                format!("update zone order {:?}", order),
                status,
            ));
        }
        info!("Zone order set to {:?}", order);
        self.refresh_zones().await
    }

    /// Turns off all the zones in the system
    pub async fn turn_off_all_zones(&mut self) -> Result<()> {
        info!("Turning off all zones");
        for zone in self.zones.iter_mut() {
            zone.turn_off().await?;
        }
        self.refresh_zones().await
    }
}
