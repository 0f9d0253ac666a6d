//! Endpoint paths and request bodies of the controller API.

use serde::{Deserialize, Serialize};

/// Zone listing; `zone/info/{id}` reads a single zone.
pub const ZONE_INFO_URL: &str = "zone/info";

/// Toggling (PUT), creating (POST) and deleting (DELETE) zones.
pub const ZONE_URL: &str = "zone";

/// Replacing a zone's configuration.
pub const ZONE_UPDATE_URL: &str = "zone/update";

/// Reordering the zones of the system.
pub const ZONE_ORDER_URL: &str = "zone/order";

/// Reading and setting the system schedule switch.
pub const SYSTEM_STATE_URL: &str = "system/state";

/// Object representing whether the system schedule is enabled.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct SystemState {
    pub system_state: bool,
}

/// Object representing toggling the zone.
/// # Params
/// * `id` The ID of the zone on the controller
/// * `state` The state to put the zone in (true for on, false for off)
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct ZoneToggle {
    pub id: i64,
    pub state: bool,
}

/// Object representing the ordering of the zones.
/// # Params
/// * `order` A JSON list of zone ids in their new order.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct ZoneOrder {
    pub order: Vec<i64>,
}

/// Used when we are deleting a zone via the api
/// # Params
/// * `id` The ID of the zone that we are going to delete
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct ZoneDelete {
    pub id: i64,
}

/// Used when we are creating a new zone. The controller assigns the id, the
/// ordering and the state itself.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct ZoneAdd {
    pub name: String,
    pub gpio: i64,
    pub time: i64,
    pub enabled: bool,
    pub auto_off: bool,
}

/// Full configuration of a zone as the update endpoint expects it. The key
/// names differ from the ones the info endpoints return.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct ZoneUpdate {
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "GPIO")]
    pub gpio: i64,
    #[serde(rename = "Time")]
    pub time: i64,
    #[serde(rename = "Enabled")]
    pub enabled: bool,
    #[serde(rename = "Autooff")]
    pub auto_off: bool,
    #[serde(rename = "SystemOrder")]
    pub system_order: i64,
}
