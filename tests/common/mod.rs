//! In-process stand-in for the controller daemon.

#![allow(dead_code)]

use parking_lot::Mutex;
use serde_json::json;
use sqlsprinkler::api::{SystemState, ZoneAdd, ZoneDelete, ZoneOrder, ZoneToggle, ZoneUpdate};
use sqlsprinkler::{ClientConfig, SprinklerClient, ZoneRecord};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Reply};

#[derive(Debug, Default)]
pub struct FakeController {
    pub zones: Vec<ZoneRecord>,
    pub system_state: bool,
    pub next_id: i64,
    /// Every request seen, as `METHOD /path`.
    pub requests: Vec<String>,
    /// When set, every mutating endpoint answers with this status and changes nothing.
    pub fail_with: Option<StatusCode>,
    /// When set, `zone/info/{id}` leaves out the `gpio` field.
    pub corrupt_zone_info: bool,
    /// When set, `zone/info` lists zones with `time` as a string.
    pub corrupt_zone_listing: bool,
    /// When set, `system/state` answers with the wrong key.
    pub corrupt_system_state: bool,
}

pub type Shared = Arc<Mutex<FakeController>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn record(id: i64, name: &str, gpio: i64, system_order: i64) -> ZoneRecord {
    ZoneRecord {
        id,
        name: name.to_string(),
        gpio,
        time: 300,
        enabled: true,
        auto_off: false,
        system_order,
        state: false,
    }
}

/// Two zones, schedule off.
pub fn two_zones() -> FakeController {
    FakeController {
        zones: vec![record(1, "Front", 4, 0), record(2, "Back", 17, 1)],
        system_state: false,
        next_id: 3,
        ..FakeController::default()
    }
}

pub struct Harness {
    pub addr: SocketAddr,
    pub state: Shared,
}

impl Harness {
    pub fn host(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> SprinklerClient {
        SprinklerClient::new(self.host()).unwrap()
    }

    pub fn strict_client(&self) -> SprinklerClient {
        let config = ClientConfig {
            host: self.host(),
            check_toggle_status: true,
            timeout_secs: Some(5),
        };
        SprinklerClient::from_config(&config).unwrap()
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.lock().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.state.lock().requests.clear();
    }

    pub fn fail_with(&self, status: Option<StatusCode>) {
        self.state.lock().fail_with = status;
    }
}

/// Serves `controller` on an ephemeral localhost port.
pub fn start(controller: FakeController) -> Harness {
    init_logger();
    let state: Shared = Arc::new(Mutex::new(controller));

    let log_state = state.clone();
    let log_requests = warp::method()
        .and(warp::path::full())
        .map(move |method: warp::http::Method, path: warp::path::FullPath| {
            log_state
                .lock()
                .requests
                .push(format!("{} {}", method, path.as_str()));
        })
        .untuple_one();

    let get_sys_status = warp::get()
        .and(warp::path!("system" / "state"))
        .and(with_state(state.clone()))
        .and_then(get_sys_status);

    let set_sys_status = warp::put()
        .and(warp::path!("system" / "state"))
        .and(with_state(state.clone()))
        .and(warp::body::json())
        .and_then(set_sys_status);

    let get_zone_status = warp::get()
        .and(warp::path!("zone" / "info"))
        .and(with_state(state.clone()))
        .and_then(get_zone_status);

    let check_zone_state = warp::get()
        .and(warp::path!("zone" / "info" / i64))
        .and(with_state(state.clone()))
        .and_then(check_zone_state);

    let set_zone_status = warp::put()
        .and(warp::path!("zone"))
        .and(with_state(state.clone()))
        .and(warp::body::json())
        .and_then(set_zone_status);

    let add_zone = warp::post()
        .and(warp::path!("zone"))
        .and(with_state(state.clone()))
        .and(warp::body::json())
        .and_then(add_zone);

    let delete_zone = warp::delete()
        .and(warp::path!("zone"))
        .and(with_state(state.clone()))
        .and(warp::body::json())
        .and_then(delete_zone);

    let update_zone = warp::put()
        .and(warp::path!("zone" / "update"))
        .and(with_state(state.clone()))
        .and(warp::body::json())
        .and_then(update_zone);

    let update_order = warp::put()
        .and(warp::path!("zone" / "order"))
        .and(with_state(state.clone()))
        .and(warp::body::json())
        .and_then(update_order);

    let routes = log_requests.and(
        get_sys_status
            .or(set_sys_status)
            .or(get_zone_status)
            .or(check_zone_state)
            .or(set_zone_status)
            .or(add_zone)
            .or(delete_zone)
            .or(update_zone)
            .or(update_order),
    );

    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    Harness { addr, state }
}

fn with_state(state: Shared) -> impl Filter<Extract = (Shared,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn status(code: StatusCode) -> Response {
    warp::reply::with_status("", code).into_response()
}

fn ok() -> Response {
    warp::reply::with_status("ok", StatusCode::OK).into_response()
}

async fn get_sys_status(state: Shared) -> Result<Response, Infallible> {
    let state = state.lock();
    if state.corrupt_system_state {
        return Ok(warp::reply::json(&json!({ "system_enabled": state.system_state })).into_response());
    }
    Ok(warp::reply::json(&SystemState {
        system_state: state.system_state,
    })
    .into_response())
}

async fn set_sys_status(state: Shared, body: SystemState) -> Result<Response, Infallible> {
    let mut state = state.lock();
    if let Some(code) = state.fail_with {
        return Ok(status(code));
    }
    state.system_state = body.system_state;
    Ok(ok())
}

async fn get_zone_status(state: Shared) -> Result<Response, Infallible> {
    let state = state.lock();
    let mut zones = state.zones.clone();
    zones.sort_by_key(|zone| zone.system_order);
    if state.corrupt_zone_listing {
        let mut body = serde_json::to_value(&zones).unwrap();
        for zone in body.as_array_mut().unwrap() {
            let time = zone["time"].to_string();
            zone["time"] = json!(time);
        }
        return Ok(warp::reply::json(&body).into_response());
    }
    Ok(warp::reply::json(&zones).into_response())
}

async fn check_zone_state(id: i64, state: Shared) -> Result<Response, Infallible> {
    let state = state.lock();
    let zone = match state.zones.iter().find(|zone| zone.id == id) {
        Some(zone) => zone,
        None => return Ok(status(StatusCode::NOT_FOUND)),
    };
    let mut body = json!({
        "name": zone.name,
        "gpio": zone.gpio,
        "time": zone.time,
        "enabled": zone.enabled,
        "auto_off": zone.auto_off,
        "system_order": zone.system_order,
        "state": zone.state,
    });
    if state.corrupt_zone_info {
        body.as_object_mut().unwrap().remove("gpio");
    }
    Ok(warp::reply::json(&body).into_response())
}

async fn set_zone_status(state: Shared, body: ZoneToggle) -> Result<Response, Infallible> {
    let mut state = state.lock();
    if let Some(code) = state.fail_with {
        return Ok(status(code));
    }
    match state.zones.iter_mut().find(|zone| zone.id == body.id) {
        Some(zone) => {
            zone.state = body.state;
            Ok(ok())
        }
        None => Ok(status(StatusCode::NOT_FOUND)),
    }
}

async fn add_zone(state: Shared, body: ZoneAdd) -> Result<Response, Infallible> {
    let mut state = state.lock();
    if let Some(code) = state.fail_with {
        return Ok(status(code));
    }
    let id = state.next_id;
    state.next_id += 1;
    let system_order = state.zones.len() as i64;
    state.zones.push(ZoneRecord {
        id,
        name: body.name,
        gpio: body.gpio,
        time: body.time,
        enabled: body.enabled,
        auto_off: body.auto_off,
        system_order,
        state: false,
    });
    Ok(ok())
}

async fn delete_zone(state: Shared, body: ZoneDelete) -> Result<Response, Infallible> {
    let mut state = state.lock();
    if let Some(code) = state.fail_with {
        return Ok(status(code));
    }
    let before = state.zones.len();
    state.zones.retain(|zone| zone.id != body.id);
    if state.zones.len() == before {
        return Ok(status(StatusCode::NOT_FOUND));
    }
    Ok(ok())
}

async fn update_zone(state: Shared, body: ZoneUpdate) -> Result<Response, Infallible> {
    let mut state = state.lock();
    if let Some(code) = state.fail_with {
        return Ok(status(code));
    }
    match state.zones.iter_mut().find(|zone| zone.id == body.id) {
        Some(zone) => {
            zone.name = body.name;
            zone.gpio = body.gpio;
            zone.time = body.time;
            zone.enabled = body.enabled;
            zone.auto_off = body.auto_off;
            zone.system_order = body.system_order;
            Ok(ok())
        }
        None => Ok(status(StatusCode::NOT_FOUND)),
    }
}

async fn update_order(state: Shared, body: ZoneOrder) -> Result<Response, Infallible> {
    let mut state = state.lock();
    if let Some(code) = state.fail_with {
        return Ok(status(code));
    }
    let known = |id: &i64| state.zones.iter().any(|zone| zone.id == *id);
    if body.order.len() != state.zones.len() || !body.order.iter().all(known) {
        return Ok(status(StatusCode::BAD_REQUEST));
    }
    for zone in state.zones.iter_mut() {
        if let Some(position) = body.order.iter().position(|id| *id == zone.id) {
            zone.system_order = position as i64;
        }
    }
    Ok(ok())
}
