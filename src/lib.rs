// Copyright 2021 Gavin Pease

//! Client for the SQLSprinkler controller API.
//!
//! A [`System`] mirrors every zone of one controller plus the global schedule
//! switch. [`Zone`]s push each configuration change to the controller as soon
//! as it is made. Both are built from a [`SprinklerClient`], which carries the
//! host and the HTTP transport.
//!
//! ```no_run
//! use sqlsprinkler::{SprinklerClient, System};
//!
//! # async fn example() -> sqlsprinkler::Result<()> {
//! let client = SprinklerClient::new("http://sprinkler.local:3030")?;
//! let mut system = System::new(client).await?;
//! system.set_system_state(true).await?;
//! system.update_zone_state(1, true).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod system;
pub mod zone;

pub use client::SprinklerClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use system::System;
pub use zone::{Zone, ZoneRecord, ZoneSettings};
