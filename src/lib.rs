//! Interactive viewer for Snowflake access-control graphs.

pub mod app;
pub mod config;
pub mod permissions;
pub mod source;
pub mod telemetry;
mod util;
