#[cfg(feature = "server")]
pub mod auth;
pub mod client;
#[cfg(feature = "server")]
pub mod config;
pub mod leaser;
pub mod offer;
pub mod order;
pub mod supplier;
