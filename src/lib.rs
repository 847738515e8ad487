pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod rasterize;
pub mod rebuild;
#[cfg(feature = "verify")]
pub mod verify;
