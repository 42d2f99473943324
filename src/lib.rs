pub mod adapters;
pub mod api;
pub mod client;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{InMemoryStore, JsonFileStore};
pub use api::{create_router, AppState};
pub use client::SigmoidClient;
pub use core::sampler::SigmoidSampler;
pub use core::separability::{DemoConfig, RadialSeparabilityDemo};
pub use core::service::SigmoidService;
pub use utils::error::{Result, SigmoidError};
