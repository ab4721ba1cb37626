//! Exploration core for the Xiuxian game server.
//!
//! A player explores for a while; once per second of exploration the
//! engine rolls for one of ten random events. Events change cultivation,
//! spirit, spirit stones, and attributes, or grant herbs and pill recipe
//! pages. Every change is flushed through the store traits as soon as the
//! event fires.
//!
//! # Modules
//!
//! - [`catalogue`]: compiled-in herbs, quality tiers, recipes, and event table
//! - [`reward`]: level-scaled reward and penalty formulas
//! - [`quality`]: herb quality sampler
//! - [`random`]: the random source seam
//! - [`attributes`]: the player attribute blob accessor
//! - [`store`]: persistence traits and the in-memory store
//! - [`engine`]: check loop pieces, event selection and resolution
//! - [`persist`]: applies resolved events and flushes them
//! - [`service`]: the orchestrator behind the HTTP endpoints
//! - [`config`]: YAML configuration
//! - [`error`]: error types

pub mod attributes;
pub mod catalogue;
pub mod config;
pub mod engine;
pub mod error;
pub mod persist;
pub mod quality;
pub mod random;
pub mod reward;
pub mod service;
pub mod store;

pub use catalogue::Catalogue;
pub use config::{AppConfig, ConfigError, ExplorationConfig};
pub use engine::EventEngine;
pub use error::{ExplorationError, StoreError};
pub use random::{EntropySource, RandomSource, ScriptedSource};
pub use service::ExplorationService;
pub use store::{ExplorationStore, InventoryStore, MemoryStore, PlayerStore};
