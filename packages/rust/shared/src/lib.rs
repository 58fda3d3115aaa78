//! Shared types, error model, and configuration for offergen.
//!
//! This crate is the foundation depended on by all other offergen crates.
//! It provides:
//! - [`OffergenError`] — the unified error type
//! - Domain types ([`ProcurementRecord`], [`LotEntry`], [`RegistryRecord`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, FetchConfig, OutputConfig, RegistryConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{OffergenError, Result};
pub use types::{
    DEFAULT_UNIT, ExtractionDiagnostics, FieldSource, LotEntry, ProcurementRecord, RegistryRecord,
    TAX_ID_LEN,
};
