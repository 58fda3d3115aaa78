//! Orchestration layer for offergen.
//!
//! This crate provides:
//! - [`Pipeline`] — fetch → extract → enrich → assemble for one notice URL
//! - [`assemble`] — merges DOM extraction with registry enrichment
//!
//! Precedence between data sources is decided here; the extraction and
//! registry crates stay independent of each other.

pub mod assembler;
pub mod pipeline;

pub use assembler::assemble;
pub use pipeline::Pipeline;
