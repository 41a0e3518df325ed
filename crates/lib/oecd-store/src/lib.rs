//! Catalog models and static catalogs for oecd-mcp.
//!
//! This crate defines the data model shared by the SDMX client, the control
//! plane, and the MCP tool surface, plus the curated catalogs of known
//! dataflows, topic categories, and popular datasets.

pub mod catalog;
pub mod models;

pub use models::*;
