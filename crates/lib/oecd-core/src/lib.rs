//! Core services for oecd-mcp.
//!
//! This crate owns the downstream side of the tool surface: the
//! [`StatisticsSource`] trait the MCP layer delegates to, the SDMX HTTP client,
//! and the control plane that combines the client with the curated catalogs.

pub mod control;
pub mod error;
pub mod sdmx;
pub mod source;

pub use control::OecdControlPlane;
pub use error::{SourceError, SourceResult};
pub use sdmx::{SdmxClient, SdmxClientConfig};
pub use source::StatisticsSource;
