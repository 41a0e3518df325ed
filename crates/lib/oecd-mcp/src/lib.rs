//! MCP server implementation for oecd-mcp.
//!
//! This crate exposes the OECD statistics tools over MCP: a declarative input
//! validator, the static tool catalog, the dispatcher that turns every call
//! into a result envelope, the read-only catalog resources and the guided
//! analysis prompts.

mod helpers;
pub mod dispatch;
pub mod error;
pub mod prompts;
pub mod resources;
pub mod server;
pub mod tools;
pub mod validation;

use std::sync::Arc;

use oecd_core::StatisticsSource;
use rmcp::model::{
    CallToolRequestParams,
    CallToolResult,
    GetPromptRequestParams,
    GetPromptResult,
    Implementation,
    ListPromptsResult,
    ListResourcesResult,
    ListToolsResult,
    PaginatedRequestParams,
    ReadResourceRequestParams,
    ReadResourceResult,
    ServerCapabilities,
    ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler};

pub use dispatch::ToolDispatcher;
pub use error::ToolError;

pub const SERVER_NAME: &str = "oecd-mcp-server";

const SERVER_INSTRUCTIONS: &str = r"oecd-mcp provides MCP tools for discovering and querying OECD statistics through the public SDMX API.

Workflow:
1. Find a dataset:
   - `search_dataflows` by keyword, or `list_dataflows` filtered by a category code.
   - `get_categories`, `list_categories_detailed` and `get_popular_datasets` browse the curated catalog.
   - `search_indicators` finds datasets for an indicator such as inflation or unemployment.
2. Inspect it with `get_data_structure` (dimensions and attributes).
3. Fetch observations with `query_data`.
4. Share a browser link with `get_dataflow_url`.

Notes:
- Dataflow IDs use uppercase letters, digits and underscores (e.g. `QNA`, `HEALTH_STAT`).
- Periods are `YYYY`, `YYYY-QN` or `YYYY-MM`.
- `query_data` returns the last 100 observations unless `last_n_observations` is set (max 1000).
  Results close to the limit carry a `warning` and `total_observations`; narrow with filters or periods.
- Resources: `oecd://categories`, `oecd://dataflows/popular`, `oecd://api/info`.
- Prompts: `analyze_economic_trend`, `compare_countries`, `get_latest_statistics`.";

/// MCP server wrapper around the tool dispatcher.
#[derive(Clone)]
pub struct OecdMcp {
    dispatcher: ToolDispatcher,
}

impl OecdMcp {
    /// Creates a new server using a source by value.
    #[must_use]
    pub fn new<S: StatisticsSource + 'static>(source: S) -> Self {
        Self::with_source(Arc::new(source))
    }

    /// Creates a new server using a shared source handle.
    #[must_use]
    pub fn with_source(source: Arc<dyn StatisticsSource>) -> Self {
        Self {
            dispatcher: ToolDispatcher::new(source),
        }
    }

    #[must_use]
    pub const fn dispatcher(&self) -> &ToolDispatcher {
        &self.dispatcher
    }
}

impl ServerHandler for OecdMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(tools::tool_descriptors()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(self.dispatcher.call(&request.name, request.arguments).await)
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        Ok(ListResourcesResult::with_all_items(resources::list_resources()))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        resources::read_resource(self.dispatcher.source().as_ref(), &request.uri)
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, ErrorData> {
        Ok(ListPromptsResult::with_all_items(prompts::list_prompts()))
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, ErrorData> {
        prompts::get_prompt(&request.name, request.arguments.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use oecd_core::{OecdControlPlane, SdmxClient, SdmxClientConfig};

    use super::*;

    #[test]
    fn server_info_advertises_tools_resources_and_prompts() {
        let sdmx = SdmxClient::new(SdmxClientConfig::default()).expect("client should build");
        let server = OecdMcp::new(OecdControlPlane::new(sdmx));

        let info = server.get_info();

        assert_eq!(info.server_info.name, SERVER_NAME);
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.capabilities.prompts.is_some());
    }
}
