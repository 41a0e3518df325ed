use async_trait::async_trait;
use oecd_store::models::{
    ApiInfo,
    Category,
    CategoryDetail,
    DataQuery,
    DataStructure,
    Dataflow,
    DataflowFilter,
    IndicatorSearch,
    Observation,
    PopularDataset,
};

use crate::error::SourceResult;

/// Downstream data-query collaborator used by the MCP tool handlers.
///
/// Implementations receive already-validated parameters and must be safe to
/// call from concurrent tool invocations.
#[async_trait]
pub trait StatisticsSource: Send + Sync {
    /// Searches dataflows by keyword, returning at most `limit` entries.
    async fn search_dataflows(&self, query: &str, limit: usize) -> SourceResult<Vec<Dataflow>>;

    /// Lists dataflows, optionally restricted to a category.
    async fn list_dataflows(&self, filter: DataflowFilter) -> SourceResult<Vec<Dataflow>>;

    async fn get_data_structure(&self, dataflow_id: &str) -> SourceResult<DataStructure>;

    /// Fetches observations for a dataflow.
    async fn query_data(&self, query: DataQuery) -> SourceResult<Vec<Observation>>;

    async fn search_indicators(&self, search: IndicatorSearch) -> SourceResult<Vec<Dataflow>>;

    /// Builds a data explorer link for a dataflow and optional dimension filter.
    fn data_explorer_url(&self, dataflow_id: &str, filter: Option<&str>) -> String;

    fn categories(&self) -> &'static [Category];

    fn popular_datasets(&self) -> &'static [PopularDataset];

    /// Lists every category with its example dataflows resolved.
    async fn categories_detailed(&self) -> SourceResult<Vec<CategoryDetail>>;

    fn api_info(&self) -> ApiInfo;
}
