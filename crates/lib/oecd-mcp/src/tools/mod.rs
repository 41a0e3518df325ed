//! Tool catalog and handlers.
//!
//! [`TOOLS`] is the single registry of operations: each entry pairs the
//! advertised name, description and input schema with the handler that
//! serves it. Handlers validate raw arguments, call the statistics source,
//! and shape the result into a one-block envelope.

mod catalog;
mod dataflows;
mod query;

use std::sync::{Arc, LazyLock};

use futures::future::BoxFuture;
use oecd_core::StatisticsSource;
use oecd_store::catalog::CATEGORY_CODES;
use regex::Regex;
use rmcp::model::{CallToolResult, Content, Tool};
use serde::Serialize;
use serde_json::Value;

use crate::error::ToolError;
use crate::validation::{
    ChoiceRules,
    Constraint,
    Field,
    Limit,
    NumberRules,
    Pattern,
    Presence,
    Schema,
    TextRules,
};

pub use dataflows::{
    GetDataStructureParams,
    GetDataflowUrlParams,
    ListDataflowsParams,
    SearchDataflowsParams,
    SearchIndicatorsParams,
};
pub use query::{
    DEFAULT_OBSERVATION_LIMIT,
    MAX_OBSERVATION_LIMIT,
    ObservationLimit,
    QueryDataParams,
};

pub type ToolResult = Result<CallToolResult, ToolError>;

/// Handler signature shared by every catalog entry.
pub type ToolHandler =
    for<'a> fn(&'a dyn StatisticsSource, Value) -> BoxFuture<'a, ToolResult>;

/// Operation descriptor: advertised metadata plus its handler.
#[derive(Clone, Copy)]
pub struct ToolEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub schema: &'static Schema,
    pub handler: ToolHandler,
}

impl ToolEntry {
    /// Builds the MCP tool descriptor advertised in `tools/list`.
    #[must_use]
    pub fn descriptor(&self) -> Tool {
        Tool::new(
            self.name,
            self.description,
            Arc::new(self.schema.to_json_schema()),
        )
    }
}

pub static TOOLS: [ToolEntry; 9] = [
    ToolEntry {
        name: dataflows::SEARCH_DATAFLOWS,
        description: "Search for OECD datasets (dataflows) by keyword. Returns matching datasets with their IDs, names, and descriptions.",
        schema: &dataflows::SEARCH_DATAFLOWS_SCHEMA,
        handler: dataflows::search_dataflows,
    },
    ToolEntry {
        name: dataflows::LIST_DATAFLOWS,
        description: "List available OECD dataflows (datasets), optionally filtered by category. Use this to browse datasets by topic area.",
        schema: &dataflows::LIST_DATAFLOWS_SCHEMA,
        handler: dataflows::list_dataflows,
    },
    ToolEntry {
        name: dataflows::GET_DATA_STRUCTURE,
        description: "Get the metadata and structure of a specific OECD dataset. Returns dimensions, attributes, and valid values for querying data.",
        schema: &dataflows::GET_DATA_STRUCTURE_SCHEMA,
        handler: dataflows::get_data_structure,
    },
    ToolEntry {
        name: query::QUERY_DATA,
        description: "Query actual statistical data from an OECD dataset. IMPORTANT: Defaults to last 100 observations (max 1000) to protect context window. Use filters, time periods, or last_n_observations to control data size. Large datasets (e.g. SOCX_AGG) can have 70,000+ observations - always specify limits!",
        schema: &query::QUERY_DATA_SCHEMA,
        handler: query::query_data,
    },
    ToolEntry {
        name: catalog::GET_CATEGORIES,
        description: "Get all available OECD data categories (17 categories covering all topics: Economy, Health, Education, Environment, etc.)",
        schema: &NO_ARGUMENTS,
        handler: catalog::get_categories,
    },
    ToolEntry {
        name: catalog::GET_POPULAR_DATASETS,
        description: "Get a curated list of commonly used OECD datasets across all categories.",
        schema: &NO_ARGUMENTS,
        handler: catalog::get_popular_datasets,
    },
    ToolEntry {
        name: dataflows::SEARCH_INDICATORS,
        description: "Search for specific economic or social indicators by keyword (e.g., \"inflation\", \"unemployment\", \"GDP\").",
        schema: &dataflows::SEARCH_INDICATORS_SCHEMA,
        handler: dataflows::search_indicators,
    },
    ToolEntry {
        name: dataflows::GET_DATAFLOW_URL,
        description: "Generate an OECD Data Explorer URL for a dataset. Use this to provide users with a direct link to explore data visually in their browser.",
        schema: &dataflows::GET_DATAFLOW_URL_SCHEMA,
        handler: dataflows::get_dataflow_url,
    },
    ToolEntry {
        name: catalog::LIST_CATEGORIES_DETAILED,
        description: "Get all OECD data categories with example datasets for each category. Returns comprehensive information about all 17 categories.",
        schema: &NO_ARGUMENTS,
        handler: catalog::list_categories_detailed,
    },
];

/// Looks up a catalog entry by tool name.
#[must_use]
pub fn find_tool(name: &str) -> Option<&'static ToolEntry> {
    TOOLS.iter().find(|entry| entry.name == name)
}

/// Descriptors for every registered tool, in catalog order.
#[must_use]
pub fn tool_descriptors() -> Vec<Tool> {
    TOOLS.iter().map(ToolEntry::descriptor).collect()
}

static NO_ARGUMENTS: Schema = Schema::open(&[]);

fn dataflow_id_pattern() -> &'static Regex {
    static DATAFLOW_ID: LazyLock<Regex> =
        LazyLock::new(|| Regex::new("^[A-Z0-9_]+$").expect("valid dataflow id pattern"));
    &DATAFLOW_ID
}

fn period_pattern() -> &'static Regex {
    static PERIOD: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new("^[0-9]{4}(-Q[1-4]|-(0[1-9]|1[0-2]))?$").expect("valid period pattern")
    });
    &PERIOD
}

const DATAFLOW_ID_RULES: Constraint = Constraint::Text(TextRules {
    min_len: Some(Limit::new(1, "Dataflow ID must not be empty")),
    max_len: Some(Limit::new(50, "Dataflow ID must not exceed 50 characters")),
    pattern: Some(Pattern {
        regex: dataflow_id_pattern,
        message: "Dataflow ID must contain only uppercase letters, numbers, and underscores",
    }),
});

const FILTER_RULES: Constraint = Constraint::Text(TextRules {
    min_len: None,
    max_len: Some(Limit::new(200, "Filter must not exceed 200 characters")),
    pattern: None,
});

const PERIOD_RULES: Constraint = Constraint::Text(TextRules {
    min_len: None,
    max_len: None,
    pattern: Some(Pattern {
        regex: period_pattern,
        message: "Invalid period format. Use YYYY, YYYY-QN, or YYYY-MM",
    }),
});

const RESULT_LIMIT_RULES: Constraint = Constraint::Number(NumberRules {
    integer: Some("Limit must be an integer"),
    min: Some(Limit::new(1.0, "Limit must be at least 1")),
    max: Some(Limit::new(100.0, "Limit cannot exceed 100")),
});

const CATEGORY_FIELD: Field = Field {
    name: "category",
    description: "Optional category filter: ECO, HEA, EDU, ENV, TRD, JOB, NRG, AGR, GOV, SOC, DEV, STI, TAX, FIN, TRA, IND, REG",
    presence: Presence::Optional,
    constraint: Constraint::Choice(ChoiceRules {
        values: &CATEGORY_CODES,
    }),
};

/// Wraps a JSON payload, pretty-printed, as a single text block.
fn json_result<T: Serialize + ?Sized>(value: &T) -> ToolResult {
    let text = serde_json::to_string_pretty(value)?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

fn text_result(text: impl Into<String>) -> ToolResult {
    Ok(CallToolResult::success(vec![Content::text(text.into())]))
}
