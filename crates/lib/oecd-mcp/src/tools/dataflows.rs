use futures::future::BoxFuture;
use oecd_core::StatisticsSource;
use oecd_store::models::{CategoryCode, DataflowFilter, IndicatorSearch};
use serde::Deserialize;
use serde_json::Value;

use super::{
    CATEGORY_FIELD,
    DATAFLOW_ID_RULES,
    FILTER_RULES,
    RESULT_LIMIT_RULES,
    ToolResult,
    json_result,
    text_result,
};
use crate::validation::{
    Constraint,
    DefaultValue,
    Field,
    Limit,
    Presence,
    Schema,
    TextRules,
    parse_args,
};

pub(super) const SEARCH_DATAFLOWS: &str = "search_dataflows";
pub(super) const LIST_DATAFLOWS: &str = "list_dataflows";
pub(super) const GET_DATA_STRUCTURE: &str = "get_data_structure";
pub(super) const SEARCH_INDICATORS: &str = "search_indicators";
pub(super) const GET_DATAFLOW_URL: &str = "get_dataflow_url";

pub(super) static SEARCH_DATAFLOWS_SCHEMA: Schema = Schema::open(&[
    Field {
        name: "query",
        description: "Search query to find relevant datasets",
        presence: Presence::Required,
        constraint: Constraint::Text(TextRules {
            min_len: Some(Limit::new(1, "Search query must not be empty")),
            max_len: Some(Limit::new(100, "Search query must not exceed 100 characters")),
            pattern: None,
        }),
    },
    Field {
        name: "limit",
        description: "Maximum number of results to return (default: 20)",
        presence: Presence::Default(DefaultValue::Integer(20)),
        constraint: RESULT_LIMIT_RULES,
    },
]);

pub(super) static LIST_DATAFLOWS_SCHEMA: Schema = Schema::open(&[
    CATEGORY_FIELD,
    Field {
        name: "limit",
        description: "Maximum number of results (default: 50)",
        presence: Presence::Default(DefaultValue::Integer(50)),
        constraint: RESULT_LIMIT_RULES,
    },
]);

pub(super) static GET_DATA_STRUCTURE_SCHEMA: Schema = Schema::open(&[Field {
    name: "dataflow_id",
    description: "Dataflow ID (e.g., \"QNA\", \"MEI\", \"HEALTH_STAT\")",
    presence: Presence::Required,
    constraint: DATAFLOW_ID_RULES,
}]);

pub(super) static SEARCH_INDICATORS_SCHEMA: Schema = Schema::open(&[
    Field {
        name: "indicator",
        description: "Indicator to search for",
        presence: Presence::Required,
        constraint: Constraint::Text(TextRules {
            min_len: Some(Limit::new(1, "Indicator search term must not be empty")),
            max_len: Some(Limit::new(
                100,
                "Indicator search term must not exceed 100 characters",
            )),
            pattern: None,
        }),
    },
    CATEGORY_FIELD,
]);

pub(super) static GET_DATAFLOW_URL_SCHEMA: Schema = Schema::open(&[
    Field {
        name: "dataflow_id",
        description: "Dataflow ID",
        presence: Presence::Required,
        constraint: DATAFLOW_ID_RULES,
    },
    Field {
        name: "filter",
        description: "Optional dimension filter",
        presence: Presence::Optional,
        constraint: FILTER_RULES,
    },
]);

/// Validated arguments of `search_dataflows`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SearchDataflowsParams {
    pub query: String,
    pub limit: usize,
}

/// Validated arguments of `list_dataflows`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ListDataflowsParams {
    pub category: Option<CategoryCode>,
    pub limit: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GetDataStructureParams {
    pub dataflow_id: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SearchIndicatorsParams {
    pub indicator: String,
    pub category: Option<CategoryCode>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GetDataflowUrlParams {
    pub dataflow_id: String,
    pub filter: Option<String>,
}

pub(super) fn search_dataflows(
    source: &dyn StatisticsSource,
    args: Value,
) -> BoxFuture<'_, ToolResult> {
    Box::pin(async move {
        let params: SearchDataflowsParams =
            parse_args(&SEARCH_DATAFLOWS_SCHEMA, SEARCH_DATAFLOWS, &args)?;
        let results = source.search_dataflows(&params.query, params.limit).await?;
        json_result(&results)
    })
}

pub(super) fn list_dataflows(
    source: &dyn StatisticsSource,
    args: Value,
) -> BoxFuture<'_, ToolResult> {
    Box::pin(async move {
        let params: ListDataflowsParams =
            parse_args(&LIST_DATAFLOWS_SCHEMA, LIST_DATAFLOWS, &args)?;
        let results = source
            .list_dataflows(DataflowFilter {
                category: params.category,
                limit: Some(params.limit),
            })
            .await?;
        json_result(&results)
    })
}

pub(super) fn get_data_structure(
    source: &dyn StatisticsSource,
    args: Value,
) -> BoxFuture<'_, ToolResult> {
    Box::pin(async move {
        let params: GetDataStructureParams =
            parse_args(&GET_DATA_STRUCTURE_SCHEMA, GET_DATA_STRUCTURE, &args)?;
        let structure = source.get_data_structure(&params.dataflow_id).await?;
        json_result(&structure)
    })
}

pub(super) fn search_indicators(
    source: &dyn StatisticsSource,
    args: Value,
) -> BoxFuture<'_, ToolResult> {
    Box::pin(async move {
        let params: SearchIndicatorsParams =
            parse_args(&SEARCH_INDICATORS_SCHEMA, SEARCH_INDICATORS, &args)?;
        let results = source
            .search_indicators(IndicatorSearch {
                indicator: params.indicator,
                category: params.category,
            })
            .await?;
        json_result(&results)
    })
}

/// Explorer links are returned as plain text rather than JSON.
pub(super) fn get_dataflow_url(
    source: &dyn StatisticsSource,
    args: Value,
) -> BoxFuture<'_, ToolResult> {
    Box::pin(async move {
        let params: GetDataflowUrlParams =
            parse_args(&GET_DATAFLOW_URL_SCHEMA, GET_DATAFLOW_URL, &args)?;
        text_result(source.data_explorer_url(&params.dataflow_id, params.filter.as_deref()))
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ToolError;

    fn structure_params(value: Value) -> Result<GetDataStructureParams, ToolError> {
        parse_args(&GET_DATA_STRUCTURE_SCHEMA, GET_DATA_STRUCTURE, &value)
    }

    fn search_params(value: Value) -> Result<SearchDataflowsParams, ToolError> {
        parse_args(&SEARCH_DATAFLOWS_SCHEMA, SEARCH_DATAFLOWS, &value)
    }

    #[test]
    fn dataflow_ids_accept_uppercase_digits_and_underscores() {
        for id in ["QNA", "HEALTH_STAT", "PDB_LV123"] {
            let params = structure_params(json!({ "dataflow_id": id }))
                .unwrap_or_else(|err| panic!("{id} should be accepted: {err}"));
            assert_eq!(params.dataflow_id, id);
        }
    }

    #[test]
    fn dataflow_ids_reject_lowercase_punctuation_and_empty() {
        for id in ["qna", "QNA-TEST", ""] {
            let err = structure_params(json!({ "dataflow_id": id }))
                .expect_err("identifier should be rejected");
            assert!(matches!(err, ToolError::Validation(_)), "{id}: {err}");
        }
        let err = structure_params(json!({ "dataflow_id": "qna" })).expect_err("lowercase");
        assert_eq!(
            err.to_string(),
            "Invalid input for tool \"get_data_structure\": dataflow_id: Dataflow ID must contain only uppercase letters, numbers, and underscores"
        );
        let err = structure_params(json!({ "dataflow_id": "A".repeat(51) })).expect_err("too long");
        assert!(err.to_string().contains("Dataflow ID must not exceed 50 characters"));
    }

    #[test]
    fn search_limit_bounds_are_inclusive() {
        for limit in [1, 100] {
            let params = search_params(json!({ "query": "GDP", "limit": limit }))
                .expect("boundary limit should pass");
            assert_eq!(params.limit, limit);
        }
        let low = search_params(json!({ "query": "GDP", "limit": 0 })).expect_err("limit 0");
        assert!(low.to_string().ends_with("limit: Limit must be at least 1"));
        let high = search_params(json!({ "query": "GDP", "limit": 101 })).expect_err("limit 101");
        assert!(high.to_string().ends_with("limit: Limit cannot exceed 100"));
        let fraction =
            search_params(json!({ "query": "GDP", "limit": 2.5 })).expect_err("fractional limit");
        assert!(fraction.to_string().contains("Limit must be an integer"));
    }

    #[test]
    fn search_defaults_and_query_bounds() {
        let params = search_params(json!({ "query": "inflation" })).expect("default limit");
        assert_eq!(params.limit, 20);

        let empty = search_params(json!({ "query": "" })).expect_err("empty query");
        assert_eq!(
            empty.to_string(),
            "Invalid input for tool \"search_dataflows\": query: Search query must not be empty"
        );
        let long = search_params(json!({ "query": "a".repeat(101) })).expect_err("long query");
        assert!(long.to_string().contains("Search query must not exceed 100 characters"));
    }

    #[test]
    fn query_length_counts_utf16_units() {
        let params = search_params(json!({ "query": "😀".repeat(50) })).expect("100 units pass");
        assert_eq!(params.query.chars().count(), 50);

        let err = search_params(json!({ "query": "😀".repeat(51) })).expect_err("102 units");
        assert!(err.to_string().ends_with("query: Search query must not exceed 100 characters"));
    }

    #[test]
    fn list_accepts_every_category_and_rejects_others() {
        for code in CategoryCode::ALL {
            let params: ListDataflowsParams = parse_args(
                &LIST_DATAFLOWS_SCHEMA,
                LIST_DATAFLOWS,
                &json!({ "category": code.as_str() }),
            )
            .expect("catalog category should pass");
            assert_eq!(params.category, Some(code));
            assert_eq!(params.limit, 50);
        }

        let err = parse_args::<ListDataflowsParams>(
            &LIST_DATAFLOWS_SCHEMA,
            LIST_DATAFLOWS,
            &json!({ "category": "INVALID" }),
        )
        .expect_err("unknown category");
        assert!(err.to_string().contains("category: Invalid enum value"));
    }

    #[test]
    fn url_filter_is_bounded() {
        let err = parse_args::<GetDataflowUrlParams>(
            &GET_DATAFLOW_URL_SCHEMA,
            GET_DATAFLOW_URL,
            &json!({ "dataflow_id": "QNA", "filter": "x".repeat(201) }),
        )
        .expect_err("long filter");
        assert!(err.to_string().ends_with("filter: Filter must not exceed 200 characters"));

        let err = parse_args::<GetDataflowUrlParams>(
            &GET_DATAFLOW_URL_SCHEMA,
            GET_DATAFLOW_URL,
            &json!({ "dataflow_id": "QNA", "filter": "😀".repeat(150) }),
        )
        .expect_err("300 units");
        assert!(err.to_string().ends_with("filter: Filter must not exceed 200 characters"));
    }
}
