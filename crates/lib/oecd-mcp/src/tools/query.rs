use futures::future::BoxFuture;
use oecd_core::StatisticsSource;
use oecd_store::models::{DataQuery, Observation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{DATAFLOW_ID_RULES, FILTER_RULES, PERIOD_RULES, ToolResult, json_result};
use crate::validation::{Constraint, Field, Limit, NumberRules, Presence, Schema, parse_args};

pub(super) const QUERY_DATA: &str = "query_data";

/// Observations returned when the caller does not ask for a count.
pub const DEFAULT_OBSERVATION_LIMIT: u32 = 100;
/// Hard ceiling on observations per query.
pub const MAX_OBSERVATION_LIMIT: u32 = 1000;

pub(super) static QUERY_DATA_SCHEMA: Schema = Schema::open(&[
    Field {
        name: "dataflow_id",
        description: "Dataflow ID",
        presence: Presence::Required,
        constraint: DATAFLOW_ID_RULES,
    },
    Field {
        name: "filter",
        description: "Dimension filter (e.g., \"USA.GDP..\" for USA GDP data)",
        presence: Presence::Optional,
        constraint: FILTER_RULES,
    },
    Field {
        name: "start_period",
        description: "Start period (e.g., \"2020\", \"2020-Q1\", \"2020-01\")",
        presence: Presence::Optional,
        constraint: PERIOD_RULES,
    },
    Field {
        name: "end_period",
        description: "End period (e.g., \"2023\", \"2023-Q4\", \"2023-12\")",
        presence: Presence::Optional,
        constraint: PERIOD_RULES,
    },
    Field {
        name: "last_n_observations",
        description: "Limit to last N observations (default: 100, max: 1000). Use this to prevent context overflow!",
        presence: Presence::Optional,
        constraint: Constraint::Number(NumberRules {
            integer: Some("Observations limit must be an integer"),
            min: Some(Limit::new(1.0, "Observations limit must be at least 1")),
            max: Some(Limit::new(
                1000.0,
                "Observations limit cannot exceed 1000 (context protection)",
            )),
        }),
    },
]);

/// Validated arguments of `query_data`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct QueryDataParams {
    pub dataflow_id: String,
    pub filter: Option<String>,
    pub start_period: Option<String>,
    pub end_period: Option<String>,
    pub last_n_observations: Option<u32>,
}

/// Observation count actually requested from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationLimit {
    pub requested: u32,
    pub effective: u32,
    pub clamped: bool,
}

impl ObservationLimit {
    /// Applies the default and the ceiling to a caller-supplied count.
    #[must_use]
    pub fn resolve(requested: Option<u32>) -> Self {
        let requested = requested.unwrap_or(DEFAULT_OBSERVATION_LIMIT);
        let clamped = requested > MAX_OBSERVATION_LIMIT;
        Self {
            requested,
            effective: requested.min(MAX_OBSERVATION_LIMIT),
            clamped,
        }
    }

    /// Warning to attach to a result of `returned` observations, if any.
    #[must_use]
    pub fn warning(&self, returned: usize) -> Option<String> {
        if self.clamped {
            return Some(format!(
                "⚠️ Requested {} observations but limited to {MAX_OBSERVATION_LIMIT} to protect context window.",
                self.requested
            ));
        }
        // 80% of the ceiling, kept in integers.
        let near_ceiling = returned.saturating_mul(5) >= MAX_OBSERVATION_LIMIT as usize * 4;
        near_ceiling.then(|| {
            format!(
                "⚠️ Returning {returned} observations (near max limit of {MAX_OBSERVATION_LIMIT}). Consider using filters or time periods to reduce data size."
            )
        })
    }
}

#[derive(Serialize)]
struct WarnedObservations<'a> {
    warning: String,
    total_observations: usize,
    data: &'a [Observation],
}

pub(super) fn query_data(source: &dyn StatisticsSource, args: Value) -> BoxFuture<'_, ToolResult> {
    Box::pin(async move {
        let params: QueryDataParams = parse_args(&QUERY_DATA_SCHEMA, QUERY_DATA, &args)?;
        let limit = ObservationLimit::resolve(params.last_n_observations);
        let observations = source
            .query_data(DataQuery {
                dataflow_id: params.dataflow_id,
                filter: params.filter,
                start_period: params.start_period,
                end_period: params.end_period,
                last_n_observations: Some(limit.effective),
            })
            .await?;

        match limit.warning(observations.len()) {
            Some(warning) => json_result(&WarnedObservations {
                warning,
                total_observations: observations.len(),
                data: &observations,
            }),
            None => json_result(&observations),
        }
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_count_uses_default() {
        let limit = ObservationLimit::resolve(None);
        assert_eq!(limit.effective, DEFAULT_OBSERVATION_LIMIT);
        assert!(!limit.clamped);
    }

    #[test]
    fn counts_above_ceiling_are_clamped_with_warning() {
        let limit = ObservationLimit::resolve(Some(5000));
        assert_eq!(limit.effective, MAX_OBSERVATION_LIMIT);
        assert!(limit.clamped);
        assert_eq!(
            limit.warning(3).as_deref(),
            Some("⚠️ Requested 5000 observations but limited to 1000 to protect context window.")
        );
    }

    #[test]
    fn warning_starts_at_eighty_percent_of_ceiling() {
        let limit = ObservationLimit::resolve(Some(1000));
        assert_eq!(limit.warning(799), None);
        assert_eq!(
            limit.warning(800).as_deref(),
            Some(
                "⚠️ Returning 800 observations (near max limit of 1000). Consider using filters or time periods to reduce data size."
            )
        );
    }

    #[test]
    fn observation_count_bounds() {
        let ok: QueryDataParams = parse_args(
            &QUERY_DATA_SCHEMA,
            QUERY_DATA,
            &json!({ "dataflow_id": "QNA", "last_n_observations": 1000 }),
        )
        .expect("ceiling is allowed");
        assert_eq!(ok.last_n_observations, Some(1000));

        let err = parse_args::<QueryDataParams>(
            &QUERY_DATA_SCHEMA,
            QUERY_DATA,
            &json!({ "dataflow_id": "QNA", "last_n_observations": 1001 }),
        )
        .expect_err("above ceiling");
        assert!(err.to_string().contains("cannot exceed 1000"));

        let err = parse_args::<QueryDataParams>(
            &QUERY_DATA_SCHEMA,
            QUERY_DATA,
            &json!({ "dataflow_id": "QNA", "last_n_observations": 0 }),
        )
        .expect_err("zero");
        assert!(err.to_string().contains("Observations limit must be at least 1"));
    }

    #[test]
    fn period_formats() {
        for period in ["2020", "2020-Q1", "2020-Q4", "2020-01", "2020-12"] {
            parse_args::<QueryDataParams>(
                &QUERY_DATA_SCHEMA,
                QUERY_DATA,
                &json!({ "dataflow_id": "QNA", "start_period": period }),
            )
            .unwrap_or_else(|err| panic!("{period} should be accepted: {err}"));
        }
        for period in ["20", "20-Q1", "2020-Q5", "2020-13", "2020/01", "Q1-2020"] {
            let err = parse_args::<QueryDataParams>(
                &QUERY_DATA_SCHEMA,
                QUERY_DATA,
                &json!({ "dataflow_id": "QNA", "end_period": period }),
            )
            .expect_err("malformed period");
            assert!(
                err.to_string()
                    .ends_with("end_period: Invalid period format. Use YYYY, YYYY-QN, or YYYY-MM"),
                "{period}: {err}"
            );
        }
    }
}
