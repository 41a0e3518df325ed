//! HTTP client for the OECD SDMX REST API.

use std::collections::BTreeMap;
use std::time::Duration;

use oecd_store::catalog::{DATA_EXPLORER_URL, SDMX_BASE_URL};
use oecd_store::models::{KnownDataflow, Observation};
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::debug;

use crate::error::{SourceError, SourceResult};

/// Connection settings for [`SdmxClient`].
#[derive(Debug, Clone)]
pub struct SdmxClientConfig {
    pub base_url: String,
    pub explorer_url: String,
    pub timeout: Option<Duration>,
}

impl SdmxClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            explorer_url: DATA_EXPLORER_URL.to_string(),
            timeout: Some(Duration::from_secs(30)),
        }
    }

    #[must_use]
    pub fn with_explorer_url(mut self, explorer_url: impl Into<String>) -> Self {
        self.explorer_url = explorer_url.into();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for SdmxClientConfig {
    fn default() -> Self {
        Self::new(SDMX_BASE_URL)
    }
}

/// Optional query parameters of a data request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub start_period: Option<String>,
    pub end_period: Option<String>,
    pub last_n_observations: Option<u32>,
}

/// Thin SDMX data client; holds a pooled HTTP client and is cheap to clone.
#[derive(Debug, Clone)]
pub struct SdmxClient {
    http: reqwest::Client,
    base_url: String,
    explorer_url: String,
}

impl SdmxClient {
    /// Builds a client from its configuration.
    ///
    /// # Errors
    /// Returns `SourceError::Http` if the HTTP client cannot be constructed.
    pub fn new(config: SdmxClientConfig) -> SourceResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            explorer_url: config.explorer_url,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn explorer_url(&self) -> &str {
        &self.explorer_url
    }

    /// Queries observations of a dataflow.
    ///
    /// An empty `filter` selects every series.
    ///
    /// # Errors
    /// Returns `SourceError::Api` for non-success statuses, `SourceError::Http`
    /// for transport failures, and `SourceError::Decode` for malformed bodies.
    pub async fn query_data(
        &self,
        dataflow: &KnownDataflow,
        filter: &str,
        options: &QueryOptions,
    ) -> SourceResult<Vec<Observation>> {
        let filter = if filter.is_empty() { "all" } else { filter };
        let url = format!(
            "{}/data/{},{}/{filter}",
            self.base_url, dataflow.agency, dataflow.full_id
        );

        let mut params = vec![("format", "jsondata".to_string())];
        if let Some(start) = options.start_period.as_deref() {
            params.push(("startPeriod", start.to_string()));
        }
        if let Some(end) = options.end_period.as_deref() {
            params.push(("endPeriod", end.to_string()));
        }
        if let Some(last) = options.last_n_observations {
            params.push(("lastNObservations", last.to_string()));
        }

        debug!(dataflow = dataflow.id, %url, "querying SDMX data");
        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Api {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.bytes().await?;
        let payload: Value =
            serde_json::from_slice(&body).map_err(|err| SourceError::Decode(err.to_string()))?;
        Ok(parse_observations(&payload))
    }

    /// Builds a data explorer link for a dataflow.
    #[must_use]
    pub fn data_explorer_url(&self, dataflow_id: &str, filter: Option<&str>) -> String {
        match filter.filter(|filter| !filter.is_empty()) {
            Some(filter) => format!("{}?df={dataflow_id}&dq={filter}", self.explorer_url),
            None => format!("{}?df={dataflow_id}", self.explorer_url),
        }
    }
}

/// Flattens an SDMX-JSON data message into observations.
///
/// Series keys are positional (`0:1:2`) and map to `DIM_<index>` entries; the
/// observation key becomes `TIME_PERIOD`. Missing sections yield no rows.
#[must_use]
pub fn parse_observations(payload: &Value) -> Vec<Observation> {
    let Some(data_sets) = payload.pointer("/data/dataSets").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut observations = Vec::new();
    for data_set in data_sets {
        let Some(series) = data_set.get("series").and_then(Value::as_object) else {
            continue;
        };
        for (series_key, series_data) in series {
            let dimensions = parse_series_key(series_key);
            let Some(entries) = series_data.get("observations").and_then(Value::as_object) else {
                continue;
            };
            for (period, raw) in entries {
                let value = match raw {
                    Value::Array(items) => items.first().cloned().unwrap_or(Value::Null),
                    other => other.clone(),
                };
                let mut dimensions = dimensions.clone();
                dimensions.insert("TIME_PERIOD".to_string(), period.clone());
                observations.push(Observation {
                    dimensions,
                    value,
                    attributes: None,
                });
            }
        }
    }
    observations
}

fn parse_series_key(key: &str) -> BTreeMap<String, String> {
    key.split(':')
        .enumerate()
        .map(|(index, part)| (format!("DIM_{index}"), part.to_string()))
        .collect()
}
