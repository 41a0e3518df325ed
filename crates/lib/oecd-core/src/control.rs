use async_trait::async_trait;
use oecd_store::catalog::{self, CATEGORIES, DOCUMENTATION_URL, KNOWN_DATAFLOWS, POPULAR_DATASETS};
use oecd_store::models::{
    ApiEndpoints,
    ApiInfo,
    Category,
    CategoryCode,
    CategoryDetail,
    DataQuery,
    DataStructure,
    Dataflow,
    DataflowFilter,
    Dimension,
    DimensionValue,
    IndicatorSearch,
    KnownDataflow,
    Observation,
    PopularDataset,
    StructureAttribute,
};

use crate::error::{SourceError, SourceResult};
use crate::sdmx::{QueryOptions, SdmxClient};
use crate::source::StatisticsSource;

/// Statistics control plane backed by the curated catalog and the SDMX API.
#[derive(Debug, Clone)]
pub struct OecdControlPlane {
    sdmx: SdmxClient,
}

impl OecdControlPlane {
    #[must_use]
    pub const fn new(sdmx: SdmxClient) -> Self {
        Self { sdmx }
    }

    #[must_use]
    pub const fn sdmx(&self) -> &SdmxClient {
        &self.sdmx
    }
}

fn known_dataflow(id: &str) -> SourceResult<&'static KnownDataflow> {
    catalog::find_dataflow(id).ok_or_else(|| SourceError::UnknownDataflow(id.to_string()))
}

/// Keeps only dataflows listed as examples of `code`.
///
/// Unknown categories leave the input untouched.
fn restrict_to_category(dataflows: Vec<Dataflow>, code: CategoryCode) -> Vec<Dataflow> {
    match catalog::find_category(code) {
        Some(category) => dataflows
            .into_iter()
            .filter(|dataflow| category.example_datasets.contains(&dataflow.id.as_str()))
            .collect(),
        None => dataflows,
    }
}

fn all_dataflows() -> Vec<Dataflow> {
    KNOWN_DATAFLOWS.iter().map(Dataflow::from).collect()
}

fn simplified_structure(dataflow_id: &str) -> DataStructure {
    let dimension = |id: &str, name: &str, value_name: &str| Dimension {
        id: id.to_string(),
        name: name.to_string(),
        values: vec![DimensionValue {
            id: "all".to_string(),
            name: value_name.to_string(),
        }],
    };
    let attribute = |id: &str, name: &str| StructureAttribute {
        id: id.to_string(),
        name: name.to_string(),
    };

    DataStructure {
        dataflow_id: dataflow_id.to_string(),
        dimensions: vec![
            dimension(
                "REF_AREA",
                "Reference Area",
                "Use query_data to get actual dimension values",
            ),
            dimension("TIME_PERIOD", "Time Period", "Time dimension"),
            dimension("MEASURE", "Measure", "Measured indicator"),
        ],
        attributes: vec![
            attribute("UNIT_MEASURE", "Unit of Measure"),
            attribute("OBS_STATUS", "Observation Status"),
        ],
    }
}

#[async_trait]
impl StatisticsSource for OecdControlPlane {
    async fn search_dataflows(&self, query: &str, limit: usize) -> SourceResult<Vec<Dataflow>> {
        Ok(catalog::search_dataflows(query)
            .take(limit)
            .map(Dataflow::from)
            .collect())
    }

    async fn list_dataflows(&self, filter: DataflowFilter) -> SourceResult<Vec<Dataflow>> {
        let mut dataflows = all_dataflows();
        if let Some(code) = filter.category {
            dataflows = restrict_to_category(dataflows, code);
        }
        if let Some(limit) = filter.limit {
            dataflows.truncate(limit);
        }
        Ok(dataflows)
    }

    // The public SDMX endpoint does not expose full structure definitions, so
    // known dataflows get a simplified structure.
    async fn get_data_structure(&self, dataflow_id: &str) -> SourceResult<DataStructure> {
        let known = known_dataflow(dataflow_id)?;
        Ok(simplified_structure(known.id))
    }

    async fn query_data(&self, query: DataQuery) -> SourceResult<Vec<Observation>> {
        let known = known_dataflow(&query.dataflow_id)?;
        let options = QueryOptions {
            start_period: query.start_period,
            end_period: query.end_period,
            last_n_observations: query.last_n_observations,
        };
        self.sdmx
            .query_data(known, query.filter.as_deref().unwrap_or_default(), &options)
            .await
    }

    async fn search_indicators(&self, search: IndicatorSearch) -> SourceResult<Vec<Dataflow>> {
        let mut dataflows: Vec<Dataflow> = catalog::search_dataflows(&search.indicator)
            .map(Dataflow::from)
            .collect();
        if let Some(code) = search.category {
            dataflows = restrict_to_category(dataflows, code);
        }
        Ok(dataflows)
    }

    fn data_explorer_url(&self, dataflow_id: &str, filter: Option<&str>) -> String {
        self.sdmx.data_explorer_url(dataflow_id, filter)
    }

    fn categories(&self) -> &'static [Category] {
        &CATEGORIES
    }

    fn popular_datasets(&self) -> &'static [PopularDataset] {
        &POPULAR_DATASETS
    }

    async fn categories_detailed(&self) -> SourceResult<Vec<CategoryDetail>> {
        Ok(CATEGORIES
            .iter()
            .map(|category| CategoryDetail {
                category: *category,
                example_dataflows: category
                    .example_datasets
                    .iter()
                    .filter_map(|id| catalog::find_dataflow(id))
                    .map(Dataflow::from)
                    .collect(),
            })
            .collect())
    }

    fn api_info(&self) -> ApiInfo {
        ApiInfo {
            base_url: format!("{}/", self.sdmx.base_url()),
            format: "SDMX-JSON (Statistical Data and Metadata eXchange)".to_string(),
            authentication: "None required (public API)".to_string(),
            documentation: DOCUMENTATION_URL.to_string(),
            data_explorer: self.sdmx.explorer_url().to_string(),
            endpoints: ApiEndpoints {
                list_dataflows: "/dataflow/OECD".to_string(),
                get_structure: "/dataflow/OECD/{dataflowID}/{version}?references=descendants"
                    .to_string(),
                query_data: "/data/{agency},{dataflowID}/{filter}/?format=jsondata".to_string(),
            },
        }
    }
}
