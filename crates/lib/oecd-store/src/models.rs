use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Dataflow summary as returned by list and search operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dataflow {
    pub id: String,
    pub version: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "agencyID")]
    pub agency_id: String,
}

/// Curated dataflow entry with the routing details the SDMX API needs.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KnownDataflow {
    pub id: &'static str,
    /// Full SDMX identifier in `DSD_ID@DF_ID` form.
    pub full_id: &'static str,
    pub agency: &'static str,
    pub version: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: CategoryCode,
}

impl KnownDataflow {
    /// Returns true when the id, name, or description contains `needle`.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches_keyword(&self, needle: &str) -> bool {
        self.id.to_lowercase().contains(needle)
            || self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

impl From<&KnownDataflow> for Dataflow {
    fn from(known: &KnownDataflow) -> Self {
        Self {
            id: known.id.to_string(),
            version: known.version.to_string(),
            name: known.name.to_string(),
            description: Some(known.description.to_string()),
            agency_id: known.agency.to_string(),
        }
    }
}

/// One selectable value of a dimension.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DimensionValue {
    pub id: String,
    pub name: String,
}

/// Dimension of a dataflow's data structure definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dimension {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub values: Vec<DimensionValue>,
}

/// Attribute attached to observations of a dataflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StructureAttribute {
    pub id: String,
    pub name: String,
}

/// Structure metadata for a dataflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DataStructure {
    pub dataflow_id: String,
    pub dimensions: Vec<Dimension>,
    pub attributes: Vec<StructureAttribute>,
}

/// A single data point in a queried time series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub dimensions: BTreeMap<String, String>,
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, String>>,
}

/// Closed set of OECD topic category codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum CategoryCode {
    Eco,
    Hea,
    Edu,
    Env,
    Trd,
    Job,
    Nrg,
    Agr,
    Gov,
    Soc,
    Dev,
    Sti,
    Tax,
    Fin,
    Tra,
    Ind,
    Reg,
}

impl CategoryCode {
    pub const ALL: [Self; 17] = [
        Self::Eco,
        Self::Hea,
        Self::Edu,
        Self::Env,
        Self::Trd,
        Self::Job,
        Self::Nrg,
        Self::Agr,
        Self::Gov,
        Self::Soc,
        Self::Dev,
        Self::Sti,
        Self::Tax,
        Self::Fin,
        Self::Tra,
        Self::Ind,
        Self::Reg,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eco => "ECO",
            Self::Hea => "HEA",
            Self::Edu => "EDU",
            Self::Env => "ENV",
            Self::Trd => "TRD",
            Self::Job => "JOB",
            Self::Nrg => "NRG",
            Self::Agr => "AGR",
            Self::Gov => "GOV",
            Self::Soc => "SOC",
            Self::Dev => "DEV",
            Self::Sti => "STI",
            Self::Tax => "TAX",
            Self::Fin => "FIN",
            Self::Tra => "TRA",
            Self::Ind => "IND",
            Self::Reg => "REG",
        }
    }
}

impl fmt::Display for CategoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Topic category with the dataflows that illustrate it.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryCode,
    pub name: &'static str,
    pub description: &'static str,
    pub example_datasets: &'static [&'static str],
}

/// Category together with the example dataflows that resolve in the catalog.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
    pub category: Category,
    pub example_dataflows: Vec<Dataflow>,
}

/// Commonly requested dataset, including ones not reachable through SDMX.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PopularDataset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: CategoryCode,
}

/// Endpoint templates of the SDMX query API.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiEndpoints {
    pub list_dataflows: String,
    pub get_structure: String,
    pub query_data: String,
}

/// Description of the remote statistics API.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiInfo {
    pub base_url: String,
    pub format: String,
    pub authentication: String,
    pub documentation: String,
    pub data_explorer: String,
    pub endpoints: ApiEndpoints,
}

/// Category and limit filter for dataflow listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataflowFilter {
    pub category: Option<CategoryCode>,
    pub limit: Option<usize>,
}

/// Parameters of a time-series query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataQuery {
    pub dataflow_id: String,
    pub filter: Option<String>,
    pub start_period: Option<String>,
    pub end_period: Option<String>,
    pub last_n_observations: Option<u32>,
}

/// Keyword search over indicators, optionally scoped to a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorSearch {
    pub indicator: String,
    pub category: Option<CategoryCode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_codes_round_trip_through_wire_strings() {
        for code in CategoryCode::ALL {
            let wire = serde_json::to_value(code).expect("serialize code");
            assert_eq!(wire, Value::String(code.as_str().to_string()));
            assert_eq!(serde_json::from_value::<CategoryCode>(wire).ok(), Some(code));
        }
        assert!(serde_json::from_value::<CategoryCode>(Value::from("eco")).is_err());
    }

    #[test]
    fn dataflow_serializes_agency_id_key() {
        let dataflow = Dataflow {
            id: "QNA".to_string(),
            version: "1.0".to_string(),
            name: "Quarterly National Accounts".to_string(),
            description: None,
            agency_id: "OECD.SDD.NAD".to_string(),
        };
        let value = serde_json::to_value(&dataflow).expect("serialize dataflow");
        assert_eq!(value["agencyID"], "OECD.SDD.NAD");
        assert!(value.get("description").is_none());
    }
}
