//! Read-only MCP resources backed by the static catalogs.

use oecd_core::StatisticsSource;
use rmcp::ErrorData;
use rmcp::model::{
    AnnotateAble,
    ErrorCode,
    RawResource,
    ReadResourceResult,
    Resource,
    ResourceContents,
};
use serde::Serialize;

use crate::helpers::mcp_err;

pub const CATEGORIES_URI: &str = "oecd://categories";
pub const POPULAR_DATAFLOWS_URI: &str = "oecd://dataflows/popular";
pub const API_INFO_URI: &str = "oecd://api/info";

const JSON_MIME: &str = "application/json";

const RESOURCES: [(&str, &str, &str); 3] = [
    (
        CATEGORIES_URI,
        "OECD Data Categories",
        "List of all 17 OECD data categories",
    ),
    (
        POPULAR_DATAFLOWS_URI,
        "Popular OECD Datasets",
        "Commonly used OECD datasets",
    ),
    (
        API_INFO_URI,
        "OECD API Information",
        "Information about the OECD SDMX API",
    ),
];

/// Resource descriptors advertised in `resources/list`.
#[must_use]
pub fn list_resources() -> Vec<Resource> {
    RESOURCES
        .iter()
        .map(|(uri, name, description)| {
            let mut resource = RawResource::new(*uri, *name);
            resource.description = Some((*description).to_string());
            resource.mime_type = Some(JSON_MIME.to_string());
            resource.no_annotation()
        })
        .collect()
}

/// Renders the resource at `uri` as pretty-printed JSON.
///
/// # Errors
/// Returns a resource-not-found error for unknown URIs.
pub fn read_resource(
    source: &dyn StatisticsSource,
    uri: &str,
) -> Result<ReadResourceResult, ErrorData> {
    let text = match uri {
        CATEGORIES_URI => to_json(source.categories())?,
        POPULAR_DATAFLOWS_URI => to_json(source.popular_datasets())?,
        API_INFO_URI => to_json(&source.api_info())?,
        _ => {
            return Err(mcp_err(
                ErrorCode::RESOURCE_NOT_FOUND,
                format!("Unknown resource: {uri}"),
            ));
        }
    };
    Ok(ReadResourceResult {
        contents: vec![ResourceContents::text(text, uri)],
    })
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ErrorData> {
    serde_json::to_string_pretty(value)
        .map_err(|err| mcp_err(ErrorCode::INTERNAL_ERROR, err.to_string()))
}
