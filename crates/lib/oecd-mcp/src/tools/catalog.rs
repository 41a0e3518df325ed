use futures::future::BoxFuture;
use oecd_core::StatisticsSource;
use serde_json::Value;

use super::{NO_ARGUMENTS, ToolResult, json_result};
use crate::validation::validate;

pub(super) const GET_CATEGORIES: &str = "get_categories";
pub(super) const GET_POPULAR_DATASETS: &str = "get_popular_datasets";
pub(super) const LIST_CATEGORIES_DETAILED: &str = "list_categories_detailed";

pub(super) fn get_categories(
    source: &dyn StatisticsSource,
    args: Value,
) -> BoxFuture<'_, ToolResult> {
    Box::pin(async move {
        validate(&NO_ARGUMENTS, GET_CATEGORIES, &args)?;
        json_result(source.categories())
    })
}

pub(super) fn get_popular_datasets(
    source: &dyn StatisticsSource,
    args: Value,
) -> BoxFuture<'_, ToolResult> {
    Box::pin(async move {
        validate(&NO_ARGUMENTS, GET_POPULAR_DATASETS, &args)?;
        json_result(source.popular_datasets())
    })
}

pub(super) fn list_categories_detailed(
    source: &dyn StatisticsSource,
    args: Value,
) -> BoxFuture<'_, ToolResult> {
    Box::pin(async move {
        validate(&NO_ARGUMENTS, LIST_CATEGORIES_DETAILED, &args)?;
        let detailed = source.categories_detailed().await?;
        json_result(&detailed)
    })
}
