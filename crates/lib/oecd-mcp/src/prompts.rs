//! Guided-analysis MCP prompts.
//!
//! Each prompt renders a single user message that walks the model through the
//! tool workflow for one kind of question.

use rmcp::ErrorData;
use rmcp::model::{
    ErrorCode,
    GetPromptResult,
    JsonObject,
    Prompt,
    PromptArgument,
    PromptMessage,
    PromptMessageRole,
};
use serde_json::Value;

use crate::helpers::mcp_err;

pub const ANALYZE_ECONOMIC_TREND: &str = "analyze_economic_trend";
pub const COMPARE_COUNTRIES: &str = "compare_countries";
pub const GET_LATEST_STATISTICS: &str = "get_latest_statistics";

struct ArgumentSpec {
    name: &'static str,
    description: &'static str,
    required: bool,
}

struct PromptSpec {
    name: &'static str,
    description: &'static str,
    arguments: &'static [ArgumentSpec],
    render: fn(&PromptArguments<'_>) -> String,
}

static PROMPTS: [PromptSpec; 3] = [
    PromptSpec {
        name: ANALYZE_ECONOMIC_TREND,
        description: "Analyze economic indicators over time for specified countries",
        arguments: &[
            ArgumentSpec {
                name: "indicator",
                description: "Economic indicator to analyze (e.g., \"GDP\", \"inflation\", \"unemployment\")",
                required: true,
            },
            ArgumentSpec {
                name: "countries",
                description: "Comma-separated list of country codes (e.g., \"USA,GBR,DEU\")",
                required: true,
            },
            ArgumentSpec {
                name: "time_period",
                description: "Time period for analysis (e.g., \"2020-2023\")",
                required: false,
            },
        ],
        render: render_economic_trend,
    },
    PromptSpec {
        name: COMPARE_COUNTRIES,
        description: "Compare data across multiple countries for a specific indicator",
        arguments: &[
            ArgumentSpec {
                name: "indicator",
                description: "Indicator to compare (e.g., \"GDP per capita\", \"life expectancy\")",
                required: true,
            },
            ArgumentSpec {
                name: "countries",
                description: "Comma-separated list of countries to compare",
                required: true,
            },
            ArgumentSpec {
                name: "year",
                description: "Year for comparison (optional)",
                required: false,
            },
        ],
        render: render_country_comparison,
    },
    PromptSpec {
        name: GET_LATEST_STATISTICS,
        description: "Get the most recent statistics for a specific topic",
        arguments: &[
            ArgumentSpec {
                name: "topic",
                description: "Topic to get statistics for (e.g., \"unemployment\", \"inflation\", \"GDP growth\")",
                required: true,
            },
            ArgumentSpec {
                name: "country",
                description: "Country code (optional, returns data for all countries if not specified)",
                required: false,
            },
        ],
        render: render_latest_statistics,
    },
];

/// Caller-supplied prompt arguments; empty strings and nulls count as absent.
struct PromptArguments<'a>(Option<&'a JsonObject>);

impl PromptArguments<'_> {
    fn get(&self, name: &str) -> Option<String> {
        match self.0?.get(name)? {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }

    /// Required arguments are checked before rendering, so absence renders empty.
    fn required(&self, name: &str) -> String {
        self.get(name).unwrap_or_default()
    }
}

fn render_economic_trend(args: &PromptArguments<'_>) -> String {
    let indicator = args.required("indicator");
    let countries = args.required("countries");
    let period = args
        .get("time_period")
        .map_or_else(String::new, |period| format!(" during {period}"));
    format!(
        "Analyze the {indicator} trend for {countries}{period}.\n\n\
         Steps:\n\
         1. Search for relevant OECD datasets containing {indicator} data\n\
         2. Get the data structure to understand available dimensions\n\
         3. Query the data for the specified countries and time period\n\
         4. Analyze trends, compare countries, and highlight key insights\n\
         5. Provide a summary with visualizable data if possible"
    )
}

fn render_country_comparison(args: &PromptArguments<'_>) -> String {
    let indicator = args.required("indicator");
    let countries = args.required("countries");
    let year = args
        .get("year")
        .map_or_else(String::new, |year| format!(" for the year {year}"));
    format!(
        "Compare {indicator} across {countries}{year}.\n\n\
         Steps:\n\
         1. Search for OECD datasets containing {indicator}\n\
         2. Query data for all specified countries\n\
         3. Compare values and rankings\n\
         4. Highlight differences and similarities\n\
         5. Provide context about what the differences might indicate"
    )
}

fn render_latest_statistics(args: &PromptArguments<'_>) -> String {
    let topic = args.required("topic");
    let scope = args.get("country").map_or_else(
        || " for all OECD countries".to_string(),
        |country| format!(" for {country}"),
    );
    format!(
        "Get the latest {topic} statistics{scope}.\n\n\
         Steps:\n\
         1. Search for datasets related to {topic}\n\
         2. Identify the most relevant and recent dataset\n\
         3. Query the latest available data\n\
         4. Present key statistics and recent trends\n\
         5. Highlight any notable changes or patterns"
    )
}

/// Prompt descriptors advertised in `prompts/list`.
#[must_use]
pub fn list_prompts() -> Vec<Prompt> {
    PROMPTS
        .iter()
        .map(|spec| {
            let arguments = spec
                .arguments
                .iter()
                .map(|arg| PromptArgument {
                    name: arg.name.to_string(),
                    title: None,
                    description: Some(arg.description.to_string()),
                    required: Some(arg.required),
                })
                .collect();
            Prompt::new(spec.name, Some(spec.description), Some(arguments))
        })
        .collect()
}

/// Renders the prompt `name` with the caller's arguments.
///
/// # Errors
/// Returns an invalid-params error for unknown prompts and for missing
/// required arguments.
pub fn get_prompt(
    name: &str,
    arguments: Option<&JsonObject>,
) -> Result<GetPromptResult, ErrorData> {
    let spec = PROMPTS
        .iter()
        .find(|spec| spec.name == name)
        .ok_or_else(|| mcp_err(ErrorCode::INVALID_PARAMS, format!("Unknown prompt: {name}")))?;

    let args = PromptArguments(arguments);
    let missing: Vec<&str> = spec
        .arguments
        .iter()
        .filter(|arg| arg.required && args.get(arg.name).is_none())
        .map(|arg| arg.name)
        .collect();
    if !missing.is_empty() {
        return Err(mcp_err(
            ErrorCode::INVALID_PARAMS,
            format!(
                "Prompt '{name}' is missing required arguments: {}",
                missing.join(", ")
            ),
        ));
    }

    Ok(GetPromptResult {
        description: Some(spec.description.to_string()),
        messages: vec![PromptMessage::new_text(
            PromptMessageRole::User,
            (spec.render)(&args),
        )],
    })
}
