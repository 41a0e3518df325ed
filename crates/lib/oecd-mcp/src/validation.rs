//! Declarative input validation for tool arguments.
//!
//! Each tool declares a [`Schema`]: an ordered list of [`Field`]s, each with a
//! presence rule and one [`Constraint`]. [`validate`] checks raw arguments
//! against the schema, collecting every violation instead of stopping at the
//! first, and returns the checked object with defaults applied.
//! [`parse_args`] additionally decodes that object into a typed parameter
//! struct.

use std::fmt;

use regex::Regex;
use rmcp::model::JsonObject;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ToolError;

/// Bound paired with the message reported when it is violated.
#[derive(Debug, Clone, Copy)]
pub struct Limit<T> {
    pub value: T,
    pub message: &'static str,
}

impl<T> Limit<T> {
    pub const fn new(value: T, message: &'static str) -> Self {
        Self { value, message }
    }
}

/// Regular-expression check; the regex is resolved lazily.
#[derive(Debug, Clone, Copy)]
pub struct Pattern {
    pub regex: fn() -> &'static Regex,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct TextRules {
    pub min_len: Option<Limit<usize>>,
    pub max_len: Option<Limit<usize>>,
    pub pattern: Option<Pattern>,
}

#[derive(Debug, Clone, Copy)]
pub struct NumberRules {
    /// Message reported for values with a fractional part; `None` allows them.
    pub integer: Option<&'static str>,
    pub min: Option<Limit<f64>>,
    pub max: Option<Limit<f64>>,
}

#[derive(Debug, Clone, Copy)]
pub struct ChoiceRules {
    pub values: &'static [&'static str],
}

/// Constraint kinds understood by the validator.
#[derive(Debug, Clone, Copy)]
pub enum Constraint {
    Text(TextRules),
    Number(NumberRules),
    Choice(ChoiceRules),
}

/// Value substituted for an absent optional field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Integer(i64),
}

impl DefaultValue {
    fn to_value(self) -> Value {
        let Self::Integer(value) = self;
        Value::from(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    Default(DefaultValue),
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub description: &'static str,
    pub presence: Presence,
    pub constraint: Constraint,
}

/// Ordered field declarations for one tool.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub fields: &'static [Field],
    /// Closed schemas reject keys they do not declare.
    pub closed: bool,
}

impl Schema {
    #[must_use]
    pub const fn open(fields: &'static [Field]) -> Self {
        Self {
            fields,
            closed: false,
        }
    }

    #[must_use]
    pub const fn closed(fields: &'static [Field]) -> Self {
        Self {
            fields,
            closed: true,
        }
    }

    /// Renders the schema as a JSON Schema object for tool advertisement.
    #[must_use]
    pub fn to_json_schema(&self) -> JsonObject {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for field in self.fields {
            properties.insert(field.name.to_string(), Value::Object(field.json_schema()));
            if field.presence == Presence::Required {
                required.push(Value::from(field.name));
            }
        }

        let mut schema = Map::new();
        schema.insert("type".to_string(), Value::from("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::Array(required));
        }
        if self.closed {
            schema.insert("additionalProperties".to_string(), Value::Bool(false));
        }
        schema
    }
}

impl Field {
    fn json_schema(&self) -> JsonObject {
        let mut property = Map::new();
        match &self.constraint {
            Constraint::Text(rules) => {
                property.insert("type".to_string(), Value::from("string"));
                if let Some(min) = rules.min_len {
                    property.insert("minLength".to_string(), Value::from(min.value));
                }
                if let Some(max) = rules.max_len {
                    property.insert("maxLength".to_string(), Value::from(max.value));
                }
                if let Some(pattern) = rules.pattern {
                    property.insert("pattern".to_string(), Value::from((pattern.regex)().as_str()));
                }
            }
            Constraint::Number(rules) => {
                let kind = if rules.integer.is_some() { "integer" } else { "number" };
                property.insert("type".to_string(), Value::from(kind));
                if let Some(min) = rules.min {
                    property.insert("minimum".to_string(), number_value(min.value));
                }
                if let Some(max) = rules.max {
                    property.insert("maximum".to_string(), number_value(max.value));
                }
            }
            Constraint::Choice(rules) => {
                property.insert("type".to_string(), Value::from("string"));
                property.insert(
                    "enum".to_string(),
                    Value::Array(rules.values.iter().map(|value| Value::from(*value)).collect()),
                );
            }
        }
        property.insert("description".to_string(), Value::from(self.description));
        if let Presence::Default(default) = self.presence {
            property.insert("default".to_string(), default.to_value());
        }
        property
    }
}

/// A single violation, addressed by field path (empty for the whole object).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub path: String,
    pub message: String,
}

impl FieldIssue {
    fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Every violation found while validating one tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub tool: String,
    pub issues: Vec<FieldIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid input for tool \"{}\": ", self.tool)?;
        for (index, issue) in self.issues.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Checks `raw` against `schema`.
///
/// Returns the declared fields that are present, with defaults filled in.
///
/// # Errors
/// Returns a `ValidationError` listing every violation, in schema order.
pub fn validate(schema: &Schema, tool: &str, raw: &Value) -> Result<JsonObject, ValidationError> {
    let fail = |issues| ValidationError {
        tool: tool.to_string(),
        issues,
    };
    let Value::Object(input) = raw else {
        return Err(fail(vec![FieldIssue::new(
            "",
            format!("Expected object, received {}", type_name(raw)),
        )]));
    };

    let mut issues = Vec::new();
    let mut checked = Map::new();
    for field in schema.fields {
        match input.get(field.name) {
            Some(value) => {
                if let Some(value) = check_field(field, value, &mut issues) {
                    checked.insert(field.name.to_string(), value);
                }
            }
            None => match field.presence {
                Presence::Required => issues.push(FieldIssue::new(field.name, "Required")),
                Presence::Optional => {}
                Presence::Default(default) => {
                    checked.insert(field.name.to_string(), default.to_value());
                }
            },
        }
    }

    if schema.closed {
        let unknown: Vec<String> = input
            .keys()
            .filter(|key| !schema.fields.iter().any(|field| field.name == key.as_str()))
            .map(|key| format!("'{key}'"))
            .collect();
        if !unknown.is_empty() {
            issues.push(FieldIssue::new(
                "",
                format!("Unrecognized key(s) in object: {}", unknown.join(", ")),
            ));
        }
    }

    if issues.is_empty() {
        Ok(checked)
    } else {
        Err(fail(issues))
    }
}

/// Validates `raw` and decodes the checked object into `T`.
///
/// # Errors
/// Returns `ToolError::Validation` for constraint violations and
/// `ToolError::Decode` if the checked object does not fit `T`.
pub fn parse_args<T: DeserializeOwned>(
    schema: &Schema,
    tool: &str,
    raw: &Value,
) -> Result<T, ToolError> {
    let checked = validate(schema, tool, raw)?;
    Ok(serde_json::from_value(Value::Object(checked))?)
}

/// Checks one present field; returns the normalized value when it passes.
fn check_field(field: &Field, value: &Value, issues: &mut Vec<FieldIssue>) -> Option<Value> {
    let before = issues.len();
    let normalized = match &field.constraint {
        Constraint::Text(rules) => {
            let Value::String(text) = value else {
                issues.push(type_mismatch(field, "string", value));
                return None;
            };
            check_text(field, rules, text, issues);
            value.clone()
        }
        Constraint::Choice(rules) => {
            let Value::String(text) = value else {
                issues.push(type_mismatch(field, "string", value));
                return None;
            };
            if !rules.values.contains(&text.as_str()) {
                let expected: Vec<String> =
                    rules.values.iter().map(|value| format!("'{value}'")).collect();
                issues.push(FieldIssue::new(
                    field.name,
                    format!(
                        "Invalid enum value. Expected {}, received '{text}'",
                        expected.join(" | ")
                    ),
                ));
            }
            value.clone()
        }
        Constraint::Number(rules) => {
            let Some(number) = value.as_f64() else {
                issues.push(type_mismatch(field, "number", value));
                return None;
            };
            check_number(field, rules, number, issues);
            normalize_number(rules, value, number)
        }
    };
    (issues.len() == before).then_some(normalized)
}

fn check_text(field: &Field, rules: &TextRules, text: &str, issues: &mut Vec<FieldIssue>) {
    let length = text.encode_utf16().count();
    if let Some(min) = rules.min_len
        && length < min.value
    {
        issues.push(FieldIssue::new(field.name, min.message));
    }
    if let Some(max) = rules.max_len
        && length > max.value
    {
        issues.push(FieldIssue::new(field.name, max.message));
    }
    if let Some(pattern) = rules.pattern
        && !(pattern.regex)().is_match(text)
    {
        issues.push(FieldIssue::new(field.name, pattern.message));
    }
}

fn check_number(field: &Field, rules: &NumberRules, number: f64, issues: &mut Vec<FieldIssue>) {
    if let Some(message) = rules.integer
        && number.fract() != 0.0
    {
        issues.push(FieldIssue::new(field.name, message));
    }
    if let Some(min) = rules.min
        && number < min.value
    {
        issues.push(FieldIssue::new(field.name, min.message));
    }
    if let Some(max) = rules.max
        && number > max.value
    {
        issues.push(FieldIssue::new(field.name, max.message));
    }
}

/// Integer fields given as whole floats (`10.0`) are stored as integers so
/// they decode into integer parameter types.
#[allow(clippy::cast_possible_truncation)]
fn normalize_number(rules: &NumberRules, value: &Value, number: f64) -> Value {
    if rules.integer.is_some() && value.is_f64() {
        Value::from(number as i64)
    } else {
        value.clone()
    }
}

fn number_value(value: f64) -> Value {
    serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
}

fn type_mismatch(field: &Field, expected: &str, value: &Value) -> FieldIssue {
    FieldIssue::new(
        field.name,
        format!("Expected {expected}, received {}", type_name(value)),
    )
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use serde_json::json;

    use super::*;

    fn code_pattern() -> &'static Regex {
        static CODE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new("^[A-Z]+$").expect("valid test pattern"));
        &CODE
    }

    static FIELDS: [Field; 3] = [
        Field {
            name: "code",
            description: "Uppercase code",
            presence: Presence::Required,
            constraint: Constraint::Text(TextRules {
                min_len: Some(Limit::new(1, "Code must not be empty")),
                max_len: Some(Limit::new(5, "Code must not exceed 5 characters")),
                pattern: Some(Pattern {
                    regex: code_pattern,
                    message: "Code must be uppercase",
                }),
            }),
        },
        Field {
            name: "count",
            description: "How many",
            presence: Presence::Default(DefaultValue::Integer(10)),
            constraint: Constraint::Number(NumberRules {
                integer: Some("Count must be an integer"),
                min: Some(Limit::new(1.0, "Count must be at least 1")),
                max: Some(Limit::new(50.0, "Count cannot exceed 50")),
            }),
        },
        Field {
            name: "colour",
            description: "Colour",
            presence: Presence::Optional,
            constraint: Constraint::Choice(ChoiceRules {
                values: &["RED", "BLUE"],
            }),
        },
    ];

    static OPEN: Schema = Schema::open(&FIELDS);
    static CLOSED: Schema = Schema::closed(&FIELDS);

    fn message(result: Result<JsonObject, ValidationError>) -> String {
        result.expect_err("validation should fail").to_string()
    }

    #[test]
    fn applies_defaults_and_leaves_optionals_absent() {
        let checked = validate(&OPEN, "demo", &json!({ "code": "ABC" })).expect("valid input");
        assert_eq!(checked.get("count"), Some(&json!(10)));
        assert!(!checked.contains_key("colour"));
    }

    #[test]
    fn reports_every_field_in_schema_order() {
        let err = message(validate(
            &OPEN,
            "demo",
            &json!({ "code": "abcdef", "count": 0.5, "colour": "GREEN" }),
        ));
        assert_eq!(
            err,
            "Invalid input for tool \"demo\": code: Code must not exceed 5 characters; \
             code: Code must be uppercase; count: Count must be an integer; \
             count: Count must be at least 1; \
             colour: Invalid enum value. Expected 'RED' | 'BLUE', received 'GREEN'"
        );
    }

    #[test]
    fn passing_fields_contribute_nothing() {
        let err = message(validate(&OPEN, "demo", &json!({ "code": "ABC", "count": 99 })));
        assert_eq!(err, "Invalid input for tool \"demo\": count: Count cannot exceed 50");
    }

    #[test]
    fn missing_required_field_is_reported() {
        let err = message(validate(&OPEN, "demo", &json!({})));
        assert_eq!(err, "Invalid input for tool \"demo\": code: Required");
    }

    #[test]
    fn wrong_types_and_null_are_rejected() {
        let err = message(validate(&OPEN, "demo", &json!({ "code": 5, "count": "3" })));
        assert_eq!(
            err,
            "Invalid input for tool \"demo\": code: Expected string, received number; \
             count: Expected number, received string"
        );
        let err = message(validate(&OPEN, "demo", &json!({ "code": "ABC", "colour": null })));
        assert!(err.ends_with("colour: Expected string, received null"));
    }

    #[test]
    fn non_object_input_is_rejected() {
        let err = message(validate(&OPEN, "demo", &json!(["code"])));
        assert_eq!(err, "Invalid input for tool \"demo\": Expected object, received array");
    }

    #[test]
    fn open_schemas_ignore_unknown_keys_closed_ones_reject_them() {
        let input = json!({ "code": "ABC", "extra": 1, "other": true });
        let checked = validate(&OPEN, "demo", &input).expect("open schema accepts extras");
        assert!(!checked.contains_key("extra"));

        let err = message(validate(&CLOSED, "demo", &input));
        assert_eq!(
            err,
            "Invalid input for tool \"demo\": Unrecognized key(s) in object: 'extra', 'other'"
        );
    }

    #[test]
    fn whole_floats_are_normalized_for_integer_fields() {
        let checked =
            validate(&OPEN, "demo", &json!({ "code": "ABC", "count": 7.0 })).expect("valid input");
        assert_eq!(checked.get("count"), Some(&json!(7)));
    }

    #[test]
    fn lengths_count_utf16_units() {
        let err = message(validate(&OPEN, "demo", &json!({ "code": "ÄÖÜ" })));
        assert_eq!(err, "Invalid input for tool \"demo\": code: Code must be uppercase");

        // Three astral-plane characters are six UTF-16 units.
        let err = message(validate(&OPEN, "demo", &json!({ "code": "😀😀😀" })));
        assert_eq!(
            err,
            "Invalid input for tool \"demo\": code: Code must not exceed 5 characters; \
             code: Code must be uppercase"
        );
    }

    #[test]
    fn json_schema_lists_required_fields_and_bounds() {
        let schema = OPEN.to_json_schema();
        assert_eq!(schema.get("required"), Some(&json!(["code"])));
        assert_eq!(schema["properties"]["code"]["maxLength"], json!(5));
        assert_eq!(schema["properties"]["code"]["pattern"], json!("^[A-Z]+$"));
        assert_eq!(schema["properties"]["count"]["type"], json!("integer"));
        assert_eq!(schema["properties"]["count"]["default"], json!(10));
        assert_eq!(schema["properties"]["colour"]["enum"], json!(["RED", "BLUE"]));
        assert!(schema.get("additionalProperties").is_none());
        assert_eq!(
            CLOSED.to_json_schema().get("additionalProperties"),
            Some(&json!(false))
        );
    }

    #[derive(Debug, serde::Deserialize)]
    struct Wrong {
        #[allow(dead_code)]
        missing: String,
    }

    #[test]
    fn decode_failures_are_not_validation_faults() {
        let err = parse_args::<Wrong>(&OPEN, "demo", &json!({ "code": "ABC" }))
            .expect_err("decode should fail");
        assert!(matches!(err, ToolError::Decode(_)));
    }
}
