//! Typed entries carried by `resume:<type>` blocks.
//!
//! Payloads are YAML. Every entry type tolerates missing fields, and fields
//! that read as strings also accept numbers and booleans, so `start: 2020`
//! works as well as `start: "2020"`.

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_yaml::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub school: String,
    #[serde(deserialize_with = "lenient_option")]
    pub degree: Option<String>,
    #[serde(deserialize_with = "lenient_option")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_option")]
    pub start: Option<String>,
    #[serde(deserialize_with = "lenient_option")]
    pub end: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub company: String,
    #[serde(deserialize_with = "lenient_option", alias = "role", alias = "position")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_option")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_option")]
    pub start: Option<String>,
    #[serde(deserialize_with = "lenient_option")]
    pub end: Option<String>,
    #[serde(deserialize_with = "lenient_option", alias = "summary")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_list", alias = "achievements")]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificationEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_option")]
    pub issuer: Option<String>,
    #[serde(deserialize_with = "lenient_option")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient_option")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(deserialize_with = "lenient_list")]
    pub items: Vec<String>,
    #[serde(deserialize_with = "lenient_option")]
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetencyEntry {
    #[serde(deserialize_with = "lenient_string", alias = "name")]
    pub header: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub language: String,
    #[serde(deserialize_with = "lenient_option", alias = "proficiency")]
    pub level: Option<String>,
}

/// A small grid of cells from a `resume:table` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableBlock {
    #[serde(deserialize_with = "lenient_option")]
    pub caption: Option<String>,
    #[serde(deserialize_with = "lenient_list", alias = "headers")]
    pub columns: Vec<String>,
    #[serde(deserialize_with = "lenient_rows")]
    pub rows: Vec<Vec<String>>,
}

/// Failure to read a block payload.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("expected a mapping or a list of mappings, found {0}")]
    Shape(&'static str),
}

/// Reads a payload holding one entry or a list of entries.
pub fn parse_entries<T: DeserializeOwned>(content: &str) -> Result<Vec<T>, EntryError> {
    let value: Value = serde_yaml::from_str(content)?;
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => items
            .into_iter()
            .map(|item| serde_yaml::from_value(item).map_err(EntryError::from))
            .collect(),
        Value::Mapping(_) => Ok(vec![serde_yaml::from_value(value)?]),
        other => Err(EntryError::Shape(kind_name(&other))),
    }
}

/// Reads a payload holding a single mapping.
pub fn parse_single<T: DeserializeOwned + Default>(content: &str) -> Result<T, EntryError> {
    let value: Value = serde_yaml::from_str(content)?;
    match value {
        Value::Null => Ok(T::default()),
        Value::Mapping(_) => Ok(serde_yaml::from_value(value)?),
        other => Err(EntryError::Shape(kind_name(&other))),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s),
        Value::Tagged(tagged) => scalar_to_string(tagged.value),
        other => serde_yaml::to_string(&other)
            .ok()
            .map(|s| s.trim_end().to_string()),
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(scalar_to_string(Value::deserialize(d)?).unwrap_or_default())
}

fn lenient_option<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(scalar_to_string(Value::deserialize(d)?))
}

/// A list of strings, or a single scalar treated as a one-item list.
fn lenient_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Sequence(items) => items.into_iter().filter_map(scalar_to_string).collect(),
        other => scalar_to_string(other).into_iter().collect(),
    })
}

fn lenient_rows<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Vec<String>>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Sequence(rows) => rows
            .into_iter()
            .map(|row| match row {
                Value::Sequence(cells) => cells
                    .into_iter()
                    .map(|c| scalar_to_string(c).unwrap_or_default())
                    .collect(),
                other => scalar_to_string(other).into_iter().collect(),
            })
            .collect(),
        _ => Vec::new(),
    })
}
