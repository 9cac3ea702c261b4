use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{HukukError, Result};

/// Element holding the selected template name
pub const TEMPLATE_FIELD: &str = "templateSelect";
/// Element holding the selected case category
pub const CATEGORY_FIELD: &str = "categorySelect";
/// Element holding the free-text case description
pub const DESCRIPTION_FIELD: &str = "caseDescription";

/// Values read from the document form for one submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    pub template_name: String,
    pub category: String,
    pub description: String,
    pub template_data: BTreeMap<String, String>,
}

/// Kind of form element found in a template container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Input,
    Textarea,
    Select,
    Button,
}

impl FieldKind {
    /// Whether the element carries a user-entered value
    pub fn holds_value(&self) -> bool {
        !matches!(self, Self::Button)
    }
}

/// One element inside a template field container
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldElement {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub kind: FieldKind,
}

impl FieldElement {
    pub fn new(id: impl Into<String>, value: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            kind,
        }
    }
}

/// Read access to the current state of a document form
pub trait FormSource {
    /// Current value of the element with the given id
    fn value_of(&self, element_id: &str) -> Option<String>;

    /// Elements inside the container with the given id, in document order
    fn fields_in(&self, container_id: &str) -> Option<Vec<FieldElement>>;
}

/// Container id holding the fields of a template
pub fn container_id(template_name: &str) -> String {
    format!("{}Fields", template_name)
}

/// Collect template specific values keyed by logical field name.
///
/// Ids ending in `_<template>` lose that suffix; other ids are used as-is.
pub fn collect_template_data(source: &dyn FormSource, template_name: &str) -> BTreeMap<String, String> {
    let mut data = BTreeMap::new();
    if template_name.is_empty() {
        return data;
    }

    let suffix = format!("_{}", template_name);
    for field in source.fields_in(&container_id(template_name)).unwrap_or_default() {
        if !field.kind.holds_value() || field.id.is_empty() {
            continue;
        }
        let name = field
            .id
            .strip_suffix(&suffix)
            .filter(|stripped| !stripped.is_empty())
            .unwrap_or(&field.id);
        data.insert(name.to_string(), field.value);
    }
    data
}

/// Read the whole form, without validating it
pub fn read_form(source: &dyn FormSource) -> FormInput {
    let template_name = source.value_of(TEMPLATE_FIELD).unwrap_or_default();
    let template_data = collect_template_data(source, &template_name);
    FormInput {
        category: source.value_of(CATEGORY_FIELD).unwrap_or_default(),
        description: source.value_of(DESCRIPTION_FIELD).unwrap_or_default(),
        template_name,
        template_data,
    }
}

/// Check that the required fields are present
pub fn validate(input: FormInput) -> Result<FormInput> {
    let required = [
        ("template_name", &input.template_name),
        ("category", &input.category),
        ("description", &input.description),
    ];
    if let Some((name, _)) = required.iter().find(|(_, value)| value.is_empty()) {
        return Err(HukukError::MissingField(name.to_string()));
    }
    Ok(input)
}

/// In-memory form snapshot, loadable from YAML or JSON
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticForm {
    /// Top level element values keyed by element id
    #[serde(default)]
    pub values: BTreeMap<String, String>,
    /// Field containers keyed by container id
    #[serde(default)]
    pub containers: BTreeMap<String, Vec<FieldElement>>,
}

impl StaticForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot; `.json` files are read as JSON, everything else as YAML
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            Ok(serde_json::from_str(&contents)?)
        } else {
            serde_yaml::from_str(&contents).map_err(|e| {
                HukukError::InvalidInput(format!("Failed to parse form file {}: {}", path.display(), e))
            })
        }
    }

    pub fn set_value(&mut self, element_id: &str, value: impl Into<String>) {
        self.values.insert(element_id.to_string(), value.into());
    }

    pub fn with_value(mut self, element_id: &str, value: impl Into<String>) -> Self {
        self.set_value(element_id, value);
        self
    }

    /// Add or replace an element inside a container
    pub fn set_field(&mut self, container_id: &str, field: FieldElement) {
        let fields = self.containers.entry(container_id.to_string()).or_default();
        match fields.iter_mut().find(|existing| existing.id == field.id) {
            Some(existing) => *existing = field,
            None => fields.push(field),
        }
    }

    pub fn with_field(mut self, container_id: &str, field: FieldElement) -> Self {
        self.set_field(container_id, field);
        self
    }
}

impl FormSource for StaticForm {
    fn value_of(&self, element_id: &str) -> Option<String> {
        self.values.get(element_id).cloned()
    }

    fn fields_in(&self, container_id: &str) -> Option<Vec<FieldElement>> {
        self.containers.get(container_id).cloned()
    }
}
