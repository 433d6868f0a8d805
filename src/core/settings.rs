//! Settings form descriptors
//!
//! Each block type declares the fields its settings editor exposes: where the
//! field lives in the props tree, what widget edits it, and which values are
//! allowed. The editor UI renders these descriptors and turns user input into
//! [`BlockEdit`](super::editor::BlockEdit)s.

use serde::{Deserialize, Serialize};

/// Widget types for UI rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WidgetType {
    /// Single-line text input
    Input,
    /// Multi-line text area
    Textarea,
    /// Numeric input
    Number,
    /// Slider control
    Slider,
    /// Select dropdown
    Select,
    /// Checkbox
    Checkbox,
    /// Color picker
    Color,
    /// URL input
    Url,
    /// Asset picker returning an image URL
    Image,
}

/// Numeric limits for number and slider widgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConstraints {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    /// Unit label
    pub unit: Option<String>,
}

impl FieldConstraints {
    pub fn range(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            step: None,
            unit: None,
        }
    }

    /// Set step size
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    /// Set unit label
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Whether `value` lies inside the limits
    pub fn allows(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// One editable field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Path relative to the form's root (block props, or the list item)
    pub path: Vec<String>,
    pub label: String,
    pub widget: WidgetType,
    /// Allowed values for select widgets
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<FieldConstraints>,
}

/// Editor for a list of identity-bearing items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEditor {
    /// Path of the list relative to the enclosing form
    pub path: Vec<String>,
    pub label: String,
    /// Item field shown as the item's title in the list
    pub title_field: Option<String>,
    /// Whether the editor offers up/down moves
    pub reorderable: bool,
    /// Form for a single item, with item-relative paths
    pub item: SettingsForm,
}

impl ListEditor {
    pub fn new(path: &str, label: &str, item: SettingsForm) -> Self {
        Self {
            path: split(path),
            label: label.to_string(),
            title_field: None,
            reorderable: false,
            item,
        }
    }

    pub fn titled(mut self, field: &str) -> Self {
        self.title_field = Some(field.to_string());
        self
    }

    pub fn reorderable(mut self) -> Self {
        self.reorderable = true;
        self
    }
}

/// Settings form of one block type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsForm {
    pub fields: Vec<FieldDescriptor>,
    pub lists: Vec<ListEditor>,
}

impl SettingsForm {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, path: &str, label: &str, widget: WidgetType) -> Self {
        self.fields.push(FieldDescriptor {
            path: split(path),
            label: label.to_string(),
            widget,
            options: Vec::new(),
            constraints: None,
        });
        self
    }

    pub fn input(self, path: &str, label: &str) -> Self {
        self.push(path, label, WidgetType::Input)
    }

    pub fn textarea(self, path: &str, label: &str) -> Self {
        self.push(path, label, WidgetType::Textarea)
    }

    pub fn checkbox(self, path: &str, label: &str) -> Self {
        self.push(path, label, WidgetType::Checkbox)
    }

    pub fn color(self, path: &str, label: &str) -> Self {
        self.push(path, label, WidgetType::Color)
    }

    pub fn url(self, path: &str, label: &str) -> Self {
        self.push(path, label, WidgetType::Url)
    }

    pub fn image(self, path: &str, label: &str) -> Self {
        self.push(path, label, WidgetType::Image)
    }

    pub fn number(self, path: &str, label: &str, constraints: FieldConstraints) -> Self {
        let mut form = self.push(path, label, WidgetType::Number);
        if let Some(field) = form.fields.last_mut() {
            field.constraints = Some(constraints);
        }
        form
    }

    pub fn slider(self, path: &str, label: &str, constraints: FieldConstraints) -> Self {
        let mut form = self.push(path, label, WidgetType::Slider);
        if let Some(field) = form.fields.last_mut() {
            field.constraints = Some(constraints);
        }
        form
    }

    pub fn select(self, path: &str, label: &str, options: &[&str]) -> Self {
        let mut form = self.push(path, label, WidgetType::Select);
        if let Some(field) = form.fields.last_mut() {
            field.options = options.iter().map(|o| o.to_string()).collect();
        }
        form
    }

    pub fn list(mut self, editor: ListEditor) -> Self {
        self.lists.push(editor);
        self
    }
}

fn split(path: &str) -> Vec<String> {
    path.split('.')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
