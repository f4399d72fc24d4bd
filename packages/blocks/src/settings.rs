use serde::{Deserialize, Serialize};

/// Input widget a settings panel uses for a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldKind {
    Text,
    LongText,
    Number {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Boolean,
    Color,
    Url,
    Select { options: Vec<String> },
    /// Editable list of objects (services, slides, form fields)
    List { item_fields: Vec<String> },
}

/// One editable property in a block's settings panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingField {
    pub name: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl SettingField {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn color(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Color)
    }

    pub fn number(name: &str, label: &str, min: Option<f64>, max: Option<f64>) -> Self {
        Self::new(name, label, FieldKind::Number { min, max })
    }

    pub fn select(name: &str, label: &str, options: &[&str]) -> Self {
        Self::new(
            name,
            label,
            FieldKind::Select {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
        )
    }

    pub fn list(name: &str, label: &str, item_fields: &[&str]) -> Self {
        Self::new(
            name,
            label,
            FieldKind::List {
                item_fields: item_fields.iter().map(|f| f.to_string()).collect(),
            },
        )
    }
}
