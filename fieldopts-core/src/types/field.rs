use crate::types::DynamicBinding;

pub type FieldId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Static,
    Dynamic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    #[default]
    Text,
    Textarea,
    Number,
    Boolean,
    Date,
    Select,
    MultiSelect,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub id: FieldId,
    pub label: String,
    pub field_type: FieldType,
    pub required: bool,
    pub help_text: Option<String>,
    pub placeholder: Option<String>,
    pub default_value: Option<serde_json::Value>,
    /// Present only on dynamic fields.
    pub binding: Option<DynamicBinding>,
}

impl Field {
    pub fn kind(&self) -> FieldKind {
        if self.binding.is_some() {
            FieldKind::Dynamic
        } else {
            FieldKind::Static
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.binding.is_some()
    }

    /// Ids this field declares through `dependsOn` and `refreshOn`.
    pub fn triggers(&self) -> Vec<&str> {
        self.binding
            .as_ref()
            .map(|b| b.triggers().collect())
            .unwrap_or_default()
    }
}
