use serde_json::{Map, Value};

/// One selectable value. Extra keys are carried through to the form layer as-is.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OptionItem {
    pub id: String,
    pub label: String,
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

impl OptionItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            extra: Map::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Builds an item out of a JSON record returned by a vendor API.
    ///
    /// Ids may be strings or numbers; labels fall back to the id when the label key is absent.
    pub fn from_record(record: &Value, mapping: &RecordMapping) -> Result<Self, String> {
        let obj = record
            .as_object()
            .ok_or_else(|| format!("expected an object record, got {}", kind_of(record)))?;
        let id = obj
            .get(&mapping.id_key)
            .and_then(scalar_to_string)
            .ok_or_else(|| format!("record has no usable `{}` key", mapping.id_key))?;
        let label = obj
            .get(&mapping.label_key)
            .and_then(scalar_to_string)
            .unwrap_or_else(|| id.clone());

        let mut item = Self::new(id, label);
        for key in &mapping.extra_keys {
            if let Some(v) = obj.get(key) {
                item.extra.insert(key.clone(), v.clone());
            }
        }
        Ok(item)
    }
}

/// Which keys of a vendor record become `id`, `label`, and retained extras.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RecordMapping {
    #[serde(rename = "idKey")]
    pub id_key: String,
    #[serde(rename = "labelKey")]
    pub label_key: String,
    #[serde(rename = "extraKeys", default, skip_serializing_if = "Vec::is_empty")]
    pub extra_keys: Vec<String>,
}

impl Default for RecordMapping {
    fn default() -> Self {
        Self {
            id_key: "id".to_string(),
            label_key: "name".to_string(),
            extra_keys: Vec::new(),
        }
    }
}

impl RecordMapping {
    pub fn new(id_key: impl Into<String>, label_key: impl Into<String>) -> Self {
        Self {
            id_key: id_key.into(),
            label_key: label_key.into(),
            extra_keys: Vec::new(),
        }
    }

    pub fn keep(mut self, key: impl Into<String>) -> Self {
        self.extra_keys.push(key.into());
        self
    }
}

/// Normalized result of one options resolution.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DynamicOptionsResponse {
    pub items: Vec<OptionItem>,
    /// True count across all pages, as reported by the provider.
    pub total: u64,
    #[serde(rename = "hasMore", default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
}

impl DynamicOptionsResponse {
    pub fn new(items: Vec<OptionItem>, total: u64) -> Self {
        Self {
            items,
            total,
            has_more: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    pub fn with_has_more(mut self, has_more: bool) -> Self {
        self.has_more = Some(has_more);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Checks the provider contract. Nothing is corrected; the first breach is returned.
    pub fn check_contract(&self, page_size: Option<u32>) -> Result<(), String> {
        if (self.items.len() as u64) > self.total {
            return Err(format!(
                "total ({}) is smaller than the number of returned items ({})",
                self.total,
                self.items.len()
            ));
        }
        if let Some(size) = page_size {
            if self.items.len() > size as usize {
                return Err(format!(
                    "returned {} items for a page size of {size}",
                    self.items.len()
                ));
            }
        }
        Ok(())
    }
}

fn scalar_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
