//! Form bundle wire types
//!
//! JSON shapes exchanged between the webform client and the services that
//! provide form definitions, cached instances and submission limits.

use serde::{Deserialize, Serialize};

/// Secondary instance referenced by a form (e.g. itemsets from a CSV/XML file)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalData {
    pub id: String,
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xml: Option<String>,
}

/// File attached to an existing instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceAttachment {
    pub filename: String,
    pub url: String,
}

/// Transformed form as returned by the form-parts service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormParts {
    /// HTML form markup
    #[serde(default)]
    pub form: Option<String>,
    /// XML model definition
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default)]
    pub external_data: Vec<ExternalData>,
    /// Merged in from the existing-instance fetch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(default)]
    pub instance_attachments: Vec<InstanceAttachment>,
}

impl FormParts {
    /// Merge an existing instance onto the form parts
    pub fn with_instance(mut self, existing: ExistingInstance) -> Self {
        self.instance = existing.instance;
        self.instance_attachments = existing.instance_attachments;
        self
    }
}

/// Existing instance data for edit webforms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingInstance {
    #[serde(default)]
    pub instance: Option<String>,
    #[serde(default)]
    pub instance_attachments: Vec<InstanceAttachment>,
}

/// Maximum submission size response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxSizeResponse {
    pub max_size: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_parts_deserialize_camel_case() {
        let parts: FormParts = serde_json::from_value(serde_json::json!({
            "form": "<form></form>",
            "model": "<model/>",
            "externalData": [{ "id": "cities", "src": "jr://file/cities.xml" }]
        }))
        .unwrap();
        assert_eq!(parts.external_data[0].id, "cities");
        assert_eq!(parts.external_data[0].xml, None);
        assert!(parts.instance.is_none());
        assert!(parts.instance_attachments.is_empty());
    }

    #[test]
    fn test_with_instance_replaces_instance_fields() {
        let parts = FormParts {
            form: Some("<form/>".into()),
            model: Some("<model/>".into()),
            ..Default::default()
        };
        let merged = parts.with_instance(ExistingInstance {
            instance: Some("<data/>".into()),
            instance_attachments: vec![InstanceAttachment {
                filename: "a.jpg".into(),
                url: "https://h/a.jpg".into(),
            }],
        });
        assert_eq!(merged.instance.as_deref(), Some("<data/>"));
        assert_eq!(merged.instance_attachments.len(), 1);
        assert_eq!(merged.form.as_deref(), Some("<form/>"));
    }
}
