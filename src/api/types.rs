use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

use super::deserializers::{lenient_bool, lenient_text, object_or_none, single_or_vec_or_null, string_or_number};
use super::synonyms::{self, first_present, first_present_or};
use crate::form::FormInput;

/// Placeholder title for a law without any title-like field
pub const LAW_TITLE_PLACEHOLDER: &str = "Kanun";
/// Placeholder body for laws and decisions without any content-like field
pub const CONTENT_PLACEHOLDER: &str = "İçerik bulunamadı";
/// Placeholder case number for a decision without one
pub const CASE_NUMBER_PLACEHOLDER: &str = "Belirsiz";
/// Court shown when a decision does not name one
pub const DEFAULT_COURT: &str = "Yargıtay";
/// Title used for list items that are not JSON objects
pub const INVALID_ITEM_TITLE: &str = "Geçersiz veri";

/// Body of `POST /api/documents/ai-generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestPayload {
    pub template_name: String,
    pub case_description: String,
    pub case_category: String,
    pub template_data: BTreeMap<String, String>,
    pub metadata: RequestMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestMetadata {
    /// Which entry point produced the request
    pub source: String,
    /// Submission time, ISO-8601 UTC with milliseconds
    pub created_at: String,
}

impl RequestPayload {
    /// Build the payload for a validated form
    pub fn from_input(input: &FormInput, source: &str, submitted_at: DateTime<Utc>) -> Self {
        Self {
            template_name: input.template_name.clone(),
            case_description: input.description.clone(),
            case_category: input.category.clone(),
            template_data: input.template_data.clone(),
            metadata: RequestMetadata {
                source: source.to_string(),
                created_at: submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            },
        }
    }
}

/// Response of the generate endpoint.
///
/// `id` is the canonical document id; `document_id` is still accepted from
/// older deployments. Analysis content is only read from the nested
/// `analysis` object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default, deserialize_with = "string_or_number", skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number", skip_serializing_if = "Option::is_none")]
    document_id: Option<String>,
    #[serde(default, deserialize_with = "object_or_none", skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Analysis>,
    #[serde(default, deserialize_with = "object_or_none", skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ResponseMetadata>,
}

impl AnalysisResponse {
    pub fn new(id: Option<String>, analysis: Option<Analysis>, metadata: Option<ResponseMetadata>) -> Self {
        Self {
            id,
            document_id: None,
            analysis,
            metadata,
        }
    }

    /// Document id, preferring `id` over the legacy `document_id`
    pub fn document_id(&self) -> Option<&str> {
        self.id.as_deref().or(self.document_id.as_deref())
    }

    /// Category reported back by the service, if any
    pub fn reported_category(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.category.as_deref())
            .filter(|c| !c.trim().is_empty())
    }

    /// Whether the service fell back to canned analysis data
    pub fn using_mock_data(&self) -> bool {
        self.metadata.as_ref().map(|m| m.using_mock_data).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "single_or_vec_or_null")]
    pub relevant_laws: Vec<Law>,
    #[serde(default, deserialize_with = "single_or_vec_or_null")]
    pub relevant_decisions: Vec<Decision>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Recommendations>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub using_mock_data: bool,
}

/// A relevant statute as sent by the service, read through synonym lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Law(pub Value);

impl Law {
    pub fn title(&self) -> String {
        if !self.0.is_object() {
            return INVALID_ITEM_TITLE.to_string();
        }
        first_present_or(&self.0, synonyms::LAW_TITLE, LAW_TITLE_PLACEHOLDER)
    }

    pub fn content(&self) -> String {
        if !self.0.is_object() {
            return invalid_item_content(&self.0);
        }
        first_present_or(&self.0, synonyms::LAW_CONTENT, CONTENT_PLACEHOLDER)
    }

    pub fn link(&self) -> Option<String> {
        first_present(&self.0, synonyms::LINK)
    }
}

/// A court decision as sent by the service, read through synonym lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Decision(pub Value);

impl Decision {
    pub fn case_number(&self) -> String {
        if !self.0.is_object() {
            return INVALID_ITEM_TITLE.to_string();
        }
        first_present_or(&self.0, synonyms::DECISION_NUMBER, CASE_NUMBER_PLACEHOLDER)
    }

    pub fn date(&self) -> Option<String> {
        first_present(&self.0, synonyms::DECISION_DATE)
    }

    pub fn summary(&self) -> String {
        if !self.0.is_object() {
            return invalid_item_content(&self.0);
        }
        first_present_or(&self.0, synonyms::DECISION_SUMMARY, CONTENT_PLACEHOLDER)
    }

    pub fn court(&self) -> String {
        first_present_or(&self.0, synonyms::DECISION_COURT, DEFAULT_COURT)
    }

    pub fn link(&self) -> Option<String> {
        first_present(&self.0, synonyms::LINK)
    }
}

fn invalid_item_content(value: &Value) -> String {
    format!("Hatalı veri formatı: {}", value)
}

/// Recommendations arrive as a list, a pre-formatted string, or anything else
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendations {
    List(Vec<String>),
    Text(String),
    Other(Value),
}

impl Recommendations {
    /// Nothing worth showing: an empty list or a blank string
    pub fn is_empty(&self) -> bool {
        match self {
            Self::List(items) => items.is_empty(),
            Self::Text(text) => text.trim().is_empty(),
            Self::Other(value) => value.is_null(),
        }
    }
}

impl From<Value> for Recommendations {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Array(items) => Self::List(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => s,
                        Value::Object(ref obj) => match obj.get("text") {
                            Some(Value::String(text)) => text.clone(),
                            _ => item.to_string(),
                        },
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            other => Self::Other(other),
        }
    }
}

impl<'de> Deserialize<'de> for Recommendations {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from)
    }
}

impl Serialize for Recommendations {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::List(items) => items.serialize(serializer),
            Self::Text(text) => text.serialize(serializer),
            Self::Other(value) => value.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_payload_shape() {
        let input = FormInput {
            template_name: "dilekce".to_string(),
            category: "borçlar_hukuku".to_string(),
            description: "Test olay".to_string(),
            template_data: BTreeMap::from([("davaci".to_string(), "Ali".to_string())]),
        };
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let payload = RequestPayload::from_input(&input, "form_submit", at);

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "template_name": "dilekce",
                "case_description": "Test olay",
                "case_category": "borçlar_hukuku",
                "template_data": {"davaci": "Ali"},
                "metadata": {"source": "form_submit", "created_at": "2024-03-01T09:30:00.000Z"}
            })
        );
    }

    #[test]
    fn test_canonical_id_preferred() {
        let response: AnalysisResponse =
            serde_json::from_value(json!({"id": "abc", "document_id": "legacy"})).unwrap();
        assert_eq!(response.document_id(), Some("abc"));

        let response: AnalysisResponse =
            serde_json::from_value(json!({"document_id": "legacy"})).unwrap();
        assert_eq!(response.document_id(), Some("legacy"));
    }

    #[test]
    fn test_everything_optional() {
        let response: AnalysisResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.document_id(), None);
        assert!(response.analysis.is_none());
        assert!(!response.using_mock_data());

        let analysis: Analysis = serde_json::from_value(json!({"relevant_laws": null})).unwrap();
        assert!(analysis.relevant_laws.is_empty());
        assert!(analysis.recommendations.is_none());
    }

    #[test]
    fn test_law_synonyms_and_placeholders() {
        let law = Law(json!({"law_name": "4721 sayılı TMK", "text": "Madde 166"}));
        assert_eq!(law.title(), "4721 sayılı TMK");
        assert_eq!(law.content(), "Madde 166");

        let bare = Law(json!({"url": "https://mevzuat.gov.tr"}));
        assert_eq!(bare.title(), LAW_TITLE_PLACEHOLDER);
        assert_eq!(bare.content(), CONTENT_PLACEHOLDER);
        assert_eq!(bare.link().as_deref(), Some("https://mevzuat.gov.tr"));
    }

    #[test]
    fn test_non_object_law() {
        let law = Law(json!("TBK m. 49"));
        assert_eq!(law.title(), INVALID_ITEM_TITLE);
        assert_eq!(law.content(), "Hatalı veri formatı: \"TBK m. 49\"");
    }

    #[test]
    fn test_decision_synonyms() {
        let decision = Decision(json!({
            "number": "2019/1234",
            "decision_date": "12.05.2020",
            "description": "Kusur oranı",
            "court": "Yargıtay 4. HD"
        }));
        assert_eq!(decision.case_number(), "2019/1234");
        assert_eq!(decision.date().as_deref(), Some("12.05.2020"));
        assert_eq!(decision.summary(), "Kusur oranı");
        assert_eq!(decision.court(), "Yargıtay 4. HD");

        let bare = Decision(json!({}));
        assert_eq!(bare.case_number(), CASE_NUMBER_PLACEHOLDER);
        assert_eq!(bare.date(), None);
        assert_eq!(bare.court(), DEFAULT_COURT);
    }

    #[test]
    fn test_recommendation_shapes() {
        let list: Recommendations = serde_json::from_value(json!(["A", {"text": "B"}, 3])).unwrap();
        assert_eq!(
            list,
            Recommendations::List(vec!["A".to_string(), "B".to_string(), "3".to_string()])
        );

        let text: Recommendations = serde_json::from_value(json!("<p>Öneri</p>")).unwrap();
        assert_eq!(text, Recommendations::Text("<p>Öneri</p>".to_string()));

        let other: Recommendations = serde_json::from_value(json!({"oneri": 1})).unwrap();
        assert_eq!(other, Recommendations::Other(json!({"oneri": 1})));
        assert!(Recommendations::List(vec![]).is_empty());
    }
}
