//! Roadmap document types and validation.
//!
//! These types are the single source of truth twice over: their derived
//! JSON Schema is embedded in the prompt (see [`crate::prompt`]), and their
//! serde `Deserialize` impls are the authoritative enforcement point when
//! the completion comes back. The model's adherence to the embedded schema
//! is never trusted — only validation here decides whether a document is
//! accepted.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::RoadmapError;

fn default_priority() -> String {
    "medium".to_string()
}

/// A single learning reference (course, article, book, ...) tied to a skill
/// gap.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    /// Kind of resource, e.g. "course" or "article". Open set.
    #[serde(rename = "type")]
    pub resource_type: String,
    pub name: String,
    /// Must parse as a well-formed URL or the whole document is rejected.
    pub link: String,
    /// Priority label. Open set; defaults to "medium" when the model omits it.
    #[serde(default = "default_priority")]
    pub priority: String,
}

/// One skill deficiency within a roadmap, with its own learning resources.
///
/// The prompt asks the model for at most two resources per gap; that bound
/// is a request, not a structural invariant, so it is not enforced here.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Eq)]
pub struct SkillGap {
    pub skill: String,
    pub description: String,
    pub learning_time_estimate: String,
    pub learning_resources: Vec<Resource>,
}

/// The top-level validated document describing a career transition plan.
///
/// Constructed once per model response, immutable thereafter.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Eq)]
pub struct Roadmap {
    pub target: String,
    pub time_allocated: String,
    pub gaps: Vec<SkillGap>,
    pub roadmap_summary: String,
}

impl Roadmap {
    /// Parse and validate a JSON string into a `Roadmap`.
    ///
    /// Required fields and field types are enforced by serde; on top of
    /// that, every resource `link` must parse as a URL. Any failure yields
    /// [`RoadmapError::Validation`] with a diagnostic naming the offending
    /// field — there is no partial recovery, the document either fully
    /// validates or is fully discarded.
    pub fn parse(json: &str) -> Result<Self, RoadmapError> {
        let roadmap: Roadmap = serde_json::from_str(json)
            .map_err(|e| RoadmapError::Validation(format!("schema validation failed: {e}")))?;
        roadmap.check_links()?;
        Ok(roadmap)
    }

    fn check_links(&self) -> Result<(), RoadmapError> {
        for gap in &self.gaps {
            for res in &gap.learning_resources {
                if let Err(e) = reqwest::Url::parse(&res.link) {
                    return Err(RoadmapError::Validation(format!(
                        "resource '{}' in gap '{}' has an invalid link '{}': {e}",
                        res.name, gap.skill, res.link
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_doc() -> String {
        serde_json::json!({
            "target": "ML Engineer",
            "time_allocated": "1 month",
            "roadmap_summary": "Focus on fundamentals first.",
            "gaps": [{
                "skill": "Python",
                "description": "Core language fluency",
                "learning_time_estimate": "1 week",
                "learning_resources": [{
                    "type": "course",
                    "name": "Python Crash Course",
                    "link": "https://example.com/python",
                    "priority": "high"
                }]
            }]
        })
        .to_string()
    }

    #[test]
    fn well_formed_document_round_trips() {
        let roadmap = Roadmap::parse(&valid_doc()).unwrap();
        assert_eq!(roadmap.target, "ML Engineer");
        assert_eq!(roadmap.gaps.len(), 1);
        assert_eq!(roadmap.gaps[0].learning_resources[0].priority, "high");

        // Serializing and re-parsing reproduces the document exactly.
        let json = serde_json::to_string(&roadmap).unwrap();
        let again = Roadmap::parse(&json).unwrap();
        assert_eq!(roadmap, again);
    }

    #[test]
    fn omitted_priority_defaults_to_medium() {
        let json = serde_json::json!({
            "target": "X",
            "time_allocated": "1 month",
            "roadmap_summary": "s",
            "gaps": [{
                "skill": "Rust",
                "description": "d",
                "learning_time_estimate": "2 weeks",
                "learning_resources": [{
                    "type": "book",
                    "name": "The Book",
                    "link": "https://doc.rust-lang.org/book/"
                }]
            }]
        })
        .to_string();
        let roadmap = Roadmap::parse(&json).unwrap();
        assert_eq!(roadmap.gaps[0].learning_resources[0].priority, "medium");
    }

    #[test]
    fn non_url_link_rejects_the_document() {
        let json = valid_doc().replace("https://example.com/python", "not a url");
        let err = Roadmap::parse(&json).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("invalid link"), "got: {msg}");
        assert!(msg.contains("Python Crash Course"), "got: {msg}");
    }

    #[test]
    fn missing_required_field_names_the_field() {
        let err = Roadmap::parse(r#"{"target":"X"}"#).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("missing field"), "got: {msg}");
        assert!(msg.contains("time_allocated"), "got: {msg}");
    }

    #[test]
    fn wrong_type_is_a_validation_error() {
        let json = valid_doc().replace("\"gaps\":[", "\"gaps\":\"oops\",\"x\":[");
        let err = Roadmap::parse(&json).unwrap_err();
        assert!(matches!(err, RoadmapError::Validation(_)));
    }

    #[test]
    fn schema_marks_priority_optional() {
        let schema = crate::json_schema_for::<Resource>();
        let required = schema["required"].as_array().unwrap();
        assert!(required.contains(&"link".into()));
        assert!(!required.contains(&"priority".into()));
    }
}
