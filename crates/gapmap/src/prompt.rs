//! Prompt assembly for the roadmap request.
//!
//! The prompt carries three parts: a fixed system instruction, the JSON
//! Schema derived from [`Roadmap`](crate::schema::Roadmap), and the user's
//! role/timeframe parameters interpolated into a templated request sentence.
//! Embedding the schema is a soft contract — the model usually follows it,
//! but the only enforcement point is validation on the way back.

use crate::json_schema_for;
use crate::schema::Roadmap;

/// Fixed system instruction prepended to every roadmap request.
pub const SYSTEM_INSTRUCTION: &str = "You are a Career Path AI. Always reply with ONLY a valid \
    JSON object inside a fenced ```json ... ``` block. The JSON keys must exactly match the \
    schema provided. Limit each skill to a maximum of 2 high-quality resources. Be concise in \
    descriptions.";

/// Build the roadmap prompt for the given transition.
///
/// Pure: same inputs always produce the same string. Inputs are interpolated
/// verbatim — no validation, no escaping.
pub fn build_prompt(current_role: &str, target_role: &str, time_period: &str) -> String {
    let schema = serde_json::to_string(&json_schema_for::<Roadmap>()).unwrap_or_default();

    format!(
        "SYSTEM: {SYSTEM_INSTRUCTION}\n\
         SCHEMA: {schema}\n\n\
         User: I'm a {current_role} transitioning to {target_role}. \
         I have {time_period} for this.\n\n\
         Return a JSON following the schema. Ensure 'learning_resources' includes \
         'type', 'name', 'link', and 'priority'."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_all_three_parameters() {
        let prompt = build_prompt("barista", "SRE", "6 months");
        assert!(prompt.contains("I'm a barista transitioning to SRE."));
        assert!(prompt.contains("I have 6 months for this."));
    }

    #[test]
    fn embeds_the_roadmap_schema() {
        let prompt = build_prompt("a", "b", "c");
        assert!(prompt.contains("SCHEMA: "));
        assert!(prompt.contains("time_allocated"));
        assert!(prompt.contains("learning_resources"));
        assert!(prompt.contains("roadmap_summary"));
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(build_prompt("x", "y", "z"), build_prompt("x", "y", "z"));
    }
}
