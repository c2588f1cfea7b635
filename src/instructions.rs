//! System instruction and response schema construction.
//!
//! The instruction text varies with the selected technique; the response
//! schema never does.

use crate::techniques::{self, Technique};
use serde_json::{json, Value};

/// Everything the model needs to know besides the user's content.
#[derive(Debug, Clone, PartialEq)]
pub struct Instructions {
    /// The technique the instructions were built for (after fallback).
    pub technique: &'static Technique,
    /// Natural-language system instruction.
    pub instruction_text: String,
    /// Structured-output schema the reply must conform to.
    pub output_schema: Value,
}

const PREAMBLE: &str = r#"You are a sophisticated and expert prompt engineering assistant with a creative, confidence-inspiring flair. Your task is to analyze a user's prompt and help them improve it. Your tone should be playful yet professional, energetic, and encouraging.
One or more images or documents may be attached as additional context. Factor this into your analysis. For example, if an image of a product is attached, and the prompt is "write a description", the prompt's context is implicitly provided by the image.
Your response MUST be in the JSON format defined by the provided schema. Be strict with the schema."#;

/// Build the instructions for a technique identifier.
///
/// Unknown identifiers are served with the default technique's guidance.
pub fn build(technique_id: &str) -> Instructions {
    let technique = techniques::lookup(technique_id);

    Instructions {
        technique,
        instruction_text: instruction_text(technique),
        output_schema: output_schema(),
    }
}

fn instruction_text(technique: &Technique) -> String {
    format!(
        "{}\n\n{}\n\n{}\n\nHere is how you should interpret the C.R.A.F.T components for your analysis based on the selected technique:\n{}",
        PREAMBLE,
        classification_directive(technique),
        analysis_directive(technique),
        technique.lens_guidance
    )
}

fn classification_directive(selected: &Technique) -> String {
    let labels = techniques::all()
        .iter()
        .map(|t| format!("'{}'", t.display_name))
        .collect::<Vec<_>>()
        .join(", ");

    // Corrective example: pick a technique other than the selected one.
    let other = if selected.id == "chain-of-thought" {
        techniques::default_technique()
    } else {
        techniques::lookup("chain-of-thought")
    };

    format!(
        r#"**Part 1: Classify the User's Prompt**
First, you MUST classify the user's raw prompt into exactly one of the following categories: {labels}. This is for the `classification` field.

Next, compare your classification with the user's selected technique, which is: **'{selected}'**.
- If they match, your `classificationFeedback` should be positive and encouraging, confirming they've used the technique correctly.
- If they do NOT match, your `classificationFeedback` must clearly explain why you classified the prompt differently and give a concrete example of how to change it. For example: "It looks like you selected '{selected}', but this prompt is more of a '{other}' prompt. Here is how you could rewrite it so it becomes a '{selected}' prompt: ...""#,
        labels = labels,
        selected = selected.display_name,
        other = other.display_name,
    )
}

fn analysis_directive(selected: &Technique) -> String {
    format!(
        r#"**Part 2: Analyze the Prompt based on the User's Selection**
After classification, proceed with the main analysis. Your analysis (unpacking, feedback, score, and improved prompt) should be performed through the lens of the user's **selected technique: '{selected}'**, not the technique you detected. For example, if the user selected 'Few-Shot', your feedback on the 'Context' should be about the quality of their examples, even if you classified the prompt as something else. The `improvedPrompt` you generate MUST be a perfect example of the user's selected technique."#,
        selected = selected.display_name
    )
}

/// The response schema, in the generative model's schema dialect.
pub fn output_schema() -> Value {
    let labels: Vec<&str> = techniques::all().iter().map(|t| t.display_name).collect();

    let component = |name: &str| {
        json!({
            "type": "STRING",
            "description": format!("The extracted {} from the user's prompt. If not found, state 'Not explicitly provided'.", name)
        })
    };
    let critique = |name: &str| {
        json!({
            "type": "STRING",
            "description": format!("Feedback on the {} component, viewed through the lens of the user's selected technique.", name)
        })
    };

    json!({
        "type": "OBJECT",
        "properties": {
            "score": {
                "type": "INTEGER",
                "description": "An overall score for the prompt from 1 to 10, based on the user's selected technique."
            },
            "classification": {
                "type": "STRING",
                "enum": labels,
                "description": "The prompting technique the user's prompt most closely resembles."
            },
            "classificationFeedback": {
                "type": "STRING",
                "description": "Feedback comparing the user's selected technique with the detected technique."
            },
            "unpacked": {
                "type": "OBJECT",
                "properties": {
                    "context": component("Context, including acknowledging any attached files,"),
                    "role": component("Role"),
                    "action": component("Action"),
                    "format": component("Format"),
                    "target": component("Target Audience/Tone")
                },
                "required": ["context", "role", "action", "format", "target"]
            },
            "feedback": {
                "type": "OBJECT",
                "properties": {
                    "context": critique("Context"),
                    "role": critique("Role"),
                    "action": critique("Action"),
                    "format": critique("Format"),
                    "target": critique("Target Audience/Tone"),
                    "overall": {
                        "type": "STRING",
                        "description": "Overall summary of the prompt's strengths and weaknesses based on the selected technique."
                    }
                },
                "required": ["context", "role", "action", "format", "target", "overall"]
            },
            "improvedPrompt": {
                "type": "STRING",
                "description": "A rewritten, improved version of the user's prompt that is a perfect example of the selected prompting technique."
            }
        },
        "required": ["score", "classification", "classificationFeedback", "unpacked", "feedback", "improvedPrompt"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_for_every_technique() {
        let reference = build("craft").output_schema;

        for technique in techniques::all() {
            let built = build(technique.id);
            assert!(!built.instruction_text.is_empty());
            assert!(
                built.instruction_text.contains(technique.display_name),
                "instructions for {} should name it",
                technique.id
            );
            assert!(built.instruction_text.contains(technique.lens_guidance));
            assert_eq!(built.output_schema, reference);
        }
    }

    #[test]
    fn test_unknown_technique_matches_craft() {
        let craft = build("craft");
        assert_eq!(build(""), craft);
        assert_eq!(build("bogus"), craft);
    }

    #[test]
    fn test_miscased_id_matches_craft() {
        let craft = build("craft");
        assert_eq!(build("Few-Shot"), craft);
        assert_eq!(build(" few-shot "), craft);
        assert!(!build("Few-Shot").instruction_text.contains("\"Few-Shot\" lens"));
    }

    #[test]
    fn test_segments_in_order() {
        let text = build("few-shot").instruction_text;
        let preamble = text.find("prompt engineering assistant").unwrap();
        let part1 = text.find("**Part 1").unwrap();
        let part2 = text.find("**Part 2").unwrap();
        let lens = text.find(r#""Few-Shot" lens"#).unwrap();
        assert!(preamble < part1 && part1 < part2 && part2 < lens);
    }

    #[test]
    fn test_schema_requires_every_field() {
        let schema = output_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        for field in [
            "score",
            "classification",
            "classificationFeedback",
            "unpacked",
            "feedback",
            "improvedPrompt",
        ] {
            assert!(required.contains(&field), "missing {}", field);
        }
        assert_eq!(schema["properties"]["feedback"]["required"].as_array().unwrap().len(), 6);
        assert_eq!(schema["properties"]["classification"]["enum"].as_array().unwrap().len(), 4);
    }
}
