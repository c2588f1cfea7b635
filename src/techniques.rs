//! Catalog of supported prompting techniques.
//!
//! The catalog is fixed at build time. Lookups never fail: an unknown or
//! empty identifier resolves to the default CRAFT (Zero-Shot) technique.
//! Identifiers match exactly; "Few-Shot" or " few-shot" are unknown.

use serde::Serialize;
use std::fmt;

/// A prompting technique and the lens used to evaluate prompts written with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Technique {
    /// Stable short identifier (e.g. "few-shot").
    pub id: &'static str,
    /// Human-facing label, also the value the model must classify into.
    pub display_name: &'static str,
    /// One-line description of the technique.
    pub description: &'static str,
    /// Worked example prompts as `(kind, text)` pairs.
    pub examples: &'static [(&'static str, &'static str)],
    /// How each analysis dimension should be read under this technique.
    #[serde(skip)]
    pub lens_guidance: &'static str,
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

/// Identifier of the technique used when none (or an unknown one) is given.
pub const DEFAULT_TECHNIQUE_ID: &str = "craft";

const CRAFT: Technique = Technique {
    id: "craft",
    display_name: "CRAFT (Zero-Shot)",
    description: "Standard prompting. You give the AI a direct instruction without providing any examples in the prompt itself.",
    examples: &[
        ("Professional", "As a financial analyst, create a report summarizing the Q3 performance of Company XYZ, focusing on revenue growth and profit margins. The format should be a formal memo."),
        ("Everyday", "Write a short, friendly email to my friends to organize a potluck dinner for Saturday night."),
    ],
    lens_guidance: r#"You are analyzing through the "CRAFT (Zero-Shot)" lens. This technique uses direct instructions without examples in the prompt itself.
The C.R.A.F.T. framework consists of:
- C: Context (Background information, including any attached files)
- R: Role (The persona the AI should adopt)
- A: Action (The specific task for the AI)
- F: Format (The desired output structure)
- T: Target Audience/Tone (Who the output is for and its style)"#,
};

const ONE_SHOT: Technique = Technique {
    id: "one-shot",
    display_name: "One-Shot",
    description: "Provide one high-quality example of the task and desired output before giving the final instruction.",
    examples: &[
        ("Professional", "Example: [Product Name: 'QuantumLeap Laptop', Tone: 'Tech-savvy, professional', Slogan: 'Compute at the speed of thought.']. Your Task: [Product Name: 'EverGreen Smart Garden', Tone: 'Eco-conscious, friendly', Slogan: ...]"),
        ("Everyday", "Example: 'Movie: Inception, Genre: Sci-Fi Thriller'. Your task: 'Movie: The Godfather, Genre: ...'"),
    ],
    lens_guidance: r#"You are analyzing through the "One-Shot" lens. The user should provide ONE clear example.
- **Context**: How well does the prompt provide a single, clear example to guide the AI? This is the most important part.
- **Action**: After the example, is the final task for the AI clearly stated?
- **Format**: Is the format of the example's output clear and easy to replicate?"#,
};

const FEW_SHOT: Technique = Technique {
    id: "few-shot",
    display_name: "Few-Shot",
    description: "Provide 2-5 examples to demonstrate the pattern you want the AI to follow, especially for complex or nuanced tasks.",
    examples: &[
        ("Professional", "Example 1: [Sentiment: Positive, Text: 'The service was outstanding!']. Example 2: [Sentiment: Negative, Text: 'I was very disappointed with the quality.']. Your Task: [Sentiment: ..., Text: 'It was an average experience.']"),
        ("Everyday", "Example 1: 'Input: 10, Output: Even'. Example 2: 'Input: 7, Output: Odd'. Your task: 'Input: 22, Output: ...'"),
    ],
    lens_guidance: r#"You are analyzing through the "Few-Shot" lens. The user should provide a few (2-5) high-quality examples to demonstrate a pattern.
- **Context**: How good and consistent are the examples? Do they clearly establish a pattern for the AI to follow?
- **Action**: After the examples, is the final task for the AI clearly stated and does it fit the pattern?
- **Format**: Is the format of all examples consistent?"#,
};

const CHAIN_OF_THOUGHT: Technique = Technique {
    id: "chain-of-thought",
    display_name: "Chain of Thought",
    description: "Encourage the AI to 'think step by step' to break down complex reasoning problems before giving a final answer.",
    examples: &[
        ("Professional", "A client has a budget of $5000 for a marketing campaign. CPM is $10 and CPC is $2. If they want to allocate 60% of the budget to awareness (CPM) and 40% to conversions (CPC), how many impressions and clicks will they get? Let's think step by step."),
        ("Everyday", "If I have 3 apples and I buy 2 more packs of 4 apples each, but then give half of all my apples to a friend, how many do I have left? Let's think step by step."),
    ],
    lens_guidance: r#"You are analyzing through the "Chain of Thought" (CoT) lens. This is for complex reasoning tasks. The prompt should encourage the AI to 'think step by step'.
- **Action**: Is the task complex? Does the prompt explicitly ask the AI to show its reasoning or think step-by-step? (e.g., by including "Let's think step by step."). This is critical.
- **Format**: Does the prompt ask for the reasoning process to be shown before the final answer?"#,
};

static CATALOG: [Technique; 4] = [CRAFT, ONE_SHOT, FEW_SHOT, CHAIN_OF_THOUGHT];

/// All techniques, in presentation order.
pub fn all() -> &'static [Technique] {
    &CATALOG
}

/// The default technique (CRAFT).
pub fn default_technique() -> &'static Technique {
    &CATALOG[0]
}

/// Resolve a technique identifier, falling back to the default.
pub fn lookup(id: &str) -> &'static Technique {
    find(id).unwrap_or_else(default_technique)
}

/// Whether `id` names a catalog entry.
pub fn is_known(id: &str) -> bool {
    find(id).is_some()
}

/// Map a display label (as returned by the model) back to its technique.
pub fn from_label(label: &str) -> Option<&'static Technique> {
    CATALOG.iter().find(|t| t.display_name == label)
}

fn find(id: &str) -> Option<&'static Technique> {
    CATALOG.iter().find(|t| t.id == id)
}
