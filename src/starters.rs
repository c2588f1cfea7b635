//! Built-in starter prompts for trying the analyzer out.

/// Example prompts, each leaning on an attached file for context.
pub const STARTER_PROMPTS: [&str; 3] = [
    "Act as a social media manager. Write a short, witty Instagram caption for an attached picture of a cat wearing sunglasses. The tone should be playful and engaging.",
    "You are a professional chef. Create a simple, healthy recipe for a weeknight dinner based on an attached list of ingredients. Format the output as a markdown recipe card.",
    "I'm a student. Summarize the key arguments from the attached academic paper into five bullet points. The target audience is someone unfamiliar with the topic.",
];

/// Look up a starter prompt by its 1-based number.
pub fn starter(number: usize) -> Option<&'static str> {
    number.checked_sub(1).and_then(|i| STARTER_PROMPTS.get(i).copied())
}
