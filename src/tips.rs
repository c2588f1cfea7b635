//! The C.R.A.F.T. prompting guide shown by `--tips`.

/// One component of the C.R.A.F.T. framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CraftTip {
    pub title: &'static str,
    pub description: &'static str,
    pub example: &'static str,
    pub pro_tip: &'static str,
}

/// The five components, in C, R, A, F, T order.
pub const CRAFT_TIPS: [CraftTip; 5] = [
    CraftTip {
        title: "C: Context",
        description: "Provide background information, setting, or constraints. Why is the task important?",
        example: "Our company is launching a new eco-friendly water bottle next month.",
        pro_tip: "Imagine you're briefing a new team member. What essential info would they need to get started?",
    },
    CraftTip {
        title: "R: Role",
        description: "Define the persona the AI should adopt. Who should the AI be?",
        example: "You are an expert marketing copywriter specializing in sustainable products.",
        pro_tip: "Be specific. Instead of 'an expert,' try 'a skeptical financial analyst' or 'an encouraging fitness coach.'",
    },
    CraftTip {
        title: "A: Action",
        description: "State the specific task you want the AI to perform. What should it do?",
        example: "Write three taglines for the product launch campaign.",
        pro_tip: "Use strong action verbs like 'generate,' 'summarize,' 'critique,' 'rewrite,' or 'compare.'",
    },
    CraftTip {
        title: "F: Format",
        description: "Specify the desired output structure, style, or length.",
        example: "Provide the output as a JSON array of strings. Or: ...in a bulleted list.",
        pro_tip: "Requesting specific formats like tables, code blocks, or markdown can make the output much easier to use.",
    },
    CraftTip {
        title: "T: Target & Tone",
        description: "Describe the intended audience and the desired emotional style.",
        example: "The target audience is environmentally-conscious millennials. The tone should be upbeat and inspiring.",
        pro_tip: "Use descriptive adjectives for tone, like 'formal,' 'witty,' 'empathetic,' or 'authoritative.'",
    },
];

/// Render the guide as plain text.
pub fn render() -> String {
    let mut out = String::from("C.R.A.F.T. Prompting Guide\n");
    for tip in &CRAFT_TIPS {
        out.push_str(&format!(
            "\n{}\n  {}\n  Example: {}\n  Pro Tip: {}\n",
            tip.title, tip.description, tip.example, tip.pro_tip
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tips_spell_craft() {
        let initials: String = CRAFT_TIPS
            .iter()
            .filter_map(|t| t.title.chars().next())
            .collect();
        assert_eq!(initials, "CRAFT");
    }

    #[test]
    fn test_render_lists_every_component() {
        let text = render();
        for tip in &CRAFT_TIPS {
            assert!(text.contains(tip.title));
            assert!(text.contains(tip.pro_tip));
        }
        assert!(text.find("C: Context").unwrap() < text.find("T: Target & Tone").unwrap());
    }
}
