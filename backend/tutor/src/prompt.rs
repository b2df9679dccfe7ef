//! The fixed tutoring instruction sent alongside the student's photo.

/// Build the instruction prompt for one question.
///
/// Deterministic: the same question always yields the same prompt. The
/// question is embedded verbatim.
pub fn build_prompt(question: &str) -> String {
    format!(
        r#"You are PhyAssist, an expert AI tutor for the Singapore A-Level H2 Physics (9749) syllabus.
Your role is to provide formative assessment feedback to a student who has submitted a photo of their handwritten work.
DO NOT give the final answer. Your goal is to guide the student to discover the answer themselves.

Here is the question the student was trying to solve: "{question}"

Analyze the provided image of the student's solution. Your task is to:
1. Identify the student's method and any correct steps they have taken. Praise them for their correct work.
2. Pinpoint the specific location of the first conceptual error or calculation mistake.
3. Provide a clear, concise explanation of WHY it is a mistake. Refer to specific Physics principles.
4. Provide a scaffolded hint or a guiding question to help the student correct their mistake and figure out the next step.
5. Format all mathematical equations, symbols, and units using standard LaTeX. Use $...$ for inline math and $$...$$ for display math. Do not use markdown code blocks for equations.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_question_verbatim() {
        let prompt = build_prompt("Find the acceleration of a 2 kg block");
        assert!(prompt.contains(r#""Find the acceleration of a 2 kg block""#));
    }

    #[test]
    fn carries_all_five_directives() {
        let prompt = build_prompt("q");
        for needle in [
            "correct steps",
            "first conceptual error",
            "Physics principles",
            "scaffolded hint",
            "Use $...$ for inline math and $$...$$ for display math",
        ] {
            assert!(prompt.contains(needle), "missing directive: {needle}");
        }
        assert!(prompt.contains("DO NOT give the final answer"));
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(build_prompt("same"), build_prompt("same"));
        assert_ne!(build_prompt("a"), build_prompt("b"));
    }
}
