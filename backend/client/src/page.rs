use phyassist_markdown::{escape_html, Renderer, SegmentParser, Typesetter};

use crate::form::FormState;

/// A standalone HTML page for one question and the form's current result.
///
/// At most one of the error card and the feedback card is present.
pub fn render_page(question: &str, state: &FormState, typesetter: &dyn Typesetter) -> String {
    let result = match state {
        FormState::Failed { error } => format!(
            r#"<div class="card card-error"><h3>Error</h3><p>{}</p></div>"#,
            escape_html(error)
        ),
        FormState::Success { feedback } => format!(
            r#"<div class="card"><h3>AI Feedback</h3><div class="feedback">{}</div></div>"#,
            Renderer::to_html(&SegmentParser::parse(feedback), typesetter)
        ),
        FormState::Validating | FormState::Submitting => {
            r#"<div class="card"><p>Analyzing...</p></div>"#.to_string()
        }
        FormState::Idle => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>PhyAssist</title>
<style>
body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif; background: #f4f7f9; margin: 0; }}
header {{ background: #2c3e50; color: white; padding: 20px; text-align: center; }}
main {{ max-width: 800px; margin: 0 auto; padding: 20px; }}
.card {{ background: white; border-radius: 8px; box-shadow: 0 4px 6px rgba(0,0,0,0.1); padding: 25px; margin-bottom: 20px; }}
.card-error {{ background: #ffebee; }}
.card-error h3 {{ color: #c62828; }}
.feedback {{ line-height: 1.6; }}
.feedback math[display="block"] {{ margin: 0.75rem 0; }}
</style>
</head>
<body>
<header><h1>PhyAssist</h1><p>Your AI Assistant for H2 Physics</p></header>
<main>
<div class="card"><h3>Question</h3><p>{question}</p></div>
{result}
</main>
</body>
</html>"#,
        question = escape_html(question),
        result = result,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use phyassist_markdown::MathMlTypesetter;

    #[test]
    fn success_page_has_feedback_card_only() {
        let state = FormState::Success {
            feedback: "Good start! $a = F/m$".into(),
        };
        let page = render_page("Find <a>", &state, &MathMlTypesetter::new());

        assert!(page.contains("<h1>PhyAssist</h1>"));
        assert!(page.contains("Your AI Assistant for H2 Physics"));
        assert!(page.contains("Find &lt;a&gt;"));
        assert!(page.contains("AI Feedback"));
        assert!(page.contains("<math"));
        assert!(!page.contains("card-error\""));
    }

    #[test]
    fn error_page_has_error_card_only() {
        let state = FormState::Failed {
            error: "Failed to get feedback from the server.".into(),
        };
        let page = render_page("Find a.", &state, &MathMlTypesetter::new());

        assert!(page.contains(r#"<div class="card card-error"><h3>Error</h3><p>Failed to get feedback from the server.</p></div>"#));
        assert!(!page.contains("AI Feedback"));
    }
}
