//! Terminal rendering of the result bundle and the evaluation sections.

use crate::evaluation::{self, EvaluationReport, EvaluationView};
use crate::models::ResultBundle;

pub fn render_bundle(bundle: &ResultBundle) -> String {
    let view = evaluation::normalize_evaluation(&bundle.evaluation);
    [
        section("Cleaned Resume", &bundle.cleaned),
        section("ATS Optimized Resume", &bundle.rewritten),
        section("Final Resume", &bundle.final_resume),
        section("ATS Evaluation & Suggestions", &render_evaluation(&view)),
    ]
    .join("\n")
}

fn section(title: &str, body: &str) -> String {
    format!("=== {title} ===\n{}\n", body.trim_end())
}

pub fn render_evaluation(view: &EvaluationView) -> String {
    match view {
        EvaluationView::Report(report) => render_report(report),
        EvaluationView::RawText(text) => format!("Raw evaluation output:\n{text}"),
        EvaluationView::Unstructured(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
    }
}

fn render_report(report: &EvaluationReport) -> String {
    if report.is_empty() {
        return "(no evaluation sections returned)".to_string();
    }

    let mut out = String::new();
    if let Some(score) = report.overall_score {
        out.push_str(&format!("Overall ATS Score: {}/100\n", fmt_number(score)));
    }
    if let Some(breakdown) = &report.breakdown {
        out.push_str("\nBreakdown:\n");
        for (category, value) in breakdown {
            out.push_str(&format!(
                "  {}: {}/5\n",
                category.replace('_', " "),
                fmt_number(*value)
            ));
        }
    }
    if let Some(keywords) = &report.missing_keywords {
        out.push_str("\nMissing Keywords:\n");
        for keyword in keywords {
            out.push_str(&format!("  - {keyword}\n"));
        }
    }
    if let Some(wins) = &report.quick_wins {
        out.push_str("\nQuick Wins:\n");
        for win in wins {
            out.push_str(&format!("  - {win}\n"));
        }
    }
    if let Some(summary) = &report.summary {
        out.push_str(&format!("\nSummary:\n{summary}\n"));
    }
    out
}

/// Scores come back as JSON numbers; integral values print without a
/// trailing ".0".
fn fmt_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fmt_number_drops_trailing_zero() {
        assert_eq!(fmt_number(82.0), "82");
        assert_eq!(fmt_number(4.5), "4.5");
    }

    #[test]
    fn test_score_renders_out_of_100() {
        let view = evaluation::normalize_evaluation(&json!({"overall_score": 82}));
        let rendered = render_evaluation(&view);
        assert!(rendered.contains("Overall ATS Score: 82/100"));
    }

    #[test]
    fn test_breakdown_renders_underscores_as_spaces_out_of_5() {
        let view = evaluation::normalize_evaluation(&json!({
            "breakdown": {"keyword_match": 4, "section_structure": 3.5}
        }));
        let rendered = render_evaluation(&view);
        assert!(rendered.contains("keyword match: 4/5"));
        assert!(rendered.contains("section structure: 3.5/5"));
    }

    #[test]
    fn test_absent_sections_are_not_rendered() {
        let view = evaluation::normalize_evaluation(&json!({
            "overall_score": 70,
            "missing_keywords": []
        }));
        let rendered = render_evaluation(&view);
        assert!(rendered.contains("70/100"));
        assert!(!rendered.contains("Missing Keywords"));
        assert!(!rendered.contains("Quick Wins"));
    }

    #[test]
    fn test_raw_text_renders_verbatim_under_heading() {
        let view = EvaluationView::RawText("not json at all".to_string());
        assert_eq!(
            render_evaluation(&view),
            "Raw evaluation output:\nnot json at all"
        );
    }

    #[test]
    fn test_unstructured_renders_pretty_json() {
        let view = EvaluationView::Unstructured(json!(["a", "b"]));
        let rendered = render_evaluation(&view);
        assert!(rendered.contains("\"a\""));
        assert!(rendered.starts_with('['));
    }

    #[test]
    fn test_bundle_renders_all_four_sections() {
        let bundle = ResultBundle {
            cleaned: "cleaned body".to_string(),
            rewritten: "rewritten body".to_string(),
            final_resume: "final body".to_string(),
            evaluation: json!({"overall_score": 90}),
        };
        let rendered = render_bundle(&bundle);
        assert!(rendered.contains("=== Cleaned Resume ==="));
        assert!(rendered.contains("=== ATS Optimized Resume ==="));
        assert!(rendered.contains("=== Final Resume ==="));
        assert!(rendered.contains("=== ATS Evaluation & Suggestions ==="));
        assert!(rendered.contains("90/100"));
    }
}
