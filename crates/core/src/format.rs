use crate::{
    types::AnalysisResult,
    view::{MisconceptionsView, SourceView, misconceptions_view, summary_view, transcript_view},
};

/// Format seconds as M:SS (minutes unpadded)
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Format a [0,1] confidence score as a percentage with two decimals
pub fn format_confidence(score: f64) -> String {
    format!("{:.2}%", score * 100.0)
}

fn push_source(output: &mut String, source: &SourceView) {
    match source {
        SourceView::Link { href, .. } => output.push_str(&format!("    Source: {}\n", href)),
        SourceView::Text(text) => output.push_str(&format!("    Source: {}\n", text)),
        SourceView::None => {}
    }
}

/// Format an analysis result as a human-readable plain-text report
pub fn format_result_readable(result: &AnalysisResult) -> String {
    let mut output = String::new();

    if let Some(url) = &result.video_url {
        output.push_str(&format!("# Analysis of {}\n\n", url));
    }

    // Transcript
    output.push_str("## Transcript\n\n");
    for row in transcript_view(result) {
        let marker = if row.flagged { "!!" } else { "  " };
        output.push_str(&format!(
            "{} [{}] {:<14} {}\n",
            marker,
            row.time,
            row.classification.label(),
            row.text
        ));
        if let Some(correction) = &row.correction {
            output.push_str(&format!("    Correct fact: {}\n", correction.fact));
            push_source(&mut output, &correction.source);
        }
    }
    output.push('\n');

    // Misconceptions
    output.push_str("## Misconceptions\n\n");
    match misconceptions_view(result) {
        MisconceptionsView::Empty { message } => {
            output.push_str(message);
            output.push('\n');
        }
        MisconceptionsView::Items(items) => {
            for item in items {
                output.push_str(&format!(
                    "• [{}] {} (confidence {}, severity {})\n",
                    item.time,
                    item.text,
                    item.confidence,
                    item.severity.label()
                ));
                if let Some(correction) = &item.correction {
                    output.push_str(&format!("    Correct fact: {}\n", correction.fact));
                    push_source(&mut output, &correction.source);
                }
            }
        }
    }
    output.push('\n');

    // Summary
    let summary = summary_view(result);
    output.push_str("## Summary\n\n");
    output.push_str(&format!(
        "**Snippets:** {} | **Misinformation:** {} | **Uncertain:** {} | **Real:** {}\n\n",
        summary.stats.total_snippets,
        summary.stats.misinformation_count,
        summary.stats.uncertain_count(),
        summary.stats.real_count
    ));
    for fact in &summary.facts {
        output.push_str(&format!("### {}\n\n{}\n", fact.term, fact.fact));
        push_source(&mut output, &fact.source);
        output.push('\n');
    }

    output
}
