//! HTML presentation of the presenter and its views.
//!
//! Every text-derived value passes through [`escape`] before insertion.

use crate::{
    presenter::{ResultPresenter, Tab},
    types::AnalysisResult,
    view::{
        CorrectionView, MisconceptionsView, SourceView, misconceptions_view, summary_view,
        transcript_view,
    },
};

const STYLESHEET: &str = r#"
body { font-family: sans-serif; max-width: 960px; margin: 2rem auto; }
.tabs button { padding: .5rem 1rem; }
.tabs button.active { font-weight: bold; border-bottom: 2px solid #333; }
.tab-content { display: none; }
.tab-content.active { display: block; }
.line { padding: .25rem .5rem; }
.line.misinformation { background: #fde2e2; border-left: 4px solid #c0392b; }
.line.uncertain { background: #fff4d6; border-left: 4px solid #e0a800; }
.line.real { border-left: 4px solid #2e8b57; }
.timestamp { font-family: monospace; margin-right: .5rem; }
.empty-state { color: #2e8b57; }
.error { color: #c0392b; }
"#;

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn hidden(visible: bool) -> &'static str {
    if visible { "" } else { " hidden" }
}

fn active(is_active: bool) -> &'static str {
    if is_active { " active" } else { "" }
}

fn render_source(source: &SourceView) -> String {
    match source {
        SourceView::Link { href, label } => format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            escape(href),
            escape(label)
        ),
        SourceView::Text(text) => format!(r#"<span class="source">{}</span>"#, escape(text)),
        SourceView::None => String::new(),
    }
}

fn render_correction(correction: &CorrectionView) -> String {
    let source = render_source(&correction.source);
    let source = if source.is_empty() {
        source
    } else {
        format!(" <small>Source: {}</small>", source)
    };
    format!(
        r#"<div class="correct-fact">Correct fact: {}{}</div>"#,
        escape(&correction.fact),
        source
    )
}

pub fn render_transcript(result: &AnalysisResult) -> String {
    let mut html = String::new();
    for row in transcript_view(result) {
        html.push_str(&format!(
            r#"<div class="line {}"><span class="timestamp">{}</span><span class="label">{}</span> {}"#,
            row.classification.class_name(),
            escape(&row.time),
            row.classification.label(),
            escape(&row.text)
        ));
        if let Some(correction) = &row.correction {
            html.push_str(&render_correction(correction));
        }
        html.push_str("</div>\n");
    }
    html
}

pub fn render_misconceptions(result: &AnalysisResult) -> String {
    match misconceptions_view(result) {
        MisconceptionsView::Empty { message } => {
            format!(r#"<p class="empty-state">{}</p>"#, escape(message))
        }
        MisconceptionsView::Items(items) => {
            let mut html = String::new();
            for item in items {
                html.push_str(&format!(
                    r#"<div class="misconception severity-{}"><span class="timestamp">{}</span> {}<div class="confidence">Confidence: {} | Severity: {}</div>"#,
                    item.severity.label().to_ascii_lowercase(),
                    escape(&item.time),
                    escape(&item.text),
                    escape(&item.confidence),
                    item.severity.label()
                ));
                if let Some(correction) = &item.correction {
                    html.push_str(&render_correction(correction));
                }
                html.push_str("</div>\n");
            }
            html
        }
    }
}

pub fn render_summary(result: &AnalysisResult) -> String {
    let summary = summary_view(result);
    let mut html = format!(
        r#"<ul class="stats"><li>Snippets analyzed: {}</li><li>Misinformation: {}</li><li>Uncertain: {}</li><li>Real: {}</li></ul>"#,
        summary.stats.total_snippets,
        summary.stats.misinformation_count,
        summary.stats.uncertain_count(),
        summary.stats.real_count
    );
    html.push('\n');
    for fact in &summary.facts {
        let source = render_source(&fact.source);
        html.push_str(&format!(
            r#"<div class="summary-fact"><strong>{}</strong><p>{}</p>{}</div>"#,
            escape(&fact.term),
            escape(&fact.fact),
            source
        ));
        html.push('\n');
    }
    html
}

fn render_panel(tab: Tab, result: &AnalysisResult) -> String {
    match tab {
        Tab::Transcript => render_transcript(result),
        Tab::Misconceptions => render_misconceptions(result),
        Tab::Summary => render_summary(result),
    }
}

/// Render the whole page for the presenter's current state.
pub fn render_document(presenter: &ResultPresenter) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>factlens</title>\n<style>");
    html.push_str(STYLESHEET);
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str(&format!(
        r#"<input id="video-url" type="text" value="{}"><button id="analyze"{}>Analyze</button>"#,
        escape(presenter.input()),
        if presenter.trigger_enabled() { "" } else { " disabled" }
    ));
    html.push('\n');
    html.push_str(&format!(
        r#"<div id="loading"{}>Analyzing video...</div>"#,
        hidden(presenter.busy_visible())
    ));
    html.push('\n');
    html.push_str(&format!(
        r#"<div id="error" class="error"{}>{}</div>"#,
        hidden(presenter.error_text().is_some()),
        escape(presenter.error_text().unwrap_or_default())
    ));
    html.push('\n');

    html.push_str(&format!(
        r#"<div id="results"{}>"#,
        hidden(presenter.results_visible())
    ));
    html.push('\n');
    html.push_str(r#"<div class="tabs">"#);
    for tab in Tab::ALL {
        html.push_str(&format!(
            r#"<button class="tab{}" data-tab="{}">{}</button>"#,
            active(tab == presenter.active_tab()),
            tab.id(),
            tab.title()
        ));
    }
    html.push_str("</div>\n");

    for tab in Tab::ALL {
        let content = presenter
            .result()
            .map(|result| render_panel(tab, result))
            .unwrap_or_default();
        html.push_str(&format!(
            "<div id=\"{}\" class=\"tab-content{}\">\n{}</div>\n",
            tab.id(),
            active(tab == presenter.active_tab()),
            content
        ));
    }
    html.push_str("</div>\n</body>\n</html>\n");

    html
}
