//! View models bound from an [`AnalysisResult`].
//!
//! These carry already-formatted, still unescaped strings. Presentation
//! (HTML, terminal, iced widgets) happens elsewhere.

use url::Url;

use crate::{
    format::{format_confidence, format_time},
    types::{AnalysisResult, Classification, Severity, SummaryStats},
};

pub const EMPTY_MISCONCEPTIONS_MESSAGE: &str =
    "No misconceptions detected. This video appears to be accurate!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceView {
    Link { href: String, label: String },
    Text(String),
    None,
}

impl SourceView {
    /// Bind a free-text source. It becomes a link only if it carries an
    /// absolute http(s) URL.
    pub fn from_source(source: Option<&str>) -> Self {
        let Some(source) = source.map(str::trim).filter(|s| !s.is_empty()) else {
            return SourceView::None;
        };

        match find_http_url(source) {
            Some(href) => SourceView::Link {
                href,
                label: source.to_string(),
            },
            None => SourceView::Text(source.to_string()),
        }
    }
}

fn find_http_url(source: &str) -> Option<String> {
    source
        .split_whitespace()
        .filter_map(|token| Url::parse(token).ok())
        .find(|url| matches!(url.scheme(), "http" | "https"))
        .map(String::from)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionView {
    pub fact: String,
    pub source: SourceView,
}

impl CorrectionView {
    fn bind(fact: Option<&str>, source: Option<&str>) -> Option<Self> {
        let fact = fact.map(str::trim).filter(|f| !f.is_empty())?;
        Some(Self {
            fact: fact.to_string(),
            source: SourceView::from_source(source),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptRowView {
    pub time: String,
    pub text: String,
    pub classification: Classification,
    pub flagged: bool,
    pub correction: Option<CorrectionView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MisconceptionRowView {
    pub time: String,
    pub text: String,
    pub confidence: String,
    pub severity: Severity,
    pub correction: Option<CorrectionView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MisconceptionsView {
    Empty { message: &'static str },
    Items(Vec<MisconceptionRowView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryFactView {
    pub term: String,
    pub fact: String,
    pub source: SourceView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub stats: SummaryStats,
    pub facts: Vec<SummaryFactView>,
}

pub fn transcript_view(result: &AnalysisResult) -> Vec<TranscriptRowView> {
    result
        .transcript
        .iter()
        .map(|line| TranscriptRowView {
            time: format_time(line.timestamp_seconds),
            text: line.text.trim().to_string(),
            classification: line.classification,
            flagged: line.classification == Classification::Misinformation,
            correction: CorrectionView::bind(line.correct_fact.as_deref(), line.source.as_deref()),
        })
        .collect()
}

pub fn misconceptions_view(result: &AnalysisResult) -> MisconceptionsView {
    if result.misconceptions.is_empty() {
        return MisconceptionsView::Empty {
            message: EMPTY_MISCONCEPTIONS_MESSAGE,
        };
    }

    MisconceptionsView::Items(
        result
            .misconceptions
            .iter()
            .map(|item| MisconceptionRowView {
                time: format_time(item.timestamp_seconds),
                text: item.text.trim().to_string(),
                confidence: format_confidence(item.confidence_score),
                severity: item.severity,
                correction: CorrectionView::bind(
                    item.correct_fact.as_deref(),
                    item.source.as_deref(),
                ),
            })
            .collect(),
    )
}

pub fn summary_view(result: &AnalysisResult) -> SummaryView {
    SummaryView {
        stats: result.summary,
        facts: result
            .summary_facts
            .iter()
            .map(|fact| SummaryFactView {
                term: fact.term.trim().to_string(),
                fact: fact.fact.trim().to_string(),
                source: SourceView::from_source(Some(&fact.source)),
            })
            .collect(),
    }
}
