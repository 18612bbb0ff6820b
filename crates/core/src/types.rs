use serde::{Deserialize, Serialize};

use crate::video_id::VideoId;

/// Body of `POST /analyze`. Only `url` goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub url: String,
    #[serde(skip)]
    pub video_id: VideoId,
}

impl AnalysisRequest {
    pub fn new(url: impl Into<String>, video_id: VideoId) -> Self {
        Self {
            url: url.into(),
            video_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Real,
    // the backend labels snippets it failed to process as ERROR
    #[serde(alias = "ERROR")]
    Uncertain,
    Misinformation,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Real => "REAL",
            Classification::Uncertain => "UNCERTAIN",
            Classification::Misinformation => "MISINFORMATION",
        }
    }

    /// CSS-style class name used by renderers
    pub fn class_name(&self) -> &'static str {
        match self {
            Classification::Real => "real",
            Classification::Uncertain => "uncertain",
            Classification::Misinformation => "misinformation",
        }
    }
}

/// One timestamped snippet of the transcript, in playback order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptLine {
    #[serde(rename = "timestamp")]
    pub timestamp_seconds: f64,
    pub text: String,
    #[serde(rename = "misinformation")]
    pub classification: Classification,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub correct_fact: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Severity implied by a confidence score when the backend sends none.
    pub fn from_confidence(score: f64) -> Self {
        if score >= 0.8 {
            Severity::High
        } else if score >= 0.5 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        }
    }
}

/// A transcript snippet flagged as likely false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MisconceptionWire")]
pub struct MisconceptionItem {
    #[serde(rename = "timestamp")]
    pub timestamp_seconds: f64,
    pub text: String,
    #[serde(rename = "score")]
    pub confidence_score: f64,
    pub severity: Severity,
    pub correct_fact: Option<String>,
    pub source: Option<String>,
}

#[derive(Deserialize)]
struct MisconceptionWire {
    timestamp: f64,
    text: String,
    #[serde(default, alias = "confidence")]
    score: Option<f64>,
    #[serde(default)]
    severity: Option<String>,
    #[serde(default)]
    correct_fact: Option<String>,
    #[serde(default)]
    source: Option<String>,
}

impl From<MisconceptionWire> for MisconceptionItem {
    fn from(wire: MisconceptionWire) -> Self {
        let confidence_score = wire
            .score
            .filter(|s| s.is_finite())
            .map(|s| s.clamp(0.0, 1.0))
            .unwrap_or(0.0);
        let severity = wire
            .severity
            .as_deref()
            .and_then(Severity::parse)
            .unwrap_or_else(|| Severity::from_confidence(confidence_score));

        Self {
            timestamp_seconds: wire.timestamp,
            text: wire.text,
            confidence_score,
            severity,
            correct_fact: wire.correct_fact,
            source: wire.source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryFact {
    pub term: String,
    pub fact: String,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_snippets: usize,
    pub misinformation_count: usize,
    pub real_count: usize,
}

impl SummaryStats {
    pub fn from_transcript(transcript: &[TranscriptLine]) -> Self {
        let count =
            |c: Classification| transcript.iter().filter(|l| l.classification == c).count();
        Self {
            total_snippets: transcript.len(),
            misinformation_count: count(Classification::Misinformation),
            real_count: count(Classification::Real),
        }
    }

    pub fn uncertain_count(&self) -> usize {
        self.total_snippets
            .saturating_sub(self.misinformation_count)
            .saturating_sub(self.real_count)
    }
}

/// Everything the backend returns for one analyzed video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AnalysisResultWire")]
pub struct AnalysisResult {
    pub video_url: Option<String>,
    pub transcript: Vec<TranscriptLine>,
    pub misconceptions: Vec<MisconceptionItem>,
    pub summary_facts: Vec<SummaryFact>,
    pub summary: SummaryStats,
}

#[derive(Deserialize)]
struct AnalysisResultWire {
    #[serde(default)]
    video_url: Option<String>,
    transcript: Vec<TranscriptLine>,
    #[serde(default)]
    misconceptions: Vec<MisconceptionItem>,
    #[serde(default)]
    summary_facts: Vec<SummaryFact>,
    #[serde(default)]
    summary: Option<SummaryStats>,
}

impl From<AnalysisResultWire> for AnalysisResult {
    fn from(wire: AnalysisResultWire) -> Self {
        let summary = wire
            .summary
            .unwrap_or_else(|| SummaryStats::from_transcript(&wire.transcript));
        Self {
            video_url: wire.video_url,
            transcript: wire.transcript,
            misconceptions: wire.misconceptions,
            summary_facts: wire.summary_facts,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn backend_body() -> serde_json::Value {
        json!({
            "video_url": "https://youtu.be/dQw4w9WgXcQ",
            "transcript": [
                {"timestamp": 1.2, "text": "the earth is round", "misinformation": "REAL",
                 "score": 0.91, "correct_fact": null, "source": null},
                {"timestamp": 65.0, "text": "vaccines contain chips", "misinformation": "MISINFORMATION",
                 "score": 0.87, "correct_fact": "They do not.", "source": "Wikipedia: https://en.wikipedia.org/wiki/Vaccine"},
                {"timestamp": 90.5, "text": "something garbled", "misinformation": "ERROR",
                 "score": null, "correct_fact": null, "source": "Snippet processing failed: boom"}
            ],
            "misconceptions": [
                {"timestamp": 65.0, "text": "vaccines contain chips", "misinformation": "MISINFORMATION",
                 "score": 0.87, "correct_fact": "They do not.", "source": "Wikipedia: https://en.wikipedia.org/wiki/Vaccine"}
            ],
            "summary": {"total_snippets": 3, "misinformation_count": 1, "real_count": 1},
            "summary_facts": [
                {"term": "vaccines contain chips", "fact": "They do not.", "source": "Wikipedia: https://en.wikipedia.org/wiki/Vaccine"}
            ]
        })
    }

    #[test]
    fn test_parses_backend_response() {
        let result: AnalysisResult = serde_json::from_value(backend_body()).unwrap();

        assert_eq!(result.transcript.len(), 3);
        assert_eq!(result.transcript[0].classification, Classification::Real);
        assert_eq!(
            result.transcript[1].classification,
            Classification::Misinformation
        );
        assert_eq!(result.transcript[2].classification, Classification::Uncertain);
        assert_eq!(result.misconceptions[0].severity, Severity::High);
        assert_eq!(result.summary.total_snippets, 3);
        assert_eq!(result.summary.uncertain_count(), 1);
        assert_eq!(result.summary_facts.len(), 1);
    }

    #[test]
    fn test_summary_is_computed_when_missing() {
        let mut body = backend_body();
        body.as_object_mut().unwrap().remove("summary");

        let result: AnalysisResult = serde_json::from_value(body).unwrap();

        assert_eq!(
            result.summary,
            SummaryStats {
                total_snippets: 3,
                misinformation_count: 1,
                real_count: 1,
            }
        );
    }

    #[test]
    fn test_transcript_is_required() {
        let parsed = serde_json::from_value::<AnalysisResult>(json!({"misconceptions": []}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_misconception_severity_and_score_normalization() {
        let item: MisconceptionItem = serde_json::from_value(json!({
            "timestamp": 3.0, "text": "x", "confidence": 1.7, "severity": "Medium"
        }))
        .unwrap();
        assert_eq!(item.confidence_score, 1.0);
        assert_eq!(item.severity, Severity::Medium);

        let item: MisconceptionItem = serde_json::from_value(json!({
            "timestamp": 3.0, "text": "x", "score": null
        }))
        .unwrap();
        assert_eq!(item.confidence_score, 0.0);
        assert_eq!(item.severity, Severity::Low);
    }

    #[test]
    fn test_severity_from_confidence_thresholds() {
        assert_eq!(Severity::from_confidence(0.8), Severity::High);
        assert_eq!(Severity::from_confidence(0.79), Severity::Medium);
        assert_eq!(Severity::from_confidence(0.5), Severity::Medium);
        assert_eq!(Severity::from_confidence(0.49), Severity::Low);
    }

    #[test]
    fn test_request_serializes_only_url() {
        let video_id = crate::video_id::extract_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap();
        let request = AnalysisRequest::new("https://youtu.be/dQw4w9WgXcQ", video_id);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"url": "https://youtu.be/dQw4w9WgXcQ"})
        );
    }
}
