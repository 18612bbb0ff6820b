//! Factlens Core Library
//!
//! Client-side pieces of the factlens misinformation analyzer: video URL
//! validation, the analysis backend client, and the result presenter with
//! its views.

pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod html;
pub mod presenter;
pub mod types;
pub mod video_id;
pub mod view;

// Re-export commonly used items at crate root
pub use client::{AnalysisBackend, AnalysisClient, ClientError, GENERIC_ERROR_MESSAGE};
pub use config::{BACKEND_URL_ENV, ClientConfig, DEFAULT_BACKEND_URL};
pub use error::{FactlensError, Result, ValidationError};
pub use format::{format_confidence, format_result_readable, format_time};
pub use export::save_document;
pub use html::render_document;
pub use presenter::{Effect, ResultPresenter, Submission, Tab, UiEvent, UiState};
pub use types::{
    AnalysisRequest, AnalysisResult, Classification, MisconceptionItem, Severity, SummaryFact,
    SummaryStats, TranscriptLine,
};
pub use video_id::{VideoId, extract_video_id};
