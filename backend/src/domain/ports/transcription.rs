//! Driving port for the demo transcription capability.
//!
//! No speech recognition happens behind this port. Enabled deployments return
//! canned text flagged as a demo; everything else answers `NotImplemented`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;

/// Result of a transcription request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transcription {
    /// Transcribed text.
    pub transcription: String,
    /// Always `true`: the text is not derived from audio.
    pub demo: bool,
    /// Human-readable disclaimer.
    pub note: String,
}

/// Domain use-case port for transcription.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Produce a transcription.
    async fn transcribe(&self) -> Result<Transcription, Error>;
}

/// Transcription that is switched off for this deployment.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledTranscriber;

#[async_trait]
impl Transcriber for DisabledTranscriber {
    async fn transcribe(&self) -> Result<Transcription, Error> {
        Err(Error::not_implemented("transcription is not available"))
    }
}
