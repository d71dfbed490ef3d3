//! The speech-recognizer seam.
//!
//! The pipeline never talks to a concrete engine. It drives this trait and
//! the host injects whatever the platform provides. [`ScriptedRecognizer`]
//! plays back a fixed transcript so tests and the CLI can exercise the
//! capture path without any audio stack.

use std::sync::Mutex;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;

/// One recognition result.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    /// Recognized text, untrimmed
    pub text: String,
    /// Engine confidence in [0, 1], when the engine reports one
    pub confidence: Option<f32>,
}

/// A speech recognition session, driven start, then stop, then transcript.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Human-readable name for logging
    fn name(&self) -> &str;

    /// Begin listening.
    async fn start(&self) -> Result<()>;

    /// Stop listening.
    async fn stop(&self) -> Result<()>;

    /// The final transcript of the finished session.
    async fn transcript(&self) -> Result<Transcript>;
}

/// Lifecycle stages of a recognizer session, in driving order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognizerStage {
    Start,
    Stop,
    Transcript,
}

/// Playback recognizer: returns a scripted transcript and records how it was
/// driven. Can be told to fail at one chosen stage to exercise error paths.
pub struct ScriptedRecognizer {
    transcript: Transcript,
    fail_at: Option<RecognizerStage>,
    calls: Mutex<Vec<RecognizerStage>>,
}

impl ScriptedRecognizer {
    /// A recognizer that will return `text` with no confidence score.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            transcript: Transcript {
                text: text.into(),
                confidence: None,
            },
            fail_at: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Attach a confidence score to the scripted transcript.
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.transcript.confidence = Some(confidence);
        self
    }

    /// Make the chosen stage return an error instead of succeeding.
    pub fn failing_at(mut self, stage: RecognizerStage) -> Self {
        self.fail_at = Some(stage);
        self
    }

    /// The stages driven so far, in call order.
    pub fn calls(&self) -> Vec<RecognizerStage> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, stage: RecognizerStage) -> Result<()> {
        self.calls
            .lock()
            .map_err(|_| anyhow!("recognizer call log poisoned"))?
            .push(stage);
        if self.fail_at == Some(stage) {
            bail!("scripted {stage:?} failure");
        }
        Ok(())
    }
}

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn start(&self) -> Result<()> {
        self.record(RecognizerStage::Start)
    }

    async fn stop(&self) -> Result<()> {
        self.record(RecognizerStage::Stop)
    }

    async fn transcript(&self) -> Result<Transcript> {
        self.record(RecognizerStage::Transcript)?;
        Ok(self.transcript.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn plays_back_the_scripted_transcript() {
        let recognizer = ScriptedRecognizer::new("Courses 10 euros").with_confidence(0.92);
        recognizer.start().await.unwrap();
        recognizer.stop().await.unwrap();
        let transcript = recognizer.transcript().await.unwrap();
        assert_eq!(transcript.text, "Courses 10 euros");
        assert_eq!(transcript.confidence, Some(0.92));
        assert_eq!(
            recognizer.calls(),
            vec![
                RecognizerStage::Start,
                RecognizerStage::Stop,
                RecognizerStage::Transcript
            ]
        );
    }

    #[tokio::test]
    async fn fails_at_the_chosen_stage() {
        let recognizer = ScriptedRecognizer::new("x").failing_at(RecognizerStage::Stop);
        recognizer.start().await.unwrap();
        let err = recognizer.stop().await.unwrap_err();
        assert!(err.to_string().contains("Stop"));
        // The failing call is still recorded.
        assert_eq!(
            recognizer.calls(),
            vec![RecognizerStage::Start, RecognizerStage::Stop]
        );
    }
}
