//! Demo transcriber returning canned banking questions.

use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::domain::Error;
use crate::domain::ports::{Transcriber, Transcription};

const DEMO_NOTE: &str = "Demo mode: this text was not transcribed from audio";

const BANKING_QUERIES: &[&str] = &[
    "What is my current account balance?",
    "Can you show me my recent transactions?",
    "I'd like to transfer money to my savings account",
    "How do I apply for a loan?",
    "Is there a way to increase my credit limit?",
    "I need help with my mortgage payment",
    "When is my next credit card payment due?",
    "Can you help me set up automatic bill payments?",
    "I want to know about your investment options",
    "How do I report a lost debit card?",
];

/// [`Transcriber`] picking a random sentence from a fixed list.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoTranscriber;

#[async_trait]
impl Transcriber for DemoTranscriber {
    async fn transcribe(&self) -> Result<Transcription, Error> {
        let sentence = BANKING_QUERIES
            .choose(&mut rand::thread_rng())
            .ok_or_else(|| Error::internal("no demo sentences configured"))?;
        tracing::debug!(sentence, "returning demo transcription");
        Ok(Transcription {
            transcription: (*sentence).to_owned(),
            demo: true,
            note: DEMO_NOTE.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn demo_output_is_flagged_and_canned() {
        let result = DemoTranscriber.transcribe().await.expect("demo transcription");
        assert!(result.demo);
        assert_eq!(result.note, DEMO_NOTE);
        assert!(BANKING_QUERIES.contains(&result.transcription.as_str()));
    }
}
