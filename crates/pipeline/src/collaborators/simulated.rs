//! Fixed-delay stand-ins for the real transcription and generation services.

use std::time::Duration;

use async_trait::async_trait;
use vidscribe_core::generation::{
    CollaboratorError, ContentGenerator, FetchedTranscript, GeneratedArticle, TranscriptRequest,
    TranscriptSource,
};

pub const DEFAULT_TRANSCRIPT_DELAY: Duration = Duration::from_secs(2);
pub const DEFAULT_GENERATION_DELAY: Duration = Duration::from_secs(3);

pub const SIMULATED_TRANSCRIPT: &str = "\
Hello everyone and welcome to this new video about improving your online presence.
Today we look at the strategies that work best for growing your visibility on the web in 2025.

Let's start with the fundamentals. Authenticity matters more than ever; audiences look for brands that are open and honest.

Next, the technical side. Your site has to be fast, well structured, mobile friendly and served over HTTPS.

For content, focus on quality over quantity. Work out what your audience is searching for and answer exactly that.

Voice search keeps growing, which changes traditional SEO strategies.

Artificial intelligence is now within everyone's reach, even for small businesses.

Thanks for watching, and see you in the next video.";

pub const SIMULATED_TITLE: &str = "How to Grow Your Online Presence: Strategies That Work in 2025";

pub const SIMULATED_ARTICLE_BODY: &str = "\
## The keys to digital success, explained simply

*A complete guide to improving your visibility on the web and reaching your goals.*

In a world where being online is unavoidable, **optimising your online strategy** has never mattered more.

## The fundamentals

**Authenticity** comes first. Audiences reward brands that are transparent about what they do.

## The technical side

A **fast**, **mobile-friendly** site served over **HTTPS** is the baseline for good rankings.

## Content that answers real questions

Favour quality over quantity and match the **search intent** of your audience.

## Conclusion

Combine authenticity, solid technical foundations and useful content to stand out.

Keywords: online presence, SEO, content strategy, digital marketing, 2025";

/// Returns [`SIMULATED_TRANSCRIPT`] after a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedTranscriptSource {
    delay: Duration,
}

impl SimulatedTranscriptSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedTranscriptSource {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSCRIPT_DELAY)
    }
}

#[async_trait]
impl TranscriptSource for SimulatedTranscriptSource {
    async fn fetch_transcript(
        &self,
        request: &TranscriptRequest,
    ) -> Result<FetchedTranscript, CollaboratorError> {
        tracing::debug!(video_id = %request.video_id, delay_ms = self.delay.as_millis() as u64, "Simulating transcript fetch");
        tokio::time::sleep(self.delay).await;
        Ok(FetchedTranscript {
            text: SIMULATED_TRANSCRIPT.to_string(),
            title: None,
        })
    }
}

/// Returns a canned article after a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedContentGenerator {
    delay: Duration,
}

impl SimulatedContentGenerator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedContentGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_GENERATION_DELAY)
    }
}

#[async_trait]
impl ContentGenerator for SimulatedContentGenerator {
    async fn generate_article(
        &self,
        transcript: &str,
    ) -> Result<GeneratedArticle, CollaboratorError> {
        tracing::debug!(
            transcript_chars = transcript.chars().count(),
            delay_ms = self.delay.as_millis() as u64,
            "Simulating content generation"
        );
        tokio::time::sleep(self.delay).await;
        Ok(GeneratedArticle {
            title: SIMULATED_TITLE.to_string(),
            content: format!("# {SIMULATED_TITLE}\n\n{SIMULATED_ARTICLE_BODY}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use vidscribe_core::transcript::{derive_title, timestamp_lines};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn transcript_arrives_after_delay() {
        let source = SimulatedTranscriptSource::default();
        let request = TranscriptRequest {
            video_id: "dQw4w9WgXcQ".into(),
            source_url: "https://youtu.be/dQw4w9WgXcQ".into(),
        };
        let started = tokio::time::Instant::now();
        let fetched = source.fetch_transcript(&request).await.unwrap();
        assert!(started.elapsed() >= DEFAULT_TRANSCRIPT_DELAY);
        assert!(!fetched.text.trim().is_empty());
        assert_eq!(timestamp_lines(&fetched.text).len(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn generated_article_heading_matches_title() {
        let generator = SimulatedContentGenerator::default();
        let article = generator.generate_article("anything").await.unwrap();
        assert_eq!(derive_title(&article.content), article.title);
    }
}
