// Lexicon-based sentiment scoring
//
// Wraps the VADER lexicon scorer. The compound score is attached to
// analyzed records for display only; the categorical label always comes
// from the record's predetermined `fixed_sentiment`.

use vader_sentiment::SentimentIntensityAnalyzer;

/// Compound polarity scorer, normalized to [-1, 1].
pub struct SentimentScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl SentimentScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Compound polarity for the given text, clamped to [-1, 1].
    pub fn score(&self, text: &str) -> f64 {
        let scores = self.analyzer.polarity_scores(text);
        scores
            .get("compound")
            .copied()
            .unwrap_or(0.0)
            .clamp(-1.0, 1.0)
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}
