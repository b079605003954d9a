//! Legacy evaluation pass kept for portfolio review flows: re-scores ideas
//! on a wider band than generation and orders them for display.

use rand::Rng;

use crate::models::GeneratedIdea;

#[derive(Debug, Default, Clone)]
pub struct EvaluationService;

impl EvaluationService {
    /// Assign each idea a fresh score in `[60, 100)`, rewrite its analysis
    /// from the score bucket, and order the list best-first.
    pub fn evaluate(&self, mut ideas: Vec<GeneratedIdea>) -> Vec<GeneratedIdea> {
        let mut rng = rand::thread_rng();
        for idea in &mut ideas {
            idea.score = rng.gen_range(60..100);
            idea.analysis = analysis_for_score(idea.score).to_string();
        }
        rank_descending(&mut ideas);
        ideas
    }
}

/// Review blurb for a score bucket.
fn analysis_for_score(score: u8) -> &'static str {
    if score > 90 {
        "Game changer. Must pursue."
    } else if score < 70 {
        "Good but needs refinement."
    } else {
        "Solid idea with market potential."
    }
}

/// Descending sort by score. The sort is stable, so ties keep their input
/// order.
fn rank_descending(ideas: &mut [GeneratedIdea]) {
    ideas.sort_by(|a, b| b.score.cmp(&a.score));
}
