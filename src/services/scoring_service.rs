use crate::models::question::QuizQuestion;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreCard {
    pub correct: i32,
    pub total: i32,
    /// Percentage in `0.0..=100.0`.
    pub score: f64,
}

pub struct ScoringService;

impl ScoringService {
    /// Positional comparison of submitted letters against the answer key.
    /// Questions past the end of `answers` are left unanswered.
    pub fn score(questions: &[QuizQuestion], answers: &[String]) -> ScoreCard {
        let correct = questions
            .iter()
            .zip(answers.iter())
            .filter(|(q, given)| given.trim() == q.answer.trim())
            .count() as i32;
        let total = questions.len() as i32;

        let score = if total == 0 {
            0.0
        } else {
            correct as f64 / total as f64 * 100.0
        };

        ScoreCard {
            correct,
            total,
            score,
        }
    }
}
