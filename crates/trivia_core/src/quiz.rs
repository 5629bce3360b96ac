//! crates/trivia_core/src/quiz.rs
//!
//! Picks the next quiz question among those not yet asked.

use crate::domain::Question;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Which questions a quiz draws from. Clients send category id `0` for "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCategory {
    Any,
    Only(i64),
}

impl From<i64> for QuizCategory {
    fn from(id: i64) -> Self {
        match id {
            0 => QuizCategory::Any,
            id => QuizCategory::Only(id),
        }
    }
}

impl QuizCategory {
    pub fn admits(&self, question: &Question) -> bool {
        match self {
            QuizCategory::Any => true,
            QuizCategory::Only(id) => question.category == *id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("the quiz category has no questions")]
    NoCandidates,
    #[error("every question in the quiz category has been asked")]
    Exhausted,
}

/// Draws uniformly among the `candidates` admitted by `category` whose id is not in
/// `previous`.
///
/// The eligible set is built before drawing, so the call always terminates.
pub fn pick_next_question<'a, R: Rng + ?Sized>(
    candidates: &'a [Question],
    category: QuizCategory,
    previous: &HashSet<i64>,
    rng: &mut R,
) -> Result<&'a Question, QuizError> {
    let in_category: Vec<&Question> = candidates.iter().filter(|q| category.admits(q)).collect();
    if in_category.is_empty() {
        return Err(QuizError::NoCandidates);
    }

    let remaining: Vec<&Question> = in_category
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();

    remaining
        .choose(rng)
        .copied()
        .ok_or(QuizError::Exhausted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(id: i64, category: i64) -> Question {
        Question {
            id,
            question: format!("Question {id}?"),
            answer: format!("Answer {id}"),
            difficulty: 1,
            category,
        }
    }

    fn pool() -> Vec<Question> {
        vec![
            question(1, 1),
            question(2, 1),
            question(3, 2),
            question(4, 2),
            question(5, 3),
        ]
    }

    #[test]
    fn zero_means_any_category() {
        assert_eq!(QuizCategory::from(0), QuizCategory::Any);
        assert_eq!(QuizCategory::from(4), QuizCategory::Only(4));
    }

    #[test]
    fn never_returns_a_previously_asked_question() {
        let questions = pool();
        let previous: HashSet<i64> = [1, 3, 5].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let picked = pick_next_question(&questions, QuizCategory::Any, &previous, &mut rng)
                .expect("two questions remain");
            assert!(!previous.contains(&picked.id));
        }
    }

    #[test]
    fn respects_the_requested_category() {
        let questions = pool();
        let previous = HashSet::new();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..200 {
            let picked =
                pick_next_question(&questions, QuizCategory::Only(2), &previous, &mut rng)
                    .expect("category 2 has questions");
            assert_eq!(picked.category, 2);
        }
    }

    #[test]
    fn last_remaining_question_is_always_picked() {
        let questions = pool();
        let previous: HashSet<i64> = [1, 2, 3, 4].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(3);

        let picked = pick_next_question(&questions, QuizCategory::Any, &previous, &mut rng)
            .expect("question 5 remains");
        assert_eq!(picked.id, 5);
    }

    #[test]
    fn every_remaining_question_can_be_drawn() {
        let questions = pool();
        let previous = HashSet::new();
        let mut rng = StdRng::seed_from_u64(42);

        let drawn: HashSet<i64> = (0..500)
            .map(|_| {
                pick_next_question(&questions, QuizCategory::Any, &previous, &mut rng)
                    .expect("nothing asked yet")
                    .id
            })
            .collect();
        assert_eq!(drawn, (1..=5).collect());
    }

    #[test]
    fn signals_exhaustion_once_everything_was_asked() {
        let questions = pool();
        let previous: HashSet<i64> = [1, 2].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(1);

        let result = pick_next_question(&questions, QuizCategory::Only(1), &previous, &mut rng);
        assert_eq!(result, Err(QuizError::Exhausted));
    }

    #[test]
    fn empty_candidate_set_fails_fast() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = pick_next_question(&[], QuizCategory::Any, &HashSet::new(), &mut rng);
        assert_eq!(result, Err(QuizError::NoCandidates));

        let questions = pool();
        let result =
            pick_next_question(&questions, QuizCategory::Only(99), &HashSet::new(), &mut rng);
        assert_eq!(result, Err(QuizError::NoCandidates));
    }

    #[test]
    fn unknown_previous_ids_are_ignored() {
        let questions = vec![question(10, 1)];
        let previous: HashSet<i64> = [1, 2, 3].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(5);

        let picked = pick_next_question(&questions, QuizCategory::Any, &previous, &mut rng)
            .expect("question 10 was never asked");
        assert_eq!(picked.id, 10);
    }
}
