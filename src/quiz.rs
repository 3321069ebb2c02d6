use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use crate::types::question::{Question, QuestionId};

#[derive(Debug, Clone, PartialEq)]
pub enum Draw {
    Drawn(Question),
    /// 후보 중 아직 보지 않은 질문이 없다. 에러가 아니라 퀴즈의 정상적인 끝이다.
    Exhausted,
}

/// 본 적 없는 질문 하나를 균등하게 뽑는다.
///
/// 먼저 `seen`에 있는 id를 걸러낸 뒤 남은 후보에서 뽑으므로 항상 끝난다.
/// `seen`에 후보에 없는 id나 중복이 있어도 결과는 같다.
pub fn draw_next<R>(pool: &[Question], seen: &HashSet<QuestionId>, rng: &mut R) -> Draw
where
    R: Rng + ?Sized,
{
    let candidates: Vec<&Question> = pool
        .iter()
        .filter(|question| !seen.contains(&question.id))
        .collect();

    match candidates.choose(rng) {
        Some(question) => Draw::Drawn((*question).clone()),
        None => Draw::Exhausted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::category::CategoryId;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn question(id: i32) -> Question {
        Question {
            id: QuestionId(id),
            text: format!("question {}", id),
            answer: format!("answer {}", id),
            difficulty: 1,
            category_id: CategoryId(1),
        }
    }

    fn pool(ids: &[i32]) -> Vec<Question> {
        ids.iter().copied().map(question).collect()
    }

    fn seen(ids: &[i32]) -> HashSet<QuestionId> {
        ids.iter().copied().map(QuestionId).collect()
    }

    #[test]
    fn empty_pool_is_exhausted() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(draw_next(&[], &seen(&[]), &mut rng), Draw::Exhausted);
    }

    #[test]
    fn foreign_ids_in_history_do_not_hang() {
        let mut rng = StdRng::seed_from_u64(7);
        let result = draw_next(&pool(&[1, 2, 3]), &seen(&[1, 2, 3, 99]), &mut rng);
        assert_eq!(result, Draw::Exhausted);
    }

    #[test]
    fn history_larger_than_pool_still_draws_the_remaining_question() {
        // 개수만 비교하면 여기서 잘못 끝난다.
        let mut rng = StdRng::seed_from_u64(3);
        let result = draw_next(&pool(&[1, 2, 3]), &seen(&[1, 2, 98, 99]), &mut rng);
        assert_eq!(result, Draw::Drawn(question(3)));
    }

    #[test]
    fn walking_the_pool_visits_every_question_once() {
        let mut rng = StdRng::seed_from_u64(42);
        let questions = pool(&[5, 9, 12, 20, 23]);
        let mut history = HashSet::new();

        while let Draw::Drawn(next) = draw_next(&questions, &history, &mut rng) {
            assert!(history.insert(next.id), "question {:?} repeated", next.id);
        }
        assert_eq!(history, seen(&[5, 9, 12, 20, 23]));
    }

    #[test]
    fn inputs_are_left_untouched() {
        let mut rng = StdRng::seed_from_u64(11);
        let questions = pool(&[1, 2]);
        let history = seen(&[1]);
        draw_next(&questions, &history, &mut rng);
        assert_eq!(questions, pool(&[1, 2]));
        assert_eq!(history, seen(&[1]));
    }

    #[test]
    fn every_candidate_can_be_drawn() {
        let mut rng = StdRng::seed_from_u64(2024);
        let questions = pool(&[1, 2, 3, 4]);
        let history = seen(&[4]);
        let mut drawn = HashSet::new();
        for _ in 0..200 {
            if let Draw::Drawn(next) = draw_next(&questions, &history, &mut rng) {
                drawn.insert(next.id);
            }
        }
        assert_eq!(drawn, seen(&[1, 2, 3]));
    }

    proptest! {
        #[test]
        fn drawn_question_is_unseen_and_from_the_pool(
            ids in prop::collection::hash_set(0i32..60, 0..30),
            history in prop::collection::vec(0i32..80, 0..60),
            seed in any::<u64>(),
        ) {
            let ids: Vec<i32> = ids.into_iter().collect();
            let questions = pool(&ids);
            let history = seen(&history);
            let mut rng = StdRng::seed_from_u64(seed);

            match draw_next(&questions, &history, &mut rng) {
                Draw::Drawn(next) => {
                    prop_assert!(!history.contains(&next.id));
                    prop_assert!(questions.contains(&next));
                }
                Draw::Exhausted => {
                    prop_assert!(questions.iter().all(|q| history.contains(&q.id)));
                }
            }
        }
    }
}
