use serde::Deserialize;
use std::collections::HashSet;

use handle_errors::Error;

use crate::types::category::CategoryId;
use crate::types::question::{QuestionId, int_or_string};

/// "모든 카테고리"를 뜻하는 카테고리 id
pub const ALL_CATEGORIES: i32 = 0;

/// POST /quizzes 본문. 지금까지 본 질문 목록은 매 요청마다 클라이언트가 보낸다.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct QuizRequest {
    pub previous_questions: Option<Vec<i32>>,
    pub quiz_category: Option<QuizCategory>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct QuizCategory {
    #[serde(default, deserialize_with = "int_or_string")]
    pub id: Option<i32>,
}

/// 질문 후보를 어디서 가져올지
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    All,
    Category(CategoryId),
}

impl QuizScope {
    pub fn from_category_id(id: i32) -> Self {
        if id == ALL_CATEGORIES {
            QuizScope::All
        } else {
            QuizScope::Category(CategoryId(id))
        }
    }
}

/// 검증을 마친 퀴즈 요청
#[derive(Debug, Clone, PartialEq)]
pub struct QuizQuery {
    pub scope: QuizScope,
    pub seen: HashSet<QuestionId>,
}

impl TryFrom<QuizRequest> for QuizQuery {
    type Error = Error;

    fn try_from(request: QuizRequest) -> Result<Self, Self::Error> {
        let previous = request
            .previous_questions
            .ok_or(Error::MissingParameters("previous_questions"))?;
        let category_id = request
            .quiz_category
            .and_then(|category| category.id)
            .ok_or(Error::MissingParameters("quiz_category"))?;

        Ok(QuizQuery {
            scope: QuizScope::from_category_id(category_id),
            seen: previous.into_iter().map(QuestionId).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: serde_json::Value) -> Result<QuizQuery, Error> {
        let request: QuizRequest = serde_json::from_value(body).unwrap();
        QuizQuery::try_from(request)
    }

    #[test]
    fn zero_means_every_category() {
        let query = parse(json!({
            "previous_questions": [],
            "quiz_category": {"type": "click", "id": 0}
        }))
        .unwrap();
        assert_eq!(query.scope, QuizScope::All);
        assert!(query.seen.is_empty());
    }

    #[test]
    fn string_category_id_is_accepted() {
        let query = parse(json!({
            "previous_questions": [20, 21, 20],
            "quiz_category": {"type": "Science", "id": "1"}
        }))
        .unwrap();
        assert_eq!(query.scope, QuizScope::Category(CategoryId(1)));
        assert_eq!(query.seen.len(), 2);
        assert!(query.seen.contains(&QuestionId(21)));
    }

    #[test]
    fn missing_history_is_a_bad_request() {
        let result = parse(json!({"quiz_category": {"type": "Art", "id": 2}}));
        assert!(matches!(result, Err(Error::MissingParameters("previous_questions"))));
    }

    #[test]
    fn missing_category_is_a_bad_request() {
        let result = parse(json!({"previous_questions": [1]}));
        assert!(matches!(result, Err(Error::MissingParameters("quiz_category"))));

        let result = parse(json!({"previous_questions": [1], "quiz_category": {"type": "Art"}}));
        assert!(matches!(result, Err(Error::MissingParameters("quiz_category"))));
    }
}
