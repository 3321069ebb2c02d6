use serde::{Deserialize, Deserializer, Serialize};

use handle_errors::Error;

use crate::types::category::CategoryId;

#[derive(Serialize, Debug, Deserialize, Clone, PartialEq)]
pub struct Question {
    pub id: QuestionId,
    #[serde(rename = "question")]
    pub text: String,
    pub answer: String,
    pub difficulty: i32,
    #[serde(rename = "category")]
    pub category_id: CategoryId,
}

#[derive(Serialize, Debug, Clone, Copy, Eq, Hash, Deserialize, PartialEq, Ord, PartialOrd)]
pub struct QuestionId(pub i32);

/// 저장소에 넣을 수 있는 질문. 네 필드가 모두 있어야 만들어진다.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuestion {
    pub text: String,
    pub answer: String,
    pub difficulty: i32,
    pub category_id: CategoryId,
}

/// POST /questions 본문. searchTerm이 있으면 검색, 없으면 질문 생성으로 처리한다.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct QuestionPayload {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "number_field")]
    pub difficulty: Option<NumberField>,
    #[serde(default, deserialize_with = "number_field")]
    pub category: Option<NumberField>,
}

/// 숫자 필드에 들어온 값. 숫자로 읽을 수 없는 값은 생성할 때 거절한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberField {
    Valid(i32),
    Invalid,
}

impl QuestionPayload {
    /// 빈 문자열은 검색어로 보지 않는다.
    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref().filter(|term| !term.is_empty())
    }
}

impl TryFrom<QuestionPayload> for NewQuestion {
    type Error = Error;

    fn try_from(payload: QuestionPayload) -> Result<Self, Self::Error> {
        Ok(NewQuestion {
            text: payload.question.ok_or(Error::MissingField("question"))?,
            answer: payload.answer.ok_or(Error::MissingField("answer"))?,
            difficulty: required_number(payload.difficulty, "difficulty")?,
            category_id: CategoryId(required_number(payload.category, "category")?),
        })
    }
}

fn required_number(field: Option<NumberField>, name: &'static str) -> Result<i32, Error> {
    match field {
        Some(NumberField::Valid(value)) => Ok(value),
        Some(NumberField::Invalid) => Err(Error::InvalidField(name)),
        None => Err(Error::MissingField(name)),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i32),
    Str(String),
    Other(serde_json::Value),
}

impl IntOrString {
    fn into_number(self) -> Option<i32> {
        match self {
            IntOrString::Int(value) => Some(value),
            IntOrString::Str(value) => value.trim().parse::<i32>().ok(),
            IntOrString::Other(_) => None,
        }
    }
}

/// 프런트엔드는 숫자 필드를 숫자로도, "3" 같은 문자열로도 보낸다.
pub(crate) fn int_or_string<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IntOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value) => value
            .into_number()
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom("expected an integer or a numeric string")),
    }
}

/// 읽을 수 없는 값도 본문 해석은 통과시키고 `NumberField::Invalid`로 남긴다.
fn number_field<'de, D>(deserializer: D) -> Result<Option<NumberField>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<IntOrString>::deserialize(deserializer)?;
    Ok(value.map(|value| match value.into_number() {
        Some(number) => NumberField::Valid(number),
        None => NumberField::Invalid,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_wire_field_names() {
        let question = Question {
            id: QuestionId(5),
            text: "Who discovered penicillin?".to_string(),
            answer: "Alexander Fleming".to_string(),
            difficulty: 3,
            category_id: CategoryId(1),
        };
        assert_eq!(
            serde_json::to_value(&question).unwrap(),
            json!({
                "id": 5,
                "question": "Who discovered penicillin?",
                "answer": "Alexander Fleming",
                "difficulty": 3,
                "category": 1
            })
        );
    }

    #[test]
    fn payload_accepts_numeric_strings() {
        let payload: QuestionPayload = serde_json::from_value(json!({
            "question": "q",
            "answer": "a",
            "difficulty": "2",
            "category": "4"
        }))
        .unwrap();
        let new_question = NewQuestion::try_from(payload).unwrap();
        assert_eq!(new_question.difficulty, 2);
        assert_eq!(new_question.category_id, CategoryId(4));
    }

    #[test]
    fn missing_field_is_reported_by_name() {
        let payload: QuestionPayload = serde_json::from_value(json!({
            "question": "q",
            "difficulty": 1,
            "category": 1
        }))
        .unwrap();
        match NewQuestion::try_from(payload) {
            Err(Error::MissingField(field)) => assert_eq!(field, "answer"),
            other => panic!("expected missing answer, got {:?}", other),
        }
    }

    #[test]
    fn null_counts_as_missing() {
        let payload: QuestionPayload = serde_json::from_value(json!({
            "question": null,
            "answer": "a",
            "difficulty": 1,
            "category": null
        }))
        .unwrap();
        assert!(matches!(
            NewQuestion::try_from(payload),
            Err(Error::MissingField("question"))
        ));
    }

    #[test]
    fn unreadable_number_is_unprocessable() {
        for difficulty in [json!("hard"), json!(2.0), json!([1])] {
            let payload: QuestionPayload = serde_json::from_value(json!({
                "question": "q",
                "answer": "a",
                "difficulty": difficulty,
                "category": 1
            }))
            .unwrap();
            assert_eq!(payload.difficulty, Some(NumberField::Invalid));
            assert!(matches!(
                NewQuestion::try_from(payload),
                Err(Error::InvalidField("difficulty"))
            ));
        }

        let payload: QuestionPayload = serde_json::from_value(json!({
            "question": "q",
            "answer": "a",
            "difficulty": 1,
            "category": "Science"
        }))
        .unwrap();
        assert!(matches!(
            NewQuestion::try_from(payload),
            Err(Error::InvalidField("category"))
        ));
    }

    #[test]
    fn empty_search_term_is_not_a_search() {
        let payload = QuestionPayload {
            search_term: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(payload.search_term(), None);

        let payload = QuestionPayload {
            search_term: Some("title".to_string()),
            ..Default::default()
        };
        assert_eq!(payload.search_term(), Some("title"));
    }
}
