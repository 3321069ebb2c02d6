use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use handle_errors::Error;

use crate::store::TriviaStore;
use crate::types::{
    category::{Category, CategoryId},
    question::{NewQuestion, Question, QuestionId},
};

#[derive(Debug)]
struct Tables {
    categories: BTreeMap<CategoryId, Category>,
    questions: BTreeMap<QuestionId, Question>,
    next_id: i32,
}

#[derive(Deserialize)]
struct Seed {
    categories: Vec<Category>,
    questions: Vec<Question>,
}

/// 메모리에 두는 저장소. BTreeMap이라 id 순서가 그대로 목록 순서다.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new(categories: Vec<Category>, questions: Vec<Question>) -> Self {
        let next_id = questions.iter().map(|q| q.id.0).max().unwrap_or(0) + 1;
        let tables = Tables {
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            questions: questions.into_iter().map(|q| (q.id, q)).collect(),
            next_id,
        };
        MemoryStore {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    /// migrations의 시드와 같은 데이터로 채운다.
    pub fn seeded() -> Result<Self, serde_json::Error> {
        let file = include_str!("../../fixtures/trivia.json");
        let seed: Seed = serde_json::from_str(file)?;
        Ok(Self::new(seed.categories, seed.questions))
    }
}

#[async_trait]
impl TriviaStore for MemoryStore {
    async fn list_categories(&self) -> Result<Vec<Category>, Error> {
        Ok(self.tables.read().await.categories.values().cloned().collect())
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, Error> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn list_questions(&self) -> Result<Vec<Question>, Error> {
        Ok(self.tables.read().await.questions.values().cloned().collect())
    }

    async fn count_questions(&self) -> Result<i64, Error> {
        Ok(self.tables.read().await.questions.len() as i64)
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, Error> {
        let term = term.to_lowercase();
        Ok(self
            .tables
            .read()
            .await
            .questions
            .values()
            .filter(|q| q.text.to_lowercase().contains(&term))
            .cloned()
            .collect())
    }

    async fn questions_by_category(&self, id: CategoryId) -> Result<Vec<Question>, Error> {
        Ok(self
            .tables
            .read()
            .await
            .questions
            .values()
            .filter(|q| q.category_id == id)
            .cloned()
            .collect())
    }

    async fn add_question(&self, new_question: NewQuestion) -> Result<Question, Error> {
        let mut tables = self.tables.write().await;
        // PostgreSQL의 외래 키 제약과 같은 검사
        if !tables.categories.contains_key(&new_question.category_id) {
            tracing::event!(
                tracing::Level::ERROR,
                category = new_question.category_id.0,
                "insert references unknown category"
            );
            return Err(Error::InvalidReference(new_question.category_id.0));
        }

        let question = Question {
            id: QuestionId(tables.next_id),
            text: new_question.text,
            answer: new_question.answer,
            difficulty: new_question.difficulty,
            category_id: new_question.category_id,
        };
        tables.next_id += 1;
        tables.questions.insert(question.id, question.clone());
        Ok(question)
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), Error> {
        match self.tables.write().await.questions.remove(&id) {
            Some(_) => Ok(()),
            None => Err(Error::QuestionNotFound(id.0)),
        }
    }
}
