use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};

use handle_errors::Error;

use crate::store::TriviaStore;
use crate::types::{
    category::{Category, CategoryId},
    question::{NewQuestion, Question, QuestionId},
};

#[derive(Debug, Clone)]
pub struct PgStore {
    pub connection: PgPool,
}

impl PgStore {
    pub async fn new(db_url: &str) -> Result<Self, Error> {
        match PgPoolOptions::new()
            .max_connections(5)
            .connect(db_url)
            .await
        {
            Ok(pool) => Ok(PgStore { connection: pool }),
            Err(error) => {
                tracing::event!(tracing::Level::ERROR, "cannot connect to database: {:?}", error);
                Err(Error::DatabaseQueryError(error))
            }
        }
    }
}

fn question_from_row(row: PgRow) -> Question {
    Question {
        id: QuestionId(row.get("id")),
        text: row.get("question"),
        answer: row.get("answer"),
        difficulty: row.get("difficulty"),
        category_id: CategoryId(row.get("category")),
    }
}

fn category_from_row(row: PgRow) -> Category {
    Category {
        id: CategoryId(row.get("id")),
        label: row.get("type"),
    }
}

/// ILIKE 패턴에서 검색어가 문자 그대로 일치하도록 와일드카드를 이스케이프한다.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn query_error(error: sqlx::Error) -> Error {
    tracing::event!(tracing::Level::ERROR, "{:?}", error);
    Error::DatabaseQueryError(error)
}

#[async_trait]
impl TriviaStore for PgStore {
    async fn list_categories(&self) -> Result<Vec<Category>, Error> {
        sqlx::query("SELECT id, type FROM categories ORDER BY id")
            .map(category_from_row)
            .fetch_all(&self.connection)
            .await
            .map_err(query_error)
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, Error> {
        sqlx::query("SELECT id, type FROM categories WHERE id = $1")
            .bind(id.0)
            .map(category_from_row)
            .fetch_optional(&self.connection) // 없으면 None이다.
            .await
            .map_err(query_error)
    }

    async fn list_questions(&self) -> Result<Vec<Question>, Error> {
        match sqlx::query(
            "SELECT id, question, answer, difficulty, category
            FROM questions
            ORDER BY id",
        )
        .map(question_from_row)
        .fetch_all(&self.connection)
        .await
        {
            Ok(questions) => Ok(questions),
            Err(error) => Err(query_error(error)),
        }
    }

    async fn count_questions(&self) -> Result<i64, Error> {
        sqlx::query("SELECT COUNT(*) AS total FROM questions")
            .map(|row: PgRow| row.get::<i64, _>("total"))
            .fetch_one(&self.connection)
            .await
            .map_err(query_error)
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, Error> {
        match sqlx::query(
            "SELECT id, question, answer, difficulty, category
            FROM questions
            WHERE question ILIKE $1
            ORDER BY id",
        )
        .bind(like_pattern(term))
        .map(question_from_row)
        .fetch_all(&self.connection)
        .await
        {
            Ok(questions) => Ok(questions),
            Err(error) => Err(query_error(error)),
        }
    }

    async fn questions_by_category(&self, id: CategoryId) -> Result<Vec<Question>, Error> {
        match sqlx::query(
            "SELECT id, question, answer, difficulty, category
            FROM questions
            WHERE category = $1
            ORDER BY id",
        )
        .bind(id.0)
        .map(question_from_row)
        .fetch_all(&self.connection)
        .await
        {
            Ok(questions) => Ok(questions),
            Err(error) => Err(query_error(error)),
        }
    }

    async fn add_question(&self, new_question: NewQuestion) -> Result<Question, Error> {
        match sqlx::query(
            "INSERT INTO questions (question, answer, difficulty, category)
            VALUES ($1, $2, $3, $4)
            RETURNING id, question, answer, difficulty, category",
        )
        .bind(new_question.text)
        .bind(new_question.answer)
        .bind(new_question.difficulty)
        .bind(new_question.category_id.0)
        .map(question_from_row)
        .fetch_one(&self.connection)
        .await
        {
            Ok(question) => Ok(question),
            Err(error) => Err(query_error(error)),
        }
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), Error> {
        match sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id.0)
            .execute(&self.connection)
            .await
        {
            Ok(result) if result.rows_affected() == 0 => Err(Error::QuestionNotFound(id.0)),
            Ok(_) => Ok(()),
            Err(error) => Err(query_error(error)),
        }
    }
}
