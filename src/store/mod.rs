use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

use handle_errors::Error;

use crate::types::{
    category::{Category, CategoryId, as_mapping},
    question::{NewQuestion, Question, QuestionId},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// 경로 핸들러에 넘기는 저장소. 백엔드는 PostgreSQL이거나 메모리다.
pub type Store = Arc<dyn TriviaStore>;

/// 질문과 카테고리에 대한 읽기/쓰기.
///
/// 목록은 모두 id 오름차순이다. 데이터가 바뀌지 않는 한 같은 페이지는 같은 결과를 낸다.
#[async_trait]
pub trait TriviaStore: std::fmt::Debug + Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, Error>;

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, Error>;

    async fn list_questions(&self) -> Result<Vec<Question>, Error>;

    async fn count_questions(&self) -> Result<i64, Error>;

    /// 질문 본문(답이 아니라)에 대해 대소문자를 무시한 부분 문자열 검색.
    /// 빈 검색어는 모든 질문과 일치한다.
    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, Error>;

    /// 없는 카테고리면 빈 벡터다. 카테고리가 있는지는 호출하는 쪽이 먼저 확인한다.
    async fn questions_by_category(&self, id: CategoryId) -> Result<Vec<Question>, Error>;

    async fn add_question(&self, new_question: NewQuestion) -> Result<Question, Error>;

    /// 없는 id는 `Error::QuestionNotFound`, 그 밖의 실패는 저장소 에러다.
    async fn delete_question(&self, id: QuestionId) -> Result<(), Error>;

    async fn category_map(&self) -> Result<BTreeMap<i32, String>, Error> {
        let categories = self.list_categories().await?;
        Ok(as_mapping(&categories))
    }
}
