use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{Level, event, instrument};

use handle_errors::Error;

use crate::store::Store;
use crate::types::pagination::{Pagination, extract_pagination, paginate};
use crate::types::question::{NewQuestion, Question, QuestionId, QuestionPayload};

#[derive(Serialize, Debug)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64,
    categories: BTreeMap<i32, String>,
}

#[derive(Serialize, Debug)]
struct SearchPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64, // 검색 결과 수가 아니라 전체 질문 수
}

#[derive(Serialize, Debug)]
struct Created {
    success: bool,
    created: i32,
    question_created: String,
    questions: Vec<Question>,
    total_questions: i64,
}

#[derive(Serialize, Debug)]
struct Deleted {
    success: bool,
    deleted: i32,
}

#[derive(Deserialize, Debug)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

#[instrument(skip(store))]
pub async fn get_questions(
    params: HashMap<String, String>,
    store: Store,
    per_page: usize,
) -> Result<impl warp::Reply, warp::Rejection> {
    event!(target: "trivia_api", Level::INFO, "querying questions");
    let pagination = extract_pagination(&params, per_page);

    let questions = store
        .list_questions()
        .await
        .map_err(warp::reject::custom)?;
    let page = paginate(&questions, pagination);
    if page.is_empty() {
        return Err(warp::reject::custom(Error::PageNotFound(pagination.page)));
    }

    let categories = store.category_map().await.map_err(warp::reject::custom)?;
    Ok(warp::reply::json(&QuestionsPage {
        success: true,
        questions: page,
        total_questions: questions.len() as i64,
        categories,
    }))
}

/// POST /questions는 본문에 따라 검색이거나 생성이다.
#[instrument(skip(store))]
pub async fn post_questions(
    params: HashMap<String, String>,
    store: Store,
    per_page: usize,
    payload: QuestionPayload,
) -> Result<impl warp::Reply, warp::Rejection> {
    let pagination = extract_pagination(&params, per_page);
    let search_term = payload.search_term().map(str::to_string);
    let result = match search_term {
        Some(term) => search_page(&store, &term, pagination).await,
        None => create_question(&store, payload, pagination).await,
    };

    match result {
        Ok(reply) => Ok(reply),
        Err(e) => Err(warp::reject::custom(e)),
    }
}

/// 빈 문자열을 포함해 어떤 검색어든 받는다.
#[instrument(skip(store))]
pub async fn search_questions(
    params: HashMap<String, String>,
    store: Store,
    per_page: usize,
    request: SearchRequest,
) -> Result<impl warp::Reply, warp::Rejection> {
    let term = request
        .search_term
        .ok_or(Error::MissingParameters("searchTerm"))
        .map_err(warp::reject::custom)?;
    let pagination = extract_pagination(&params, per_page);

    match search_page(&store, &term, pagination).await {
        Ok(reply) => Ok(reply),
        Err(e) => Err(warp::reject::custom(e)),
    }
}

#[instrument(skip(store))]
pub async fn delete_question(id: i32, store: Store) -> Result<impl warp::Reply, warp::Rejection> {
    match store.delete_question(QuestionId(id)).await {
        Ok(_) => {
            event!(Level::INFO, question = id, "question deleted");
            Ok(warp::reply::json(&Deleted {
                success: true,
                deleted: id,
            }))
        }
        Err(e) => Err(warp::reject::custom(e)),
    }
}

async fn search_page(
    store: &Store,
    term: &str,
    pagination: Pagination,
) -> Result<warp::reply::Json, Error> {
    let found = store.search_questions(term).await?;
    // 페이지가 아니라 전체 검색 결과가 비었을 때만 404다.
    if found.is_empty() {
        return Err(Error::NoSearchResults);
    }
    let total_questions = store.count_questions().await?;

    Ok(warp::reply::json(&SearchPage {
        success: true,
        questions: paginate(&found, pagination),
        total_questions,
    }))
}

async fn create_question(
    store: &Store,
    payload: QuestionPayload,
    pagination: Pagination,
) -> Result<warp::reply::Json, Error> {
    let new_question = NewQuestion::try_from(payload)?;
    let question = store.add_question(new_question).await?;
    event!(Level::INFO, question = question.id.0, "question created");

    let questions = store.list_questions().await?;
    Ok(warp::reply::json(&Created {
        success: true,
        created: question.id.0,
        question_created: question.text,
        questions: paginate(&questions, pagination),
        total_questions: questions.len() as i64,
    }))
}
