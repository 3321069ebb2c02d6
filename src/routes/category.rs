use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{Level, event, instrument};

use handle_errors::Error;

use crate::store::Store;
use crate::types::category::CategoryId;
use crate::types::pagination::{extract_pagination, paginate};
use crate::types::question::Question;

#[derive(Serialize, Debug)]
struct Categories {
    success: bool,
    categories: BTreeMap<i32, String>,
}

#[derive(Serialize, Debug)]
struct CategoryQuestions {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64,
    current_category: String,
}

#[instrument(skip(store))]
pub async fn get_categories(store: Store) -> Result<impl warp::Reply, warp::Rejection> {
    let categories = store.category_map().await.map_err(warp::reject::custom)?;
    if categories.is_empty() {
        return Err(warp::reject::custom(Error::NoCategories));
    }

    Ok(warp::reply::json(&Categories {
        success: true,
        categories,
    }))
}

#[instrument(skip(store))]
pub async fn get_category_questions(
    id: i32,
    params: HashMap<String, String>,
    store: Store,
    per_page: usize,
) -> Result<impl warp::Reply, warp::Rejection> {
    // 없는 카테고리는 빈 결과가 아니라 잘못된 요청이다.
    let category = match store.get_category(CategoryId(id)).await {
        Ok(Some(category)) => category,
        Ok(None) => return Err(warp::reject::custom(Error::CategoryNotFound(id))),
        Err(e) => return Err(warp::reject::custom(e)),
    };
    event!(Level::INFO, category = %category.label, "querying questions by category");

    let questions = store
        .questions_by_category(category.id)
        .await
        .map_err(warp::reject::custom)?;
    let total_questions = store
        .count_questions()
        .await
        .map_err(warp::reject::custom)?;

    Ok(warp::reply::json(&CategoryQuestions {
        success: true,
        questions: paginate(&questions, extract_pagination(&params, per_page)),
        total_questions,
        current_category: category.label,
    }))
}
