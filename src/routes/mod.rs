use handle_errors::return_error;
use warp::{Filter, http::Method};

use crate::store::Store;

pub mod category;
pub mod question;
pub mod quiz;

/// 전체 API. main과 테스트가 같은 필터를 쓴다.
pub fn api(
    store: Store,
    per_page: usize,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let store_filter = warp::any().map(move || store.clone());
    let per_page_filter = warp::any().map(move || per_page);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["Content-Type", "Authorization"])
        .allow_methods(&[
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]);

    // 경로를 메서드보다 먼저 검사해야 없는 경로가 405가 아니라 404로 떨어진다.
    let get_categories = warp::path("categories")
        .and(warp::path::end())
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(category::get_categories);

    let get_category_questions = warp::path("categories")
        .and(warp::path::param::<i32>())
        .and(warp::path("questions"))
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query())
        .and(store_filter.clone())
        .and(per_page_filter.clone())
        .and_then(category::get_category_questions);

    let get_questions = warp::path("questions")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query())
        .and(store_filter.clone())
        .and(per_page_filter.clone())
        .and_then(question::get_questions)
        .with(warp::trace(|info| {
            tracing::info_span!(
                "get_questions request",
                method = %info.method(),
                path = %info.path(),
                id = %uuid::Uuid::new_v4(),
            )
        }));

    let post_questions = warp::path("questions")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::query())
        .and(store_filter.clone())
        .and(per_page_filter.clone())
        .and(warp::body::json())
        .and_then(question::post_questions);

    let search_questions = warp::path("questions")
        .and(warp::path("search"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::query())
        .and(store_filter.clone())
        .and(per_page_filter.clone())
        .and(warp::body::json())
        .and_then(question::search_questions);

    let delete_question = warp::path("questions")
        .and(warp::path::param::<i32>())
        .and(warp::path::end())
        .and(warp::delete())
        .and(store_filter.clone())
        .and_then(question::delete_question);

    let play_quiz = warp::path("quizzes")
        .and(warp::path::end())
        .and(warp::post())
        .and(store_filter.clone())
        .and(warp::body::json())
        .and_then(quiz::play_quiz)
        .with(warp::trace(|info| {
            tracing::info_span!(
                "play_quiz request",
                method = %info.method(),
                path = %info.path(),
                id = %uuid::Uuid::new_v4(),
            )
        }));

    get_categories
        .or(get_category_questions)
        .or(get_questions)
        .or(post_questions)
        .or(search_questions)
        .or(delete_question)
        .or(play_quiz)
        .with(cors)
        .with(warp::trace::request())
        .recover(return_error)
}
