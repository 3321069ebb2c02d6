use serde::Serialize;
use tracing::{Level, event, instrument};

use crate::quiz::{Draw, draw_next};
use crate::store::Store;
use crate::types::question::Question;
use crate::types::quiz::{QuizQuery, QuizRequest, QuizScope};

#[derive(Serialize, Debug)]
struct QuizReply {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<Question>,
}

/// 서버는 퀴즈 상태를 들고 있지 않는다. 본 질문 목록은 매번 요청에 실려 온다.
#[instrument(skip(store))]
pub async fn play_quiz(
    store: Store,
    request: QuizRequest,
) -> Result<impl warp::Reply, warp::Rejection> {
    let query = QuizQuery::try_from(request).map_err(warp::reject::custom)?;

    let pool = match query.scope {
        QuizScope::All => store.list_questions().await,
        QuizScope::Category(id) => store.questions_by_category(id).await,
    }
    .map_err(warp::reject::custom)?;

    let draw = draw_next(&pool, &query.seen, &mut rand::thread_rng());
    let question = match draw {
        Draw::Drawn(question) => {
            event!(Level::INFO, question = question.id.0, "question drawn");
            Some(question)
        }
        Draw::Exhausted => {
            event!(Level::INFO, seen = query.seen.len(), "quiz exhausted");
            None
        }
    };

    Ok(warp::reply::json(&QuizReply {
        success: true,
        question,
    }))
}
