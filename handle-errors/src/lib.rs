use serde::Serialize;
use warp::{
    Rejection, Reply,
    filters::{body::BodyDeserializeError, cors::CorsForbidden},
    http::StatusCode,
    reject::{InvalidQuery, MethodNotAllowed, Reject},
};

use tracing::{Level, event, instrument};

#[derive(Debug)]
pub enum Error {
    MissingParameters(&'static str),
    MissingField(&'static str),
    InvalidField(&'static str),
    QuestionNotFound(i32),
    CategoryNotFound(i32),
    NoCategories,
    PageNotFound(u32),
    NoSearchResults,
    InvalidReference(i32), // 존재하지 않는 카테고리를 참조하는 질문
    DatabaseQueryError(sqlx::Error),
}

/// 호출자에게 돌려줄 결과의 분류. 상태 코드는 이 분류로만 결정된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    BadRequest,
    Unprocessable,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "resource not found",
            ErrorKind::BadRequest => "bad request",
            ErrorKind::Unprocessable => "unprocessable",
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::QuestionNotFound(_)
            | Error::NoCategories
            | Error::PageNotFound(_)
            | Error::NoSearchResults => ErrorKind::NotFound,
            Error::MissingParameters(_) | Error::CategoryNotFound(_) => ErrorKind::BadRequest,
            Error::MissingField(_)
            | Error::InvalidField(_)
            | Error::InvalidReference(_)
            | Error::DatabaseQueryError(_) => ErrorKind::Unprocessable,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.kind().status()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &*self {
            Error::MissingParameters(name) => {
                write!(f, "Missing parameter: {}", name)
            }
            Error::MissingField(name) => {
                write!(f, "Missing field: {}", name)
            }
            Error::InvalidField(name) => {
                write!(f, "Invalid value for field: {}", name)
            }
            Error::QuestionNotFound(id) => {
                write!(f, "Question {} not found", id)
            }
            Error::CategoryNotFound(id) => {
                write!(f, "Category {} does not exist", id)
            }
            Error::NoCategories => {
                write!(f, "No categories available")
            }
            Error::PageNotFound(page) => {
                write!(f, "Page {} is empty", page)
            }
            Error::NoSearchResults => {
                write!(f, "No question matches the search term")
            }
            Error::InvalidReference(category) => {
                write!(f, "Question references unknown category {}", category)
            }
            Error::DatabaseQueryError(_) => {
                write!(f, "Cannot update, invalid data.")
            }
        }
    }
}

impl std::error::Error for Error {}

impl Reject for Error {}

#[derive(Serialize, Debug)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: &'static str,
}

fn error_reply(
    status: StatusCode,
    message: &'static str,
) -> warp::reply::WithStatus<warp::reply::Json> {
    let body = ErrorBody {
        success: false,
        error: status.as_u16(),
        message,
    };
    warp::reply::with_status(warp::reply::json(&body), status)
}

const FOREIGN_KEY_VIOLATION: &str = "23503";

#[instrument]
pub async fn return_error(r: Rejection) -> Result<impl Reply, Rejection> {
    if let Some(crate::Error::DatabaseQueryError(e)) = r.find() {
        event!(Level::ERROR, "Database query error");
        if let sqlx::Error::Database(err) = e {
            // 외래 키 위반은 없는 카테고리를 참조한 경우다.
            if err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
                event!(
                    Level::ERROR,
                    db_message = err.message(),
                    constraint = err.constraint().unwrap_or("unknown"),
                    "foreign key violation"
                );
            }
        }
        let kind = ErrorKind::Unprocessable;
        Ok(error_reply(kind.status(), kind.message()))
    } else if let Some(error) = r.find::<Error>() {
        event!(Level::ERROR, "{}", error);
        let kind = error.kind();
        Ok(error_reply(kind.status(), kind.message()))
    } else if let Some(error) = r.find::<CorsForbidden>() {
        event!(Level::ERROR, "CORS forbidden error: {}", error);
        Ok(error_reply(StatusCode::FORBIDDEN, "forbidden"))
    } else if let Some(error) = r.find::<BodyDeserializeError>() {
        event!(Level::ERROR, "Cannot deserialize request body: {}", error);
        let kind = ErrorKind::BadRequest;
        Ok(error_reply(kind.status(), kind.message()))
    } else if let Some(error) = r.find::<InvalidQuery>() {
        event!(Level::ERROR, "Cannot parse query string: {}", error);
        let kind = ErrorKind::BadRequest;
        Ok(error_reply(kind.status(), kind.message()))
    } else if r.find::<MethodNotAllowed>().is_some() {
        event!(Level::WARN, "Method not allowed");
        Ok(error_reply(StatusCode::METHOD_NOT_ALLOWED, "method not allowed"))
    } else {
        event!(Level::WARN, "Requested route was not found");
        let kind = ErrorKind::NotFound;
        Ok(error_reply(kind.status(), kind.message()))
    }
}
