use std::collections::HashMap;
use std::num::IntErrorKind;

/// 설정에 값이 없을 때 쓰는 페이지당 질문 수
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Pagination 구조체는 쿼리 매개변수에서 추출된다
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1부터 시작하는 페이지 번호
    pub page: u32,
    /// 한 페이지에 담을 아이템 수. 호출자가 바꿀 수 없고 설정에서만 정해진다.
    pub per_page: usize,
}

impl Pagination {
    /// 0 이하의 페이지는 1로 맞춘다.
    pub fn new(page: i64, per_page: usize) -> Self {
        Pagination {
            page: page.clamp(1, u32::MAX as i64) as u32,
            per_page: per_page.max(1),
        }
    }

    /// 창의 첫 번째 인덱스. 계산이 넘치면 None이다.
    pub fn offset(&self) -> Option<usize> {
        (self.page as usize - 1).checked_mul(self.per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            page: 1,
            per_page: QUESTIONS_PER_PAGE,
        }
    }
}

/// 매개변수를 /questions 경로에서 추출하기
/// # 예제 쿼리
/// ```text
/// /questions?page=2
/// ```
/// page가 없거나 숫자가 아니면 첫 페이지를 돌려준다.
/// i64보다 큰 숫자는 마지막 페이지 너머로 본다.
pub fn extract_pagination(params: &HashMap<String, String>, per_page: usize) -> Pagination {
    let page = match params.get("page").map(|page| page.trim().parse::<i64>()) {
        Some(Ok(page)) => page,
        Some(Err(e)) if *e.kind() == IntErrorKind::PosOverflow => i64::MAX,
        _ => 1,
    };
    Pagination::new(page, per_page)
}

/// 정렬된 결과에서 [(page-1)*per_page, page*per_page) 구간을 잘라낸다.
/// 마지막 페이지를 넘어가면 빈 벡터다.
pub fn paginate<T: Clone>(items: &[T], pagination: Pagination) -> Vec<T> {
    match pagination.offset() {
        Some(start) if start < items.len() => items[start..]
            .iter()
            .take(pagination.per_page)
            .cloned()
            .collect(),
        _ => Vec::new(),
    }
}
