use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Debug, Deserialize, Clone, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    #[serde(rename = "type")]
    pub label: String,
}

#[derive(Serialize, Debug, Clone, Copy, Eq, Hash, Deserialize, PartialEq, Ord, PartialOrd)]
pub struct CategoryId(pub i32);

/// 카테고리 목록을 id -> 이름 매핑으로 바꾼다.
/// 빈 매핑을 에러로 볼지는 호출하는 쪽이 정한다.
pub fn as_mapping(categories: &[Category]) -> BTreeMap<i32, String> {
    categories
        .iter()
        .map(|category| (category.id.0, category.label.clone()))
        .collect()
}
