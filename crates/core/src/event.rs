//! 이벤트: 필터가 보강 엔진과 주고받는 레코드
//!
//! [`Event`]는 JSON 객체 형태의 필드 집합과 태그 목록을 가집니다.
//! 호스트 런타임의 고유 이벤트 타입과의 변환은 이 크레이트의 범위가 아닙니다.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 태그 필드 이름
pub const TAGS_FIELD: &str = "tags";

/// 필터를 통과하는 이벤트
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// 이벤트 고유 ID (UUID v4)
    pub id: String,
    /// 이벤트 필드
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Event {
    /// 빈 이벤트를 생성합니다.
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            fields: Map::new(),
        }
    }

    /// 주어진 필드로 이벤트를 생성합니다.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            ..Self::new()
        }
    }

    /// 최상위 필드 값을 조회합니다.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// 최상위 필드 값을 설정하고 이전 값을 돌려줍니다.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// 태그 목록
    pub fn tags(&self) -> Vec<&str> {
        match self.fields.get(TAGS_FIELD) {
            Some(Value::Array(tags)) => tags.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(tag)) => vec![tag.as_str()],
            _ => Vec::new(),
        }
    }

    /// 태그를 추가합니다. 이미 있으면 무시합니다.
    ///
    /// `tags`가 단일 문자열이면 배열로 바꾼 뒤 추가합니다.
    pub fn add_tag(&mut self, tag: &str) {
        let mut tags = match self.fields.remove(TAGS_FIELD) {
            Some(Value::Array(tags)) => tags,
            Some(Value::String(existing)) => vec![Value::String(existing)],
            _ => Vec::new(),
        };
        if !tags.iter().any(|t| t.as_str() == Some(tag)) {
            tags.push(Value::String(tag.to_owned()));
        }
        self.fields.insert(TAGS_FIELD.to_owned(), Value::Array(tags));
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event={} fields={}", self.id, self.fields.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_event_has_uuid_and_no_fields() {
        let event = Event::new();
        assert_eq!(event.id.len(), 36);
        assert!(event.fields.is_empty());
    }

    #[test]
    fn set_returns_previous_value() {
        let mut event = Event::new();
        assert!(event.set("message", "hello").is_none());
        let previous = event.set("message", "bye");
        assert_eq!(previous, Some(json!("hello")));
        assert_eq!(event.get("message"), Some(&json!("bye")));
    }

    #[test]
    fn add_tag_creates_array_and_deduplicates() {
        let mut event = Event::new();
        event.add_tag("a");
        event.add_tag("b");
        event.add_tag("a");
        assert_eq!(event.tags(), vec!["a", "b"]);
    }

    #[test]
    fn add_tag_promotes_single_string() {
        let mut event = Event::new();
        event.set(TAGS_FIELD, "first");
        event.add_tag("second");
        assert_eq!(event.tags(), vec!["first", "second"]);
    }

    #[test]
    fn add_tag_replaces_non_tag_value() {
        let mut event = Event::new();
        event.set(TAGS_FIELD, 42);
        event.add_tag("x");
        assert_eq!(event.tags(), vec!["x"]);
    }

    #[test]
    fn display_is_compact() {
        let mut event = Event::new();
        event.set("a", 1);
        assert!(event.to_string().ends_with("fields=1"));
    }
}
