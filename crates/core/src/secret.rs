//! 비밀 값: 로그나 출력으로 새지 않는 자격 증명 래퍼
//!
//! [`Password`]는 `secrecy::SecretString`을 감싸며,
//! `Debug`/`Display`/`Serialize` 모두 `[REDACTED]`만 출력합니다.
//! 실제 값은 [`Password::expose`]로만 꺼낼 수 있습니다.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 마스킹 문자열
pub const REDACTED: &str = "[REDACTED]";

/// 비밀 설정 값 (비밀번호, API 키, 암호 문구 등)
pub struct Password(SecretString);

impl Password {
    /// 평문으로부터 비밀 값을 생성합니다.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::from(value.into()))
    }

    /// 비밀 값을 노출합니다. 클라이언트 구성 시점에만 사용해야 합니다.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// 빈 값 여부
    pub fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }
}

impl Clone for Password {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_owned())
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for Password {}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Password({REDACTED})")
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl From<&str> for Password {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl Serialize for Password {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

impl<'de> Deserialize<'de> for Password {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Password::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_and_display_are_redacted() {
        let password = Password::new("hunter2");
        assert!(!format!("{password:?}").contains("hunter2"));
        assert_eq!(password.to_string(), REDACTED);
    }

    #[test]
    fn serialize_is_redacted() {
        let password = Password::new("hunter2");
        let json = serde_json::to_string(&password).unwrap();
        assert_eq!(json, "\"[REDACTED]\"");
    }

    #[test]
    fn deserialize_keeps_value() {
        let password: Password = serde_json::from_str("\"s3cr3t\"").unwrap();
        assert_eq!(password.expose(), "s3cr3t");
    }

    #[test]
    fn empty_detection() {
        assert!(Password::new("").is_empty());
        assert!(!Password::new("x").is_empty());
    }

    #[test]
    fn clone_preserves_value() {
        let original = Password::from("abc");
        assert_eq!(original.clone(), original);
    }
}
