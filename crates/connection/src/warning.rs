//! 검증 경고: 시작을 막지 않는 설정 문제

use std::fmt;

use serde::Serialize;

/// 시작을 막지 않지만 운영자가 알아야 하는 설정 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationWarning {
    /// 자격 증명이 암호화되지 않은 채널로 전송됨
    CredentialsOverHttp,
    /// 서버 인증서 검증이 꺼져 있음
    VerificationDisabled,
    /// TLS는 켜져 있지만 요청 자격 증명이 없음
    NoCredentials,
}

impl ValidationWarning {
    /// 메트릭 레이블로 쓰는 식별자
    pub fn code(&self) -> &'static str {
        match self {
            Self::CredentialsOverHttp => "credentials_over_http",
            Self::VerificationDisabled => "verification_disabled",
            Self::NoCredentials => "no_credentials",
        }
    }

    /// 운영자에게 보여줄 메시지
    pub fn message(&self) -> &'static str {
        match self {
            Self::CredentialsOverHttp => {
                "Credentials are being sent over unencrypted HTTP. This may bring security risk."
            }
            Self::VerificationDisabled => {
                "`ssl_verification_mode => none` disables verification of the server certificate. This may bring security risk."
            }
            Self::NoCredentials => {
                "No request credentials are configured; the cluster must allow anonymous access."
            }
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
