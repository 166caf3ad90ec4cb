/// 크레이트 공통 에러 타입
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum HangulError {
    /// 등록되지 않은 자판 식별자
    #[error("unknown keyboard layout: {0}")]
    UnknownLayout(String),

    /// 초성/중성/종성 인덱스로 음절을 합성할 수 없음
    #[error("invalid jamo combination: L={l} V={v} T={t}")]
    InvalidCombination { l: u32, v: u32, t: u32 },

    /// 자판 JSON5 파싱/검증 실패
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// 이미 해제되었거나 존재하지 않는 세션 핸들
    #[error("invalid session handle: {0}")]
    InvalidHandle(u64),
}

pub type Result<T> = std::result::Result<T, HangulError>;
