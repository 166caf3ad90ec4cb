/// JSON5 자판 레이아웃 스키마용 serde 타입
use std::collections::HashMap;

use serde::Deserialize;

/// 자판 타입. 현재는 자모(두벌식 계열) 자판만 지원한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutType {
    Jamo,
}

impl LayoutType {
    /// 키를 로마자 발음으로 받아 한글로 옮기는 자판인지
    pub fn is_transliteration(self) -> bool {
        match self {
            LayoutType::Jamo => false,
        }
    }
}

/// 한손 자판의 손 방향
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    #[default]
    None,
    Left,
    Right,
}

/// 추가 조합 규칙 항목 (표준 겹모음/겹받침 외)
#[derive(Debug, Clone, Deserialize)]
pub struct CombinationEntry {
    /// 첫째 자모 (16진수 문자열, 예: "0x3157")
    pub first: String,
    /// 둘째 자모 (16진수 문자열, 예: "0x314F")
    pub second: String,
    /// 결합 결과 (16진수 문자열, 예: "0x3158")
    pub result: String,
}

/// 레이아웃 옵션
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutOptions {
    /// 갈마들이: `galmadeuli` 표의 키가 자음/모음 두 후보를 가진다
    #[serde(default)]
    pub galmadeuli: bool,
    #[serde(default)]
    pub hand: Hand,
    /// 초성만 있을 때 새 초성이 오면 확정하지 않고 교체한다
    #[serde(default)]
    pub leading_replaces_leading: bool,
}

/// JSON5 레이아웃 최상위 스키마
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutSchema {
    /// 레이아웃 식별자 (예: "2", "1hand-right")
    pub id: String,
    /// 레이아웃 이름 (예: "두벌식")
    pub name: String,
    #[serde(rename = "type")]
    pub layout_type: LayoutType,
    /// 키 → 자모 매핑 (키 레이블 → 16진수 코드포인트)
    pub keymap: HashMap<String, String>,
    /// 갈마들이 키의 둘째 후보 (키 레이블 → 16진수 코드포인트)
    #[serde(default)]
    pub galmadeuli: HashMap<String, String>,
    #[serde(default)]
    pub combinations: Vec<CombinationEntry>,
    #[serde(default)]
    pub options: LayoutOptions,
}
