/// 자판 레이아웃 로딩 및 키맵/조합 조회
pub mod registry;
pub mod schema;

use std::collections::HashMap;

use schema::{Hand, LayoutSchema, LayoutType};

use crate::error::{HangulError, Result};
use crate::unicode;

/// 키 하나에 배정된 자모
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBinding {
    /// 자모 하나 (호환 자모)
    Single(char),
    /// 갈마들이 키: 문맥에 따라 자음 또는 모음
    Galmadeuli { consonant: char, vowel: char },
}

/// 파싱된 자판 레이아웃
#[derive(Debug, Clone)]
pub struct KeyboardLayout {
    pub id: String,
    pub name: String,
    pub layout_type: LayoutType,
    keymap: HashMap<char, KeyBinding>,
    /// 레이아웃 고유 조합 규칙 (표준 테이블보다 먼저 조회)
    combinations: HashMap<(char, char), char>,
    pub galmadeuli: bool,
    pub hand: Hand,
    pub leading_replaces_leading: bool,
}

/// 16진수 문자열("0x3131" 등)을 char로 변환
fn parse_hex_char(s: &str) -> Option<char> {
    let hex = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))?;
    let code = u32::from_str_radix(hex, 16).ok()?;
    char::from_u32(code)
}

/// 키 레이블은 한 글자여야 한다.
fn parse_key(key: &str) -> Result<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(HangulError::InvalidLayout(format!(
            "key label must be a single character: {key:?}"
        ))),
    }
}

/// 호환 자모 자음/모음만 키에 배정할 수 있다.
fn parse_jamo(key: &str, hex: &str) -> Result<char> {
    let ch = parse_hex_char(hex)
        .ok_or_else(|| HangulError::InvalidLayout(format!("invalid hex for {key}: {hex}")))?;
    if unicode::is_compat_consonant(ch) || unicode::is_compat_vowel(ch) {
        Ok(ch)
    } else {
        Err(HangulError::InvalidLayout(format!(
            "{key} maps to non-jamo U+{:04X}",
            ch as u32
        )))
    }
}

fn parse_combination_part(hex: &str) -> Result<char> {
    parse_hex_char(hex)
        .ok_or_else(|| HangulError::InvalidLayout(format!("invalid hex in combination: {hex}")))
}

impl KeyboardLayout {
    /// JSON5 문자열에서 레이아웃을 파싱한다.
    pub fn from_json(json: &str) -> Result<Self> {
        let schema: LayoutSchema = json5::from_str(json)
            .map_err(|e| HangulError::InvalidLayout(format!("JSON5 parse error: {e}")))?;

        let mut keymap = HashMap::with_capacity(schema.keymap.len());
        for (key, hex) in &schema.keymap {
            let primary = parse_jamo(key, hex)?;
            // 갈마들이가 꺼진 자판에서는 둘째 후보를 검증만 하고 쓰지 않는다.
            let binding = match schema.galmadeuli.get(key) {
                Some(alt_hex) => {
                    let alternate = parse_jamo(key, alt_hex)?;
                    let pair = galmadeuli_pair(key, primary, alternate)?;
                    if schema.options.galmadeuli {
                        pair
                    } else {
                        KeyBinding::Single(primary)
                    }
                }
                None => KeyBinding::Single(primary),
            };
            keymap.insert(parse_key(key)?, binding);
        }

        if let Some(orphan) = schema
            .galmadeuli
            .keys()
            .find(|key| !schema.keymap.contains_key(*key))
        {
            return Err(HangulError::InvalidLayout(format!(
                "galmadeuli key {orphan} has no keymap entry"
            )));
        }

        let mut combinations = HashMap::with_capacity(schema.combinations.len());
        for entry in &schema.combinations {
            let first = parse_combination_part(&entry.first)?;
            let second = parse_combination_part(&entry.second)?;
            let result = parse_combination_part(&entry.result)?;
            combinations.insert((first, second), result);
        }

        Ok(KeyboardLayout {
            id: schema.id,
            name: schema.name,
            layout_type: schema.layout_type,
            keymap,
            combinations,
            galmadeuli: schema.options.galmadeuli,
            hand: schema.options.hand,
            leading_replaces_leading: schema.options.leading_replaces_leading,
        })
    }

    /// 키로 자모 배정을 조회
    pub fn binding(&self, key: char) -> Option<KeyBinding> {
        self.keymap.get(&key).copied()
    }

    /// 두 자모의 조합 결과를 조회 (레이아웃 규칙 → 표준 겹모음/겹받침)
    pub fn combine(&self, first: char, second: char) -> Option<char> {
        self.combinations
            .get(&(first, second))
            .copied()
            .or_else(|| unicode::combine_vowels(first, second))
            .or_else(|| unicode::combine_consonants(first, second))
    }
}

/// 갈마들이 두 후보는 자음 하나, 모음 하나여야 한다.
fn galmadeuli_pair(key: &str, primary: char, alternate: char) -> Result<KeyBinding> {
    let pair = if unicode::is_compat_consonant(primary) && unicode::is_compat_vowel(alternate) {
        (primary, alternate)
    } else if unicode::is_compat_vowel(primary) && unicode::is_compat_consonant(alternate) {
        (alternate, primary)
    } else {
        return Err(HangulError::InvalidLayout(format!(
            "galmadeuli key {key} must pair a consonant with a vowel"
        )));
    };
    Ok(KeyBinding::Galmadeuli {
        consonant: pair.0,
        vowel: pair.1,
    })
}
