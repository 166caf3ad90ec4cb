//! 한글 유니코드 상수 및 자모 조합 테이블
//!
//! - 음절 합성 (SBase 공식)
//! - 호환 자모 ↔ 초/중/종성 인덱스 변환
//! - 겹모음/겹받침/쌍자음 조합 테이블
//! - 첫가끝(조합형 자모) 출력용 변환

use crate::error::{HangulError, Result};

// ── 한글 유니코드 상수 ──

/// 한글 음절 시작 '가' (U+AC00)
pub const S_BASE: u32 = 0xAC00;
/// 초성 시작 'ᄀ' (U+1100)
pub const L_BASE: u32 = 0x1100;
/// 중성 시작 'ᅡ' (U+1161)
pub const V_BASE: u32 = 0x1161;
/// 종성 기준 (U+11A7). 종성 없음 = 0
pub const T_BASE: u32 = 0x11A7;

pub const L_COUNT: u32 = 19;
pub const V_COUNT: u32 = 21;
pub const T_COUNT: u32 = 28;
pub const N_COUNT: u32 = V_COUNT * T_COUNT; // 588

/// 초성 채움 문자 (U+115F)
pub const CHOSEONG_FILLER: char = '\u{115F}';
/// 중성 채움 문자 (U+1160)
pub const JUNGSEONG_FILLER: char = '\u{1160}';

// ── 호환 자모 범위 (U+3131 ~ U+3163) ──

pub const COMPAT_CONSONANT_START: u32 = 0x3131;
pub const COMPAT_CONSONANT_END: u32 = 0x314E;
pub const COMPAT_VOWEL_START: u32 = 0x314F;
pub const COMPAT_VOWEL_END: u32 = 0x3163;

// ── 음절 합성 ──

/// 초성(L), 중성(V), 종성(T) 인덱스로 한글 음절을 합성한다.
/// - `l`: 초성 인덱스 (0~18)
/// - `v`: 중성 인덱스 (0~20)
/// - `t`: 종성 인덱스 (0~27, 0이면 종성 없음)
pub fn compose_syllable(l: u32, v: u32, t: u32) -> Result<char> {
    if l >= L_COUNT || v >= V_COUNT || t >= T_COUNT {
        return Err(HangulError::InvalidCombination { l, v, t });
    }
    char::from_u32(S_BASE + l * N_COUNT + v * T_COUNT + t)
        .ok_or(HangulError::InvalidCombination { l, v, t })
}

// ── 호환 자모 ↔ 인덱스 변환 ──

/// 초성 인덱스 → 호환 자모 코드포인트
static CHOSEONG_TO_COMPAT: &[u32] = &[
    0x3131, // 0: ㄱ
    0x3132, // 1: ㄲ
    0x3134, // 2: ㄴ
    0x3137, // 3: ㄷ
    0x3138, // 4: ㄸ
    0x3139, // 5: ㄹ
    0x3141, // 6: ㅁ
    0x3142, // 7: ㅂ
    0x3143, // 8: ㅃ
    0x3145, // 9: ㅅ
    0x3146, // 10: ㅆ
    0x3147, // 11: ㅇ
    0x3148, // 12: ㅈ
    0x3149, // 13: ㅉ
    0x314A, // 14: ㅊ
    0x314B, // 15: ㅋ
    0x314C, // 16: ㅌ
    0x314D, // 17: ㅍ
    0x314E, // 18: ㅎ
];

/// 종성 인덱스 → 호환 자모 코드포인트.
/// 종성에는 ㄸ, ㅃ, ㅉ가 없다.
static JONGSEONG_TO_COMPAT: &[u32] = &[
    0,      // 0: 종성 없음
    0x3131, // 1: ㄱ
    0x3132, // 2: ㄲ
    0x3133, // 3: ㄳ
    0x3134, // 4: ㄴ
    0x3135, // 5: ㄵ
    0x3136, // 6: ㄶ
    0x3137, // 7: ㄷ
    0x3139, // 8: ㄹ
    0x313A, // 9: ㄺ
    0x313B, // 10: ㄻ
    0x313C, // 11: ㄼ
    0x313D, // 12: ㄽ
    0x313E, // 13: ㄾ
    0x313F, // 14: ㄿ
    0x3140, // 15: ㅀ
    0x3141, // 16: ㅁ
    0x3142, // 17: ㅂ
    0x3144, // 18: ㅄ
    0x3145, // 19: ㅅ
    0x3146, // 20: ㅆ
    0x3147, // 21: ㅇ
    0x3148, // 22: ㅈ
    0x314A, // 23: ㅊ
    0x314B, // 24: ㅋ
    0x314C, // 25: ㅌ
    0x314D, // 26: ㅍ
    0x314E, // 27: ㅎ
];

/// 호환 자모 자음인지 판별 (ㄱ~ㅎ, 겹자모 포함 0x3131~0x314E)
pub fn is_compat_consonant(ch: char) -> bool {
    (COMPAT_CONSONANT_START..=COMPAT_CONSONANT_END).contains(&(ch as u32))
}

/// 호환 자모 모음인지 판별 (ㅏ~ㅣ, 0x314F~0x3163)
pub fn is_compat_vowel(ch: char) -> bool {
    (COMPAT_VOWEL_START..=COMPAT_VOWEL_END).contains(&(ch as u32))
}

/// 호환 자모 자음을 초성 인덱스로 변환 (겹받침 자모는 None)
pub fn compat_to_choseong(ch: char) -> Option<u32> {
    let c = ch as u32;
    CHOSEONG_TO_COMPAT
        .iter()
        .position(|&compat| compat == c)
        .map(|idx| idx as u32)
}

/// 호환 자모 모음을 중성 인덱스로 변환.
/// 호환 모음은 중성 순서와 같으므로 오프셋만 계산한다.
pub fn compat_to_jungseong(ch: char) -> Option<u32> {
    is_compat_vowel(ch).then(|| ch as u32 - COMPAT_VOWEL_START)
}

/// 호환 자모 자음을 종성 인덱스로 변환.
/// 종성 불가 자음(ㄸ, ㅃ, ㅉ)은 None 반환
pub fn compat_to_jongseong(ch: char) -> Option<u32> {
    let c = ch as u32;
    JONGSEONG_TO_COMPAT
        .iter()
        .skip(1)
        .position(|&compat| compat == c)
        .map(|idx| idx as u32 + 1)
}

/// 초성 인덱스를 호환 자모로 변환
pub fn choseong_to_compat(l: u32) -> Option<char> {
    CHOSEONG_TO_COMPAT
        .get(l as usize)
        .and_then(|&c| char::from_u32(c))
}

/// 중성 인덱스를 호환 자모로 변환
pub fn jungseong_to_compat(v: u32) -> Option<char> {
    if v >= V_COUNT {
        return None;
    }
    char::from_u32(COMPAT_VOWEL_START + v)
}

/// 종성 인덱스를 호환 자모로 변환 (0이면 None)
pub fn jongseong_to_compat(t: u32) -> Option<char> {
    if t == 0 {
        return None;
    }
    JONGSEONG_TO_COMPAT
        .get(t as usize)
        .and_then(|&c| char::from_u32(c))
}

/// 종성 인덱스에 대응하는 초성 인덱스 반환.
/// 종성이 다음 음절의 초성으로 넘어갈 때 사용.
pub fn jongseong_to_choseong(t: u32) -> Option<u32> {
    compat_to_choseong(jongseong_to_compat(t)?)
}

// ── 조합 테이블 ──

/// 겹모음: (첫째, 둘째) → 결과
static VOWEL_COMBINATIONS: &[(char, char, char)] = &[
    ('ㅗ', 'ㅏ', 'ㅘ'),
    ('ㅗ', 'ㅐ', 'ㅙ'),
    ('ㅗ', 'ㅣ', 'ㅚ'),
    ('ㅜ', 'ㅓ', 'ㅝ'),
    ('ㅜ', 'ㅔ', 'ㅞ'),
    ('ㅜ', 'ㅣ', 'ㅟ'),
    ('ㅡ', 'ㅣ', 'ㅢ'),
];

/// 겹받침: (첫째, 둘째) → 결과
static CONSONANT_COMBINATIONS: &[(char, char, char)] = &[
    ('ㄱ', 'ㅅ', 'ㄳ'),
    ('ㄴ', 'ㅈ', 'ㄵ'),
    ('ㄴ', 'ㅎ', 'ㄶ'),
    ('ㄹ', 'ㄱ', 'ㄺ'),
    ('ㄹ', 'ㅁ', 'ㄻ'),
    ('ㄹ', 'ㅂ', 'ㄼ'),
    ('ㄹ', 'ㅅ', 'ㄽ'),
    ('ㄹ', 'ㅌ', 'ㄾ'),
    ('ㄹ', 'ㅍ', 'ㄿ'),
    ('ㄹ', 'ㅎ', 'ㅀ'),
    ('ㅂ', 'ㅅ', 'ㅄ'),
];

/// 쌍자음: 홑자음 → 된소리
static DOUBLE_CONSONANTS: &[(char, char)] = &[
    ('ㄱ', 'ㄲ'),
    ('ㄷ', 'ㄸ'),
    ('ㅂ', 'ㅃ'),
    ('ㅅ', 'ㅆ'),
    ('ㅈ', 'ㅉ'),
];

fn lookup(table: &[(char, char, char)], a: char, b: char) -> Option<char> {
    table
        .iter()
        .find(|(first, second, _)| *first == a && *second == b)
        .map(|(_, _, result)| *result)
}

/// 두 모음을 겹모음으로 조합한다.
pub fn combine_vowels(a: char, b: char) -> Option<char> {
    lookup(VOWEL_COMBINATIONS, a, b)
}

/// 두 자음을 겹받침으로 조합한다.
pub fn combine_consonants(a: char, b: char) -> Option<char> {
    lookup(CONSONANT_COMBINATIONS, a, b)
}

/// 같은 자음을 두 번 눌렀을 때의 쌍자음
pub fn double_consonant(ch: char) -> Option<char> {
    DOUBLE_CONSONANTS
        .iter()
        .find(|(single, _)| *single == ch)
        .map(|(_, double)| *double)
}

/// 겹받침을 (첫째 종성 인덱스, 둘째 호환 자모)로 분리.
/// 둘째 자모는 다음 음절의 초성이 된다.
pub fn split_double_jongseong(t: u32) -> Option<(u32, char)> {
    let compound = jongseong_to_compat(t)?;
    let (first, second, _) = CONSONANT_COMBINATIONS
        .iter()
        .find(|(_, _, result)| *result == compound)?;
    Some((compat_to_jongseong(*first)?, *second))
}

// ── 첫가끝 자모 (조합형 출력) ──

/// 초성 인덱스 → 첫가끝 초성 (U+1100~)
pub fn choseong_jamo(l: u32) -> Option<char> {
    (l < L_COUNT).then(|| char::from_u32(L_BASE + l)).flatten()
}

/// 중성 인덱스 → 첫가끝 중성 (U+1161~)
pub fn jungseong_jamo(v: u32) -> Option<char> {
    (v < V_COUNT).then(|| char::from_u32(V_BASE + v)).flatten()
}

/// 종성 인덱스 → 첫가끝 종성 (U+11A8~, 0이면 None)
pub fn jongseong_jamo(t: u32) -> Option<char> {
    (t > 0 && t < T_COUNT)
        .then(|| char::from_u32(T_BASE + t))
        .flatten()
}

// ── 코드포인트 분류 ──

/// 첫가끝 초성 (옛한글 확장 A 포함)
pub fn is_choseong(ch: char) -> bool {
    matches!(ch, '\u{1100}'..='\u{115F}' | '\u{A960}'..='\u{A97C}')
}

/// 첫가끝 중성 (옛한글 확장 B 포함)
pub fn is_jungseong(ch: char) -> bool {
    matches!(ch, '\u{1160}'..='\u{11A7}' | '\u{D7B0}'..='\u{D7C6}')
}

/// 첫가끝 종성 (옛한글 확장 B 포함)
pub fn is_jongseong(ch: char) -> bool {
    matches!(ch, '\u{11A8}'..='\u{11FF}' | '\u{D7CB}'..='\u{D7FB}')
}

/// 완성형 음절 (가~힣)
pub fn is_syllable(ch: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&ch)
}

/// 첫가끝 자모
pub fn is_jamo(ch: char) -> bool {
    is_choseong(ch) || is_jungseong(ch) || is_jongseong(ch)
}

/// 호환 자모 (U+3131~U+318E)
pub fn is_cjamo(ch: char) -> bool {
    ('\u{3131}'..='\u{318E}').contains(&ch)
}

/// 첫가끝 자모로 음절을 합성한다. 현대 자모가 아니면 None.
pub fn jamo_to_syllable(choseong: char, jungseong: char, jongseong: Option<char>) -> Option<char> {
    let l = (choseong as u32).checked_sub(L_BASE)?;
    let v = (jungseong as u32).checked_sub(V_BASE)?;
    let t = match jongseong {
        Some(ch) => (ch as u32).checked_sub(T_BASE).filter(|&t| t > 0)?,
        None => 0,
    };
    compose_syllable(l, v, t).ok()
}

/// 완성형 음절을 첫가끝 (초성, 중성, 종성)으로 분해한다.
pub fn decompose_syllable(syllable: char) -> Option<(char, char, Option<char>)> {
    if !is_syllable(syllable) {
        return None;
    }
    let s = syllable as u32 - S_BASE;
    let l = s / N_COUNT;
    let v = (s % N_COUNT) / T_COUNT;
    let t = s % T_COUNT;
    Some((choseong_jamo(l)?, jungseong_jamo(v)?, jongseong_jamo(t)))
}
