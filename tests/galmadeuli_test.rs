/// 한손 자판 갈마들이 통합 테스트
/// 키를 하나씩 넣으며 확정 문자열을 모으고 마지막에 flush한다.
use std::sync::Arc;

use hangulkit::{HangulInputContext, InputContext, OutputMode};

fn create_context(keyboard: &str) -> Arc<HangulInputContext> {
    HangulInputContext::new(keyboard.to_string()).unwrap()
}

fn type_text(ic: &HangulInputContext, keys: &str) -> String {
    let mut text = String::new();
    for key in keys.bytes() {
        assert!(ic.process(key as u32), "key {:?} rejected", key as char);
        text.push_str(&ic.commit_string());
    }
    text.push_str(&ic.flush());
    text
}

// ── 오른손 ──

#[test]
fn test_right_same_key_twice() {
    let ic = create_context("1hand-right");
    assert_eq!(type_text(&ic, "rr"), "소");
    assert_eq!(type_text(&ic, "ee"), "주");
}

#[test]
fn test_right_two_syllables() {
    let ic = create_context("1hand-right");
    assert_eq!(type_text(&ic, "fmth"), "우리");
    assert_eq!(type_text(&ic, "fgtjn"), "아름");
}

#[test]
fn test_right_reset_discards_orphan_key() {
    let ic = create_context("1hand-right");
    ic.process('r' as u32);
    assert_eq!(ic.preedit_string(), "ㅅ");
    ic.reset();
    assert_eq!(ic.preedit_string(), "");
    assert_eq!(type_text(&ic, "rr"), "소");
}

#[test]
fn test_right_words_back_to_back() {
    // 문장 중간에 reset 없이 이어 친다.
    let ic = create_context("1hand-right");
    let mut text = type_text(&ic, "rr");
    text.push_str(&type_text(&ic, "fmth"));
    text.push_str(&type_text(&ic, "ee"));
    assert_eq!(text, "소우리주");
}

// ── 왼손 ──

#[test]
fn test_left_same_key_twice() {
    let ic = create_context("1hand-left");
    assert_eq!(type_text(&ic, "uu"), "소");
    assert_eq!(type_text(&ic, "ii"), "주");
}

#[test]
fn test_left_pending_key_reads_vowel() {
    // ㅂ ㅏ ㄹ [ㅂ/ㅏ] ㅁ → 바람
    let ic = create_context("1hand-left");
    assert_eq!(type_text(&ic, "hhyhb"), "바람");
}

#[test]
fn test_left_pending_key_preedit() {
    let ic = create_context("1hand-left");
    for key in "hhyh".bytes() {
        ic.process(key as u32);
    }
    assert_eq!(ic.commit_string(), "");
    assert_eq!(ic.preedit_string(), "발ㅂ");

    // 모음이 오면 보류 키는 자음: 밟 → 발 + 바
    assert!(ic.process('v' as u32));
    assert_eq!(ic.commit_string(), "발");
    assert_eq!(ic.preedit_string(), "바");
}

#[test]
fn test_left_pending_key_preedit_jamo() {
    // 첫가끝 출력에서도 보류 키는 초성 + 중성 채움 문자로 보인다
    let ic = create_context("1hand-left");
    ic.set_output_mode(OutputMode::Jamo);
    for key in "hhyh".bytes() {
        ic.process(key as u32);
    }
    assert_eq!(
        ic.preedit_string(),
        "\u{1107}\u{1161}\u{11AF}\u{1107}\u{1160}"
    );
    assert_eq!(ic.flush(), "\u{1107}\u{1161}\u{1105}\u{1161}");
}

#[test]
fn test_left_pending_key_unmapped_keeps_pending() {
    let ic = create_context("1hand-left");
    for key in "hhyh".bytes() {
        ic.process(key as u32);
    }
    assert!(!ic.process('1' as u32));
    assert_eq!(ic.preedit_string(), "발ㅂ");
    assert_eq!(ic.flush(), "바라");
}

#[test]
fn test_left_pending_key_backspace() {
    let ic = create_context("1hand-left");
    for key in "hhyh".bytes() {
        ic.process(key as u32);
    }
    assert!(ic.backspace());
    assert_eq!(ic.preedit_string(), "발");
    assert_eq!(ic.flush(), "발");
}

#[test]
fn test_owned_context_matches_object() {
    let mut ic = InputContext::new("1hand-left").unwrap();
    let mut text = String::new();
    for key in "hhyhb".bytes() {
        ic.process(key as u32);
        text.push_str(ic.commit_string());
    }
    text.push_str(&ic.flush());
    assert_eq!(text, "바람");
}
