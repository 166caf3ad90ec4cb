//! 갈마들이(한손 자판) 해석기
//!
//! 한손 자판의 갈마들이 키는 자음과 모음 두 후보를 가진다.
//! 어느 쪽으로 읽을지는 조합 버퍼의 상태로 정한다.
//!
//! | 버퍼 상태        | 읽기                         |
//! |------------------|------------------------------|
//! | 비어 있음        | 자음 (초성)                  |
//! | 초성만           | 모음 (같은 키 두 번: ㅅ+ㅗ=소) |
//! | 초성+중성, 중성만 | 자음 (종성 또는 새 초성)     |
//! | 종성까지         | 보류: 다음 키가 정한다       |
//!
//! 보류된 키는 다음 키가 모음이거나 다른 갈마들이 키면 자음으로,
//! 그 밖에는 모음으로 읽는다. 모음으로 읽히면 앞 음절의 받침이
//! 다음 음절의 초성으로 넘어간다 (ㅂ ㅏ ㄹ [ㅂ/ㅏ] ㅁ → 바람).

use crate::layout::KeyBinding;
use crate::unicode;

use super::AutomataState;

/// 갈마들이 키 하나의 읽기
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    Consonant,
    Vowel,
    Pending,
}

/// 받침 뒤에서 읽기가 정해지지 않은 키
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingKey {
    pub key: char,
    pub consonant: char,
    pub vowel: char,
}

impl PendingKey {
    /// 다음 키를 보고 보류된 키의 자모를 정한다.
    pub fn resolve(&self, next: KeyBinding) -> char {
        let next_is_vowel = match next {
            KeyBinding::Single(ch) => unicode::is_compat_vowel(ch),
            KeyBinding::Galmadeuli { .. } => true,
        };
        if next_is_vowel {
            self.consonant
        } else {
            self.vowel
        }
    }
}

/// 최근 키 기록과 보류 키
#[derive(Debug, Clone, Default)]
pub struct Galmadeuli {
    /// 바로 앞 키 (같은 키 연타 판정용)
    last: Option<char>,
    pending: Option<PendingKey>,
}

impl Galmadeuli {
    pub fn new() -> Self {
        Self::default()
    }

    /// 키를 기록하고 바로 앞 키를 돌려준다.
    pub fn record(&mut self, key: char) -> Option<char> {
        self.last.replace(key)
    }

    /// 버퍼 상태로 갈마들이 키의 읽기를 정한다.
    pub fn reading(state: AutomataState) -> Reading {
        match state {
            AutomataState::Choseong => Reading::Vowel,
            AutomataState::Jongseong | AutomataState::Jongseong2 => Reading::Pending,
            AutomataState::Empty
            | AutomataState::Jungseong
            | AutomataState::Jungseong2
            | AutomataState::GalmadeuliPending => Reading::Consonant,
        }
    }

    pub fn hold(&mut self, pending: PendingKey) {
        self.pending = Some(pending);
    }

    pub fn take_pending(&mut self) -> Option<PendingKey> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<&PendingKey> {
        self.pending.as_ref()
    }

    /// 기록과 보류 키를 모두 지운다.
    pub fn clear(&mut self) {
        self.last = None;
        self.pending = None;
    }
}
