/// 오토마타 상태, 조합 버퍼, 처리 결과
pub mod galmadeuli;
pub mod jamo;

use crate::unicode;

/// 오토마타 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutomataState {
    /// 초기 상태, 조합 없음
    Empty,
    /// 초성 입력됨
    Choseong,
    /// 중성 입력됨 (초성+중성 또는 중성만)
    Jungseong,
    /// 겹모음 입력됨
    Jungseong2,
    /// 종성 입력됨
    Jongseong,
    /// 겹종성 입력됨
    Jongseong2,
    /// 받침 뒤 갈마들이 키가 다음 키를 기다리는 중.
    /// 조합 버퍼는 이 상태를 갖지 않고 오토마타만 보고한다.
    GalmadeuliPending,
}

/// 조합 결과 출력 형식
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// 완성형 음절 (U+AC00~)
    #[default]
    Syllable,
    /// 첫가끝 자모 (U+1100~)
    Jamo,
}

/// 조합 버퍼: 현재 조합 중인 자모 정보
#[derive(Debug, Clone)]
pub struct ComposeBuffer {
    /// 초성 인덱스 (L)
    pub choseong: Option<u32>,
    /// 초성 자리에 겹자음으로 묶인 둘째 자음 (초성 인덱스, 묶인 모양)
    pub choseong2: Option<(u32, char)>,
    /// 중성 인덱스 (V)
    pub jungseong: Option<u32>,
    /// 종성 인덱스 (T)
    pub jongseong: Option<u32>,
    pub state: AutomataState,
}

impl Default for ComposeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ComposeBuffer {
    pub fn new() -> Self {
        ComposeBuffer {
            choseong: None,
            choseong2: None,
            jungseong: None,
            jongseong: None,
            state: AutomataState::Empty,
        }
    }

    /// 버퍼를 초기화한다.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_empty(&self) -> bool {
        self.state == AutomataState::Empty
    }

    /// 현재 버퍼를 문자열로 그린다. 비어 있으면 빈 문자열.
    pub fn render(&self, mode: OutputMode) -> String {
        match mode {
            OutputMode::Syllable => self.render_syllable(),
            OutputMode::Jamo => self.render_jamo(),
        }
    }

    fn render_syllable(&self) -> String {
        match (self.choseong, self.jungseong) {
            (Some(l), Some(v)) => {
                let t = self.jongseong.unwrap_or(0);
                match unicode::compose_syllable(l, v, t) {
                    Ok(ch) => ch.to_string(),
                    Err(e) => {
                        tracing::warn!(error = %e, "syllable synthesis failed, rendering jamo");
                        self.render_compat()
                    }
                }
            }
            _ => self.render_compat(),
        }
    }

    /// 호환 자모로 슬롯을 나열한다. 초성만 있거나 중성만 있을 때의 표시이며
    /// 음절 합성이 실패했을 때의 대체 표시이기도 하다.
    fn render_compat(&self) -> String {
        let mut out = String::new();
        match (self.choseong, self.choseong2) {
            (Some(_), Some((_, cluster))) => out.push(cluster),
            (Some(l), None) => out.extend(unicode::choseong_to_compat(l)),
            _ => {}
        }
        out.extend(self.jungseong.and_then(unicode::jungseong_to_compat));
        out.extend(self.jongseong.and_then(unicode::jongseong_to_compat));
        out
    }

    fn render_jamo(&self) -> String {
        if self.choseong2.is_some() {
            // 초성 겹자음은 첫가끝 초성으로 나타낼 수 없다.
            return self.render_compat();
        }
        let mut out = String::new();
        match (self.choseong, self.jungseong) {
            (None, None) => return out,
            (Some(l), None) => {
                out.extend(unicode::choseong_jamo(l));
                out.push(unicode::JUNGSEONG_FILLER);
            }
            (None, Some(v)) => {
                out.push(unicode::CHOSEONG_FILLER);
                out.extend(unicode::jungseong_jamo(v));
            }
            (Some(l), Some(v)) => {
                out.extend(unicode::choseong_jamo(l));
                out.extend(unicode::jungseong_jamo(v));
            }
        }
        out.extend(self.jongseong.and_then(unicode::jongseong_jamo));
        out
    }
}

/// 오토마타 처리 결과
#[derive(Debug, Clone)]
pub struct AutomataResult {
    /// 확정된 텍스트 (이전 조합이 완성된 경우)
    pub committed: Option<String>,
    /// 현재 조합 중인 텍스트
    pub composing: Option<String>,
    /// 키가 처리되었는지 (false면 시스템에 위임)
    pub handled: bool,
}

impl AutomataResult {
    /// 빈 문자열은 None으로 정규화한다.
    pub fn handled(committed: Option<String>, composing: Option<String>) -> Self {
        AutomataResult {
            committed: committed.filter(|s| !s.is_empty()),
            composing: composing.filter(|s| !s.is_empty()),
            handled: true,
        }
    }

    pub fn not_handled() -> Self {
        AutomataResult {
            committed: None,
            composing: None,
            handled: false,
        }
    }
}
