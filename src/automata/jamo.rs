//! 두벌식 계열 오토마타
//!
//! 6개 상태 전이: Empty → Choseong → Jungseong → Jungseong2 → Jongseong → Jongseong2
//! 핵심: 종성 분리, 겹종성 분리, 백스페이스 역방향 처리.
//! 한손 자판의 갈마들이 키는 `galmadeuli` 해석기를 거쳐 자모 하나로 정해진 뒤
//! 같은 전이를 탄다.

use crate::layout::{KeyBinding, KeyboardLayout};
use crate::unicode;

use super::galmadeuli::{Galmadeuli, PendingKey, Reading};
use super::{AutomataResult, AutomataState, ComposeBuffer, OutputMode};

/// 입력 컨텍스트 옵션
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// 모아주기: 모음 뒤에 온 자음을 초성으로 넣는다 (ㅏ ㄱ → 가)
    pub auto_reorder: bool,
    /// 같은 자음 키를 두 번 누르면 된소리 (ㄱ ㄱ → ㄲ)
    pub combi_on_double_stroke: bool,
    /// 초성 자리에서 겹받침 모양으로 자음을 묶는다 (ㄱ ㅅ → ㄳ)
    pub non_choseong_combi: bool,
    pub output_mode: OutputMode,
}

/// 두벌식 계열 오토마타
#[derive(Debug, Clone, Default)]
pub struct JamoAutomata {
    buffer: ComposeBuffer,
    /// 쌍자음 초성 백스페이스 복원용
    prev_choseong: Option<u32>,
    /// 겹모음 상태에서 백스페이스 시 원래 모음을 복원하기 위한 저장값
    prev_jungseong: Option<u32>,
    /// 겹종성/쌍받침 상태에서 백스페이스 시 원래 종성을 복원하기 위한 저장값
    prev_jongseong: Option<u32>,
    /// 모아주기로 모음 뒤에 들어온 초성. 백스페이스는 이 초성부터 지운다.
    reordered: bool,
    galmadeuli: Galmadeuli,
    pub options: Options,
}

impl JamoAutomata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: Options) -> Self {
        JamoAutomata {
            options,
            ..Self::default()
        }
    }

    /// 현재 버퍼의 조합 문자열을 확정 텍스트로 반환하고 리셋한다.
    fn commit_current(&mut self) -> String {
        let text = self.buffer.render(self.options.output_mode);
        self.buffer.reset();
        self.prev_choseong = None;
        self.prev_jungseong = None;
        self.prev_jongseong = None;
        self.reordered = false;
        text
    }

    fn result(&self, committed: Option<String>) -> AutomataResult {
        AutomataResult::handled(committed, Some(self.composing_text()))
    }

    /// 현재 조합을 확정하고 자모 하나로 새 조합을 시작한다.
    fn commit_and_start(&mut self, ch: char) -> AutomataResult {
        let mut committed = self.commit_current();
        if let Some(v_idx) = unicode::compat_to_jungseong(ch) {
            self.buffer.jungseong = Some(v_idx);
            self.buffer.state = AutomataState::Jungseong;
        } else if let Some(l_idx) = unicode::compat_to_choseong(ch) {
            self.buffer.choseong = Some(l_idx);
            self.buffer.state = AutomataState::Choseong;
        } else {
            // 초성이 될 수 없는 겹자음(ㄳ 등)은 그대로 확정
            committed.push(ch);
        }
        self.result(Some(committed))
    }

    /// 키 하나를 처리한다. `binding`은 `key`의 레이아웃 배정이다.
    pub fn process(
        &mut self,
        key: char,
        binding: KeyBinding,
        layout: &KeyboardLayout,
    ) -> AutomataResult {
        let previous = self.galmadeuli.record(key);
        let mut committed = String::new();

        if let Some(pending) = self.galmadeuli.take_pending() {
            let ch = pending.resolve(binding);
            tracing::trace!(key = %pending.key, jamo = %ch, "galmadeuli key resolved");
            committed.extend(self.process_jamo(ch, layout, false).committed);
        }

        let ch = match binding {
            KeyBinding::Single(ch) => ch,
            KeyBinding::Galmadeuli { consonant, vowel } => {
                match Galmadeuli::reading(self.buffer.state) {
                    Reading::Consonant => consonant,
                    Reading::Vowel => vowel,
                    Reading::Pending => {
                        tracing::trace!(%key, "galmadeuli key held");
                        self.galmadeuli.hold(PendingKey {
                            key,
                            consonant,
                            vowel,
                        });
                        return self.result(Some(committed));
                    }
                }
            }
        };

        committed.extend(self.process_jamo(ch, layout, previous == Some(key)).committed);
        self.result(Some(committed))
    }

    /// 자모 하나를 현재 상태에 적용한다.
    fn process_jamo(&mut self, ch: char, layout: &KeyboardLayout, repeated: bool) -> AutomataResult {
        let is_vowel = unicode::is_compat_vowel(ch);
        if !is_vowel && !unicode::is_compat_consonant(ch) {
            return AutomataResult::not_handled();
        }

        tracing::trace!(state = ?self.buffer.state, jamo = %ch, "jamo");
        match self.buffer.state {
            AutomataState::Empty | AutomataState::GalmadeuliPending => self.commit_and_start(ch),
            AutomataState::Choseong => {
                if is_vowel {
                    self.process_choseong_vowel(ch)
                } else {
                    self.process_choseong_consonant(ch, layout, repeated)
                }
            }
            AutomataState::Jungseong => {
                if is_vowel {
                    self.process_jungseong_vowel(ch, layout)
                } else {
                    self.process_jungseong_consonant(ch)
                }
            }
            AutomataState::Jungseong2 => {
                if is_vowel {
                    // 겹모음 상태에서 또 모음 → 현재 확정 + 새 모음
                    self.commit_and_start(ch)
                } else {
                    self.process_jungseong_consonant(ch)
                }
            }
            AutomataState::Jongseong => {
                if is_vowel {
                    self.process_jongseong_vowel(ch)
                } else {
                    self.process_jongseong_consonant(ch, layout, repeated)
                }
            }
            AutomataState::Jongseong2 => {
                if is_vowel {
                    self.process_jongseong2_vowel(ch)
                } else {
                    self.commit_and_start(ch)
                }
            }
        }
    }

    /// S1(Choseong) + 모음 → S2(Jungseong).
    /// 초성 자리에 묶인 두 자음이 있으면 첫째를 확정하고 둘째로 새 음절을 시작한다.
    fn process_choseong_vowel(&mut self, ch: char) -> AutomataResult {
        let Some(v_idx) = unicode::compat_to_jungseong(ch) else {
            return self.commit_and_start(ch);
        };

        if let Some((second, _)) = self.buffer.choseong2.take() {
            let committed = self.commit_current();
            self.buffer.choseong = Some(second);
            self.buffer.jungseong = Some(v_idx);
            self.buffer.state = AutomataState::Jungseong;
            return self.result(Some(committed));
        }

        self.buffer.jungseong = Some(v_idx);
        self.buffer.state = AutomataState::Jungseong;
        self.result(None)
    }

    /// S1(Choseong) + 자음: 쌍자음, 초성 묶기, 초성 교체, 또는 확정 + 새 초성
    fn process_choseong_consonant(
        &mut self,
        ch: char,
        layout: &KeyboardLayout,
        repeated: bool,
    ) -> AutomataResult {
        let Some(current_ch) = self.buffer.choseong.and_then(unicode::choseong_to_compat) else {
            return self.commit_and_start(ch);
        };

        if self.buffer.choseong2.is_none() {
            if self.options.combi_on_double_stroke
                && repeated
                && current_ch == ch
                && let Some(double) = unicode::double_consonant(ch)
                && let Some(double_idx) = unicode::compat_to_choseong(double)
            {
                self.prev_choseong = self.buffer.choseong;
                self.buffer.choseong = Some(double_idx);
                return self.result(None);
            }

            if self.options.non_choseong_combi
                && let Some(cluster) = layout.combine(current_ch, ch)
                && unicode::compat_to_choseong(cluster).is_none()
                && let Some(second) = unicode::compat_to_choseong(ch)
            {
                self.buffer.choseong2 = Some((second, cluster));
                return self.result(None);
            }
        }

        if layout.leading_replaces_leading
            && let Some(l_idx) = unicode::compat_to_choseong(ch)
        {
            self.buffer.choseong = Some(l_idx);
            self.buffer.choseong2 = None;
            self.prev_choseong = None;
            return self.result(None);
        }

        self.commit_and_start(ch)
    }

    /// S2(Jungseong) + 모음: 겹모음 가능하면 S3, 아니면 확정 + 새 모음
    fn process_jungseong_vowel(&mut self, ch: char, layout: &KeyboardLayout) -> AutomataResult {
        let Some(current_v) = self.buffer.jungseong else {
            return self.commit_and_start(ch);
        };

        if let Some(current_ch) = unicode::jungseong_to_compat(current_v)
            && let Some(combined) = layout.combine(current_ch, ch)
            && let Some(combined_idx) = unicode::compat_to_jungseong(combined)
        {
            self.prev_jungseong = Some(current_v);
            self.buffer.jungseong = Some(combined_idx);
            self.buffer.state = AutomataState::Jungseong2;
            return self.result(None);
        }

        self.commit_and_start(ch)
    }

    /// S2/S3 + 자음: 종성 가능하면 S4, 불가면 확정 + 새 초성
    fn process_jungseong_consonant(&mut self, ch: char) -> AutomataResult {
        // 모음만 입력된 상태
        if self.buffer.choseong.is_none() {
            if self.options.auto_reorder
                && let Some(l_idx) = unicode::compat_to_choseong(ch)
            {
                self.buffer.choseong = Some(l_idx);
                self.reordered = true;
                return self.result(None);
            }
            return self.commit_and_start(ch);
        }

        // 종성 불가 자음(ㄸ, ㅃ, ㅉ)은 매핑이 없다.
        if let Some(t_idx) = unicode::compat_to_jongseong(ch) {
            self.buffer.jongseong = Some(t_idx);
            self.buffer.state = AutomataState::Jongseong;
            return self.result(None);
        }

        self.commit_and_start(ch)
    }

    /// S4(Jongseong) + 자음: 쌍받침/겹종성 가능하면 조합, 아니면 확정 + 새 초성
    fn process_jongseong_consonant(
        &mut self,
        ch: char,
        layout: &KeyboardLayout,
        repeated: bool,
    ) -> AutomataResult {
        let Some(current_t) = self.buffer.jongseong else {
            return self.commit_and_start(ch);
        };
        let Some(current_ch) = unicode::jongseong_to_compat(current_t) else {
            return self.commit_and_start(ch);
        };

        // 쌍받침(ㄲ, ㅆ)은 홑받침처럼 다음 초성으로 통째로 넘어간다.
        if self.options.combi_on_double_stroke
            && repeated
            && current_ch == ch
            && self.prev_jongseong.is_none()
            && let Some(double) = unicode::double_consonant(ch)
            && let Some(double_t) = unicode::compat_to_jongseong(double)
        {
            self.prev_jongseong = Some(current_t);
            self.buffer.jongseong = Some(double_t);
            return self.result(None);
        }

        if let Some(combined) = layout.combine(current_ch, ch)
            && let Some(combined_t) = unicode::compat_to_jongseong(combined)
        {
            self.prev_jongseong = Some(current_t);
            self.buffer.jongseong = Some(combined_t);
            self.buffer.state = AutomataState::Jongseong2;
            return self.result(None);
        }

        self.commit_and_start(ch)
    }

    /// S4(Jongseong) + 모음: ★종성 분리★
    /// 종성을 다음 초성으로 이동, 현재 LV를 확정
    fn process_jongseong_vowel(&mut self, ch: char) -> AutomataResult {
        let (Some(t), Some(v_idx)) = (self.buffer.jongseong, unicode::compat_to_jungseong(ch))
        else {
            return self.commit_and_start(ch);
        };
        let Some(next_l) = unicode::jongseong_to_choseong(t) else {
            return self.commit_and_start(ch);
        };

        self.buffer.jongseong = None;
        let committed = self.commit_current();

        self.buffer.choseong = Some(next_l);
        self.buffer.jungseong = Some(v_idx);
        self.buffer.state = AutomataState::Jungseong;
        self.result(Some(committed))
    }

    /// S5(Jongseong2) + 모음: ★겹종성 분리★
    /// 첫째 종성은 유지, 둘째를 다음 초성으로 이동
    fn process_jongseong2_vowel(&mut self, ch: char) -> AutomataResult {
        let (Some(t), Some(v_idx)) = (self.buffer.jongseong, unicode::compat_to_jungseong(ch))
        else {
            return self.commit_and_start(ch);
        };

        if let Some((first_t, second_ch)) = unicode::split_double_jongseong(t)
            && let Some(next_l) = unicode::compat_to_choseong(second_ch)
        {
            self.buffer.jongseong = Some(first_t);
            let committed = self.commit_current();

            self.buffer.choseong = Some(next_l);
            self.buffer.jungseong = Some(v_idx);
            self.buffer.state = AutomataState::Jungseong;
            return self.result(Some(committed));
        }

        // 레이아웃 고유 겹받침은 분리 규칙이 없으므로 통째로 확정
        self.commit_and_start(ch)
    }

    /// 받침 뒤에 모음을 붙인다. 보류된 갈마들이 키를 모음으로 정할 때 쓴다.
    fn attach_vowel(&mut self, ch: char) -> AutomataResult {
        match self.buffer.state {
            AutomataState::Jongseong => self.process_jongseong_vowel(ch),
            AutomataState::Jongseong2 => self.process_jongseong2_vowel(ch),
            _ => self.commit_and_start(ch),
        }
    }

    /// 백스페이스 처리 (한 단계 되돌림)
    pub fn backspace(&mut self) -> AutomataResult {
        if self.galmadeuli.take_pending().is_some() {
            return self.result(None);
        }

        match self.buffer.state {
            AutomataState::Empty | AutomataState::GalmadeuliPending => {
                // 조합 없음 → 시스템에 위임
                return AutomataResult::not_handled();
            }
            AutomataState::Choseong => {
                if self.buffer.choseong2.take().is_none() {
                    // 쌍자음이었다면 원래 초성으로 복원
                    match self.prev_choseong.take() {
                        Some(prev_l) => self.buffer.choseong = Some(prev_l),
                        None => self.buffer.reset(),
                    }
                }
            }
            AutomataState::Jungseong | AutomataState::Jungseong2 if self.reordered => {
                // 모아주기 초성은 모음보다 나중에 입력되었다.
                self.buffer.choseong = None;
                self.reordered = false;
            }
            AutomataState::Jungseong => self.remove_jungseong(),
            AutomataState::Jungseong2 => {
                // S3 → S2: 겹모음의 두 번째 제거, 첫 번째 모음으로 복원
                match self.prev_jungseong.take() {
                    Some(prev_v) => {
                        self.buffer.jungseong = Some(prev_v);
                        self.buffer.state = AutomataState::Jungseong;
                    }
                    None => self.remove_jungseong(),
                }
            }
            AutomataState::Jongseong => {
                match self.prev_jongseong.take() {
                    // 쌍받침 → 홑받침
                    Some(prev_t) => self.buffer.jongseong = Some(prev_t),
                    None => {
                        self.buffer.jongseong = None;
                        self.buffer.state = if self.prev_jungseong.is_some() {
                            AutomataState::Jungseong2
                        } else {
                            AutomataState::Jungseong
                        };
                    }
                }
            }
            AutomataState::Jongseong2 => {
                // S5 → S4: 겹종성의 두 번째 자음 제거
                match self.prev_jongseong.take() {
                    Some(prev_t) => {
                        self.buffer.jongseong = Some(prev_t);
                        self.buffer.state = AutomataState::Jongseong;
                    }
                    None => {
                        self.buffer.jongseong = None;
                        self.buffer.state = AutomataState::Jungseong;
                    }
                }
            }
        }
        self.result(None)
    }

    fn remove_jungseong(&mut self) {
        self.buffer.jungseong = None;
        self.prev_jungseong = None;
        if self.buffer.choseong.is_some() {
            self.buffer.state = AutomataState::Choseong;
        } else {
            self.buffer.reset();
        }
    }

    /// 현재 조합을 확정하고 리셋한다. 보류된 갈마들이 키는 모음으로 읽는다.
    pub fn flush(&mut self) -> AutomataResult {
        let mut committed = String::new();
        if let Some(pending) = self.galmadeuli.take_pending() {
            committed.extend(self.attach_vowel(pending.vowel).committed);
        }
        committed.push_str(&self.commit_current());
        self.galmadeuli.clear();
        AutomataResult::handled(Some(committed), None)
    }

    /// 조합과 키 기록을 모두 버린다.
    pub fn reset(&mut self) {
        self.buffer.reset();
        self.prev_choseong = None;
        self.prev_jungseong = None;
        self.prev_jongseong = None;
        self.reordered = false;
        self.galmadeuli.clear();
    }

    /// 현재 조합 중인 텍스트. 보류된 갈마들이 키는 자음 모양으로 덧붙인다.
    pub fn composing_text(&self) -> String {
        let mut text = self.buffer.render(self.options.output_mode);
        if let Some(pending) = self.galmadeuli.pending() {
            match self.options.output_mode {
                OutputMode::Syllable => text.push(pending.consonant),
                OutputMode::Jamo => {
                    // 첫가끝 출력에서는 초성 + 중성 채움으로 한 덩어리를 이룬다.
                    match unicode::compat_to_choseong(pending.consonant)
                        .and_then(unicode::choseong_jamo)
                    {
                        Some(jamo) => {
                            text.push(jamo);
                            text.push(unicode::JUNGSEONG_FILLER);
                        }
                        None => text.push(pending.consonant),
                    }
                }
            }
        }
        text
    }

    /// 현재 오토마타 상태
    pub fn state(&self) -> AutomataState {
        if self.galmadeuli.pending().is_some() {
            AutomataState::GalmadeuliPending
        } else {
            self.buffer.state
        }
    }

    pub fn buffer(&self) -> &ComposeBuffer {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty() && self.galmadeuli.pending().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT_2: &str = include_str!("../../layouts/2.json5");
    const LAYOUT_1HAND_RIGHT: &str = include_str!("../../layouts/1hand-right.json5");
    const LAYOUT_1HAND_LEFT: &str = include_str!("../../layouts/1hand-left.json5");

    fn make_layout(json: &str) -> KeyboardLayout {
        KeyboardLayout::from_json(json).unwrap()
    }

    /// 키 시퀀스를 처리하고 (committed 누적, 최종 composing) 반환
    fn process_keys(
        automata: &mut JamoAutomata,
        layout: &KeyboardLayout,
        keys: &str,
    ) -> (String, Option<String>) {
        let mut committed = String::new();
        let mut composing = None;
        for key in keys.chars() {
            let binding = layout.binding(key).unwrap();
            let result = automata.process(key, binding, layout);
            if let Some(c) = &result.committed {
                committed.push_str(c);
            }
            composing = result.composing;
        }
        (committed, composing)
    }

    /// 키 시퀀스 + flush 결과 전체
    fn type_word(layout: &KeyboardLayout, keys: &str) -> String {
        let mut automata = JamoAutomata::new();
        let (mut text, _) = process_keys(&mut automata, layout, keys);
        text.extend(automata.flush().committed);
        text
    }

    #[test]
    fn test_single_consonant() {
        let layout = make_layout(LAYOUT_2);
        let mut automata = JamoAutomata::new();
        let (committed, composing) = process_keys(&mut automata, &layout, "r");
        assert_eq!(committed, "");
        assert_eq!(composing, Some("ㄱ".to_string()));
        assert_eq!(automata.state(), AutomataState::Choseong);
    }

    #[test]
    fn test_full_syllable_han() {
        // ㅎ ㅏ ㄴ → 한
        let layout = make_layout(LAYOUT_2);
        let mut automata = JamoAutomata::new();
        let (committed, composing) = process_keys(&mut automata, &layout, "gks");
        assert_eq!(committed, "");
        assert_eq!(composing, Some("한".to_string()));
        assert_eq!(automata.state(), AutomataState::Jongseong);
    }

    #[test]
    fn test_hangul_word() {
        // ㅎ ㅏ ㄴ ㄱ ㅡ ㄹ → "한" 확정 + "글" 조합
        let layout = make_layout(LAYOUT_2);
        let mut automata = JamoAutomata::new();
        let (committed, composing) = process_keys(&mut automata, &layout, "gksrmf");
        assert_eq!(committed, "한");
        assert_eq!(composing, Some("글".to_string()));
    }

    #[test]
    fn test_jongseong_split() {
        // ㄱ ㅏ ㄴ ㅕ → "가" 확정 + "녀" 조합
        let layout = make_layout(LAYOUT_2);
        let mut automata = JamoAutomata::new();
        let (committed, composing) = process_keys(&mut automata, &layout, "rksu");
        assert_eq!(committed, "가");
        assert_eq!(composing, Some("녀".to_string()));
    }

    #[test]
    fn test_double_jongseong_split() {
        // ㄱ ㅏ ㅂ ㅅ ㅣ → "갑" 확정 + "시" 조합
        let layout = make_layout(LAYOUT_2);
        let mut automata = JamoAutomata::new();
        let (committed, composing) = process_keys(&mut automata, &layout, "rkqtl");
        assert_eq!(committed, "갑");
        assert_eq!(composing, Some("시".to_string()));
    }

    #[test]
    fn test_double_vowel_with_jongseong() {
        // ㄱ ㅗ ㅏ ㄴ → "관"
        let layout = make_layout(LAYOUT_2);
        let mut automata = JamoAutomata::new();
        let (_, composing) = process_keys(&mut automata, &layout, "rhk");
        assert_eq!(composing, Some("과".to_string()));
        assert_eq!(automata.state(), AutomataState::Jungseong2);
        let (committed, composing) = process_keys(&mut automata, &layout, "s");
        assert_eq!(committed, "");
        assert_eq!(composing, Some("관".to_string()));
    }

    #[test]
    fn test_jongseong_impossible_ddikkut() {
        // ㄱ ㅏ + ㄸ → "가" 확정 + "ㄸ" 조합
        let layout = make_layout(LAYOUT_2);
        let mut automata = JamoAutomata::new();
        let (committed, composing) = process_keys(&mut automata, &layout, "rkE");
        assert_eq!(committed, "가");
        assert_eq!(composing, Some("ㄸ".to_string()));
    }

    #[test]
    fn test_vowel_then_consonant_commits_vowel() {
        let layout = make_layout(LAYOUT_2);
        let mut automata = JamoAutomata::new();
        let (committed, composing) = process_keys(&mut automata, &layout, "kr");
        assert_eq!(committed, "ㅏ");
        assert_eq!(composing, Some("ㄱ".to_string()));
    }

    #[test]
    fn test_leading_replaces_leading() {
        // ㄱ + ㄴ → 확정 없이 "ㄴ"으로 교체
        let layout = make_layout(LAYOUT_2);
        let mut automata = JamoAutomata::new();
        let (committed, composing) = process_keys(&mut automata, &layout, "rs");
        assert_eq!(committed, "");
        assert_eq!(composing, Some("ㄴ".to_string()));
        let (committed, composing) = process_keys(&mut automata, &layout, "k");
        assert_eq!(committed, "");
        assert_eq!(composing, Some("나".to_string()));
    }

    #[test]
    fn test_consecutive_consonants_commit() {
        // 교체 옵션이 꺼진 자판: ㄱ + ㄴ → "ㄱ" 확정 + "ㄴ" 조합
        let json = LAYOUT_2.replace(
            "leading_replaces_leading: true",
            "leading_replaces_leading: false",
        );
        let layout = make_layout(&json);
        assert!(!layout.leading_replaces_leading);
        let mut automata = JamoAutomata::new();
        let (committed, composing) = process_keys(&mut automata, &layout, "rs");
        assert_eq!(committed, "ㄱ");
        assert_eq!(composing, Some("ㄴ".to_string()));
    }

    #[test]
    fn test_backspace_sequence() {
        // 관 → 과 → 고 → ㄱ → 비어 있음
        let layout = make_layout(LAYOUT_2);
        let mut automata = JamoAutomata::new();
        process_keys(&mut automata, &layout, "rhks");
        assert_eq!(automata.backspace().composing, Some("과".to_string()));
        assert_eq!(automata.state(), AutomataState::Jungseong2);
        assert_eq!(automata.backspace().composing, Some("고".to_string()));
        assert_eq!(automata.backspace().composing, Some("ㄱ".to_string()));
        let result = automata.backspace();
        assert!(result.handled);
        assert_eq!(result.composing, None);
        assert!(!automata.backspace().handled);
    }

    #[test]
    fn test_backspace_from_double_jongseong() {
        // ㄱ ㅏ ㅂ ㅅ + backspace → "갑"
        let layout = make_layout(LAYOUT_2);
        let mut automata = JamoAutomata::new();
        process_keys(&mut automata, &layout, "rkqt");
        assert_eq!(automata.state(), AutomataState::Jongseong2);
        assert_eq!(automata.backspace().composing, Some("갑".to_string()));
        assert_eq!(automata.state(), AutomataState::Jongseong);
    }

    #[test]
    fn test_flush() {
        let layout = make_layout(LAYOUT_2);
        let mut automata = JamoAutomata::new();
        process_keys(&mut automata, &layout, "gks");
        let result = automata.flush();
        assert_eq!(result.committed, Some("한".to_string()));
        assert_eq!(result.composing, None);
        assert_eq!(automata.state(), AutomataState::Empty);
        assert_eq!(automata.flush().committed, None);
    }

    #[test]
    fn test_auto_reorder() {
        let layout = make_layout(LAYOUT_2);
        let mut automata = JamoAutomata::with_options(Options {
            auto_reorder: true,
            ..Options::default()
        });
        let (committed, composing) = process_keys(&mut automata, &layout, "krs");
        assert_eq!(committed, "");
        assert_eq!(composing, Some("간".to_string()));
    }

    #[test]
    fn test_auto_reorder_backspace() {
        // 모음 뒤에 들어온 초성이 먼저 지워진다
        let layout = make_layout(LAYOUT_2);
        let mut automata = JamoAutomata::with_options(Options {
            auto_reorder: true,
            ..Options::default()
        });
        let (_, composing) = process_keys(&mut automata, &layout, "kr");
        assert_eq!(composing, Some("가".to_string()));
        assert_eq!(automata.backspace().composing, Some("ㅏ".to_string()));
        assert_eq!(automata.state(), AutomataState::Jungseong);
        assert!(automata.backspace().handled);
        assert!(automata.is_empty());

        // 종성을 지운 뒤에는 다시 모아주기 초성 차례
        process_keys(&mut automata, &layout, "krs");
        assert_eq!(automata.backspace().composing, Some("가".to_string()));
        assert_eq!(automata.backspace().composing, Some("ㅏ".to_string()));
    }

    #[test]
    fn test_backspace_after_plain_syllable() {
        let layout = make_layout(LAYOUT_2);
        let mut automata = JamoAutomata::with_options(Options {
            auto_reorder: true,
            ..Options::default()
        });
        process_keys(&mut automata, &layout, "rk");
        assert_eq!(automata.backspace().composing, Some("ㄱ".to_string()));
    }

    #[test]
    fn test_combi_on_double_stroke() {
        let layout = make_layout(LAYOUT_2);
        let mut automata = JamoAutomata::with_options(Options {
            combi_on_double_stroke: true,
            ..Options::default()
        });
        let (committed, composing) = process_keys(&mut automata, &layout, "rrk");
        assert_eq!(committed, "");
        assert_eq!(composing, Some("까".to_string()));

        // 받침 ㄱ ㄱ → ㄲ, 백스페이스로 ㄱ 복원
        let (_, composing) = process_keys(&mut automata, &layout, "rr");
        assert_eq!(composing, Some("깎".to_string()));
        assert_eq!(automata.backspace().composing, Some("깍".to_string()));
    }

    #[test]
    fn test_double_stroke_off_by_default() {
        let layout = make_layout(LAYOUT_2);
        let mut automata = JamoAutomata::new();
        let (committed, composing) = process_keys(&mut automata, &layout, "rr");
        assert_eq!(committed, "");
        assert_eq!(composing, Some("ㄱ".to_string()));
    }

    #[test]
    fn test_non_choseong_combi() {
        let layout = make_layout(LAYOUT_2);
        let mut automata = JamoAutomata::with_options(Options {
            non_choseong_combi: true,
            ..Options::default()
        });
        let (committed, composing) = process_keys(&mut automata, &layout, "rt");
        assert_eq!(committed, "");
        assert_eq!(composing, Some("ㄳ".to_string()));

        // 모음이 오면 둘째 자음이 새 음절의 초성
        let (committed, composing) = process_keys(&mut automata, &layout, "k");
        assert_eq!(committed, "ㄱ");
        assert_eq!(composing, Some("사".to_string()));
    }

    #[test]
    fn test_jamo_output_mode() {
        let layout = make_layout(LAYOUT_2);
        let mut automata = JamoAutomata::with_options(Options {
            output_mode: OutputMode::Jamo,
            ..Options::default()
        });
        let (_, composing) = process_keys(&mut automata, &layout, "gks");
        assert_eq!(composing, Some("\u{1112}\u{1161}\u{11AB}".to_string()));
    }

    // ── 갈마들이 ──

    #[test]
    fn test_galmadeuli_pair_right() {
        let layout = make_layout(LAYOUT_1HAND_RIGHT);
        assert_eq!(type_word(&layout, "rr"), "소");
        assert_eq!(type_word(&layout, "ee"), "주");
        assert_eq!(type_word(&layout, "fmth"), "우리");
        assert_eq!(type_word(&layout, "fgtjn"), "아름");
    }

    #[test]
    fn test_galmadeuli_pair_left() {
        let layout = make_layout(LAYOUT_1HAND_LEFT);
        assert_eq!(type_word(&layout, "uu"), "소");
        assert_eq!(type_word(&layout, "ii"), "주");
        assert_eq!(type_word(&layout, "hhyhb"), "바람");
    }

    #[test]
    fn test_galmadeuli_first_key_is_consonant() {
        let layout = make_layout(LAYOUT_1HAND_RIGHT);
        let mut automata = JamoAutomata::new();
        let (_, composing) = process_keys(&mut automata, &layout, "r");
        assert_eq!(composing, Some("ㅅ".to_string()));
        assert_eq!(automata.state(), AutomataState::Choseong);
    }

    #[test]
    fn test_galmadeuli_pending_after_jongseong() {
        // ㅂ ㅏ ㄹ + [ㅂ/ㅏ] → 보류
        let layout = make_layout(LAYOUT_1HAND_LEFT);
        let mut automata = JamoAutomata::new();
        let (committed, composing) = process_keys(&mut automata, &layout, "hhyh");
        assert_eq!(committed, "");
        assert_eq!(composing, Some("발ㅂ".to_string()));
        assert_eq!(automata.state(), AutomataState::GalmadeuliPending);
        assert!(!automata.is_empty());
    }

    #[test]
    fn test_galmadeuli_pending_then_vowel_reads_consonant() {
        // 보류 키 뒤에 모음(ㅏ) → 보류 키는 ㅂ: 발 + 바
        let layout = make_layout(LAYOUT_1HAND_LEFT);
        let mut automata = JamoAutomata::new();
        let (committed, composing) = process_keys(&mut automata, &layout, "hhyhv");
        assert_eq!(committed, "발");
        assert_eq!(composing, Some("바".to_string()));
    }

    #[test]
    fn test_galmadeuli_pending_flush_reads_vowel() {
        let layout = make_layout(LAYOUT_1HAND_LEFT);
        assert_eq!(type_word(&layout, "hhyh"), "바라");
    }

    #[test]
    fn test_galmadeuli_pending_jamo_output() {
        let layout = make_layout(LAYOUT_1HAND_LEFT);
        let mut automata = JamoAutomata::with_options(Options {
            output_mode: OutputMode::Jamo,
            ..Options::default()
        });
        let (committed, composing) = process_keys(&mut automata, &layout, "hhyh");
        assert_eq!(committed, "");
        assert_eq!(
            composing,
            Some("\u{1107}\u{1161}\u{11AF}\u{1107}\u{1160}".to_string())
        );
    }

    #[test]
    fn test_galmadeuli_pending_backspace() {
        let layout = make_layout(LAYOUT_1HAND_LEFT);
        let mut automata = JamoAutomata::new();
        process_keys(&mut automata, &layout, "hhyh");
        let result = automata.backspace();
        assert_eq!(result.composing, Some("발".to_string()));
        assert_eq!(automata.state(), AutomataState::Jongseong);
    }

    #[test]
    fn test_reset_discards_orphan_key() {
        let layout = make_layout(LAYOUT_1HAND_RIGHT);
        let mut automata = JamoAutomata::new();
        process_keys(&mut automata, &layout, "r");
        automata.reset();
        assert!(automata.is_empty());
        let (_, composing) = process_keys(&mut automata, &layout, "rr");
        assert_eq!(composing, Some("소".to_string()));
    }
}
