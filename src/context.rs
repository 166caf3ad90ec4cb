/// 입력 컨텍스트: 자판, 오토마타, 확정 버퍼를 묶은 세션 하나
use std::sync::Arc;

use crate::automata::jamo::{JamoAutomata, Options};
use crate::automata::{AutomataState, OutputMode};
use crate::error::Result;
use crate::layout::{KeyboardLayout, registry};

/// 입력 컨텍스트 옵션 (기본값은 모두 꺼짐)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextOption {
    AutoReorder,
    CombiOnDoubleStroke,
    NonChoseongCombi,
}

#[derive(Debug)]
pub struct InputContext {
    layout: Arc<KeyboardLayout>,
    automata: JamoAutomata,
    /// 가장 최근 process 호출이 확정한 텍스트
    commit: String,
}

impl InputContext {
    /// 내장 자판 식별자로 컨텍스트를 만든다.
    pub fn new(layout_id: &str) -> Result<Self> {
        Ok(Self::with_layout(registry::resolve(layout_id)?))
    }

    pub fn with_layout(layout: Arc<KeyboardLayout>) -> Self {
        InputContext {
            layout,
            automata: JamoAutomata::new(),
            commit: String::new(),
        }
    }

    /// ASCII 키 코드를 처리한다.
    /// 자판에 없는 키면 false를 돌려주고 조합과 확정 버퍼를 건드리지 않는다.
    pub fn process(&mut self, ascii: u32) -> bool {
        let _span = tracing::debug_span!("process", layout = %self.layout.id, ascii).entered();

        let Some(key) = char::from_u32(ascii).filter(char::is_ascii) else {
            tracing::trace!("not an ascii key");
            return false;
        };
        let Some(binding) = self.layout.binding(key) else {
            tracing::trace!(%key, "unmapped key");
            return false;
        };

        let result = self.automata.process(key, binding, &self.layout);
        self.commit = result.committed.unwrap_or_default();
        tracing::trace!(commit = %self.commit, preedit = %self.automata.composing_text(), "key processed");
        result.handled
    }

    /// 한 단계 되돌린다. 조합이 비어 있으면 false.
    pub fn backspace(&mut self) -> bool {
        let handled = self.automata.backspace().handled;
        if handled {
            self.commit.clear();
        }
        handled
    }

    /// 조합 중인 음절을 확정해 돌려준다. 확정 버퍼는 비운다.
    pub fn flush(&mut self) -> String {
        let flushed = self.automata.flush().committed.unwrap_or_default();
        self.commit.clear();
        flushed
    }

    /// 조합, 확정 버퍼, 갈마들이 기록을 모두 버린다.
    pub fn reset(&mut self) {
        self.automata.reset();
        self.commit.clear();
    }

    pub fn preedit_string(&self) -> String {
        self.automata.composing_text()
    }

    pub fn commit_string(&self) -> &str {
        &self.commit
    }

    pub fn is_empty(&self) -> bool {
        self.automata.is_empty()
    }

    pub fn has_choseong(&self) -> bool {
        self.automata.buffer().choseong.is_some()
    }

    pub fn has_jungseong(&self) -> bool {
        self.automata.buffer().jungseong.is_some()
    }

    pub fn has_jongseong(&self) -> bool {
        self.automata.buffer().jongseong.is_some()
    }

    pub fn is_transliteration(&self) -> bool {
        self.layout.layout_type.is_transliteration()
    }

    pub fn state(&self) -> AutomataState {
        self.automata.state()
    }

    pub fn option(&self, option: ContextOption) -> bool {
        let options = &self.automata.options;
        match option {
            ContextOption::AutoReorder => options.auto_reorder,
            ContextOption::CombiOnDoubleStroke => options.combi_on_double_stroke,
            ContextOption::NonChoseongCombi => options.non_choseong_combi,
        }
    }

    pub fn set_option(&mut self, option: ContextOption, value: bool) {
        let options = &mut self.automata.options;
        match option {
            ContextOption::AutoReorder => options.auto_reorder = value,
            ContextOption::CombiOnDoubleStroke => options.combi_on_double_stroke = value,
            ContextOption::NonChoseongCombi => options.non_choseong_combi = value,
        }
    }

    pub fn output_mode(&self) -> OutputMode {
        self.automata.options.output_mode
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.automata.options.output_mode = mode;
    }

    pub fn options(&self) -> Options {
        self.automata.options
    }

    pub fn keyboard(&self) -> &KeyboardLayout {
        &self.layout
    }

    /// 자판을 바꾼다. 조합 중인 내용은 버리고 옵션은 유지한다.
    pub fn select_keyboard(&mut self, layout_id: &str) -> Result<()> {
        let layout = registry::resolve(layout_id)?;
        tracing::debug!(from = %self.layout.id, to = %layout.id, "keyboard selected");
        self.reset();
        self.layout = layout;
        Ok(())
    }
}
