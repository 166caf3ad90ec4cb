pub mod automata;
pub mod context;
pub mod error;
pub mod layout;
pub mod session;
pub mod unicode;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use layout::schema::Hand;

pub use context::{ContextOption, InputContext};
pub use error::HangulError;
pub use layout::registry::{LayoutInfo, list_layouts};
pub use session::{SessionHandle, SessionTable};

uniffi::setup_scaffolding!();

/// 자판 정보 (UniFFI → Swift/Kotlin 전달용)
#[derive(uniffi::Record, Debug, Clone, PartialEq, Eq)]
pub struct KeyboardInfo {
    pub id: String,
    pub name: String,
    pub hand: KeyboardHand,
    pub galmadeuli: bool,
}

impl From<LayoutInfo> for KeyboardInfo {
    fn from(info: LayoutInfo) -> Self {
        KeyboardInfo {
            id: info.id,
            name: info.name,
            hand: info.hand.into(),
            galmadeuli: info.galmadeuli,
        }
    }
}

/// 한손 자판의 손 방향 (두 손 자판은 None)
#[derive(uniffi::Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardHand {
    None,
    Left,
    Right,
}

impl From<Hand> for KeyboardHand {
    fn from(hand: Hand) -> Self {
        match hand {
            Hand::None => KeyboardHand::None,
            Hand::Left => KeyboardHand::Left,
            Hand::Right => KeyboardHand::Right,
        }
    }
}

/// 조합 결과 출력 형식 (UniFFI enum)
#[derive(uniffi::Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Syllable,
    Jamo,
}

impl From<automata::OutputMode> for OutputMode {
    fn from(mode: automata::OutputMode) -> Self {
        match mode {
            automata::OutputMode::Syllable => OutputMode::Syllable,
            automata::OutputMode::Jamo => OutputMode::Jamo,
        }
    }
}

impl From<OutputMode> for automata::OutputMode {
    fn from(mode: OutputMode) -> Self {
        match mode {
            OutputMode::Syllable => automata::OutputMode::Syllable,
            OutputMode::Jamo => automata::OutputMode::Jamo,
        }
    }
}

/// 입력 컨텍스트 옵션 (UniFFI enum)
#[derive(uniffi::Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContextOption {
    AutoReorder,
    CombiOnDoubleStroke,
    NonChoseongCombi,
}

impl From<InputContextOption> for ContextOption {
    fn from(option: InputContextOption) -> Self {
        match option {
            InputContextOption::AutoReorder => ContextOption::AutoReorder,
            InputContextOption::CombiOnDoubleStroke => ContextOption::CombiOnDoubleStroke,
            InputContextOption::NonChoseongCombi => ContextOption::NonChoseongCombi,
        }
    }
}

/// 내장 자판 목록
#[uniffi::export]
pub fn keyboard_list() -> Vec<KeyboardInfo> {
    list_layouts().into_iter().map(KeyboardInfo::from).collect()
}

// ── 코드포인트 함수 ──

/// 음절을 이루는 첫가끝 자모 코드포인트
#[derive(uniffi::Record, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyllableJamo {
    pub choseong: u32,
    pub jungseong: u32,
    /// 종성이 없으면 None
    pub jongseong: Option<u32>,
}

fn classify(code: u32, predicate: fn(char) -> bool) -> bool {
    char::from_u32(code).is_some_and(predicate)
}

#[uniffi::export]
pub fn is_choseong(code: u32) -> bool {
    classify(code, unicode::is_choseong)
}

#[uniffi::export]
pub fn is_jungseong(code: u32) -> bool {
    classify(code, unicode::is_jungseong)
}

#[uniffi::export]
pub fn is_jongseong(code: u32) -> bool {
    classify(code, unicode::is_jongseong)
}

#[uniffi::export]
pub fn is_syllable(code: u32) -> bool {
    classify(code, unicode::is_syllable)
}

#[uniffi::export]
pub fn is_jamo(code: u32) -> bool {
    classify(code, unicode::is_jamo)
}

#[uniffi::export]
pub fn is_cjamo(code: u32) -> bool {
    classify(code, unicode::is_cjamo)
}

/// 첫가끝 자모로 음절을 합성한다. 합성할 수 없으면 None
#[uniffi::export]
pub fn jamo_to_syllable(choseong: u32, jungseong: u32, jongseong: Option<u32>) -> Option<u32> {
    let jongseong = match jongseong {
        Some(code) => Some(char::from_u32(code)?),
        None => None,
    };
    unicode::jamo_to_syllable(char::from_u32(choseong)?, char::from_u32(jungseong)?, jongseong)
        .map(u32::from)
}

/// 음절을 첫가끝 자모로 분해한다. 음절이 아니면 None
#[uniffi::export]
pub fn syllable_to_jamo(syllable: u32) -> Option<SyllableJamo> {
    let (choseong, jungseong, jongseong) =
        unicode::decompose_syllable(char::from_u32(syllable)?)?;
    Some(SyllableJamo {
        choseong: choseong.into(),
        jungseong: jungseong.into(),
        jongseong: jongseong.map(u32::from),
    })
}

/// 한글 입력 컨텍스트 (UniFFI object, thread-safe)
#[derive(uniffi::Object)]
pub struct HangulInputContext {
    context: Mutex<InputContext>,
}

impl HangulInputContext {
    fn lock(&self) -> MutexGuard<'_, InputContext> {
        // poison된 잠금도 그대로 쓴다.
        self.context.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[uniffi::export]
impl HangulInputContext {
    /// 자판 식별자로 새 컨텍스트를 만든다. (예: "2", "1hand-right")
    #[uniffi::constructor]
    pub fn new(keyboard: String) -> Result<Arc<Self>, HangulError> {
        let context = InputContext::new(&keyboard)?;
        Ok(Arc::new(HangulInputContext {
            context: Mutex::new(context),
        }))
    }

    /// ASCII 키 코드를 처리한다. false면 한글 키가 아니므로 시스템에 위임
    pub fn process(&self, ascii: u32) -> bool {
        self.lock().process(ascii)
    }

    /// 백스페이스 처리 (오토마타 한 단계 되돌림)
    pub fn backspace(&self) -> bool {
        self.lock().backspace()
    }

    /// 현재 조합을 확정한다.
    pub fn flush(&self) -> String {
        self.lock().flush()
    }

    /// 현재 조합을 폐기한다.
    pub fn reset(&self) {
        self.lock().reset();
    }

    pub fn preedit_string(&self) -> String {
        self.lock().preedit_string()
    }

    pub fn commit_string(&self) -> String {
        self.lock().commit_string().to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn has_choseong(&self) -> bool {
        self.lock().has_choseong()
    }

    pub fn has_jungseong(&self) -> bool {
        self.lock().has_jungseong()
    }

    pub fn has_jongseong(&self) -> bool {
        self.lock().has_jongseong()
    }

    /// 로마자 전사 자판이면 true
    pub fn is_transliteration(&self) -> bool {
        self.lock().is_transliteration()
    }

    pub fn get_option(&self, option: InputContextOption) -> bool {
        self.lock().option(option.into())
    }

    pub fn set_option(&self, option: InputContextOption, value: bool) {
        self.lock().set_option(option.into(), value);
    }

    pub fn output_mode(&self) -> OutputMode {
        self.lock().output_mode().into()
    }

    pub fn set_output_mode(&self, mode: OutputMode) {
        self.lock().set_output_mode(mode.into());
    }

    /// 현재 자판 식별자
    pub fn keyboard(&self) -> String {
        self.lock().keyboard().id.clone()
    }

    /// 자판을 바꾼다. 조합 중인 내용은 버린다.
    pub fn select_keyboard(&self, keyboard: String) -> Result<(), HangulError> {
        self.lock().select_keyboard(&keyboard)
    }
}
