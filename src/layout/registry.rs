/// 내장 자판 목록
///
/// 자판 JSON5는 바이너리에 포함되며 처음 조회할 때 한 번만 파싱한다.
/// 파싱된 레이아웃은 `Arc`로 모든 입력 컨텍스트가 공유한다.
use std::sync::Arc;

use once_cell::sync::Lazy;

use super::KeyboardLayout;
use super::schema::Hand;
use crate::error::{HangulError, Result};

const LAYOUT_2: &str = include_str!("../../layouts/2.json5");
const LAYOUT_1HAND_RIGHT: &str = include_str!("../../layouts/1hand-right.json5");
const LAYOUT_1HAND_LEFT: &str = include_str!("../../layouts/1hand-left.json5");

static BUILTIN: Lazy<LayoutRegistry> =
    Lazy::new(|| LayoutRegistry::from_sources(&[LAYOUT_2, LAYOUT_1HAND_RIGHT, LAYOUT_1HAND_LEFT]));

/// 자판 식별자, 표시 이름, 한손 방향
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutInfo {
    pub id: String,
    pub name: String,
    pub hand: Hand,
    pub galmadeuli: bool,
}

/// 읽기 전용 자판 목록 (등록 순서 유지)
#[derive(Debug, Default)]
pub struct LayoutRegistry {
    layouts: Vec<Arc<KeyboardLayout>>,
}

impl LayoutRegistry {
    /// 내장 자판 목록
    pub fn builtin() -> &'static LayoutRegistry {
        &BUILTIN
    }

    /// JSON5 소스들로 목록을 만든다.
    /// 파싱에 실패한 소스와 중복 식별자는 로그를 남기고 건너뛴다.
    pub fn from_sources(sources: &[&str]) -> Self {
        let mut layouts: Vec<Arc<KeyboardLayout>> = Vec::with_capacity(sources.len());
        for source in sources {
            match KeyboardLayout::from_json(source) {
                Ok(layout) if layouts.iter().any(|l| l.id == layout.id) => {
                    tracing::error!(id = %layout.id, "duplicate keyboard layout id, skipped");
                }
                Ok(layout) => layouts.push(Arc::new(layout)),
                Err(e) => tracing::error!(error = %e, "keyboard layout rejected"),
            }
        }
        tracing::debug!(count = layouts.len(), "keyboard layouts loaded");
        LayoutRegistry { layouts }
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// 등록 순서대로 자판 정보 목록
    pub fn list(&self) -> Vec<LayoutInfo> {
        self.layouts
            .iter()
            .map(|l| LayoutInfo {
                id: l.id.clone(),
                name: l.name.clone(),
                hand: l.hand,
                galmadeuli: l.galmadeuli,
            })
            .collect()
    }

    /// 식별자로 자판을 찾는다.
    pub fn resolve(&self, id: &str) -> Result<Arc<KeyboardLayout>> {
        self.layouts
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| HangulError::UnknownLayout(id.to_string()))
    }
}

/// 내장 자판 정보 목록
pub fn list_layouts() -> Vec<LayoutInfo> {
    LayoutRegistry::builtin().list()
}

/// 내장 자판에서 식별자로 찾는다.
pub fn resolve(id: &str) -> Result<Arc<KeyboardLayout>> {
    LayoutRegistry::builtin().resolve(id)
}
