/// 핸들 기반 세션 테이블
///
/// 호출자가 컨텍스트를 직접 소유하지 않고 불투명한 핸들로 다룰 때 쓴다.
/// 핸들은 재사용되지 않으므로 해제된 핸들로 호출하면 항상 `InvalidHandle`이다.
use std::collections::HashMap;

use crate::context::InputContext;
use crate::error::{HangulError, Result};
use crate::layout::registry::{self, LayoutInfo};

/// 세션 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHandle(u64);

impl SessionHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
pub struct SessionTable {
    sessions: HashMap<u64, InputContext>,
    next_id: u64,
}

impl Default for SessionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionTable {
    pub fn new() -> Self {
        SessionTable {
            sessions: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn list_layouts() -> Vec<LayoutInfo> {
        registry::list_layouts()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn create(&mut self, layout_id: &str) -> Result<SessionHandle> {
        let context = InputContext::new(layout_id)?;
        let id = self.next_id;
        self.next_id += 1;
        self.sessions.insert(id, context);
        tracing::debug!(session = id, layout = layout_id, "session created");
        Ok(SessionHandle(id))
    }

    pub fn destroy(&mut self, handle: SessionHandle) -> Result<()> {
        if self.sessions.remove(&handle.0).is_none() {
            return Err(HangulError::InvalidHandle(handle.0));
        }
        tracing::debug!(session = handle.0, "session destroyed");
        Ok(())
    }

    pub fn process(&mut self, handle: SessionHandle, ascii: u32) -> Result<bool> {
        Ok(self.get_mut(handle)?.process(ascii))
    }

    pub fn reset(&mut self, handle: SessionHandle) -> Result<()> {
        self.get_mut(handle)?.reset();
        Ok(())
    }

    pub fn flush(&mut self, handle: SessionHandle) -> Result<String> {
        Ok(self.get_mut(handle)?.flush())
    }

    pub fn preedit(&self, handle: SessionHandle) -> Result<String> {
        Ok(self.get(handle)?.preedit_string())
    }

    pub fn commit(&self, handle: SessionHandle) -> Result<String> {
        Ok(self.get(handle)?.commit_string().to_string())
    }

    /// 핸들의 컨텍스트 (옵션 설정 등 테이블에 없는 조작용)
    pub fn get(&self, handle: SessionHandle) -> Result<&InputContext> {
        self.sessions
            .get(&handle.0)
            .ok_or(HangulError::InvalidHandle(handle.0))
    }

    pub fn get_mut(&mut self, handle: SessionHandle) -> Result<&mut InputContext> {
        self.sessions
            .get_mut(&handle.0)
            .ok_or(HangulError::InvalidHandle(handle.0))
    }
}
