#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Action run by a primary button drag.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Tool {
    /// Cut every body crossed by the drag.
    Slice,
    /// Spawn a rectangle spanning the drag.
    #[default]
    DrawRectangle,
    /// Spawn a circle inscribed in the drag.
    DrawCircle,
}

impl Tool {
    /// Every tool in selection order.
    pub const ALL: [Tool; 3] = [Tool::Slice, Tool::DrawRectangle, Tool::DrawCircle];

    fn position(self) -> usize {
        match self {
            Tool::Slice => 0,
            Tool::DrawRectangle => 1,
            Tool::DrawCircle => 2,
        }
    }

    /// Following tool, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Preceding tool, wrapping around.
    pub fn prev(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }
}

/// Currently selected tool, locked while a drag is in progress.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ToolSelector {
    selected: Tool,
    locked: bool,
}

impl ToolSelector {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn selected(&self) -> Tool {
        self.selected
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Select `tool`, ignored while locked. Returns true if `tool` is the selection afterwards.
    pub fn select(&mut self, tool: Tool) -> bool {
        if !self.locked {
            self.selected = tool;
        }

        self.selected == tool
    }

    pub fn select_next(&mut self) -> bool {
        self.select(self.selected.next())
    }

    pub fn select_prev(&mut self) -> bool {
        self.select(self.selected.prev())
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }
}
