use crate::toolbar::geometry::{Point, Rect};

/// 指针按键（DOM `MouseEvent.button`）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Auxiliary,
    Secondary,
    Other(u16),
}

impl PointerButton {
    pub fn from_dom(button: u16) -> Self {
        match button {
            0 => PointerButton::Primary,
            1 => PointerButton::Auxiliary,
            2 => PointerButton::Secondary,
            other => PointerButton::Other(other),
        }
    }
}

/// 一次拖拽会话
///
/// 记录按下点相对容器左上角的偏移，之后容器左上角 = 指针 - 偏移（1:1 跟随）。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    offset: Point,
}

impl DragSession {
    pub fn begin(pointer: Point, rect: Rect) -> Self {
        Self {
            offset: Point::new(pointer.x - rect.left, pointer.y - rect.top),
        }
    }

    /// 指针移动到 `pointer` 时容器左上角的位置
    pub fn follow(&self, pointer: Point) -> Point {
        Point::new(pointer.x - self.offset.x, pointer.y - self.offset.y)
    }
}
