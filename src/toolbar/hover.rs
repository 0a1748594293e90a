//! 悬停展开/收起状态机
//!
//! ```text
//!            enter                 timer(1s)
//!   Idle ───────────▶ HoverPending ─────────▶ Expanded
//!    ▲  ◀─────────────    │ leave              │  ▲
//!    │                    ▼                    │  │ enter
//!    │                  Idle            leave  ▼  │
//!    └──────────────────────────────── CollapsePending
//!              timer(3s)
//!
//!   任意状态 ── drag start ──▶ Dragging ── drag end ──▶ Expanded / Idle
//! ```
//!
//! 转移表是纯函数，定时器的创建与取消由 `shell` 在每次转移时统一处理：
//! 先取消旧状态持有的定时器，再为新状态创建定时器，任何时刻至多一个悬停定时器。

use std::time::Duration;

use serde::Serialize;

use crate::config::{COLLAPSE_DELAY, HOVER_EXPAND_DELAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InteractionState {
    #[default]
    Idle,
    HoverPending,
    Expanded,
    CollapsePending,
    Dragging,
}

impl InteractionState {
    /// 进入该状态时需要启动的定时器时长
    pub fn timer_delay(self) -> Option<Duration> {
        match self {
            InteractionState::HoverPending => Some(HOVER_EXPAND_DELAY),
            InteractionState::CollapsePending => Some(COLLAPSE_DELAY),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEvent {
    PointerEnter,
    PointerLeave,
    TimerFired,
    DragStarted,
    /// `revealed` 为拖拽结束时操作按钮是否处于展开状态
    DragEnded { revealed: bool },
}

/// 状态转移表；返回 `None` 表示该事件在当前状态下无效
pub fn next_state(current: InteractionState, event: HoverEvent) -> Option<InteractionState> {
    use HoverEvent::*;
    use InteractionState::*;

    match (current, event) {
        (Dragging, DragEnded { revealed: true }) => Some(Expanded),
        (Dragging, DragEnded { revealed: false }) => Some(Idle),
        (Dragging, _) => None,
        (_, DragStarted) => Some(Dragging),
        (Idle, PointerEnter) => Some(HoverPending),
        (HoverPending, PointerLeave) => Some(Idle),
        (HoverPending, TimerFired) => Some(Expanded),
        (Expanded, PointerLeave) => Some(CollapsePending),
        (CollapsePending, PointerEnter) => Some(Expanded),
        (CollapsePending, TimerFired) => Some(Idle),
        _ => None,
    }
}
