//! 工具栏事件队列
//!
//! 前端转发的指针、拖拽与生命周期事件先进入一个无界通道，再由单个任务
//! 按到达顺序依次交给 `ClipboardToolbar`。这样 `mouseenter` / `mouseleave`、
//! `mousemove` / `mouseup` 之间的先后关系在状态机里保持不变。
//!
//! 发送端是同步的，Tauri 命令无需运行时上下文即可投递事件；
//! 接收任务运行在 tokio 运行时上，定时器也由它创建。

use tokio::sync::mpsc;

use crate::error::AppError;
use crate::toolbar::drag::PointerButton;
use crate::toolbar::geometry::{Point, Rect, ToolbarSize, Viewport};
use crate::toolbar::ClipboardToolbar;

/// 需要按顺序作用于工具栏的事件
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolbarEvent {
    Mount { viewport: Viewport, size: ToolbarSize },
    Unmount,
    Resize { viewport: Viewport },
    PointerEnter,
    PointerLeave,
    DragStart {
        button: PointerButton,
        pointer: Point,
        rendered: Rect,
    },
    DragMove { pointer: Point },
    DragEnd,
}

/// 事件发送端，可廉价克隆
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<ToolbarEvent>,
}

impl EventSender {
    pub fn send(&self, event: ToolbarEvent) -> Result<(), AppError> {
        self.tx
            .send(event)
            .map_err(|e| AppError::EventQueue(format!("{:?} 未能投递", e.0)))
    }
}

pub type EventReceiver = mpsc::UnboundedReceiver<ToolbarEvent>;

pub fn event_channel() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, rx)
}

/// 依次处理事件，直到所有发送端都被丢弃
pub async fn run_event_loop(toolbar: ClipboardToolbar, mut rx: EventReceiver) {
    log::info!("工具栏事件循环已启动");
    while let Some(event) = rx.recv().await {
        log::trace!("处理工具栏事件: {:?}", event);
        toolbar.apply(event);
    }
    log::info!("工具栏事件循环已结束");
}
