//! Tauri 命令层
//!
//! 前端只转发原始 DOM 事件（指针进入/离开、按下/移动/抬起、点击），
//! 这里把它们交给托管的 `ClipboardToolbar`。
//!
//! - 指针、拖拽与生命周期事件是同步命令，只负责投递到事件队列，
//!   由单个任务按到达顺序处理（见 `toolbar::events`）。
//! - 切换监听、手动捕获、确认提示需要等待结果，是 `async` 命令，
//!   运行在 tokio 运行时上。

use std::sync::Arc;

use tauri::{AppHandle, State};

use crate::capture::CaptureOutcome;
use crate::clipboard::SystemClipboard;
use crate::error::AppError;
use crate::obsidian::{DesktopOpener, ObsidianSaveService};
use crate::settings::JsonSettingsProvider;
use crate::storage::{self, JsonPositionStore};
use crate::surface::{DialogNotifier, TauriSurface};
use crate::toolbar::{
    ClipboardToolbar, EventSender, Point, PointerButton, Rect, ToolbarDeps, ToolbarEvent,
    ToolbarSize, Viewport, event_channel, run_event_loop,
};

/// 托管状态：进程内唯一的工具栏实例及其事件队列
pub struct ToolbarState {
    pub toolbar: ClipboardToolbar,
    pub events: EventSender,
}

/// 使用桌面实现组装工具栏，并启动事件循环
///
/// 视口与尺寸在前端挂载时上报，这里先用零值占位。
pub fn build_toolbar(app: &AppHandle) -> Result<ToolbarState, AppError> {
    let surface = Arc::new(TauriSurface::new(app.clone()));
    let deps = ToolbarDeps {
        surface: surface.clone(),
        icons: surface,
        position_store: Arc::new(JsonPositionStore::new(storage::state_file_path(app)?)),
        clipboard: Arc::new(SystemClipboard),
        saver: Arc::new(ObsidianSaveService::new(Arc::new(DesktopOpener::new(
            app.clone(),
        )))),
        settings: Arc::new(JsonSettingsProvider::for_app(app)?),
        notifier: Arc::new(DialogNotifier::new(app.clone())),
    };

    let toolbar = ClipboardToolbar::new(deps, Viewport::default(), ToolbarSize::default());
    let (events, rx) = event_channel();
    tauri::async_runtime::spawn(run_event_loop(toolbar.clone(), rx));

    Ok(ToolbarState { toolbar, events })
}

#[tauri::command]
pub fn toolbar_mount(
    state: State<'_, ToolbarState>,
    viewport: Viewport,
    size: ToolbarSize,
) -> Result<(), AppError> {
    log::info!("工具栏挂载: viewport={}x{}", viewport.width, viewport.height);
    state.events.send(ToolbarEvent::Mount { viewport, size })
}

#[tauri::command]
pub fn toolbar_unmount(state: State<'_, ToolbarState>) -> Result<(), AppError> {
    state.events.send(ToolbarEvent::Unmount)
}

#[tauri::command]
pub fn toolbar_resize(state: State<'_, ToolbarState>, viewport: Viewport) -> Result<(), AppError> {
    state.events.send(ToolbarEvent::Resize { viewport })
}

#[tauri::command]
pub fn toolbar_pointer_enter(state: State<'_, ToolbarState>) -> Result<(), AppError> {
    state.events.send(ToolbarEvent::PointerEnter)
}

#[tauri::command]
pub fn toolbar_pointer_leave(state: State<'_, ToolbarState>) -> Result<(), AppError> {
    state.events.send(ToolbarEvent::PointerLeave)
}

/// `rect` 为按下时容器的 `getBoundingClientRect()`
#[tauri::command]
pub fn toolbar_drag_start(
    state: State<'_, ToolbarState>,
    button: u16,
    x: f64,
    y: f64,
    rect: Rect,
) -> Result<(), AppError> {
    state.events.send(ToolbarEvent::DragStart {
        button: PointerButton::from_dom(button),
        pointer: Point::new(x, y),
        rendered: rect,
    })
}

#[tauri::command]
pub fn toolbar_drag_move(state: State<'_, ToolbarState>, x: f64, y: f64) -> Result<(), AppError> {
    state.events.send(ToolbarEvent::DragMove {
        pointer: Point::new(x, y),
    })
}

#[tauri::command]
pub fn toolbar_drag_end(state: State<'_, ToolbarState>) -> Result<(), AppError> {
    state.events.send(ToolbarEvent::DragEnd)
}

#[tauri::command]
pub async fn toolbar_toggle_watch(state: State<'_, ToolbarState>) -> Result<bool, AppError> {
    Ok(state.toolbar.toggle_watch().await)
}

#[tauri::command]
pub async fn toolbar_manual_capture(state: State<'_, ToolbarState>) -> Result<bool, AppError> {
    Ok(state.toolbar.manual_capture().await == CaptureOutcome::Saved)
}

#[tauri::command]
pub async fn prompt_accept(state: State<'_, ToolbarState>, id: u64) -> Result<(), AppError> {
    if state.toolbar.accept_prompt(id).await.is_none() {
        log::debug!("确认提示 #{} 已失效，忽略 Yes", id);
    }
    Ok(())
}

#[tauri::command]
pub async fn prompt_decline(state: State<'_, ToolbarState>, id: u64) -> Result<(), AppError> {
    if !state.toolbar.decline_prompt(id) {
        log::debug!("确认提示 #{} 已失效，忽略 No", id);
    }
    Ok(())
}
