//! 浮动剪贴板工具栏
//!
//! `ClipboardToolbar` 是顶层对象，持有：
//! - `ToolbarShell`：位置、拖拽、贴靠、悬停展开
//! - `ClipboardWatcher`：自动监听开关与轮询
//! - `ConfirmationPrompt`：自动监听检测到变化后的确认提示
//! - `CaptureController`：手动捕获与保存
//!
//! 所有状态都保存在实例上，没有模块级全局变量；`mount` / `unmount` 显式管理生命周期。
//! 句柄可廉价克隆，克隆体共享同一实例。

pub mod drag;
pub mod events;
pub mod geometry;
pub mod hover;
pub mod shell;

use std::sync::Arc;

use crate::capture::{CaptureController, CaptureOutcome};
use crate::clipboard::{ClipboardWatcher, ConfirmationPrompt};
use crate::ports::{
    ClipboardAccess, IconRenderer, Notifier, PositionStore, SaveService, SettingsProvider,
};
use crate::surface::Surface;

pub use drag::PointerButton;
pub use events::{EventReceiver, EventSender, ToolbarEvent, event_channel, run_event_loop};
pub use geometry::{Placement, Point, Rect, ToolbarSize, Viewport};
pub use hover::InteractionState;
pub use shell::ToolbarShell;

/// 工具栏依赖的全部外部协作方
#[derive(Clone)]
pub struct ToolbarDeps {
    pub surface: Arc<dyn Surface>,
    pub icons: Arc<dyn IconRenderer>,
    pub position_store: Arc<dyn PositionStore>,
    pub clipboard: Arc<dyn ClipboardAccess>,
    pub saver: Arc<dyn SaveService>,
    pub settings: Arc<dyn SettingsProvider>,
    pub notifier: Arc<dyn Notifier>,
}

#[derive(Clone)]
pub struct ClipboardToolbar {
    shell: ToolbarShell,
    watcher: ClipboardWatcher,
    prompt: ConfirmationPrompt,
    capture: CaptureController,
}

impl ClipboardToolbar {
    pub fn new(deps: ToolbarDeps, viewport: Viewport, size: ToolbarSize) -> Self {
        let capture = CaptureController::new(
            Arc::clone(&deps.clipboard),
            deps.saver,
            deps.settings,
            deps.notifier,
        );
        let prompt = ConfirmationPrompt::new(Arc::clone(&deps.surface), capture.clone());
        let watcher = ClipboardWatcher::new(
            deps.clipboard,
            prompt.clone(),
            Arc::clone(&deps.surface),
            Arc::clone(&deps.icons),
        );
        let shell = ToolbarShell::new(
            deps.surface,
            deps.icons,
            deps.position_store,
            viewport,
            size,
        );

        Self {
            shell,
            watcher,
            prompt,
            capture,
        }
    }

    /// 挂载到宿主文档，并在后台恢复上次保存的位置
    pub fn mount(&self) {
        self.shell.mount();

        let shell = self.shell.clone();
        tokio::spawn(async move {
            shell.restore_position().await;
        });
    }

    /// 卸载：停止监听、移除提示、取消全部定时器
    pub fn unmount(&self) {
        self.watcher.stop();
        self.prompt.dismiss();
        self.shell.unmount();
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        self.shell.set_viewport(viewport);
    }

    pub fn set_toolbar_size(&self, size: ToolbarSize) {
        self.shell.set_toolbar_size(size);
    }

    pub fn pointer_enter(&self) -> bool {
        self.shell.pointer_enter()
    }

    pub fn pointer_leave(&self) -> bool {
        self.shell.pointer_leave()
    }

    pub fn drag_start(&self, button: PointerButton, pointer: Point, rendered: Rect) -> bool {
        self.shell.drag_start(button, pointer, rendered)
    }

    pub fn drag_move(&self, pointer: Point) -> bool {
        self.shell.drag_move(pointer)
    }

    pub fn drag_end(&self) -> Option<f64> {
        self.shell.drag_end()
    }

    /// 应用一个前端事件；由事件循环按到达顺序调用
    pub fn apply(&self, event: ToolbarEvent) {
        match event {
            ToolbarEvent::Mount { viewport, size } => {
                self.set_viewport(viewport);
                self.set_toolbar_size(size);
                self.mount();
            }
            ToolbarEvent::Unmount => self.unmount(),
            ToolbarEvent::Resize { viewport } => self.set_viewport(viewport),
            ToolbarEvent::PointerEnter => {
                self.pointer_enter();
            }
            ToolbarEvent::PointerLeave => {
                self.pointer_leave();
            }
            ToolbarEvent::DragStart {
                button,
                pointer,
                rendered,
            } => {
                self.drag_start(button, pointer, rendered);
            }
            ToolbarEvent::DragMove { pointer } => {
                self.drag_move(pointer);
            }
            ToolbarEvent::DragEnd => {
                self.drag_end();
            }
        }
    }

    pub async fn toggle_watch(&self) -> bool {
        self.watcher.toggle().await
    }

    pub async fn manual_capture(&self) -> CaptureOutcome {
        self.capture.manual_capture().await
    }

    pub async fn accept_prompt(&self, prompt_id: u64) -> Option<CaptureOutcome> {
        self.prompt.accept(prompt_id).await
    }

    pub fn decline_prompt(&self, prompt_id: u64) -> bool {
        self.prompt.decline(prompt_id)
    }

    pub fn shell(&self) -> &ToolbarShell {
        &self.shell
    }

    pub fn watcher(&self) -> &ClipboardWatcher {
        &self.watcher
    }

    pub fn prompt(&self) -> &ConfirmationPrompt {
        &self.prompt
    }

    pub fn capture(&self) -> &CaptureController {
        &self.capture
    }
}
