//! 宿主渲染层模块
//!
//! # 设计思路
//!
//! 工具栏的全部状态都在 Rust 侧，宿主文档（webview）只负责按指令渲染、
//! 并把原始的指针/点击事件转发回来。两者之间的约定由 [`Surface`] 描述：
//!
//! - 所有渲染指令都是可序列化的值对象（`ContainerStyle`、`PromptView` 等），
//!   前端只需把它们映射为 CSS/DOM。
//! - 渲染是尽力而为的：发送失败只记录日志，不影响状态机。
//!
//! # 实现思路
//!
//! - `TauriSurface` 通过 Tauri 事件把指令推送给前端，同时兼任图标渲染器。
//! - `DialogNotifier` 使用 `tauri-plugin-dialog` 弹出阻塞式提示。

use serde::Serialize;
use tauri::{AppHandle, Emitter};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};

use crate::config::EXPANDED_ACTIONS_MAX_WIDTH;
use crate::ports::{IconRenderer, IconTarget, Notifier};

// ============================================================================
// 渲染指令
// ============================================================================

/// 容器的定位锚点
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Anchor {
    /// `right: 0; bottom: <bottom>px`
    RightBottom { bottom: f64 },
    /// `right: 0; top: <top>px`
    RightTop { top: f64 },
    /// `left: <left>px; top: <top>px`（拖拽中）
    LeftTop { left: f64, top: f64 },
}

/// 容器位置变化是否带动画
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Transition {
    None,
    Snap,
}

/// 圆角样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Corners {
    /// 仅左侧圆角（贴靠右边缘时）
    Leading,
    /// 四角圆角（拖拽中）
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerStyle {
    pub anchor: Anchor,
    pub transition: Transition,
    pub corners: Corners,
}

/// 操作按钮区的显示状态
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionsView {
    pub revealed: bool,
    pub opacity: f64,
    pub max_width: f64,
}

impl ActionsView {
    pub fn new(revealed: bool) -> Self {
        if revealed {
            Self {
                revealed,
                opacity: 1.0,
                max_width: EXPANDED_ACTIONS_MAX_WIDTH,
            }
        } else {
            Self {
                revealed,
                opacity: 0.0,
                max_width: 0.0,
            }
        }
    }
}

/// 自动监听按钮的外观，只反映监听是否开启
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchIndicator {
    pub active: bool,
    pub icon: &'static str,
    pub title: &'static str,
}

impl WatchIndicator {
    pub fn new(active: bool) -> Self {
        if active {
            Self {
                active,
                icon: "eye",
                title: "Auto Watch: ON",
            }
        } else {
            Self {
                active,
                icon: "eye-off",
                title: "Auto Watch: OFF",
            }
        }
    }
}

/// 确认提示面板
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptView {
    pub id: u64,
    pub message: String,
    pub content: String,
}

/// 宿主文档的渲染接口
pub trait Surface: Send + Sync {
    fn mount_container(&self, style: &ContainerStyle);
    fn unmount_container(&self);
    fn apply_container_style(&self, style: &ContainerStyle);
    fn set_actions(&self, actions: &ActionsView);
    fn set_drag_cursor(&self, grabbing: bool);
    fn set_watch_indicator(&self, indicator: &WatchIndicator);
    fn show_prompt(&self, prompt: &PromptView);
    fn remove_prompt(&self, prompt_id: u64);
}

// ============================================================================
// Tauri 实现
// ============================================================================

pub const EVENT_MOUNT: &str = "toolbar://mount";
pub const EVENT_UNMOUNT: &str = "toolbar://unmount";
pub const EVENT_CONTAINER_STYLE: &str = "toolbar://container-style";
pub const EVENT_ACTIONS: &str = "toolbar://actions";
pub const EVENT_DRAG_CURSOR: &str = "toolbar://drag-cursor";
pub const EVENT_WATCH: &str = "toolbar://watch";
pub const EVENT_PROMPT_SHOW: &str = "toolbar://prompt-show";
pub const EVENT_PROMPT_REMOVE: &str = "toolbar://prompt-remove";
pub const EVENT_ICONS: &str = "toolbar://icons";

/// 通过 Tauri 事件驱动前端渲染
#[derive(Clone)]
pub struct TauriSurface {
    app: AppHandle,
}

impl TauriSurface {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }

    fn emit_or_warn<S: Serialize + Clone>(&self, event: &str, payload: S) {
        if let Err(err) = self.app.emit(event, payload) {
            log::warn!("发送界面事件 {} 失败: {}", event, err);
        }
    }
}

impl Surface for TauriSurface {
    fn mount_container(&self, style: &ContainerStyle) {
        self.emit_or_warn(EVENT_MOUNT, *style);
    }

    fn unmount_container(&self) {
        self.emit_or_warn(EVENT_UNMOUNT, ());
    }

    fn apply_container_style(&self, style: &ContainerStyle) {
        self.emit_or_warn(EVENT_CONTAINER_STYLE, *style);
    }

    fn set_actions(&self, actions: &ActionsView) {
        self.emit_or_warn(EVENT_ACTIONS, *actions);
    }

    fn set_drag_cursor(&self, grabbing: bool) {
        self.emit_or_warn(EVENT_DRAG_CURSOR, grabbing);
    }

    fn set_watch_indicator(&self, indicator: &WatchIndicator) {
        self.emit_or_warn(EVENT_WATCH, *indicator);
    }

    fn show_prompt(&self, prompt: &PromptView) {
        self.emit_or_warn(EVENT_PROMPT_SHOW, prompt.clone());
    }

    fn remove_prompt(&self, prompt_id: u64) {
        self.emit_or_warn(EVENT_PROMPT_REMOVE, prompt_id);
    }
}

impl IconRenderer for TauriSurface {
    fn render(&self, target: IconTarget) {
        self.emit_or_warn(EVENT_ICONS, target);
    }
}

/// 使用系统对话框弹出提示
#[derive(Clone)]
pub struct DialogNotifier {
    app: AppHandle,
}

impl DialogNotifier {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl Notifier for DialogNotifier {
    fn notify(&self, message: &str) {
        self.app
            .dialog()
            .message(message)
            .title("Clipboard Toolbar")
            .kind(MessageDialogKind::Warning)
            .show(|_| {});
    }
}
