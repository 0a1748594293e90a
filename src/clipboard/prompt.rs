//! 确认提示
//!
//! 自动监听检测到剪贴板变化后，弹出 "Clipboard changed. Save to Obsidian?"，
//! 用户可选择 Yes（保存）或 No（忽略），5 秒无操作自动消失。
//!
//! 任意时刻最多只有一个提示：新提示出现前，旧提示先被移除、其自动消失定时器先被取消。
//! 每个提示带唯一 id，前端点击与定时器触发都按 id 核对，过期的操作直接忽略。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::capture::{CaptureController, CaptureOutcome};
use crate::config::{PROMPT_DISMISS_DELAY, PROMPT_MESSAGE};
use crate::guard::lock_or_recover;
use crate::surface::{PromptView, Surface};
use crate::timer::{self, TimerHandle};

struct PendingConfirmation {
    id: u64,
    content: String,
    dismiss_timer: TimerHandle,
}

struct PromptInner {
    surface: Arc<dyn Surface>,
    capture: CaptureController,
    pending: Mutex<Option<PendingConfirmation>>,
    next_id: AtomicU64,
}

impl PromptInner {
    /// 取出指定 id 的提示并从界面移除，同时取消其定时器
    fn take_if_current(&self, id: u64) -> Option<String> {
        let mut pending = lock_or_recover(&self.pending, "确认提示");
        if pending.as_ref().map(|p| p.id) != Some(id) {
            return None;
        }
        let taken = pending.take()?;
        drop(pending);

        self.surface.remove_prompt(taken.id);
        taken.dismiss_timer.cancel();
        Some(taken.content)
    }
}

#[derive(Clone)]
pub struct ConfirmationPrompt {
    inner: Arc<PromptInner>,
}

impl ConfirmationPrompt {
    pub fn new(surface: Arc<dyn Surface>, capture: CaptureController) -> Self {
        Self {
            inner: Arc::new(PromptInner {
                surface,
                capture,
                pending: Mutex::new(None),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// 显示提示，替换已存在的提示，返回新提示的 id
    pub fn show(&self, content: String) -> u64 {
        let inner = &self.inner;
        let mut pending = lock_or_recover(&inner.pending, "确认提示");

        if let Some(previous) = pending.take() {
            log::debug!("替换尚未处理的确认提示 #{}", previous.id);
            inner.surface.remove_prompt(previous.id);
            previous.dismiss_timer.cancel();
        }

        let id = inner.next_id.fetch_add(1, Ordering::Relaxed);
        inner.surface.show_prompt(&PromptView {
            id,
            message: PROMPT_MESSAGE.to_string(),
            content: content.clone(),
        });

        let weak: Weak<PromptInner> = Arc::downgrade(inner);
        let dismiss_timer = timer::schedule_once(PROMPT_DISMISS_DELAY, move |_| {
            if let Some(inner) = weak.upgrade() {
                if inner.take_if_current(id).is_some() {
                    log::debug!("确认提示 #{} 超时自动关闭", id);
                }
            }
        });

        *pending = Some(PendingConfirmation {
            id,
            content,
            dismiss_timer,
        });
        id
    }

    /// 用户选择 Yes：移除提示并保存内容
    ///
    /// 提示已被替换或已消失时返回 `None`。
    pub async fn accept(&self, id: u64) -> Option<CaptureOutcome> {
        let content = self.inner.take_if_current(id)?;
        Some(self.inner.capture.perform_save(&content).await)
    }

    /// 用户选择 No：仅移除提示
    pub fn decline(&self, id: u64) -> bool {
        self.inner.take_if_current(id).is_some()
    }

    /// 移除当前提示（卸载时调用）
    pub fn dismiss(&self) {
        let current = lock_or_recover(&self.inner.pending, "确认提示")
            .as_ref()
            .map(|p| p.id);
        if let Some(id) = current {
            self.inner.take_if_current(id);
        }
    }

    /// 当前提示的 id 与内容
    pub fn current(&self) -> Option<(u64, String)> {
        lock_or_recover(&self.inner.pending, "确认提示")
            .as_ref()
            .map(|p| (p.id, p.content.clone()))
    }

    /// 当前提示的自动消失定时器是否仍在计时
    pub fn dismiss_timer_active(&self) -> bool {
        lock_or_recover(&self.inner.pending, "确认提示")
            .as_ref()
            .is_some_and(|p| p.dismiss_timer.is_active())
    }
}
