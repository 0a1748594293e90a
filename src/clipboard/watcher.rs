use std::sync::{Arc, Mutex, Weak};

use crate::clipboard::prompt::ConfirmationPrompt;
use crate::config::POLL_INTERVAL;
use crate::guard::lock_or_recover;
use crate::ports::{ClipboardAccess, IconRenderer, IconTarget};
use crate::surface::{Surface, WatchIndicator};
use crate::timer::{self, TimerHandle};

/// 自动监听状态
///
/// `active == false` 时 `poll` 必为 `None`。
/// 每次切换都会递增 `generation`，切换前发起的读取结果一律丢弃。
#[derive(Debug, Default)]
struct WatchState {
    active: bool,
    last_seen_text: String,
    poll: Option<TimerHandle>,
    generation: u64,
}

struct WatcherInner {
    clipboard: Arc<dyn ClipboardAccess>,
    prompt: ConfirmationPrompt,
    surface: Arc<dyn Surface>,
    icons: Arc<dyn IconRenderer>,
    state: Mutex<WatchState>,
}

impl WatcherInner {
    async fn poll_once(&self, generation: u64) {
        let text = match self.clipboard.read_text().await {
            Ok(text) => text,
            Err(err) => {
                // 窗口失焦时读取失败是常态
                log::trace!("轮询读取剪贴板失败，跳过本次: {}", err);
                return;
            }
        };

        let mut state = lock_or_recover(&self.state, "自动监听状态");
        if !state.active || state.generation != generation {
            log::trace!("自动监听已切换，丢弃过期的读取结果");
            return;
        }
        if text.is_empty() || text == state.last_seen_text {
            return;
        }

        log::debug!("📋 检测到剪贴板变化（{} 字符）", text.chars().count());
        state.last_seen_text = text.clone();
        self.prompt.show(text);
    }
}

/// 剪贴板自动监听器
///
/// 开启后每秒读取一次剪贴板，内容非空且与上次不同时弹出确认提示。
#[derive(Clone)]
pub struct ClipboardWatcher {
    inner: Arc<WatcherInner>,
}

impl ClipboardWatcher {
    pub fn new(
        clipboard: Arc<dyn ClipboardAccess>,
        prompt: ConfirmationPrompt,
        surface: Arc<dyn Surface>,
        icons: Arc<dyn IconRenderer>,
    ) -> Self {
        Self {
            inner: Arc::new(WatcherInner {
                clipboard,
                prompt,
                surface,
                icons,
                state: Mutex::new(WatchState::default()),
            }),
        }
    }

    /// 切换自动监听，返回切换后的状态
    ///
    /// 开启时先读取一次剪贴板作为基线，避免首次轮询把已有内容误判为变化；
    /// 读取失败时基线保持为空。
    pub async fn toggle(&self) -> bool {
        let inner = &self.inner;
        let (active, generation) = {
            let mut state = lock_or_recover(&inner.state, "自动监听状态");
            state.active = !state.active;
            state.generation += 1;
            if let Some(poll) = state.poll.take() {
                poll.cancel();
            }
            if state.active {
                state.last_seen_text.clear();
            }
            (state.active, state.generation)
        };

        inner.surface.set_watch_indicator(&WatchIndicator::new(active));
        inner.icons.render(IconTarget::WatchButton);

        if !active {
            log::info!("👁️ 自动监听已关闭");
            return false;
        }

        let seed = match inner.clipboard.read_text().await {
            Ok(text) => Some(text),
            Err(err) => {
                log::error!("初始读取剪贴板失败: {}", err);
                None
            }
        };

        let mut state = lock_or_recover(&inner.state, "自动监听状态");
        if !state.active || state.generation != generation {
            log::debug!("开启自动监听期间状态已再次切换，放弃本次启动");
            return state.active;
        }
        if let Some(seed) = seed {
            state.last_seen_text = seed;
        }

        let weak: Weak<WatcherInner> = Arc::downgrade(inner);
        state.poll = Some(timer::schedule_interval(POLL_INTERVAL, move |_| {
            let weak = weak.clone();
            async move {
                if let Some(inner) = weak.upgrade() {
                    inner.poll_once(generation).await;
                }
            }
        }));

        log::info!("👁️ 自动监听已开启");
        true
    }

    /// 关闭自动监听（卸载时调用），已关闭时不做任何事
    pub fn stop(&self) {
        let inner = &self.inner;
        let was_active = {
            let mut state = lock_or_recover(&inner.state, "自动监听状态");
            let was_active = state.active;
            state.active = false;
            state.generation += 1;
            if let Some(poll) = state.poll.take() {
                poll.cancel();
            }
            was_active
        };

        if was_active {
            inner.surface.set_watch_indicator(&WatchIndicator::new(false));
            log::info!("👁️ 自动监听已停止");
        }
    }

    pub fn is_active(&self) -> bool {
        lock_or_recover(&self.inner.state, "自动监听状态").active
    }

    pub fn last_seen_text(&self) -> String {
        lock_or_recover(&self.inner.state, "自动监听状态")
            .last_seen_text
            .clone()
    }

    /// 轮询定时器是否存在且仍在运行
    pub fn is_polling(&self) -> bool {
        lock_or_recover(&self.inner.state, "自动监听状态")
            .poll
            .as_ref()
            .is_some_and(TimerHandle::is_active)
    }
}
