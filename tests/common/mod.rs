#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use clipboard_toolbar::error::AppError;
use clipboard_toolbar::ports::{
    ClipboardAccess, GeneralSettings, IconRenderer, IconTarget, NoteRequest, Notifier,
    PositionStore, SaveService, SettingsProvider,
};
use clipboard_toolbar::surface::{ActionsView, ContainerStyle, PromptView, Surface, WatchIndicator};
use clipboard_toolbar::config::EXPANDED_ACTIONS_MAX_WIDTH;
use clipboard_toolbar::toolbar::{ClipboardToolbar, Rect, ToolbarDeps, ToolbarSize, Viewport};

pub const VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    height: 800.0,
};
pub const SIZE: ToolbarSize = ToolbarSize {
    width: 32.0,
    height: 40.0,
};

/// 在暂停时钟下推进时间，并让到期的定时器任务执行完毕
pub async fn settle(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

// ---------------------------------------------------------------------------
// 剪贴板
// ---------------------------------------------------------------------------

pub struct FakeClipboard {
    next: Mutex<Result<String, String>>,
    delay: Mutex<Duration>,
    reads: AtomicUsize,
}

impl FakeClipboard {
    pub fn new(text: &str) -> Self {
        Self {
            next: Mutex::new(Ok(text.to_string())),
            delay: Mutex::new(Duration::ZERO),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn set_text(&self, text: &str) {
        *self.next.lock().unwrap() = Ok(text.to_string());
    }

    pub fn fail(&self, reason: &str) {
        *self.next.lock().unwrap() = Err(reason.to_string());
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClipboardAccess for FakeClipboard {
    async fn read_text(&self) -> Result<String, AppError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.next.lock().unwrap().clone().map_err(AppError::Clipboard)
    }
}

// ---------------------------------------------------------------------------
// 位置存储
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryPositionStore {
    value: Mutex<Option<f64>>,
    pub fail_get: AtomicBool,
    pub fail_set: AtomicBool,
    sets: Mutex<Vec<f64>>,
}

impl MemoryPositionStore {
    pub fn with_value(value: f64) -> Self {
        let store = Self::default();
        *store.value.lock().unwrap() = Some(value);
        store
    }

    pub fn sets(&self) -> Vec<f64> {
        self.sets.lock().unwrap().clone()
    }
}

#[async_trait]
impl PositionStore for MemoryPositionStore {
    async fn get(&self, key: &str) -> Result<Option<f64>, AppError> {
        assert_eq!(key, "clipboardToolbarTop");
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(AppError::Storage("quota exceeded".to_string()));
        }
        Ok(*self.value.lock().unwrap())
    }

    async fn set(&self, key: &str, value: f64) -> Result<(), AppError> {
        assert_eq!(key, "clipboardToolbarTop");
        self.sets.lock().unwrap().push(value);
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(AppError::Storage("quota exceeded".to_string()));
        }
        *self.value.lock().unwrap() = Some(value);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// 保存 / 设置 / 提示 / 图标
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingSaver {
    requests: Mutex<Vec<NoteRequest>>,
    pub fail: AtomicBool,
}

impl RecordingSaver {
    pub fn requests(&self) -> Vec<NoteRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SaveService for RecordingSaver {
    async fn save(&self, request: NoteRequest) -> Result<(), AppError> {
        self.requests.lock().unwrap().push(request);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Save("Obsidian is not installed".to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct StaticSettings {
    vaults: Mutex<Vec<String>>,
    pub fail: AtomicBool,
}

impl StaticSettings {
    pub fn set_vaults(&self, vaults: &[&str]) {
        *self.vaults.lock().unwrap() = vaults.iter().map(|v| v.to_string()).collect();
    }
}

#[async_trait]
impl SettingsProvider for StaticSettings {
    async fn load(&self) -> Result<GeneralSettings, AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Settings("unreadable".to_string()));
        }
        Ok(GeneralSettings {
            vaults: self.vaults.lock().unwrap().clone(),
        })
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
pub struct CountingIcons {
    renders: Mutex<Vec<IconTarget>>,
}

impl CountingIcons {
    pub fn renders(&self) -> Vec<IconTarget> {
        self.renders.lock().unwrap().clone()
    }
}

impl IconRenderer for CountingIcons {
    fn render(&self, target: IconTarget) {
        self.renders.lock().unwrap().push(target);
    }
}

// ---------------------------------------------------------------------------
// 渲染层
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Mount(ContainerStyle),
    Unmount,
    Style(ContainerStyle),
    Actions(bool),
    DragCursor(bool),
    Watch(bool),
    PromptShown(PromptView),
    PromptRemoved(u64),
}

#[derive(Default)]
pub struct RecordingSurface {
    events: Mutex<Vec<SurfaceEvent>>,
}

impl RecordingSurface {
    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn last_style(&self) -> Option<ContainerStyle> {
        self.events().into_iter().rev().find_map(|e| match e {
            SurfaceEvent::Style(style) | SurfaceEvent::Mount(style) => Some(style),
            _ => None,
        })
    }

    /// 当前仍显示在界面上的提示
    pub fn visible_prompts(&self) -> Vec<PromptView> {
        let mut visible: Vec<PromptView> = Vec::new();
        for event in self.events() {
            match event {
                SurfaceEvent::PromptShown(view) => visible.push(view),
                SurfaceEvent::PromptRemoved(id) => visible.retain(|v| v.id != id),
                _ => {}
            }
        }
        visible
    }

    fn push(&self, event: SurfaceEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Surface for RecordingSurface {
    fn mount_container(&self, style: &ContainerStyle) {
        self.push(SurfaceEvent::Mount(*style));
    }

    fn unmount_container(&self) {
        self.push(SurfaceEvent::Unmount);
    }

    fn apply_container_style(&self, style: &ContainerStyle) {
        self.push(SurfaceEvent::Style(*style));
    }

    fn set_actions(&self, actions: &ActionsView) {
        self.push(SurfaceEvent::Actions(actions.revealed));
    }

    fn set_drag_cursor(&self, grabbing: bool) {
        self.push(SurfaceEvent::DragCursor(grabbing));
    }

    fn set_watch_indicator(&self, indicator: &WatchIndicator) {
        self.push(SurfaceEvent::Watch(indicator.active));
    }

    fn show_prompt(&self, prompt: &PromptView) {
        self.push(SurfaceEvent::PromptShown(prompt.clone()));
    }

    fn remove_prompt(&self, prompt_id: u64) {
        self.push(SurfaceEvent::PromptRemoved(prompt_id));
    }
}

// ---------------------------------------------------------------------------
// 组装
// ---------------------------------------------------------------------------

pub struct Harness {
    pub toolbar: ClipboardToolbar,
    pub surface: Arc<RecordingSurface>,
    pub icons: Arc<CountingIcons>,
    pub store: Arc<MemoryPositionStore>,
    pub clipboard: Arc<FakeClipboard>,
    pub saver: Arc<RecordingSaver>,
    pub settings: Arc<StaticSettings>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn harness() -> Harness {
    harness_with_store(MemoryPositionStore::default())
}

pub fn harness_with_store(store: MemoryPositionStore) -> Harness {
    let surface = Arc::new(RecordingSurface::default());
    let icons = Arc::new(CountingIcons::default());
    let store = Arc::new(store);
    let clipboard = Arc::new(FakeClipboard::new(""));
    let saver = Arc::new(RecordingSaver::default());
    let settings = Arc::new(StaticSettings::default());
    let notifier = Arc::new(RecordingNotifier::default());

    let deps = ToolbarDeps {
        surface: surface.clone(),
        icons: icons.clone(),
        position_store: store.clone(),
        clipboard: clipboard.clone(),
        saver: saver.clone(),
        settings: settings.clone(),
        notifier: notifier.clone(),
    };

    Harness {
        toolbar: ClipboardToolbar::new(deps, VIEWPORT, SIZE),
        surface,
        icons,
        store,
        clipboard,
        saver,
        settings,
        notifier,
    }
}

/// 收起时容器的渲染矩形，等同于前端 `getBoundingClientRect()`
pub fn collapsed_rect(h: &Harness) -> Rect {
    h.toolbar.shell().rect()
}

/// 展开时容器的渲染矩形：操作区把容器向左撑开
pub fn expanded_rect(h: &Harness) -> Rect {
    let rect = collapsed_rect(h);
    Rect {
        left: rect.left - EXPANDED_ACTIONS_MAX_WIDTH,
        width: rect.width + EXPANDED_ACTIONS_MAX_WIDTH,
        ..rect
    }
}
