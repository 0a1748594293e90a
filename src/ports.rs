//! 外部协作方接口
//!
//! 工具栏本身只负责交互状态机，以下能力都由外部提供：
//!
//! | 接口 | 职责 | 桌面实现 |
//! |------|------|----------|
//! | [`PositionStore`] | 跨会话保存纵向偏移 | `storage::JsonPositionStore` |
//! | [`ClipboardAccess`] | 读取剪贴板文本 | `clipboard::SystemClipboard` |
//! | [`SaveService`] | 把文本保存为笔记 | `obsidian::ObsidianSaveService` |
//! | [`SettingsProvider`] | 读取目标库等设置 | `settings::JsonSettingsProvider` |
//! | [`IconRenderer`] | 渲染图标 | `surface::TauriSurface` |
//! | [`Notifier`] | 阻塞式用户提示 | `surface::DialogNotifier` |
//!
//! 所有异步接口都返回 `Result`，由调用方按各自策略决定忽略、记录或提示。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// 跨会话的键值位置存储
#[async_trait]
pub trait PositionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<f64>, AppError>;
    async fn set(&self, key: &str, value: f64) -> Result<(), AppError>;
}

/// 只读剪贴板访问
///
/// 宿主窗口失焦或权限被拒绝时读取会失败，这是常态，调用方不得视为致命错误。
#[async_trait]
pub trait ClipboardAccess: Send + Sync {
    async fn read_text(&self) -> Result<String, AppError>;
}

/// 笔记写入方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveMode {
    Create,
    Append,
    Prepend,
    Overwrite,
}

/// 一次笔记保存请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRequest {
    pub content: String,
    pub title: String,
    pub folder_path: String,
    /// 目标库；空字符串表示使用默认库
    pub destination: String,
    pub mode: SaveMode,
}

#[async_trait]
pub trait SaveService: Send + Sync {
    async fn save(&self, request: NoteRequest) -> Result<(), AppError>;
}

/// 通用设置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralSettings {
    /// 已配置的目标库，按用户配置顺序排列
    pub vaults: Vec<String>,
}

#[async_trait]
pub trait SettingsProvider: Send + Sync {
    async fn load(&self) -> Result<GeneralSettings, AppError>;
}

/// 需要重新渲染图标的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IconTarget {
    /// 整个工具栏（挂载时）
    Toolbar,
    /// 自动监听按钮（切换后）
    WatchButton,
}

/// 图标渲染，纯装饰性
pub trait IconRenderer: Send + Sync {
    fn render(&self, target: IconTarget);
}

/// 阻塞式用户提示
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}
