//! Obsidian 笔记保存模块
//!
//! 通过 `obsidian://new` URI 让 Obsidian 创建笔记：
//!
//! ```text
//! obsidian://new?file=<目录/标题>&content=<正文>[&vault=<库>][&append=true|&prepend=true|&overwrite=true]
//! ```
//!
//! - 目录为根目录 `/` 时 `file` 只包含标题。
//! - 目标库为空时省略 `vault`，由 Obsidian 使用当前打开的库。
//! - 参数使用 `urlencoding` 做百分号编码（空格编码为 `%20`）。
//! - URI 通过 `tauri-plugin-opener` 交给系统默认程序打开。

use std::sync::Arc;

use async_trait::async_trait;
use tauri::AppHandle;
use tauri_plugin_opener::OpenerExt;

use crate::error::AppError;
use crate::ports::{NoteRequest, SaveMode, SaveService};

/// 打开外部 URI 的能力
pub trait UriOpener: Send + Sync {
    fn open(&self, uri: &str) -> Result<(), AppError>;
}

/// 使用系统默认程序打开 URI
#[derive(Clone)]
pub struct DesktopOpener {
    app: AppHandle,
}

impl DesktopOpener {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl UriOpener for DesktopOpener {
    fn open(&self, uri: &str) -> Result<(), AppError> {
        self.app
            .opener()
            .open_url(uri, None::<&str>)
            .map_err(|e| AppError::Save(format!("打开 Obsidian 失败: {}", e)))
    }
}

/// 拼接笔记路径：根目录下只保留标题
fn note_path(folder_path: &str, title: &str) -> String {
    let folder = folder_path.trim_matches('/');
    if folder.is_empty() {
        title.to_string()
    } else {
        format!("{}/{}", folder, title)
    }
}

/// 构造 `obsidian://new` URI
pub fn build_new_note_uri(request: &NoteRequest) -> String {
    let mut uri = format!(
        "obsidian://new?file={}&content={}",
        urlencoding::encode(&note_path(&request.folder_path, &request.title)),
        urlencoding::encode(&request.content),
    );

    if !request.destination.is_empty() {
        uri.push_str("&vault=");
        uri.push_str(&urlencoding::encode(&request.destination));
    }

    match request.mode {
        SaveMode::Create => {}
        SaveMode::Append => uri.push_str("&append=true"),
        SaveMode::Prepend => uri.push_str("&prepend=true"),
        SaveMode::Overwrite => uri.push_str("&overwrite=true"),
    }

    uri
}

pub struct ObsidianSaveService {
    opener: Arc<dyn UriOpener>,
}

impl ObsidianSaveService {
    pub fn new(opener: Arc<dyn UriOpener>) -> Self {
        Self { opener }
    }
}

#[async_trait]
impl SaveService for ObsidianSaveService {
    async fn save(&self, request: NoteRequest) -> Result<(), AppError> {
        let uri = build_new_note_uri(&request);
        log::debug!(
            "打开 Obsidian 新建笔记: {}（{} 字符）",
            request.title,
            request.content.chars().count()
        );
        self.opener.open(&uri)
    }
}
