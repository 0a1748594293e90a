//! 剪贴板模块
//!
//! # 设计思路
//!
//! 统一管理剪贴板相关的核心能力：
//! - **读取**：`SystemClipboard` 通过 `arboard` 读取系统剪贴板文本
//! - **自动监听**：`ClipboardWatcher` 以固定间隔轮询，检测内容变化
//! - **确认提示**：`ConfirmationPrompt` 询问用户是否保存检测到的变化
//!
//! # 实现思路
//!
//! - `arboard` 为同步 API，读取放在 `spawn_blocking` 中执行，不阻塞事件循环。
//! - 剪贴板中没有文本时返回空字符串，与"剪贴板为空"统一处理。
//! - 监听与提示共享同一个 `CaptureController`，保存路径只有一条。

pub mod prompt;
pub mod watcher;

pub use prompt::ConfirmationPrompt;
pub use watcher::ClipboardWatcher;

use async_trait::async_trait;

use crate::error::AppError;
use crate::ports::ClipboardAccess;

/// 系统剪贴板
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

fn read_text_blocking() -> Result<String, AppError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| AppError::Clipboard(e.to_string()))?;

    match clipboard.get_text() {
        Ok(text) => Ok(text),
        Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
        Err(e) => Err(AppError::Clipboard(e.to_string())),
    }
}

#[async_trait]
impl ClipboardAccess for SystemClipboard {
    async fn read_text(&self) -> Result<String, AppError> {
        tokio::task::spawn_blocking(read_text_blocking)
            .await
            .map_err(|e| AppError::Clipboard(format!("剪贴板读取任务异常: {}", e)))?
    }
}
