//! 捕获控制模块
//!
//! 负责把剪贴板文本保存为笔记，手动捕获与自动监听确认后的捕获共用同一保存路径。
//!
//! # 错误处理
//!
//! - 手动捕获时剪贴板为空：提示 "Clipboard is empty"，不保存。
//! - 手动捕获时读取失败：提示失败原因，不保存。
//! - 保存失败（含设置读取失败）：记录日志并提示通用失败信息。
//! - 保存成功：仅记录日志，不弹出提示。
//!
//! 任何失败都不会自动重试，由用户重新触发。

use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::config::{
    EMPTY_CLIPBOARD_NOTICE, NOTE_TIMESTAMP_FORMAT, NOTE_TITLE_PREFIX, ROOT_FOLDER,
    SAVE_FAILED_NOTICE,
};
use crate::error::AppError;
use crate::ports::{ClipboardAccess, NoteRequest, Notifier, SaveMode, SaveService, SettingsProvider};

/// 一次捕获的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    Saved,
    EmptyClipboard,
    ReadFailed,
    SaveFailed,
}

/// 根据当前时间生成笔记标题，如 `Clipboard 2026-10-18 09-05-03`
pub fn note_title(now: DateTime<Local>) -> String {
    format!("{} {}", NOTE_TITLE_PREFIX, now.format(NOTE_TIMESTAMP_FORMAT))
}

#[derive(Clone)]
pub struct CaptureController {
    clipboard: Arc<dyn ClipboardAccess>,
    saver: Arc<dyn SaveService>,
    settings: Arc<dyn SettingsProvider>,
    notifier: Arc<dyn Notifier>,
}

impl CaptureController {
    pub fn new(
        clipboard: Arc<dyn ClipboardAccess>,
        saver: Arc<dyn SaveService>,
        settings: Arc<dyn SettingsProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            clipboard,
            saver,
            settings,
            notifier,
        }
    }

    /// 读取当前剪贴板并立即保存
    pub async fn manual_capture(&self) -> CaptureOutcome {
        match self.clipboard.read_text().await {
            Ok(text) if text.is_empty() => {
                self.notifier.notify(EMPTY_CLIPBOARD_NOTICE);
                CaptureOutcome::EmptyClipboard
            }
            Ok(text) => self.perform_save(&text).await,
            Err(err) => {
                log::error!("读取剪贴板失败: {}", err);
                self.notifier
                    .notify(&format!("Failed to read clipboard: {}", err));
                CaptureOutcome::ReadFailed
            }
        }
    }

    /// 把 `content` 保存为目标库根目录下的新笔记
    pub async fn perform_save(&self, content: &str) -> CaptureOutcome {
        match self.save_note(content).await {
            Ok(title) => {
                log::info!("📝 剪贴板内容已保存为笔记: {}", title);
                CaptureOutcome::Saved
            }
            Err(err) => {
                log::error!("保存剪贴板内容失败: {}", err);
                self.notifier.notify(SAVE_FAILED_NOTICE);
                CaptureOutcome::SaveFailed
            }
        }
    }

    async fn save_note(&self, content: &str) -> Result<String, AppError> {
        let settings = self.settings.load().await?;
        let destination = settings.vaults.first().cloned().unwrap_or_default();
        let title = note_title(Local::now());

        self.saver
            .save(NoteRequest {
                content: content.to_string(),
                title: title.clone(),
                folder_path: ROOT_FOLDER.to_string(),
                destination,
                mode: SaveMode::Create,
            })
            .await?;

        Ok(title)
    }
}
