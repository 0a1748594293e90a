//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `AppError` 枚举，所有外部协作方（剪贴板、位置存储、
//! 设置读取、笔记保存、宿主渲染）都通过它报告失败。
//!
//! 每个异步边界自行决定如何处理错误：
//! - **预期的瞬时错误**（窗口失焦时读取剪贴板失败）：静默跳过
//! - **用户可处理的错误**（手动捕获失败、保存失败）：弹出提示
//! - **尽力而为的持久化**（位置保存/恢复失败）：仅记录日志
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `std::io::Error` 与 `serde_json::Error` 提供 `From` 转换。
//! - 实现 `Serialize` 将错误序列化为字符串，满足 Tauri IPC 要求。

use serde::Serialize;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 剪贴板读取失败（失焦、权限被拒绝等）
    #[error("{0}")]
    Clipboard(String),

    /// 位置存储不可用
    #[error("存储不可用: {0}")]
    Storage(String),

    /// 设置读取失败
    #[error("设置读取失败: {0}")]
    Settings(String),

    /// 笔记保存失败
    #[error("保存笔记失败: {0}")]
    Save(String),

    /// 工具栏事件队列已关闭
    #[error("工具栏事件队列已关闭: {0}")]
    EventQueue(String),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 解析/序列化错误
    #[error("JSON 错误: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tauri IPC 要求返回值实现 `Serialize`。
/// 将错误序列化为人类可读的字符串。
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
