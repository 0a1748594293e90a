//! 工具栏交互相关的固定参数

use std::time::Duration;

/// 悬停多久后展开操作按钮
pub const HOVER_EXPAND_DELAY: Duration = Duration::from_millis(1_000);

/// 指针离开多久后收起操作按钮
pub const COLLAPSE_DELAY: Duration = Duration::from_millis(3_000);

/// 自动监听模式下的剪贴板轮询间隔
pub const POLL_INTERVAL: Duration = Duration::from_millis(1_000);

/// 确认提示无操作时自动消失的时间
pub const PROMPT_DISMISS_DELAY: Duration = Duration::from_millis(5_000);

/// 未恢复位置时，工具栏距视口底部的距离（px）
pub const DEFAULT_BOTTOM_OFFSET: f64 = 100.0;

/// 展开后操作区的最大宽度（px）
pub const EXPANDED_ACTIONS_MAX_WIDTH: f64 = 200.0;

/// 位置存储中保存纵向偏移的键
pub const POSITION_KEY: &str = "clipboardToolbarTop";

/// 笔记标题前缀
pub const NOTE_TITLE_PREFIX: &str = "Clipboard";

/// 笔记标题中的时间戳格式（`YYYY-MM-DD HH-mm-ss`）
pub const NOTE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H-%M-%S";

/// 笔记保存到目标库的根目录
pub const ROOT_FOLDER: &str = "/";

/// 确认提示的固定文案
pub const PROMPT_MESSAGE: &str = "Clipboard changed. Save to Obsidian?";

pub const EMPTY_CLIPBOARD_NOTICE: &str = "Clipboard is empty";
pub const SAVE_FAILED_NOTICE: &str = "Failed to save to Obsidian";
