//! # 浮动剪贴板工具栏 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │               前端 (webview, ui/index.html)               │
//! │   仅渲染 toolbar://* 事件，并转发指针/点击事件            │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↕ Tauri IPC (commands / events)
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕            后端 (Rust)                           │
//! │                                                          │
//! │  ┌─ commands ─── Tauri 命令 → 事件队列 / ClipboardToolbar │
//! │  │                                                       │
//! │  ├─ toolbar ──── ClipboardToolbar (顶层对象)             │
//! │  │   ├─ events    有序事件队列 + 单任务事件循环           │
//! │  │   ├─ shell     位置·拖拽·贴靠·悬停状态机               │
//! │  │   ├─ hover     InteractionState 转移表                 │
//! │  │   ├─ drag      拖拽会话                                │
//! │  │   └─ geometry  纵向收敛·位置解析                       │
//! │  │                                                       │
//! │  ├─ clipboard ── 系统剪贴板 + 自动监听 + 确认提示         │
//! │  ├─ capture ──── 手动捕获 / 保存为笔记                    │
//! │  ├─ timer ────── 拥有所有权的定时器句柄                   │
//! │  │                                                       │
//! │  ├─ ports ────── 外部协作方接口                          │
//! │  ├─ surface ──── 渲染指令 + Tauri 事件实现                │
//! │  ├─ storage      位置持久化 (JSON 文件)                   │
//! │  ├─ settings     目标库设置 (JSON 文件)                   │
//! │  └─ obsidian     obsidian://new URI 保存                  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError` |
//! | [`config`] | 延时、键名、提示文案等固定参数 |
//! | [`toolbar`] | 工具栏顶层对象与交互状态机 |
//! | [`clipboard`] | 剪贴板读取、自动监听、确认提示 |
//! | [`capture`] | 手动捕获、笔记命名与保存 |
//! | [`timer`] | 定时器创建与取消 |
//! | [`ports`] | 位置存储、剪贴板、保存、设置、图标、提示接口 |
//! | [`surface`] | 宿主渲染接口与 Tauri 实现 |
//! | [`storage`] | 工具栏位置的本地存储 |
//! | [`settings`] | 应用设置读写 |
//! | [`obsidian`] | Obsidian URI 保存实现 |
//! | [`commands`] | Tauri 命令 |
//!
//! ## 并发模型
//!
//! 所有状态变更都是短小的同步片段，只在读取剪贴板、读取设置、保存笔记
//! 这三类异步边界上挂起。指针、拖拽与生命周期事件经同一个队列送达，
//! 由单个任务按到达顺序处理。每个定时器都有显式的取消路径，
//! 替换前先取消（cancel-before-replace）。

pub mod capture;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod error;
mod guard;
pub mod obsidian;
pub mod ports;
pub mod settings;
pub mod storage;
pub mod surface;
pub mod timer;
pub mod toolbar;
