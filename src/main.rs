// 防止在 Windows 发布版本中显示额外的控制台窗口，不要删除！
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! # 浮动剪贴板工具栏 — 应用入口
//!
//! 本文件仅负责应用初始化与插件/命令注册。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use clipboard_toolbar::commands::{self, ToolbarState};
use clipboard_toolbar::settings;
use clipboard_toolbar::toolbar::ToolbarEvent;
use tauri::Manager;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    tauri::Builder::default()
        // 插件初始化
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            log::info!("setup: begin");

            let handle = app.handle().clone();
            let state = commands::build_toolbar(&handle)?;
            app.manage(state);
            log::info!("setup: toolbar state managed");

            Ok(())
        })
        .on_window_event(|window, event| {
            if let tauri::WindowEvent::Destroyed = event {
                if let Some(state) = window.app_handle().try_state::<ToolbarState>() {
                    if let Err(err) = state.events.send(ToolbarEvent::Unmount) {
                        log::warn!("窗口关闭时卸载工具栏失败: {}", err);
                    }
                }
            }
        })
        // 注册所有 Tauri 命令
        .invoke_handler(tauri::generate_handler![
            // 工具栏生命周期
            commands::toolbar_mount,
            commands::toolbar_unmount,
            commands::toolbar_resize,
            // 悬停与拖拽
            commands::toolbar_pointer_enter,
            commands::toolbar_pointer_leave,
            commands::toolbar_drag_start,
            commands::toolbar_drag_move,
            commands::toolbar_drag_end,
            // 捕获
            commands::toolbar_toggle_watch,
            commands::toolbar_manual_capture,
            commands::prompt_accept,
            commands::prompt_decline,
            // 应用设置存储
            settings::get_app_settings,
            settings::set_app_settings,
        ])
        .run(tauri::generate_context!())
        .expect("运行 Tauri 应用时出错");
}
