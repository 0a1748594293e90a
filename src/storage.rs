//! 工具栏状态存储模块
//!
//! # 设计思路
//!
//! 提供 `PositionStore` 的本地实现：把键值对保存在应用数据目录下的
//! `toolbar-state.json` 中，跨会话保留工具栏的纵向偏移。
//!
//! # 实现思路
//!
//! - 文件不存在视为"没有保存过"，返回 `None`。
//! - 文件内容不是 JSON 对象时返回 `AppError::Storage`，由调用方记录日志。
//! - 值不是数字时视为未保存并打印警告，不阻断恢复流程。
//! - 读改写整个过程持异步锁，连续拖拽时的并发写入不会互相覆盖。
//! - 文件读写走 `tokio::fs`，不阻塞运行时工作线程。
//! - 所有可能失败的操作均返回 `Result`，不使用 `expect()` / `unwrap()`。

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tauri::{AppHandle, Manager};
use tokio::fs;
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::ports::PositionStore;

const STATE_FILE_NAME: &str = "toolbar-state.json";

/// 获取工具栏状态文件路径，必要时创建应用数据目录
///
/// 只在启动组装时调用一次，此时还没有进入异步上下文。
pub fn state_file_path(app: &AppHandle) -> Result<PathBuf, AppError> {
    let app_data_dir = app
        .path()
        .app_data_dir()
        .map_err(|e| AppError::Storage(format!("获取应用数据目录失败: {}", e)))?;

    std::fs::create_dir_all(&app_data_dir)
        .map_err(|e| AppError::Storage(format!("创建应用数据目录失败: {}", e)))?;

    Ok(app_data_dir.join(STATE_FILE_NAME))
}

/// 基于 JSON 文件的位置存储
#[derive(Debug)]
pub struct JsonPositionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonPositionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<Map<String, Value>, AppError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(AppError::Storage(format!(
                "状态文件 '{}' 不是 JSON 对象",
                self.path.display()
            ))),
            Err(e) => Err(AppError::Storage(format!(
                "解析状态文件 '{}' 失败: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

#[async_trait]
impl PositionStore for JsonPositionStore {
    async fn get(&self, key: &str) -> Result<Option<f64>, AppError> {
        let map = self.read_map().await?;
        match map.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => match value.as_f64() {
                Some(number) => Ok(Some(number)),
                None => {
                    log::warn!("状态项 {} 不是数字，忽略: {}", key, value);
                    Ok(None)
                }
            },
        }
    }

    async fn set(&self, key: &str, value: f64) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), Value::from(value));

        let content = serde_json::to_string_pretty(&Value::Object(map))?;
        fs::write(&self.path, content).await?;
        Ok(())
    }
}
