//! 应用设置模块
//!
//! 设置保存在应用数据目录下的 `settings.json`。保存流程与前端都通过
//! `JsonSettingsProvider` 读写强类型的 `GeneralSettings`；
//! 写入时保留文件中其他未识别的字段。文件读写走 `tokio::fs`。

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tauri::{AppHandle, Manager};
use tokio::fs;

use crate::error::AppError;
use crate::ports::{GeneralSettings, SettingsProvider};

const SETTINGS_FILE_NAME: &str = "settings.json";

/// 只解析路径，目录在首次保存时创建
fn settings_file_path(app: &AppHandle) -> Result<PathBuf, AppError> {
    let app_data_dir = app
        .path()
        .app_data_dir()
        .map_err(|e| AppError::Settings(format!("获取应用数据目录失败: {}", e)))?;

    Ok(app_data_dir.join(SETTINGS_FILE_NAME))
}

/// 从 `settings.json` 读取设置；文件不存在时使用默认值
#[derive(Debug, Clone)]
pub struct JsonSettingsProvider {
    path: PathBuf,
}

impl JsonSettingsProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn for_app(app: &AppHandle) -> Result<Self, AppError> {
        Ok(Self::new(settings_file_path(app)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 写入设置，文件中已有的其他字段原样保留
    pub async fn save(&self, settings: &GeneralSettings) -> Result<(), AppError> {
        let mut map = match fs::read_to_string(&self.path).await {
            Ok(content) => match serde_json::from_str::<Value>(&content) {
                Ok(Value::Object(map)) => map,
                _ => {
                    log::warn!("设置文件 '{}' 无法解析，将被覆盖", self.path.display());
                    Map::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(e.into()),
        };

        if let Value::Object(fields) = serde_json::to_value(settings)? {
            map.extend(fields);
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Settings(format!("创建应用数据目录失败: {}", e)))?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&Value::Object(map))?).await?;
        log::info!("设置已保存: {} 个目标库", settings.vaults.len());
        Ok(())
    }
}

#[async_trait]
impl SettingsProvider for JsonSettingsProvider {
    async fn load(&self) -> Result<GeneralSettings, AppError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(GeneralSettings::default()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str::<GeneralSettings>(&content)
            .map_err(|e| AppError::Settings(format!("解析设置文件失败: {}", e)))
    }
}

#[tauri::command]
pub async fn get_app_settings(app: AppHandle) -> Result<GeneralSettings, AppError> {
    JsonSettingsProvider::for_app(&app)?.load().await
}

#[tauri::command]
pub async fn set_app_settings(app: AppHandle, settings: GeneralSettings) -> Result<(), AppError> {
    JsonSettingsProvider::for_app(&app)?.save(&settings).await
}
