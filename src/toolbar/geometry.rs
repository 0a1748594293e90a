//! 工具栏几何计算模块
//!
//! 实现工具栏位置相关的纯函数：
//!
//! 1. **纵向收敛** (`clamp_top`)：把纵向偏移限制在 `[0, 视口高 - 工具栏高]`。
//! 2. **位置解析** (`resolve_rect`)：把逻辑摆放方式换算为视口坐标下的矩形。
//!
//! # 设计思路
//!
//! - 输入为摆放方式、视口尺寸、工具栏尺寸，输出唯一矩形，便于测试。
//! - 横向位置不持久化：只要不在拖拽中，工具栏总是贴靠视口右边缘。
//! - 工具栏比视口还高时收敛到 0，不会因 `clamp` 的上下界颠倒而 panic。

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_BOTTOM_OFFSET;

/// 视口尺寸（CSS px）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// 工具栏渲染尺寸（CSS px）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ToolbarSize {
    pub width: f64,
    pub height: f64,
}

impl ToolbarSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// 视口坐标下的点
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 视口坐标下的矩形（前端 `getBoundingClientRect()` 的子集）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// 工具栏的逻辑摆放方式
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// 贴靠右边缘；`top` 为空表示默认的底部位置
    Snapped { top: Option<f64> },
    /// 拖拽中，左上角跟随指针
    Free { left: f64, top: f64 },
}

impl Default for Placement {
    fn default() -> Self {
        Placement::Snapped { top: None }
    }
}

/// 纵向偏移允许的最大值，工具栏高于视口时为 0
pub fn max_top(viewport: Viewport, size: ToolbarSize) -> f64 {
    (viewport.height - size.height).max(0.0)
}

/// 把纵向偏移收敛到 `[0, 视口高 - 工具栏高]`
///
/// # 后置条件
/// - `result >= 0`
/// - 若工具栏可容纳：`result + size.height <= viewport.height`
pub fn clamp_top(top: f64, viewport: Viewport, size: ToolbarSize) -> f64 {
    top.min(viewport.height - size.height).max(0.0)
}

/// 把摆放方式解析为实际矩形
pub fn resolve_rect(placement: Placement, viewport: Viewport, size: ToolbarSize) -> Rect {
    let (left, top) = match placement {
        Placement::Snapped { top } => {
            let top = top.unwrap_or(viewport.height - DEFAULT_BOTTOM_OFFSET - size.height);
            (viewport.width - size.width, top)
        }
        Placement::Free { left, top } => (left, top),
    };

    Rect {
        left,
        top,
        width: size.width,
        height: size.height,
    }
}
