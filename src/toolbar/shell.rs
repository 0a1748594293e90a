//! 工具栏外壳：位置、拖拽、贴靠与悬停展开
//!
//! # 设计思路
//!
//! - 所有可变状态集中在 `ShellState`，由一把锁保护，事件处理函数是唯一写入方。
//! - 悬停/收起定时器归当前 `InteractionState` 所有，统一由 `transition` 管理：
//!   每次转移先取消旧定时器，再按新状态创建定时器。
//! - 定时器回调携带自身 id，只有仍持有槽位的定时器才能推动状态，
//!   避免已被取代的定时器作用于新状态。
//! - 拖拽期间只有指针移动事件写入位置，悬停定时器全部被取消。
//!
//! # 持久化
//!
//! 仅在拖拽结束时保存纵向偏移，保存是"发出即忘"的：不等待结果，失败只记日志。
//! 横向位置不保存，每次拖拽结束都回到右侧贴靠。

use std::sync::{Arc, Mutex, Weak};

use crate::config::{DEFAULT_BOTTOM_OFFSET, POSITION_KEY};
use crate::guard::lock_or_recover;
use crate::ports::{IconRenderer, IconTarget, PositionStore};
use crate::surface::{ActionsView, Anchor, ContainerStyle, Corners, Surface, Transition};
use crate::timer::{self, TimerHandle};
use crate::toolbar::drag::{DragSession, PointerButton};
use crate::toolbar::geometry::{
    Placement, Point, Rect, ToolbarSize, Viewport, clamp_top, resolve_rect,
};
use crate::toolbar::hover::{HoverEvent, InteractionState, next_state};

/// 根据摆放方式生成容器样式
///
/// 拖拽中关闭过渡动画并使用四角圆角；贴靠时开启动画，仅保留左侧圆角。
pub fn container_style(placement: Placement) -> ContainerStyle {
    match placement {
        Placement::Snapped { top } => ContainerStyle {
            anchor: match top {
                Some(top) => Anchor::RightTop { top },
                None => Anchor::RightBottom {
                    bottom: DEFAULT_BOTTOM_OFFSET,
                },
            },
            transition: Transition::Snap,
            corners: Corners::Leading,
        },
        Placement::Free { left, top } => ContainerStyle {
            anchor: Anchor::LeftTop { left, top },
            transition: Transition::None,
            corners: Corners::All,
        },
    }
}

#[derive(Debug, Default)]
struct ShellState {
    mounted: bool,
    viewport: Viewport,
    size: ToolbarSize,
    placement: Placement,
    interaction: InteractionState,
    /// 当前状态持有的悬停/收起定时器
    timer: Option<TimerHandle>,
    revealed: bool,
    drag: Option<DragSession>,
}

struct ShellInner {
    surface: Arc<dyn Surface>,
    icons: Arc<dyn IconRenderer>,
    store: Arc<dyn PositionStore>,
    state: Mutex<ShellState>,
}

impl ShellInner {
    fn lock(&self) -> std::sync::MutexGuard<'_, ShellState> {
        lock_or_recover(&self.state, "工具栏状态")
    }

    /// 唯一的状态转移入口
    fn transition(self: &Arc<Self>, state: &mut ShellState, event: HoverEvent) -> bool {
        let Some(next) = next_state(state.interaction, event) else {
            return false;
        };
        let previous = state.interaction;

        if let Some(timer) = state.timer.take() {
            timer.cancel();
        }
        state.interaction = next;

        if let Some(delay) = next.timer_delay() {
            let weak: Weak<ShellInner> = Arc::downgrade(self);
            state.timer = Some(timer::schedule_once(delay, move |id| {
                if let Some(inner) = weak.upgrade() {
                    inner.on_timer(id);
                }
            }));
        }

        match (previous, next) {
            (InteractionState::HoverPending, InteractionState::Expanded) => {
                self.set_revealed(state, true);
            }
            (InteractionState::CollapsePending, InteractionState::Idle) => {
                self.set_revealed(state, false);
            }
            _ => {}
        }

        log::trace!("工具栏状态 {:?} -> {:?}（{:?}）", previous, next, event);
        true
    }

    fn on_timer(self: &Arc<Self>, id: u64) {
        let mut state = self.lock();
        if state.timer.as_ref().map(TimerHandle::id) != Some(id) {
            log::trace!("忽略已失效的悬停定时器 #{}", id);
            return;
        }
        self.transition(&mut state, HoverEvent::TimerFired);
    }

    fn set_revealed(&self, state: &mut ShellState, revealed: bool) {
        state.revealed = revealed;
        self.surface.set_actions(&ActionsView::new(revealed));
    }

    fn persist_top(&self, top: f64) {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            match store.set(POSITION_KEY, top).await {
                Ok(()) => log::debug!("工具栏位置已保存: top={}", top),
                Err(err) => log::error!("保存工具栏位置失败: {}", err),
            }
        });
    }
}

/// 工具栏外壳
#[derive(Clone)]
pub struct ToolbarShell {
    inner: Arc<ShellInner>,
}

impl ToolbarShell {
    pub fn new(
        surface: Arc<dyn Surface>,
        icons: Arc<dyn IconRenderer>,
        store: Arc<dyn PositionStore>,
        viewport: Viewport,
        size: ToolbarSize,
    ) -> Self {
        Self {
            inner: Arc::new(ShellInner {
                surface,
                icons,
                store,
                state: Mutex::new(ShellState {
                    viewport,
                    size,
                    ..ShellState::default()
                }),
            }),
        }
    }

    /// 插入容器并渲染图标
    ///
    /// 重复挂载不做防护，仅记录日志。
    pub fn mount(&self) {
        let style = {
            let mut state = self.inner.lock();
            if state.mounted {
                log::debug!("工具栏重复挂载");
            }
            state.mounted = true;
            container_style(state.placement)
        };
        self.inner.surface.mount_container(&style);
        self.inner.surface.set_actions(&ActionsView::new(false));
        self.inner.icons.render(IconTarget::Toolbar);
    }

    /// 取消悬停定时器、结束拖拽并移除容器
    pub fn unmount(&self) {
        {
            let mut state = self.inner.lock();
            if let Some(timer) = state.timer.take() {
                timer.cancel();
            }
            state.interaction = InteractionState::Idle;
            state.drag = None;
            state.revealed = false;
            state.mounted = false;
        }
        self.inner.surface.unmount_container();
    }

    /// 从位置存储恢复纵向偏移
    ///
    /// 保存的值按当前视口收敛后应用；存储失败只记录日志，返回 `None`。
    pub async fn restore_position(&self) -> Option<f64> {
        let saved = match self.inner.store.get(POSITION_KEY).await {
            Ok(Some(saved)) => saved,
            Ok(None) => return None,
            Err(err) => {
                log::error!("恢复工具栏位置失败: {}", err);
                return None;
            }
        };

        let (top, style) = {
            let mut state = self.inner.lock();
            if state.interaction == InteractionState::Dragging {
                log::debug!("拖拽进行中，跳过位置恢复");
                return None;
            }
            let top = clamp_top(saved, state.viewport, state.size);
            state.placement = Placement::Snapped { top: Some(top) };
            (top, container_style(state.placement))
        };

        self.inner.surface.apply_container_style(&style);
        log::debug!("工具栏位置已恢复: top={}", top);
        Some(top)
    }

    /// 更新视口尺寸；不会重新收敛当前位置
    pub fn set_viewport(&self, viewport: Viewport) {
        self.inner.lock().viewport = viewport;
    }

    pub fn set_toolbar_size(&self, size: ToolbarSize) {
        self.inner.lock().size = size;
    }

    pub fn pointer_enter(&self) -> bool {
        let mut state = self.inner.lock();
        self.inner.transition(&mut state, HoverEvent::PointerEnter)
    }

    pub fn pointer_leave(&self) -> bool {
        let mut state = self.inner.lock();
        self.inner.transition(&mut state, HoverEvent::PointerLeave)
    }

    /// 在拖拽手柄上按下指针；仅主键开始拖拽
    ///
    /// `rendered` 是按下时容器的实际渲染矩形；展开时操作区让容器向左变宽，
    /// 按下偏移与拖拽起点都取自它。
    pub fn drag_start(&self, button: PointerButton, pointer: Point, rendered: Rect) -> bool {
        if button != PointerButton::Primary {
            return false;
        }

        let style = {
            let mut state = self.inner.lock();
            if state.interaction == InteractionState::Dragging {
                return false;
            }
            state.drag = Some(DragSession::begin(pointer, rendered));
            state.placement = Placement::Free {
                left: rendered.left,
                top: rendered.top,
            };
            self.inner.transition(&mut state, HoverEvent::DragStarted);
            container_style(state.placement)
        };

        self.inner.surface.apply_container_style(&style);
        self.inner.surface.set_drag_cursor(true);
        true
    }

    /// 拖拽中指针移动；非拖拽状态下忽略
    pub fn drag_move(&self, pointer: Point) -> bool {
        let style = {
            let mut state = self.inner.lock();
            let Some(drag) = state.drag else {
                return false;
            };
            let origin = drag.follow(pointer);
            state.placement = Placement::Free {
                left: origin.x,
                top: origin.y,
            };
            container_style(state.placement)
        };

        self.inner.surface.apply_container_style(&style);
        true
    }

    /// 释放指针：收敛纵向位置、保存并贴靠回右侧，返回最终的纵向偏移
    pub fn drag_end(&self) -> Option<f64> {
        let (top, style) = {
            let mut state = self.inner.lock();
            state.drag.take()?;

            let rect = resolve_rect(state.placement, state.viewport, state.size);
            let top = clamp_top(rect.top, state.viewport, state.size);
            let revealed = state.revealed;
            self.inner
                .transition(&mut state, HoverEvent::DragEnded { revealed });
            state.placement = Placement::Snapped { top: Some(top) };
            (top, container_style(state.placement))
        };

        self.inner.surface.set_drag_cursor(false);
        self.inner.persist_top(top);
        self.inner.surface.apply_container_style(&style);
        Some(top)
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.inner.lock().interaction
    }

    pub fn placement(&self) -> Placement {
        self.inner.lock().placement
    }

    pub fn rect(&self) -> Rect {
        let state = self.inner.lock();
        resolve_rect(state.placement, state.viewport, state.size)
    }

    pub fn actions_revealed(&self) -> bool {
        self.inner.lock().revealed
    }

    /// 悬停/收起定时器是否仍在计时
    pub fn hover_timer_active(&self) -> bool {
        self.inner
            .lock()
            .timer
            .as_ref()
            .is_some_and(TimerHandle::is_active)
    }
}
