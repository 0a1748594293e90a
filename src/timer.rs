//! 定时器句柄模块
//!
//! 工具栏的悬停、收起、轮询、提示自动消失都依赖定时器。
//! 这里把每个定时器包装为一个拥有所有权的 `TimerHandle`：
//!
//! - 句柄持有底层 tokio 任务，`cancel()` 或 `Drop` 时中止任务，不会遗留定时器。
//! - 每个句柄带有单调递增的 `id`，回调触发时由持有方核对 id，
//!   确认自己仍是当前槽位的主人后才执行状态变更。
//!
//! 所有定时器都运行在调用方所在的 tokio 运行时上，
//! 因此必须在运行时上下文中创建。

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

static NEXT_TIMER_ID: AtomicU64 = AtomicU64::new(1);

fn next_timer_id() -> u64 {
    NEXT_TIMER_ID.fetch_add(1, Ordering::Relaxed)
}

/// 拥有所有权的定时器句柄
///
/// 丢弃句柄即取消定时器。
#[derive(Debug)]
pub struct TimerHandle {
    id: u64,
    task: JoinHandle<()>,
}

impl TimerHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// 定时器是否仍在等待触发（或轮询中）
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }

    /// 显式取消定时器
    pub fn cancel(self) {
        log::trace!("⏹️ 取消定时器 #{}", self.id);
        // Drop 负责中止任务
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// 延迟 `delay` 后执行一次 `callback`
///
/// 回调接收本定时器的 id，便于持有方核对槽位。
pub fn schedule_once<F>(delay: Duration, callback: F) -> TimerHandle
where
    F: FnOnce(u64) + Send + 'static,
{
    let id = next_timer_id();
    let task = tokio::spawn(async move {
        time::sleep(delay).await;
        callback(id);
    });
    TimerHandle { id, task }
}

/// 每隔 `period` 执行一次 `tick`，首次触发在一个周期之后
///
/// 上一次 `tick` 完成前不会开始下一次；错过的周期顺延而不是补发。
pub fn schedule_interval<F, Fut>(period: Duration, mut tick: F) -> TimerHandle
where
    F: FnMut(u64) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let id = next_timer_id();
    let task = tokio::spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            tick(id).await;
        }
    });
    TimerHandle { id, task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    #[tokio::test(start_paused = true)]
    async fn once_fires_after_delay() {
        let hits = counter();
        let h = Arc::clone(&hits);
        let timer = schedule_once(Duration::from_millis(1_000), move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });

        time::sleep(Duration::from_millis(999)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert!(timer.is_active());

        time::sleep(Duration::from_millis(2)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_fires() {
        let hits = counter();
        let h = Arc::clone(&hits);
        let timer = schedule_once(Duration::from_millis(500), move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });
        timer.cancel();

        time::sleep(Duration::from_millis(2_000)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_cancels() {
        let hits = counter();
        let h = Arc::clone(&hits);
        {
            let _timer = schedule_once(Duration::from_millis(500), move |_| {
                h.fetch_add(1, Ordering::SeqCst);
            });
        }

        time::sleep(Duration::from_millis(2_000)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn callback_receives_own_id() {
        let seen = Arc::new(AtomicU64::new(0));
        let s = Arc::clone(&seen);
        let timer = schedule_once(Duration::from_millis(10), move |id| {
            s.store(id, Ordering::SeqCst);
        });
        let expected = timer.id();

        time::sleep(Duration::from_millis(20)).await;
        assert_eq!(seen.load(Ordering::SeqCst), expected);
    }

    #[tokio::test(start_paused = true)]
    async fn interval_first_tick_waits_one_period() {
        let hits = counter();
        let h = Arc::clone(&hits);
        let timer = schedule_interval(Duration::from_millis(1_000), move |_| {
            let h = Arc::clone(&h);
            async move {
                h.fetch_add(1, Ordering::SeqCst);
            }
        });

        time::sleep(Duration::from_millis(500)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_millis(2_600)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 3);

        timer.cancel();
        time::sleep(Duration::from_millis(5_000)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }
}
