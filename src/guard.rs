use std::sync::{Mutex, MutexGuard};

/// 获取互斥锁；锁中毒时继续使用恢复数据
///
/// 状态机的每次变更都是完整的同步片段，持锁期间 panic 不会留下半更新状态。
pub(crate) fn lock_or_recover<'a, T>(mutex: &'a Mutex<T>, name: &str) -> MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::warn!("{}锁中毒，继续使用恢复数据", name);
            poisoned.into_inner()
        }
    }
}
