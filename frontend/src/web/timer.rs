//! 定时器封装模块
//!
//! 使用 `web_sys` 的原生定时器 API 替代 `gloo-timers`。

use std::time::Duration;

use wasm_bindgen::prelude::*;

use super::router::{Scheduler, TaskHandle};

/// 一次性定时器
///
/// 封装 `setTimeout` API。当 `Timeout` 被 drop 时，自动清除定时器。
pub struct Timeout {
    handle: Option<i32>,
    #[allow(dead_code)]
    closure: Closure<dyn FnMut()>,
}

impl Timeout {
    /// 创建一次性定时器
    ///
    /// 无法获取 window 或设置失败时记录错误，回调不会执行
    pub fn new<F>(millis: u32, callback: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        let closure = Closure::once(callback);

        let handle = web_sys::window().and_then(|window| {
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    closure.as_ref().unchecked_ref(),
                    millis as i32,
                )
                .map_err(|e| log::error!("setTimeout failed: {:?}", e))
                .ok()
        });

        Self { handle, closure }
    }

    /// 取消定时器
    pub fn cancel(&mut self) {
        if let (Some(handle), Some(window)) = (self.handle.take(), web_sys::window()) {
            window.clear_timeout_with_handle(handle);
        }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// 基于 `setTimeout` 的调度器
#[derive(Clone, Copy, Default)]
pub struct TimerScheduler;

impl Scheduler for TimerScheduler {
    fn defer(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskHandle {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        TaskHandle::new(Timeout::new(millis, task))
    }
}
