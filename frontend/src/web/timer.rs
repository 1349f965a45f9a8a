//! 定时器封装模块
//!
//! One-shot `setTimeout` wrapper.

use wasm_bindgen::prelude::*;

/// Pending `setTimeout` callback. Dropping it cancels the callback if it has
/// not fired yet.
pub struct Timeout {
    handle: Option<i32>,
    #[allow(dead_code)]
    closure: Closure<dyn FnMut()>,
}

impl Timeout {
    /// 安排一次性回调
    ///
    /// # 参数
    /// - `millis`: 延迟（毫秒）
    /// - `callback`: 到期时调用一次
    ///
    /// 没有 window（或 `setTimeout` 失败）时只记录警告，回调永不执行。
    pub fn new<F>(millis: u32, callback: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        let mut callback = Some(callback);
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(cb) = callback.take() {
                cb();
            }
        });

        let handle = web_sys::window().and_then(|window| {
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    closure.as_ref().unchecked_ref(),
                    millis as i32,
                )
                .ok()
        });
        if handle.is_none() {
            tracing::warn!("setTimeout unavailable; timer will never fire");
        }

        Self { handle, closure }
    }

    /// 取消尚未触发的回调
    ///
    /// 已触发或从未安排成功时为空操作。drop 会自动调用。
    pub fn cancel(&self) {
        if let (Some(window), Some(handle)) = (web_sys::window(), self.handle) {
            window.clear_timeout_with_handle(handle);
        }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.cancel();
    }
}
