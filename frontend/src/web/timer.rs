//! 定时器封装模块
//!
//! 使用 `web_sys` 的原生 `setTimeout`，被 drop 时自动取消。

use wasm_bindgen::prelude::*;

/// 一次性定时器
pub struct Timeout {
    handle: Option<i32>,
    #[allow(dead_code)]
    closure: Closure<dyn FnMut()>,
}

impl Timeout {
    /// 创建新的一次性定时器
    ///
    /// 无法获取 window 时定时器不会触发。
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
            log::warn!("设置定时器失败");
        }

        Self { handle, closure }
    }

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
