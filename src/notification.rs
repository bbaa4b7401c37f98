//! 通知存储
//!
//! 同一时间只显示一条反馈消息，新消息直接覆盖旧消息，没有队列。

use crate::observable::Observable;

/// 默认显示时长（毫秒）
pub const DEFAULT_TIMEOUT_MS: u32 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationColor {
    #[default]
    Success,
    Error,
}

impl NotificationColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationColor::Success => "success",
            NotificationColor::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub color: NotificationColor,
    pub visible: bool,
    /// 显示时长提示，由展示层决定是否据此自动隐藏
    ///
    /// 只有通知横幅视图读取它，存储本身没有定时器，不会自动隐藏。
    pub timeout_ms: u32,
}

impl Default for Notification {
    fn default() -> Self {
        Self {
            message: String::new(),
            color: NotificationColor::Success,
            visible: false,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

#[derive(Default)]
pub struct NotificationStore {
    state: Observable<Notification>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Notification {
        self.state.get()
    }

    pub fn show_success(&self, message: impl Into<String>) {
        self.show(message.into(), NotificationColor::Success);
    }

    pub fn show_error(&self, message: impl Into<String>) {
        self.show(message.into(), NotificationColor::Error);
    }

    /// 隐藏但保留消息内容
    pub fn hide(&self) {
        self.state.update(|n| n.visible = false);
    }

    pub fn subscribe(&self, f: impl Fn(&Notification) + 'static) {
        self.state.subscribe(f);
    }

    fn show(&self, message: String, color: NotificationColor) {
        self.state.update(|n| {
            n.message = message;
            n.color = color;
            n.visible = true;
        });
    }
}
