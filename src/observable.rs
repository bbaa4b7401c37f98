//! 显式状态容器
//!
//! 状态变化时主动通知订阅者，不依赖任何响应式运行时。
//! 前端在订阅回调里把新值写入 Leptos 信号。

use std::cell::RefCell;
use std::rc::Rc;

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// 可观察的单值容器
///
/// 订阅者与容器同生命周期，没有取消订阅。
pub struct Observable<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<Subscriber<T>>>,
}

impl<T: Clone> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// 当前值的快照
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// 借用当前值读取
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    /// 修改值并通知订阅者
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let snapshot = {
            let mut value = self.value.borrow_mut();
            f(&mut value);
            value.clone()
        };
        self.notify(&snapshot);
    }

    pub fn set(&self, value: T) {
        self.update(|v| *v = value);
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) {
        self.subscribers.borrow_mut().push(Rc::new(f));
    }

    // 回调期间不持有任何借用，订阅者可以重新读取甚至订阅
    fn notify(&self, value: &T) {
        let subscribers: Vec<Subscriber<T>> = self.subscribers.borrow().clone();
        for f in subscribers {
            f(value);
        }
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
