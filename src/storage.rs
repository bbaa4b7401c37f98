//! 持久化存储抽象
//!
//! 浏览器端由 `localStorage` 实现，测试与原生环境使用 `MemoryStore`。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// 客户端键值存储
pub trait KeyValueStore {
    /// 获取存储的字符串值
    ///
    /// # 返回
    /// - `Some(String)` 如果键存在且有值
    /// - `None` 如果键不存在或发生错误
    fn get(&self, key: &str) -> Option<String>;

    /// 设置存储值，返回操作是否成功
    fn set(&self, key: &str, value: &str) -> bool;

    /// 删除存储的键值对，返回操作是否成功（键不存在也算成功）
    fn remove(&self, key: &str) -> bool;
}

/// 内存存储
///
/// 克隆出的实例共享同一份数据，可以模拟进程重启后再次读取。
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.set(key, value);
        store
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key);
        true
    }
}
