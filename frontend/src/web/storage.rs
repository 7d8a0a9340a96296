//! 浏览器存储封装模块
//!
//! 使用 `web_sys::Storage` 替代 `gloo-storage`。
//! `Durable` 映射到 localStorage，`Session` 映射到 sessionStorage。

use crate::store::{KeyValueStore, StorageScope};

/// 浏览器存储
pub struct BrowserStorage;

impl BrowserStorage {
    /// 获取对应作用域的 Storage 实例
    fn storage(scope: StorageScope) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        let storage = match scope {
            StorageScope::Durable => window.local_storage(),
            StorageScope::Session => window.session_storage(),
        };
        match storage {
            Ok(s) => s,
            Err(e) => {
                log::warn!("storage unavailable ({:?}): {:?}", scope, e);
                None
            }
        }
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, scope: StorageScope, key: &str) -> Option<String> {
        Self::storage(scope)?.get_item(key).ok()?
    }

    fn set(&self, scope: StorageScope, key: &str, value: &str) {
        let Some(storage) = Self::storage(scope) else {
            return;
        };
        // 配额耗尽或隐私模式下会失败
        if let Err(e) = storage.set_item(key, value) {
            log::warn!("failed to write {}: {:?}", key, e);
        }
    }

    fn remove(&self, scope: StorageScope, key: &str) {
        let Some(storage) = Self::storage(scope) else {
            return;
        };
        if let Err(e) = storage.remove_item(key) {
            log::warn!("failed to remove {}: {:?}", key, e);
        }
    }
}
