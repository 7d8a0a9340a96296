//! 键值存储抽象
//!
//! 会话与管理员密钥都通过此 trait 读写，浏览器实现见 `web::storage`。
//! 所有操作都是"全函数"：底层失败只记录日志，不向调用方传播。

/// 持久化令牌的键
pub const TOKEN_KEY: &str = "bharatagri_token";
/// 持久化用户记录 (JSON) 的键
pub const USER_KEY: &str = "bharatagri_user";
/// 管理员密钥的键 (仅当前标签页)
pub const ADMIN_KEY_KEY: &str = "bharatagri_admin_key";

/// 存储作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageScope {
    /// 跨会话保留 (localStorage)
    Durable,
    /// 仅当前标签页 (sessionStorage)
    Session,
}

pub trait KeyValueStore {
    fn get(&self, scope: StorageScope, key: &str) -> Option<String>;
    fn set(&self, scope: StorageScope, key: &str, value: &str);
    fn remove(&self, scope: StorageScope, key: &str);
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// 内存存储，测试专用
    #[derive(Default)]
    pub struct MemoryStore {
        entries: RefCell<HashMap<(StorageScope, String), String>>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn contains(&self, scope: StorageScope, key: &str) -> bool {
            self.entries
                .borrow()
                .contains_key(&(scope, key.to_string()))
        }
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, scope: StorageScope, key: &str) -> Option<String> {
            self.entries
                .borrow()
                .get(&(scope, key.to_string()))
                .cloned()
        }

        fn set(&self, scope: StorageScope, key: &str, value: &str) {
            self.entries
                .borrow_mut()
                .insert((scope, key.to_string()), value.to_string());
        }

        fn remove(&self, scope: StorageScope, key: &str) {
            self.entries.borrow_mut().remove(&(scope, key.to_string()));
        }
    }

    #[test]
    fn scopes_are_independent() {
        let store = MemoryStore::new();
        store.set(StorageScope::Durable, TOKEN_KEY, "abc");
        assert_eq!(store.get(StorageScope::Session, TOKEN_KEY), None);
        assert_eq!(
            store.get(StorageScope::Durable, TOKEN_KEY).as_deref(),
            Some("abc")
        );

        store.remove(StorageScope::Durable, TOKEN_KEY);
        assert!(!store.contains(StorageScope::Durable, TOKEN_KEY));
    }
}
