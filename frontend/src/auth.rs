//! 认证模块
//!
//! `AuthSession` 是持久化令牌与用户记录的唯一写入者。
//! 路由器与导航栏通过 `subscribe` 注册的监听器感知会话变化，
//! 与存储实现解耦。

use std::cell::RefCell;
use std::rc::Rc;

use bharatagri_shared::User;

use crate::store::{ADMIN_KEY_KEY, KeyValueStore, StorageScope, TOKEN_KEY, USER_KEY};

/// 有令牌但没有用户记录时显示的名字
pub const PLACEHOLDER_NAME: &str = "User";

type Listener = Rc<dyn Fn()>;

/// 会话快照，供界面渲染
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthSnapshot {
    pub authenticated: bool,
    pub display_name: String,
}

pub struct AuthSession {
    store: Rc<dyn KeyValueStore>,
    listeners: RefCell<Vec<Listener>>,
}

impl AuthSession {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            listeners: RefCell::new(Vec::new()),
        }
    }

    // =========================================================
    // 读取
    // =========================================================

    /// 令牌存在即视为已登录。令牌有效性由服务端 401 判定
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.store
            .get(StorageScope::Durable, TOKEN_KEY)
            .filter(|t| !t.is_empty())
    }

    /// 读取用户记录。损坏的 JSON 视为缺失
    pub fn current_user(&self) -> Option<User> {
        let raw = self.store.get(StorageScope::Durable, USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("stored user record is malformed: {}", e);
                None
            }
        }
    }

    pub fn display_name(&self) -> String {
        self.current_user()
            .map(|u| u.name)
            .unwrap_or_else(|| PLACEHOLDER_NAME.to_string())
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot {
            authenticated: self.is_authenticated(),
            display_name: self.display_name(),
        }
    }

    // =========================================================
    // 写入
    // =========================================================

    /// 登录/注册成功后建立会话
    pub fn establish(&self, token: &str, user: &User) {
        self.store.set(StorageScope::Durable, TOKEN_KEY, token);
        self.write_user(user);
        log::info!("session established for {}", user.email);
        self.notify();
    }

    /// 替换用户记录 (资料保存、`/api/auth/me` 刷新)
    pub fn update_user(&self, user: &User) {
        self.write_user(user);
        self.notify();
    }

    /// 登出或 401 时清除会话
    pub fn clear(&self) {
        self.store.remove(StorageScope::Durable, TOKEN_KEY);
        self.store.remove(StorageScope::Durable, USER_KEY);
        log::info!("session cleared");
        self.notify();
    }

    fn write_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(json) => self.store.set(StorageScope::Durable, USER_KEY, &json),
            Err(e) => log::error!("failed to serialize user: {}", e),
        }
    }

    // =========================================================
    // 管理员密钥 (仅当前标签页)
    // =========================================================

    pub fn admin_key(&self) -> Option<String> {
        self.store
            .get(StorageScope::Session, ADMIN_KEY_KEY)
            .filter(|k| !k.is_empty())
    }

    pub fn store_admin_key(&self, key: &str) {
        self.store.set(StorageScope::Session, ADMIN_KEY_KEY, key);
    }

    pub fn forget_admin_key(&self) {
        self.store.remove(StorageScope::Session, ADMIN_KEY_KEY);
    }

    // =========================================================
    // 监听
    // =========================================================

    pub fn subscribe(&self, listener: impl Fn() + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// 先复制监听器列表再调用，监听器内可以再次读写会话
    fn notify(&self) {
        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::MemoryStore;
    use std::cell::Cell;

    fn farmer() -> User {
        User {
            id: 7,
            name: "Asha".to_string(),
            email: "asha@example.in".to_string(),
            state: Some("Punjab".to_string()),
            language: Some("pa".to_string()),
        }
    }

    fn session() -> (Rc<MemoryStore>, AuthSession) {
        let store = Rc::new(MemoryStore::new());
        let session = AuthSession::new(store.clone());
        (store, session)
    }

    #[test]
    fn establish_then_clear() {
        let (store, session) = session();
        assert!(!session.is_authenticated());

        session.establish("tok", &farmer());
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("tok"));
        assert_eq!(session.current_user(), Some(farmer()));
        assert_eq!(session.display_name(), "Asha");

        session.clear();
        assert!(!session.is_authenticated());
        assert!(!store.contains(StorageScope::Durable, TOKEN_KEY));
        assert!(!store.contains(StorageScope::Durable, USER_KEY));
    }

    #[test]
    fn malformed_user_record_degrades_to_placeholder() {
        let (store, session) = session();
        store.set(StorageScope::Durable, TOKEN_KEY, "tok");
        store.set(StorageScope::Durable, USER_KEY, "{not json");

        assert!(session.is_authenticated());
        assert_eq!(session.current_user(), None);
        assert_eq!(session.display_name(), PLACEHOLDER_NAME);
    }

    #[test]
    fn listeners_fire_on_every_write() {
        let (_store, session) = session();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        session.subscribe(move || h.set(h.get() + 1));

        session.establish("tok", &farmer());
        session.update_user(&farmer());
        session.clear();
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn admin_key_lives_in_session_scope() {
        let (store, session) = session();
        session.store_admin_key("secret");
        assert!(store.contains(StorageScope::Session, ADMIN_KEY_KEY));
        assert_eq!(session.admin_key().as_deref(), Some("secret"));

        // 登出不影响管理员密钥
        session.clear();
        assert_eq!(session.admin_key().as_deref(), Some("secret"));

        session.forget_admin_key();
        assert_eq!(session.admin_key(), None);
    }
}
