//! 远程调用客户端
//!
//! 所有后端请求都经过 `ApiClient`：附加凭据、统一处理 401/403、
//! 把非 2xx 响应转换成 `ApiError` 并弹出提示。
//! 传输层通过 `HttpClient` 注入，界面副作用通过 `ClientEvents` 注入。

use std::rc::Rc;

use bharatagri_shared::protocol::{ApiRequest, AuthMode, HttpMethod};
use bharatagri_shared::{
    CONTENT_TYPE_JSON, ErrorBody, HEADER_ADMIN_KEY, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE,
};

use crate::auth::AuthSession;
use crate::error::{ApiError, ApiResult, FALLBACK_MESSAGE};
use crate::web::http::{FetchClient, HttpClient, HttpRequest, HttpResponse};
use crate::web::route::PageId;

pub const SESSION_EXPIRED: &str = "Session expired. Please login again.";

/// 提示类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// 客户端需要的界面副作用
pub trait ClientEvents {
    fn notify(&self, message: &str, kind: ToastKind);
    fn navigate(&self, page: PageId);
}

pub struct ApiClient<H: HttpClient = FetchClient> {
    base_url: String,
    http: H,
    session: Rc<AuthSession>,
    events: Rc<dyn ClientEvents>,
}

impl<H: HttpClient> ApiClient<H> {
    pub fn new(
        base_url: &str,
        http: H,
        session: Rc<AuthSession>,
        events: Rc<dyn ClientEvents>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            session,
            events,
        }
    }

    pub fn session(&self) -> &Rc<AuthSession> {
        &self.session
    }

    pub fn events(&self) -> &dyn ClientEvents {
        self.events.as_ref()
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn build<Q: ApiRequest>(&self, req: &Q) -> ApiResult<HttpRequest> {
        let mut request = HttpRequest::new(&self.url(&req.path()), Q::METHOD)
            .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON);

        if Q::METHOD == HttpMethod::Post {
            let body = serde_json::to_string(req)
                .map_err(|e| ApiError::Decode(format!("encode request: {}", e)))?;
            request = request.with_body(body);
        }
        Ok(request)
    }

    /// 普通调用 (公开或 Bearer)
    ///
    /// 返回 `Ok(None)` 表示收到 401：会话已清除，已导航到登录页
    pub async fn call<Q: ApiRequest>(&self, req: &Q) -> ApiResult<Option<Q::Response>> {
        debug_assert!(Q::AUTH != AuthMode::Admin, "admin endpoints go through admin()");

        let had_session = self.session.is_authenticated();
        let mut request = self.build(req)?;
        if Q::AUTH == AuthMode::Bearer {
            if let Some(token) = self.session.token() {
                request =
                    request.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
            }
        }

        let response = match self.http.send(request).await {
            Ok(resp) => resp,
            Err(e) => {
                let err = ApiError::from(e);
                log::warn!("{} {} failed: {}", Q::METHOD.as_str(), req.path(), err);
                self.surface(&err);
                return Err(err);
            }
        };

        if response.status == 401 {
            let message = if had_session {
                SESSION_EXPIRED.to_string()
            } else {
                error_message(&response)
            };
            log::info!("401 from {}, clearing session", req.path());
            self.session.clear();
            self.events.notify(&message, ToastKind::Error);
            self.events.navigate(PageId::Login);
            return Ok(None);
        }

        if !response.ok() {
            let err = ApiError::Rejected {
                status: response.status,
                message: error_message(&response),
            };
            log::warn!("{} rejected ({}): {}", req.path(), response.status, err);
            self.surface(&err);
            return Err(err);
        }

        match serde_json::from_str(&response.body) {
            Ok(data) => Ok(Some(data)),
            Err(e) => {
                let err = ApiError::Decode(e.to_string());
                log::error!("{} returned an undecodable body: {}", req.path(), e);
                self.surface(&err);
                Err(err)
            }
        }
    }

    /// 管理端调用，使用当前标签页的管理员密钥
    ///
    /// 不弹出提示，由管理页面决定如何展示
    pub async fn admin<Q: ApiRequest>(&self, req: &Q) -> ApiResult<Q::Response> {
        let Some(key) = self.session.admin_key() else {
            return Err(ApiError::MissingAdminKey);
        };

        let request = self.build(req)?.with_header(HEADER_ADMIN_KEY, &key);
        let response = self.http.send(request).await?;

        if response.status == 403 {
            log::warn!("admin key rejected");
            self.session.forget_admin_key();
            return Err(ApiError::InvalidAdminKey);
        }
        if !response.ok() {
            return Err(ApiError::Rejected {
                status: response.status,
                message: error_message(&response),
            });
        }

        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// 用户可见的错误弹出提示；网络错误只记录日志
    fn surface(&self, err: &ApiError) {
        if err.is_user_visible() {
            self.events.notify(&err.to_string(), ToastKind::Error);
        }
    }
}

/// 从错误响应体中提取消息
fn error_message(response: &HttpResponse) -> String {
    serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.message())
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::store::tests::MemoryStore;
    use crate::store::{KeyValueStore, StorageScope, TOKEN_KEY, USER_KEY};
    use crate::web::http::tests::MockHttpClient;
    use bharatagri_shared::User;
    use bharatagri_shared::protocol::{
        AdminStatsRequest, DistrictsRequest, HistoryRequest, MeRequest, StatesRequest,
    };
    use bharatagri_shared::{ChatRequest, LoginRequest};
    use serde_json::json;
    use std::cell::RefCell;

    pub const BASE: &str = "http://test";

    /// 记录通知与导航请求
    #[derive(Default)]
    pub struct RecordingEvents {
        pub toasts: RefCell<Vec<(String, ToastKind)>>,
        pub navigations: RefCell<Vec<PageId>>,
    }

    impl ClientEvents for RecordingEvents {
        fn notify(&self, message: &str, kind: ToastKind) {
            self.toasts.borrow_mut().push((message.to_string(), kind));
        }

        fn navigate(&self, page: PageId) {
            self.navigations.borrow_mut().push(page);
        }
    }

    impl RecordingEvents {
        pub fn messages(&self) -> Vec<String> {
            self.toasts.borrow().iter().map(|(m, _)| m.clone()).collect()
        }
    }

    pub struct TestContext {
        pub api: ApiClient<MockHttpClient>,
        pub store: Rc<MemoryStore>,
        pub session: Rc<AuthSession>,
        pub events: Rc<RecordingEvents>,
    }

    impl TestContext {
        pub fn new() -> Self {
            let store = Rc::new(MemoryStore::new());
            let session = Rc::new(AuthSession::new(store.clone()));
            let events = Rc::new(RecordingEvents::default());
            let api = ApiClient::new(
                BASE,
                MockHttpClient::new(),
                session.clone(),
                events.clone(),
            );
            Self {
                api,
                store,
                session,
                events,
            }
        }

        pub fn signed_in() -> Self {
            let ctx = Self::new();
            ctx.session.establish("tok-123", &test_user());
            ctx
        }

        pub fn http(&self) -> &MockHttpClient {
            &self.api.http
        }

        pub fn mock(&self, path: &str, status: u16, body: serde_json::Value) {
            self.http()
                .mock_response(&format!("{}{}", BASE, path), status, body);
        }

        pub fn mock_unreachable(&self, path: &str) {
            self.http().mock_unreachable(&format!("{}{}", BASE, path));
        }

        /// 已发出请求的路径
        pub fn paths(&self) -> Vec<String> {
            self.http()
                .urls()
                .into_iter()
                .map(|u| u.trim_start_matches(BASE).to_string())
                .collect()
        }
    }

    pub fn test_user() -> User {
        User {
            id: 1,
            name: "Ravi Kumar".to_string(),
            email: "ravi@example.in".to_string(),
            state: Some("Maharashtra".to_string()),
            language: Some("mr".to_string()),
        }
    }

    #[tokio::test]
    async fn bearer_token_attached_only_to_bearer_endpoints() {
        let ctx = TestContext::signed_in();
        ctx.mock("/api/predict/history", 200, json!([]));
        ctx.mock("/api/reference/states", 200, json!({ "states": ["Punjab"] }));

        ctx.api.call(&HistoryRequest).await.unwrap();
        ctx.api.call(&StatesRequest).await.unwrap();

        let requests = ctx.http().requests.borrow();
        let (_, method, headers, body) = &requests[0];
        assert_eq!(method, "GET");
        assert_eq!(
            headers.get(HEADER_AUTHORIZATION).map(String::as_str),
            Some("Bearer tok-123")
        );
        assert_eq!(
            headers.get(HEADER_CONTENT_TYPE).map(String::as_str),
            Some(CONTENT_TYPE_JSON)
        );
        assert!(body.is_none());

        let (_, _, headers, _) = &requests[1];
        assert!(!headers.contains_key(HEADER_AUTHORIZATION));
    }

    #[tokio::test]
    async fn post_sends_json_body() {
        let ctx = TestContext::signed_in();
        ctx.mock("/api/chatbot/message", 200, json!({ "response": "Sow in June." }));

        let reply = ctx
            .api
            .call(&ChatRequest {
                message: "When to sow rice?".into(),
                language: "en".into(),
                context: json!({}),
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reply.response.as_deref(), Some("Sow in June."));

        let requests = ctx.http().requests.borrow();
        let body: serde_json::Value =
            serde_json::from_str(requests[0].3.as_deref().unwrap()).unwrap();
        assert_eq!(body["message"], "When to sow rice?");
        assert_eq!(body["context"], json!({}));
    }

    #[tokio::test]
    async fn unauthorized_clears_session_and_redirects_from_any_endpoint() {
        for path in ["/api/predict/history", "/api/auth/me"] {
            let ctx = TestContext::signed_in();
            ctx.mock(path, 401, json!({ "detail": "Could not validate credentials" }));

            let result = if path == "/api/auth/me" {
                ctx.api.call(&MeRequest).await.map(|r| r.is_some())
            } else {
                ctx.api.call(&HistoryRequest).await.map(|r| r.is_some())
            };

            assert_eq!(result, Ok(false));
            assert!(!ctx.session.is_authenticated());
            assert!(!ctx.store.contains(StorageScope::Durable, TOKEN_KEY));
            assert!(!ctx.store.contains(StorageScope::Durable, USER_KEY));
            assert_eq!(*ctx.events.navigations.borrow(), vec![PageId::Login]);
            assert_eq!(
                *ctx.events.toasts.borrow(),
                vec![(SESSION_EXPIRED.to_string(), ToastKind::Error)]
            );
        }
    }

    #[tokio::test]
    async fn failed_login_shows_server_detail() {
        let ctx = TestContext::new();
        ctx.mock(
            "/api/auth/login",
            401,
            json!({ "detail": "Invalid email or password" }),
        );

        let result = ctx
            .api
            .call(&LoginRequest {
                email: "a@b.in".into(),
                password: "wrong".into(),
            })
            .await;

        assert!(matches!(result, Ok(None)));
        assert_eq!(ctx.events.messages(), vec!["Invalid email or password"]);
        assert_eq!(*ctx.events.navigations.borrow(), vec![PageId::Login]);
    }

    #[tokio::test]
    async fn rejection_is_toasted_with_detail_or_fallback() {
        let ctx = TestContext::signed_in();
        ctx.mock(
            "/api/reference/districts/Goa",
            404,
            json!({ "detail": "State not found" }),
        );
        ctx.http()
            .mock_raw(&format!("{}/api/predict/history", BASE), 500, "Internal Server Error");

        let err = ctx
            .api
            .call(&DistrictsRequest { state: "Goa".into() })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 404,
                message: "State not found".into()
            }
        );

        let err = ctx.api.call(&HistoryRequest).await.unwrap_err();
        assert_eq!(err.to_string(), FALLBACK_MESSAGE);

        assert_eq!(
            ctx.events.messages(),
            vec!["State not found", FALLBACK_MESSAGE]
        );
        // 非 401 不影响会话
        assert!(ctx.session.is_authenticated());
    }

    #[tokio::test]
    async fn network_failure_propagates_silently() {
        let ctx = TestContext::signed_in();
        ctx.mock_unreachable("/api/predict/history");

        let err = ctx.api.call(&HistoryRequest).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert!(ctx.events.toasts.borrow().is_empty());
        assert!(ctx.events.navigations.borrow().is_empty());
    }

    #[tokio::test]
    async fn undecodable_success_body_is_an_error() {
        let ctx = TestContext::new();
        ctx.http()
            .mock_raw(&format!("{}/api/reference/states", BASE), 200, "<html>");

        let err = ctx.api.call(&StatesRequest).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        assert_eq!(ctx.events.toasts.borrow().len(), 1);
    }

    #[tokio::test]
    async fn admin_requires_key_and_forgets_it_on_403() {
        let ctx = TestContext::new();

        let err = ctx.api.admin(&AdminStatsRequest).await.unwrap_err();
        assert_eq!(err, ApiError::MissingAdminKey);
        assert_eq!(ctx.http().request_count(), 0);

        ctx.session.store_admin_key("wrong");
        ctx.mock("/api/admin/stats", 403, json!({ "detail": "Invalid admin key" }));
        let err = ctx.api.admin(&AdminStatsRequest).await.unwrap_err();
        assert_eq!(err, ApiError::InvalidAdminKey);
        assert_eq!(err.to_string(), "Invalid admin key");
        assert_eq!(ctx.session.admin_key(), None);

        let requests = ctx.http().requests.borrow();
        assert_eq!(
            requests[0].2.get(HEADER_ADMIN_KEY).map(String::as_str),
            Some("wrong")
        );
        // 管理端调用不弹出提示
        assert!(ctx.events.toasts.borrow().is_empty());
    }

    #[tokio::test]
    async fn admin_success_decodes_stats() {
        let ctx = TestContext::new();
        ctx.store
            .set(StorageScope::Session, crate::store::ADMIN_KEY_KEY, "s3cret");
        ctx.mock(
            "/api/admin/stats",
            200,
            json!({
                "total_users": 4,
                "total_predictions": 9,
                "total_chats": 2,
                "predictions_by_type": { "full": 9 }
            }),
        );

        let stats = ctx.api.admin(&AdminStatsRequest).await.unwrap();
        assert_eq!(stats.total_users, 4);
        assert_eq!(stats.predictions_by_type.get("full"), Some(&9));
    }
}
