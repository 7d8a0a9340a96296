//! 应用上下文
//!
//! `AppContext` 是一个 Copy 句柄：界面状态是 signal，
//! 路由器、API 客户端与会话这类非 Send 的服务保存在 `StoredValue::new_local` 中。
//! 组件通过 `use_app()` 取得它，页面初始化函数在注册时捕获它。

use std::rc::{Rc, Weak};
use std::time::Duration;

use leptos::leptos_dom::helpers::set_timeout;
use leptos::prelude::*;

use crate::api::{ApiClient, ClientEvents, ToastKind};
use crate::auth::{AuthSession, AuthSnapshot};
use crate::components::{admin, advisory, chatbot, dashboard, home, login, profile, register, shell};
use crate::config::AppConfig;
use crate::i18n::{Language, Localizer, translate_in};
use crate::web::http::FetchClient;
use crate::web::outlet::{LeptosSurface, Mounted};
use crate::web::route::PageId;
use crate::web::router::{PageDescriptor, Router};
use crate::web::storage::BrowserStorage;
use crate::web::timer::TimerScheduler;

/// 页面渲染函数
pub type PageView = fn() -> AnyView;
pub type AppRouter = Router<PageView>;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
}

// =========================================================
// 界面状态
// =========================================================

#[derive(Clone, Copy)]
pub struct UiState {
    pub mounted: RwSignal<Mounted>,
    pub active_page: RwSignal<PageId>,
    pub menu_open: RwSignal<bool>,
    /// 导航栏等常驻部件订阅它来刷新文案
    pub language: RwSignal<Language>,
    pub auth: RwSignal<AuthSnapshot>,
    pub toast: RwSignal<Option<Toast>>,
    /// 加载遮罩的提示文字，`None` 表示隐藏
    pub loading: RwSignal<Option<String>>,
    toast_seq: StoredValue<u64>,
    toast_duration: Duration,
}

impl UiState {
    fn new(language: Language, auth: AuthSnapshot, toast_duration: Duration) -> Self {
        Self {
            mounted: RwSignal::new(Mounted::default()),
            active_page: RwSignal::new(PageId::default()),
            menu_open: RwSignal::new(false),
            language: RwSignal::new(language),
            auth: RwSignal::new(auth),
            toast: RwSignal::new(None),
            loading: RwSignal::new(None),
            toast_seq: StoredValue::new(0),
            toast_duration,
        }
    }

    /// 显示提示条。新提示会替换旧提示，过期定时器不会隐藏新提示
    pub fn show_toast(&self, message: &str, kind: ToastKind) {
        let id = self.toast_seq.get_value() + 1;
        self.toast_seq.set_value(id);
        self.toast.set(Some(Toast {
            id,
            message: message.to_string(),
            kind,
        }));

        let toast = self.toast;
        set_timeout(
            move || {
                if toast.get_untracked().is_some_and(|t| t.id == id) {
                    toast.set(None);
                }
            },
            self.toast_duration,
        );
    }

    pub fn show_loading(&self, text: &str) {
        self.loading.set(Some(text.to_string()));
    }

    pub fn hide_loading(&self) {
        self.loading.set(None);
    }
}

// =========================================================
// 服务
// =========================================================

/// `ApiClient` 的界面副作用实现
pub struct AppEvents {
    ui: UiState,
    router: AppRouter,
}

impl ClientEvents for AppEvents {
    fn notify(&self, message: &str, kind: ToastKind) {
        self.ui.show_toast(message, kind);
    }

    fn navigate(&self, page: PageId) {
        self.router.navigate(page);
    }
}

struct Services {
    router: AppRouter,
    api: Rc<ApiClient>,
    session: Rc<AuthSession>,
    events: Rc<AppEvents>,
    prediction: Rc<advisory::PendingPrediction>,
    selections: Rc<advisory::StateSelections>,
}

/// 各页面的 signal 仓库。页面渲染时重置
#[derive(Clone, Copy)]
pub struct PageStores {
    pub register: register::RegisterStore,
    pub advisory: advisory::AdvisoryStore,
    pub dashboard: dashboard::DashboardStore,
    pub chat: chatbot::ChatStore,
    pub profile: profile::ProfileStore,
    pub admin: admin::AdminStore,
}

impl PageStores {
    fn new() -> Self {
        Self {
            register: register::RegisterStore::new(),
            advisory: advisory::AdvisoryStore::new(),
            dashboard: dashboard::DashboardStore::new(),
            chat: chatbot::ChatStore::new(),
            profile: profile::ProfileStore::new(),
            admin: admin::AdminStore::new(),
        }
    }
}

// =========================================================
// 上下文
// =========================================================

#[derive(Clone, Copy)]
pub struct AppContext {
    pub ui: UiState,
    pub pages: PageStores,
    services: StoredValue<Services, LocalStorage>,
}

impl AppContext {
    pub fn new(config: &AppConfig) -> Self {
        let session = Rc::new(AuthSession::new(Rc::new(BrowserStorage)));

        // 已登录用户保存的语言作为初始语言
        let language = session
            .current_user()
            .and_then(|u| u.language)
            .and_then(|code| Language::from_code(&code))
            .unwrap_or_default();

        let ui = UiState::new(language, session.snapshot(), config.toast_duration);

        let weak: Weak<AuthSession> = Rc::downgrade(&session);
        session.subscribe(move || {
            if let Some(session) = weak.upgrade() {
                ui.auth.set(session.snapshot());
            }
        });

        let is_authenticated = {
            let session = session.clone();
            Rc::new(move || session.is_authenticated())
        };
        let router = Router::new(
            Rc::new(LeptosSurface::new(ui)),
            Rc::new(TimerScheduler),
            is_authenticated,
            Rc::new(Localizer::new(language)),
            shell::login_prompt as PageView,
            config.init_delay,
        );

        let events = Rc::new(AppEvents {
            ui,
            router: router.clone(),
        });
        let api = Rc::new(ApiClient::new(
            &config.api_base,
            FetchClient,
            session.clone(),
            events.clone(),
        ));

        let services = StoredValue::new_local(Services {
            router,
            api,
            session,
            events,
            prediction: Rc::new(advisory::PendingPrediction::default()),
            selections: Rc::new(advisory::StateSelections::default()),
        });

        let ctx = Self {
            ui,
            pages: PageStores::new(),
            services,
        };
        ctx.register_pages();
        ctx
    }

    fn register_pages(self) {
        let router = self.router();
        router.register(PageId::Home, PageDescriptor::new(home::render as PageView));
        router.register(PageId::Login, PageDescriptor::new(login::render as PageView));
        router.register(
            PageId::Register,
            PageDescriptor::new(register::render as PageView)
                .with_init(move || register::init(self)),
        );
        router.register(
            PageId::Recommend,
            PageDescriptor::new(advisory::render as PageView)
                .with_init(move || advisory::init(self)),
        );
        router.register(
            PageId::Dashboard,
            PageDescriptor::new(dashboard::render as PageView)
                .with_init(move || dashboard::init(self)),
        );
        router.register(
            PageId::Chatbot,
            PageDescriptor::new(chatbot::render as PageView),
        );
        router.register(
            PageId::Profile,
            PageDescriptor::new(profile::render as PageView)
                .with_init(move || profile::init(self)),
        );
        router.register(
            PageId::Admin,
            PageDescriptor::new(admin::render as PageView).with_init(move || admin::init(self)),
        );
    }

    pub fn router(&self) -> AppRouter {
        self.services.with_value(|s| s.router.clone())
    }

    pub fn api(&self) -> Rc<ApiClient> {
        self.services.with_value(|s| s.api.clone())
    }

    pub fn session(&self) -> Rc<AuthSession> {
        self.services.with_value(|s| s.session.clone())
    }

    pub fn events(&self) -> Rc<AppEvents> {
        self.services.with_value(|s| s.events.clone())
    }

    pub fn prediction(&self) -> Rc<advisory::PendingPrediction> {
        self.services.with_value(|s| s.prediction.clone())
    }

    pub fn state_selections(&self) -> Rc<advisory::StateSelections> {
        self.services.with_value(|s| s.selections.clone())
    }

    pub fn navigate(&self, page: PageId) {
        self.router().navigate(page);
    }

    pub fn logout(&self) {
        self.session().clear();
        self.navigate(PageId::Home);
        self.ui.show_toast("Logged out successfully.", ToastKind::Success);
    }

    /// 按路由器当前语言翻译
    pub fn t(&self, key: &'static str) -> &'static str {
        translate_in(self.router().language(), key)
    }

    /// 该代次的页面是否仍在显示
    pub fn is_current(&self, generation: u64) -> bool {
        self.router().generation() == generation
    }
}

/// 取得应用上下文
pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided by App")
}
