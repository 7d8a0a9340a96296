//! 路由服务模块 - 核心引擎
//!
//! 单页应用的导航状态机：守卫 -> 渲染 -> 延迟初始化。
//!
//! 渲染产物的类型 `R` 由调用方决定：浏览器中是 `fn() -> AnyView`，
//! 测试中是返回字符串的闭包。所有 DOM 操作都经过 `Surface`，
//! 所有定时器都经过 `Scheduler`，因此本模块不依赖 web_sys。
//!
//! 每次渲染都会递增 `generation` 并丢弃上一次挂起的初始化任务。
//! 初始化任务运行前会再次比对 generation，过期的任务不会执行。

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use super::route::{Guard, PageId};
use crate::i18n::{Language, Localizer};

/// 页面初始化函数。渲染完成后由调度器延迟调用
pub type Initializer = Rc<dyn Fn()>;

/// 页面描述：渲染产物 + 可选的初始化函数
pub struct PageDescriptor<R> {
    pub render: R,
    pub init: Option<Initializer>,
}

impl<R> PageDescriptor<R> {
    pub fn new(render: R) -> Self {
        Self { render, init: None }
    }

    pub fn with_init(mut self, init: impl Fn() + 'static) -> Self {
        self.init = Some(Rc::new(init));
        self
    }
}

/// 导航状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationState {
    pub current: PageId,
    /// 每次渲染递增
    pub generation: u64,
}

/// 渲染目标 (应用根节点与导航栏)
pub trait Surface<R> {
    /// 用 `view` 替换根节点内容
    fn replace_root(&self, page: PageId, view: &R);
    fn refresh_nav_labels(&self, i18n: &Localizer);
    fn set_active_link(&self, page: PageId);
    fn collapse_menu(&self);
    fn scroll_to_top(&self);
    fn apply_language(&self, lang: Language);
}

/// 已调度任务的句柄。drop 即取消
pub struct TaskHandle {
    _guard: Box<dyn Any>,
}

impl TaskHandle {
    pub fn new<T: 'static>(guard: T) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }
}

/// 延迟任务调度器
pub trait Scheduler {
    fn defer(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskHandle;
}

struct RouterInner<R> {
    state: RefCell<NavigationState>,
    pages: RefCell<HashMap<PageId, PageDescriptor<R>>>,
    /// 未登录访问 `Guard::LoginPrompt` 页面时渲染的内容
    login_prompt: R,
    surface: Rc<dyn Surface<R>>,
    scheduler: Rc<dyn Scheduler>,
    is_authenticated: Rc<dyn Fn() -> bool>,
    i18n: Rc<Localizer>,
    init_delay: Duration,
    pending: RefCell<Option<TaskHandle>>,
}

/// 路由器
///
/// 克隆开销很小 (共享同一个内部状态)。
pub struct Router<R> {
    inner: Rc<RouterInner<R>>,
}

impl<R> Clone for Router<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<R: Clone + 'static> Router<R> {
    pub fn new(
        surface: Rc<dyn Surface<R>>,
        scheduler: Rc<dyn Scheduler>,
        is_authenticated: Rc<dyn Fn() -> bool>,
        i18n: Rc<Localizer>,
        login_prompt: R,
        init_delay: Duration,
    ) -> Self {
        Self {
            inner: Rc::new(RouterInner {
                state: RefCell::new(NavigationState::default()),
                pages: RefCell::new(HashMap::new()),
                login_prompt,
                surface,
                scheduler,
                is_authenticated,
                i18n,
                init_delay,
                pending: RefCell::new(None),
            }),
        }
    }

    /// 注册页面。重复注册会覆盖
    pub fn register(&self, page: PageId, descriptor: PageDescriptor<R>) {
        self.inner.pages.borrow_mut().insert(page, descriptor);
    }

    pub fn current_page(&self) -> PageId {
        self.inner.state.borrow().current
    }

    pub fn generation(&self) -> u64 {
        self.inner.state.borrow().generation
    }

    pub fn language(&self) -> Language {
        self.inner.i18n.language()
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：守卫 -> 切换页面 -> 渲染 -> 更新导航栏
    pub fn navigate(&self, page: PageId) {
        let authed = (self.inner.is_authenticated)();

        let target = if page.guard() == Guard::RedirectToLogin && !authed {
            log::debug!("[Router] {} requires login, redirecting", page);
            PageId::auth_failure_redirect()
        } else {
            page
        };

        log::debug!("[Router] navigate -> {}", target);
        self.inner.state.borrow_mut().current = target;
        self.render_current_page();

        let surface = &self.inner.surface;
        surface.set_active_link(target);
        surface.collapse_menu();
        surface.scroll_to_top();
    }

    /// 渲染当前页面并调度其初始化函数
    pub fn render_current_page(&self) {
        let (page, generation) = {
            let mut state = self.inner.state.borrow_mut();
            state.generation += 1;
            (state.current, state.generation)
        };

        // 取消上一次渲染挂起的初始化
        let stale = self.inner.pending.borrow_mut().take();
        drop(stale);

        let descriptor = {
            let pages = self.inner.pages.borrow();
            pages
                .get(&page)
                .map(|d| (d.render.clone(), d.init.clone()))
        };
        let Some((render, init)) = descriptor else {
            log::warn!("[Router] no page registered for {}", page);
            return;
        };

        let denied = page.guard() == Guard::LoginPrompt && !(self.inner.is_authenticated)();
        if denied {
            self.inner
                .surface
                .replace_root(page, &self.inner.login_prompt);
        } else {
            self.inner.surface.replace_root(page, &render);
            if let Some(init) = init {
                self.schedule_init(page, generation, init);
            }
        }

        self.inner.surface.refresh_nav_labels(&self.inner.i18n);
    }

    /// 切换语言并重新渲染当前页面
    pub fn set_language(&self, lang: Language) {
        log::debug!("[Router] language -> {}", lang.code());
        self.inner.i18n.set_language(lang);
        self.inner.surface.apply_language(lang);
        self.render_current_page();
    }

    fn schedule_init(&self, page: PageId, generation: u64, init: Initializer) {
        let weak: Weak<RouterInner<R>> = Rc::downgrade(&self.inner);
        let task = Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if inner.state.borrow().generation != generation {
                log::debug!("[Router] dropping stale initializer for {}", page);
                return;
            }
            init();
        });

        let handle = self.inner.scheduler.defer(self.inner.init_delay, task);
        *self.inner.pending.borrow_mut() = Some(handle);
    }
}
