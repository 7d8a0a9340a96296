//! 路由出口
//!
//! 把 `Router` 的渲染请求翻译成 Leptos signal 写入，
//! `RouterOutlet` 根据 signal 渲染当前页面。

use leptos::prelude::*;

use super::dom;
use super::route::PageId;
use super::router::Surface;
use crate::context::{PageView, UiState};
use crate::i18n::{Language, Localizer};

/// 当前挂载在根节点的内容
#[derive(Clone, Copy)]
pub struct Mounted {
    pub page: PageId,
    pub render: PageView,
}

impl Default for Mounted {
    fn default() -> Self {
        Self {
            page: PageId::default(),
            render: || ().into_any(),
        }
    }
}

/// 基于 signal 的渲染目标
pub struct LeptosSurface {
    ui: UiState,
}

impl LeptosSurface {
    pub fn new(ui: UiState) -> Self {
        Self { ui }
    }
}

impl Surface<PageView> for LeptosSurface {
    fn replace_root(&self, page: PageId, view: &PageView) {
        // set 总会通知订阅者，同一页面重复渲染也会重建视图
        self.ui.mounted.set(Mounted {
            page,
            render: *view,
        });
    }

    fn refresh_nav_labels(&self, i18n: &Localizer) {
        self.ui.language.set(i18n.language());
    }

    fn set_active_link(&self, page: PageId) {
        self.ui.active_page.set(page);
    }

    fn collapse_menu(&self) {
        self.ui.menu_open.set(false);
    }

    fn scroll_to_top(&self) {
        dom::scroll_to_top();
    }

    fn apply_language(&self, lang: Language) {
        dom::apply_language(lang);
    }
}

/// 路由出口组件
///
/// 页面构造过程中读取的 signal 不会被出口追踪，
/// 只有路由器的渲染请求才会替换页面。
#[component]
pub fn RouterOutlet(mounted: RwSignal<Mounted>) -> impl IntoView {
    move || {
        let current = mounted.get();
        untrack(move || (current.render)())
    }
}
