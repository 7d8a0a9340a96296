//! BharatAgri AI 前端应用
//!
//! 单页应用，按页面组织：
//! - `web::router`: 页面切换、守卫与延迟初始化（核心引擎）
//! - `web::route`: 页面定义（领域模型）
//! - `api` / `auth` / `store`: 远程调用、会话与浏览器存储
//! - `i18n`: 八种语言的界面文案
//! - `components`: 各页面与外壳

mod api;
mod auth;
mod components {
    pub mod admin;
    pub mod advisory;
    pub mod chatbot;
    pub mod dashboard;
    pub mod home;
    pub mod login;
    pub mod profile;
    pub mod register;
    pub mod shell;
}
pub mod config;
mod context;
mod error;
mod i18n;
pub mod logger;
mod store;

use leptos::prelude::*;

use crate::components::shell::Shell;
use crate::config::AppConfig;
use crate::context::AppContext;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    pub mod dom;
    pub mod http;
    pub mod outlet;
    pub mod route;
    pub mod router;
    pub mod storage;
    pub mod timer;
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建应用上下文（会话、路由器、API 客户端）
    let ctx = AppContext::new(&AppConfig::from_env());
    provide_context(ctx);

    // 2. 挂载初始页面 (Home)
    let router = ctx.router();
    router.render_current_page();
    web::dom::apply_language(router.language());

    view! { <Shell /> }
}
