//! 应用外壳：导航栏、提示条、加载遮罩、页脚
//!
//! 外壳常驻，不经过路由器重建；文案通过 `UiState::language` 刷新。

use leptos::prelude::*;

use crate::api::ToastKind;
use crate::context::use_app;
use crate::i18n::{Language, translate_in};
use crate::web::outlet::RouterOutlet;
use crate::web::route::PageId;

#[component]
pub fn Shell() -> impl IntoView {
    let ctx = use_app();

    view! {
        <div class="min-h-screen flex flex-col bg-base-200">
            <Navbar />
            <main class="flex-1">
                <RouterOutlet mounted=ctx.ui.mounted />
            </main>
            <Footer />
            <ToastHost />
            <LoadingOverlay />
        </div>
    }
}

const NAV_CLASS: &str = "menu menu-horizontal px-1 gap-1 max-lg:menu-vertical max-lg:absolute max-lg:top-16 max-lg:left-0 max-lg:w-full max-lg:bg-base-100 max-lg:shadow";

#[component]
fn Navbar() -> impl IntoView {
    let ctx = use_app();
    let ui = ctx.ui;
    let label = move |key: &'static str| move || translate_in(ui.language.get(), key);

    let on_language = move |ev: leptos::ev::Event| {
        if let Some(lang) = Language::from_code(&event_target_value(&ev)) {
            ctx.router().set_language(lang);
        }
    };

    view! {
        <div class="navbar bg-base-100 shadow-sm sticky top-0 z-30 px-4">
            <div class="flex-1 gap-2">
                <button
                    class="btn btn-ghost lg:hidden"
                    aria-label="menu"
                    on:click=move |_| ui.menu_open.update(|open| *open = !*open)
                >
                    <svg xmlns="http://www.w3.org/2000/svg" class="h-5 w-5" fill="none" viewBox="0 0 24 24" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M4 6h16M4 12h16M4 18h16" /></svg>
                </button>
                <a class="btn btn-ghost text-xl font-bold text-primary" on:click=move |_| ctx.navigate(PageId::Home)>
                    "🌾 BharatAgri AI"
                </a>
            </div>

            <ul class=move || {
                if ui.menu_open.get() { NAV_CLASS.to_string() } else { format!("{} max-lg:hidden", NAV_CLASS) }
            }>
                {PageId::NAV
                    .into_iter()
                    .map(|page| {
                        view! {
                            <li>
                                <a
                                    class:active=move || ui.active_page.get() == page
                                    on:click=move |_| ctx.navigate(page)
                                >
                                    {label(page.nav_label_key())}
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>

            <div class="flex-none flex items-center gap-2">
                <select class="select select-bordered select-sm" on:change=on_language>
                    {Language::ALL
                        .into_iter()
                        .map(|lang| {
                            view! {
                                <option
                                    value=lang.code()
                                    selected=move || ui.language.get() == lang
                                >
                                    {lang.native_name()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>

                <Show
                    when=move || ui.auth.get().authenticated
                    fallback=move || {
                        view! {
                            <button class="btn btn-ghost btn-sm" on:click=move |_| ctx.navigate(PageId::Login)>
                                {label("login")}
                            </button>
                            <button class="btn btn-primary btn-sm" on:click=move |_| ctx.navigate(PageId::Register)>
                                {label("signup")}
                            </button>
                        }
                    }
                >
                    <div class="dropdown dropdown-end">
                        <div tabindex="0" role="button" class="btn btn-ghost btn-sm">
                            "👤 " {move || ui.auth.get().display_name}
                        </div>
                        <ul tabindex="0" class="dropdown-content menu bg-base-100 rounded-box z-40 w-40 p-2 shadow">
                            <li>
                                <a on:click=move |_| ctx.navigate(PageId::Profile)>{label("profile")}</a>
                            </li>
                            <li>
                                <a on:click=move |_| ctx.logout()>{label("logout")}</a>
                            </li>
                        </ul>
                    </div>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn Footer() -> impl IntoView {
    let ctx = use_app();

    view! {
        <footer class="footer footer-center p-6 bg-base-300 text-base-content/70 text-sm">
            <p>"© BharatAgri AI · Smart farming advisory for Indian farmers"</p>
            <a class="link link-hover text-xs" on:click=move |_| ctx.navigate(PageId::Admin)>
                {move || translate_in(ctx.ui.language.get(), "admin")}
            </a>
        </footer>
    }
}

#[component]
fn ToastHost() -> impl IntoView {
    let ui = use_app().ui;

    view! {
        <div class="toast toast-end toast-bottom z-50">
            {move || {
                ui.toast
                    .get()
                    .map(|toast| {
                        let class = match toast.kind {
                            ToastKind::Success => "alert alert-success",
                            ToastKind::Error => "alert alert-error",
                        };
                        view! {
                            <div role="alert" class=class>
                                <span>{toast.message}</span>
                            </div>
                        }
                    })
            }}
        </div>
    }
}

#[component]
fn LoadingOverlay() -> impl IntoView {
    let ui = use_app().ui;

    view! {
        <Show when=move || ui.loading.get().is_some()>
            <div class="fixed inset-0 z-40 bg-base-300/70 flex flex-col items-center justify-center gap-4">
                <span class="loading loading-spinner loading-lg text-primary"></span>
                <p class="text-lg font-medium">{move || ui.loading.get().unwrap_or_default()}</p>
            </div>
        </Show>
    }
}

/// 未登录访问受保护页面时的提示
pub fn login_prompt() -> AnyView {
    let ctx = use_app();

    view! {
        <div class="hero min-h-[60vh]">
            <div class="hero-content text-center">
                <div class="max-w-md flex flex-col items-center gap-4">
                    <div class="text-6xl">"🔒"</div>
                    <h2 class="text-2xl font-bold">{ctx.t("login_required")}</h2>
                    <p class="text-base-content/70">{ctx.t("login_required_sub")}</p>
                    <div class="flex gap-2">
                        <button class="btn btn-primary" on:click=move |_| ctx.navigate(PageId::Login)>
                            {ctx.t("login")}
                        </button>
                        <button class="btn btn-outline" on:click=move |_| ctx.navigate(PageId::Register)>
                            {ctx.t("signup")}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
    .into_any()
}
