use leptos::prelude::*;

use crate::context::{AppContext, use_app};
use crate::web::route::PageId;

const FEATURES: [(&str, &str, &str); 6] = [
    ("🌱", "feat_crop_title", "feat_crop_desc"),
    ("📈", "feat_yield_title", "feat_yield_desc"),
    ("⚠️", "feat_risk_title", "feat_risk_desc"),
    ("🗣️", "feat_multi_title", "feat_multi_desc"),
    ("🤖", "feat_chat_title", "feat_chat_desc"),
    ("🗺️", "feat_data_title", "feat_data_desc"),
];

const STATS: [(&str, &str); 3] = [
    ("16", "stat_states"),
    ("22+", "stat_crops"),
    ("3", "stat_models"),
];

/// "开始使用" 的目标页面
pub fn get_started_target(authenticated: bool) -> PageId {
    if authenticated {
        PageId::Recommend
    } else {
        PageId::Register
    }
}

pub fn render() -> AnyView {
    view! { <HomePage /> }.into_any()
}

#[component]
fn HomePage() -> impl IntoView {
    let ctx: AppContext = use_app();

    let on_start = move |_| {
        let authed = ctx.session().is_authenticated();
        ctx.navigate(get_started_target(authed));
    };

    view! {
        <section class="hero min-h-[70vh] bg-gradient-to-br from-green-50 to-amber-50">
            <div class="hero-content text-center">
                <div class="max-w-3xl flex flex-col items-center gap-6">
                    <span class="badge badge-success badge-outline badge-lg">{ctx.t("hero_badge")}</span>
                    <h1 class="text-4xl md:text-5xl font-bold">{ctx.t("hero_title")}</h1>
                    <p class="text-lg text-base-content/70">{ctx.t("hero_subtitle")}</p>
                    <div class="flex gap-3">
                        <button class="btn btn-primary btn-lg" on:click=on_start>
                            {ctx.t("get_started")}
                        </button>
                        <a class="btn btn-outline btn-lg" href="#features">
                            {ctx.t("learn_more")}
                        </a>
                    </div>
                </div>
            </div>
        </section>

        <section class="stats stats-vertical md:stats-horizontal shadow w-full rounded-none">
            {STATS
                .into_iter()
                .map(|(value, key)| {
                    view! {
                        <div class="stat place-items-center">
                            <div class="stat-value text-primary">{value}</div>
                            <div class="stat-desc">{ctx.t(key)}</div>
                        </div>
                    }
                })
                .collect_view()}
        </section>

        <section id="features" class="container mx-auto px-4 py-16">
            <div class="grid gap-6 md:grid-cols-2 lg:grid-cols-3">
                {FEATURES
                    .into_iter()
                    .map(|(icon, title, desc)| {
                        view! {
                            <div class="card bg-base-100 shadow-md">
                                <div class="card-body">
                                    <div class="text-4xl">{icon}</div>
                                    <h3 class="card-title">{ctx.t(title)}</h3>
                                    <p class="text-base-content/70">{ctx.t(desc)}</p>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_started_depends_on_session() {
        assert_eq!(get_started_target(true), PageId::Recommend);
        assert_eq!(get_started_target(false), PageId::Register);
    }
}
