use leptos::prelude::*;
use leptos::task::spawn_local;

use bharatagri_shared::RegisterRequest;

use crate::api::{ApiClient, ToastKind};
use crate::components::advisory::{FILL_REQUIRED, fetch_states};
use crate::context::{AppContext, use_app};
use crate::web::http::HttpClient;
use crate::web::route::PageId;

/// 注册表单输入
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    /// 可选
    pub state: String,
}

/// 提交注册
///
/// 姓名、邮箱、密码必填；成功后建立会话并跳转到咨询页
pub async fn submit_register<H: HttpClient>(api: &ApiClient<H>, form: &RegisterForm) -> bool {
    let name = form.name.trim();
    let email = form.email.trim();
    if name.is_empty() || email.is_empty() || form.password.is_empty() {
        api.events().notify(FILL_REQUIRED, ToastKind::Error);
        return false;
    }

    let req = RegisterRequest {
        email: email.to_string(),
        name: name.to_string(),
        password: form.password.clone(),
        state: form.state.clone(),
    };
    match api.call(&req).await {
        Ok(Some(auth)) => {
            api.session().establish(&auth.access_token, &auth.user);
            api.events().notify(
                &format!("Welcome to BharatAgri AI, {}!", auth.user.name),
                ToastKind::Success,
            );
            api.events().navigate(PageId::auth_success_redirect());
            true
        }
        _ => false,
    }
}

#[derive(Clone, Copy)]
pub struct RegisterStore {
    pub states: RwSignal<Vec<String>>,
}

impl RegisterStore {
    pub fn new() -> Self {
        Self {
            states: RwSignal::new(Vec::new()),
        }
    }
}

/// 加载州下拉框。失败时保持为空
pub fn init(ctx: AppContext) {
    let generation = ctx.router().generation();
    spawn_local(async move {
        let api = ctx.api();
        if let Some(states) = fetch_states(&api).await {
            if ctx.is_current(generation) {
                ctx.pages.register.states.set(states);
            }
        }
    });
}

pub fn render() -> AnyView {
    use_app().pages.register.states.set(Vec::new());
    view! { <RegisterPage /> }.into_any()
}

#[component]
fn RegisterPage() -> impl IntoView {
    let ctx = use_app();
    let states = ctx.pages.register.states;

    let form = RwSignal::new(RegisterForm::default());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        set_is_submitting.set(true);
        let values = form.get_untracked();
        spawn_local(async move {
            let api = ctx.api();
            submit_register(&api, &values).await;
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-[70vh]">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">{ctx.t("register_title")}</h1>
                    <p class="text-base-content/70">{ctx.t("register_sub")}</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <div class="form-control">
                            <label class="label" for="reg-name">
                                <span class="label-text">{ctx.t("name")}</span>
                            </label>
                            <input
                                id="reg-name"
                                type="text"
                                class="input input-bordered"
                                prop:value=move || form.with(|f| f.name.clone())
                                on:input=move |ev| {
                                    let v = event_target_value(&ev);
                                    form.update(|f| f.name = v);
                                }
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg-email">
                                <span class="label-text">{ctx.t("email")}</span>
                            </label>
                            <input
                                id="reg-email"
                                type="email"
                                class="input input-bordered"
                                prop:value=move || form.with(|f| f.email.clone())
                                on:input=move |ev| {
                                    let v = event_target_value(&ev);
                                    form.update(|f| f.email = v);
                                }
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg-password">
                                <span class="label-text">{ctx.t("password")}</span>
                            </label>
                            <input
                                id="reg-password"
                                type="password"
                                class="input input-bordered"
                                prop:value=move || form.with(|f| f.password.clone())
                                on:input=move |ev| {
                                    let v = event_target_value(&ev);
                                    form.update(|f| f.password = v);
                                }
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg-state">
                                <span class="label-text">{ctx.t("state")}</span>
                            </label>
                            <select
                                id="reg-state"
                                class="select select-bordered"
                                on:change=move |ev| {
                                    let v = event_target_value(&ev);
                                    form.update(|f| f.state = v);
                                }
                            >
                                <option value="">{format!("-- {} --", ctx.t("select_state"))}</option>
                                <For
                                    each=move || states.get()
                                    key=|s| s.clone()
                                    children=move |state: String| {
                                        let text = state.clone();
                                        view! { <option value=state>{text}</option> }
                                    }
                                />
                            </select>
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> }.into_any()
                                } else {
                                    ctx.t("signup").into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            {ctx.t("already_have_account")} " "
                            <a class="link link-primary" on:click=move |_| ctx.navigate(PageId::Login)>
                                {ctx.t("login")}
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{TestContext, test_user};
    use serde_json::json;

    fn form() -> RegisterForm {
        RegisterForm {
            name: " Ravi Kumar ".into(),
            email: "ravi@example.in".into(),
            password: "kisan123".into(),
            state: String::new(),
        }
    }

    #[tokio::test]
    async fn state_is_optional_but_name_is_required() {
        let ctx = TestContext::new();
        let mut missing_name = form();
        missing_name.name = "  ".into();

        assert!(!submit_register(&ctx.api, &missing_name).await);
        assert_eq!(ctx.http().request_count(), 0);
        assert_eq!(ctx.events.messages(), vec![FILL_REQUIRED]);
    }

    #[tokio::test]
    async fn registration_signs_in_and_welcomes_the_user() {
        let ctx = TestContext::new();
        ctx.mock(
            "/api/auth/register",
            200,
            json!({ "access_token": "tok-new", "user": test_user() }),
        );

        assert!(submit_register(&ctx.api, &form()).await);

        assert!(ctx.session.is_authenticated());
        assert_eq!(
            ctx.events.messages(),
            vec!["Welcome to BharatAgri AI, Ravi Kumar!"]
        );
        assert_eq!(*ctx.events.navigations.borrow(), vec![PageId::Recommend]);

        let body: serde_json::Value =
            serde_json::from_str(ctx.http().requests.borrow()[0].3.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "Ravi Kumar");
        assert_eq!(body["state"], "");
    }

    #[tokio::test]
    async fn duplicate_email_is_reported() {
        let ctx = TestContext::new();
        ctx.mock(
            "/api/auth/register",
            400,
            json!({ "detail": "Email already registered" }),
        );

        assert!(!submit_register(&ctx.api, &form()).await);
        assert!(!ctx.session.is_authenticated());
        assert_eq!(ctx.events.messages(), vec!["Email already registered"]);
    }
}
