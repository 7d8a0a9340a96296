use leptos::prelude::*;
use leptos::task::spawn_local;

use bharatagri_shared::LoginRequest;

use crate::api::{ApiClient, ToastKind};
use crate::context::use_app;
use crate::web::http::HttpClient;
use crate::web::route::PageId;

pub const FILL_ALL_FIELDS: &str = "Please fill in all fields";

/// 提交登录表单
///
/// 成功时建立会话并跳转到咨询页，返回 `true`。
/// 失败的提示由 `ApiClient` 负责。
pub async fn submit_login<H: HttpClient>(api: &ApiClient<H>, email: &str, password: &str) -> bool {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        api.events().notify(FILL_ALL_FIELDS, ToastKind::Error);
        return false;
    }

    let req = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    match api.call(&req).await {
        Ok(Some(auth)) => {
            api.session().establish(&auth.access_token, &auth.user);
            api.events()
                .notify(&format!("Welcome back, {}!", auth.user.name), ToastKind::Success);
            api.events().navigate(PageId::auth_success_redirect());
            true
        }
        _ => false,
    }
}

pub fn render() -> AnyView {
    view! { <LoginPage /> }.into_any()
}

#[component]
fn LoginPage() -> impl IntoView {
    let ctx = use_app();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        set_is_submitting.set(true);
        spawn_local(async move {
            let api = ctx.api();
            submit_login(&api, &email.get_untracked(), &password.get_untracked()).await;
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-[70vh]">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">{ctx.t("login_title")}</h1>
                    <p class="text-base-content/70">{ctx.t("login_sub")}</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <div class="form-control">
                            <label class="label" for="login-email">
                                <span class="label-text">{ctx.t("email")}</span>
                            </label>
                            <input
                                id="login-email"
                                type="email"
                                placeholder="farmer@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="login-password">
                                <span class="label-text">{ctx.t("password")}</span>
                            </label>
                            <input
                                id="login-password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> }.into_any()
                                } else {
                                    ctx.t("login").into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            {ctx.t("dont_have_account")} " "
                            <a class="link link-primary" on:click=move |_| ctx.navigate(PageId::Register)>
                                {ctx.t("signup")}
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

    #[tokio::test]
    async fn blank_fields_are_rejected_locally() {
        let ctx = TestContext::new();

        assert!(!submit_login(&ctx.api, "  ", "secret").await);
        assert!(!submit_login(&ctx.api, "ravi@example.in", "").await);

        assert_eq!(ctx.http().request_count(), 0);
        assert_eq!(
            ctx.events.messages(),
            vec![FILL_ALL_FIELDS, FILL_ALL_FIELDS]
        );
    }

    #[tokio::test]
    async fn successful_login_establishes_session_and_redirects() {
        let ctx = TestContext::new();
        ctx.mock(
            "/api/auth/login",
            200,
            json!({ "access_token": "tok-9", "user": test_user() }),
        );

        assert!(submit_login(&ctx.api, " ravi@example.in ", "pw").await);

        assert_eq!(ctx.session.token().as_deref(), Some("tok-9"));
        assert_eq!(ctx.session.display_name(), "Ravi Kumar");
        assert_eq!(
            *ctx.events.toasts.borrow(),
            vec![("Welcome back, Ravi Kumar!".to_string(), ToastKind::Success)]
        );
        assert_eq!(*ctx.events.navigations.borrow(), vec![PageId::Recommend]);

        let requests = ctx.http().requests.borrow();
        let body: serde_json::Value =
            serde_json::from_str(requests[0].3.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "email": "ravi@example.in", "password": "pw" }));
    }

    #[tokio::test]
    async fn rejected_login_leaves_session_empty() {
        let ctx = TestContext::new();
        ctx.mock(
            "/api/auth/login",
            401,
            json!({ "detail": "Invalid email or password" }),
        );

        assert!(!submit_login(&ctx.api, "ravi@example.in", "wrong").await);
        assert!(!ctx.session.is_authenticated());
        assert_eq!(ctx.events.messages(), vec!["Invalid email or password"]);
    }
}
