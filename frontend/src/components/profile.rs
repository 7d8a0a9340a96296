use leptos::prelude::*;
use leptos::task::spawn_local;

use bharatagri_shared::User;
use bharatagri_shared::protocol::MeRequest;

use crate::api::{ApiClient, ToastKind};
use crate::auth::{AuthSession, PLACEHOLDER_NAME};
use crate::context::{AppContext, use_app};
use crate::i18n::Language;
use crate::web::http::HttpClient;

pub const PROFILE_SAVED: &str = "Profile updated successfully!";

/// 资料表单中可编辑的字段
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    pub state: String,
    pub language: String,
}

impl ProfileForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            state: user.state.clone().unwrap_or_default(),
            language: user
                .language
                .clone()
                .unwrap_or_else(|| Language::En.code().to_string()),
        }
    }
}

/// 从服务端刷新用户记录。失败时保留本地记录
pub async fn refresh_profile<H: HttpClient>(api: &ApiClient<H>) -> Option<User> {
    match api.call(&MeRequest).await {
        Ok(Some(user)) => {
            api.session().update_user(&user);
            Some(user)
        }
        Ok(None) => None,
        Err(e) => {
            log::warn!("profile refresh failed: {}", e);
            None
        }
    }
}

/// 把表单写回本地用户记录，返回新的界面语言
///
/// 没有用户记录时不做任何修改
pub fn save_profile(session: &AuthSession, form: &ProfileForm) -> Option<Language> {
    let mut user = session.current_user()?;
    user.name = form.name.trim().to_string();
    user.state = Some(form.state.trim().to_string());
    user.language = Some(form.language.clone());
    session.update_user(&user);
    Some(Language::from_code(&form.language).unwrap_or_default())
}

#[derive(Clone, Copy)]
pub struct ProfileStore {
    pub form: RwSignal<ProfileForm>,
    pub display_name: RwSignal<String>,
    pub email: RwSignal<String>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(ProfileForm::default()),
            display_name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
        }
    }

    fn load(&self, user: Option<&User>) {
        self.form
            .set(user.map(ProfileForm::from_user).unwrap_or_default());
        self.display_name.set(
            user.map(|u| u.name.clone())
                .unwrap_or_else(|| PLACEHOLDER_NAME.to_string()),
        );
        self.email
            .set(user.map(|u| u.email.clone()).unwrap_or_default());
    }
}

pub fn init(ctx: AppContext) {
    let generation = ctx.router().generation();
    spawn_local(async move {
        let api = ctx.api();
        if let Some(user) = refresh_profile(&api).await {
            if ctx.is_current(generation) {
                ctx.pages.profile.load(Some(&user));
            }
        }
    });
}

pub fn render() -> AnyView {
    let ctx = use_app();
    ctx.pages.profile.load(ctx.session().current_user().as_ref());
    view! { <ProfilePage /> }.into_any()
}

#[component]
fn ProfilePage() -> impl IntoView {
    let ctx = use_app();
    let store = ctx.pages.profile;
    let form = store.form;

    let on_save = move |_| {
        let values = form.get_untracked();
        let session = ctx.session();
        if let Some(lang) = save_profile(&session, &values) {
            ctx.router().set_language(lang);
            ctx.ui.show_toast(PROFILE_SAVED, ToastKind::Success);
        }
    };

    view! {
        <div class="container mx-auto px-4 py-8 max-w-xl">
            <h2 class="text-3xl font-bold mb-6">{ctx.t("profile_title")}</h2>
            <div class="card bg-base-100 shadow-md">
                <div class="card-body gap-4">
                    <div class="flex items-center gap-4">
                        <div class="avatar placeholder">
                            <div class="bg-primary text-primary-content rounded-full w-16 text-3xl flex items-center justify-center">
                                "👤"
                            </div>
                        </div>
                        <div>
                            <h3 class="text-xl font-semibold">{move || store.display_name.get()}</h3>
                            <p class="text-sm text-base-content/60">{move || store.email.get()}</p>
                        </div>
                    </div>

                    <label class="form-control">
                        <span class="label-text">{ctx.t("name")}</span>
                        <input
                            type="text"
                            class="input input-bordered"
                            prop:value=move || form.with(|f| f.name.clone())
                            on:input=move |ev| {
                                let v = event_target_value(&ev);
                                form.update(|f| f.name = v);
                            }
                        />
                    </label>
                    <label class="form-control">
                        <span class="label-text">{ctx.t("email")}</span>
                        <input type="email" class="input input-bordered" disabled prop:value=move || store.email.get() />
                    </label>
                    <label class="form-control">
                        <span class="label-text">{ctx.t("state")}</span>
                        <input
                            type="text"
                            class="input input-bordered"
                            prop:value=move || form.with(|f| f.state.clone())
                            on:input=move |ev| {
                                let v = event_target_value(&ev);
                                form.update(|f| f.state = v);
                            }
                        />
                    </label>
                    <label class="form-control">
                        <span class="label-text">{ctx.t("preferred_language")}</span>
                        <select
                            class="select select-bordered"
                            on:change=move |ev| {
                                let v = event_target_value(&ev);
                                form.update(|f| f.language = v);
                            }
                        >
                            {Language::ALL
                                .into_iter()
                                .map(|lang| {
                                    view! {
                                        <option
                                            value=lang.code()
                                            selected=move || form.with(|f| f.language == lang.code())
                                        >
                                            {lang.native_name()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </label>
                    <button class="btn btn-primary" on:click=on_save>{ctx.t("save_changes")}</button>
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

    #[test]
    fn save_updates_local_record_and_returns_language() {
        let ctx = TestContext::signed_in();
        let form = ProfileForm {
            name: " Ravi K ".into(),
            state: "Punjab".into(),
            language: "pa".into(),
        };

        assert_eq!(save_profile(&ctx.session, &form), Some(Language::Pa));

        let user = ctx.session.current_user().unwrap();
        assert_eq!(user.name, "Ravi K");
        assert_eq!(user.state.as_deref(), Some("Punjab"));
        assert_eq!(user.language.as_deref(), Some("pa"));
        assert_eq!(user.email, "ravi@example.in");
    }

    #[test]
    fn save_without_user_record_is_a_no_op() {
        let ctx = TestContext::new();
        assert_eq!(save_profile(&ctx.session, &ProfileForm::default()), None);
        assert!(ctx.session.current_user().is_none());
    }

    #[test]
    fn form_defaults_language_to_english() {
        let mut user = test_user();
        user.language = None;
        user.state = None;
        let form = ProfileForm::from_user(&user);
        assert_eq!(form.language, "en");
        assert_eq!(form.state, "");
    }

    #[tokio::test]
    async fn refresh_replaces_stored_user() {
        let ctx = TestContext::signed_in();
        let mut fresh = test_user();
        fresh.name = "Ravi Kumar Patil".into();
        ctx.mock("/api/auth/me", 200, json!(fresh));

        let user = refresh_profile(&ctx.api).await.unwrap();

        assert_eq!(user.name, "Ravi Kumar Patil");
        assert_eq!(ctx.session.display_name(), "Ravi Kumar Patil");
    }

    #[tokio::test]
    async fn refresh_failure_keeps_local_record() {
        let ctx = TestContext::signed_in();
        ctx.mock_unreachable("/api/auth/me");

        assert!(refresh_profile(&ctx.api).await.is_none());
        assert_eq!(ctx.session.display_name(), "Ravi Kumar");
    }
}
