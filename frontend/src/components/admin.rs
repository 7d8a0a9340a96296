//! 管理端页面：注册用户、全部预测与聊天记录
//!
//! 密钥只保存在当前标签页的 session storage 中。

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;

use bharatagri_shared::date::{date_label, datetime_label};
use bharatagri_shared::protocol::{
    AdminChatsRequest, AdminPredictionsRequest, AdminStatsRequest, AdminUsersRequest,
};
use bharatagri_shared::{AdminChat, AdminPrediction, AdminStats, AdminUser};

use crate::api::{ApiClient, ToastKind};
use crate::context::{AppContext, use_app};
use crate::error::ApiResult;
use crate::web::http::HttpClient;

pub const ENTER_KEY: &str = "Please enter the admin key";
pub const INVALID_KEY: &str = "Invalid admin key";
/// 每张表最多显示的行数
pub const ROW_LIMIT: usize = 100;
/// 聊天回复预览的字符数
pub const RESPONSE_PREVIEW: usize = 120;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Table<T> {
    #[default]
    Loading,
    Empty,
    Failed,
    Rows(Vec<T>),
}

impl<T> Table<T> {
    fn build<S>(result: ApiResult<Vec<S>>, row: impl Fn(usize, &S) -> T) -> Self {
        match result {
            Ok(items) if items.is_empty() => Table::Empty,
            Ok(items) => Table::Rows(
                items
                    .iter()
                    .take(ROW_LIMIT)
                    .enumerate()
                    .map(|(i, item)| row(i, item))
                    .collect(),
            ),
            Err(e) => {
                log::warn!("admin table failed: {}", e);
                Table::Failed
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub position: usize,
    pub name: String,
    pub email: String,
    pub state: String,
    pub language: String,
    pub predictions: u64,
    pub joined: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRow {
    pub user_name: String,
    pub user_email: String,
    pub prediction_type: String,
    pub state: String,
    pub result: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatRow {
    pub user_name: String,
    pub message: String,
    pub response: String,
    pub language: String,
    pub date: String,
}

fn or_dash(value: Option<&str>) -> String {
    value
        .filter(|s| !s.is_empty())
        .unwrap_or("-")
        .to_string()
}

fn user_row(index: usize, user: &AdminUser) -> UserRow {
    UserRow {
        position: index + 1,
        name: user.name.clone(),
        email: user.email.clone(),
        state: or_dash(user.state.as_deref()),
        language: user
            .language
            .clone()
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| "en".to_string()),
        predictions: user.prediction_count,
        joined: date_label(user.created_at.as_deref()),
    }
}

fn number_text(value: &Value) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => String::new(),
    }
}

/// 预测结果摘要，格式随 `prediction_type` 变化
pub fn prediction_summary(prediction_type: &str, data: &Value) -> String {
    match prediction_type {
        "full" => {
            let recs = data
                .pointer("/crop_recommendations/recommendations")
                .and_then(Value::as_array)
                .filter(|r| !r.is_empty());
            match recs {
                Some(recs) => recs
                    .iter()
                    .map(|r| {
                        let crop = r.get("crop").and_then(Value::as_str).unwrap_or("-");
                        let pct = r.get("probability").map(number_text).unwrap_or_default();
                        format!("{} ({}%)", crop, pct)
                    })
                    .collect::<Vec<_>>()
                    .join(", "),
                None => "-".to_string(),
            }
        }
        "crop" => data
            .pointer("/recommendations/0/crop")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| "-".to_string()),
        "yield" => match data.get("predicted_yield") {
            Some(v @ Value::Number(n)) if n.as_f64() != Some(0.0) => {
                format!("{} t/ha", number_text(v))
            }
            Some(Value::String(s)) if !s.is_empty() => format!("{} t/ha", s),
            _ => "-".to_string(),
        },
        "risk" => {
            let level = data
                .get("risk_level")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .unwrap_or("-");
            let score = data
                .get("risk_score")
                .map(number_text)
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "0".to_string());
            format!("{} ({}/100)", level, score)
        }
        _ => "-".to_string(),
    }
}

fn prediction_row(_: usize, p: &AdminPrediction) -> PredictionRow {
    PredictionRow {
        user_name: p.user_name.clone(),
        user_email: p.user_email.clone(),
        prediction_type: p.prediction_type.clone(),
        state: or_dash(p.state.as_deref()),
        result: prediction_summary(&p.prediction_type, &p.result_data),
        date: datetime_label(p.created_at.as_deref()),
    }
}

/// 截断到 `RESPONSE_PREVIEW` 个字符，超出时加省略号
pub fn preview(text: &str) -> String {
    if text.chars().count() > RESPONSE_PREVIEW {
        let head: String = text.chars().take(RESPONSE_PREVIEW).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

fn chat_row(_: usize, c: &AdminChat) -> ChatRow {
    ChatRow {
        user_name: c.user_name.clone(),
        message: c.message.clone(),
        response: preview(c.response.as_deref().unwrap_or_default()),
        language: or_dash(c.language.as_deref()),
        date: datetime_label(c.created_at.as_deref()),
    }
}

pub trait AdminPanel {
    fn unlock(&self, stats: AdminStats);
    fn show_users(&self, table: Table<UserRow>);
    fn show_predictions(&self, table: Table<PredictionRow>);
    fn show_chats(&self, table: Table<ChatRow>);
}

/// 用密钥解锁管理端
///
/// 统计接口成功即视为密钥有效，随后并发加载三张表；
/// 任一表失败只影响该表。
pub async fn authenticate<H: HttpClient>(
    api: &ApiClient<H>,
    panel: &impl AdminPanel,
    key: &str,
) -> bool {
    let key = key.trim();
    if key.is_empty() {
        api.events().notify(ENTER_KEY, ToastKind::Error);
        return false;
    }
    api.session().store_admin_key(key);

    let stats = match api.admin(&AdminStatsRequest).await {
        Ok(stats) => stats,
        Err(e) => {
            log::warn!("admin unlock failed: {}", e);
            api.session().forget_admin_key();
            api.events().notify(INVALID_KEY, ToastKind::Error);
            return false;
        }
    };
    log::info!("admin panel unlocked");
    panel.unlock(stats);

    let (users, predictions, chats) = futures::join!(
        api.admin(&AdminUsersRequest),
        api.admin(&AdminPredictionsRequest),
        api.admin(&AdminChatsRequest),
    );
    panel.show_users(Table::build(users, user_row));
    panel.show_predictions(Table::build(predictions, prediction_row));
    panel.show_chats(Table::build(chats, chat_row));
    true
}

#[derive(Clone, Copy)]
pub struct AdminStore {
    pub key_input: RwSignal<String>,
    pub stats: RwSignal<Option<AdminStats>>,
    pub users: RwSignal<Table<UserRow>>,
    pub predictions: RwSignal<Table<PredictionRow>>,
    pub chats: RwSignal<Table<ChatRow>>,
}

impl AdminStore {
    pub fn new() -> Self {
        Self {
            key_input: RwSignal::new(String::new()),
            stats: RwSignal::new(None),
            users: RwSignal::new(Table::Loading),
            predictions: RwSignal::new(Table::Loading),
            chats: RwSignal::new(Table::Loading),
        }
    }

    fn reset(&self) {
        self.key_input.set(String::new());
        self.stats.set(None);
        self.users.set(Table::Loading);
        self.predictions.set(Table::Loading);
        self.chats.set(Table::Loading);
    }
}

struct LivePanel {
    ctx: AppContext,
    generation: u64,
}

impl LivePanel {
    fn live(&self) -> bool {
        self.ctx.is_current(self.generation)
    }
}

impl AdminPanel for LivePanel {
    fn unlock(&self, stats: AdminStats) {
        if self.live() {
            self.ctx.pages.admin.stats.set(Some(stats));
        }
    }

    fn show_users(&self, table: Table<UserRow>) {
        if self.live() {
            self.ctx.pages.admin.users.set(table);
        }
    }

    fn show_predictions(&self, table: Table<PredictionRow>) {
        if self.live() {
            self.ctx.pages.admin.predictions.set(table);
        }
    }

    fn show_chats(&self, table: Table<ChatRow>) {
        if self.live() {
            self.ctx.pages.admin.chats.set(table);
        }
    }
}

fn unlock(ctx: AppContext, key: String) {
    let panel = LivePanel {
        ctx,
        generation: ctx.router().generation(),
    };
    spawn_local(async move {
        let api = ctx.api();
        authenticate(&api, &panel, &key).await;
    });
}

/// 当前标签页已有密钥时自动解锁
pub fn init(ctx: AppContext) {
    if let Some(key) = ctx.session().admin_key() {
        ctx.pages.admin.key_input.set(key.clone());
        unlock(ctx, key);
    }
}

pub fn render() -> AnyView {
    use_app().pages.admin.reset();
    view! { <AdminPage /> }.into_any()
}

#[component]
fn AdminPage() -> impl IntoView {
    let ctx = use_app();
    let store = ctx.pages.admin;

    view! {
        <div class="container mx-auto px-4 py-8">
            <h2 class="text-3xl font-bold">"🛡️ " {ctx.t("admin_title")}</h2>
            <p class="text-base-content/70 mb-6">
                "Developer view: user signups, predictions and chat activity."
            </p>

            <Show
                when=move || store.stats.with(Option::is_some)
                fallback=move || view! { <KeyCard ctx=ctx /> }
            >
                <AdminContent ctx=ctx />
            </Show>
        </div>
    }
}

#[component]
fn KeyCard(ctx: AppContext) -> impl IntoView {
    let key = ctx.pages.admin.key_input;
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        unlock(ctx, key.get_untracked());
    };

    view! {
        <div class="card bg-base-100 shadow-md max-w-xl">
            <form class="card-body" on:submit=on_submit>
                <h3 class="card-title">"🔑 " {ctx.t("admin_key")}</h3>
                <div class="join w-full">
                    <input
                        type="password"
                        class="input input-bordered join-item flex-1"
                        placeholder="Enter admin secret key..."
                        prop:value=move || key.get()
                        on:input=move |ev| key.set(event_target_value(&ev))
                    />
                    <button class="btn btn-primary join-item">{ctx.t("unlock")}</button>
                </div>
            </form>
        </div>
    }
}

#[component]
fn AdminContent(ctx: AppContext) -> impl IntoView {
    let store = ctx.pages.admin;
    let stat = move |f: fn(&AdminStats) -> u64| {
        move || {
            store
                .stats
                .with(|s| s.as_ref().map(f).map(|v| v.to_string()))
                .unwrap_or_else(|| "-".to_string())
        }
    };

    view! {
        <div class="stats stats-vertical lg:stats-horizontal shadow w-full mb-6">
            <div class="stat place-items-center">
                <div class="stat-value text-primary">{stat(|s| s.total_users)}</div>
                <div class="stat-desc">{ctx.t("total_users")}</div>
            </div>
            <div class="stat place-items-center">
                <div class="stat-value text-secondary">{stat(|s| s.total_predictions)}</div>
                <div class="stat-desc">{ctx.t("total_predictions")}</div>
            </div>
            <div class="stat place-items-center">
                <div class="stat-value text-info">{stat(|s| s.total_chats)}</div>
                <div class="stat-desc">{ctx.t("total_chats")}</div>
            </div>
        </div>

        <TableCard title=format!("👥 {}", ctx.t("users"))>
            {move || match store.users.get() {
                Table::Rows(rows) => view! { <UsersTable rows=rows /> }.into_any(),
                other => table_status(&other, "users"),
            }}
        </TableCard>
        <TableCard title=format!("📊 {}", ctx.t("predictions"))>
            {move || match store.predictions.get() {
                Table::Rows(rows) => view! { <PredictionsTable rows=rows /> }.into_any(),
                other => table_status(&other, "predictions"),
            }}
        </TableCard>
        <TableCard title=format!("💬 {}", ctx.t("chats"))>
            {move || match store.chats.get() {
                Table::Rows(rows) => view! { <ChatsTable rows=rows /> }.into_any(),
                other => table_status(&other, "chats"),
            }}
        </TableCard>
    }
}

fn table_status<T>(table: &Table<T>, noun: &str) -> AnyView {
    let text = match table {
        Table::Loading | Table::Rows(_) => "Loading...".to_string(),
        Table::Empty => format!("No {} yet.", noun),
        Table::Failed => format!("Failed to load {}.", noun),
    };
    view! { <p class="text-base-content/60">{text}</p> }.into_any()
}

#[component]
fn TableCard(title: String, children: Children) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-md mb-6">
            <div class="card-body">
                <h3 class="card-title">{title}</h3>
                <div class="overflow-x-auto">{children()}</div>
            </div>
        </div>
    }
}

#[component]
fn UsersTable(rows: Vec<UserRow>) -> impl IntoView {
    view! {
        <table class="table table-zebra table-sm">
            <thead>
                <tr>
                    <th>"#"</th>
                    <th>"Name"</th>
                    <th>"Email"</th>
                    <th>"State"</th>
                    <th>"Lang"</th>
                    <th>"Predictions"</th>
                    <th>"Joined"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|u| {
                        view! {
                            <tr>
                                <td>{u.position}</td>
                                <td class="font-semibold">{u.name}</td>
                                <td>{u.email}</td>
                                <td>{u.state}</td>
                                <td>{u.language}</td>
                                <td>{u.predictions}</td>
                                <td>{u.joined}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

#[component]
fn PredictionsTable(rows: Vec<PredictionRow>) -> impl IntoView {
    view! {
        <table class="table table-zebra table-sm">
            <thead>
                <tr>
                    <th>"User"</th>
                    <th>"Type"</th>
                    <th>"State"</th>
                    <th>"Top Crop / Result"</th>
                    <th>"Date"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|p| {
                        view! {
                            <tr>
                                <td>
                                    <div class="font-semibold">{p.user_name}</div>
                                    <div class="text-xs text-base-content/60">{p.user_email}</div>
                                </td>
                                <td>{p.prediction_type}</td>
                                <td>{p.state}</td>
                                <td class="max-w-xs">{p.result}</td>
                                <td>{p.date}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

#[component]
fn ChatsTable(rows: Vec<ChatRow>) -> impl IntoView {
    view! {
        <table class="table table-zebra table-sm">
            <thead>
                <tr>
                    <th>"User"</th>
                    <th>"Message"</th>
                    <th>"Response"</th>
                    <th>"Lang"</th>
                    <th>"Date"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|c| {
                        view! {
                            <tr>
                                <td class="font-semibold">{c.user_name}</td>
                                <td class="max-w-[200px]">{c.message}</td>
                                <td class="max-w-xs text-xs">{c.response}</td>
                                <td>{c.language}</td>
                                <td>{c.date}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::TestContext;
    use crate::store::{ADMIN_KEY_KEY, StorageScope};
    use bharatagri_shared::HEADER_ADMIN_KEY;
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingPanel {
        stats: RefCell<Option<AdminStats>>,
        users: RefCell<Option<Table<UserRow>>>,
        predictions: RefCell<Option<Table<PredictionRow>>>,
        chats: RefCell<Option<Table<ChatRow>>>,
    }

    impl AdminPanel for RecordingPanel {
        fn unlock(&self, stats: AdminStats) {
            *self.stats.borrow_mut() = Some(stats);
        }
        fn show_users(&self, table: Table<UserRow>) {
            *self.users.borrow_mut() = Some(table);
        }
        fn show_predictions(&self, table: Table<PredictionRow>) {
            *self.predictions.borrow_mut() = Some(table);
        }
        fn show_chats(&self, table: Table<ChatRow>) {
            *self.chats.borrow_mut() = Some(table);
        }
    }

    fn mock_stats(ctx: &TestContext) {
        ctx.mock(
            "/api/admin/stats",
            200,
            json!({ "total_users": 3, "total_predictions": 12, "total_chats": 5 }),
        );
    }

    #[tokio::test]
    async fn empty_key_is_rejected_locally() {
        let ctx = TestContext::new();
        let panel = RecordingPanel::default();

        assert!(!authenticate(&ctx.api, &panel, "   ").await);
        assert_eq!(ctx.http().request_count(), 0);
        assert_eq!(ctx.events.messages(), vec![ENTER_KEY]);
    }

    #[tokio::test]
    async fn valid_key_unlocks_and_loads_all_tables() {
        let ctx = TestContext::new();
        mock_stats(&ctx);
        ctx.mock(
            "/api/admin/users",
            200,
            json!([{ "id": 1, "name": "Ravi", "email": "ravi@example.in", "created_at": "2024-05-02T09:00:00", "prediction_count": 4 }]),
        );
        ctx.mock("/api/admin/predictions", 200, json!([]));
        ctx.mock_unreachable("/api/admin/chats");
        let panel = RecordingPanel::default();

        assert!(authenticate(&ctx.api, &panel, " secret ").await);

        assert_eq!(panel.stats.borrow().as_ref().unwrap().total_predictions, 12);
        let users = panel.users.borrow().clone().unwrap();
        let Table::Rows(rows) = users else {
            panic!("expected rows, got {:?}", users);
        };
        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[0].state, "-");
        assert_eq!(rows[0].language, "en");
        assert_eq!(rows[0].joined, "02/05/2024");
        assert_eq!(*panel.predictions.borrow(), Some(Table::Empty));
        assert_eq!(*panel.chats.borrow(), Some(Table::Failed));

        assert_eq!(ctx.session.admin_key().as_deref(), Some("secret"));
        let requests = ctx.http().requests.borrow();
        assert_eq!(requests.len(), 4);
        assert!(
            requests
                .iter()
                .all(|(_, _, headers, _)| headers.get(HEADER_ADMIN_KEY).map(String::as_str)
                    == Some("secret"))
        );
    }

    #[tokio::test]
    async fn rejected_key_is_forgotten() {
        let ctx = TestContext::new();
        ctx.mock("/api/admin/stats", 403, json!({ "detail": "Forbidden" }));
        let panel = RecordingPanel::default();

        assert!(!authenticate(&ctx.api, &panel, "wrong").await);

        assert!(panel.stats.borrow().is_none());
        assert!(!ctx.store.contains(StorageScope::Session, ADMIN_KEY_KEY));
        assert_eq!(ctx.events.messages(), vec![INVALID_KEY]);
        assert_eq!(ctx.paths(), vec!["/api/admin/stats"]);
    }

    #[tokio::test]
    async fn unreachable_server_also_clears_key() {
        let ctx = TestContext::new();
        ctx.mock_unreachable("/api/admin/stats");
        let panel = RecordingPanel::default();

        assert!(!authenticate(&ctx.api, &panel, "secret").await);
        assert!(ctx.session.admin_key().is_none());
        assert_eq!(ctx.events.messages(), vec![INVALID_KEY]);
    }

    #[tokio::test]
    async fn tables_are_capped() {
        let ctx = TestContext::new();
        mock_stats(&ctx);
        ctx.mock("/api/admin/users", 200, json!([]));
        let chats: Vec<Value> = (0..130)
            .map(|i| json!({ "id": i, "user_name": "Asha", "message": "hi", "response": "ok" }))
            .collect();
        ctx.mock("/api/admin/chats", 200, json!(chats));
        ctx.mock("/api/admin/predictions", 200, json!([]));
        let panel = RecordingPanel::default();

        authenticate(&ctx.api, &panel, "secret").await;

        let Some(Table::Rows(rows)) = panel.chats.borrow().clone() else {
            panic!("expected chat rows");
        };
        assert_eq!(rows.len(), ROW_LIMIT);
        assert_eq!(rows[0].language, "-");
        assert_eq!(rows[0].date, "-");
    }

    #[test]
    fn chat_preview_truncates_by_character() {
        let long = "फसल".repeat(50);
        let short = preview(&long);
        assert!(short.ends_with("..."));
        assert_eq!(short.chars().count(), RESPONSE_PREVIEW + 3);
        assert_eq!(preview("Sow in June."), "Sow in June.");
    }

    #[test]
    fn prediction_summaries() {
        let full = json!({
            "crop_recommendations": { "recommendations": [
                { "crop": "Rice", "probability": 72.5 },
                { "crop": "Maize", "probability": 20 }
            ] }
        });
        assert_eq!(prediction_summary("full", &full), "Rice (72.5%), Maize (20%)");
        assert_eq!(
            prediction_summary("crop", &json!({ "recommendations": [{ "crop": "Jowar" }] })),
            "Jowar"
        );
        assert_eq!(
            prediction_summary("yield", &json!({ "predicted_yield": 3.4 })),
            "3.4 t/ha"
        );
        assert_eq!(prediction_summary("yield", &json!({})), "-");
        assert_eq!(
            prediction_summary("risk", &json!({ "risk_level": "High", "risk_score": 81 })),
            "High (81/100)"
        );
        assert_eq!(prediction_summary("risk", &json!({})), "- (0/100)");
        assert_eq!(prediction_summary("full", &json!({})), "-");
        assert_eq!(prediction_summary("other", &json!({})), "-");
    }
}
