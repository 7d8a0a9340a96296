//! 农业助手聊天页面
//!
//! 回复中的 `**粗体**` 解析为类型化片段后渲染为 `<strong>`，不经过 innerHTML。

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use bharatagri_shared::ChatRequest;

use crate::api::ApiClient;
use crate::components::advisory::PendingPrediction;
use crate::context::{AppContext, use_app};
use crate::i18n::{Language, translate_in};
use crate::web::http::HttpClient;

/// 快捷问题 (按钮文字, 发送内容)
pub const QUICK_PROMPTS: [(&str, &str); 6] = [
    ("What is NPK?", "What is NPK?"),
    ("Improve Soil", "How to improve soil?"),
    ("Gov Schemes", "Government schemes"),
    ("About Rice", "Tell me about Rice"),
    ("Maharashtra", "Tell me about Maharashtra"),
    ("Soil Health Card", "Soil Health Card"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Bold(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub segments: Vec<Segment>,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: &str) -> Self {
        Self {
            sender,
            segments: parse_bold(text),
        }
    }
}

/// 拆分 `**粗体**` 片段。粗体不跨行，未闭合的 `**` 原样保留
pub fn parse_bold(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while let Some(start) = rest.find("**") {
        let after = &rest[start + 2..];
        let line = &after[..after.find('\n').unwrap_or(after.len())];
        match line.find("**") {
            Some(end) => {
                plain.push_str(&rest[..start]);
                if !plain.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut plain)));
                }
                segments.push(Segment::Bold(after[..end].to_string()));
                rest = &after[end + 2..];
            }
            None => {
                plain.push_str(&rest[..start + 1]);
                rest = &rest[start + 1..];
            }
        }
    }

    plain.push_str(rest);
    if !plain.is_empty() {
        segments.push(Segment::Text(plain));
    }
    segments
}

pub trait ChatPanel {
    fn append(&self, message: ChatMessage);
}

/// 发送一条消息
///
/// 空消息被忽略并返回 `false`。请求失败时追加一条道歉回复
pub async fn send_message<H: HttpClient>(
    api: &ApiClient<H>,
    panel: &impl ChatPanel,
    pending: &PendingPrediction,
    language: Language,
    raw: &str,
) -> bool {
    let message = raw.trim();
    if message.is_empty() {
        return false;
    }
    panel.append(ChatMessage::new(Sender::User, message));

    let req = ChatRequest {
        message: message.to_string(),
        language: language.code().to_string(),
        context: pending.chat_context(),
    };
    match api.call(&req).await {
        Ok(Some(reply)) => {
            if let Some(text) = reply.response.filter(|r| !r.is_empty()) {
                panel.append(ChatMessage::new(Sender::Bot, &text));
            }
        }
        Ok(None) => {}
        Err(e) => {
            log::warn!("chat request failed: {}", e);
            panel.append(ChatMessage::new(
                Sender::Bot,
                translate_in(language, "chat_error"),
            ));
        }
    }
    true
}

#[derive(Clone, Copy)]
pub struct ChatStore {
    pub messages: RwSignal<Vec<ChatMessage>>,
    pub input: RwSignal<String>,
}

impl ChatStore {
    pub fn new() -> Self {
        Self {
            messages: RwSignal::new(Vec::new()),
            input: RwSignal::new(String::new()),
        }
    }
}

struct LivePanel {
    ctx: AppContext,
    generation: u64,
}

impl ChatPanel for LivePanel {
    fn append(&self, message: ChatMessage) {
        if self.ctx.is_current(self.generation) {
            self.ctx.pages.chat.messages.update(|m| m.push(message));
        }
    }
}

fn send(ctx: AppContext, text: String) {
    let panel = LivePanel {
        ctx,
        generation: ctx.router().generation(),
    };
    spawn_local(async move {
        let api = ctx.api();
        let pending: Rc<PendingPrediction> = ctx.prediction();
        send_message(&api, &panel, &pending, ctx.router().language(), &text).await;
    });
}

pub fn render() -> AnyView {
    let ctx = use_app();
    let store = ctx.pages.chat;
    store
        .messages
        .set(vec![ChatMessage::new(Sender::Bot, ctx.t("chat_welcome"))]);
    store.input.set(String::new());
    view! { <ChatbotPage /> }.into_any()
}

#[component]
fn ChatbotPage() -> impl IntoView {
    let ctx = use_app();
    let store = ctx.pages.chat;

    let submit = move || {
        let text = store.input.get_untracked();
        store.input.set(String::new());
        send(ctx, text);
    };

    view! {
        <div class="container mx-auto px-4 py-8 max-w-3xl">
            <h2 class="text-3xl font-bold">{ctx.t("chat_title")}</h2>
            <p class="text-base-content/70 mb-4">{ctx.t("chat_sub")}</p>

            <div class="flex flex-wrap gap-2 mb-4">
                {QUICK_PROMPTS
                    .into_iter()
                    .map(|(label, message)| {
                        view! {
                            <button
                                class="btn btn-sm btn-outline btn-primary"
                                on:click=move |_| send(ctx, message.to_string())
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="card bg-base-100 shadow-md">
                <div class="card-body">
                    <div class="flex flex-col gap-2 h-[28rem] overflow-y-auto">
                        {move || {
                            store
                                .messages
                                .get()
                                .into_iter()
                                .map(|message| view! { <MessageBubble message=message /> })
                                .collect_view()
                        }}
                    </div>
                    <form
                        class="flex gap-2 mt-4"
                        on:submit=move |ev: leptos::web_sys::SubmitEvent| {
                            ev.prevent_default();
                            submit();
                        }
                    >
                        <input
                            type="text"
                            class="input input-bordered flex-1"
                            placeholder=ctx.t("chat_placeholder")
                            prop:value=store.input
                            on:input=move |ev| store.input.set(event_target_value(&ev))
                        />
                        <button type="submit" class="btn btn-primary">{ctx.t("send")}</button>
                    </form>
                </div>
            </div>
        </div>
    }
}

#[component]
fn MessageBubble(message: ChatMessage) -> impl IntoView {
    let (align, bubble, avatar) = match message.sender {
        Sender::User => ("chat chat-end", "chat-bubble chat-bubble-primary whitespace-pre-line", "👤"),
        Sender::Bot => ("chat chat-start", "chat-bubble whitespace-pre-line", "🌾"),
    };

    view! {
        <div class=align>
            <div class="chat-image text-2xl">{avatar}</div>
            <div class=bubble>
                {message
                    .segments
                    .into_iter()
                    .map(|segment| match segment {
                        Segment::Text(text) => text.into_any(),
                        Segment::Bold(text) => view! { <strong>{text}</strong> }.into_any(),
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::TestContext;
    use crate::web::route::PageId;
    use bharatagri_shared::PredictionRequest;
    use bharatagri_shared::PredictionResponse;
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingPanel {
        messages: RefCell<Vec<ChatMessage>>,
    }

    impl ChatPanel for RecordingPanel {
        fn append(&self, message: ChatMessage) {
            self.messages.borrow_mut().push(message);
        }
    }

    impl RecordingPanel {
        fn senders(&self) -> Vec<Sender> {
            self.messages.borrow().iter().map(|m| m.sender).collect()
        }
    }

    fn sent_body(ctx: &TestContext) -> serde_json::Value {
        serde_json::from_str(ctx.http().requests.borrow()[0].3.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn bold_segments_are_typed() {
        assert_eq!(
            parse_bold("Use **urea** and **DAP** wisely"),
            vec![
                Segment::Text("Use ".into()),
                Segment::Bold("urea".into()),
                Segment::Text(" and ".into()),
                Segment::Bold("DAP".into()),
                Segment::Text(" wisely".into()),
            ]
        );
        assert_eq!(
            parse_bold("<script>alert(1)</script>"),
            vec![Segment::Text("<script>alert(1)</script>".into())]
        );
    }

    #[test]
    fn unterminated_or_multiline_markers_stay_literal() {
        assert_eq!(
            parse_bold("**open\nclose**"),
            vec![Segment::Text("**open\nclose**".into())]
        );
        assert_eq!(parse_bold("a ** b"), vec![Segment::Text("a ** b".into())]);
        assert!(parse_bold("").is_empty());
    }

    #[tokio::test]
    async fn blank_messages_are_not_sent() {
        let ctx = TestContext::signed_in();
        let panel = RecordingPanel::default();

        let sent = send_message(
            &ctx.api,
            &panel,
            &PendingPrediction::default(),
            Language::En,
            "   ",
        )
        .await;

        assert!(!sent);
        assert_eq!(ctx.http().request_count(), 0);
        assert!(panel.messages.borrow().is_empty());
    }

    #[tokio::test]
    async fn reply_is_appended_after_user_message() {
        let ctx = TestContext::signed_in();
        ctx.mock(
            "/api/chatbot/message",
            200,
            json!({ "response": "NPK stands for **Nitrogen**, Phosphorus, Potassium." }),
        );
        let panel = RecordingPanel::default();

        send_message(
            &ctx.api,
            &panel,
            &PendingPrediction::default(),
            Language::Hi,
            " What is NPK? ",
        )
        .await;

        assert_eq!(panel.senders(), vec![Sender::User, Sender::Bot]);
        assert_eq!(
            panel.messages.borrow()[0].segments,
            vec![Segment::Text("What is NPK?".into())]
        );
        assert_eq!(
            panel.messages.borrow()[1].segments[1],
            Segment::Bold("Nitrogen".into())
        );

        let body = sent_body(&ctx);
        assert_eq!(body["message"], "What is NPK?");
        assert_eq!(body["language"], "hi");
        assert_eq!(body["context"], json!({}));
    }

    #[tokio::test]
    async fn last_prediction_is_sent_as_context() {
        let ctx = TestContext::signed_in();
        ctx.mock("/api/chatbot/message", 200, json!({ "response": "ok" }));
        let pending = PendingPrediction::default();
        pending.store(
            PredictionRequest {
                n: 90.0,
                p: 42.0,
                k: 43.0,
                temperature: 25.0,
                humidity: 80.0,
                ph: 6.5,
                rainfall: 1000.0,
                soil_type: "Black".into(),
                state: "Maharashtra".into(),
                district: "Pune".into(),
                season: "Kharif".into(),
                area: 2.0,
            },
            PredictionResponse::default(),
        );
        let panel = RecordingPanel::default();

        send_message(&ctx.api, &panel, &pending, Language::En, "Which fertilizer?").await;

        let body = sent_body(&ctx);
        assert_eq!(body["context"]["state"], "Maharashtra");
        assert_eq!(body["context"]["area"], 2.0);
    }

    #[tokio::test]
    async fn failure_appends_apology() {
        let ctx = TestContext::signed_in();
        ctx.mock_unreachable("/api/chatbot/message");
        let panel = RecordingPanel::default();

        send_message(
            &ctx.api,
            &panel,
            &PendingPrediction::default(),
            Language::En,
            "Hello",
        )
        .await;

        assert_eq!(panel.senders(), vec![Sender::User, Sender::Bot]);
        assert_eq!(
            panel.messages.borrow()[1].segments,
            vec![Segment::Text(
                "Sorry, I couldn't process your request. Please try again.".into()
            )]
        );
    }

    #[tokio::test]
    async fn expired_session_appends_nothing() {
        let ctx = TestContext::signed_in();
        ctx.mock("/api/chatbot/message", 401, json!({ "detail": "expired" }));
        let panel = RecordingPanel::default();

        send_message(
            &ctx.api,
            &panel,
            &PendingPrediction::default(),
            Language::En,
            "Hello",
        )
        .await;

        assert_eq!(panel.senders(), vec![Sender::User]);
        assert_eq!(*ctx.events.navigations.borrow(), vec![PageId::Login]);
    }
}
