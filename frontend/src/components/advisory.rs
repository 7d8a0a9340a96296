//! 作物与产量咨询页面
//!
//! 流程函数 (`load_states` / `on_state_change` / `submit_prediction`) 只依赖
//! `ApiClient` 与 `AdvisoryPanel`，不接触 DOM。
//! 浏览器中的面板实现是 `LivePanel`，页面不再是当前页面时忽略写入；
//! 州选择的写入再经 `SelectionPanel` 过滤，只保留最新一次选择。

mod form_state;
mod results;

use std::cell::{Cell, RefCell};

use leptos::prelude::*;
use leptos::task::spawn_local;

use bharatagri_shared::protocol::{
    ClimateRequest, DistrictsRequest, SoilTypesRequest, StatesRequest,
};
use bharatagri_shared::{PredictionRequest, PredictionResponse};

use crate::api::{ApiClient, ToastKind};
use crate::context::{AppContext, use_app};
use crate::web::http::HttpClient;

pub use form_state::{ClimateFill, FILL_REQUIRED, FormValues, MissingField, SEASONS};
use results::PredictionResults;

// =========================================================
// 最近一次预测
// =========================================================

/// 最近一次成功提交的表单与结果，聊天请求以它作为上下文
#[derive(Default)]
pub struct PendingPrediction {
    inner: RefCell<Option<(PredictionRequest, PredictionResponse)>>,
}

impl PendingPrediction {
    pub fn store(&self, request: PredictionRequest, response: PredictionResponse) {
        *self.inner.borrow_mut() = Some((request, response));
    }

    pub fn request(&self) -> Option<PredictionRequest> {
        self.inner.borrow().as_ref().map(|(req, _)| req.clone())
    }

    /// 聊天上下文：最近的表单数据，没有时为 `{}`
    pub fn chat_context(&self) -> serde_json::Value {
        self.request()
            .and_then(|req| serde_json::to_value(req).ok())
            .unwrap_or_else(|| serde_json::json!({}))
    }
}

// =========================================================
// 面板
// =========================================================

/// 咨询页面上流程可以写入的部分
pub trait AdvisoryPanel {
    fn set_states(&self, states: Vec<String>);
    fn set_districts(&self, districts: Vec<String>);
    fn set_soil_types(&self, soil_types: Vec<String>);
    fn apply_climate(&self, fill: ClimateFill);
    /// 参考数据加载失败的非阻塞提示
    fn show_notice(&self);
    /// 返回 `false` 表示已有预测在进行中
    fn begin_prediction(&self) -> bool;
    fn end_prediction(&self);
    fn show_loading(&self);
    fn hide_loading(&self);
    fn show_result(&self, response: &PredictionResponse, area: f64);
}

/// 州选择序号，每次选择领取一个新号
#[derive(Debug, Default)]
pub struct StateSelections {
    latest: Cell<u64>,
}

impl StateSelections {
    pub fn next(&self) -> u64 {
        let ticket = self.latest.get() + 1;
        self.latest.set(ticket);
        ticket
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        self.latest.get() == ticket
    }
}

/// 绑定到某一次州选择的面板
///
/// 之后又选了别的州时，这次选择的区县、土壤、气候和提示写入都被丢弃。
pub struct SelectionPanel<'a, P> {
    inner: &'a P,
    selections: &'a StateSelections,
    ticket: u64,
}

impl<'a, P: AdvisoryPanel> SelectionPanel<'a, P> {
    pub fn new(inner: &'a P, selections: &'a StateSelections, ticket: u64) -> Self {
        Self {
            inner,
            selections,
            ticket,
        }
    }

    fn latest(&self) -> bool {
        let latest = self.selections.is_latest(self.ticket);
        if !latest {
            log::debug!("dropping reference data from superseded state selection");
        }
        latest
    }
}

impl<P: AdvisoryPanel> AdvisoryPanel for SelectionPanel<'_, P> {
    fn set_states(&self, states: Vec<String>) {
        self.inner.set_states(states);
    }

    fn set_districts(&self, districts: Vec<String>) {
        if self.latest() {
            self.inner.set_districts(districts);
        }
    }

    fn set_soil_types(&self, soil_types: Vec<String>) {
        if self.latest() {
            self.inner.set_soil_types(soil_types);
        }
    }

    fn apply_climate(&self, fill: ClimateFill) {
        if self.latest() {
            self.inner.apply_climate(fill);
        }
    }

    fn show_notice(&self) {
        if self.latest() {
            self.inner.show_notice();
        }
    }

    fn begin_prediction(&self) -> bool {
        self.inner.begin_prediction()
    }

    fn end_prediction(&self) {
        self.inner.end_prediction();
    }

    fn show_loading(&self) {
        self.inner.show_loading();
    }

    fn hide_loading(&self) {
        self.inner.hide_loading();
    }

    fn show_result(&self, response: &PredictionResponse, area: f64) {
        self.inner.show_result(response, area);
    }
}

/// 获取州列表。失败返回 `None`
pub async fn fetch_states<H: HttpClient>(api: &ApiClient<H>) -> Option<Vec<String>> {
    match api.call(&StatesRequest).await {
        Ok(Some(resp)) => Some(resp.states),
        Ok(None) => None,
        Err(e) => {
            log::warn!("failed to load states: {}", e);
            None
        }
    }
}

pub async fn load_states<H: HttpClient>(api: &ApiClient<H>, panel: &impl AdvisoryPanel) {
    match fetch_states(api).await {
        Some(states) => panel.set_states(states),
        None => panel.show_notice(),
    }
}

/// 州改变时并发加载区县、土壤类型与气候。三者的失败互不影响
pub async fn on_state_change<H: HttpClient>(
    api: &ApiClient<H>,
    panel: &impl AdvisoryPanel,
    state: &str,
) {
    if state.is_empty() {
        return;
    }

    let districts_req = DistrictsRequest {
        state: state.to_string(),
    };
    let soil_req = SoilTypesRequest {
        state: state.to_string(),
    };
    let climate_req = ClimateRequest {
        state: state.to_string(),
    };
    let (districts, soil_types, climate) = futures::join!(
        api.call(&districts_req),
        api.call(&soil_req),
        api.call(&climate_req)
    );

    let mut failed = false;

    match districts {
        Ok(Some(resp)) => panel.set_districts(resp.districts),
        _ => {
            panel.set_districts(Vec::new());
            failed = true;
        }
    }

    match soil_types {
        Ok(Some(resp)) => panel.set_soil_types(resp.soil_types),
        _ => {
            panel.set_soil_types(Vec::new());
            failed = true;
        }
    }

    match climate {
        Ok(Some(resp)) => {
            if let Some(c) = resp.climate {
                panel.apply_climate(ClimateFill::from(&c));
            }
        }
        _ => failed = true,
    }

    if failed {
        log::warn!("reference data for {} is incomplete", state);
        panel.show_notice();
    }
}

/// 提交预测
///
/// 成功时保存到 `pending` 并渲染结果；失败时只隐藏加载遮罩
pub async fn submit_prediction<H: HttpClient>(
    api: &ApiClient<H>,
    panel: &impl AdvisoryPanel,
    pending: &PendingPrediction,
    values: &FormValues,
) -> bool {
    let request = match values.to_request() {
        Ok(req) => req,
        Err(missing) => {
            log::debug!("prediction form incomplete: {}", missing);
            api.events().notify(FILL_REQUIRED, ToastKind::Error);
            return false;
        }
    };

    if !panel.begin_prediction() {
        log::debug!("prediction already in flight");
        return false;
    }

    panel.show_loading();
    let result = api.call(&request).await;
    panel.hide_loading();
    panel.end_prediction();

    match result {
        Ok(Some(response)) => {
            panel.show_result(&response, request.area);
            pending.store(request, response);
            true
        }
        _ => false,
    }
}

// =========================================================
// 页面状态
// =========================================================

#[derive(Clone, Copy)]
pub struct AdvisoryStore {
    pub states: RwSignal<Vec<String>>,
    pub districts: RwSignal<Vec<String>>,
    pub soil_types: RwSignal<Vec<String>>,
    pub form: RwSignal<FormValues>,
    pub notice: RwSignal<bool>,
    pub submitting: RwSignal<bool>,
    pub result: RwSignal<Option<(PredictionResponse, f64)>>,
}

impl AdvisoryStore {
    pub fn new() -> Self {
        Self {
            states: RwSignal::new(Vec::new()),
            districts: RwSignal::new(Vec::new()),
            soil_types: RwSignal::new(Vec::new()),
            form: RwSignal::new(FormValues::default()),
            notice: RwSignal::new(false),
            submitting: RwSignal::new(false),
            result: RwSignal::new(None),
        }
    }

    fn reset(&self) {
        self.states.set(Vec::new());
        self.districts.set(Vec::new());
        self.soil_types.set(Vec::new());
        self.form.set(FormValues::default());
        self.notice.set(false);
        self.submitting.set(false);
        self.result.set(None);
    }
}

/// 绑定到某次渲染的面板
struct LivePanel {
    ctx: AppContext,
    generation: u64,
}

impl LivePanel {
    fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            generation: ctx.router().generation(),
        }
    }

    fn store(&self) -> Option<AdvisoryStore> {
        self.ctx
            .is_current(self.generation)
            .then_some(self.ctx.pages.advisory)
    }
}

impl AdvisoryPanel for LivePanel {
    fn set_states(&self, states: Vec<String>) {
        if let Some(store) = self.store() {
            store.states.set(states);
        }
    }

    fn set_districts(&self, districts: Vec<String>) {
        if let Some(store) = self.store() {
            store.form.update(|f| f.district.clear());
            store.districts.set(districts);
        }
    }

    fn set_soil_types(&self, soil_types: Vec<String>) {
        if let Some(store) = self.store() {
            store.form.update(|f| f.soil_type.clear());
            store.soil_types.set(soil_types);
        }
    }

    fn apply_climate(&self, fill: ClimateFill) {
        if let Some(store) = self.store() {
            store.form.update(|f| f.apply_climate(&fill));
        }
    }

    fn show_notice(&self) {
        if let Some(store) = self.store() {
            store.notice.set(true);
        }
    }

    fn begin_prediction(&self) -> bool {
        let submitting = self.ctx.pages.advisory.submitting;
        if submitting.get_untracked() {
            return false;
        }
        submitting.set(true);
        true
    }

    fn end_prediction(&self) {
        self.ctx.pages.advisory.submitting.set(false);
    }

    fn show_loading(&self) {
        self.ctx.ui.show_loading(self.ctx.t("loading"));
    }

    fn hide_loading(&self) {
        self.ctx.ui.hide_loading();
    }

    fn show_result(&self, response: &PredictionResponse, area: f64) {
        if let Some(store) = self.store() {
            store.result.set(Some((response.clone(), area)));
        }
    }
}

// =========================================================
// 视图
// =========================================================

pub fn init(ctx: AppContext) {
    let panel = LivePanel::new(ctx);
    spawn_local(async move {
        let api = ctx.api();
        load_states(&api, &panel).await;
    });
}

pub fn render() -> AnyView {
    use_app().pages.advisory.reset();
    view! { <AdvisoryPage /> }.into_any()
}

#[component]
fn AdvisoryPage() -> impl IntoView {
    let ctx = use_app();
    let store = ctx.pages.advisory;
    let form = store.form;

    let on_state = move |ev: leptos::ev::Event| {
        let state = event_target_value(&ev);
        form.update(|f| f.state = state.clone());
        let panel = LivePanel::new(ctx);
        let selections = ctx.state_selections();
        let ticket = selections.next();
        spawn_local(async move {
            let api = ctx.api();
            let panel = SelectionPanel::new(&panel, &selections, ticket);
            on_state_change(&api, &panel, &state).await;
        });
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let values = form.get_untracked();
        let panel = LivePanel::new(ctx);
        spawn_local(async move {
            let api = ctx.api();
            let pending = ctx.prediction();
            submit_prediction(&api, &panel, &pending, &values).await;
        });
    };

    view! {
        <div class="container mx-auto px-4 py-8 max-w-5xl">
            <h2 class="text-3xl font-bold">{ctx.t("advisory_title")}</h2>
            <p class="text-base-content/70 mb-6">{ctx.t("advisory_sub")}</p>

            <Show when=move || store.notice.get()>
                <div role="status" class="alert alert-warning mb-4 text-sm">
                    {ctx.t("reference_unavailable")}
                </div>
            </Show>

            <form class="card bg-base-100 shadow-md" on:submit=on_submit>
                <div class="card-body gap-6">
                    <h3 class="font-semibold text-lg">"📍 Location & Soil"</h3>
                    <div class="grid gap-4 md:grid-cols-3">
                        <SelectField
                            label=ctx.t("select_state")
                            options=store.states
                            value=Signal::derive(move || form.with(|f| f.state.clone()))
                            on_change=on_state
                        />
                        <SelectField
                            label=ctx.t("select_district")
                            options=store.districts
                            value=Signal::derive(move || form.with(|f| f.district.clone()))
                            on_change=move |ev| {
                                let v = event_target_value(&ev);
                                form.update(|f| f.district = v);
                            }
                        />
                        <SelectField
                            label=ctx.t("select_soil")
                            options=store.soil_types
                            value=Signal::derive(move || form.with(|f| f.soil_type.clone()))
                            on_change=move |ev| {
                                let v = event_target_value(&ev);
                                form.update(|f| f.soil_type = v);
                            }
                        />
                    </div>

                    <div class="grid gap-4 md:grid-cols-2">
                        <label class="form-control">
                            <span class="label-text">{ctx.t("select_season")} " *"</span>
                            <select
                                class="select select-bordered"
                                on:change=move |ev| {
                                    let v = event_target_value(&ev);
                                    form.update(|f| f.season = v);
                                }
                            >
                                <option value="">{format!("-- {} --", ctx.t("select_season"))}</option>
                                {SEASONS
                                    .into_iter()
                                    .map(|(value, text)| view! { <option value=value>{text}</option> })
                                    .collect_view()}
                            </select>
                        </label>
                        <NumberField
                            label=ctx.t("area")
                            help=ctx.t("help_area")
                            step="0.1"
                            value=Signal::derive(move || form.with(|f| f.area.clone()))
                            on_input=move |v| form.update(|f| f.area = v)
                        />
                    </div>

                    <h3 class="font-semibold text-lg">"🧪 Soil Nutrients"</h3>
                    <div class="grid gap-4 md:grid-cols-4">
                        <NumberField
                            label=ctx.t("nitrogen")
                            help=ctx.t("help_n")
                            step="1"
                            value=Signal::derive(move || form.with(|f| f.n.clone()))
                            on_input=move |v| form.update(|f| f.n = v)
                        />
                        <NumberField
                            label=ctx.t("phosphorus")
                            help=ctx.t("help_p")
                            step="1"
                            value=Signal::derive(move || form.with(|f| f.p.clone()))
                            on_input=move |v| form.update(|f| f.p = v)
                        />
                        <NumberField
                            label=ctx.t("potassium")
                            help=ctx.t("help_k")
                            step="1"
                            value=Signal::derive(move || form.with(|f| f.k.clone()))
                            on_input=move |v| form.update(|f| f.k = v)
                        />
                        <NumberField
                            label=ctx.t("ph_level")
                            help=ctx.t("help_ph")
                            step="0.1"
                            value=Signal::derive(move || form.with(|f| f.ph.clone()))
                            on_input=move |v| form.update(|f| f.ph = v)
                        />
                    </div>

                    <h3 class="font-semibold text-lg">"🌦️ Climate Conditions"</h3>
                    <div class="grid gap-4 md:grid-cols-3">
                        <NumberField
                            label=ctx.t("temperature")
                            help=ctx.t("help_temp")
                            step="0.5"
                            value=Signal::derive(move || form.with(|f| f.temperature.clone()))
                            on_input=move |v| form.update(|f| f.temperature = v)
                        />
                        <NumberField
                            label=ctx.t("humidity")
                            help=ctx.t("help_humidity")
                            step="1"
                            value=Signal::derive(move || form.with(|f| f.humidity.clone()))
                            on_input=move |v| form.update(|f| f.humidity = v)
                        />
                        <NumberField
                            label=ctx.t("rainfall")
                            help=ctx.t("help_rainfall")
                            step="10"
                            value=Signal::derive(move || form.with(|f| f.rainfall.clone()))
                            on_input=move |v| form.update(|f| f.rainfall = v)
                        />
                    </div>

                    <div class="bg-base-200 rounded-box p-4">
                        <h4 class="font-semibold">{ctx.t("climate_sim")}</h4>
                        <p class="text-sm text-base-content/70 mb-3">{ctx.t("climate_sim_desc")}</p>
                        <div class="grid gap-4 md:grid-cols-2">
                            <label class="form-control">
                                <div class="flex justify-between">
                                    <span class="label-text">{ctx.t("rainfall_change")}</span>
                                    <span class="font-mono">{move || form.with(|f| format!("{}%", f.rainfall_change))}</span>
                                </div>
                                <input
                                    type="range"
                                    class="range range-primary range-sm"
                                    min="-50"
                                    max="50"
                                    prop:value=move || form.with(|f| f.rainfall_change.clone())
                                    on:input=move |ev| {
                                        let v = event_target_value(&ev);
                                        form.update(|f| f.rainfall_change = v);
                                    }
                                />
                            </label>
                            <label class="form-control">
                                <div class="flex justify-between">
                                    <span class="label-text">{ctx.t("temp_change")}</span>
                                    <span class="font-mono">{move || form.with(|f| format!("{}°C", f.temp_change))}</span>
                                </div>
                                <input
                                    type="range"
                                    class="range range-secondary range-sm"
                                    min="-5"
                                    max="5"
                                    step="0.5"
                                    prop:value=move || form.with(|f| f.temp_change.clone())
                                    on:input=move |ev| {
                                        let v = event_target_value(&ev);
                                        form.update(|f| f.temp_change = v);
                                    }
                                />
                            </label>
                        </div>
                    </div>

                    <div class="text-center">
                        <button type="submit" class="btn btn-primary btn-lg" disabled=move || store.submitting.get()>
                            {move || if store.submitting.get() { ctx.t("analyzing") } else { ctx.t("analyze") }}
                        </button>
                    </div>
                </div>
            </form>

            {move || {
                store
                    .result
                    .get()
                    .map(|(response, area)| view! { <PredictionResults ctx=ctx response=response area=area /> })
            }}
        </div>
    }
}

#[component]
fn SelectField<F>(
    label: &'static str,
    options: RwSignal<Vec<String>>,
    value: Signal<String>,
    on_change: F,
) -> impl IntoView
where
    F: FnMut(leptos::ev::Event) + Send + 'static,
{
    view! {
        <label class="form-control">
            <span class="label-text">{label} " *"</span>
            <select class="select select-bordered" prop:value=value on:change=on_change>
                <option value="">{format!("-- {} --", label)}</option>
                <For
                    each=move || options.get()
                    key=|o| o.clone()
                    children=move |option: String| {
                        let current = option.clone();
                        let text = option.clone();
                        view! {
                            <option value=option selected=move || value.get() == current>
                                {text}
                            </option>
                        }
                    }
                />
            </select>
        </label>
    }
}

#[component]
fn NumberField<F>(
    label: &'static str,
    help: &'static str,
    step: &'static str,
    value: Signal<String>,
    on_input: F,
) -> impl IntoView
where
    F: Fn(String) + Send + 'static,
{
    let (show_help, set_show_help) = signal(false);
    let ctx = use_app();

    view! {
        <div class="form-control">
            <span class="label-text">{label}</span>
            <input
                type="number"
                class="input input-bordered"
                step=step
                prop:value=value
                on:input=move |ev| on_input(event_target_value(&ev))
            />
            <button
                type="button"
                class="link link-hover text-xs text-left mt-1"
                on:click=move |_| set_show_help.update(|v| *v = !*v)
            >
                {ctx.t("what_is_this")}
            </button>
            <Show when=move || show_help.get()>
                <p class="text-xs text-base-content/70">{help}</p>
            </Show>
        </div>
    }
}
