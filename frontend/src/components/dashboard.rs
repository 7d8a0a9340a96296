//! 仪表盘页面：历史记录表格、产量对比图、统计

mod summary;

use leptos::prelude::*;
use leptos::task::spawn_local;

use bharatagri_shared::HistoryEntry;
use bharatagri_shared::protocol::HistoryRequest;

use crate::api::ApiClient;
use crate::context::{AppContext, use_app};
use crate::web::http::HttpClient;

pub use summary::{ChartBar, HistoryRow, HistoryStats, chart_bars, stats, table_rows};

/// 仪表盘三个面板的状态
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HistoryView {
    #[default]
    Loading,
    Empty,
    Failed,
    Loaded {
        rows: Vec<HistoryRow>,
        bars: Vec<ChartBar>,
        stats: HistoryStats,
    },
}

pub trait DashboardPanel {
    fn show(&self, view: HistoryView);
}

impl HistoryView {
    pub fn from_history(history: &[HistoryEntry]) -> Self {
        if history.is_empty() {
            return Self::Empty;
        }
        Self::Loaded {
            rows: table_rows(history),
            bars: chart_bars(history),
            stats: stats(history),
        }
    }
}

/// 加载历史记录
///
/// 401 时会话已清除并跳转，面板保持不变
pub async fn load_history<H: HttpClient>(api: &ApiClient<H>, panel: &impl DashboardPanel) {
    match api.call(&HistoryRequest).await {
        Ok(Some(history)) => panel.show(HistoryView::from_history(&history)),
        Ok(None) => {}
        Err(e) => {
            log::warn!("failed to load history: {}", e);
            panel.show(HistoryView::Failed);
        }
    }
}

#[derive(Clone, Copy)]
pub struct DashboardStore {
    pub view: RwSignal<HistoryView>,
}

impl DashboardStore {
    pub fn new() -> Self {
        Self {
            view: RwSignal::new(HistoryView::Loading),
        }
    }
}

struct LivePanel {
    ctx: AppContext,
    generation: u64,
}

impl DashboardPanel for LivePanel {
    fn show(&self, view: HistoryView) {
        if self.ctx.is_current(self.generation) {
            self.ctx.pages.dashboard.view.set(view);
        }
    }
}

pub fn init(ctx: AppContext) {
    let panel = LivePanel {
        ctx,
        generation: ctx.router().generation(),
    };
    spawn_local(async move {
        let api = ctx.api();
        load_history(&api, &panel).await;
    });
}

pub fn render() -> AnyView {
    use_app().pages.dashboard.view.set(HistoryView::Loading);
    view! { <DashboardPage /> }.into_any()
}

#[component]
fn DashboardPage() -> impl IntoView {
    let ctx = use_app();
    let state = ctx.pages.dashboard.view;

    view! {
        <div class="container mx-auto px-4 py-8">
            <h2 class="text-3xl font-bold">{ctx.t("dashboard_title")}</h2>
            <p class="text-base-content/70 mb-6">{ctx.t("dashboard_sub")}</p>

            <div class="grid gap-6 lg:grid-cols-2">
                <div class="card bg-base-100 shadow-md lg:col-span-2">
                    <div class="card-body">
                        <h3 class="card-title">{ctx.t("recent_predictions")}</h3>
                        {move || match state.get() {
                            HistoryView::Loading => view! {
                                <span class="loading loading-dots loading-md"></span>
                            }.into_any(),
                            HistoryView::Empty => view! {
                                <p class="text-base-content/60">{ctx.t("no_history")}</p>
                            }.into_any(),
                            HistoryView::Failed => view! {
                                <p class="text-error">{ctx.t("history_failed")}</p>
                            }.into_any(),
                            HistoryView::Loaded { rows, .. } => view! { <HistoryTable ctx=ctx rows=rows /> }.into_any(),
                        }}
                    </div>
                </div>

                <div class="card bg-base-100 shadow-md">
                    <div class="card-body">
                        <h3 class="card-title">{ctx.t("yield_comparison")}</h3>
                        {move || match state.get() {
                            HistoryView::Loaded { bars, .. } if bars.is_empty() => view! {
                                <p class="text-base-content/60">{ctx.t("no_yield_entries")}</p>
                            }.into_any(),
                            HistoryView::Loaded { bars, .. } => view! { <YieldChart ctx=ctx bars=bars /> }.into_any(),
                            HistoryView::Empty => view! {
                                <p class="text-base-content/60">{ctx.t("no_chart_data")}</p>
                            }.into_any(),
                            _ => ().into_any(),
                        }}
                    </div>
                </div>

                <div class="card bg-base-100 shadow-md">
                    <div class="card-body">
                        <h3 class="card-title">{ctx.t("statistics")}</h3>
                        {move || match state.get() {
                            HistoryView::Loaded { stats, .. } => view! { <StatsPanel ctx=ctx stats=stats /> }.into_any(),
                            HistoryView::Empty => view! {
                                <p class="text-base-content/60">{ctx.t("no_stats")}</p>
                            }.into_any(),
                            _ => ().into_any(),
                        }}
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
fn HistoryTable(ctx: AppContext, rows: Vec<HistoryRow>) -> impl IntoView {
    view! {
        <div class="overflow-x-auto">
            <table class="table table-zebra">
                <thead>
                    <tr>
                        <th>{ctx.t("date")}</th>
                        <th>{ctx.t("type")}</th>
                        <th>{ctx.t("state")}</th>
                        <th>{ctx.t("result")}</th>
                    </tr>
                </thead>
                <tbody>
                    {rows
                        .into_iter()
                        .map(|row| {
                            view! {
                                <tr>
                                    <td>{row.date}</td>
                                    <td>{row.prediction_type}</td>
                                    <td>{row.state}</td>
                                    <td>{row.result}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}

fn yield_title(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{} t/ha", v),
        None => "- t/ha".to_string(),
    }
}

#[component]
fn YieldChart(ctx: AppContext, bars: Vec<ChartBar>) -> impl IntoView {
    view! {
        <div class="flex items-end justify-around gap-4 h-52">
            {bars
                .into_iter()
                .map(|bar| {
                    view! {
                        <div class="flex flex-col items-center gap-1">
                            <div class="flex items-end gap-1 h-44">
                                <div
                                    class="w-6 bg-primary rounded-t"
                                    style=format!("height:{}px", bar.predicted_height)
                                    title=yield_title(bar.predicted)
                                ></div>
                                <div
                                    class="w-6 bg-warning/40 border border-warning rounded-t"
                                    style=format!("height:{}px", bar.average_height)
                                    title=yield_title(bar.average)
                                ></div>
                            </div>
                            <span class="text-xs">{bar.crop}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
        <div class="flex gap-4 justify-center text-xs mt-2">
            <span class="flex items-center gap-1">
                <span class="inline-block w-3 h-3 rounded-full bg-primary"></span>
                {ctx.t("predicted")}
            </span>
            <span class="flex items-center gap-1">
                <span class="inline-block w-3 h-3 rounded-full bg-warning/40 border border-warning"></span>
                {ctx.t("state_avg")}
            </span>
        </div>
    }
}

#[component]
fn StatsPanel(ctx: AppContext, stats: HistoryStats) -> impl IntoView {
    view! {
        <div class="stats stats-vertical w-full">
            <div class="stat place-items-center">
                <div class="stat-value text-primary">{stats.total}</div>
                <div class="stat-desc">{ctx.t("total_predictions")}</div>
            </div>
            <div class="stat place-items-center">
                <div class="stat-value text-secondary">{stats.crop_analyses}</div>
                <div class="stat-desc">{ctx.t("crop_analyses")}</div>
            </div>
            <div class="stat place-items-center">
                <div class="stat-value text-info">{stats.states}</div>
                <div class="stat-desc">{ctx.t("states_explored")}</div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::TestContext;
    use crate::web::route::PageId;
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingPanel {
        shown: RefCell<Vec<HistoryView>>,
    }

    impl DashboardPanel for RecordingPanel {
        fn show(&self, view: HistoryView) {
            self.shown.borrow_mut().push(view);
        }
    }

    #[tokio::test]
    async fn empty_history_shows_placeholders_without_further_calls() {
        let ctx = TestContext::signed_in();
        ctx.mock("/api/predict/history", 200, json!([]));
        let panel = RecordingPanel::default();

        load_history(&ctx.api, &panel).await;

        assert_eq!(*panel.shown.borrow(), vec![HistoryView::Empty]);
        assert_eq!(ctx.paths(), vec!["/api/predict/history"]);
    }

    #[tokio::test]
    async fn history_fills_all_three_panels() {
        let ctx = TestContext::signed_in();
        ctx.mock(
            "/api/predict/history",
            200,
            json!([
                {
                    "created_at": "2024-06-10T08:00:00",
                    "prediction_type": "full",
                    "state": "Punjab",
                    "result_data": {
                        "crop_recommendations": { "recommendations": [{ "crop": "Wheat" }] },
                        "yield_prediction": { "predicted_yield": 4.2, "state_average_yield": 4.2 }
                    }
                },
                { "prediction_type": "yield", "state": "Kerala", "result_data": { "predicted_yield": 2.1 } }
            ]),
        );
        let panel = RecordingPanel::default();

        load_history(&ctx.api, &panel).await;

        let shown = panel.shown.borrow();
        let HistoryView::Loaded { rows, bars, stats } = &shown[0] else {
            panic!("expected loaded view, got {:?}", shown[0]);
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].result, "🌾 Wheat");
        assert_eq!(rows[1].date, "-");
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].predicted_height, 160.0);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.crop_analyses, 1);
        assert_eq!(stats.states, 2);
    }

    #[tokio::test]
    async fn failure_shows_error_in_table() {
        let ctx = TestContext::signed_in();
        ctx.mock_unreachable("/api/predict/history");
        let panel = RecordingPanel::default();

        load_history(&ctx.api, &panel).await;

        assert_eq!(*panel.shown.borrow(), vec![HistoryView::Failed]);
    }

    #[tokio::test]
    async fn expired_session_leaves_panel_untouched() {
        let ctx = TestContext::signed_in();
        ctx.mock("/api/predict/history", 401, json!({ "detail": "expired" }));
        let panel = RecordingPanel::default();

        load_history(&ctx.api, &panel).await;

        assert!(panel.shown.borrow().is_empty());
        assert_eq!(*ctx.events.navigations.borrow(), vec![PageId::Login]);
    }
}
