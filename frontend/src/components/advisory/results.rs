//! 预测结果视图

use std::collections::BTreeMap;

use leptos::prelude::*;

use bharatagri_shared::{DEFAULT_YIELD_UNIT, PredictionResponse};

use crate::context::AppContext;
use crate::web::route::PageId;

/// 风险等级对应的徽章样式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskClass {
    Low,
    Moderate,
    High,
}

impl RiskClass {
    pub fn from_level(level: &str) -> Self {
        match level.to_lowercase().as_str() {
            "low" => Self::Low,
            "moderate" => Self::Moderate,
            _ => Self::High,
        }
    }

    fn badge(self) -> &'static str {
        match self {
            Self::Low => "badge badge-success badge-lg gap-2",
            Self::Moderate => "badge badge-warning badge-lg gap-2",
            Self::High => "badge badge-error badge-lg gap-2",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Low => "✅",
            Self::Moderate => "⚠️",
            Self::High => "🔴",
        }
    }
}

/// 特征重要性按数值降序
pub fn sorted_importance(importance: &BTreeMap<String, f64>) -> Vec<(String, f64)> {
    let mut entries: Vec<(String, f64)> = importance
        .iter()
        .map(|(name, value)| (name.clone(), *value))
        .collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    entries
}

fn or_dash(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn PredictionResults(ctx: AppContext, response: PredictionResponse, area: f64) -> impl IntoView {
    let crops = response.crop_recommendations.recommendations;
    let explanation = crops.first().and_then(|c| c.explanation.clone());
    let importance = sorted_importance(&response.crop_recommendations.feature_importance);

    let yld = response.yield_prediction;
    let unit = yld.unit.clone().unwrap_or_else(|| DEFAULT_YIELD_UNIT.to_string());
    let diff = yld.yield_difference_percent.unwrap_or(0.0);
    let above = diff >= 0.0;
    let diff_class = if above {
        "alert alert-success mt-2"
    } else {
        "alert alert-warning mt-2"
    };

    let risk = response.risk_analysis;
    let level = risk.risk_level.clone().unwrap_or_default();
    let class = RiskClass::from_level(&level);
    let badge = class.badge();

    view! {
        <div class="grid gap-6 md:grid-cols-2 mt-8">
            <div class="card bg-base-100 shadow-md">
                <div class="card-body">
                    <h3 class="card-title">"🌾 " {ctx.t("crop_recommendations")}</h3>
                    <ol class="flex flex-col gap-2">
                        {crops
                            .into_iter()
                            .enumerate()
                            .map(|(i, c)| {
                                view! {
                                    <li class="flex items-center gap-3 p-2 rounded-lg bg-base-200">
                                        <span class="badge badge-primary">{i + 1}</span>
                                        <span class="flex-1 font-semibold">{c.crop}</span>
                                        <span class="text-primary">{format!("{}%", c.probability)}</span>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ol>
                    {explanation
                        .map(|text| {
                            view! {
                                <div class="alert alert-info mt-4 flex-col items-start">
                                    <strong>{ctx.t("explanation")} ":"</strong>
                                    <span>{text}</span>
                                </div>
                            }
                        })}
                </div>
            </div>

            <div class="card bg-base-100 shadow-md">
                <div class="card-body">
                    <h3 class="card-title">"📊 " {ctx.t("yield_prediction")}</h3>
                    <div class="text-4xl font-bold text-primary">
                        {or_dash(yld.predicted_yield)} " "
                        <span class="text-base font-normal">{unit}</span>
                    </div>
                    <p class="text-sm text-base-content/70">
                        {ctx.t("total_production")} ": "
                        <strong>{format!("{} tons", or_dash(yld.total_production))}</strong>
                        {format!(" for {} ha", area)}
                    </p>
                    <div class=diff_class>
                        {format!(
                            "{} {}% {} ({} tons/ha)",
                            if above { "📈" } else { "📉" },
                            diff.abs(),
                            if above { ctx.t("above_average") } else { ctx.t("below_average") },
                            or_dash(yld.state_average_yield),
                        )}
                    </div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-md">
                <div class="card-body">
                    <h3 class="card-title">"⚡ " {ctx.t("risk_analysis")}</h3>
                    <div class=badge>
                        {format!("{} {} Risk", class.icon(), level)}
                        <span class="font-normal text-xs">
                            {format!("(Score: {}/100)", or_dash(risk.risk_score))}
                        </span>
                    </div>
                    <h4 class="font-semibold mt-2">{ctx.t("risk_factors")}</h4>
                    <ul class="list-disc list-inside text-sm">
                        {risk.factors.into_iter().map(|f| view! { <li>{f}</li> }).collect_view()}
                    </ul>
                </div>
            </div>

            <div class="card bg-base-100 shadow-md">
                <div class="card-body">
                    <h3 class="card-title">"📉 " {ctx.t("feature_importance")}</h3>
                    <div class="flex flex-col gap-2">
                        {importance
                            .into_iter()
                            .map(|(name, value)| {
                                view! {
                                    <div class="flex items-center gap-2 text-sm">
                                        <span class="w-24">{name}</span>
                                        <div class="flex-1 bg-base-200 rounded h-3">
                                            <div
                                                class="bg-primary h-3 rounded"
                                                style={format!("width:{}%", value * 3.0)}
                                            ></div>
                                        </div>
                                        <span class="w-12 text-right">{format!("{}%", value)}</span>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
            </div>
        </div>

        <div class="text-center mt-6">
            <button class="btn btn-outline btn-primary" on:click=move |_| ctx.navigate(PageId::Chatbot)>
                "💬 " {ctx.t("ask_chatbot")}
            </button>
        </div>
    }
}
