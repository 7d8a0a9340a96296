//! 历史记录汇总
//!
//! `result_data` 的结构随 `prediction_type` 变化，这里只按路径取值，缺失即跳过。

use std::collections::HashSet;

use serde_json::Value;

use bharatagri_shared::HistoryEntry;
use bharatagri_shared::date::date_label;

/// 表格最多显示的条数
pub const TABLE_LIMIT: usize = 15;
/// 柱状图最多显示的条数
pub const CHART_LIMIT: usize = 6;
/// 柱状图最高柱的像素高度
pub const CHART_HEIGHT: f64 = 160.0;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub date: String,
    pub prediction_type: String,
    pub state: String,
    pub result: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub crop: String,
    pub predicted: Option<f64>,
    pub average: Option<f64>,
    pub predicted_height: f64,
    pub average_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryStats {
    pub total: usize,
    /// `crop` 与 `full` 两类
    pub crop_analyses: usize,
    pub states: usize,
}

fn first_crop(recommendations: &Value) -> Option<&str> {
    recommendations.get(0)?.get("crop")?.as_str()
}

fn yield_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|v| *v != 0.0)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "N/A".to_string()),
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => "N/A".to_string(),
    }
}

/// 单条记录的结果摘要
pub fn summarize(entry: &HistoryEntry) -> String {
    let data = &entry.result_data;
    let crop = match entry.prediction_type.as_str() {
        "full" => data
            .get("crop_recommendations")
            .and_then(|c| c.get("recommendations"))
            .and_then(first_crop),
        "crop" => data.get("recommendations").and_then(first_crop),
        _ => None,
    };

    if let Some(crop) = crop {
        return format!("🌾 {}", crop);
    }
    if entry.prediction_type == "yield" {
        return format!("📊 {} t/ha", yield_text(data.get("predicted_yield")));
    }
    entry.prediction_type.clone()
}

pub fn table_rows(history: &[HistoryEntry]) -> Vec<HistoryRow> {
    history
        .iter()
        .take(TABLE_LIMIT)
        .map(|entry| HistoryRow {
            date: date_label(entry.created_at.as_deref()),
            prediction_type: entry.prediction_type.clone(),
            state: entry
                .state
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "-".to_string()),
            result: summarize(entry),
        })
        .collect()
}

/// 产量对比柱状图：最多 6 条带产量数据的 `full` 记录
pub fn chart_bars(history: &[HistoryEntry]) -> Vec<ChartBar> {
    let entries: Vec<(&Value, &Value)> = history
        .iter()
        .filter(|h| h.prediction_type == "full")
        .filter_map(|h| {
            let yld = h.result_data.get("yield_prediction")?;
            yld.is_object().then_some((&h.result_data, yld))
        })
        .take(CHART_LIMIT)
        .collect();

    let number = |v: &Value, key: &str| v.get(key).and_then(Value::as_f64);
    let max = entries
        .iter()
        .map(|(_, y)| {
            let predicted = number(y, "predicted_yield").unwrap_or(0.0);
            let average = number(y, "state_average_yield").unwrap_or(0.0);
            predicted.max(average)
        })
        .fold(0.0_f64, f64::max);

    let height = |value: Option<f64>| match value {
        Some(v) if max > 0.0 => v / max * CHART_HEIGHT,
        _ => 0.0,
    };

    entries
        .into_iter()
        .map(|(data, y)| {
            let predicted = number(y, "predicted_yield");
            let average = number(y, "state_average_yield");
            let crop = data
                .get("crop_recommendations")
                .and_then(|c| c.get("recommendations"))
                .and_then(first_crop)
                .unwrap_or("Crop")
                .to_string();
            ChartBar {
                crop,
                predicted,
                average,
                predicted_height: height(predicted),
                average_height: height(average),
            }
        })
        .collect()
}

pub fn stats(history: &[HistoryEntry]) -> HistoryStats {
    let crop_analyses = history
        .iter()
        .filter(|h| matches!(h.prediction_type.as_str(), "crop" | "full"))
        .count();
    let states: HashSet<&str> = history
        .iter()
        .filter_map(|h| h.state.as_deref())
        .filter(|s| !s.is_empty())
        .collect();

    HistoryStats {
        total: history.len(),
        crop_analyses,
        states: states.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(prediction_type: &str, state: Option<&str>, result_data: Value) -> HistoryEntry {
        HistoryEntry {
            created_at: Some("2024-03-01T10:15:30".to_string()),
            prediction_type: prediction_type.to_string(),
            state: state.map(str::to_string),
            result_data,
        }
    }

    fn full(crop: &str, predicted: f64, average: f64) -> HistoryEntry {
        entry(
            "full",
            Some("Punjab"),
            json!({
                "crop_recommendations": { "recommendations": [{ "crop": crop, "probability": 80 }] },
                "yield_prediction": { "predicted_yield": predicted, "state_average_yield": average }
            }),
        )
    }

    #[test]
    fn summary_depends_on_prediction_type() {
        assert_eq!(summarize(&full("Wheat", 4.0, 3.0)), "🌾 Wheat");
        assert_eq!(
            summarize(&entry(
                "crop",
                None,
                json!({ "recommendations": [{ "crop": "Maize" }] })
            )),
            "🌾 Maize"
        );
        assert_eq!(
            summarize(&entry("yield", None, json!({ "predicted_yield": 2.5 }))),
            "📊 2.5 t/ha"
        );
        assert_eq!(
            summarize(&entry("yield", None, json!({}))),
            "📊 N/A t/ha"
        );
        assert_eq!(summarize(&entry("risk", None, json!({}))), "risk");
        // 没有推荐作物的 full 记录退回类型名
        assert_eq!(summarize(&entry("full", None, json!({}))), "full");
    }

    #[test]
    fn table_is_capped_and_fills_missing_state() {
        let mut history = vec![entry("risk", None, json!({}))];
        history.extend((0..20).map(|_| full("Rice", 3.0, 2.0)));

        let rows = table_rows(&history);
        assert_eq!(rows.len(), TABLE_LIMIT);
        assert_eq!(rows[0].state, "-");
        assert_eq!(rows[0].date, "01/03/2024");
        assert_eq!(rows[1].state, "Punjab");
    }

    #[test]
    fn chart_scales_against_largest_value() {
        let history = vec![
            full("Rice", 4.0, 2.0),
            entry("yield", None, json!({ "predicted_yield": 9.0 })),
            full("Wheat", 1.0, 8.0),
            entry("full", None, json!({ "crop_recommendations": {} })),
        ];

        let bars = chart_bars(&history);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].crop, "Rice");
        assert_eq!(bars[0].predicted_height, 80.0);
        assert_eq!(bars[1].average_height, CHART_HEIGHT);
        assert_eq!(bars[1].predicted_height, 20.0);
    }

    #[test]
    fn chart_takes_at_most_six_entries_and_handles_zero_yields() {
        let history: Vec<HistoryEntry> = (0..8).map(|_| full("Rice", 0.0, 0.0)).collect();
        let bars = chart_bars(&history);
        assert_eq!(bars.len(), CHART_LIMIT);
        assert!(bars.iter().all(|b| b.predicted_height == 0.0));
    }

    #[test]
    fn stats_count_types_and_distinct_states() {
        let history = vec![
            full("Rice", 3.0, 2.0),
            entry("crop", Some("Kerala"), json!({})),
            entry("yield", Some("Punjab"), json!({})),
            entry("risk", Some(""), json!({})),
        ];
        assert_eq!(
            stats(&history),
            HistoryStats {
                total: 4,
                crop_analyses: 2,
                states: 2
            }
        );
    }
}
