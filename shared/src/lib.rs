use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub mod date;
pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_ADMIN_KEY: &str = "X-Admin-Key";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// 后端返回的默认产量单位
pub const DEFAULT_YIELD_UNIT: &str = "tons/ha";

// =========================================================
// 认证 (Auth)
// =========================================================

/// 用户记录，登录/注册响应和 `/api/auth/me` 共用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub state: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
}

/// 非 2xx 响应体。FastAPI 使用 `detail`，部分路由使用 `error`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// 提取可读的错误消息
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Some(serde_json::Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            // 422 校验错误: detail 是数组，取第一项的 msg
            Some(serde_json::Value::Array(items)) => {
                if let Some(msg) = items
                    .first()
                    .and_then(|i| i.get("msg"))
                    .and_then(|m| m.as_str())
                {
                    return Some(msg.to_string());
                }
            }
            _ => {}
        }
        self.error.clone().filter(|e| !e.is_empty())
    }
}

// =========================================================
// 参考数据 (Reference)
// =========================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatesResponse {
    #[serde(default)]
    pub states: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DistrictsResponse {
    #[serde(default)]
    pub districts: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoilTypesResponse {
    #[serde(default)]
    pub soil_types: Vec<String>,
}

/// 邦级气候范围
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Climate {
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity_min: f64,
    pub humidity_max: f64,
    pub rainfall_min: f64,
    pub rainfall_max: f64,
}

/// 未知的邦返回 `{"error": ...}`，因此 climate 可缺失
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClimateResponse {
    #[serde(default)]
    pub climate: Option<Climate>,
}

// =========================================================
// 预测 (Prediction)
// =========================================================

/// `/api/predict/full` 请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub n: f64,
    pub p: f64,
    pub k: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
    pub soil_type: String,
    pub state: String,
    pub district: String,
    pub season: String,
    pub area: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRecommendation {
    pub crop: String,
    pub probability: f64,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CropRecommendations {
    #[serde(default)]
    pub recommendations: Vec<CropRecommendation>,
    #[serde(default)]
    pub feature_importance: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YieldPrediction {
    #[serde(default)]
    pub predicted_yield: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub total_production: Option<f64>,
    #[serde(default)]
    pub state_average_yield: Option<f64>,
    #[serde(default)]
    pub yield_difference_percent: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub factors: Vec<String>,
}

/// `/api/predict/full` 响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub crop_recommendations: CropRecommendations,
    #[serde(default)]
    pub yield_prediction: YieldPrediction,
    #[serde(default)]
    pub risk_analysis: RiskAnalysis,
}

/// 预测历史记录。`result_data` 的结构随 `prediction_type` 变化，保留为原始 JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default)]
    pub created_at: Option<String>,
    pub prediction_type: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub result_data: serde_json::Value,
}

// =========================================================
// 聊天 (Chatbot)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub language: String,
    pub context: serde_json::Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: Option<String>,
}

// =========================================================
// 管理端 (Admin)
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_predictions: u64,
    #[serde(default)]
    pub total_chats: u64,
    #[serde(default)]
    pub predictions_by_type: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub prediction_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminPrediction {
    pub id: i64,
    pub user_name: String,
    pub user_email: String,
    pub prediction_type: String,
    #[serde(default)]
    pub result_data: serde_json::Value,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminChat {
    pub id: i64,
    pub user_name: String,
    #[serde(default)]
    pub user_email: Option<String>,
    pub message: String,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_body_prefers_detail_string() {
        let body: ErrorBody =
            serde_json::from_value(json!({ "detail": "Email already registered" })).unwrap();
        assert_eq!(body.message().as_deref(), Some("Email already registered"));
    }

    #[test]
    fn error_body_reads_validation_array_and_error_field() {
        let body: ErrorBody = serde_json::from_value(
            json!({ "detail": [{ "loc": ["body", "n"], "msg": "field required" }] }),
        )
        .unwrap();
        assert_eq!(body.message().as_deref(), Some("field required"));

        let body: ErrorBody =
            serde_json::from_value(json!({ "error": "State not found" })).unwrap();
        assert_eq!(body.message().as_deref(), Some("State not found"));

        assert_eq!(ErrorBody::default().message(), None);
    }

    #[test]
    fn prediction_response_tolerates_missing_sections() {
        let resp: PredictionResponse = serde_json::from_value(json!({
            "crop_recommendations": {
                "recommendations": [{ "crop": "Rice", "probability": 82.5 }]
            }
        }))
        .unwrap();
        assert_eq!(resp.crop_recommendations.recommendations[0].crop, "Rice");
        assert!(resp.yield_prediction.predicted_yield.is_none());
        assert!(resp.risk_analysis.factors.is_empty());
    }
}
