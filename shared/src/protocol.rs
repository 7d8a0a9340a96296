use crate::{
    AdminChat, AdminPrediction, AdminStats, AdminUser, AuthResponse, ChatRequest, ChatResponse,
    ClimateResponse, DistrictsResponse, HistoryEntry, LoginRequest, PredictionRequest,
    PredictionResponse, RegisterRequest, SoilTypesResponse, StatesResponse, User,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// Which credential an endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// No credential. Login, registration and reference data.
    Public,
    /// `Authorization: Bearer <token>` when a session exists.
    Bearer,
    /// `X-Admin-Key` from the per-tab admin key.
    Admin,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// GET requests never carry a body; the request value only contributes path segments.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The credential attached to the request.
    const AUTH: AuthMode;

    /// The URL path, including any encoded path segments.
    fn path(&self) -> String;
}

/// Percent-encode a single path segment (state names contain spaces, e.g. `Tamil Nadu`).
fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

// =========================================================
// Auth
// =========================================================

impl ApiRequest for RegisterRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: AuthMode = AuthMode::Public;

    fn path(&self) -> String {
        "/api/auth/register".to_string()
    }
}

impl ApiRequest for LoginRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: AuthMode = AuthMode::Public;

    fn path(&self) -> String {
        "/api/auth/login".to_string()
    }
}

/// Fetch the signed-in user's profile
#[derive(Debug, Serialize)]
pub struct MeRequest;

impl ApiRequest for MeRequest {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTH: AuthMode = AuthMode::Bearer;

    fn path(&self) -> String {
        "/api/auth/me".to_string()
    }
}

// =========================================================
// Reference data
// =========================================================

#[derive(Debug, Serialize)]
pub struct StatesRequest;

impl ApiRequest for StatesRequest {
    type Response = StatesResponse;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTH: AuthMode = AuthMode::Public;

    fn path(&self) -> String {
        "/api/reference/states".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct DistrictsRequest {
    pub state: String,
}

impl ApiRequest for DistrictsRequest {
    type Response = DistrictsResponse;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTH: AuthMode = AuthMode::Public;

    fn path(&self) -> String {
        format!("/api/reference/districts/{}", segment(&self.state))
    }
}

#[derive(Debug, Serialize)]
pub struct SoilTypesRequest {
    pub state: String,
}

impl ApiRequest for SoilTypesRequest {
    type Response = SoilTypesResponse;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTH: AuthMode = AuthMode::Public;

    fn path(&self) -> String {
        format!("/api/reference/soil-types/{}", segment(&self.state))
    }
}

#[derive(Debug, Serialize)]
pub struct ClimateRequest {
    pub state: String,
}

impl ApiRequest for ClimateRequest {
    type Response = ClimateResponse;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTH: AuthMode = AuthMode::Public;

    fn path(&self) -> String {
        format!("/api/reference/climate/{}", segment(&self.state))
    }
}

// =========================================================
// Prediction & chat
// =========================================================

impl ApiRequest for PredictionRequest {
    type Response = PredictionResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: AuthMode = AuthMode::Bearer;

    fn path(&self) -> String {
        "/api/predict/full".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryRequest;

impl ApiRequest for HistoryRequest {
    type Response = Vec<HistoryEntry>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTH: AuthMode = AuthMode::Bearer;

    fn path(&self) -> String {
        "/api/predict/history".to_string()
    }
}

impl ApiRequest for ChatRequest {
    type Response = ChatResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: AuthMode = AuthMode::Bearer;

    fn path(&self) -> String {
        "/api/chatbot/message".to_string()
    }
}

// =========================================================
// Admin
// =========================================================

#[derive(Debug, Serialize)]
pub struct AdminStatsRequest;

impl ApiRequest for AdminStatsRequest {
    type Response = AdminStats;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTH: AuthMode = AuthMode::Admin;

    fn path(&self) -> String {
        "/api/admin/stats".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct AdminUsersRequest;

impl ApiRequest for AdminUsersRequest {
    type Response = Vec<AdminUser>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTH: AuthMode = AuthMode::Admin;

    fn path(&self) -> String {
        "/api/admin/users".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct AdminPredictionsRequest;

impl ApiRequest for AdminPredictionsRequest {
    type Response = Vec<AdminPrediction>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTH: AuthMode = AuthMode::Admin;

    fn path(&self) -> String {
        "/api/admin/predictions".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct AdminChatsRequest;

impl ApiRequest for AdminChatsRequest {
    type Response = Vec<AdminChat>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTH: AuthMode = AuthMode::Admin;

    fn path(&self) -> String {
        "/api/admin/chats".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_segments_are_percent_encoded() {
        let req = DistrictsRequest {
            state: "Tamil Nadu".to_string(),
        };
        assert_eq!(req.path(), "/api/reference/districts/Tamil%20Nadu");

        let req = ClimateRequest {
            state: "Jammu & Kashmir".to_string(),
        };
        assert_eq!(req.path(), "/api/reference/climate/Jammu%20%26%20Kashmir");
    }

    #[test]
    fn credential_modes_per_endpoint() {
        assert_eq!(<LoginRequest as ApiRequest>::AUTH, AuthMode::Public);
        assert_eq!(<StatesRequest as ApiRequest>::AUTH, AuthMode::Public);
        assert_eq!(<HistoryRequest as ApiRequest>::AUTH, AuthMode::Bearer);
        assert_eq!(<AdminChatsRequest as ApiRequest>::AUTH, AuthMode::Admin);
        assert_eq!(<PredictionRequest as ApiRequest>::METHOD, HttpMethod::Post);
    }
}
