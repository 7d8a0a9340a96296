//! 咨询表单的值与转换
//!
//! 表单输入以字符串保存，提交时一次性解析为 `PredictionRequest`。

use bharatagri_shared::{Climate, PredictionRequest};

pub const FILL_REQUIRED: &str = "Please fill in all required fields";

/// 静态季节列表 (值, 显示文字)
pub const SEASONS: [(&str, &str); 3] = [
    ("Kharif", "Kharif (Jun-Oct)"),
    ("Rabi", "Rabi (Oct-Mar)"),
    ("Zaid", "Zaid (Mar-Jun)"),
];

/// 缺失或无法解析的必填字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingField(pub &'static str);

impl core::fmt::Display for MissingField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "missing or invalid field: {}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormValues {
    pub state: String,
    pub district: String,
    pub soil_type: String,
    pub season: String,
    pub n: String,
    pub p: String,
    pub k: String,
    pub temperature: String,
    pub humidity: String,
    pub ph: String,
    pub rainfall: String,
    pub area: String,
    /// 降雨量变化百分比 (-50..50)
    pub rainfall_change: String,
    /// 温度变化 (°C, -5..5)
    pub temp_change: String,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            state: String::new(),
            district: String::new(),
            soil_type: String::new(),
            season: String::new(),
            n: String::new(),
            p: String::new(),
            k: String::new(),
            temperature: String::new(),
            humidity: String::new(),
            ph: String::new(),
            rainfall: String::new(),
            area: "1".to_string(),
            rainfall_change: "0".to_string(),
            temp_change: "0".to_string(),
        }
    }
}

impl FormValues {
    /// 组装预测请求，应用气候模拟
    ///
    /// 面积为空、为 0 或无法解析时取 1 公顷
    pub fn to_request(&self) -> Result<PredictionRequest, MissingField> {
        let rain_pct = optional_number(&self.rainfall_change);
        let temp_delta = optional_number(&self.temp_change);
        let base_rainfall = required_number(&self.rainfall, "rainfall")?;
        let base_temperature = required_number(&self.temperature, "temperature")?;

        Ok(PredictionRequest {
            n: required_number(&self.n, "n")?,
            p: required_number(&self.p, "p")?,
            k: required_number(&self.k, "k")?,
            temperature: base_temperature + temp_delta,
            humidity: required_number(&self.humidity, "humidity")?,
            ph: required_number(&self.ph, "ph")?,
            rainfall: base_rainfall * (100.0 + rain_pct) / 100.0,
            soil_type: required_text(&self.soil_type, "soil_type")?,
            state: required_text(&self.state, "state")?,
            district: required_text(&self.district, "district")?,
            season: required_text(&self.season, "season")?,
            area: parse_number(&self.area)
                .filter(|a| *a != 0.0)
                .unwrap_or(1.0),
        })
    }

    pub fn apply_climate(&mut self, fill: &ClimateFill) {
        self.temperature = fill.temperature.clone();
        self.humidity = fill.humidity.clone();
        self.rainfall = fill.rainfall.clone();
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn optional_number(raw: &str) -> f64 {
    parse_number(raw).unwrap_or(0.0)
}

fn required_number(raw: &str, field: &'static str) -> Result<f64, MissingField> {
    parse_number(raw).ok_or(MissingField(field))
}

fn required_text(raw: &str, field: &'static str) -> Result<String, MissingField> {
    let value = raw.trim();
    if value.is_empty() {
        Err(MissingField(field))
    } else {
        Ok(value.to_string())
    }
}

/// 按州气候数据预填的字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClimateFill {
    pub temperature: String,
    pub humidity: String,
    pub rainfall: String,
}

impl From<&Climate> for ClimateFill {
    fn from(c: &Climate) -> Self {
        Self {
            temperature: to_fixed((c.temp_min + c.temp_max) / 2.0, 1),
            humidity: to_fixed((c.humidity_min + c.humidity_max) / 2.0, 0),
            rainfall: to_fixed((c.rainfall_min + c.rainfall_max) / 2.0, 0),
        }
    }
}

/// 固定小数位格式化，恰好一半时取较大值
fn to_fixed(value: f64, decimals: u32) -> String {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale + 0.5).floor() / scale;
    format!("{:.*}", decimals as usize, rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormValues {
        FormValues {
            state: "Punjab".into(),
            district: "Ludhiana".into(),
            soil_type: "Alluvial".into(),
            season: "Rabi".into(),
            n: "80".into(),
            p: "40".into(),
            k: "40".into(),
            temperature: "20".into(),
            humidity: "60".into(),
            ph: "6.5".into(),
            rainfall: "800".into(),
            ..FormValues::default()
        }
    }

    #[test]
    fn simulation_adjusts_rainfall_and_temperature() {
        let mut values = filled();
        values.rainfall_change = "-25".into();
        values.temp_change = "1.5".into();

        let req = values.to_request().unwrap();
        assert_eq!(req.rainfall, 600.0);
        assert_eq!(req.temperature, 21.5);
        assert_eq!(req.area, 1.0);
        assert_eq!(req.state, "Punjab");
    }

    #[test]
    fn rainfall_slider_gives_exact_totals() {
        let mut values = filled();
        values.rainfall = "900".into();
        values.rainfall_change = "10".into();
        values.temperature = "28".into();
        values.temp_change = "-2".into();

        let req = values.to_request().unwrap();
        assert_eq!(req.rainfall, 990.0);
        assert_eq!(req.temperature, 26.0);
        assert_eq!(serde_json::to_value(&req).unwrap()["rainfall"], 990.0);
    }

    #[test]
    fn area_falls_back_to_one_hectare() {
        for raw in ["", "0", "abc"] {
            let mut values = filled();
            values.area = raw.into();
            assert_eq!(values.to_request().unwrap().area, 1.0, "area {:?}", raw);
        }

        let mut values = filled();
        values.area = "2.5".into();
        assert_eq!(values.to_request().unwrap().area, 2.5);
    }

    #[test]
    fn missing_required_fields_are_reported() {
        let mut values = filled();
        values.ph = " ".into();
        assert_eq!(values.to_request(), Err(MissingField("ph")));

        let mut values = filled();
        values.district.clear();
        assert_eq!(values.to_request(), Err(MissingField("district")));
    }

    #[test]
    fn climate_fill_uses_midpoints() {
        let climate = Climate {
            temp_min: 20.0,
            temp_max: 24.5,
            humidity_min: 60.0,
            humidity_max: 71.0,
            rainfall_min: 700.0,
            rainfall_max: 1101.0,
        };
        let fill = ClimateFill::from(&climate);
        assert_eq!(fill.temperature, "22.3");
        assert_eq!(fill.humidity, "66");
        assert_eq!(fill.rainfall, "901");

        let mut values = FormValues::default();
        values.apply_climate(&fill);
        assert_eq!(values.rainfall, "901");
    }
}
