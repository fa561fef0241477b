use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub text: String,
    pub level: AlertLevel,
}

/// Alert envelope used by every Traffic Ops error body:
/// `{"alerts": [{"text": "...", "level": "error"}]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alerts {
    pub alerts: Vec<Alert>,
}

impl Alerts {
    pub fn new(text: impl Into<String>, level: AlertLevel) -> Self {
        Self {
            alerts: vec![Alert {
                text: text.into(),
                level,
            }],
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, AlertLevel::Error)
    }
}
