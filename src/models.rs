use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Test durations, in seconds, the service accepts.
pub const SUPPORTED_TIME_MODES: [u32; 3] = [15, 30, 60];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub username: String,
}

/// Server snapshot of a user's account and aggregate stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub level: u32,
    pub total_tests: u32,
    pub total_time_seconds: u64,
    pub best_wpm: f64,
    pub best_accuracy: f64,
    pub total_experience: u64,
    pub created_at: String,
}

/// A finished test as submitted by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResultCreate {
    pub wpm: f64,
    pub raw_wpm: f64,
    pub accuracy: f64,
    pub burst_wpm: f64,
    pub total_errors: u32,
    pub time_mode: u32,
    pub test_duration: u32,
    #[serde(default)]
    pub consistency: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidTestResult {
    #[error("accuracy must be between 0 and 100, got {0}")]
    AccuracyOutOfRange(f64),
    #[error("wpm must not be negative, got {0}")]
    NegativeWpm(f64),
    #[error("unsupported time mode {0}s (supported: 15, 30, 60)")]
    UnsupportedTimeMode(u32),
}

impl TestResultCreate {
    /// Request body for `POST /api/results`.
    pub fn to_json(&self) -> Value {
        json!({
            "wpm": self.wpm,
            "raw_wpm": self.raw_wpm,
            "accuracy": self.accuracy,
            "burst_wpm": self.burst_wpm,
            "total_errors": self.total_errors,
            "time_mode": self.time_mode,
            "test_duration": self.test_duration,
            "consistency": self.consistency,
        })
    }

    pub fn validate(&self) -> Result<(), InvalidTestResult> {
        if !(0.0..=100.0).contains(&self.accuracy) {
            return Err(InvalidTestResult::AccuracyOutOfRange(self.accuracy));
        }
        if self.wpm.is_nan() || self.wpm < 0.0 {
            return Err(InvalidTestResult::NegativeWpm(self.wpm));
        }
        if !SUPPORTED_TIME_MODES.contains(&self.time_mode) {
            return Err(InvalidTestResult::UnsupportedTimeMode(self.time_mode));
        }
        Ok(())
    }
}

/// A stored test result as echoed back by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub id: i64,
    pub username: String,
    pub wpm: f64,
    pub raw_wpm: f64,
    pub accuracy: f64,
    pub burst_wpm: f64,
    pub total_errors: u32,
    pub time_mode: u32,
    pub test_duration: u32,
    pub consistency: f64,
    pub created_at: String,
}

/// Aggregate ranking row (WPM and accuracy boards).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    #[serde(default)]
    pub wpm: Option<f64>,
    #[serde(default)]
    pub accuracy: Option<f64>,
    pub total_tests: u32,
    pub best_wpm: f64,
    pub best_accuracy: f64,
    pub level: u32,
}

/// Best run per user within one time mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeModeLeaderboardEntry {
    pub username: String,
    pub wpm: f64,
    pub accuracy: f64,
    pub raw: f64,
    pub consistency: f64,
    pub date: String,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyXpLeaderboardEntry {
    pub username: String,
    pub xp_gained: u64,
    pub time_typed: u64,
    pub last_activity: String,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub message: String,
}
