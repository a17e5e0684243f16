//! Ranked read-only queries. Entries come back in server order.

use crate::dispatcher::{Dispatcher, RequestOptions};
use crate::error::ApiResult;
use crate::models::{LeaderboardEntry, TimeModeLeaderboardEntry, WeeklyXpLeaderboardEntry};

pub const DEFAULT_LEADERBOARD_LIMIT: u32 = 100;

pub async fn get_leaderboard_wpm(api: &Dispatcher, limit: u32) -> ApiResult<Vec<LeaderboardEntry>> {
    api.request(&format!("/api/leaderboard/wpm?limit={limit}"), RequestOptions::get())
        .await
}

pub async fn get_leaderboard_accuracy(
    api: &Dispatcher,
    limit: u32,
) -> ApiResult<Vec<LeaderboardEntry>> {
    api.request(
        &format!("/api/leaderboard/accuracy?limit={limit}"),
        RequestOptions::get(),
    )
    .await
}

/// All-time board for one test duration. `mode` is passed through as-is.
pub async fn get_leaderboard_by_time_mode(
    api: &Dispatcher,
    mode: u32,
    limit: u32,
) -> ApiResult<Vec<TimeModeLeaderboardEntry>> {
    api.request(
        &format!("/api/leaderboard/time-mode/{mode}?limit={limit}"),
        RequestOptions::get(),
    )
    .await
}

/// Today's board for one test duration.
pub async fn get_daily_leaderboard_by_time_mode(
    api: &Dispatcher,
    mode: u32,
    limit: u32,
) -> ApiResult<Vec<TimeModeLeaderboardEntry>> {
    api.request(
        &format!("/api/leaderboard/daily/time-mode/{mode}?limit={limit}"),
        RequestOptions::get(),
    )
    .await
}

pub async fn get_weekly_xp_leaderboard(
    api: &Dispatcher,
    limit: u32,
) -> ApiResult<Vec<WeeklyXpLeaderboardEntry>> {
    api.request(
        &format!("/api/leaderboard/weekly-xp?limit={limit}"),
        RequestOptions::get(),
    )
    .await
}
