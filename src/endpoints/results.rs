use crate::dispatcher::{Dispatcher, RequestOptions};
use crate::endpoints::path_segment;
use crate::error::ApiResult;
use crate::models::{TestResult, TestResultCreate};

pub const DEFAULT_RESULTS_LIMIT: u32 = 50;

/// Submit a finished test; the server echoes it back with id and timestamp.
pub async fn save_test_result(api: &Dispatcher, payload: &TestResultCreate) -> ApiResult<TestResult> {
    api.request("/api/results", RequestOptions::post_json(payload.to_json()))
        .await
}

pub async fn get_user_results(
    api: &Dispatcher,
    username: &str,
    limit: u32,
) -> ApiResult<Vec<TestResult>> {
    api.request(
        &format!("/api/results/user/{}?limit={limit}", path_segment(username)),
        RequestOptions::get(),
    )
    .await
}
