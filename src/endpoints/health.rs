use crate::dispatcher::{Dispatcher, RequestOptions};
use crate::error::ApiResult;
use crate::models::HealthStatus;

pub async fn check(api: &Dispatcher) -> ApiResult<HealthStatus> {
    api.request("/", RequestOptions::get()).await
}
