use crate::dispatcher::{Dispatcher, RequestOptions};
use crate::endpoints::path_segment;
use crate::error::ApiResult;
use crate::models::UserProfile;

pub async fn get_user_profile(api: &Dispatcher, username: &str) -> ApiResult<UserProfile> {
    api.request(
        &format!("/api/profile/{}", path_segment(username)),
        RequestOptions::get(),
    )
    .await
}
