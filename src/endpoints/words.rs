use std::num::NonZeroU32;

use crate::dispatcher::{Dispatcher, RequestOptions};
use crate::error::ApiResult;

pub const DEFAULT_WORD_LIMIT: NonZeroU32 = match NonZeroU32::new(100) {
    Some(limit) => limit,
    None => unreachable!(),
};

/// Random words to build a test prompt from.
pub async fn get_words(api: &Dispatcher, limit: NonZeroU32) -> ApiResult<Vec<String>> {
    api.request(&format!("/api/words?limit={limit}"), RequestOptions::get())
        .await
}
