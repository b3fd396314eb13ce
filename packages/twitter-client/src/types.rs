//! Twitter API request and response types.

use serde::{Deserialize, Serialize};

/// Authenticated user, from `GET /2/users/me`.
#[derive(Debug, Clone, Deserialize)]
pub struct TwitterUser {
    pub id: String,
    pub name: String,
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserResponse {
    pub data: TwitterUser,
}

/// Response from the v1.1 media upload endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaUploadResponse {
    pub media_id: u64,
    pub media_id_string: String,
}

/// `POST /2/tweets` request body.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateTweetRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<TweetMedia>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TweetMedia {
    pub media_ids: Vec<String>,
}

/// Created tweet, from `POST /2/tweets`.
#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TweetResponse {
    pub data: Tweet,
}
