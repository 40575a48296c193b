//! Feed content pipeline.
//!
//! The feed fills from a three-stage cascade: stored posts, then an
//! AI-generated seed batch, then a static fallback. Each stage's decoding
//! lives here; the cascade ordering itself is in `App::update`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::capabilities::genai::{GenerateRequest, AiModelId, FEED_SEED_PROMPT};
use crate::capabilities::GenAiError;
use crate::model::{Author, Post, PostId, UnixTimeMs, UserId};

/// Shape the seed prompt asks the generator for, one entry per post.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPost {
    pub content: String,
    pub likes: u32,
    pub comments: u32,
    pub username: String,
    pub handle: String,
    pub has_image: bool,
}

/// Request for the seed batch: JSON mode, default model.
pub fn feed_seed_request() -> Result<GenerateRequest, GenAiError> {
    Ok(GenerateRequest::new(AiModelId::Gemini3FlashPreview, FEED_SEED_PROMPT)?.with_json_response())
}

/// Decode a generated seed batch into posts. Returns `None` when the
/// response is not the expected JSON array, so the caller can fall through
/// to the static fallback.
pub fn parse_generated_batch(text: &str, now: UnixTimeMs) -> Option<Vec<Post>> {
    let batch: Vec<GeneratedPost> = serde_json::from_str(text.trim()).ok()?;
    if batch.is_empty() {
        return None;
    }
    let posts = batch
        .into_iter()
        .enumerate()
        .map(|(i, generated)| {
            let image_url = generated
                .has_image
                .then(|| format!("https://picsum.photos/600/400?random={}", i + 200));
            Post {
                id: PostId::random(),
                author: Author {
                    id: UserId(format!("gen-{i}")),
                    username: generated.username,
                    handle: generated.handle,
                    avatar_url: format!("https://picsum.photos/100/100?random={}", i + 50),
                },
                content: generated.content,
                image_url,
                likes: generated.likes,
                comments: generated.comments,
                liked_by_me: false,
                created_at: now,
                location: None,
                target: None,
                visibility: None,
            }
        })
        .collect();
    Some(posts)
}

/// Last line of the cascade. The feed is never empty.
pub fn fallback_posts(now: UnixTimeMs) -> Vec<Post> {
    vec![Post {
        id: PostId("fallback-1".to_string()),
        author: Author {
            id: UserId("system".to_string()),
            username: "EarthSystem".to_string(),
            handle: "@system".to_string(),
            avatar_url: "https://picsum.photos/100/100?random=1".to_string(),
        },
        content: "Welcome to EarthPost! Configure your Firebase credentials in \
                  services/firebase.ts to enable live features."
            .to_string(),
        image_url: None,
        likes: 0,
        comments: 0,
        liked_by_me: false,
        created_at: now,
        location: None,
        target: None,
        visibility: None,
    }]
}

/// Decode a query result leniently: malformed documents are logged and
/// skipped rather than failing the whole feed.
pub fn posts_from_docs(docs: Vec<Value>) -> Vec<Post> {
    docs.into_iter()
        .filter_map(|doc| match serde_json::from_value::<Post>(doc) {
            Ok(post) => Some(post),
            Err(err) => {
                debug!(%err, "skipping malformed post document");
                None
            }
        })
        .collect()
}

/// Serialize a post for seeding back into the store.
pub fn post_doc(post: &Post) -> Option<Value> {
    serde_json::to_value(post).ok()
}
