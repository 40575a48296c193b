//! Events: everything that can happen to the app.
//!
//! User intents and shell callbacks funnel through one enum so the entire
//! behavior of the core is `update(event, model)`. Input payloads use
//! validated newtypes; an `Event` that exists is already well-formed.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::capabilities::genai::{GenAiError, GenAiPurpose};
use crate::capabilities::store::{StoreError, StoreOutput};
use crate::capabilities::{AiModelId, AuthErrorCode, AuthFlow, AuthIdentity, StoreContext};
use crate::gesture::Slot;
use crate::model::{
    FeedMode, FeedSubMode, LifeItemId, MessageId, NavItem, PluginId, PostId, PostTarget, ProjectId,
    ProjectType, ProjectVisibility, RoomCategory, RoomId, Visibility,
};
use crate::{MAX_CHAT_MESSAGE_CHARS, MAX_POST_CHARS, MAX_ROOM_NAME_CHARS};

/// A secret string (passwords). Redacted in `Debug`, wiped on drop.
#[derive(Clone, Serialize, Deserialize)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Non-empty text with a character-count ceiling. Construction keeps the
/// original string; emptiness is judged on the trimmed view so
/// whitespace-only input fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BoundedText<const MAX: usize>(String);

impl<const MAX: usize> BoundedText<MAX> {
    pub fn new(value: impl Into<String>) -> Result<Self, TextError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(TextError::Empty);
        }
        let len = value.chars().count();
        if len > MAX {
            return Err(TextError::TooLong { len, max: MAX });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<const MAX: usize> TryFrom<String> for BoundedText<MAX> {
    type Error = TextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<const MAX: usize> From<BoundedText<MAX>> for String {
    fn from(text: BoundedText<MAX>) -> Self {
        text.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    #[error("text is empty")]
    Empty,

    #[error("text length {len} exceeds {max}")]
    TooLong { len: usize, max: usize },
}

pub type PostBody = BoundedText<MAX_POST_CHARS>;
pub type ChatText = BoundedText<MAX_CHAT_MESSAGE_CHARS>;
pub type RoomName = BoundedText<MAX_ROOM_NAME_CHARS>;

/// An http(s) URL, parsed at the boundary. `javascript:` and `data:` schemes
/// never make it into the model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ValidatedUrl(String);

impl ValidatedUrl {
    pub fn new(value: impl Into<String>) -> Result<Self, UrlError> {
        let value = value.into();
        let parsed = url::Url::parse(&value).map_err(|e| UrlError::Malformed(e.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => Ok(Self(value)),
            other => Err(UrlError::DisallowedScheme(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ValidatedUrl {
    type Error = UrlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ValidatedUrl> for String {
    fn from(url: ValidatedUrl) -> Self {
        url.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("malformed url: {0}")]
    Malformed(String),

    #[error("scheme {0:?} is not allowed")]
    DisallowedScheme(String),
}

// --- Event payloads ---

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: Secret,
    pub remember: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignUpForm {
    pub username: String,
    pub email: String,
    pub password: Secret,
}

/// Which surface the user picked a country from on the globe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationFeedMode {
    Posts,
    ChatRoom,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationPick {
    pub raw_name: String,
    pub country_code: String,
    pub mode: LocationFeedMode,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub content: PostBody,
    pub image_url: Option<ValidatedUrl>,
    pub target: PostTarget,
    pub visibility: Visibility,
    pub now_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRoom {
    pub name: RoomName,
    pub description: String,
    pub category: RoomCategory,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub project_type: ProjectType,
    pub visibility: ProjectVisibility,
    pub github_url: Option<ValidatedUrl>,
    pub website_url: Option<ValidatedUrl>,
    pub tags: Vec<String>,
    pub help_requested: bool,
    pub now_ms: u64,
}

/// Partial profile update; `None` fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEdit {
    pub username: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub avatar_url: Option<ValidatedUrl>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StudioSettings {
    pub model: AiModelId,
    pub system_instruction: String,
    pub temperature: f32,
}

// Completion envelopes. `Result` does not derive serde cleanly across the
// shell boundary, so success and failure are separate events.

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreSuccess {
    pub context: StoreContext,
    pub output: StoreOutput,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreFailure {
    pub context: StoreContext,
    pub error: StoreError,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenAiSuccess {
    pub purpose: GenAiPurpose,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenAiFailure {
    pub purpose: GenAiPurpose,
    pub error: GenAiError,
}

/// Every input the core reacts to. Large payloads are boxed to keep the enum
/// itself small.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Event {
    // Boot and session
    Booted { backend_configured: bool, now_ms: u64 },
    SessionChanged(Option<Box<AuthIdentity>>),
    LocalSessionLoaded { raw: Option<String> },
    SignInSubmitted(Box<SignInForm>),
    SignUpSubmitted(Box<SignUpForm>),
    AuthFailed { flow: AuthFlow, code: AuthErrorCode },
    SignOutRequested,
    SignUpOpened,
    SignInOpened,

    // Navigation
    NavSelected(NavItem),
    SlotPressed(Slot),
    SlotReleased(Slot),
    SlotPointerLeft(Slot),
    LongPressElapsed(Slot),
    PluginPicked { slot: Slot, plugin: PluginId },
    PluginPickerClosed,
    GlobeOpened,
    GlobeClosed,
    LocationSelected(Box<LocationPick>),
    FeedModeSelected(FeedMode),
    FeedSubModeSelected(FeedSubMode),
    RoomOpened(RoomId),
    LifeItemSelected(LifeItemId),
    PublicProfileOpened,
    ProjectOpened(ProjectId),
    StudioOpened,
    BackRequested,
    TopBarHomePressed { now_ms: u64 },

    // Feed
    FeedRefreshRequested { now_ms: u64 },
    ComposeOpened,
    ComposeClosed,
    ComposeSubmitted(Box<NewPost>),
    ComposeAssistRequested { topic: String },
    PostLikeToggled(PostId),

    // Chat
    RoomCreateOpened,
    RoomCreateClosed,
    RoomCreateSubmitted(Box<NewRoom>),
    ChatMessageSent { text: ChatText, now_ms: u64 },
    ReactionAdded { message_id: MessageId, emoji: String },
    RephraseRequested { draft: String },
    TranslateRequested(MessageId),
    AssistDismissed,

    // Profile, projects, studio
    ProfileEdited(Box<ProfileEdit>),
    ProjectAdded(Box<NewProject>),
    StudioSettingsUpdated(Box<StudioSettings>),
    StudioRunRequested { prompt: String },

    // Shell callbacks
    StoreCompleted(Box<StoreSuccess>),
    StoreFailed(Box<StoreFailure>),
    GenAiCompleted(Box<GenAiSuccess>),
    GenAiFailed(Box<GenAiFailure>),

    // Overlay dismissal
    ToastDismissed,
    ErrorDismissed,
}
