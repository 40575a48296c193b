//! EarthPost core: a headless state machine for the EarthPost social client.
//!
//! The crate owns all application state and behavior; a thin platform shell
//! renders the [`ViewModel`], forwards user intents as [`Event`]s, and
//! executes the [`Effect`]s each update returns. The shell holds no state of
//! its own, which is what makes the navigation rules and fallback cascades
//! here testable without any UI.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]

pub mod capabilities;
pub mod event;
pub mod feed;
pub mod geo;
pub mod gesture;
pub mod model;
pub mod session;

use serde::{Deserialize, Serialize};

pub use app::App;
pub use capabilities::Effect;
pub use event::Event;
pub use model::{Model, ViewState};

// --- Tuning constants ---

/// Hold threshold separating a slot tap from a long-press.
pub const LONG_PRESS_MS: u64 = 600;
pub const FEED_QUERY_LIMIT: u32 = 20;
/// Posts requested from the generator when the store comes back empty.
pub const GENERATED_BATCH_SIZE: usize = 5;
pub const GENERAL_ROOM_MEMBERS_MIN: u32 = 50;
pub const GENERAL_ROOM_MEMBERS_MAX: u32 = 250;
/// Credentials pre-filled on the sign-in form in demo mode.
pub const DEMO_EMAIL: &str = "explorer@earthpost.app";
pub const DEMO_PASSWORD: &str = "password123";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a helpful and creative social media \
    assistant. Your goal is to help pioneers build the future.";
/// Local-storage key for the demo-mode session document.
pub const SESSION_SLOT_KEY: &str = "ep_user";
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_POST_CHARS: usize = 2_000;
pub const MAX_CHAT_MESSAGE_CHARS: usize = 1_000;
pub const MAX_ROOM_NAME_CHARS: usize = 80;
/// The reaction palette offered on chat messages. Arbitrary emoji are not
/// accepted.
pub const QUICK_REACTIONS: &[&str] = &["👍", "❤️", "😂", "😮", "😢", "🔥"];

// --- Error taxonomy ---

/// How loudly a failure surfaces.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSeverity {
    /// Logged only; the user sees degraded content, not an error.
    Silent,
    /// Shown as a toast and auto-dismissed.
    Transient,
    /// Shown as a dismissible banner with a retry affordance.
    Recoverable,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorKind {
    /// Sign-in / sign-up failure; rendered inline on the form.
    Auth { code: capabilities::AuthErrorCode },
    /// Extended-profile lookup failed; the session degrades instead.
    ProfileFetch,
    /// The feed store query failed.
    FeedStore,
    /// The generated seed batch failed or did not parse.
    FeedGenerator,
    /// An interactive AI request (rephrase, translate, studio, compose).
    GenerativeInteractive,
    /// A best-effort write was dropped.
    BestEffortWrite,
    /// Local key-value storage failure.
    Storage,
    /// Input rejected at the boundary.
    Validation,
}

impl ErrorKind {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Auth { code } => code.code(),
            Self::ProfileFetch => "session/profile-fetch",
            Self::FeedStore => "feed/store",
            Self::FeedGenerator => "feed/generator",
            Self::GenerativeInteractive => "ai/interactive",
            Self::BestEffortWrite => "write/best-effort",
            Self::Storage => "storage/local",
            Self::Validation => "input/validation",
        }
    }

    pub const fn default_severity(&self) -> ErrorSeverity {
        match self {
            // Both feed stages have a further fallback; the user always gets
            // content.
            Self::ProfileFetch | Self::FeedStore | Self::FeedGenerator | Self::BestEffortWrite => {
                ErrorSeverity::Silent
            }
            Self::Auth { .. } | Self::Validation => ErrorSeverity::Transient,
            Self::GenerativeInteractive | Self::Storage => ErrorSeverity::Recoverable,
        }
    }

    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::FeedStore | Self::FeedGenerator | Self::GenerativeInteractive | Self::Storage
        )
    }

    pub fn user_facing_message(&self) -> &'static str {
        match self {
            Self::Auth { .. } => "Authentication failed.",
            Self::ProfileFetch => "Some profile details are temporarily unavailable.",
            Self::FeedStore | Self::FeedGenerator => "Showing offline content.",
            Self::GenerativeInteractive => "The AI assistant is unavailable right now.",
            Self::BestEffortWrite => "Some changes may not have been saved.",
            Self::Storage => "Could not access local storage.",
            Self::Validation => "That input is not valid.",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{}: {detail}", kind.code())]
pub struct AppError {
    pub kind: ErrorKind,
    pub detail: String,
    pub severity: ErrorSeverity,
}

impl AppError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        let severity = kind.default_severity();
        Self {
            kind,
            detail: detail.into(),
            severity,
        }
    }

    pub fn with_severity(mut self, severity: ErrorSeverity) -> Self {
        self.severity = severity;
        self
    }
}

impl From<capabilities::AuthError> for AppError {
    fn from(err: capabilities::AuthError) -> Self {
        let detail = err.detail.clone();
        Self::new(ErrorKind::Auth { code: err.code }, detail)
    }
}

impl From<capabilities::StorageError> for AppError {
    fn from(err: capabilities::StorageError) -> Self {
        Self::new(ErrorKind::Storage, err.to_string())
    }
}

impl From<event::TextError> for AppError {
    fn from(err: event::TextError) -> Self {
        Self::new(ErrorKind::Validation, err.to_string())
    }
}

impl From<event::UrlError> for AppError {
    fn from(err: event::UrlError) -> Self {
        Self::new(ErrorKind::Validation, err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

// --- Toasts ---

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub const fn default_duration_ms(&self) -> u64 {
        match self {
            Self::Success => 2_500,
            Self::Info => 3_000,
            Self::Error => 4_000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastMessage {
    pub message: String,
    pub kind: ToastKind,
    pub duration_ms: u64,
}

impl ToastMessage {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            duration_ms: kind.default_duration_ms(),
        }
    }
}

/// Compact relative timestamp for feed and chat rows.
pub fn format_time_ago(now: UnixTimeMs, then: UnixTimeMs) -> String {
    let delta_s = now.0.saturating_sub(then.0) / 1_000;
    if delta_s < 60 {
        "now".to_string()
    } else if delta_s < 3_600 {
        format!("{}m", delta_s / 60)
    } else if delta_s < 86_400 {
        format!("{}h", delta_s / 3_600)
    } else {
        format!("{}d", delta_s / 86_400)
    }
}

// --- View model ---

use capabilities::genai::AiModelId;
use gesture::Slot;
use model::{
    ChatAssist, ChatMessage, ChatRoom, ComposeDraft, FeedMode, FeedSubMode, LifeFeedItem, NavItem,
    PluginId, Post, Project, UnixTimeMs, User,
};

// The view-model tree is output-only: the shell renders it and never sends
// one back, so these types serialize but do not deserialize.

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PostView {
    pub post: Post,
    pub time_ago: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MessageView {
    pub message: ChatMessage,
    pub time_ago: String,
}

/// The location-scoped pane shown when a country filter is active.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LocationPane {
    pub location: String,
    pub sub_mode: FeedSubMode,
    pub rooms: Vec<ChatRoom>,
    pub active_room: Option<ChatRoom>,
    pub messages: Vec<MessageView>,
    pub assist: Option<ChatAssist>,
    pub room_create_open: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DemoCredentials {
    pub email: &'static str,
    pub password: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StudioView {
    pub active_model: AiModelId,
    pub model_name: &'static str,
    pub system_instruction: String,
    pub temperature: f32,
    pub output: Option<String>,
    pub running: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ComposeView {
    pub drafts: Vec<ComposeDraft>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserFacingError {
    pub code: &'static str,
    pub message: &'static str,
    pub can_retry: bool,
}

impl From<&AppError> for UserFacingError {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.kind.code(),
            message: err.kind.user_facing_message(),
            can_retry: err.kind.is_retryable(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    Loading,
    SignIn {
        form_error: Option<String>,
        demo: Option<DemoCredentials>,
    },
    SignUp {
        form_error: Option<String>,
    },
    Feed {
        posts: Vec<PostView>,
        location: Option<LocationPane>,
    },
    Profile {
        user: User,
    },
    PluginView {
        plugin: PluginId,
        name: &'static str,
        description: &'static str,
    },
    EarthExplorer,
    MyFeed {
        items: Vec<LifeFeedItem>,
    },
    LifeItemWorkspace {
        item: LifeFeedItem,
    },
    PublicProfile {
        user: User,
        posts: Vec<PostView>,
        projects: Vec<Project>,
    },
    ProjectDetail {
        project: Project,
    },
    AiStudio(StudioView),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViewModel {
    pub screen: Screen,
    pub nav: NavItem,
    pub feed_mode: FeedMode,
    /// Top bar, mode switcher, and bottom navigation.
    pub show_chrome: bool,
    pub show_sub_header: bool,
    pub slot_left: PluginId,
    pub slot_right: PluginId,
    /// When set, the plugin picker overlay is open for this slot.
    pub plugin_picker: Option<Slot>,
    /// Inline plugin overlay (search, notifications) rendered over the
    /// current screen.
    pub inline_plugin: Option<PluginId>,
    pub compose: Option<ComposeView>,
    pub is_authenticated: bool,
    pub is_refreshing: bool,
    pub toast: Option<ToastMessage>,
    pub error: Option<UserFacingError>,
}

pub mod app {
    //! The update loop: one function from `(Event, Model)` to effects, and
    //! one projection from `Model` to `ViewModel`.

    use rand::Rng;
    use tracing::{debug, warn};

    use super::capabilities::genai::{
        compose_prompt, mock_compose_text, rephrase_prompt, translate_prompt, ComposeModel,
        GenAiPurpose, GenerateRequest,
    };
    use super::capabilities::store::{Collection, StoreOperation, StoreOutput};
    use super::capabilities::{
        AuthIdentity, AuthOperation, Effect, StorageOperation, StoreContext, TimerId,
    };
    use super::event::{Event, LocationFeedMode};
    use super::feed;
    use super::geo;
    use super::gesture::{GestureFire, GestureInput, Slot, TimerCommand};
    use super::model::{
        AssistOutcome, Author, ChatAssist, ChatAssistKind, ChatMessage, ChatRoom, ComposeDraft,
        FeedMode, FeedSubMode, MemberStatus, MessageId, Model, NavItem, Post, PostId, PostTarget,
        Project, ProjectId, ProjectMember, ProjectRole, RoomCategory, RoomId, UnixTimeMs, User,
        UserId, ViewState,
    };
    use super::{
        session, AppError, ComposeView, DemoCredentials, ErrorKind, LocationPane, MessageView,
        PostView, Screen, StudioView, ToastKind, UserFacingError, ViewModel, DEMO_EMAIL,
        DEMO_PASSWORD, FEED_QUERY_LIMIT, GENERAL_ROOM_MEMBERS_MAX, GENERAL_ROOM_MEMBERS_MIN,
        LONG_PRESS_MS, QUICK_REACTIONS, SESSION_SLOT_KEY,
    };

    #[derive(Default)]
    pub struct App;

    impl App {
        /// Apply one event. Returns the effects the shell should run; the
        /// list always ends with [`Effect::Render`].
        pub fn update(&self, event: Event, model: &mut Model) -> Vec<Effect> {
            let mut effects = Vec::new();

            match event {
                // --- Boot and session ---
                Event::Booted { backend_configured, now_ms } => {
                    model.backend_configured = backend_configured;
                    model.now_ms = UnixTimeMs(now_ms);
                    model.state = ViewState::Loading;
                    if backend_configured {
                        effects.push(Effect::Auth(AuthOperation::Subscribe));
                    } else if let Ok(op) = StorageOperation::read(SESSION_SLOT_KEY) {
                        effects.push(Effect::Storage(op));
                    }
                }

                Event::LocalSessionLoaded { raw } => {
                    match raw.as_deref().and_then(session::decode_slot) {
                        Some(user) => establish_session(model, user, &mut effects),
                        None => {
                            model.state = ViewState::SignIn;
                        }
                    }
                }

                Event::SessionChanged(Some(identity)) => {
                    // Every firing fully re-decides the session; a profile
                    // fetch is always issued, even if one is in flight.
                    match StoreOperation::get(Collection::Users, &identity.uid) {
                        Ok(op) => effects.push(Effect::store(
                            StoreContext::ProfileFetch { identity },
                            op,
                        )),
                        Err(err) => {
                            debug!(%err, "uid unusable as document id, degrading");
                            let user = session::minimal_user(&identity);
                            establish_session(model, user, &mut effects);
                        }
                    }
                }

                Event::SessionChanged(None) => {
                    drop_session(model);
                }

                Event::SignInSubmitted(form) => {
                    model.sign_in_error = None;
                    if model.backend_configured {
                        match AuthOperation::sign_in(&form.email, form.password.clone(), form.remember)
                        {
                            Ok(op) => effects.push(Effect::Auth(op)),
                            Err(err) => {
                                model.sign_in_error = Some(
                                    err.code
                                        .user_message(super::capabilities::AuthFlow::SignIn)
                                        .to_string(),
                                );
                            }
                        }
                    } else {
                        // Demo mode accepts any credentials.
                        let user = session::demo_sign_in_user(&form.email);
                        persist_demo_session(&user, &mut effects);
                        establish_session(model, user, &mut effects);
                    }
                }

                Event::SignUpSubmitted(form) => {
                    model.sign_up_error = None;
                    match AuthOperation::sign_up(&form.username, &form.email, form.password.clone())
                    {
                        Ok(op) => {
                            if model.backend_configured {
                                effects.push(Effect::Auth(op));
                            } else {
                                let user =
                                    session::demo_sign_up_user(&form.username, model.now_ms.0);
                                persist_demo_session(&user, &mut effects);
                                establish_session(model, user, &mut effects);
                            }
                        }
                        Err(err) => {
                            model.sign_up_error = Some(
                                err.code
                                    .user_message(super::capabilities::AuthFlow::SignUp)
                                    .to_string(),
                            );
                        }
                    }
                }

                Event::AuthFailed { flow, code } => {
                    let message = code.user_message(flow).to_string();
                    match flow {
                        super::capabilities::AuthFlow::SignIn => {
                            model.sign_in_error = Some(message);
                            model.state = ViewState::SignIn;
                        }
                        super::capabilities::AuthFlow::SignUp => {
                            model.sign_up_error = Some(message);
                            model.state = ViewState::SignUp;
                        }
                    }
                }

                Event::SignOutRequested => {
                    if model.backend_configured {
                        effects.push(Effect::Auth(AuthOperation::SignOut));
                    }
                    if let Ok(op) = StorageOperation::delete(SESSION_SLOT_KEY) {
                        effects.push(Effect::Storage(op));
                    }
                    drop_session(model);
                }

                Event::SignUpOpened => {
                    model.sign_up_error = None;
                    model.state = ViewState::SignUp;
                }

                Event::SignInOpened => {
                    model.sign_in_error = None;
                    model.state = ViewState::SignIn;
                }

                // --- Navigation ---
                Event::NavSelected(item) => match item {
                    NavItem::Home => {
                        go_home(model);
                    }
                    NavItem::Create => {
                        model.nav = NavItem::Create;
                        model.compose_open = true;
                        model.compose_drafts.clear();
                    }
                    NavItem::Menu => {
                        model.state = ViewState::Profile;
                        model.nav = NavItem::Menu;
                        model.active_plugin = None;
                        model.active_life_item = None;
                    }
                    NavItem::SlotLeft => activate_slot(model, Slot::Left),
                    NavItem::SlotRight => activate_slot(model, Slot::Right),
                },

                Event::SlotPressed(slot) => {
                    apply_gesture(model, GestureInput::Pressed(slot), &mut effects);
                }
                Event::SlotReleased(slot) => {
                    apply_gesture(model, GestureInput::Released(slot), &mut effects);
                }
                Event::SlotPointerLeft(slot) => {
                    apply_gesture(model, GestureInput::PointerLeft(slot), &mut effects);
                }
                Event::LongPressElapsed(slot) => {
                    apply_gesture(model, GestureInput::TimerElapsed(slot), &mut effects);
                }

                Event::PluginPicked { slot, plugin } => {
                    model.set_slot_plugin(slot, plugin);
                    model.plugin_picker = None;
                    model.show_toast(
                        format!("{} pinned to your dock", plugin.info().name),
                        ToastKind::Success,
                    );
                }

                Event::PluginPickerClosed => {
                    model.plugin_picker = None;
                }

                Event::GlobeOpened => {
                    if model.is_authenticated() {
                        model.state = ViewState::EarthExplorer;
                    }
                }

                Event::GlobeClosed => {
                    if model.state == ViewState::EarthExplorer {
                        model.state = ViewState::Feed;
                    }
                }

                Event::LocationSelected(pick) => {
                    let location = geo::normalize_location(&pick.raw_name, &pick.country_code);
                    ensure_general_room(model, &location);
                    model.location_filter = Some(location);
                    model.feed_mode = FeedMode::Global;
                    model.feed_sub_mode = match pick.mode {
                        LocationFeedMode::Posts => FeedSubMode::Posts,
                        LocationFeedMode::ChatRoom => FeedSubMode::ChatHub,
                    };
                    model.active_room = None;
                    model.state = ViewState::Feed;
                    model.nav = NavItem::Home;
                }

                Event::FeedModeSelected(mode) => {
                    if matches!(model.state, ViewState::Feed | ViewState::MyFeed) {
                        model.feed_mode = mode;
                        model.state = match mode {
                            FeedMode::Global => ViewState::Feed,
                            FeedMode::Personal => ViewState::MyFeed,
                        };
                    }
                }

                Event::FeedSubModeSelected(sub) => {
                    if model.location_filter.is_some() {
                        // ChatRoom is only reachable through RoomOpened.
                        model.feed_sub_mode = if sub == FeedSubMode::ChatRoom {
                            model.feed_sub_mode
                        } else {
                            model.active_room = None;
                            sub
                        };
                    }
                }

                Event::RoomOpened(room_id) => {
                    if let Some(room) = model.find_room(&room_id).cloned() {
                        if model.messages_for(&room_id).next().is_none() {
                            seed_welcome_messages(model, &room);
                        }
                        model.active_room = Some(room_id);
                        model.feed_sub_mode = FeedSubMode::ChatRoom;
                        model.chat_assist = None;
                        model.state = ViewState::Feed;
                    }
                }

                Event::LifeItemSelected(item_id) => {
                    if model.life_items.iter().any(|i| i.id == item_id) {
                        model.active_life_item = Some(item_id);
                        model.state = ViewState::LifeItemWorkspace;
                    }
                }

                Event::PublicProfileOpened => {
                    if model.is_authenticated() {
                        model.state = ViewState::PublicProfile;
                    }
                }

                Event::ProjectOpened(project_id) => {
                    if model.projects.iter().any(|p| p.id == project_id) {
                        model.active_project = Some(project_id);
                        model.state = ViewState::ProjectDetail;
                    }
                }

                Event::StudioOpened => {
                    if model.is_authenticated() {
                        model.state = ViewState::AiStudio;
                    }
                }

                Event::BackRequested => {
                    go_back(model);
                }

                Event::TopBarHomePressed { now_ms } => {
                    // The top-bar logo is a hard reset: back to the global
                    // feed and a fresh load, whatever mode the user was in.
                    model.now_ms = UnixTimeMs(now_ms);
                    model.feed_mode = FeedMode::Global;
                    go_home(model);
                    refresh_feed(model, &mut effects);
                }

                // --- Feed ---
                Event::FeedRefreshRequested { now_ms } => {
                    model.now_ms = UnixTimeMs(now_ms);
                    refresh_feed(model, &mut effects);
                }

                Event::ComposeOpened => {
                    if model.is_authenticated() {
                        model.compose_open = true;
                        model.compose_drafts.clear();
                    }
                }

                Event::ComposeClosed => {
                    model.compose_open = false;
                    model.compose_drafts.clear();
                }

                Event::ComposeSubmitted(new_post) => {
                    if let Some(author) = model.session.as_ref().map(User::author_ref) {
                        model.now_ms = UnixTimeMs(new_post.now_ms);
                        let post = build_post(author, *new_post);
                        route_to_target(model, &post);
                        model.posts.insert(0, post);
                        model.compose_open = false;
                        model.compose_drafts.clear();
                    }
                }

                Event::ComposeAssistRequested { topic } => {
                    if !topic.trim().is_empty() {
                        start_compose_assist(model, &topic, &mut effects);
                    }
                }

                Event::PostLikeToggled(post_id) => {
                    if let Some(post) = model.find_post_mut(&post_id) {
                        if post.liked_by_me {
                            post.likes = post.likes.saturating_sub(1);
                        } else {
                            post.likes += 1;
                        }
                        post.liked_by_me = !post.liked_by_me;
                    }
                }

                // --- Chat ---
                Event::RoomCreateOpened => {
                    if model.location_filter.is_some() {
                        model.room_create_open = true;
                    }
                }

                Event::RoomCreateClosed => {
                    model.room_create_open = false;
                }

                Event::RoomCreateSubmitted(new_room) => {
                    let country = model.location_filter.clone();
                    let creator = model.session.as_ref().map(|u| u.id.clone());
                    if let (Some(country), Some(creator)) = (country, creator) {
                        let room = ChatRoom {
                            id: RoomId::random(),
                            country,
                            name: new_room.name.as_str().to_string(),
                            description: new_room.description,
                            category: new_room.category,
                            member_count: 1,
                            last_message: None,
                            last_message_time: None,
                            created_by: creator,
                        };
                        let room_id = room.id.clone();
                        model.rooms.insert(0, room);
                        model.active_room = Some(room_id);
                        model.feed_sub_mode = FeedSubMode::ChatRoom;
                        model.room_create_open = false;
                    }
                }

                Event::ChatMessageSent { text, now_ms } => {
                    let author = model.session.as_ref().map(User::author_ref);
                    let room_id = model.active_room.clone();
                    if let (Some(author), Some(room_id)) = (author, room_id) {
                        model.now_ms = UnixTimeMs(now_ms);
                        let message = ChatMessage {
                            id: MessageId::random(),
                            room_id: room_id.clone(),
                            author,
                            text: text.as_str().to_string(),
                            sent_at: UnixTimeMs(now_ms),
                            translated: None,
                            reactions: std::collections::BTreeMap::new(),
                        };
                        if let Some(room) = model.rooms.iter_mut().find(|r| r.id == room_id) {
                            room.last_message = Some(message.text.clone());
                        }
                        model.messages.push(message);
                        model.chat_assist = None;
                    }
                }

                Event::ReactionAdded { message_id, emoji } => {
                    if QUICK_REACTIONS.contains(&emoji.as_str()) {
                        if let Some(message) = model.find_message_mut(&message_id) {
                            *message.reactions.entry(emoji).or_insert(0) += 1;
                        }
                    }
                }

                Event::RephraseRequested { draft } => {
                    let room_id = model.active_room.clone();
                    if let Some(room_id) = room_id {
                        if !draft.trim().is_empty() {
                            start_rephrase(model, room_id, &draft, &mut effects);
                        }
                    }
                }

                Event::TranslateRequested(message_id) => {
                    start_translate(model, message_id, &mut effects);
                }

                Event::AssistDismissed => {
                    model.chat_assist = None;
                }

                // --- Profile, projects, studio ---
                Event::ProfileEdited(edit) => {
                    if model.session.is_some() {
                        apply_profile_edit(model, *edit, &mut effects);
                    }
                }

                Event::ProjectAdded(new_project) => {
                    if let Some(user) = model.session.as_ref() {
                        model.now_ms = UnixTimeMs(new_project.now_ms);
                        let project = Project {
                            id: ProjectId::random(),
                            owner_id: user.id.clone(),
                            title: new_project.title,
                            description: new_project.description,
                            project_type: new_project.project_type,
                            visibility: new_project.visibility,
                            github_url: new_project.github_url.map(|u| u.into_inner()),
                            website_url: new_project.website_url.map(|u| u.into_inner()),
                            tags: new_project.tags,
                            help_requested: new_project.help_requested,
                            members: vec![ProjectMember {
                                user: user.author_ref(),
                                role: ProjectRole::Owner,
                                status: MemberStatus::Active,
                            }],
                            created_at: UnixTimeMs(new_project.now_ms),
                        };
                        let project_id = project.id.clone();
                        model.projects.insert(0, project);
                        model.active_project = Some(project_id);
                        model.state = ViewState::ProjectDetail;
                    }
                }

                Event::StudioSettingsUpdated(settings) => {
                    model.studio.active_model = settings.model;
                    model.studio.system_instruction = settings.system_instruction.clone();
                    if settings.temperature.is_finite()
                        && (0.0..=2.0).contains(&settings.temperature)
                    {
                        model.studio.temperature = settings.temperature;
                    }
                }

                Event::StudioRunRequested { prompt } => {
                    if !prompt.trim().is_empty() {
                        start_studio_run(model, &prompt, &mut effects);
                    }
                }

                // --- Shell callbacks ---
                Event::StoreCompleted(success) => {
                    handle_store_completed(model, success.context, success.output, &mut effects);
                }

                Event::StoreFailed(failure) => {
                    handle_store_failed(model, failure.context, &failure.error, &mut effects);
                }

                Event::GenAiCompleted(success) => {
                    handle_gen_ai_completed(model, success.purpose, success.text, &mut effects);
                }

                Event::GenAiFailed(failure) => {
                    handle_gen_ai_failed(model, failure.purpose, &failure.error);
                }

                // --- Overlays ---
                Event::ToastDismissed => model.clear_toast(),
                Event::ErrorDismissed => model.clear_error(),
            }

            effects.push(Effect::Render);
            effects
        }

        pub fn view(&self, model: &Model) -> ViewModel {
            let screen = screen_for(model);
            let show_chrome = model.state.has_chrome() && model.is_authenticated();
            let show_sub_header = show_chrome && model.state.has_sub_header();

            ViewModel {
                screen,
                nav: model.nav,
                feed_mode: model.feed_mode,
                show_chrome,
                show_sub_header,
                slot_left: model.slot_left,
                slot_right: model.slot_right,
                plugin_picker: model.plugin_picker,
                inline_plugin: model.active_plugin.filter(|p| p.is_inline()),
                compose: model.compose_open.then(|| ComposeView {
                    drafts: model.compose_drafts.clone(),
                }),
                is_authenticated: model.is_authenticated(),
                is_refreshing: model.is_refreshing,
                toast: model.active_toast.clone(),
                error: model.active_error.as_ref().map(UserFacingError::from),
            }
        }
    }

    // --- Session helpers ---

    fn establish_session(model: &mut Model, user: User, effects: &mut Vec<Effect>) {
        adopt_seed_projects(model, &user);
        model.session = Some(user);
        model.sign_in_error = None;
        model.sign_up_error = None;
        model.state = ViewState::Feed;
        model.nav = NavItem::Home;
        refresh_feed(model, effects);
    }

    fn drop_session(model: &mut Model) {
        model.session = None;
        model.state = ViewState::SignIn;
        model.nav = NavItem::Home;
        model.location_filter = None;
        model.feed_mode = FeedMode::Global;
        model.feed_sub_mode = FeedSubMode::Posts;
        model.active_room = None;
        model.active_plugin = None;
        model.active_life_item = None;
        model.active_project = None;
        model.compose_open = false;
        model.room_create_open = false;
        model.chat_assist = None;
        model.plugin_picker = None;
    }

    fn persist_demo_session(user: &User, effects: &mut Vec<Effect>) {
        if let Some(raw) = session::encode_slot(user) {
            if let Ok(op) = StorageOperation::write(SESSION_SLOT_KEY, raw) {
                effects.push(Effect::Storage(op));
            }
        }
    }

    /// The showcase project ships owned by a placeholder. Once a session
    /// exists the signed-in user takes its place, so "your projects" is
    /// never empty on first run.
    fn adopt_seed_projects(model: &mut Model, user: &User) {
        let placeholder = UserId("u1".to_string());
        for project in &mut model.projects {
            if project.owner_id == placeholder {
                project.owner_id = user.id.clone();
                for member in &mut project.members {
                    if member.user.id == placeholder {
                        member.user = user.author_ref();
                    }
                }
            }
        }
    }

    // --- Feed helpers ---

    fn refresh_feed(model: &mut Model, effects: &mut Vec<Effect>) {
        model.is_refreshing = true;
        if model.backend_configured {
            match StoreOperation::query(Collection::Posts, "timestamp", true, FEED_QUERY_LIMIT) {
                Ok(op) => effects.push(Effect::store(StoreContext::FeedQuery, op)),
                Err(err) => {
                    warn!(%err, "feed query rejected, skipping to generator");
                    request_generated_feed(model, effects);
                }
            }
        } else {
            request_generated_feed(model, effects);
        }
    }

    fn request_generated_feed(model: &mut Model, effects: &mut Vec<Effect>) {
        match feed::feed_seed_request() {
            Ok(request) => effects.push(Effect::gen_ai(GenAiPurpose::FeedSeed, request)),
            Err(err) => {
                warn!(%err, "seed request unbuildable, using fallback");
                model.posts = feed::fallback_posts(model.now_ms);
                model.is_refreshing = false;
            }
        }
    }

    fn build_post(author: Author, new_post: super::event::NewPost) -> Post {
        let location = match &new_post.target {
            PostTarget::Location(country) => Some(country.clone()),
            _ => None,
        };
        Post {
            id: PostId::random(),
            author,
            content: new_post.content.into_inner(),
            image_url: new_post.image_url.map(|u| u.into_inner()),
            likes: 0,
            comments: 0,
            liked_by_me: false,
            created_at: UnixTimeMs(new_post.now_ms),
            location,
            target: Some(new_post.target),
            visibility: Some(new_post.visibility),
        }
    }

    /// After posting, navigate to where the post went so it is immediately
    /// visible.
    fn route_to_target(model: &mut Model, post: &Post) {
        match post.target.as_ref() {
            Some(PostTarget::MyFeed) => {
                model.feed_mode = FeedMode::Personal;
                model.state = ViewState::MyFeed;
            }
            Some(PostTarget::Location(country)) => {
                model.location_filter = Some(country.clone());
                model.feed_mode = FeedMode::Global;
                model.feed_sub_mode = FeedSubMode::Posts;
                model.state = ViewState::Feed;
            }
            Some(PostTarget::Globe) | None => {
                model.location_filter = None;
                model.feed_mode = FeedMode::Global;
                model.feed_sub_mode = FeedSubMode::Posts;
                model.state = ViewState::Feed;
            }
        }
        model.nav = NavItem::Home;
    }

    fn start_compose_assist(model: &mut Model, topic: &str, effects: &mut Vec<Effect>) {
        model.compose_drafts = ComposeModel::ALL
            .iter()
            .map(|&compose_model| {
                let outcome = if compose_model == ComposeModel::Gemini {
                    AssistOutcome::Pending
                } else {
                    AssistOutcome::Ready {
                        text: mock_compose_text(compose_model, topic),
                    }
                };
                ComposeDraft {
                    model: compose_model,
                    outcome,
                }
            })
            .collect();

        match GenerateRequest::new(
            super::capabilities::AiModelId::Gemini3FlashPreview,
            compose_prompt(topic),
        ) {
            Ok(request) => effects.push(Effect::gen_ai(
                GenAiPurpose::ComposeAssist {
                    model: ComposeModel::Gemini,
                },
                request,
            )),
            Err(err) => {
                set_compose_outcome(
                    model,
                    ComposeModel::Gemini,
                    AssistOutcome::Failed {
                        message: err.user_message(),
                    },
                );
            }
        }
    }

    fn set_compose_outcome(model: &mut Model, compose_model: ComposeModel, outcome: AssistOutcome) {
        if let Some(draft) = model
            .compose_drafts
            .iter_mut()
            .find(|d| d.model == compose_model)
        {
            draft.outcome = outcome;
        }
    }

    // --- Chat helpers ---

    /// Idempotent: at most one General room per country, whatever path
    /// reaches a country first.
    fn ensure_general_room(model: &mut Model, country: &str) {
        if model.has_general_room(country) {
            return;
        }
        let member_count =
            rand::thread_rng().gen_range(GENERAL_ROOM_MEMBERS_MIN..=GENERAL_ROOM_MEMBERS_MAX);
        model.rooms.push(ChatRoom {
            id: RoomId(format!("gen-{}", country.to_lowercase().replace(' ', "-"))),
            country: country.to_string(),
            name: format!("{country} General"),
            description: format!("The default community hub for {country}."),
            category: RoomCategory::General,
            member_count,
            last_message: None,
            last_message_time: None,
            created_by: UserId("system".to_string()),
        });
    }

    fn seed_welcome_messages(model: &mut Model, room: &ChatRoom) {
        let sarah = Author {
            id: UserId("seed-sarah".to_string()),
            username: "Sarah".to_string(),
            handle: "@sarah_k".to_string(),
            avatar_url: "https://picsum.photos/100/100?random=10".to_string(),
        };
        let mike = Author {
            id: UserId("seed-mike".to_string()),
            username: "Mike".to_string(),
            handle: "@mike_travels".to_string(),
            avatar_url: "https://picsum.photos/100/100?random=11".to_string(),
        };
        let mut sarah_reactions = std::collections::BTreeMap::new();
        sarah_reactions.insert("❤️".to_string(), 2);
        sarah_reactions.insert("🔥".to_string(), 1);
        let mut mike_reactions = std::collections::BTreeMap::new();
        mike_reactions.insert("👍".to_string(), 1);

        model.messages.push(ChatMessage {
            id: MessageId::random(),
            room_id: room.id.clone(),
            author: sarah,
            text: format!(
                "Welcome to the {}! Let's build a great community here in {}.",
                room.name, room.country
            ),
            sent_at: model.now_ms,
            translated: None,
            reactions: sarah_reactions,
        });
        model.messages.push(ChatMessage {
            id: MessageId::random(),
            room_id: room.id.clone(),
            author: mike,
            text: "The local cuisine here is absolutely unmatched. Anyone want to meet for lunch?"
                .to_string(),
            sent_at: model.now_ms,
            translated: None,
            reactions: mike_reactions,
        });
    }

    fn start_rephrase(model: &mut Model, room_id: RoomId, draft: &str, effects: &mut Vec<Effect>) {
        match GenerateRequest::new(
            super::capabilities::AiModelId::Gemini3FlashPreview,
            rephrase_prompt(draft),
        ) {
            Ok(request) => {
                model.chat_assist = Some(ChatAssist {
                    kind: ChatAssistKind::Rephrase,
                    outcome: AssistOutcome::Pending,
                });
                effects.push(Effect::gen_ai(GenAiPurpose::RephraseDraft { room_id }, request));
            }
            Err(err) => {
                model.chat_assist = Some(ChatAssist {
                    kind: ChatAssistKind::Rephrase,
                    outcome: AssistOutcome::Failed {
                        message: err.user_message(),
                    },
                });
            }
        }
    }

    fn start_translate(model: &mut Model, message_id: MessageId, effects: &mut Vec<Effect>) {
        let Some(message) = model.find_message(&message_id) else {
            return;
        };
        // A second request toggles the translation off.
        if message.translated.is_some() {
            if let Some(message) = model.find_message_mut(&message_id) {
                message.translated = None;
            }
            return;
        }
        let text = message.text.clone();
        match GenerateRequest::new(
            super::capabilities::AiModelId::Gemini3FlashPreview,
            translate_prompt(&text),
        ) {
            Ok(request) => {
                model.chat_assist = Some(ChatAssist {
                    kind: ChatAssistKind::Translate {
                        message_id: message_id.clone(),
                    },
                    outcome: AssistOutcome::Pending,
                });
                effects.push(Effect::gen_ai(
                    GenAiPurpose::TranslateMessage { message_id },
                    request,
                ));
            }
            Err(err) => {
                model.chat_assist = Some(ChatAssist {
                    kind: ChatAssistKind::Translate { message_id },
                    outcome: AssistOutcome::Failed {
                        message: err.user_message(),
                    },
                });
            }
        }
    }

    // --- Profile and studio helpers ---

    fn apply_profile_edit(model: &mut Model, edit: super::event::ProfileEdit, effects: &mut Vec<Effect>) {
        let Some(user) = model.session.as_mut() else {
            return;
        };
        if let Some(username) = edit.username {
            if !username.trim().is_empty() {
                user.username = username;
            }
        }
        if let Some(bio) = edit.bio {
            user.bio = Some(bio);
        }
        if let Some(location) = edit.location {
            user.location = Some(location);
        }
        if let Some(website) = edit.website {
            user.website = Some(website);
        }
        if let Some(avatar_url) = edit.avatar_url {
            user.avatar_url = avatar_url.into_inner();
        }

        // Best-effort persistence: the in-memory profile is already updated
        // and stays authoritative for this session either way.
        let user = user.clone();
        if model.backend_configured {
            if let Some(doc) = session::profile_doc(&user) {
                if let Ok(op) = StoreOperation::put(Collection::Users, &user.id.0, doc) {
                    effects.push(Effect::store(StoreContext::ProfilePersist, op));
                }
            }
        } else {
            persist_demo_session(&user, effects);
        }
        model.show_toast("Profile updated", ToastKind::Success);
    }

    fn start_studio_run(model: &mut Model, prompt: &str, effects: &mut Vec<Effect>) {
        let resolved = model.studio.active_model.sandbox_resolved();
        match GenerateRequest::new(resolved, prompt) {
            Ok(request) => {
                let request = request
                    .with_system_instruction(model.studio.system_instruction.clone());
                let request = request
                    .clone()
                    .with_temperature(model.studio.temperature)
                    .unwrap_or(request);
                model.studio.running = true;
                model.studio.output = None;
                effects.push(Effect::gen_ai(GenAiPurpose::StudioRun, request));
            }
            Err(err) => {
                model.studio.running = false;
                model.studio.output = Some(format!("Error: {}", err.user_message()));
            }
        }
    }

    // --- Gesture wiring ---

    fn apply_gesture(model: &mut Model, input: GestureInput, effects: &mut Vec<Effect>) {
        let transition = model.gesture.apply(input);

        match transition.timer {
            Some(TimerCommand::Start(slot)) => effects.push(Effect::StartTimer {
                id: TimerId::LongPress { slot },
                duration_ms: LONG_PRESS_MS,
            }),
            Some(TimerCommand::Cancel) => {
                let slot = match input {
                    GestureInput::Pressed(s)
                    | GestureInput::Released(s)
                    | GestureInput::PointerLeft(s)
                    | GestureInput::TimerElapsed(s) => s,
                };
                effects.push(Effect::CancelTimer {
                    id: TimerId::LongPress { slot },
                });
            }
            None => {}
        }

        match transition.fire {
            Some(GestureFire::Tap(slot)) => activate_slot(model, slot),
            Some(GestureFire::LongPress(slot)) => {
                model.plugin_picker = Some(slot);
            }
            None => {}
        }
    }

    fn activate_slot(model: &mut Model, slot: Slot) {
        if !model.is_authenticated() {
            return;
        }
        let plugin = model.slot_plugin(slot);
        model.nav = NavItem::for_slot(slot);
        model.active_plugin = Some(plugin);
        if !plugin.is_inline() {
            model.state = ViewState::PluginView;
        }
    }

    // --- Navigation helpers ---

    /// Bottom-nav Home keeps the user's feed mode; a personal-mode user lands
    /// back on their own feed, not the global one.
    fn go_home(model: &mut Model) {
        model.state = match model.feed_mode {
            FeedMode::Global => ViewState::Feed,
            FeedMode::Personal => ViewState::MyFeed,
        };
        model.nav = NavItem::Home;
        model.feed_sub_mode = FeedSubMode::Posts;
        model.location_filter = None;
        model.active_room = None;
        model.active_plugin = None;
        model.active_life_item = None;
    }

    fn go_back(model: &mut Model) {
        match model.state {
            ViewState::PublicProfile => model.state = ViewState::Profile,
            ViewState::ProjectDetail => {
                model.active_project = None;
                model.state = ViewState::PublicProfile;
            }
            ViewState::AiStudio => model.state = ViewState::Profile,
            ViewState::LifeItemWorkspace => {
                model.active_life_item = None;
                model.state = ViewState::MyFeed;
            }
            ViewState::Profile => {
                model.state = ViewState::Feed;
                model.nav = NavItem::Home;
            }
            ViewState::PluginView => {
                model.active_plugin = None;
                model.state = ViewState::Feed;
                model.nav = NavItem::Home;
            }
            ViewState::EarthExplorer => model.state = ViewState::Feed,
            ViewState::Feed if model.feed_sub_mode == FeedSubMode::ChatRoom => {
                model.active_room = None;
                model.chat_assist = None;
                model.feed_sub_mode = FeedSubMode::ChatHub;
            }
            _ => {}
        }
    }

    // --- Shell callback handlers ---

    fn handle_store_completed(
        model: &mut Model,
        context: StoreContext,
        output: StoreOutput,
        effects: &mut Vec<Effect>,
    ) {
        match context {
            StoreContext::ProfileFetch { identity } => {
                let user = resolve_profile(model, &identity, output, effects);
                establish_session(model, user, effects);
            }
            StoreContext::FeedQuery => {
                let docs = match output {
                    StoreOutput::Documents { docs } => docs,
                    _ => Vec::new(),
                };
                let posts = feed::posts_from_docs(docs);
                if posts.is_empty() {
                    request_generated_feed(model, effects);
                } else {
                    model.posts = posts;
                    model.is_refreshing = false;
                }
            }
            StoreContext::FeedSeed | StoreContext::ProfilePersist | StoreContext::SignUpProfile => {
                debug!("best-effort write acknowledged");
            }
        }
    }

    /// Decode the profile document, degrading to a minimal identity when it
    /// is absent or broken. An absent document also queues a best-effort
    /// write so the next boot finds one.
    fn resolve_profile(
        model: &Model,
        identity: &AuthIdentity,
        output: StoreOutput,
        effects: &mut Vec<Effect>,
    ) -> User {
        let doc = match output {
            StoreOutput::Document { doc } => doc,
            _ => None,
        };
        let had_doc = doc.is_some();
        let user = doc
            .and_then(|doc| session::user_from_profile_doc(&identity.uid, doc))
            .unwrap_or_else(|| session::minimal_user(identity));

        if !had_doc && model.backend_configured {
            if let Some(doc) = session::profile_doc(&user) {
                if let Ok(op) = StoreOperation::put(Collection::Users, &identity.uid, doc) {
                    effects.push(Effect::store(StoreContext::SignUpProfile, op));
                }
            }
        }
        user
    }

    fn handle_store_failed(
        model: &mut Model,
        context: StoreContext,
        error: &super::capabilities::StoreError,
        effects: &mut Vec<Effect>,
    ) {
        match context {
            StoreContext::ProfileFetch { identity } => {
                warn!(%error, uid = %identity.uid, "profile fetch failed, degrading session");
                let user = session::minimal_user(&identity);
                establish_session(model, user, effects);
            }
            StoreContext::FeedQuery => {
                warn!(%error, "feed query failed, falling through to generator");
                if !error.is_retryable() {
                    model.set_error(AppError::new(ErrorKind::FeedStore, error.to_string()));
                }
                request_generated_feed(model, effects);
            }
            context if context.is_best_effort() => {
                debug!(%error, "best-effort write dropped");
            }
            _ => {}
        }
    }

    fn handle_gen_ai_completed(
        model: &mut Model,
        purpose: GenAiPurpose,
        text: String,
        effects: &mut Vec<Effect>,
    ) {
        match purpose {
            GenAiPurpose::FeedSeed => {
                match feed::parse_generated_batch(&text, model.now_ms) {
                    Some(posts) => {
                        if model.backend_configured {
                            for post in &posts {
                                if let Some(doc) = feed::post_doc(post) {
                                    effects.push(Effect::store(
                                        StoreContext::FeedSeed,
                                        StoreOperation::add(Collection::Posts, doc),
                                    ));
                                }
                            }
                        }
                        model.posts = posts;
                    }
                    None => {
                        warn!("generated batch did not parse, using fallback");
                        model.posts = feed::fallback_posts(model.now_ms);
                    }
                }
                model.is_refreshing = false;
            }
            GenAiPurpose::RephraseDraft { .. } => {
                if let Some(assist) = model.chat_assist.as_mut() {
                    if assist.kind == ChatAssistKind::Rephrase {
                        assist.outcome = AssistOutcome::Ready { text };
                    }
                }
            }
            GenAiPurpose::TranslateMessage { message_id } => {
                if let Some(message) = model.find_message_mut(&message_id) {
                    message.translated = Some(text);
                }
                let stale = matches!(
                    &model.chat_assist,
                    Some(ChatAssist { kind: ChatAssistKind::Translate { message_id: id }, .. })
                        if *id == message_id
                );
                if stale {
                    model.chat_assist = None;
                }
            }
            GenAiPurpose::StudioRun => {
                model.studio.output = Some(text);
                model.studio.running = false;
            }
            GenAiPurpose::ComposeAssist { model: compose_model } => {
                set_compose_outcome(model, compose_model, AssistOutcome::Ready { text });
            }
        }
    }

    fn handle_gen_ai_failed(
        model: &mut Model,
        purpose: GenAiPurpose,
        error: &super::capabilities::GenAiError,
    ) {
        match purpose {
            GenAiPurpose::FeedSeed => {
                warn!(%error, "feed generation failed, using fallback");
                model.posts = feed::fallback_posts(model.now_ms);
                model.is_refreshing = false;
            }
            GenAiPurpose::RephraseDraft { .. } => {
                if let Some(assist) = model.chat_assist.as_mut() {
                    if assist.kind == ChatAssistKind::Rephrase {
                        assist.outcome = AssistOutcome::Failed {
                            message: error.user_message(),
                        };
                    }
                }
            }
            GenAiPurpose::TranslateMessage { message_id } => {
                if let Some(assist) = model.chat_assist.as_mut() {
                    if assist.kind == (ChatAssistKind::Translate { message_id }) {
                        assist.outcome = AssistOutcome::Failed {
                            message: error.user_message(),
                        };
                    }
                }
            }
            GenAiPurpose::StudioRun => {
                model.studio.output = Some(format!("Error: {}", error.user_message()));
                model.studio.running = false;
            }
            GenAiPurpose::ComposeAssist { model: compose_model } => {
                set_compose_outcome(
                    model,
                    compose_model,
                    AssistOutcome::Failed {
                        message: error.user_message(),
                    },
                );
            }
        }
    }

    // --- View projection ---

    fn screen_for(model: &Model) -> Screen {
        match model.state {
            ViewState::Loading => Screen::Loading,
            ViewState::SignIn => Screen::SignIn {
                form_error: model.sign_in_error.clone(),
                demo: (!model.backend_configured).then_some(DemoCredentials {
                    email: DEMO_EMAIL,
                    password: DEMO_PASSWORD,
                }),
            },
            ViewState::SignUp => Screen::SignUp {
                form_error: model.sign_up_error.clone(),
            },
            ViewState::Feed => Screen::Feed {
                posts: feed_posts(model),
                location: location_pane(model),
            },
            ViewState::Profile => match model.session.clone() {
                Some(user) => Screen::Profile { user },
                None => Screen::Loading,
            },
            ViewState::PluginView => {
                let plugin = model.active_plugin.unwrap_or(model.slot_left);
                let info = plugin.info();
                Screen::PluginView {
                    plugin,
                    name: info.name,
                    description: info.description,
                }
            }
            ViewState::EarthExplorer => Screen::EarthExplorer,
            ViewState::MyFeed => Screen::MyFeed {
                items: model.life_items.clone(),
            },
            ViewState::LifeItemWorkspace => {
                let item = model
                    .active_life_item
                    .as_ref()
                    .and_then(|id| model.life_items.iter().find(|i| &i.id == id))
                    .cloned();
                match item {
                    Some(item) => Screen::LifeItemWorkspace { item },
                    None => Screen::MyFeed {
                        items: model.life_items.clone(),
                    },
                }
            }
            ViewState::PublicProfile => match model.session.clone() {
                Some(user) => {
                    let posts = model
                        .posts
                        .iter()
                        .filter(|p| p.author.id == user.id)
                        .map(|p| post_view(model, p))
                        .collect();
                    let projects = model
                        .projects
                        .iter()
                        .filter(|p| p.owner_id == user.id)
                        .cloned()
                        .collect();
                    Screen::PublicProfile { user, posts, projects }
                }
                None => Screen::Loading,
            },
            ViewState::ProjectDetail => {
                let project = model
                    .active_project
                    .as_ref()
                    .and_then(|id| model.projects.iter().find(|p| &p.id == id))
                    .cloned();
                match project {
                    Some(project) => Screen::ProjectDetail { project },
                    None => Screen::Loading,
                }
            }
            ViewState::AiStudio => Screen::AiStudio(StudioView {
                active_model: model.studio.active_model,
                model_name: model.studio.active_model.info().name,
                system_instruction: model.studio.system_instruction.clone(),
                temperature: model.studio.temperature,
                output: model.studio.output.clone(),
                running: model.studio.running,
            }),
        }
    }

    fn post_view(model: &Model, post: &Post) -> PostView {
        PostView {
            post: post.clone(),
            time_ago: super::format_time_ago(model.now_ms, post.created_at),
        }
    }

    fn feed_posts(model: &Model) -> Vec<PostView> {
        let filter = model.location_filter.as_deref();
        model
            .posts
            .iter()
            .filter(|p| match filter {
                Some(country) => p.location.as_deref() == Some(country),
                None => p.target != Some(PostTarget::MyFeed),
            })
            .map(|p| post_view(model, p))
            .collect()
    }

    fn location_pane(model: &Model) -> Option<LocationPane> {
        let location = model.location_filter.clone()?;
        let active_room = model
            .active_room
            .as_ref()
            .and_then(|id| model.find_room(id))
            .cloned();
        let messages = match &model.active_room {
            Some(room_id) if model.feed_sub_mode == FeedSubMode::ChatRoom => model
                .messages_for(room_id)
                .map(|m| MessageView {
                    message: m.clone(),
                    time_ago: super::format_time_ago(model.now_ms, m.sent_at),
                })
                .collect(),
            _ => Vec::new(),
        };
        Some(LocationPane {
            rooms: model.rooms_for(&location).cloned().collect(),
            location,
            sub_mode: model.feed_sub_mode,
            active_room,
            messages,
            assist: model.chat_assist.clone(),
            room_create_open: model.room_create_open,
        })
    }

    #[cfg(test)]
    mod tests {
        use super::super::capabilities::genai::{AiModelId, GenAiError};
        use super::super::event::{
            ChatText, GenAiFailure, GenAiSuccess, LocationPick, NewRoom, RoomName, StudioSettings,
        };
        use super::super::model::RoomCategory;
        use super::super::{GENERAL_ROOM_MEMBERS_MAX, GENERAL_ROOM_MEMBERS_MIN};
        use super::*;

        fn signed_in() -> (App, Model) {
            let app = App;
            let mut model = Model::default();
            app.update(
                Event::Booted { backend_configured: false, now_ms: 1_000 },
                &mut model,
            );
            let user = session::demo_sign_in_user("explorer@earthpost.app");
            app.update(
                Event::LocalSessionLoaded {
                    raw: session::encode_slot(&user),
                },
                &mut model,
            );
            assert!(model.is_authenticated());
            (app, model)
        }

        fn select_country(app: &App, model: &mut Model, name: &str, code: &str) {
            app.update(
                Event::LocationSelected(Box::new(LocationPick {
                    raw_name: name.to_string(),
                    country_code: code.to_string(),
                    mode: LocationFeedMode::ChatRoom,
                })),
                model,
            );
        }

        #[test]
        fn test_general_room_created_once_with_seeded_members() {
            let (app, mut model) = signed_in();
            assert!(!model.has_general_room("France"));

            select_country(&app, &mut model, "France", "FR");
            let generals: Vec<_> = model
                .rooms
                .iter()
                .filter(|r| r.country == "France" && r.category == RoomCategory::General)
                .collect();
            assert_eq!(generals.len(), 1);
            assert_eq!(generals[0].name, "France General");
            assert!(
                (GENERAL_ROOM_MEMBERS_MIN..=GENERAL_ROOM_MEMBERS_MAX)
                    .contains(&generals[0].member_count)
            );

            // Selecting the same country again does not duplicate the hub.
            select_country(&app, &mut model, "France", "FR");
            let count = model
                .rooms
                .iter()
                .filter(|r| r.country == "France" && r.category == RoomCategory::General)
                .count();
            assert_eq!(count, 1);
        }

        #[test]
        fn test_seeded_countries_keep_their_existing_hub() {
            let (app, mut model) = signed_in();
            let before = model.rooms.len();
            select_country(&app, &mut model, "Japan", "JPN");
            assert_eq!(model.rooms.len(), before);
        }

        #[test]
        fn test_room_open_seeds_welcome_messages_once() {
            let (app, mut model) = signed_in();
            select_country(&app, &mut model, "Japan", "JPN");

            let room_id = RoomId("r1".to_string());
            app.update(Event::RoomOpened(room_id.clone()), &mut model);
            let seeded: Vec<_> = model.messages_for(&room_id).collect();
            assert_eq!(seeded.len(), 2);
            assert_eq!(seeded[0].author.handle, "@sarah_k");
            assert!(seeded[0].text.contains("Tokyo Techies"));
            assert_eq!(seeded[0].reactions.get("❤️"), Some(&2));

            // Leaving and re-entering does not reseed.
            app.update(Event::BackRequested, &mut model);
            app.update(Event::RoomOpened(room_id.clone()), &mut model);
            assert_eq!(model.messages_for(&room_id).count(), 2);
        }

        #[test]
        fn test_send_message_updates_room_preview() {
            let (app, mut model) = signed_in();
            select_country(&app, &mut model, "Japan", "JPN");
            app.update(Event::RoomOpened(RoomId("r1".into())), &mut model);

            app.update(
                Event::ChatMessageSent {
                    text: ChatText::new("konnichiwa!").unwrap(),
                    now_ms: 2_000,
                },
                &mut model,
            );
            let room_id = RoomId("r1".to_string());
            assert_eq!(model.messages_for(&room_id).count(), 3);
            let room = model.find_room(&room_id).unwrap();
            assert_eq!(room.last_message.as_deref(), Some("konnichiwa!"));
        }

        #[test]
        fn test_reactions_limited_to_palette() {
            let (app, mut model) = signed_in();
            select_country(&app, &mut model, "Japan", "JPN");
            app.update(Event::RoomOpened(RoomId("r1".into())), &mut model);
            let message_id = model.messages[1].id.clone();

            app.update(
                Event::ReactionAdded { message_id: message_id.clone(), emoji: "👍".into() },
                &mut model,
            );
            app.update(
                Event::ReactionAdded { message_id: message_id.clone(), emoji: "🦀".into() },
                &mut model,
            );
            let message = model.find_message(&message_id).unwrap();
            assert_eq!(message.reactions.get("👍"), Some(&2));
            assert!(!message.reactions.contains_key("🦀"));
        }

        #[test]
        fn test_translate_completion_and_toggle_off() {
            let (app, mut model) = signed_in();
            select_country(&app, &mut model, "Japan", "JPN");
            app.update(Event::RoomOpened(RoomId("r1".into())), &mut model);
            let message_id = model.messages[0].id.clone();

            let effects = app.update(Event::TranslateRequested(message_id.clone()), &mut model);
            assert!(effects.iter().any(|e| matches!(
                e,
                Effect::GenAi(cmd)
                    if matches!(&cmd.purpose, GenAiPurpose::TranslateMessage { message_id: id } if *id == message_id)
            )));

            app.update(
                Event::GenAiCompleted(Box::new(GenAiSuccess {
                    purpose: GenAiPurpose::TranslateMessage { message_id: message_id.clone() },
                    text: "A poetic welcome.".to_string(),
                })),
                &mut model,
            );
            assert_eq!(
                model.find_message(&message_id).unwrap().translated.as_deref(),
                Some("A poetic welcome.")
            );

            // Second request toggles the translation away without an effect.
            let effects = app.update(Event::TranslateRequested(message_id.clone()), &mut model);
            assert!(!effects.iter().any(|e| matches!(e, Effect::GenAi(_))));
            assert!(model.find_message(&message_id).unwrap().translated.is_none());
        }

        #[test]
        fn test_rephrase_failure_shows_inline_message() {
            let (app, mut model) = signed_in();
            select_country(&app, &mut model, "Japan", "JPN");
            app.update(Event::RoomOpened(RoomId("r1".into())), &mut model);

            app.update(
                Event::RephraseRequested { draft: "hi all".to_string() },
                &mut model,
            );
            app.update(
                Event::GenAiFailed(Box::new(GenAiFailure {
                    purpose: GenAiPurpose::RephraseDraft { room_id: RoomId("r1".into()) },
                    error: GenAiError::Network("offline".into()),
                })),
                &mut model,
            );
            let assist = model.chat_assist.as_ref().unwrap();
            assert!(matches!(
                &assist.outcome,
                AssistOutcome::Failed { message } if message == "Could not reach the AI service."
            ));
        }

        #[test]
        fn test_room_create_prepends_and_activates() {
            let (app, mut model) = signed_in();
            select_country(&app, &mut model, "France", "FR");
            app.update(Event::RoomCreateOpened, &mut model);

            app.update(
                Event::RoomCreateSubmitted(Box::new(NewRoom {
                    name: RoomName::new("Paris Builders").unwrap(),
                    description: "Hardware and software makers.".to_string(),
                    category: RoomCategory::Tech,
                })),
                &mut model,
            );
            assert_eq!(model.rooms[0].name, "Paris Builders");
            assert_eq!(model.rooms[0].member_count, 1);
            assert_eq!(model.rooms[0].country, "France");
            assert_eq!(model.active_room, Some(model.rooms[0].id.clone()));
            assert_eq!(model.feed_sub_mode, FeedSubMode::ChatRoom);
            assert!(!model.room_create_open);
        }

        #[test]
        fn test_compose_assist_mocks_three_and_requests_one() {
            let (app, mut model) = signed_in();
            app.update(Event::ComposeOpened, &mut model);

            let effects = app.update(
                Event::ComposeAssistRequested { topic: "ocean cleanup".to_string() },
                &mut model,
            );
            assert_eq!(model.compose_drafts.len(), 4);
            let pending = model
                .compose_drafts
                .iter()
                .filter(|d| d.outcome == AssistOutcome::Pending)
                .count();
            assert_eq!(pending, 1);
            assert!(effects.iter().any(|e| matches!(
                e,
                Effect::GenAi(cmd)
                    if cmd.purpose == (GenAiPurpose::ComposeAssist { model: ComposeModel::Gemini })
            )));

            app.update(
                Event::GenAiCompleted(Box::new(GenAiSuccess {
                    purpose: GenAiPurpose::ComposeAssist { model: ComposeModel::Gemini },
                    text: "The tide turns today.".to_string(),
                })),
                &mut model,
            );
            let gemini = model
                .compose_drafts
                .iter()
                .find(|d| d.model == ComposeModel::Gemini)
                .unwrap();
            assert!(matches!(
                &gemini.outcome,
                AssistOutcome::Ready { text } if text == "The tide turns today."
            ));
        }

        #[test]
        fn test_studio_run_resolves_mock_models_to_gemini() {
            let (app, mut model) = signed_in();
            app.update(Event::StudioOpened, &mut model);
            app.update(
                Event::StudioSettingsUpdated(Box::new(StudioSettings {
                    model: AiModelId::Claude3Mock,
                    system_instruction: "Be terse.".to_string(),
                    temperature: 1.2,
                })),
                &mut model,
            );

            let effects = app.update(
                Event::StudioRunRequested { prompt: "Describe the future city.".to_string() },
                &mut model,
            );
            assert!(model.studio.running);
            let request = effects
                .iter()
                .find_map(|e| match e {
                    Effect::GenAi(cmd) if cmd.purpose == GenAiPurpose::StudioRun => {
                        Some(&cmd.request)
                    }
                    _ => None,
                })
                .unwrap();
            assert_eq!(request.model, AiModelId::Gemini3FlashPreview);
            assert_eq!(request.system_instruction.as_deref(), Some("Be terse."));
            assert_eq!(request.temperature, Some(1.2));
        }

        #[test]
        fn test_studio_failure_renders_inline_error() {
            let (app, mut model) = signed_in();
            app.update(Event::StudioOpened, &mut model);
            app.update(
                Event::StudioRunRequested { prompt: "hello".to_string() },
                &mut model,
            );

            app.update(
                Event::GenAiFailed(Box::new(GenAiFailure {
                    purpose: GenAiPurpose::StudioRun,
                    error: GenAiError::Quota,
                })),
                &mut model,
            );
            assert!(!model.studio.running);
            assert_eq!(
                model.studio.output.as_deref(),
                Some("Error: The AI service is out of capacity right now.")
            );
        }

        #[test]
        fn test_like_toggle_round_trips() {
            let (app, mut model) = signed_in();
            app.update(
                Event::GenAiCompleted(Box::new(GenAiSuccess {
                    purpose: GenAiPurpose::FeedSeed,
                    text: r#"[{"content":"x","likes":5,"comments":0,"username":"A","handle":"@a","hasImage":false}]"#.to_string(),
                })),
                &mut model,
            );
            let post_id = model.posts[0].id.clone();

            app.update(Event::PostLikeToggled(post_id.clone()), &mut model);
            assert_eq!(model.posts[0].likes, 6);
            assert!(model.posts[0].liked_by_me);

            app.update(Event::PostLikeToggled(post_id), &mut model);
            assert_eq!(model.posts[0].likes, 5);
            assert!(!model.posts[0].liked_by_me);
        }
    }
}
