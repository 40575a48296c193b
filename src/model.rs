use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::capabilities::genai::AiModelId;
use crate::gesture::{Slot, SlotGesture};
use crate::{AppError, ToastKind, ToastMessage, DEFAULT_SYSTEM_INSTRUCTION, DEFAULT_TEMPERATURE};

macro_rules! typed_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn random() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

typed_id!(UserId);
typed_id!(PostId);
typed_id!(RoomId);
typed_id!(MessageId);
typed_id!(ProjectId);
typed_id!(LifeItemId);

/// Explicit timestamp unit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnixTimeMs(pub u64);

/// The single currently-rendered top-level screen. Exactly one is active at
/// any time; every transition goes through `App::update`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Loading,
    SignIn,
    SignUp,
    Feed,
    Profile,
    PluginView,
    EarthExplorer,
    MyFeed,
    LifeItemWorkspace,
    PublicProfile,
    ProjectDetail,
    AiStudio,
}

impl ViewState {
    /// Full-screen states render without the persistent chrome (top bar,
    /// mode switcher, bottom navigation).
    pub fn is_full_screen(&self) -> bool {
        matches!(
            self,
            Self::PluginView
                | Self::LifeItemWorkspace
                | Self::PublicProfile
                | Self::ProjectDetail
                | Self::AiStudio
        )
    }

    pub fn has_chrome(&self) -> bool {
        matches!(
            self,
            Self::Feed | Self::MyFeed | Self::PluginView | Self::LifeItemWorkspace
        )
    }

    /// The sub-header (global/personal switch, or feed/chat switch) is
    /// suppressed exactly for the full-screen states.
    pub fn has_sub_header(&self) -> bool {
        matches!(self, Self::Feed | Self::MyFeed)
    }
}

/// The five fixed bottom-navigation slots.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavItem {
    #[default]
    Home,
    SlotLeft,
    Create,
    SlotRight,
    Menu,
}

impl NavItem {
    pub fn for_slot(slot: Slot) -> Self {
        match slot {
            Slot::Left => Self::SlotLeft,
            Slot::Right => Self::SlotRight,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedMode {
    #[default]
    Global,
    Personal,
}

/// Sub-view inside a location's context. Only meaningful while a location
/// filter is set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeedSubMode {
    #[default]
    Posts,
    ChatHub,
    ChatRoom,
}

// --- Plugins ---

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginId {
    Search,
    Notifications,
    Wallet,
    Weather,
    Marketplace,
    Music,
    Chat,
    Events,
}

impl PluginId {
    pub fn info(&self) -> &'static PluginInfo {
        // The catalog covers every variant; the fallback is unreachable but
        // keeps this total without a panic path.
        PLUGIN_CATALOG
            .iter()
            .find(|p| p.id == *self)
            .unwrap_or(&PLUGIN_CATALOG[0])
    }

    /// Inline plugins render in place when their slot is tapped instead of
    /// navigating to the plugin screen.
    pub fn is_inline(&self) -> bool {
        self.info().inline
    }
}

pub struct PluginInfo {
    pub id: PluginId,
    pub name: &'static str,
    pub description: &'static str,
    /// Explicit attribute rather than an identifier check, so growing the
    /// catalog cannot silently change navigation behavior.
    pub inline: bool,
}

pub const PLUGIN_CATALOG: &[PluginInfo] = &[
    PluginInfo { id: PluginId::Search, name: "Search", description: "Find people and posts", inline: true },
    PluginInfo { id: PluginId::Notifications, name: "Alerts", description: "See your activity", inline: true },
    PluginInfo { id: PluginId::Wallet, name: "Wallet", description: "Manage digital assets", inline: false },
    PluginInfo { id: PluginId::Weather, name: "Weather", description: "Local forecast", inline: false },
    PluginInfo { id: PluginId::Marketplace, name: "Shop", description: "Earth Palace Store", inline: false },
    PluginInfo { id: PluginId::Music, name: "Music", description: "Stream tunes", inline: false },
    PluginInfo { id: PluginId::Chat, name: "Chat AI", description: "Talk to Gemini", inline: false },
    PluginInfo { id: PluginId::Events, name: "Events", description: "Local happenings", inline: false },
];

// --- Users, posts, rooms ---

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub handle: String,
    pub avatar_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_date: Option<String>,
}

impl User {
    pub fn author_ref(&self) -> Author {
        Author {
            id: self.id.clone(),
            username: self.username.clone(),
            handle: self.handle.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

/// Author snapshot embedded in posts and messages. A snapshot, not a
/// reference: later profile edits do not rewrite history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: UserId,
    pub username: String,
    pub handle: String,
    pub avatar_url: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Private,
    Groups,
    Selected,
}

/// Where a composed post is aimed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PostTarget {
    Globe,
    MyFeed,
    Location(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author: Author,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub likes: u32,
    pub comments: u32,
    #[serde(default)]
    pub liked_by_me: bool,
    pub created_at: UnixTimeMs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<PostTarget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomCategory {
    #[default]
    General,
    Tech,
    Food,
    Culture,
    Travel,
    Meetups,
    Music,
    Sports,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRoom {
    pub id: RoomId,
    pub country: String,
    pub name: String,
    pub description: String,
    pub category: RoomCategory,
    pub member_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
    /// Relative display string for the latest activity, as shown on the hub
    /// card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_time: Option<String>,
    pub created_by: UserId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub room_id: RoomId,
    pub author: Author,
    pub text: String,
    pub sent_at: UnixTimeMs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub reactions: BTreeMap<String, u32>,
}

// --- Projects ---

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    Startup,
    OpenSource,
    ContentCreation,
    Research,
    Artistic,
    #[default]
    Other,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectVisibility {
    #[default]
    Public,
    Private,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectRole {
    Owner,
    Contributor,
    Advisor,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Active,
    Pending,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    pub user: Author,
    pub role: ProjectRole,
    pub status: MemberStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub visibility: ProjectVisibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    pub tags: Vec<String>,
    pub help_requested: bool,
    pub members: Vec<ProjectMember>,
    pub created_at: UnixTimeMs,
}

// --- Life feed ---

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeSource {
    Gmail,
    Drive,
    Github,
    Keep,
    Calendar,
    Chatgpt,
    Claude,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeItemStatus {
    Urgent,
    Updated,
    Unread,
}

/// One AI-curated card in the personal feed, aggregated from a connected
/// external app.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeFeedItem {
    pub id: LifeItemId,
    pub source: LifeSource,
    pub title: String,
    pub description: String,
    /// Relative display string as produced by the aggregator.
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<LifeItemStatus>,
    /// Workspace payload for items that open into a document view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

// --- AI state ---

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StudioState {
    pub active_model: AiModelId,
    pub system_instruction: String,
    pub temperature: f32,
    pub output: Option<String>,
    pub running: bool,
}

impl Default for StudioState {
    fn default() -> Self {
        Self {
            active_model: AiModelId::Gemini3FlashPreview,
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            output: None,
            running: false,
        }
    }
}

/// Outcome slot for a single in-flight AI assist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AssistOutcome {
    Pending,
    Ready { text: String },
    /// Inline error string shown in place of the expected output.
    Failed { message: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChatAssistKind {
    Rephrase,
    Translate { message_id: MessageId },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatAssist {
    pub kind: ChatAssistKind,
    pub outcome: AssistOutcome,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeDraft {
    pub model: crate::capabilities::genai::ComposeModel,
    pub outcome: AssistOutcome,
}

// --- The model ---

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Model {
    pub state: ViewState,
    pub nav: NavItem,
    pub backend_configured: bool,

    // Session
    pub session: Option<User>,
    pub sign_in_error: Option<String>,
    pub sign_up_error: Option<String>,

    // Feed
    pub feed_mode: FeedMode,
    pub feed_sub_mode: FeedSubMode,
    pub location_filter: Option<String>,
    pub posts: Vec<Post>,
    pub is_refreshing: bool,

    // Communities
    pub rooms: Vec<ChatRoom>,
    pub messages: Vec<ChatMessage>,
    pub projects: Vec<Project>,
    pub life_items: Vec<LifeFeedItem>,

    // Navigation slots
    pub slot_left: PluginId,
    pub slot_right: PluginId,
    pub gesture: SlotGesture,
    pub plugin_picker: Option<Slot>,

    // Active selections
    pub active_plugin: Option<PluginId>,
    pub active_room: Option<RoomId>,
    pub active_life_item: Option<LifeItemId>,
    pub active_project: Option<ProjectId>,

    // Overlays
    pub compose_open: bool,
    pub room_create_open: bool,
    pub compose_drafts: Vec<ComposeDraft>,
    pub chat_assist: Option<ChatAssist>,

    pub studio: StudioState,

    /// Wall clock as of the most recent time-bearing event; used for
    /// relative timestamps in the view.
    pub now_ms: UnixTimeMs,

    pub active_error: Option<AppError>,
    pub active_toast: Option<ToastMessage>,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            state: ViewState::Loading,
            nav: NavItem::Home,
            backend_configured: false,
            session: None,
            sign_in_error: None,
            sign_up_error: None,
            feed_mode: FeedMode::Global,
            feed_sub_mode: FeedSubMode::Posts,
            location_filter: None,
            posts: Vec::new(),
            is_refreshing: false,
            rooms: seed_rooms(),
            messages: Vec::new(),
            projects: seed_projects(),
            life_items: seed_life_feed(),
            slot_left: PluginId::Search,
            slot_right: PluginId::Notifications,
            gesture: SlotGesture::Idle,
            plugin_picker: None,
            active_plugin: None,
            active_room: None,
            active_life_item: None,
            active_project: None,
            compose_open: false,
            room_create_open: false,
            compose_drafts: Vec::new(),
            chat_assist: None,
            studio: StudioState::default(),
            now_ms: UnixTimeMs(0),
            active_error: None,
            active_toast: None,
        }
    }
}

impl Model {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn slot_plugin(&self, slot: Slot) -> PluginId {
        match slot {
            Slot::Left => self.slot_left,
            Slot::Right => self.slot_right,
        }
    }

    pub fn set_slot_plugin(&mut self, slot: Slot, plugin: PluginId) {
        match slot {
            Slot::Left => self.slot_left = plugin,
            Slot::Right => self.slot_right = plugin,
        }
    }

    pub fn has_general_room(&self, country: &str) -> bool {
        self.rooms
            .iter()
            .any(|r| r.country == country && r.category == RoomCategory::General)
    }

    pub fn rooms_for<'a>(&'a self, country: &'a str) -> impl Iterator<Item = &'a ChatRoom> {
        self.rooms.iter().filter(move |r| r.country == country)
    }

    pub fn find_room(&self, id: &RoomId) -> Option<&ChatRoom> {
        self.rooms.iter().find(|r| &r.id == id)
    }

    pub fn find_post_mut(&mut self, id: &PostId) -> Option<&mut Post> {
        self.posts.iter_mut().find(|p| &p.id == id)
    }

    pub fn find_message(&self, id: &MessageId) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| &m.id == id)
    }

    pub fn find_message_mut(&mut self, id: &MessageId) -> Option<&mut ChatMessage> {
        self.messages.iter_mut().find(|m| &m.id == id)
    }

    pub fn messages_for<'a>(&'a self, room: &'a RoomId) -> impl Iterator<Item = &'a ChatMessage> {
        self.messages.iter().filter(move |m| &m.room_id == room)
    }

    pub fn set_error(&mut self, error: AppError) {
        self.active_error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.active_error = None;
    }

    pub fn show_toast(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.active_toast = Some(ToastMessage::new(message, kind));
    }

    pub fn clear_toast(&mut self) {
        self.active_toast = None;
    }
}

// --- Seed data ---
//
// Until the backend has real content the app boots with a small set of
// communities, one showcase project, and a mocked life feed.

pub fn seed_rooms() -> Vec<ChatRoom> {
    let room = |id: &str,
                country: &str,
                name: &str,
                category: RoomCategory,
                member_count: u32,
                description: &str,
                last_message: &str| ChatRoom {
        id: RoomId(id.to_string()),
        country: country.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category,
        member_count,
        last_message: Some(last_message.to_string()),
        last_message_time: Some("10m".to_string()),
        created_by: UserId("system".to_string()),
    };

    vec![
        room("gen-jp", "Japan", "Japan General Chat", RoomCategory::General, 520,
            "The main hub for Japan community.", "Welcome to the Japanese node!"),
        room("gen-us", "United States", "USA General Chat", RoomCategory::General, 840,
            "The main hub for USA community.", "Connecting from New York."),
        room("gen-uk", "United Kingdom", "UK General Chat", RoomCategory::General, 310,
            "The main hub for UK community.", "London calling!"),
        room("r1", "Japan", "Tokyo Techies", RoomCategory::Tech, 154,
            "Future tech and startups in Tokyo.", "Anyone going to the AI summit?"),
        room("r2", "Japan", "Kyoto History", RoomCategory::Culture, 89,
            "Exploring the roots of Kyoto.", "The temple walk was amazing."),
        room("r3", "United States", "Silicon Valley Founders", RoomCategory::Tech, 230,
            "Buidling in SF.", "Seed round secured!"),
        room("r4", "United Kingdom", "London Foodies", RoomCategory::Food, 112,
            "Best curry in the city?", "Brick Lane is always the answer."),
    ]
}

pub fn seed_projects() -> Vec<Project> {
    let owner = Author {
        id: UserId("u1".to_string()),
        username: "Explorer".to_string(),
        handle: "@explorer".to_string(),
        avatar_url: "https://picsum.photos/100/100?random=1".to_string(),
    };

    vec![Project {
        id: ProjectId("p1".to_string()),
        owner_id: owner.id.clone(),
        title: "SolarGrid Protocol".to_string(),
        description: "A decentralized energy trading platform for residential solar owners."
            .to_string(),
        project_type: ProjectType::Startup,
        visibility: ProjectVisibility::Public,
        github_url: None,
        website_url: None,
        tags: vec!["Sustainability".to_string(), "Blockchain".to_string(), "IoT".to_string()],
        help_requested: true,
        members: vec![ProjectMember {
            user: owner,
            role: ProjectRole::Owner,
            status: MemberStatus::Active,
        }],
        created_at: UnixTimeMs(0),
    }]
}

pub fn seed_life_feed() -> Vec<LifeFeedItem> {
    let item = |id: &str,
                source: LifeSource,
                title: &str,
                description: &str,
                timestamp: &str,
                status: Option<LifeItemStatus>,
                content: Option<&str>| LifeFeedItem {
        id: LifeItemId(id.to_string()),
        source,
        title: title.to_string(),
        description: description.to_string(),
        timestamp: timestamp.to_string(),
        link: Some("#".to_string()),
        status,
        content: content.map(str::to_string),
    };

    vec![
        item("1", LifeSource::Drive, "Project Proposal 2025",
            "You were editing this 2 hours ago. 3 unread comments from team.", "2h ago",
            Some(LifeItemStatus::Updated),
            Some("## EarthPost Project Proposal 2025\n\nTarget Goal: 10M active users by end of \
                  Q4.\n\nStrategy: AI-Curated life feeds and deep ecosystem integration.\n\n\
                  Status: Initial Draft in progress.")),
        item("2", LifeSource::Gmail, "Flight Confirmation: San Francisco",
            "AI detected travel plans. Added to your calendar automatically.", "4h ago",
            Some(LifeItemStatus::Unread), None),
        item("3", LifeSource::Github, "earth-post-app PR #412",
            "Pull request approved and merged by @lead_dev.", "6h ago", None, None),
        item("4", LifeSource::Calendar, "Product Sync Meeting",
            "Starts in 15 minutes. Join via Google Meet.", "15m from now",
            Some(LifeItemStatus::Urgent), None),
        item("5", LifeSource::Chatgpt, "AI Analysis Complete",
            "Your weekly productivity summary is ready for review.", "1d ago", None, None),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_boots_loading() {
        let m = Model::default();
        assert_eq!(m.state, ViewState::Loading);
        assert_eq!(m.nav, NavItem::Home);
        assert!(!m.is_authenticated());
        assert_eq!(m.slot_left, PluginId::Search);
        assert_eq!(m.slot_right, PluginId::Notifications);
    }

    #[test]
    fn test_seed_rooms_have_general_hubs() {
        let m = Model::default();
        for country in ["Japan", "United States", "United Kingdom"] {
            assert!(m.has_general_room(country), "missing General room for {country}");
        }
        assert!(!m.has_general_room("France"));
    }

    #[test]
    fn test_rooms_for_filters_by_country() {
        let m = Model::default();
        let names: Vec<_> = m.rooms_for("Japan").map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Japan General Chat", "Tokyo Techies", "Kyoto History"]);
    }

    #[test]
    fn test_inline_plugin_catalog_attribute() {
        assert!(PluginId::Search.is_inline());
        assert!(PluginId::Notifications.is_inline());
        for plugin in [
            PluginId::Wallet,
            PluginId::Weather,
            PluginId::Marketplace,
            PluginId::Music,
            PluginId::Chat,
            PluginId::Events,
        ] {
            assert!(!plugin.is_inline(), "{plugin:?} should navigate");
        }
    }

    #[test]
    fn test_full_screen_states() {
        for s in [
            ViewState::PluginView,
            ViewState::LifeItemWorkspace,
            ViewState::PublicProfile,
            ViewState::ProjectDetail,
            ViewState::AiStudio,
        ] {
            assert!(s.is_full_screen());
            assert!(!s.has_sub_header());
        }
        assert!(ViewState::Feed.has_sub_header());
        assert!(ViewState::MyFeed.has_sub_header());
        assert!(!ViewState::Feed.is_full_screen());
    }

    #[test]
    fn test_room_category_serializes_as_display_name() {
        let v = serde_json::to_value(RoomCategory::General).unwrap();
        assert_eq!(v, "General");
        let v = serde_json::to_value(RoomCategory::Meetups).unwrap();
        assert_eq!(v, "Meetups");
    }

    #[test]
    fn test_post_target_serde() {
        let v = serde_json::to_value(PostTarget::MyFeed).unwrap();
        assert_eq!(v, "my-feed");
        let v = serde_json::to_value(PostTarget::Location("Japan".into())).unwrap();
        assert_eq!(v["location"], "Japan");
    }

    #[test]
    fn test_user_doc_round_trip() {
        let user = User {
            id: UserId("u1".into()),
            username: "Explorer".into(),
            handle: "@explorer".into(),
            avatar_url: "https://picsum.photos/100/100?random=1".into(),
            bio: None,
            cover_url: None,
            location: Some("Tokyo".into()),
            website: None,
            joined_date: None,
        };
        let v = serde_json::to_value(&user).unwrap();
        assert!(v.get("bio").is_none());
        let back: User = serde_json::from_value(v).unwrap();
        assert_eq!(back, user);
    }
}
