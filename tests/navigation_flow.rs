//! Navigation behavior: screen transitions, slot gestures, chrome rules.

use earthpost_core::capabilities::{Effect, TimerId};
use earthpost_core::event::{LocationFeedMode, LocationPick, Secret, SignInForm};
use earthpost_core::gesture::Slot;
use earthpost_core::model::{
    FeedMode, FeedSubMode, LifeItemId, NavItem, PluginId, ProjectId, RoomId, ViewState,
};
use earthpost_core::{App, Event, Model, Screen, LONG_PRESS_MS};

fn signed_in_model() -> (App, Model) {
    let app = App::default();
    let mut model = Model::default();
    app.update(
        Event::Booted {
            backend_configured: false,
            now_ms: 1_000,
        },
        &mut model,
    );
    app.update(Event::LocalSessionLoaded { raw: None }, &mut model);
    assert_eq!(model.state, ViewState::SignIn);
    app.update(
        Event::SignInSubmitted(Box::new(SignInForm {
            email: "explorer@earthpost.app".to_string(),
            password: Secret::new("password123"),
            remember: true,
        })),
        &mut model,
    );
    assert_eq!(model.state, ViewState::Feed);
    (app, model)
}

#[test]
fn test_menu_profile_and_back() {
    let (app, mut model) = signed_in_model();

    app.update(Event::NavSelected(NavItem::Menu), &mut model);
    assert_eq!(model.state, ViewState::Profile);
    assert_eq!(model.nav, NavItem::Menu);

    app.update(Event::BackRequested, &mut model);
    assert_eq!(model.state, ViewState::Feed);
    assert_eq!(model.nav, NavItem::Home);
}

#[test]
fn test_home_preserves_personal_feed_mode() {
    let (app, mut model) = signed_in_model();
    app.update(Event::FeedModeSelected(FeedMode::Personal), &mut model);
    assert_eq!(model.state, ViewState::MyFeed);

    // Wander off and come back via the bottom nav.
    app.update(Event::StudioOpened, &mut model);
    app.update(Event::NavSelected(NavItem::Home), &mut model);
    assert_eq!(model.state, ViewState::MyFeed);
    assert_eq!(model.feed_mode, FeedMode::Personal);
    assert_eq!(model.nav, NavItem::Home);
}

#[test]
fn test_top_bar_home_resets_to_global_feed() {
    let (app, mut model) = signed_in_model();
    app.update(Event::FeedModeSelected(FeedMode::Personal), &mut model);

    app.update(Event::TopBarHomePressed { now_ms: 2_000 }, &mut model);
    assert_eq!(model.state, ViewState::Feed);
    assert_eq!(model.feed_mode, FeedMode::Global);
    assert!(model.location_filter.is_none());
}

#[test]
fn test_menu_clears_active_plugin_and_life_item() {
    let (app, mut model) = signed_in_model();
    model.slot_right = PluginId::Wallet;
    app.update(Event::SlotPressed(Slot::Right), &mut model);
    app.update(Event::SlotReleased(Slot::Right), &mut model);
    assert_eq!(model.active_plugin, Some(PluginId::Wallet));

    app.update(Event::NavSelected(NavItem::Menu), &mut model);
    assert_eq!(model.state, ViewState::Profile);
    assert!(model.active_plugin.is_none());
    assert!(model.active_life_item.is_none());
}

#[test]
fn test_create_highlights_nav_item() {
    let (app, mut model) = signed_in_model();
    app.update(Event::NavSelected(NavItem::Create), &mut model);
    assert!(model.compose_open);
    assert_eq!(model.nav, NavItem::Create);
    // The compose overlay sits on top; the screen itself does not change.
    assert_eq!(model.state, ViewState::Feed);
}

#[test]
fn test_profile_drill_down_back_chain() {
    let (app, mut model) = signed_in_model();
    let project_id = model.projects[0].id.clone();

    app.update(Event::NavSelected(NavItem::Menu), &mut model);
    app.update(Event::PublicProfileOpened, &mut model);
    assert_eq!(model.state, ViewState::PublicProfile);

    app.update(Event::ProjectOpened(project_id), &mut model);
    assert_eq!(model.state, ViewState::ProjectDetail);

    app.update(Event::BackRequested, &mut model);
    assert_eq!(model.state, ViewState::PublicProfile);
    app.update(Event::BackRequested, &mut model);
    assert_eq!(model.state, ViewState::Profile);
    app.update(Event::BackRequested, &mut model);
    assert_eq!(model.state, ViewState::Feed);
}

#[test]
fn test_studio_backs_out_to_profile() {
    let (app, mut model) = signed_in_model();
    app.update(Event::StudioOpened, &mut model);
    assert_eq!(model.state, ViewState::AiStudio);
    app.update(Event::BackRequested, &mut model);
    assert_eq!(model.state, ViewState::Profile);
}

#[test]
fn test_life_item_workspace_backs_to_my_feed() {
    let (app, mut model) = signed_in_model();
    app.update(Event::FeedModeSelected(FeedMode::Personal), &mut model);
    assert_eq!(model.state, ViewState::MyFeed);

    app.update(Event::LifeItemSelected(LifeItemId("1".into())), &mut model);
    assert_eq!(model.state, ViewState::LifeItemWorkspace);

    app.update(Event::BackRequested, &mut model);
    assert_eq!(model.state, ViewState::MyFeed);
    assert!(model.active_life_item.is_none());
}

#[test]
fn test_unknown_life_item_is_ignored() {
    let (app, mut model) = signed_in_model();
    app.update(Event::LifeItemSelected(LifeItemId("nope".into())), &mut model);
    assert_eq!(model.state, ViewState::Feed);
}

#[test]
fn test_globe_selection_lands_on_location_feed() {
    let (app, mut model) = signed_in_model();

    app.update(Event::GlobeOpened, &mut model);
    assert_eq!(model.state, ViewState::EarthExplorer);

    app.update(
        Event::LocationSelected(Box::new(LocationPick {
            raw_name: "Viet Nam".to_string(),
            country_code: "VNM".to_string(),
            mode: LocationFeedMode::ChatRoom,
        })),
        &mut model,
    );
    assert_eq!(model.state, ViewState::Feed);
    assert_eq!(model.location_filter.as_deref(), Some("Vietnam"));
    assert_eq!(model.feed_sub_mode, FeedSubMode::ChatHub);
    assert!(model.has_general_room("Vietnam"));
}

#[test]
fn test_chat_room_back_returns_to_hub() {
    let (app, mut model) = signed_in_model();
    app.update(
        Event::LocationSelected(Box::new(LocationPick {
            raw_name: "Japan".to_string(),
            country_code: "JPN".to_string(),
            mode: LocationFeedMode::ChatRoom,
        })),
        &mut model,
    );
    app.update(Event::RoomOpened(RoomId("r1".into())), &mut model);
    assert_eq!(model.feed_sub_mode, FeedSubMode::ChatRoom);

    app.update(Event::BackRequested, &mut model);
    assert_eq!(model.feed_sub_mode, FeedSubMode::ChatHub);
    assert!(model.active_room.is_none());
    assert_eq!(model.state, ViewState::Feed);
}

#[test]
fn test_slot_tap_on_inline_plugin_stays_in_place() {
    let (app, mut model) = signed_in_model();

    let effects = app.update(Event::SlotPressed(Slot::Left), &mut model);
    assert!(effects.iter().any(|e| matches!(
        e,
        Effect::StartTimer { id: TimerId::LongPress { slot: Slot::Left }, duration_ms }
            if *duration_ms == LONG_PRESS_MS
    )));

    app.update(Event::SlotReleased(Slot::Left), &mut model);
    // Search is inline: overlay opens, screen does not change.
    assert_eq!(model.state, ViewState::Feed);
    assert_eq!(model.active_plugin, Some(PluginId::Search));
    assert_eq!(model.nav, NavItem::SlotLeft);
}

#[test]
fn test_slot_tap_on_full_plugin_navigates() {
    let (app, mut model) = signed_in_model();
    model.slot_right = PluginId::Wallet;

    app.update(Event::SlotPressed(Slot::Right), &mut model);
    app.update(Event::SlotReleased(Slot::Right), &mut model);
    assert_eq!(model.state, ViewState::PluginView);
    assert_eq!(model.active_plugin, Some(PluginId::Wallet));

    app.update(Event::BackRequested, &mut model);
    assert_eq!(model.state, ViewState::Feed);
    assert!(model.active_plugin.is_none());
}

#[test]
fn test_long_press_opens_picker_and_suppresses_tap() {
    let (app, mut model) = signed_in_model();

    app.update(Event::SlotPressed(Slot::Right), &mut model);
    app.update(Event::LongPressElapsed(Slot::Right), &mut model);
    assert_eq!(model.plugin_picker, Some(Slot::Right));
    assert_eq!(model.state, ViewState::Feed);

    app.update(Event::SlotReleased(Slot::Right), &mut model);
    assert_eq!(model.state, ViewState::Feed);

    app.update(
        Event::PluginPicked {
            slot: Slot::Right,
            plugin: PluginId::Weather,
        },
        &mut model,
    );
    assert!(model.plugin_picker.is_none());
    assert_eq!(model.slot_right, PluginId::Weather);
    assert!(model.active_toast.is_some());
}

#[test]
fn test_stale_timer_after_release_does_nothing() {
    let (app, mut model) = signed_in_model();

    app.update(Event::SlotPressed(Slot::Left), &mut model);
    app.update(Event::SlotReleased(Slot::Left), &mut model);
    let state_before = model.state;

    app.update(Event::LongPressElapsed(Slot::Left), &mut model);
    assert!(model.plugin_picker.is_none());
    assert_eq!(model.state, state_before);
}

#[test]
fn test_chrome_visibility_rules() {
    let (app, mut model) = signed_in_model();

    let vm = app.view(&model);
    assert!(vm.show_chrome);
    assert!(vm.show_sub_header);

    app.update(Event::StudioOpened, &mut model);
    let vm = app.view(&model);
    assert!(!vm.show_chrome);
    assert!(!vm.show_sub_header);

    app.update(Event::BackRequested, &mut model); // Profile
    let vm = app.view(&model);
    assert!(!vm.show_chrome);

    // Full plugin view keeps the chrome but drops the sub-header.
    app.update(Event::BackRequested, &mut model); // Feed
    model.slot_right = PluginId::Wallet;
    app.update(Event::SlotPressed(Slot::Right), &mut model);
    app.update(Event::SlotReleased(Slot::Right), &mut model);
    let vm = app.view(&model);
    assert!(vm.show_chrome);
    assert!(!vm.show_sub_header);
}

#[test]
fn test_unauthenticated_slots_are_inert() {
    let app = App::default();
    let mut model = Model::default();
    app.update(
        Event::Booted {
            backend_configured: false,
            now_ms: 0,
        },
        &mut model,
    );
    app.update(Event::LocalSessionLoaded { raw: None }, &mut model);

    app.update(Event::SlotPressed(Slot::Left), &mut model);
    app.update(Event::SlotReleased(Slot::Left), &mut model);
    assert_eq!(model.state, ViewState::SignIn);
    assert!(model.active_plugin.is_none());

    let vm = app.view(&model);
    assert!(!vm.show_chrome);
    assert!(matches!(vm.screen, Screen::SignIn { .. }));
}

#[test]
fn test_unknown_project_is_ignored() {
    let (app, mut model) = signed_in_model();
    app.update(Event::ProjectOpened(ProjectId("missing".into())), &mut model);
    assert_eq!(model.state, ViewState::Feed);
    assert!(model.active_project.is_none());
}

#[test]
fn test_every_update_renders() {
    let (app, mut model) = signed_in_model();
    for event in [
        Event::NavSelected(NavItem::Menu),
        Event::BackRequested,
        Event::GlobeOpened,
        Event::GlobeClosed,
        Event::ToastDismissed,
    ] {
        let effects = app.update(event, &mut model);
        assert!(effects.iter().any(Effect::is_render));
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn arb_nav_event() -> impl Strategy<Value = Event> {
        prop_oneof![
            Just(Event::NavSelected(NavItem::Home)),
            Just(Event::NavSelected(NavItem::Menu)),
            Just(Event::NavSelected(NavItem::SlotLeft)),
            Just(Event::NavSelected(NavItem::SlotRight)),
            Just(Event::SlotPressed(Slot::Left)),
            Just(Event::SlotReleased(Slot::Left)),
            Just(Event::SlotPointerLeft(Slot::Left)),
            Just(Event::LongPressElapsed(Slot::Left)),
            Just(Event::SlotPressed(Slot::Right)),
            Just(Event::SlotReleased(Slot::Right)),
            Just(Event::BackRequested),
            Just(Event::GlobeOpened),
            Just(Event::GlobeClosed),
            Just(Event::PublicProfileOpened),
            Just(Event::StudioOpened),
            Just(Event::FeedModeSelected(FeedMode::Personal)),
            Just(Event::FeedModeSelected(FeedMode::Global)),
            Just(Event::FeedSubModeSelected(FeedSubMode::ChatHub)),
            Just(Event::FeedSubModeSelected(FeedSubMode::Posts)),
            Just(Event::PluginPickerClosed),
            Just(Event::RoomOpened(RoomId("r1".into()))),
        ]
    }

    proptest! {
        /// Any navigation sequence keeps the model renderable and never
        /// strands a signed-in user on an auth screen.
        #[test]
        fn prop_navigation_never_wedges(events in prop::collection::vec(arb_nav_event(), 0..40)) {
            let (app, mut model) = signed_in_model();
            for event in events {
                let effects = app.update(event, &mut model);
                prop_assert!(effects.iter().any(Effect::is_render));
                let _ = app.view(&model);
                prop_assert!(model.session.is_some());
                prop_assert!(!matches!(
                    model.state,
                    ViewState::SignIn | ViewState::SignUp | ViewState::Loading
                ));
            }

            // Home always recovers the feed matching the current mode.
            app.update(Event::NavSelected(NavItem::Home), &mut model);
            match model.feed_mode {
                FeedMode::Global => prop_assert_eq!(model.state, ViewState::Feed),
                FeedMode::Personal => prop_assert_eq!(model.state, ViewState::MyFeed),
            }
            prop_assert_eq!(model.nav, NavItem::Home);
        }
    }
}
