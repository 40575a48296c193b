//! Long-press disambiguation for the two rebindable navigation slots.
//!
//! A short press-release on a slot activates its bound plugin (a tap). A
//! press held past [`crate::LONG_PRESS_MS`] opens the plugin picker instead
//! and suppresses the tap. The timer itself runs in the shell; the core only
//! asks for it to be started or cancelled and reacts to its expiry event.
//!
//! Guarantees:
//! - a press released before the threshold fires the tap exactly once;
//! - a press held past the threshold fires only the long-press;
//! - leaving the control before release fires nothing;
//! - a stale timer expiry after release fires nothing.

use serde::{Deserialize, Serialize};

/// One of the two rebindable navigation slots.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Left,
    Right,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SlotGesture {
    #[default]
    Idle,
    Pressed {
        slot: Slot,
    },
    LongPressFired {
        slot: Slot,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GestureInput {
    Pressed(Slot),
    Released(Slot),
    PointerLeft(Slot),
    TimerElapsed(Slot),
}

/// The user-visible action a transition produced, if any.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GestureFire {
    Tap(Slot),
    LongPress(Slot),
}

/// Timer request for the shell. There is only one press at a time, so a new
/// `Start` supersedes any outstanding timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimerCommand {
    Start(Slot),
    Cancel,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GestureTransition {
    pub fire: Option<GestureFire>,
    pub timer: Option<TimerCommand>,
}

impl SlotGesture {
    /// Advance the machine. Inputs that do not apply to the current state
    /// (stale timer expiry, release without a press, events for the other
    /// slot) are ignored rather than treated as errors: pointer event streams
    /// are not reliable enough to make them protocol violations.
    pub fn apply(&mut self, input: GestureInput) -> GestureTransition {
        let mut out = GestureTransition::default();

        match (*self, input) {
            (_, GestureInput::Pressed(slot)) => {
                *self = SlotGesture::Pressed { slot };
                out.timer = Some(TimerCommand::Start(slot));
            }

            (SlotGesture::Pressed { slot }, GestureInput::Released(s)) if s == slot => {
                *self = SlotGesture::Idle;
                out.fire = Some(GestureFire::Tap(slot));
                out.timer = Some(TimerCommand::Cancel);
            }

            (SlotGesture::Pressed { slot }, GestureInput::PointerLeft(s)) if s == slot => {
                *self = SlotGesture::Idle;
                out.timer = Some(TimerCommand::Cancel);
            }

            (SlotGesture::Pressed { slot }, GestureInput::TimerElapsed(s)) if s == slot => {
                *self = SlotGesture::LongPressFired { slot };
                out.fire = Some(GestureFire::LongPress(slot));
            }

            (SlotGesture::LongPressFired { slot }, GestureInput::Released(s))
            | (SlotGesture::LongPressFired { slot }, GestureInput::PointerLeft(s))
                if s == slot =>
            {
                // The long-press already fired; the release is spent.
                *self = SlotGesture::Idle;
            }

            _ => {}
        }

        out
    }
}
