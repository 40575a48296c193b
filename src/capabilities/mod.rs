//! Capability data types and the effect contract.
//!
//! Each module describes one external collaborator as pure request/response
//! types. [`Effect`] is what `App::update` returns: the list of things the
//! shell must (or, for best-effort writes, may) carry out before feeding the
//! resulting events back in.

pub mod auth;
pub mod genai;
pub mod storage;
pub mod store;

pub use self::auth::{
    AuthError, AuthErrorCode, AuthFlow, AuthIdentity, AuthOperation, PersistenceMode,
};
pub use self::genai::{
    AiModelId, AiModelInfo, ComposeModel, GenAiError, GenAiPurpose, GenerateRequest,
    AI_MODEL_CATALOG,
};
pub use self::storage::{SlotKey, StorageError, StorageOperation, StorageOutput};
pub use self::store::{Collection, StoreError, StoreOperation, StoreOutput};

use serde::{Deserialize, Serialize};

use crate::gesture::Slot;

/// Timers the core can ask the shell to run. A `Start` for an id supersedes
/// any outstanding timer with the same id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "timer", rename_all = "snake_case")]
pub enum TimerId {
    LongPress { slot: Slot },
}

/// Routes a store response back to the update arm that owns it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "context", rename_all = "snake_case")]
pub enum StoreContext {
    /// Extended-profile lookup after the auth provider reported an identity.
    /// Carries the identity so a failed lookup can still degrade to a
    /// minimal session.
    ProfileFetch { identity: Box<AuthIdentity> },
    /// Main feed query.
    FeedQuery,
    /// Seeding generated posts back into the store.
    FeedSeed,
    /// Persisting a profile edit.
    ProfilePersist,
    /// Writing the initial profile document for a fresh account.
    SignUpProfile,
}

impl StoreContext {
    /// Best-effort writes: failures are logged and ignored, and the shell is
    /// allowed to drop the result (or the whole effect) entirely.
    pub fn is_best_effort(&self) -> bool {
        matches!(
            self,
            Self::FeedSeed | Self::ProfilePersist | Self::SignUpProfile
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreCommand {
    pub context: StoreContext,
    pub operation: StoreOperation,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenAiCommand {
    pub purpose: GenAiPurpose,
    pub request: GenerateRequest,
}

/// A side effect requested from the shell.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    /// Re-render from the current `ViewModel`.
    Render,
    Auth(AuthOperation),
    Store(StoreCommand),
    GenAi(GenAiCommand),
    Storage(StorageOperation),
    StartTimer { id: TimerId, duration_ms: u64 },
    CancelTimer { id: TimerId },
}

impl Effect {
    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render)
    }

    pub fn store(context: StoreContext, operation: StoreOperation) -> Self {
        Self::Store(StoreCommand { context, operation })
    }

    pub fn gen_ai(purpose: GenAiPurpose, request: GenerateRequest) -> Self {
        Self::GenAi(GenAiCommand { purpose, request })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_effort_contexts() {
        assert!(StoreContext::FeedSeed.is_best_effort());
        assert!(StoreContext::ProfilePersist.is_best_effort());
        assert!(StoreContext::SignUpProfile.is_best_effort());
        assert!(!StoreContext::FeedQuery.is_best_effort());
        let identity = AuthIdentity {
            uid: "u1".into(),
            display_name: None,
            email: None,
            photo_url: None,
        };
        assert!(!StoreContext::ProfileFetch { identity: Box::new(identity) }.is_best_effort());
    }

    #[test]
    fn test_effect_serialization_tag() {
        let v = serde_json::to_value(Effect::Render).unwrap();
        assert_eq!(v["effect"], "render");
    }
}
