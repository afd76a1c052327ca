//! Per-user conversation state.
//!
//! Each user has a preference bag and at most one pending large file waiting
//! for a premium answer. Conversations live in a bounded moka cache and are
//! forgotten after `session_idle` without activity; a forgotten pending file
//! is dropped, which deletes it from disk.

use std::path::Path;
use std::sync::Arc;

use moka::future::Cache;
use tokio::sync::Mutex;

use crate::core::config::Settings;
use crate::download::temp::RemoveOutcome;
use crate::download::{DownloadedMedia, MediaKind, Quality};

/// Telegram user id
pub type UserKey = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversationPrefs {
    pub quality: Quality,
    pub media_kind: MediaKind,
    pub has_premium: bool,
}

/// A downloaded file above the regular limit, parked until the user answers
/// the premium question.
#[derive(Debug)]
pub struct PendingLargeFile {
    pub media: DownloadedMedia,
    pub size_mb: f64,
    pub media_kind: MediaKind,
}

impl PendingLargeFile {
    pub fn new(media: DownloadedMedia) -> Self {
        Self {
            size_mb: media.file_size_mb,
            media_kind: media.media_kind,
            media,
        }
    }

    pub fn path(&self) -> &Path {
        self.media.file.path()
    }
}

#[derive(Debug, Default)]
struct Conversation {
    prefs: ConversationPrefs,
    pending: Option<PendingLargeFile>,
}

type SharedConversation = Arc<Mutex<Conversation>>;

/// Keyed store of conversations with idle eviction.
#[derive(Clone)]
pub struct SessionStore {
    conversations: Cache<UserKey, SharedConversation>,
}

impl SessionStore {
    pub fn new(settings: &Settings) -> Self {
        let conversations = Cache::builder()
            .max_capacity(settings.session_capacity)
            .time_to_idle(settings.session_idle)
            .eviction_listener(|user, _conversation, cause| {
                log::debug!("Conversation {} evicted ({:?})", user, cause);
            })
            .build();
        Self { conversations }
    }

    async fn conversation(&self, user: UserKey) -> SharedConversation {
        self.conversations
            .get_with(user, async { Arc::new(Mutex::new(Conversation::default())) })
            .await
    }

    /// Current preferences; defaults for unknown users (no entry is created).
    pub async fn prefs(&self, user: UserKey) -> ConversationPrefs {
        match self.conversations.get(&user).await {
            Some(conversation) => conversation.lock().await.prefs,
            None => ConversationPrefs::default(),
        }
    }

    pub async fn set_quality(&self, user: UserKey, quality: Quality) {
        self.conversation(user).await.lock().await.prefs.quality = quality;
    }

    pub async fn set_media_kind(&self, user: UserKey, media_kind: MediaKind) {
        self.conversation(user).await.lock().await.prefs.media_kind = media_kind;
    }

    pub async fn set_premium(&self, user: UserKey, has_premium: bool) {
        self.conversation(user).await.lock().await.prefs.has_premium = has_premium;
    }

    /// Parks a large file for the user.
    ///
    /// A file already waiting is deleted before it is replaced. Returns true
    /// when that happened.
    pub async fn put_pending(&self, user: UserKey, pending: PendingLargeFile) -> bool {
        let conversation = self.conversation(user).await;
        let mut guard = conversation.lock().await;
        let previous = guard.pending.replace(pending);
        drop(guard);

        match previous {
            Some(mut old) => {
                let outcome = old.media.file.remove();
                if outcome != RemoveOutcome::Failed {
                    log::info!(
                        "User {}: superseded pending file {} ({:?})",
                        user,
                        old.path().display(),
                        outcome
                    );
                }
                true
            }
            None => false,
        }
    }

    /// Removes and returns the user's pending file, if any.
    pub async fn take_pending(&self, user: UserKey) -> Option<PendingLargeFile> {
        let conversation = self.conversations.get(&user).await?;
        let mut guard = conversation.lock().await;
        guard.pending.take()
    }

    pub async fn has_pending(&self, user: UserKey) -> bool {
        match self.conversations.get(&user).await {
            Some(conversation) => conversation.lock().await.pending.is_some(),
            None => false,
        }
    }

    /// Approximate number of remembered conversations.
    pub async fn len(&self) -> u64 {
        self.conversations.run_pending_tasks().await;
        self.conversations.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
