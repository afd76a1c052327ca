//! Common test utilities
//!
//! `RecordingTransport` stands in for Telegram and remembers every call;
//! `ScriptedEngine` stands in for yt-dlp and writes sparse files of a chosen size.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use teloxide::types::{ChatAction, ChatId, InlineKeyboardButtonKind, InlineKeyboardMarkup, MessageId};
use url::Url;

use grabbot::telegram::{ChatTransport, HandlerDeps, MediaUpload, TransportError};
use grabcore::download::{DownloadError, EngineOptions, MediaEngine, MediaInfo};
use grabcore::{Downloader, SessionStore, Settings};

pub const MB: u64 = 1024 * 1024;
pub const CHAT: ChatId = ChatId(42);
pub const USER: u64 = 111;

/// One outbound call seen by the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Send {
        id: MessageId,
        text: String,
        buttons: Vec<String>,
    },
    Edit {
        id: MessageId,
        text: String,
        buttons: Vec<String>,
    },
    Delete(MessageId),
    Action(ChatAction),
    Media {
        upload: MediaUpload,
        file_existed: bool,
    },
}

fn callback_data(keyboard: Option<InlineKeyboardMarkup>) -> Vec<String> {
    keyboard
        .map(|k| {
            k.inline_keyboard
                .into_iter()
                .flatten()
                .filter_map(|button| match button.kind {
                    InlineKeyboardButtonKind::CallbackData(data) => Some(data),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<Call>>,
    next_id: AtomicI32,
    fail_uploads: AtomicBool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_uploads() -> Self {
        let transport = Self::default();
        transport.fail_uploads.store(true, Ordering::SeqCst);
        transport
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Texts of all sent and edited messages, in order.
    pub fn texts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Send { text, .. } | Call::Edit { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn last_text(&self) -> Option<String> {
        self.texts().pop()
    }

    pub fn uploads(&self) -> Vec<(MediaUpload, bool)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Media { upload, file_existed } => Some((upload, file_existed)),
                _ => None,
            })
            .collect()
    }

    /// Callback payloads of the last keyboard shown.
    pub fn last_buttons(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .rev()
            .find_map(|call| match call {
                Call::Send { buttons, .. } | Call::Edit { buttons, .. } if !buttons.is_empty() => Some(buttons),
                _ => None,
            })
            .unwrap_or_default()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_message_id(&self) -> MessageId {
        MessageId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_text(
        &self,
        _chat_id: ChatId,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<MessageId, TransportError> {
        let id = self.next_message_id();
        self.record(Call::Send {
            id,
            text: text.to_string(),
            buttons: callback_data(keyboard),
        });
        Ok(id)
    }

    async fn edit_text(
        &self,
        _chat_id: ChatId,
        message_id: MessageId,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), TransportError> {
        self.record(Call::Edit {
            id: message_id,
            text: text.to_string(),
            buttons: callback_data(keyboard),
        });
        Ok(())
    }

    async fn delete_message(&self, _chat_id: ChatId, message_id: MessageId) -> Result<(), TransportError> {
        self.record(Call::Delete(message_id));
        Ok(())
    }

    async fn send_action(&self, _chat_id: ChatId, action: ChatAction) -> Result<(), TransportError> {
        self.record(Call::Action(action));
        Ok(())
    }

    async fn send_media(&self, _chat_id: ChatId, upload: MediaUpload) -> Result<MessageId, TransportError> {
        let file_existed = upload.path.exists();
        self.record(Call::Media { upload, file_existed });
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(TransportError::Rejected("Request Entity Too Large".to_string()));
        }
        Ok(self.next_message_id())
    }
}

/// yt-dlp stand-in: fixed estimate, download writes `actual_mb`.
pub struct ScriptedEngine {
    title: String,
    estimated_mb: u64,
    actual_mb: u64,
    probe_calls: AtomicUsize,
    download_calls: AtomicUsize,
    seen_options: Mutex<Vec<EngineOptions>>,
}

impl ScriptedEngine {
    pub fn sized(title: &str, estimated_mb: u64, actual_mb: u64) -> Self {
        Self {
            title: title.to_string(),
            estimated_mb,
            actual_mb,
            probe_calls: AtomicUsize::new(0),
            download_calls: AtomicUsize::new(0),
            seen_options: Mutex::new(Vec::new()),
        }
    }

    pub fn probes(&self) -> usize {
        self.probe_calls.load(Ordering::SeqCst)
    }

    pub fn downloads(&self) -> usize {
        self.download_calls.load(Ordering::SeqCst)
    }

    pub fn last_options(&self) -> Option<EngineOptions> {
        self.seen_options.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl MediaEngine for ScriptedEngine {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn probe(&self, _url: &Url, options: &EngineOptions) -> Result<MediaInfo, DownloadError> {
        self.probe_calls.fetch_add(1, Ordering::SeqCst);
        self.seen_options.lock().unwrap().push(options.clone());
        Ok(MediaInfo {
            title: Some(self.title.clone()),
            uploader: Some("Test Channel".to_string()),
            duration: Some(125.0),
            filesize_approx: Some(self.estimated_mb * MB),
            ..Default::default()
        })
    }

    async fn download(&self, _url: &Url, options: &EngineOptions) -> Result<PathBuf, DownloadError> {
        let n = self.download_calls.fetch_add(1, Ordering::SeqCst);
        let dir = options.output_template.parent().unwrap_or(Path::new("."));
        let ext = if options.extract_audio { "mp3" } else { "mp4" };
        let path = dir.join(format!("{}-{}.{}", self.title, n, ext));
        let file = std::fs::File::create(&path).map_err(|e| DownloadError::Process(e.to_string()))?;
        file.set_len(self.actual_mb * MB)
            .map_err(|e| DownloadError::Process(e.to_string()))?;
        Ok(path)
    }
}

/// Handler dependencies over a scripted engine and a temp download dir.
pub fn deps(dir: &tempfile::TempDir, engine: Arc<ScriptedEngine>, allowed_users: &str) -> HandlerDeps {
    let settings = Arc::new(
        Settings::default()
            .with_download_dir(dir.path())
            .with_allowed_users(allowed_users),
    );
    HandlerDeps::new(
        Downloader::new(engine, &settings),
        SessionStore::new(&settings),
        settings,
    )
}

/// Number of files left in the download dir.
pub fn leftover_files(dir: &tempfile::TempDir) -> usize {
    std::fs::read_dir(dir.path()).map(|entries| entries.count()).unwrap_or(0)
}
