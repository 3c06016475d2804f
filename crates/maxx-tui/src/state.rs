//! Application state.
//!
//! ```text
//! AppState
//! ├── composer: Composer        (raw prompt, masked display, caret)
//! ├── submit: SubmitState       (idle / pending)
//! ├── response: Option<String>  (last answer)
//! └── notice: Option<Notice>    (transient banner)
//! ```

use std::time::{Duration, Instant};

use maxx_core::composer::Composer;
use maxx_core::config::Config;

/// How long a notice stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(6);

/// Submission lifecycle. Only one prompt can be in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Pending { started: Instant },
}

impl SubmitState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmitState::Pending { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A transient banner shown above the footer.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
    pub expires_at: Instant,
}

impl Notice {
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, title, message)
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, title, message)
    }

    fn new(kind: NoticeKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            expires_at: Instant::now() + NOTICE_TTL,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

pub struct AppState {
    pub composer: Composer,
    pub submit: SubmitState,
    pub response: Option<String>,
    pub notice: Option<Notice>,
    /// Model label for the status line.
    pub model: String,
    pub should_quit: bool,
    pub spinner_frame: usize,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            composer: Composer::new(config.mask_style()),
            submit: SubmitState::Idle,
            response: None,
            notice: None,
            model: config.model.clone(),
            should_quit: false,
            spinner_frame: 0,
        }
    }

    /// Returns true when Enter would send the prompt.
    pub fn can_submit(&self) -> bool {
        self.composer.can_submit() && !self.submit.is_pending()
    }
}
