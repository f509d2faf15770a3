use std::collections::VecDeque;

use compact_str::CompactString;

use crate::{
    event::VibeEvent,
    id::{Handle, Slot},
    result::VibeError,
};

#[derive(Debug)]
pub struct NoticeService {
    info_notices: VecDeque<Notice>,
    error_notices: VecDeque<Notice>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: NoticeMessage,
}

#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NoticeMessage {
    GeneralMessage(CompactString),
    ProfileLoaded(Slot, CompactString),
    ProfileRemoved(Slot),
    /// Every pipeline failure, whatever the failing fetch
    ProfileUnavailable(Slot, Handle),
    InvalidHandle(CompactString),
    ConfigError(CompactString),
}

impl NoticeService {
    pub fn new() -> Self {
        Self {
            info_notices: VecDeque::new(),
            error_notices: VecDeque::new(),
        }
    }

    pub fn apply(&mut self, event: &VibeEvent) {
        match event {
            VibeEvent::ProfileLoaded(slot, _, view) => self.push_notice(
                NoticeLevel::Info,
                NoticeMessage::ProfileLoaded(*slot, view.profile.login.clone()),
            ),
            VibeEvent::ProfileFailed(slot, handle, _) => self.push_notice(
                NoticeLevel::Error,
                NoticeMessage::ProfileUnavailable(*slot, handle.clone()),
            ),
            VibeEvent::ProfileRemoved(slot) => {
                self.push_notice(NoticeLevel::Info, NoticeMessage::ProfileRemoved(*slot))
            },
            VibeEvent::ProfileRequested(_, _) => {},
        }
    }

    pub fn apply_error(&mut self, error: &VibeError) {
        let message = match error {
            VibeError::InvalidHandle { input, .. } => NoticeMessage::InvalidHandle(input.clone()),
            VibeError::ConfigLoadError { .. }
            | VibeError::ConfigSaveError { .. }
            | VibeError::ConfigValidationError { .. } => {
                NoticeMessage::ConfigError(error.to_string().into())
            },
            VibeError::GeneralError(message) => {
                NoticeMessage::GeneralMessage(message.clone())
            },
        };
        self.push_notice(NoticeLevel::Error, message);
    }

    /// Errors first, then info notices, each in arrival order
    pub fn pop_notice(&mut self) -> Option<Notice> {
        self.error_notices
            .pop_front()
            .or_else(|| self.info_notices.pop_front())
    }

    pub fn push_notice(&mut self, level: NoticeLevel, message: NoticeMessage) {
        let notice = Notice { level, message };

        match level {
            NoticeLevel::Info => self.info_notices.push_back(notice),
            NoticeLevel::Error => self.error_notices.push_back(notice),
        }
    }
}

impl Default for NoticeService {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NoticeMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            NoticeMessage::GeneralMessage(msg) => write!(f, "{msg}"),
            NoticeMessage::ProfileLoaded(slot, login) => write!(f, "Loaded {login} ({slot})"),
            NoticeMessage::ProfileRemoved(slot) => write!(f, "Removed {slot} profile"),
            NoticeMessage::ProfileUnavailable(_, handle) => {
                write!(f, "Error: User not found. Check the handle '{handle}'!")
            },
            NoticeMessage::InvalidHandle(input) => write!(f, "Error: '{input}' is not a valid handle"),
            NoticeMessage::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}
