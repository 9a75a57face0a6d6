//! User-visible modal messages

use std::collections::VecDeque;

use crate::error::EditorError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A titled message shown in a modal window until dismissed
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            level: NoticeLevel::Info,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            title: "Warning".into(),
            message: message.into(),
            level: NoticeLevel::Warning,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".into(),
            message: message.into(),
            level: NoticeLevel::Error,
        }
    }
}

impl From<&EditorError> for Notice {
    fn from(err: &EditorError) -> Self {
        Self {
            title: err.title().into(),
            message: err.to_string(),
            level: if err.is_warning() {
                NoticeLevel::Warning
            } else {
                NoticeLevel::Error
            },
        }
    }
}

/// FIFO of pending notices; the front one is displayed
#[derive(Debug, Default)]
pub struct Notices {
    queue: VecDeque<Notice>,
}

impl Notices {
    pub fn push(&mut self, notice: Notice) {
        self.queue.push_back(notice);
    }

    pub fn current(&self) -> Option<&Notice> {
        self.queue.front()
    }

    /// Close the displayed notice
    pub fn dismiss(&mut self) -> Option<Notice> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.queue.iter()
    }
}
