use crate::api::MutationReply;

pub const GENERIC_ERROR: &str = "An error occurred";
pub const GENERIC_SUCCESS: &str = "Done";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

/// A message for the `#message` area.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    /// Server `message` on 2xx, server `detail` otherwise.
    pub fn from_reply(reply: &MutationReply) -> Self {
        if reply.ok() {
            let text = reply.body.message.clone();
            Notice::success(text.unwrap_or_else(|| GENERIC_SUCCESS.to_string()))
        } else {
            let text = reply.body.detail.clone();
            Notice::error(text.unwrap_or_else(|| GENERIC_ERROR.to_string()))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoticeToken(u64);

/// Owns the message currently on screen and its pending dismissal.
///
/// Every shown message gets a fresh token. Issuing a token drops the previous
/// dismissal handle (for `gloo_timers::callback::Timeout` that cancels it). A
/// dismissal that still fires only applies if its token is current.
#[derive(Debug)]
pub struct NoticeSlot<H> {
    issued: u64,
    pending: Option<H>,
}

impl<H> Default for NoticeSlot<H> {
    fn default() -> Self {
        Self {
            issued: 0,
            pending: None,
        }
    }
}

impl<H> NoticeSlot<H> {
    pub fn issue(&mut self) -> NoticeToken {
        self.pending = None;
        self.issued += 1;
        NoticeToken(self.issued)
    }

    pub fn arm(&mut self, token: NoticeToken, handle: H) {
        if self.is_current(token) {
            self.pending = Some(handle);
        }
    }

    pub fn is_current(&self, token: NoticeToken) -> bool {
        token.0 == self.issued
    }
}
