pub const MSG_SELECT_SCENE: &str = "請先選擇 Scene";
pub const MSG_WRITE_FAILED: &str = "寫入失敗";
pub const MSG_NETWORK_ERROR: &str = "網路錯誤";

/// Delay before a success message clears itself.
pub const FEEDBACK_CLEAR_MS: u32 = 2500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackKind {
    /// Success or informational; cleared by a timer.
    Normal,
    /// Stays until the next action replaces it.
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
    pub kind: FeedbackKind,
}

impl Feedback {
    pub fn success(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: FeedbackKind::Normal }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: FeedbackKind::Error }
    }

    pub fn is_error(&self) -> bool {
        self.kind == FeedbackKind::Error
    }
}

pub fn recorded_message(scene: &str, time: &str) -> String {
    format!("已記錄 {} 第 {} 秒", scene, time)
}

/// CSS class for the feedback element.
pub fn feedback_class(feedback: Option<&Feedback>) -> &'static str {
    match feedback.map(|f| f.kind) {
        None => "feedback",
        Some(FeedbackKind::Normal) => "feedback success",
        Some(FeedbackKind::Error) => "feedback error",
    }
}
