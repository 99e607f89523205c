/// The single message slot of a screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    message: Option<String>,
}

impl StatusLine {
    pub fn set(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(status = %message, "status");
        self.message = Some(message);
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    #[must_use]
    pub fn get(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
