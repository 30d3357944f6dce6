use crate::Responder;

/// Stand-in for the course chat backend.
///
/// Every message gets the same acknowledgement; no network call is made.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderResponder;

impl PlaceholderResponder {
    pub fn new() -> Self {
        Self
    }

    pub fn reply_to(&self, content: &str) -> String {
        format!(
            "I received your message: \"{}\". This is a placeholder response. In production, this will connect to the backend API.",
            content
        )
    }
}

impl Responder for PlaceholderResponder {
    type Reply = String;

    fn name(&self) -> &str {
        "placeholder"
    }

    fn respond(&mut self, input: &str) -> String {
        self.reply_to(input)
    }
}
