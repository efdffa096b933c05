use serde::Serialize;

/// Recoverable data-quality problems found while parsing or analyzing.
///
/// Order of first occurrence is kept; repeats are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Warnings(Vec<String>);

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.0.contains(&message) {
            tracing::warn!("{}", message);
            self.0.push(message);
        }
    }

    /// Merge warnings that were already logged when first recorded.
    pub fn extend(&mut self, other: Warnings) {
        for message in other.0 {
            if !self.0.contains(&message) {
                self.0.push(message);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}
