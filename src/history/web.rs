//! Browser-style history with a base path.

use crate::history::base::{create_href, normalize_base, strip_base};

/// Default cap on retained history entries.
pub const DEFAULT_MAX_ENTRIES: usize = 50;

/// History stack equivalent to a browser's session history for one tab.
///
/// Entries are stored relative to the base. Pushing truncates any forward
/// entries, the same way a browser discards them after `pushState`.
#[derive(Debug, Clone)]
pub struct WebHistory {
    base: String,
    entries: Vec<String>,
    position: usize,
    max_entries: usize,
}

impl WebHistory {
    /// Create a history mounted at `base`, starting at `initial_url`.
    ///
    /// An initial URL outside the base is kept unchanged.
    pub fn new(base: &str, initial_url: &str) -> Self {
        let base = normalize_base(base);
        let initial = strip_base(&base, initial_url).unwrap_or_else(|| initial_url.to_string());
        Self {
            base,
            entries: vec![initial],
            position: 0,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }

    /// Limit the number of retained entries (at least one is always kept).
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self.trim();
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Current location, relative to the base.
    pub fn location(&self) -> &str {
        &self.entries[self.position]
    }

    pub fn push(&mut self, location: impl Into<String>) {
        self.entries.truncate(self.position + 1);
        self.entries.push(location.into());
        self.position = self.entries.len() - 1;
        self.trim();
    }

    pub fn replace(&mut self, location: impl Into<String>) {
        self.entries[self.position] = location.into();
    }

    /// Move `delta` entries through the stack. Out-of-range moves are ignored.
    pub fn go(&mut self, delta: isize) -> bool {
        let Some(target) = (self.position as isize).checked_add(delta) else {
            return false;
        };
        if delta == 0 || target < 0 || target >= self.entries.len() as isize {
            return false;
        }
        self.position = target as usize;
        true
    }

    pub fn back(&mut self) -> bool {
        self.go(-1)
    }

    pub fn forward(&mut self) -> bool {
        self.go(1)
    }

    pub fn can_go_back(&self) -> bool {
        self.position > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.position + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Absolute href for a location, including the base.
    pub fn create_href(&self, location: &str) -> String {
        create_href(&self.base, location)
    }

    fn trim(&mut self) {
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
            self.position = self.position.saturating_sub(excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_location_strips_base() {
        let history = WebHistory::new("/app/", "/app/results/1");
        assert_eq!(history.base(), "/app");
        assert_eq!(history.location(), "/results/1");
        assert_eq!(history.create_href("/settings"), "/app/settings");

        let outside = WebHistory::new("/app", "/elsewhere");
        assert_eq!(outside.location(), "/elsewhere");
    }

    #[test]
    fn test_push_back_forward() {
        let mut history = WebHistory::new("/", "/");
        history.push("/target/example.com/1");
        history.push("/results/1");
        assert_eq!(history.len(), 3);

        assert!(history.back());
        assert_eq!(history.location(), "/target/example.com/1");
        assert!(history.can_go_forward());

        // Pushing from the middle drops forward entries.
        history.push("/settings");
        assert_eq!(history.len(), 3);
        assert!(!history.forward());
        assert_eq!(history.location(), "/settings");
    }

    #[test]
    fn test_go_out_of_range() {
        let mut history = WebHistory::new("", "/");
        assert!(!history.back());
        assert!(!history.go(3));
        assert!(!history.go(0));
        assert_eq!(history.location(), "/");
    }

    #[test]
    fn test_go_extreme_deltas() {
        let mut history = WebHistory::new("", "/");
        history.push("/settings");
        assert!(!history.go(isize::MAX));
        assert!(!history.go(isize::MIN));
        assert_eq!(history.location(), "/settings");

        assert!(history.back());
        assert!(!history.go(isize::MAX));
        assert!(!history.go(isize::MIN));
        assert_eq!(history.location(), "/");
    }

    #[test]
    fn test_replace() {
        let mut history = WebHistory::new("", "/");
        history.push("/results/1");
        history.replace("/results/2");
        assert_eq!(history.len(), 2);
        assert_eq!(history.location(), "/results/2");
    }

    #[test]
    fn test_max_entries() {
        let mut history = WebHistory::new("", "/").with_max_entries(3);
        for i in 0..5 {
            history.push(format!("/results/{}", i));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.location(), "/results/4");
        assert!(history.go(-2));
        assert_eq!(history.location(), "/results/2");
        assert!(!history.back());
    }
}
