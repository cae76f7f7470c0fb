//! Navigation state abstract Trait

/// Current location and full-page navigation.
///
/// A navigation restarts the bootstrap with fresh state; nothing from the
/// current page load survives it.
pub trait Navigator: Send + Sync {
    /// Full current location, including any `#` fragment
    fn href(&self) -> String;

    /// Fragment of the current location including the leading `#`, if any
    fn hash(&self) -> Option<String> {
        let href = self.href();
        href.find('#').map(|i| href[i..].to_string())
    }

    /// Navigate to `target`, reloading the application
    fn navigate(&self, target: &str);
}

/// `href` with its fragment removed.
pub fn strip_fragment(href: &str) -> &str {
    href.split('#').next().unwrap_or(href)
}
