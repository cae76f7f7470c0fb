//! Structured content for list rows.

/// One row of a list surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListItem {
    pub primary: String,
    pub secondary: Option<String>,
    /// Icon name understood by the rendering surface
    pub icon: Option<String>,
    pub href: Option<String>,
}

impl ListItem {
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_secondary(mut self, secondary: impl Into<String>) -> Self {
        let secondary = secondary.into();
        self.secondary = (!secondary.is_empty()).then_some(secondary);
        self
    }

    #[must_use]
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Primary text cut to `max_chars` characters, with `...` appended when cut.
    pub fn display_primary(&self, max_chars: usize) -> String {
        if self.primary.chars().count() > max_chars {
            let truncated: String = self.primary.chars().take(max_chars).collect();
            format!("{truncated}...")
        } else {
            self.primary.clone()
        }
    }
}
