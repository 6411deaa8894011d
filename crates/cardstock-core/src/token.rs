use serde::{Deserialize, Serialize};

/// Snapshot of the open-scope set at one point in the markup.
///
/// Two styles are equal iff all three fields match; the renderer uses this to
/// pick a font variant and an optional fill color.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleState {
    pub bold: bool,
    pub italic: bool,
    /// Innermost open color scope, if any. Resolved against a [`crate::Palette`]
    /// at draw time; unknown names fall back to the caller's default color.
    pub color: Option<String>,
}

impl StyleState {
    pub fn plain() -> Self {
        Self::default()
    }
}

/// Atomic unit of the layout pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    /// A contiguous run of characters sharing one style snapshot.
    Text { content: String, style: StyleState },
    /// A named icon reference. Icons carry no style (never colorized or
    /// boldened) and never split across lines.
    Icon { name: String },
}

impl Token {
    pub fn text(content: impl Into<String>, style: StyleState) -> Self {
        Self::Text {
            content: content.into(),
            style,
        }
    }

    pub fn icon(name: impl Into<String>) -> Self {
        Self::Icon { name: name.into() }
    }

    /// Whether this is a text token consisting only of whitespace.
    pub fn is_whitespace(&self) -> bool {
        match self {
            Self::Text { content, .. } => {
                !content.is_empty() && content.chars().all(char::is_whitespace)
            }
            Self::Icon { .. } => false,
        }
    }
}
