//! Edit-region tagging for rendered documents
//!
//! A rendered line may carry one of three sentinel suffixes agreed with the
//! editor consumer. The tag drives two independent consumer behaviors:
//! visual differentiation and the per-line edit permission. Classification is
//! a separate post-render step; the renderer itself never emits tags.

/// Sentinel suffix marking a user-editable line
pub const TAG_WRITEABLE: &str = "{@ WRITEABLE @}";
/// Sentinel suffix marking a read-only line
pub const TAG_READONLY: &str = "{@ READONLY @}";
/// Sentinel suffix marking a line sourced from upstream mapped data
pub const TAG_MAPPED: &str = "{@ MAPPED @}";

/// Edit-region classification of a single rendered line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionTag {
    /// Line accepts user keystrokes
    Writeable,
    /// Line is protected from editing
    ReadOnly,
    /// Line holds a mapped upstream value; visually distinct, not editable
    Mapped,
}

impl RegionTag {
    /// Classify a rendered line by its sentinel suffix
    ///
    /// Total and deterministic: trailing whitespace is ignored and a line
    /// bearing no recognized sentinel is implicitly writeable.
    #[must_use]
    pub fn classify(line: &str) -> Self {
        let trimmed = line.trim_end();
        if trimmed.ends_with(TAG_READONLY) {
            Self::ReadOnly
        } else if trimmed.ends_with(TAG_MAPPED) {
            Self::Mapped
        } else {
            // Explicit writeable sentinel and untagged both land here
            Self::Writeable
        }
    }

    /// Whether a line with this tag accepts user edits
    #[inline]
    #[must_use]
    pub fn editable(self) -> bool {
        matches!(self, Self::Writeable)
    }

    /// The sentinel suffix for this tag
    #[inline]
    #[must_use]
    pub fn sentinel(self) -> &'static str {
        match self {
            Self::Writeable => TAG_WRITEABLE,
            Self::ReadOnly => TAG_READONLY,
            Self::Mapped => TAG_MAPPED,
        }
    }
}

/// Visible text of a line: the sentinel and any padding before it removed
#[must_use]
pub fn strip_tag(line: &str) -> &str {
    let trimmed = line.trim_end();
    for tag in [TAG_WRITEABLE, TAG_READONLY, TAG_MAPPED] {
        if let Some(prefix) = trimmed.strip_suffix(tag) {
            return prefix.trim_end();
        }
    }
    line
}

/// A rendered line paired with its classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedLine {
    /// Visible text with the sentinel stripped
    pub text: String,
    /// Edit-region classification
    pub tag: RegionTag,
}

/// Classify a whole rendered document, one tag per line
///
/// This is the explicit post-render classification step consumed by the
/// editor; every line receives exactly one tag.
#[must_use]
pub fn tag_document(lines: &[String]) -> Vec<TaggedLine> {
    lines
        .iter()
        .map(|line| TaggedLine {
            text: strip_tag(line).to_string(),
            tag: RegionTag::classify(line),
        })
        .collect()
}
