//! Error types for the templating crate

use std::path::PathBuf;

/// Errors raised while loading or rendering a constrained template
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Template file could not be read
    #[error("failed to load template from {path}: {source}")]
    Load {
        /// Path that could not be read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Render attempted before both a template and a data context were bound
    #[error("template is not ready to render: template or data context missing")]
    NotReady,

    /// Template references a name absent from the bound context
    #[error("unresolved placeholder: {name}")]
    UnresolvedPlaceholder {
        /// Placeholder name with no value in the context
        name: String,
    },
}
