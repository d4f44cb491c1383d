//! Constrained-text templating
//!
//! The leaf crate of the analysis-job workspace:
//! - Renders analysis input files from a template plus a flattened data
//!   context, with strict unresolved-placeholder checking
//! - Classifies rendered lines into edit regions for the editor consumer
//!
//! # Example
//!
//! ```rust
//! use aces_template::ConstrainedTemplate;
//! use std::collections::BTreeMap;
//!
//! let mut ct = ConstrainedTemplate::new();
//! ct.load_template_str("Pressure: {{ P_T }}");
//!
//! let mut values = BTreeMap::new();
//! values.insert("P_T".to_string(), serde_json::json!(14.7));
//! ct.bind_flat(values);
//!
//! assert_eq!(ct.render().unwrap(), "Pressure: 14.7");
//! ```

pub mod context;
pub mod error;
pub mod region;
pub mod renderer;

pub use context::{DataContext, ParamValue, StructuredContext};
pub use error::TemplateError;
pub use region::{strip_tag, tag_document, RegionTag, TaggedLine};
pub use renderer::ConstrainedTemplate;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
