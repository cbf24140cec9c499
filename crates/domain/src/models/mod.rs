//! Domain models for UTM templates.

pub mod export;
pub mod parsed_url;
pub mod platform;
pub mod template;

pub use export::{ExportEnvelope, EXPORT_FORMAT_VERSION};
pub use parsed_url::{LengthStatus, ParsedUrl, QueryParam, MAX_RECOMMENDED_URL_LENGTH};
pub use platform::{Platform, PlatformFilter};
pub use template::{SaveTemplateRequest, Template, TemplateData, DEFAULT_TEMPLATE_VERSION};
