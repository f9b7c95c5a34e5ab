pub mod classify;
pub mod config;
pub mod eta;
pub mod log;
pub mod provider;
pub mod summary;
pub mod template;
pub mod waybar;
pub mod window;

pub use classify::{Classification, Severity, Status, WindowKind};
pub use config::Config;
pub use provider::{Provider, ProviderProfile};
pub use template::{FieldValue, Fields, TemplateError, format_output};
pub use waybar::{RenderOptions, WaybarError, WaybarOutput};
pub use window::{ResetAt, WindowSpec, WindowUsage};
