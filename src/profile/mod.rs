//! Rule Profiles
//!
//! The fixed rule catalogue constants, shipped as an embedded TOML profile and
//! overridable per project or per user.

pub mod loader;
pub mod schema;

pub use loader::{embedded_profile, resolve_profile, ProfileSource, ResolvedProfile};
pub use schema::{CleaningSettings, ProfileMeta, RuleProfile, RuleSettings};
