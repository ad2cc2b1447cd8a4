//! Profile Loading
//!
//! Resolves the active rule profile. Priority, highest first: an explicit
//! `--config` file, the project file `./.html-audit.toml`, the user file
//! `<config dir>/html-audit/config.toml`, then the embedded default.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use super::schema::RuleProfile;

pub const PROJECT_PROFILE_FILE: &str = ".html-audit.toml";
pub const USER_PROFILE_DIR: &str = "html-audit";
pub const USER_PROFILE_FILE: &str = "config.toml";

const EMBEDDED_PROFILE: &str = include_str!("../../resources/profiles/default.toml");

/// Where the active profile came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSource {
    Explicit(PathBuf),
    Project(PathBuf),
    User(PathBuf),
    Embedded,
}

impl fmt::Display for ProfileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileSource::Explicit(path) => write!(f, "{} (--config)", path.display()),
            ProfileSource::Project(path) => write!(f, "{} (project)", path.display()),
            ProfileSource::User(path) => write!(f, "{} (user)", path.display()),
            ProfileSource::Embedded => write!(f, "built-in default"),
        }
    }
}

/// A profile together with its origin
#[derive(Debug, Clone)]
pub struct ResolvedProfile {
    pub profile: RuleProfile,
    pub source: ProfileSource,
}

/// The built-in profile. Falls back to the compiled-in defaults if the
/// embedded TOML cannot be parsed.
pub fn embedded_profile() -> RuleProfile {
    match parse_profile(EMBEDDED_PROFILE, None) {
        Ok(profile) => profile,
        Err(e) => {
            log::warn!("Failed to parse embedded profile: {:#}. Using defaults.", e);
            RuleProfile::default()
        }
    }
}

/// Parse profile content from a TOML string
pub fn parse_profile(content: &str, source_path: Option<&Path>) -> Result<RuleProfile> {
    toml::from_str(content).with_context(|| match source_path {
        Some(path) => format!("Failed to parse profile TOML: {}", path.display()),
        None => "Failed to parse built-in profile TOML".to_string(),
    })
}

/// Load a single profile file
pub fn load_profile_file(path: &Path) -> Result<RuleProfile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile file: {}", path.display()))?;
    parse_profile(&content, Some(path))
}

/// Pick the highest-priority profile available.
///
/// An explicit path must exist. Project and user files are optional, but if
/// present they must parse.
pub fn resolve_profile(
    explicit: Option<&Path>,
    project_dir: &Path,
    user_config_dir: Option<&Path>,
) -> Result<ResolvedProfile> {
    if let Some(path) = explicit {
        if !path.is_file() {
            bail!("Profile file not found: {}", path.display());
        }
        return Ok(ResolvedProfile {
            profile: load_profile_file(path)?,
            source: ProfileSource::Explicit(path.to_path_buf()),
        });
    }

    let project_file = project_dir.join(PROJECT_PROFILE_FILE);
    if project_file.is_file() {
        return Ok(ResolvedProfile {
            profile: load_profile_file(&project_file)?,
            source: ProfileSource::Project(project_file),
        });
    }

    if let Some(config_dir) = user_config_dir {
        let user_file = config_dir.join(USER_PROFILE_DIR).join(USER_PROFILE_FILE);
        if user_file.is_file() {
            return Ok(ResolvedProfile {
                profile: load_profile_file(&user_file)?,
                source: ProfileSource::User(user_file),
            });
        }
    }

    Ok(ResolvedProfile {
        profile: embedded_profile(),
        source: ProfileSource::Embedded,
    })
}
