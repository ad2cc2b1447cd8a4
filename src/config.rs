//! Configuration management for html-audit.
//!
//! Handles:
//! - Command-line argument parsing
//! - Rule profile resolution

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use crate::normalize::CleanOptions;
use crate::profile::{resolve_profile, ProfileSource, RuleProfile};

pub const DEFAULT_INPUT_DIR: &str = "_input";
pub const DEFAULT_OUTPUT_DIR: &str = "_output";

/// Command-line arguments for html-audit
#[derive(Debug, Parser)]
#[command(name = "html-audit")]
#[command(about = "Audit and normalize HTML pages against structural and accessibility rules")]
#[command(version)]
pub struct Args {
    /// Explicit rule profile file
    #[arg(long, global = true, help = "Rule profile TOML file")]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(
        long,
        global = true,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,

    /// Prune text elements only and leave tables alone
    #[arg(long, global = true)]
    pub conservative: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Report diagnostics for every page
    Audit {
        #[arg(long, default_value = DEFAULT_INPUT_DIR)]
        input: PathBuf,

        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
    /// Write normalized pages (and copied assets) to an output tree
    Clean {
        #[arg(long, default_value = DEFAULT_INPUT_DIR)]
        input: PathBuf,

        #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
        output: PathBuf,

        /// Do not copy non-HTML files
        #[arg(long)]
        no_copy: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub command: Command,
    pub profile: RuleProfile,
    pub profile_source: ProfileSource,
    pub clean_options: CleanOptions,
    pub log_level: String,
}

impl Config {
    /// Create configuration from explicit arguments, resolving project
    /// profiles against the current directory
    pub fn from_args(args: Args) -> Result<Self> {
        let project_dir =
            std::env::current_dir().context("Failed to read current directory")?;
        let user_dir = dirs::config_dir();
        Self::from_args_in(args, &project_dir, user_dir.as_deref())
    }

    /// Create configuration with explicit lookup directories (useful for testing)
    pub fn from_args_in(
        args: Args,
        project_dir: &Path,
        user_config_dir: Option<&Path>,
    ) -> Result<Self> {
        let resolved = resolve_profile(args.config.as_deref(), project_dir, user_config_dir)?;
        log::debug!("Using rule profile from {}", resolved.source);

        let clean_options = if args.conservative {
            CleanOptions::conservative()
        } else {
            CleanOptions::from_settings(
                &resolved.profile.cleaning,
                &resolved.profile.rules.table_display_class,
            )
        };

        Ok(Config {
            command: args.command,
            profile: resolved.profile,
            profile_source: resolved.source,
            clean_options,
            log_level: args.log_level,
        })
    }

    /// Input directory of either subcommand
    pub fn input_dir(&self) -> &Path {
        match &self.command {
            Command::Audit { input, .. } | Command::Clean { input, .. } => input,
        }
    }
}
