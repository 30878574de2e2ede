pub mod toml_config;

#[cfg(feature = "cli")]
pub mod cli;

pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "visit-week")]
#[command(about = "Check visit weeks against the lookup service, with a local fallback")]
pub struct CliConfig {
    /// Optional TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Override service.base_url
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Override session.dir
    #[arg(long, global = true)]
    pub session_dir: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: cli::Command,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// File settings (or defaults) with command-line overrides applied.
    pub fn settings(&self) -> Result<TomlConfig> {
        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            settings.service.base_url = base_url.clone();
        }
        if let Some(dir) = &self.session_dir {
            settings.session.dir = Some(dir.clone());
        }

        Ok(settings)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_on_defaults() {
        let args = CliConfig::parse_from([
            "visit-week",
            "--base-url",
            "http://localhost:9000",
            "--session-dir",
            "/tmp/vw",
            "check",
            "2025-08-16",
            "--offline",
        ]);
        let settings = args.settings().unwrap();
        assert_eq!(settings.service.base_url, "http://localhost:9000");
        assert_eq!(settings.session_dir(), "/tmp/vw");
        assert!(matches!(
            args.command,
            cli::Command::Check { offline: true, .. }
        ));
    }
}
