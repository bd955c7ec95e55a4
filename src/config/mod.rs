//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use syntect::highlighting::Theme;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::{
    render::RendererOptions,
    themes::{self, DEFAULT_THEME_NAME},
};

const LOCAL_CONFIG_BASENAME: &str = "fencemark";
const ENV_PREFIX: &str = "FENCEMARK";

/// Command-line arguments for the fencemark binary.
#[derive(Debug, Parser)]
#[command(
    name = "fencemark",
    version,
    about = "Render Markdown to HTML with syntax-highlighted code blocks"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "FENCEMARK_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub logging: LoggingOverrides,

    /// Arguments for the implicit `render` command.
    #[command(flatten)]
    pub render: RenderArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Render a Markdown document to HTML (the default).
    Render(RenderArgs),
    /// List the available highlighting themes.
    Themes,
    /// Print the stylesheet rules for a theme.
    Css(CssArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct LoggingOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct RenderArgs {
    /// Markdown file to render; stdin when omitted or `-`.
    #[arg(value_name = "INPUT", value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Write HTML to this file instead of stdout.
    #[arg(short = 'o', long = "output", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: RenderOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct RenderOverrides {
    /// Override the highlighting theme.
    #[arg(long = "theme", value_name = "NAME")]
    pub theme: Option<String>,

    /// Do not prepend the theme stylesheet to the document.
    #[arg(long = "no-embed-css", action = clap::ArgAction::SetTrue)]
    pub no_embed_css: bool,

    /// Do not guess the language of unannotated code blocks.
    #[arg(long = "no-autodetect", action = clap::ArgAction::SetTrue)]
    pub no_autodetect: bool,
}

#[derive(Debug, Args, Default, Clone)]
pub struct CssArgs {
    /// Theme to print; the configured theme when omitted.
    #[arg(long = "theme", value_name = "NAME")]
    pub theme: Option<String>,
}

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub render: RenderSettings,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub theme_name: String,
    pub theme: &'static Theme,
    pub embed_css: bool,
    pub autodetect: bool,
}

impl RenderSettings {
    pub fn renderer_options(&self) -> RendererOptions {
        RendererOptions::new(self.theme.clone())
            .with_embed_css(self.embed_css)
            .with_autodetect(self.autodetect)
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder =
        Config::builder().add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    raw.apply_logging_overrides(&cli.logging);
    // Flags given before a subcommand apply first; the subcommand's own flags win.
    raw.apply_render_overrides(&cli.render.overrides);
    match cli.command.as_ref() {
        Some(Command::Render(args)) => raw.apply_render_overrides(&args.overrides),
        Some(Command::Css(args)) => raw.apply_theme_override(args.theme.as_ref()),
        Some(Command::Themes) | None => {}
    }

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    logging: RawLoggingSettings,
    render: RawRenderSettings,
}

impl RawSettings {
    fn apply_logging_overrides(&mut self, overrides: &LoggingOverrides) {
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }

    fn apply_render_overrides(&mut self, overrides: &RenderOverrides) {
        self.apply_theme_override(overrides.theme.as_ref());
        if overrides.no_embed_css {
            self.render.embed_css = Some(false);
        }
        if overrides.no_autodetect {
            self.render.autodetect = Some(false);
        }
    }

    fn apply_theme_override(&mut self, theme: Option<&String>) {
        if let Some(theme) = theme {
            self.render.theme = Some(theme.clone());
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings { logging, render } = raw;

        let logging = build_logging_settings(logging)?;
        let render = build_render_settings(render)?;

        Ok(Self { logging, render })
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::WARN,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_render_settings(render: RawRenderSettings) -> Result<RenderSettings, LoadError> {
    let theme_name = render
        .theme
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_THEME_NAME.to_string());

    let theme = themes::registry()
        .resolve(&theme_name)
        .map_err(|err| LoadError::invalid("render.theme", err.to_string()))?;

    Ok(RenderSettings {
        theme_name,
        theme,
        embed_css: render.embed_css.unwrap_or(true),
        autodetect: render.autodetect.unwrap_or(true),
    })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawRenderSettings {
    theme: Option<String>,
    embed_css: Option<bool>,
    autodetect: Option<bool>,
}

/// Resolve configuration using the process arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_the_shared_renderer() {
        let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");
        assert_eq!(settings.render.theme_name, DEFAULT_THEME_NAME);
        assert!(settings.render.embed_css);
        assert!(settings.render.autodetect);
        assert_eq!(settings.logging.level, LevelFilter::WARN);
        assert!(matches!(settings.logging.format, LogFormat::Compact));
    }

    #[test]
    fn cli_overrides_take_highest_precedence() {
        let mut raw = RawSettings::default();
        raw.render.theme = Some("dracula".to_string());
        raw.logging.level = Some("info".to_string());

        raw.apply_logging_overrides(&LoggingOverrides {
            log_level: Some("debug".to_string()),
            ..Default::default()
        });
        raw.apply_render_overrides(&RenderOverrides {
            theme: Some("nord".to_string()),
            no_embed_css: true,
            ..Default::default()
        });
        let settings = Settings::from_raw(raw).expect("valid settings");

        assert_eq!(settings.render.theme_name, "nord");
        assert!(!settings.render.embed_css);
        assert!(settings.render.autodetect);
        assert_eq!(settings.logging.level, LevelFilter::DEBUG);
    }

    #[test]
    fn cli_json_logging_enforces_format() {
        let mut raw = RawSettings::default();
        raw.apply_logging_overrides(&LoggingOverrides {
            log_json: Some(true),
            ..Default::default()
        });
        let settings = Settings::from_raw(raw).expect("valid settings");

        assert!(matches!(settings.logging.format, LogFormat::Json));
    }

    #[test]
    fn unknown_theme_is_rejected() {
        let mut raw = RawSettings::default();
        raw.render.theme = Some("no-such-theme".to_string());

        let err = Settings::from_raw(raw).expect_err("unknown theme");
        assert!(matches!(
            err,
            LoadError::Invalid {
                key: "render.theme",
                ..
            }
        ));
    }

    #[test]
    fn invalid_log_level_is_rejected() {
        let mut raw = RawSettings::default();
        raw.logging.level = Some("chatty".to_string());

        let err = Settings::from_raw(raw).expect_err("bad level");
        assert!(matches!(
            err,
            LoadError::Invalid {
                key: "logging.level",
                ..
            }
        ));
    }

    #[test]
    fn config_file_is_layered_under_cli() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("tmp file");
        file.write_all(b"[render]\ntheme = \"nord\"\nautodetect = false\n\n[logging]\nlevel = \"info\"\n")
            .expect("write config");
        let path = file.path().to_str().expect("utf8 path");

        let from_file = load(&CliArgs::parse_from(["fencemark", "--config-file", path]))
            .expect("settings");
        assert_eq!(from_file.render.theme_name, "nord");
        assert!(!from_file.render.autodetect);
        assert_eq!(from_file.logging.level, LevelFilter::INFO);

        let overridden = load(&CliArgs::parse_from([
            "fencemark",
            "--config-file",
            path,
            "--theme",
            "dracula",
        ]))
        .expect("settings");
        assert_eq!(overridden.render.theme_name, "dracula");
    }

    #[test]
    fn default_to_render_command() {
        let args = CliArgs::parse_from(["fencemark", "README.md", "--theme", "nord"]);
        assert!(args.command.is_none());
        assert_eq!(
            args.render.input.as_deref(),
            Some(std::path::Path::new("README.md"))
        );
        assert_eq!(args.render.overrides.theme.as_deref(), Some("nord"));
    }

    #[test]
    fn parse_render_arguments() {
        let args = CliArgs::parse_from([
            "fencemark",
            "render",
            "doc.md",
            "-o",
            "doc.html",
            "--no-embed-css",
            "--no-autodetect",
        ]);

        match args.command.expect("render command") {
            Command::Render(render) => {
                assert_eq!(
                    render.input.as_deref(),
                    Some(std::path::Path::new("doc.md"))
                );
                assert_eq!(
                    render.output.as_deref(),
                    Some(std::path::Path::new("doc.html"))
                );
                assert!(render.overrides.no_embed_css);
                assert!(render.overrides.no_autodetect);
                assert!(render.overrides.theme.is_none());
            }
            _ => panic!("wrong command parsed"),
        }
    }

    #[test]
    fn flags_before_a_subcommand_are_kept() {
        let css = load(&CliArgs::parse_from(["fencemark", "--theme", "nord", "css"]))
            .expect("settings");
        assert_eq!(css.render.theme_name, "nord");

        let render = load(&CliArgs::parse_from([
            "fencemark",
            "--no-embed-css",
            "render",
            "doc.md",
        ]))
        .expect("settings");
        assert!(!render.render.embed_css);
        assert!(render.render.autodetect);
    }

    #[test]
    fn subcommand_flags_override_leading_flags() {
        let settings = load(&CliArgs::parse_from([
            "fencemark",
            "--theme",
            "nord",
            "css",
            "--theme",
            "dracula",
        ]))
        .expect("settings");
        assert_eq!(settings.render.theme_name, "dracula");
    }

    #[test]
    fn parse_css_arguments_with_global_logging() {
        let args = CliArgs::parse_from(["fencemark", "css", "--theme", "nord", "--log-json", "yes"]);

        assert_eq!(args.logging.log_json, Some(true));
        match args.command.expect("css command") {
            Command::Css(css) => assert_eq!(css.theme.as_deref(), Some("nord")),
            _ => panic!("wrong command parsed"),
        }
    }
}
