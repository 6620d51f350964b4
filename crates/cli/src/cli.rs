//! CLI definitions and command dispatch.

use std::{
    fs::read,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use axisdeck_core::{
    ArrowKey, AxisTag, Event, FeatureTag, FontConfig, FontFormat, Outcome, Param, Theme,
};
use axisdeck_download::{ButtonState, DirectoryTarget, DownloadOutcome, Downloader, Notifier};
use clap::{Parser, Subcommand, ValueEnum};

use crate::{
    report,
    session::{CliPanel, SessionArgs},
};

#[derive(Parser)]
#[command(name = "axisdeck", version)]
#[command(about = "Adjust variable font axes, preview them and download static instances")]
pub struct Cli {
    #[command(flatten)]
    pub session: SessionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl From<Toggle> for bool {
    fn from(toggle: Toggle) -> Self {
        toggle == Toggle::On
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available fonts
    Fonts,
    /// Print the current settings, preview style and download name
    Show,
    /// Set an axis (e.g. wght) or CSS parameter (size, letter-spacing, line-height)
    Set {
        param: Param,
        #[arg(allow_hyphen_values = true)]
        value: f64,
        /// Move the slider instead of typing into the number input
        #[arg(long)]
        slider: bool,
    },
    /// Step a parameter as the arrow keys do on its number input
    Nudge {
        param: Param,
        /// up or down
        direction: ArrowKey,
        /// Step ten times further, as with the modifier key held
        #[arg(long)]
        shift: bool,
    },
    /// Restore one parameter to its default
    Reset { param: Param },
    /// Restore every axis and CSS parameter, and turn off auto optical size
    ResetAll,
    /// Switch the active font
    Font { id: String },
    /// Switch the color theme (dark or light)
    Theme { theme: Theme },
    /// Couple optical size to the font size
    OpszAuto { state: Toggle },
    /// Enable or disable an OpenType feature in the preview and download
    Feature { tag: FeatureTag, state: Toggle },
    /// Set the preview text
    Text { text: String },
    /// Generate a static instance on the server and save it
    Download {
        /// Request WOFF2 instead of TTF
        #[arg(long)]
        woff2: bool,
        /// Directory to save into
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    /// Check that the font-generation server is up
    Status,
    /// Show the axes of a variable font and print a catalog entry for it
    Inspect {
        font: PathBuf,
        /// Catalog id (default: file stem)
        #[arg(long)]
        id: Option<String>,
    },
    /// Remove all persisted settings
    Clear,
}

/// Prints alerts on stderr.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let session = self.session;
        match self.command {
            Commands::Fonts => {
                let panel = session.open_panel()?;
                println!("{}", report::list_fonts(panel.catalog(), &panel.font().id));
            }
            Commands::Show => {
                let panel = session.open_panel()?;
                print!("{}", report::describe(&panel));
            }
            Commands::Set { param, value, slider } => {
                let event = if slider {
                    Event::Slider { param, value }
                } else {
                    Event::Input { param, value }
                };
                apply_param(&session, param, event)?;
            }
            Commands::Nudge { param, direction, shift } => {
                apply_param(&session, param, Event::Key { param, key: direction, modifier: shift })?;
            }
            Commands::Reset { param } => {
                apply_param(&session, param, Event::Reset(param))?;
            }
            Commands::ResetAll => {
                let mut panel = session.open_panel()?;
                panel.dispatch(Event::ResetAll)?;
                println!("Reset all parameters for {}", panel.font().name);
            }
            Commands::Font { id } => {
                let mut panel = session.open_panel()?;
                panel.dispatch(Event::SelectFont(id))?;
                println!("Active font: {}", panel.font().name);
            }
            Commands::Theme { theme } => {
                let mut panel = session.open_panel()?;
                panel.dispatch(Event::Theme(theme))?;
                println!("Theme: {theme}");
            }
            Commands::OpszAuto { state } => {
                let mut panel = session.open_panel()?;
                panel.dispatch(Event::OpszAuto(state.into()))?;
                if !panel.font().has_axis(AxisTag::OPSZ) {
                    println!("{} has no optical size axis", panel.font().name);
                }
                println!("{}", report::value_line(&panel, Param::Axis(AxisTag::OPSZ)));
            }
            Commands::Feature { tag, state } => {
                let mut panel = session.open_panel()?;
                panel
                    .dispatch(Event::Feature { tag, enabled: state.into() })
                    .with_context(|| format!("{} has no {tag} feature", panel.font().name))?;
                println!("font-feature-settings: {}", panel.preview().feature_settings);
            }
            Commands::Text { text } => {
                let mut panel = session.open_panel()?;
                panel.dispatch(Event::PreviewText(text))?;
                println!("Preview text: {}", panel.state().prefs.preview_text);
            }
            Commands::Download { woff2, out } => {
                let panel = session.open_panel()?;
                download(&session, &panel, woff2, out)?;
            }
            Commands::Status => {
                let transport = session.transport()?;
                transport
                    .health()
                    .with_context(|| format!("Server at {} is not healthy", transport.base_url()))?;
                println!("Server at {} is healthy", transport.base_url());
            }
            Commands::Inspect { font, id } => inspect(&font, id)?,
            Commands::Clear => {
                let mut store = session.open_store()?;
                axisdeck_store::clear(&mut store)?;
                println!("Cleared settings");
            }
        }
        Ok(())
    }
}

fn apply_param(session: &SessionArgs, param: Param, event: Event) -> Result<()> {
    let mut panel = session.open_panel()?;
    match panel.dispatch(event)? {
        Outcome::Applied => println!("{}", report::value_line(&panel, param)),
        Outcome::Ignored => {
            if let Param::Axis(tag) = param
                && report::opsz_locked(&panel, tag)
            {
                bail!("{param} follows the font size while auto optical size is on");
            }
            bail!("{param} was not changed");
        }
    }
    Ok(())
}

fn download(session: &SessionArgs, panel: &CliPanel, woff2: bool, out: PathBuf) -> Result<()> {
    let format = if woff2 { FontFormat::Woff2 } else { FontFormat::Ttf };
    let downloader = Downloader::new(session.transport()?);
    let mut button = ButtonState::default();
    let mut target = DirectoryTarget::new(out);

    println!("Generating {format} instance of {}", panel.font().name);
    match downloader.click_for(panel, format, &mut button, &mut target, &mut StderrNotifier) {
        DownloadOutcome::Saved(path) => println!("Wrote {}", path.display()),
        DownloadOutcome::Failed => bail!("{format} download failed"),
        DownloadOutcome::Skipped => bail!("Download already in progress"),
    }
    Ok(())
}

fn inspect(path: &Path, id: Option<String>) -> Result<()> {
    let data = read(path).with_context(|| format!("Failed to read font: {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .context("Font path has no file name")?;
    let id = id.unwrap_or_else(|| {
        path.file_stem().map(|s| s.to_string_lossy().to_lowercase()).unwrap_or_default()
    });

    let config = FontConfig::from_font_data(&id, &filename, &data)
        .with_context(|| format!("Failed to inspect {}", path.display()))?;
    print!("{}", report::axis_table(&config));
    println!("\nCatalog entry:");
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_negative_values() {
        let cli = Cli::try_parse_from(["axisdeck", "set", "YTDE", "-250"]).unwrap();
        match cli.command {
            Commands::Set { param, value, slider } => {
                assert_eq!(param.to_string(), "YTDE");
                assert_eq!(value, -250.0);
                assert!(!slider);
            }
            _ => panic!("expected set"),
        }
    }

    #[test]
    fn parses_nudge() {
        let cli = Cli::try_parse_from(["axisdeck", "nudge", "size", "up", "--shift"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Nudge { direction: ArrowKey::Up, shift: true, .. }
        ));
    }

    #[test]
    fn rejects_bad_theme_and_tag() {
        assert!(Cli::try_parse_from(["axisdeck", "theme", "neon"]).is_err());
        assert!(Cli::try_parse_from(["axisdeck", "feature", "toolong", "on"]).is_err());
    }

    #[test]
    fn global_session_flags() {
        let cli = Cli::try_parse_from([
            "axisdeck",
            "show",
            "--ephemeral",
            "--server",
            "http://fonts.local:9000",
        ])
        .unwrap();
        assert!(cli.session.ephemeral);
        assert_eq!(cli.session.server, "http://fonts.local:9000");
    }
}
