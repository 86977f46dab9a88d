//! Command Line
//!
//! Flags for `botmatata-hero` and the headless `--timeline` output.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use botmatata_core::{ConfigOverrides, Timeline};

/// BotMatata hero section in the terminal
#[derive(Debug, Parser)]
#[command(name = "botmatata-hero", version, about)]
pub struct Args {
    /// Config file (default: $XDG_CONFIG_HOME/botmatata/hero.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Playback speed factor; 2.0 plays twice as fast
    #[arg(long, value_name = "FACTOR")]
    pub speed: Option<f64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Print the virtual timeline for CYCLES cycles and exit
    #[arg(long, value_name = "CYCLES", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeline: Option<u64>,

    /// Emit the timeline as JSON lines
    #[arg(long, requires = "timeline")]
    pub json: bool,
}

impl Args {
    /// Command-line values for the config loader
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides::new();
        if let Some(path) = &self.config {
            overrides = overrides.with_config_path(path.clone());
        }
        if let Some(speed) = self.speed {
            overrides = overrides.with_speed(speed);
        }
        overrides
    }
}

/// Write `timeline` as text, or as one JSON object per line
pub fn write_timeline<W: Write>(out: &mut W, timeline: &Timeline, json: bool) -> anyhow::Result<()> {
    for entry in timeline.entries() {
        if json {
            let line = serde_json::to_string(entry).context("serializing timeline entry")?;
            writeln!(out, "{line}")?;
        } else {
            writeln!(out, "{entry}")?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use botmatata_core::{Script, TimingConfig};

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["botmatata-hero"]).unwrap();
        assert_eq!(args.log_level, "info");
        assert!(args.timeline.is_none());
        assert!(!args.json);
        assert!(args.overrides().speed.is_none());
    }

    #[test]
    fn test_overrides_from_flags() {
        let args = Args::try_parse_from([
            "botmatata-hero",
            "--config",
            "/tmp/hero.toml",
            "--speed",
            "4",
        ])
        .unwrap();
        let overrides = args.overrides();
        assert_eq!(overrides.config_path, Some(PathBuf::from("/tmp/hero.toml")));
        assert_eq!(overrides.speed, Some(4.0));
    }

    #[test]
    fn test_json_requires_timeline() {
        assert!(Args::try_parse_from(["botmatata-hero", "--json"]).is_err());
        assert!(Args::try_parse_from(["botmatata-hero", "--timeline", "2", "--json"]).is_ok());
    }

    #[test]
    fn test_zero_cycles_rejected() {
        assert!(Args::try_parse_from(["botmatata-hero", "--timeline", "0"]).is_err());
    }

    #[test]
    fn test_write_text_timeline() {
        let timeline = Timeline::record(Script::botmatata(), TimingConfig::default(), 1);
        let mut out = Vec::new();
        write_timeline(&mut out, &timeline, false).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), timeline.entries().len());
        assert!(text.lines().next().unwrap().starts_with("   0.000s"));
    }

    #[test]
    fn test_write_json_timeline() {
        let timeline = Timeline::record(Script::botmatata(), TimingConfig::default(), 1);
        let mut out = Vec::new();
        write_timeline(&mut out, &timeline, true).unwrap();

        let text = String::from_utf8(out).unwrap();
        let second: serde_json::Value = serde_json::from_str(text.lines().nth(1).unwrap()).unwrap();
        assert_eq!(second["at_ms"], 1000);
        assert_eq!(second["snapshot"]["typing_speaker"], "bot");
    }
}
