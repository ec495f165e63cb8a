// File: args.rs
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::level_filters::LevelFilter;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, ValueEnum)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = "Prints the stream description of a DASH manifest as JSON.")]
pub struct Args {
    /// Manifest to inspect: an .mpd document or the JSON tree of one.
    pub manifest: PathBuf,
    /// URL the manifest was served from, used to derive the stream base URL.
    #[arg(short, long)]
    pub manifest_url: Option<String>,
    /// JSON file with parser settings.
    #[arg(short, long)]
    pub settings: Option<PathBuf>,
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,
}

pub fn parse_args() -> Args {
    Args::parse()
}

pub fn get_log_level_filter(args: &Args) -> LevelFilter {
    match args.log_level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_flags() {
        let args = Args::try_parse_from(["dash-manifest", "stream.mpd"]).unwrap();
        assert_eq!(args.manifest, PathBuf::from("stream.mpd"));
        assert_eq!(args.log_level, LogLevel::Info);
        assert_eq!(get_log_level_filter(&args), LevelFilter::INFO);

        let args = Args::try_parse_from([
            "dash-manifest",
            "tree.json",
            "--manifest-url",
            "https://cdn.example/a/manifest.mpd",
            "-l",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.manifest_url.as_deref(), Some("https://cdn.example/a/manifest.mpd"));
        assert_eq!(get_log_level_filter(&args), LevelFilter::DEBUG);
    }
}
