// SPDX-License-Identifier: MPL-2.0
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;
use yearbook_gallery::app::{self, paths, Flags};
use yearbook_gallery::config;

const HELP: &str = "\
Yearbook Gallery

USAGE:
  yearbook_gallery [OPTIONS] [ARCHIVE]

OPTIONS:
  --lang <LOCALE>       Interface language (e.g. en-US, fr)
  --endpoint <URL>      Upload endpoint for this session
  --config-dir <DIR>    Directory holding settings.toml
  --archive <PATH>      Open a processed archive directly in the gallery
  --route <ROUTE>       Start screen: / or /gallery
  --remember            Store --lang and --endpoint in settings.toml
  -v, --verbose         More log output (repeatable)
  -h, --help            Print this help
";

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let mut verbose = 0u8;
    while args.contains(["-v", "--verbose"]) {
        verbose = verbose.saturating_add(1);
    }
    tracing_init(verbose);

    let remember = args.contains("--remember");
    let flags = parse_flags(args);
    paths::init_cli_overrides(flags.config_dir.clone());
    if remember {
        remember_overrides(&flags);
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");

    app::run(flags)
}

/// Reads the remaining options. Malformed values are logged and ignored.
fn parse_flags(mut args: pico_args::Arguments) -> Flags {
    let mut option = |name: &'static str| match args.opt_value_from_str::<_, String>(name) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(flag = name, %err, "ignoring invalid option");
            None
        }
    };

    let lang = option("--lang");
    let endpoint = option("--endpoint");
    let config_dir = option("--config-dir");
    let archive = option("--archive");
    let route = option("--route");

    let positional: Vec<OsString> = args.finish();
    let archive_path = archive
        .map(PathBuf::from)
        .or_else(|| positional.into_iter().next().map(PathBuf::from));

    Flags {
        lang,
        endpoint,
        config_dir,
        archive_path,
        route,
    }
}

/// Writes the language and endpoint given on the command line to the settings file.
fn remember_overrides(flags: &Flags) {
    let (mut settings, warning) = config::load();
    if warning.is_some() {
        tracing::warn!("settings file unreadable, not overwriting it");
        return;
    }
    settings.apply_overrides(flags.lang.as_deref(), flags.endpoint.as_deref());
    match config::save(&settings) {
        Ok(()) => tracing::info!("command-line overrides saved to settings"),
        Err(err) => tracing::warn!(%err, "could not save settings"),
    }
}

fn tracing_init(verbose: u8) {
    let default_directive: Directive = match verbose {
        0 => "yearbook_gallery=info",
        1 => "yearbook_gallery=debug",
        _ => "yearbook_gallery=trace",
    }
    .parse()
    .unwrap_or_else(|_| LevelFilter::INFO.into());

    let filter = EnvFilter::builder()
        .with_default_directive(default_directive)
        .from_env_lossy();

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
