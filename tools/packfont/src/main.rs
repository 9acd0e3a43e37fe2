// RustPixel
// copyright zipxing@hotmail.com 2022～2025

/// packfont bakes a font into a texture atlas plus metrics table
///
/// Usage:
/// packfont arial 16 out/arial16
/// packfont arial 16 out/arial16 2 0 2
/// packfont --config atlas.toml
/// packfont --font-dir ./fonts --start-char 48 --end-char 58 mono 32 digits
///
/// Writes <output>.png and <output>.spritefont.
///
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{error, info, LevelFilter};
use packfont::{pipeline, PackConfig};
use std::process;

fn make_parser() -> Command {
    Command::new("packfont")
        .about("Pack a font into a bitmap atlas and .spritefont metrics")
        .arg(
            Arg::new("fname")
                .help("Font name looked up in the font dirs, or a path")
                .index(1),
        )
        .arg(
            Arg::new("size")
                .help("Font size in pixels")
                .value_parser(value_parser!(f32))
                .index(2),
        )
        .arg(
            Arg::new("output")
                .help("Output stem, .png and .spritefont are appended")
                .index(3),
        )
        .arg(
            Arg::new("padding")
                .help("Empty pixels around every glyph (default 1)")
                .value_parser(value_parser!(u32))
                .index(4),
        )
        .arg(
            Arg::new("font_index")
                .help("Face index inside a .ttc collection (default 0)")
                .value_parser(value_parser!(u32))
                .index(5),
        )
        .arg(
            Arg::new("oversampling")
                .help("Oversampling factor on both axes (default 1)")
                .value_parser(value_parser!(u32))
                .index(6),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("TOML settings file, command line values win"),
        )
        .arg(
            Arg::new("font_dir")
                .long("font-dir")
                .help("Search this directory for fonts, may repeat")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("start_char")
                .long("start-char")
                .value_parser(value_parser!(u32))
                .help("First codepoint (default 32)"),
        )
        .arg(
            Arg::new("end_char")
                .long("end-char")
                .value_parser(value_parser!(u32))
                .help("Codepoint after the last one (default 128)"),
        )
        .arg(
            Arg::new("max_dim")
                .long("max-dim")
                .value_parser(value_parser!(u32))
                .help("Largest texture side to try (default 2048)"),
        )
        .arg(
            Arg::new("log_level")
                .long("log-level")
                .value_parser(["error", "warn", "info", "debug", "trace"])
                .default_value("info"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only log errors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log_file")
                .long("log-file")
                .help("Also append the log to this file"),
        )
}

fn build_config(args: &ArgMatches) -> packfont::Result<PackConfig> {
    let mut config = match args.get_one::<String>("config") {
        Some(path) => PackConfig::load(path)?,
        None => PackConfig::default(),
    };

    if let Some(v) = args.get_one::<String>("fname") {
        config.font = v.clone();
    }
    if let Some(v) = args.get_one::<f32>("size") {
        config.size = *v;
    }
    if let Some(v) = args.get_one::<String>("output") {
        config.output = v.clone();
    }
    if let Some(v) = args.get_one::<u32>("padding") {
        config.padding = *v;
    }
    if let Some(v) = args.get_one::<u32>("font_index") {
        config.font_index = *v;
    }
    if let Some(v) = args.get_one::<u32>("oversampling") {
        config.oversampling = *v;
    }
    if let Some(dirs) = args.get_many::<String>("font_dir") {
        config.font_dirs = dirs.cloned().collect();
    }
    if let Some(v) = args.get_one::<u32>("start_char") {
        config.range.start = *v;
    }
    if let Some(v) = args.get_one::<u32>("end_char") {
        config.range.end = *v;
    }
    if let Some(v) = args.get_one::<u32>("max_dim") {
        config.max_dim = *v;
    }
    Ok(config)
}

fn log_level(args: &ArgMatches) -> LevelFilter {
    if args.get_flag("quiet") {
        return LevelFilter::Error;
    }
    match args.get_one::<String>("log_level").map(String::as_str) {
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

fn main() {
    let args = make_parser().get_matches();

    let log_file = args.get_one::<String>("log_file").map(String::as_str);
    if let Err(e) = packfont::log::init_log(log_level(&args), log_file) {
        eprintln!("packfont: cannot set up logging: {}", e);
        process::exit(1);
    }

    let result = build_config(&args).and_then(|config| pipeline::run(&config));
    match result {
        Ok(summary) => info!("{}", summary),
        Err(e) => {
            error!("packfont failed: {}", e);
            process::exit(1);
        }
    }
}
