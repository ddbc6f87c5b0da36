//! zighl - print Zig source with syntax highlighting
//!
//! Drives the highlighting hooks the way a host editor would: one frame
//! pre-draw for the visible window, then a line pre-draw per line.

use std::env;
use std::io;
use std::ops::Range;
use std::path::PathBuf;
use std::process;

use crossterm::tty::IsTty;
use tracing_subscriber::EnvFilter;

use zig_syntax::buffer::Buffer;
use zig_syntax::config::Config;
use zig_syntax::host::{BufferId, FrameDrawEvent, HighlightHooks, LineDrawEvent, LineSource};
use zig_syntax::render::Renderer;
use zig_syntax::syntax::SyntaxManager;
use zig_syntax::{HighlightError, Result};

/// Parsed command line
#[derive(Debug, PartialEq)]
struct Options {
    config: Option<PathBuf>,
    /// 0-based half-open line window
    lines: Option<Range<usize>>,
    columns: Range<usize>,
    color: Option<bool>,
    file: PathBuf,
}

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("ZIGHL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args)? {
        Some(options) => options,
        None => return Ok(()),
    };

    let config = match &options.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let mut manager = SyntaxManager::with_config(&config);
    let mut buffer = Buffer::from_file(&options.file)?;
    let filetype = buffer
        .filename()
        .and_then(|path| manager.detect_language(path))
        .map(|s| s.to_string());
    if filetype.is_none() {
        tracing::info!(buffer = buffer.name(), "no language for file, printing plain");
    }
    buffer.set_filetype(filetype);

    let id = BufferId(0);
    let line_count = buffer.line_count();
    let lines = match &options.lines {
        Some(range) => range.start.min(line_count)..range.end.min(line_count),
        None => 0..line_count,
    };

    manager.on_frame_pre_draw(&FrameDrawEvent {
        buffer_id: id,
        buffer: Some(&buffer),
        lines: lines.clone(),
        columns: options.columns.clone(),
    });

    let stdout = io::stdout();
    let color = options.color.unwrap_or_else(|| stdout.is_tty());
    let mut renderer = Renderer::new(stdout.lock(), config.tab_width);
    if !color {
        renderer = renderer.without_color();
    }

    for line in lines {
        let spans = manager.on_line_pre_draw(&LineDrawEvent {
            buffer_id: id,
            buffer: Some(&buffer),
            line,
            columns: options.columns.clone(),
        });
        let text = buffer.line_text(line).unwrap_or("");
        renderer.render_line(text, &spans, options.columns.clone())?;
    }
    renderer.flush()?;
    manager.remove_cache(id);

    Ok(())
}

/// Parse arguments; `None` means help or version was printed
fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut config = None;
    let mut lines = None;
    let mut columns = 0..usize::MAX;
    let mut color = None;
    let mut file = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                println!("zighl {}", env!("CARGO_PKG_VERSION"));
                return Ok(None);
            }
            "--config" | "-c" => {
                config = Some(PathBuf::from(value_of(arg, iter.next())?));
            }
            "--lines" | "-l" => {
                let value = value_of(arg, iter.next())?;
                let (start, end) = parse_range(value)
                    .filter(|&(start, end)| start >= 1 && start <= end)
                    .ok_or_else(|| bad_arg(arg, value))?;
                lines = Some(start - 1..end);
            }
            "--cols" => {
                let value = value_of(arg, iter.next())?;
                let (start, end) = parse_range(value)
                    .filter(|&(start, end)| start < end)
                    .ok_or_else(|| bad_arg(arg, value))?;
                columns = start..end;
            }
            "--color" => color = Some(true),
            "--no-color" => color = Some(false),
            other if other.starts_with('-') => {
                return Err(HighlightError::Message(format!("unknown option `{}`", other)));
            }
            other => {
                if file.is_some() {
                    return Err(HighlightError::Message("only one FILE may be given".to_string()));
                }
                file = Some(PathBuf::from(other));
            }
        }
    }

    let file = file.ok_or_else(|| HighlightError::Message("missing FILE (see --help)".to_string()))?;
    Ok(Some(Options {
        config,
        lines,
        columns,
        color,
        file,
    }))
}

fn value_of<'a>(option: &str, value: Option<&'a String>) -> Result<&'a str> {
    value
        .map(|s| s.as_str())
        .ok_or_else(|| HighlightError::Message(format!("`{}` needs a value", option)))
}

fn bad_arg(option: &str, value: &str) -> HighlightError {
    HighlightError::Message(format!("invalid value `{}` for `{}`", value, option))
}

/// Parse "START:END"
fn parse_range(s: &str) -> Option<(usize, usize)> {
    let (start, end) = s.split_once(':')?;
    Some((start.trim().parse().ok()?, end.trim().parse().ok()?))
}

fn print_usage() {
    println!("zighl {} - Zig syntax highlighter", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: zighl [OPTIONS] FILE");
    println!();
    println!("Options:");
    println!("  -c, --config PATH    Read settings from PATH instead of ~/.zighl.toml");
    println!("  -l, --lines S:E      Print lines S through E (1-based, inclusive)");
    println!("      --cols S:E       Print display columns S up to E (0-based)");
    println!("      --color          Always emit colors");
    println!("      --no-color       Never emit colors");
    println!("  -h, --help           Show this help message");
    println!("  -V, --version        Show version information");
    println!();
    println!("Set ZIGHL_LOG (e.g. ZIGHL_LOG=debug) to see diagnostics on stderr.");
}
