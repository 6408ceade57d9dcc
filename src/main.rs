//! The `mdview` binary.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::{CommandFactory, Parser};
use mdview::{
    render, route, scratch, scratch_file, Error, OutputCapability, RenderOptions, Style,
    SystemViewer, EXIT_SUCCESS, EXIT_USAGE,
};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MDVIEW_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "mdview",
    about = "Formats markdown and launches it in a browser.",
    override_usage = "mdview [options] <filename>",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
struct Cli {
    /// Markdown file to render
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output filename (default: a fresh file in the temp directory)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Prints mdview version
    #[arg(short = 'v', long)]
    version: bool,

    /// Prints mdview help message
    #[arg(short, long)]
    help: bool,

    /// Bare HTML with no style applied
    #[arg(short, long)]
    bare: bool,

    /// Output filepath instead of HTML on pipe/redirect
    #[arg(short, long)]
    filepath: bool,

    /// Choose XHTML instead of HTML
    #[arg(short, long)]
    xhtml: bool,

    /// Dark mode
    #[arg(short, long)]
    dark: bool,

    /// Path to config file containing command-line arguments, or 'none'
    #[arg(long, value_name = "PATH")]
    config_file: Option<String>,
}

fn main() {
    init_logging();

    let cli = match parse_cli() {
        Ok(cli) => cli,
        Err(err) => fail(&err),
    };

    if cli.version {
        println!("{}", env!("CARGO_PKG_VERSION"));
        process::exit(EXIT_SUCCESS);
    }

    let file = match cli.file {
        Some(ref file) if !cli.help => file.clone(),
        _ => {
            let mut command = Cli::command();
            eprint!("{}", command.render_help());
            process::exit(EXIT_USAGE);
        }
    };

    if let Err(err) = run(&cli, &file) {
        fail(&err);
    }
}

fn run(cli: &Cli, file: &Path) -> Result<(), Error> {
    let input = fs::read(file).map_err(|source| Error::ReadInput {
        path: file.to_path_buf(),
        source,
    })?;
    let markdown = String::from_utf8_lossy(&input);

    let options = RenderOptions {
        style: Style::from_flags(cli.bare, cli.dark),
        xhtml: cli.xhtml,
    };
    let page = render(&markdown, &options)?;

    let destination = match cli.output {
        Some(ref output) => output.clone(),
        None => {
            let scratch = scratch::from_env();
            scratch_file(scratch.as_ref())?
        }
    };

    let capability = OutputCapability::detect(cli.filepath);
    debug!(?capability, destination = %destination.display(), "writing page");

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    route(&page, &destination, capability, &SystemViewer, &mut stdout)?;

    Ok(())
}

fn fail(err: &Error) -> ! {
    eprintln!("mdview: {}", err);
    process::exit(err.exit_code());
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    // Standard output may be carrying the page; logs go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Parses the command line, with the arguments from the config file (if any)
/// inserted before those given on the command line.
fn parse_cli() -> Result<Cli, Error> {
    let cli = Cli::parse();

    let (path, explicit) = match cli.config_file.as_deref() {
        Some("none") => return Ok(cli),
        Some(path) => (PathBuf::from(path), true),
        None => match default_config_path() {
            Some(path) => (path, false),
            None => return Ok(cli),
        },
    };

    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if !explicit && err.kind() == io::ErrorKind::NotFound => return Ok(cli),
        Err(err) => {
            return Err(Error::Config {
                path,
                reason: err.to_string(),
            })
        }
    };

    let config_args = shell_words::split(&contents).map_err(|err| Error::Config {
        path: path.clone(),
        reason: err.to_string(),
    })?;
    debug!(config = %path.display(), args = ?config_args, "loaded config file");

    let mut args: Vec<OsString> = env::args_os().collect();
    let at = args.len().min(1);
    args.splice(at..at, config_args.into_iter().map(OsString::from));

    Cli::try_parse_from(args).map_err(|err| Error::Config {
        path,
        reason: err.to_string(),
    })
}

#[cfg(all(not(windows), not(target_arch = "wasm32")))]
fn default_config_path() -> Option<PathBuf> {
    xdg::BaseDirectories::with_prefix("mdview")
        .ok()?
        .find_config_file("config")
}

#[cfg(any(windows, target_arch = "wasm32"))]
fn default_config_path() -> Option<PathBuf> {
    None
}
