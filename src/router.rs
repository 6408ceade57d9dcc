//! Where a rendered page ends up.
//!
//! The page is always written to its destination file first. What happens
//! next depends on how the process was started: attached to a terminal, the
//! file is opened in the platform's default viewer; with standard output
//! redirected, either the page itself or the path of the file is written
//! there, so `mdview` can feed another program.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::Error;
use crate::page::RenderedPage;

/// What the environment asks of the router. Decided once, at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputCapability {
    /// Standard output is an interactive terminal.
    pub interactive: bool,

    /// When not interactive, print the destination path instead of the page.
    pub path_only: bool,
}

impl OutputCapability {
    /// Inspects the process's standard output.
    pub fn detect(path_only: bool) -> OutputCapability {
        OutputCapability {
            interactive: io::stdout().is_terminal(),
            path_only,
        }
    }
}

/// The one place a page is surfaced, beyond its destination file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Open the file in the default viewer.
    ViewerFile(PathBuf),
    /// Write the page to standard output.
    StandardOutputContent,
    /// Write the file's path to standard output.
    StandardOutputPath(PathBuf),
}

impl OutputTarget {
    /// Picks the target for a page written to `destination`.
    pub fn choose(capability: OutputCapability, destination: &Path) -> OutputTarget {
        if capability.interactive {
            OutputTarget::ViewerFile(destination.to_path_buf())
        } else if capability.path_only {
            OutputTarget::StandardOutputPath(destination.to_path_buf())
        } else {
            OutputTarget::StandardOutputContent
        }
    }
}

/// Something that can show a file to the user.
pub trait Viewer {
    /// Opens `path`. Returns once the viewer has been started; does not wait
    /// for it to exit.
    fn open(&self, path: &Path) -> io::Result<()>;
}

/// Opens files with the platform's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemViewer;

impl Viewer for SystemViewer {
    fn open(&self, path: &Path) -> io::Result<()> {
        opener(path).spawn().map(|_child| ())
    }
}

// Hands the path to the shell's file protocol handler directly; going through
// `cmd /C start` would let cmd.exe expand `%`, `&` and `^` in it.
#[cfg(target_os = "windows")]
pub(crate) fn opener(path: &Path) -> Command {
    let mut command = Command::new("rundll32");
    command.arg("url.dll,FileProtocolHandler").arg(path);
    command
}

#[cfg(target_os = "macos")]
pub(crate) fn opener(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(all(not(target_os = "windows"), not(target_os = "macos")))]
pub(crate) fn opener(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}

/// Writes `page` to `destination`, then surfaces it as `capability` asks:
/// through `viewer` when interactive, otherwise on `stdout`.
///
/// Returns the target that was used.
pub fn route<W: Write>(
    page: &RenderedPage,
    destination: &Path,
    capability: OutputCapability,
    viewer: &dyn Viewer,
    stdout: &mut W,
) -> Result<OutputTarget, Error> {
    let html = page.materialize();
    persist(destination, html.as_bytes())?;

    let target = OutputTarget::choose(capability, destination);
    debug!(?target, "routing page");

    match target {
        OutputTarget::ViewerFile(ref path) => {
            viewer.open(path).map_err(|source| Error::LaunchViewer {
                path: path.clone(),
                source,
            })?;
        }
        OutputTarget::StandardOutputPath(ref path) => {
            write_stdout(stdout, &path_bytes(path))?;
        }
        OutputTarget::StandardOutputContent => {
            write_stdout(stdout, html.as_bytes())?;
        }
    }

    Ok(target)
}

/// The bytes of `path` as the platform spells them.
#[cfg(unix)]
fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    match path.to_string_lossy() {
        Cow::Borrowed(text) => Cow::Borrowed(text.as_bytes()),
        Cow::Owned(text) => Cow::Owned(text.into_bytes()),
    }
}

fn persist(destination: &Path, html: &[u8]) -> Result<(), Error> {
    let write = || -> io::Result<()> {
        let mut file = File::create(destination)?;
        file.write_all(html)?;
        file.sync_all()
    };

    write().map_err(|source| Error::WriteOutput {
        path: destination.to_path_buf(),
        source,
    })
}

fn write_stdout<W: Write>(stdout: &mut W, bytes: &[u8]) -> Result<(), Error> {
    stdout
        .write_all(bytes)
        .and_then(|()| stdout.flush())
        .map_err(Error::Stdout)
}
