//! Where pages go when no output path was given.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::Error;

/// Set when running as a confined snap; the system temp directory is then
/// not visible to the browser.
pub const SANDBOX_MARKER: &str = "SNAP_USER_COMMON";

/// Name of the scratch directory created under `$HOME` in a sandbox.
pub const SANDBOX_DIR_NAME: &str = "mdview-temp";

/// Resolves the directory scratch pages are written to.
pub trait ScratchDir {
    /// The directory, created if needed.
    fn resolve(&self) -> Result<PathBuf, Error>;
}

/// The operating system's temp directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTempDir;

impl ScratchDir for SystemTempDir {
    fn resolve(&self) -> Result<PathBuf, Error> {
        Ok(env::temp_dir())
    }
}

/// A private directory under the user's home, for sandboxed installs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxHomeDir {
    home: PathBuf,
}

impl SandboxHomeDir {
    /// Scratch space under `home`.
    pub fn new(home: impl Into<PathBuf>) -> SandboxHomeDir {
        SandboxHomeDir { home: home.into() }
    }

    /// The scratch directory this resolves to.
    pub fn path(&self) -> PathBuf {
        self.home.join(SANDBOX_DIR_NAME)
    }
}

impl ScratchDir for SandboxHomeDir {
    fn resolve(&self) -> Result<PathBuf, Error> {
        let dir = self.path();
        if !dir.is_dir() {
            create_private_dir(&dir).map_err(|source| Error::ScratchDir {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(dir)
    }
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new().mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir(dir)
}

/// The resolver for this process's environment.
pub fn from_env() -> Box<dyn ScratchDir> {
    select(env::var_os(SANDBOX_MARKER), env::var_os("HOME"))
}

/// Chooses a resolver given the values of the sandbox marker and `HOME`.
pub fn select(marker: Option<OsString>, home: Option<OsString>) -> Box<dyn ScratchDir> {
    let sandboxed = marker.is_some_and(|m| !m.is_empty());
    if !sandboxed {
        return Box::new(SystemTempDir);
    }

    match home {
        Some(home) if !home.is_empty() => {
            debug!(home = ?home, "sandboxed, using home scratch directory");
            Box::new(SandboxHomeDir::new(home))
        }
        _ => {
            warn!("{} is set but HOME is not, using the system temp directory", SANDBOX_MARKER);
            Box::new(SystemTempDir)
        }
    }
}

/// A fresh, randomly named `.html` path inside the directory `dir` resolves to.
pub fn scratch_file(dir: &dyn ScratchDir) -> Result<PathBuf, Error> {
    let base = dir.resolve()?;

    let name = format!("mdview{}.html", Uuid::new_v4().simple());
    let path = base.join(name);
    debug!(path = %path.display(), "allocated scratch file");
    Ok(path)
}
