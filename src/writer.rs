//! Trace-file persistence for finished runs.

use std::io;
use std::path::{Path, PathBuf};

use fs_err as fs;

use crate::{Solution, SolverFloat};

/// Writes one plain-text trace file per run into a fixed directory.
///
/// Each trajectory point becomes one line, `(<x1>, <x2>) | <f>`. The file
/// is named after the method and the run label, so distinct starting points
/// never clobber each other's traces. Failures are for the caller to
/// report; a failed write leaves the session running.
pub struct TraceWriter {
    dir: PathBuf,
}

impl TraceWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The path a run with this label is written to.
    pub fn path_for(&self, method: &str, label: &str) -> PathBuf {
        self.dir
            .join(format!("{}{label}.txt", method.replace(' ', "_")))
    }

    pub fn write<F>(&self, method: &str, solution: &Solution<F>) -> io::Result<PathBuf>
    where
        F: SolverFloat + Copy,
    {
        let mut contents = String::new();
        for point in solution.trajectory() {
            contents.push_str(&format!("{point} | {}\n", point.value()));
        }

        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(method, solution.label());
        fs::write(&path, contents)?;
        make_world_writable(&path)?;
        Ok(path)
    }
}

// Trace files are shared scratch output and stay world-writable.
#[cfg(unix)]
fn make_world_writable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, std::fs::Permissions::from_mode(0o777))
}

#[cfg(not(unix))]
fn make_world_writable(_path: &Path) -> io::Result<()> {
    Ok(())
}
