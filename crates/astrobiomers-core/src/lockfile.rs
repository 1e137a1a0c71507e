//! `pipeline.lock` — guards against overlapping runs against the same
//! working directory / graph database (spec §5, "Shared resources").

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum LockfileError {
    #[error("another run holds the lock (pid {held_by}); refusing to start")]
    Held { held_by: u32 },
    #[error("failed to access lockfile {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// RAII guard for `{working_dir}/pipeline.lock`. Removed on drop.
pub struct Lockfile {
    path: PathBuf,
}

impl Lockfile {
    /// Acquire the lock, reclaiming it if the owning PID is no longer alive.
    pub fn acquire(working_dir: &Path) -> Result<Self, LockfileError> {
        let path = working_dir.join("pipeline.lock");

        if let Ok(contents) = fs::read_to_string(&path) {
            if let Ok(pid) = contents.trim().parse::<u32>() {
                if pid_is_alive(pid) {
                    return Err(LockfileError::Held { held_by: pid });
                }
                log::warn!("reclaiming stale lockfile from dead pid {pid}");
            }
        }

        fs::write(&path, std::process::id().to_string()).map_err(|source| LockfileError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Ok(Self { path })
    }
}

impl Drop for Lockfile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[cfg(target_os = "linux")]
fn pid_is_alive(pid: u32) -> bool {
    Path::new("/proc").join(pid.to_string()).exists()
}

#[cfg(not(target_os = "linux"))]
fn pid_is_alive(_pid: u32) -> bool {
    // Conservative default off Linux: assume alive so we never silently
    // steal an active lock.
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_creates_lockfile() {
        let dir = tempfile::tempdir().unwrap();
        let lock = Lockfile::acquire(dir.path()).unwrap();
        assert!(dir.path().join("pipeline.lock").exists());
        drop(lock);
        assert!(!dir.path().join("pipeline.lock").exists());
    }

    #[test]
    fn second_acquire_fails_while_held() {
        let dir = tempfile::tempdir().unwrap();
        let _lock = Lockfile::acquire(dir.path()).unwrap();
        let second = Lockfile::acquire(dir.path());
        assert!(second.is_err());
    }

    #[test]
    fn reclaims_lock_from_dead_pid() {
        let dir = tempfile::tempdir().unwrap();
        // PID 1 is init and always alive on a real system but a very high,
        // almost-certainly-unassigned PID simulates a dead process.
        fs::write(dir.path().join("pipeline.lock"), "4000000000").unwrap();
        let lock = Lockfile::acquire(dir.path());
        assert!(lock.is_ok());
    }
}
