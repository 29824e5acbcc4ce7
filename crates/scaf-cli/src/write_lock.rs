//! Per-project lock serializing generation runs.
//!
//! The lock is a file holding the owner's pid, created with `create_new`.
//! A lock whose pid is no longer running is treated as stale and removed.

use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const LOCK_FILE: &str = "generate.lock";
const LOCK_WAIT_TIMEOUT: Duration = Duration::from_secs(60);
const LOCK_RETRY_DELAY: Duration = Duration::from_millis(250);

pub struct WriteLockGuard {
    path: PathBuf,
}

impl Drop for WriteLockGuard {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

pub fn lock_path(project_root: &Path) -> PathBuf {
    project_root.join(scaf_config::PROJECT_DIR).join(LOCK_FILE)
}

pub fn acquire_for_project(project_root: &Path) -> anyhow::Result<WriteLockGuard> {
    acquire(&lock_path(project_root), LOCK_WAIT_TIMEOUT)
}

fn acquire(lock_path: &Path, timeout: Duration) -> anyhow::Result<WriteLockGuard> {
    let started = Instant::now();

    loop {
        match try_acquire(lock_path) {
            Ok(guard) => {
                tracing::debug!(path = %lock_path.display(), "acquired generate lock");
                return Ok(guard);
            }
            Err(LockState::HeldBy(pid)) => {
                if started.elapsed() >= timeout {
                    anyhow::bail!(
                        "another scaf run is generating in this project (pid {pid}); try again after it finishes"
                    );
                }
                std::thread::sleep(LOCK_RETRY_DELAY);
            }
            Err(LockState::Stale) => {
                tracing::warn!(path = %lock_path.display(), "removing stale generate lock");
                let _ = std::fs::remove_file(lock_path);
            }
            Err(LockState::Unknown) => {
                if started.elapsed() >= timeout {
                    anyhow::bail!(
                        "could not acquire lock at {}; remove it if no scaf process is running",
                        lock_path.display()
                    );
                }
                std::thread::sleep(LOCK_RETRY_DELAY);
            }
        }
    }
}

#[derive(Debug)]
enum LockState {
    HeldBy(i32),
    Stale,
    Unknown,
}

fn try_acquire(lock_path: &Path) -> Result<WriteLockGuard, LockState> {
    if let Some(parent) = lock_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    match OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(lock_path)
    {
        Ok(mut file) => {
            let _ = writeln!(file, "{}", std::process::id());
            Ok(WriteLockGuard {
                path: lock_path.to_path_buf(),
            })
        }
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
            let mut pid_buf = String::new();
            if OpenOptions::new()
                .read(true)
                .open(lock_path)
                .and_then(|mut file| file.read_to_string(&mut pid_buf))
                .is_err()
            {
                return Err(LockState::Unknown);
            }

            match pid_buf.trim().parse::<i32>().ok() {
                Some(pid) if is_process_running(pid) => Err(LockState::HeldBy(pid)),
                Some(_) => Err(LockState::Stale),
                None => Err(LockState::Unknown),
            }
        }
        Err(_) => Err(LockState::Unknown),
    }
}

fn is_process_running(pid: i32) -> bool {
    std::process::Command::new("kill")
        .arg("-0")
        .arg(pid.to_string())
        .status()
        .is_ok_and(|status| status.success())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{acquire, lock_path, try_acquire};

    #[test]
    fn acquires_and_releases_lock_file() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = lock_path(temp.path());

        let guard = try_acquire(&path).expect("lock should acquire");
        assert!(path.is_file());
        drop(guard);
        assert!(!path.exists());
    }

    #[test]
    fn held_lock_times_out() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = lock_path(temp.path());

        let _guard = try_acquire(&path).expect("first lock should acquire");
        let second = acquire(&path, Duration::ZERO);
        assert!(second.is_err());
    }

    #[test]
    fn garbage_lock_contents_time_out() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = lock_path(temp.path());
        std::fs::create_dir_all(path.parent().expect("lock has parent")).expect("dir");
        std::fs::write(&path, "not-a-pid").expect("write lock");

        assert!(acquire(&path, Duration::ZERO).is_err());
        assert!(path.exists());
    }
}
