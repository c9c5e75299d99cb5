//! Silence a noisy sampler for the duration of a scope. Output written
//! directly to the file descriptors, e.g., by foreign code, is dropped
//! too. Errors from the sampler are still returned as values.

use log::warn;
use nix::fcntl::{open, OFlag};
use nix::sys::stat::Mode;
use nix::unistd::{close, dup, dup2};
use std::io::Write;
use std::os::unix::io::RawFd;

pub const STDOUT: RawFd = 1;
pub const STDERR: RawFd = 2;

/// Redirects stdout and stderr to the null device until dropped.
///
/// The descriptors are process-wide; do not hold two guards at once or
/// share one across threads that expect to print.
pub struct SuppressOutput {
    saved: [RawFd; 2],
}

impl SuppressOutput {
    pub fn new() -> anyhow::Result<Self> {
        flush_std();

        let null = open("/dev/null", OFlag::O_RDWR, Mode::empty())?;
        let saved_out = dup(STDOUT)?;
        let saved_err = match dup(STDERR) {
            Ok(fd) => fd,
            Err(e) => {
                let _ = close(saved_out);
                let _ = close(null);
                return Err(e.into());
            }
        };

        let redirected = dup2(null, STDOUT).and_then(|_| dup2(null, STDERR));
        let _ = close(null);

        let guard = Self {
            saved: [saved_out, saved_err],
        };
        // a failed redirect is undone by the guard's drop
        redirected?;
        Ok(guard)
    }
}

fn flush_std() {
    let _ = std::io::stdout().flush();
    let _ = std::io::stderr().flush();
}

impl Drop for SuppressOutput {
    fn drop(&mut self) {
        flush_std();
        for (&saved, target) in self.saved.iter().zip([STDOUT, STDERR]) {
            if let Err(e) = dup2(saved, target) {
                warn!("failed to restore fd {}: {}", target, e);
            }
            let _ = close(saved);
        }
    }
}
