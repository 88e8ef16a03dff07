use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::io::AsRawFd;
use std::os::unix::process::CommandExt;
use std::process::Command;

use libc::pid_t;

const TTY_PATH: &[u8] = b"/dev/tty\0";

/// Access to the foreground process group of the controlling terminal.
pub trait ForegroundTerminal {
    fn set_foreground_group(&self, pgid: pid_t) -> io::Result<()>;

    /// Whether a launched job should also claim this terminal from inside
    /// the child, before its program starts.
    fn claims_in_child(&self) -> bool {
        false
    }
}

/// The real controlling terminal, reached through `/dev/tty`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllingTerminal;

impl ControllingTerminal {
    fn open() -> io::Result<File> {
        OpenOptions::new().read(true).write(true).open("/dev/tty")
    }
}

impl ForegroundTerminal for ControllingTerminal {
    fn set_foreground_group(&self, pgid: pid_t) -> io::Result<()> {
        let tty = Self::open()?;
        if unsafe { libc::tcsetpgrp(tty.as_raw_fd(), pgid) } == -1 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    fn claims_in_child(&self) -> bool {
        true
    }
}

/// Makes the child's own group the terminal's foreground before `exec`, so
/// a job that reads the terminal immediately is never stopped by `SIGTTIN`.
/// Must be registered before the child resets `SIGTTOU`.
pub(crate) fn claim_foreground_in_child(command: &mut Command) {
    unsafe {
        command.pre_exec(|| {
            let fd = libc::open(TTY_PATH.as_ptr().cast(), libc::O_RDWR | libc::O_CLOEXEC);
            if fd >= 0 {
                libc::tcsetpgrp(fd, libc::getpid());
                libc::close(fd);
            }
            Ok(())
        });
    }
}

pub fn shell_group() -> pid_t {
    unsafe { libc::getpgrp() }
}

/// Holds the terminal for a job's process group and gives it back to the
/// shell's group when dropped, however the wait in between ends.
pub struct ForegroundGuard<'a> {
    terminal: &'a dyn ForegroundTerminal,
    shell_group: pid_t,
}

impl<'a> ForegroundGuard<'a> {
    pub fn acquire(terminal: &'a dyn ForegroundTerminal, job_group: pid_t) -> Self {
        if let Err(e) = terminal.set_foreground_group(job_group) {
            log::debug!("could not hand terminal to group {}: {}", job_group, e);
        }
        Self {
            terminal,
            shell_group: shell_group(),
        }
    }
}

impl Drop for ForegroundGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.terminal.set_foreground_group(self.shell_group) {
            log::debug!("could not reclaim terminal for group {}: {}", self.shell_group, e);
        }
    }
}
