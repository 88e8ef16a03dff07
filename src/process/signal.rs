use std::os::unix::process::CommandExt;
use std::process::Command;

use crate::process::ProcessError;

use libc::{signal, SIGTTOU, SIG_DFL, SIG_ERR, SIG_IGN};

/// The shell reclaims the terminal from a background group after every job,
/// which would otherwise stop it with `SIGTTOU`.
pub fn ignore_terminal_output_stops() -> Result<(), ProcessError> {
    let previous = unsafe { signal(SIGTTOU, SIG_IGN) };
    if previous == SIG_ERR {
        return Err(std::io::Error::last_os_error().into());
    }
    Ok(())
}

/// Keeps the shell alive when an interrupt reaches its own process group,
/// which happens while a captured command runs without the terminal.
pub fn install_interrupt_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        log::debug!("interrupt delivered to the shell's process group");
    })
}

/// Ignored dispositions survive `exec`; hand the child the default one.
pub(crate) fn restore_default_dispositions(command: &mut Command) {
    unsafe {
        command.pre_exec(|| {
            signal(SIGTTOU, SIG_DFL);
            Ok(())
        });
    }
}
