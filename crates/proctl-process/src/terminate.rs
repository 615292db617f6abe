//! Process termination primitives.
//!
//! Termination here is always forced (SIGKILL on Unix, TerminateProcess on
//! Windows). Launched applications get no chance to clean up.

use proctl_common::{ProcessError, ProcessId, ProcessResult};

/// Force kill a process by PID.
///
/// # Errors
/// - `NotFound` if no such process exists
/// - `PermissionDenied` if the process belongs to someone else
/// - `TerminateFailed` for anything else
pub fn force_kill(pid: ProcessId) -> ProcessResult<()> {
    #[cfg(unix)]
    {
        use nix::errno::Errno;
        use nix::sys::signal::{kill, Signal};

        let nix_pid = to_nix_pid(pid).ok_or_else(|| ProcessError::not_found(pid))?;

        match kill(nix_pid, Signal::SIGKILL) {
            Ok(()) => Ok(()),
            Err(Errno::ESRCH) => Err(ProcessError::not_found(pid)),
            Err(Errno::EPERM) => Err(ProcessError::permission_denied(pid)),
            Err(e) => Err(ProcessError::terminate_failed(pid, e.to_string())),
        }
    }

    #[cfg(windows)]
    {
        use windows::Win32::Foundation::CloseHandle;
        use windows::Win32::System::Threading::{OpenProcess, TerminateProcess, PROCESS_TERMINATE};

        const ERROR_INVALID_PARAMETER: u32 = 0x8007_0057;
        const ERROR_ACCESS_DENIED: u32 = 0x8007_0005;

        if pid.as_u32() == 0 {
            return Err(ProcessError::not_found(pid));
        }

        unsafe {
            let handle = match OpenProcess(PROCESS_TERMINATE, false, pid.as_u32()) {
                Ok(h) if !h.is_invalid() => h,
                Ok(_) => return Err(ProcessError::not_found(pid)),
                Err(e) => {
                    let error_code = e.code().0 as u32;
                    return Err(match error_code {
                        ERROR_INVALID_PARAMETER => ProcessError::not_found(pid),
                        ERROR_ACCESS_DENIED => ProcessError::permission_denied(pid),
                        _ => ProcessError::terminate_failed(pid, e.to_string()),
                    });
                }
            };

            let result = TerminateProcess(handle, 1);
            let _ = CloseHandle(handle);

            result.map_err(|e| {
                ProcessError::terminate_failed(pid, format!("TerminateProcess failed: {}", e))
            })
        }
    }
}

/// Convert to a nix PID, refusing values that would address a process group.
#[cfg(unix)]
pub(crate) fn to_nix_pid(pid: ProcessId) -> Option<nix::unistd::Pid> {
    match i32::try_from(pid.as_u32()) {
        Ok(raw) if raw > 0 => Some(nix::unistd::Pid::from_raw(raw)),
        _ => None,
    }
}
