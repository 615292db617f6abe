//! Process existence checking.

use proctl_common::{ProcessError, ProcessId, ProcessResult};

/// Check if a process with the given PID exists.
///
/// On Unix this uses `kill(pid, 0)`, which delivers nothing but reports
/// whether the target exists. On Windows it uses `OpenProcess`.
///
/// # Returns
///
/// * `Ok(true)` - Process exists (possibly owned by another user)
/// * `Ok(false)` - Process does not exist
/// * `Err(_)` - The check itself failed
pub fn process_exists(pid: ProcessId) -> ProcessResult<bool> {
    #[cfg(unix)]
    {
        process_exists_unix(pid)
    }

    #[cfg(windows)]
    {
        process_exists_windows(pid)
    }
}

#[cfg(unix)]
fn process_exists_unix(pid: ProcessId) -> ProcessResult<bool> {
    use nix::errno::Errno;
    use nix::sys::signal::kill;

    // 0 and negative values address process groups, not a single process
    let Some(nix_pid) = crate::terminate::to_nix_pid(pid) else {
        return Ok(false);
    };

    match kill(nix_pid, None) {
        Ok(()) => Ok(true),
        Err(Errno::ESRCH) => Ok(false),
        Err(Errno::EPERM) => Ok(true),
        Err(e) => Err(ProcessError::check_failed(pid, e.to_string())),
    }
}

#[cfg(windows)]
fn process_exists_windows(pid: ProcessId) -> ProcessResult<bool> {
    use windows::Win32::Foundation::{CloseHandle, HANDLE};
    use windows::Win32::System::Threading::{OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION};

    const ERROR_INVALID_PARAMETER: u32 = 0x8007_0057;
    const ERROR_ACCESS_DENIED: u32 = 0x8007_0005;

    unsafe {
        let handle: HANDLE =
            match OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid.as_u32()) {
                Ok(h) => h,
                Err(e) => {
                    let error_code = e.code().0 as u32;
                    if error_code == ERROR_INVALID_PARAMETER {
                        return Ok(false);
                    }
                    if error_code == ERROR_ACCESS_DENIED {
                        return Ok(true);
                    }
                    return Err(ProcessError::check_failed(pid, e.to_string()));
                }
            };

        let _ = CloseHandle(handle);
        Ok(true)
    }
}
