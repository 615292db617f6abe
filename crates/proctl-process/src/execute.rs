//! Process execution primitives.
//!
//! The listener receives its argument list as one opaque string. Windows
//! accepts a raw command line, so the string is appended verbatim. Unix has
//! no command line, only argv, so the string is split with POSIX shell-word
//! rules (quotes and backslash escapes, no expansion or globbing).

use proctl_common::{ProcessError, ProcessResult};
use std::path::Path;
use std::process::{Child, Command, Stdio};

/// Spawn `executable` with the opaque `arguments` string.
///
/// The child inherits stdout/stderr so its output shows up on the listener's
/// console. stdin is detached.
pub fn launch(executable: &str, arguments: &str) -> ProcessResult<Child> {
    if executable.is_empty() {
        return Err(ProcessError::spawn_failed(
            executable,
            "Executable path cannot be empty",
        ));
    }

    let mut cmd = Command::new(executable);
    apply_arguments(&mut cmd, arguments)?;
    cmd.stdin(Stdio::null());

    // Keep console Ctrl+C aimed at the listener from reaching launched apps
    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
        cmd.creation_flags(CREATE_NEW_PROCESS_GROUP);
    }

    cmd.spawn()
        .map_err(|e| ProcessError::spawn_failed(executable, e.to_string()))
}

#[cfg(windows)]
fn apply_arguments(cmd: &mut Command, arguments: &str) -> ProcessResult<()> {
    use std::os::windows::process::CommandExt;

    if !arguments.is_empty() {
        cmd.raw_arg(arguments);
    }
    Ok(())
}

#[cfg(not(windows))]
fn apply_arguments(cmd: &mut Command, arguments: &str) -> ProcessResult<()> {
    cmd.args(split_arguments(arguments)?);
    Ok(())
}

/// Split an argument string into argv entries using shell-word rules.
pub fn split_arguments(arguments: &str) -> ProcessResult<Vec<String>> {
    shell_words::split(arguments).map_err(|e| ProcessError::invalid_arguments(e.to_string()))
}

/// Name shown in diagnostics for a launched executable.
pub fn process_display_name(executable: &str) -> String {
    Path::new(executable)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| executable.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_arguments() {
        assert_eq!(
            split_arguments("--flag value").unwrap(),
            vec!["--flag".to_string(), "value".to_string()]
        );
        assert_eq!(
            split_arguments(r#"-map "Level One" -log"#).unwrap(),
            vec!["-map".to_string(), "Level One".to_string(), "-log".to_string()]
        );
        assert!(split_arguments("").unwrap().is_empty());
    }

    #[test]
    fn test_split_arguments_unbalanced_quote() {
        let err = split_arguments(r#"--name "unterminated"#).unwrap_err();
        assert!(matches!(err, ProcessError::InvalidArguments { .. }));
    }

    #[test]
    fn test_process_display_name() {
        assert_eq!(process_display_name("/usr/bin/sleep"), "sleep");
        assert_eq!(process_display_name("notepad.exe"), "notepad.exe");
    }

    #[test]
    fn test_launch_empty_path() {
        let err = launch("", "").unwrap_err();
        assert!(matches!(err, ProcessError::SpawnFailed { .. }));
    }

    #[test]
    fn test_launch_missing_executable() {
        let err = launch("/definitely/not/here/proctl-missing", "--flag").unwrap_err();
        match err {
            ProcessError::SpawnFailed { path, .. } => {
                assert_eq!(path, "/definitely/not/here/proctl-missing");
            }
            other => panic!("Wrong error type: {:?}", other),
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_launch_passes_split_arguments() {
        let mut child = launch("sh", "-c 'exit 7'").unwrap();
        let status = child.wait().unwrap();
        assert_eq!(status.code(), Some(7));
    }
}
