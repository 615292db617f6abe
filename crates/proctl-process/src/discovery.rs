//! Host process discovery by name.
//!
//! Used by the kill sweep to find every running instance of an
//! always-kill entry, regardless of who started it.

use proctl_common::ProcessId;
use std::path::Path;
use sysinfo::{ProcessRefreshKind, System, UpdateKind};
use tracing::debug;

/// Longest process name Linux keeps in `/proc/<pid>/stat` (`TASK_COMM_LEN - 1`).
pub const TRUNCATED_NAME_LENGTH: usize = 15;

/// A running process found on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredProcess {
    pub pid: ProcessId,
    pub name: String,
}

/// Find all running processes whose name matches `name`.
///
/// The kernel name of a process can be truncated (see
/// [`TRUNCATED_NAME_LENGTH`]), so names of that length are resolved to the
/// executable's file name before matching.
///
/// # Arguments
///
/// * `name` - Configured process name, with or without `.exe`
///
/// # Returns
///
/// Matching processes ordered by PID. The listener's own process is never
/// returned.
pub fn find_processes_by_name(name: &str) -> Vec<DiscoveredProcess> {
    let mut system = System::new();
    system.refresh_processes_specifics(
        ProcessRefreshKind::new()
            .with_exe(UpdateKind::OnlyIfNotSet)
            .with_cmd(UpdateKind::OnlyIfNotSet),
    );

    let own_pid = ProcessId::current();
    let mut found: Vec<DiscoveredProcess> = system
        .processes()
        .iter()
        .map(|(pid, process)| DiscoveredProcess {
            pid: ProcessId::new(pid.as_u32()),
            name: full_process_name(process.name(), process.exe(), process.cmd()),
        })
        .filter(|candidate| candidate.pid != own_pid && process_name_matches(&candidate.name, name))
        .collect();
    found.sort_by_key(|p| p.pid);

    debug!("Found {} running process(es) named {}", found.len(), name);
    found
}

/// Undo kernel name truncation.
///
/// A name shorter than [`TRUNCATED_NAME_LENGTH`] is complete. Otherwise the
/// executable path, then the first command line word, is used when its file
/// name extends the reported name.
pub fn full_process_name(name: &str, exe: Option<&Path>, cmd: &[String]) -> String {
    if name.len() < TRUNCATED_NAME_LENGTH {
        return name.to_string();
    }

    let from_exe = exe.and_then(file_name);
    let from_cmd = cmd.first().and_then(|arg| file_name(Path::new(arg)));
    from_exe
        .into_iter()
        .chain(from_cmd)
        .find(|full| full.len() > name.len() && full.starts_with(name))
        .unwrap_or_else(|| name.to_string())
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

/// Compare a host process name against a configured name.
///
/// A trailing `.exe` (any case) is ignored on either side, so `Game.exe`
/// and `Game` refer to the same program on every platform.
pub fn process_name_matches(candidate: &str, wanted: &str) -> bool {
    if wanted.is_empty() {
        return false;
    }
    candidate == wanted || strip_exe_suffix(candidate) == strip_exe_suffix(wanted)
}

fn strip_exe_suffix(name: &str) -> &str {
    const SUFFIX: &str = ".exe";
    let split = name.len().saturating_sub(SUFFIX.len());
    match (name.get(..split), name.get(split..)) {
        (Some(stem), Some(ext)) if !stem.is_empty() && ext.eq_ignore_ascii_case(SUFFIX) => stem,
        _ => name,
    }
}
