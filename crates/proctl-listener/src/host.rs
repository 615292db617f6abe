//! The seam between the command processor and the operating system.

use crate::command::StartRequest;
use crate::sweep::TerminationOutcome;
use proctl_common::{ProcessId, ProcessResult};
use proctl_process::{process_exists, DiscoveredProcess};
use std::collections::{HashMap, HashSet};
use std::process::Child;
use tracing::{debug, warn};

/// A process that was successfully launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchedProcess {
    pub pid: ProcessId,
    pub name: String,
}

/// Process operations the command processor needs.
pub trait ProcessHost {
    /// Launch the application described by `request`.
    fn launch(&mut self, request: &StartRequest) -> ProcessResult<LaunchedProcess>;

    /// Running processes matching `name`.
    fn find_by_name(&self, name: &str) -> Vec<DiscoveredProcess>;

    /// Forcefully terminate `pid`.
    fn terminate(&mut self, pid: ProcessId) -> TerminationOutcome;
}

/// Production host backed by `proctl-process`.
///
/// Holds on to the `Child` of every launched process so exited and killed
/// children get reaped instead of lingering as zombies. Once a child is
/// reaped its id is retired: the OS may hand it to an unrelated process, so
/// later sweeps report it as `NotFound` without sending any signal.
#[derive(Debug, Default)]
pub struct SystemProcessHost {
    children: HashMap<ProcessId, Child>,
    retired: HashSet<ProcessId>,
}

impl SystemProcessHost {
    /// Create a host that tracks no children yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of launched children not yet reaped.
    pub fn tracked_children(&self) -> usize {
        self.children.len()
    }

    /// True when `pid` belonged to a child of this host that has been reaped.
    pub fn is_retired(&self, pid: ProcessId) -> bool {
        self.retired.contains(&pid)
    }

    fn reap_exited(&mut self) {
        let retired = &mut self.retired;
        self.children.retain(|pid, child| match child.try_wait() {
            Ok(Some(status)) => {
                debug!("Process {} exited with {}", pid, status);
                retired.insert(*pid);
                false
            }
            Ok(None) => true,
            Err(e) => {
                warn!("Failed to poll process {}: {}", pid, e);
                true
            }
        });
    }

    fn terminate_child(pid: ProcessId, child: &mut Child) -> TerminationOutcome {
        if let Ok(Some(_)) = child.try_wait() {
            return TerminationOutcome::NotFound;
        }
        match child.kill() {
            Ok(()) => {
                if let Err(e) = child.wait() {
                    warn!("Failed to reap process {}: {}", pid, e);
                }
                TerminationOutcome::Terminated
            }
            Err(e) => match process_exists(pid) {
                Ok(false) => TerminationOutcome::NotFound,
                _ => TerminationOutcome::Failed(e.to_string()),
            },
        }
    }
}

impl ProcessHost for SystemProcessHost {
    fn launch(&mut self, request: &StartRequest) -> ProcessResult<LaunchedProcess> {
        self.reap_exited();

        let path = request.launch_path();
        let child = proctl_process::launch(path, &request.arguments)?;
        let pid = ProcessId::new(child.id());
        self.retired.remove(&pid);
        self.children.insert(pid, child);

        Ok(LaunchedProcess {
            pid,
            name: proctl_process::process_display_name(path),
        })
    }

    fn find_by_name(&self, name: &str) -> Vec<DiscoveredProcess> {
        proctl_process::find_processes_by_name(name)
    }

    fn terminate(&mut self, pid: ProcessId) -> TerminationOutcome {
        if let Some(mut child) = self.children.remove(&pid) {
            let outcome = Self::terminate_child(pid, &mut child);
            if outcome.is_failure() {
                self.children.insert(pid, child);
            } else {
                self.retired.insert(pid);
            }
            return outcome;
        }

        if self.retired.contains(&pid) {
            debug!("Process {} was already reaped; not signalling its id again", pid);
            return TerminationOutcome::NotFound;
        }

        proctl_process::force_kill(pid).into()
    }
}
