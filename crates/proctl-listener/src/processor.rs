//! Command processor: parses a request, keeps the process ledger and runs
//! the matching lifecycle action.

use crate::command::{parse_command, Command, StartRequest};
use crate::errors::ProtocolError;
use crate::host::ProcessHost;
use crate::registry::ProcessRegistry;
use crate::sweep::{KillReport, SweepTarget, TerminationAttempt, TerminationOutcome};
use proctl_common::ProcessId;
use tracing::{debug, error, info, warn};

/// What handling one request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Started { pid: ProcessId, name: String },
    StartFailed(String),
    Killed(KillReport),
    /// `status` is recognised but has no implementation yet.
    StatusUnavailable,
    Rejected(ProtocolError),
}

impl Outcome {
    /// One-line reply for the optional acknowledgement extension.
    pub fn reply_line(&self) -> String {
        let line = match self {
            Outcome::Started { pid, name } => format!("OK started {} pid={}", name, pid),
            Outcome::StartFailed(reason) => format!("ERR {}", reason),
            Outcome::Killed(report) => format!("OK kill: {}", report),
            Outcome::StatusUnavailable => "ERR status command has not been implemented yet".to_string(),
            Outcome::Rejected(e) => format!("ERR {}", e),
        };
        single_line(&line)
    }
}

/// Replace control characters (CR/LF included) with spaces so client text
/// always fits on one reply or log line.
pub(crate) fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Owns the process ledger and the always-kill list for one listener.
pub struct CommandProcessor<H: ProcessHost> {
    host: H,
    registry: ProcessRegistry,
    always_kill: Vec<String>,
}

impl<H: ProcessHost> CommandProcessor<H> {
    /// Create a processor with an empty ledger.
    ///
    /// # Arguments
    ///
    /// * `host` - Performs the actual process operations
    /// * `always_kill` - Names killed on every `kill`, whoever started them
    pub fn new(host: H, always_kill: Vec<String>) -> Self {
        Self {
            host,
            registry: ProcessRegistry::new(),
            always_kill,
        }
    }

    /// Processes launched so far.
    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    /// The process host in use.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Configured always-kill names.
    pub fn always_kill(&self) -> &[String] {
        &self.always_kill
    }

    /// Handle one decoded command string.
    ///
    /// Never fails: protocol and process errors are logged and come back as
    /// the matching [`Outcome`]. Only `start` and `kill` touch processes.
    pub fn handle(&mut self, data: &str) -> Outcome {
        let trimmed = data.trim();
        if !trimmed.is_empty() {
            info!("Received command: [{}]", single_line(trimmed));
        }

        match parse_command(trimmed) {
            Ok(Command::Start(request)) => self.start(&request),
            Ok(Command::Kill) => Outcome::Killed(self.kill_all()),
            Ok(Command::Status) => self.status(),
            Err(e) => {
                warn!("{}", single_line(&e.to_string()));
                Outcome::Rejected(e)
            }
        }
    }

    /// Launch an application and record it in the ledger.
    pub fn start(&mut self, request: &StartRequest) -> Outcome {
        debug!(
            "Launching {} with arguments [{}]",
            single_line(request.launch_path()),
            single_line(&request.arguments)
        );

        match self.host.launch(request) {
            Ok(launched) => {
                if !self.registry.record(launched.pid, launched.name.as_str()) {
                    warn!("Process id {} was already recorded; the OS reused it", launched.pid);
                }
                info!("Process started: {} | {}", single_line(&launched.name), launched.pid);
                Outcome::Started {
                    pid: launched.pid,
                    name: launched.name,
                }
            }
            Err(e) => {
                error!("{}", single_line(&e.to_string()));
                Outcome::StartFailed(e.to_string())
            }
        }
    }

    /// Kill everything on the always-kill list, then everything this
    /// listener launched (most recent first).
    pub fn kill_all(&mut self) -> KillReport {
        let mut report = KillReport::new();

        for name in &self.always_kill {
            for found in self.host.find_by_name(name) {
                let outcome = self.host.terminate(found.pid);
                log_attempt(&found.name, found.pid, &outcome);
                report.record(TerminationAttempt {
                    pid: found.pid,
                    process_name: found.name,
                    target: SweepTarget::AlwaysKill(name.clone()),
                    outcome,
                });
            }
        }

        if self.registry.most_recent().is_none() {
            debug!("No process has been started by this listener; registry sweep skipped");
        }

        for pid in self.registry.sweep_order() {
            let process_name = self.registry.name_of(pid).unwrap_or_default().to_string();
            let outcome = self.host.terminate(pid);
            log_attempt(&process_name, pid, &outcome);
            report.record(TerminationAttempt {
                pid,
                process_name,
                target: SweepTarget::Registry,
                outcome,
            });
        }

        info!("Kill sweep finished: {}", report);
        report
    }

    fn status(&self) -> Outcome {
        warn!("STATUS command has not been implemented yet.");
        Outcome::StatusUnavailable
    }
}

fn log_attempt(name: &str, pid: ProcessId, outcome: &TerminationOutcome) {
    match outcome {
        TerminationOutcome::Terminated => info!("Killed {} | {}", name, pid),
        TerminationOutcome::NotFound => debug!("{} | {} is not running", name, pid),
        other => debug!("Could not kill {} | {}: {}", name, pid, other),
    }
}
