//! Scheduler commands for listing and cancelling jobs.
//!
//! Both calls are synchronous: the UI blocks until the command returns.

use std::process::Command;

use crate::error::JobError;
use crate::parser::{self, Dataset};

/// Default `squeue` output format.
pub const DEFAULT_FORMAT: &str = "%.18i %.9P %.20j %.12u %.8T %.10M %.9l %.6D %R";

/// The two operations the dashboard needs from a batch scheduler.
pub trait JobQueue {
    /// Fetch the current job list.
    fn list_jobs(&mut self) -> Result<Dataset, JobError>;

    /// Cancel a job by identifier.
    fn cancel_job(&mut self, job_id: &str) -> Result<(), JobError>;
}

/// Slurm-backed queue that shells out to `squeue` and `scancel`.
#[derive(Debug, Clone)]
pub struct Slurm {
    pub squeue: String,
    pub scancel: String,
    pub format: String,
    /// Restrict the listing to the invoking user's jobs (`--me`)
    pub only_mine: bool,
}

impl Default for Slurm {
    fn default() -> Self {
        Self {
            squeue: "squeue".to_string(),
            scancel: "scancel".to_string(),
            format: DEFAULT_FORMAT.to_string(),
            only_mine: true,
        }
    }
}

impl Slurm {
    fn listing_args(&self) -> Vec<&str> {
        let mut args = vec!["-o", self.format.as_str()];
        if self.only_mine {
            args.push("--me");
        }
        args
    }
}

impl JobQueue for Slurm {
    fn list_jobs(&mut self) -> Result<Dataset, JobError> {
        let output = Command::new(&self.squeue)
            .args(self.listing_args())
            .output()
            .map_err(|source| JobError::Spawn {
                command: self.squeue.clone(),
                source,
            })?;

        // A non-zero exit that still printed a table is shown as-is.
        if !output.status.success() && output.stdout.is_empty() {
            return Err(JobError::Status {
                command: self.squeue.clone(),
                status: output.status,
                stderr: captured_stderr(&output.stderr),
            });
        }

        let text = String::from_utf8(output.stdout).map_err(|_| JobError::Utf8 {
            command: self.squeue.clone(),
        })?;
        Ok(parser::parse_squeue(&text))
    }

    fn cancel_job(&mut self, job_id: &str) -> Result<(), JobError> {
        // Captured, not inherited: anything written to the tty would land on
        // the alternate screen outside the frame buffer.
        let output = Command::new(&self.scancel)
            .arg(job_id)
            .output()
            .map_err(|source| JobError::Spawn {
                command: self.scancel.clone(),
                source,
            })?;
        if output.status.success() {
            Ok(())
        } else {
            Err(JobError::Status {
                command: format!("{} {}", self.scancel, job_id),
                status: output.status,
                stderr: captured_stderr(&output.stderr),
            })
        }
    }
}

fn captured_stderr(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_args_default() {
        let slurm = Slurm::default();
        assert_eq!(slurm.listing_args(), vec!["-o", DEFAULT_FORMAT, "--me"]);
    }

    #[test]
    fn test_listing_args_all_users() {
        let slurm = Slurm {
            only_mine: false,
            ..Slurm::default()
        };
        assert_eq!(slurm.listing_args(), vec!["-o", DEFAULT_FORMAT]);
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let mut slurm = Slurm {
            squeue: "/nonexistent/squeue-binary".to_string(),
            scancel: "/nonexistent/scancel-binary".to_string(),
            ..Slurm::default()
        };
        assert!(matches!(slurm.list_jobs(), Err(JobError::Spawn { .. })));
        assert!(matches!(slurm.cancel_job("1"), Err(JobError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_cancel_exit_status() {
        let mut ok = Slurm {
            scancel: "true".to_string(),
            ..Slurm::default()
        };
        assert!(ok.cancel_job("42").is_ok());

        let mut failing = Slurm {
            scancel: "false".to_string(),
            ..Slurm::default()
        };
        assert!(matches!(
            failing.cancel_job("42"),
            Err(JobError::Status { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_cancel_failure_captures_stderr() {
        // `ls` on a missing path fails and complains on stderr
        let mut slurm = Slurm {
            scancel: "ls".to_string(),
            ..Slurm::default()
        };
        let err = slurm.cancel_job("/nonexistent-job-42").unwrap_err();
        match &err {
            JobError::Status { command, stderr, .. } => {
                assert_eq!(command, "ls /nonexistent-job-42");
                assert!(stderr.contains("/nonexistent-job-42"), "stderr not captured: {:?}", stderr);
            }
            other => panic!("expected a status error, got {:?}", other),
        }
        assert!(err.to_string().contains("/nonexistent-job-42"));
    }

    #[cfg(unix)]
    #[test]
    fn test_cancel_success_output_is_captured() {
        let mut slurm = Slurm {
            scancel: "echo".to_string(),
            ..Slurm::default()
        };
        assert!(slurm.cancel_job("42").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_status_error_message_without_stderr() {
        let mut slurm = Slurm {
            scancel: "false".to_string(),
            ..Slurm::default()
        };
        let message = slurm.cancel_job("7").unwrap_err().to_string();
        assert!(message.starts_with("`false 7` exited with"));
        assert!(!message.ends_with(": "));
    }

    #[cfg(unix)]
    #[test]
    fn test_list_jobs_through_echo() {
        // `echo -o FORMAT --me` prints its args; the first line is the header
        let mut slurm = Slurm {
            squeue: "echo".to_string(),
            format: "JOBID".to_string(),
            ..Slurm::default()
        };
        let data = slurm.list_jobs().unwrap();
        assert_eq!(data.headers, vec!["-o", "JOBID", "--me"]);
        assert!(data.is_empty());
    }
}
