//! Transfer domain types.
//!
//! Request validation and outcome types for the two relay operations. The
//! process plumbing that produces these lives in `wm-runtime`.

use std::fmt;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Direction of a transfer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferMode {
    Send,
    Receive,
}

impl TransferMode {
    /// Subcommand passed to the transfer tool.
    pub const fn as_arg(self) -> &'static str {
        match self {
            Self::Send => "send",
            Self::Receive => "receive",
        }
    }
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

/// Result of a send once the tool has printed its transfer code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOutcome {
    /// Code the receiving side must enter.
    pub code: String,
}

/// Result of a receive once the tool process has exited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveOutcome {
    /// Exit code, `None` if the process was killed by a signal.
    pub exit_code: Option<i32>,
    /// Whether the confirmation prompt was answered.
    pub confirmed: bool,
    /// Destination reported by the tool, when it printed one.
    pub saved_path: Option<String>,
}

impl ReceiveOutcome {
    /// True when the tool exited with status zero.
    pub const fn succeeded(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }
}

/// Whether a non-zero receive exit status is reported as a failure.
///
/// The tool's exit code has historically never been surfaced; `Ignore`
/// preserves that, `Fail` opts into reporting it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitPolicy {
    #[default]
    Ignore,
    Fail,
}

impl std::str::FromStr for ExitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "fail" => Ok(Self::Fail),
            other => Err(format!("unknown exit policy: {other}")),
        }
    }
}

/// Errors produced by relay operations.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Request carried no filename.
    #[error("filename missing")]
    MissingFilename,

    /// Request carried no code.
    #[error("code missing")]
    MissingCode,

    /// Filename tried to escape the files directory.
    #[error("invalid filename: {0}")]
    InvalidFilename(String),

    /// Named file is not in the files directory.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// The transfer tool could not be started.
    #[error("failed to spawn {tool}: {reason}")]
    SpawnFailed { tool: String, reason: String },

    /// The send process exited before printing a code.
    #[error("{mode} process exited before producing a code (status {status})")]
    ExitedWithoutCode { mode: TransferMode, status: String },

    /// The receive process exited unsuccessfully and the exit policy is `Fail`.
    #[error("receive exited with status {status}")]
    NonZeroExit { status: String },

    /// The configured deadline elapsed.
    #[error("{mode} timed out after {secs}s")]
    Timeout { mode: TransferMode, secs: u64 },

    /// Pipe or process I/O failed.
    #[error("transfer I/O error: {0}")]
    Io(String),
}

impl TransferError {
    /// True for failures caused by the request itself.
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFilename
                | Self::MissingCode
                | Self::InvalidFilename(_)
                | Self::FileNotFound(_)
        )
    }
}

/// Validate a requested filename.
///
/// Blank names count as missing; otherwise the name is returned as given.
/// It must be exactly one normal path component so that it resolves inside
/// the files directory.
pub fn validate_filename(filename: Option<&str>) -> Result<&str, TransferError> {
    let name = filename
        .filter(|n| !n.trim().is_empty())
        .ok_or(TransferError::MissingFilename)?;

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(name),
        _ => Err(TransferError::InvalidFilename(name.to_string())),
    }
}

/// Validate a receive code and return it trimmed.
pub fn validate_code(code: Option<&str>) -> Result<&str, TransferError> {
    code.map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or(TransferError::MissingCode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_filename() {
        assert!(matches!(
            validate_filename(None),
            Err(TransferError::MissingFilename)
        ));
        assert!(matches!(
            validate_filename(Some("   ")),
            Err(TransferError::MissingFilename)
        ));
    }

    #[test]
    fn test_plain_filename_accepted() {
        assert_eq!(validate_filename(Some("report.pdf")).unwrap(), "report.pdf");
        assert_eq!(validate_filename(Some(" spaced.bin ")).unwrap(), " spaced.bin ");
    }

    #[test]
    fn test_traversal_rejected() {
        for bad in ["../secret", "/etc/passwd", "a/b.txt", ".."] {
            assert!(
                matches!(
                    validate_filename(Some(bad)),
                    Err(TransferError::InvalidFilename(_))
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_code_validation() {
        assert!(matches!(validate_code(None), Err(TransferError::MissingCode)));
        assert!(matches!(validate_code(Some("")), Err(TransferError::MissingCode)));
        assert_eq!(validate_code(Some("7-crypto-delta")).unwrap(), "7-crypto-delta");
    }

    #[test]
    fn test_not_found_message_names_file() {
        let err = TransferError::FileNotFound("movie.mkv".to_string());
        assert!(err.to_string().contains("movie.mkv"));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_exit_policy_parse() {
        assert_eq!("FAIL".parse::<ExitPolicy>().unwrap(), ExitPolicy::Fail);
        assert_eq!("ignore".parse::<ExitPolicy>().unwrap(), ExitPolicy::Ignore);
        assert!("maybe".parse::<ExitPolicy>().is_err());
    }

    #[test]
    fn test_receive_outcome_serialization() {
        let outcome = ReceiveOutcome {
            exit_code: Some(0),
            confirmed: true,
            saved_path: None,
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"exitCode\":0"));
        assert!(outcome.succeeded());
    }
}
