//! Exit codes for the CLI binary.
//!
//! Scripts and automation branch on these, so the mapping is part of the
//! tool's contract and documented in the CLI help text.

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command succeeded (0)
    Success = 0,

    /// Generic error (1)
    GenericError = 1,

    /// Invalid arguments or usage error (2)
    InvalidArgument = 2,

    /// Resource not found - board, ticket (3)
    NotFound = 3,

    /// Validation failed - range, type pairing, cycle (4)
    ValidationFailed = 4,

    /// Permission denied (5)
    PermissionDenied = 5,
}

impl ExitCode {
    /// Convert exit code to i32 for `std::process::exit`
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn description(self) -> &'static str {
        match self {
            ExitCode::Success => "Command succeeded",
            ExitCode::GenericError => "Generic error occurred",
            ExitCode::InvalidArgument => "Invalid arguments or usage error",
            ExitCode::NotFound => "Resource not found (board, ticket)",
            ExitCode::ValidationFailed => {
                "Validation failed (range, type pairing, cycle detected)"
            }
            ExitCode::PermissionDenied => "Permission denied",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::GenericError.code(), 1);
        assert_eq!(ExitCode::InvalidArgument.code(), 2);
        assert_eq!(ExitCode::NotFound.code(), 3);
        assert_eq!(ExitCode::ValidationFailed.code(), 4);
        assert_eq!(ExitCode::PermissionDenied.code(), 5);
    }

    #[test]
    fn test_descriptions_nonempty() {
        for code in [
            ExitCode::Success,
            ExitCode::GenericError,
            ExitCode::InvalidArgument,
            ExitCode::NotFound,
            ExitCode::ValidationFailed,
            ExitCode::PermissionDenied,
        ] {
            assert!(!code.description().is_empty());
        }
    }
}
