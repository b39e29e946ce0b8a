//! Exit code definitions for lprobe
//!
//! Scripts rely on these values to tell an unusable primary URI apart from a
//! failed fallback.

/// Exit codes for the lprobe CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// A table was opened (primary or fallback)
    Success = 0,

    /// The primary table URI did not resolve
    InvalidUri = 1,

    /// The fallback URI did not resolve, or the fallback table failed to open
    ProbeFailed = 2,

    /// Configuration file could not be read or parsed
    ConfigError = 3,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Create exit code from i32 value
    ///
    /// Returns None if the value doesn't correspond to a known exit code.
    pub const fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::InvalidUri),
            2 => Some(Self::ProbeFailed),
            3 => Some(Self::ConfigError),
            _ => None,
        }
    }

    /// Get a human-readable description of the exit code
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "Table opened successfully",
            Self::InvalidUri => "Invalid table URI",
            Self::ProbeFailed => "Fallback table could not be opened",
            Self::ConfigError => "Configuration error",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::InvalidUri.as_i32(), 1);
        assert_eq!(ExitCode::ProbeFailed.as_i32(), 2);
        assert_eq!(ExitCode::ConfigError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_from_i32() {
        assert_eq!(ExitCode::from_i32(0), Some(ExitCode::Success));
        assert_eq!(ExitCode::from_i32(1), Some(ExitCode::InvalidUri));
        assert_eq!(ExitCode::from_i32(2), Some(ExitCode::ProbeFailed));
        assert_eq!(ExitCode::from_i32(3), Some(ExitCode::ConfigError));
        assert_eq!(ExitCode::from_i32(99), None);
    }

    #[test]
    fn test_exit_code_matches_core_errors() {
        use lp_core::Error;

        for err in [
            Error::InvalidUri("x".into()),
            Error::Connection("x".into()),
            Error::Config("x".into()),
        ] {
            assert!(ExitCode::from_i32(err.exit_code()).is_some());
        }
    }

    #[test]
    fn test_exit_code_display() {
        let display = format!("{}", ExitCode::Success);
        assert!(display.contains("0"));
        assert!(display.contains("successfully"));

        let display = format!("{}", ExitCode::ProbeFailed);
        assert!(display.contains("2"));
    }
}
