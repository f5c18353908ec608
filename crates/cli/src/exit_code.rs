//! Exit code definitions for the bmir CLI

/// Exit codes for the bmir CLI application.
///
/// These codes follow a consistent convention to allow scripts and
/// automation to handle different error scenarios appropriately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// All pipeline steps completed
    Success = 0,

    /// General/unspecified error
    GeneralError = 1,

    /// Required credential or setting missing
    ConfigError = 2,

    /// Listing or transport failure
    NetworkError = 3,

    /// Authentication or permission failure
    AuthError = 4,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get a human-readable description of the exit code
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "Operation completed successfully",
            Self::GeneralError => "General error",
            Self::ConfigError => "Missing or invalid configuration",
            Self::NetworkError => "Network or listing error",
            Self::AuthError => "Authentication or permission failure",
        }
    }
}

impl From<&bm_core::Error> for ExitCode {
    fn from(err: &bm_core::Error) -> Self {
        match err {
            bm_core::Error::Config(_) => Self::ConfigError,
            bm_core::Error::Auth(_) => Self::AuthError,
            bm_core::Error::List(_) => Self::NetworkError,
            bm_core::Error::Download { .. } | bm_core::Error::Io(_) => Self::GeneralError,
        }
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
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::ConfigError.as_i32(), 2);
        assert_eq!(ExitCode::NetworkError.as_i32(), 3);
        assert_eq!(ExitCode::AuthError.as_i32(), 4);
    }

    #[test]
    fn test_exit_code_from_error() {
        assert_eq!(
            ExitCode::from(&bm_core::Error::Config("missing".into())),
            ExitCode::ConfigError
        );
        assert_eq!(
            ExitCode::from(&bm_core::Error::Auth("denied".into())),
            ExitCode::AuthError
        );
        assert_eq!(
            ExitCode::from(&bm_core::Error::List("timeout".into())),
            ExitCode::NetworkError
        );
        assert_eq!(
            ExitCode::from(&bm_core::Error::download("k", "boom")),
            ExitCode::GeneralError
        );
    }

    #[test]
    fn test_exit_code_display() {
        let display = format!("{}", ExitCode::AuthError);
        assert!(display.contains("4"));
        assert!(display.contains("Authentication"));
    }
}
