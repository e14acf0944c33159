//! Monitoring service states.

use std::fmt;

/// Service check state with the conventional monitoring plugin exit codes.
///
/// Precedence when rolling up a collection: CRITICAL > WARNING > OK >
/// UNKNOWN. UNKNOWN covers evaluation paths that should be unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl ServiceState {
    pub fn label(&self) -> &'static str {
        match self {
            ServiceState::Ok => "OK",
            ServiceState::Warning => "WARNING",
            ServiceState::Critical => "CRITICAL",
            ServiceState::Unknown => "UNKNOWN",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            ServiceState::Ok => 0,
            ServiceState::Warning => 1,
            ServiceState::Critical => 2,
            ServiceState::Unknown => 3,
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_and_exit_codes() {
        assert_eq!(ServiceState::Ok.label(), "OK");
        assert_eq!(ServiceState::Ok.exit_code(), 0);
        assert_eq!(ServiceState::Warning.label(), "WARNING");
        assert_eq!(ServiceState::Warning.exit_code(), 1);
        assert_eq!(ServiceState::Critical.label(), "CRITICAL");
        assert_eq!(ServiceState::Critical.exit_code(), 2);
        assert_eq!(ServiceState::Unknown.label(), "UNKNOWN");
        assert_eq!(ServiceState::Unknown.exit_code(), 3);
    }
}
