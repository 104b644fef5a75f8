use crate::error::ActionError;

/// Destructive substrings that are refused outright, case-insensitively.
/// This is a best-effort denylist, not a sandbox.
const DENYLIST: &[&str] = &[
    "format",
    "rm -rf",
    "rm -fr",
    "rmdir",
    "rd /s",
    "del /",
    ":(){",
    "mkfs",
    "dd if=",
    "shutdown",
    "restart",
    "reboot",
    "poweroff",
    "halt",
];

pub struct CommandGuard;

impl CommandGuard {
    /// Reject a shell command containing any denylisted substring. The
    /// command never reaches a process spawn when this fails.
    pub fn validate(command: &str) -> Result<(), ActionError> {
        let lower = command.to_lowercase();
        for needle in DENYLIST {
            if lower.contains(needle) {
                return Err(ActionError::Blocked(command.to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benign_commands_pass() {
        assert!(CommandGuard::validate("uname -a").is_ok());
        assert!(CommandGuard::validate("df -h").is_ok());
        assert!(CommandGuard::validate("echo hello").is_ok());
    }

    #[test]
    fn destructive_commands_blocked() {
        for cmd in [
            "rm -rf /",
            "sudo mkfs.ext4 /dev/sda1",
            "shutdown now",
            "dd if=/dev/zero of=/dev/sda",
            ":(){ :|:& };:",
        ] {
            assert!(
                matches!(CommandGuard::validate(cmd), Err(ActionError::Blocked(_))),
                "{cmd} should be blocked"
            );
        }
    }

    #[test]
    fn denylist_is_case_insensitive() {
        for cmd in ["SHUTDOWN now", "Rm -Rf ~", "ShUtDoWn -h"] {
            assert!(matches!(
                CommandGuard::validate(cmd),
                Err(ActionError::Blocked(_))
            ));
        }
    }

    #[test]
    fn substring_match_catches_embedded_use() {
        assert!(CommandGuard::validate("echo hi && shutdown -r now").is_err());
    }
}
