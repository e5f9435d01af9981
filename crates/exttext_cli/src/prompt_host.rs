//! Terminal permission host.
//!
//! The "dialog" is a yes/no question on stderr answered from stdin. A grant
//! lasts for the process lifetime only; `--yes` grants up front.

use exttext_core::{PermissionHost, StorageCapability};
use std::cell::Cell;
use std::io::{self, BufRead, Write};

pub struct PromptPermissionHost {
    assume_yes: bool,
    granted: Cell<bool>,
    answer: Cell<Option<(u32, bool)>>,
}

impl PromptPermissionHost {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            granted: Cell::new(assume_yes),
            answer: Cell::new(None),
        }
    }

    /// Takes the last prompt answer as `(request_id, granted)`.
    pub fn take_answer(&self) -> Option<(u32, bool)> {
        self.answer.take()
    }

    fn ask(&self, capability: StorageCapability) -> bool {
        if self.assume_yes {
            return true;
        }
        let mut stderr = io::stderr();
        let _ = write!(stderr, "{} [y/N] ", capability.description());
        let _ = stderr.flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => parse_answer(&line),
            Err(_) => false,
        }
    }
}

impl PermissionHost for PromptPermissionHost {
    fn is_granted(&self, _capability: StorageCapability) -> bool {
        self.granted.get()
    }

    fn prompt(&self, capability: StorageCapability, request_id: u32) {
        let granted = self.ask(capability);
        self.granted.set(granted);
        self.answer.set(Some((request_id, granted)));
    }
}

fn parse_answer(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::{parse_answer, PromptPermissionHost};
    use exttext_core::{PermissionHost, StorageCapability};

    #[test]
    fn only_explicit_yes_grants() {
        assert!(parse_answer("y\n"));
        assert!(parse_answer(" YES "));
        assert!(!parse_answer("\n"));
        assert!(!parse_answer("no"));
    }

    #[test]
    fn permission_starts_missing_without_assume_yes() {
        let host = PromptPermissionHost::new(false);
        assert!(!host.is_granted(StorageCapability::WriteExternalStorage));
        assert_eq!(host.take_answer(), None);
    }

    #[test]
    fn assume_yes_grants_without_reading_stdin() {
        let host = PromptPermissionHost::new(true);
        let capability = StorageCapability::WriteExternalStorage;
        assert!(host.is_granted(capability));

        host.prompt(capability, 1);
        assert!(host.is_granted(capability));
        assert_eq!(host.take_answer(), Some((1, true)));
        assert_eq!(host.take_answer(), None);
    }
}
