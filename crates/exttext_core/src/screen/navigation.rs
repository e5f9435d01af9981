//! Main/credits navigation.

use serde::{Deserialize, Serialize};

/// Static text shown on the credits screen.
pub const CREDITS_TEXT: &str = "External files demo\n\
Appends text to a file on shared external storage, reads it back, and clears it.\n\
Storage access is gated by the platform write permission.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Main,
    Credits,
}

/// Options-menu entries. Each screen shows the one leading to the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuItem {
    Credits,
    Main,
}

/// Two-level screen stack rooted at `Screen::Main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    stack: Vec<Screen>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            stack: vec![Screen::Main],
        }
    }

    pub fn current(&self) -> Screen {
        self.stack.last().copied().unwrap_or(Screen::Main)
    }

    /// Menu entry available on the current screen.
    pub fn menu(&self) -> MenuItem {
        match self.current() {
            Screen::Main => MenuItem::Credits,
            Screen::Credits => MenuItem::Main,
        }
    }

    /// Applies a menu selection. Returns whether it was handled.
    pub fn select(&mut self, item: MenuItem) -> bool {
        match (self.current(), item) {
            (Screen::Main, MenuItem::Credits) => {
                self.stack.push(Screen::Credits);
                true
            }
            (Screen::Credits, MenuItem::Main) => self.back(),
            _ => false,
        }
    }

    pub fn open_credits(&mut self) -> bool {
        self.select(MenuItem::Credits)
    }

    /// Leaves the credits screen. The main screen is the root and stays.
    pub fn back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }
}
