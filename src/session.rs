//! Per-client application state.
//!
//! A session is a small value object `{ page, role }`. Handlers read the
//! current value, apply one transition, and store the result; nothing else
//! about the session is remembered between requests.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Page, Role};

pub const WELCOME_TAGLINE: &str = "Your Clinical Decision Support System awaits.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Cannot {action} while on the {page} page")]
    InvalidTransition { page: Page, action: &'static str },

    #[error("Select a role before entering")]
    RoleNotSelected,

    #[error("Role must be doctor or patient")]
    UnsetRoleRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub page: Page,
    pub role: Role,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            page: Page::Welcome,
            role: Role::Unset,
        }
    }
}

impl AppState {
    /// Choose who is using the tool. Only allowed on the welcome page.
    pub fn select_role(self, role: Role) -> Result<Self, SessionError> {
        if self.page != Page::Welcome {
            return Err(SessionError::InvalidTransition {
                page: self.page,
                action: "change role",
            });
        }
        if role == Role::Unset {
            return Err(SessionError::UnsetRoleRequested);
        }
        Ok(Self { role, ..self })
    }

    /// Move from the welcome page to the main form.
    pub fn enter(self) -> Result<Self, SessionError> {
        if self.page != Page::Welcome {
            return Err(SessionError::InvalidTransition {
                page: self.page,
                action: "enter",
            });
        }
        if self.role == Role::Unset {
            return Err(SessionError::RoleNotSelected);
        }
        Ok(Self {
            page: Page::Main,
            ..self
        })
    }

    /// Return to the welcome page, keeping the selected role.
    pub fn leave(self) -> Result<Self, SessionError> {
        if self.page != Page::Main {
            return Err(SessionError::InvalidTransition {
                page: self.page,
                action: "leave",
            });
        }
        Ok(Self {
            page: Page::Welcome,
            ..self
        })
    }

    pub fn reset(self) -> Self {
        Self::default()
    }

    /// Whether checks may run in this state.
    pub fn can_run_checks(&self) -> bool {
        self.page == Page::Main && self.role != Role::Unset
    }

    pub fn greeting(&self) -> String {
        match self.role.title() {
            Some(title) => format!("Welcome, {title}!"),
            None => "Welcome!".to_string(),
        }
    }
}
