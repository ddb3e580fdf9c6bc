//! # View Collaborators
//!
//! The three things the product editor asks of the UI shell: show a toast,
//! change route, and ask the operator a yes/no question.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductEditor                                                          │
//! │     │                                                                   │
//! │     ├── NotificationSink::notify(Toast)    "Product successfully..."    │
//! │     ├── Navigator::navigate(route)         "/admin/allproductslist"     │
//! │     └── Confirmation::confirm(prompt)      "Are you sure ...?" → bool   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{info, warn};

// =============================================================================
// Toasts
// =============================================================================

/// Where toasts appear on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPosition {
    #[default]
    TopRight,
    TopCenter,
    TopLeft,
    BottomRight,
    BottomCenter,
    BottomLeft,
}

impl fmt::Display for ToastPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ToastPosition::TopRight => "top-right",
            ToastPosition::TopCenter => "top-center",
            ToastPosition::TopLeft => "top-left",
            ToastPosition::BottomRight => "bottom-right",
            ToastPosition::BottomCenter => "bottom-center",
            ToastPosition::BottomLeft => "bottom-left",
        };
        f.write_str(name)
    }
}

/// Presentation options shared by every toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastOptions {
    pub position: ToastPosition,
    pub auto_close: Duration,
}

impl Default for ToastOptions {
    fn default() -> Self {
        ToastOptions {
            position: ToastPosition::TopRight,
            auto_close: Duration::from_millis(2000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient message for the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub options: ToastOptions,
}

impl Toast {
    pub fn success(message: impl Into<String>, options: ToastOptions) -> Self {
        Toast {
            kind: ToastKind::Success,
            message: message.into(),
            options,
        }
    }

    pub fn error(message: impl Into<String>, options: ToastOptions) -> Self {
        Toast {
            kind: ToastKind::Error,
            message: message.into(),
            options,
        }
    }
}

// =============================================================================
// Collaborator Traits
// =============================================================================

/// Presents toasts to the operator.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Changes the admin console's current route.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Asks the operator to confirm a destructive action.
pub trait Confirmation: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

// =============================================================================
// Tracing Sink
// =============================================================================

/// A sink that writes toasts to the log, for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Success => info!(
                position = %toast.options.position,
                message = %toast.message,
                "toast"
            ),
            ToastKind::Error => warn!(
                position = %toast.options.position,
                message = %toast.message,
                "toast"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_wire_names() {
        assert_eq!(
            serde_json::to_string(&ToastPosition::TopRight).unwrap(),
            "\"top-right\""
        );
        let parsed: ToastPosition = serde_json::from_str("\"bottom-center\"").unwrap();
        assert_eq!(parsed, ToastPosition::BottomCenter);
        assert_eq!(parsed.to_string(), "bottom-center");
    }

    #[test]
    fn test_toast_constructors() {
        let toast = Toast::error("Delete failed. Try again.", ToastOptions::default());
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.options.auto_close, Duration::from_millis(2000));

        // Logging never panics, whatever the kind.
        TracingSink.notify(toast);
        TracingSink.notify(Toast::success("ok", ToastOptions::default()));
    }
}
