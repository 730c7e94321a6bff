// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Classification of container engine failures.

/// Known failure kinds reported by the engine on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NameConflict,
    ImageNotFound,
    PortConflict,
    PlatformMismatch,
    Other,
}

dvbx_core::simple_display! {
    ErrorCategory {
        NameConflict => "name conflict",
        ImageNotFound => "image not found",
        PortConflict => "port conflict",
        PlatformMismatch => "platform mismatch",
        Other => "error",
    }
}

const PATTERNS: &[(&str, ErrorCategory)] = &[
    ("conflict. the container name", ErrorCategory::NameConflict),
    ("is already in use by container", ErrorCategory::NameConflict),
    ("no such image", ErrorCategory::ImageNotFound),
    ("unable to find image", ErrorCategory::ImageNotFound),
    ("pull access denied", ErrorCategory::ImageNotFound),
    ("port is already allocated", ErrorCategory::PortConflict),
    ("address already in use", ErrorCategory::PortConflict),
    ("does not match the detected host platform", ErrorCategory::PlatformMismatch),
];

impl ErrorCategory {
    /// Classify raw stderr text. Matching is case-insensitive.
    pub fn from_stderr(stderr: &str) -> Self {
        let lower = stderr.to_lowercase();
        PATTERNS
            .iter()
            .find(|(needle, _)| lower.contains(needle))
            .map(|(_, category)| *category)
            .unwrap_or(ErrorCategory::Other)
    }

    /// Message shown to the user in place of the raw engine output.
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCategory::NameConflict => {
                "A dvbx container with this name already exists. Run 'dvbx stop' to remove leftover containers."
            }
            ErrorCategory::ImageNotFound => {
                "Image not found. Check the image name or your registry credentials."
            }
            ErrorCategory::PortConflict => {
                "Port is already allocated. Another process or container is using one of the configured ports."
            }
            ErrorCategory::PlatformMismatch => {
                "Image platform does not match the host. Set 'platform' in the configuration."
            }
            ErrorCategory::Other => "The container runtime reported an error.",
        }
    }
}

#[cfg(test)]
#[path = "categorize_tests.rs"]
mod tests;
