// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::image::ImageResolution;
use crate::invocation::SoftPolicyWarning;
use std::time::Duration;

/// Progress reported while a run is in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    ImageReady { name: String, resolution: ImageResolution },
    ServicesStarted { names: Vec<String> },
    PrimaryStarted { container: String },
    PolicyIgnored(SoftPolicyWarning),
    TaskStarted { task: String },
    TaskFinished { task: String, exit_code: i32, duration: Duration },
    CleanedUp { removed: usize },
}
