// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

dvbx_core::simple_display! {
    Outcome {
        Success => "success",
        Failure => "failure",
    }
}

/// Lifecycle phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    ResolvingConfig,
    Validating,
    StartingServices,
    StartingPrimary,
    RunningTasks,
    CleaningUp,
    Terminal(Outcome),
}

dvbx_core::simple_display! {
    Phase {
        ResolvingConfig => "resolving config",
        Validating => "validating",
        StartingServices => "starting services",
        StartingPrimary => "starting primary",
        RunningTasks => "running tasks",
        CleaningUp => "cleaning up",
        Terminal(..) => "terminal",
    }
}
