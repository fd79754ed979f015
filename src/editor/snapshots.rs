// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Formtree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Formtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use crate::model::{Step, StepId};

/// Per-step edit baselines.
///
/// A baseline is captured the first time a step is selected and stays put until it is taken by a
/// revert. Selecting the step again, or committing, never refreshes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshots {
    by_step: BTreeMap<StepId, Step>,
}

impl Snapshots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a deep copy of `step` unless a baseline for its id already exists.
    ///
    /// Returns `true` when a new baseline was captured.
    pub fn capture(&mut self, step: &Step) -> bool {
        if self.by_step.contains_key(step.id()) {
            return false;
        }
        self.by_step.insert(step.id().clone(), step.clone());
        true
    }

    pub fn get(&self, step_id: &StepId) -> Option<&Step> {
        self.by_step.get(step_id)
    }

    pub fn contains(&self, step_id: &StepId) -> bool {
        self.by_step.contains_key(step_id)
    }

    /// Removes and returns the baseline so the next selection captures a fresh one.
    pub fn take(&mut self, step_id: &StepId) -> Option<Step> {
        self.by_step.remove(step_id)
    }

    pub fn len(&self) -> usize {
        self.by_step.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_step.is_empty()
    }
}
