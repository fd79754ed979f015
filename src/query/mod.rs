// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Formtree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Formtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over a form graph.
//!
//! Every walk threads a visited set, so cycles and shared branches are harmless.

pub mod chain;
pub mod traversal;

pub use chain::{chains, draggable_ids, linear_chain};
pub use traversal::{
    count_descendants, descendants, render_walk, unreachable_steps, visit, RenderEntry,
};
