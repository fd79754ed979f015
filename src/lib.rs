// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Formtree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Formtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Formtree: the graph engine behind a branching questionnaire builder.
//!
//! Forms are arenas of typed steps ([`model`]) that may branch, rejoin, and loop. Read-only walks
//! live in [`query`], pointer-preserving edits in [`ops`], and the stateful selection/revert
//! session in [`editor`].

pub mod demo;
pub mod editor;
pub mod model;
pub mod ops;
pub mod query;
pub mod store;
pub mod upload;
