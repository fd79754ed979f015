// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Formtree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Formtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for form graphs on disk.
//!
//! A graph lives in a single JSON file in the camelCase wire shape; writes go through a temp file
//! and an atomic rename.

pub mod graph_file;

pub use graph_file::{GraphFile, StoreError, WriteDurability};
