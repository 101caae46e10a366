// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Utility functions for geometry, text layout and page naming.

pub mod geometry;
pub mod layout;
pub mod naming;
