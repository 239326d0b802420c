// Copyright (c) 2018-2022 The Botho Foundation

//! Utilities shared by the crates of the workspace.

#![deny(missing_docs)]

pub mod logger;
