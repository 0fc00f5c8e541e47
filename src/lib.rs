// Copyright (c) 2025 Casafin contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod config;
pub mod context;
pub mod mapping;
pub mod models;
pub mod remote;
pub mod session;
pub mod stats;
pub mod store;
pub mod utils;
pub mod commands;
