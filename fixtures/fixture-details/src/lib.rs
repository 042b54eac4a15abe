// Copyright (c) The esop-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod all;
mod generation;
mod value_generator;

pub use all::*;
pub use generation::*;
pub use value_generator::*;
