// Copyright (c) The esop-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod assignments;
mod display;
mod esop_impl;

pub use assignments::*;
pub use display::*;
pub use esop_impl::*;
