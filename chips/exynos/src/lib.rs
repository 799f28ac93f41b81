// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Generic CMUCAL clock engine for Exynos SoCs.
//!
//! The SoC crates describe their clock tree as static tables ([`cmucal`]).
//! At boot those tables are frozen into a [`cmucal::Registry`] with every
//! register field resolved against a mapped SFR window. On top of the
//! registry:
//!
//! - [`ra`] performs primitive operations on single nodes (mux select,
//!   divider ratio, gate, PLL program, QCH).
//! - [`pll_spec`] searches P/M/S/K values for PLL rates missing from the
//!   rate tables.
//! - [`vclk`] drives virtual clocks and DVFS domains through ordered
//!   transitions.
//! - [`fvmap`] binds the frequency/voltage map shared with ACPM.
//! - [`cal_if`] is the facade used by the rest of the kernel.

#![no_std]

extern crate alloc;

pub mod cal_if;
pub mod chip_specific;
pub mod cmucal;
pub mod ect;
pub mod fvmap;
pub mod pll_spec;
pub mod ra;
pub mod sfr;
pub mod vclk;

mod config;

#[cfg(test)]
mod test_soc;
