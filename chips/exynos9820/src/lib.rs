// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Exynos 9820 clock tree.
//!
//! The CMUCAL engine lives in the `exynos` crate; this crate only provides
//! the SoC's tables ([`cmu::SOC`]) and its [`ChipSpecs`](exynos::chip_specific::ChipSpecs)
//! implementation ([`chip::Exynos9820`]).

#![no_std]

pub use exynos::{cal_if, chip_specific, cmucal, ect, fvmap, pll_spec, ra, sfr, vclk};

pub mod chip;
pub mod cmu;

pub use crate::chip::Exynos9820;
pub use crate::cmu::SOC;
