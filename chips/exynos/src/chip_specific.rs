// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Chip-specific constants.
//!
//! Exynos SoCs share the CMU register architecture but differ in their
//! reference clock, in how ACPM addresses the CMU windows and in the set of
//! voltage-margin domains. Each SoC crate implements [`ChipSpecs`] for a
//! marker type and instantiates the generic engine with it.

pub trait ChipSpecs {
    /// Rate of the reference oscillator, in Hz, used as the PLL input when
    /// a PLL has no fixed-rate parent.
    const FIN_HZ: u32;

    /// Difference between an SFR address as seen by ACPM and the same
    /// register's AP physical address.
    const FVMAP_ADDR_OFFSET: u32;

    /// Names of the voltage-margin domains, indexed by margin id.
    const MARGIN_DOMAINS: &'static [&'static str];

    /// Voltage regulator step, in microvolts.
    const VOLT_STEP_UV: i32 = 6250;
}
