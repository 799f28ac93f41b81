// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Interfaces for special function register (SFR) access.
//!
//! An SFR block is one physically contiguous register window of a clock
//! management unit. Every block is mapped once at boot and handed to the
//! clock registry as an [`SfrRegion`]; all register accesses afterwards go
//! through the region, addressed by byte offset.

use crate::ErrorCode;

/// A mapped register window, accessed with 32-bit reads and writes.
pub trait SfrRegion {
    /// Read the 32-bit register at `offset` bytes from the window base.
    fn read32(&self, offset: usize) -> u32;

    /// Write the 32-bit register at `offset` bytes from the window base.
    fn write32(&self, offset: usize, value: u32);
}

/// Maps physical register windows for the lifetime `'a`.
pub trait SfrMapper<'a> {
    /// Map `size` bytes starting at physical address `pa`.
    ///
    /// Returns `None` if the window cannot be mapped.
    fn map(&self, pa: u32, size: u32) -> Option<&'a dyn SfrRegion>;
}

/// Read-modify-write access to PMU registers, which live outside of the CMU
/// windows and are shared with the power management driver.
pub trait PmuUpdate {
    /// Replace the bits selected by `mask` at `offset` with `value`.
    fn update(&self, offset: u32, mask: u32, value: u32) -> Result<(), ErrorCode>;
}
