// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Interfaces for busy-wait delays and timestamps.

/// A busy-waiting delay source.
///
/// Implementations must spin rather than yield: the delays used by the
/// clock engine are shorter than a scheduling quantum.
pub trait Delay {
    /// Wait at least `us` microseconds.
    fn udelay(&self, us: u32);
}

/// A free-running monotonic timestamp.
pub trait Time {
    /// Current time in microseconds.
    fn now_us(&self) -> u64;
}
