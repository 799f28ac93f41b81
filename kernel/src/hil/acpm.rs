// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Interface to the ACPM co-processor.
//!
//! Some DVFS domains are owned by the always-on ACPM core. Requests for those
//! domains are forwarded over an IPC channel instead of touching registers
//! locally. The transport itself lives outside of this crate.

use crate::ErrorCode;

pub trait AcpmChannel {
    /// Request a new rate for the ACPM-owned domain `id`.
    fn send(&self, id: u32, rate_khz: u32) -> Result<(), ErrorCode>;

    /// Ask the co-processor for the current rate of domain `id`.
    fn get_rate(&self, id: u32) -> Result<u32, ErrorCode>;

    /// Apply an additive voltage margin, in microvolts, to domain `id`.
    fn set_volt_margin(&self, id: u32, margin_uv: i32) -> Result<(), ErrorCode>;

    /// Notify the co-processor of a new percentage margin for domain `id`.
    fn set_percent_margin(&self, id: u32, percent: i32) -> Result<(), ErrorCode>;
}
