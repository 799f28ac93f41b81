// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Interface to the PMUCAL power sequencer.
//!
//! The system, CPU and power domain sequences themselves are SoC data driven
//! by a separate driver. The clock facade only forwards requests.

use crate::ErrorCode;

pub trait PowerControl {
    /// Run the PMUCAL initialization sequences.
    fn init(&self) -> Result<(), ErrorCode>;

    fn cpu_enable(&self, cpu: u32) -> Result<(), ErrorCode>;
    fn cpu_disable(&self, cpu: u32) -> Result<(), ErrorCode>;
    fn cpu_is_enabled(&self, cpu: u32) -> bool;

    fn cluster_enable(&self, cluster: u32) -> Result<(), ErrorCode>;
    fn cluster_disable(&self, cluster: u32) -> Result<(), ErrorCode>;
    fn cluster_is_enabled(&self, cluster: u32) -> bool;

    /// Power the domain `id` on or off.
    fn pd_control(&self, id: u32, on: bool) -> Result<(), ErrorCode>;

    /// Whether the domain `id` is currently powered.
    fn pd_status(&self, id: u32) -> bool;
}
