// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Core support crate shared by the Exynos CAL chip crates.
//!
//! This crate holds the pieces that are not specific to any one SoC: the
//! standard error type, the `debug!` output path, the hardware interface
//! layer (HIL) traits through which the clock engine reaches registers,
//! timers, the ACPM co-processor, the ECT configuration store and the
//! PMUCAL power sequencer, and a few small utilities.

#![no_std]

#[macro_use]
pub mod debug;
pub mod errorcode;
pub mod hil;
pub mod utilities;

pub use crate::errorcode::ErrorCode;
