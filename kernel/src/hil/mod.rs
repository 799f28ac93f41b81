// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Public traits for interfaces between the clock engine and the hardware or
//! firmware services it depends on.

pub mod acpm;
pub mod ect;
pub mod pmucal;
pub mod sfr;
pub mod time;
