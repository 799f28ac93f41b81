// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Compile-time configuration of the clock engine.
//!
//! As in the kernel crate, Cargo features are only used to set the fields of
//! the `CONFIG` constant below; the rest of the crate checks `CONFIG` with
//! plain `if` statements so that every path is type-checked.

pub(crate) struct Config {
    /// Whether QCH writes maintain the IGNORE_FORCE_PM_EN bit.
    ///
    /// When enabled, enabling a Q-channel clears its ignore bit and disabling
    /// it sets the bit, so that the power manager does not wait on a
    /// handshake from a clock that was switched off on purpose.
    pub(crate) qch_ignore_support: bool,

    /// Whether every register operation issued during a vclk transition is
    /// printed to the debug output.
    pub(crate) trace_transitions: bool,

    /// Whether every SFR field write is printed with its physical address.
    pub(crate) trace_sfr: bool,
}

pub(crate) const CONFIG: Config = Config {
    qch_ignore_support: cfg!(feature = "qch_ignore"),
    trace_transitions: cfg!(feature = "trace_transitions"),
    trace_sfr: cfg!(feature = "trace_sfr"),
};
