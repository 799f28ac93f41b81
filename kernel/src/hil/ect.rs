// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Query interface to the ECT configuration store.
//!
//! ECT is a calibration blob provided by the boot loader. Its binary layout is
//! parsed elsewhere; the clock engine only needs typed, read-only lookups by
//! name. A missing block, domain or table is a normal condition and means the
//! corresponding feature is not configured on this board.

/// The top-level sections of the ECT blob.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EctBlock {
    Dvfs,
    Asv,
    Pll,
    GenParam,
}

/// One DVFS level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DvfsLevel {
    /// Level frequency in kHz.
    pub level_khz: u32,
    /// Whether the level may be used.
    pub level_en: bool,
}

/// A DVFS domain: its levels, sorted from highest to lowest frequency.
#[derive(Clone, Copy, Debug)]
pub struct DvfsDomain<'e> {
    pub max_frequency: u32,
    pub min_frequency: u32,
    pub boot_level_idx: usize,
    pub resume_level_idx: usize,
    pub levels: &'e [DvfsLevel],
}

/// ASV voltage tables for one domain, one table per ASV group, each
/// indexed by DVFS level and given in microvolts.
#[derive(Clone, Copy, Debug)]
pub struct AsvDomain<'e> {
    pub tables: &'e [&'e [u32]],
}

/// One row of a PLL rate table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PllFrequency {
    /// Output frequency in Hz.
    pub frequency: u32,
    pub p: u32,
    pub m: u32,
    pub s: u32,
    pub k: i32,
}

/// A generic parameter table, `num_of_row` rows of `num_of_col` words.
#[derive(Clone, Copy, Debug)]
pub struct GenParamTable<'e> {
    pub num_of_col: usize,
    pub num_of_row: usize,
    pub parameter: &'e [u32],
}

impl<'e> GenParamTable<'e> {
    /// Row `row`, or `None` if the table is shorter than its header says.
    pub fn row(&self, row: usize) -> Option<&'e [u32]> {
        let start = row.checked_mul(self.num_of_col)?;
        self.parameter.get(start..start + self.num_of_col)
    }
}

pub trait EctSource {
    /// Whether the blob carries the given block at all.
    fn get_block(&self, block: EctBlock) -> bool;

    fn dvfs_get_domain(&self, name: &str) -> Option<DvfsDomain<'_>>;

    fn asv_get_domain(&self, name: &str) -> Option<AsvDomain<'_>>;

    /// The rate table of PLL `name`.
    fn pll_get_pll(&self, name: &str) -> Option<&[PllFrequency]>;

    fn gen_param_get_table(&self, name: &str) -> Option<GenParamTable<'_>>;
}
