// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! An ECT store backed by static tables.
//!
//! Boards whose boot loader does not pass an ECT blob, and the tests, use
//! this in place of a parsed blob. A block is present when it has at least
//! one entry.

use kernel::hil::ect::{
    AsvDomain, DvfsDomain, DvfsLevel, EctBlock, EctSource, GenParamTable, PllFrequency,
};

pub struct EctDvfsDomain {
    pub name: &'static str,
    pub max_frequency: u32,
    pub min_frequency: u32,
    pub boot_level_idx: usize,
    pub resume_level_idx: usize,
    pub levels: &'static [DvfsLevel],
}

pub struct EctAsvDomain {
    pub name: &'static str,
    /// One voltage table per ASV group.
    pub tables: &'static [&'static [u32]],
}

pub struct EctPll {
    pub name: &'static str,
    pub frequencies: &'static [PllFrequency],
}

pub struct EctGenParam {
    pub name: &'static str,
    pub num_of_col: usize,
    pub num_of_row: usize,
    pub parameter: &'static [u32],
}

#[derive(Default)]
pub struct EctTables {
    pub dvfs: &'static [EctDvfsDomain],
    pub asv: &'static [EctAsvDomain],
    pub pll: &'static [EctPll],
    pub gen_param: &'static [EctGenParam],
}

impl EctSource for EctTables {
    fn get_block(&self, block: EctBlock) -> bool {
        match block {
            EctBlock::Dvfs => !self.dvfs.is_empty(),
            EctBlock::Asv => !self.asv.is_empty(),
            EctBlock::Pll => !self.pll.is_empty(),
            EctBlock::GenParam => !self.gen_param.is_empty(),
        }
    }

    fn dvfs_get_domain(&self, name: &str) -> Option<DvfsDomain<'_>> {
        self.dvfs
            .iter()
            .find(|domain| domain.name == name)
            .map(|domain| DvfsDomain {
                max_frequency: domain.max_frequency,
                min_frequency: domain.min_frequency,
                boot_level_idx: domain.boot_level_idx,
                resume_level_idx: domain.resume_level_idx,
                levels: domain.levels,
            })
    }

    fn asv_get_domain(&self, name: &str) -> Option<AsvDomain<'_>> {
        self.asv
            .iter()
            .find(|domain| domain.name == name)
            .map(|domain| AsvDomain {
                tables: domain.tables,
            })
    }

    fn pll_get_pll(&self, name: &str) -> Option<&[PllFrequency]> {
        self.pll
            .iter()
            .find(|pll| pll.name == name)
            .map(|pll| pll.frequencies)
    }

    fn gen_param_get_table(&self, name: &str) -> Option<GenParamTable<'_>> {
        self.gen_param
            .iter()
            .find(|table| table.name == name)
            .map(|table| GenParamTable {
                num_of_col: table.num_of_col,
                num_of_row: table.num_of_row,
                parameter: table.parameter,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static ECT: EctTables = EctTables {
        dvfs: &[],
        asv: &[],
        pll: &[EctPll {
            name: "PLL_A",
            frequencies: &[PllFrequency {
                frequency: 1_200_000_000,
                p: 13,
                m: 600,
                s: 0,
                k: 0,
            }],
        }],
        gen_param: &[EctGenParam {
            name: "dvfs_a",
            num_of_col: 3,
            num_of_row: 2,
            parameter: &[1_600_000, 1_600_000, 0, 800_000, 800_000, 1],
        }],
    };

    #[test]
    fn lookups_by_name() {
        assert!(ECT.get_block(EctBlock::Pll));
        assert!(!ECT.get_block(EctBlock::Dvfs));
        assert!(ECT.dvfs_get_domain("dvfs_a").is_none());
        assert_eq!(ECT.pll_get_pll("PLL_A").map(|rows| rows.len()), Some(1));
        assert!(ECT.pll_get_pll("PLL_B").is_none());

        let table = ECT.gen_param_get_table("dvfs_a").unwrap();
        assert_eq!(table.row(1), Some(&[800_000, 800_000, 1][..]));
        assert_eq!(table.row(2), None);
    }
}
