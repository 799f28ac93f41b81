// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Virtual clocks and DVFS domains.
//!
//! A vclk groups clock nodes (its list) and, for rate-controlled kinds, a
//! LUT giving the value of every member at each supported rate. Rates are
//! in kHz and LUT rows are sorted by descending rate; a request snaps down
//! to the first row not above it.
//!
//! Rate changes are applied in an order that never lets a consumer see a
//! clock above both the old and the new rate:
//!
//! ```text
//! dividers up -> PLLs down -> muxes -> PLLs up -> dividers down
//! ```
//!
//! Domains with a switch path park on it while their PLL is reprogrammed,
//! and domains with an explicit sequence apply it step by step instead.
//!
//! Gate vclks have no LUT; they are switched on in list order and off in
//! reverse list order.

use alloc::boxed::Box;
use core::cell::{Cell, OnceCell};

use kernel::debug;
use kernel::hil::ect::{EctBlock, EctSource};
use kernel::ErrorCode;

use crate::chip_specific::ChipSpecs;
use crate::cmucal::{
    try_collect, ClockId, ClockType, SeqDesc, SwitchDesc, TransOpt, VclkDesc, VclkKind,
};
use crate::config::CONFIG;
use crate::ra::Ra;

/// One operating point of a vclk.
#[derive(Debug, PartialEq, Eq)]
pub struct LutRow {
    /// kHz.
    pub rate: u32,
    /// One value per list member: kHz for PLLs, the raw value otherwise.
    pub params: Box<[u32]>,
}

/// How a vclk moves between LUT rows, fixed when the vclk is bound.
#[derive(Clone, Copy, Debug)]
pub enum TransitionStrategy {
    Sequenced(&'static [SeqDesc]),
    SwitchCapable(&'static [SwitchDesc]),
    Default,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Phase {
    Oneshot,
    Switch,
    Restore,
}

pub struct Vclk {
    desc: &'static VclkDesc,
    strategy: TransitionStrategy,
    list: OnceCell<Box<[ClockId]>>,
    lut: OnceCell<Box<[LutRow]>>,
    vrate: Cell<u32>,
    max_freq: Cell<u32>,
    min_freq: Cell<u32>,
    boot_freq: Cell<u32>,
    resume_freq: Cell<u32>,
    asv_table: Box<[u32]>,
}

impl Vclk {
    /// Build a vclk from its static description, merging the ECT tables
    /// named by `desc.ect` when they exist.
    pub(crate) fn bind(
        desc: &'static VclkDesc,
        ect: Option<&dyn EctSource>,
        asv_group: usize,
    ) -> Result<Vclk, ErrorCode> {
        let strategy = if !desc.seq.is_empty() {
            TransitionStrategy::Sequenced(desc.seq)
        } else if !desc.switches.is_empty() {
            TransitionStrategy::SwitchCapable(desc.switches)
        } else {
            TransitionStrategy::Default
        };

        let ect_name = desc.ect.unwrap_or(desc.name);
        let asv_table = match ect
            .filter(|ect| ect.get_block(EctBlock::Asv))
            .and_then(|ect| ect.asv_get_domain(ect_name))
            .and_then(|domain| domain.tables.get(asv_group).copied())
        {
            Some(table) => try_collect(table.len(), table.iter().map(|&uv| Ok(uv)))?,
            None => Box::default(),
        };

        let vclk = Vclk {
            desc,
            strategy,
            list: OnceCell::new(),
            lut: OnceCell::new(),
            vrate: Cell::new(0),
            max_freq: Cell::new(0),
            min_freq: Cell::new(0),
            boot_freq: Cell::new(0),
            resume_freq: Cell::new(0),
            asv_table,
        };

        if !desc.list.is_empty() {
            vclk.bind_members(try_collect(
                desc.list.len(),
                desc.list.iter().map(|&id| Ok(id)),
            )?)?;
        }

        let from_ect = match ect
            .filter(|ect| ect.get_block(EctBlock::GenParam))
            .and_then(|ect| ect.gen_param_get_table(ect_name))
        {
            Some(table) if table.num_of_col == desc.list.len() + 1 => Some(try_collect(
                table.num_of_row,
                (0..table.num_of_row).map(|i| {
                    let row = table.row(i).ok_or(ErrorCode::INVAL)?;
                    Ok(LutRow {
                        rate: row[0],
                        params: try_collect(row.len() - 1, row[1..].iter().map(|&v| Ok(v)))?,
                    })
                }),
            )?),
            Some(table) => {
                debug!(
                    "vclk: {} ECT table has {} columns, list has {} members",
                    desc.name,
                    table.num_of_col,
                    desc.list.len()
                );
                None
            }
            None => None,
        };
        let lut = match from_ect {
            Some(lut) => Some(lut),
            None if !desc.lut.is_empty() => Some(try_collect(
                desc.lut.len(),
                desc.lut.iter().map(|row| {
                    Ok(LutRow {
                        rate: row.rate,
                        params: try_collect(row.params.len(), row.params.iter().map(|&v| Ok(v)))?,
                    })
                }),
            )?),
            None => None,
        };
        if let Some(lut) = lut {
            vclk.bind_lut(lut)?;
        }

        if let Some(domain) = ect
            .filter(|ect| ect.get_block(EctBlock::Dvfs))
            .and_then(|ect| ect.dvfs_get_domain(ect_name))
        {
            let level = |idx: usize| {
                domain
                    .levels
                    .get(idx)
                    .map_or(domain.max_frequency, |level| level.level_khz)
            };
            vclk.max_freq.set(domain.max_frequency);
            vclk.min_freq.set(domain.min_frequency);
            vclk.boot_freq.set(level(domain.boot_level_idx));
            vclk.resume_freq.set(level(domain.resume_level_idx));
        }

        Ok(vclk)
    }

    pub fn id(&self) -> ClockId {
        self.desc.id
    }

    pub fn name(&self) -> &'static str {
        self.desc.name
    }

    pub fn desc(&self) -> &'static VclkDesc {
        self.desc
    }

    pub fn kind(&self) -> Option<VclkKind> {
        self.desc.id.vclk_kind()
    }

    pub fn strategy(&self) -> TransitionStrategy {
        self.strategy
    }

    /// Member nodes, empty until bound.
    pub fn list(&self) -> &[ClockId] {
        match self.list.get() {
            Some(list) => &list[..],
            None => &[],
        }
    }

    /// The LUT, if one is bound.
    pub fn lut(&self) -> Option<&[LutRow]> {
        self.lut.get().map(|lut| &lut[..]).filter(|lut| !lut.is_empty())
    }

    /// The first row not above `rate`.
    pub fn get_lut(&self, rate: u32) -> Option<&LutRow> {
        self.lut()?.iter().find(|row| row.rate <= rate)
    }

    /// The last rate set, in kHz.
    pub fn rate(&self) -> u32 {
        self.vrate.get()
    }

    /// Record a rate applied by another agent.
    pub(crate) fn cache_rate(&self, rate: u32) {
        self.vrate.set(rate);
    }

    pub fn max_freq(&self) -> u32 {
        self.max_freq.get()
    }

    pub fn min_freq(&self) -> u32 {
        self.min_freq.get()
    }

    pub fn boot_freq(&self) -> u32 {
        self.boot_freq.get()
    }

    pub fn resume_freq(&self) -> u32 {
        self.resume_freq.get()
    }

    /// Voltages of this part's ASV group, one per LUT level.
    pub fn asv_table(&self) -> &[u32] {
        &self.asv_table
    }

    /// Attach the member list. Only possible once.
    pub fn bind_members(&self, list: Box<[ClockId]>) -> Result<(), ErrorCode> {
        self.list.set(list).map_err(|_| ErrorCode::ALREADY)
    }

    /// Attach the LUT. Every row must have one value per member. Frequency
    /// bounds not provided by ECT are taken from the LUT.
    pub fn bind_lut(&self, lut: Box<[LutRow]>) -> Result<(), ErrorCode> {
        let members = self.list().len();
        if let Some(row) = lut.iter().find(|row| row.params.len() != members) {
            debug!(
                "vclk: {} row {} has {} values for {} members",
                self.desc.name,
                row.rate,
                row.params.len(),
                members
            );
            return Err(ErrorCode::INVAL);
        }
        if let (Some(first), Some(last)) = (lut.first(), lut.last()) {
            for (cell, rate) in [
                (&self.max_freq, first.rate),
                (&self.min_freq, last.rate),
                (&self.boot_freq, first.rate),
                (&self.resume_freq, first.rate),
            ] {
                if cell.get() == 0 {
                    cell.set(rate);
                }
            }
        }
        self.lut.set(lut).map_err(|_| ErrorCode::ALREADY)
    }
}

/// Drives vclks through the register-access engine.
///
/// Callers must serialize operations on the same vclk.
pub struct VclkEngine<'a, C: ChipSpecs> {
    ra: &'a Ra<'a, C>,
}

impl<'a, C: ChipSpecs> VclkEngine<'a, C> {
    pub fn new(ra: &'a Ra<'a, C>) -> VclkEngine<'a, C> {
        VclkEngine { ra }
    }

    pub fn ra(&self) -> &'a Ra<'a, C> {
        self.ra
    }

    pub fn vclk(&self, id: ClockId) -> Result<&'a Vclk, ErrorCode> {
        self.ra.registry().vclk(id).ok_or_else(|| {
            debug!("vclk: no vclk {}", id);
            ErrorCode::BADID
        })
    }

    /// Cache the current rate of every vclk with a LUT.
    pub fn init(&self) {
        for kind in [VclkKind::Common, VclkKind::Dfs, VclkKind::Acpm] {
            for vclk in self.ra.registry().vclks(kind) {
                vclk.vrate.set(self.read_rate(vclk));
            }
        }
    }

    /// Move the vclk to the LUT row for `rate`, parking on and leaving the
    /// switch path if it has one. Returns the rate reached, or 0 if the
    /// vclk has no LUT.
    pub fn set_rate(&self, id: ClockId, rate: u32) -> Result<u32, ErrorCode> {
        self.transition(self.vclk(id)?, rate, Phase::Oneshot)
    }

    /// First half of a split transition: park on the switch path at a rate
    /// no higher than the current or requested one.
    pub fn set_rate_switch(&self, id: ClockId, rate: u32) -> Result<u32, ErrorCode> {
        self.transition(self.vclk(id)?, rate, Phase::Switch)
    }

    /// Second half of a split transition: reprogram the PLLs while parked,
    /// then leave the switch path.
    pub fn set_rate_restore(&self, id: ClockId, rate: u32) -> Result<u32, ErrorCode> {
        self.transition(self.vclk(id)?, rate, Phase::Restore)
    }

    fn transition(&self, vclk: &Vclk, rate: u32, phase: Phase) -> Result<u32, ErrorCode> {
        if vclk.lut().is_none() {
            return Ok(0);
        }
        let row = vclk.get_lut(rate).ok_or_else(|| {
            debug!("vclk: {} has no level for {}", vclk.name(), rate);
            ErrorCode::BADID
        })?;
        if CONFIG.trace_transitions {
            debug!("vclk: {} {} -> {}", vclk.name(), vclk.rate(), row.rate);
        }

        let list = vclk.list();
        let params = &row.params[..];
        match vclk.strategy {
            TransitionStrategy::Sequenced(seq) => {
                self.ra.set_clk_by_seq(list, params, seq);
                vclk.vrate.set(row.rate);
            }
            TransitionStrategy::SwitchCapable(switches) => {
                if phase != Phase::Restore {
                    self.park(vclk, row, switches);
                }
                if phase != Phase::Switch {
                    self.unpark(vclk, row, switches);
                }
            }
            TransitionStrategy::Default => {
                self.ra.set_clk_by_type(list, params, ClockType::Div, TransOpt::High);
                self.ra.set_clk_by_type(list, params, ClockType::Pll, TransOpt::Low);
                self.ra.set_clk_by_type(list, params, ClockType::Mux, TransOpt::Force);
                self.ra.set_clk_by_type(list, params, ClockType::Pll, TransOpt::High);
                self.ra.set_clk_by_type(list, params, ClockType::Div, TransOpt::Low);
                vclk.vrate.set(row.rate);
            }
        }
        Ok(vclk.vrate.get())
    }

    fn park(&self, vclk: &Vclk, row: &LutRow, switches: &[SwitchDesc]) {
        let list = vclk.list();
        let target = vclk.rate().max(row.rate);
        let mut parked = vclk.rate();

        self.ra.set_clk_by_type(list, &row.params, ClockType::Div, TransOpt::High);
        for info in switches {
            // Every switch step is above the target: stay on the PLL.
            if !info.lut.iter().any(|step| step.rate <= target) {
                continue;
            }
            parked = self.ra.set_rate_switch(info, target);
            self.ra.select_switch_pll(info, true);
        }
        self.ra.set_clk_by_type(list, &row.params, ClockType::Div, TransOpt::Low);
        vclk.vrate.set(parked);
    }

    fn unpark(&self, vclk: &Vclk, row: &LutRow, switches: &[SwitchDesc]) {
        let list = vclk.list();

        self.ra.set_clk_by_type(list, &row.params, ClockType::Pll, TransOpt::Force);
        self.ra.set_clk_by_type(list, &row.params, ClockType::Mux, TransOpt::Force);
        self.ra.set_clk_by_type(list, &row.params, ClockType::Div, TransOpt::High);
        for info in switches {
            self.ra.select_switch_pll(info, false);
        }
        self.ra.set_clk_by_type(list, &row.params, ClockType::Div, TransOpt::Low);
        vclk.vrate.set(row.rate);
    }

    /// The rate of the LUT row matching the hardware exactly, the parked
    /// rate while on a switch path, or 0.
    pub fn recalc_rate(&self, id: ClockId) -> Result<u32, ErrorCode> {
        Ok(self.read_rate(self.vclk(id)?))
    }

    fn read_rate(&self, vclk: &Vclk) -> u32 {
        let lut = match vclk.lut() {
            Some(lut) => lut,
            None => return 0,
        };
        if let TransitionStrategy::SwitchCapable(switches) = vclk.strategy {
            if switches
                .iter()
                .any(|info| self.ra.get_value(info.switch_mux) != 0)
            {
                return vclk.rate();
            }
        }
        lut.iter()
            .find(|row| self.ra.compare_clk_list(&row.params, vclk.list()))
            .map_or(0, |row| row.rate)
    }

    pub fn set_enable(&self, id: ClockId) -> Result<(), ErrorCode> {
        self.ra.set_list_enable(self.vclk(id)?.list())
    }

    pub fn set_disable(&self, id: ClockId) -> Result<(), ErrorCode> {
        self.ra.set_list_disable(self.vclk(id)?.list())
    }

    /// Whether every gate and user mux of the vclk passes its clock.
    pub fn is_enabled(&self, id: ClockId) -> Result<bool, ErrorCode> {
        let mut gated = self
            .vclk(id)?
            .list()
            .iter()
            .filter(|id| id.is(ClockType::Gate) || id.is_user_mux())
            .peekable();
        Ok(gated.peek().is_some() && gated.all(|&id| self.ra.get_value(id) != 0))
    }

    /// Hand every QCH and gate of the vclk to hardware auto clock gating,
    /// or take them back.
    pub fn qch_init(&self, id: ClockId, hwacg: bool) -> Result<(), ErrorCode> {
        let mut result = Ok(());
        for &member in self.vclk(id)?.list() {
            let step = if member.is(ClockType::Qch) {
                self.ra.set_qch(member, hwacg, true, None)
            } else if member.is(ClockType::Gate) {
                self.ra.set_enable_hwacg(member, hwacg)
            } else {
                continue;
            };
            if step.is_err() {
                result = step;
            }
        }
        result
    }

    pub fn get_rate(&self, id: ClockId) -> Result<u32, ErrorCode> {
        Ok(self.vclk(id)?.rate())
    }

    pub fn get_max_freq(&self, id: ClockId) -> Result<u32, ErrorCode> {
        Ok(self.vclk(id)?.max_freq())
    }

    pub fn get_min_freq(&self, id: ClockId) -> Result<u32, ErrorCode> {
        Ok(self.vclk(id)?.min_freq())
    }

    pub fn get_boot_freq(&self, id: ClockId) -> Result<u32, ErrorCode> {
        Ok(self.vclk(id)?.boot_freq())
    }

    pub fn get_resume_freq(&self, id: ClockId) -> Result<u32, ErrorCode> {
        Ok(self.vclk(id)?.resume_freq())
    }

    /// Number of LUT levels.
    pub fn get_lv_num(&self, id: ClockId) -> Result<usize, ErrorCode> {
        Ok(self.vclk(id)?.lut().map_or(0, |lut| lut.len()))
    }

    /// Copy the LUT rates into `table`, returning how many were written.
    pub fn get_rate_table(&self, id: ClockId, table: &mut [u32]) -> Result<usize, ErrorCode> {
        let lut = self.vclk(id)?.lut().unwrap_or(&[]);
        let n = lut.len().min(table.len());
        for (dst, row) in table.iter_mut().zip(lut) {
            *dst = row.rate;
        }
        Ok(n)
    }

    /// Copy the ASV voltages into `table`, returning how many were written.
    pub fn get_asv_table(&self, id: ClockId, table: &mut [u32]) -> Result<usize, ErrorCode> {
        let asv = self.vclk(id)?.asv_table();
        let n = asv.len().min(table.len());
        table[..n].copy_from_slice(&asv[..n]);
        Ok(n)
    }
}
