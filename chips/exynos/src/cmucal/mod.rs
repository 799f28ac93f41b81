// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! The clock registry.
//!
//! A SoC describes its clock tree as [`SocTables`]. At boot,
//! [`RegistryBuilder`] maps every SFR block, resolves every register field
//! of every node into an [`SfrBinding`](crate::sfr::SfrBinding) and merges
//! in the ECT tables (PLL rates, DVFS levels, generated vclk parameters).
//! The resulting [`Registry`] is read-only: all mutable clock state lives
//! in the hardware registers, plus the cached rate of each vclk.
//!
//! Nodes are addressed by [`ClockId`]. The type byte selects the table and
//! the index selects the slot; a lookup only succeeds if the node stored in
//! that slot carries exactly the requested id.

use alloc::boxed::Box;
use alloc::vec::Vec;

use kernel::debug;
use kernel::hil::ect::{EctBlock, EctSource};
use kernel::hil::sfr::SfrMapper;
use kernel::ErrorCode;

use crate::pll_spec;
use crate::sfr::SfrBinding;
use crate::vclk::Vclk;

pub mod desc;
pub mod id;
pub mod node;

pub use self::desc::*;
pub use self::id::{sub_type, ClockId, ClockType, VclkKind};
pub use self::node::*;

/// Offsets of the register groups inside every CMU window.
const PLL_CON_WINDOW: core::ops::Range<u32> = 0x0000..0x1000;
const MUX_WINDOW: core::ops::Range<u32> = 0x1000..0x1800;
const DIV_WINDOW: core::ops::Range<u32> = 0x1800..0x2000;
const GATE_WINDOW: core::ops::Range<u32> = 0x2000..0x3000;

pub struct Registry<'a> {
    tables: &'static SocTables,
    blocks: Box<[SfrBlock<'a>]>,
    fixed_rates: Box<[FixedRateClk<'a>]>,
    fixed_factors: Box<[FixedFactorClk<'a>]>,
    plls: Box<[PllClk<'a>]>,
    muxes: Box<[MuxClk<'a>]>,
    divs: Box<[DivClk<'a>]>,
    gates: Box<[GateClk<'a>]>,
    qchs: Box<[QchClk<'a>]>,
    options: Box<[OptionClk<'a>]>,
    clkouts: Box<[ClkoutClk]>,
    vclks: [Box<[Vclk]>; 4],
}

impl<'a> Registry<'a> {
    pub fn tables(&self) -> &'static SocTables {
        self.tables
    }

    /// The node stored under `id`, if any.
    pub fn get_node(&self, id: ClockId) -> Option<ClockNode<'_, 'a>> {
        let idx = id.index();
        let node = match id.clock_type()? {
            ClockType::FixedRate => ClockNode::FixedRate(self.fixed_rates.get(idx)?),
            ClockType::FixedFactor => ClockNode::FixedFactor(self.fixed_factors.get(idx)?),
            ClockType::Pll => ClockNode::Pll(self.plls.get(idx)?),
            ClockType::Mux => ClockNode::Mux(self.muxes.get(idx)?),
            ClockType::Div => ClockNode::Div(self.divs.get(idx)?),
            ClockType::Gate => ClockNode::Gate(self.gates.get(idx)?),
            ClockType::Qch => ClockNode::Qch(self.qchs.get(idx)?),
            ClockType::SfrBlock => ClockNode::SfrBlock(self.blocks.get(idx)?),
            ClockType::Sfr => {
                ClockNode::Sfr(ClockId::sfr(idx as u16), self.tables.sfrs.get(idx)?)
            }
            ClockType::SfrAccess => ClockNode::SfrAccess(
                ClockId::sfr_access(idx as u16),
                self.tables.fields.get(idx)?,
            ),
            ClockType::Vclk => ClockNode::Vclk(self.vclks[id.vclk_kind()?.table()].get(idx)?),
            ClockType::Option => ClockNode::Option(self.options.get(idx)?),
            ClockType::Clkout => ClockNode::Clkout(self.clkouts.get(idx)?),
        };
        if node.id() == id {
            Some(node)
        } else {
            None
        }
    }

    /// Number of nodes of type `ty`. Vclks are counted across all kinds.
    pub fn list_size(&self, ty: ClockType) -> usize {
        match ty {
            ClockType::FixedRate => self.fixed_rates.len(),
            ClockType::FixedFactor => self.fixed_factors.len(),
            ClockType::Pll => self.plls.len(),
            ClockType::Mux => self.muxes.len(),
            ClockType::Div => self.divs.len(),
            ClockType::Gate => self.gates.len(),
            ClockType::Qch => self.qchs.len(),
            ClockType::SfrBlock => self.blocks.len(),
            ClockType::Sfr => self.tables.sfrs.len(),
            ClockType::SfrAccess => self.tables.fields.len(),
            ClockType::Vclk => self.vclks.iter().map(|v| v.len()).sum(),
            ClockType::Option => self.options.len(),
            ClockType::Clkout => self.clkouts.len(),
        }
    }

    pub fn vclk_list_size(&self, kind: VclkKind) -> usize {
        self.vclks[kind.table()].len()
    }

    /// Look a node up by name. The name's prefix picks the table searched.
    pub fn get_id_by_name(&self, name: &str) -> Option<ClockId> {
        if name.starts_with("FF_") {
            return find_by_name(&self.fixed_factors, name, |c| (c.desc.id, c.desc.name));
        }
        if name.contains("MUX") || name.contains("MOUT") {
            find_by_name(&self.muxes, name, |c| (c.desc.id, c.desc.name))
        } else if name.contains("GATE") || name.contains("GOUT") {
            find_by_name(&self.gates, name, |c| (c.desc.id, c.desc.name))
        } else if name.contains("DIV") || name.contains("DOUT") || name.contains("CLKCMU") {
            find_by_name(&self.divs, name, |c| (c.desc.id, c.desc.name))
        } else if name.contains("VCLK") {
            self.vclks
                .iter()
                .find_map(|table| find_by_name(table, name, |v| (v.id(), v.name())))
        } else if name.contains("QCH") {
            find_by_name(&self.qchs, name, |c| (c.desc.id, c.desc.name))
        } else if name.contains("PLL") {
            // Shared PLLs outside of the CPU's control are fixed-rate nodes.
            find_by_name(&self.plls, name, |c| (c.desc.id, c.desc.name))
                .or_else(|| find_by_name(&self.fixed_rates, name, |c| (c.desc.id, c.desc.name)))
        } else if name.contains("IO") || name.contains("OSC") {
            find_by_name(&self.fixed_rates, name, |c| (c.desc.id, c.desc.name))
        } else {
            None
        }
    }

    /// Find the node whose controlling register sits at physical address
    /// `pa`. Only PLLs, muxes, dividers and gates can be found this way.
    pub fn get_id_by_register_address(&self, pa: u32) -> Option<ClockId> {
        let window = pa & 0xFFFF;
        if PLL_CON_WINDOW.contains(&window) {
            self.plls
                .iter()
                .find(|pll| pll.enable.pa() == pa)
                .map(|pll| pll.desc.id)
                .or_else(|| {
                    self.muxes
                        .iter()
                        .find(|mux| mux.desc.id.is_user_mux() && mux.select.pa() == pa)
                        .map(|mux| mux.desc.id)
                })
        } else if MUX_WINDOW.contains(&window) {
            self.muxes
                .iter()
                .find(|mux| !mux.desc.id.is_user_mux() && mux.select.pa() == pa)
                .map(|mux| mux.desc.id)
        } else if DIV_WINDOW.contains(&window) {
            self.divs
                .iter()
                .find(|div| div.ratio.pa() == pa)
                .map(|div| div.desc.id)
        } else if GATE_WINDOW.contains(&window) {
            self.gates
                .iter()
                .find(|gate| gate.cg_value.pa() == pa)
                .map(|gate| gate.desc.id)
        } else {
            None
        }
    }

    pub fn fixed_rate(&self, id: ClockId) -> Option<&FixedRateClk<'a>> {
        match self.get_node(id)? {
            ClockNode::FixedRate(c) => Some(c),
            _ => None,
        }
    }

    pub fn fixed_factor(&self, id: ClockId) -> Option<&FixedFactorClk<'a>> {
        match self.get_node(id)? {
            ClockNode::FixedFactor(c) => Some(c),
            _ => None,
        }
    }

    pub fn pll(&self, id: ClockId) -> Option<&PllClk<'a>> {
        match self.get_node(id)? {
            ClockNode::Pll(c) => Some(c),
            _ => None,
        }
    }

    pub fn mux(&self, id: ClockId) -> Option<&MuxClk<'a>> {
        match self.get_node(id)? {
            ClockNode::Mux(c) => Some(c),
            _ => None,
        }
    }

    pub fn div(&self, id: ClockId) -> Option<&DivClk<'a>> {
        match self.get_node(id)? {
            ClockNode::Div(c) => Some(c),
            _ => None,
        }
    }

    pub fn gate(&self, id: ClockId) -> Option<&GateClk<'a>> {
        match self.get_node(id)? {
            ClockNode::Gate(c) => Some(c),
            _ => None,
        }
    }

    pub fn qch(&self, id: ClockId) -> Option<&QchClk<'a>> {
        match self.get_node(id)? {
            ClockNode::Qch(c) => Some(c),
            _ => None,
        }
    }

    pub fn option(&self, id: ClockId) -> Option<&OptionClk<'a>> {
        match self.get_node(id)? {
            ClockNode::Option(c) => Some(c),
            _ => None,
        }
    }

    pub fn clkout(&self, id: ClockId) -> Option<&ClkoutClk> {
        match self.get_node(id)? {
            ClockNode::Clkout(c) => Some(c),
            _ => None,
        }
    }

    pub fn vclk(&self, id: ClockId) -> Option<&Vclk> {
        match self.get_node(id)? {
            ClockNode::Vclk(c) => Some(c),
            _ => None,
        }
    }

    pub fn vclks(&self, kind: VclkKind) -> &[Vclk] {
        &self.vclks[kind.table()]
    }

    pub fn plls(&self) -> &[PllClk<'a>] {
        &self.plls
    }
}

fn find_by_name<T>(
    table: &[T],
    name: &str,
    key: impl Fn(&T) -> (ClockId, &'static str),
) -> Option<ClockId> {
    table.iter().map(key).find(|&(_, n)| n == name).map(|(id, _)| id)
}

/// Collect `iter` into a boxed slice, reporting allocation failure instead
/// of aborting.
pub(crate) fn try_collect<T>(
    len: usize,
    iter: impl Iterator<Item = Result<T, ErrorCode>>,
) -> Result<Box<[T]>, ErrorCode> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|_| ErrorCode::NOMEM)?;
    for item in iter {
        v.push(item?);
    }
    Ok(v.into_boxed_slice())
}

/// Freezes a SoC's [`SocTables`] into a [`Registry`].
///
/// ```rust,ignore
/// let registry = RegistryBuilder::new(&exynos9820::SOC)
///     .ect(&ect)
///     .asv_group(boot.asv_group)
///     .build(&mapper)?;
/// ```
pub struct RegistryBuilder<'e> {
    tables: &'static SocTables,
    ect: Option<&'e dyn EctSource>,
    asv_group: usize,
}

impl<'e> RegistryBuilder<'e> {
    pub fn new(tables: &'static SocTables) -> RegistryBuilder<'e> {
        RegistryBuilder {
            tables,
            ect: None,
            asv_group: 0,
        }
    }

    /// Merge the tables of a parsed ECT blob.
    pub fn ect(mut self, ect: &'e dyn EctSource) -> Self {
        self.ect = Some(ect);
        self
    }

    /// ASV group of this part, selecting the voltage table of each domain.
    pub fn asv_group(mut self, group: usize) -> Self {
        self.asv_group = group;
        self
    }

    pub fn build<'a>(self, mapper: &dyn SfrMapper<'a>) -> Result<Registry<'a>, ErrorCode> {
        let t = self.tables;

        let blocks = try_collect(
            t.blocks.len(),
            t.blocks.iter().enumerate().map(|(i, desc)| {
                let region = mapper.map(desc.pa, desc.size).ok_or_else(|| {
                    debug!("cmucal: cannot map {} at {:#x}", desc.name, desc.pa);
                    ErrorCode::NOMEM
                })?;
                Ok(SfrBlock {
                    id: ClockId::sfr_block(i as u16),
                    desc,
                    region,
                })
            }),
        )?;

        let bind = |idx: FieldIdx| -> Result<SfrBinding<'a>, ErrorCode> {
            let field = t.fields.get(idx as usize).ok_or(ErrorCode::INVAL)?;
            let sfr = t.sfrs.get(field.sfr as usize).ok_or(ErrorCode::INVAL)?;
            let block = blocks.get(sfr.block as usize).ok_or(ErrorCode::INVAL)?;
            if sfr.offset >= block.desc.size {
                debug!("cmucal: {} outside of {}", sfr.name, block.desc.name);
                return Err(ErrorCode::INVAL);
            }
            Ok(SfrBinding::new(
                block.region,
                sfr.offset as usize,
                block.desc.pa + sfr.offset,
                field.shift,
                field.width,
                field.name,
            ))
        };
        let bind_opt = |idx: Option<FieldIdx>| idx.map(bind).transpose();

        let fixed_rates = try_collect(
            t.fixed_rates.len(),
            t.fixed_rates.iter().enumerate().map(|(i, desc)| {
                check_slot(desc.id, i, desc.name)?;
                Ok(FixedRateClk {
                    desc,
                    enable: bind_opt(desc.enable)?,
                })
            }),
        )?;

        let fixed_factors = try_collect(
            t.fixed_factors.len(),
            t.fixed_factors.iter().enumerate().map(|(i, desc)| {
                check_slot(desc.id, i, desc.name)?;
                Ok(FixedFactorClk {
                    desc,
                    enable: bind_opt(desc.enable)?,
                })
            }),
        )?;

        let plls = try_collect(
            t.plls.len(),
            t.plls.iter().enumerate().map(|(i, desc)| {
                check_slot(desc.id, i, desc.name)?;
                let spec = pll_spec::get_spec(desc.pll_type);
                let (lock_time, flock_time) = pll_spec::get_locktime(spec);
                Ok(PllClk {
                    desc,
                    spec,
                    lock: bind(desc.lock)?,
                    enable: bind(desc.enable)?,
                    status: bind(desc.status)?,
                    m: bind(desc.m)?,
                    p: bind(desc.p)?,
                    s: bind(desc.s)?,
                    k: bind_opt(desc.k)?,
                    lock_time,
                    flock_time,
                    rate_table: pll_rate_table(desc, self.ect)?,
                })
            }),
        )?;

        let muxes = try_collect(
            t.muxes.len(),
            t.muxes.iter().enumerate().map(|(i, desc)| {
                check_slot(desc.id, i, desc.name)?;
                Ok(MuxClk {
                    desc,
                    select: bind(desc.select)?,
                    busy: bind_opt(desc.busy)?,
                    enable: bind_opt(desc.enable)?,
                })
            }),
        )?;

        let divs = try_collect(
            t.divs.len(),
            t.divs.iter().enumerate().map(|(i, desc)| {
                check_slot(desc.id, i, desc.name)?;
                Ok(DivClk {
                    desc,
                    ratio: bind(desc.ratio)?,
                    busy: bind_opt(desc.busy)?,
                    enable: bind_opt(desc.enable)?,
                })
            }),
        )?;

        let gates = try_collect(
            t.gates.len(),
            t.gates.iter().enumerate().map(|(i, desc)| {
                check_slot(desc.id, i, desc.name)?;
                Ok(GateClk {
                    desc,
                    cg_value: bind(desc.cg_value)?,
                    manual: bind_opt(desc.manual)?,
                    auto_enable: bind_opt(desc.auto_enable)?,
                })
            }),
        )?;

        let qchs = try_collect(
            t.qchs.len(),
            t.qchs.iter().enumerate().map(|(i, desc)| {
                check_slot(desc.id, i, desc.name)?;
                Ok(QchClk {
                    desc,
                    enable: bind(desc.enable)?,
                    req: bind(desc.req)?,
                    expire: bind_opt(desc.expire)?,
                    ignore: bind_opt(desc.ignore)?,
                })
            }),
        )?;

        let options = try_collect(
            t.options.len(),
            t.options.iter().enumerate().map(|(i, desc)| {
                check_slot(desc.id, i, desc.name)?;
                Ok(OptionClk {
                    desc,
                    offset: bind(desc.offset)?,
                    enable: bind_opt(desc.enable)?,
                })
            }),
        )?;

        let clkouts = try_collect(
            t.clkouts.len(),
            t.clkouts.iter().enumerate().map(|(i, desc)| {
                check_slot(desc.id, i, desc.name)?;
                Ok(ClkoutClk { desc })
            }),
        )?;

        let mut vclks: [Box<[Vclk]>; 4] = Default::default();
        for kind in VclkKind::ALL {
            let descs = match kind {
                VclkKind::Common => t.common_vclks,
                VclkKind::Dfs => t.dfs_vclks,
                VclkKind::Gate => t.gate_vclks,
                VclkKind::Acpm => t.acpm_vclks,
            };
            vclks[kind.table()] = try_collect(
                descs.len(),
                descs.iter().enumerate().map(|(i, desc)| {
                    check_slot(desc.id, i, desc.name)?;
                    if desc.id.vclk_kind() != Some(kind) {
                        debug!("cmucal: {} is not a {:?} vclk", desc.name, kind);
                        return Err(ErrorCode::INVAL);
                    }
                    Vclk::bind(desc, self.ect, self.asv_group)
                }),
            )?;
        }

        Ok(Registry {
            tables: t,
            blocks,
            fixed_rates,
            fixed_factors,
            plls,
            muxes,
            divs,
            gates,
            qchs,
            options,
            clkouts,
            vclks,
        })
    }
}

fn check_slot(id: ClockId, slot: usize, name: &str) -> Result<(), ErrorCode> {
    if id.index() == slot {
        Ok(())
    } else {
        debug!("cmucal: {} ({}) stored in slot {}", name, id, slot);
        Err(ErrorCode::INVAL)
    }
}

/// The rate table of a PLL: ECT rows when the blob has them, otherwise the
/// static rows.
fn pll_rate_table(
    desc: &'static PllDesc,
    ect: Option<&dyn EctSource>,
) -> Result<Box<[PllRate]>, ErrorCode> {
    if let Some(rows) = ect
        .filter(|ect| ect.get_block(EctBlock::Pll))
        .and_then(|ect| ect.pll_get_pll(desc.name))
    {
        return try_collect(
            rows.len(),
            rows.iter().map(|row| {
                Ok(PllRate {
                    rate: row.frequency,
                    p: row.p as u16,
                    m: row.m as u16,
                    s: row.s as u16,
                    k: row.k as i16,
                })
            }),
        );
    }
    try_collect(
        desc.rate_table.len(),
        desc.rate_table.iter().map(|row| Ok(*row)),
    )
}
