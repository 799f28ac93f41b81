// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Register access: primitive operations on single clock nodes.
//!
//! `Ra` turns a [`ClockId`] and an operation into register reads, writes
//! and bounded polls. It never reorders or undoes writes; sequencing across
//! nodes is the job of the vclk layer, which calls the list helpers at the
//! bottom of this file.
//!
//! All polls wait in 1 µs steps: 100 µs for mux, divider and PLL status
//! bits, 400 µs for a shared PLL to report stable. A timeout is logged and
//! returned, leaving the registers as written.
//!
//! Callers must serialize operations touching the same clock domain.

use core::marker::PhantomData;

use kernel::debug;
use kernel::debug_verbose;
use kernel::hil::sfr::PmuUpdate;
use kernel::hil::time::Delay;
use kernel::utilities::cells::OptionalCell;
use kernel::utilities::poll::poll_until;
use kernel::utilities::registers::{register_bitfields, LocalRegisterCopy};
use kernel::ErrorCode;

use crate::chip_specific::ChipSpecs;
use crate::cmucal::{
    ClkoutClk, ClockId, ClockNode, ClockType, FixedRateClk, GateClk, PllClk, PllRate, QchClk,
    Registry, SwitchDesc, SeqDesc, TransOpt,
};
use crate::config::CONFIG;
use crate::pll_spec::{self, Pmsk};
use crate::sfr::SfrBinding;

register_bitfields![u32,
    /// Control bits shared by every PLL_CON0 register.
    pub PLL_CON0 [
        ENABLE OFFSET(31) NUMBITS(1) [],
        STABLE OFFSET(29) NUMBITS(1) [],
        MUX_BUSY OFFSET(16) NUMBITS(1) [],
        /// 1 selects the PLL output, 0 the oscillator.
        MUX_SEL OFFSET(4) NUMBITS(1) []
    ]
];

const WAIT_US: u32 = 100;
const FIXED_RATE_WAIT_US: u32 = 400;

/// Longest parent chain `recalc_rate` follows.
pub const RECALC_MAX: usize = 32;

/// Observer of the value and enable changes issued through `Ra`.
pub trait RaClient {
    fn value_set(&self, id: ClockId, value: u32);
    fn enable_set(&self, id: ClockId, on: bool);
}

/// Replaces the PLL accessors used during vclk transitions, for PLLs
/// programmed by another agent. Values are in kHz.
pub trait TransitionOps {
    fn get_pll(&self, id: ClockId) -> u32;
    fn set_pll(&self, id: ClockId, rate_khz: u32) -> Result<(), ErrorCode>;
}

pub struct Ra<'a, C: ChipSpecs> {
    registry: &'a Registry<'a>,
    delay: &'a dyn Delay,
    pmu: Option<&'a dyn PmuUpdate>,
    client: OptionalCell<&'a dyn RaClient>,
    ops: OptionalCell<&'a dyn TransitionOps>,
    _chip: PhantomData<C>,
}

impl<'a, C: ChipSpecs> Ra<'a, C> {
    pub fn new(
        registry: &'a Registry<'a>,
        delay: &'a dyn Delay,
        pmu: Option<&'a dyn PmuUpdate>,
    ) -> Ra<'a, C> {
        Ra {
            registry,
            delay,
            pmu,
            client: OptionalCell::empty(),
            ops: OptionalCell::empty(),
            _chip: PhantomData,
        }
    }

    pub fn registry(&self) -> &'a Registry<'a> {
        self.registry
    }

    pub fn set_client(&self, client: &'a dyn RaClient) {
        self.client.set(client);
    }

    pub fn set_transition_ops(&self, ops: &'a dyn TransitionOps) {
        self.ops.set(ops);
    }

    fn node(&self, id: ClockId) -> Result<ClockNode<'a, 'a>, ErrorCode> {
        self.registry.get_node(id).ok_or_else(|| {
            debug!("ra: no clock {}", id);
            ErrorCode::BADID
        })
    }

    fn wait_done(&self, field: &SfrBinding, done: bool, budget_us: u32) -> Result<(), ErrorCode> {
        poll_until(self.delay, 1, budget_us, || field.is_set() == done)
    }

    /// Turn the node `id` on or off.
    pub fn set_enable(&self, id: ClockId, on: bool) -> Result<(), ErrorCode> {
        let result = match self.node(id)? {
            ClockNode::FixedRate(clk) => self.enable_fixed_rate(clk, on),
            ClockNode::Pll(clk) => self.enable_pll(clk, on),
            ClockNode::Mux(clk) => {
                if id.is_user_mux() {
                    self.set_div_mux(&clk.select, clk.busy.as_ref(), on as u32, clk.desc.name)
                } else {
                    Ok(())
                }
            }
            ClockNode::Div(_) => Ok(()),
            ClockNode::Gate(clk) => {
                self.set_gate(clk, on);
                Ok(())
            }
            ClockNode::Qch(clk) => {
                self.req_enable_qch(clk, on);
                Ok(())
            }
            ClockNode::Clkout(clk) => self.clkout_control(clk, on),
            _ => {
                debug!("ra: cannot enable {}", id);
                Err(ErrorCode::NOSUPPORT)
            }
        };
        if result.is_ok() {
            self.client.map(|client| client.enable_set(id, on));
        }
        result
    }

    /// Write `value` to the node: a select or ratio for muxes and dividers,
    /// a rate in kHz for PLLs, pass/block for gates and QCHs.
    pub fn set_value(&self, id: ClockId, value: u32) -> Result<(), ErrorCode> {
        let result = match self.node(id)? {
            ClockNode::Div(clk) => {
                self.set_div_mux(&clk.ratio, clk.busy.as_ref(), value, clk.desc.name)
            }
            ClockNode::Mux(clk) => {
                self.set_div_mux(&clk.select, clk.busy.as_ref(), value, clk.desc.name)
            }
            ClockNode::Pll(clk) => self.program_pll(clk, value, 0),
            ClockNode::Gate(clk) => {
                self.set_gate(clk, value != 0);
                Ok(())
            }
            ClockNode::Qch(clk) => {
                self.write_qch(clk, value != 0, true, None);
                Ok(())
            }
            _ => {
                debug!("ra: cannot set value of {}", id);
                Err(ErrorCode::NOSUPPORT)
            }
        };
        if result.is_ok() {
            self.client.map(|client| client.value_set(id, value));
        }
        result
    }

    /// Current raw value of the node. PLLs and fixed rates report their
    /// output in Hz. Unknown ids read as 0.
    pub fn get_value(&self, id: ClockId) -> u64 {
        let node = match self.registry.get_node(id) {
            Some(node) => node,
            None => {
                debug!("ra: no clock {}", id);
                return 0;
            }
        };
        match node {
            ClockNode::Div(clk) => clk.ratio.get() as u64,
            ClockNode::Mux(clk) => clk.select.get() as u64,
            ClockNode::Pll(clk) => self.pll_output_rate(clk),
            ClockNode::Gate(clk) => self.get_gate(clk) as u64,
            ClockNode::FixedRate(clk) => self.fixed_rate(clk),
            ClockNode::FixedFactor(clk) => clk.desc.ratio as u64,
            ClockNode::Qch(clk) => clk.enable.get() as u64,
            _ => 0,
        }
    }

    fn set_div_mux(
        &self,
        field: &SfrBinding,
        busy: Option<&SfrBinding>,
        value: u32,
        name: &str,
    ) -> Result<(), ErrorCode> {
        field.set(value);
        match busy {
            Some(busy) => self.wait_done(busy, false, WAIT_US).inspect_err(|_| {
                debug!(
                    "ra: time out, '{}' [{:#x}]={:#x} [{:#x}]={:#x}",
                    name,
                    field.pa(),
                    field.read_raw(),
                    busy.pa(),
                    busy.read_raw()
                );
            }),
            None => Ok(()),
        }
    }

    fn fixed_rate(&self, clk: &FixedRateClk) -> u64 {
        match clk.enable {
            Some(con0) if !con0.read_register::<PLL_CON0::Register>().is_set(PLL_CON0::MUX_SEL) => {
                C::FIN_HZ as u64
            }
            _ => clk.desc.rate as u64,
        }
    }

    fn enable_fixed_rate(&self, clk: &FixedRateClk, on: bool) -> Result<(), ErrorCode> {
        let con0 = match clk.enable {
            Some(con0) => con0,
            None => return Ok(()),
        };
        let mut reg = con0.read_register::<PLL_CON0::Register>();
        if on {
            reg.modify(PLL_CON0::ENABLE::SET + PLL_CON0::MUX_SEL::SET);
            con0.write_register(reg);
            let stable = con0.with_field(PLL_CON0::STABLE.shift as u8, 1);
            self.wait_done(&stable, true, FIXED_RATE_WAIT_US)
                .inspect_err(|_| debug!("ra: fixed pll enable time out, '{}'", clk.desc.name))
        } else {
            reg.modify(PLL_CON0::MUX_SEL::CLEAR);
            con0.write_register(reg);
            let busy = con0.with_field(PLL_CON0::MUX_BUSY.shift as u8, 1);
            let result = self
                .wait_done(&busy, false, WAIT_US)
                .inspect_err(|_| debug!("ra: fixed pll mux change time out, '{}'", clk.desc.name));
            reg.modify(PLL_CON0::ENABLE::CLEAR);
            con0.write_register(reg);
            result
        }
    }

    fn enable_pll(&self, clk: &PllClk, on: bool) -> Result<(), ErrorCode> {
        let mux_sel = clk.enable.with_field(PLL_CON0::MUX_SEL.shift as u8, 1);
        if on {
            clk.enable.set(1);
            self.wait_done(&clk.status, true, WAIT_US)
                .inspect_err(|_| debug!("ra: pll time out, '{}'", clk.desc.name))?;
            mux_sel.set(1);
            Ok(())
        } else {
            mux_sel.set(0);
            let busy = clk.enable.with_field(PLL_CON0::MUX_BUSY.shift as u8, 1);
            let result = self
                .wait_done(&busy, false, WAIT_US)
                .inspect_err(|_| debug!("ra: pll mux change time out, '{}'", clk.desc.name));
            clk.enable.set(0);
            result
        }
    }

    /// The reference clock of `clk`, in Hz.
    fn pll_fin(&self, clk: &PllClk) -> u64 {
        match clk.desc.parent {
            Some(parent) if parent.is(ClockType::FixedRate) => self.get_value(parent),
            _ => C::FIN_HZ as u64,
        }
    }

    fn read_pmsk(&self, clk: &PllClk) -> Pmsk {
        let k = match clk.k {
            Some(k) if clk.is_frac() => {
                // K is a two's complement field.
                let unused = 32 - k.width();
                ((k.get() << unused) as i32) >> unused
            }
            _ => 0,
        };
        Pmsk {
            p: clk.p.get(),
            m: clk.m.get(),
            s: clk.s.get(),
            k,
        }
    }

    fn pll_output_rate(&self, clk: &PllClk) -> u64 {
        if !clk.enable.is_set() {
            let con0 = clk.enable.read_register::<PLL_CON0::Register>();
            return if con0.is_set(PLL_CON0::MUX_SEL) {
                0
            } else {
                C::FIN_HZ as u64
            };
        }
        pll_spec::pll_output(self.pll_fin(clk), self.read_pmsk(clk), clk.is_frac())
    }

    /// Rate table row for a request, matching at progressively coarser
    /// units when the Hz value is known.
    fn get_pll_table(&self, clk: &PllClk, rate_khz: u32, rate_hz: u64) -> Option<PllRate> {
        let table = &clk.rate_table;
        if rate_hz != 0 {
            for unit in [1, 10, 100] {
                if let Some(row) = table
                    .iter()
                    .find(|row| row.rate as u64 / unit == rate_hz / unit)
                {
                    return Some(*row);
                }
            }
        }
        table
            .iter()
            .find(|row| row.rate / 1000 == rate_khz)
            .copied()
    }

    /// Program the PLL `id` to `rate_khz`. `rate_hz`, when non-zero, is the
    /// exact request. A rate of 0 parks the user mux and turns the PLL off.
    pub fn set_pll_rate(&self, id: ClockId, rate_khz: u32, rate_hz: u64) -> Result<(), ErrorCode> {
        match self.node(id)? {
            ClockNode::Pll(clk) => self.program_pll(clk, rate_khz, rate_hz),
            _ => Err(ErrorCode::NOSUPPORT),
        }
    }

    fn set_umux(&self, clk: &PllClk, value: u32) {
        if let Some(umux) = clk.desc.umux.and_then(|id| self.registry.mux(id)) {
            let _ = self.set_div_mux(&umux.select, umux.busy.as_ref(), value, umux.desc.name);
        }
    }

    fn program_pll(&self, clk: &PllClk, rate_khz: u32, rate_hz: u64) -> Result<(), ErrorCode> {
        if rate_khz == 0 {
            self.set_umux(clk, 0);
            return self.enable_pll(clk, false);
        }

        let pmsk = match self.get_pll_table(clk, rate_khz, rate_hz) {
            Some(row) => Pmsk {
                p: row.p as u32,
                m: row.m as u32,
                s: row.s as u32,
                k: row.k as i32,
            },
            None => {
                let fin = self.pll_fin(clk);
                let target = if rate_hz != 0 {
                    rate_hz
                } else {
                    rate_khz as u64 * 1000
                };
                pll_spec::find_pmsk(clk.spec, !clk.is_frac(), fin, target).inspect_err(|_| {
                    debug!("ra: failed {} table {}", clk.desc.name, rate_khz)
                })?
            }
        };

        // A mux that never reports idle still gets the PLL programmed and
        // re-enabled; the timeout is returned afterwards.
        let disabled = self.enable_pll(clk, false);
        let locked = self.write_pmsk(clk, pmsk);
        self.set_umux(clk, 1);
        disabled.and(locked)
    }

    fn write_pmsk(&self, clk: &PllClk, pmsk: Pmsk) -> Result<(), ErrorCode> {
        let lock = if clk.is_frac() && pmsk.k != 0 {
            pmsk.p * clk.flock_time
        } else {
            pmsk.p * clk.lock_time
        };
        clk.lock.set(lock);

        clk.m.set(pmsk.m);
        clk.p.set(pmsk.p);
        clk.s.set(pmsk.s);
        if let Some(k) = clk.k.filter(|_| clk.is_frac()) {
            k.set(pmsk.k as u32 & k.max_value());
        }

        let mut con0 = LocalRegisterCopy::<u32, PLL_CON0::Register>::new(
            clk.enable.field_value(1).modify(clk.enable.read_raw()),
        );
        con0.modify(PLL_CON0::MUX_SEL::SET);
        clk.enable.write_register(con0);

        self.wait_done(&clk.status, true, WAIT_US)
            .inspect_err(|_| debug!("ra: time out, '{}'", clk.desc.name))
    }

    fn get_gate(&self, clk: &GateClk) -> u32 {
        match (clk.manual, clk.auto_enable) {
            (Some(manual), Some(auto)) if !manual.is_set() => !auto.is_set() as u32,
            _ => clk.cg_value.get(),
        }
    }

    /// MANUAL set (or absent): CG_VALUE controls the gate. Otherwise the
    /// gate follows automatic clock gating.
    fn set_gate(&self, clk: &GateClk, pass: bool) {
        match (clk.manual, clk.auto_enable) {
            (Some(manual), Some(auto)) if !manual.is_set() => {
                // Read from the automatic gating register but write to the
                // CG_VALUE register. Both fields share CLK_CON_GAT on every
                // known SoC.
                let reg = auto.field_value(!pass as u32).modify(auto.read_raw());
                clk.cg_value.write_raw(reg);
            }
            _ => clk.cg_value.set(pass as u32),
        }
    }

    /// Turn automatic clock gating of a gate on or off.
    pub fn set_enable_hwacg(&self, id: ClockId, on: bool) -> Result<(), ErrorCode> {
        match self.node(id)? {
            ClockNode::Gate(clk) => {
                if let Some(auto) = clk.auto_enable {
                    auto.set(on as u32);
                }
                Ok(())
            }
            _ => Err(ErrorCode::NOSUPPORT),
        }
    }

    /// Program a Q-channel. `expire`, when given, replaces the whole
    /// register; otherwise only ENABLE and REQ change. A gate given in
    /// place of a QCH has its MANUAL bit forced instead.
    pub fn set_qch(
        &self,
        id: ClockId,
        en: bool,
        req: bool,
        expire: Option<u32>,
    ) -> Result<(), ErrorCode> {
        match self.node(id)? {
            ClockNode::Qch(clk) => {
                self.write_qch(clk, en, req, expire);
                Ok(())
            }
            ClockNode::Gate(clk) => match clk.manual {
                Some(manual) => {
                    manual.set(!en as u32);
                    Ok(())
                }
                None => Err(ErrorCode::NOSUPPORT),
            },
            _ => {
                debug!("ra: cannot find qch {}", id);
                Err(ErrorCode::NOSUPPORT)
            }
        }
    }

    fn write_qch(&self, clk: &QchClk, en: bool, req: bool, expire: Option<u32>) {
        let fields = clk.enable.field_value(en as u32) + clk.req.field_value(req as u32);
        let mut reg = match (expire, clk.expire) {
            (Some(expire), Some(field)) if expire != 0 => {
                (fields + field.field_value(expire)).value
            }
            _ => fields.modify(clk.enable.read_raw()),
        };
        if CONFIG.qch_ignore_support {
            if let Some(ignore) = clk.ignore {
                reg = ignore.field_value(!en as u32).modify(reg);
            }
        }
        clk.enable.write_raw(reg);
    }

    /// Drive REQ, unless the Q-channel is enabled and handles it.
    fn req_enable_qch(&self, clk: &QchClk, req: bool) {
        if !clk.enable.is_set() {
            clk.req.set(req as u32);
        }
    }

    fn clkout_control(&self, clk: &ClkoutClk, on: bool) -> Result<(), ErrorCode> {
        let pmu = self.pmu.ok_or(ErrorCode::NOSUPPORT)?;
        let desc = clk.desc;
        let enable_mask = 1 << desc.enable_shift;
        if on {
            let select_mask = ((1u32 << desc.select_width) - 1) << desc.select_shift;
            pmu.update(desc.pmu_offset, select_mask, desc.select << desc.select_shift)?;
            // The enable bit is active low.
            pmu.update(desc.pmu_offset, enable_mask, 0)
        } else {
            pmu.update(desc.pmu_offset, enable_mask, enable_mask)
        }
    }

    pub fn enable_clkout(&self, id: ClockId, on: bool) -> Result<(), ErrorCode> {
        match self.node(id)? {
            ClockNode::Clkout(clk) => self.clkout_control(clk, on),
            _ => Err(ErrorCode::NOSUPPORT),
        }
    }

    /// The node currently feeding `id`.
    pub fn get_parent(&self, id: ClockId) -> Option<ClockId> {
        let parent = match self.registry.get_node(id)? {
            ClockNode::Mux(clk) => clk.desc.parents.get(clk.select.get() as usize).copied(),
            node => node.parent(),
        }?;
        self.registry.get_node(parent).map(|_| parent)
    }

    /// Output rate of `id` in Hz, derived from its root PLL or fixed rate
    /// and the dividers in between. 0 if unknown.
    pub fn recalc_rate(&self, id: ClockId) -> u64 {
        match id.clock_type() {
            Some(
                ClockType::FixedRate
                | ClockType::FixedFactor
                | ClockType::Pll
                | ClockType::Mux
                | ClockType::Div
                | ClockType::Gate,
            ) => {}
            _ => return 0,
        }

        let mut path = [id; RECALC_MAX];
        let mut depth = 0;
        let mut cur = id;
        loop {
            path[depth] = cur;
            match self.get_parent(cur) {
                Some(parent) => cur = parent,
                None => break,
            }
            depth += 1;
            if depth == RECALC_MAX {
                debug!("ra: recalc_rate overflow id:{}", id);
                return 0;
            }
        }

        // A PLL is the root even when its reference is in the registry.
        if depth > 0 && path[depth - 1].is(ClockType::Pll) {
            depth -= 1;
        }
        let root = path[depth];
        if !root.is(ClockType::Pll) && !root.is(ClockType::FixedRate) {
            return 0;
        }
        let mut rate = self.get_value(root);

        for &node in path[..depth].iter().rev() {
            if node.is(ClockType::Div) || node.is(ClockType::FixedFactor) {
                rate /= self.get_value(node) + 1;
            }
        }
        rate
    }

    /// Set the output of a PLL, divider or mux to `rate_hz`. Dividers pick
    /// the nearest ratio, muxes the nearest parent.
    pub fn set_rate(&self, id: ClockId, rate_hz: u64) -> Result<(), ErrorCode> {
        match self.node(id)? {
            ClockNode::Pll(clk) => {
                let rate_khz = u32::try_from(rate_hz / 1000).map_err(|_| {
                    debug!("ra: {} rate {} out of range", clk.desc.name, rate_hz);
                    ErrorCode::INVAL
                })?;
                self.program_pll(clk, rate_khz, rate_hz)
            }
            ClockNode::Div(clk) => {
                if rate_hz == 0 {
                    return Err(ErrorCode::INVAL);
                }
                let parent_rate = self.recalc_rate(clk.desc.parent);
                if parent_rate == 0 {
                    return Err(ErrorCode::INVAL);
                }
                let max_ratio = clk.ratio.max_value() as u64 + 1;
                let mut ratio = parent_rate / rate_hz;
                if ratio == 0 {
                    ratio = 1;
                } else if ratio > max_ratio {
                    debug!(
                        "ra: failed div_rate {} {}:{}:{}:{}",
                        clk.desc.name, parent_rate, rate_hz, ratio, max_ratio
                    );
                    return Err(ErrorCode::INVAL);
                } else if parent_rate % rate_hz != 0 && ratio < max_ratio {
                    let below = parent_rate - ratio * rate_hz;
                    let above = (ratio + 1) * rate_hz - parent_rate;
                    if below > above {
                        ratio += 1;
                    }
                }
                self.set_div_mux(&clk.ratio, clk.busy.as_ref(), (ratio - 1) as u32, clk.desc.name)
            }
            ClockNode::Mux(clk) => {
                if rate_hz == 0 {
                    return Err(ErrorCode::INVAL);
                }
                let mut best: Option<(u64, usize)> = None;
                for (i, &parent) in clk.desc.parents.iter().enumerate() {
                    let diff = self.recalc_rate(parent).abs_diff(rate_hz);
                    if best.map_or(true, |(d, _)| diff < d) {
                        best = Some((diff, i));
                    }
                    if diff == 0 {
                        break;
                    }
                }
                let (diff, sel) = best.ok_or(ErrorCode::INVAL)?;
                if diff != 0 {
                    debug_verbose!("ra: approximately select {} {}:{}:{}", clk.desc.name, rate_hz, diff, sel);
                }
                self.set_div_mux(&clk.select, clk.busy.as_ref(), sel as u32, clk.desc.name)
            }
            _ => {
                debug!("ra: cannot set rate of {} to {}", id, rate_hz);
                Err(ErrorCode::NOSUPPORT)
            }
        }
    }

    /// The value of `id` in LUT units: kHz for PLLs, the raw value for
    /// everything else.
    pub fn current_param(&self, id: ClockId) -> u32 {
        let clk = match self.registry.pll(id) {
            Some(clk) => clk,
            None => return self.get_value(id) as u32,
        };
        if let Some(rate) = self.ops.map(|ops| ops.get_pll(id)) {
            return rate;
        }
        if clk.enable.is_set() {
            let pmsk = self.read_pmsk(clk);
            let row = clk.rate_table.iter().find(|row| {
                row.p as u32 == pmsk.p
                    && row.m as u32 == pmsk.m
                    && row.s as u32 == pmsk.s
                    && (!clk.is_frac() || row.k as i32 == pmsk.k)
            });
            if let Some(row) = row {
                return row.rate / 1000;
            }
        }
        ((self.pll_output_rate(clk) + 500) / 1000) as u32
    }

    fn set_param(&self, id: ClockId, from: u32, to: u32) {
        if CONFIG.trace_transitions {
            debug!("ra: {} {} -> {}", id, from, to);
        }
        let result = match self.ops.and_then(|ops| id.is(ClockType::Pll).then_some(ops)) {
            Some(ops) => ops.set_pll(id, to),
            None => self.set_value(id, to),
        };
        if let Err(e) = result {
            debug!("ra: {} -> {} failed: {:?}", id, to, e);
        }
    }

    /// Turn on every gate, user mux and PLL of `list`, in order.
    pub fn set_list_enable(&self, list: &[ClockId]) -> Result<(), ErrorCode> {
        let mut result = Ok(());
        for &id in list {
            let step = if id.is_user_mux() || id.is(ClockType::Gate) {
                self.set_value(id, 1)
            } else if id.is(ClockType::Pll) {
                self.set_enable(id, true)
            } else {
                continue;
            };
            if step.is_err() {
                result = step;
            }
        }
        result
    }

    /// Turn off every gate, user mux and PLL of `list`, in reverse order.
    pub fn set_list_disable(&self, list: &[ClockId]) -> Result<(), ErrorCode> {
        let mut result = Ok(());
        for &id in list.iter().rev() {
            let step = if id.is_user_mux() || id.is(ClockType::Gate) {
                self.set_value(id, 0)
            } else if id.is(ClockType::Pll) {
                self.set_enable(id, false)
            } else {
                continue;
            };
            if step.is_err() {
                result = step;
            }
        }
        result
    }

    /// Apply `params` to the members of `list` of type `ty` whose change
    /// is of class `opt`, or to all differing ones with `TransOpt::Force`.
    pub fn set_clk_by_type(&self, list: &[ClockId], params: &[u32], ty: ClockType, opt: TransOpt) {
        for (&id, &to) in list.iter().zip(params) {
            if !id.is(ty) {
                continue;
            }
            let from = self.current_param(id);
            let trans = TransOpt::between(to, from);
            if trans == TransOpt::Ignore {
                continue;
            }
            if opt != TransOpt::Force && trans != opt {
                continue;
            }
            self.set_param(id, from, to);
        }
    }

    /// Apply `params` step by step in the order given by `seq`.
    pub fn set_clk_by_seq(&self, list: &[ClockId], params: &[u32], seq: &[SeqDesc]) {
        for step in seq {
            let idx = step.idx as usize;
            let (id, to) = match (list.get(idx), params.get(idx)) {
                (Some(&id), Some(&to)) => (id, to),
                _ => continue,
            };
            let from = self.current_param(id);
            let trans = TransOpt::between(to, from);
            if trans != TransOpt::Ignore && step.opt.permits(trans) {
                self.set_param(id, from, to);
            }
        }
    }

    /// Whether every member of `list` currently holds its value in
    /// `params`.
    pub fn compare_clk_list(&self, params: &[u32], list: &[ClockId]) -> bool {
        if params.len() < list.len() {
            return false;
        }
        list.iter().zip(params).all(|(&id, &param)| {
            if self.registry.get_node(id).is_none() {
                debug!("ra: no clock {}", id);
                return false;
            }
            let current = self.current_param(id);
            if current != param {
                debug_verbose!("ra: mis-match {} <{} {}>", id, param, current);
            }
            current == param
        })
    }

    /// Point the switch path at the highest switch-LUT rate not above
    /// `rate_max` and return that rate, or `rate_max` if none fits.
    pub fn set_rate_switch(&self, info: &SwitchDesc, rate_max: u32) -> u32 {
        let row = match info.lut.iter().find(|row| rate_max >= row.rate) {
            Some(row) => row,
            None => return rate_max,
        };
        if let (Some(div), Some(value)) = (info.src_div, row.div_value) {
            let _ = self.set_value(div, value);
        }
        let _ = self.set_value(info.src_mux, row.mux_value);
        row.rate
    }

    /// Move the domain onto the switch path, or back to its own PLL.
    pub fn select_switch_pll(&self, info: &SwitchDesc, on: bool) {
        let value = on as u32;
        if on {
            if let Some(gate) = info.src_gate {
                let _ = self.set_value(gate, value);
            }
            if let Some(umux) = info.src_umux {
                let _ = self.set_value(umux, value);
            }
        }
        let _ = self.set_value(info.switch_mux, value);
        if !on {
            if let Some(umux) = info.src_umux {
                let _ = self.set_value(umux, value);
            }
            if let Some(gate) = info.src_gate {
                let _ = self.set_value(gate, value);
            }
        }
    }
}
