// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Frequency/voltage map shared with ACPM.
//!
//! ACPM publishes, in its SRAM, one map per ACPM-owned DVFS domain: the
//! rate and voltage of every level and the value of every clock member at
//! each level. At boot the map is copied into owned tables, the members are
//! resolved back to clock ids and bound into the domain's ACPM vclk.
//!
//! Layout (all values little-endian, offsets relative to the start of the
//! map):
//!
//! ```text
//! header[n]            24 bytes per ACPM vclk, in vclk index order
//!   u8  dvfs_type      u8  num_of_lv     u8  num_of_members
//!   u8  num_of_pll     u8  num_of_mux    u8  num_of_div
//!   u16 gearratio      u8  init_lv       u8  num_of_gate
//!   u16 reserved       u16 block_addr[3]
//!   u16 o_members      u16 o_ratevolt    u16 o_tables
//! members              u16 per member; PLLs first, as the offset of a PLL
//!                      header, other members as an encoded address
//! pll header           u32 addr  u16 o_lut  u16 n_lut  u32 rate
//! pll lut entry        u32 rate (kHz)  u16 m  u8 p  u8 s
//! ratevolt             u32 rate (kHz)  u32 volt (uV), per level
//! tables               u8 per level per member; an index into the PLL lut
//!                      for PLLs, the raw register value otherwise
//! ```
//!
//! Two voltage adjustments apply on top of the map: an additive margin per
//! margin domain given on the kernel command line, and a runtime percent
//! margin per margin domain, in [-100, 100], rounded toward zero to the
//! regulator step.

use alloc::boxed::Box;
use core::cell::{Cell, OnceCell};
use core::marker::PhantomData;

use kernel::debug;
use kernel::hil::acpm::AcpmChannel;
use kernel::ErrorCode;

use crate::chip_specific::ChipSpecs;
use crate::cmucal::{try_collect, ClockId, Registry, VclkKind};
use crate::vclk::{LutRow, Vclk};

pub const HEADER_LEN: usize = 24;
const PLL_HEADER_LEN: usize = 12;
const PLL_LUT_ENTRY_LEN: usize = 8;
const RATE_VOLT_LEN: usize = 8;

/// Upper bound on the number of margin domains a chip may declare.
pub const MAX_MARGIN_DOMAINS: usize = 16;

/// Suffix of the runtime margin attributes, e.g. `mif_margin_percent`.
pub const MARGIN_ATTR_SUFFIX: &str = "_margin_percent";

fn read_u8(map: &[u8], offset: usize) -> Result<u8, ErrorCode> {
    map.get(offset).copied().ok_or(ErrorCode::INVAL)
}

fn read_u16(map: &[u8], offset: usize) -> Result<u16, ErrorCode> {
    let bytes = map.get(offset..offset + 2).ok_or(ErrorCode::INVAL)?;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn read_u32(map: &[u8], offset: usize) -> Result<u32, ErrorCode> {
    let bytes = map.get(offset..offset + 4).ok_or(ErrorCode::INVAL)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FvmapHeader {
    pub dvfs_type: u8,
    pub num_of_lv: u8,
    pub num_of_members: u8,
    pub num_of_pll: u8,
    pub num_of_mux: u8,
    pub num_of_div: u8,
    pub gearratio: u16,
    pub init_lv: u8,
    pub num_of_gate: u8,
    pub block_addr: [u16; 3],
    pub o_members: u16,
    pub o_ratevolt: u16,
    pub o_tables: u16,
}

impl TryFrom<&[u8]> for FvmapHeader {
    type Error = ErrorCode;

    fn try_from(b: &[u8]) -> Result<FvmapHeader, ErrorCode> {
        if b.len() < HEADER_LEN {
            return Err(ErrorCode::INVAL);
        }
        Ok(FvmapHeader {
            dvfs_type: b[0],
            num_of_lv: b[1],
            num_of_members: b[2],
            num_of_pll: b[3],
            num_of_mux: b[4],
            num_of_div: b[5],
            gearratio: read_u16(b, 6)?,
            init_lv: b[8],
            num_of_gate: b[9],
            block_addr: [read_u16(b, 12)?, read_u16(b, 14)?, read_u16(b, 16)?],
            o_members: read_u16(b, 18)?,
            o_ratevolt: read_u16(b, 20)?,
            o_tables: read_u16(b, 22)?,
        })
    }
}

#[derive(Clone, Copy, Debug)]
struct PllHeader {
    addr: u32,
    o_lut: u16,
    n_lut: u16,
}

impl PllHeader {
    fn parse(map: &[u8], offset: usize) -> Result<PllHeader, ErrorCode> {
        if map.len() < offset + PLL_HEADER_LEN {
            return Err(ErrorCode::INVAL);
        }
        Ok(PllHeader {
            addr: read_u32(map, offset)?,
            o_lut: read_u16(map, offset + 4)?,
            n_lut: read_u16(map, offset + 6)?,
        })
    }

    /// Entry `idx` of the PLL's lut as `(rate_khz, m, p, s)`.
    fn entry(&self, map: &[u8], idx: usize) -> Result<(u32, u16, u8, u8), ErrorCode> {
        if idx >= self.n_lut as usize {
            return Err(ErrorCode::INVAL);
        }
        let offset = self.o_lut as usize + idx * PLL_LUT_ENTRY_LEN;
        Ok((
            read_u32(map, offset)?,
            read_u16(map, offset + 4)?,
            read_u8(map, offset + 6)?,
            read_u8(map, offset + 7)?,
        ))
    }
}

/// Voltage margins taken from the kernel command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BootParams {
    /// Additive margin in uV, indexed by margin domain.
    pub margins: [i32; MAX_MARGIN_DOMAINS],
    /// Initial percent margin of every domain.
    pub volt_offset_percent: i32,
}

impl BootParams {
    /// Read `<domain>=<uV>` and `volt_offset_percent=<percent>` from a
    /// command line. Unknown keys are ignored.
    pub fn parse<C: ChipSpecs>(cmdline: &str) -> BootParams {
        let mut params = BootParams::default();
        for (key, value) in cmdline
            .split_whitespace()
            .filter_map(|arg| arg.split_once('='))
        {
            let slot = match C::MARGIN_DOMAINS.iter().position(|&domain| domain == key) {
                _ if key == "volt_offset_percent" => &mut params.volt_offset_percent,
                Some(idx) if idx < MAX_MARGIN_DOMAINS => &mut params.margins[idx],
                _ => continue,
            };
            match value.parse::<i32>() {
                Ok(v) => *slot = v,
                Err(_) => debug!("fvmap: bad value {} for {}", value, key),
            }
        }
        params
    }
}

/// `volt` adjusted by `percent`, the adjustment rounded toward zero to a
/// multiple of `step`.
pub fn apply_percent(volt: u32, percent: i32, step: i32) -> u32 {
    let adjust = i64::from(volt) * i64::from(percent) / 100;
    let adjust = adjust - adjust % i64::from(step);
    u32::try_from(i64::from(volt) + adjust).unwrap_or(0)
}

struct DomainMap {
    vclk: ClockId,
    margin: Option<usize>,
    rates: Box<[u32]>,
    /// Voltages with the boot margin applied.
    volts: Box<[u32]>,
}

pub struct Fvmap<'a, C: ChipSpecs> {
    registry: &'a Registry<'a>,
    acpm: Option<&'a dyn AcpmChannel>,
    boot: BootParams,
    domains: OnceCell<Box<[DomainMap]>>,
    percent: [Cell<i32>; MAX_MARGIN_DOMAINS],
    _chip: PhantomData<C>,
}

impl<'a, C: ChipSpecs> Fvmap<'a, C> {
    pub fn new(
        registry: &'a Registry<'a>,
        acpm: Option<&'a dyn AcpmChannel>,
        boot: BootParams,
    ) -> Fvmap<'a, C> {
        let fvmap = Fvmap {
            registry,
            acpm,
            boot,
            domains: OnceCell::new(),
            percent: Default::default(),
            _chip: PhantomData,
        };
        if (-100..=100).contains(&boot.volt_offset_percent) {
            for percent in fvmap.percent.iter().take(C::MARGIN_DOMAINS.len()) {
                percent.set(boot.volt_offset_percent);
            }
        } else {
            debug!(
                "fvmap: volt_offset_percent {} out of range",
                boot.volt_offset_percent
            );
        }
        fvmap
    }

    pub fn is_initialized(&self) -> bool {
        self.domains.get().is_some()
    }

    /// Copy `map` and bind every ACPM vclk to its members and levels.
    pub fn init(&self, map: &[u8]) -> Result<(), ErrorCode> {
        if self.is_initialized() {
            return Err(ErrorCode::ALREADY);
        }
        let vclks = self.registry.vclks(VclkKind::Acpm);
        let domains = try_collect(
            vclks.len(),
            vclks
                .iter()
                .enumerate()
                .map(|(i, vclk)| self.bind_domain(map, i, vclk)),
        )?;

        for domain in domains.iter() {
            let Some(margin) = domain.margin else {
                continue;
            };
            let boot_margin = self.boot.margins.get(margin).copied().unwrap_or(0);
            if boot_margin != 0 {
                self.notify(domain.vclk, |acpm, id| acpm.set_volt_margin(id, boot_margin));
            }
            let percent = self.percent_of(margin);
            if percent != 0 {
                self.notify(domain.vclk, |acpm, id| acpm.set_percent_margin(id, percent));
            }
        }

        self.domains.set(domains).map_err(|_| ErrorCode::ALREADY)
    }

    fn bind_domain(&self, map: &[u8], i: usize, vclk: &Vclk) -> Result<DomainMap, ErrorCode> {
        let header = FvmapHeader::try_from(map.get(i * HEADER_LEN..).ok_or(ErrorCode::INVAL)?)?;
        let members = header.num_of_members as usize;
        let levels = header.num_of_lv as usize;

        // PLL members carry their own header, needed to turn lut indexes
        // into rates.
        let mut plls: [Option<PllHeader>; 8] = [None; 8];
        let mut resolved = true;
        let list = try_collect(
            members,
            (0..members).map(|j| {
                let raw = read_u16(map, header.o_members as usize + 2 * j)?;
                let addr = if j < header.num_of_pll as usize {
                    let pll = PllHeader::parse(map, raw as usize)?;
                    *plls.get_mut(j).ok_or(ErrorCode::NOSUPPORT)? = Some(pll);
                    pll.addr
                } else {
                    match header.block_addr.get((raw & 0x3) as usize) {
                        Some(&block) => (raw & !0x3) as u32 | (block as u32) << 16,
                        None => {
                            debug!("fvmap: {} bad member {:#x}", vclk.name(), raw);
                            resolved = false;
                            return Ok(ClockId::from_raw(0));
                        }
                    }
                };
                let pa = addr.wrapping_sub(C::FVMAP_ADDR_OFFSET);
                match self.registry.get_id_by_register_address(pa) {
                    Some(id) => Ok(id),
                    None => {
                        debug!("fvmap: {} no clock at {:#x}", vclk.name(), pa);
                        resolved = false;
                        Ok(ClockId::from_raw(0))
                    }
                }
            }),
        )?;

        for (id, pll) in list.iter().zip(plls.iter()) {
            if let Some(pll) = pll {
                self.check_pll(map, *id, pll);
            }
        }

        let lut = try_collect(
            levels,
            (0..levels).map(|lv| {
                let params = try_collect(
                    members,
                    (0..members).map(|j| {
                        let val = read_u8(map, header.o_tables as usize + lv * members + j)?;
                        match plls.get(j).copied().flatten() {
                            Some(pll) => pll.entry(map, val as usize).map(|(rate, ..)| rate),
                            None => Ok(val as u32),
                        }
                    }),
                )?;
                Ok(LutRow {
                    rate: read_u32(map, header.o_ratevolt as usize + lv * RATE_VOLT_LEN)?,
                    params,
                })
            }),
        )?;

        if resolved {
            self.bind_vclk(vclk, list, lut);
        }

        let margin = vclk.desc().margin.map(usize::from);
        let boot_margin = margin
            .and_then(|m| self.boot.margins.get(m).copied())
            .unwrap_or(0);
        let rates = try_collect(
            levels,
            (0..levels)
                .map(|lv| read_u32(map, header.o_ratevolt as usize + lv * RATE_VOLT_LEN)),
        )?;
        let volts = try_collect(
            levels,
            (0..levels).map(|lv| {
                let uv = read_u32(map, header.o_ratevolt as usize + lv * RATE_VOLT_LEN + 4)?;
                Ok(u32::try_from(i64::from(uv) + i64::from(boot_margin)).unwrap_or(0))
            }),
        )?;

        Ok(DomainMap {
            vclk: vclk.id(),
            margin,
            rates,
            volts,
        })
    }

    /// Bind what the map describes, or report where it disagrees with the
    /// static tables.
    fn bind_vclk(&self, vclk: &Vclk, list: Box<[ClockId]>, lut: Box<[LutRow]>) {
        if vclk.list().is_empty() {
            if let Err(e) = vclk.bind_members(list) {
                debug!("fvmap: {} members not bound: {:?}", vclk.name(), e);
                return;
            }
        } else if vclk.list() != &list[..] {
            debug!("fvmap: Mis-match {} members", vclk.name());
            return;
        }

        match vclk.lut() {
            None => {
                if let Err(e) = vclk.bind_lut(lut) {
                    debug!("fvmap: {} levels not bound: {:?}", vclk.name(), e);
                }
            }
            Some(existing) => {
                for (row, new) in existing.iter().zip(lut.iter()) {
                    if row != new {
                        debug!("fvmap: Mis-match {} level {}", vclk.name(), new.rate);
                    }
                }
            }
        }
    }

    fn check_pll(&self, map: &[u8], id: ClockId, header: &PllHeader) {
        let Some(pll) = self.registry.pll(id) else {
            debug!("fvmap: Mis-match {} is not a PLL", id);
            return;
        };
        for idx in 0..header.n_lut as usize {
            let Ok((rate, m, p, s)) = header.entry(map, idx) else {
                debug!("fvmap: {} lut truncated", pll.desc.name);
                return;
            };
            match pll
                .rate_table
                .iter()
                .find(|row| row.rate / 1000 == rate)
            {
                Some(row) if (row.p, row.m, row.s) == (p as u16, m, s as u16) => {}
                Some(row) => debug!(
                    "fvmap: Mis-match {} {} kHz: p/m/s {}/{}/{}, table {}/{}/{}",
                    pll.desc.name,
                    rate,
                    p,
                    m,
                    s,
                    row.p,
                    row.m,
                    row.s
                ),
                None => debug!(
                    "fvmap: Mis-match {} {} kHz not in the rate table",
                    pll.desc.name,
                    rate
                ),
            }
        }
    }

    fn notify(
        &self,
        vclk: ClockId,
        send: impl FnOnce(&dyn AcpmChannel, u32) -> Result<(), ErrorCode>,
    ) {
        if let Some(acpm) = self.acpm {
            if let Err(e) = send(acpm, vclk.index() as u32) {
                debug!("fvmap: margin of {} not sent: {:?}", vclk, e);
            }
        }
    }

    fn percent_of(&self, margin: usize) -> i32 {
        self.percent.get(margin).map_or(0, Cell::get)
    }

    fn domain(&self, id: ClockId) -> Result<&DomainMap, ErrorCode> {
        self.domains
            .get()
            .and_then(|domains| domains.iter().find(|domain| domain.vclk == id))
            .ok_or(ErrorCode::BADID)
    }

    /// Copy the voltages of `id`, margins applied, into `table`. Returns
    /// how many were written.
    pub fn get_voltage_table(&self, id: ClockId, table: &mut [u32]) -> Result<usize, ErrorCode> {
        let domain = self.domain(id)?;
        let percent = domain.margin.map_or(0, |m| self.percent_of(m));
        let n = domain.volts.len().min(table.len());
        for (dst, &uv) in table.iter_mut().zip(domain.volts.iter()) {
            *dst = apply_percent(uv, percent, C::VOLT_STEP_UV);
        }
        Ok(n)
    }

    /// Copy the level rates of `id` into `table`. Returns how many were
    /// written.
    pub fn get_rate_table(&self, id: ClockId, table: &mut [u32]) -> Result<usize, ErrorCode> {
        let rates = &self.domain(id)?.rates;
        let n = rates.len().min(table.len());
        table[..n].copy_from_slice(&rates[..n]);
        Ok(n)
    }

    fn margin_index(attr: &str) -> Result<usize, ErrorCode> {
        let name = attr
            .strip_suffix(MARGIN_ATTR_SUFFIX)
            .ok_or(ErrorCode::NOENT)?;
        C::MARGIN_DOMAINS
            .iter()
            .take(MAX_MARGIN_DOMAINS)
            .position(|&domain| domain == name)
            .ok_or(ErrorCode::NOENT)
    }

    /// Current percent margin of the domain behind attribute `attr`.
    pub fn show_percent(&self, attr: &str) -> Result<i32, ErrorCode> {
        Ok(self.percent_of(Self::margin_index(attr)?))
    }

    /// Set the percent margin of the domain behind attribute `attr` and
    /// tell ACPM about it. Values outside [-100, 100] are rejected.
    pub fn store_percent(&self, attr: &str, percent: i32) -> Result<(), ErrorCode> {
        let margin = Self::margin_index(attr)?;
        if !(-100..=100).contains(&percent) {
            return Err(ErrorCode::INVAL);
        }
        if let Some(cell) = self.percent.get(margin) {
            cell.set(percent);
        }

        for domain in self.domains.get().iter().flat_map(|domains| domains.iter()) {
            if domain.margin == Some(margin) {
                self.notify(domain.vclk, |acpm, id| acpm.set_percent_margin(id, percent));
            }
        }
        Ok(())
    }

    /// Names of the runtime margin attributes' domains, in margin id order.
    pub fn margin_domains(&self) -> &'static [&'static str] {
        C::MARGIN_DOMAINS
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ra::Ra;
    use crate::test_soc::{self, *};
    use crate::vclk::VclkEngine;
    use alloc::vec::Vec;

    /// A map for `ACPM_A` with members PLL_A, MUX_A_USER and DIV_A and two
    /// levels.
    pub(crate) fn acpm_map() -> Vec<u8> {
        let acpm = |pa: u32| pa.wrapping_add(TestChip::FVMAP_ADDR_OFFSET);
        let mut map = Vec::new();

        // Header.
        map.extend_from_slice(&[0, 2, 3, 1, 1, 1]);
        map.extend_from_slice(&0u16.to_le_bytes());
        map.extend_from_slice(&[0, 0, 0, 0]);
        map.extend_from_slice(&((acpm(BASE) >> 16) as u16).to_le_bytes());
        map.extend_from_slice(&0u16.to_le_bytes());
        map.extend_from_slice(&0u16.to_le_bytes());
        map.extend_from_slice(&24u16.to_le_bytes());
        map.extend_from_slice(&60u16.to_le_bytes());
        map.extend_from_slice(&76u16.to_le_bytes());

        // Members at 24, padded to 32.
        map.extend_from_slice(&32u16.to_le_bytes());
        map.extend_from_slice(&0x0600u16.to_le_bytes());
        map.extend_from_slice(&0x1800u16.to_le_bytes());
        map.extend_from_slice(&[0, 0]);

        // PLL header at 32, its lut at 44.
        map.extend_from_slice(&acpm(PLL_CON0_PLL_A).to_le_bytes());
        map.extend_from_slice(&44u16.to_le_bytes());
        map.extend_from_slice(&2u16.to_le_bytes());
        map.extend_from_slice(&1_600_000u32.to_le_bytes());
        for (rate, m, p, s) in [(1_600_000u32, 800u16, 13u8, 0u8), (800_000, 800, 13, 1)] {
            map.extend_from_slice(&rate.to_le_bytes());
            map.extend_from_slice(&m.to_le_bytes());
            map.extend_from_slice(&[p, s]);
        }

        // Rates and voltages at 60.
        for (rate, uv) in [(1_600_000u32, 900_000u32), (800_000, 750_000)] {
            map.extend_from_slice(&rate.to_le_bytes());
            map.extend_from_slice(&uv.to_le_bytes());
        }

        // Parameters at 76.
        map.extend_from_slice(&[0, 1, 0, 1, 1, 1]);
        map
    }

    #[test]
    fn header_layout() {
        let map = acpm_map();
        let header = FvmapHeader::try_from(&map[..]).unwrap();
        assert_eq!(header.num_of_lv, 2);
        assert_eq!(header.num_of_members, 3);
        assert_eq!(header.num_of_pll, 1);
        assert_eq!(header.block_addr, [0xA000, 0, 0]);
        assert_eq!(
            (header.o_members, header.o_ratevolt, header.o_tables),
            (24, 60, 76)
        );
        assert_eq!(FvmapHeader::try_from(&map[..23]), Err(ErrorCode::INVAL));
    }

    #[test]
    fn boot_params() {
        let params = BootParams::parse::<TestChip>(
            "console=ttySAC0 big=-6250 mif=12500 gpu=5 int=x volt_offset_percent=3",
        );
        assert_eq!(params.margins[..3], [12_500, 0, -6_250]);
        assert_eq!(params.volt_offset_percent, 3);
        assert_eq!(BootParams::parse::<TestChip>(""), BootParams::default());
    }

    #[test]
    fn percent_rounds_toward_zero() {
        assert_eq!(apply_percent(900_000, 5, 6250), 943_750);
        assert_eq!(apply_percent(900_000, -3, 6250), 875_000);
        assert_eq!(apply_percent(750_000, 5, 6250), 787_500);
        assert_eq!(apply_percent(900_000, 0, 6250), 900_000);
        assert_eq!(apply_percent(900_000, -100, 6250), 0);
    }

    #[test]
    fn binds_acpm_vclk() {
        let space = test_soc::space();
        let registry = test_soc::registry(&space);
        let fvmap = Fvmap::<TestChip>::new(&registry, None, BootParams::default());

        assert!(!fvmap.is_initialized());
        assert_eq!(fvmap.init(&acpm_map()), Ok(()));
        assert!(fvmap.is_initialized());
        assert_eq!(fvmap.init(&acpm_map()), Err(ErrorCode::ALREADY));

        let vclk = registry.vclk(ACPM_A).unwrap();
        assert_eq!(vclk.list(), [PLL_A, MUX_A_USER, DIV_A]);
        let lut = vclk.lut().unwrap();
        assert_eq!(lut.len(), 2);
        assert_eq!(lut[0].rate, 1_600_000);
        assert_eq!(lut[0].params[..], [1_600_000, 1, 0]);
        assert_eq!(lut[1].params[..], [800_000, 1, 1]);

        let mut table = [0; 4];
        assert_eq!(fvmap.get_rate_table(ACPM_A, &mut table), Ok(2));
        assert_eq!(table[..2], [1_600_000, 800_000]);
        assert_eq!(fvmap.get_voltage_table(ACPM_A, &mut table), Ok(2));
        assert_eq!(table[..2], [900_000, 750_000]);
        assert_eq!(fvmap.get_rate_table(VDD_A, &mut table), Err(ErrorCode::BADID));

        // The bound levels round-trip through the local engine.
        let ra = Ra::<TestChip>::new(&registry, &NoDelay, None);
        let engine = VclkEngine::new(&ra);
        assert_eq!(engine.set_rate(ACPM_A, 800_000), Ok(800_000));
        assert_eq!(engine.recalc_rate(ACPM_A), Ok(800_000));
    }

    #[test]
    fn truncated_map_is_rejected() {
        let space = test_soc::space();
        let registry = test_soc::registry(&space);
        let fvmap = Fvmap::<TestChip>::new(&registry, None, BootParams::default());

        let map = acpm_map();
        assert_eq!(fvmap.init(&map[..70]), Err(ErrorCode::INVAL));
        assert!(!fvmap.is_initialized());
    }

    #[test]
    fn margins() {
        let space = test_soc::space();
        let registry = test_soc::registry(&space);
        let acpm = FakeAcpm::default();
        let boot = BootParams::parse::<TestChip>("mif=12500");
        let fvmap = Fvmap::<TestChip>::new(&registry, Some(&acpm), boot);
        fvmap.init(&acpm_map()).unwrap();
        assert_eq!(acpm.take(), [AcpmCall::VoltMargin(0, 12_500)]);

        let mut volts = [0; 2];
        fvmap.get_voltage_table(ACPM_A, &mut volts).unwrap();
        assert_eq!(volts, [912_500, 762_500]);

        assert_eq!(fvmap.store_percent("mif_margin_percent", 51), Ok(()));
        assert_eq!(acpm.take(), [AcpmCall::PercentMargin(0, 51)]);
        assert_eq!(
            fvmap.store_percent("mif_margin_percent", -200),
            Err(ErrorCode::INVAL)
        );
        assert_eq!(fvmap.show_percent("mif_margin_percent"), Ok(51));
        assert!(acpm.take().is_empty());

        // 912500 * 51 / 100 = 465375, rounded down to 462500.
        fvmap.get_voltage_table(ACPM_A, &mut volts).unwrap();
        assert_eq!(volts[0], 1_375_000);

        assert_eq!(fvmap.store_percent("mif_margin_percent", 0), Ok(()));
        fvmap.get_voltage_table(ACPM_A, &mut volts).unwrap();
        assert_eq!(volts, [912_500, 762_500]);

        // Other domains have no ACPM vclk here.
        assert_eq!(fvmap.store_percent("big_margin_percent", -4), Ok(()));
        assert_eq!(fvmap.show_percent("big_margin_percent"), Ok(-4));
        assert!(acpm.take().is_empty());
        assert_eq!(fvmap.show_percent("gpu_margin_percent"), Err(ErrorCode::NOENT));
        assert_eq!(fvmap.show_percent("mif"), Err(ErrorCode::NOENT));
    }

    #[test]
    fn volt_offset_percent_seeds_every_domain() {
        let space = test_soc::space();
        let registry = test_soc::registry(&space);
        let acpm = FakeAcpm::default();
        let boot = BootParams::parse::<TestChip>("volt_offset_percent=-3");
        let fvmap = Fvmap::<TestChip>::new(&registry, Some(&acpm), boot);
        fvmap.init(&acpm_map()).unwrap();

        assert_eq!(acpm.take(), [AcpmCall::PercentMargin(0, -3)]);
        assert_eq!(fvmap.show_percent("int_margin_percent"), Ok(-3));
        let mut volts = [0; 2];
        fvmap.get_voltage_table(ACPM_A, &mut volts).unwrap();
        assert_eq!(volts, [875_000, 731_250]);
    }
}
