// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Entry points used by the rest of the kernel.
//!
//! `CalIf` routes every request either to ACPM, for the DVFS domains the
//! co-processor owns, or to the local vclk and register-access engines.
//! CPU and cluster power requests go to PMUCAL under a spin lock; every
//! other entry point expects the caller to serialize requests touching the
//! same clock domain, as cpufreq and devfreq already do.
//!
//! Usage
//! -----
//!
//! ```rust,ignore
//! let registry = RegistryBuilder::new(&exynos9820::SOC).ect(&ect).build(&mmio)?;
//! let ra = Ra::<Exynos9820>::new(&registry, &delay, Some(&pmu));
//! let fvmap = Fvmap::new(&registry, Some(&acpm), BootParams::parse::<Exynos9820>(cmdline));
//! let cal = CalIf::new(&ra, &fvmap, Some(&acpm), Some(&pmucal), Some(&timer));
//! cal.init(Some(fvmap_sram))?;
//! cal.dfs_set_rate(exynos9820::cmu::DVFS_MIF, 1_794_000)?;
//! ```

use core::cell::Cell;

use kernel::debug;
use kernel::hil::acpm::AcpmChannel;
use kernel::hil::pmucal::PowerControl;
use kernel::hil::time::Time;
use kernel::utilities::spin_lock::SpinLock;
use kernel::ErrorCode;

use crate::chip_specific::ChipSpecs;
use crate::cmucal::{ClockId, ClockType};
use crate::fvmap::Fvmap;
use crate::ra::Ra;
use crate::vclk::VclkEngine;

pub struct CalIf<'a, C: ChipSpecs> {
    ra: &'a Ra<'a, C>,
    vclk: VclkEngine<'a, C>,
    fvmap: &'a Fvmap<'a, C>,
    acpm: Option<&'a dyn AcpmChannel>,
    pmucal: Option<&'a dyn PowerControl>,
    time: Option<&'a dyn Time>,
    cpu_lock: SpinLock,
    initialized: Cell<bool>,
}

impl<'a, C: ChipSpecs> CalIf<'a, C> {
    pub fn new(
        ra: &'a Ra<'a, C>,
        fvmap: &'a Fvmap<'a, C>,
        acpm: Option<&'a dyn AcpmChannel>,
        pmucal: Option<&'a dyn PowerControl>,
        time: Option<&'a dyn Time>,
    ) -> CalIf<'a, C> {
        CalIf {
            ra,
            vclk: VclkEngine::new(ra),
            fvmap,
            acpm,
            pmucal,
            time,
            cpu_lock: SpinLock::new(),
            initialized: Cell::new(false),
        }
    }

    pub fn vclk(&self) -> &VclkEngine<'a, C> {
        &self.vclk
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.get()
    }

    /// Cache vclk rates, bind the ACPM map when one is given and run the
    /// PMUCAL sequences. Only the first successful call has any effect.
    pub fn init(&self, fvmap: Option<&[u8]>) -> Result<(), ErrorCode> {
        if self.initialized.get() {
            return Ok(());
        }

        self.vclk.init();
        if let Some(map) = fvmap {
            match self.fvmap.init(map) {
                Ok(()) | Err(ErrorCode::ALREADY) => {}
                Err(e) => {
                    debug!("cal_if: fvmap init failed: {:?}", e);
                    return Err(e);
                }
            }
        }
        if let Some(pmucal) = self.pmucal {
            pmucal.init()?;
        }

        self.initialized.set(true);
        Ok(())
    }

    /// The ACPM channel, for ids of domains ACPM owns.
    fn acpm_for(&self, id: ClockId) -> Option<&'a dyn AcpmChannel> {
        self.acpm.filter(|_| id.is_acpm_vclk())
    }

    fn now_us(&self) -> u64 {
        self.time.map_or(0, |time| time.now_us())
    }

    pub fn clk_enable(&self, id: ClockId) -> Result<(), ErrorCode> {
        if id.is(ClockType::Vclk) {
            self.vclk.set_enable(id)
        } else {
            self.ra.set_enable(id, true)
        }
    }

    pub fn clk_disable(&self, id: ClockId) -> Result<(), ErrorCode> {
        if id.is(ClockType::Vclk) {
            self.vclk.set_disable(id)
        } else {
            self.ra.set_enable(id, false)
        }
    }

    pub fn clk_is_enabled(&self, id: ClockId) -> Result<bool, ErrorCode> {
        if id.is(ClockType::Vclk) {
            self.vclk.is_enabled(id)
        } else if self.ra.registry().get_node(id).is_some() {
            Ok(self.ra.get_value(id) != 0)
        } else {
            Err(ErrorCode::BADID)
        }
    }

    /// Rate of a node or vclk in Hz.
    pub fn clk_getrate(&self, id: ClockId) -> Result<u64, ErrorCode> {
        if id.is(ClockType::Vclk) {
            Ok(u64::from(self.vclk.recalc_rate(id)?) * 1000)
        } else if self.ra.registry().get_node(id).is_some() {
            Ok(self.ra.recalc_rate(id))
        } else {
            Err(ErrorCode::BADID)
        }
    }

    /// Set the rate of a node or vclk, in Hz.
    pub fn clk_setrate(&self, id: ClockId, rate_hz: u64) -> Result<(), ErrorCode> {
        if id.is(ClockType::Vclk) {
            let rate_khz = u32::try_from(rate_hz / 1000).map_err(|_| ErrorCode::INVAL)?;
            self.vclk.set_rate(id, rate_khz).map(|_| ())
        } else {
            self.ra.set_rate(id, rate_hz)
        }
    }

    /// Move a DVFS domain to `rate_khz`. Domains owned by ACPM are
    /// forwarded over the channel; without a channel they are driven
    /// locally. Returns the rate requested from ACPM or reached locally.
    pub fn dfs_set_rate(&self, id: ClockId, rate_khz: u32) -> Result<u32, ErrorCode> {
        let Some(acpm) = self.acpm_for(id) else {
            return self.vclk.set_rate(id, rate_khz);
        };
        let vclk = self.vclk.vclk(id)?;
        let start = self.now_us();
        match acpm.send(id.index() as u32, rate_khz) {
            Ok(()) => {
                vclk.cache_rate(rate_khz);
                Ok(rate_khz)
            }
            Err(e) => {
                debug!(
                    "cal_if: ACPM rate {} kHz for {} failed after {} us: {:?}",
                    rate_khz,
                    vclk.name(),
                    self.now_us().saturating_sub(start),
                    e
                );
                Err(e)
            }
        }
    }

    pub fn dfs_set_rate_switch(&self, id: ClockId, rate_khz: u32) -> Result<u32, ErrorCode> {
        self.vclk.set_rate_switch(id, rate_khz)
    }

    pub fn dfs_set_rate_restore(&self, id: ClockId, rate_khz: u32) -> Result<u32, ErrorCode> {
        self.vclk.set_rate_restore(id, rate_khz)
    }

    /// Rate read back from the hardware, or from ACPM for its domains.
    pub fn dfs_get_rate(&self, id: ClockId) -> Result<u32, ErrorCode> {
        match self.acpm_for(id) {
            Some(acpm) => {
                self.vclk.vclk(id)?;
                acpm.get_rate(id.index() as u32)
            }
            None => self.vclk.recalc_rate(id),
        }
    }

    /// The last rate set, without touching the hardware.
    pub fn dfs_cached_get_rate(&self, id: ClockId) -> Result<u32, ErrorCode> {
        self.vclk.get_rate(id)
    }

    pub fn dfs_get_max_freq(&self, id: ClockId) -> Result<u32, ErrorCode> {
        self.vclk.get_max_freq(id)
    }

    pub fn dfs_get_min_freq(&self, id: ClockId) -> Result<u32, ErrorCode> {
        self.vclk.get_min_freq(id)
    }

    pub fn dfs_get_boot_freq(&self, id: ClockId) -> Result<u32, ErrorCode> {
        self.vclk.get_boot_freq(id)
    }

    pub fn dfs_get_resume_freq(&self, id: ClockId) -> Result<u32, ErrorCode> {
        self.vclk.get_resume_freq(id)
    }

    pub fn dfs_get_rate_table(&self, id: ClockId, table: &mut [u32]) -> Result<usize, ErrorCode> {
        self.vclk.get_rate_table(id, table)
    }

    /// Voltage of every level. ACPM domains report the map's voltages with
    /// the margins applied, other domains their ASV table.
    pub fn dfs_get_asv_table(&self, id: ClockId, table: &mut [u32]) -> Result<usize, ErrorCode> {
        if id.is_acpm_vclk() && self.fvmap.is_initialized() {
            self.fvmap.get_voltage_table(id, table)
        } else {
            self.vclk.get_asv_table(id, table)
        }
    }

    pub fn dfs_get_lv_num(&self, id: ClockId) -> Result<usize, ErrorCode> {
        self.vclk.get_lv_num(id)
    }

    /// Apply an additive voltage margin to an ACPM domain.
    pub fn dfs_set_volt_margin(&self, id: ClockId, margin_uv: i32) -> Result<(), ErrorCode> {
        let acpm = self.acpm_for(id).ok_or(ErrorCode::NOSUPPORT)?;
        self.vclk.vclk(id)?;
        acpm.set_volt_margin(id.index() as u32, margin_uv)
    }

    pub fn qch_init(&self, id: ClockId, hwacg: bool) -> Result<(), ErrorCode> {
        self.vclk.qch_init(id, hwacg)
    }

    pub fn clkout_enable(&self, id: ClockId, on: bool) -> Result<(), ErrorCode> {
        self.ra.enable_clkout(id, on)
    }

    fn pmucal(&self) -> Result<&'a dyn PowerControl, ErrorCode> {
        self.pmucal.ok_or(ErrorCode::NOSUPPORT)
    }

    pub fn pd_control(&self, id: u32, on: bool) -> Result<(), ErrorCode> {
        self.pmucal()?.pd_control(id, on)
    }

    pub fn pd_status(&self, id: u32) -> bool {
        self.pmucal.is_some_and(|pmucal| pmucal.pd_status(id))
    }

    pub fn cpu_enable(&self, cpu: u32) -> Result<(), ErrorCode> {
        let pmucal = self.pmucal()?;
        let _guard = self.cpu_lock.lock();
        pmucal.cpu_enable(cpu)
    }

    pub fn cpu_disable(&self, cpu: u32) -> Result<(), ErrorCode> {
        let pmucal = self.pmucal()?;
        let _guard = self.cpu_lock.lock();
        pmucal.cpu_disable(cpu)
    }

    pub fn cpu_is_enabled(&self, cpu: u32) -> bool {
        let _guard = self.cpu_lock.lock();
        self.pmucal.is_some_and(|pmucal| pmucal.cpu_is_enabled(cpu))
    }

    pub fn cluster_enable(&self, cluster: u32) -> Result<(), ErrorCode> {
        let pmucal = self.pmucal()?;
        let _guard = self.cpu_lock.lock();
        pmucal.cluster_enable(cluster)
    }

    pub fn cluster_disable(&self, cluster: u32) -> Result<(), ErrorCode> {
        let pmucal = self.pmucal()?;
        let _guard = self.cpu_lock.lock();
        pmucal.cluster_disable(cluster)
    }

    pub fn cluster_is_enabled(&self, cluster: u32) -> bool {
        let _guard = self.cpu_lock.lock();
        self.pmucal
            .is_some_and(|pmucal| pmucal.cluster_is_enabled(cluster))
    }
}
