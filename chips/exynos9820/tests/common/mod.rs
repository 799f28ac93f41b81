// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Fakes shared by the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use exynos9820::cmucal::{ClockId, Registry, RegistryBuilder};
use exynos9820::ra::RaClient;
use exynos9820::sfr::emulated::EmulatedSfrSpace;
use exynos9820::SOC;
use kernel::hil::acpm::AcpmChannel;
use kernel::hil::sfr::PmuUpdate;
use kernel::hil::time::{Delay, Time};
use kernel::ErrorCode;

/// Emulated CMU windows of the 9820 with PLL lock emulation.
pub fn space() -> EmulatedSfrSpace {
    let space = EmulatedSfrSpace::new(SOC.blocks);
    space.emulate_pll_locks(&SOC);
    space
}

pub fn registry(space: &EmulatedSfrSpace) -> Registry<'_> {
    RegistryBuilder::new(&SOC).build(&space).unwrap()
}

pub struct NoDelay;

impl Delay for NoDelay {
    fn udelay(&self, _us: u32) {}
}

pub struct TickingTime(pub Cell<u64>);

impl Time for TickingTime {
    fn now_us(&self) -> u64 {
        let now = self.0.get();
        self.0.set(now + 1);
        now
    }
}

#[derive(Default)]
pub struct FakePmu {
    pub updates: RefCell<Vec<(u32, u32, u32)>>,
}

impl PmuUpdate for FakePmu {
    fn update(&self, offset: u32, mask: u32, value: u32) -> Result<(), ErrorCode> {
        self.updates.borrow_mut().push((offset, mask, value));
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Value(ClockId, u32),
    Enable(ClockId, bool),
}

#[derive(Default)]
pub struct Recorder {
    events: RefCell<Vec<Event>>,
}

impl Recorder {
    pub fn take(&self) -> Vec<Event> {
        self.events.take()
    }
}

impl RaClient for Recorder {
    fn value_set(&self, id: ClockId, value: u32) {
        self.events.borrow_mut().push(Event::Value(id, value));
    }

    fn enable_set(&self, id: ClockId, on: bool) {
        self.events.borrow_mut().push(Event::Enable(id, on));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AcpmCall {
    Send(u32, u32),
    VoltMargin(u32, i32),
    PercentMargin(u32, i32),
}

#[derive(Default)]
pub struct FakeAcpm {
    calls: RefCell<Vec<AcpmCall>>,
    pub rate: Cell<u32>,
    pub fail: Cell<bool>,
}

impl FakeAcpm {
    pub fn take(&self) -> Vec<AcpmCall> {
        self.calls.take()
    }

    fn record(&self, call: AcpmCall) -> Result<(), ErrorCode> {
        self.calls.borrow_mut().push(call);
        if self.fail.get() {
            Err(ErrorCode::FAIL)
        } else {
            Ok(())
        }
    }
}

impl AcpmChannel for FakeAcpm {
    fn send(&self, id: u32, rate_khz: u32) -> Result<(), ErrorCode> {
        self.record(AcpmCall::Send(id, rate_khz))
    }

    fn get_rate(&self, _id: u32) -> Result<u32, ErrorCode> {
        Ok(self.rate.get())
    }

    fn set_volt_margin(&self, id: u32, margin_uv: i32) -> Result<(), ErrorCode> {
        self.record(AcpmCall::VoltMargin(id, margin_uv))
    }

    fn set_percent_margin(&self, id: u32, percent: i32) -> Result<(), ErrorCode> {
        self.record(AcpmCall::PercentMargin(id, percent))
    }
}
