// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Bounded busy-wait polling.
//!
//! Hardware completion bits (PLL lock, mux and divider busy) settle within a
//! few microseconds, so waiting for them is a tight spin with a fixed
//! iteration budget rather than a sleep.

use crate::hil::time::Delay;
use crate::ErrorCode;

/// Poll `done` until it returns `true`, waiting `interval_us` between
/// attempts, for at most `max_iters` attempts.
///
/// + [Ok]\(()\): `done` returned `true`.
/// + [Err]\([ErrorCode::TIMEOUT]\): the budget ran out first.
pub fn poll_until<F>(
    delay: &dyn Delay,
    interval_us: u32,
    max_iters: u32,
    mut done: F,
) -> Result<(), ErrorCode>
where
    F: FnMut() -> bool,
{
    for _ in 0..max_iters {
        if done() {
            return Ok(());
        }
        delay.udelay(interval_us);
    }
    Err(ErrorCode::TIMEOUT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct CountingDelay {
        waited: Cell<u32>,
    }

    impl Delay for CountingDelay {
        fn udelay(&self, us: u32) {
            self.waited.set(self.waited.get() + us);
        }
    }

    #[test]
    fn succeeds_once_condition_holds() {
        let delay = CountingDelay { waited: Cell::new(0) };
        let mut polls = 0;
        let result = poll_until(&delay, 1, 100, || {
            polls += 1;
            polls == 5
        });
        assert_eq!(result, Ok(()));
        assert_eq!(delay.waited.get(), 4);
    }

    #[test]
    fn times_out_after_budget() {
        let delay = CountingDelay { waited: Cell::new(0) };
        let result = poll_until(&delay, 1, 400, || false);
        assert_eq!(result, Err(ErrorCode::TIMEOUT));
        assert_eq!(delay.waited.get(), 400);
    }
}
