use std::fmt;

use slotmap::{new_key_type, SlotMap};

use crate::error::Result;

new_key_type! {
    /// Handle to a scheduled timer. Stale after the timer is removed or a
    /// one-shot timer has fired.
    pub struct TimerId;
}

/// Timer callback. Receives the firing timer's id and the tick context.
pub type TimerCallback<C> = Box<dyn FnMut(TimerId, &mut C) -> Result<()>>;

struct Timer<C> {
    timeout: f32,
    countdown: f32,
    repeat: bool,
    callback: TimerCallback<C>,
}

/// Countdown timers advanced by frame intervals.
///
/// `C` is the context handed to callbacks on every [`tick`](Self::tick); the
/// stage passes its scene. Freed slots are reused by later `add_timer` calls;
/// ids are generational, so an old id never reaches the new timer.
pub struct TimerQueue<C> {
    timers: SlotMap<TimerId, Timer<C>>,
}

impl<C> Default for TimerQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for TimerQueue<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerQueue").field("timers", &self.timers.len()).finish()
    }
}

impl<C> TimerQueue<C> {
    pub fn new() -> Self {
        Self { timers: SlotMap::with_key() }
    }

    /// Schedules `callback` to run after `timeout_sec`; with `repeat` it then
    /// runs every `timeout_sec` until removed.
    pub fn add_timer(
        &mut self,
        timeout_sec: f32,
        repeat: bool,
        callback: impl FnMut(TimerId, &mut C) -> Result<()> + 'static,
    ) -> TimerId {
        self.timers.insert(Timer {
            timeout: timeout_sec,
            countdown: timeout_sec,
            repeat,
            callback: Box::new(callback),
        })
    }

    /// Returns `false` when `id` is not scheduled.
    pub fn remove_timer(&mut self, id: TimerId) -> bool {
        self.timers.remove(id).is_some()
    }

    pub fn contains(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Counts every timer down by `interval_sec` and fires the expired ones.
    ///
    /// A timer fires when its countdown reaches zero. Repeating timers restart
    /// from their full timeout; one-shot timers are removed. At most one firing
    /// per timer per tick. A callback error is returned once the firing timer
    /// has been rescheduled or removed; later timers wait for the next tick.
    pub fn tick(&mut self, interval_sec: f32, ctx: &mut C) -> Result<()> {
        let ids: Vec<TimerId> = self.timers.keys().collect();
        for id in ids {
            let Some(timer) = self.timers.get_mut(id) else { continue };
            timer.countdown -= interval_sec;
            if timer.countdown > 0.0 {
                continue;
            }

            let res = (timer.callback)(id, ctx);
            if timer.repeat {
                timer.countdown = timer.timeout;
            } else {
                self.timers.remove(id);
            }
            res?;
        }
        Ok(())
    }
}
