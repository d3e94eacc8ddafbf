//! Cancellable periodic drivers
//!
//! The frame tick and the pipe spawner are two independent fixed-interval
//! timers. They are owned as a pair so that starting or stopping a run can
//! never leave one of them behind.

/// Fixed-interval timer fed with elapsed wall time
#[derive(Debug, Clone)]
pub struct PeriodicTimer {
    /// Seconds between fires
    interval: f32,
    /// Time accumulated toward the next fire
    accumulator: f32,
    active: bool,
}

impl PeriodicTimer {
    /// Create a stopped timer
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            accumulator: 0.0,
            active: false,
        }
    }

    /// (Re)start from zero; the first fire is one full interval away
    pub fn start(&mut self) {
        self.accumulator = 0.0;
        self.active = true;
    }

    /// Stop and forget any partial interval
    pub fn cancel(&mut self) {
        self.accumulator = 0.0;
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Feed `dt` seconds and return how many intervals elapsed, at most
    /// `max_fires`. Time beyond the cap stays queued for the next call.
    pub fn advance(&mut self, dt: f32, max_fires: u32) -> u32 {
        if !self.active {
            return 0;
        }
        self.accumulator += dt.max(0.0);

        let mut fires = 0;
        while self.accumulator >= self.interval && fires < max_fires {
            self.accumulator -= self.interval;
            fires += 1;
        }
        fires
    }

    /// Consume a single pending fire, if one is due
    pub fn poll(&mut self) -> bool {
        if self.active && self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            true
        } else {
            false
        }
    }
}

/// The two drivers of a run
#[derive(Debug, Clone)]
pub struct Drivers {
    pub frame: PeriodicTimer,
    pub spawn: PeriodicTimer,
}

impl Drivers {
    pub fn new(tick_dt: f32, spawn_interval: f32) -> Self {
        Self {
            frame: PeriodicTimer::new(tick_dt),
            spawn: PeriodicTimer::new(spawn_interval),
        }
    }

    /// Start both drivers together
    pub fn start_all(&mut self) {
        self.frame.start();
        self.spawn.start();
    }

    /// Stop both drivers together
    pub fn cancel_all(&mut self) {
        self.frame.cancel();
        self.spawn.cancel();
    }

    pub fn any_active(&self) -> bool {
        self.frame.is_active() || self.spawn.is_active()
    }
}
