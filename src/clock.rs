use std::thread::sleep;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct FrameClock {
    target: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(target: Duration) -> Self {
        FrameClock { target, last: Instant::now() }
    }

    pub fn from_fps(fps: u32) -> Self {
        FrameClock::new(Duration::from_secs(1) / fps.max(1))
    }

    pub fn target(&self) -> Duration {
        self.target
    }

    pub fn elapsed(&self) -> Duration {
        self.last.elapsed()
    }

    /// Sleeps out whatever is left of the current frame, then returns the seconds
    /// since the previous call, sleep included.
    pub fn tick(&mut self) -> f32 {
        let real = self.elapsed();
        if real < self.target {
            sleep(self.target - real);
        }

        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;
        dt.as_secs_f32()
    }
}
