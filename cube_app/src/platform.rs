//! Headless platform: a fixed-step clock and a scripted input tour

use lumen_engine::foundation::time::{Clock, ManualClock};
use lumen_engine::input::KeyCode;
use lumen_engine::{AppEvent, EngineError, Platform};

/// Runs a fixed number of frames without a window
///
/// The script flies forward for the first quarter of the run, strafes right
/// for the second, and sweeps the mouse in a slow circle throughout.
pub struct HeadlessPlatform {
    clock: ManualClock,
    frame_time: f64,
    frame: u32,
    frame_limit: u32,
}

impl HeadlessPlatform {
    pub fn new(frame_limit: u32, frames_per_second: f64) -> Self {
        Self {
            clock: ManualClock::new(0.0),
            frame_time: 1.0 / frames_per_second,
            frame: 0,
            frame_limit,
        }
    }

    /// Frames presented so far
    pub const fn frames_presented(&self) -> u32 {
        self.frame
    }

    fn scripted_events(&self) -> Vec<AppEvent> {
        let quarter = (self.frame_limit / 4).max(1);
        let mut events = Vec::new();

        let key = |key, pressed| AppEvent::KeyInput { key, pressed };
        if self.frame == 1 {
            events.push(key(KeyCode::W, true));
        } else if self.frame == quarter {
            events.push(key(KeyCode::W, false));
            events.push(key(KeyCode::D, true));
        } else if self.frame == 2 * quarter {
            events.push(key(KeyCode::D, false));
        }

        let angle = f64::from(self.frame) * 0.05;
        events.push(AppEvent::MouseMoved {
            x: 400.0 + 50.0 * angle.cos(),
            y: 300.0 + 20.0 * angle.sin(),
        });

        if self.frame >= self.frame_limit {
            events.push(AppEvent::WindowCloseRequested);
        }
        events
    }
}

impl Clock for HeadlessPlatform {
    fn now(&self) -> f64 {
        self.clock.now()
    }
}

impl Platform for HeadlessPlatform {
    fn poll_events(&mut self) -> Vec<AppEvent> {
        self.scripted_events()
    }

    fn present(&mut self) -> Result<(), EngineError> {
        self.frame += 1;
        self.clock.advance(self.frame_time);
        log::trace!("Presented frame {}", self.frame);
        Ok(())
    }
}
