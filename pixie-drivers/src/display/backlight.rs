//! Backlight control

use embedded_hal::pwm::SetDutyCycle;

/// Panel backlight
pub trait Backlight {
    /// Set brightness in percent (values above 100 are clamped)
    fn set_level(&mut self, percent: u8);

    /// Current brightness in percent
    fn level(&self) -> u8;
}

/// Backlight wired permanently on
#[derive(Debug, Default)]
pub struct NoBacklight;

impl Backlight for NoBacklight {
    fn set_level(&mut self, _percent: u8) {}

    fn level(&self) -> u8 {
        100
    }
}

/// Backlight driven by a PWM channel
pub struct PwmBacklight<P> {
    pwm: P,
    level: u8,
}

impl<P: SetDutyCycle> PwmBacklight<P> {
    /// Wrap a PWM channel; the backlight starts off
    pub fn new(pwm: P) -> Self {
        let mut backlight = Self { pwm, level: 0 };
        backlight.set_level(0);
        backlight
    }
}

impl<P: SetDutyCycle> Backlight for PwmBacklight<P> {
    fn set_level(&mut self, percent: u8) {
        let percent = percent.min(100);
        // A PWM error leaves the previous duty cycle in place
        if self.pwm.set_duty_cycle_percent(percent).is_ok() {
            self.level = percent;
        }
    }

    fn level(&self) -> u8 {
        self.level
    }
}
