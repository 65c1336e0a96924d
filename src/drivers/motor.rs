use embassy_stm32::gpio::{AnyPin, Output};
use embassy_stm32::peripherals::TIM3;
use embassy_stm32::timer::simple_pwm::SimplePwm;
use embassy_stm32::timer::Channel;
use embassy_time::{Duration, Timer};

use leveler_core::control::DriveCommand;

/// Relay settle time after toggling a direction line.
const SETTLE: Duration = Duration::from_millis(1);

/// Forward/reverse relay lines plus the PWM enable input of the drive.
///
/// The two direction lines are not interlocked in hardware: the opposite line
/// is always dropped before the new one is raised, and `SETTLE` elapses
/// before the next command may touch them.
pub struct MotorDrive {
    fwd: Output<'static, AnyPin>,
    rev: Output<'static, AnyPin>,
    pwm: SimplePwm<'static, TIM3>,
    channel: Channel,
}

impl MotorDrive {
    pub fn new(
        fwd: Output<'static, AnyPin>,
        rev: Output<'static, AnyPin>,
        mut pwm: SimplePwm<'static, TIM3>,
        channel: Channel,
    ) -> Self {
        pwm.enable(channel);
        Self {
            fwd,
            rev,
            pwm,
            channel,
        }
    }

    /// Duty of the enable input. Set once at startup; the control loop only
    /// ever switches direction.
    pub fn set_duty_percent(&mut self, percent: u8) {
        let max = self.pwm.get_max_duty() as u32;
        let duty = max * (percent.min(100) as u32) / 100;
        self.pwm.set_duty(self.channel, duty as u16);
    }

    /// Apply a direction command. Safe to re-apply the same command every
    /// cycle; each call pays the settle delay.
    pub async fn set_direction(&mut self, cmd: DriveCommand) {
        match cmd {
            DriveCommand::Forward => {
                self.rev.set_low();
                self.fwd.set_high();
            }
            DriveCommand::Reverse => {
                self.fwd.set_low();
                self.rev.set_high();
            }
            DriveCommand::Stop => {
                self.fwd.set_low();
                self.rev.set_low();
            }
        }
        Timer::after(SETTLE).await;
    }
}
