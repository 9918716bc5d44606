//! Piezo buzzer on PB4, driven by TIM3 channel 1 in PWM mode.
//!
//! TIM3 counts at 1 MHz; a tone is a 50% duty square wave with the period
//! set through ARR. With the `mute` feature the pin is never configured and
//! every call is a no-op.
use stm32f4::stm32f429 as pac;

#[cfg(not(feature = "mute"))]
use crate::gpio::{with_field, MODE_ALTERNATE};
use pong_duel::audio::Speaker;

#[cfg(not(feature = "mute"))]
const BUZZER_PIN: u32 = 4;
#[cfg(not(feature = "mute"))]
const TIM3_AF: u32 = 2;
// APB1 timer clock 84 MHz / (83 + 1)
#[cfg(not(feature = "mute"))]
const PRESCALER: u32 = 83;
#[cfg(not(feature = "mute"))]
const COUNT_HZ: u32 = 1_000_000;
#[cfg(not(feature = "mute"))]
const OC1M_PWM1: u32 = 0b110 << 4;
#[cfg(not(feature = "mute"))]
const OC1PE: u32 = 1 << 3;

pub struct Buzzer {
    #[cfg_attr(feature = "mute", allow(dead_code))]
    tim: pac::TIM3,
}

impl Buzzer {
    #[cfg(not(feature = "mute"))]
    pub fn new(tim: pac::TIM3, gpiob: pac::GPIOB, rcc: &pac::RCC) -> Self {
        rcc.ahb1enr.modify(|_, w| w.gpioben().enabled());
        rcc.apb1enr.modify(|_, w| w.tim3en().enabled());

        gpiob.moder.modify(|r, w| unsafe { w.bits(with_field(r.bits(), BUZZER_PIN, 2, MODE_ALTERNATE)) });
        gpiob.afrl.modify(|r, w| unsafe { w.bits(with_field(r.bits(), BUZZER_PIN, 4, TIM3_AF)) });

        tim.psc.write(|w| unsafe { w.bits(PRESCALER) });
        tim.ccmr1_output().write(|w| unsafe { w.bits(OC1M_PWM1 | OC1PE) });
        tim.ccr1.write(|w| unsafe { w.bits(0) });
        tim.ccer.write(|w| w.cc1e().set_bit());
        tim.cr1.write(|w| w.arpe().set_bit().cen().set_bit());
        Buzzer { tim }
    }

    #[cfg(feature = "mute")]
    pub fn new(tim: pac::TIM3, _gpiob: pac::GPIOB, _rcc: &pac::RCC) -> Self {
        Buzzer { tim }
    }
}

impl Speaker for Buzzer {
    #[cfg(not(feature = "mute"))]
    fn set_tone(&mut self, hz: u32) {
        let period = COUNT_HZ / hz.max(1) - 1;
        self.tim.arr.write(|w| unsafe { w.bits(period) });
        self.tim.ccr1.write(|w| unsafe { w.bits(period / 2) });
        self.tim.egr.write(|w| w.ug().set_bit());
    }

    #[cfg(not(feature = "mute"))]
    fn stop_tone(&mut self) {
        self.tim.ccr1.write(|w| unsafe { w.bits(0) });
    }

    #[cfg(feature = "mute")]
    fn set_tone(&mut self, _hz: u32) {}

    #[cfg(feature = "mute")]
    fn stop_tone(&mut self) {}
}
