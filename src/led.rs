//! Green user LED (PG13), lit while the main context is awake.
use stm32f4::stm32f429 as pac;

use crate::gpio::{with_field, MODE_OUTPUT};

const LED_PIN: u32 = 13;

pub struct Led {
    gpiog: pac::GPIOG,
}

impl Led {
    pub fn new(gpiog: pac::GPIOG, rcc: &pac::RCC) -> Self {
        rcc.ahb1enr.modify(|_, w| w.gpiogen().enabled());
        gpiog.moder.modify(|r, w| unsafe { w.bits(with_field(r.bits(), LED_PIN, 2, MODE_OUTPUT)) });
        let mut led = Led { gpiog };
        led.on();
        led
    }

    pub fn on(&mut self) {
        self.gpiog.bsrr.write(|w| unsafe { w.bits(1 << LED_PIN) });
    }

    pub fn off(&mut self) {
        self.gpiog.bsrr.write(|w| unsafe { w.bits(1 << (LED_PIN + 16)) });
    }
}
