//! Four push buttons on PE2..PE5, wired to ground with internal pull-ups.
use stm32f4::stm32f429 as pac;

use crate::gpio::{with_field, MODE_INPUT, PULL_UP};
use pong_duel::game::InputDevice;

// PE2 = left paddle toward x = 0, PE3 = left toward x = max,
// PE4 = right toward x = 0, PE5 = right toward x = max
const FIRST_PIN: u32 = 2;
const PIN_COUNT: u32 = 4;

pub struct ButtonBank {
    gpioe: pac::GPIOE,
}

impl ButtonBank {
    pub fn new(gpioe: pac::GPIOE, rcc: &pac::RCC) -> Self {
        rcc.ahb1enr.modify(|_, w| w.gpioeen().enabled());
        ButtonBank { gpioe }
    }
}

impl InputDevice for ButtonBank {
    type Error = ();

    fn init(&mut self) -> Result<(), Self::Error> {
        for pin in FIRST_PIN..FIRST_PIN + PIN_COUNT {
            self.gpioe.moder.modify(|r, w| unsafe { w.bits(with_field(r.bits(), pin, 2, MODE_INPUT)) });
            self.gpioe.pupdr.modify(|r, w| unsafe { w.bits(with_field(r.bits(), pin, 2, PULL_UP)) });
        }
        Ok(())
    }

    /// IDR bits 2..5 shifted down to bits 0..3; released buttons read high.
    fn read_buttons(&mut self) -> Result<u8, Self::Error> {
        let idr = self.gpioe.idr.read().bits();
        Ok(((idr >> FIRST_PIN) & ((1 << PIN_COUNT) - 1)) as u8)
    }
}
