//! ILI9341 panel on SPI5, driven in MCU (command/GRAM) mode.
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::RawData;
use stm32f4::stm32f429 as pac;

use crate::gpio::{with_field, MODE_ALTERNATE, MODE_OUTPUT, SPEED_HIGH};
use pong_duel::geometry::Region;
use pong_duel::render::PixelSink;

const ILI_PWR_CTL_1: u8 = 0xc0;
const ILI_PWR_CTL_2: u8 = 0xc1;
const ILI_VCOM_CTL_1: u8 = 0xc5;
const ILI_VCOM_CTL_2: u8 = 0xc7;
const ILI_MEM_ACC_CTL: u8 = 0x36;
const ILI_PIXEL_FORMAT: u8 = 0x3a;
const ILI_RGB_IFC_CTL: u8 = 0xb0;
const ILI_IFC_CTL: u8 = 0xf6;
const ILI_GAMMA_SET: u8 = 0x26;
const ILI_POS_GAMMA: u8 = 0xe0;
const ILI_NEG_GAMMA: u8 = 0xe1;
const ILI_SLEEP_OUT: u8 = 0x11;
const ILI_DISP_ON: u8 = 0x29;
const ILI_COLUMN_ADDR: u8 = 0x2a;
const ILI_PAGE_ADDR: u8 = 0x2b;
const ILI_MEM_WRITE: u8 = 0x2c;

const CS_PIN: u32 = 2; // PC2
const DCX_PIN: u32 = 13; // PD13
const SPI_PINS: [u32; 2] = [7, 9]; // PF7 = SCK, PF9 = MOSI, both AF5
const SPI5_AF: u32 = 5;

pub struct Ili9341 {
    spi: pac::SPI5,
    gpioc: pac::GPIOC,
    gpiod: pac::GPIOD,
}

impl Ili9341 {
    /// Configure pins and SPI5, then run the panel's power-up sequence.
    pub fn new(spi: pac::SPI5, gpioc: pac::GPIOC, gpiod: pac::GPIOD, gpiof: pac::GPIOF, rcc: &pac::RCC) -> Self {
        rcc.ahb1enr.modify(|_, w| w.gpiocen().enabled().gpioden().enabled().gpiofen().enabled());
        rcc.apb2enr.modify(|_, w| w.spi5en().enabled());

        gpioc.moder.modify(|r, w| unsafe { w.bits(with_field(r.bits(), CS_PIN, 2, MODE_OUTPUT)) });
        gpioc.ospeedr.modify(|r, w| unsafe { w.bits(with_field(r.bits(), CS_PIN, 2, SPEED_HIGH)) });
        gpiod.moder.modify(|r, w| unsafe { w.bits(with_field(r.bits(), DCX_PIN, 2, MODE_OUTPUT)) });
        gpiod.ospeedr.modify(|r, w| unsafe { w.bits(with_field(r.bits(), DCX_PIN, 2, SPEED_HIGH)) });
        for pin in SPI_PINS {
            gpiof.moder.modify(|r, w| unsafe { w.bits(with_field(r.bits(), pin, 2, MODE_ALTERNATE)) });
            gpiof.ospeedr.modify(|r, w| unsafe { w.bits(with_field(r.bits(), pin, 2, SPEED_HIGH)) });
            if pin < 8 {
                gpiof.afrl.modify(|r, w| unsafe { w.bits(with_field(r.bits(), pin, 4, SPI5_AF)) });
            } else {
                gpiof.afrh.modify(|r, w| unsafe { w.bits(with_field(r.bits(), pin - 8, 4, SPI5_AF)) });
            }
        }

        // master, fPCLK/4, mode 0, software NSS
        spi.cr1.modify(|_, w| w.spe().clear_bit());
        spi.cr1.modify(|_, w| w
            .mstr().set_bit()
            .br().div4()
            .ssm().set_bit()
            .ssi().set_bit()
            .cpol().clear_bit()
            .cpha().clear_bit()
            .bidimode().clear_bit()
        );

        let mut lcd = Ili9341 { spi, gpioc, gpiod };
        lcd.deselect();
        lcd.set_data();
        lcd.spi.cr1.modify(|_, w| w.spe().set_bit());
        lcd.power_up();
        lcd
    }

    fn power_up(&mut self) {
        self.command(ILI_PWR_CTL_1, &[0x10]);
        self.command(ILI_PWR_CTL_2, &[0x10]);
        self.command(ILI_VCOM_CTL_1, &[0x45, 0x15]);
        self.command(ILI_VCOM_CTL_2, &[0x90]);
        // portrait, BGR panel
        self.command(ILI_MEM_ACC_CTL, &[0x08]);
        // GRAM written over SPI, no RGB bypass
        self.command(ILI_RGB_IFC_CTL, &[0x00]);
        self.command(ILI_IFC_CTL, &[0x01, 0x00, 0x00]);
        self.command(ILI_PIXEL_FORMAT, &[0x55]);
        self.command(ILI_GAMMA_SET, &[0x01]);
        self.command(
            ILI_POS_GAMMA,
            &[0x0F, 0x29, 0x24, 0x0C, 0x0E, 0x09, 0x4E, 0x78, 0x3C, 0x09, 0x13, 0x05, 0x17, 0x11, 0x00],
        );
        self.command(
            ILI_NEG_GAMMA,
            &[0x00, 0x16, 0x1B, 0x04, 0x11, 0x07, 0x31, 0x33, 0x42, 0x05, 0x0C, 0x0A, 0x28, 0x2F, 0x0F],
        );
        self.command(ILI_SLEEP_OUT, &[]);
        crate::clock::delay_ms(120);
        self.command(ILI_DISP_ON, &[]);
    }

    fn select(&mut self) {
        self.gpioc.bsrr.write(|w| w.br2().set_bit());
    }

    fn deselect(&mut self) {
        self.gpioc.bsrr.write(|w| w.bs2().set_bit());
    }

    fn set_data(&mut self) {
        self.gpiod.bsrr.write(|w| w.bs13().set_bit());
    }

    fn set_cmd(&mut self) {
        self.gpiod.bsrr.write(|w| w.br13().set_bit());
    }

    fn send_byte(&mut self, b: u8) {
        while self.spi.sr.read().txe().bit_is_clear() {}
        self.spi.dr.write(|w| w.dr().bits(b.into()));
        while self.spi.sr.read().bsy().bit_is_set() {}
        let _ = self.spi.dr.read().dr().bits();
    }

    /// Send a command byte and its parameters; CS is left low and D/CX in
    /// data mode so GRAM writes can stream after `ILI_MEM_WRITE`.
    fn start(&mut self, cmd: u8, params: &[u8]) {
        self.deselect();
        self.select();
        self.set_cmd();
        self.send_byte(cmd);
        self.set_data();
        for &b in params {
            self.send_byte(b);
        }
    }

    fn command(&mut self, cmd: u8, params: &[u8]) {
        self.start(cmd, params);
        self.deselect();
    }
}

impl PixelSink for Ili9341 {
    fn set_area(&mut self, area: Region) {
        let [x0h, x0l] = (area.top_left.x as u16).to_be_bytes();
        let [x1h, x1l] = (area.bot_right.x as u16).to_be_bytes();
        let [y0h, y0l] = (area.top_left.y as u16).to_be_bytes();
        let [y1h, y1l] = (area.bot_right.y as u16).to_be_bytes();
        self.command(ILI_COLUMN_ADDR, &[x0h, x0l, x1h, x1l]);
        self.command(ILI_PAGE_ADDR, &[y0h, y0l, y1h, y1l]);
        self.start(ILI_MEM_WRITE, &[]);
    }

    fn write_pixel(&mut self, color: Rgb565) {
        let [hi, lo] = RawU16::from(color).into_inner().to_be_bytes();
        self.send_byte(hi);
        self.send_byte(lo);
    }
}
