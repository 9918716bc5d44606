//! Core clock tree, the SysTick frame timer and a busy-wait delay.
use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;
use stm32f4::stm32f429 as pac;

use pong_duel::config::TIMER_HZ;

pub const CORE_HZ: u32 = 168_000_000;

// 8 MHz HSE / M * N / P = 168 MHz; Q = 7 gives 48 MHz for USB
const PLL_M: u32 = 8;
const PLL_N: u32 = 336;
const PLL_P_DIV2: u32 = 0b00;
const PLL_Q: u32 = 7;

/// Run the core at 168 MHz from the 8 MHz crystal. AHB = 168 MHz,
/// APB1 = 42 MHz, APB2 = 84 MHz (timers on both buses see twice that).
pub fn setup_system_clocks(rcc: &pac::RCC, pwr: &pac::PWR, flash: &pac::FLASH) {
    rcc.cr.modify(|_, w| w.hseon().on());
    while rcc.cr.read().hserdy().is_not_ready() {}

    // VOS scale 1 is required above 144 MHz
    rcc.apb1enr.modify(|_, w| w.pwren().enabled());
    pwr.cr.modify(|_, w| unsafe { w.vos().bits(0b11) });

    flash.acr.modify(|_, w| w
        .latency().ws5()
        .icen().set_bit()
        .dcen().set_bit()
        .prften().set_bit()
    );

    rcc.cfgr.modify(|_, w| w
        .hpre().div1()
        .ppre1().div4()
        .ppre2().div2()
    );

    let pllcfgr = (1 << 22) // PLLSRC = HSE
        | (PLL_M & 0x3F)
        | ((PLL_N & 0x1FF) << 6)
        | (PLL_P_DIV2 << 16)
        | ((PLL_Q & 0x0F) << 24);
    rcc.pllcfgr.write(|w| unsafe { w.bits(pllcfgr) });

    rcc.cr.modify(|_, w| w.pllon().on());
    while rcc.cr.read().pllrdy().is_not_ready() {}

    rcc.cfgr.modify(|_, w| w.sw().pll());
    while !rcc.cfgr.read().sws().is_pll() {}

    rcc.cr.modify(|_, w| w.hsion().off());
}

/// Start SysTick at [`TIMER_HZ`] with its exception enabled. The handler
/// lives in `main.rs`.
pub fn start_frame_timer(syst: &mut SYST) {
    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(CORE_HZ / TIMER_HZ - 1);
    syst.clear_current();
    syst.enable_interrupt();
    syst.enable_counter();
}

/// Silence the frame timer for good.
pub fn stop_frame_timer(syst: &mut SYST) {
    syst.disable_interrupt();
    syst.disable_counter();
}

/// Busy-wait; independent of SysTick so it keeps working after the frame
/// timer is stopped.
pub fn delay_ms(ms: u32) {
    cortex_m::asm::delay((CORE_HZ / 1_000).saturating_mul(ms));
}
