#![no_std]
#![no_main]

use core::cell::RefCell;

use cortex_m::asm;
use cortex_m_rt::{entry, exception};
use critical_section::Mutex;
use log::{error, info, warn};
use panic_halt as _;
use stm32f4::stm32f429 as pac;

mod buttons;
mod buzzer;
mod clock;
mod gpio;
mod lcd_spi;
mod led;
mod logger;

use buttons::ButtonBank;
use pong_duel::game::{Game, InputDevice};
use pong_duel::input_device::BUTTONS_RELEASED;
use pong_duel::scheduler::FrameScheduler;
use pong_duel::score::Phase;

static SCHEDULER: FrameScheduler = FrameScheduler::new();
// Only the SysTick handler reads the buttons once the game is running
static BUTTONS: Mutex<RefCell<Option<ButtonBank>>> = Mutex::new(RefCell::new(None));

#[entry]
fn main() -> ! {
    logger::init();

    let (Some(cp), Some(dp)) = (cortex_m::Peripherals::take(), pac::Peripherals::take()) else {
        error!("peripherals already taken");
        park();
    };

    clock::setup_system_clocks(&dp.RCC, &dp.PWR, &dp.FLASH);

    let display = lcd_spi::Ili9341::new(dp.SPI5, dp.GPIOC, dp.GPIOD, dp.GPIOF, &dp.RCC);
    let speaker = buzzer::Buzzer::new(dp.TIM3, dp.GPIOB, &dp.RCC);
    let mut led = led::Led::new(dp.GPIOG, &dp.RCC);

    let mut buttons = ButtonBank::new(dp.GPIOE, &dp.RCC);
    if buttons.init().is_err() {
        warn!("button bank init failed, paddles will not move");
    }
    critical_section::with(|cs| BUTTONS.borrow(cs).replace(Some(buttons)));

    let mut game = Game::init(display, speaker);

    let mut syst = cp.SYST;
    clock::start_frame_timer(&mut syst);
    info!("frame timer running");

    loop {
        let paddles = SCHEDULER.wait_for_frame(|| {
            led.off();
            asm::wfi();
            led.on();
        });
        if game.tick(paddles, &SCHEDULER) == Phase::GameOver {
            clock::stop_frame_timer(&mut syst);
            game.finish(clock::delay_ms);
            led.off();
            park();
        }
    }
}

fn park() -> ! {
    loop {
        asm::wfi();
    }
}

#[exception]
fn SysTick() {
    SCHEDULER.on_timer(|| {
        critical_section::with(|cs| {
            BUTTONS
                .borrow_ref_mut(cs)
                .as_mut()
                .and_then(|bank| bank.read_buttons().ok())
                .unwrap_or(BUTTONS_RELEASED)
        })
    });
}
