#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::{Delay, Duration, Timer};
use smart_leds::hsv::{Hsv, hsv2rgb};
use static_cell::StaticCell;
use ws28xx_pwm::nrf::{NrfPwmEngine, PWM_CLOCK_MHZ};
use ws28xx_pwm::{ProtocolTiming, Strip, StripConfig, buffer_len};
use {defmt_rtt as _, panic_probe as _};

const NUM_LEDS: usize = 8;
const BUFFER_SIZE: usize = buffer_len(NUM_LEDS);
static LED_BUFFER: StaticCell<[u16; BUFFER_SIZE]> = StaticCell::new();
static DMA_BUFFER: StaticCell<[u16; BUFFER_SIZE]> = StaticCell::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());

    let staging = DMA_BUFFER.init([0u16; BUFFER_SIZE]);
    let engine = defmt::unwrap!(NrfPwmEngine::new(
        p.PWM0,
        p.P0_14,
        staging,
        &ProtocolTiming::WS2812
    ));

    let config = StripConfig::new(PWM_CLOCK_MHZ).with_gamma(true);
    let buf = LED_BUFFER.init([0u16; BUFFER_SIZE]);
    let mut ws: Strip<_, _, NUM_LEDS> =
        defmt::unwrap!(Strip::new(engine, Delay, buf, NUM_LEDS, config));

    defmt::info!("Running...");

    let mut hue_offset = 0u8;
    loop {
        for i in 0..NUM_LEDS {
            let hue = hue_offset.wrapping_add((i as u8) * 32);
            let color = hsv2rgb(Hsv {
                hue,
                sat: 255,
                val: 255,
            });
            // Keep brightness reasonable
            defmt::unwrap!(ws.set_pixel_rgbw(i, color.r, color.g, color.b, 50));
        }

        defmt::unwrap!(ws.update_async().await);
        hue_offset = hue_offset.wrapping_add(4);
        Timer::after(Duration::from_millis(25)).await;
    }
}
