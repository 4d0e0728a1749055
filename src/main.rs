#![no_std]
#![no_main]

use panic_halt as _;

use artybot::{
    config::{Config, NAME, VERSION},
    logging,
    startup::{halt, startup},
};
use artybot_hardware::ArtyHardware;
use log::{error, info};

/// Called by the board support package's start-up code once the soft core is running.
#[no_mangle]
pub extern "C" fn main() -> ! {
    let config = Config::default();
    logging::init(config.log_level).ok();
    info!("{} v{}", NAME, VERSION);

    // SAFETY: the only call, made before anything else touches the peripherals.
    let hw = unsafe { ArtyHardware::steal() };

    match startup(&config, hw.sensor_bus, hw.motor_bus, hw.delay) {
        Ok(mut control) => {
            info!("entering control loop");
            control.run()
        }
        Err(e) => {
            error!("startup failed: {}", e);
            halt()
        }
    }
}
