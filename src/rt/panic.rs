use core::panic::PanicInfo;

use super::halt::halt;

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    log::error!("panic: {}", info);
    halt(-1)
}
