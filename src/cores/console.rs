use core::fmt::{self, Write};

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use spin::Mutex;

use crate::driver::CharDevice;

/// Text sink over a character device. Terminals on the other end expect `\r\n`.
pub struct Console {
    device: &'static (dyn CharDevice + Sync),
}

impl Console {
    pub const fn new(device: &'static (dyn CharDevice + Sync)) -> Self {
        Self { device }
    }
}

impl Write for Console {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.bytes() {
            if c == b'\n' {
                self.device.put_char(b'\r');
            }
            self.device.put_char(c);
        }
        Ok(())
    }
}

pub static CONSOLE: Mutex<Option<Console>> = Mutex::new(None);

/// Routes `print!` and the logger to `device`.
pub fn attach(device: &'static (dyn CharDevice + Sync)) {
    device.init();
    *CONSOLE.lock() = Some(Console::new(device));
}

/// Output is dropped until a device is attached.
pub fn _print(args: fmt::Arguments) {
    if let Some(console) = CONSOLE.lock().as_mut() {
        let _ = console.write_fmt(args);
    }
}

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            crate::println!("[{:>5}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Attaches the console to `device` and installs it as the `log` backend.
pub fn init_logging(
    device: &'static (dyn CharDevice + Sync),
    level: LevelFilter,
) -> Result<(), SetLoggerError> {
    attach(device);
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
