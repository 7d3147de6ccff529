//! Serial port output for kernel logs
//!
//! COM1 is owned by the console driver; kernel log output goes to COM2 so it
//! never interleaves with user I/O.

use core::fmt;
use spin::Mutex;
use uart_16550::SerialPort;

const COM2_PORT: u16 = 0x2F8;

/// COM2 (0x2F8) - kernel log output.
pub static SERIAL2: Mutex<SerialPort> = Mutex::new(unsafe { SerialPort::new(COM2_PORT) });

/// Initialize the log serial port. Call once, before the first log record.
pub fn init() {
    SERIAL2.lock().init();
}

#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    use core::fmt::Write;

    // Interrupt handlers log too; the port mutex must not be preemptible by
    // them while held.
    let _irq = crate::interrupts::disable();

    SERIAL2
        .lock()
        .write_fmt(args)
        .expect("Printing to log serial failed");
}

#[macro_export]
macro_rules! serial_print {
    ($($arg:tt)*) => ($crate::serial::_print(format_args!($($arg)*)));
}

#[macro_export]
macro_rules! serial_println {
    () => ($crate::serial_print!("\n"));
    ($($arg:tt)*) => ($crate::serial_print!("{}\n", format_args!($($arg)*)));
}
