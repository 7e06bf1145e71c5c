//! Optional diagnostic output
//!
//! With the `esp32-log` feature enabled, `trace!` forwards to `esp_println::println!`.
//! Without it the macro type-checks its arguments and emits nothing.

#[cfg(feature = "esp32-log")]
macro_rules! trace {
    ($($arg:tt)*) => {
        esp_println::println!($($arg)*)
    };
}

#[cfg(not(feature = "esp32-log"))]
macro_rules! trace {
    ($($arg:tt)*) => {{
        if false {
            ::core::mem::drop(::core::format_args!($($arg)*));
        }
    }};
}
