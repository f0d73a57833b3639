//! Reset to `main` and back to idle.

pub mod halt;
pub mod init;
pub mod layout;
#[cfg(target_os = "none")]
mod panic;

/// Exports `func` as the C entry point `int main(void)` that the initializer calls.
///
/// `func` may return `()` or `i32`; the status is handed to the halt handler either way. A
/// function that never returns is declared with `()`.
#[macro_export]
macro_rules! entry {
    ($func:ident) => {
        // `paste!` gives the exported wrapper a name that cannot clash with the user's `main`,
        // while `export_name` fixes its symbol.
        $crate::paste::paste! {
            #[export_name = "main"]
            pub extern "C" fn [<__hpc_rt_entry_ $func>]() -> i32 {
                $crate::rt::ExitStatus::status($func())
            }
        }
    };
}

/// Return types accepted from an entry function.
pub trait ExitStatus {
    fn status(self) -> i32;
}

impl ExitStatus for () {
    fn status(self) -> i32 {
        0
    }
}

impl ExitStatus for i32 {
    fn status(self) -> i32 {
        self
    }
}
