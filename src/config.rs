pub trait ConfigT {
    /// Trace every structural event (placement, splices, rotations).
    const DEBUG: bool;
    /// Recompute all invariants after every successful mutation and panic on a violation.
    const CHECK_INVARIANTS: bool;
}

#[macro_export]
macro_rules! debug {
    ($writer:expr, $($arg:tt)+) => {
        if Config::DEBUG {
            match $writer {
                Some(ref w) => {
                    use std::fmt::Write as _;
                    let _ = writeln!(w.borrow_mut(), $($arg)+);
                }
                None => {
                    eprintln!($($arg)+);
                }
            }
        }
    };

    ($($arg:tt)+) => {
        if Config::DEBUG {
            eprintln!($($arg)+);
        }
    };
}

pub struct ReleaseConfig {}
pub struct CheckedConfig {}
pub struct DebugConfig {}

impl ConfigT for ReleaseConfig {
    const DEBUG: bool = false;
    const CHECK_INVARIANTS: bool = false;
}

impl ConfigT for CheckedConfig {
    const DEBUG: bool = false;
    const CHECK_INVARIANTS: bool = true;
}

impl ConfigT for DebugConfig {
    const DEBUG: bool = true;
    const CHECK_INVARIANTS: bool = true;
}
