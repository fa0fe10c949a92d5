pub mod audit;
pub mod compare;

/// Exit code for a completed run
pub const EXIT_OK: i32 = 0;
/// Exit code for load/config failures
pub const EXIT_ERROR: i32 = 1;
/// Exit code when drift is found and `--fail-on-drift` is set
pub const EXIT_DRIFT: i32 = 2;
