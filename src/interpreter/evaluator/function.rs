/// The `print` function implementation.
///
/// Scans a format string and substitutes `%d`, `%c` and `%s` verbs with
/// the remaining arguments.
pub mod print;

/// Call dispatch.
///
/// The built-in function table, user-defined function calls, the call depth
/// limit and return value handling.
pub mod core;
