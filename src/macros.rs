// SPDX-License-Identifier: MIT OR Apache-2.0

//! Convenience macros.

/// Builds a `Vec<Arg>` from a heterogeneous argument list.
///
/// Each element goes through [`Arg::from`](crate::Arg), so strings, numbers,
/// booleans and [`serde_json::Value`]s mix freely:
///
/// ```
/// use conso::args;
/// use serde_json::json;
///
/// let list = args!["request", 42, true, json!({"method": "GET"})];
/// assert_eq!(list.len(), 4);
///
/// let empty = args![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($value)),+]
    };
}
