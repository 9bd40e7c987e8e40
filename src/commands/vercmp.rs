//! Vercmp command.

use std::cmp::Ordering;

use crate::error::Result;

/// Executes the vercmp command.
pub fn vercmp(first: &str, second: &str) -> Result<()> {
    println!("{}", vercmp_output(first, second));
    Ok(())
}

/// `-1`, `0` or `1`, matching pacman's `vercmp` tool.
pub fn vercmp_output(first: &str, second: &str) -> i8 {
    match crate::version::vercmp(first, second) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}
