//! Common utilities for robomod.
//!
//! This crate provides the foundational pieces shared by the format crates:
//!
//! - [`ByteCursor`] - Big-endian reads from arbitrary offsets in a byte slice
//! - [`read_u32_be`] / [`try_read_u32_be`] - One-shot reads without a cursor
//! - [`search`] - Byte pattern searching backed by `memchr`

mod cursor;
mod error;

pub mod search;

pub use cursor::{read_u32_be, try_read_u32_be, ByteCursor};
pub use error::{Error, Result};
