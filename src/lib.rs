//! ## Intro
//!
//! A contiguous vector that keeps small collections inline and spills to
//! the heap once they outgrow a compile-time threshold `N`.
//!
//! Unlike most small-vector crates, [`SpillVec`] also goes *back*: as soon as
//! the length falls to `N` or below, the elements return to the inline buffer
//! and the heap allocation is released. The capacity therefore always tells
//! you where the data is:
//!
//! - `capacity() == N`: inline;
//! - `capacity() > N`: heap, grown by 1.5x of the required length
//!   (see [`growth::decide_capacity`]).
//!
//! ```
//! # use spillvec::{spillvec, SpillVec};
//! let mut vec: SpillVec<i32, 4> = spillvec![1, 2, 3];
//! assert!(vec.is_inline());
//!
//! vec.insert_from(1, [10, 11, 12]);
//! assert_eq!(vec, [1, 10, 11, 12, 2, 3]);
//! assert_eq!(vec.capacity(), 9);
//!
//! vec.erase(1..4);
//! assert_eq!(vec, [1, 2, 3]);
//! assert!(vec.is_inline());
//! ```
//!
//! ## Containers
//!
//! - [`SpillVec`]: the inline/heap vector, `N` defaults to 16.
//! - [`StackVec`]: the fixed-capacity inline buffer it is built on.
//!   Panics instead of spilling.
//!
//! ### Alias
//!
//! - [`MiniVec<T>`] = `SpillVec<T, 8>`, for tiny collections
//!
//! ## Errors
//!
//! The only recoverable error is [`OutOfRange`], returned by
//! [`SpillVec::at`] and [`SpillVec::at_mut`]. Broken preconditions
//! (bad insertion index, bad range) panic like their [`Vec`] counterparts.
//!
//! ## Logging
//!
//! Every storage move emits a `TRACE` level [`tracing`] event.
//!
//! ## `no_std` support
//!
//! This crate requires only `core` and `alloc`.
//!
//! ## Optional features
//!
//! - `serde`: [`SpillVec`] implements `Serialize` and `Deserialize` as a sequence.
//! - `std`: `SpillVec<u8, N>` implements [`std::io::Write`].
//!
//! [`Vec`]: alloc::vec::Vec
//! [`tracing`]: https://docs.rs/tracing
//! [`std::io::Write`]: https://doc.rust-lang.org/std/io/trait.Write.html
#![no_std]

extern crate alloc;

mod error;
mod utils;

pub mod growth;
pub mod spill_vec;
pub mod stack_vec;

#[cfg(feature = "serde")]
mod serde;

#[cfg(feature = "std")]
mod std_io;

pub use error::OutOfRange;
#[doc(inline)]
pub use growth::Location;
#[doc(inline)]
pub use spill_vec::SpillVec;
#[doc(inline)]
pub use stack_vec::StackVec;

/// A `SpillVec` with room for 8 elements inline.
///
/// # Examples
///
/// ```
/// # use spillvec::MiniVec;
/// let mut vec: MiniVec<i32> = MiniVec::new();
/// vec.extend(0..8);
/// assert!(vec.is_inline());
///
/// vec.push(8);
/// assert!(!vec.is_inline());
/// assert_eq!(vec.capacity(), 13);
/// ```
pub type MiniVec<T> = SpillVec<T, 8>;
