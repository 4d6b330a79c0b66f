//! # minimizer-rs
//!
//! Streaming **k-mer minimizer selection** for DNA sequences, built on a
//! canonical ntHash rolling hasher.
//!
//! This crate provides:
//! - [`Digester`]: a rolling hasher that slides a k-base window over a
//!   possibly chunked DNA stream, skipping windows that contain non-ACGT
//!   bases and keeping forward, reverse-complement, and canonical hashes.
//! - [`ModMin`]: selects k-mers whose hash is congruent to `r (mod m)`.
//! - [`WindowMin`]: selects the argmin-hash k-mer of every window of `w`
//!   consecutive k-mers (leftmost wins ties, deduplicated while the argmin
//!   stays put).
//! - [`Syncmer`]: selects a k-mer when it leads a window of `w` k-mers
//!   whose minimum hash it attains.
//!
//! Sequences are borrowed, never copied; chunks can be appended with
//! `append_seq` once the previous chunk is exhausted, and selection
//! continues seamlessly across the join.
//!
//! ## Example
//!
//! ```rust
//! use minimizer_rs::{MinimizedHash, ModMin, Result};
//!
//! fn main() -> Result<()> {
//!     // Select k-mers (k=4) whose canonical hash is divisible by 4.
//!     let seq = b"ACGTNACGTACGTGGATCC";
//!     let mut selector = ModMin::new(seq, 4, 4, 0, 0, MinimizedHash::Canonical)?;
//!
//!     let mut positions = Vec::new();
//!     selector.roll_minimizer(usize::MAX, &mut positions);
//!
//!     // Emissions are strictly increasing and never overlap the 'N' at index 4.
//!     assert!(positions.windows(2).all(|p| p[0] < p[1]));
//!     assert!(positions.iter().all(|&p| p == 0 || p >= 5));
//!     Ok(())
//! }
//! ```

/// ntHash per-base seed constants and ASCII lookup tables.
mod constants;
mod tables;

/// Rolling-hash seeding and O(1) updates for both strands.
pub mod nthash;

/// The chunk-aware sliding-window hasher the selectors build on.
pub mod digester;
pub mod mod_min;
pub mod syncmer;
pub mod window_min;

// ──────────────────────────────────────────────────────────────
// Re-exports: public API surface
// --------------------------------------------------------------------------

/// One-bit split-rotate left (33 + 31 halves).
pub use tables::srol;
/// Arbitrary-distance split-rotate left.
pub use tables::srol_n;
/// One-bit split-rotate right (33 + 31 halves).
pub use tables::sror;

/// Combine forward and reverse hashes into a strand-independent value.
pub use nthash::canonical;
pub use nthash::{base_forward_hash, base_reverse_hash, is_base};

/// Chunk-aware rolling k-mer hasher.
///
/// See [`digester::Digester`] for full documentation.
pub use digester::Digester;
pub use digester::MinimizedHash;

pub use mod_min::ModMin;
pub use mod_min::ModMinBuilder;
pub use mod_min::ModMinIter;

pub use window_min::WindowMin;
pub use window_min::WindowMinBuilder;
pub use window_min::WindowMinIter;

pub use syncmer::Syncmer;
pub use syncmer::SyncmerBuilder;
pub use syncmer::SyncmerIter;

// ──────────────────────────────────────────────────────────────
// Crate-wide result and error types
// --------------------------------------------------------------------------

/// Shorthand `Result` alias for this crate's operations.
pub type Result<T, E = MinimizerError> = std::result::Result<T, E>;

/// Errors common to all selector constructions and chunk handoffs.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MinimizerError {
    /// `k` was zero.
    #[error("k must be > 0")]
    InvalidK,

    /// Starting `pos` is not inside the sequence.
    #[error("position ({pos}) exceeds sequence length ({seq_len})")]
    PositionOutOfRange { pos: usize, seq_len: usize },

    /// The modular selector needs `modulus >= 1`.
    #[error("modulus must be >= 1")]
    InvalidModulus,

    /// The windowed selectors need at least one k-mer per window.
    #[error("window must span at least one k-mer")]
    InvalidWindow,

    /// `append_seq` called before the current chunk was exhausted.
    #[error("sequence must be rolled to the end before appending")]
    NotRolledTillEnd,
}
