//! The **Digester**: a skip-over-N rolling k-mer hasher whose stream may be
//! fed in chunks.
//!
//! A `Digester` slides a k-base window over a borrowed DNA chunk, keeping
//! the forward, reverse-complement, and canonical ntHash values of the
//! seated k-mer. Windows touching an ambiguous base are never seated: the
//! digester invalidates, skips past the offending byte, and re-seeds on the
//! next fully valid window.
//!
//! [`Digester::append_seq`] logically concatenates a new chunk once the
//! current one is exhausted. Bases of the old chunk that are still inside
//! the window move into a small deferred-eviction deque, so hashing
//! proceeds across the join in O(1) per base without retaining the old
//! buffer. Positions reported by [`Digester::pos`] are *logical*: indices
//! into the virtual concatenation of every chunk ever appended.
//!
//! The minimizer selectors ([`ModMin`](crate::ModMin),
//! [`WindowMin`](crate::WindowMin), [`Syncmer`](crate::Syncmer)) each own a
//! `Digester` and drive it through [`Digester::roll_one`]; the type is also
//! usable on its own as a plain rolling hasher.
//!
//! # Lifetime contract
//!
//! The digester borrows its chunk; it cannot outlive the backing buffer.
//! Replacing the chunk via [`Digester::new_seq`] or
//! [`Digester::append_seq`] releases the previous borrow. Cloning deep
//! copies the deque state while sharing the same borrowed chunk.

use std::collections::VecDeque;

use crate::nthash::{base_hashes, canonical, is_base, next_forward_hash, next_reverse_hash};
use crate::{MinimizerError, Result};

/// Which of the three hashes a selector compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MinimizedHash {
    /// `min(forward, reverse)`; strand-invariant.
    #[default]
    Canonical,
    /// Forward strand only.
    Forward,
    /// Reverse-complement strand only.
    Reverse,
}

/// Rolling k-mer hasher over a chunked DNA stream. See the module docs.
#[derive(Debug, Clone)]
pub struct Digester<'a> {
    /// Current chunk; earlier chunks survive only through `c_outs`.
    seq: &'a [u8],
    k: usize,
    minimized_h: MinimizedHash,
    /// Logical position of `seq[0]`: total length of all previous chunks.
    offset: usize,
    /// Logical position of the k-mer the hashes describe.
    pos: usize,
    /// Next chunk byte to evict, meaningful once `c_outs` drains.
    start: usize,
    /// Next chunk byte to ingest.
    end: usize,
    fhash: u64,
    rhash: u64,
    chash: u64,
    is_valid_hash: bool,
    /// Window bytes left behind by `append_seq`, awaiting eviction in order.
    c_outs: VecDeque<u8>,
}

impl<'a> Digester<'a> {
    /// Create a digester over `seq`, seeking the first valid window at or
    /// after `pos`.
    ///
    /// If no fully valid window exists in the chunk the digester starts out
    /// with `is_valid_hash() == false`; that is a data condition, not an
    /// error.
    ///
    /// # Errors
    ///
    /// `InvalidK` if `k == 0`; `PositionOutOfRange` if `pos >= seq.len()`.
    pub fn new(seq: &'a [u8], k: usize, pos: usize, minimized_h: MinimizedHash) -> Result<Self> {
        if k == 0 {
            return Err(MinimizerError::InvalidK);
        }
        if pos >= seq.len() {
            return Err(MinimizerError::PositionOutOfRange {
                pos,
                seq_len: seq.len(),
            });
        }
        let mut digester = Self {
            seq,
            k,
            minimized_h,
            offset: 0,
            pos,
            start: pos,
            end: pos,
            fhash: 0,
            rhash: 0,
            chash: 0,
            is_valid_hash: false,
            c_outs: VecDeque::with_capacity(k),
        };
        digester.try_seat();
        Ok(digester)
    }

    /// Advance the window by one base.
    ///
    /// Returns `true` iff a valid k-mer is seated afterwards. An ambiguous
    /// incoming base invalidates the window and scanning continues past it
    /// until a fresh window seats or the chunk runs out. At end-of-stream
    /// this returns `false` and leaves the seated state untouched, so a
    /// subsequent [`append_seq`](Self::append_seq) can roll straight across
    /// the join.
    pub fn roll_one(&mut self) -> bool {
        if !self.is_valid_hash {
            return self.try_seat();
        }
        if self.end >= self.seq.len() {
            return false;
        }
        let incoming = self.seq[self.end];
        if !is_base(incoming) {
            // every window spanning this byte is dead, including any
            // cross-chunk tail
            self.is_valid_hash = false;
            self.c_outs.clear();
            self.end += 1;
            self.start = self.end;
            return self.try_seat();
        }
        let outgoing = match self.c_outs.pop_front() {
            Some(c) => c,
            None => {
                let c = self.seq[self.start];
                self.start += 1;
                c
            }
        };
        self.fhash = next_forward_hash(self.fhash, self.k, outgoing, incoming);
        self.rhash = next_reverse_hash(self.rhash, self.k, outgoing, incoming);
        self.chash = canonical(self.fhash, self.rhash);
        self.end += 1;
        self.pos += 1;
        true
    }

    /// Re-home onto a fresh chunk, resetting the logical origin.
    ///
    /// # Errors
    ///
    /// `PositionOutOfRange` if `pos >= seq.len()`; the digester is left
    /// unchanged in that case.
    pub fn new_seq(&mut self, seq: &'a [u8], pos: usize) -> Result<()> {
        if pos >= seq.len() {
            return Err(MinimizerError::PositionOutOfRange {
                pos,
                seq_len: seq.len(),
            });
        }
        self.seq = seq;
        self.offset = 0;
        self.pos = pos;
        self.start = pos;
        self.end = pos;
        self.fhash = 0;
        self.rhash = 0;
        self.chash = 0;
        self.is_valid_hash = false;
        self.c_outs.clear();
        self.try_seat();
        Ok(())
    }

    /// Logically append `seq` to the stream.
    ///
    /// The bases of the old chunk still inside the window move into the
    /// eviction deque (never more than `k` of them); logical positions
    /// continue without a gap.
    ///
    /// # Errors
    ///
    /// `NotRolledTillEnd` unless iteration has already ingested the entire
    /// current chunk.
    pub fn append_seq(&mut self, seq: &'a [u8]) -> Result<()> {
        if self.end < self.seq.len() {
            return Err(MinimizerError::NotRolledTillEnd);
        }
        self.c_outs.extend(self.seq[self.start..].iter().copied());
        self.offset += self.seq.len();
        self.seq = seq;
        self.start = 0;
        self.end = 0;
        Ok(())
    }

    /// Scan forward until a fully valid window seats or the chunk runs out.
    ///
    /// Precondition: the pending candidate (`c_outs` plus
    /// `seq[start..end]`) is shorter than `k` and contains only valid
    /// bases.
    fn try_seat(&mut self) -> bool {
        while self.end < self.seq.len() {
            let incoming = self.seq[self.end];
            if !is_base(incoming) {
                self.c_outs.clear();
                self.end += 1;
                self.start = self.end;
                continue;
            }
            self.end += 1;
            if self.c_outs.len() + (self.end - self.start) == self.k {
                let (fhash, rhash) = base_hashes(self.window_bytes());
                self.fhash = fhash;
                self.rhash = rhash;
                self.chash = canonical(fhash, rhash);
                self.pos = self.offset + self.end - self.k;
                self.is_valid_hash = true;
                return true;
            }
        }
        false
    }

    /// Bytes of the current window (or partial candidate), oldest first.
    fn window_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.c_outs
            .iter()
            .copied()
            .chain(self.seq[self.start..self.end].iter().copied())
    }

    /// The seated k-mer as a string, assembled across a chunk join if the
    /// window straddles one. `None` while no k-mer is seated.
    pub fn window_string(&self) -> Option<String> {
        self.is_valid_hash
            .then(|| self.window_bytes().map(char::from).collect())
    }

    /// Logical position of the k-mer the hashes describe.
    #[inline(always)]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The k-mer length.
    #[inline(always)]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Length of the current chunk.
    #[inline(always)]
    pub fn seq_len(&self) -> usize {
        self.seq.len()
    }

    /// Forward-strand hash of the seated k-mer.
    #[inline(always)]
    pub fn forward_hash(&self) -> u64 {
        self.fhash
    }

    /// Reverse-complement-strand hash of the seated k-mer.
    #[inline(always)]
    pub fn reverse_hash(&self) -> u64 {
        self.rhash
    }

    /// Canonical hash of the seated k-mer.
    #[inline(always)]
    pub fn canonical_hash(&self) -> u64 {
        self.chash
    }

    /// The hash a selector compares, per [`MinimizedHash`].
    #[inline(always)]
    pub fn selected_hash(&self) -> u64 {
        match self.minimized_h {
            MinimizedHash::Canonical => self.chash,
            MinimizedHash::Forward => self.fhash,
            MinimizedHash::Reverse => self.rhash,
        }
    }

    /// Which hash the selector compares.
    #[inline(always)]
    pub fn minimized(&self) -> MinimizedHash {
        self.minimized_h
    }

    /// Whether the hashes currently describe a valid k-mer at [`pos`](Self::pos).
    #[inline(always)]
    pub fn is_valid_hash(&self) -> bool {
        self.is_valid_hash
    }
}
