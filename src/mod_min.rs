//! **Modular minimizer** selection.
//!
//! A k-mer is selected when its chosen hash is congruent to `congruence`
//! modulo `modulus`. Selection is stateless per k-mer, so this is the
//! cheapest of the three schemes: expected density is `1 / modulus` with no
//! window bookkeeping at all.
//!
//! A builder + iterator facade (`ModMinBuilder` / `ModMinIter`) is provided
//! for ergonomic streaming over a single chunk.

use crate::digester::{Digester, MinimizedHash};
use crate::Result;
use crate::MinimizerError;

/// Streaming selector for k-mers with `hash % modulus == congruence`.
///
/// Advance with [`roll_next_minimizer`](Self::roll_next_minimizer); after a
/// `true` return the selected k-mer is seated, and [`pos`](Self::pos) /
/// the hash observers describe it. Output positions are strictly
/// increasing.
#[derive(Debug, Clone)]
pub struct ModMin<'a> {
    digester: Digester<'a>,
    modulus: u64,
    congruence: u64,
    last_emitted: Option<usize>,
}

impl<'a> ModMin<'a> {
    /// Create a modular-minimizer selector.
    ///
    /// # Errors
    ///
    /// `InvalidModulus` if `modulus == 0`, plus the [`Digester`]
    /// construction errors.
    pub fn new(
        seq: &'a [u8],
        k: usize,
        modulus: u64,
        congruence: u64,
        pos: usize,
        minimized_h: MinimizedHash,
    ) -> Result<Self> {
        if modulus == 0 {
            return Err(MinimizerError::InvalidModulus);
        }
        Ok(Self {
            digester: Digester::new(seq, k, pos, minimized_h)?,
            modulus,
            congruence,
            last_emitted: None,
        })
    }

    /// Advance until the next selected k-mer is seated.
    ///
    /// The k-mer seated on entry is a candidate too, so the very first call
    /// may return without rolling. Returns `false` at end-of-stream.
    pub fn roll_next_minimizer(&mut self) -> bool {
        loop {
            if self.digester.is_valid_hash() {
                let pos = self.digester.pos();
                if self.last_emitted != Some(pos)
                    && self.digester.selected_hash() % self.modulus == self.congruence
                {
                    self.last_emitted = Some(pos);
                    return true;
                }
            }
            if !self.digester.roll_one() {
                return false;
            }
        }
    }

    /// Collect up to `amount` further selections into `out` as logical
    /// positions.
    pub fn roll_minimizer(&mut self, amount: usize, out: &mut Vec<usize>) {
        for _ in 0..amount {
            if !self.roll_next_minimizer() {
                break;
            }
            out.push(self.digester.pos());
        }
    }

    /// Re-home onto a fresh chunk and restart selection.
    pub fn new_seq(&mut self, seq: &'a [u8], pos: usize) -> Result<()> {
        self.digester.new_seq(seq, pos)?;
        self.last_emitted = None;
        Ok(())
    }

    /// Logically append a chunk; selection continues across the join.
    pub fn append_seq(&mut self, seq: &'a [u8]) -> Result<()> {
        self.digester.append_seq(seq)
    }

    /// Position of the seated k-mer (the selection, after a `true` roll).
    #[inline(always)]
    pub fn pos(&self) -> usize {
        self.digester.pos()
    }

    #[inline(always)]
    pub fn is_valid_hash(&self) -> bool {
        self.digester.is_valid_hash()
    }

    /// The underlying digester, for the remaining observers.
    #[inline(always)]
    pub fn digester(&self) -> &Digester<'a> {
        &self.digester
    }

    #[inline(always)]
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    #[inline(always)]
    pub fn congruence(&self) -> u64 {
        self.congruence
    }
}

/// Configure and consume a modular-minimizer scan as an iterator.
pub struct ModMinBuilder<'a> {
    seq: &'a [u8],
    k: usize,
    modulus: u64,
    congruence: u64,
    pos: usize,
    minimized_h: MinimizedHash,
}

impl<'a> ModMinBuilder<'a> {
    /// Begin building over `seq`.
    pub fn new(seq: &'a [u8]) -> Self {
        Self {
            seq,
            k: 0,
            modulus: 1,
            congruence: 0,
            pos: 0,
            minimized_h: MinimizedHash::Canonical,
        }
    }

    /// Set the k-mer length.
    pub fn k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the modulus.
    pub fn modulus(mut self, modulus: u64) -> Self {
        self.modulus = modulus;
        self
    }

    /// Set the congruence class (default 0).
    pub fn congruence(mut self, congruence: u64) -> Self {
        self.congruence = congruence;
        self
    }

    /// Set the starting position.
    pub fn pos(mut self, pos: usize) -> Self {
        self.pos = pos;
        self
    }

    /// Set which hash is minimized.
    pub fn minimized(mut self, minimized_h: MinimizedHash) -> Self {
        self.minimized_h = minimized_h;
        self
    }

    /// Finalize into an iterator.
    pub fn finish(self) -> Result<ModMinIter<'a>> {
        let selector = ModMin::new(
            self.seq,
            self.k,
            self.modulus,
            self.congruence,
            self.pos,
            self.minimized_h,
        )?;
        Ok(ModMinIter {
            selector,
            done: false,
        })
    }
}

/// Iterator yielding `(position, hash)` for each selected k-mer.
pub struct ModMinIter<'a> {
    selector: ModMin<'a>,
    done: bool,
}

impl<'a> Iterator for ModMinIter<'a> {
    type Item = (usize, u64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.selector.roll_next_minimizer() {
            self.done = true;
            return None;
        }
        Some((
            self.selector.pos(),
            self.selector.digester().selected_hash(),
        ))
    }
}

impl<'a> IntoIterator for ModMinBuilder<'a> {
    type Item = (usize, u64);
    type IntoIter = ModMinIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.finish().expect("invalid ModMinBuilder configuration")
    }
}
