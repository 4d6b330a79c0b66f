//! **Window minimizer** selection.
//!
//! Over every window of `w` consecutive k-mer hashes, the smallest hash
//! (leftmost on ties) is the window's minimizer. Sliding the window by one
//! k-mer usually keeps the same argmin, so a selection is emitted only when
//! the argmin *position* changes; the classic result is that roughly
//! `2 / (w + 1)` of all k-mers get selected.
//!
//! The argmin is tracked with a monotone deque of `(hash, position)` pairs:
//! ingesting a k-mer pops dominated entries off the back (strictly greater
//! hashes only, so the leftmost of equal hashes survives at the front), and
//! entries older than `w` arrivals fall off the front. A run of ambiguous
//! bases clears the deque: no window spans an invalid k-mer.

use std::collections::VecDeque;

use crate::digester::{Digester, MinimizedHash};
use crate::Result;
use crate::MinimizerError;

/// Streaming argmin-of-window selector.
///
/// After [`roll_next_minimizer`](Self::roll_next_minimizer) returns `true`,
/// [`minimizer`](Self::minimizer) is the newly emitted `(position, hash)`
/// pair. The emitted position trails the scan cursor by up to `w - 1`
/// k-mers; [`pos`](Self::pos) reports the cursor.
#[derive(Debug, Clone)]
pub struct WindowMin<'a> {
    digester: Digester<'a>,
    /// K-mers per large window; the window spans `w + k - 1` bases.
    w: usize,
    /// Monotone by hash, front is the current window's leftmost minimum.
    deque: VecDeque<(u64, usize)>,
    /// K-mer arrivals since the last reset; a window exists once `>= w`.
    count: usize,
    last_ingested: Option<usize>,
    last_emitted: Option<usize>,
    latest: Option<(usize, u64)>,
}

impl<'a> WindowMin<'a> {
    /// Create a window-minimizer selector over windows of `w` k-mers.
    ///
    /// # Errors
    ///
    /// `InvalidWindow` if `w == 0`, plus the [`Digester`] construction
    /// errors.
    pub fn new(
        seq: &'a [u8],
        k: usize,
        w: usize,
        pos: usize,
        minimized_h: MinimizedHash,
    ) -> Result<Self> {
        if w == 0 {
            return Err(MinimizerError::InvalidWindow);
        }
        Ok(Self {
            digester: Digester::new(seq, k, pos, minimized_h)?,
            w,
            deque: VecDeque::with_capacity(w),
            count: 0,
            last_ingested: None,
            last_emitted: None,
            latest: None,
        })
    }

    /// Advance until a window's argmin differs from the previous emission.
    ///
    /// Returns `false` at end-of-stream. Emitted positions are strictly
    /// increasing.
    pub fn roll_next_minimizer(&mut self) -> bool {
        loop {
            if self.digester.is_valid_hash() && self.last_ingested != Some(self.digester.pos()) {
                if self.ingest_seated() {
                    return true;
                }
            }
            if !self.digester.roll_one() {
                return false;
            }
        }
    }

    /// Fold the seated k-mer into the window; `true` if it completes a
    /// window whose argmin is new.
    fn ingest_seated(&mut self) -> bool {
        let pos = self.digester.pos();
        if let Some(prev) = self.last_ingested {
            // a position gap means an ambiguous region was skipped
            if pos != prev + 1 {
                self.deque.clear();
                self.count = 0;
            }
        }
        self.last_ingested = Some(pos);

        let hash = self.digester.selected_hash();
        while self.deque.back().is_some_and(|&(back, _)| back > hash) {
            self.deque.pop_back();
        }
        self.deque.push_back((hash, pos));
        while self
            .deque
            .front()
            .is_some_and(|&(_, front_pos)| front_pos + self.w <= pos)
        {
            self.deque.pop_front();
        }
        self.count += 1;

        if self.count >= self.w {
            if let Some(&(front_hash, front_pos)) = self.deque.front() {
                if self.last_emitted != Some(front_pos) {
                    self.last_emitted = Some(front_pos);
                    self.latest = Some((front_pos, front_hash));
                    return true;
                }
            }
        }
        false
    }

    /// Collect up to `amount` further emissions into `out` as logical
    /// positions.
    pub fn roll_minimizer(&mut self, amount: usize, out: &mut Vec<usize>) {
        for _ in 0..amount {
            if !self.roll_next_minimizer() {
                break;
            }
            if let Some((pos, _)) = self.latest {
                out.push(pos);
            }
        }
    }

    /// Re-home onto a fresh chunk and restart the window accounting.
    pub fn new_seq(&mut self, seq: &'a [u8], pos: usize) -> Result<()> {
        self.digester.new_seq(seq, pos)?;
        self.deque.clear();
        self.count = 0;
        self.last_ingested = None;
        self.last_emitted = None;
        self.latest = None;
        Ok(())
    }

    /// Logically append a chunk. Windows may straddle the join, so the
    /// accounting carries over untouched.
    pub fn append_seq(&mut self, seq: &'a [u8]) -> Result<()> {
        self.digester.append_seq(seq)
    }

    /// The most recently emitted `(position, hash)` pair.
    #[inline(always)]
    pub fn minimizer(&self) -> Option<(usize, u64)> {
        self.latest
    }

    /// Scan-cursor position (the newest k-mer considered, not the emission).
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

    /// K-mers per large window.
    #[inline(always)]
    pub fn w(&self) -> usize {
        self.w
    }
}

/// Configure and consume a window-minimizer scan as an iterator.
pub struct WindowMinBuilder<'a> {
    seq: &'a [u8],
    k: usize,
    w: usize,
    pos: usize,
    minimized_h: MinimizedHash,
}

impl<'a> WindowMinBuilder<'a> {
    /// Begin building over `seq`.
    pub fn new(seq: &'a [u8]) -> Self {
        Self {
            seq,
            k: 0,
            w: 0,
            pos: 0,
            minimized_h: MinimizedHash::Canonical,
        }
    }

    /// Set the k-mer length.
    pub fn k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the window width in k-mers.
    pub fn w(mut self, w: usize) -> Self {
        self.w = w;
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
    pub fn finish(self) -> Result<WindowMinIter<'a>> {
        let selector = WindowMin::new(self.seq, self.k, self.w, self.pos, self.minimized_h)?;
        Ok(WindowMinIter {
            selector,
            done: false,
        })
    }
}

/// Iterator yielding each emitted `(position, hash)` pair.
pub struct WindowMinIter<'a> {
    selector: WindowMin<'a>,
    done: bool,
}

impl<'a> Iterator for WindowMinIter<'a> {
    type Item = (usize, u64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.selector.roll_next_minimizer() {
            self.done = true;
            return None;
        }
        self.selector.minimizer()
    }
}

impl<'a> IntoIterator for WindowMinBuilder<'a> {
    type Item = (usize, u64);
    type IntoIter = WindowMinIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.finish()
            .expect("invalid WindowMinBuilder configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_window() {
        assert!(matches!(
            WindowMin::new(b"ACGT", 2, 0, 0, MinimizedHash::Canonical),
            Err(MinimizerError::InvalidWindow)
        ));
    }

    #[test]
    fn degenerate_window_emits_every_valid_kmer() {
        let mut wm = WindowMin::new(b"ACGTACG", 3, 1, 0, MinimizedHash::Canonical).unwrap();
        let mut got = Vec::new();
        wm.roll_minimizer(usize::MAX, &mut got);
        assert_eq!(got, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn emissions_strictly_increase() {
        let seq = b"ACGTACGTGGATCCTTAGCAACGT";
        let mut wm = WindowMin::new(seq, 4, 3, 0, MinimizedHash::Canonical).unwrap();
        let mut got = Vec::new();
        wm.roll_minimizer(usize::MAX, &mut got);
        assert!(!got.is_empty());
        assert!(got.windows(2).all(|p| p[0] < p[1]));
        assert!(got.iter().all(|&p| p <= seq.len() - 4));
    }

    #[test]
    fn short_valid_runs_emit_nothing() {
        // every run of valid bases holds fewer than w k-mers
        let mut wm = WindowMin::new(b"ACGTNACGTNACGT", 3, 3, 0, MinimizedHash::Canonical).unwrap();
        let mut got = Vec::new();
        wm.roll_minimizer(usize::MAX, &mut got);
        assert!(got.is_empty());
    }
}
