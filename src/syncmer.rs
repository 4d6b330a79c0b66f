//! **Open syncmer** selection.
//!
//! A k-mer is a syncmer when it *leads* a window of `w` consecutive k-mers
//! whose minimum hash it attains. Unlike window minimizers the decision
//! depends only on the k-mer's own context window, which makes the scheme
//! conservation-friendly: a mutation outside the window cannot flip the
//! selection.
//!
//! Window bookkeeping is shared with [`WindowMin`](crate::WindowMin): a
//! monotone deque with leftmost-wins ties. The leading k-mer attains the
//! window minimum exactly when the deque front sits at the leading
//! position, so no extra hash storage is needed.

use std::collections::VecDeque;

use crate::digester::{Digester, MinimizedHash};
use crate::Result;
use crate::MinimizerError;

/// Streaming open-syncmer selector.
///
/// After [`roll_next_minimizer`](Self::roll_next_minimizer) returns `true`,
/// [`minimizer`](Self::minimizer) is the emitted `(position, hash)` pair;
/// the emission trails the scan cursor by `w - 1` k-mers.
#[derive(Debug, Clone)]
pub struct Syncmer<'a> {
    digester: Digester<'a>,
    /// K-mers per large window; the window spans `w + k - 1` bases.
    w: usize,
    deque: VecDeque<(u64, usize)>,
    count: usize,
    last_ingested: Option<usize>,
    latest: Option<(usize, u64)>,
}

impl<'a> Syncmer<'a> {
    /// Create a syncmer selector over windows of `w` k-mers.
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
            latest: None,
        })
    }

    /// Advance until the next window whose leading k-mer attains the window
    /// minimum. Returns `false` at end-of-stream.
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

    fn ingest_seated(&mut self) -> bool {
        let pos = self.digester.pos();
        if let Some(prev) = self.last_ingested {
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
            let lead = pos + 1 - self.w;
            if let Some(&(front_hash, front_pos)) = self.deque.front() {
                if front_pos == lead {
                    self.latest = Some((lead, front_hash));
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
        self.latest = None;
        Ok(())
    }

    /// Logically append a chunk; windows may straddle the join.
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

/// Configure and consume a syncmer scan as an iterator.
pub struct SyncmerBuilder<'a> {
    seq: &'a [u8],
    k: usize,
    w: usize,
    pos: usize,
    minimized_h: MinimizedHash,
}

impl<'a> SyncmerBuilder<'a> {
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
    pub fn finish(self) -> Result<SyncmerIter<'a>> {
        let selector = Syncmer::new(self.seq, self.k, self.w, self.pos, self.minimized_h)?;
        Ok(SyncmerIter {
            selector,
            done: false,
        })
    }
}

/// Iterator yielding each emitted `(position, hash)` pair.
pub struct SyncmerIter<'a> {
    selector: Syncmer<'a>,
    done: bool,
}

impl<'a> Iterator for SyncmerIter<'a> {
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

impl<'a> IntoIterator for SyncmerBuilder<'a> {
    type Item = (usize, u64);
    type IntoIter = SyncmerIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.finish().expect("invalid SyncmerBuilder configuration")
    }
}
