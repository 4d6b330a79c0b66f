//! Selector outputs checked against brute-force reference enumerations
//! built on the same public hash primitives.

use minimizer_rs::{
    base_forward_hash, base_reverse_hash, canonical, is_base, MinimizedHash, ModMin,
    ModMinBuilder, Syncmer, WindowMin,
};

/// Hash of every k-mer start position; `None` where the window touches an
/// ambiguous base.
fn reference_hashes(seq: &[u8], k: usize, which: MinimizedHash) -> Vec<Option<u64>> {
    if seq.len() < k {
        return Vec::new();
    }
    (0..=seq.len() - k)
        .map(|p| {
            let window = &seq[p..p + k];
            if !window.iter().copied().all(is_base) {
                return None;
            }
            let fwd = base_forward_hash(window);
            let rev = base_reverse_hash(window);
            Some(match which {
                MinimizedHash::Canonical => canonical(fwd, rev),
                MinimizedHash::Forward => fwd,
                MinimizedHash::Reverse => rev,
            })
        })
        .collect()
}

fn mod_min_reference(hashes: &[Option<u64>], modulus: u64, congruence: u64) -> Vec<usize> {
    hashes
        .iter()
        .enumerate()
        .filter_map(|(p, h)| match h {
            Some(h) if h % modulus == congruence => Some(p),
            _ => None,
        })
        .collect()
}

/// Argmin of every window of `w` valid k-mers, leftmost on ties,
/// deduplicated while the argmin position repeats.
fn window_min_reference(hashes: &[Option<u64>], w: usize) -> Vec<usize> {
    let mut out: Vec<usize> = Vec::new();
    let mut run_start = 0;
    while run_start < hashes.len() {
        if hashes[run_start].is_none() {
            run_start += 1;
            continue;
        }
        let mut run_end = run_start;
        while run_end < hashes.len() && hashes[run_end].is_some() {
            run_end += 1;
        }
        for s in run_start..(run_end + 1).saturating_sub(w) {
            let mut best = s;
            for q in s + 1..s + w {
                if hashes[q].unwrap() < hashes[best].unwrap() {
                    best = q;
                }
            }
            if out.last() != Some(&best) {
                out.push(best);
            }
        }
        run_start = run_end;
    }
    out
}

/// Leading positions whose hash attains the minimum of their `w`-window.
fn syncmer_reference(hashes: &[Option<u64>], w: usize) -> Vec<usize> {
    let mut out = Vec::new();
    let mut run_start = 0;
    while run_start < hashes.len() {
        if hashes[run_start].is_none() {
            run_start += 1;
            continue;
        }
        let mut run_end = run_start;
        while run_end < hashes.len() && hashes[run_end].is_some() {
            run_end += 1;
        }
        for p in run_start..(run_end + 1).saturating_sub(w) {
            let min = (p..p + w).map(|q| hashes[q].unwrap()).min().unwrap();
            if hashes[p].unwrap() == min {
                out.push(p);
            }
        }
        run_start = run_end;
    }
    out
}

fn drain_mod(selector: &mut ModMin) -> Vec<usize> {
    let mut out = Vec::new();
    selector.roll_minimizer(usize::MAX, &mut out);
    out
}

fn drain_window(selector: &mut WindowMin) -> Vec<usize> {
    let mut out = Vec::new();
    selector.roll_minimizer(usize::MAX, &mut out);
    out
}

fn drain_syncmer(selector: &mut Syncmer) -> Vec<usize> {
    let mut out = Vec::new();
    selector.roll_minimizer(usize::MAX, &mut out);
    out
}

const SEQS: &[&[u8]] = &[
    b"ACGTACGT",
    b"ACGTACG",
    b"ACGNACGT",
    b"ATCGTACGATGCATGCATGCTGACG",
    b"TTTTTTTTTT",
    b"ACGTNACGTNACGTN",
    b"NNNNNN",
    b"GATTACAGATTACANGATTACA",
];

#[test]
fn mod_min_matches_reference() {
    for &seq in SEQS {
        for k in [1_usize, 3, 4] {
            if seq.len() < k {
                continue;
            }
            for (modulus, congruence) in [(1_u64, 0_u64), (2, 0), (2, 1), (4, 0), (17, 3)] {
                let hashes = reference_hashes(seq, k, MinimizedHash::Canonical);
                let expected = mod_min_reference(&hashes, modulus, congruence);
                let mut selector =
                    ModMin::new(seq, k, modulus, congruence, 0, MinimizedHash::Canonical).unwrap();
                assert_eq!(
                    drain_mod(&mut selector),
                    expected,
                    "seq={} k={k} m={modulus} c={congruence}",
                    String::from_utf8_lossy(seq)
                );
            }
        }
    }
}

#[test]
fn mod_min_respects_minimized_hash_choice() {
    let seq = b"ATCGTACGATGCATGCATGCTGACG";
    for which in [
        MinimizedHash::Canonical,
        MinimizedHash::Forward,
        MinimizedHash::Reverse,
    ] {
        let hashes = reference_hashes(seq, 5, which);
        let expected = mod_min_reference(&hashes, 3, 1);
        let mut selector = ModMin::new(seq, 5, 3, 1, 0, which).unwrap();
        assert_eq!(drain_mod(&mut selector), expected, "{which:?}");
    }
}

#[test]
fn window_min_matches_reference() {
    for &seq in SEQS {
        for k in [1_usize, 3, 4] {
            if seq.len() < k {
                continue;
            }
            for w in [1_usize, 2, 3, 5] {
                let hashes = reference_hashes(seq, k, MinimizedHash::Canonical);
                let expected = window_min_reference(&hashes, w);
                let mut selector =
                    WindowMin::new(seq, k, w, 0, MinimizedHash::Canonical).unwrap();
                assert_eq!(
                    drain_window(&mut selector),
                    expected,
                    "seq={} k={k} w={w}",
                    String::from_utf8_lossy(seq)
                );
            }
        }
    }
}

#[test]
fn syncmer_matches_reference() {
    for &seq in SEQS {
        for k in [1_usize, 3, 4] {
            if seq.len() < k {
                continue;
            }
            for w in [1_usize, 2, 3, 5] {
                let hashes = reference_hashes(seq, k, MinimizedHash::Canonical);
                let expected = syncmer_reference(&hashes, w);
                let mut selector = Syncmer::new(seq, k, w, 0, MinimizedHash::Canonical).unwrap();
                assert_eq!(
                    drain_syncmer(&mut selector),
                    expected,
                    "seq={} k={k} w={w}",
                    String::from_utf8_lossy(seq)
                );
            }
        }
    }
}

#[test]
fn emissions_skip_windows_touching_ambiguity() {
    // k-mers at 1..=3 overlap the N and may never be selected
    let seq = b"ACGNACGT";
    let mut selector = ModMin::new(seq, 3, 2, 0, 0, MinimizedHash::Canonical).unwrap();
    let got = drain_mod(&mut selector);
    assert!(got.iter().all(|&p| p == 0 || p >= 4), "{got:?}");
}

#[test]
fn single_candidate_when_k_equals_len() {
    let seq = b"ACGTA";
    let mut selector = ModMin::new(seq, 5, 1, 0, 0, MinimizedHash::Canonical).unwrap();
    assert_eq!(drain_mod(&mut selector), vec![0]);

    let mut selector = WindowMin::new(seq, 5, 1, 0, MinimizedHash::Canonical).unwrap();
    assert_eq!(drain_window(&mut selector), vec![0]);

    let mut selector = Syncmer::new(seq, 5, 1, 0, MinimizedHash::Canonical).unwrap();
    assert_eq!(drain_syncmer(&mut selector), vec![0]);
}

#[test]
fn all_ambiguous_input_selects_nothing() {
    let seq = b"NNNNNNNN";
    let mut selector = ModMin::new(seq, 3, 1, 0, 0, MinimizedHash::Canonical).unwrap();
    assert!(drain_mod(&mut selector).is_empty());

    let mut selector = WindowMin::new(seq, 3, 2, 0, MinimizedHash::Canonical).unwrap();
    assert!(drain_window(&mut selector).is_empty());

    let mut selector = Syncmer::new(seq, 3, 2, 0, MinimizedHash::Canonical).unwrap();
    assert!(drain_syncmer(&mut selector).is_empty());
}

#[test]
fn degenerate_window_selects_every_valid_kmer() {
    let seq = b"ACGTNACGTACG";
    let every: Vec<usize> = reference_hashes(seq, 3, MinimizedHash::Canonical)
        .iter()
        .enumerate()
        .filter_map(|(p, h)| h.map(|_| p))
        .collect();

    let mut wm = WindowMin::new(seq, 3, 1, 0, MinimizedHash::Canonical).unwrap();
    assert_eq!(drain_window(&mut wm), every);

    let mut sm = Syncmer::new(seq, 3, 1, 0, MinimizedHash::Canonical).unwrap();
    assert_eq!(drain_syncmer(&mut sm), every);
}

#[test]
fn iterator_facade_agrees_with_rolling() {
    let seq = b"ATCGTACGATGCATGCATGCTGACG";
    let hashes = reference_hashes(seq, 6, MinimizedHash::Canonical);
    let expected = mod_min_reference(&hashes, 4, 0);

    let iter = ModMinBuilder::new(seq)
        .k(6)
        .modulus(4)
        .congruence(0)
        .pos(0)
        .finish()
        .expect("builder should succeed");
    let got: Vec<(usize, u64)> = iter.collect();

    assert_eq!(got.iter().map(|&(p, _)| p).collect::<Vec<_>>(), expected);
    for (pos, hash) in got {
        assert_eq!(Some(hash), hashes[pos], "hash reported at {pos}");
    }
}

#[test]
fn nonzero_start_position_is_honored() {
    let seq = b"ATCGTACGATGCATGC";
    let hashes = reference_hashes(seq, 4, MinimizedHash::Canonical);
    let expected: Vec<usize> = mod_min_reference(&hashes, 2, 0)
        .into_iter()
        .filter(|&p| p >= 5)
        .collect();
    let mut selector = ModMin::new(seq, 4, 2, 0, 5, MinimizedHash::Canonical).unwrap();
    assert_eq!(drain_mod(&mut selector), expected);
}
