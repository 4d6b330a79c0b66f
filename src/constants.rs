//! ntHash seed constants and ASCII lookup tables.
//!
//! Each nucleotide carries a fixed 64-bit seed (the values from the ntHash
//! reference). `SEED_TAB` maps ASCII bytes to seeds, accepting upper and
//! lower case; every other byte maps to `SEED_N`, which doubles as the
//! invalid-base marker. `RC_SEED_TAB` maps a byte to the seed of its
//! complement, which is what the reverse-strand hash consumes.

/// Seed for adenine.
pub const SEED_A: u64 = 0x3c8b_fbb3_95c6_0474;
/// Seed for cytosine.
pub const SEED_C: u64 = 0x3193_c185_62a0_2b4c;
/// Seed for guanine.
pub const SEED_G: u64 = 0x2032_3ed0_8257_2324;
/// Seed for thymine.
pub const SEED_T: u64 = 0x2955_49f5_4be2_4456;

/// Marker seed for every non-ACGT byte ('N' and friends).
pub const SEED_N: u64 = 0;

/// ASCII byte to forward-strand seed; `SEED_N` for invalid bases.
pub const SEED_TAB: [u64; 256] = {
    let mut tab = [SEED_N; 256];
    tab[b'A' as usize] = SEED_A;
    tab[b'a' as usize] = SEED_A;
    tab[b'C' as usize] = SEED_C;
    tab[b'c' as usize] = SEED_C;
    tab[b'G' as usize] = SEED_G;
    tab[b'g' as usize] = SEED_G;
    tab[b'T' as usize] = SEED_T;
    tab[b't' as usize] = SEED_T;
    tab
};

/// ASCII byte to complement-base seed; `SEED_N` for invalid bases.
pub const RC_SEED_TAB: [u64; 256] = {
    let mut tab = [SEED_N; 256];
    tab[b'A' as usize] = SEED_T;
    tab[b'a' as usize] = SEED_T;
    tab[b'C' as usize] = SEED_G;
    tab[b'c' as usize] = SEED_G;
    tab[b'G' as usize] = SEED_C;
    tab[b'g' as usize] = SEED_C;
    tab[b'T' as usize] = SEED_A;
    tab[b't' as usize] = SEED_A;
    tab
};
