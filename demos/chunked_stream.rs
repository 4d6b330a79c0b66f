use minimizer_rs::{MinimizedHash, MinimizerError, WindowMin};

/// Stream a sequence through the selector in chunks, as a FASTA reader
/// handing over one buffer at a time would.
fn main() -> Result<(), MinimizerError> {
    let chunks: [&[u8]; 3] = [b"ATCGTACGATGCA", b"TGCATGC", b"TGACGACGTNACGTTT"];

    let mut selector = WindowMin::new(chunks[0], 5, 4, 0, MinimizedHash::Canonical)?;
    let mut positions = Vec::new();

    selector.roll_minimizer(usize::MAX, &mut positions);
    for chunk in &chunks[1..] {
        selector.append_seq(chunk)?;
        selector.roll_minimizer(usize::MAX, &mut positions);
    }

    println!("window minimizers at logical positions: {positions:?}");
    Ok(())
}
