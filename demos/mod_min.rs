use minimizer_rs::{MinimizerError, ModMinBuilder};

fn main() -> Result<(), MinimizerError> {
    let seq = "ATCGTACGATGCATGCATGCTGACG";
    let kmer_size = 6;

    // build the iterator over k-mers whose canonical hash is 0 mod 4
    let iter = ModMinBuilder::new(seq.as_bytes())
        .k(kmer_size)
        .modulus(4)
        .congruence(0)
        .pos(0)
        .finish()?;

    for (pos, hash) in iter {
        // print the selected k-mer and its hash (in hex)
        println!("{} @ {} {:#018x}", &seq[pos..pos + kmer_size], pos, hash);
    }

    Ok(())
}
