//! Proof-of-work search used as the admission cost for every sealed block.

use sha2::{Digest, Sha256};

/// Leading hex zeros required of a valid guess digest.
pub const DEFAULT_DIFFICULTY: u32 = 4;

fn guess_digest(last_proof: u64, candidate: u64) -> String {
    let guess = format!("{last_proof}{candidate}");
    hex::encode(Sha256::digest(guess.as_bytes()))
}

/// Whether `candidate` is a valid proof relative to the previous block's proof.
///
/// Valid iff SHA-256 of the UTF-8 bytes of the decimal concatenation
/// `"{last_proof}{candidate}"` starts with `difficulty` hex `'0'` characters.
pub fn valid_proof(last_proof: u64, candidate: u64, difficulty: u32) -> bool {
    guess_digest(last_proof, candidate)
        .bytes()
        .take(difficulty as usize)
        .all(|byte| byte == b'0')
}

/// Search candidates from zero upward and return the first valid proof.
///
/// Synchronous CPU work with no suspension point; at the default difficulty
/// this averages around 65k hash evaluations. Deterministic for a given
/// `last_proof`.
pub fn proof_of_work(last_proof: u64, difficulty: u32) -> u64 {
    let mut candidate = 0u64;
    while !valid_proof(last_proof, candidate, difficulty) {
        candidate += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_result_satisfies_predicate() {
        for last_proof in [0u64, 1, 100, 35293] {
            let proof = proof_of_work(last_proof, DEFAULT_DIFFICULTY);
            assert!(valid_proof(last_proof, proof, DEFAULT_DIFFICULTY));
        }
    }

    #[test]
    fn search_is_deterministic() {
        assert_eq!(
            proof_of_work(100, DEFAULT_DIFFICULTY),
            proof_of_work(100, DEFAULT_DIFFICULTY)
        );
    }

    #[test]
    fn lower_difficulty_accepts_prefixes_of_higher() {
        let proof = proof_of_work(7, DEFAULT_DIFFICULTY);
        assert!(valid_proof(7, proof, 2));
        assert!(valid_proof(7, proof, 1));
    }

    #[test]
    fn zero_difficulty_accepts_anything() {
        assert!(valid_proof(42, 0, 0));
        assert_eq!(proof_of_work(42, 0), 0);
    }
}
