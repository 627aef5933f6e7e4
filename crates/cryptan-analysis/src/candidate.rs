//! Best-candidate tracking for exhaustive key searches

/// A trial decryption: the key tried, the text it produced and its score
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<K> {
    pub key: K,
    pub plaintext: Vec<u8>,
    pub score: f64,
}

/// Keeps the lowest-scoring candidate seen so far.
///
/// A later candidate replaces the current one only when its score is
/// strictly lower, so the first of several equal scores is kept. The
/// plaintext is copied only on replacement, which lets a search decrypt
/// every trial into one reused buffer.
#[derive(Debug)]
pub struct BestCandidate<K> {
    best: Option<Candidate<K>>,
    trials: usize,
}

impl<K> BestCandidate<K> {
    pub fn new() -> Self {
        Self {
            best: None,
            trials: 0,
        }
    }

    /// Record one trial. Returns true when it became the new best.
    pub fn offer(&mut self, key: K, score: f64, plaintext: &[u8]) -> bool {
        self.trials += 1;
        let better = match &self.best {
            Some(current) => score < current.score,
            None => true,
        };
        if better {
            match &mut self.best {
                Some(current) => {
                    current.key = key;
                    current.score = score;
                    current.plaintext.clear();
                    current.plaintext.extend_from_slice(plaintext);
                }
                None => {
                    self.best = Some(Candidate {
                        key,
                        plaintext: plaintext.to_vec(),
                        score,
                    })
                }
            }
        }
        better
    }

    /// Number of trials offered so far
    pub fn trials(&self) -> usize {
        self.trials
    }

    pub fn into_best(self) -> Option<Candidate<K>> {
        self.best
    }
}

impl<K> Default for BestCandidate<K> {
    fn default() -> Self {
        Self::new()
    }
}
