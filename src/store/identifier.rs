use log::warn;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

use crate::error::{Error, Result};
use crate::quiz::definition::QuizId;

const ALPHABET: &'static [u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const MAX_ATTEMPTS: usize = 100;

#[derive(Clone, Debug)]
pub struct IdentifierAllocator {
    length: usize,
    max_attempts: usize,
}

impl IdentifierAllocator {
    pub fn new(length: usize) -> Self {
        IdentifierAllocator {
            length,
            max_attempts: MAX_ATTEMPTS,
        }
    }

    pub fn allocate<F>(&self, is_taken: F) -> Result<QuizId>
    where
        F: Fn(&QuizId) -> bool,
    {
        self.allocate_with(&mut thread_rng(), is_taken)
    }

    /// Draws random IDs until one is not taken. Committing the ID is up to the caller.
    pub fn allocate_with<R, F>(&self, rng: &mut R, is_taken: F) -> Result<QuizId>
    where
        R: Rng + ?Sized,
        F: Fn(&QuizId) -> bool,
    {
        for attempt in 0..self.max_attempts {
            let candidate: String = (0..self.length)
                .filter_map(|_| ALPHABET.choose(rng))
                .map(|c| *c as char)
                .collect();
            let candidate = QuizId::from_trusted(candidate);
            if !is_taken(&candidate) {
                return Ok(candidate);
            }
            warn!("Quiz ID collision on attempt {}: {}", attempt + 1, candidate);
        }
        Err(Error::ExhaustedIdentifierSpace(self.max_attempts))
    }
}
