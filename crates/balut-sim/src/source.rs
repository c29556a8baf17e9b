//! Sources of dice faces

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use balut_core::{BalutError, BalutResult, DICE_COUNT, DiceRoll, FACES};

/// Anything that can throw a die.
///
/// The estimator and the round driver only ever see this trait, so tests can
/// replace the generator with a fixed script.
pub trait DiceSource {
    /// Next face in 1..=6
    fn next_face(&mut self) -> BalutResult<u8>;

    /// Throw five dice
    fn roll(&mut self) -> BalutResult<DiceRoll> {
        let mut values = [0u8; DICE_COUNT];
        for value in values.iter_mut() {
            *value = self.next_face()?;
        }
        DiceRoll::new(values).map_err(|e| BalutError::RandomSourceFailure(e.to_string()))
    }
}

impl<S: DiceSource + ?Sized> DiceSource for &mut S {
    fn next_face(&mut self) -> BalutResult<u8> {
        (**self).next_face()
    }
}

/// Dice backed by any `rand` generator
#[derive(Debug, Clone)]
pub struct RngDice<R> {
    rng: R,
}

impl<R: RngCore> RngDice<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> DiceSource for RngDice<R> {
    fn next_face(&mut self) -> BalutResult<u8> {
        Ok(self.rng.random_range(1..=FACES))
    }
}

/// ChaCha8 dice, reproducible from a seed
pub type SeededDice = RngDice<ChaCha8Rng>;

impl RngDice<ChaCha8Rng> {
    /// Deterministic dice for a seed
    pub fn new(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Deterministic dice on a separate stream of the same seed
    pub fn with_stream(seed: u64, stream: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(stream);
        Self::from_rng(rng)
    }

    /// Dice seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::from_rng(ChaCha8Rng::from_os_rng())
    }
}

/// Replays a fixed list of faces, then fails
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    faces: Vec<u8>,
    position: usize,
    cycle: bool,
}

impl ScriptedDice {
    /// Play `faces` once
    pub fn new(faces: impl Into<Vec<u8>>) -> Self {
        Self {
            faces: faces.into(),
            position: 0,
            cycle: false,
        }
    }

    /// Play `faces` over and over
    pub fn cycling(faces: impl Into<Vec<u8>>) -> Self {
        Self {
            cycle: true,
            ..Self::new(faces)
        }
    }

    /// Faces not yet thrown (always 0 when cycling an empty script)
    pub fn remaining(&self) -> usize {
        self.faces.len().saturating_sub(self.position)
    }
}

impl DiceSource for ScriptedDice {
    fn next_face(&mut self) -> BalutResult<u8> {
        if self.cycle && !self.faces.is_empty() && self.position == self.faces.len() {
            self.position = 0;
        }
        let face = self.faces.get(self.position).copied().ok_or_else(|| {
            BalutError::RandomSourceFailure(format!(
                "scripted dice exhausted after {} faces",
                self.faces.len()
            ))
        })?;
        self.position += 1;
        Ok(face)
    }
}
