use include_dir::{include_dir, Dir};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::from_str;
use std::{fs, path::Path};
use tracing::{debug, warn};

use crate::error::{EndgameError, Result};
use crate::game::SecretWord;

static DATA_DIR: Dir = include_dir!("src/data");

const WORDS_FILE: &str = "words.json";
const SCHEDULE_FILE: &str = "languages.json";

/// Supplies secret words and the penalty schedule they are played against.
pub trait WordSource {
    fn choose_word(&mut self) -> SecretWord;
    fn schedule(&self) -> &Schedule;
}

/// One chip of the penalty schedule. Colours are `#rrggbb`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Penalty {
    pub name: String,
    pub background: String,
    pub foreground: String,
}

#[derive(Deserialize)]
struct ScheduleFile {
    name: String,
    penalties: Vec<Penalty>,
}

/// Ordered chips crossed off one per wrong guess. The last chip is never
/// crossed off; losing it would mean losing the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schedule {
    pub name: String,
    penalties: Vec<Penalty>,
}

impl Schedule {
    pub fn new(name: impl Into<String>, penalties: Vec<Penalty>) -> Result<Self> {
        let name = name.into();
        if penalties.is_empty() {
            return Err(EndgameError::EmptySchedule(name));
        }
        Ok(Self { name, penalties })
    }

    pub fn embedded() -> Result<Self> {
        let file: ScheduleFile = from_str(embedded_file(SCHEDULE_FILE)?)?;
        Self::new(file.name, file.penalties)
    }

    pub fn penalties(&self) -> &[Penalty] {
        &self.penalties
    }

    pub fn len(&self) -> usize {
        self.penalties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.penalties.is_empty()
    }

    pub fn max_errors(&self) -> usize {
        self.penalties.len().saturating_sub(1)
    }

    pub fn get(&self, index: usize) -> Option<&Penalty> {
        self.penalties.get(index)
    }

    /// The chip the player is fighting to keep.
    pub fn last(&self) -> &Penalty {
        // never empty, checked in `new`
        &self.penalties[self.penalties.len() - 1]
    }
}

#[derive(Deserialize)]
struct WordListFile {
    name: String,
    words: Vec<String>,
}

/// A validated, non-empty list of secret words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordList {
    pub name: String,
    first: SecretWord,
    rest: Vec<SecretWord>,
}

impl WordList {
    pub fn new<I, S>(name: impl Into<String>, words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        let mut words = words
            .into_iter()
            .map(|w| SecretWord::new(w.as_ref()))
            .collect::<Result<Vec<_>>>()?
            .into_iter();

        let Some(first) = words.next() else {
            return Err(EndgameError::EmptyWordList(name));
        };

        Ok(Self {
            name,
            first,
            rest: words.collect(),
        })
    }

    pub fn embedded() -> Result<Self> {
        Self::from_json(embedded_file(WORDS_FILE)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: WordListFile = from_str(json)?;
        Self::new(file.name, file.words)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let list = Self::from_json(&fs::read_to_string(path)?).inspect_err(|err| {
            warn!(path = %path.display(), %err, "rejected word list");
        })?;
        debug!(path = %path.display(), words = list.len(), "loaded word list");
        Ok(list)
    }

    pub fn words(&self) -> impl Iterator<Item = &SecretWord> {
        std::iter::once(&self.first).chain(&self.rest)
    }

    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn first(&self) -> &SecretWord {
        &self.first
    }

    pub fn get(&self, index: usize) -> Option<&SecretWord> {
        match index {
            0 => Some(&self.first),
            i => self.rest.get(i - 1),
        }
    }

    pub fn contains(&self, word: &SecretWord) -> bool {
        self.words().any(|w| w == word)
    }
}

fn embedded_file(file_name: &str) -> Result<&'static str> {
    let file = DATA_DIR
        .get_file(file_name)
        .ok_or_else(|| EndgameError::MissingData(file_name.to_string()))?;

    file.contents_utf8()
        .ok_or_else(|| EndgameError::InvalidData(file_name.to_string()))
}

/// Picks words uniformly at random. The same word can come up twice in a row.
#[derive(Debug)]
pub struct RandomWordSource<R = StdRng> {
    words: WordList,
    schedule: Schedule,
    rng: R,
}

impl RandomWordSource<StdRng> {
    pub fn from_entropy(words: WordList, schedule: Schedule) -> Self {
        Self::with_rng(words, schedule, StdRng::from_entropy())
    }

    pub fn seeded(words: WordList, schedule: Schedule, seed: u64) -> Self {
        Self::with_rng(words, schedule, StdRng::seed_from_u64(seed))
    }
}

impl<R: rand::Rng> RandomWordSource<R> {
    pub fn with_rng(words: WordList, schedule: Schedule, rng: R) -> Self {
        Self {
            words,
            schedule,
            rng,
        }
    }

    pub fn words(&self) -> &WordList {
        &self.words
    }
}

impl<R: rand::Rng> WordSource for RandomWordSource<R> {
    fn choose_word(&mut self) -> SecretWord {
        let index = self.rng.gen_range(0..self.words.len());
        self.words.get(index).unwrap_or(self.words.first()).clone()
    }

    fn schedule(&self) -> &Schedule {
        &self.schedule
    }
}

/// Hands out the given words in order, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct FixedWordSource {
    words: WordList,
    schedule: Schedule,
    next: usize,
}

impl FixedWordSource {
    /// A fixed source over `words`, played against the embedded schedule.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::with_schedule(
            WordList::new("fixed", words)?,
            Schedule::embedded()?,
        ))
    }

    pub fn with_schedule(words: WordList, schedule: Schedule) -> Self {
        Self {
            words,
            schedule,
            next: 0,
        }
    }
}

impl WordSource for FixedWordSource {
    fn choose_word(&mut self) -> SecretWord {
        let word = self.words.get(self.next).unwrap_or(self.words.first()).clone();
        self.next = (self.next + 1) % self.words.len();
        word
    }

    fn schedule(&self) -> &Schedule {
        &self.schedule
    }
}
