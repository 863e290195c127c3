use serde::{Deserialize, Serialize};
use crate::core::GameRng;
use crate::utils::{GameError, GameResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WordEntryData")]
pub struct WordEntry {
    pub word: String,
    pub description: String,
}

impl WordEntry {
    pub fn new<W: Into<String>, D: Into<String>>(word: W, description: D) -> GameResult<Self> {
        let word = word.into().trim().to_uppercase();

        if word.is_empty() {
            return Err(GameError::invalid_word(word, "word cannot be empty"));
        }
        if !word.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(GameError::invalid_word(word, "only letters A-Z are allowed"));
        }

        Ok(Self {
            word,
            description: description.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.word.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    pub fn contains(&self, letter: char) -> bool {
        self.word.contains(letter)
    }

    /// Distinct letters of the word in first-seen order.
    pub fn distinct_letters(&self) -> Vec<char> {
        let mut letters = Vec::new();
        for c in self.word.chars() {
            if !letters.contains(&c) {
                letters.push(c);
            }
        }
        letters
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WordCatalogData")]
pub struct WordCatalog {
    pub name: String,
    entries: Vec<WordEntry>,
}

impl WordCatalog {
    pub fn new<S: Into<String>>(name: S, entries: Vec<WordEntry>) -> GameResult<Self> {
        let name = name.into();
        if entries.is_empty() {
            return Err(GameError::catalog(format!("Catalog '{}' has no words", name)));
        }
        Ok(Self { name, entries })
    }

    /// The word list shipped with the game.
    pub fn builtin() -> Self {
        let entries = BUILTIN_WORDS
            .iter()
            .map(|(word, description)| WordEntry {
                word: (*word).to_string(),
                description: (*description).to_string(),
            })
            .collect();

        Self {
            name: "builtin".to_string(),
            entries,
        }
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

}

// Deserialized values go through the same checks as `new`.
#[derive(Deserialize)]
struct WordEntryData {
    word: String,
    #[serde(default)]
    description: String,
}

impl TryFrom<WordEntryData> for WordEntry {
    type Error = GameError;

    fn try_from(data: WordEntryData) -> GameResult<Self> {
        WordEntry::new(data.word, data.description)
    }
}

#[derive(Deserialize)]
struct WordCatalogData {
    name: String,
    entries: Vec<WordEntry>,
}

impl TryFrom<WordCatalogData> for WordCatalog {
    type Error = GameError;

    fn try_from(data: WordCatalogData) -> GameResult<Self> {
        WordCatalog::new(data.name, data.entries)
    }
}

impl Default for WordCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

const BUILTIN_WORDS: &[(&str, &str)] = &[
    ("HELLO", "A common greeting to say hi."),
    ("WORLD", "The planet we live on, full of land and water."),
    ("JAVASCRIPT", "A popular language for building interactive websites."),
    ("REACT", "A powerful library for building modern UIs."),
    ("PROGRAMMING", "Writing code to make computers perform tasks."),
    ("GEEKSFORGEEKS", "An educational site for computer science enthusiasts."),
];

/// Draw a word uniformly at random, `None` only for an empty catalog.
pub fn draw_word<'a>(catalog: &'a WordCatalog, rng: &mut GameRng) -> Option<&'a WordEntry> {
    rng.choose(&catalog.entries)
}
