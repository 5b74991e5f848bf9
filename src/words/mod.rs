use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::from_str;

static WORDS_DIR: Dir = include_dir!("src/words");

/// A word the player has to recall, identified by its position in the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub id: usize,
    pub text: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Vocabulary {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Vocabulary {
    pub fn load() -> Self {
        let file = WORDS_DIR
            .get_file("vocabulary.json")
            .expect("Vocabulary file not found");

        let contents = file
            .contents_utf8()
            .expect("Unable to interpret vocabulary as a string");

        from_str(contents).expect("Unable to deserialize vocabulary json")
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Shuffles the vocabulary and takes the first `count` entries, assigning
    /// sequential ids by final position. `count` is clamped to the list size.
    pub fn generate_words(&self, count: usize) -> Vec<Word> {
        let mut pool = self.words.clone();
        let rng = &mut rand::thread_rng();
        pool.shuffle(rng);

        pool.into_iter()
            .take(count.min(self.words.len()))
            .enumerate()
            .map(|(id, text)| Word { id, text })
            .collect()
    }
}
