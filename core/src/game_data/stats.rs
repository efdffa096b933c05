use serde::{Deserialize, Serialize};
use std::fmt;

/// The three character statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Muscle,
    Mysticality,
    Moxie,
}

impl Stat {
    pub fn index(self) -> usize {
        match self {
            Stat::Muscle => 0,
            Stat::Mysticality => 1,
            Stat::Moxie => 2,
        }
    }

    /// Resolve a stat name, synonym, class name or index string ("0".."2").
    /// Matching is case-insensitive.
    pub fn from_word(word: &str) -> Option<Stat> {
        STAT_WORDS.get(word.trim().to_lowercase().as_str()).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Stat::Muscle => "Muscle",
            Stat::Mysticality => "Mysticality",
            Stat::Moxie => "Moxie",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every word the log uses for a stat, keyed in lowercase: stat names and
/// abbreviations, the flavour words of stat-gain messages, class names
/// (mapped to their main stat) and the literal stat indices.
pub static STAT_WORDS: phf::Map<&'static str, Stat> = phf::phf_map! {
    "muscle" => Stat::Muscle,
    "mus" => Stat::Muscle,
    "0" => Stat::Muscle,
    "beefiness" => Stat::Muscle,
    "fortitude" => Stat::Muscle,
    "muscleboundness" => Stat::Muscle,
    "strengthliness" => Stat::Muscle,
    "strongness" => Stat::Muscle,
    "seal clubber" => Stat::Muscle,
    "turtle tamer" => Stat::Muscle,
    "avatar of boris" => Stat::Muscle,
    "zombie master" => Stat::Muscle,

    "mysticality" => Stat::Mysticality,
    "mys" => Stat::Mysticality,
    "1" => Stat::Mysticality,
    "enchantedness" => Stat::Mysticality,
    "magicalness" => Stat::Mysticality,
    "mysteriousness" => Stat::Mysticality,
    "wizardliness" => Stat::Mysticality,
    "pastamancer" => Stat::Mysticality,
    "sauceror" => Stat::Mysticality,
    "mysticism" => Stat::Mysticality,

    "moxie" => Stat::Moxie,
    "mox" => Stat::Moxie,
    "2" => Stat::Moxie,
    "cheek" => Stat::Moxie,
    "chutzpah" => Stat::Moxie,
    "roguishness" => Stat::Moxie,
    "sarcasm" => Stat::Moxie,
    "smarm" => Stat::Moxie,
    "disco bandit" => Stat::Moxie,
    "accordion thief" => Stat::Moxie,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_word_case_forms() {
        assert_eq!(Stat::from_word("Muscle"), Some(Stat::Muscle));
        assert_eq!(Stat::from_word("muscle"), Some(Stat::Muscle));
        assert_eq!(Stat::from_word("Avatar Of Boris"), Some(Stat::Muscle));
        assert_eq!(Stat::from_word("Seal Clubber"), Some(Stat::Muscle));
        assert_eq!(Stat::from_word("Wizardliness"), Some(Stat::Mysticality));
        assert_eq!(Stat::from_word("Accordion Thief"), Some(Stat::Moxie));
    }

    #[test]
    fn test_from_word_indices() {
        assert_eq!(Stat::from_word("0"), Some(Stat::Muscle));
        assert_eq!(Stat::from_word("1"), Some(Stat::Mysticality));
        assert_eq!(Stat::from_word("2"), Some(Stat::Moxie));
        assert_eq!(Stat::from_word("3"), None);
    }

    #[test]
    fn test_unknown_words() {
        assert_eq!(Stat::from_word("Meat"), None);
        assert_eq!(Stat::from_word("Sneaky Pete"), None);
    }
}
