// Core passphrase vocabulary types: roles, part specs, phonemes, rhyme keys.
//
// The type hierarchy is:
// - `Role`: one of the eight grammatical roles a dictionary tags words with
// - `PartSpec`: what a passphrase position asks for: a plain role, or a
//   role whose chosen word is inflected to past tense after selection
// - `Phonemes`: an ARPAbet pronunciation, e.g. `["K", "AE1", "T"]`
// - `RhymeKey`: the pronunciation suffix from the primary stress onwards;
//   two words rhyme iff their keys are equal
//
// Role tags (`"n."`, `"v."`, ...) are the external dictionary's vocabulary;
// unknown tags map to `None` and are dropped by the loaders.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Grammatical role of a dictionary word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Noun,
    Verb,
    Adjective,
    Preposition,
    Adverb,
    Conjunction,
    Pronoun,
    Exclamation,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 8] = [
        Role::Noun,
        Role::Verb,
        Role::Adjective,
        Role::Preposition,
        Role::Adverb,
        Role::Conjunction,
        Role::Pronoun,
        Role::Exclamation,
    ];

    /// The dictionary tag for this role.
    pub fn tag(self) -> &'static str {
        match self {
            Role::Noun => "n.",
            Role::Verb => "v.",
            Role::Adjective => "adj.",
            Role::Preposition => "prep.",
            Role::Adverb => "adv.",
            Role::Conjunction => "conj.",
            Role::Pronoun => "pron.",
            Role::Exclamation => "exclam.",
        }
    }

    /// Parse a dictionary tag. Tags outside the fixed set (e.g. `"det."`)
    /// return `None`.
    pub fn from_tag(tag: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.tag() == tag)
    }

    /// Lowercase English name, as used on the command line and in config.
    pub fn name(self) -> &'static str {
        match self {
            Role::Noun => "noun",
            Role::Verb => "verb",
            Role::Adjective => "adjective",
            Role::Preposition => "preposition",
            Role::Adverb => "adverb",
            Role::Conjunction => "conjunction",
            Role::Pronoun => "pronoun",
            Role::Exclamation => "exclamation",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = String;

    /// Accepts full names (`noun`), short names (`n`, `adj`) and dictionary
    /// tags (`n.`, `adj.`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if let Some(role) = Role::from_tag(&lower) {
            return Ok(role);
        }
        let role = match lower.as_str() {
            "noun" | "n" => Role::Noun,
            "verb" | "v" => Role::Verb,
            "adjective" | "adj" => Role::Adjective,
            "preposition" | "prep" => Role::Preposition,
            "adverb" | "adv" => Role::Adverb,
            "conjunction" | "conj" => Role::Conjunction,
            "pronoun" | "pron" => Role::Pronoun,
            "exclamation" | "exclam" => Role::Exclamation,
            _ => return Err(format!("unknown role: {s}")),
        };
        Ok(role)
    }
}

/// What a single passphrase position requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartSpec {
    /// A word with this role, used as-is.
    Plain(Role),
    /// A word with this role, replaced by its past-tense form after
    /// selection. Rhyme and role lookups see only the base role.
    PastTenseOf(Role),
}

impl PartSpec {
    /// The past-tense verb composite.
    pub const PAST_TENSE_VERB: PartSpec = PartSpec::PastTenseOf(Role::Verb);

    /// The role used for rhyme and role lookups.
    pub fn base_role(self) -> Role {
        match self {
            PartSpec::Plain(role) | PartSpec::PastTenseOf(role) => role,
        }
    }

    /// Whether the selected word must be inflected to past tense.
    pub fn needs_past_tense(self) -> bool {
        matches!(self, PartSpec::PastTenseOf(_))
    }
}

impl From<Role> for PartSpec {
    fn from(role: Role) -> Self {
        PartSpec::Plain(role)
    }
}

impl fmt::Display for PartSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartSpec::Plain(role) => write!(f, "{role}"),
            PartSpec::PastTenseOf(role) => write!(f, "past-{role}"),
        }
    }
}

impl FromStr for PartSpec {
    type Err = String;

    /// Any `Role` spelling, or `past-<role>` for the past-tense composite.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        if let Some(rest) = lower.strip_prefix("past-") {
            return rest.parse::<Role>().map(PartSpec::PastTenseOf);
        }
        trimmed.parse::<Role>().map(PartSpec::Plain)
    }
}

impl Serialize for PartSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PartSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// ARPAbet vowels. Stress digits are stripped before lookup.
const VOWELS: [&str; 15] = [
    "AA", "AE", "AH", "AO", "AW", "AY", "EH", "ER", "EY", "IH", "IY", "OW", "OY", "UH", "UW",
];

/// Whether an ARPAbet phoneme is a vowel, ignoring any stress digit.
pub fn is_vowel(phoneme: &str) -> bool {
    let bare = phoneme.trim_end_matches(|c: char| c.is_ascii_digit());
    VOWELS.contains(&bare)
}

/// A word's pronunciation as ARPAbet symbols.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phonemes(pub Vec<String>);

impl Phonemes {
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Phonemes(symbols.into_iter().map(Into::into).collect())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Suffix starting at the first primary-stressed phoneme, space-joined.
    /// Stress digits are kept, so `AE1 T` and `AE2 T` are different keys.
    /// Empty when no phoneme carries primary stress.
    pub fn rhyme_key(&self) -> RhymeKey {
        crate::index::rhyme_key_of(&self.0)
    }

    /// The consonants only, space-joined. Words sharing a skeleton are
    /// pararhymes ("bell" / "ball").
    pub fn consonant_skeleton(&self) -> String {
        self.0
            .iter()
            .filter(|p| !is_vowel(p))
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Canonical rhyming suffix of a pronunciation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RhymeKey(pub String);

impl RhymeKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RhymeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
