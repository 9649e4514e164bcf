// Past-tense inflection for `PartSpec::PastTenseOf` positions.
//
// The composer only needs one operation, so inflection sits behind the
// `Inflector` trait and callers can plug in anything (a full morphology
// library, a lookup table, a closure in tests). `EnglishInflector` is the
// default: an irregular-verb table, then the regular spelling rules.
//
// Inflection runs after selection, so the inflected form does not need to
// rhyme, and its length does not affect the entropy estimate.

/// Turns a base verb into its past-tense surface form.
pub trait Inflector {
    fn to_past_tense(&self, verb: &str) -> String;
}

impl<F> Inflector for F
where
    F: Fn(&str) -> String,
{
    fn to_past_tense(&self, verb: &str) -> String {
        self(verb)
    }
}

/// Rule-based English simple past.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishInflector;

const IRREGULAR: &[(&str, &str)] = &[
    ("arise", "arose"),
    ("awake", "awoke"),
    ("be", "was"),
    ("bear", "bore"),
    ("beat", "beat"),
    ("become", "became"),
    ("begin", "began"),
    ("bend", "bent"),
    ("bet", "bet"),
    ("bind", "bound"),
    ("bite", "bit"),
    ("bleed", "bled"),
    ("blow", "blew"),
    ("break", "broke"),
    ("breed", "bred"),
    ("bring", "brought"),
    ("build", "built"),
    ("burst", "burst"),
    ("buy", "bought"),
    ("cast", "cast"),
    ("catch", "caught"),
    ("choose", "chose"),
    ("cling", "clung"),
    ("come", "came"),
    ("cost", "cost"),
    ("creep", "crept"),
    ("cut", "cut"),
    ("deal", "dealt"),
    ("dig", "dug"),
    ("do", "did"),
    ("draw", "drew"),
    ("drink", "drank"),
    ("drive", "drove"),
    ("eat", "ate"),
    ("fall", "fell"),
    ("feed", "fed"),
    ("feel", "felt"),
    ("fight", "fought"),
    ("find", "found"),
    ("flee", "fled"),
    ("fling", "flung"),
    ("fly", "flew"),
    ("forbid", "forbade"),
    ("forget", "forgot"),
    ("forgive", "forgave"),
    ("freeze", "froze"),
    ("get", "got"),
    ("give", "gave"),
    ("go", "went"),
    ("grind", "ground"),
    ("grow", "grew"),
    ("hang", "hung"),
    ("have", "had"),
    ("hear", "heard"),
    ("hide", "hid"),
    ("hit", "hit"),
    ("hold", "held"),
    ("hurt", "hurt"),
    ("keep", "kept"),
    ("kneel", "knelt"),
    ("know", "knew"),
    ("lay", "laid"),
    ("lead", "led"),
    ("leave", "left"),
    ("lend", "lent"),
    ("let", "let"),
    ("lie", "lay"),
    ("light", "lit"),
    ("lose", "lost"),
    ("make", "made"),
    ("mean", "meant"),
    ("meet", "met"),
    ("pay", "paid"),
    ("put", "put"),
    ("quit", "quit"),
    ("read", "read"),
    ("ride", "rode"),
    ("ring", "rang"),
    ("rise", "rose"),
    ("run", "ran"),
    ("say", "said"),
    ("see", "saw"),
    ("seek", "sought"),
    ("sell", "sold"),
    ("send", "sent"),
    ("set", "set"),
    ("shake", "shook"),
    ("shine", "shone"),
    ("shoot", "shot"),
    ("shut", "shut"),
    ("sing", "sang"),
    ("sink", "sank"),
    ("sit", "sat"),
    ("sleep", "slept"),
    ("slide", "slid"),
    ("speak", "spoke"),
    ("spend", "spent"),
    ("spin", "spun"),
    ("split", "split"),
    ("spread", "spread"),
    ("spring", "sprang"),
    ("stand", "stood"),
    ("steal", "stole"),
    ("stick", "stuck"),
    ("sting", "stung"),
    ("strike", "struck"),
    ("swear", "swore"),
    ("sweep", "swept"),
    ("swim", "swam"),
    ("swing", "swung"),
    ("take", "took"),
    ("teach", "taught"),
    ("tear", "tore"),
    ("tell", "told"),
    ("think", "thought"),
    ("throw", "threw"),
    ("understand", "understood"),
    ("wake", "woke"),
    ("wear", "wore"),
    ("weep", "wept"),
    ("win", "won"),
    ("wind", "wound"),
    ("write", "wrote"),
];

fn is_vowel_letter(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Number of separate vowel-letter runs; a rough syllable count.
fn vowel_groups(word: &str) -> usize {
    let mut groups = 0;
    let mut in_group = false;
    for c in word.chars() {
        let v = is_vowel_letter(c);
        if v && !in_group {
            groups += 1;
        }
        in_group = v;
    }
    groups
}

/// Single-syllable consonant-vowel-consonant ending: "stop", "plan".
/// Final w, x and y never double.
fn doubles_final_consonant(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    let [.., a, b, c] = chars.as_slice() else {
        return false;
    };
    !is_vowel_letter(*a)
        && is_vowel_letter(*b)
        && !is_vowel_letter(*c)
        && !matches!(c, 'w' | 'x' | 'y')
        && vowel_groups(word) == 1
}

impl Inflector for EnglishInflector {
    fn to_past_tense(&self, verb: &str) -> String {
        let lower = verb.to_lowercase();
        if let Ok(idx) = IRREGULAR.binary_search_by(|(base, _)| (*base).cmp(lower.as_str())) {
            return IRREGULAR[idx].1.to_string();
        }
        if lower.ends_with('e') {
            return format!("{verb}d");
        }
        let consonant_y = lower
            .strip_suffix('y')
            .and_then(|stem| stem.chars().last())
            .is_some_and(|c| !is_vowel_letter(c));
        if consonant_y {
            return format!("{}ied", &verb[..verb.len() - 1]);
        }
        match verb.chars().last() {
            Some(last) if doubles_final_consonant(&lower) => format!("{verb}{last}ed"),
            _ => format!("{verb}ed"),
        }
    }
}
