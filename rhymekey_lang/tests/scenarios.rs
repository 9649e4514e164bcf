// End-to-end passphrase scenarios against the bundled dataset and a small
// synthetic lexicon.
//
// Each test goes through the public API only: build or share a context,
// compose with a seeded `PhraseRng`, and check the structural properties
// of the result (word count, roles, rhymes, capitalization, entropy).

use rhymekey_lang::{
    DataSource, EnglishInflector, Lexicon, NoAssignment, PartSpec, PhraseConfig, PhraseContext,
    PhraseError, PhraseRequest, Role, compose_passphrase, select_rhyme_group, shared_context,
};
use rhymekey_prng::PhraseRng;

fn bundled() -> &'static PhraseContext {
    shared_context(&DataSource::Bundled).unwrap()
}

fn nouns(n: usize) -> Vec<PartSpec> {
    vec![PartSpec::Plain(Role::Noun); n]
}

fn rhyme_key(ctx: &PhraseContext, word: &str) -> String {
    ctx.lexicon()
        .lookup_phonemes(&word.to_lowercase())
        .unwrap()
        .rhyme_key()
        .as_str()
        .to_string()
}

/// Two rhyming noun families plus one verb and one adjective, so group
/// sizes and entropies can be worked out by hand.
fn synthetic() -> PhraseContext {
    let roles = serde_json::from_str(
        r#"{
            "cat": ["n."], "hat": ["n."], "bat": ["n.", "v."],
            "bell": ["n."], "shell": ["n."],
            "hop": ["v."], "red": ["adj."],
            "wow": ["exclam."]
        }"#,
    )
    .unwrap();
    let phonemes = serde_json::from_str(
        r#"{
            "cat": ["K", "AE1", "T"], "hat": ["HH", "AE1", "T"],
            "bat": ["B", "AE1", "T"], "bell": ["B", "EH1", "L"],
            "shell": ["SH", "EH1", "L"], "hop": ["HH", "AA1", "P"],
            "red": ["R", "EH1", "D"]
        }"#,
    )
    .unwrap();
    PhraseContext::build(Lexicon::new(roles, phonemes))
}

// ---------------------------------------------------------------------------
// Scenario 1: ungrouped nouns
// ---------------------------------------------------------------------------

#[test]
fn four_ungrouped_nouns_always_succeed() {
    let ctx = bundled();
    let request = PhraseRequest::new(nouns(4)).with_minimum_entropy(0.0);
    for seed in 0..50 {
        let phrase =
            compose_passphrase(ctx, &request, &EnglishInflector, &mut PhraseRng::new(seed))
                .unwrap();
        assert_eq!(phrase.words.len(), 4);
        for word in &phrase.words {
            assert!(ctx.has_role(&word.to_lowercase(), Role::Noun), "{word}");
        }
        let noun_bits = (ctx.words_with_role(Role::Noun).len() as f64).log2();
        assert!((phrase.entropy_bits - 4.0 * noun_bits).abs() < 1e-9);
    }
}

#[test]
fn text_is_concatenation_of_capitalized_words() {
    let ctx = bundled();
    let request = PhraseConfig::default().request();
    for seed in 0..30 {
        let Ok(phrase) =
            compose_passphrase(ctx, &request, &EnglishInflector, &mut PhraseRng::new(seed))
        else {
            continue;
        };
        assert_eq!(phrase.text, phrase.words.concat());
        let total: usize = phrase.words.iter().map(String::len).sum();
        assert_eq!(phrase.text.len(), total);
        for word in &phrase.words {
            let first = word.chars().next().unwrap();
            assert!(first.is_uppercase(), "{word} is not capitalized");
        }
    }
}

// ---------------------------------------------------------------------------
// Scenario 2: two independent rhyme groups
// ---------------------------------------------------------------------------

#[test]
fn interleaved_groups_rhyme_independently() {
    let ctx = bundled();
    let request = PhraseRequest::new(nouns(4))
        .with_groups([1, 2, 1, 2])
        .with_minimum_entropy(0.0);
    let mut successes = 0;
    for seed in 0..40 {
        let Ok(phrase) =
            compose_passphrase(ctx, &request, &EnglishInflector, &mut PhraseRng::new(seed))
        else {
            continue;
        };
        successes += 1;
        let w = &phrase.words;
        assert_eq!(rhyme_key(ctx, &w[0]), rhyme_key(ctx, &w[2]));
        assert_eq!(rhyme_key(ctx, &w[1]), rhyme_key(ctx, &w[3]));
        assert_ne!(w[0], w[2]);
        assert_ne!(w[1], w[3]);
        assert!(phrase.entropy_bits > 0.0);
    }
    assert!(successes > 0);
}

#[test]
fn group_entropies_add_up() {
    let ctx = synthetic();
    let request = PhraseRequest::new(nouns(4))
        .with_groups([1, 2, 1, 2])
        .with_minimum_entropy(0.0);
    for seed in 0..30 {
        let mut rng = PhraseRng::new(seed);
        let phrase = compose_passphrase(&ctx, &request, &EnglishInflector, &mut rng).unwrap();

        // Replay the two groups with an identically seeded generator.
        let mut replay = PhraseRng::new(seed);
        let first = select_rhyme_group(&ctx, &[Role::Noun, Role::Noun], &mut replay).unwrap();
        let second = select_rhyme_group(&ctx, &[Role::Noun, Role::Noun], &mut replay).unwrap();
        assert!((phrase.entropy_bits - (first.entropy_bits + second.entropy_bits)).abs() < 1e-12);
        assert_eq!(phrase.words[0].to_lowercase(), first.words[0]);
        assert_eq!(phrase.words[3].to_lowercase(), second.words[1]);
    }
}

// ---------------------------------------------------------------------------
// Scenario 3: the default layout
// ---------------------------------------------------------------------------

#[test]
fn default_layout_on_bundled_data() {
    let ctx = bundled();
    let request = PhraseRequest::new([
        PartSpec::Plain(Role::Adjective),
        PartSpec::Plain(Role::Noun),
        PartSpec::PAST_TENSE_VERB,
        PartSpec::Plain(Role::Noun),
    ])
    .with_groups([1, 2, 3, 2]);
    let mut successes = 0;
    for seed in 0..40 {
        let Ok(phrase) =
            compose_passphrase(ctx, &request, &EnglishInflector, &mut PhraseRng::new(seed))
        else {
            continue;
        };
        successes += 1;
        let w = &phrase.words;
        assert_eq!(w.len(), 4);
        assert!(ctx.has_role(&w[0].to_lowercase(), Role::Adjective));
        assert_eq!(rhyme_key(ctx, &w[1]), rhyme_key(ctx, &w[3]));
        assert!(phrase.entropy_bits > 20.0);
    }
    assert!(successes > 0);
}

#[test]
fn past_tense_position_is_inflected() {
    let ctx = synthetic();
    let request = PhraseRequest::new([PartSpec::Plain(Role::Adjective), PartSpec::PAST_TENSE_VERB])
        .with_minimum_entropy(-1.0);
    for seed in 0..20 {
        let phrase =
            compose_passphrase(&ctx, &request, &EnglishInflector, &mut PhraseRng::new(seed))
                .unwrap();
        assert_eq!(phrase.words[0], "Red");
        assert!(
            phrase.words[1] == "Hopped" || phrase.words[1] == "Batted",
            "{}",
            phrase.words[1]
        );
    }
}

// ---------------------------------------------------------------------------
// Scenario 4: empty vocabulary
// ---------------------------------------------------------------------------

#[test]
fn role_without_vocabulary_never_assigns() {
    let ctx = synthetic();
    for seed in 0..25 {
        let mut rng = PhraseRng::new(seed);
        assert_eq!(
            select_rhyme_group(&ctx, &[Role::Preposition], &mut rng),
            Err(NoAssignment)
        );
        // "wow" has a role but no pronunciation, so nothing rhymes with it.
        assert_eq!(
            select_rhyme_group(&ctx, &[Role::Exclamation, Role::Noun], &mut rng),
            Err(NoAssignment)
        );
        let request = PhraseRequest::new([PartSpec::Plain(Role::Conjunction)]);
        assert_eq!(
            compose_passphrase(&ctx, &request, &EnglishInflector, &mut rng),
            Err(PhraseError::NoAssignment)
        );
    }
}

// ---------------------------------------------------------------------------
// Scenario 5: unreachable threshold
// ---------------------------------------------------------------------------

#[test]
fn unreachable_threshold_is_below_threshold() {
    let ctx = bundled();
    let request = PhraseRequest::new(nouns(4)).with_minimum_entropy(1000.0);
    for seed in 0..20 {
        assert_eq!(
            compose_passphrase(ctx, &request, &EnglishInflector, &mut PhraseRng::new(seed)),
            Err(PhraseError::BelowThreshold {
                minimum_bits: 1000.0
            })
        );
    }
}

// ---------------------------------------------------------------------------
// Shared context and reproducibility
// ---------------------------------------------------------------------------

#[test]
fn shared_context_initializes_once() {
    let a = bundled();
    let b = shared_context(&DataSource::Bundled).unwrap();
    assert!(std::ptr::eq(a, b));
}

#[test]
fn same_seed_same_passphrase() {
    let ctx = bundled();
    let request = PhraseConfig::default().request().with_minimum_entropy(0.0);
    let a = compose_passphrase(ctx, &request, &EnglishInflector, &mut PhraseRng::new(2024));
    let b = compose_passphrase(ctx, &request, &EnglishInflector, &mut PhraseRng::new(2024));
    assert_eq!(a, b);
}

#[test]
fn bundled_data_reports_missing_phonemes() {
    let ctx = bundled();
    let missing = ctx.lexicon().missing_phonemes();
    assert!(missing.contains(&"selfie"));
    assert!(ctx.role_counts()[&Role::Noun] >= 256);
}
