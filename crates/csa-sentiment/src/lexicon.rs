//! Rule-based lexicon scorer for short social-media comments.
//!
//! Word and emoji valences are on a `-4.0..=4.0` scale. The raw valence sum is
//! adjusted by intensity boosters, negation, ALL-CAPS emphasis, contrastive
//! "but" and exclamation marks, then squashed into a compound score in
//! `[-1.0, 1.0]`.

use crate::scorer::PolarityScorer;
use crate::types::PolarityScores;

/// Valence increment from a booster word ("very", "so").
const B_INCR: f64 = 0.293;
/// Valence decrement from a dampener word ("slightly", "kinda").
const B_DECR: f64 = -0.293;
/// Emphasis for an ALL-CAPS sentiment word inside mixed-case text.
const C_INCR: f64 = 0.733;
/// Multiplier applied to a negated valence.
const N_SCALAR: f64 = -0.74;
/// Normalization constant for the compound score.
const ALPHA: f64 = 15.0;
/// Preceding tokens inspected for boosters and negations.
const LOOKBACK: usize = 3;

const LEXICON: &[(&str, f64)] = &[
    // Positive
    ("adorable", 2.2),
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("blessed", 2.9),
    ("brilliant", 2.8),
    ("congrats", 2.4),
    ("congratulations", 2.9),
    ("cool", 1.3),
    ("cute", 2.0),
    ("delicious", 2.7),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("excellent", 2.7),
    ("excited", 1.4),
    ("fabulous", 2.4),
    ("fantastic", 2.6),
    ("favorite", 2.0),
    ("favourite", 2.0),
    ("fun", 2.3),
    ("funny", 1.9),
    ("glad", 2.0),
    ("good", 1.9),
    ("gorgeous", 3.0),
    ("great", 3.1),
    ("happy", 2.7),
    ("helpful", 1.8),
    ("incredible", 2.2),
    ("inspiring", 2.2),
    ("legend", 1.8),
    ("like", 1.5),
    ("liked", 1.8),
    ("lmao", 2.0),
    ("lol", 2.9),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("loving", 2.9),
    ("nice", 1.8),
    ("perfect", 2.7),
    ("pretty", 2.2),
    ("proud", 2.1),
    ("queen", 1.2),
    ("slay", 1.6),
    ("stunning", 2.7),
    ("super", 2.9),
    ("sweet", 2.0),
    ("talented", 2.3),
    ("thank", 1.5),
    ("thanks", 1.9),
    ("wonderful", 2.7),
    ("wow", 2.8),
    ("yay", 2.4),
    ("yes", 1.7),
    // Negative
    ("angry", -2.3),
    ("annoying", -1.7),
    ("awful", -2.0),
    ("bad", -2.5),
    ("boring", -1.3),
    ("cringe", -1.5),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("disgusting", -2.4),
    ("dislike", -1.6),
    ("fail", -2.5),
    ("fake", -2.1),
    ("gross", -2.1),
    ("hate", -2.7),
    ("hated", -3.2),
    ("horrible", -2.5),
    ("lame", -1.8),
    ("mediocre", -1.0),
    ("overrated", -1.5),
    ("pathetic", -2.7),
    ("poor", -2.1),
    ("ridiculous", -1.5),
    ("sad", -2.1),
    ("scam", -2.5),
    ("stupid", -2.4),
    ("sucks", -1.5),
    ("terrible", -2.1),
    ("trash", -1.9),
    ("ugly", -2.3),
    ("unfollow", -1.2),
    ("useless", -1.8),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
    // Emoji
    ("❤", 3.0),
    ("💕", 2.8),
    ("💖", 2.8),
    ("😍", 3.0),
    ("🥰", 3.0),
    ("😘", 2.5),
    ("😊", 2.4),
    ("😀", 2.3),
    ("😁", 2.3),
    ("🙂", 1.5),
    ("😂", 1.6),
    ("🤣", 1.6),
    ("👍", 1.8),
    ("👏", 2.0),
    ("🙌", 2.0),
    ("🔥", 1.9),
    ("💯", 1.9),
    ("✨", 1.2),
    ("😢", -2.0),
    ("😭", -1.0),
    ("😞", -2.0),
    ("😒", -1.8),
    ("🙄", -1.5),
    ("😠", -2.4),
    ("😡", -2.8),
    ("🤮", -3.0),
    ("👎", -2.0),
    ("💔", -2.6),
];

const BOOSTERS: &[&str] = &[
    "absolutely",
    "completely",
    "extremely",
    "highly",
    "incredibly",
    "most",
    "so",
    "soo",
    "sooo",
    "soooo",
    "really",
    "super",
    "totally",
    "truly",
    "very",
];

const DAMPENERS: &[&str] = &[
    "barely", "hardly", "kinda", "marginally", "slightly", "somewhat", "sorta",
];

const NEGATIONS: &[&str] = &[
    "aint", "cannot", "cant", "didnt", "doesnt", "dont", "isnt", "neither", "never", "no",
    "nobody", "none", "nor", "not", "nothing", "wasnt", "without", "wont",
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    lower: String,
    /// Two or more letters, all uppercase.
    is_caps: bool,
}

/// Stateless lexicon scorer; cheap to share behind an `Arc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity_scores(&self, text: &str) -> PolarityScores {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return PolarityScores::default();
        }

        let letter_tokens = tokens
            .iter()
            .filter(|t| t.lower.chars().any(char::is_alphabetic));
        let caps_count = letter_tokens.clone().filter(|t| t.is_caps).count();
        let caps_differential = caps_count > 0 && caps_count < letter_tokens.count();

        let mut sentiments: Vec<f64> = tokens
            .iter()
            .enumerate()
            .map(|(i, token)| token_valence(&tokens, i, token, caps_differential))
            .collect();

        apply_but_shift(&tokens, &mut sentiments);

        let punct_amp = punctuation_emphasis(text);
        let mut sum: f64 = sentiments.iter().sum();
        if sum > 0.0 {
            sum += punct_amp;
        } else if sum < 0.0 {
            sum -= punct_amp;
        }
        let compound = normalize(sum);

        let (mut pos_sum, mut neg_sum, mut neu_count) = (0.0_f64, 0.0_f64, 0.0_f64);
        for &s in &sentiments {
            if s > 0.0 {
                pos_sum += s + 1.0;
            } else if s < 0.0 {
                neg_sum += s - 1.0;
            } else {
                neu_count += 1.0;
            }
        }
        if pos_sum > neg_sum.abs() {
            pos_sum += punct_amp;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= punct_amp;
        }

        let total = pos_sum + neg_sum.abs() + neu_count;
        PolarityScores {
            compound: round_to(compound, 4),
            pos: round_to((pos_sum / total).abs(), 3),
            neg: round_to((neg_sum / total).abs(), 3),
            neu: round_to((neu_count / total).abs(), 3),
        }
    }
}

/// Splits on whitespace, peels emoji into their own tokens and trims
/// surrounding punctuation from words. Internal apostrophes survive ("don't").
fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for word in text.split_whitespace() {
        let mut buf = String::new();
        for c in word.chars() {
            if is_emoji(c) {
                push_word(&mut tokens, &buf);
                buf.clear();
                tokens.push(Token {
                    lower: c.to_string(),
                    is_caps: false,
                });
            } else if !is_joiner(c) {
                buf.push(c);
            }
        }
        push_word(&mut tokens, &buf);
    }
    tokens
}

fn push_word(tokens: &mut Vec<Token>, raw: &str) {
    let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
    if word.is_empty() {
        return;
    }
    let letters = word.chars().filter(|c| c.is_alphabetic()).count();
    let is_caps = letters >= 2
        && word
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase);
    tokens.push(Token {
        lower: word.to_lowercase(),
        is_caps,
    });
}

fn is_emoji(c: char) -> bool {
    matches!(u32::from(c), 0x1F300..=0x1FAFF | 0x2600..=0x27BF)
}

/// Variation selectors and zero-width joiners carry no meaning of their own.
fn is_joiner(c: char) -> bool {
    matches!(c, '\u{FE0E}' | '\u{FE0F}' | '\u{200D}')
}

fn lexicon_valence(word: &str) -> Option<f64> {
    LEXICON
        .iter()
        .find(|(lex_word, _)| *lex_word == word)
        .map(|&(_, valence)| valence)
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't")
}

/// Booster/dampener adjustment contributed by `modifier` to `valence`.
fn booster_scalar(modifier: &Token, valence: f64, caps_differential: bool) -> f64 {
    let mut scalar = if BOOSTERS.contains(&modifier.lower.as_str()) {
        B_INCR
    } else if DAMPENERS.contains(&modifier.lower.as_str()) {
        B_DECR
    } else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if modifier.is_caps && caps_differential {
        scalar += C_INCR.copysign(valence);
    }
    scalar
}

fn token_valence(tokens: &[Token], i: usize, token: &Token, caps_differential: bool) -> f64 {
    let word = token.lower.as_str();
    // Modifiers only ever adjust their neighbours.
    if BOOSTERS.contains(&word) && i + 1 < tokens.len() {
        return 0.0;
    }
    let Some(mut valence) = lexicon_valence(word) else {
        return 0.0;
    };

    if token.is_caps && caps_differential {
        valence += C_INCR.copysign(valence);
    }

    let mut negated = false;
    for k in 1..=LOOKBACK.min(i) {
        let prev = &tokens[i - k];
        let decay = match k {
            1 => 1.0,
            2 => 0.95,
            _ => 0.9,
        };
        valence += booster_scalar(prev, valence, caps_differential) * decay;
        negated |= is_negation(&prev.lower);
    }
    if negated {
        valence *= N_SCALAR;
    }
    valence
}

/// Sentiment before "but" is halved, sentiment after it weighs 1.5×.
fn apply_but_shift(tokens: &[Token], sentiments: &mut [f64]) {
    let Some(but_idx) = tokens.iter().position(|t| t.lower == "but") else {
        return;
    };
    for (i, s) in sentiments.iter_mut().enumerate() {
        if i < but_idx {
            *s *= 0.5;
        } else if i > but_idx {
            *s *= 1.5;
        }
    }
}

/// Up to four `!` add 0.292 each; runs of `?` add a little more.
fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.chars().filter(|&c| c == '!').count().min(4);
    let questions = text.chars().filter(|&c| c == '?').count();
    #[allow(clippy::cast_precision_loss)]
    let ep = exclamations as f64 * 0.292;
    #[allow(clippy::cast_precision_loss)]
    let qm = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * 0.18,
        _ => 0.96,
    };
    ep + qm
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}
