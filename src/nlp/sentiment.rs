//! Lexicon-based sentiment scoring.
//!
//! Each opinion word in the lexicon carries a polarity in `[-1, 1]`. The
//! polarity of a text is the mean over the opinion words it contains, after
//! two adjustments from the word(s) right before each hit:
//!
//! - an intensifier ("very", "extremely", ...) multiplies the polarity
//! - a negation ("not", "never", "don't", ...) multiplies it by `-0.5`
//!
//! Text without any opinion word scores exactly `0.0`.

use crate::models::Sentiment;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::words;

const LEXICON: &[(&str, f64)] = &[
    // positive
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("amazing", 0.6),
    ("wonderful", 1.0),
    ("fantastic", 0.4),
    ("positive", 0.23),
    ("happy", 0.8),
    ("glad", 0.5),
    ("pleased", 0.5),
    ("proud", 0.8),
    ("success", 0.3),
    ("successful", 0.75),
    ("win", 0.8),
    ("won", 0.5),
    ("victory", 0.5),
    ("strong", 0.43),
    ("growth", 0.2),
    ("gain", 0.3),
    ("gains", 0.3),
    ("improve", 0.4),
    ("improved", 0.4),
    ("improvement", 0.4),
    ("benefit", 0.3),
    ("beneficial", 0.5),
    ("safe", 0.5),
    ("peace", 0.4),
    ("peaceful", 0.5),
    ("hope", 0.3),
    ("hopeful", 0.5),
    ("welcome", 0.8),
    ("welcomed", 0.5),
    ("support", 0.2),
    ("praise", 0.5),
    ("praised", 0.5),
    ("celebrate", 0.5),
    ("celebrated", 0.5),
    ("love", 0.5),
    ("beautiful", 0.85),
    ("nice", 0.6),
    ("fine", 0.42),
    ("fair", 0.7),
    ("easy", 0.43),
    ("important", 0.4),
    ("significant", 0.38),
    ("effective", 0.6),
    ("efficient", 0.5),
    ("innovative", 0.5),
    ("remarkable", 0.75),
    ("impressive", 1.0),
    ("record", 0.1),
    ("boost", 0.4),
    ("rise", 0.1),
    ("recovery", 0.3),
    ("rescued", 0.4),
    ("relief", 0.3),
    ("free", 0.4),
    ("new", 0.14),
    ("popular", 0.6),
    ("interesting", 0.5),
    ("healthy", 0.5),
    ("right", 0.29),
    ("true", 0.35),
    ("clear", 0.1),
    ("top", 0.5),
    ("historic", 0.2),
    ("landmark", 0.3),
    // negative
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("poor", -0.4),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("sad", -0.5),
    ("angry", -0.5),
    ("afraid", -0.6),
    ("fear", -0.4),
    ("fears", -0.4),
    ("worried", -0.4),
    ("concern", -0.2),
    ("concerns", -0.2),
    ("crisis", -0.5),
    ("failure", -0.32),
    ("failed", -0.5),
    ("fail", -0.5),
    ("loss", -0.3),
    ("losses", -0.3),
    ("lost", -0.2),
    ("decline", -0.3),
    ("fall", -0.1),
    ("weak", -0.38),
    ("dead", -0.2),
    ("death", -0.5),
    ("deaths", -0.5),
    ("killed", -0.6),
    ("kill", -0.6),
    ("violence", -0.6),
    ("violent", -0.8),
    ("attack", -0.5),
    ("attacked", -0.5),
    ("war", -0.5),
    ("injured", -0.5),
    ("accident", -0.4),
    ("disaster", -0.8),
    ("tragedy", -0.8),
    ("tragic", -0.75),
    ("dangerous", -0.6),
    ("danger", -0.5),
    ("threat", -0.4),
    ("protest", -0.2),
    ("arrested", -0.3),
    ("corruption", -0.6),
    ("fraud", -0.6),
    ("illegal", -0.5),
    ("guilty", -0.5),
    ("wrong", -0.5),
    ("problem", -0.3),
    ("problems", -0.3),
    ("difficult", -0.5),
    ("hard", -0.29),
    ("negative", -0.3),
    ("shortage", -0.4),
    ("collapse", -0.6),
    ("damage", -0.5),
    ("damaged", -0.5),
    ("destroyed", -0.6),
    ("flood", -0.3),
    ("floods", -0.3),
    ("drought", -0.4),
    ("poverty", -0.5),
    ("discrimination", -0.6),
    ("unfair", -0.5),
    ("unsafe", -0.5),
    ("controversial", -0.3),
    ("criticism", -0.3),
    ("criticised", -0.4),
    ("criticized", -0.4),
    ("slammed", -0.5),
    ("ugly", -0.7),
    ("hate", -0.8),
    ("cruel", -1.0),
    ("shocking", -1.0),
    ("dry", -0.07),
    ("low", -0.1),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("incredibly", 1.4),
    ("so", 1.2),
    ("too", 1.2),
    ("most", 1.2),
    ("deeply", 1.3),
    ("hugely", 1.4),
    ("slightly", 0.6),
    ("somewhat", 0.7),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nor", "none", "nobody", "nothing", "neither", "cannot", "without",
];

const NEGATION_FACTOR: f64 = -0.5;

static POLARITY: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| LEXICON.iter().copied().collect());
static INTENSITY: Lazy<HashMap<&'static str, f64>> =
    Lazy::new(|| INTENSIFIERS.iter().copied().collect());

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't")
}

/// Polarity of `text` in `[-1, 1]`.
pub fn polarity(text: &str) -> f64 {
    let mut scores = Vec::new();
    let mut negated = false;
    let mut intensity = 1.0;

    for word in words(text) {
        if is_negation(&word) {
            negated = true;
            continue;
        }
        if let Some(factor) = INTENSITY.get(word.as_str()) {
            intensity *= factor;
            continue;
        }
        if let Some(p) = POLARITY.get(word.as_str()) {
            let mut score = p * intensity;
            if negated {
                score *= NEGATION_FACTOR;
            }
            scores.push(score.clamp(-1.0, 1.0));
        }
        negated = false;
        intensity = 1.0;
    }

    if scores.is_empty() {
        return 0.0;
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    mean.clamp(-1.0, 1.0)
}

/// Score `text` and label it by the sign of its polarity.
pub fn analyze(text: &str) -> (Sentiment, f64) {
    let p = polarity(text);
    (Sentiment::from_polarity(p), p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_text() {
        let (label, p) = analyze("The festival was a great success and visitors were happy.");
        assert_eq!(label, Sentiment::Positive);
        assert!(p > 0.0);
    }

    #[test]
    fn test_negative_text() {
        let (label, p) = analyze("The flood destroyed homes and several people were killed.");
        assert_eq!(label, Sentiment::Negative);
        assert!(p < 0.0);
    }

    #[test]
    fn test_text_without_opinion_words_is_neutral() {
        let (label, p) = analyze("The committee will meet on Tuesday in Delhi.");
        assert_eq!(label, Sentiment::Neutral);
        assert_eq!(p, 0.0);
        assert_eq!(polarity(""), 0.0);
    }

    #[test]
    fn test_negation_flips_and_dampens() {
        assert!((polarity("good") - 0.7).abs() < 1e-9);
        assert!((polarity("not good") - (-0.35)).abs() < 1e-9);
        assert!(polarity("this isn't bad") > 0.0);
    }

    #[test]
    fn test_intensifier_scales_and_clamps() {
        assert!((polarity("very good") - 0.91).abs() < 1e-9);
        assert_eq!(polarity("extremely excellent"), 1.0);
    }

    #[test]
    fn test_modifiers_apply_to_next_word_only() {
        assert!((polarity("not the weather but good") - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_polarity_stays_in_range() {
        let p = polarity("worst worst terrible awful extremely horrible");
        assert!((-1.0..=1.0).contains(&p));
    }
}
