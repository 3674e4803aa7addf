use serde::Serialize;

use crate::errors::AppError;

/// Words per minute assumed for the reading-time estimate.
const READING_WPM: f64 = 200.0;

/// Minimum input length after trimming, in characters.
const MIN_TEXT_LEN: usize = 10;

/// Full readability report returned to the client. Only the three grade
/// indices are persisted; the rest is display data.
#[derive(Debug, Clone, Serialize)]
pub struct ReadabilityReport {
    pub word_count: usize,
    pub sentence_count: usize,
    pub character_count: usize,
    pub avg_sentence_length: f64,

    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub gunning_fog_index: f64,
    pub smog_index: f64,

    pub complexity_level: &'static str,
    pub flesch_interpretation: &'static str,
    pub grade_level_interpretation: &'static str,

    pub reading_time_minutes: f64,
    pub text_preview: String,
}

/// Computes the readability report for a piece of text.
///
/// Formulas are the published ones:
/// - Flesch reading ease: 206.835 - 1.015*(W/S) - 84.6*(Syl/W)
/// - Flesch-Kincaid grade: 0.39*(W/S) + 11.8*(Syl/W) - 15.59
/// - Gunning fog: 0.4*((W/S) + 100*(complex/W)), complex = 3+ syllables
/// - SMOG: 1.0430*sqrt(polysyllables * 30/S) + 3.1291
pub fn analyze(text: &str) -> Result<ReadabilityReport, AppError> {
    let text = text.trim();
    if text.chars().count() < MIN_TEXT_LEN {
        return Err(AppError::Validation(format!(
            "Text must be at least {MIN_TEXT_LEN} characters long"
        )));
    }

    let words = tokenize_words(text);
    let sentence_count = count_sentences(text);
    let word_count = words.len();

    if sentence_count == 0 || word_count == 0 {
        return Err(AppError::Validation(
            "Text must contain at least one sentence and word".to_string(),
        ));
    }

    let syllable_count: usize = words.iter().map(|w| count_syllables(w)).sum();
    let complex_count = words.iter().filter(|w| count_syllables(w) >= 3).count();

    let w = word_count as f64;
    let s = sentence_count as f64;
    let words_per_sentence = w / s;
    let syllables_per_word = syllable_count as f64 / w;

    let flesch_ease = 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;
    let flesch_grade = 0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59;
    let gunning_fog = 0.4 * (words_per_sentence + 100.0 * (complex_count as f64 / w));
    let smog = 1.0430 * (complex_count as f64 * 30.0 / s).sqrt() + 3.1291;

    let character_count = text.chars().filter(|c| !c.is_whitespace()).count();
    let preview: String = if text.chars().count() > 200 {
        text.chars().take(200).collect::<String>() + "..."
    } else {
        text.to_string()
    };

    Ok(ReadabilityReport {
        word_count,
        sentence_count,
        character_count,
        avg_sentence_length: round2(words_per_sentence),
        flesch_reading_ease: round1(flesch_ease),
        flesch_kincaid_grade: round1(flesch_grade),
        gunning_fog_index: round1(gunning_fog),
        smog_index: round1(smog),
        complexity_level: complexity_level(flesch_ease),
        flesch_interpretation: interpret_flesch_ease(flesch_ease),
        grade_level_interpretation: interpret_grade_level(flesch_grade),
        reading_time_minutes: round1(w / READING_WPM).max(0.5),
        text_preview: preview,
    })
}

/// Whitespace tokens with leading/trailing punctuation stripped; a token
/// counts as a word if anything alphabetic remains.
fn tokenize_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|t| t.chars().any(|c| c.is_alphabetic()))
        .map(str::to_string)
        .collect()
}

/// Counts terminator-delimited segments that contain at least one letter.
/// A trailing fragment without a terminator still counts as a sentence.
fn count_sentences(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|seg| seg.chars().any(|c| c.is_alphabetic()))
        .count()
}

/// Vowel-group heuristic with silent-e handling; every word has at least
/// one syllable.
fn count_syllables(word: &str) -> usize {
    let w: String = word
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_ascii_lowercase();
    if w.is_empty() {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut count = 0;
    let mut prev_vowel = false;
    for c in w.chars() {
        let v = is_vowel(c);
        if v && !prev_vowel {
            count += 1;
        }
        prev_vowel = v;
    }
    if w.ends_with('e') && !w.ends_with("le") && count > 1 {
        count -= 1;
    }
    count.max(1)
}

fn complexity_level(ease: f64) -> &'static str {
    if ease >= 70.0 {
        "Beginner"
    } else if ease >= 30.0 {
        "Intermediate"
    } else {
        "Advanced"
    }
}

fn interpret_flesch_ease(score: f64) -> &'static str {
    if score >= 90.0 {
        "Very Easy (5th grade)"
    } else if score >= 80.0 {
        "Easy (6th grade)"
    } else if score >= 70.0 {
        "Fairly Easy (7th grade)"
    } else if score >= 60.0 {
        "Standard (8th-9th grade)"
    } else if score >= 50.0 {
        "Fairly Difficult (10th-12th grade)"
    } else if score >= 30.0 {
        "Difficult (College)"
    } else {
        "Very Difficult (Graduate)"
    }
}

fn interpret_grade_level(grade: f64) -> &'static str {
    if grade <= 6.0 {
        "Elementary School"
    } else if grade <= 8.0 {
        "Middle School"
    } else if grade <= 12.0 {
        "High School"
    } else if grade <= 16.0 {
        "College"
    } else {
        "Graduate Level"
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = "The cat sat on the mat. The dog ran to the cat.";
    const DENSE: &str = "Institutional accountability necessitates comprehensive documentation. \
        Organizational infrastructure facilitates administrative coordination. \
        Bureaucratic implementation requires considerable deliberation.";

    #[test]
    fn test_rejects_short_text() {
        assert!(matches!(
            analyze("short"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_whitespace_padding() {
        // Trimmed length is what counts.
        assert!(analyze("   hi!    \n\n   ").is_err());
    }

    #[test]
    fn test_rejects_no_words() {
        assert!(analyze("123 456 789 012 345").is_err());
    }

    #[test]
    fn test_simple_text_counts() {
        let r = analyze(SIMPLE).unwrap();
        assert_eq!(r.word_count, 12);
        assert_eq!(r.sentence_count, 2);
        assert_eq!(r.avg_sentence_length, 6.0);
        assert_eq!(r.character_count, 36);
    }

    #[test]
    fn test_simple_text_scores_easy() {
        let r = analyze(SIMPLE).unwrap();
        assert!(r.flesch_reading_ease > 90.0);
        assert!(r.flesch_kincaid_grade < 2.0);
        assert_eq!(r.complexity_level, "Beginner");
        assert_eq!(r.flesch_interpretation, "Very Easy (5th grade)");
        assert_eq!(r.grade_level_interpretation, "Elementary School");
    }

    #[test]
    fn test_dense_text_scores_harder_than_simple() {
        let simple = analyze(SIMPLE).unwrap();
        let dense = analyze(DENSE).unwrap();
        assert!(dense.flesch_reading_ease < simple.flesch_reading_ease);
        assert!(dense.flesch_kincaid_grade > simple.flesch_kincaid_grade);
        assert!(dense.gunning_fog_index > simple.gunning_fog_index);
        assert!(dense.smog_index > simple.smog_index);
        assert_eq!(dense.complexity_level, "Advanced");
    }

    #[test]
    fn test_no_polysyllables_gives_smog_floor() {
        let r = analyze(SIMPLE).unwrap();
        // SMOG with zero polysyllabic words collapses to the 3.1291 constant.
        assert_eq!(r.smog_index, 3.1);
    }

    #[test]
    fn test_reading_time_floor() {
        let r = analyze(SIMPLE).unwrap();
        assert_eq!(r.reading_time_minutes, 0.5);
    }

    #[test]
    fn test_preview_truncated_at_200_chars() {
        let long = "word ".repeat(100);
        let r = analyze(&long).unwrap();
        assert!(r.text_preview.ends_with("..."));
        assert_eq!(r.text_preview.chars().count(), 203);
    }

    #[test]
    fn test_preview_short_text_untruncated() {
        let r = analyze(SIMPLE).unwrap();
        assert_eq!(r.text_preview, SIMPLE);
    }

    #[test]
    fn test_trailing_fragment_counts_as_sentence() {
        assert_eq!(count_sentences("One here. And a fragment"), 2);
        assert_eq!(count_sentences("Stop! Really? Yes."), 3);
    }

    #[test]
    fn test_syllable_heuristic() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("make"), 1); // silent e
        assert_eq!(count_syllables("table"), 2); // -le keeps its syllable
        assert_eq!(count_syllables("reading"), 2);
        assert_eq!(count_syllables("readability"), 5);
        assert_eq!(count_syllables("the"), 1);
    }

    #[test]
    fn test_tokenizer_strips_punctuation() {
        let words = tokenize_words("Hello, world! (Really.)");
        assert_eq!(words, vec!["Hello", "world", "Really"]);
    }
}
