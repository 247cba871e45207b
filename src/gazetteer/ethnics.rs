// src/gazetteer/ethnics.rs
//! Latin origin adjectives in `-ensis`.
//!
//! An inscription rarely names a home town in the nominative; it says
//! *domo Aquileiensis* or *civis Romensis*. For every word of a place name
//! we cut back to its final vowel run and graft `ensis` on each possible
//! stem: `Aquileia` gives `Aquileiensis`, `Aquileensis`, `Aquilensis`.
//! Stems of two letters or fewer are not used.

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];
const SUFFIX: &str = "ensis";

pub fn derive(name: &str) -> Vec<String> {
    let mut out = Vec::new();
    for word in name.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        let Some(mut i) = chars.iter().rposition(|c| VOWELS.contains(c)) else {
            continue;
        };
        if i <= 2 {
            continue;
        }
        push_form(&mut out, &chars[..i]);
        while i > 1 && VOWELS.contains(&chars[i - 1]) {
            i -= 1;
            if i <= 2 {
                break;
            }
            push_form(&mut out, &chars[..i]);
        }
    }
    out
}

fn push_form(out: &mut Vec<String>, stem: &[char]) {
    let mut form: String = stem.iter().collect();
    form.push_str(SUFFIX);
    if !out.contains(&form) {
        out.push(form);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_vowel_ending() {
        assert_eq!(derive("Roma"), vec!["Romensis"]);
        assert_eq!(derive("Carthago"), vec!["Carthagensis"]);
    }

    #[test]
    fn vowel_runs_give_every_stem() {
        assert_eq!(derive("Aquileia"), vec!["Aquileiensis", "Aquileensis", "Aquilensis"]);
    }

    #[test]
    fn short_stems_and_consonant_words() {
        assert!(derive("Ara").is_empty());
        assert!(derive("Nyss").is_empty());
        assert_eq!(derive("Colonia Agrippina"), vec!["Coloniensis", "Colonensis", "Agrippinensis"]);
    }
}
