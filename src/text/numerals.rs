//! Amount-in-words conversion (French).
//!
//! Turns a monetary amount into the exact prose the fiscal documents carry:
//! `156180.50` becomes
//! `"Cent cinquante-six mille cent quatre-vingts Dirhams ; 50 Cts TTC"`.
//! Callers pass absolute values; negative wording is never produced.

const UNITS: [&str; 20] = [
    "zéro", "un", "deux", "trois", "quatre", "cinq", "six", "sept", "huit", "neuf", "dix",
    "onze", "douze", "treize", "quatorze", "quinze", "seize", "dix-sept", "dix-huit",
    "dix-neuf",
];

// Tens words for 20..=60; 70 and 90 compose from 60 and 80.
const TENS: [&str; 5] = ["vingt", "trente", "quarante", "cinquante", "soixante"];

/// Convert an amount into a complete French sentence.
pub fn amount_in_words(amount: f64) -> String {
    let total_cents = (amount.abs() * 100.0).round() as u64;
    let integer = total_cents / 100;
    let cents = total_cents % 100;

    let mut sentence = capitalize(&integer_words(integer));
    sentence.push_str(" Dirhams");
    if cents > 0 {
        sentence.push_str(&format!(" ; {:02} Cts", cents));
    }
    sentence.push_str(" TTC");
    sentence
}

/// Words for a non-negative integer.
fn integer_words(n: u64) -> String {
    if n == 0 {
        return UNITS[0].to_string();
    }

    let mut parts: Vec<String> = Vec::new();
    let milliards = n / 1_000_000_000;
    let millions = (n % 1_000_000_000) / 1_000_000;
    let thousands = (n % 1_000_000) / 1_000;
    let rest = n % 1_000;

    if milliards > 0 {
        if milliards == 1 {
            parts.push("un milliard".to_string());
        } else {
            parts.push(format!("{} milliards", under_thousand(milliards)));
        }
    }
    if millions > 0 {
        if millions == 1 {
            parts.push("un million".to_string());
        } else {
            parts.push(format!("{} millions", under_thousand(millions)));
        }
    }
    // "mille" is invariant: never "un mille", never pluralized.
    if thousands > 0 {
        if thousands == 1 {
            parts.push("mille".to_string());
        } else {
            parts.push(format!("{} mille", under_thousand(thousands)));
        }
    }
    if rest > 0 {
        parts.push(under_thousand(rest));
    }

    parts.join(" ")
}

fn under_thousand(n: u64) -> String {
    debug_assert!(n < 1_000);
    if n < 100 {
        return under_hundred(n);
    }

    let hundreds = n / 100;
    let rest = n % 100;
    if rest == 0 {
        // "cent" alone for 100; plural only on an exact multiple above it.
        if hundreds == 1 {
            "cent".to_string()
        } else {
            format!("{} cents", UNITS[hundreds as usize])
        }
    } else if hundreds == 1 {
        format!("cent {}", under_hundred(rest))
    } else {
        format!("{} cent {}", UNITS[hundreds as usize], under_hundred(rest))
    }
}

fn under_hundred(n: u64) -> String {
    debug_assert!(n < 100);
    match n {
        0..=19 => UNITS[n as usize].to_string(),
        20..=69 => {
            let tens_word = TENS[(n / 10 - 2) as usize];
            match n % 10 {
                0 => tens_word.to_string(),
                1 => format!("{} et un", tens_word),
                unit => format!("{}-{}", tens_word, UNITS[unit as usize]),
            }
        }
        // 70..=79 reuse the 10..=19 words on the "soixante" root.
        71 => "soixante et onze".to_string(),
        70 | 72..=79 => format!("soixante-{}", UNITS[(n - 60) as usize]),
        // 80 exactly takes the plural; 81..=99 never do, and never take "et".
        80 => "quatre-vingts".to_string(),
        _ => format!("quatre-vingt-{}", UNITS[(n - 80) as usize]),
    }
}

fn capitalize(words: &str) -> String {
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(amount_in_words(0.0), "Zéro Dirhams TTC");
    }

    #[test]
    fn test_small_irregulars() {
        assert_eq!(integer_words(16), "seize");
        assert_eq!(integer_words(17), "dix-sept");
    }

    #[test]
    fn test_tens_with_et_un() {
        assert_eq!(integer_words(21), "vingt et un");
        assert_eq!(integer_words(61), "soixante et un");
        assert_eq!(integer_words(71), "soixante et onze");
    }

    #[test]
    fn test_seventies_and_nineties_compose() {
        assert_eq!(integer_words(77), "soixante-dix-sept");
        assert_eq!(integer_words(90), "quatre-vingt-dix");
        assert_eq!(integer_words(96), "quatre-vingt-seize");
    }

    #[test]
    fn test_eighty_pluralization() {
        assert_eq!(amount_in_words(80.0), "Quatre-vingts Dirhams TTC");
        assert_eq!(amount_in_words(81.0), "Quatre-vingt-un Dirhams TTC");
        assert_eq!(amount_in_words(91.0), "Quatre-vingt-onze Dirhams TTC");
    }

    #[test]
    fn test_hundreds() {
        assert_eq!(amount_in_words(100.0), "Cent Dirhams TTC");
        assert_eq!(amount_in_words(200.0), "Deux cents Dirhams TTC");
        assert_eq!(integer_words(230), "deux cent trente");
    }

    #[test]
    fn test_thousand_is_invariant() {
        assert_eq!(amount_in_words(1001.0), "Mille un Dirhams TTC");
        assert_eq!(integer_words(2000), "deux mille");
        assert_eq!(integer_words(1100), "mille cent");
    }

    #[test]
    fn test_millions() {
        assert_eq!(integer_words(1_000_000), "un million");
        assert_eq!(integer_words(2_000_000), "deux millions");
        assert_eq!(integer_words(1_000_001), "un million un");
        assert_eq!(integer_words(1_000_000_000), "un milliard");
    }

    #[test]
    fn test_reference_mixed_example() {
        assert_eq!(
            amount_in_words(156180.50),
            "Cent cinquante-six mille cent quatre-vingts Dirhams ; 50 Cts TTC"
        );
    }

    #[test]
    fn test_cents_only_when_present() {
        assert_eq!(amount_in_words(12.0), "Douze Dirhams TTC");
        assert_eq!(amount_in_words(12.05), "Douze Dirhams ; 05 Cts TTC");
    }

    #[test]
    fn test_negative_input_uses_absolute_value() {
        assert_eq!(amount_in_words(-81.0), "Quatre-vingt-un Dirhams TTC");
    }
}
