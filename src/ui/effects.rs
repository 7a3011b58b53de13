use rand::seq::SliceRandom;
use rand::Rng;

use crate::constants::render::GLITCH_PROBABILITY;

/// Combining marks stacked onto glitched characters.
const GLITCH_MARKS: &[char] = &[
    '\u{334}', '\u{335}', '\u{336}', '\u{337}', '\u{338}', '\u{321}', '\u{322}', '\u{327}', '\u{328}',
    '\u{31b}', '\u{316}', '\u{317}', '\u{318}', '\u{319}', '\u{31c}', '\u{31d}', '\u{31e}', '\u{31f}',
];

/// Decorate roughly a third of the characters with a random combining mark.
pub fn glitch<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        out.push(c);
        if rng.gen_bool(GLITCH_PROBABILITY) {
            if let Some(mark) = GLITCH_MARKS.choose(rng) {
                out.push(*mark);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn keeps_original_characters_in_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let out = glitch("hello world", &mut rng);
        let base: String = out.chars().filter(|c| !GLITCH_MARKS.contains(c)).collect();
        assert_eq!(base, "hello world");
    }

    #[test]
    fn adds_marks_over_long_text() {
        let mut rng = StdRng::seed_from_u64(42);
        let text = "a".repeat(200);
        let out = glitch(&text, &mut rng);
        let marks = out.chars().filter(|c| GLITCH_MARKS.contains(c)).count();
        assert!(marks > 20 && marks < 120, "unexpected mark count {marks}");
    }
}
