use npsqa_core::LanguageCode;
use std::ops::RangeInclusive;

/// Unicode blocks that identify a language on their own. The order is the
/// tie-break order: an earlier script keeps the lead on equal counts.
const SCRIPT_BLOCKS: [(RangeInclusive<u32>, LanguageCode); 8] = [
    (0x0B80..=0x0BFF, LanguageCode::Ta), // Tamil
    (0x0900..=0x097F, LanguageCode::Hi), // Devanagari (Hindi, Marathi)
    (0x0C00..=0x0C7F, LanguageCode::Te), // Telugu
    (0x0D00..=0x0D7F, LanguageCode::Ml), // Malayalam
    (0x0980..=0x09FF, LanguageCode::Bn), // Bengali
    (0x0A80..=0x0AFF, LanguageCode::Gu), // Gujarati
    (0x0C80..=0x0CFF, LanguageCode::Kn), // Kannada
    (0x0A00..=0x0A7F, LanguageCode::Pa), // Gurmukhi
];

/// Per-script character counts for one input, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScriptCount([usize; 8]);

impl ScriptCount {
    pub fn get(&self, lang: LanguageCode) -> usize {
        SCRIPT_BLOCKS
            .iter()
            .position(|(_, l)| *l == lang)
            .map_or(0, |i| self.0[i])
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// The script with the strictly highest count, if any character matched.
    pub fn best(&self) -> Option<LanguageCode> {
        let mut best: Option<(LanguageCode, usize)> = None;
        for ((_, lang), &count) in SCRIPT_BLOCKS.iter().zip(self.0.iter()) {
            if count == 0 {
                continue;
            }
            match best {
                Some((_, top)) if count <= top => {}
                _ => best = Some((*lang, count)),
            }
        }
        best.map(|(lang, _)| lang)
    }
}

pub fn script_counts(text: &str) -> ScriptCount {
    let mut counts = ScriptCount::default();
    for ch in text.chars() {
        let cp = ch as u32;
        if let Some(i) = SCRIPT_BLOCKS.iter().position(|(range, _)| range.contains(&cp)) {
            counts.0[i] += 1;
        }
    }
    counts
}

/// Language implied by the dominant Indic script in `text`.
pub fn detect_script(text: &str) -> Option<LanguageCode> {
    let counts = script_counts(text);
    let best = counts.best();
    tracing::debug!(sample = %text.chars().take(20).collect::<String>(), matched = counts.total(), ?best, "script counts");
    best
}
