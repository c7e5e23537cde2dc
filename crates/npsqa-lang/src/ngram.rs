//! Character-trigram classifier for Latin-script questions.
//!
//! Indic questions are settled by script sniffing before this runs, so the
//! classifier only has to tell English apart from the Latin-script languages
//! users most often type by mistake. Anything it labels other than `en` is
//! outside the supported set and the resolver collapses it to English.
use anyhow::{bail, Result};
use npsqa_core::traits::StatisticalDetector;
use std::collections::HashMap;

const N: usize = 3;
/// Add-one smoothing denominator offset, shared by all models so scores compare.
const VOCAB: f32 = 10_000.0;

const SEED_CORPORA: &[(&str, &[&str])] = &[
    ("en", &[
        "what is the national pension system and how does it work",
        "how can i open an account and what documents are required",
        "what is the tax benefit under section 80c for my contribution",
        "when can i withdraw money from my pension account after retirement",
        "which fund manager should i choose for the tier one account",
        "the quick brown fox jumps over the lazy dog",
        "thank you for your help, please tell me more about this scheme",
        "is there a minimum amount that i have to pay every year",
    ]),
    ("fr", &[
        "le renard brun rapide saute par-dessus le chien paresseux",
        "ceci est un test de la langue française",
        "bonjour comment allez-vous aujourd'hui",
        "il est important d'apprendre de nouvelles langues",
        "merci beaucoup pour votre aide",
        "quelle est la pension de retraite pour les salariés",
    ]),
    ("es", &[
        "el rápido zorro marrón salta sobre el perro perezoso",
        "esta es una prueba del idioma español",
        "es importante aprender nuevos idiomas",
        "¿cómo estás hoy? gracias por su ayuda",
        "cuál es la pensión de jubilación para los trabajadores",
    ]),
    ("de", &[
        "der schnelle braune fuchs springt über den faulen hund",
        "dies ist ein test der deutschen sprache",
        "hallo welt wie geht es dir heute",
        "es ist wichtig neue sprachen zu lernen",
        "vielen dank für ihre hilfe bei der rente",
    ]),
    ("pt", &[
        "a rápida raposa marrom pula sobre o cão preguiçoso",
        "este é um teste da língua portuguesa",
        "olá como você está hoje",
        "é importante aprender novos idiomas",
        "obrigado pela sua ajuda com a aposentadoria",
    ]),
];

struct TrigramModel {
    counts: HashMap<String, f32>,
    total: f32,
}

impl TrigramModel {
    fn train(samples: &[&str]) -> Self {
        let mut model = Self { counts: HashMap::new(), total: 0.0 };
        for sample in samples {
            for gram in trigrams(sample) {
                *model.counts.entry(gram).or_insert(0.0) += 1.0;
                model.total += 1.0;
            }
        }
        model
    }

    /// Mean log-probability per trigram.
    fn score(&self, grams: &[String]) -> f32 {
        let sum: f32 = grams
            .iter()
            .map(|g| {
                let c = self.counts.get(g).copied().unwrap_or(0.0);
                ((c + 1.0) / (self.total + VOCAB)).ln()
            })
            .sum();
        sum / grams.len() as f32
    }
}

fn trigrams(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphabetic() || c == '\'' { c } else { ' ' })
        .collect();
    let padded = format!(" {} ", normalized.split_whitespace().collect::<Vec<_>>().join(" "));
    let chars: Vec<char> = padded.chars().collect();
    chars.windows(N).map(|w| w.iter().collect()).collect()
}

pub struct NgramDetector {
    models: Vec<(&'static str, TrigramModel)>,
}

impl NgramDetector {
    pub fn new() -> Self {
        let models = SEED_CORPORA.iter().map(|(code, samples)| (*code, TrigramModel::train(samples))).collect();
        Self { models }
    }

    /// All languages ranked best first, as `(iso_code, mean log-probability)`.
    pub fn rank(&self, text: &str) -> Vec<(&'static str, f32)> {
        let grams = trigrams(text);
        if grams.is_empty() {
            return Vec::new();
        }
        let mut scores: Vec<(&'static str, f32)> = self.models.iter().map(|(code, m)| (*code, m.score(&grams))).collect();
        scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scores
    }
}

impl Default for NgramDetector {
    fn default() -> Self { Self::new() }
}

impl StatisticalDetector for NgramDetector {
    fn detect(&self, text: &str) -> Result<String> {
        if !text.chars().any(char::is_alphabetic) {
            bail!("no features in text");
        }
        match self.rank(text).first() {
            Some((code, _)) => Ok((*code).to_string()),
            None => bail!("no features in text"),
        }
    }
}
