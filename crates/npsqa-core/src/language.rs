//! The closed set of languages the assistant answers in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A supported language, identified by its ISO 639-1 code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    #[default]
    En,
    Ta,
    Te,
    Hi,
    Ml,
    Bn,
    Mr,
    Gu,
    Kn,
    Pa,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 10] = [
        LanguageCode::En,
        LanguageCode::Ta,
        LanguageCode::Te,
        LanguageCode::Hi,
        LanguageCode::Ml,
        LanguageCode::Bn,
        LanguageCode::Mr,
        LanguageCode::Gu,
        LanguageCode::Kn,
        LanguageCode::Pa,
    ];

    pub fn code(self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::Ta => "ta",
            LanguageCode::Te => "te",
            LanguageCode::Hi => "hi",
            LanguageCode::Ml => "ml",
            LanguageCode::Bn => "bn",
            LanguageCode::Mr => "mr",
            LanguageCode::Gu => "gu",
            LanguageCode::Kn => "kn",
            LanguageCode::Pa => "pa",
        }
    }

    /// Human-readable English name, used to pin the answer language in prompts.
    pub fn name(self) -> &'static str {
        match self {
            LanguageCode::En => "English",
            LanguageCode::Ta => "Tamil",
            LanguageCode::Te => "Telugu",
            LanguageCode::Hi => "Hindi",
            LanguageCode::Ml => "Malayalam",
            LanguageCode::Bn => "Bengali",
            LanguageCode::Mr => "Marathi",
            LanguageCode::Gu => "Gujarati",
            LanguageCode::Kn => "Kannada",
            LanguageCode::Pa => "Punjabi",
        }
    }

    /// NLLB-200 language tag (language + script).
    pub const fn nllb_code(self) -> &'static str {
        match self {
            LanguageCode::En => "eng_Latn",
            LanguageCode::Ta => "tam_Taml",
            LanguageCode::Te => "tel_Telu",
            LanguageCode::Hi => "hin_Deva",
            LanguageCode::Ml => "mal_Mlym",
            LanguageCode::Bn => "ben_Beng",
            LanguageCode::Mr => "mar_Deva",
            LanguageCode::Gu => "guj_Gujr",
            LanguageCode::Kn => "kan_Knda",
            LanguageCode::Pa => "pan_Guru",
        }
    }

    pub fn is_english(self) -> bool {
        self == LanguageCode::En
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LanguageCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        LanguageCode::ALL
            .into_iter()
            .find(|l| l.code() == wanted)
            .ok_or_else(|| Error::UnsupportedLanguage(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("TA".parse::<LanguageCode>().ok(), Some(LanguageCode::Ta));
        assert_eq!(" hi ".parse::<LanguageCode>().ok(), Some(LanguageCode::Hi));
        assert!("fr".parse::<LanguageCode>().is_err());
    }

    #[test]
    fn serializes_as_lowercase_code() {
        let s = serde_json::to_string(&LanguageCode::Pa).unwrap();
        assert_eq!(s, "\"pa\"");
        let back: LanguageCode = serde_json::from_str("\"ml\"").unwrap();
        assert_eq!(back, LanguageCode::Ml);
    }
}
