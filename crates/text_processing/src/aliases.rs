//! Alias pattern table
//!
//! Each [`AliasKey`] is an independent recognizer: an ordered list of
//! case-insensitive patterns (Tamil script, Tanglish, English spellings) and
//! an optional qualifier-exclusion rule. The table is ordered specific before
//! generic, and a generic key discards any match whose preceding window ends
//! in a qualifier belonging to a more specific sibling ("masala" before
//! "dosa", "egg" before "kothu", "kothu" before "parotta").

use regex::Regex;
use serde::Serialize;

use crate::error::{compile, Result};
use crate::normalizer::compose;
use crate::span::{window_start, MatchSpan};

use voice_bill_config::constants::windows;

/// Semantic item identity recognized in free text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasKey {
    MasalaDosa,
    OnionDosa,
    RavaDosa,
    GheeRoast,
    PlainDosa,
    Idli,
    Vada,
    Pongal,
    Poori,
    EggKothuParotta,
    ChickenKothuParotta,
    MuttonKothuParotta,
    VegKothuParotta,
    Parotta,
    ChickenBiryani,
    MuttonBiryani,
    EggBiryani,
    VegBiryani,
    Meals,
    Omelette,
    Tea,
    Coffee,
    RedWires,
    Shoes,
    Saree,
}

impl AliasKey {
    /// Every key in table (precedence) order
    pub const ALL: [AliasKey; 25] = [
        AliasKey::MasalaDosa,
        AliasKey::OnionDosa,
        AliasKey::RavaDosa,
        AliasKey::GheeRoast,
        AliasKey::PlainDosa,
        AliasKey::Idli,
        AliasKey::Vada,
        AliasKey::Pongal,
        AliasKey::Poori,
        AliasKey::EggKothuParotta,
        AliasKey::ChickenKothuParotta,
        AliasKey::MuttonKothuParotta,
        AliasKey::VegKothuParotta,
        AliasKey::Parotta,
        AliasKey::ChickenBiryani,
        AliasKey::MuttonBiryani,
        AliasKey::EggBiryani,
        AliasKey::VegBiryani,
        AliasKey::Meals,
        AliasKey::Omelette,
        AliasKey::Tea,
        AliasKey::Coffee,
        AliasKey::RedWires,
        AliasKey::Shoes,
        AliasKey::Saree,
    ];

    /// Canonical catalog name this key resolves to first
    pub fn canonical_name(&self) -> &'static str {
        match self {
            AliasKey::MasalaDosa => "Masala Dosa",
            AliasKey::OnionDosa => "Onion Dosa",
            AliasKey::RavaDosa => "Rava Dosa",
            AliasKey::GheeRoast => "Ghee Roast",
            AliasKey::PlainDosa => "Plain Dosa",
            AliasKey::Idli => "Idli",
            AliasKey::Vada => "Vada",
            AliasKey::Pongal => "Pongal",
            AliasKey::Poori => "Poori",
            AliasKey::EggKothuParotta => "Egg Kothu Parotta",
            AliasKey::ChickenKothuParotta => "Chicken Kothu Parotta",
            AliasKey::MuttonKothuParotta => "Mutton Kothu Parotta",
            AliasKey::VegKothuParotta => "Veg Kothu Parotta",
            AliasKey::Parotta => "Parotta",
            AliasKey::ChickenBiryani => "Chicken Biryani",
            AliasKey::MuttonBiryani => "Mutton Biryani",
            AliasKey::EggBiryani => "Egg Biryani",
            AliasKey::VegBiryani => "Veg Biryani",
            AliasKey::Meals => "Meals",
            AliasKey::Omelette => "Omelette",
            AliasKey::Tea => "Tea",
            AliasKey::Coffee => "Coffee",
            AliasKey::RedWires => "Red Wires",
            AliasKey::Shoes => "Shoes",
            AliasKey::Saree => "Saree",
        }
    }

    /// Recognition patterns
    ///
    /// Qualified keys take the qualifier and the item in either script, so
    /// "masala தோசை" is as much a Masala Dosa as "மசாலா தோசை".
    fn patterns(&self) -> &'static [&'static str] {
        match self {
            AliasKey::MasalaDosa => &[
                r"(?:மசாலா|\bmasala)\s*(?:தோசை|(?:dosai|dosa|thosai)\b)",
            ],
            AliasKey::OnionDosa => &[
                r"(?:வெங்காய(?:ம்)?|\b(?:onion|vengayam|vengaya))\s*(?:தோசை|(?:dosai|dosa|thosai)\b)",
            ],
            AliasKey::RavaDosa => &[r"(?:ரவா|\brava)\s*(?:தோசை|(?:dosai|dosa|thosai)\b)"],
            AliasKey::GheeRoast => &[
                r"(?:நெய்|\b(?:ghee|nei|ney))\s*(?:ரோஸ்ட்|roast\b)(?:\s*(?:தோசை|(?:dosai|dosa|thosai)\b))?",
                r"(?:நெய்|\b(?:ghee|nei|ney))\s*(?:தோசை|(?:dosai|dosa|thosai)\b)",
                r"(?:ரோஸ்ட்|\broast\b)(?:\s*(?:தோசை|(?:dosai|dosa|thosai)\b))?",
            ],
            AliasKey::PlainDosa => &[r"தோசை", r"\b(?:plain\s+|sada\s+)?(?:dosai|dosa|thosai)s?\b"],
            AliasKey::Idli => &[r"இட்லி", r"\bidd?l[iy]s?\b"],
            AliasKey::Vada => &[r"வடை", r"\b(?:medu\s*)?(?:vadai|vada|wada)s?\b"],
            AliasKey::Pongal => &[r"பொங்கல்", r"\b(?:ven\s*)?pongal\b"],
            AliasKey::Poori => &[r"பூரி", r"\b(?:poori|puri|poory)s?\b"],
            AliasKey::EggKothuParotta => &[
                r"(?:முட்டை|\b(?:egg|muttai))\s*(?:கொத்து|kothu)(?:\s*(?:பரோட்டா|புரோட்டா|(?:parotta|porotta|barotta|paratha)\b))?",
            ],
            AliasKey::ChickenKothuParotta => &[
                r"(?:சிக்கன்|\bchicken)\s*(?:கொத்து|kothu)(?:\s*(?:பரோட்டா|புரோட்டா|(?:parotta|porotta|barotta|paratha)\b))?",
            ],
            AliasKey::MuttonKothuParotta => &[
                r"(?:மட்டன்|\bmutton)\s*(?:கொத்து|kothu)(?:\s*(?:பரோட்டா|புரோட்டா|(?:parotta|porotta|barotta|paratha)\b))?",
            ],
            AliasKey::VegKothuParotta => &[
                r"கொத்து(?:\s*(?:பரோட்டா|புரோட்டா))?",
                r"\b(?:veg\s*)?kothu(?:\s*(?:parotta|porotta|barotta|paratha))?\b",
            ],
            AliasKey::Parotta => &[
                r"பரோட்டா|புரோட்டா",
                r"\b(?:parotta|porotta|barotta|parota|paratha)s?\b",
            ],
            AliasKey::ChickenBiryani => &[
                r"(?:சிக்கன்|\bchicken)\s*(?:பிரியாணி|(?:biryani|biriyani|briyani)\b)",
            ],
            AliasKey::MuttonBiryani => &[
                r"(?:மட்டன்|\bmutton)\s*(?:பிரியாணி|(?:biryani|biriyani|briyani)\b)",
            ],
            AliasKey::EggBiryani => &[
                r"(?:முட்டை|\b(?:egg|muttai))\s*(?:பிரியாணி|(?:biryani|biriyani|briyani)\b)",
            ],
            AliasKey::VegBiryani => &[
                r"பிரியாணி",
                r"\b(?:veg\s*)?(?:biryani|biriyani|briyani)\b",
            ],
            AliasKey::Meals => &[r"சாப்பாடு", r"\b(?:meals|meal|saapadu|sappadu|saappaadu)\b"],
            AliasKey::Omelette => &[r"ஆம்லெட்", r"\b(?:omelette|omelet|omlet|amlet)s?\b"],
            AliasKey::Tea => &[r"\bடீ\b", r"\b(?:tea|chai)\b"],
            AliasKey::Coffee => &[r"காபி|காப்பி", r"\b(?:coffee|kaapi|kappi|kapi)\b"],
            AliasKey::RedWires => &[r"சிவப்பு\s*(?:கம்பி|வயர்)", r"\bred\s*wires?\b"],
            AliasKey::Shoes => &[r"செருப்பு|ஷூ", r"\b(?:shoes|shoe|chappals|chappal|seruppu)\b"],
            AliasKey::Saree => &[
                r"சேலை|புடவை|\bசரி\b",
                r"\b(?:sarees|saree|saris|sari|selai|pudavai)\b",
            ],
        }
    }

    /// Qualifiers that, right before a match, hand it to a more specific sibling
    fn qualifiers(&self) -> Option<&'static str> {
        match self {
            AliasKey::PlainDosa => Some(
                r"மசாலா|வெங்காயம்|வெங்காய|ரவா|நெய்|ரோஸ்ட்|\b(?:masala|onion|vengayam|vengaya|rava|ghee|nei|ney|roast)",
            ),
            AliasKey::VegKothuParotta => Some(r"முட்டை|சிக்கன்|மட்டன்|\b(?:egg|muttai|chicken|mutton)"),
            AliasKey::Parotta => Some(r"கொத்து|\bkothu"),
            AliasKey::VegBiryani => {
                Some(r"சிக்கன்|மட்டன்|முட்டை|\b(?:chicken|mutton|egg|muttai)")
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for AliasKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Compiled recognizer for one key
#[derive(Debug, Clone)]
pub struct AliasEntry {
    pub key: AliasKey,
    patterns: Vec<Regex>,
    exclusion: Option<Regex>,
}

impl AliasEntry {
    fn compile(key: AliasKey) -> Result<Self> {
        let context = format!("alias {}", key);

        let patterns = key
            .patterns()
            .iter()
            .map(|p| compile(&context, &format!("(?i){}", compose(p))))
            .collect::<Result<Vec<_>>>()?;

        // Anchored at the window end, not anywhere inside it: the qualifier
        // must be the word right before the match
        let exclusion = key
            .qualifiers()
            .map(|q| compile(&context, &format!(r"(?i)(?:{})\s*$", compose(q))))
            .transpose()?;

        Ok(Self {
            key,
            patterns,
            exclusion,
        })
    }

    pub fn has_exclusion(&self) -> bool {
        self.exclusion.is_some()
    }

    fn is_excluded(&self, text: &str, start: usize, window_chars: usize) -> bool {
        let Some(exclusion) = &self.exclusion else {
            return false;
        };
        let window = &text[window_start(text, start, window_chars)..start];
        exclusion.is_match(window)
    }
}

/// Ordered alias table
#[derive(Debug, Clone)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
    qualifier_window_chars: usize,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AliasTable {
    /// Built-in table with the default qualifier window
    pub fn builtin() -> Self {
        Self::new(windows::QUALIFIER_WINDOW_CHARS)
            .expect("built-in alias patterns always compile")
    }

    pub fn new(qualifier_window_chars: usize) -> Result<Self> {
        let entries = AliasKey::ALL
            .iter()
            .map(|key| AliasEntry::compile(*key))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            entries,
            qualifier_window_chars,
        })
    }

    /// Entries in precedence order
    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    pub fn qualifier_window_chars(&self) -> usize {
        self.qualifier_window_chars
    }

    /// Accepted match spans for one entry, in text order
    ///
    /// Every pattern scans the whole text. Matches whose qualifier window
    /// trips the exclusion rule are discarded, and overlapping spans of
    /// this same key (two spellings hitting one word) collapse to the
    /// earliest, longest one.
    pub fn find_matches(&self, entry: &AliasEntry, text: &str) -> Vec<MatchSpan> {
        let mut spans: Vec<MatchSpan> = Vec::new();

        for pattern in &entry.patterns {
            for m in pattern.find_iter(text) {
                if entry.is_excluded(text, m.start(), self.qualifier_window_chars) {
                    tracing::debug!(
                        alias = %entry.key,
                        matched = m.as_str(),
                        "Match suppressed by qualifier"
                    );
                    continue;
                }
                spans.push(MatchSpan::new(m.start(), m.end()));
            }
        }

        spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

        let mut accepted: Vec<MatchSpan> = Vec::with_capacity(spans.len());
        for span in spans {
            if accepted.last().is_some_and(|last| last.overlaps(&span)) {
                continue;
            }
            accepted.push(span);
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_in(text: &str) -> Vec<AliasKey> {
        let table = AliasTable::builtin();
        table
            .entries()
            .iter()
            .filter(|entry| !table.find_matches(entry, text).is_empty())
            .map(|entry| entry.key)
            .collect()
    }

    #[test]
    fn test_table_order_matches_all() {
        let table = AliasTable::builtin();
        let keys: Vec<AliasKey> = table.entries().iter().map(|e| e.key).collect();
        assert_eq!(keys, AliasKey::ALL.to_vec());
    }

    #[test]
    fn test_specific_before_generic() {
        let position = |key| AliasKey::ALL.iter().position(|k| *k == key).unwrap();
        assert!(position(AliasKey::MasalaDosa) < position(AliasKey::PlainDosa));
        assert!(position(AliasKey::EggKothuParotta) < position(AliasKey::VegKothuParotta));
        assert!(position(AliasKey::VegKothuParotta) < position(AliasKey::Parotta));
        assert!(position(AliasKey::EggBiryani) < position(AliasKey::VegBiryani));
    }

    #[test]
    fn test_masala_dosa_suppresses_plain() {
        assert_eq!(keys_in("masala dosa"), vec![AliasKey::MasalaDosa]);
        assert_eq!(keys_in("மசாலா தோசை"), vec![AliasKey::MasalaDosa]);
    }

    #[test]
    fn test_egg_kothu_suppresses_generics() {
        assert_eq!(keys_in("egg kothu parotta"), vec![AliasKey::EggKothuParotta]);
        assert_eq!(
            keys_in("முட்டை கொத்து பரோட்டா"),
            vec![AliasKey::EggKothuParotta]
        );
        assert_eq!(keys_in("kothu parotta"), vec![AliasKey::VegKothuParotta]);
    }

    #[test]
    fn test_qualifier_and_item_in_different_scripts() {
        assert_eq!(keys_in("masala தோசை"), vec![AliasKey::MasalaDosa]);
        assert_eq!(keys_in("மசாலா dosa"), vec![AliasKey::MasalaDosa]);
        assert_eq!(keys_in("onion தோசை"), vec![AliasKey::OnionDosa]);
        assert_eq!(keys_in("egg கொத்து பரோட்டா"), vec![AliasKey::EggKothuParotta]);
        assert_eq!(keys_in("முட்டை kothu parotta"), vec![AliasKey::EggKothuParotta]);
        assert_eq!(keys_in("chicken பிரியாணி"), vec![AliasKey::ChickenBiryani]);
        assert_eq!(keys_in("மட்டன் biryani"), vec![AliasKey::MuttonBiryani]);
    }

    #[test]
    fn test_ghee_roast_dosa_is_one_item() {
        assert_eq!(keys_in("ghee roast dosa"), vec![AliasKey::GheeRoast]);
        assert_eq!(keys_in("நெய் ரோஸ்ட் தோசை"), vec![AliasKey::GheeRoast]);
        assert_eq!(keys_in("roast dosa"), vec![AliasKey::GheeRoast]);
        assert_eq!(keys_in("ghee dosa"), vec![AliasKey::GheeRoast]);
    }

    #[test]
    fn test_mutton_kothu_is_not_veg() {
        assert_eq!(keys_in("mutton kothu"), vec![AliasKey::MuttonKothuParotta]);
        assert_eq!(
            keys_in("மட்டன் கொத்து பரோட்டா"),
            vec![AliasKey::MuttonKothuParotta]
        );
    }

    #[test]
    fn test_qualifier_only_applies_right_before_match() {
        // The masala belongs to the first dosa; the second is plain
        let keys = keys_in("masala dosa and 2 dosa");
        assert_eq!(keys, vec![AliasKey::MasalaDosa, AliasKey::PlainDosa]);
    }

    #[test]
    fn test_qualifier_window_size_respected() {
        let table = AliasTable::new(3).unwrap();
        let plain = &table.entries()[AliasKey::ALL
            .iter()
            .position(|k| *k == AliasKey::PlainDosa)
            .unwrap()];
        // "masala " is 7 chars; a 3-char window sees only "la "
        assert_eq!(table.find_matches(plain, "masala dosa").len(), 1);
    }

    #[test]
    fn test_repeated_matches_and_same_key_overlap() {
        let table = AliasTable::builtin();
        let plain = table
            .entries()
            .iter()
            .find(|e| e.key == AliasKey::PlainDosa)
            .unwrap();
        let text = "2 தோசை 3 dosa";
        let spans = table.find_matches(plain, text);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].slice(text), "தோசை");
        assert_eq!(spans[1].slice(text), "dosa");
    }

    #[test]
    fn test_mixed_case_latin() {
        assert_eq!(keys_in("Idli"), vec![AliasKey::Idli]);
        assert_eq!(keys_in("CHICKEN BIRYANI"), vec![AliasKey::ChickenBiryani]);
    }

    #[test]
    fn test_shop_items() {
        assert_eq!(
            keys_in("ரெண்டு சிவப்பு கம்பி 50 ரூபாய் மூணு செருப்பு 200 ரூ ஒரு சரி 500 ரூபாய்"),
            vec![AliasKey::RedWires, AliasKey::Shoes, AliasKey::Saree]
        );
    }

    #[test]
    fn test_no_match_inside_longer_latin_word() {
        assert!(keys_in("steam").is_empty());
        assert!(keys_in("purified").is_empty());
    }
}
