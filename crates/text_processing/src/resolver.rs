//! Menu resolver
//!
//! Maps an [`AliasKey`] to a concrete entry of the live catalog:
//! exact (case-insensitive) canonical name first, then a per-key
//! include/exclude rule tested against both the English and Tamil names.
//! A key the catalog does not carry resolves to `None`.

use regex::Regex;

use voice_bill_core::CatalogItem;

use crate::aliases::AliasKey;
use crate::error::{compile, Result};
use crate::normalizer::compose;

/// Name predicates for one key
#[derive(Debug, Clone)]
pub struct ResolveRule {
    /// Each must match the English or Tamil name
    all_of: Vec<Regex>,
    /// None may match either name
    none_of: Vec<Regex>,
}

impl ResolveRule {
    fn compile(key: AliasKey) -> Result<Self> {
        let (all_of, none_of) = rule_source(key);
        let context = format!("resolver rule {}", key);
        let build = |patterns: &[&str]| {
            patterns
                .iter()
                .map(|p| compile(&context, &format!("(?i){}", compose(p))))
                .collect::<Result<Vec<_>>>()
        };

        Ok(Self {
            all_of: build(all_of)?,
            none_of: build(none_of)?,
        })
    }

    pub fn accepts(&self, item: &CatalogItem) -> bool {
        let matches = |re: &Regex| item.names().any(|name| re.is_match(name));
        self.all_of.iter().all(matches) && !self.none_of.iter().any(matches)
    }
}

type RuleSource = (&'static [&'static str], &'static [&'static str]);

fn rule(all_of: &'static [&'static str], none_of: &'static [&'static str]) -> RuleSource {
    (all_of, none_of)
}

/// `(all_of, none_of)` name patterns per key
fn rule_source(key: AliasKey) -> RuleSource {
    const DOSA: &str = r"dosa|dosai|தோசை";
    const KOTHU: &str = r"kothu|கொத்து";
    const BIRYANI: &str = r"biryani|biriyani|பிரியாணி";
    const EGG: &str = r"\begg|muttai|முட்டை";
    const CHICKEN: &str = r"chicken|சிக்கன்";
    const MUTTON: &str = r"mutton|மட்டன்";

    match key {
        AliasKey::MasalaDosa => rule(&[DOSA, r"masala|மசாலா"], &[]),
        AliasKey::OnionDosa => rule(&[DOSA, r"onion|vengaya|வெங்காய"], &[]),
        AliasKey::RavaDosa => rule(&[DOSA, r"rava|ரவா"], &[]),
        AliasKey::GheeRoast => rule(&[r"ghee|nei|roast|நெய்|ரோஸ்ட்"], &[]),
        AliasKey::PlainDosa => rule(
            &[DOSA],
            &[r"masala|onion|vengaya|rava|ghee|roast|மசாலா|வெங்காய|ரவா|நெய்|ரோஸ்ட்"],
        ),
        AliasKey::Idli => rule(&[r"idli|idly|இட்லி"], &[]),
        AliasKey::Vada => rule(&[r"vada|vadai|வடை"], &[]),
        AliasKey::Pongal => rule(&[r"pongal|பொங்கல்"], &[]),
        AliasKey::Poori => rule(&[r"poori|puri|பூரி"], &[]),
        AliasKey::EggKothuParotta => rule(&[KOTHU, EGG], &[]),
        AliasKey::ChickenKothuParotta => rule(&[KOTHU, CHICKEN], &[]),
        AliasKey::MuttonKothuParotta => rule(&[KOTHU, MUTTON], &[]),
        AliasKey::VegKothuParotta => rule(&[KOTHU], &[EGG, CHICKEN, MUTTON]),
        AliasKey::Parotta => rule(&[r"parotta|porotta|paratha|பரோட்டா|புரோட்டா"], &[KOTHU]),
        AliasKey::ChickenBiryani => rule(&[BIRYANI, CHICKEN], &[]),
        AliasKey::MuttonBiryani => rule(&[BIRYANI, MUTTON], &[]),
        AliasKey::EggBiryani => rule(&[BIRYANI, EGG], &[]),
        AliasKey::VegBiryani => rule(&[BIRYANI], &[EGG, CHICKEN, MUTTON]),
        AliasKey::Meals => rule(&[r"meals|சாப்பாடு|thali"], &[]),
        AliasKey::Omelette => rule(&[r"omelette|omelet|ஆம்லெட்"], &[]),
        AliasKey::Tea => rule(&[r"\btea\b|chai|டீ"], &[]),
        AliasKey::Coffee => rule(&[r"coffee|kaapi|காபி|காப்பி"], &[]),
        AliasKey::RedWires => rule(
            &[r"wire|கம்பி|வயர்"],
            &[r"blue|green|black|yellow|white|நீல|பச்சை|கருப்பு|மஞ்சள்|வெள்ளை"],
        ),
        AliasKey::Shoes => rule(&[r"shoe|chappal|slipper|செருப்பு|ஷூ"], &[]),
        AliasKey::Saree => rule(&[r"saree|sari\b|சேலை|புடவை"], &[]),
    }
}

/// Alias-to-catalog resolver
#[derive(Debug, Clone)]
pub struct MenuResolver {
    /// One rule per key, in table order
    rules: Vec<(AliasKey, ResolveRule)>,
}

impl Default for MenuResolver {
    fn default() -> Self {
        Self::new().expect("built-in resolver rules always compile")
    }
}

impl MenuResolver {
    pub fn new() -> Result<Self> {
        let rules = AliasKey::ALL
            .iter()
            .map(|key| Ok((*key, ResolveRule::compile(*key)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    fn rule(&self, key: AliasKey) -> Option<&ResolveRule> {
        self.rules.iter().find(|(k, _)| *k == key).map(|(_, rule)| rule)
    }

    /// Resolve `key` against `catalog`
    pub fn resolve<'a>(&self, key: AliasKey, catalog: &'a [CatalogItem]) -> Option<&'a CatalogItem> {
        let canonical = key.canonical_name();
        if let Some(item) = catalog
            .iter()
            .find(|item| item.name.eq_ignore_ascii_case(canonical))
        {
            return Some(item);
        }

        let rule = self.rule(key)?;
        catalog.iter().find(|item| rule.accepts(item))
    }
}
