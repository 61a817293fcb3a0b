//! Integration tests for deterministic order parsing
//!
//! These tests exercise the full path from raw transcript to priced lines.

use voice_bill_config::{preset_catalog, restaurant_menu, shop_catalog, MenuPreset};
use voice_bill_core::{Bill, BillSource, CatalogItem, Category, OrderLine};
use voice_bill_text_processing::{normalize, parse_order, AliasKey, TanglishOrderParser};

fn summary(lines: &[OrderLine]) -> Vec<(&str, u32)> {
    lines
        .iter()
        .map(|l| (l.item_name.as_str(), l.quantity))
        .collect()
}

/// The shop order from a real recording
#[test]
fn test_shop_order_end_to_end() {
    let text = "ரெண்டு சிவப்பு கம்பி 50 ரூபாய், மூணு செருப்பு 200 ரூ, ஒரு சரி 500 ரூபாய்";
    let lines = parse_order(Some(text), &shop_catalog());

    assert_eq!(
        summary(&lines),
        vec![("Red Wires", 2), ("Shoes", 3), ("Saree", 1)]
    );

    let unit_prices: Vec<Option<f64>> = lines.iter().map(|l| l.unit_price).collect();
    assert_eq!(unit_prices, vec![Some(50.0), Some(200.0), Some(500.0)]);

    let totals: Vec<Option<f64>> = lines.iter().map(|l| l.total_price).collect();
    assert_eq!(totals, vec![Some(100.0), Some(600.0), Some(500.0)]);

    let bill = Bill::from_lines(lines, BillSource::Deterministic);
    assert_eq!(bill.total, 1200.0);
}

/// Qualified items never also produce their generic sibling
#[test]
fn test_specificity_precedence() {
    let menu = restaurant_menu();

    let cases = [
        ("egg kothu parotta", "Egg Kothu Parotta"),
        ("முட்டை கொத்து பரோட்டா", "Egg Kothu Parotta"),
        ("chicken kothu", "Chicken Kothu Parotta"),
        ("kothu parotta", "Veg Kothu Parotta"),
        ("masala dosa", "Masala Dosa"),
        ("மசாலா தோசை", "Masala Dosa"),
        ("onion dosa", "Onion Dosa"),
        ("ghee roast", "Ghee Roast"),
        ("ghee roast dosa", "Ghee Roast"),
        ("நெய் ரோஸ்ட் தோசை", "Ghee Roast"),
        ("mutton kothu", "Mutton Kothu Parotta"),
        ("chicken biryani", "Chicken Biryani"),
        ("biryani", "Veg Biryani"),
    ];

    for (text, expected) in cases {
        let lines = parse_order(Some(text), &menu);
        assert_eq!(summary(&lines), vec![(expected, 1)], "input: {}", text);
    }
}

/// Tanglish mixes scripts inside one dish name
#[test]
fn test_qualifier_and_item_in_mixed_scripts() {
    let menu = restaurant_menu();

    let cases = [
        ("masala தோசை", vec![("Masala Dosa", 1)]),
        ("மசாலா dosa", vec![("Masala Dosa", 1)]),
        ("2 masala தோசை", vec![("Masala Dosa", 2)]),
        ("onion தோசை", vec![("Onion Dosa", 1)]),
        ("நெய் roast", vec![("Ghee Roast", 1)]),
        ("egg கொத்து பரோட்டா", vec![("Egg Kothu Parotta", 1)]),
        ("முட்டை kothu parotta", vec![("Egg Kothu Parotta", 1)]),
        ("chicken பிரியாணி", vec![("Chicken Biryani", 1)]),
        ("ரெண்டு mutton கொத்து", vec![("Mutton Kothu Parotta", 2)]),
    ];

    for (text, expected) in cases {
        let lines = parse_order(Some(text), &menu);
        assert_eq!(summary(&lines), expected, "input: {}", text);
    }
}

#[test]
fn test_word_and_digit_quantities_agree() {
    let menu = restaurant_menu();
    let by_word = parse_order(Some("ரெண்டு தோசை"), &menu);
    let by_digit = parse_order(Some("2 தோசை"), &menu);

    assert_eq!(summary(&by_word), vec![("Plain Dosa", 2)]);
    assert_eq!(summary(&by_word), summary(&by_digit));
}

#[test]
fn test_repeat_mentions_accumulate() {
    let lines = parse_order(Some("2 தோசை அப்புறம் 3 dosa"), &restaurant_menu());
    assert_eq!(summary(&lines), vec![("Plain Dosa", 5)]);
    assert_eq!(lines[0].total_price, Some(200.0));
}

#[test]
fn test_unstocked_alias_dropped_silently() {
    let lines = parse_order(Some("egg biryani 2, tea 1"), &restaurant_menu());
    assert_eq!(summary(&lines), vec![("Tea", 1)]);
}

#[test]
fn test_empty_and_missing_input() {
    let menu = restaurant_menu();
    assert!(parse_order(Some(""), &menu).is_empty());
    assert!(parse_order(None, &menu).is_empty());
    assert!(parse_order(Some("hello how are you"), &menu).is_empty());
}

#[test]
fn test_empty_catalog_yields_nothing() {
    assert!(parse_order(Some("2 idli"), &[]).is_empty());
}

#[test]
fn test_quantity_spans_never_overlap() {
    let parser = TanglishOrderParser::default();
    let inputs = [
        "dosa 2 idli 3 vada",
        "2 tea 2 coffee rendu idli",
        "ரெண்டு சிவப்பு கம்பி 50 ரூபாய், மூணு செருப்பு 200 ரூ, ஒரு சரி 500 ரூபாய்",
        "idli vada pongal 4",
    ];
    let catalog = preset_catalog(MenuPreset::Combined);

    for input in inputs {
        let outcome = parser.parse_detailed(Some(input), &catalog);
        let spans: Vec<_> = outcome.quantity_spans().collect();
        for (i, a) in spans.iter().enumerate() {
            for b in &spans[i + 1..] {
                assert!(!a.overlaps(b), "{:?} overlaps {:?} in {}", a, b, input);
            }
        }
    }
}

#[test]
fn test_one_number_serves_one_item() {
    let lines = parse_order(Some("idli 2 vada"), &restaurant_menu());
    // Idli comes first in the table and takes the 2
    assert_eq!(summary(&lines), vec![("Idli", 2), ("Vada", 1)]);
}

#[test]
fn test_quantity_after_item() {
    let lines = parse_order(Some("parotta 5, omelette rendu"), &restaurant_menu());
    assert_eq!(summary(&lines), vec![("Parotta", 5), ("Omelette", 2)]);
}

#[test]
fn test_tanglish_and_english_number_words() {
    let menu = restaurant_menu();
    assert_eq!(
        summary(&parse_order(Some("moonu idli"), &menu)),
        vec![("Idli", 3)]
    );
    assert_eq!(
        summary(&parse_order(Some("four coffee"), &menu)),
        vec![("Coffee", 4)]
    );
    assert_eq!(
        summary(&parse_order(Some("half dozen vadai"), &menu)),
        vec![("Vada", 6)]
    );
}

#[test]
fn test_zero_width_characters_ignored() {
    let lines = parse_order(Some("ரெண்டு\u{200B} தோ\u{200C}சை"), &restaurant_menu());
    assert_eq!(summary(&lines), vec![("Plain Dosa", 2)]);
}

#[test]
fn test_custom_catalog_resolution() {
    let catalog = vec![
        CatalogItem::new("Dosai", 35.0, Category::Tiffin).with_local_name("தோசை"),
        CatalogItem::new("Special Masala Dosai", 65.0, Category::Tiffin),
    ];
    let lines = parse_order(Some("oru masala dosa, 2 dosa"), &catalog);
    assert_eq!(
        summary(&lines),
        vec![("Special Masala Dosai", 1), ("Dosai", 2)]
    );
}

#[test]
fn test_parse_is_deterministic() {
    let parser = TanglishOrderParser::default();
    let menu = restaurant_menu();
    let text = "rendu masala dosa 3 idli oru coffee";
    assert_eq!(parser.parse(Some(text), &menu), parser.parse(Some(text), &menu));
}

#[test]
fn test_normalize_is_idempotent_on_orders() {
    for text in [
        "ரெண்டு சிவப்பு கம்பி 50 ரூபாய், மூணு செருப்பு",
        "Egg  Kothu -- Parotta!!",
        "\u{FEFF}2 tea; 3 coffee.",
    ] {
        let once = normalize(Some(text));
        assert_eq!(normalize(Some(once.as_str())), once);
    }
}

#[test]
fn test_parsing_normalized_text_gives_same_lines() {
    let catalog = preset_catalog(MenuPreset::Combined);
    for text in [
        "ரெண்டு சிவப்பு கம்பி 50 ரூபாய், மூணு செருப்பு 200 ரூ, ஒரு சரி 500 ரூபாய்",
        "Egg  Kothu -- Parotta!! 2",
        "\u{FEFF}2 tea; 3 coffee.",
        "masala தோசை, ghee roast dosa",
        "ரெண்டு\u{200B} தோ\u{200C}சை",
    ] {
        let normalized = normalize(Some(text));
        assert_eq!(
            parse_order(Some(normalized.as_str()), &catalog),
            parse_order(Some(text), &catalog),
            "input: {}",
            text
        );
    }
}

#[test]
fn test_matches_report_keys_in_table_order() {
    let parser = TanglishOrderParser::default();
    let outcome = parser.parse_detailed(Some("tea and 2 idli"), &restaurant_menu());
    let keys: Vec<AliasKey> = outcome.matches.iter().map(|m| m.key).collect();
    assert_eq!(keys, vec![AliasKey::Idli, AliasKey::Tea]);
}
