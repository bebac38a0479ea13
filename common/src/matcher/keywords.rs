//! ユーザー入力語 → カタログ照合用の同義語

use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    static ref HAIR_KEYWORDS: HashMap<&'static str, &'static [&'static str]> = {
        let mut m: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
        m.insert("dry", &["dry", "damaged", "brittle"]);
        m.insert("damaged", &["damaged", "dry", "heavily damaged", "strawy"]);
        m.insert("oily", &["greasy", "oily"]);
        m.insert("normal", &["normal", "fine"]);
        m.insert("fine", &["fine", "normal", "long hair"]);
        m.insert("thick", &["coarse", "thick"]);
        m.insert("coarse", &["coarse", "thick"]);
        m.insert("colored", &["colored", "bleached"]);
        m.insert("curly", &["coarse", "dry"]);
        m.insert("straight", &["fine", "normal"]);
        m
    };

    static ref CONCERN_KEYWORDS: HashMap<&'static str, &'static [&'static str]> = {
        let mut m: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
        m.insert("dryness", &["dryness", "dry", "dehydration", "moisture"]);
        m.insert("damage", &["damage", "damaged", "breakage", "repair"]);
        m.insert("breakage", &["breakage", "split ends", "weakness"]);
        m.insert("frizz", &["lack of smoothness", "dullness"]);
        m.insert("shine", &["dullness", "lack of shine"]);
        m.insert("split ends", &["split ends", "breakage"]);
        m.insert("greasiness", &["greasy roots", "oily"]);
        m.insert("volume", &["weighing down", "lack of fluidity"]);
        m
    };
}

/// 入力語を正規化（前後空白除去・小文字化）
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// 髪質の同義語（未登録の語はその語自身）
pub fn hair_keywords(term: &str) -> Vec<String> {
    lookup(&HAIR_KEYWORDS, term)
}

/// 悩みの同義語（未登録の語はその語自身）
pub fn concern_keywords(term: &str) -> Vec<String> {
    lookup(&CONCERN_KEYWORDS, term)
}

fn lookup(table: &HashMap<&'static str, &'static [&'static str]>, term: &str) -> Vec<String> {
    let term = normalize_term(term);
    if term.is_empty() {
        return Vec::new();
    }
    match table.get(term.as_str()) {
        Some(words) => words.iter().map(|w| w.to_string()).collect(),
        None => vec![term],
    }
}
