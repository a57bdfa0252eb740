//! # Transliteration
//!
//! Best-effort conversion between Japanese scripts, used to pre-fill the
//! hiragana and romaji fields of new entries and to back-fill readings.
//! Nothing in the store or search path depends on it: a failed conversion
//! leaves the field as the user typed it.
//!
//! [`KanaTransliterator`] handles:
//! - katakana → hiragana (code point shift),
//! - hiragana ↔ Hepburn-style romaji (`っ` doubles the next consonant,
//!   `ん` is `n`, long vowels are spelled out: `とうきょう` → `toukyou`),
//! - kanji words, only through a [`ReadingTable`] lookup.
//!
//! Input is NFKC-normalized first so half-width katakana and full-width Latin
//! letters are accepted.

use crate::error::{Result, TangoError};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Hiragana,
    Romaji,
}

/// Converts text into a target script.
pub trait Transliterator {
    fn convert(&self, text: &str, target: Script) -> Result<String>;
}

#[rustfmt::skip]
const KANA: &[(char, &str)] = &[
    ('あ', "a"), ('い', "i"), ('う', "u"), ('え', "e"), ('お', "o"),
    ('か', "ka"), ('き', "ki"), ('く', "ku"), ('け', "ke"), ('こ', "ko"),
    ('が', "ga"), ('ぎ', "gi"), ('ぐ', "gu"), ('げ', "ge"), ('ご', "go"),
    ('さ', "sa"), ('し', "shi"), ('す', "su"), ('せ', "se"), ('そ', "so"),
    ('ざ', "za"), ('じ', "ji"), ('ず', "zu"), ('ぜ', "ze"), ('ぞ', "zo"),
    ('た', "ta"), ('ち', "chi"), ('つ', "tsu"), ('て', "te"), ('と', "to"),
    ('だ', "da"), ('ぢ', "ji"), ('づ', "zu"), ('で', "de"), ('ど', "do"),
    ('な', "na"), ('に', "ni"), ('ぬ', "nu"), ('ね', "ne"), ('の', "no"),
    ('は', "ha"), ('ひ', "hi"), ('ふ', "fu"), ('へ', "he"), ('ほ', "ho"),
    ('ば', "ba"), ('び', "bi"), ('ぶ', "bu"), ('べ', "be"), ('ぼ', "bo"),
    ('ぱ', "pa"), ('ぴ', "pi"), ('ぷ', "pu"), ('ぺ', "pe"), ('ぽ', "po"),
    ('ま', "ma"), ('み', "mi"), ('む', "mu"), ('め', "me"), ('も', "mo"),
    ('や', "ya"), ('ゆ', "yu"), ('よ', "yo"),
    ('ら', "ra"), ('り', "ri"), ('る', "ru"), ('れ', "re"), ('ろ', "ro"),
    ('わ', "wa"), ('ゐ', "wi"), ('ゑ', "we"), ('を', "wo"),
    ('ん', "n"), ('ゔ', "vu"),
];

#[rustfmt::skip]
const SMALL_KANA: &[(char, &str)] = &[
    ('ぁ', "a"), ('ぃ', "i"), ('ぅ', "u"), ('ぇ', "e"), ('ぉ', "o"),
    ('ゃ', "ya"), ('ゅ', "yu"), ('ょ', "yo"), ('ゎ', "wa"),
];

/// Stems that combine with small ya/yu/yo.
#[rustfmt::skip]
const YOON_STEMS: &[char] = &[
    'き', 'ぎ', 'し', 'じ', 'ち', 'に', 'ひ', 'び', 'ぴ', 'み', 'り',
];

/// Accepted input spellings that the output never produces.
#[rustfmt::skip]
const ROMAJI_ALTERNATES: &[(&str, &str)] = &[
    ("si", "し"), ("ti", "ち"), ("tu", "つ"), ("hu", "ふ"), ("zi", "じ"),
    ("di", "ぢ"), ("du", "づ"), ("sya", "しゃ"), ("syu", "しゅ"), ("syo", "しょ"),
    ("tya", "ちゃ"), ("tyu", "ちゅ"), ("tyo", "ちょ"), ("zya", "じゃ"), ("zyu", "じゅ"),
    ("zyo", "じょ"), ("jya", "じゃ"), ("jyu", "じゅ"), ("jyo", "じょ"),
    ("fa", "ふぁ"), ("fi", "ふぃ"), ("fe", "ふぇ"), ("fo", "ふぉ"),
];

static ROMAJI_OF: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    KANA.iter().chain(SMALL_KANA.iter()).copied().collect()
});

static KANA_OF: Lazy<HashMap<String, String>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for (kana, romaji) in KANA {
        map.entry(romaji.to_string()).or_insert_with(|| kana.to_string());
    }
    for stem in YOON_STEMS {
        for small in ['ゃ', 'ゅ', 'ょ'] {
            let pair = [*stem, small];
            if let Some((romaji, _)) = syllable_at(&pair, 0) {
                map.entry(romaji).or_insert_with(|| pair.iter().collect());
            }
        }
    }
    for (romaji, kana) in ROMAJI_ALTERNATES {
        map.entry(romaji.to_string()).or_insert_with(|| kana.to_string());
    }
    map
});

#[rustfmt::skip]
const BUILTIN_READINGS: &[(&str, &str)] = &[
    ("話します", "はなします"), ("行きます", "いきます"), ("来ます", "きます"),
    ("会話", "かいわ"), ("社会", "しゃかい"), ("会います", "あいます"),
    ("買います", "かいます"), ("見ます", "みます"), ("読みます", "よみます"),
    ("飲みます", "のみます"), ("食べます", "たべます"), ("聞きます", "ききます"),
    ("新聞", "しんぶん"), ("書きます", "かきます"), ("日帰り", "ひがえり"),
    ("帰国", "きこく"), ("帰ります", "かえります"), ("起きます", "おきます"),
    ("弾きます", "ひきます"), ("出します", "だします"), ("毎朝", "まいあさ"),
    ("毎晩", "まいばん"), ("飲食", "いんしょく"), ("来日", "らいにち"),
    ("見学", "けんがく"), ("見物", "けんぶつ"), ("男", "おとこ"), ("女", "おんな"),
    ("学校", "がっこう"), ("大学", "だいがく"), ("時間", "じかん"), ("半", "はん"),
    ("時", "じ"), ("お寺", "おてら"), ("風邪", "かぜ"), ("料理", "りょうり"),
    ("明日", "あした"), ("毎日", "まいにち"), ("毎月", "まいつき"), ("毎週", "まいしゅう"),
    ("先月", "せんげつ"), ("先日", "せんじつ"), ("一昨日", "おととい"), ("昨日", "きのう"),
    ("今日", "きょう"), ("明後日", "あさって"), ("来月", "らいげつ"), ("来年", "らいねん"),
    ("今年", "ことし"), ("去年", "きょねん"), ("先週", "せんしゅう"), ("週末", "しゅうまつ"),
    ("今週", "こんしゅう"), ("来週", "らいしゅう"), ("午後", "ごご"), ("午前", "ごぜん"),
    ("今晩", "こんばん"), ("今朝", "けさ"), ("昼", "ひる"), ("市", "し"), ("町", "まち"),
    ("東", "ひがし"), ("西", "にし"), ("南", "みなみ"), ("北", "きた"), ("区", "く"),
    ("名前", "なまえ"), ("東京", "とうきょう"), ("京都", "きょうと"), ("食べ物", "たべもの"),
    ("高い", "たかい"), ("古い", "ふるい"), ("新しい", "あたらしい"), ("低い", "ひくい"),
    ("大きい", "おおきい"), ("小さい", "ちいさい"), ("安い", "やすい"), ("枚", "まい"),
    ("半年", "はんとし"), ("国会", "こっかい"), ("会社", "かいしゃ"), ("会議", "かいぎ"),
    ("歌手", "かしゅ"), ("肉", "にく"), ("有名", "ゆうめい"), ("休日", "きゅうじつ"),
    ("荷物", "にもつ"), ("食事", "しょくじ"), ("旅行", "りょこう"), ("国語", "こくご"),
    ("読書", "どくしょ"), ("大人", "おとな"), ("小学校", "しょうがっこう"),
];

/// Kanji word → hiragana reading.
#[derive(Debug, Clone, Default)]
pub struct ReadingTable {
    readings: HashMap<String, String>,
}

impl ReadingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table of common words shipped with the binary.
    pub fn builtin() -> Self {
        Self {
            readings: BUILTIN_READINGS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Parse a JSON object of `{ "word": "reading" }`.
    pub fn from_json(json: &str) -> Result<Self> {
        let readings: HashMap<String, String> =
            serde_json::from_str(json).map_err(TangoError::Serialization)?;
        Ok(Self { readings })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(TangoError::Io)?;
        Self::from_json(&content)
    }

    /// Entries from `other` win over existing ones.
    pub fn merge(mut self, other: ReadingTable) -> Self {
        self.readings.extend(other.readings);
        self
    }

    pub fn insert(&mut self, word: impl Into<String>, reading: impl Into<String>) {
        self.readings.insert(word.into(), reading.into());
    }

    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.readings.get(word).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

/// Table-driven kana/romaji converter with a kanji reading table.
#[derive(Debug, Clone, Default)]
pub struct KanaTransliterator {
    readings: ReadingTable,
}

impl KanaTransliterator {
    pub fn new(readings: ReadingTable) -> Self {
        Self { readings }
    }

    pub fn readings(&self) -> &ReadingTable {
        &self.readings
    }

    fn to_hiragana(&self, text: &str) -> Result<String> {
        if text.is_empty() {
            return Ok(String::new());
        }
        if let Some(reading) = self.readings.lookup(text) {
            return Ok(reading.to_string());
        }
        let kana = katakana_to_hiragana(text);
        if kana.chars().all(|c| is_hiragana(c) || c == 'ー' || c.is_whitespace()) {
            return Ok(kana);
        }
        if text.is_ascii() {
            return romaji_to_hiragana(text);
        }
        Err(TangoError::Transliteration(format!(
            "no reading known for '{}'",
            text
        )))
    }
}

impl Transliterator for KanaTransliterator {
    fn convert(&self, text: &str, target: Script) -> Result<String> {
        let normalized: String = text.nfkc().collect();
        let hiragana = self.to_hiragana(normalized.trim())?;
        match target {
            Script::Hiragana => Ok(hiragana),
            Script::Romaji => hiragana_to_romaji(&hiragana),
        }
    }
}

pub fn is_hiragana(c: char) -> bool {
    ('\u{3041}'..='\u{3096}').contains(&c)
}

pub fn is_katakana(c: char) -> bool {
    ('\u{30A1}'..='\u{30F6}').contains(&c)
}

/// True when `text` is non-empty and made only of kana (and the long vowel mark).
pub fn is_kana_only(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| is_hiragana(c) || is_katakana(c) || c == 'ー')
}

pub fn katakana_to_hiragana(text: &str) -> String {
    text.chars()
        .map(|c| {
            if is_katakana(c) {
                char::from_u32(c as u32 - 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

fn yoon_vowel(c: char) -> Option<char> {
    match c {
        'ゃ' => Some('a'),
        'ゅ' => Some('u'),
        'ょ' => Some('o'),
        _ => None,
    }
}

fn small_vowel(c: char) -> Option<char> {
    match c {
        'ぁ' => Some('a'),
        'ぃ' => Some('i'),
        'ぅ' => Some('u'),
        'ぇ' => Some('e'),
        'ぉ' => Some('o'),
        _ => None,
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'i' | 'u' | 'e' | 'o')
}

/// Romaji for the syllable starting at `i`, with the number of kana consumed.
fn syllable_at(chars: &[char], i: usize) -> Option<(String, usize)> {
    let c = *chars.get(i)?;
    let base = *ROMAJI_OF.get(&c)?;

    if let Some(&next) = chars.get(i + 1) {
        if let Some(vowel) = yoon_vowel(next) {
            if let Some(stem) = base.strip_suffix('i').filter(|s| !s.is_empty()) {
                let syllable = if stem.ends_with("sh") || stem.ends_with("ch") || stem == "j" {
                    format!("{}{}", stem, vowel)
                } else {
                    format!("{}y{}", stem, vowel)
                };
                return Some((syllable, 2));
            }
        }
        if let Some(vowel) = small_vowel(next) {
            if c == 'う' {
                return Some((format!("w{}", vowel), 2));
            }
            if base.len() > 1 {
                return Some((format!("{}{}", &base[..base.len() - 1], vowel), 2));
            }
        }
    }
    Some((base.to_string(), 1))
}

pub fn hiragana_to_romaji(text: &str) -> Result<String> {
    let chars: Vec<char> = katakana_to_hiragana(text).chars().collect();
    let mut out = String::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            'っ' => {
                if let Some((next, _)) = syllable_at(&chars, i + 1) {
                    if next.starts_with("ch") {
                        out.push('t');
                    } else if let Some(first) = next.chars().next().filter(|c| !is_vowel(*c)) {
                        out.push(first);
                    }
                }
                i += 1;
            }
            'ー' => {
                if let Some(last) = out.chars().last().filter(|c| is_vowel(*c)) {
                    out.push(last);
                }
                i += 1;
            }
            'ん' => {
                out.push('n');
                let next = syllable_at(&chars, i + 1).and_then(|(s, _)| s.chars().next());
                if next.is_some_and(|c| is_vowel(c) || c == 'y') {
                    out.push('\'');
                }
                i += 1;
            }
            c if c.is_whitespace() => {
                out.push(' ');
                i += 1;
            }
            c => {
                let (syllable, consumed) = syllable_at(&chars, i).ok_or_else(|| {
                    TangoError::Transliteration(format!("cannot romanize '{}'", c))
                })?;
                out.push_str(&syllable);
                i += consumed;
            }
        }
    }
    Ok(out)
}

pub fn romaji_to_hiragana(text: &str) -> Result<String> {
    let chars: Vec<char> = text.to_lowercase().chars().collect();
    let mut out = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if c.is_whitespace() {
            out.push(' ');
            i += 1;
            continue;
        }
        if c == '-' {
            out.push('ー');
            i += 1;
            continue;
        }
        if c == '\'' {
            i += 1;
            continue;
        }
        if c == 'n' {
            match next {
                Some(n) if is_vowel(n) || n == 'y' => {}
                Some('\'') => {
                    out.push('ん');
                    i += 2;
                    continue;
                }
                Some('n') => {
                    let after = chars.get(i + 2).copied();
                    let single = after.is_some_and(|a| is_vowel(a) || a == 'y');
                    out.push('ん');
                    i += if single { 1 } else { 2 };
                    continue;
                }
                _ => {
                    out.push('ん');
                    i += 1;
                    continue;
                }
            }
        }
        let doubled = c.is_ascii_alphabetic() && !is_vowel(c) && next == Some(c);
        let tch = c == 't' && next == Some('c') && chars.get(i + 2) == Some(&'h');
        if doubled || tch {
            out.push('っ');
            i += 1;
            continue;
        }

        let matched = (1..=3).rev().find_map(|len| {
            let end = i + len;
            if end > chars.len() {
                return None;
            }
            let key: String = chars[i..end].iter().collect();
            KANA_OF.get(&key).map(|kana| (kana, len))
        });
        match matched {
            Some((kana, len)) => {
                out.push_str(kana);
                i += len;
            }
            None => {
                return Err(TangoError::Transliteration(format!(
                    "cannot convert '{}' to kana",
                    text
                )))
            }
        }
    }
    Ok(out)
}
