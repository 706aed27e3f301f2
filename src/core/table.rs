//! 문자표 -> 조회 테이블 생성 및 검증
//!
//! 분류 집합은 서로 겹치면 안 된다. 겹치는 항목이 있으면 순서에 따라
//! 조용히 처리하지 않고 생성 단계에서 에러를 반환한다.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;

use crate::core::charset::{Charset, KanaSet, RomanizationRecord, Substitution, STANDARD};
use crate::core::classifier::CharClass;
use crate::core::unicode::katakana_to_hiragana;

/// 조회 테이블 생성 에러
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// 가나 목록과 로마자 목록의 길이가 다름
    LengthMismatch {
        set: &'static str,
        kana: usize,
        romaji: usize,
    },
    /// 로마자 기본 표기가 비어 있음
    EmptyRomaji(char),
    /// 같은 집합 안에서 중복된 문자
    DuplicateGlyph(char),
    /// 두 분류에 동시에 속한 문자
    OverlappingClass {
        glyph: char,
        first: CharClass,
        second: CharClass,
    },
    /// 기대한 분류에 없는 문자 (예: ウ 조합의 작은 모음)
    MissingClass { glyph: char, expected: CharClass },
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::LengthMismatch { set, kana, romaji } => {
                write!(f, "{}: 가나 {}개, 로마자 {}개로 길이가 다릅니다", set, kana, romaji)
            }
            TableError::EmptyRomaji(c) => write!(f, "'{}'의 로마자 표기가 비어 있습니다", c),
            TableError::DuplicateGlyph(c) => write!(f, "중복된 문자: '{}'", c),
            TableError::OverlappingClass {
                glyph,
                first,
                second,
            } => write!(f, "'{}'가 {:?}와 {:?}에 동시에 속합니다", glyph, first, second),
            TableError::MissingClass { glyph, expected } => {
                write!(f, "'{}'가 {:?}에 없습니다", glyph, expected)
            }
        }
    }
}

impl std::error::Error for TableError {}

lazy_static! {
    static ref STANDARD_TABLE: LookupTable = match LookupTable::build(&STANDARD) {
        Ok(table) => table,
        Err(e) => panic!("기본 문자표가 잘못되었습니다: {}", e),
    };
}

/// 검증된 조회 테이블 (불변)
#[derive(Debug, Clone)]
pub struct LookupTable {
    /// 문자 -> 분류
    classes: HashMap<char, CharClass>,
    /// 문자 -> 로마자 레코드 (가나만)
    records: HashMap<char, RomanizationRecord>,
    /// 요음 첫 글자 -> 구개음 자음
    palatals: HashMap<char, &'static str>,
    /// ウ/う
    semivowels: HashSet<char>,
    /// 작은 모음 -> ウ와 결합한 레코드
    semivowel_records: HashMap<char, RomanizationRecord>,
    /// ン/ん
    syllabic_n: HashSet<char>,
    dakuten: HashSet<char>,
    handakuten: HashSet<char>,
    repeaters: HashSet<char>,
    dakuten_repeaters: HashSet<char>,
    substitutions: HashMap<char, Substitution>,
    /// 짝을 맞춰 공백을 넣는 따옴표
    quotes: HashSet<char>,
}

/// 가타카나 한 글자와, 있으면 대응하는 히라가나
fn both_scripts(katakana: char) -> impl Iterator<Item = char> {
    std::iter::once(katakana).chain(katakana_to_hiragana(katakana))
}

fn check_length(name: &'static str, kana: usize, romaji: usize) -> Result<(), TableError> {
    if kana != romaji {
        return Err(TableError::LengthMismatch {
            set: name,
            kana,
            romaji,
        });
    }
    Ok(())
}

impl LookupTable {
    /// 기본 문자표로 만든 공유 테이블
    pub fn standard() -> &'static LookupTable {
        &STANDARD_TABLE
    }

    /// 문자표에서 조회 테이블 생성
    pub fn build(charset: &Charset) -> Result<Self, TableError> {
        let mut table = LookupTable {
            classes: HashMap::new(),
            records: HashMap::new(),
            palatals: HashMap::new(),
            semivowels: HashSet::new(),
            semivowel_records: HashMap::new(),
            syllabic_n: HashSet::new(),
            dakuten: charset.dakuten.iter().copied().collect(),
            handakuten: charset.handakuten.iter().copied().collect(),
            repeaters: charset.repeaters.iter().copied().collect(),
            dakuten_repeaters: charset.dakuten_repeaters.iter().copied().collect(),
            substitutions: HashMap::new(),
            quotes: HashSet::new(),
        };

        table.insert_set("consonant_vowels", &charset.consonant_vowels, CharClass::ConsonantVowel)?;
        table.insert_set("vowels", &charset.vowels, CharClass::Vowel)?;
        table.insert_set("small_vowels", &charset.small_vowels, CharClass::SmallVowel)?;
        table.insert_set("digraph_first", &charset.digraph_first, CharClass::DigraphFirst)?;
        table.insert_set("digraph_second", &charset.digraph_second, CharClass::DigraphSecond)?;

        check_length(
            "digraph_palatals",
            charset.digraph_first.katakana.len(),
            charset.digraph_palatals.len(),
        )?;
        for (&kana, &palatal) in charset
            .digraph_first
            .katakana
            .iter()
            .zip(charset.digraph_palatals)
        {
            for glyph in both_scripts(kana) {
                table.palatals.insert(glyph, palatal);
            }
        }

        for glyph in both_scripts(charset.geminate) {
            table.insert_class(glyph, CharClass::Geminate)?;
        }
        for glyph in both_scripts(charset.long_vowel_mark) {
            table.insert_class(glyph, CharClass::LongVowelMark)?;
        }
        table.insert_class(charset.word_border, CharClass::WordBorder)?;

        for glyph in both_scripts(charset.syllabic_n) {
            table.expect_class(glyph, CharClass::ConsonantVowel)?;
            table.syllabic_n.insert(glyph);
        }

        // ウ + 작은 모음
        for glyph in both_scripts(charset.semivowel) {
            table.expect_class(glyph, CharClass::Vowel)?;
            table.semivowels.insert(glyph);
        }
        let combinations = &charset.semivowel_combinations;
        check_length("semivowel_combinations", combinations.katakana.len(), combinations.romaji.len())?;
        for (&kana, &record) in combinations.katakana.iter().zip(combinations.romaji) {
            for glyph in both_scripts(kana) {
                table.expect_class(glyph, CharClass::SmallVowel)?;
                if table.semivowel_records.insert(glyph, record).is_some() {
                    return Err(TableError::DuplicateGlyph(glyph));
                }
            }
        }

        // 치환 대상 문자는 분류 전에 사라지므로 분류 집합과 겹치면 안 됨
        for &substitution in charset.substitutions.iter().chain(charset.quotes) {
            let glyph = substitution.glyph;
            if let Some(&class) = table.classes.get(&glyph) {
                return Err(TableError::OverlappingClass {
                    glyph,
                    first: class,
                    second: CharClass::Unknown,
                });
            }
            if table.substitutions.insert(glyph, substitution).is_some() {
                return Err(TableError::DuplicateGlyph(glyph));
            }
        }
        table.quotes = charset.quotes.iter().map(|q| q.glyph).collect();

        log::debug!(
            "조회 테이블 생성: 분류 {}개, 치환 {}개",
            table.classes.len(),
            table.substitutions.len()
        );
        Ok(table)
    }

    fn insert_set(&mut self, name: &'static str, set: &KanaSet, class: CharClass) -> Result<(), TableError> {
        check_length(name, set.katakana.len(), set.romaji.len())?;

        for (&kana, &record) in set.katakana.iter().zip(set.romaji) {
            if record.base.is_empty() {
                return Err(TableError::EmptyRomaji(kana));
            }
            for glyph in both_scripts(kana) {
                self.insert_class(glyph, class)?;
                self.records.insert(glyph, record);
            }
        }
        Ok(())
    }

    fn insert_class(&mut self, glyph: char, class: CharClass) -> Result<(), TableError> {
        match self.classes.get(&glyph) {
            Some(&existing) if existing == class => Err(TableError::DuplicateGlyph(glyph)),
            Some(&existing) => Err(TableError::OverlappingClass {
                glyph,
                first: existing,
                second: class,
            }),
            None => {
                self.classes.insert(glyph, class);
                Ok(())
            }
        }
    }

    fn expect_class(&self, glyph: char, expected: CharClass) -> Result<(), TableError> {
        if self.classes.get(&glyph) != Some(&expected) {
            return Err(TableError::MissingClass { glyph, expected });
        }
        Ok(())
    }

    /// 문자 분류 (문자표에 없으면 None)
    pub fn class_of(&self, c: char) -> Option<CharClass> {
        self.classes.get(&c).copied()
    }

    /// 가나의 로마자 레코드
    pub fn record(&self, c: char) -> Option<RomanizationRecord> {
        self.records.get(&c).copied()
    }

    /// 요음 첫 글자의 구개음 자음 (キ -> ky)
    pub fn palatal(&self, c: char) -> Option<&'static str> {
        self.palatals.get(&c).copied()
    }

    pub fn is_semivowel(&self, c: char) -> bool {
        self.semivowels.contains(&c)
    }

    /// ウ 뒤에 온 작은 모음의 반모음 레코드 (ィ -> wi)
    pub fn semivowel_record(&self, small_vowel: char) -> Option<RomanizationRecord> {
        self.semivowel_records.get(&small_vowel).copied()
    }

    pub fn is_syllabic_n(&self, c: char) -> bool {
        self.syllabic_n.contains(&c)
    }

    pub fn is_dakuten(&self, c: char) -> bool {
        self.dakuten.contains(&c)
    }

    pub fn is_handakuten(&self, c: char) -> bool {
        self.handakuten.contains(&c)
    }

    pub fn is_repeater(&self, c: char) -> bool {
        self.repeaters.contains(&c)
    }

    pub fn is_dakuten_repeater(&self, c: char) -> bool {
        self.dakuten_repeaters.contains(&c)
    }

    /// 직접 치환 항목 (따옴표 포함)
    pub fn substitution(&self, c: char) -> Option<&Substitution> {
        self.substitutions.get(&c)
    }

    pub fn is_quote(&self, c: char) -> bool {
        self.quotes.contains(&c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let table = LookupTable::standard();
        assert_eq!(table.class_of('カ'), Some(CharClass::ConsonantVowel));
        assert_eq!(table.class_of('か'), Some(CharClass::ConsonantVowel));
        assert_eq!(table.record('ツ').map(|r| r.base), Some("tsu"));
        assert_eq!(table.record('ゔ').map(|r| r.base), Some("vu"));
        assert_eq!(table.palatal('し'), Some("sh"));
        assert_eq!(table.palatal('カ'), None);
        assert_eq!(table.semivowel_record('ぃ').map(|r| r.base), Some("wi"));
        assert_eq!(table.semivowel_record('ゥ'), None);
        assert!(table.is_semivowel('う'));
        assert!(table.is_syllabic_n('ん'));
        assert!(table.is_repeater('ヽ'));
        assert!(table.is_dakuten('\u{309B}'));
        assert_eq!(table.substitution('ヿ').map(|s| s.text), Some("コト"));
        assert!(table.is_quote('＂'));
        assert_eq!(table.substitution('＇').map(|s| s.text), Some("'"));
    }

    #[test]
    fn test_katakana_only_glyphs() {
        let table = LookupTable::standard();
        // ヷ에는 히라가나 대응이 없음 (U+3097은 미할당)
        assert_eq!(table.class_of('ヷ'), Some(CharClass::ConsonantVowel));
        assert_eq!(table.class_of('\u{3097}'), None);
    }

    #[test]
    fn test_overlapping_class_is_rejected() {
        // 쉼표가 빠져 요음 첫 글자가 자음+모음 집합에 섞인 경우
        const BROKEN: Charset = Charset {
            digraph_first: KanaSet {
                katakana: &['キ', 'カ'],
                romaji: &[
                    RomanizationRecord {
                        base: "ki",
                        geminate_consonant: "k",
                        consonant: "k",
                        vowel: "i",
                        long_vowel: "ī",
                    },
                    RomanizationRecord {
                        base: "ka",
                        geminate_consonant: "k",
                        consonant: "k",
                        vowel: "a",
                        long_vowel: "ā",
                    },
                ],
            },
            digraph_palatals: &["ky", "ky"],
            ..STANDARD
        };

        let err = LookupTable::build(&BROKEN).unwrap_err();
        assert_eq!(
            err,
            TableError::OverlappingClass {
                glyph: 'カ',
                first: CharClass::ConsonantVowel,
                second: CharClass::DigraphFirst,
            }
        );
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        const BROKEN: Charset = Charset {
            digraph_palatals: &["ky"],
            ..STANDARD
        };

        let err = LookupTable::build(&BROKEN).unwrap_err();
        assert!(matches!(err, TableError::LengthMismatch { set: "digraph_palatals", .. }));
    }

    #[test]
    fn test_duplicate_glyph_is_rejected() {
        const BROKEN: Charset = Charset {
            digraph_second: KanaSet {
                katakana: &['ャ', 'ャ'],
                romaji: &[
                    RomanizationRecord {
                        base: "ya",
                        geminate_consonant: "y",
                        consonant: "y",
                        vowel: "a",
                        long_vowel: "ā",
                    },
                    RomanizationRecord {
                        base: "ya",
                        geminate_consonant: "y",
                        consonant: "y",
                        vowel: "a",
                        long_vowel: "ā",
                    },
                ],
            },
            ..STANDARD
        };

        assert_eq!(LookupTable::build(&BROKEN).unwrap_err(), TableError::DuplicateGlyph('ャ'));
    }

    #[test]
    fn test_empty_romaji_is_rejected() {
        const BROKEN: Charset = Charset {
            digraph_second: KanaSet {
                katakana: &['ャ'],
                romaji: &[RomanizationRecord {
                    base: "",
                    geminate_consonant: "",
                    consonant: "",
                    vowel: "",
                    long_vowel: "",
                }],
            },
            ..STANDARD
        };

        assert_eq!(LookupTable::build(&BROKEN).unwrap_err(), TableError::EmptyRomaji('ャ'));
    }

    #[test]
    fn test_substitution_overlap_is_rejected() {
        const BROKEN: Charset = Charset {
            substitutions: &[Substitution {
                glyph: 'カ',
                text: "ka",
                sentence_end: false,
            }],
            ..STANDARD
        };

        assert!(matches!(
            LookupTable::build(&BROKEN),
            Err(TableError::OverlappingClass { glyph: 'カ', .. })
        ));
    }
}
