//! 문자 분류기

use crate::core::table::LookupTable;

/// 정규화된 문자 한 글자의 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// 자음+모음 (カ, ン, ヴ ...)
    ConsonantVowel,
    /// 모음 (ア, イ ...)
    Vowel,
    /// 작은 모음 (ァ, ィ ...)
    SmallVowel,
    /// 요음 첫 글자 (キ, シ ...)
    DigraphFirst,
    /// 요음 둘째 글자 (ャ, ュ, ョ)
    DigraphSecond,
    /// 촉음 (ッ)
    Geminate,
    /// 장음 부호 (ー)
    LongVowelMark,
    /// 단어 경계 (|)
    WordBorder,
    /// 입력 끝 (문자에는 배정되지 않음)
    End,
    /// 문자표에 없는 문자
    Unknown,
}

impl CharClass {
    /// 변환기가 활성 글자로 보관할 수 있는 분류인지 확인
    pub fn is_cell(&self) -> bool {
        matches!(
            self,
            CharClass::ConsonantVowel
                | CharClass::Vowel
                | CharClass::SmallVowel
                | CharClass::DigraphFirst
                | CharClass::DigraphSecond
        )
    }
}

/// 문자 한 글자를 분류
/// 문자표에 없는 문자는 `Unknown` (에러 없음)
pub fn classify(table: &LookupTable, c: char) -> CharClass {
    table.class_of(c).unwrap_or(CharClass::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(c: char) -> CharClass {
        classify(LookupTable::standard(), c)
    }

    #[test]
    fn test_kana_classes() {
        assert_eq!(class('か'), CharClass::ConsonantVowel);
        assert_eq!(class('ン'), CharClass::ConsonantVowel);
        assert_eq!(class('ヺ'), CharClass::ConsonantVowel);
        assert_eq!(class('あ'), CharClass::Vowel);
        assert_eq!(class('ゐ'), CharClass::Vowel);
        assert_eq!(class('ィ'), CharClass::SmallVowel);
        assert_eq!(class('し'), CharClass::DigraphFirst);
        assert_eq!(class('ョ'), CharClass::DigraphSecond);
    }

    #[test]
    fn test_marker_classes() {
        assert_eq!(class('っ'), CharClass::Geminate);
        assert_eq!(class('ッ'), CharClass::Geminate);
        assert_eq!(class('ー'), CharClass::LongVowelMark);
        assert_eq!(class('|'), CharClass::WordBorder);
    }

    #[test]
    fn test_unknown() {
        assert_eq!(class('犬'), CharClass::Unknown);
        assert_eq!(class('A'), CharClass::Unknown);
        assert_eq!(class('.'), CharClass::Unknown);
        // 반각 가타카나는 지원하지 않음
        assert_eq!(class('ｶ'), CharClass::Unknown);
        // 미결합 탁점
        assert_eq!(class('\u{3099}'), CharClass::Unknown);
    }

    #[test]
    fn test_cell_classes() {
        assert!(CharClass::Vowel.is_cell());
        assert!(CharClass::DigraphFirst.is_cell());
        assert!(!CharClass::Geminate.is_cell());
        assert!(!CharClass::End.is_cell());
    }
}
