//! 변환 에러

use crate::core::classifier::CharClass;

/// 가나 -> 로마자 변환 에러
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// 문자표에 없는 문자 (unknown_policy = Raise)
    /// position은 원문 기준 문자 위치
    UnexpectedCharacter { glyph: char, position: usize },
    /// 변환기 내부 불변식 위반 (문자표/분류기 불일치)
    InvalidCharacterClass(CharClass),
    /// 알 수 없는 설정값
    InvalidConfiguration(String),
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::UnexpectedCharacter { glyph, position } => {
                write!(f, "변환할 수 없는 문자: '{}' (위치 {})", glyph, position)
            }
            ConvertError::InvalidCharacterClass(class) => {
                write!(f, "잘못된 문자 분류: {:?}", class)
            }
            ConvertError::InvalidConfiguration(s) => write!(f, "잘못된 설정값: {}", s),
        }
    }
}

impl std::error::Error for ConvertError {}
