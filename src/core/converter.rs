//! 가나 -> 로마자 통합 변환기

use crate::config::{KanaConfig, UnknownPolicy, VowelStyle};
use crate::core::error::ConvertError;
use crate::core::kana_fsm::KanaFsm;
use crate::core::preprocess::{preprocess, Token};
use crate::core::table::LookupTable;

/// 가나 -> 로마자 변환기 (헵번식)
///
/// 한 번 만들어 재사용한다. 설정은 호출 사이에 유지되고,
/// 내부 상태는 매 변환마다 초기화된다.
///
/// ```
/// use kanaconv::KanaConv;
///
/// let mut conv = KanaConv::new();
/// assert_eq!(conv.to_romaji("がっこう").unwrap(), "gakkō");
/// ```
pub struct KanaConv {
    config: KanaConfig,
    table: &'static LookupTable,
    fsm: KanaFsm<'static>,
}

impl KanaConv {
    /// 기본 설정으로 생성
    pub fn new() -> Self {
        Self::with_config(KanaConfig::default())
    }

    pub fn with_config(config: KanaConfig) -> Self {
        let table = LookupTable::standard();
        Self {
            config,
            table,
            fsm: KanaFsm::new(table),
        }
    }

    /// 직접 만든 문자표로 생성
    pub fn with_table(table: &'static LookupTable) -> Self {
        Self {
            config: KanaConfig::default(),
            table,
            fsm: KanaFsm::new(table),
        }
    }

    pub fn config(&self) -> &KanaConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: KanaConfig) {
        self.config = config;
    }

    pub fn set_vowel_style(&mut self, style: VowelStyle) {
        self.config.vowel_style = style;
    }

    pub fn set_uppercase(&mut self, uppercase: bool) {
        self.config.uppercase = uppercase;
    }

    pub fn set_unknown_policy(&mut self, policy: UnknownPolicy) {
        self.config.unknown_policy = policy;
    }

    /// 가나 문자열을 로마자로 변환
    ///
    /// 실패하면 부분 결과 없이 에러만 반환하고 상태를 초기화한다.
    pub fn to_romaji(&mut self, input: &str) -> Result<String, ConvertError> {
        self.fsm.reset();
        self.fsm.set_style(self.config.vowel_style);
        self.fsm.set_policy(self.config.unknown_policy);

        let tokens = preprocess(self.table, input);

        let fragments = match self.run(&tokens) {
            Ok(fragments) => fragments,
            Err(e) => {
                self.fsm.reset();
                return Err(e);
            }
        };

        let romaji = fragments.concat();
        if self.config.uppercase {
            Ok(romaji.to_uppercase())
        } else {
            Ok(romaji)
        }
    }

    fn run(&mut self, tokens: &[Token]) -> Result<Vec<String>, ConvertError> {
        for &token in tokens {
            self.fsm.feed(token)?;
        }
        self.fsm.finish()
    }
}

impl Default for KanaConv {
    fn default() -> Self {
        Self::new()
    }
}

/// 기본 설정으로 한 번 변환
/// 기본 정책(Include)에서는 미지 문자로 실패하지 않는다
pub fn convert(input: &str) -> Result<String, ConvertError> {
    KanaConv::new().to_romaji(input)
}
