//! 가나 -> 로마자 변환 엔진
//!
//! 파이프라인:
//!
//! 1. **전처리** (`preprocess`): 탁점 합성, 반복 부호 해석, 직접 치환 -> `Token`
//! 2. **분류** (`classifier`): 정규화된 문자 한 글자 -> `CharClass`
//! 3. **FSM** (`kana_fsm`): 분류된 문자열 -> 로마자 조각
//! 4. **조립** (`converter`): 조각 연결, 대문자 변환

pub mod charset;
pub mod classifier;
pub mod converter;
pub mod error;
pub mod kana_fsm;
pub mod preprocess;
pub mod table;
pub mod unicode;
