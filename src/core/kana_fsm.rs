//! 가나 -> 로마자 변환 유한 상태 기계 (FSM)
//!
//! 활성 글자 하나와 그 수식 정보(촉음 수, 장음 수, 작은 모음, 요음 둘째 글자)를
//! 보관하다가, 다음 글자가 들어오거나 경계를 만나면 로마자 조각으로 확정한다.

use crate::config::{UnknownPolicy, VowelStyle};
use crate::core::charset::RomanizationRecord;
use crate::core::classifier::{classify, CharClass};
use crate::core::error::ConvertError;
use crate::core::preprocess::Token;
use crate::core::table::LookupTable;

/// 장음으로 합쳐지는 (앞 모음, 뒤 모음) 조합
/// 순서가 중요: おう는 ō, うお는 uo
const LONG_VOWEL_PAIRS: [(&str, &str); 5] =
    [("a", "a"), ("u", "u"), ("e", "e"), ("o", "o"), ("o", "u")];

/// ン 뒤에 아포스트로피를 넣는 다음 글자의 첫 문자
const APOSTROPHE_TRIGGERS: [char; 6] = ['a', 'i', 'u', 'e', 'o', 'y'];

/// 입력 끝 표시 (로그용, U+0003 END OF TEXT)
const END_OF_TEXT: char = '\u{3}';

/// 활성 글자
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    glyph: char,
    record: RomanizationRecord,
    class: CharClass,
}

/// ウ 입력 직후의 잠정 전이
/// 다음 글자가 ウ용 작은 모음이면 되돌리고, 아니면 확정한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Speculation {
    /// ウ가 활성 글자의 장음으로 합쳐짐
    Coalesced,
    /// ウ가 새 글자로 시작됨
    /// `after_n`: 직전에 확정한 글자가 ン (아포스트로피는 확정/되돌리기 때 결정)
    Fresh { after_n: bool },
}

/// 가나 변환 FSM
pub struct KanaFsm<'t> {
    table: &'t LookupTable,
    style: VowelStyle,
    policy: UnknownPolicy,
    active: Option<Cell>,
    geminate_count: usize,
    long_vowel_count: usize,
    small_vowel: Option<RomanizationRecord>,
    digraph_second: Option<RomanizationRecord>,
    /// Include 정책에서 보류 중인 미지 문자
    unknown: Option<char>,
    speculation: Option<Speculation>,
    /// 확정된 로마자 조각
    output: Vec<String>,
}

impl<'t> KanaFsm<'t> {
    /// 새 FSM 생성
    pub fn new(table: &'t LookupTable) -> Self {
        Self {
            table,
            style: VowelStyle::default(),
            policy: UnknownPolicy::default(),
            active: None,
            geminate_count: 0,
            long_vowel_count: 0,
            small_vowel: None,
            digraph_second: None,
            unknown: None,
            speculation: None,
            output: Vec::new(),
        }
    }

    pub fn set_style(&mut self, style: VowelStyle) {
        self.style = style;
    }

    pub fn set_policy(&mut self, policy: UnknownPolicy) {
        self.policy = policy;
    }

    /// 토큰 하나를 입력하여 상태 전이
    pub fn feed(&mut self, token: Token) -> Result<(), ConvertError> {
        let (glyph, class, position) = match token {
            Token::Glyph { glyph, position } => (glyph, classify(self.table, glyph), position),
            Token::End => (END_OF_TEXT, CharClass::End, 0),
            Token::Literal(c) => {
                if let Some(speculation) = self.speculation.take() {
                    self.commit(speculation);
                }
                return self.feed_literal(c);
            }
        };

        // 직전 ウ의 잠정 전이는 ウ용 작은 모음일 때만 되돌림
        if let Some(speculation) = self.speculation.take() {
            if class == CharClass::SmallVowel {
                if let Some(record) = self.table.semivowel_record(glyph) {
                    return self.roll_back(speculation, glyph, record);
                }
            }
            self.commit(speculation);
        }

        log::debug!("입력 '{}' ({:?})", glyph.escape_debug(), class);

        match class {
            CharClass::ConsonantVowel | CharClass::DigraphFirst => {
                let record = self.record_of(glyph, class)?;
                self.start_cell(Cell {
                    glyph,
                    record,
                    class,
                })
            }
            CharClass::Vowel => self.feed_vowel(glyph),
            CharClass::SmallVowel => self.feed_small_vowel(glyph),
            CharClass::DigraphSecond => self.feed_digraph_second(glyph),
            CharClass::Geminate => {
                self.flush(None)?;
                self.geminate_count += 1;
                Ok(())
            }
            CharClass::LongVowelMark => {
                // 앞에 글자가 없으면 무시
                if self.active.is_some() {
                    self.long_vowel_count += 1;
                }
                Ok(())
            }
            CharClass::WordBorder | CharClass::End => self.flush(None),
            CharClass::Unknown => self.feed_unknown(glyph, position),
        }
    }

    /// 입력 종료: 남은 글자를 확정하고 조각 목록을 돌려줌
    pub fn finish(&mut self) -> Result<Vec<String>, ConvertError> {
        self.feed(Token::End)?;
        let output = std::mem::take(&mut self.output);
        self.reset();
        Ok(output)
    }

    /// 초기 상태로 되돌림 (설정은 유지)
    pub fn reset(&mut self) {
        self.clear_cell();
        self.unknown = None;
        self.speculation = None;
        self.output.clear();
    }

    fn record_of(&self, c: char, class: CharClass) -> Result<RomanizationRecord, ConvertError> {
        self.table.record(c).ok_or_else(|| {
            log::error!("'{}'의 로마자 레코드가 없습니다", c);
            ConvertError::InvalidCharacterClass(class)
        })
    }

    /// 모음 입력
    fn feed_vowel(&mut self, c: char) -> Result<(), ConvertError> {
        let record = self.record_of(c, CharClass::Vowel)?;
        let semivowel = self.table.is_semivowel(c);

        if self.coalesces(record.vowel) {
            self.long_vowel_count += 1;
            if semivowel {
                self.speculation = Some(Speculation::Coalesced);
            }
            return Ok(());
        }

        let cell = Cell {
            glyph: c,
            record,
            class: CharClass::Vowel,
        };

        if !semivowel {
            return self.start_cell(cell);
        }

        // ン 뒤 아포스트로피는 ウ가 확정될 때까지 보류
        let after_n = self
            .active
            .map_or(false, |active| self.table.is_syllabic_n(active.glyph));
        self.flush(None)?;
        self.activate(cell)?;
        self.speculation = Some(Speculation::Fresh { after_n });
        Ok(())
    }

    /// 작은 모음 입력
    fn feed_small_vowel(&mut self, c: char) -> Result<(), ConvertError> {
        let record = self.record_of(c, CharClass::SmallVowel)?;
        let cell = Cell {
            glyph: c,
            record,
            class: CharClass::SmallVowel,
        };

        let active = match self.active {
            Some(active) => active,
            None => return self.start_cell(cell),
        };

        if self.coalesces(record.vowel) {
            self.long_vowel_count += 1;
            return Ok(());
        }

        let blocked = self.small_vowel.is_some()
            || self.digraph_second.is_some()
            || self.long_vowel_count > 0
            || self.table.is_syllabic_n(active.glyph);
        if blocked {
            // 단독 모음으로 취급
            return self.start_cell(cell);
        }

        self.small_vowel = Some(record);
        Ok(())
    }

    /// 요음 둘째 글자 입력
    fn feed_digraph_second(&mut self, c: char) -> Result<(), ConvertError> {
        let record = self.record_of(c, CharClass::DigraphSecond)?;

        let attaches = match self.active {
            Some(active) => {
                matches!(active.class, CharClass::DigraphFirst | CharClass::ConsonantVowel)
                    && !self.table.is_syllabic_n(active.glyph)
                    && self.small_vowel.is_none()
                    && self.digraph_second.is_none()
                    && self.long_vowel_count == 0
            }
            None => false,
        };

        if attaches {
            self.digraph_second = Some(record);
            return Ok(());
        }

        // 단독 ャ/ュ/ョ는 ya/yu/yo
        self.start_cell(Cell {
            glyph: c,
            record,
            class: CharClass::ConsonantVowel,
        })
    }

    fn feed_unknown(&mut self, c: char, position: usize) -> Result<(), ConvertError> {
        match self.policy {
            UnknownPolicy::Discard => {
                log::debug!("미지 문자 '{}' 무시", c);
                Ok(())
            }
            UnknownPolicy::Raise => Err(ConvertError::UnexpectedCharacter { glyph: c, position }),
            UnknownPolicy::Include => {
                self.flush(None)?;
                self.unknown = Some(c);
                Ok(())
            }
        }
    }

    /// 문자표가 만든 문자: 정책과 무관하게 그대로 출력
    /// 글자 경계이므로 남은 촉음도 버린다
    fn feed_literal(&mut self, c: char) -> Result<(), ConvertError> {
        self.flush(None)?;
        self.geminate_count = 0;
        self.output.push(c.to_string());
        Ok(())
    }

    /// ウ 잠정 전이 확정
    fn commit(&mut self, speculation: Speculation) {
        if let Speculation::Fresh { after_n: true } = speculation {
            if let Some(active) = self.active {
                if starts_with_apostrophe_trigger(&active.record) {
                    self.output.push("'".to_string());
                }
            }
        }
    }

    /// ウ 잠정 전이 되돌리기: ウ + 작은 모음을 반모음 글자로 교체
    fn roll_back(
        &mut self,
        speculation: Speculation,
        small_vowel: char,
        record: RomanizationRecord,
    ) -> Result<(), ConvertError> {
        log::debug!("반모음 전환: {:?} + '{}' -> {}", speculation, small_vowel, record.base);

        let cell = Cell {
            glyph: small_vowel,
            record,
            class: CharClass::ConsonantVowel,
        };

        match speculation {
            Speculation::Coalesced => {
                self.long_vowel_count = self.long_vowel_count.saturating_sub(1);
                self.start_cell(cell)
            }
            Speculation::Fresh { after_n } => {
                if after_n && starts_with_apostrophe_trigger(&record) {
                    self.output.push("'".to_string());
                }
                self.activate(cell)
            }
        }
    }

    /// 활성 글자의 끝 모음 (요음 둘째 글자, 작은 모음 순으로 우선)
    fn trailing_vowel(&self) -> Option<&'static str> {
        let active = self.active?;
        let vowel = self
            .digraph_second
            .or(self.small_vowel)
            .map(|r| r.vowel)
            .unwrap_or(active.record.vowel);
        Some(vowel)
    }

    fn coalesces(&self, vowel: &str) -> bool {
        match self.trailing_vowel() {
            Some(trailing) if !trailing.is_empty() => LONG_VOWEL_PAIRS
                .iter()
                .any(|&(first, second)| first == trailing && second == vowel),
            _ => false,
        }
    }

    /// 현재 글자를 확정하고 새 글자를 활성화
    fn start_cell(&mut self, cell: Cell) -> Result<(), ConvertError> {
        self.flush(Some(cell.record))?;
        self.activate(cell)
    }

    fn activate(&mut self, cell: Cell) -> Result<(), ConvertError> {
        if !cell.class.is_cell() {
            log::error!("'{}'는 활성 글자가 될 수 없습니다: {:?}", cell.glyph, cell.class);
            return Err(ConvertError::InvalidCharacterClass(cell.class));
        }
        self.active = Some(cell);
        Ok(())
    }

    /// 활성 글자를 로마자 조각으로 확정
    ///
    /// `next`는 곧 활성화될 글자의 레코드 (ン 뒤 아포스트로피 판단용).
    /// 활성 글자가 없으면 보류 중인 미지 문자만 내보낸다.
    fn flush(&mut self, next: Option<RomanizationRecord>) -> Result<(), ConvertError> {
        if let Some(cell) = self.active {
            let fragment = self.compose(&cell)?;
            log::debug!("확정 '{}' -> {}", cell.glyph, fragment);
            self.output.push(fragment);

            let needs_apostrophe = self.table.is_syllabic_n(cell.glyph)
                && next.map_or(false, |r| starts_with_apostrophe_trigger(&r));
            if needs_apostrophe {
                self.output.push("'".to_string());
            }

            self.clear_cell();
        }

        if let Some(c) = self.unknown.take() {
            self.output.push(c.to_string());
        }

        Ok(())
    }

    /// 활성 글자와 수식 정보로 로마자 조각 생성
    fn compose(&self, cell: &Cell) -> Result<String, ConvertError> {
        let record = &cell.record;
        let count = self.long_vowel_count;

        match cell.class {
            CharClass::ConsonantVowel | CharClass::DigraphFirst => {
                let mut fragment = record.geminate_consonant.repeat(self.geminate_count);

                if let Some(second) = self.digraph_second {
                    // 요음 첫 글자만 구개음 (シ+ャ -> sha), 나머지는 자음 + 모음 (デ+ュ -> du)
                    let consonant = match cell.class {
                        CharClass::DigraphFirst => {
                            self.table.palatal(cell.glyph).unwrap_or(record.consonant)
                        }
                        _ => record.consonant,
                    };
                    fragment.push_str(consonant);
                    fragment.push_str(&self.vowel_part(&second, count));
                } else if let Some(small) = self.small_vowel {
                    fragment.push_str(record.consonant);
                    fragment.push_str(&self.vowel_part(&small, count));
                } else if count > 0 {
                    fragment.push_str(record.consonant);
                    fragment.push_str(&self.long_vowel(record, count));
                } else {
                    fragment.push_str(record.base);
                }

                Ok(fragment)
            }
            CharClass::Vowel | CharClass::SmallVowel => {
                let fragment = if let Some(small) = self.small_vowel {
                    format!("{}{}", record.base, self.vowel_part(&small, count))
                } else if count > 0 {
                    self.long_vowel(record, count)
                } else {
                    record.base.to_string()
                };
                Ok(fragment)
            }
            class => {
                log::error!("활성 글자 '{}'의 분류가 잘못되었습니다: {:?}", cell.glyph, class);
                Err(ConvertError::InvalidCharacterClass(class))
            }
        }
    }

    /// 장음이면 장모음 × count, 아니면 모음 그대로
    fn vowel_part(&self, record: &RomanizationRecord, count: usize) -> String {
        if count > 0 {
            self.long_vowel(record, count)
        } else {
            record.vowel.to_string()
        }
    }

    fn long_vowel(&self, record: &RomanizationRecord, count: usize) -> String {
        self.style.decorate(record.long_vowel).repeat(count)
    }

    fn clear_cell(&mut self) {
        self.active = None;
        self.geminate_count = 0;
        self.long_vowel_count = 0;
        self.small_vowel = None;
        self.digraph_second = None;
    }
}

fn starts_with_apostrophe_trigger(record: &RomanizationRecord) -> bool {
    record
        .base
        .chars()
        .next()
        .map_or(false, |first| APOSTROPHE_TRIGGERS.contains(&first))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(c: char, position: usize) -> Token {
        Token::Glyph { glyph: c, position }
    }

    fn run(fsm: &mut KanaFsm<'_>, input: &str) -> Result<String, ConvertError> {
        for (i, c) in input.chars().enumerate() {
            fsm.feed(glyph(c, i))?;
        }
        Ok(fsm.finish()?.concat())
    }

    fn convert(input: &str) -> String {
        let mut fsm = KanaFsm::new(LookupTable::standard());
        run(&mut fsm, input).unwrap()
    }

    #[test]
    fn test_basic() {
        assert_eq!(convert("かな"), "kana");
        assert_eq!(convert("ひらがな"), "hiragana");
        assert_eq!(convert("カタカナ"), "katakana");
        assert_eq!(convert("つ"), "tsu");
    }

    #[test]
    fn test_long_vowels() {
        assert_eq!(convert("おねえさん"), "onēsan");
        assert_eq!(convert("とうきょう"), "tōkyō");
        assert_eq!(convert("パーティー"), "pātī");
        assert_eq!(convert("きいろ"), "kiiro");
        // 순서가 반대면 합쳐지지 않음
        assert_eq!(convert("こう"), "kō");
        assert_eq!(convert("うお"), "uo");
    }

    #[test]
    fn test_geminate() {
        assert_eq!(convert("がっこう"), "gakkō");
        assert_eq!(convert("まっちゃ"), "matcha");
        assert_eq!(convert("っっか"), "kkka");
        // 모음 앞의 촉음은 사라짐
        assert_eq!(convert("ッアッエッカ"), "aekka");
    }

    #[test]
    fn test_digraphs() {
        assert_eq!(convert("しょ"), "sho");
        assert_eq!(convert("ぢゃ"), "ja");
        assert_eq!(convert("ニュー"), "nyū");
        assert_eq!(convert("ゃ"), "ya");
    }

    #[test]
    fn test_digraph_second_on_plain_cell() {
        // 구개음이 없는 글자는 자음 + 모음
        assert_eq!(convert("デュ"), "du");
        assert_eq!(convert("テュ"), "tu");
        assert_eq!(convert("プロデューサー"), "purodūsā");
    }

    #[test]
    fn test_small_vowels() {
        assert_eq!(convert("ティ"), "ti");
        assert_eq!(convert("フォ"), "fo");
        assert_eq!(convert("チェコ"), "cheko");
        assert_eq!(convert("ワァィ"), "wāi");
        assert_eq!(convert("ァ"), "a");
    }

    #[test]
    fn test_small_vowel_coalescing_uses_pairs() {
        // 작은 모음도 보통 모음과 같은 조합으로만 장음
        assert_eq!(convert("イィ"), convert("イイ"));
        assert_eq!(convert("イィ"), "ii");
        assert_eq!(convert("キィ"), "ki");
        assert_eq!(convert("オゥ"), "ō");
        assert_eq!(convert("オゥ"), convert("おう"));
        assert_eq!(convert("ワァ"), "wā");
    }

    #[test]
    fn test_syllabic_n() {
        assert_eq!(convert("しんよう"), "shin'yō");
        assert_eq!(convert("かんい"), "kan'i");
        assert_eq!(convert("ぐんま"), "gunma");
        assert_eq!(convert("こん|い"), "koni");
    }

    #[test]
    fn test_semivowel() {
        assert_eq!(convert("ウィンドウ"), "windō");
        assert_eq!(convert("バックウォーター"), "bakkuwōtā");
        assert_eq!(convert("アーウィン"), "āwin");
        assert_eq!(convert("ウァ"), "va");
        // 장음 부호가 먼저 오면 확정됨
        assert_eq!(convert("ウーィ"), "ūi");
    }

    #[test]
    fn test_semivowel_after_syllabic_n() {
        // ン + ウ의 아포스트로피는 ウ가 확정될 때 결정
        assert_eq!(convert("ンウィ"), "nwi");
        assert_eq!(convert("ンウ"), "n'u");
        assert_eq!(convert("ンウカ"), "n'uka");
        assert_eq!(convert("サンウェー"), "sanwē");
    }

    #[test]
    fn test_word_border() {
        assert_eq!(convert("ぬれえん"), "nurēn");
        assert_eq!(convert("ぬれ|えん"), "nureen");
        assert_eq!(convert("こ|おう|こん|らい"), "koōkonrai");
    }

    #[test]
    fn test_long_vowel_mark_alone() {
        assert_eq!(convert("ー"), "");
        assert_eq!(convert("ーテー"), "tē");
    }

    #[test]
    fn test_literal_breaks_cell() {
        let mut fsm = KanaFsm::new(LookupTable::standard());
        fsm.set_policy(UnknownPolicy::Discard);
        fsm.feed(glyph('わ', 0)).unwrap();
        fsm.feed(Token::Literal(',')).unwrap();
        fsm.feed(glyph('あ', 1)).unwrap();
        assert_eq!(fsm.finish().unwrap().concat(), "wa,a");

        // 문자표 출력 앞의 촉음은 사라짐
        fsm.feed(glyph('っ', 0)).unwrap();
        fsm.feed(Token::Literal('-')).unwrap();
        fsm.feed(glyph('か', 1)).unwrap();
        assert_eq!(fsm.finish().unwrap().concat(), "-ka");
    }

    #[test]
    fn test_end_token_flushes() {
        let mut fsm = KanaFsm::new(LookupTable::standard());
        fsm.feed(glyph('か', 0)).unwrap();
        fsm.feed(Token::End).unwrap();
        assert_eq!(fsm.finish().unwrap().concat(), "ka");
    }

    #[test]
    fn test_non_cell_class_is_rejected() {
        let table = LookupTable::standard();
        let mut fsm = KanaFsm::new(table);
        let record = table.record('か').unwrap();
        let err = fsm
            .activate(Cell {
                glyph: 'っ',
                record,
                class: CharClass::Geminate,
            })
            .unwrap_err();
        assert_eq!(err, ConvertError::InvalidCharacterClass(CharClass::Geminate));
        assert!(fsm.active.is_none());
    }

    #[test]
    fn test_circumflex() {
        let mut fsm = KanaFsm::new(LookupTable::standard());
        fsm.set_style(VowelStyle::Circumflex);
        assert_eq!(run(&mut fsm, "がっこう").unwrap(), "gakkô");
    }

    #[test]
    fn test_unknown_policies() {
        let mut fsm = KanaFsm::new(LookupTable::standard());

        fsm.set_policy(UnknownPolicy::Discard);
        assert_eq!(run(&mut fsm, "ねこ犬").unwrap(), "neko");

        fsm.set_policy(UnknownPolicy::Include);
        assert_eq!(run(&mut fsm, "ねこ犬").unwrap(), "neko犬");
        assert_eq!(run(&mut fsm, "犬ねこ").unwrap(), "犬neko");

        fsm.set_policy(UnknownPolicy::Raise);
        let err = run(&mut fsm, "ねこ犬").unwrap_err();
        assert_eq!(
            err,
            ConvertError::UnexpectedCharacter {
                glyph: '犬',
                position: 2
            }
        );
    }

    #[test]
    fn test_reset() {
        let mut fsm = KanaFsm::new(LookupTable::standard());
        fsm.feed(glyph('か', 0)).unwrap();
        fsm.feed(glyph('っ', 1)).unwrap();
        fsm.reset();
        assert_eq!(run(&mut fsm, "た").unwrap(), "ta");
    }
}
