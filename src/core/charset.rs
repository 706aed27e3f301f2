//! 가나 -> 로마자 문자표
//!
//! 가타카나 기준으로 정의하며, 히라가나는 `unicode::katakana_to_hiragana`로
//! 블록 오프셋을 적용해 생성한다. 각 집합은 가나 목록과 로마자 레코드 목록이
//! 같은 순서로 대응한다.

/// 가나 한 글자의 로마자 정보
///
/// チ를 예로 들면 `chi`, `t`, `ch`, `i`, `ī`:
///
/// ```text
/// チ      base                          chi
/// ッチ    geminate + base               tchi
/// チャ    consonant + 작은 모음         cha
/// ッチー  geminate + consonant + long   tchī
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RomanizationRecord {
    /// 단독으로 쓸 때의 표기
    pub base: &'static str,
    /// 촉음(ッ) 뒤에서 덧붙는 자음
    pub geminate_consonant: &'static str,
    /// 자음 부분
    pub consonant: &'static str,
    /// 모음 부분
    pub vowel: &'static str,
    /// 장음 (마크론)
    pub long_vowel: &'static str,
}

const fn cv(
    base: &'static str,
    geminate_consonant: &'static str,
    consonant: &'static str,
    vowel: &'static str,
    long_vowel: &'static str,
) -> RomanizationRecord {
    RomanizationRecord {
        base,
        geminate_consonant,
        consonant,
        vowel,
        long_vowel,
    }
}

const fn v(vowel: &'static str, long_vowel: &'static str) -> RomanizationRecord {
    RomanizationRecord {
        base: vowel,
        geminate_consonant: "",
        consonant: "",
        vowel,
        long_vowel,
    }
}

/// 가나 목록과 로마자 레코드 목록 (같은 순서로 대응)
#[derive(Debug, Clone, Copy)]
pub struct KanaSet {
    pub katakana: &'static [char],
    pub romaji: &'static [RomanizationRecord],
}

/// 그대로 치환되는 문자 (문장 부호, 합자 등)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Substitution {
    pub glyph: char,
    pub text: &'static str,
    /// 문장 부호: 뒤에 공백 한 칸 (연속된 문장 부호의 마지막에만)
    pub sentence_end: bool,
}

const fn sub(glyph: char, text: &'static str) -> Substitution {
    Substitution {
        glyph,
        text,
        sentence_end: false,
    }
}

const fn punct(glyph: char, text: &'static str) -> Substitution {
    Substitution {
        glyph,
        text,
        sentence_end: true,
    }
}

/// 변환기가 사용하는 문자표 전체
#[derive(Debug, Clone, Copy)]
pub struct Charset {
    /// 자음+모음 (요음 첫 글자 제외)
    pub consonant_vowels: KanaSet,
    /// 모음
    pub vowels: KanaSet,
    /// 작은 모음 (ァィゥェォ)
    pub small_vowels: KanaSet,
    /// 요음 첫 글자 (キ, シ, チ ...)
    pub digraph_first: KanaSet,
    /// 요음 첫 글자의 구개음 자음 (digraph_first와 같은 순서)
    pub digraph_palatals: &'static [&'static str],
    /// 요음 둘째 글자 (ャュョ)
    pub digraph_second: KanaSet,
    /// 작은 모음이 붙으면 반모음이 되는 모음 (ウ)
    pub semivowel: char,
    /// ウ + 작은 모음 조합
    pub semivowel_combinations: KanaSet,
    /// 발음 (ン)
    pub syllabic_n: char,
    /// 촉음 (ッ)
    pub geminate: char,
    /// 장음 부호 (ー)
    pub long_vowel_mark: char,
    /// 단어 경계
    pub word_border: char,
    /// 탁점 (결합용, 비결합용)
    pub dakuten: &'static [char],
    /// 반탁점 (결합용, 비결합용)
    pub handakuten: &'static [char],
    /// 반복 부호 (ゝヽ)
    pub repeaters: &'static [char],
    /// 탁점 반복 부호 (ゞヾ)
    pub dakuten_repeaters: &'static [char],
    /// 직접 치환
    pub substitutions: &'static [Substitution],
    /// 짝을 이루는 따옴표 (여는 쪽은 앞에, 닫는 쪽은 뒤에 공백)
    pub quotes: &'static [Substitution],
}

#[rustfmt::skip]
const CONSONANT_VOWEL_KANA: [char; 62] = [
    'カ', 'ク', 'ケ', 'コ',
    'サ', 'ス', 'セ', 'ソ',
    'タ', 'ツ', 'テ', 'ト',
    'ナ', 'ヌ', 'ネ', 'ノ',
    'ハ', 'フ', 'ヘ', 'ホ',
    'マ', 'ム', 'メ', 'モ',
    'ヤ', 'ユ', 'ヨ',
    'ラ', 'ル', 'レ', 'ロ',
    'ワ', 'ヲ', 'ン',
    // 작은 カ/ケ (둘 다 ka), 작은 ワ
    'ヵ', 'ヶ', 'ヮ',
    // 탁음/반탁음
    'ガ', 'グ', 'ゲ', 'ゴ',
    'ザ', 'ズ', 'ゼ', 'ゾ',
    'ダ', 'ヅ', 'デ', 'ド',
    'バ', 'ブ', 'ベ', 'ボ',
    'パ', 'プ', 'ペ', 'ポ',
    // ヴ 및 가타카나 전용 ヷヸヹヺ
    'ヴ', 'ヷ', 'ヸ', 'ヹ', 'ヺ',
];

#[rustfmt::skip]
const CONSONANT_VOWEL_ROMAJI: [RomanizationRecord; 62] = [
    cv("ka", "k", "k", "a", "ā"), cv("ku", "k", "k", "u", "ū"),
    cv("ke", "k", "k", "e", "ē"), cv("ko", "k", "k", "o", "ō"),
    cv("sa", "s", "s", "a", "ā"), cv("su", "s", "s", "u", "ū"),
    cv("se", "s", "s", "e", "ē"), cv("so", "s", "s", "o", "ō"),
    cv("ta", "t", "t", "a", "ā"), cv("tsu", "t", "ts", "u", "ū"),
    cv("te", "t", "t", "e", "ē"), cv("to", "t", "t", "o", "ō"),
    cv("na", "n", "n", "a", "ā"), cv("nu", "n", "n", "u", "ū"),
    cv("ne", "n", "n", "e", "ē"), cv("no", "n", "n", "o", "ō"),
    cv("ha", "h", "h", "a", "ā"), cv("fu", "f", "f", "u", "ū"),
    cv("he", "h", "h", "e", "ē"), cv("ho", "h", "h", "o", "ō"),
    cv("ma", "m", "m", "a", "ā"), cv("mu", "m", "m", "u", "ū"),
    cv("me", "m", "m", "e", "ē"), cv("mo", "m", "m", "o", "ō"),
    cv("ya", "y", "y", "a", "ā"), cv("yu", "y", "y", "u", "ū"),
    cv("yo", "y", "y", "o", "ō"),
    cv("ra", "r", "r", "a", "ā"), cv("ru", "r", "r", "u", "ū"),
    cv("re", "r", "r", "e", "ē"), cv("ro", "r", "r", "o", "ō"),
    cv("wa", "w", "w", "a", "ā"), cv("wo", "w", "w", "o", "ō"),
    cv("n", "n", "n", "", ""),
    cv("ka", "k", "k", "a", "ā"), cv("ka", "k", "k", "a", "ā"),
    cv("wa", "w", "w", "a", "ā"),
    cv("ga", "g", "g", "a", "ā"), cv("gu", "g", "g", "u", "ū"),
    cv("ge", "g", "g", "e", "ē"), cv("go", "g", "g", "o", "ō"),
    cv("za", "z", "z", "a", "ā"), cv("zu", "z", "z", "u", "ū"),
    cv("ze", "z", "z", "e", "ē"), cv("zo", "z", "z", "o", "ō"),
    cv("da", "d", "d", "a", "ā"), cv("zu", "z", "z", "u", "ū"),
    cv("de", "d", "d", "e", "ē"), cv("do", "d", "d", "o", "ō"),
    cv("ba", "b", "b", "a", "ā"), cv("bu", "b", "b", "u", "ū"),
    cv("be", "b", "b", "e", "ē"), cv("bo", "b", "b", "o", "ō"),
    cv("pa", "p", "p", "a", "ā"), cv("pu", "p", "p", "u", "ū"),
    cv("pe", "p", "p", "e", "ē"), cv("po", "p", "p", "o", "ō"),
    cv("vu", "v", "v", "u", "ū"), cv("va", "v", "v", "a", "ā"),
    cv("vi", "v", "v", "i", "ī"), cv("ve", "v", "v", "e", "ē"),
    cv("vo", "v", "v", "o", "ō"),
];

// ヰ/ヱ는 원래 wi/we지만 현대 표기에서는 i/e로 읽음
const VOWEL_KANA: [char; 7] = ['ア', 'イ', 'ウ', 'エ', 'オ', 'ヰ', 'ヱ'];
const VOWEL_ROMAJI: [RomanizationRecord; 7] = [
    v("a", "ā"),
    v("i", "ī"),
    v("u", "ū"),
    v("e", "ē"),
    v("o", "ō"),
    v("i", "ī"),
    v("e", "ē"),
];

const SMALL_VOWEL_KANA: [char; 5] = ['ァ', 'ィ', 'ゥ', 'ェ', 'ォ'];
const SMALL_VOWEL_ROMAJI: [RomanizationRecord; 5] = [
    v("a", "ā"),
    v("i", "ī"),
    v("u", "ū"),
    v("e", "ē"),
    v("o", "ō"),
];

#[rustfmt::skip]
const DIGRAPH_FIRST_KANA: [char; 12] = [
    'キ', 'シ', 'チ', 'ニ', 'ヒ', 'ミ', 'リ',
    'ギ', 'ジ', 'ヂ', 'ビ', 'ピ',
];

#[rustfmt::skip]
const DIGRAPH_FIRST_ROMAJI: [RomanizationRecord; 12] = [
    cv("ki", "k", "k", "i", "ī"), cv("shi", "s", "sh", "i", "ī"),
    cv("chi", "t", "ch", "i", "ī"), cv("ni", "n", "n", "i", "ī"),
    cv("hi", "h", "h", "i", "ī"), cv("mi", "m", "m", "i", "ī"),
    cv("ri", "r", "r", "i", "ī"),
    cv("gi", "g", "g", "i", "ī"), cv("ji", "j", "j", "i", "ī"),
    cv("ji", "j", "j", "i", "ī"), cv("bi", "b", "b", "i", "ī"),
    cv("pi", "p", "p", "i", "ī"),
];

#[rustfmt::skip]
const DIGRAPH_PALATALS: [&str; 12] = [
    "ky", "sh", "ch", "ny", "hy", "my", "ry",
    "gy", "j", "j", "by", "py",
];

const DIGRAPH_SECOND_KANA: [char; 3] = ['ャ', 'ュ', 'ョ'];
const DIGRAPH_SECOND_ROMAJI: [RomanizationRecord; 3] = [
    cv("ya", "y", "y", "a", "ā"),
    cv("yu", "y", "y", "u", "ū"),
    cv("yo", "y", "y", "o", "ō"),
];

// ウァ = va, ウィ = wi, ウェ = we, ウォ = wo
const SEMIVOWEL_KANA: [char; 4] = ['ァ', 'ィ', 'ェ', 'ォ'];
const SEMIVOWEL_ROMAJI: [RomanizationRecord; 4] = [
    cv("va", "v", "v", "a", "ā"),
    cv("wi", "w", "w", "i", "ī"),
    cv("we", "w", "w", "e", "ē"),
    cv("wo", "w", "w", "o", "ō"),
];

#[rustfmt::skip]
const SUBSTITUTIONS: [Substitution; 41] = [
    // 합자: ヿ = コト, ゟ = より
    sub('ヿ', "コト"),
    sub('ゟ', "より"),
    // 이중 하이픈 (외국 인명 구분)
    sub('゠', "-"),
    // 가운뎃점
    sub('・', " "),
    // 괄호
    sub('｛', " {"), sub('｝', "} "),
    sub('（', " ("), sub('）', ") "),
    sub('〔', " ["), sub('〕', "] "),
    sub('［', " ["), sub('］', "] "),
    sub('【', " ["), sub('】', "] "),
    sub('〈', " <"), sub('〉', "> "),
    sub('《', " «"), sub('》', "» "),
    sub('「', " ["), sub('」', "] "),
    sub('『', " ["), sub('』', "] "),
    // 공백, 물결표, 말줄임
    sub('\u{3000}', " "),
    sub('〜', "~"),
    sub('‥', ".."),
    sub('…', "..."),
    // 문장 부호
    punct('、', ","), punct('，', ","),
    punct('。', "."), punct('．', "."),
    punct('！', "!"), punct('？', "?"),
    punct('：', ":"), punct('；', ";"),
    // 전각 기호 (전각 ASCII 영역 밖)
    sub('￠', "¢"), sub('￡', "£"),
    sub('￢', "¬"), sub('￣', "¯"),
    sub('￤', "¦"), sub('￥', "¥"),
    sub('￦', "₩"),
];

// 전각 따옴표 (전각 ASCII 변환보다 먼저 처리)
const QUOTES: [Substitution; 2] = [sub('＂', "\""), sub('＇', "'")];

/// 기본 문자표
pub const STANDARD: Charset = Charset {
    consonant_vowels: KanaSet {
        katakana: &CONSONANT_VOWEL_KANA,
        romaji: &CONSONANT_VOWEL_ROMAJI,
    },
    vowels: KanaSet {
        katakana: &VOWEL_KANA,
        romaji: &VOWEL_ROMAJI,
    },
    small_vowels: KanaSet {
        katakana: &SMALL_VOWEL_KANA,
        romaji: &SMALL_VOWEL_ROMAJI,
    },
    digraph_first: KanaSet {
        katakana: &DIGRAPH_FIRST_KANA,
        romaji: &DIGRAPH_FIRST_ROMAJI,
    },
    digraph_palatals: &DIGRAPH_PALATALS,
    digraph_second: KanaSet {
        katakana: &DIGRAPH_SECOND_KANA,
        romaji: &DIGRAPH_SECOND_ROMAJI,
    },
    semivowel: 'ウ',
    semivowel_combinations: KanaSet {
        katakana: &SEMIVOWEL_KANA,
        romaji: &SEMIVOWEL_ROMAJI,
    },
    syllabic_n: 'ン',
    geminate: 'ッ',
    long_vowel_mark: 'ー',
    word_border: '|',
    dakuten: &['\u{3099}', '\u{309B}'],
    handakuten: &['\u{309A}', '\u{309C}'],
    repeaters: &['ゝ', 'ヽ'],
    dakuten_repeaters: &['ゞ', 'ヾ'],
    substitutions: &SUBSTITUTIONS,
    quotes: &QUOTES,
};
