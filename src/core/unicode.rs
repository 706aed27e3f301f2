//! 가나 유니코드 유틸리티 (히라가나/가타카나 전환, 탁점 합성, 전각 ASCII 변환)

/// 가타카나 블록과 히라가나 블록 사이의 거리
const SCRIPT_OFFSET: u32 = 0x60;

/// 히라가나 대응이 있는 첫 가타카나 (ァ)
const KATAKANA_FIRST: u32 = 0x30A1;
/// 히라가나 대응이 있는 마지막 가타카나 (ヶ)
const KATAKANA_LAST: u32 = 0x30F6;

/// 첫 히라가나 (ぁ)
const HIRAGANA_FIRST: u32 = 0x3041;
/// 마지막 히라가나 (ゖ)
const HIRAGANA_LAST: u32 = 0x3096;

/// 전각 ASCII 영역 (！ ~ ～)
const FULLWIDTH_FIRST: u32 = 0xFF01;
const FULLWIDTH_LAST: u32 = 0xFF5E;
const FULLWIDTH_OFFSET: u32 = 0xFEE0;

/// 가타카나 -> 히라가나
/// ヷヸヹヺ 및 ヶ 이후 기호는 대응 문자가 없으므로 None
pub fn katakana_to_hiragana(c: char) -> Option<char> {
    let code = c as u32;
    if !(KATAKANA_FIRST..=KATAKANA_LAST).contains(&code) {
        return None;
    }
    char::from_u32(code - SCRIPT_OFFSET)
}

/// 히라가나 -> 가타카나
pub fn hiragana_to_katakana(c: char) -> Option<char> {
    let code = c as u32;
    if !(HIRAGANA_FIRST..=HIRAGANA_LAST).contains(&code) {
        return None;
    }
    char::from_u32(code + SCRIPT_OFFSET)
}

/// 탁점(゛) 합성: か -> が, ウ -> ヴ, ワ -> ヷ, ゝ -> ゞ
/// 탁점을 붙일 수 없는 문자는 None
pub fn voiced(c: char) -> Option<char> {
    match c {
        'ゝ' => return Some('ゞ'),
        'ヽ' => return Some('ヾ'),
        _ => {}
    }

    // 가타카나 기준으로 계산한 뒤 원래 문자 체계로 되돌림
    let (kana, hiragana) = match hiragana_to_katakana(c) {
        Some(k) => (k, true),
        None => (c, false),
    };
    let code = kana as u32;

    let voiced = match code {
        // カ キ ク ケ コ サ シ ス セ ソ タ チ
        0x30AB..=0x30C1 if code % 2 == 1 => code + 1,
        // ツ テ ト (작은 ッ 때문에 한 칸 밀림)
        0x30C4 | 0x30C6 | 0x30C8 => code + 1,
        // ハ ヒ フ ヘ ホ
        0x30CF..=0x30DB if (code - 0x30CF) % 3 == 0 => code + 1,
        // ウ -> ヴ
        0x30A6 => 0x30F4,
        // ワ ヰ ヱ ヲ -> ヷ ヸ ヹ ヺ
        0x30EF..=0x30F2 => code + 8,
        _ => return None,
    };

    let voiced = char::from_u32(voiced)?;
    if hiragana {
        katakana_to_hiragana(voiced)
    } else {
        Some(voiced)
    }
}

/// 반탁점(゜) 합성: は -> ぱ
/// ハ행만 가능
pub fn semi_voiced(c: char) -> Option<char> {
    let (kana, hiragana) = match hiragana_to_katakana(c) {
        Some(k) => (k, true),
        None => (c, false),
    };
    let code = kana as u32;

    if !(0x30CF..=0x30DB).contains(&code) || (code - 0x30CF) % 3 != 0 {
        return None;
    }

    let semi_voiced = char::from_u32(code + 2)?;
    if hiragana {
        katakana_to_hiragana(semi_voiced)
    } else {
        Some(semi_voiced)
    }
}

/// 전각 ASCII -> ASCII (Ａ -> A, １ -> 1, ＠ -> @)
pub fn fold_fullwidth(c: char) -> Option<char> {
    let code = c as u32;
    if !(FULLWIDTH_FIRST..=FULLWIDTH_LAST).contains(&code) {
        return None;
    }
    char::from_u32(code - FULLWIDTH_OFFSET)
}
