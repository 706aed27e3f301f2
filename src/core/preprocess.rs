//! 변환 전처리: 탁점 합성 -> 반복 부호 해석 -> 직접 치환
//!
//! 세 단계는 항상 이 순서로 실행된다. 반복 부호는 합성된 글자를 복사해야 하고,
//! 치환으로 생긴 가나(ヿ -> コト)는 다시 해석하지 않는다.
//!
//! 결과는 `Token` 목록이다. 문자표 치환으로 만들어진 문장 부호, 공백,
//! 전각에서 바꾼 ASCII는 `Literal`이 되어 미지 문자 정책을 거치지 않는다.

use crate::core::table::LookupTable;
use crate::core::unicode::{fold_fullwidth, semi_voiced, voiced};

/// 전처리 결과 한 단위
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// FSM이 분류할 문자 (position은 원문 기준 문자 위치)
    Glyph { glyph: char, position: usize },
    /// 문자표가 만든 출력 문자 (그대로 출력)
    Literal(char),
    /// 입력 끝 (전처리는 만들지 않음, FSM의 `finish`가 넣음)
    End,
}

/// 원문 위치가 붙은 문자
type Positioned = (char, usize);

/// 원문 문자열을 토큰 목록으로 변환
pub fn preprocess(table: &LookupTable, raw: &str) -> Vec<Token> {
    let chars: Vec<Positioned> = raw.chars().enumerate().map(|(i, c)| (c, i)).collect();
    let composed = normalize_dakuten(table, &chars);
    let resolved = resolve_repeaters(table, &composed);
    substitute(table, &resolved)
}

/// 탁점/반탁점을 앞 글자와 합성 (か + ゛ -> が)
/// 합성할 수 없으면 부호를 그대로 둔다
fn normalize_dakuten(table: &LookupTable, chars: &[Positioned]) -> Vec<Positioned> {
    let mut result: Vec<Positioned> = Vec::with_capacity(chars.len());

    for &(c, position) in chars {
        let merged = result.last().and_then(|&(prev, _)| {
            if table.is_dakuten(c) {
                voiced(prev)
            } else if table.is_handakuten(c) {
                semi_voiced(prev)
            } else {
                None
            }
        });
        match merged {
            Some(m) => {
                if let Some(last) = result.last_mut() {
                    last.0 = m;
                }
            }
            None => result.push((c, position)),
        }
    }

    result
}

/// 반복 부호를 앞 글자로 치환 (さゝ -> ささ, サヾ -> サザ)
fn resolve_repeaters(table: &LookupTable, chars: &[Positioned]) -> Vec<Positioned> {
    let mut result: Vec<Positioned> = Vec::with_capacity(chars.len());

    for &(c, position) in chars {
        let prev = result.last().map(|&(p, _)| p);
        let replacement = match prev {
            Some(p) if table.is_repeater(c) => Some(p),
            // 탁음이 불가능하면 그냥 복사
            Some(p) if table.is_dakuten_repeater(c) => Some(voiced(p).unwrap_or(p)),
            _ => None,
        };
        result.push((replacement.unwrap_or(c), position));
    }

    result
}

/// 문장 부호, 괄호, 따옴표, 전각 ASCII 등을 직접 치환
///
/// 문장 부호 뒤에는 공백을 하나 넣는다. 단, 문장 부호가 이어지면 마지막
/// 하나에만 넣고, 입력 끝에서는 넣지 않는다.
fn substitute(table: &LookupTable, chars: &[Positioned]) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::with_capacity(chars.len());
    // 열린 따옴표
    let mut open_quotes: Vec<char> = Vec::new();

    for (i, &(c, position)) in chars.iter().enumerate() {
        if table.is_quote(c) {
            let text = table.substitution(c).map_or("", |s| s.text);
            if let Some(index) = open_quotes.iter().position(|&q| q == c) {
                open_quotes.remove(index);
                push_literals(&mut tokens, text);
                tokens.push(Token::Literal(' '));
            } else {
                let closed_later = chars[i + 1..].iter().any(|&(n, _)| n == c);
                tokens.push(Token::Literal(' '));
                push_literals(&mut tokens, text);
                if closed_later {
                    open_quotes.push(c);
                } else {
                    // 짝이 없으면 양쪽에 공백
                    tokens.push(Token::Literal(' '));
                }
            }
            continue;
        }

        if let Some(substitution) = table.substitution(c) {
            for s in substitution.text.chars() {
                // 합자(ヿ, ゟ)가 만든 가나는 FSM으로
                if table.class_of(s).is_some() {
                    tokens.push(Token::Glyph { glyph: s, position });
                } else {
                    tokens.push(Token::Literal(s));
                }
            }

            if substitution.sentence_end {
                let next_is_punct = chars
                    .get(i + 1)
                    .and_then(|&(n, _)| table.substitution(n))
                    .map_or(false, |s| s.sentence_end);
                if !next_is_punct && i + 1 < chars.len() {
                    tokens.push(Token::Literal(' '));
                }
            }
            continue;
        }

        match fold_fullwidth(c) {
            Some(folded) => tokens.push(Token::Literal(folded)),
            None => tokens.push(Token::Glyph { glyph: c, position }),
        }
    }

    tokens
}

fn push_literals(tokens: &mut Vec<Token>, text: &str) {
    tokens.extend(text.chars().map(Token::Literal));
}
