mod cursor;
mod lexer_error;
mod token;


use cursor::Cursor;
pub use lexer_error::{InnerLexError, LexError, Result};
pub use token::{Token, TokenKind};

pub type Tokens<'a> = Vec<Token<'a>>;

/// Reserved words and operators, tried in order. Every two-character entry
/// precedes the one-character entries sharing its prefix, which makes the
/// linear scan equivalent to longest match. Keywords listed here win over
/// identifier scanning even mid-word: `iffy` lexes as `if` + `fy`.
const RESERVED: [(&str, TokenKind); 21] = [
    ("==", TokenKind::IsEqual),
    ("!=", TokenKind::IsNotEqual),
    ("<=", TokenKind::IsLessThanOrEqual),
    (">=", TokenKind::IsGreaterThanOrEqual),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("while", TokenKind::While),
    ("for", TokenKind::For),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Hyphen),
    ("*", TokenKind::Asterisk),
    ("/", TokenKind::FSlash),
    ("(", TokenKind::OpenParanth),
    (")", TokenKind::CloseParanth),
    ("<", TokenKind::IsLessThan),
    (">", TokenKind::IsGreaterThan),
    ("=", TokenKind::Assign),
    (";", TokenKind::Semicolon),
    ("{", TokenKind::OpenCurly),
    ("}", TokenKind::CloseCurly),
    (",", TokenKind::Comma),
];

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continuation(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn lex_reserved<'a>(cursor: &mut Cursor<'a>) -> Option<Token<'a>> {
    let line = cursor.line();
    for (symbol, kind) in RESERVED {
        if let Some(text) = cursor.eat_symbol(symbol) {
            return Some(Token { kind, text, line });
        }
    }
    None
}

fn lex_constant<'a>(cursor: &mut Cursor<'a>) -> Result<Token<'a>> {
    let line = cursor.line();
    let text = cursor.eat_while(|c| c.is_ascii_digit());
    let value = text
        .parse()
        .map_err(|_| InnerLexError::BadConstant(text.to_owned()).set_line(line))?;

    Ok(Token {
        kind: TokenKind::Num(value),
        text,
        line,
    })
}

/// `return` takes a one-character lookahead so that `returns` stays an
/// identifier. The lookahead treats digits as identifier continuation, so
/// `return5` is the identifier `return` followed by the constant `5`.
fn lex_return_or_identifier<'a>(cursor: &mut Cursor<'a>) -> Token<'a> {
    let line = cursor.line();
    let rest = cursor.rest();
    if rest.starts_with("return") && !rest[6..].starts_with(is_ident_continuation) {
        let text = cursor.eat_symbol("return").expect("Should never fail");
        return Token {
            kind: TokenKind::Return,
            text,
            line,
        };
    }

    let text = cursor.eat_while(is_ident_char);
    Token {
        kind: TokenKind::Ident,
        text,
        line,
    }
}

pub fn lex(source: &str) -> Result<Tokens<'_>> {
    let mut tokens = Tokens::new();
    let mut cursor = Cursor::new(source);

    loop {
        cursor.skip_whitespaces();
        let Some(next) = cursor.peek() else { break };

        if let Some(token) = lex_reserved(&mut cursor) {
            tokens.push(token);
            continue;
        }

        match next {
            '0'..='9' => tokens.push(lex_constant(&mut cursor)?),
            'a'..='z' | 'A'..='Z' | '_' => tokens.push(lex_return_or_identifier(&mut cursor)),
            c => return Err(InnerLexError::UnexpectedChar(c).set_line(cursor.line())),
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        text: "",
        line: cursor.line(),
    });

    Ok(tokens)
}
