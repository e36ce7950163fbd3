/// One lexical unit together with the exact source slice it covers.
///
/// `text` borrows from the compilation unit's source buffer, so re-joining
/// the slices of a token stream reproduces the significant characters of
/// the input. `line` is attached for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub line: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// integer literal with its parsed value
    Num(i64),
    /// variable or function name
    Ident,
    /// return keyword
    Return,
    /// if keyword
    If,
    /// else keyword
    Else,
    /// while keyword
    While,
    /// for keyword
    For,
    /// (
    OpenParanth,
    /// )
    CloseParanth,
    /// {
    OpenCurly,
    /// }
    CloseCurly,
    /// ;
    Semicolon,
    /// ,
    Comma,
    /// +
    Plus,
    /// -
    Hyphen,
    /// *
    Asterisk,
    /// /
    FSlash,
    /// =
    Assign,
    /// ==
    IsEqual,
    /// !=
    IsNotEqual,
    /// <
    IsLessThan,
    /// <=
    IsLessThanOrEqual,
    /// >
    IsGreaterThan,
    /// >=
    IsGreaterThanOrEqual,
    /// end of input
    Eof,
}

impl Token<'_> {
    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}
