use logos::Logos;
use std::fmt;

#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone)]
#[logos(skip r"[ \t\r]+")] // Whitespace (newlines are significant)
#[logos(skip r"#[^\n]*")] // Shell-style comments starting with '#'
pub enum Token {
    // --- Keywords ---
    #[token("const")]
    Const,
    #[token("literal")]
    Literal,
    #[token("symbol")]
    Symbol,
    #[token("assign")]
    AssignKw,

    // --- Statement references ---
    #[regex(r"\$[0-9]+", |lex| lex.slice()[1..].parse().ok())]
    StmtRef(usize),

    // --- Punctuation ---
    #[token("=")]
    Assign,
    #[token(";")]
    Semicolon,
    #[token("\n")]
    Newline,

    /// Names and operator tokens: anything else up to whitespace.
    #[regex(r"[^ \t\r\n$=;#]+", |lex| lex.slice().to_string())]
    Word(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Const => write!(f, "const"),
            Token::Literal => write!(f, "literal"),
            Token::Symbol => write!(f, "symbol"),
            Token::AssignKw => write!(f, "assign"),
            Token::StmtRef(n) => write!(f, "${}", n),
            Token::Assign => write!(f, "="),
            Token::Semicolon => write!(f, ";"),
            Token::Newline => write!(f, "newline"),
            Token::Word(s) => write!(f, "'{}'", s),
        }
    }
}

/// A character no token matches, located for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalError {
    pub location: usize,
    pub line: usize,
    pub column: usize,
    pub unexpected_char: char,
    pub context: String,
}

impl fmt::Display for LexicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unexpected character '{}' at line {}, column {} (position {})\n  Context: {}",
            self.unexpected_char, self.line, self.column, self.location, self.context
        )
    }
}

impl std::error::Error for LexicalError {}

/// 1-based line and column of a byte offset. Columns count characters.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let before = source.get(..offset).unwrap_or(source);
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let line = before.matches('\n').count() + 1;
    (line, before[line_start..].chars().count() + 1)
}

/// The trimmed source line containing `offset`.
pub fn line_text(source: &str, offset: usize) -> &str {
    let offset = offset.min(source.len());
    let start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    let end = source[offset..].find('\n').map_or(source.len(), |i| offset + i);
    source[start..end].trim()
}

fn lexical_error(source: &str, offset: usize) -> LexicalError {
    let (line, column) = line_col(source, offset);
    LexicalError {
        location: offset,
        line,
        column,
        unexpected_char: source.get(offset..).and_then(|rest| rest.chars().next()).unwrap_or('\0'),
        context: line_text(source, offset).to_string(),
    }
}

/// A token with its byte range in the source.
pub type Spanned = (usize, Token, usize);

/// Lex the whole source up front.
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, LexicalError> {
    let mut lexer = Token::lexer(source);
    let mut out = Vec::new();
    while let Some(token) = lexer.next() {
        let span = lexer.span();
        match token {
            Ok(tok) => out.push((span.start, tok, span.end)),
            Err(_) => return Err(lexical_error(source, span.start)),
        }
    }
    Ok(out)
}
