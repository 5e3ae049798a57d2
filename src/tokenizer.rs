use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // Keywords
    Begin,
    End,
    Read,
    Write,

    // Literals
    Identifier(String),
    Int(i64),

    // Operators
    Assign,
    Plus,
    Minus,
    LeftParen,
    RightParen,
    Comma,
    Semicolon,

    // End of file
    Eof,

    // Anything the scanner cannot place; rejected by the parser instead
    Unknown(String),
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Begin => write!(f, "BEGIN"),
            Token::End => write!(f, "END"),
            Token::Read => write!(f, "READ"),
            Token::Write => write!(f, "WRITE"),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Int(value) => write!(f, "{}", value),
            Token::Assign => write!(f, ":="),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Semicolon => write!(f, ";"),
            Token::Eof => write!(f, "end of file"),
            Token::Unknown(text) => write!(f, "{}", text),
        }
    }
}

pub struct Tokenizer<'a> {
    source: &'a str,
    index: usize,
    done: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            index: 0,
            done: false,
        }
    }

    /// Pulls the next token and advances. Keeps returning `Eof` once the
    /// end of the source has been reached.
    pub fn next_token(&mut self) -> Token {
        if self.done {
            return Token::Eof;
        }

        let rest = self.source[self.index..].trim_start();
        self.index = self.source.len() - rest.len();

        if rest.is_empty() {
            self.done = true;
            return Token::Eof;
        }

        let (token, len) = scan(rest);
        self.index += len;
        token
    }
}

/// Collects every token of `source`, `Eof` included.
pub fn tokens(source: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = tokenizer.next_token();
        let done = token == Token::Eof;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

// Recognition order matters: keywords before identifiers, a signed integer
// before the bare `+`/`-` symbols, and `:=` before any shorter match.
fn scan(source: &str) -> (Token, usize) {
    if let Some(m) = keyword(source) {
        return m;
    }
    if let Some(m) = integer(source) {
        return m;
    }
    if let Some(m) = identifier(source) {
        return m;
    }
    if let Some(m) = symbol(source) {
        return m;
    }
    if let Some(rest) = source.strip_prefix(';') {
        return (Token::Semicolon, source.len() - rest.len());
    }
    unknown(source)
}

fn keyword(source: &str) -> Option<(Token, usize)> {
    let words = [
        ("BEGIN", Token::Begin),
        ("END", Token::End),
        ("READ", Token::Read),
        ("WRITE", Token::Write),
    ];
    words
        .into_iter()
        .find(|(word, _)| source.starts_with(word))
        .map(|(word, token)| (token, word.len()))
}

fn integer(source: &str) -> Option<(Token, usize)> {
    let first = source.chars().next()?;
    let sign = usize::from(first == '+' || first == '-');
    let digits = source[sign..]
        .chars()
        .take_while(char::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }

    // Multi-digit runs must not start with 0; "0" alone is fine.
    let run = &source[sign..sign + digits];
    if digits > 1 && run.starts_with('0') {
        return None;
    }

    let text = &source[..sign + digits];
    let value = text.parse().ok()?;
    Some((Token::Int(value), text.len()))
}

fn identifier(source: &str) -> Option<(Token, usize)> {
    let first = source.chars().next()?;
    if !first.is_ascii_alphabetic() && first != '_' && first != '$' {
        return None;
    }

    let len = source
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
        .count();
    Some((Token::Identifier(source[..len].to_string()), len))
}

fn symbol(source: &str) -> Option<(Token, usize)> {
    let symbols = [
        (":=", Token::Assign),
        ("+", Token::Plus),
        ("-", Token::Minus),
        ("(", Token::LeftParen),
        (")", Token::RightParen),
        (",", Token::Comma),
    ];
    symbols
        .into_iter()
        .find(|(text, _)| source.starts_with(text))
        .map(|(text, token)| (token, text.len()))
}

fn unknown(source: &str) -> (Token, usize) {
    let len: usize = source
        .chars()
        .take_while(|c| !c.is_whitespace())
        .map(char::len_utf8)
        .sum();
    (Token::Unknown(source[..len].to_string()), len)
}
