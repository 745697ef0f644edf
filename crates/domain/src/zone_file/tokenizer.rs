use crate::errors::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub quoted: bool,
}

/// One logical line: a physical line, or several joined by parentheses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Line the entry starts on (1-based).
    pub line: usize,
    /// The entry started with whitespace, so the owner is inherited.
    pub owner_blank: bool,
    pub tokens: Vec<Token>,
}

struct Tokenizer {
    entries: Vec<Entry>,
    tokens: Vec<Token>,
    current: String,
    line: usize,
    entry_line: usize,
    owner_blank: bool,
    at_line_start: bool,
    paren_depth: usize,
}

impl Tokenizer {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            tokens: Vec::new(),
            current: String::new(),
            line: 1,
            entry_line: 1,
            owner_blank: false,
            at_line_start: true,
            paren_depth: 0,
        }
    }

    fn flush_token(&mut self) {
        if !self.current.is_empty() {
            self.tokens.push(Token {
                text: std::mem::take(&mut self.current),
                quoted: false,
            });
        }
    }

    fn flush_entry(&mut self) {
        self.flush_token();
        if !self.tokens.is_empty() {
            self.entries.push(Entry {
                line: self.entry_line,
                owner_blank: self.owner_blank,
                tokens: std::mem::take(&mut self.tokens),
            });
        }
    }

    fn begin_entry_if_needed(&mut self, c: char) {
        if self.at_line_start && self.paren_depth == 0 && self.tokens.is_empty() {
            self.entry_line = self.line;
            self.owner_blank = c == ' ' || c == '\t';
        }
        self.at_line_start = false;
    }
}

/// Splits zone-file text into logical entries.
///
/// Comments (`;` to end of line) are dropped, quoted strings keep embedded
/// whitespace and `;`, and `\x` inside quotes yields `x`.
pub fn tokenize(text: &str) -> Result<Vec<Entry>, ParseError> {
    let mut state = Tokenizer::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            state.flush_token();
            if state.paren_depth == 0 {
                state.flush_entry();
            }
            state.line += 1;
            state.at_line_start = true;
            continue;
        }

        state.begin_entry_if_needed(c);

        match c {
            ';' => {
                while chars.peek().is_some_and(|next| *next != '\n') {
                    chars.next();
                }
            }
            '(' => {
                state.flush_token();
                state.paren_depth += 1;
            }
            ')' => {
                state.flush_token();
                if state.paren_depth == 0 {
                    return Err(ParseError::malformed(state.line, "unbalanced ')'"));
                }
                state.paren_depth -= 1;
            }
            '"' => {
                state.flush_token();
                let mut quoted = String::new();
                let mut closed = false;
                while let Some(q) = chars.next() {
                    match q {
                        '"' => {
                            closed = true;
                            break;
                        }
                        '\\' => match chars.next() {
                            Some('\n') | None => break,
                            Some(escaped) => quoted.push(escaped),
                        },
                        '\n' => break,
                        other => quoted.push(other),
                    }
                }
                if !closed {
                    return Err(ParseError::UnterminatedQuote { line: state.line });
                }
                state.tokens.push(Token {
                    text: quoted,
                    quoted: true,
                });
            }
            c if c.is_whitespace() => state.flush_token(),
            other => state.current.push(other),
        }
    }

    if state.paren_depth != 0 {
        return Err(ParseError::malformed(state.entry_line, "unbalanced '('"));
    }
    state.flush_entry();

    Ok(state.entries)
}
