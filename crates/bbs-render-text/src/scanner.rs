//! Escape-sequence scanner.
//!
//! A single forward pass over the input, driven by an explicit state machine.
//! No backtracking: every character is examined once, so scanning is linear.
//!
//! Recognized sequences:
//! - CSI: `ESC [` parameter/intermediate bytes (0x20-0x3F), final byte (0x40-0x7E)
//! - String commands: OSC (`ESC ]`) ends with BEL or `ESC \`; DCS (`ESC P`),
//!   SOS (`ESC X`), PM (`ESC ^`) and APC (`ESC _`) end with `ESC \` only and
//!   carry ASCII bodies
//! - Two-character escapes `ESC <0x30-0x7E>` and `ESC <0x20-0x2F>... <final>`
//!
//! Sequence boundaries match the VT500 state table used by `vte`, so a
//! terminal consumes exactly the bytes the scanner calls a sequence. CAN and
//! SUB abort any sequence.
//!
//! Anything else starting with ESC is *malformed*: the scanner emits it as a
//! literal token that includes the offending character and resumes in the
//! normal state right after it. A sequence still open at end of input is
//! emitted as an *unterminated* literal token.

const ESC: char = '\x1b';
const BEL: char = '\x07';
const CAN: char = '\x18';
const SUB: char = '\x1a';

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Plain text
    Normal,
    /// ESC consumed, sequence type not yet known
    EscapeSeen,
    /// `ESC <intermediate>` waiting for a final byte
    Intermediate,
    /// Inside a CSI, collecting parameter and intermediate bytes
    ParameterBytes,
    /// Inside a string command, waiting for its terminator
    CommandBody,
    /// ESC seen inside a string command; only `\` completes it
    CommandEscape,
}

/// Kind of a complete escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    /// Control Sequence Introducer (`ESC [`)
    Csi,
    /// String command (OSC, DCS, SOS, PM, APC)
    Command,
    /// Short escape (`ESC` + final, optionally with intermediates)
    Escape,
}

/// What a token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Printable text with no ESC
    Text,
    /// A complete, recognized escape sequence
    Sequence(SequenceKind),
    /// ESC-introduced bytes that do not form a valid sequence; kept literally
    Malformed,
    /// A sequence cut off by end of input; kept literally
    Unterminated,
}

/// A slice of the input classified by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Classification
    pub kind: TokenKind,
    /// Raw slice of the input
    pub text: &'a str,
    /// Byte offset of the slice in the input
    pub offset: usize,
}

impl<'a> Token<'a> {
    /// Whether this token is visible text once sequences are removed.
    pub fn is_literal(&self) -> bool {
        !matches!(self.kind, TokenKind::Sequence(_))
    }

    /// Parameter string of an SGR sequence (`ESC [ params m`), if this is one.
    ///
    /// Private-mode CSIs ending in `m` (e.g. `ESC [ > 4 m`) are not SGR.
    pub fn sgr_params(&self) -> Option<&'a str> {
        if self.kind != TokenKind::Sequence(SequenceKind::Csi) {
            return None;
        }
        let body = self.text.strip_prefix("\x1b[")?.strip_suffix('m')?;
        body.bytes()
            .all(|b| b.is_ascii_digit() || b == b';' || b == b':')
            .then_some(body)
    }
}

/// Iterator over the tokens of a string.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Scan `input` from the beginning.
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn emit(&mut self, kind: TokenKind, start: usize, end: usize) -> Token<'a> {
        self.pos = end;
        Token {
            kind,
            text: &self.input[start..end],
            offset: start,
        }
    }

    /// Scan one escape sequence starting at `start` (which holds ESC).
    fn scan_sequence(&mut self, start: usize) -> Token<'a> {
        let rest = &self.input[start..];
        let mut state = State::Normal;
        let mut kind = SequenceKind::Escape;
        let mut osc = false;

        for (offset, c) in rest.char_indices() {
            let next = start + offset + c.len_utf8();
            state = match (state, c) {
                (State::Normal, ESC) => State::EscapeSeen,
                (State::EscapeSeen, '[') => {
                    kind = SequenceKind::Csi;
                    State::ParameterBytes
                }
                (State::EscapeSeen, ']' | 'P' | 'X' | '^' | '_') => {
                    kind = SequenceKind::Command;
                    osc = c == ']';
                    State::CommandBody
                }
                (State::EscapeSeen | State::Intermediate, '\x20'..='\x2f') => State::Intermediate,
                (State::EscapeSeen | State::Intermediate, '\x30'..='\x7e') => {
                    return self.emit(TokenKind::Sequence(kind), start, next);
                }

                (State::ParameterBytes, '\x20'..='\x3f') => State::ParameterBytes,
                (State::ParameterBytes, '\x40'..='\x7e') => {
                    return self.emit(TokenKind::Sequence(kind), start, next);
                }

                (State::CommandBody, BEL) if osc => {
                    return self.emit(TokenKind::Sequence(kind), start, next);
                }
                (State::CommandBody, ESC) => State::CommandEscape,
                (State::CommandBody, c) if c != CAN && c != SUB && (osc || c.is_ascii()) => {
                    State::CommandBody
                }
                (State::CommandEscape, '\\') => {
                    return self.emit(TokenKind::Sequence(kind), start, next);
                }

                _ => return self.emit(TokenKind::Malformed, start, next),
            };
        }

        let end = self.input.len();
        self.emit(TokenKind::Unterminated, start, end)
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let start = self.pos;
        let rest = self.input.get(start..).filter(|r| !r.is_empty())?;

        if rest.starts_with(ESC) {
            return Some(self.scan_sequence(start));
        }

        let end = rest.find(ESC).map_or(self.input.len(), |i| start + i);
        Some(self.emit(TokenKind::Text, start, end))
    }
}

/// Tokenize a string.
pub fn scan(input: &str) -> Scanner<'_> {
    Scanner::new(input)
}
