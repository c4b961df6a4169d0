//! The tokenizer's state machine.
//!
//! Scanning is driven by [`transition`], a total function from the current
//! [`State`] and the [`CharClass`] of the next character to the state that
//! follows and the [`Action`] to perform. The character class depends on the
//! current [`Mode`], which is how comments and include literals reinterpret
//! characters without a separate scanner.
//!
//! Every state other than the three mode start states is entered only by a
//! [`Action::Store`], so the buffer is never empty when a flush that does not
//! consume the current character (`AcceptBack1`, `AcceptBack2`) is applied.

/// Sticky scanning mode, carried across characters and (for block comments)
/// across lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Inside `/* ... */`, until the closing `*/`.
    BlockComment,
    /// After `//`, until the end of the line.
    InlineComment,
    /// After `#include`: `<` and `>` delimit a literal.
    IncludeLiteral,
}

impl Mode {
    pub const ALL: [Mode; 4] = [
        Mode::Normal,
        Mode::BlockComment,
        Mode::InlineComment,
        Mode::IncludeLiteral,
    ];

    /// The state scanning restarts from at every token boundary.
    pub fn start_state(self) -> State {
        match self {
            Mode::Normal | Mode::IncludeLiteral => State::Start,
            Mode::BlockComment => State::CommentStart,
            Mode::InlineComment => State::InlineStart,
        }
    }

    /// The mode carried into the next line.
    ///
    /// Inline comments and include directives never outlive their line;
    /// block comments do.
    pub fn at_line_end(self) -> Mode {
        match self {
            Mode::InlineComment | Mode::IncludeLiteral => Mode::Normal,
            other => other,
        }
    }
}

/// Lexical class of one input character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Whitespace,
    /// Alphabetic characters and `_`, except the exponent letters.
    Letter,
    /// `e`, `E`, `p`, `P`: letters that may introduce a signed exponent.
    ExponentLetter,
    Digit,
    Dot,
    DoubleQuote,
    SingleQuote,
    Backslash,
    Hash,
    Slash,
    Star,
    Plus,
    Minus,
    Equals,
    Bang,
    Percent,
    Caret,
    Ampersand,
    Pipe,
    Colon,
    Less,
    Greater,
    /// Always a token of its own: `( ) [ ] { } ; , ? ~`
    Punct,
    /// `<` in include mode.
    AngleOpen,
    /// `>` in include mode.
    AngleClose,
    /// Any character of comment text that has no role in comment scanning.
    CommentChar,
    Other,
    /// Synthetic terminator presented once the whole line has been read.
    EndOfLine,
}

impl CharClass {
    /// Classify `c` as seen in `mode`.
    pub fn classify(c: char, mode: Mode) -> CharClass {
        if c.is_whitespace() {
            return CharClass::Whitespace;
        }
        match mode {
            Mode::InlineComment => CharClass::CommentChar,
            Mode::BlockComment => match c {
                '*' => CharClass::Star,
                '/' => CharClass::Slash,
                '"' => CharClass::DoubleQuote,
                '\\' => CharClass::Backslash,
                _ => CharClass::CommentChar,
            },
            Mode::IncludeLiteral => match c {
                '<' => CharClass::AngleOpen,
                '>' => CharClass::AngleClose,
                _ => Self::classify_code(c),
            },
            Mode::Normal => Self::classify_code(c),
        }
    }

    fn classify_code(c: char) -> CharClass {
        match c {
            'e' | 'E' | 'p' | 'P' => CharClass::ExponentLetter,
            '_' => CharClass::Letter,
            '0'..='9' => CharClass::Digit,
            '.' => CharClass::Dot,
            '"' => CharClass::DoubleQuote,
            '\'' => CharClass::SingleQuote,
            '\\' => CharClass::Backslash,
            '#' => CharClass::Hash,
            '/' => CharClass::Slash,
            '*' => CharClass::Star,
            '+' => CharClass::Plus,
            '-' => CharClass::Minus,
            '=' => CharClass::Equals,
            '!' => CharClass::Bang,
            '%' => CharClass::Percent,
            '^' => CharClass::Caret,
            '&' => CharClass::Ampersand,
            '|' => CharClass::Pipe,
            ':' => CharClass::Colon,
            '<' => CharClass::Less,
            '>' => CharClass::Greater,
            '(' | ')' | '[' | ']' | '{' | '}' | ';' | ',' | '?' | '~' => CharClass::Punct,
            c if c.is_alphabetic() => CharClass::Letter,
            _ => CharClass::Other,
        }
    }
}

/// Scanner states. Dense, with [`State::Start`] at index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum State {
    #[default]
    Start = 0,
    Ident,
    Number,
    /// Number whose last character may start an exponent.
    NumberExp,
    /// Number followed by an exponent letter and a sign.
    NumberSign,
    /// Number followed by a `'` that may be a digit separator.
    NumberQuote,
    Dot,
    DotDot,
    Str,
    StrEscape,
    Char,
    CharEscape,
    Hash,
    Directive,
    Slash,
    Star,
    Plus,
    Minus,
    Arrow,
    Equals,
    Bang,
    Percent,
    Caret,
    Ampersand,
    Pipe,
    Colon,
    Less,
    ShiftLeft,
    LessEq,
    Greater,
    ShiftRight,
    AngleLiteral,
    CommentStart,
    CommentWord,
    CommentStar,
    CommentString,
    CommentStringEscape,
    InlineStart,
    InlineBody,
}

impl State {
    pub const COUNT: usize = 39;

    pub const ALL: [State; State::COUNT] = [
        State::Start,
        State::Ident,
        State::Number,
        State::NumberExp,
        State::NumberSign,
        State::NumberQuote,
        State::Dot,
        State::DotDot,
        State::Str,
        State::StrEscape,
        State::Char,
        State::CharEscape,
        State::Hash,
        State::Directive,
        State::Slash,
        State::Star,
        State::Plus,
        State::Minus,
        State::Arrow,
        State::Equals,
        State::Bang,
        State::Percent,
        State::Caret,
        State::Ampersand,
        State::Pipe,
        State::Colon,
        State::Less,
        State::ShiftLeft,
        State::LessEq,
        State::Greater,
        State::ShiftRight,
        State::AngleLiteral,
        State::CommentStart,
        State::CommentWord,
        State::CommentStar,
        State::CommentString,
        State::CommentStringEscape,
        State::InlineStart,
        State::InlineBody,
    ];

    /// Dense index of this state.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns `true` for the states a mode restarts from.
    pub fn is_start(self) -> bool {
        matches!(self, State::Start | State::CommentStart | State::InlineStart)
    }
}

/// What the tokenizer does with the current character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Append the character to the buffer.
    Store,
    /// Append the character, then flush the buffer as a token.
    Accept,
    /// Flush the buffer; the current character is examined again.
    AcceptBack1,
    /// Return the last buffered character to the input, flush the rest;
    /// that character and the current one are examined again.
    AcceptBack2,
    /// Flush `/*` and enter [`Mode::BlockComment`].
    StartBlockComment,
    /// Flush `//` and enter [`Mode::InlineComment`].
    StartInlineComment,
    /// Flush `#include` and enter [`Mode::IncludeLiteral`].
    StartInclude,
    /// Flush `*/` and leave [`Mode::BlockComment`].
    StopBlockComment,
    /// Skip the character.
    Ignore,
    /// No valid transition. Only produced for class/state pairs that no
    /// mode can present.
    Error,
}

impl Action {
    /// Returns `true` if the action appends the current character to the
    /// buffer before anything else happens.
    pub fn consumes_char(self) -> bool {
        matches!(
            self,
            Action::Store
                | Action::Accept
                | Action::StartBlockComment
                | Action::StartInlineComment
                | Action::StopBlockComment
        )
    }

    /// Returns `true` if the action ends the pending token.
    pub fn flushes(self) -> bool {
        !matches!(self, Action::Store | Action::Ignore | Action::Error)
    }
}

/// Resolve `(state, class)` to the next state and the action to apply.
pub fn transition(state: State, class: CharClass) -> (State, Action) {
    use Action as A;
    use CharClass as C;
    use State as S;

    match state {
        S::Start => match class {
            C::Whitespace | C::EndOfLine => (S::Start, A::Ignore),
            C::Letter | C::ExponentLetter => (S::Ident, A::Store),
            C::Digit => (S::Number, A::Store),
            C::Dot => (S::Dot, A::Store),
            C::DoubleQuote => (S::Str, A::Store),
            C::SingleQuote => (S::Char, A::Store),
            C::Hash => (S::Hash, A::Store),
            C::Slash => (S::Slash, A::Store),
            C::Star => (S::Star, A::Store),
            C::Plus => (S::Plus, A::Store),
            C::Minus => (S::Minus, A::Store),
            C::Equals => (S::Equals, A::Store),
            C::Bang => (S::Bang, A::Store),
            C::Percent => (S::Percent, A::Store),
            C::Caret => (S::Caret, A::Store),
            C::Ampersand => (S::Ampersand, A::Store),
            C::Pipe => (S::Pipe, A::Store),
            C::Colon => (S::Colon, A::Store),
            C::Less => (S::Less, A::Store),
            C::Greater => (S::Greater, A::Store),
            C::AngleOpen => (S::AngleLiteral, A::Store),
            C::Punct | C::AngleClose | C::Backslash | C::Other => (S::Start, A::Accept),
            C::CommentChar => (S::Start, A::Error),
        },

        S::Ident => match class {
            C::Letter | C::ExponentLetter | C::Digit => (S::Ident, A::Store),
            C::CommentChar => (S::Start, A::Error),
            _ => (S::Start, A::AcceptBack1),
        },

        S::Number => match class {
            C::Digit | C::Letter | C::Dot => (S::Number, A::Store),
            C::ExponentLetter => (S::NumberExp, A::Store),
            C::SingleQuote => (S::NumberQuote, A::Store),
            C::CommentChar => (S::Start, A::Error),
            _ => (S::Start, A::AcceptBack1),
        },
        S::NumberExp => match class {
            C::Plus | C::Minus => (S::NumberSign, A::Store),
            C::Digit | C::Letter | C::Dot => (S::Number, A::Store),
            C::ExponentLetter => (S::NumberExp, A::Store),
            C::SingleQuote => (S::NumberQuote, A::Store),
            C::CommentChar => (S::Start, A::Error),
            _ => (S::Start, A::AcceptBack1),
        },
        // `1'000` and `0xFF'FF`: a quote between digits is a separator,
        // anything else hands the quote back as the start of a char literal.
        S::NumberQuote => match class {
            C::Digit | C::Letter => (S::Number, A::Store),
            C::ExponentLetter => (S::NumberExp, A::Store),
            C::CommentChar => (S::Start, A::Error),
            _ => (S::Start, A::AcceptBack2),
        },
        // `1e+` must be followed by a digit; otherwise hand the sign back.
        S::NumberSign => match class {
            C::Digit => (S::Number, A::Store),
            C::CommentChar => (S::Start, A::Error),
            _ => (S::Start, A::AcceptBack2),
        },

        S::Dot => match class {
            C::Digit => (S::Number, A::Store),
            C::Dot => (S::DotDot, A::Store),
            C::Star => (S::Start, A::Accept),
            C::CommentChar => (S::Start, A::Error),
            _ => (S::Start, A::AcceptBack1),
        },
        // `..` is not a token: emit the first `.` and rescan the second.
        S::DotDot => match class {
            C::Dot => (S::Start, A::Accept),
            C::CommentChar => (S::Start, A::Error),
            _ => (S::Start, A::AcceptBack2),
        },

        S::Str => match class {
            C::DoubleQuote => (S::Start, A::Accept),
            C::Backslash => (S::StrEscape, A::Store),
            C::EndOfLine => (S::Start, A::AcceptBack1),
            C::CommentChar => (S::Start, A::Error),
            _ => (S::Str, A::Store),
        },
        S::StrEscape => match class {
            C::EndOfLine => (S::Start, A::AcceptBack1),
            C::CommentChar => (S::Start, A::Error),
            _ => (S::Str, A::Store),
        },
        S::Char => match class {
            C::SingleQuote => (S::Start, A::Accept),
            C::Backslash => (S::CharEscape, A::Store),
            C::EndOfLine => (S::Start, A::AcceptBack1),
            C::CommentChar => (S::Start, A::Error),
            _ => (S::Char, A::Store),
        },
        S::CharEscape => match class {
            C::EndOfLine => (S::Start, A::AcceptBack1),
            C::CommentChar => (S::Start, A::Error),
            _ => (S::Char, A::Store),
        },

        S::Hash => match class {
            C::Hash => (S::Start, A::Accept),
            C::Letter | C::ExponentLetter => (S::Directive, A::Store),
            C::CommentChar => (S::Start, A::Error),
            _ => (S::Start, A::AcceptBack1),
        },
        S::Directive => match class {
            C::Letter | C::ExponentLetter | C::Digit => (S::Directive, A::Store),
            C::CommentChar => (S::Start, A::Error),
            _ => (S::Start, A::AcceptBack1),
        },

        S::Slash => match class {
            C::Slash => (S::InlineStart, A::StartInlineComment),
            C::Star => (S::CommentStart, A::StartBlockComment),
            C::Equals => (S::Start, A::Accept),
            C::CommentChar => (S::Start, A::Error),
            _ => (S::Start, A::AcceptBack1),
        },

        S::Minus => match class {
            C::Minus | C::Equals => (S::Start, A::Accept),
            C::Greater => (S::Arrow, A::Store),
            C::CommentChar => (S::Start, A::Error),
            _ => (S::Start, A::AcceptBack1),
        },
        S::Arrow => match class {
            C::Star => (S::Start, A::Accept),
            C::CommentChar => (S::Start, A::Error),
            _ => (S::Start, A::AcceptBack1),
        },

        S::Less => match class {
            C::Less => (S::ShiftLeft, A::Store),
            C::Equals => (S::LessEq, A::Store),
            C::CommentChar => (S::Start, A::Error),
            _ => (S::Start, A::AcceptBack1),
        },
        S::LessEq => match class {
            C::Greater => (S::Start, A::Accept),
            C::CommentChar => (S::Start, A::Error),
            _ => (S::Start, A::AcceptBack1),
        },
        S::Greater => match class {
            C::Greater => (S::ShiftRight, A::Store),
            C::Equals => (S::Start, A::Accept),
            C::CommentChar => (S::Start, A::Error),
            _ => (S::Start, A::AcceptBack1),
        },

        // Operators whose only continuation completes the token.
        S::Star | S::Plus | S::Equals | S::Bang | S::Percent | S::Caret | S::Ampersand
        | S::Pipe | S::Colon | S::ShiftLeft | S::ShiftRight => {
            if class == C::CommentChar {
                (S::Start, A::Error)
            } else if closes_operator(state, class) {
                (S::Start, A::Accept)
            } else {
                (S::Start, A::AcceptBack1)
            }
        }

        S::AngleLiteral => match class {
            C::AngleClose => (S::Start, A::Accept),
            C::EndOfLine => (S::Start, A::AcceptBack1),
            C::CommentChar => (S::Start, A::Error),
            _ => (S::AngleLiteral, A::Store),
        },

        S::CommentStart => match class {
            C::Whitespace | C::EndOfLine => (S::CommentStart, A::Ignore),
            C::Star => (S::CommentStar, A::Store),
            C::DoubleQuote => (S::CommentString, A::Store),
            C::Slash | C::Backslash | C::CommentChar => (S::CommentWord, A::Store),
            _ => (S::CommentStart, A::Error),
        },
        S::CommentWord => match class {
            C::Slash | C::Backslash | C::CommentChar => (S::CommentWord, A::Store),
            C::Star | C::Whitespace | C::DoubleQuote | C::EndOfLine => {
                (S::CommentStart, A::AcceptBack1)
            }
            _ => (S::CommentStart, A::Error),
        },
        S::CommentStar => match class {
            C::Slash => (S::Start, A::StopBlockComment),
            C::Backslash | C::CommentChar => (S::CommentWord, A::Store),
            C::Star | C::Whitespace | C::DoubleQuote | C::EndOfLine => {
                (S::CommentStart, A::AcceptBack1)
            }
            _ => (S::CommentStart, A::Error),
        },
        S::CommentString => match class {
            C::DoubleQuote => (S::CommentStart, A::Accept),
            C::Backslash => (S::CommentStringEscape, A::Store),
            C::EndOfLine => (S::CommentStart, A::AcceptBack1),
            C::Whitespace | C::Star | C::Slash | C::CommentChar => (S::CommentString, A::Store),
            _ => (S::CommentStart, A::Error),
        },
        S::CommentStringEscape => match class {
            C::EndOfLine => (S::CommentStart, A::AcceptBack1),
            C::Whitespace | C::Star | C::Slash | C::DoubleQuote | C::Backslash | C::CommentChar => {
                (S::CommentString, A::Store)
            }
            _ => (S::CommentStart, A::Error),
        },

        S::InlineStart => match class {
            C::Whitespace | C::EndOfLine => (S::InlineStart, A::Ignore),
            C::CommentChar => (S::InlineBody, A::Store),
            _ => (S::InlineStart, A::Error),
        },
        S::InlineBody => match class {
            C::Whitespace | C::CommentChar => (S::InlineBody, A::Store),
            C::EndOfLine => (S::InlineStart, A::AcceptBack1),
            _ => (S::InlineStart, A::Error),
        },
    }
}

/// Second characters that complete a two-character operator.
fn closes_operator(state: State, class: CharClass) -> bool {
    use CharClass as C;

    match state {
        State::Plus => matches!(class, C::Plus | C::Equals),
        State::Ampersand => matches!(class, C::Ampersand | C::Equals),
        State::Pipe => matches!(class, C::Pipe | C::Equals),
        State::Colon => class == C::Colon,
        _ => class == C::Equals,
    }
}

/// [`transition`] plus the one buffer-dependent rule: a directive that
/// spells `#include` switches the scanner into include mode.
pub fn step(state: State, class: CharClass, pending: &str) -> (State, Action) {
    let (next, action) = transition(state, class);
    if state == State::Directive && action == Action::AcceptBack1 && pending == "#include" {
        return (State::Start, Action::StartInclude);
    }
    (next, action)
}

/// The mode that holds after applying `action` in `state`.
pub fn next_mode(mode: Mode, state: State, action: Action) -> Mode {
    match action {
        Action::StartBlockComment => Mode::BlockComment,
        Action::StartInlineComment => Mode::InlineComment,
        Action::StartInclude => Mode::IncludeLiteral,
        Action::StopBlockComment if mode == Mode::BlockComment => Mode::Normal,
        Action::Accept
            if mode == Mode::IncludeLiteral
                && matches!(state, State::AngleLiteral | State::Str) =>
        {
            Mode::Normal
        }
        _ => mode,
    }
}
