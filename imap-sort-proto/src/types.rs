use std::fmt;

mod capabilities;

pub use self::capabilities::{Capabilities, CapabilityOracle};

/// Protocol extensions the SORT family of commands depends on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Extension {
    /// [RFC 5256](https://tools.ietf.org/html/rfc5256): base `SORT` and `UID SORT`.
    Sort,
    /// [RFC 5267](https://tools.ietf.org/html/rfc5267): `RETURN` result options.
    Esort,
    /// [RFC 5267](https://tools.ietf.org/html/rfc5267): partial and updating results.
    ContextSort,
}

impl Extension {
    /// The capability atom a server advertises for this extension.
    pub fn name(self) -> &'static str {
        match self {
            Extension::Sort => "SORT",
            Extension::Esort => "ESORT",
            Extension::ContextSort => "CONTEXT=SORT",
        }
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single argument of a command, in emission order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Token {
    Atom(String),
    Number(u32),
    /// A parenthesized group of tokens.
    List(Vec<Token>),
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Token::Atom(s.to_string())
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        Token::Atom(s)
    }
}

impl From<u32> for Token {
    fn from(n: u32) -> Self {
        Token::Number(n)
    }
}

impl<T: Into<Token>> From<Vec<T>> for Token {
    fn from(items: Vec<T>) -> Self {
        Token::List(items.into_iter().map(Into::into).collect())
    }
}

/// Sort criteria from [RFC 5256 section 3](https://tools.ietf.org/html/rfc5256#section-3)
/// and [RFC 5957](https://tools.ietf.org/html/rfc5957).
///
/// Address keys (`Cc`, `From`, `To`) sort by the addr-mailbox of the first
/// address; the display variants sort by display name instead.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum SortKey {
    Arrival,
    Cc,
    Date,
    From,
    Size,
    Subject,
    To,
    DisplayFrom,
    DisplayTo,
    /// Reverses the order of the wrapped key.
    Reverse(Box<SortKey>),
}

impl SortKey {
    pub fn reverse(self) -> SortKey {
        SortKey::Reverse(Box::new(self))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Arrival => f.write_str("ARRIVAL"),
            SortKey::Cc => f.write_str("CC"),
            SortKey::Date => f.write_str("DATE"),
            SortKey::From => f.write_str("FROM"),
            SortKey::Size => f.write_str("SIZE"),
            SortKey::Subject => f.write_str("SUBJECT"),
            SortKey::To => f.write_str("TO"),
            SortKey::DisplayFrom => f.write_str("DISPLAYFROM"),
            SortKey::DisplayTo => f.write_str("DISPLAYTO"),
            SortKey::Reverse(key) => write!(f, "REVERSE {}", key),
        }
    }
}

/// Result options for `SORT ... RETURN (...)`, see
/// [RFC 5267 section 3.2](https://tools.ietf.org/html/rfc5267#section-3.2).
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ReturnOption {
    /// All matching messages, in sort order, as a sequence-set.
    All,
    Count,
    /// The highest sorted matching message.
    Max,
    /// The lowest sorted matching message.
    Min,
    /// A window of the sorted result, 1-based and inclusive. Needs CONTEXT=SORT.
    Partial(u32, u32),
    /// Needs CONTEXT=SORT.
    Update,
    /// Needs CONTEXT=SORT.
    Context,
}

impl fmt::Display for ReturnOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnOption::All => f.write_str("ALL"),
            ReturnOption::Count => f.write_str("COUNT"),
            ReturnOption::Max => f.write_str("MAX"),
            ReturnOption::Min => f.write_str("MIN"),
            ReturnOption::Partial(first, last) => write!(f, "PARTIAL {}:{}", first, last),
            ReturnOption::Update => f.write_str("UPDATE"),
            ReturnOption::Context => f.write_str("CONTEXT"),
        }
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Ok,
    No,
    Bad,
    PreAuth,
    Bye,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Ok => "OK",
            Status::No => "NO",
            Status::Bad => "BAD",
            Status::PreAuth => "PREAUTH",
            Status::Bye => "BYE",
        })
    }
}

#[derive(Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Response<'a> {
    Capabilities(Vec<&'a str>),
    Continue {
        code: Option<ResponseCode<'a>>,
        information: Option<&'a str>,
    },
    Done {
        tag: RequestId,
        status: Status,
        code: Option<ResponseCode<'a>>,
        information: Option<&'a str>,
    },
    Data {
        status: Status,
        code: Option<ResponseCode<'a>>,
        information: Option<&'a str>,
    },
    /// Any other untagged response, such as `* SORT 2 3 6` or
    /// `* ESEARCH (TAG "A1") UID ALL 1:3`. The payload is left unparsed.
    Untagged {
        number: Option<u32>,
        name: &'a str,
        payload: &'a [u8],
    },
}

impl<'a> Response<'a> {
    pub fn from_bytes(buf: &'a [u8]) -> crate::ParseResult<'a> {
        crate::parser::parse_response(buf)
    }
}

#[derive(Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ResponseCode<'a> {
    Alert,
    BadCharset(Option<Vec<&'a str>>),
    Capabilities(Vec<&'a str>),
    Other {
        name: &'a str,
        value: Option<&'a str>,
    },
}
