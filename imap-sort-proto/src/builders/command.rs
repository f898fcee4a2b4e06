use std::fmt;

use crate::error::Error;
use crate::helpers::is_ascii;
use crate::types::{CapabilityOracle, Extension, Token};

pub struct CommandBuilder {}

impl CommandBuilder {
    pub fn capability() -> Command {
        Command {
            verb: "CAPABILITY",
            tokens: Vec::new(),
        }
    }

    /// Starts a SORT command for a session with the given capabilities.
    ///
    /// Fails if the session does not advertise SORT at all.
    pub fn sort<C: CapabilityOracle>(capabilities: C) -> Result<SortCommandBuilder<C>, Error> {
        SortCommandBuilder::new(capabilities)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Command {
    verb: &'static str,
    tokens: Vec<Token>,
}

impl Command {
    pub fn verb(&self) -> &'static str {
        self.verb
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_parts(self) -> (&'static str, Vec<Token>) {
        let Command { verb, tokens } = self;
        (verb, tokens)
    }
}

/// Arguments of a single `SORT` or `UID SORT` invocation.
///
/// `criteria` is an already formatted search-key string. An empty
/// `charset` is inferred from the criteria when the command is built.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortRequest {
    pub criteria: String,
    pub charset: String,
    pub use_uid: bool,
    pub sort_keys: Vec<String>,
    pub limit: String,
    pub return_options: Vec<String>,
}

impl Default for SortRequest {
    fn default() -> Self {
        Self {
            criteria: "ALL".to_string(),
            charset: String::new(),
            use_uid: true,
            sort_keys: Vec::new(),
            limit: String::new(),
            return_options: Vec::new(),
        }
    }
}

impl SortRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criteria(mut self, criteria: impl Into<String>) -> Self {
        self.criteria = criteria.into();
        self
    }

    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    pub fn uid(mut self, use_uid: bool) -> Self {
        self.use_uid = use_uid;
        self
    }

    /// Appends a sort key; earlier keys take precedence over later ones.
    pub fn sort_key(mut self, key: impl fmt::Display) -> Self {
        self.sort_keys.push(key.to_string());
        self
    }

    pub fn limit(mut self, sequence_set: impl Into<String>) -> Self {
        self.limit = sequence_set.into();
        self
    }

    pub fn return_option(mut self, option: impl fmt::Display) -> Self {
        self.return_options.push(option.to_string());
        self
    }

    /// The search criteria sent to the server: `ALL` when unset or `*`.
    pub fn effective_criteria(&self) -> &str {
        if self.criteria.is_empty() || self.criteria == "*" {
            "ALL"
        } else {
            &self.criteria
        }
    }

    /// The upper-cased charset, or one inferred from the effective criteria.
    pub fn effective_charset(&self) -> String {
        if !self.charset.is_empty() {
            self.charset.to_ascii_uppercase()
        } else if is_ascii(self.effective_criteria()) {
            "US-ASCII".to_string()
        } else {
            "UTF-8".to_string()
        }
    }
}

/// Builds `SORT` commands, checking each request against the session's
/// capabilities before any tokens are produced.
#[derive(Clone, Debug)]
pub struct SortCommandBuilder<C> {
    capabilities: C,
}

impl<C: CapabilityOracle> SortCommandBuilder<C> {
    pub fn new(capabilities: C) -> Result<Self, Error> {
        if !capabilities.supports(Extension::Sort) {
            return Err(Error::UnsupportedBaseExtension);
        }
        Ok(Self { capabilities })
    }

    /// Validates `request` and lays out its tokens:
    ///
    /// ```text
    /// [RETURN (options)] (sort keys) charset criteria [limit]
    /// ```
    pub fn build(&self, request: SortRequest) -> Result<Command, Error> {
        if request.sort_keys.is_empty() {
            return Err(Error::MissingSortKeys);
        }

        if !request.return_options.is_empty() {
            // RFC 5267
            if !self.capabilities.supports(Extension::Esort) {
                return Err(Error::UnsupportedExtension(Extension::Esort));
            }
            if !self.capabilities.supports(Extension::ContextSort)
                && request.return_options.iter().any(|o| needs_context(o))
            {
                return Err(Error::UnsupportedExtension(Extension::ContextSort));
            }
        }

        let charset = request.effective_charset();
        let criteria = request.effective_criteria().to_string();
        let SortRequest {
            use_uid,
            sort_keys,
            limit,
            return_options,
            ..
        } = request;

        let mut tokens = Vec::with_capacity(6);
        if !return_options.is_empty() {
            tokens.push(Token::from("RETURN"));
            tokens.push(Token::from(return_options));
        }
        tokens.push(Token::from(sort_keys));
        tokens.push(Token::Atom(charset));
        tokens.push(Token::Atom(criteria));
        if !limit.is_empty() {
            tokens.push(Token::Atom(limit));
        }

        Ok(Command {
            verb: if use_uid { "UID SORT" } else { "SORT" },
            tokens,
        })
    }
}

// Matches the names anywhere in the option text, ignoring case.
fn needs_context(option: &str) -> bool {
    let option = option.to_ascii_uppercase();
    ["PARTIAL", "UPDATE", "CONTEXT"]
        .iter()
        .any(|name| option.contains(name))
}
