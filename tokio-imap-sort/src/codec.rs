use std::io;

use bytes::{BufMut, Bytes, BytesMut};
use nom::{
    character::complete::char,
    combinator::{all_consuming, opt},
    sequence::{delimited, pair},
};
use thiserror::Error;
use tokio_util::codec::{Decoder, Encoder};

use imap_sort_proto::parser::core::number;
use imap_sort_proto::types::{Capabilities, RequestId, Response, Status, Token};
use imap_sort_proto::Command;

/// Literals announced with a larger size are refused.
pub const DEFAULT_MAX_LITERAL_LENGTH: u32 = 64 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Expected `\\r\\n`, got `\\n`")]
    NotCrLf,
    #[error("Expected a maximum literal length of {max_length} bytes, got {length} bytes")]
    LiteralTooLarge { max_length: u32, length: u32 },
    #[error("Parsing failed")]
    ResponseParsingFailed,
    #[error("Token {0:?} cannot be sent")]
    InvalidToken(String),
}

pub struct ImapCodec {
    // Bytes of the pending response that are already known to precede
    // the line still being searched for, literal data included.
    decode_need_message_bytes: usize,
    max_literal_length: u32,
}

impl ImapCodec {
    pub fn new(max_literal_length: u32) -> Self {
        Self {
            decode_need_message_bytes: 0,
            max_literal_length,
        }
    }

    fn discard(&mut self, buf: &mut BytesMut, len: usize) {
        let _ = buf.split_to(len);
        self.decode_need_message_bytes = 0;
    }
}

impl Default for ImapCodec {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LITERAL_LENGTH)
    }
}

/// A framed response, or the error that made the codec skip a line.
///
/// Framing errors leave the connection usable, so they are items rather
/// than `Decoder` errors; the latter are I/O failures only.
pub type Frame = Result<ResponseData, CodecError>;

impl Decoder for ImapCodec {
    type Item = Frame;
    type Error = io::Error;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Frame>, io::Error> {
        loop {
            let start = self.decode_need_message_bytes;
            if start > buf.len() {
                return Ok(None);
            }
            let end = match buf[start..].iter().position(|b| *b == b'\n') {
                Some(pos) => start + pos + 1,
                None => return Ok(None),
            };
            if end - start < 2 || buf[end - 2] != b'\r' {
                self.discard(buf, end);
                return Ok(Some(Err(CodecError::NotCrLf)));
            }

            match literal_length(&buf[start..end - 2]) {
                Some(length) if length > self.max_literal_length => {
                    self.discard(buf, end);
                    return Ok(Some(Err(CodecError::LiteralTooLarge {
                        max_length: self.max_literal_length,
                        length,
                    })));
                }
                Some(length) => {
                    buf.reserve(length as usize);
                    self.decode_need_message_bytes = end + length as usize;
                }
                None => {
                    let raw = buf.split_to(end).freeze();
                    self.decode_need_message_bytes = 0;
                    return Ok(Some(ResponseData::new(raw)));
                }
            }
        }
    }
}

// literal = "{" number ["+"] "}" CRLF *CHAR8
//
// Returns the announced size when `line` (without CRLF) ends a literal prefix.
fn literal_length(line: &[u8]) -> Option<u32> {
    let open = line.iter().rposition(|b| *b == b'{')?;
    all_consuming(delimited(
        char('{'),
        number,
        pair(opt(char('+')), char('}')),
    ))(&line[open..])
    .ok()
    .map(|(_, length)| length)
}

/// A request line: tag, verb and the verb's tokens.
#[derive(Clone, Copy, Debug)]
pub struct Request<'a>(pub &'a RequestId, pub &'a Command);

impl<'a> Encoder<Request<'a>> for ImapCodec {
    type Error = CodecError;

    fn encode(&mut self, msg: Request<'a>, dst: &mut BytesMut) -> Result<(), CodecError> {
        let Request(id, command) = msg;
        for token in command.tokens() {
            check_token(token)?;
        }
        dst.put_slice(id.as_bytes());
        dst.put_u8(b' ');
        dst.put_slice(command.verb().as_bytes());
        for token in command.tokens() {
            dst.put_u8(b' ');
            write_token(token, dst);
        }
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

fn check_token(token: &Token) -> Result<(), CodecError> {
    match token {
        Token::Atom(s) if s.is_empty() || s.contains(['\r', '\n']) => {
            Err(CodecError::InvalidToken(s.clone()))
        }
        Token::List(items) => items.iter().try_for_each(check_token),
        _ => Ok(()),
    }
}

fn write_token(token: &Token, dst: &mut BytesMut) {
    match token {
        Token::Atom(s) => dst.put_slice(s.as_bytes()),
        Token::Number(n) => dst.put_slice(n.to_string().as_bytes()),
        Token::List(items) => {
            dst.put_u8(b'(');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    dst.put_u8(b' ');
                }
                write_token(item, dst);
            }
            dst.put_u8(b')');
        }
    }
}

/// One complete response as received from the server.
#[derive(Clone, Debug)]
pub struct ResponseData {
    raw: Bytes,
    request_id: Option<RequestId>,
    status: Option<Status>,
    name: Option<String>,
    information: Option<String>,
    capabilities: Option<Capabilities>,
}

impl ResponseData {
    fn new(raw: Bytes) -> Result<Self, CodecError> {
        let response = match imap_sort_proto::parse_response(&raw) {
            Ok((_, response)) => response,
            Err(_) => return Err(CodecError::ResponseParsingFailed),
        };
        let capabilities = Capabilities::from_response(&response);
        let (request_id, status, name, information) = match response {
            Response::Done {
                tag,
                status,
                information,
                ..
            } => (Some(tag), Some(status), None, information),
            Response::Data {
                status,
                information,
                ..
            } => (None, Some(status), None, information),
            Response::Untagged { name, .. } => (None, None, Some(name.to_string()), None),
            _ => (None, None, None, None),
        };
        let information = match (status, information) {
            (_, Some(text)) => Some(text.to_string()),
            (Some(_), None) => lossy_text(&raw),
            (None, None) => None,
        };
        Ok(Self {
            raw,
            request_id,
            status,
            name,
            information,
            capabilities,
        })
    }

    /// The tag of a tagged completion response.
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// The condition of a tagged completion or untagged status response.
    pub fn status(&self) -> Option<Status> {
        self.status
    }

    /// The name of an untagged data response, such as `SORT`.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Human-readable text of a status response, decoded lossily when the
    /// server did not send UTF-8.
    pub fn information(&self) -> Option<&str> {
        self.information.as_deref()
    }

    /// Capabilities announced by this response, as data or response code.
    pub fn capabilities(&self) -> Option<&Capabilities> {
        self.capabilities.as_ref()
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn parsed(&self) -> Option<Response<'_>> {
        imap_sort_proto::parse_response(&self.raw)
            .ok()
            .map(|(_, response)| response)
    }
}

// Text after `tag SP status SP`, only for status lines that are not UTF-8.
fn lossy_text(raw: &[u8]) -> Option<String> {
    let line = raw.strip_suffix(b"\r\n").unwrap_or(raw);
    let text = line.splitn(3, |b| *b == b' ').nth(2)?;
    match std::str::from_utf8(text) {
        Ok(_) => None,
        Err(_) => Some(String::from_utf8_lossy(text).into_owned()),
    }
}
