use nom::IResult;

use crate::types::Response;

pub mod core;

pub mod rfc3501;

#[cfg(test)]
mod tests;

pub type ParseResult<'a> = IResult<&'a [u8], Response<'a>>;

/// Parses one complete response, including its trailing CRLF.
///
/// `msg` must hold exactly one response as framed by a codec: the payload
/// of an untagged response extends up to the final CRLF of the input.
pub fn parse_response(msg: &[u8]) -> ParseResult<'_> {
    rfc3501::response(msg)
}
