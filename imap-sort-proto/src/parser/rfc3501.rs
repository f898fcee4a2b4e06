//!
//! https://tools.ietf.org/html/rfc3501
//!
//! INTERNET MESSAGE ACCESS PROTOCOL, response framing level
//!
//! Only what a client needs to track command completion and capabilities
//! is parsed. Other untagged data, including `SORT` and `ESEARCH`
//! results, is returned with its payload untouched.

use std::str;

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while1},
    character::complete::char,
    combinator::{map, map_res, opt, peek, success},
    error::{Error, ErrorKind},
    multi::{many0, separated_list1},
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};

use crate::{
    parser::{core::*, ParseResult},
    types::*,
};

fn status(i: &[u8]) -> IResult<&[u8], Status> {
    alt((
        map(tag_no_case("OK"), |_| Status::Ok),
        map(tag_no_case("NO"), |_| Status::No),
        map(tag_no_case("BAD"), |_| Status::Bad),
        map(tag_no_case("PREAUTH"), |_| Status::PreAuth),
        map(tag_no_case("BYE"), |_| Status::Bye),
    ))(i)
}

fn resp_text_code_alert(i: &[u8]) -> IResult<&[u8], ResponseCode<'_>> {
    map(terminated(tag_no_case("ALERT"), peek(char(']'))), |_| {
        ResponseCode::Alert
    })(i)
}

// "BADCHARSET" [SP "(" astring *(SP astring) ")" ]
fn resp_text_code_badcharset(i: &[u8]) -> IResult<&[u8], ResponseCode<'_>> {
    map(
        preceded(
            tag_no_case("BADCHARSET"),
            opt(delimited(
                tag(" ("),
                separated_list1(char(' '), astring_utf8),
                char(')'),
            )),
        ),
        ResponseCode::BadCharset,
    )(i)
}

fn resp_text_code_capability(i: &[u8]) -> IResult<&[u8], ResponseCode<'_>> {
    map(capability_data, ResponseCode::Capabilities)(i)
}

// atom [SP 1*<any TEXT-CHAR except "]">]
fn resp_text_code_other(i: &[u8]) -> IResult<&[u8], ResponseCode<'_>> {
    map(
        tuple((
            atom,
            opt(preceded(
                char(' '),
                map_res(
                    take_while1(|c: u8| c != b']' && is_text_char(c)),
                    str::from_utf8,
                ),
            )),
        )),
        |(name, value)| ResponseCode::Other { name, value },
    )(i)
}

fn resp_text_code(i: &[u8]) -> IResult<&[u8], ResponseCode<'_>> {
    delimited(
        char('['),
        alt((
            resp_text_code_alert,
            resp_text_code_badcharset,
            resp_text_code_capability,
            resp_text_code_other,
        )),
        char(']'),
    )(i)
}

// The trailing text is optional in practice even though RFC 3501
// requires it after a response code.
fn resp_text(i: &[u8]) -> IResult<&[u8], (Option<ResponseCode<'_>>, Option<&str>)> {
    map(
        tuple((opt(terminated(resp_text_code, opt(char(' ')))), text)),
        |(code, text)| (code, str::from_utf8(text).ok().filter(|t| !t.is_empty())),
    )(i)
}

fn opt_resp_text(i: &[u8]) -> IResult<&[u8], (Option<ResponseCode<'_>>, Option<&str>)> {
    map(opt(preceded(char(' '), resp_text)), |text| {
        text.unwrap_or((None, None))
    })(i)
}

// capability-data = "CAPABILITY" *(SP capability)
fn capability_data(i: &[u8]) -> IResult<&[u8], Vec<&str>> {
    preceded(tag_no_case("CAPABILITY"), many0(preceded(char(' '), atom)))(i)
}

fn resp_capability(i: &[u8]) -> IResult<&[u8], Response<'_>> {
    map(terminated(capability_data, crlf), Response::Capabilities)(i)
}

fn resp_cond(i: &[u8]) -> IResult<&[u8], Response<'_>> {
    map(
        terminated(tuple((status, opt_resp_text)), crlf),
        |(status, (code, information))| Response::Data {
            status,
            code,
            information,
        },
    )(i)
}

// Everything up to the CRLF that ends the input, literals included.
fn payload(i: &[u8]) -> IResult<&[u8], &[u8]> {
    match i.len().checked_sub(2) {
        Some(end) if i.ends_with(b"\r\n") => Ok((&i[end..], &i[..end])),
        _ => Err(nom::Err::Error(Error::new(i, ErrorKind::CrLf))),
    }
}

fn resp_untagged(i: &[u8]) -> IResult<&[u8], Response<'_>> {
    map(
        tuple((
            opt(terminated(number, char(' '))),
            atom,
            alt((preceded(char(' '), payload), success(&b""[..]))),
            crlf,
        )),
        |(number, name, payload, _)| Response::Untagged {
            number,
            name,
            payload,
        },
    )(i)
}

fn response_data(i: &[u8]) -> IResult<&[u8], Response<'_>> {
    preceded(tag("* "), alt((resp_cond, resp_capability, resp_untagged)))(i)
}

fn continue_req(i: &[u8]) -> IResult<&[u8], Response<'_>> {
    map(
        delimited(
            tuple((char('+'), opt(char(' ')))), // Some servers do not send the space :/
            resp_text,
            crlf,
        ),
        |(code, information)| Response::Continue { code, information },
    )(i)
}

fn response_tagged(i: &[u8]) -> IResult<&[u8], Response<'_>> {
    map(
        terminated(
            tuple((request_tag, char(' '), status, opt_resp_text)),
            crlf,
        ),
        |(tag, _, status, (code, information))| Response::Done {
            tag,
            status,
            code,
            information,
        },
    )(i)
}

pub(crate) fn response(i: &[u8]) -> ParseResult<'_> {
    alt((continue_req, response_data, response_tagged))(i)
}
