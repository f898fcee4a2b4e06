use std::str;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit1},
    combinator::{map, map_res},
    sequence::delimited,
    IResult,
};

use crate::types::RequestId;

// ----- number -----

// number          = 1*DIGIT
//                    ; Unsigned 32-bit integer
//                    ; (0 <= n < 4,294,967,296)
pub fn number(i: &[u8]) -> IResult<&[u8], u32> {
    map_res(map_res(digit1, str::from_utf8), str::parse::<u32>)(i)
}

// ----- string -----

// quoted = DQUOTE *QUOTED-CHAR DQUOTE
pub fn quoted(i: &[u8]) -> IResult<&[u8], &[u8]> {
    delimited(char('"'), quoted_data, char('"'))(i)
}

// quoted bytes as as utf8
pub fn quoted_utf8(i: &[u8]) -> IResult<&[u8], &str> {
    map_res(quoted, str::from_utf8)(i)
}

// QUOTED-CHAR = <any TEXT-CHAR except quoted-specials> / "\" quoted-specials
pub fn quoted_data(i: &[u8]) -> IResult<&[u8], &[u8]> {
    let mut escape = false;
    let mut len = 0;
    for c in i {
        if *c == b'"' && !escape {
            break;
        }
        len += 1;
        if *c == b'\\' && !escape {
            escape = true
        } else if escape {
            escape = false;
        }
    }
    Ok((&i[len..], &i[..len]))
}

// quoted-specials = DQUOTE / "\"
pub fn is_quoted_specials(c: u8) -> bool {
    c == b'"' || c == b'\\'
}

// ----- astring ----- atom (roughly) or string

// astring = 1*ASTRING-CHAR / string
//
// Literals never appear where this is used.
pub fn astring_utf8(i: &[u8]) -> IResult<&[u8], &str> {
    alt((
        map_res(take_while1(is_astring_char), str::from_utf8),
        quoted_utf8,
    ))(i)
}

// ASTRING-CHAR = ATOM-CHAR / resp-specials
pub fn is_astring_char(c: u8) -> bool {
    is_atom_char(c) || is_resp_specials(c)
}

// ATOM-CHAR = <any CHAR except atom-specials>
pub fn is_atom_char(c: u8) -> bool {
    !is_atom_specials(c)
}

// atom-specials = "(" / ")" / "{" / SP / CTL / list-wildcards / quoted-specials / resp-specials
pub fn is_atom_specials(c: u8) -> bool {
    c == b'('
        || c == b')'
        || c == b'{'
        || c == b' '
        || c < 32
        || c >= 0x7f
        || is_list_wildcards(c)
        || is_quoted_specials(c)
        || is_resp_specials(c)
}

// resp-specials = "]"
pub fn is_resp_specials(c: u8) -> bool {
    c == b']'
}

// atom = 1*ATOM-CHAR
pub fn atom(i: &[u8]) -> IResult<&[u8], &str> {
    map_res(take_while1(is_atom_char), str::from_utf8)(i)
}

// ----- text -----

// text = 1*TEXT-CHAR
//
// Servers send localized text in arbitrary charsets, so it stays raw.
pub fn text(i: &[u8]) -> IResult<&[u8], &[u8]> {
    take_while(is_text_char)(i)
}

// TEXT-CHAR = <any CHAR except CR and LF>
pub fn is_text_char(c: u8) -> bool {
    c != b'\r' && c != b'\n'
}

// ----- others -----

// list-wildcards = "%" / "*"
pub fn is_list_wildcards(c: u8) -> bool {
    c == b'%' || c == b'*'
}

// tag = 1*<any ASTRING-CHAR except "+">
pub fn request_tag(i: &[u8]) -> IResult<&[u8], RequestId> {
    map(
        map_res(take_while1(|c: u8| c != b'+' && is_astring_char(c)), str::from_utf8),
        |s: &str| RequestId(s.to_string()),
    )(i)
}

pub fn crlf(i: &[u8]) -> IResult<&[u8], &[u8]> {
    tag("\r\n")(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_overflow() {
        assert!(number(b"4294967295").is_ok());
        assert!(number(b"4294967296").is_err());
    }

    #[test]
    fn test_astring() {
        match astring_utf8(b"text ") {
            Ok((_, value)) => {
                assert_eq!(value, "text");
            }
            rsp => panic!("unexpected response {:?}", rsp),
        }
        match astring_utf8(b"\"UTF-8\")") {
            Ok((rest, value)) => {
                assert_eq!(value, "UTF-8");
                assert_eq!(rest, b")");
            }
            rsp => panic!("unexpected response {:?}", rsp),
        }
    }

    #[test]
    fn test_quoted_escapes() {
        assert_eq!(quoted(b"\"a\\\"b\" x"), Ok((&b" x"[..], &b"a\\\"b"[..])));
    }

    #[test]
    fn test_request_tag() {
        assert_eq!(
            request_tag(b"A0001 OK"),
            Ok((&b" OK"[..], RequestId("A0001".to_string())))
        );
        assert!(request_tag(b"+ go ahead").is_err());
    }
}
