use super::parse_response;
use crate::types::*;

#[test]
fn test_tagged_completion() {
    match parse_response(b"A0002 OK [READ-WRITE] Sort completed (0.001 + 0.000 secs).\r\n") {
        Ok((
            rest,
            Response::Done {
                tag,
                status: Status::Ok,
                code: Some(ResponseCode::Other { name: "READ-WRITE", value: None }),
                information: Some("Sort completed (0.001 + 0.000 secs)."),
            },
        )) => {
            assert_eq!(tag, RequestId("A0002".to_string()));
            assert!(rest.is_empty());
        }
        rsp => panic!("unexpected response {rsp:?}"),
    }
}

#[test]
fn test_tagged_without_text() {
    match parse_response(b"A1 NO\r\n") {
        Ok((_, Response::Done { status: Status::No, code: None, information: None, .. })) => {}
        rsp => panic!("unexpected response {rsp:?}"),
    }
}

#[test]
fn test_badcharset() {
    match parse_response(b"A3 NO [BADCHARSET (US-ASCII \"UTF-8\")] Unsupported charset\r\n") {
        Ok((_, Response::Done { code: Some(ResponseCode::BadCharset(Some(charsets))), .. })) => {
            assert_eq!(charsets, vec!["US-ASCII", "UTF-8"]);
        }
        rsp => panic!("unexpected response {rsp:?}"),
    }
    match parse_response(b"A3 NO [BADCHARSET] nope\r\n") {
        Ok((_, Response::Done { code: Some(ResponseCode::BadCharset(None)), .. })) => {}
        rsp => panic!("unexpected response {rsp:?}"),
    }
}

#[test]
fn test_capability_data() {
    match parse_response(b"* CAPABILITY IMAP4rev1 SORT ESORT CONTEXT=SORT AUTH=PLAIN\r\n") {
        Ok((_, Response::Capabilities(caps))) => {
            assert_eq!(caps, vec!["IMAP4rev1", "SORT", "ESORT", "CONTEXT=SORT", "AUTH=PLAIN"]);
        }
        rsp => panic!("unexpected response {rsp:?}"),
    }
}

#[test]
fn test_capability_code() {
    match parse_response(b"* OK [CAPABILITY IMAP4rev1 SORT] Dovecot ready.\r\n") {
        Ok((
            _,
            Response::Data {
                status: Status::Ok,
                code: Some(ResponseCode::Capabilities(caps)),
                information: Some("Dovecot ready."),
            },
        )) => {
            assert_eq!(caps, vec!["IMAP4rev1", "SORT"]);
        }
        rsp => panic!("unexpected response {rsp:?}"),
    }
}

#[test]
fn test_alert() {
    match parse_response(b"* NO [ALERT] Mailbox is at 95% of quota\r\n") {
        Ok((_, Response::Data { status: Status::No, code: Some(ResponseCode::Alert), .. })) => {}
        rsp => panic!("unexpected response {rsp:?}"),
    }
}

#[test]
fn test_sort_data_is_untagged() {
    match parse_response(b"* SORT 2 3 6\r\n") {
        Ok((_, Response::Untagged { number: None, name: "SORT", payload })) => {
            assert_eq!(payload, b"2 3 6");
        }
        rsp => panic!("unexpected response {rsp:?}"),
    }
    match parse_response(b"* SORT\r\n") {
        Ok((_, Response::Untagged { name: "SORT", payload: b"", .. })) => {}
        rsp => panic!("unexpected response {rsp:?}"),
    }
}

#[test]
fn test_esearch_data_is_untagged() {
    match parse_response(b"* ESEARCH (TAG \"A0003\") UID ALL 23765,23764,23763 COUNT 3\r\n") {
        Ok((_, Response::Untagged { name: "ESEARCH", payload, .. })) => {
            assert_eq!(payload, &b"(TAG \"A0003\") UID ALL 23765,23764,23763 COUNT 3"[..]);
        }
        rsp => panic!("unexpected response {rsp:?}"),
    }
}

#[test]
fn test_numbered_untagged() {
    match parse_response(b"* 12 EXISTS\r\n") {
        Ok((_, Response::Untagged { number: Some(12), name: "EXISTS", payload: b"" })) => {}
        rsp => panic!("unexpected response {rsp:?}"),
    }
}

#[test]
fn test_untagged_with_literal() {
    match parse_response(b"* 1 FETCH (BODY[] {5}\r\nhello)\r\n") {
        Ok((rest, Response::Untagged { number: Some(1), name: "FETCH", payload })) => {
            assert_eq!(payload, &b"(BODY[] {5}\r\nhello)"[..]);
            assert!(rest.is_empty());
        }
        rsp => panic!("unexpected response {rsp:?}"),
    }
}

#[test]
fn test_status_prefix_is_not_status() {
    match parse_response(b"* NOTIFY something\r\n") {
        Ok((_, Response::Untagged { name: "NOTIFY", .. })) => {}
        rsp => panic!("unexpected response {rsp:?}"),
    }
}

#[test]
fn test_non_utf8_text() {
    match parse_response(b"A0001 NO \xe9chec de tri\r\n") {
        Ok((_, Response::Done { status: Status::No, code: None, information: None, .. })) => {}
        rsp => panic!("unexpected response {rsp:?}"),
    }
    match parse_response(b"* NO [ALERT] \xff\r\n") {
        Ok((_, Response::Data { code: Some(ResponseCode::Alert), information: None, .. })) => {}
        rsp => panic!("unexpected response {rsp:?}"),
    }
}

#[test]
fn test_continuation() {
    match parse_response(b"+ Ready for literal data\r\n") {
        Ok((_, Response::Continue { code: None, information: Some("Ready for literal data") })) => {}
        rsp => panic!("unexpected response {rsp:?}"),
    }
    match parse_response(b"+\r\n") {
        Ok((_, Response::Continue { code: None, information: None })) => {}
        rsp => panic!("unexpected response {rsp:?}"),
    }
}

#[test]
fn test_missing_crlf() {
    assert!(parse_response(b"A1 OK done").is_err());
    assert!(Response::from_bytes(b"* SORT 1 2").is_err());
}
