use std::collections::HashSet;

use super::{Extension, Response, ResponseCode};

/// Answers whether the current session supports an extension.
///
/// Implementations must return a stable answer for the duration of one
/// [`SortCommandBuilder::build`](crate::SortCommandBuilder::build) call.
pub trait CapabilityOracle {
    fn supports(&self, extension: Extension) -> bool;
}

impl<T: CapabilityOracle + ?Sized> CapabilityOracle for &T {
    fn supports(&self, extension: Extension) -> bool {
        (**self).supports(extension)
    }
}

/// Snapshot of the capability atoms a server advertised.
///
/// Lookups ignore ASCII case, `sort` and `SORT` are the same capability.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Capabilities {
    atoms: HashSet<String>,
}

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the atoms of a `* CAPABILITY` response or of a
    /// `[CAPABILITY ...]` response code. Other responses yield `None`.
    pub fn from_response(response: &Response<'_>) -> Option<Self> {
        match response {
            Response::Capabilities(atoms) => Some(atoms.iter().collect()),
            Response::Done { code, .. }
            | Response::Data { code, .. }
            | Response::Continue { code, .. } => match code {
                Some(ResponseCode::Capabilities(atoms)) => Some(atoms.iter().collect()),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn insert(&mut self, name: &str) {
        self.atoms.insert(name.to_ascii_uppercase());
    }

    pub fn has(&self, name: &str) -> bool {
        self.atoms.contains(&name.to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

impl CapabilityOracle for Capabilities {
    fn supports(&self, extension: Extension) -> bool {
        self.has(extension.name())
    }
}

impl<S: AsRef<str>> FromIterator<S> for Capabilities {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut capabilities = Capabilities::new();
        for name in iter {
            capabilities.insert(name.as_ref());
        }
        capabilities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RequestId, Status};

    #[test]
    fn lookup_ignores_case() {
        let caps: Capabilities = ["IMAP4rev1", "sort", "Context=Sort"].into_iter().collect();
        assert!(caps.supports(Extension::Sort));
        assert!(caps.supports(Extension::ContextSort));
        assert!(!caps.supports(Extension::Esort));
        assert!(caps.has("imap4REV1"));
        assert_eq!(caps.len(), 3);
    }

    #[test]
    fn from_capability_data() {
        let response = Response::Capabilities(vec!["IMAP4rev1", "SORT", "ESORT"]);
        let caps = Capabilities::from_response(&response).unwrap();
        assert!(caps.supports(Extension::Esort));
    }

    #[test]
    fn from_capability_code() {
        let response = Response::Done {
            tag: RequestId("A0001".to_string()),
            status: Status::Ok,
            code: Some(ResponseCode::Capabilities(vec!["IMAP4rev1", "SORT"])),
            information: Some("Logged in"),
        };
        let caps = Capabilities::from_response(&response).unwrap();
        assert!(caps.supports(Extension::Sort));
        assert!(!caps.supports(Extension::Esort));

        let plain = Response::Data {
            status: Status::Ok,
            code: None,
            information: None,
        };
        assert_eq!(Capabilities::from_response(&plain), None);
    }

    #[test]
    fn oracle_through_reference() {
        fn check<C: CapabilityOracle>(caps: C) -> bool {
            caps.supports(Extension::Sort)
        }
        let caps: Capabilities = ["SORT"].into_iter().collect();
        assert!(check(&caps));
        assert!(check(&&caps));
    }
}
