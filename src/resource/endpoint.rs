use std::fmt::Display;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::Method;

use crate::{Error, http::parse_method};

/// Segments starting with this marker are replaced by positional path arguments.
pub const PATH_PARAM_MARKER: char = ':';

/// Characters escaped in a single path segment, so an argument can never add segments, a query
/// or a fragment to the request target.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encodes `arg` for use as exactly one path segment.
pub fn encode_path_segment(arg: &str) -> String {
    utf8_percent_encode(arg, PATH_SEGMENT).to_string()
}

/// Symbolic name of a resource operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    List,
    /// Resource specific operation, e.g. `CREATE_BITGO` for keychains.
    Custom(&'static str),
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Create => write!(f, "CREATE"),
            Action::Read => write!(f, "READ"),
            Action::Update => write!(f, "UPDATE"),
            Action::Delete => write!(f, "DELETE"),
            Action::List => write!(f, "LIST"),
            Action::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// URL template relative to the API base (e.g. `wallet/:id`, never `/api/v1/wallet`) and verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub path: &'static str,
    pub method: &'static str,
}

impl Endpoint {
    pub const fn new(path: &'static str, method: &'static str) -> Self {
        Self { path, method }
    }
}

/// Immutable mapping from [`Action`] to [`Endpoint`] attached to a resource type.
#[derive(Debug, Clone, Copy)]
pub struct EndpointTable {
    entries: &'static [(Action, Endpoint)],
}

/// A concrete request target produced by [`EndpointTable::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub path: String,
    pub method: Method,
}

impl EndpointTable {
    pub const EMPTY: EndpointTable = EndpointTable { entries: &[] };

    pub const fn new(entries: &'static [(Action, Endpoint)]) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, action: Action) -> Option<&Endpoint> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == action)
            .map(|(_, endpoint)| endpoint)
    }

    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.entries.iter().map(|(action, _)| *action)
    }

    /// Resolves `action` to a request path and verb, substituting `args` into the template's
    /// path parameters from left to right.
    pub fn resolve(&self, action: Action, args: &[&str]) -> Result<ResolvedEndpoint, Error> {
        if self.is_empty() {
            return Err(Error::InvalidEndpoint(
                "resource has no endpoints configured".to_string(),
            ));
        }
        let endpoint = self
            .lookup(action)
            .ok_or_else(|| Error::InvalidEndpoint(format!("no endpoint for resource action {action}")))?;
        let method = parse_method(endpoint.method)?;
        if endpoint.path.trim().is_empty() {
            return Err(Error::InvalidEndpointUrl(format!(
                "empty endpoint url for resource action {action}"
            )));
        }
        let path = map_to_path(endpoint.path, args)?;
        Ok(ResolvedEndpoint { path, method })
    }
}

/// Replaces every `:name` segment of `template` with the next positional argument.
///
/// The number of arguments must match the number of path parameters exactly. Each argument is
/// percent-encoded as a single segment, so ids containing `/`, `?` or `#` stay inside their
/// segment.
pub fn map_to_path(template: &str, args: &[&str]) -> Result<String, Error> {
    let segments: Vec<&str> = template.split('/').collect();
    let expected = segments
        .iter()
        .filter(|segment| segment.starts_with(PATH_PARAM_MARKER))
        .count();
    if expected != args.len() {
        return Err(Error::InvalidEndpointUrl(format!(
            "'{template}' takes {expected} path argument(s), {} given",
            args.len()
        )));
    }

    let mut args = args.iter();
    let mapped: Vec<String> = segments
        .into_iter()
        .map(|segment| {
            if segment.starts_with(PATH_PARAM_MARKER) {
                args.next().map_or_else(|| segment.to_string(), |arg| encode_path_segment(arg))
            } else {
                segment.to_string()
            }
        })
        .collect();

    let path = mapped.join("/");
    match path.strip_prefix("//") {
        Some(rest) => Ok(format!("/{rest}")),
        None => Ok(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALLETS: EndpointTable = EndpointTable::new(&[
        (Action::List, Endpoint::new("wallet", "GET")),
        (Action::Read, Endpoint::new("wallet/:id", "get")),
        (Action::Update, Endpoint::new("/wallet/:id", "Put")),
        (Action::Custom("REMOVE_USER"), Endpoint::new("wallet/:walletId/user/:userId", "DELETE")),
        (Action::Custom("BROKEN_VERB"), Endpoint::new("wallet", "PATCH")),
        (Action::Custom("BROKEN_URL"), Endpoint::new("  ", "GET")),
    ]);

    #[test]
    fn list_resolves_without_arguments() {
        let resolved = WALLETS.resolve(Action::List, &[]).unwrap();
        assert_eq!(resolved.path, "wallet");
        assert_eq!(resolved.method, Method::GET);
    }

    #[test]
    fn read_substitutes_the_id() {
        let resolved = WALLETS.resolve(Action::Read, &["abc123"]).unwrap();
        assert_eq!(resolved.path, "wallet/abc123");
        assert_eq!(resolved.method, Method::GET);
    }

    #[test]
    fn resolution_is_deterministic() {
        let first = WALLETS.resolve(Action::Update, &["w1"]).unwrap();
        let second = WALLETS.resolve(Action::Update, &["w1"]).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.path, "/wallet/w1");
        assert_eq!(first.method, Method::PUT);
    }

    #[test]
    fn arguments_are_substituted_left_to_right() {
        let resolved = WALLETS
            .resolve(Action::Custom("REMOVE_USER"), &["w1", "u9"])
            .unwrap();
        assert_eq!(resolved.path, "wallet/w1/user/u9");
        assert_eq!(resolved.method, Method::DELETE);
    }

    #[test]
    fn argument_count_must_match_exactly() {
        for args in [&[][..], &["w1"][..], &["w1", "u9", "extra"][..]] {
            let err = WALLETS.resolve(Action::Custom("REMOVE_USER"), args).unwrap_err();
            assert!(matches!(err, Error::InvalidEndpointUrl(_)), "{args:?}");
        }
        let err = WALLETS.resolve(Action::List, &["unexpected"]).unwrap_err();
        assert!(matches!(err, Error::InvalidEndpointUrl(_)));
    }

    #[test]
    fn arguments_stay_inside_their_segment() {
        let resolved = WALLETS.resolve(Action::Read, &["a/b?c#d"]).unwrap();
        assert_eq!(resolved.path, "wallet/a%2Fb%3Fc%23d");

        let resolved = WALLETS
            .resolve(Action::Custom("REMOVE_USER"), &["w 1", "50%"])
            .unwrap();
        assert_eq!(resolved.path, "wallet/w%201/user/50%25");
    }

    #[test]
    fn plain_ids_are_not_encoded() {
        assert_eq!(encode_path_segment("2N8ryDAob6Qn8uCsWvkkQDhyeCQTqybGUFe"), "2N8ryDAob6Qn8uCsWvkkQDhyeCQTqybGUFe");
        assert_eq!(encode_path_segment("xpub-1_2.3~"), "xpub-1_2.3~");
    }

    #[test]
    fn leading_double_slash_collapses() {
        assert_eq!(map_to_path("//wallet/:id", &["x"]).unwrap(), "/wallet/x");
        assert_eq!(map_to_path("/wallet", &[]).unwrap(), "/wallet");
    }

    #[test]
    fn missing_table_or_action_is_invalid_endpoint() {
        let err = EndpointTable::EMPTY.resolve(Action::List, &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidEndpoint(_)));

        let err = WALLETS.resolve(Action::Create, &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidEndpoint(_)));
    }

    #[test]
    fn unsupported_verb_is_invalid_method() {
        let err = WALLETS.resolve(Action::Custom("BROKEN_VERB"), &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidMethod(_)));
    }

    #[test]
    fn blank_template_is_invalid_url() {
        let err = WALLETS.resolve(Action::Custom("BROKEN_URL"), &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidEndpointUrl(_)));
    }

    #[test]
    fn verbs_resolve_identically_in_any_case() {
        const CASES: EndpointTable = EndpointTable::new(&[
            (Action::Custom("lower"), Endpoint::new("wallet/:id", "get")),
            (Action::Custom("upper"), Endpoint::new("wallet/:id", "GET")),
            (Action::Custom("title"), Endpoint::new("wallet/:id", "Get")),
            (Action::Custom("mixed"), Endpoint::new("wallet/:id", "gEt")),
        ]);
        let expected = ResolvedEndpoint {
            path: "wallet/abc".to_string(),
            method: Method::GET,
        };
        for action in CASES.actions() {
            assert_eq!(CASES.resolve(action, &["abc"]).unwrap(), expected, "{action}");
        }
    }
}
