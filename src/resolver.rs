//! Hostname resolution collaborator.
//!
//! This crate never resolves names itself. Callers that want a
//! reverse-DNS-confirmed trust check implement [`HostnameResolver`] (with
//! their own timeouts and caching) and pass it to [`forward_confirmed`].

use crate::parser;

/// External name service contract.
pub trait HostnameResolver {
    /// Addresses for `hostname`, as plain strings.
    fn resolve_forward(&self, hostname: &str) -> Vec<String>;

    /// Hostname for `address`, if any.
    fn resolve_reverse(&self, address: &str) -> Option<String>;
}

/// Forward-confirmed reverse DNS check.
///
/// Reverse-resolve `raw_addr`, forward-resolve that hostname, and accept only
/// when one of the forward results is the same address. Unparseable input and
/// resolver answers that are not addresses count as failures.
pub fn forward_confirmed<R: HostnameResolver + ?Sized>(raw_addr: &str, resolver: &R) -> bool {
    let trimmed = parser::trim(raw_addr);
    let addr = match parser::parse(trimmed) {
        Some(addr) => addr,
        None => return false,
    };

    let hostname = match resolver.resolve_reverse(trimmed) {
        Some(name) => name,
        None => {
            log::debug!("No reverse name for {addr}");
            return false;
        }
    };

    let confirmed = resolver
        .resolve_forward(&hostname)
        .iter()
        .filter_map(|candidate| parser::parse(parser::trim(candidate)))
        .any(|candidate| candidate == addr);

    if !confirmed {
        log::debug!("{hostname} does not resolve back to {addr}");
    }
    confirmed
}
