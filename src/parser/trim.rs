//! Transport decoration stripping for raw peer/header values.

/// Strip quoting, port suffixes and IPv6 brackets from a raw address value.
///
/// - `"1.2.3.4"` (with the quotes) becomes `1.2.3.4`
/// - `1.2.3.4:8080` becomes `1.2.3.4` (exactly 3 dots and 1 colon)
/// - `[2001:db8::1]:443` and `[::1]` lose the brackets and port
///
/// Must run before any validation.
pub fn trim(raw: &str) -> &str {
    let s = raw.trim().trim_matches('"').trim();

    if let Some(rest) = s.strip_prefix('[') {
        let inner = match rest.find(']') {
            Some(end) => &rest[..end],
            None => rest,
        };
        return inner.trim();
    }

    if s.matches('.').count() == 3 && s.matches(':').count() == 1 {
        if let Some((host, _port)) = s.split_once(':') {
            log::trace!("trim: dropped IPv4 port suffix from {s}");
            return host.trim();
        }
    }

    s
}
