use super::Record;

/// Absolute name of a configured record within `domain`.
///
/// An empty relative name is the apex and maps to the domain itself, without
/// a trailing dot.
pub fn fqdn(domain: &str, record: &Record) -> String {
    if record.name.is_empty() {
        domain.to_string()
    } else {
        format!("{}.{}", record.name, domain)
    }
}

/// Whether `existing` occupies the same name and type as `desired`.
///
/// Content is ignored, so several listed records can match one desired
/// record.
pub fn identity_match(domain: &str, desired: &Record, existing: &Record) -> bool {
    desired.kind == existing.kind && fqdn(domain, desired) == existing.name
}

/// Whether `existing` already holds what `desired` asks for.
///
/// TTL and priority only take part when the desired record sets them.
pub fn content_match(desired: &Record, existing: &Record) -> bool {
    desired.content == existing.content
        && desired.ttl.map_or(true, |ttl| existing.ttl == Some(ttl))
        && desired
            .priority
            .map_or(true, |priority| existing.priority == Some(priority))
}
