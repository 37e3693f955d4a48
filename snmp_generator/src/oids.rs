//! OID set reasoning

/// True when `oid` equals `ancestor` or lies beneath it
pub fn is_descendant(oid: &str, ancestor: &str) -> bool {
    let oid = format!("{}.", oid);
    let ancestor = format!("{}.", ancestor);
    oid.starts_with(&ancestor)
}

/// Reduce a set of OIDs to the entries not covered by another entry.
///
/// The result is sorted lexicographically. Entries may carry a trailing
/// `.` marker; the comparison treats them as plain strings.
pub fn minimize_oids(mut oids: Vec<String>) -> Vec<String> {
    oids.sort();

    let mut minimized: Vec<String> = Vec::with_capacity(oids.len());
    let mut previous: Option<String> = None;

    for oid in oids {
        let covered = previous
            .as_deref()
            .is_some_and(|prev| format!("{}.", oid).starts_with(prev));
        if !covered {
            previous = Some(format!("{}.", oid));
            minimized.push(oid);
        }
    }

    minimized
}
