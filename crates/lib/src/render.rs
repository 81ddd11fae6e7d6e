//! Braced-list rendering for query output.
//!
//! Collection-valued queries render as `{}` when empty and as `{` plus the
//! comma-joined elements plus `}` otherwise, in insertion order.

/// Render an ordered collection of names as a braced, comma-joined list.
pub fn braced_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::from("{");
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(item.as_ref());
    }
    out.push('}');
    out
}
