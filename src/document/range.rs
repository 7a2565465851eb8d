// src/document/range.rs

/// Selects the open interval between a start landmark and the next end landmark
/// inside one sibling sequence.
///
/// The start is the first element satisfying `is_start`. The range ends at the
/// first element *after* the start satisfying `is_end`, or at the end of the
/// sequence when nothing does. A missing start yields an empty slice.
pub fn bounded_range<T, S, E>(siblings: &[T], is_start: S, is_end: E) -> &[T]
where
    S: Fn(&T) -> bool,
    E: Fn(&T) -> bool,
{
    let Some(start) = siblings.iter().position(|node| is_start(node)) else {
        tracing::trace!("Start landmark not present among {} siblings", siblings.len());
        return &[];
    };

    let rest = &siblings[start + 1..];
    let end = rest.iter().position(|node| is_end(node)).unwrap_or(rest.len());
    tracing::trace!("Bounded range selected siblings {}..{}", start + 1, start + 1 + end);

    &rest[..end]
}
