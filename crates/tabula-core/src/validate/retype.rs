use crate::{schema::FieldsDiff, Error, Result};

/// Fails with `IllegalRetype` on the first retype whose destination is not
/// reachable from the field's current kind. Insertions are exempt.
pub fn retypes(diff: &FieldsDiff) -> Result<()> {
    match diff
        .retypes
        .iter()
        .find(|retype| !retype.from.can_transition_to(retype.to))
    {
        Some(retype) => Err(Error::illegal_retype(retype.name.as_str(), retype.to)),
        None => Ok(()),
    }
}
