use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Display label of one person on the wheel.
///
/// Labels carry no identity of their own: two candidates with the same name are
/// told apart only by their position in the candidate list.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct CandidateName(String);

crate::impl_string_newtype!(CandidateName);

/// Trims every entry and drops the blank ones, keeping the input order.
pub fn parse_names<I, S>(raw: I) -> Vec<CandidateName>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .map(CandidateName::new)
        .collect()
}
