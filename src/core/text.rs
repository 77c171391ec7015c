use crate::models::ProfileText;

/// Join an ordered list of tags into one normalized profile text
///
/// Tags are lower-cased and joined by single spaces in input order. Runs of
/// whitespace inside or between tags collapse to one space and blank tags
/// contribute nothing, so an empty list yields the empty profile.
pub fn normalize<S: AsRef<str>>(tags: &[S]) -> ProfileText {
    let joined = tags
        .iter()
        .flat_map(|tag| tag.as_ref().split_whitespace())
        .collect::<Vec<_>>()
        .join(" ");

    ProfileText::from_normalized(joined.to_lowercase())
}
