use serde::de::{Deserialize, Deserializer};

/// Deserialize a value, turning `null` into [`Default::default`].
///
/// Sensu emits `null` rather than omitting empty label sets, annotations and
/// tag lists, so every such field goes through here.
pub(crate) fn nullable<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: Deserialize<'de> + Default,
    D: Deserializer<'de>,
{
    let maybe = Option::deserialize(deserializer)?;
    Ok(maybe.unwrap_or_default())
}
