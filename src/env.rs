use crate::resolve::{RawEnv, RawValue};

/// Build a [`RawEnv`] from environment variable pairs.
///
/// With a prefix, only variables starting with it are kept and the prefix is
/// stripped: prefix `MYAPP_` turns `MYAPP_PORT` into `PORT`. A variable that is
/// exactly the prefix is skipped.
///
/// Values are never quoted, so schema-free inference treats them as written.
///
/// Takes an iterator so tests can pass synthetic data instead of `std::env::vars()`.
pub fn env_entries(
    vars: impl IntoIterator<Item = (String, String)>,
    prefix: Option<&str>,
) -> RawEnv {
    vars.into_iter()
        .filter_map(|(key, value)| {
            let key = match prefix {
                Some(prefix) => key.strip_prefix(prefix)?.to_string(),
                None => key,
            };
            (!key.is_empty()).then(|| (key, RawValue::plain(value)))
        })
        .collect()
}
