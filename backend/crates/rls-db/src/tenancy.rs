use crate::{DbError, Result, SessionKeys};

use std::panic::Location;

use error_location::ErrorLocation;
use url::Url;
use uuid::Uuid;

const OPTIONS_PARAM: &str = "options";

/// Copy of a Postgres connection URI whose `options` parameter sets the
/// tenant setting at connection start (`-c app.tenant_id=<tenant>`).
///
/// An existing `options` value is kept and the flag appended unless it is
/// already present. Other query parameters keep their position; a repeated
/// parameter collapses to its last value.
#[track_caller]
pub fn dsn_with_tenant(dsn: &str, keys: &SessionKeys, tenant: Uuid) -> Result<String> {
    let mut url = Url::parse(dsn).map_err(|e| DbError::InvalidDsn {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let mut params: Vec<(String, String)> = Vec::new();
    for (key, value) in url.query_pairs() {
        match params.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value.into_owned(),
            None => params.push((key.into_owned(), value.into_owned())),
        }
    }

    let flag = format!("-c {}={tenant}", keys.tenant());
    match params.iter_mut().find(|(key, _)| key == OPTIONS_PARAM) {
        Some((_, options)) if options.is_empty() => *options = flag,
        Some((_, options)) => {
            if !options.contains(&flag) {
                options.push(' ');
                options.push_str(&flag);
            }
        }
        None => params.push((OPTIONS_PARAM.to_string(), flag)),
    }

    let query = params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&");
    url.set_query(Some(&query));

    Ok(url.to_string())
}
