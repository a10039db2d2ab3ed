#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

pub const HEADER: &str = "A/D,fltno,departure_time,arrival_time,origin,dest,STATION,weekday,from_date,until_date,flight_type,actypeadv,carrier";

/// Header row with `carrier` left out.
pub const HEADER_WITHOUT_CARRIER: &str = "A/D,fltno,departure_time,arrival_time,origin,dest,STATION,weekday,from_date,until_date,flight_type,actypeadv";

/// CSV schedule file with the full header and the given data rows.
pub fn schedule_csv(rows: &[&str]) -> Vec<u8> {
    csv_with_header(HEADER, rows)
}

pub fn csv_with_header(header: &str, rows: &[&str]) -> Vec<u8> {
    let mut out = String::from(header);
    for row in rows {
        out.push('\n');
        out.push_str(row);
    }
    out.push('\n');
    out.into_bytes()
}

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the previous values on unwind and serializes access to the
/// process environment across parallel tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}
