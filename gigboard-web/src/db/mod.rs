//! Query layer for the booking directory
//!
//! Ad hoc aggregate and join queries executed per request. Reads take
//! the shared pool; mutations run inside an explicit transaction and
//! roll back on drop if the commit is never reached.

pub mod artists;
pub mod shows;
pub mod venues;

/// Search outcome: total match count plus the matching rows
#[derive(Debug)]
pub struct SearchOutcome<T> {
    pub count: i64,
    pub data: Vec<T>,
}
