//! Row mapping shared by the query functions.

use rusqlite::{Connection, Params, Row};

use crate::error::Result;
use crate::models::{Actor, Movie};

pub const ACTOR_COLS: &str = "id, name, age, gender";
pub const MOVIE_COLS: &str = "id, title, release_date";

pub trait FromRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}

impl FromRow for Actor {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Actor {
            id: row.get(0)?,
            name: row.get(1)?,
            age: row.get(2)?,
            gender: row.get(3)?,
        })
    }
}

impl FromRow for Movie {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Movie {
            id: row.get(0)?,
            title: row.get(1)?,
            release_date: row.get(2)?,
        })
    }
}

pub fn query_one<T: FromRow>(
    conn: &Connection,
    sql: &str,
    params: impl Params,
) -> Result<Option<T>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    match rows.next()? {
        Some(row) => Ok(Some(T::from_row(row)?)),
        None => Ok(None),
    }
}

pub fn query_all<T: FromRow>(conn: &Connection, sql: &str, params: impl Params) -> Result<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, |row| T::from_row(row))?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}
