use rusqlite::{Connection, params, types::Value};

use crate::error::Result;
use crate::models::*;

use super::from_row::{ACTOR_COLS, MOVIE_COLS, query_all, query_one};

/// Builder for dynamic UPDATE statements with optional fields.
/// Combines multiple field updates into a single query.
struct UpdateBuilder {
    table: &'static str,
    id: i64,
    fields: Vec<(&'static str, Value)>,
}

impl UpdateBuilder {
    fn new(table: &'static str, id: i64) -> Self {
        Self {
            table,
            id,
            fields: Vec::new(),
        }
    }

    fn set_opt<V: Into<Value>>(mut self, column: &'static str, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.fields.push((column, v.into()));
        }
        self
    }

    /// Returns whether a row with the id exists. An empty update still
    /// checks existence so callers can tell "nothing to change" from "gone".
    fn execute(self, conn: &Connection) -> Result<bool> {
        if self.fields.is_empty() {
            let sql = format!("SELECT 1 FROM {} WHERE id = ?1", self.table);
            let exists = conn.prepare(&sql)?.exists(params![self.id])?;
            return Ok(exists);
        }
        let sets: Vec<String> = self
            .fields
            .iter()
            .map(|(col, _)| format!("{} = ?", col))
            .collect();
        let mut values: Vec<Value> = self.fields.into_iter().map(|(_, v)| v).collect();
        values.push(self.id.into());
        let sql = format!("UPDATE {} SET {} WHERE id = ?", self.table, sets.join(", "));
        let affected = conn.execute(&sql, rusqlite::params_from_iter(values))?;
        Ok(affected > 0)
    }
}

// ============ Actors ============

pub fn create_actor(conn: &Connection, input: &CreateActor) -> Result<Actor> {
    conn.execute(
        "INSERT INTO actors (name, age, gender) VALUES (?1, ?2, ?3)",
        params![&input.name, input.age, &input.gender],
    )?;

    Ok(Actor {
        id: conn.last_insert_rowid(),
        name: input.name.clone(),
        age: input.age,
        gender: input.gender.clone(),
    })
}

pub fn get_actor_by_id(conn: &Connection, id: i64) -> Result<Option<Actor>> {
    query_one(
        conn,
        &format!("SELECT {} FROM actors WHERE id = ?1", ACTOR_COLS),
        params![id],
    )
}

pub fn list_actors(conn: &Connection) -> Result<Vec<Actor>> {
    query_all(
        conn,
        &format!("SELECT {} FROM actors ORDER BY id", ACTOR_COLS),
        [],
    )
}

/// Apply the non-empty fields of `input`. Returns false if the actor is gone.
pub fn update_actor(conn: &Connection, id: i64, input: &UpdateActor) -> Result<bool> {
    UpdateBuilder::new("actors", id)
        .set_opt("name", input.name().map(str::to_string))
        .set_opt("age", input.age())
        .set_opt("gender", input.gender().map(str::to_string))
        .execute(conn)
}

pub fn delete_actor(conn: &Connection, id: i64) -> Result<bool> {
    let deleted = conn.execute("DELETE FROM actors WHERE id = ?1", params![id])?;
    Ok(deleted > 0)
}

// ============ Movies ============

pub fn create_movie(conn: &Connection, input: &CreateMovie) -> Result<Movie> {
    conn.execute(
        "INSERT INTO movies (title, release_date) VALUES (?1, ?2)",
        params![&input.title, input.release_date],
    )?;

    Ok(Movie {
        id: conn.last_insert_rowid(),
        title: input.title.clone(),
        release_date: input.release_date,
    })
}

pub fn get_movie_by_id(conn: &Connection, id: i64) -> Result<Option<Movie>> {
    query_one(
        conn,
        &format!("SELECT {} FROM movies WHERE id = ?1", MOVIE_COLS),
        params![id],
    )
}

pub fn list_movies(conn: &Connection) -> Result<Vec<Movie>> {
    query_all(
        conn,
        &format!("SELECT {} FROM movies ORDER BY id", MOVIE_COLS),
        [],
    )
}

/// `release_date` is passed already parsed; see [`UpdateMovie::release_date`].
pub fn update_movie(
    conn: &Connection,
    id: i64,
    title: Option<&str>,
    release_date: Option<chrono::NaiveDate>,
) -> Result<bool> {
    UpdateBuilder::new("movies", id)
        .set_opt("title", title.map(str::to_string))
        .set_opt("release_date", release_date.map(|d| d.format(RELEASE_DATE_FORMAT).to_string()))
        .execute(conn)
}

pub fn delete_movie(conn: &Connection, id: i64) -> Result<bool> {
    let deleted = conn.execute("DELETE FROM movies WHERE id = ?1", params![id])?;
    Ok(deleted > 0)
}
