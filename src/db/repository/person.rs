use std::str::FromStr;

use rusqlite::{params, Connection, OptionalExtension};

use super::{delete_by_id, require_non_empty};
use crate::db::DatabaseError;
use crate::models::enums::*;
use crate::models::*;

pub const PERSON_COLUMNS: &str = "p.id, p.name, p.age, p.gender";

// Internal row type for Person mapping
pub(crate) struct PersonRow {
    id: i64,
    name: String,
    age: u16,
    gender: String,
}

pub(crate) fn person_row_from_rusqlite(row: &rusqlite::Row<'_>) -> Result<PersonRow, rusqlite::Error> {
    Ok(PersonRow {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        gender: row.get(3)?,
    })
}

pub(crate) fn person_from_row(row: PersonRow) -> Result<Person, DatabaseError> {
    Ok(Person {
        id: row.id,
        name: row.name,
        age: row.age,
        gender: Gender::from_str(&row.gender)?,
    })
}

/// Run a person query whose select list starts with `PERSON_COLUMNS`.
pub(crate) fn query_persons(
    conn: &Connection,
    sql: &str,
    params: &[&dyn rusqlite::types::ToSql],
) -> Result<Vec<Person>, DatabaseError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, person_row_from_rusqlite)?;

    let mut persons = Vec::new();
    for row in rows {
        persons.push(person_from_row(row?)?);
    }
    Ok(persons)
}

pub fn insert_person(
    conn: &Connection,
    name: &str,
    age: u16,
    gender: Gender,
) -> Result<Person, DatabaseError> {
    require_non_empty("person.name", name)?;
    conn.execute(
        "INSERT INTO persons (name, age, gender) VALUES (?1, ?2, ?3)",
        params![name, age, gender.as_str()],
    )?;
    Ok(Person {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        age,
        gender,
    })
}

pub fn get_person(conn: &Connection, id: i64) -> Result<Option<Person>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {PERSON_COLUMNS} FROM persons p WHERE p.id = ?1"),
            params![id],
            person_row_from_rusqlite,
        )
        .optional()?;
    row.map(person_from_row).transpose()
}

pub fn list_persons(conn: &Connection) -> Result<Vec<Person>, DatabaseError> {
    query_persons(
        conn,
        &format!("SELECT {PERSON_COLUMNS} FROM persons p ORDER BY p.id"),
        &[],
    )
}

pub fn delete_person(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    delete_by_id(conn, "persons", "person", id)
}
