use rusqlite::{Connection, Row};

use super::person_types::{Person, PersonInput};

/// SQL for the `people` table. Ids taken from the request path are bound as
/// text and compared through the column's INTEGER affinity.
pub struct PersonManager;

fn person_from_row(row: &Row<'_>) -> rusqlite::Result<Person> {
    Ok(Person {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
    })
}

impl PersonManager {
    pub fn list(conn: &Connection) -> rusqlite::Result<Vec<Person>> {
        let mut stmt = conn.prepare("SELECT id, name, age FROM people")?;
        let people = stmt
            .query_map([], person_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(people)
    }

    /// Fails with [`rusqlite::Error::QueryReturnedNoRows`] when nothing matches.
    pub fn get(conn: &Connection, id: &str) -> rusqlite::Result<Person> {
        conn.query_row(
            "SELECT id, name, age FROM people WHERE id = ?1",
            [id],
            person_from_row,
        )
    }

    pub fn create(conn: &Connection, input: PersonInput) -> rusqlite::Result<Person> {
        conn.execute(
            "INSERT INTO people (name, age) VALUES (?1, ?2)",
            (&input.name, input.age),
        )?;
        Ok(Person::from_input(conn.last_insert_rowid(), input))
    }

    /// Returns the number of rows changed; zero is not an error.
    pub fn update(conn: &Connection, id: &str, input: &PersonInput) -> rusqlite::Result<usize> {
        conn.execute(
            "UPDATE people SET name = ?1, age = ?2 WHERE id = ?3",
            (&input.name, input.age, id),
        )
    }

    /// Returns the number of rows removed; zero is not an error.
    pub fn delete(conn: &Connection, id: &str) -> rusqlite::Result<usize> {
        conn.execute("DELETE FROM people WHERE id = ?1", [id])
    }
}
