use serde::{Deserialize, Serialize};

/// Request body for create and update. Unknown fields, `id` included, are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonInput {
    pub name: String,
    pub age: i64,
}

/// One row of the `people` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

impl Person {
    pub fn from_input(id: i64, input: PersonInput) -> Self {
        Self {
            id,
            name: input.name,
            age: input.age,
        }
    }
}

/// Body of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

impl DeleteResponse {
    pub fn for_id(id: &str) -> Self {
        Self {
            message: format!("Person {id} deleted"),
        }
    }
}
