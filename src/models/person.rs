use serde::{Deserialize, Serialize};

use super::enums::Gender;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub age: u16,
    pub gender: Gender,
}
