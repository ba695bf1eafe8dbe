use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub gender: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateActor {
    pub name: String,
    pub age: i64,
    pub gender: String,
}

/// Partial update. Absent, empty, and zero values leave the column untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateActor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub gender: Option<String>,
}

impl UpdateActor {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.is_empty())
    }

    pub fn age(&self) -> Option<i64> {
        self.age.filter(|a| *a != 0)
    }

    pub fn gender(&self) -> Option<&str> {
        self.gender.as_deref().filter(|s| !s.is_empty())
    }
}
