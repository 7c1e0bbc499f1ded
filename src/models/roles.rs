use crate::models::people::Person;
use crate::save_fn;
use crate::schema::role;
use crate::utils::uuid_string;
use diesel::prelude::*;

pub const WRESTLER: &str = "wrestler";

#[derive(Queryable, Debug, Clone)]
pub struct Role {
    pub role_id: String,
    pub person_id: String,
    pub role_type: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name=role)]
pub struct NewRole {
    role_id: String,
    person_id: String,
    role_type: Option<String>,
}

impl NewRole {
    pub fn new(person: &Person, role_type: &str) -> Self {
        Self {
            role_id: uuid_string(),
            person_id: person.person_id.clone(),
            role_type: Some(role_type.to_string()),
        }
    }

    pub fn wrestler(person: &Person) -> Self {
        Self::new(person, WRESTLER)
    }

    save_fn!(role::table, Role);
}
