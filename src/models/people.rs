use crate::save_fn;
use crate::schema::person;
use crate::utils::uuid_string;
use diesel::prelude::*;

#[derive(Queryable, Debug, Clone)]
pub struct Person {
    pub person_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name=person)]
pub struct NewPerson {
    person_id: String,
    first_name: Option<String>,
    last_name: Option<String>,
}

impl NewPerson {
    pub fn new<S: Into<String>>(first_name: S, last_name: S) -> Self {
        Self {
            person_id: uuid_string(),
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
        }
    }

    save_fn!(person::table, Person);
}
