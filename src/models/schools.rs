use crate::save_fn;
use crate::schema::school;
use crate::utils::uuid_string;
use diesel::prelude::*;

#[derive(Queryable, Debug, Clone)]
pub struct School {
    pub school_id: String,
    pub name: Option<String>,
    pub location: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name=school)]
pub struct NewSchool {
    school_id: String,
    name: Option<String>,
    location: Option<String>,
}

impl NewSchool {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            school_id: uuid_string(),
            name: Some(name.into()),
            location: None,
        }
    }

    save_fn!(school::table, School);
}
