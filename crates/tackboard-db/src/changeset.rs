use crate::schema::{posts, users};
use diesel::prelude::AsChangeset;
use time::OffsetDateTime;

#[derive(AsChangeset)]
#[diesel(table_name = users)]
pub struct UserChangeset<'a> {
    pub name: Option<&'a str>,
    pub password: Option<&'a str>,
    pub updated_at: OffsetDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = posts)]
pub struct PostChangeset<'a> {
    pub title: &'a str,
    pub link: &'a str,
    pub description: &'a str,
    pub updated_at: OffsetDateTime,
}
