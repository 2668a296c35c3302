use crate::schema::{posts, users};
use diesel::prelude::Insertable;
use time::OffsetDateTime;

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub password: &'a str,
    pub uid: &'a str,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = posts)]
pub struct NewPost<'a> {
    pub user_id: i64,
    pub title: &'a str,
    pub link: &'a str,
    pub description: &'a str,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
