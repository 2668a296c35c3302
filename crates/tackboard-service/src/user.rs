use crate::{invalid_input, not_blank};
use diesel::{
    result::{DatabaseErrorKind, Error as DieselError},
    BelongingToDsl, ExpressionMethods, GroupedBy, OptionalExtension, QueryDsl, RunQueryDsl,
    SelectableHelper,
};
use garde::Validate;
use rand::{distributions::Alphanumeric, Rng};
use subtle::ConstantTimeEq;
use tackboard_db::{
    changeset::UserChangeset,
    insert::NewUser,
    model::{Post, User},
    schema::{posts, users},
    DbPool,
};
use tackboard_error::{tackboard_error, Error, ErrorType, Result};
use time::OffsetDateTime;
use typed_builder::TypedBuilder;

const UID_LENGTH: usize = 32;

fn generate_uid() -> String {
    rand::thread_rng()
        .sample_iter(Alphanumeric)
        .map(char::from)
        .take(UID_LENGTH)
        .collect()
}

fn map_write_error(error: DieselError) -> Error {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => tackboard_error!(
            type = ErrorType::BadRequest(None).with_body("name: name is already taken"),
            "user name already taken"
        ),
        DieselError::NotFound => tackboard_error!(type = ErrorType::NotFound, "user not found"),
        error => error.into(),
    }
}

#[derive(Clone, TypedBuilder, Validate)]
pub struct Register {
    /// Name of the new user
    #[builder(setter(into))]
    #[garde(custom(not_blank), length(chars, min = 1, max = 64))]
    name: String,

    /// Password of the new user
    #[builder(setter(into))]
    #[garde(custom(not_blank))]
    password: String,
}

#[derive(Clone, TypedBuilder, Validate)]
pub struct Update {
    /// New name of the user
    #[builder(setter(into))]
    #[garde(custom(not_blank), length(chars, min = 1, max = 64))]
    name: String,

    /// New password of the user
    #[builder(setter(into))]
    #[garde(custom(not_blank))]
    password: String,
}

#[derive(Clone, TypedBuilder)]
pub struct Login {
    #[builder(setter(into))]
    name: String,

    #[builder(setter(into))]
    password: String,
}

#[derive(Clone, TypedBuilder)]
pub struct UserService {
    db_pool: DbPool,
}

impl UserService {
    /// All users, each with the posts they created
    #[instrument(skip(self))]
    pub async fn list_with_posts(&self) -> Result<Vec<(User, Vec<Post>)>> {
        self.db_pool
            .with_connection(|conn| {
                let users: Vec<User> = users::table
                    .order(users::id.asc())
                    .select(User::as_select())
                    .load(conn)?;

                let posts: Vec<Post> = Post::belonging_to(&users)
                    .order(posts::id.asc())
                    .select(Post::as_select())
                    .load(conn)?;

                let grouped = posts.grouped_by(&users);
                Ok::<_, Error>(users.into_iter().zip(grouped).collect())
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        self.db_pool
            .with_connection(move |conn| {
                users::table
                    .find(id)
                    .select(User::as_select())
                    .first(conn)
                    .optional()
                    .map_err(Error::from)
            })
            .await
    }

    /// Resolve the account behind a public identifier
    #[instrument(skip_all)]
    pub async fn get_by_uid(&self, uid: &str) -> Result<Option<User>> {
        let uid = uid.to_string();

        self.db_pool
            .with_connection(move |conn| {
                users::table
                    .filter(users::uid.eq(uid))
                    .select(User::as_select())
                    .first(conn)
                    .optional()
                    .map_err(Error::from)
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn posts_of(&self, user_id: i64) -> Result<Vec<Post>> {
        self.db_pool
            .with_connection(move |conn| {
                posts::table
                    .filter(posts::user_id.eq(user_id))
                    .order(posts::id.asc())
                    .select(Post::as_select())
                    .load(conn)
                    .map_err(Error::from)
            })
            .await
    }

    #[instrument(skip_all, fields(name = %register.name))]
    pub async fn register(&self, register: Register) -> Result<User> {
        register.validate().map_err(invalid_input)?;

        let user = self
            .db_pool
            .with_connection(move |conn| {
                let now = OffsetDateTime::now_utc();
                let uid = generate_uid();

                diesel::insert_into(users::table)
                    .values(NewUser {
                        name: register.name.trim(),
                        password: register.password.as_str(),
                        uid: uid.as_str(),
                        created_at: now,
                        updated_at: now,
                    })
                    .returning(User::as_returning())
                    .get_result(conn)
                    .map_err(map_write_error)
            })
            .await?;

        info!(user.id, "registered new user");
        Ok(user)
    }

    /// Check the credentials, returning the user they belong to
    ///
    /// Unknown names and wrong passwords are indistinguishable to the caller.
    #[instrument(skip_all, fields(name = %login.name))]
    pub async fn authenticate(&self, login: Login) -> Result<Option<User>> {
        let name = login.name.trim().to_string();
        let user = self
            .db_pool
            .with_connection(move |conn| {
                users::table
                    .filter(users::name.eq(name))
                    .select(User::as_select())
                    .first(conn)
                    .optional()
                    .map_err(Error::from)
            })
            .await?;

        let user = user.filter(|user| {
            user.password
                .as_bytes()
                .ct_eq(login.password.as_bytes())
                .into()
        });

        Ok(user)
    }

    #[instrument(skip(self, update))]
    pub async fn update(&self, id: i64, update: Update) -> Result<User> {
        update.validate().map_err(invalid_input)?;

        self.db_pool
            .with_connection(move |conn| {
                diesel::update(users::table.find(id))
                    .set(UserChangeset {
                        name: Some(update.name.trim()),
                        password: Some(update.password.as_str()),
                        updated_at: OffsetDateTime::now_utc(),
                    })
                    .returning(User::as_returning())
                    .get_result(conn)
                    .map_err(map_write_error)
            })
            .await
    }

    /// Delete the user together with all of their posts
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        let deleted_posts = self
            .db_pool
            .with_transaction(move |conn| {
                let deleted_posts =
                    diesel::delete(posts::table.filter(posts::user_id.eq(id))).execute(conn)?;

                let deleted = diesel::delete(users::table.find(id)).execute(conn)?;
                if deleted == 0 {
                    return Err(tackboard_error!(type = ErrorType::NotFound, "user not found"));
                }

                Ok(deleted_posts)
            })
            .await?;

        info!(deleted_posts, "deleted user");
        Ok(())
    }
}
