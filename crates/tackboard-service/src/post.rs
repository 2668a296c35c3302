use crate::{invalid_input, not_blank};
use diesel::{
    result::Error as DieselError, ExpressionMethods, OptionalExtension, QueryDsl,
    RunQueryDsl, SelectableHelper,
};
use garde::Validate;
use std::borrow::Cow;
use tackboard_db::{
    changeset::PostChangeset,
    insert::NewPost,
    model::{Post, User},
    schema::{posts, users},
    DbPool,
};
use tackboard_error::{tackboard_error, Error, ErrorType, Result};
use time::OffsetDateTime;
use typed_builder::TypedBuilder;
use url::Url;

/// Prefix links without a scheme with `http://`
#[must_use]
pub fn normalise_link(link: &str) -> Cow<'_, str> {
    let link = link.trim();
    if link.contains("://") {
        Cow::Borrowed(link)
    } else {
        Cow::Owned(format!("http://{link}"))
    }
}

fn valid_link<T>(value: &str, _context: &T) -> garde::Result {
    not_blank(value, &())?;

    let url = Url::parse(&normalise_link(value))
        .map_err(|error| garde::Error::new(format!("not a valid link ({error})")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(garde::Error::new("link has to use http or https"));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(garde::Error::new("link has to have a host"));
    }

    Ok(())
}

fn map_write_error(error: DieselError) -> Error {
    match error {
        DieselError::NotFound => tackboard_error!(type = ErrorType::NotFound, "post not found"),
        error => error.into(),
    }
}

#[derive(Clone, TypedBuilder, Validate)]
pub struct CreatePost {
    /// ID of the user creating the post
    #[garde(skip)]
    user_id: i64,

    #[builder(setter(into))]
    #[garde(custom(not_blank), length(chars, max = 255))]
    title: String,

    #[builder(setter(into))]
    #[garde(custom(valid_link))]
    link: String,

    #[builder(default, setter(into))]
    #[garde(length(chars, max = 255))]
    description: String,
}

#[derive(Clone, TypedBuilder, Validate)]
pub struct UpdatePost {
    #[builder(setter(into))]
    #[garde(custom(not_blank), length(chars, max = 255))]
    title: String,

    #[builder(setter(into))]
    #[garde(custom(valid_link))]
    link: String,

    #[builder(default, setter(into))]
    #[garde(length(chars, max = 255))]
    description: String,
}

#[derive(Clone, TypedBuilder)]
pub struct PostService {
    db_pool: DbPool,
}

impl PostService {
    /// All posts, each with its author
    #[instrument(skip(self))]
    pub async fn list_with_authors(&self) -> Result<Vec<(Post, User)>> {
        self.db_pool
            .with_connection(|conn| {
                posts::table
                    .inner_join(users::table)
                    .order(posts::id.asc())
                    .select((Post::as_select(), User::as_select()))
                    .load(conn)
                    .map_err(Error::from)
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        self.db_pool
            .with_connection(move |conn| {
                posts::table
                    .find(id)
                    .select(Post::as_select())
                    .first(conn)
                    .optional()
                    .map_err(Error::from)
            })
            .await
    }

    /// The post together with its author
    #[instrument(skip(self))]
    pub async fn get_with_author(&self, id: i64) -> Result<Option<(Post, User)>> {
        self.db_pool
            .with_connection(move |conn| {
                posts::table
                    .inner_join(users::table)
                    .filter(posts::id.eq(id))
                    .select((Post::as_select(), User::as_select()))
                    .first(conn)
                    .optional()
                    .map_err(Error::from)
            })
            .await
    }

    #[instrument(skip_all, fields(user_id = create.user_id))]
    pub async fn create(&self, create: CreatePost) -> Result<Post> {
        create.validate().map_err(invalid_input)?;

        let post = self
            .db_pool
            .with_connection(move |conn| {
                let now = OffsetDateTime::now_utc();

                diesel::insert_into(posts::table)
                    .values(NewPost {
                        user_id: create.user_id,
                        title: create.title.trim(),
                        link: &normalise_link(&create.link),
                        description: create.description.trim(),
                        created_at: now,
                        updated_at: now,
                    })
                    .returning(Post::as_returning())
                    .get_result(conn)
                    .map_err(map_write_error)
            })
            .await?;

        info!(post.id, "created post");
        Ok(post)
    }

    #[instrument(skip(self, update))]
    pub async fn update(&self, id: i64, update: UpdatePost) -> Result<Post> {
        update.validate().map_err(invalid_input)?;

        self.db_pool
            .with_connection(move |conn| {
                diesel::update(posts::table.find(id))
                    .set(PostChangeset {
                        title: update.title.trim(),
                        link: &normalise_link(&update.link),
                        description: update.description.trim(),
                        updated_at: OffsetDateTime::now_utc(),
                    })
                    .returning(Post::as_returning())
                    .get_result(conn)
                    .map_err(map_write_error)
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        let deleted = self
            .db_pool
            .with_connection(move |conn| {
                diesel::delete(posts::table.find(id))
                    .execute(conn)
                    .map_err(Error::from)
            })
            .await?;

        if deleted == 0 {
            return Err(tackboard_error!(type = ErrorType::NotFound, "post not found"));
        }

        Ok(())
    }
}
