//! REST route construction for remote models.
//!
//! Routes follow Rails resource conventions: a type's requests go to its
//! controller (`posts`), members by id (`posts/7`), and collections can be
//! prefixed by a parent resource (`posts/7/responses`).

use railsync_model::{RemoteId, RemoteModel};

/// A request path relative to the configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    path: String,
}

impl Route {
    /// The collection route for a type: `posts`.
    #[must_use]
    pub fn collection<T: RemoteModel>() -> Self {
        Self {
            path: T::controller_name(),
        }
    }

    /// The member route for a persisted object: `posts/7`.
    #[must_use]
    pub fn member<T: RemoteModel>(id: RemoteId) -> Self {
        Self {
            path: format!("{}/{}", T::controller_name(), id),
        }
    }

    /// A collection route prefixed by a parent resource:
    /// `posts/7/responses`.
    #[must_use]
    pub fn collection_via<T: RemoteModel, P: RemoteModel>(parent_id: RemoteId) -> Self {
        Self {
            path: format!(
                "{}/{}/{}",
                P::controller_name(),
                parent_id,
                T::controller_name()
            ),
        }
    }

    /// Appends escaped query parameters.
    #[must_use]
    pub fn with_query<'a, I>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let query: Vec<String> = params
            .into_iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect();
        if !query.is_empty() {
            self.path = format!("{}?{}", self.path, query.join("&"));
        }
        self
    }

    /// The path relative to the base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The absolute URL under a base.
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.path)
    }
}
