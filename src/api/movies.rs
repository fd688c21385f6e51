use std::path::Path;

use reqwest::{
    Method,
    multipart::{Form, Part},
};
use serde_json::Value;

use crate::{
    api::{ApiClient, ApiError, QueryKey, Tag, decode},
    types::{
        ImportResponse, ListParams, Movie, MovieListResponse, MoviePatch, MovieResponse, NewMovie,
        SortField, SortOrder,
    },
    view::pagination::DEFAULT_PAGE_SIZE,
};

/// Page size the backend search is always issued with.
pub const SEARCH_LIMIT: u64 = DEFAULT_PAGE_SIZE;

/// Multipart field the import endpoint reads the file from.
const IMPORT_FIELD: &str = "movies";

impl ApiClient {
    /// Fetches one page of movies, sorted as requested.
    pub async fn list_movies(&self, params: &ListParams) -> Result<MovieListResponse, ApiError> {
        let key = QueryKey::new("movies")
            .param("sort", params.sort.as_str())
            .param("order", params.order.as_str())
            .param("limit", params.limit)
            .param("offset", params.offset);
        self.query(key, &[Tag::Movie]).await
    }

    /// Free-text search. Sort, order and paging are fixed.
    pub async fn search_movies(&self, search: &str) -> Result<MovieListResponse, ApiError> {
        let key = QueryKey::new("movies")
            .param("search", search)
            .param("sort", SortField::Year.as_str())
            .param("order", SortOrder::Desc.as_str())
            .param("limit", SEARCH_LIMIT)
            .param("offset", 0);
        self.query(key, &[Tag::Movie]).await
    }

    pub async fn get_movie(&self, id: u64) -> Result<Movie, ApiError> {
        let response: MovieResponse = self
            .query(QueryKey::new(format!("movies/{}", id)), &[Tag::Movie])
            .await?;
        response.data.ok_or(ApiError::NotFound)
    }

    /// Creates a movie. The created record is returned when the backend echoes it.
    pub async fn create_movie(&self, movie: &NewMovie) -> Result<Option<Movie>, ApiError> {
        let builder = self.request(Method::POST, "movies", true)?.json(movie);
        let body = self.mutate(builder, &[Tag::Movie]).await?;
        Ok(echoed_movie(body))
    }

    /// Partial update keyed by id.
    pub async fn edit_movie(&self, id: u64, patch: &MoviePatch) -> Result<Option<Movie>, ApiError> {
        let builder = self
            .request(Method::PATCH, &format!("movies/{}", id), true)?
            .json(patch);
        let body = self.mutate(builder, &[Tag::Movie]).await?;
        Ok(echoed_movie(body))
    }

    pub async fn delete_movie(&self, id: u64) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, &format!("movies/{}", id), true)?;
        self.mutate(builder, &[Tag::Movie]).await?;
        Ok(())
    }

    /// Uploads a plain-text movie list. Parsing happens on the server.
    pub async fn import_movies(&self, path: &Path) -> Result<ImportResponse, ApiError> {
        let content = async_fs::read(path)
            .await
            .map_err(|e| ApiError::Validation(format!("cannot read {}: {}", path.display(), e)))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "movies.txt".to_string());

        let part = Part::bytes(content)
            .file_name(file_name)
            .mime_str("text/plain")?;
        let form = Form::new().part(IMPORT_FIELD, part);

        let builder = self
            .request(Method::POST, "movies/import", true)?
            .multipart(form);
        let body = self.mutate(builder, &[Tag::Movie]).await?;
        decode(body)
    }
}

fn echoed_movie(body: Value) -> Option<Movie> {
    body.get("data")
        .cloned()
        .and_then(|data| serde_json::from_value(data).ok())
}
