use crate::client::{ArrClient, DEFAULT_API_VERSION};
use crate::config::{HttpConfig, RadarrConfig};
use crate::error::{ArrError, Result};
use crate::http::{HttpClient, Transport};
use crate::models::{
    positive, AddMovieOptions, DeleteMovieOptions, DeleteQueueOptions, Ids, LookupMovie,
    MovieEditorDelete, MovieEditorUpdate, MovieFileBulkDelete, MovieId, NewMovie,
    NewMovieAddOptions, QualityProfile, QueueBulkDelete, QueueOptions, RadarrEventType,
    RootFolder, Tag,
};
use crate::query::QueryParams;
use serde_json::Value;
use tracing::{error, info, instrument};

/// Radarr v3 API.
pub struct RadarrClient<T = HttpClient> {
    base: ArrClient<T>,
}

impl RadarrClient<HttpClient> {
    pub fn from_config(config: &RadarrConfig, http: &HttpConfig) -> Result<Self> {
        let transport = HttpClient::with_timeout(http.timeout())?;
        let base = ArrClient::with_version(
            transport,
            &config.base_url,
            config.api_key.clone(),
            config.api_version.as_deref().unwrap_or(DEFAULT_API_VERSION),
        )?;
        Ok(Self { base })
    }
}

impl<T: Transport> RadarrClient<T> {
    pub fn new(transport: T, host_url: &str, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base: ArrClient::new(transport, host_url, api_key)?,
        })
    }

    pub fn base(&self) -> &ArrClient<T> {
        &self.base
    }

    // Movies

    #[instrument(skip(self))]
    pub async fn get_movies(&self) -> Result<Vec<Value>> {
        self.base.get_json("movie", QueryParams::new()).await
    }

    #[instrument(skip(self))]
    pub async fn get_movie_by_movie_id(&self, id: i64) -> Result<Value> {
        positive("id", id)?;
        self.base.get(&format!("movie/{}", id), QueryParams::new()).await
    }

    /// Library entries matching a TMDb id; empty when the movie is not added.
    #[instrument(skip(self))]
    pub async fn get_movie_by_tmdb_id(&self, tmdb_id: i64) -> Result<Vec<Value>> {
        positive("tmdb_id", tmdb_id)?;
        let mut query = QueryParams::new();
        query.push("tmdbId", tmdb_id);
        self.base.get_json("movie", query).await
    }

    /// Searches the metadata catalog. `term` is free text or a prefixed id
    /// such as `tmdb:603` or `imdb:tt0133093`.
    #[instrument(skip(self))]
    pub async fn lookup_movie(&self, term: &str) -> Result<Vec<Value>> {
        if term.trim().is_empty() {
            return Err(ArrError::missing("term"));
        }
        info!("Looking up movie: {}", term);
        let mut query = QueryParams::new();
        query.push("term", term);
        self.base.get_json("movie/lookup", query).await
    }

    pub async fn lookup_movie_by_tmdb_id(&self, id: i64) -> Result<Vec<Value>> {
        self.lookup_movie(&MovieId::Tmdb(id).lookup_term()).await
    }

    pub async fn lookup_movie_by_imdb_id(&self, id: &str) -> Result<Vec<Value>> {
        self.lookup_movie(&MovieId::Imdb(id.to_string()).lookup_term()).await
    }

    /// Builds the body for [`add_movie`](Self::add_movie) from the first
    /// catalog match.
    #[instrument(skip(self, options))]
    pub async fn movie_json(&self, id: &MovieId, options: &AddMovieOptions) -> Result<NewMovie> {
        let term = id.lookup_term();
        let results = self.lookup_movie(&term).await?;
        let Some(first) = results.into_iter().next() else {
            return Err(ArrError::ResourceNotFound {
                path: format!("movie/lookup?term={}", term),
            });
        };
        let found: LookupMovie = serde_json::from_value(first)?;

        info!("Found movie: {} (TMDB: {})", found.title, found.tmdb_id);

        Ok(NewMovie {
            title_slug: found
                .title_slug
                .unwrap_or_else(|| found.tmdb_id.to_string()),
            title: found.title,
            year: found.year.unwrap_or(0),
            tmdb_id: found.tmdb_id,
            imdb_id: found.imdb_id,
            images: found.images,
            quality_profile_id: options.quality_profile_id,
            root_folder_path: options.root_dir.clone(),
            monitored: options.monitored,
            minimum_availability: options.minimum_availability,
            tags: options.tags.clone(),
            add_options: NewMovieAddOptions {
                search_for_movie: options.search_for_movie,
            },
        })
    }

    #[instrument(skip(self, options))]
    pub async fn add_movie(&self, id: MovieId, options: AddMovieOptions) -> Result<Value> {
        let movie = self.movie_json(&id, &options).await?;
        let title = movie.title.clone();

        info!(
            "Adding movie '{}' with quality profile ID: {}, root folder: {}",
            title, movie.quality_profile_id, movie.root_folder_path
        );

        let body = serde_json::to_value(&movie)?;
        match self.base.post("movie", QueryParams::new(), Some(body)).await {
            Ok(added) => {
                info!("Successfully added movie: {}", title);
                Ok(added)
            }
            Err(e) => {
                error!("Failed to add movie '{}': {}", title, e);
                Err(e)
            }
        }
    }

    /// Saves an edited movie record, as returned by
    /// [`get_movie_by_movie_id`](Self::get_movie_by_movie_id).
    #[instrument(skip(self, data))]
    pub async fn upd_movie(&self, data: &Value, move_files: Option<bool>) -> Result<Value> {
        let id = data
            .get("id")
            .and_then(Value::as_i64)
            .ok_or_else(|| ArrError::missing("id"))?;
        positive("id", id)?;

        let mut query = QueryParams::new();
        query.push_bool_opt("moveFiles", move_files);
        self.base
            .put(&format!("movie/{}", id), query, Some(data.clone()))
            .await
    }

    #[instrument(skip(self, update))]
    pub async fn upd_movies(&self, update: &MovieEditorUpdate) -> Result<Value> {
        Ids::Many(update.movie_ids.clone()).validate("movie_ids")?;
        let body = serde_json::to_value(update)?;
        self.base
            .put("movie/editor", QueryParams::new(), Some(body))
            .await
    }

    /// A single id targets `movie/{id}` with the flags in the query; a list
    /// goes to `movie/editor` with the flags in the body.
    #[instrument(skip(self, ids))]
    pub async fn del_movie(
        &self,
        ids: impl Into<Ids>,
        options: DeleteMovieOptions,
    ) -> Result<Value> {
        let ids = ids.into();
        ids.validate("id")?;

        match ids {
            Ids::One(id) => {
                let mut query = QueryParams::new();
                query
                    .push_bool_opt("deleteFiles", options.delete_files)
                    .push_bool_opt("addImportExclusion", options.add_import_exclusion);
                self.base.delete(&format!("movie/{}", id), query, None).await
            }
            Ids::Many(movie_ids) => {
                let body = serde_json::to_value(MovieEditorDelete {
                    movie_ids,
                    delete_files: options.delete_files,
                    add_import_exclusion: options.add_import_exclusion,
                })?;
                self.base
                    .delete("movie/editor", QueryParams::new(), Some(body))
                    .await
            }
        }
    }

    // Movie files

    #[instrument(skip(self))]
    pub async fn get_movie_file(&self, id: i64) -> Result<Value> {
        positive("id", id)?;
        self.base
            .get(&format!("moviefile/{}", id), QueryParams::new())
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_movie_files(&self, ids: &[i64]) -> Result<Vec<Value>> {
        Ids::from(ids).validate("movie_file_ids")?;
        let mut query = QueryParams::new();
        query.push_all("movieFileIds", ids);
        self.base.get_json("moviefile", query).await
    }

    #[instrument(skip(self))]
    pub async fn get_movie_files_by_movie_id(&self, movie_id: i64) -> Result<Vec<Value>> {
        positive("movie_id", movie_id)?;
        let mut query = QueryParams::new();
        query.push("movieId", movie_id);
        self.base.get_json("moviefile", query).await
    }

    #[instrument(skip(self, ids))]
    pub async fn del_movie_file(&self, ids: impl Into<Ids>) -> Result<Value> {
        let ids = ids.into();
        ids.validate("id")?;

        match ids {
            Ids::One(id) => {
                self.base
                    .delete(&format!("moviefile/{}", id), QueryParams::new(), None)
                    .await
            }
            Ids::Many(movie_file_ids) => {
                let body = serde_json::to_value(MovieFileBulkDelete { movie_file_ids })?;
                self.base
                    .delete("moviefile/bulk", QueryParams::new(), Some(body))
                    .await
            }
        }
    }

    // History and blocklist

    #[instrument(skip(self))]
    pub async fn get_movie_history(
        &self,
        movie_id: i64,
        event_type: Option<RadarrEventType>,
    ) -> Result<Vec<Value>> {
        positive("movie_id", movie_id)?;
        let mut query = QueryParams::new();
        query
            .push("movieId", movie_id)
            .push_opt("eventType", event_type);
        self.base.get_json("history/movie", query).await
    }

    #[instrument(skip(self))]
    pub async fn get_blocklist_by_movie_id(&self, movie_id: i64) -> Result<Vec<Value>> {
        positive("movie_id", movie_id)?;
        let mut query = QueryParams::new();
        query.push("movieId", movie_id);
        self.base.get_json("blocklist/movie", query).await
    }

    // Queue

    /// One page of the download queue.
    #[instrument(skip(self))]
    pub async fn get_queue(&self, options: &QueueOptions) -> Result<Value> {
        let query = options.to_query()?;
        self.base.get("queue", query).await
    }

    #[instrument(skip(self))]
    pub async fn get_queue_details(
        &self,
        movie_id: Option<i64>,
        include_movie: Option<bool>,
    ) -> Result<Vec<Value>> {
        if let Some(id) = movie_id {
            positive("movie_id", id)?;
        }
        let mut query = QueryParams::new();
        query
            .push_opt("movieId", movie_id)
            .push_bool_opt("includeMovie", include_movie);
        self.base.get_json("queue/details", query).await
    }

    #[instrument(skip(self))]
    pub async fn get_queue_status(&self) -> Result<Value> {
        self.base.get("queue/status", QueryParams::new()).await
    }

    #[instrument(skip(self))]
    pub async fn del_queue(&self, id: i64, options: DeleteQueueOptions) -> Result<Value> {
        positive("id", id)?;
        self.base
            .delete(&format!("queue/{}", id), options.to_query(), None)
            .await
    }

    #[instrument(skip(self))]
    pub async fn del_queue_bulk(&self, ids: &[i64], options: DeleteQueueOptions) -> Result<Value> {
        Ids::from(ids).validate("ids")?;
        let body = serde_json::to_value(QueueBulkDelete { ids: ids.to_vec() })?;
        self.base
            .delete("queue/bulk", options.to_query(), Some(body))
            .await
    }

    #[instrument(skip(self))]
    pub async fn force_grab_queue_item(&self, id: i64) -> Result<Value> {
        positive("id", id)?;
        self.base
            .post(&format!("queue/grab/{}", id), QueryParams::new(), None)
            .await
    }

    // Indexers

    #[instrument(skip(self))]
    pub async fn get_indexers(&self) -> Result<Vec<Value>> {
        self.base.get_json("indexer", QueryParams::new()).await
    }

    #[instrument(skip(self))]
    pub async fn get_indexer(&self, id: i64) -> Result<Value> {
        positive("id", id)?;
        self.base
            .get(&format!("indexer/{}", id), QueryParams::new())
            .await
    }

    #[instrument(skip(self, data))]
    pub async fn upd_indexer(&self, id: i64, data: &Value) -> Result<Value> {
        positive("id", id)?;
        self.base
            .put(&format!("indexer/{}", id), QueryParams::new(), Some(data.clone()))
            .await
    }

    #[instrument(skip(self))]
    pub async fn del_indexer(&self, id: i64) -> Result<Value> {
        positive("id", id)?;
        self.base
            .delete(&format!("indexer/{}", id), QueryParams::new(), None)
            .await
    }

    // Settings used when adding movies

    #[instrument(skip(self))]
    pub async fn get_quality_profiles(&self) -> Result<Vec<QualityProfile>> {
        self.base.get_json("qualityprofile", QueryParams::new()).await
    }

    #[instrument(skip(self))]
    pub async fn get_root_folders(&self) -> Result<Vec<RootFolder>> {
        self.base.get_json("rootfolder", QueryParams::new()).await
    }

    #[instrument(skip(self))]
    pub async fn get_tags(&self) -> Result<Vec<Tag>> {
        self.base.get_json("tag", QueryParams::new()).await
    }

    #[instrument(skip(self))]
    pub async fn get_system_status(&self) -> Result<Value> {
        self.base.get("system/status", QueryParams::new()).await
    }
}
