use crate::error::{ArrError, Result};
use crate::query::QueryParams;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Declares a closed set of wire strings. Serde, `Display` and `FromStr` all
/// go through the same table, so `"timeleft".parse()` and
/// `RadarrSortKey::TimeLeft` are interchangeable on the wire.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ArrError;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(ArrError::invalid($label, other)),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

wire_enum! {
    /// Direction for paged, sorted listings.
    SortDirection, "sort_dir" {
        Ascending => "ascending",
        Default => "default",
        Descending => "descending",
    }
}

wire_enum! {
    /// Columns the queue and history listings can be sorted by.
    RadarrSortKey, "sort_key" {
        Date => "date",
        DownloadClient => "downloadClient",
        Id => "id",
        Indexer => "indexer",
        Languages => "languages",
        Message => "message",
        Modified => "modified",
        MovieId => "movieId",
        Path => "path",
        Progress => "progress",
        Protocol => "protocol",
        Quality => "quality",
        Ratings => "ratings",
        Size => "size",
        SourceTitle => "sourceTitle",
        Status => "status",
        TimeLeft => "timeleft",
        Title => "title",
    }
}

wire_enum! {
    /// History event filter.
    RadarrEventType, "event_type" {
        Unknown => "unknown",
        Grabbed => "grabbed",
        DownloadFolderImported => "downloadFolderImported",
        DownloadFailed => "downloadFailed",
        MovieFileDeleted => "movieFileDeleted",
        MovieFolderImported => "movieFolderImported",
        MovieFileRenamed => "movieFileRenamed",
        DownloadIgnored => "downloadIgnored",
    }
}

wire_enum! {
    MinimumAvailability, "minimum_availability" {
        Announced => "announced",
        InCinemas => "inCinemas",
        Released => "released",
        Tba => "tba",
    }
}

/// One id or a list of ids. The distinction decides the target URL of bulk
/// capable operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ids {
    One(i64),
    Many(Vec<i64>),
}

impl Ids {
    /// Rejects empty lists and ids the server could never have assigned.
    pub fn validate(&self, name: &str) -> Result<()> {
        match self {
            Ids::One(id) => positive(name, *id),
            Ids::Many(ids) if ids.is_empty() => Err(ArrError::missing(name)),
            Ids::Many(ids) => ids.iter().try_for_each(|id| positive(name, *id)),
        }
    }
}

impl From<i64> for Ids {
    fn from(id: i64) -> Self {
        Ids::One(id)
    }
}

impl From<Vec<i64>> for Ids {
    fn from(ids: Vec<i64>) -> Self {
        Ids::Many(ids)
    }
}

impl From<&[i64]> for Ids {
    fn from(ids: &[i64]) -> Self {
        Ids::Many(ids.to_vec())
    }
}

impl<const N: usize> From<[i64; N]> for Ids {
    fn from(ids: [i64; N]) -> Self {
        Ids::Many(ids.to_vec())
    }
}

pub(crate) fn positive(name: &str, id: i64) -> Result<()> {
    if id > 0 {
        Ok(())
    } else {
        Err(ArrError::invalid(name, id))
    }
}

/// A sort key and direction, which the server only honours together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K> Sort<K> {
    pub fn new(key: K, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// `None` when neither half is given, an error when only one is.
    pub fn from_parts(key: Option<K>, direction: Option<SortDirection>) -> Result<Option<Self>> {
        match (key, direction) {
            (None, None) => Ok(None),
            (Some(key), Some(direction)) => Ok(Some(Self { key, direction })),
            (Some(_), None) => Err(ArrError::missing("sort_dir")),
            (None, Some(_)) => Err(ArrError::missing("sort_key")),
        }
    }
}

impl<K: fmt::Display> Sort<K> {
    pub fn append_to(&self, query: &mut QueryParams) {
        query
            .push("sortKey", &self.key)
            .push("sortDirection", self.direction);
    }
}

/// External catalog id of a movie that is not in the library yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieId {
    Tmdb(i64),
    Imdb(String),
}

impl MovieId {
    pub fn lookup_term(&self) -> String {
        match self {
            MovieId::Tmdb(id) => format!("tmdb:{}", id),
            MovieId::Imdb(id) => format!("imdb:{}", id),
        }
    }
}

/// Paging and sorting for `queue`. Every field is optional and omitted from
/// the query when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueOptions {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sort_key: Option<RadarrSortKey>,
    pub sort_dir: Option<SortDirection>,
    pub include_unknown_movie_items: Option<bool>,
}

impl QueueOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn sort_key(mut self, key: RadarrSortKey) -> Self {
        self.sort_key = Some(key);
        self
    }

    pub fn sort_dir(mut self, direction: SortDirection) -> Self {
        self.sort_dir = Some(direction);
        self
    }

    pub fn sorted(self, sort: Sort<RadarrSortKey>) -> Self {
        self.sort_key(sort.key).sort_dir(sort.direction)
    }

    pub fn include_unknown_movie_items(mut self, include: bool) -> Self {
        self.include_unknown_movie_items = Some(include);
        self
    }

    pub fn to_query(&self) -> Result<QueryParams> {
        let sort = Sort::from_parts(self.sort_key, self.sort_dir)?;

        let mut query = QueryParams::new();
        query
            .push_opt("page", self.page)
            .push_opt("pageSize", self.page_size);
        if let Some(sort) = sort {
            sort.append_to(&mut query);
        }
        query.push_bool_opt("includeUnknownMovieItems", self.include_unknown_movie_items);
        Ok(query)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteMovieOptions {
    pub delete_files: Option<bool>,
    pub add_import_exclusion: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteQueueOptions {
    pub remove_from_client: Option<bool>,
    pub blocklist: Option<bool>,
}

impl DeleteQueueOptions {
    pub(crate) fn to_query(self) -> QueryParams {
        let mut query = QueryParams::new();
        query
            .push_bool_opt("removeFromClient", self.remove_from_client)
            .push_bool_opt("blocklist", self.blocklist);
        query
    }
}

/// Caller-side settings for a movie being added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddMovieOptions {
    pub quality_profile_id: i64,
    pub root_dir: String,
    pub monitored: bool,
    pub search_for_movie: bool,
    pub minimum_availability: Option<MinimumAvailability>,
    pub tags: Vec<i64>,
}

impl AddMovieOptions {
    pub fn new(quality_profile_id: i64, root_dir: impl Into<String>) -> Self {
        Self {
            quality_profile_id,
            root_dir: root_dir.into(),
            monitored: true,
            search_for_movie: true,
            minimum_availability: None,
            tags: Vec::new(),
        }
    }
}

/// Body of `POST movie`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    pub title: String,
    pub title_slug: String,
    pub year: i32,
    pub tmdb_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    pub images: Vec<serde_json::Value>,
    pub quality_profile_id: i64,
    pub root_folder_path: String,
    pub monitored: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_availability: Option<MinimumAvailability>,
    pub tags: Vec<i64>,
    pub add_options: NewMovieAddOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovieAddOptions {
    pub search_for_movie: bool,
}

/// The fields of a `movie/lookup` result needed to add it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupMovie {
    pub title: String,
    #[serde(default)]
    pub title_slug: Option<String>,
    pub year: Option<i32>,
    pub tmdb_id: i64,
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub images: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieEditorDelete {
    pub movie_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_files: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_import_exclusion: Option<bool>,
}

/// Body of `PUT movie/editor`; unset fields are left untouched server-side.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieEditorUpdate {
    pub movie_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitored: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_profile_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_availability: Option<MinimumAvailability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_folder_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_files: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_tags: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieFileBulkDelete {
    pub movie_file_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueueBulkDelete {
    pub ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityProfile {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootFolder {
    pub id: i64,
    pub path: String,
    #[serde(default)]
    pub free_space: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_strings_match_members() {
        assert_eq!(
            "timeleft".parse::<RadarrSortKey>().unwrap(),
            RadarrSortKey::TimeLeft
        );
        assert_eq!(
            "default".parse::<SortDirection>().unwrap(),
            SortDirection::Default
        );
        for event in RadarrEventType::ALL {
            assert_eq!(event.as_str().parse::<RadarrEventType>().unwrap(), *event);
        }
    }

    #[test]
    fn unknown_strings_are_rejected() {
        let err = "sideways".parse::<SortDirection>().unwrap_err();
        assert!(matches!(err, ArrError::InvalidValue { ref name, .. } if name == "sort_dir"));
        assert!("TimeLeft".parse::<RadarrSortKey>().is_err());
    }

    #[test]
    fn serde_uses_wire_strings() {
        let json = serde_json::to_string(&MinimumAvailability::InCinemas).unwrap();
        assert_eq!(json, "\"inCinemas\"");
        let back: RadarrEventType = serde_json::from_str("\"downloadFailed\"").unwrap();
        assert_eq!(back, RadarrEventType::DownloadFailed);
        assert!(serde_json::from_str::<SortDirection>("\"up\"").is_err());
    }

    #[test]
    fn sort_requires_both_halves() {
        assert_eq!(
            Sort::<RadarrSortKey>::from_parts(None, None).unwrap(),
            None
        );
        assert!(matches!(
            Sort::from_parts(Some(RadarrSortKey::Title), None),
            Err(ArrError::MissingArgument { ref name }) if name == "sort_dir"
        ));
        assert!(matches!(
            Sort::<RadarrSortKey>::from_parts(None, Some(SortDirection::Ascending)),
            Err(ArrError::MissingArgument { ref name }) if name == "sort_key"
        ));
    }

    #[test]
    fn queue_options_render_in_order() {
        let query = QueueOptions::new()
            .include_unknown_movie_items(false)
            .sorted(Sort::new(RadarrSortKey::TimeLeft, SortDirection::Default))
            .page_size(20)
            .page(1)
            .to_query()
            .unwrap();
        assert_eq!(
            query.render(),
            concat!(
                "page=1&pageSize=20&sortKey=timeleft&sortDirection=default",
                "&includeUnknownMovieItems=False"
            )
        );
        assert!(QueueOptions::new().to_query().unwrap().is_empty());
    }

    #[test]
    fn ids_validation() {
        assert!(Ids::from(1).validate("id").is_ok());
        assert!(Ids::from([1, 2, 3]).validate("id").is_ok());
        assert!(matches!(
            Ids::from(Vec::<i64>::new()).validate("id"),
            Err(ArrError::MissingArgument { .. })
        ));
        assert!(matches!(
            Ids::from(vec![1, 0]).validate("id"),
            Err(ArrError::InvalidValue { .. })
        ));
    }

    #[test]
    fn movie_id_terms() {
        assert_eq!(MovieId::Tmdb(123456).lookup_term(), "tmdb:123456");
        assert_eq!(MovieId::Imdb("tt0133093".into()).lookup_term(), "imdb:tt0133093");
    }

    #[test]
    fn editor_delete_omits_unset_flags() {
        let body = serde_json::to_value(MovieEditorDelete {
            movie_ids: vec![1, 2],
            delete_files: Some(true),
            add_import_exclusion: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"movieIds": [1, 2], "deleteFiles": true}));
    }
}
