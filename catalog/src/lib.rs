use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

pub mod models;

pub use models::SongRecord;
pub use parser::{MalformedLine, UNKNOWN_YEAR};

/// Returned by the single-song lookups when no title matches.
pub const SONG_NOT_FOUND: &str = "Song not found";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The discography, built once and then only read.
///
/// Every query borrows `self` immutably, so an `Arc<Catalog>` can be handed
/// to any number of request handlers at once.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Catalog {
    songs: Vec<SongRecord>,
    malformed: Vec<MalformedLine>,
}

impl Catalog {
    pub fn from_songs(songs: Vec<SongRecord>) -> Self {
        Self {
            songs,
            malformed: Vec::new(),
        }
    }

    pub fn parse(text: &str) -> Self {
        let parsed = parser::parse(text);

        Self {
            songs: parsed.songs.into_iter().map(SongRecord::from).collect(),
            malformed: parsed.malformed,
        }
    }

    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::parse(&text);
        debug!(songs = catalog.len(), "parsed catalog file");

        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn songs(&self) -> &[SongRecord] {
        &self.songs
    }

    /// Song lines that were skipped while loading.
    pub fn malformed(&self) -> &[MalformedLine] {
        &self.malformed
    }

    /// Distinct album names in the order they first appear.
    pub fn albums(&self) -> Vec<&str> {
        let mut albums: Vec<&str> = Vec::new();
        for song in &self.songs {
            if !albums.contains(&song.album()) {
                albums.push(song.album());
            }
        }
        albums
    }

    /// Titles on the album named `album`, compared case-insensitively.
    #[instrument(skip(self), level = "trace")]
    pub fn album_songs(&self, album: &str) -> Vec<&str> {
        let album = album.to_lowercase();
        let titles: Vec<&str> = self
            .songs
            .iter()
            .filter(|song| song.album().to_lowercase() == album)
            .map(SongRecord::title)
            .collect();

        debug!(matches = titles.len(), "album lookup");
        titles
    }

    /// First song, in file order, whose title equals `title` ignoring case.
    pub fn find_song(&self, title: &str) -> Option<&SongRecord> {
        let title = title.to_lowercase();
        self.songs.iter().find(|song| song.title_folded() == title)
    }

    #[instrument(skip(self), ret, level = "trace")]
    pub fn duration(&self, title: &str) -> &str {
        self.find_song(title).map_or(SONG_NOT_FOUND, SongRecord::duration)
    }

    #[instrument(skip(self), level = "trace")]
    pub fn lyrics(&self, title: &str) -> &str {
        self.find_song(title).map_or(SONG_NOT_FOUND, SongRecord::lyrics)
    }

    #[instrument(skip(self), ret, level = "trace")]
    pub fn album_of(&self, title: &str) -> &str {
        self.find_song(title).map_or(SONG_NOT_FOUND, SongRecord::album)
    }

    /// Titles containing `needle`, ignoring case. The needle is matched literally.
    #[instrument(skip(self), level = "trace")]
    pub fn search_titles(&self, needle: &str) -> Vec<&str> {
        self.search(needle, SongRecord::title_folded)
    }

    /// Titles of songs whose lyrics contain `needle`, ignoring case.
    #[instrument(skip(self), level = "trace")]
    pub fn search_lyrics(&self, needle: &str) -> Vec<&str> {
        self.search(needle, SongRecord::lyrics_folded)
    }

    fn search(&self, needle: &str, field: fn(&SongRecord) -> &str) -> Vec<&str> {
        let needle = needle.to_lowercase();
        let titles: Vec<&str> = self
            .songs
            .iter()
            .filter(|song| field(song).contains(needle.as_str()))
            .map(SongRecord::title)
            .collect();

        debug!(matches = titles.len(), "search");
        titles
    }
}
