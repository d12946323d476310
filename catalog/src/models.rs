/// A single track. Fields are fixed at construction so the folded copies of
/// `title` and `lyrics` cannot drift from their sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongRecord {
    album: String,
    year: String,
    title: String,
    artist: String,
    /// Display text such as `"4:20"`, never parsed.
    duration: String,
    lyrics: String,
    title_folded: String,
    lyrics_folded: String,
}

impl SongRecord {
    pub fn new(
        album: impl Into<String>,
        year: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        duration: impl Into<String>,
        lyrics: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let lyrics = lyrics.into();

        Self {
            album: album.into(),
            year: year.into(),
            title_folded: title.to_lowercase(),
            lyrics_folded: lyrics.to_lowercase(),
            title,
            artist: artist.into(),
            duration: duration.into(),
            lyrics,
        }
    }

    /// Empty when the song appeared before any album header.
    pub fn album(&self) -> &str {
        &self.album
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    pub fn lyrics(&self) -> &str {
        &self.lyrics
    }

    pub fn title_folded(&self) -> &str {
        &self.title_folded
    }

    pub fn lyrics_folded(&self) -> &str {
        &self.lyrics_folded
    }
}

impl From<parser::SongEntry> for SongRecord {
    fn from(entry: parser::SongEntry) -> Self {
        Self::new(
            entry.album,
            entry.year,
            entry.title,
            entry.artist,
            entry.duration,
            entry.lyrics,
        )
    }
}
