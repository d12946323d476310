use tracing::{instrument, trace, warn};

/// Separates the fields of album headers and song lines.
pub const DELIMITER: &str = "::";

/// Year given to songs whose album header has no year, or that have no header at all.
pub const UNKNOWN_YEAR: &str = "Unknown";

const ALBUM_MARKER: char = '#';
const SONG_MARKER: char = '*';
const SONG_FIELDS: usize = 4;

/// One song line together with the album context it was read under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongEntry {
    pub album: String,
    pub year: String,
    pub title: String,
    pub artist: String,
    pub duration: String,
    pub lyrics: String,
}

/// A `*` line that did not carry all four fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line_number}: expected 4 fields, found {fields}: {line:?}")]
pub struct MalformedLine {
    /// 1-based position in the source text.
    pub line_number: usize,
    pub line: String,
    pub fields: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub songs: Vec<SongEntry>,
    pub malformed: Vec<MalformedLine>,
}

/// Album state carried from a header to the song lines below it.
#[derive(Debug)]
struct AlbumContext {
    name: String,
    year: String,
}

impl Default for AlbumContext {
    fn default() -> Self {
        Self {
            name: String::new(),
            year: UNKNOWN_YEAR.to_string(),
        }
    }
}

impl AlbumContext {
    fn from_header(rest: &str) -> Self {
        let mut parts = rest.splitn(2, DELIMITER);
        let name = parts.next().unwrap_or_default().trim().to_string();
        let year = parts
            .next()
            .map(|year| year.trim().to_string())
            .unwrap_or_else(|| UNKNOWN_YEAR.to_string());

        Self { name, year }
    }
}

/// Parse a whole discography file.
///
/// Lines are handled in order: blank lines are skipped, `#` lines open a new
/// album, `*` lines become songs of the current album and anything else is
/// ignored. Song lines with fewer than four fields are reported in
/// [`Parsed::malformed`] and loading carries on.
#[instrument(skip(text), fields(bytes = text.len()), level = "trace")]
pub fn parse(text: &str) -> Parsed {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut parsed = Parsed::default();
    let mut album = AlbumContext::default();

    for (index, raw) in split_lines(text).enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix(ALBUM_MARKER) {
            album = AlbumContext::from_header(rest);
            trace!(album = %album.name, year = %album.year, "album header");
        } else if let Some(rest) = line.strip_prefix(SONG_MARKER) {
            match parse_song(rest, &album) {
                Ok(song) => parsed.songs.push(song),
                Err(fields) => {
                    let malformed = MalformedLine {
                        line_number: index + 1,
                        line: line.to_string(),
                        fields,
                    };
                    warn!(%malformed, "skipping malformed song line");
                    parsed.malformed.push(malformed);
                }
            }
        }
    }

    parsed
}

/// Breaks on `\n`, `\r\n` and a lone `\r`, so files saved with old Mac line
/// endings load the same as Unix or Windows ones.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
}

/// Splits on the first three delimiters only, so the lyrics keep any `::` they contain.
/// On failure returns how many fields were found.
fn parse_song(rest: &str, album: &AlbumContext) -> Result<SongEntry, usize> {
    let parts: Vec<&str> = rest.splitn(SONG_FIELDS, DELIMITER).map(str::trim).collect();

    match parts.as_slice() {
        [title, artist, duration, lyrics] => Ok(SongEntry {
            album: album.name.clone(),
            year: album.year.clone(),
            title: title.to_string(),
            artist: artist.to_string(),
            duration: duration.to_string(),
            lyrics: lyrics.to_string(),
        }),
        _ => Err(parts.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DARK_SIDE: &str = "\
#The Dark Side of the Moon::1973
*Time::Pink Floyd::6:53::Ticking away the moments...
*Money::Pink Floyd::6:22::Money, it's a gas...
";

    #[test]
    fn songs_take_album_and_year_from_header() {
        let parsed = parse(DARK_SIDE);

        assert!(parsed.malformed.is_empty());
        assert_eq!(parsed.songs.len(), 2);
        assert_eq!(
            parsed.songs[0],
            SongEntry {
                album: "The Dark Side of the Moon".to_string(),
                year: "1973".to_string(),
                title: "Time".to_string(),
                artist: "Pink Floyd".to_string(),
                duration: "6:53".to_string(),
                lyrics: "Ticking away the moments...".to_string(),
            }
        );
        assert_eq!(parsed.songs[1].title, "Money");
        assert_eq!(parsed.songs[1].album, "The Dark Side of the Moon");
    }

    #[test]
    fn header_switches_album_for_following_songs() {
        let parsed = parse(
            "#Animals::1977\n*Dogs::Pink Floyd::17:04::You got to be crazy\n\
             #The Wall\n*Mother::Pink Floyd::5:32::Mother do you think\n",
        );

        assert_eq!(parsed.songs[0].album, "Animals");
        assert_eq!(parsed.songs[0].year, "1977");
        assert_eq!(parsed.songs[1].album, "The Wall");
        assert_eq!(parsed.songs[1].year, UNKNOWN_YEAR);
    }

    #[test]
    fn header_splits_into_at_most_two_parts() {
        let parsed = parse("#  Meddle :: 1971::remaster \n*Echoes::Pink Floyd::23:31::Overhead the albatross\n");

        assert_eq!(parsed.songs[0].album, "Meddle");
        assert_eq!(parsed.songs[0].year, "1971::remaster");
    }

    #[test]
    fn lyrics_keep_embedded_delimiters() {
        let parsed = parse("#A::1\n*Title:: Artist ::1:00:: one :: two::three \n");

        let song = &parsed.songs[0];
        assert_eq!(song.artist, "Artist");
        assert_eq!(song.duration, "1:00");
        assert_eq!(song.lyrics, "one :: two::three");
    }

    #[test]
    fn malformed_song_line_is_skipped_and_reported() {
        let parsed = parse("#A::1\n*OnlyTitle::Artist\n*Ok::B::2:00::la la\n");

        assert_eq!(parsed.songs.len(), 1);
        assert_eq!(parsed.songs[0].title, "Ok");
        assert_eq!(
            parsed.malformed,
            vec![MalformedLine {
                line_number: 2,
                line: "*OnlyTitle::Artist".to_string(),
                fields: 2,
            }]
        );
    }

    #[test]
    fn song_before_any_header_gets_empty_album() {
        let parsed = parse("*Lonely::Someone::0:30::hello\n#Later::2000\n");

        assert_eq!(parsed.songs[0].album, "");
        assert_eq!(parsed.songs[0].year, UNKNOWN_YEAR);
    }

    #[test]
    fn blank_and_unmarked_lines_are_ignored() {
        let parsed = parse("\n   \nnotes about the file\n\t#X::1\r\n\r\n  *S::A::1:00::l  \r\n");

        assert!(parsed.malformed.is_empty());
        assert_eq!(parsed.songs.len(), 1);
        assert_eq!(parsed.songs[0].album, "X");
        assert_eq!(parsed.songs[0].lyrics, "l");
    }

    #[test]
    fn carriage_return_alone_ends_a_line() {
        let parsed = parse("#Animals::1977\r*Dogs::Pink Floyd::17:04::crazy\r*Sheep::Pink Floyd::10:25::meek\r");

        assert_eq!(parsed.songs.len(), 2);
        assert_eq!(parsed.songs[0].album, "Animals");
        assert_eq!(parsed.songs[1].lyrics, "meek");
    }

    #[test]
    fn line_numbers_count_each_line_ending_once() {
        let parsed = parse("#A::1\r\n*Bad\r*AlsoBad::x\n*Worse\r\n");

        let lines: Vec<usize> = parsed.malformed.iter().map(|m| m.line_number).collect();
        assert_eq!(lines, [2, 3, 4]);
    }

    #[test]
    fn leading_byte_order_mark_is_dropped() {
        let parsed = parse("\u{feff}#Bom::1999\n*S::A::1:00::l\n");

        assert_eq!(parsed.songs[0].album, "Bom");
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(parse(""), Parsed::default());
    }

    #[test]
    fn malformed_line_displays_position() {
        let malformed = MalformedLine {
            line_number: 7,
            line: "*x".to_string(),
            fields: 1,
        };

        assert_eq!(
            malformed.to_string(),
            "line 7: expected 4 fields, found 1: \"*x\""
        );
    }
}
