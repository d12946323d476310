use std::io::{self, BufRead, Write};

use catalog::{Catalog, SongRecord};
use tracing::debug;

const MENU: &str = "
Choose an option:
1. List all albums
2. List songs in an album
3. Get duration of a song
4. Get lyrics of a song
5. Find album of a song
6. Search songs by title
7. Search songs by lyrics
8. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    ListAlbums,
    AlbumSongs,
    Duration,
    Lyrics,
    AlbumOf,
    SearchTitles,
    SearchLyrics,
    Exit,
}

impl Choice {
    fn parse(input: &str) -> Option<Self> {
        Some(match input {
            "1" => Self::ListAlbums,
            "2" => Self::AlbumSongs,
            "3" => Self::Duration,
            "4" => Self::Lyrics,
            "5" => Self::AlbumOf,
            "6" => Self::SearchTitles,
            "7" => Self::SearchLyrics,
            "8" => Self::Exit,
            _ => return None,
        })
    }
}

/// Drives the numbered menu until the user picks exit or input runs out.
pub fn run<R: BufRead, W: Write>(catalog: &Catalog, mut input: R, mut output: W) -> io::Result<()> {
    loop {
        writeln!(output, "{MENU}")?;
        let Some(line) = prompt(&mut input, &mut output, "Enter your choice (1–8): ")? else {
            break;
        };

        let Some(choice) = Choice::parse(&line) else {
            writeln!(output, "Invalid choice. Please try again.")?;
            continue;
        };
        debug!(?choice, "menu choice");

        match choice {
            Choice::ListAlbums => {
                writeln!(output, "\nAlbums:")?;
                print_list(&mut output, catalog.albums())?;
            }
            Choice::AlbumSongs => {
                let Some(name) = prompt(&mut input, &mut output, "Enter album name: ")? else {
                    break;
                };
                let songs = catalog.album_songs(&name);
                if songs.is_empty() {
                    writeln!(output, "Album not found.")?;
                } else {
                    writeln!(output, "Songs in '{name}':")?;
                    print_list(&mut output, songs)?;
                }
            }
            Choice::Duration | Choice::Lyrics | Choice::AlbumOf => {
                let Some(name) = prompt(&mut input, &mut output, "Enter song name: ")? else {
                    break;
                };
                let field: fn(&SongRecord) -> &str = match choice {
                    Choice::Duration => SongRecord::duration,
                    Choice::Lyrics => SongRecord::lyrics,
                    _ => SongRecord::album,
                };
                match catalog.find_song(&name) {
                    Some(song) => writeln!(output, "{}", field(song))?,
                    None => writeln!(output, "Song not found.")?,
                }
            }
            Choice::SearchTitles | Choice::SearchLyrics => {
                let label = match choice {
                    Choice::SearchTitles => "Enter word to search in song titles: ",
                    _ => "Enter word to search in lyrics: ",
                };
                let Some(word) = prompt(&mut input, &mut output, label)? else {
                    break;
                };
                let matches = match choice {
                    Choice::SearchTitles => catalog.search_titles(&word),
                    _ => catalog.search_lyrics(&word),
                };
                if matches.is_empty() {
                    writeln!(output, "No matching songs found.")?;
                } else {
                    writeln!(output, "Songs found:")?;
                    print_list(&mut output, matches)?;
                }
            }
            Choice::Exit => break,
        }
    }

    writeln!(output, "Goodbye!")?;
    output.flush()
}

/// Reads one line after printing `label`. `None` means end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

fn print_list<W: Write>(output: &mut W, items: Vec<&str>) -> io::Result<()> {
    for item in items {
        writeln!(output, "- {item}")?;
    }
    Ok(())
}
