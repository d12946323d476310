use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{get, web, App, HttpServer};
use catalog::{Catalog, SongRecord, SONG_NOT_FOUND};
use serde::Deserialize;
use tracing::{debug, info, instrument};

#[derive(Debug, Deserialize)]
struct SearchQuery {
    word: String,
}

fn owned(titles: Vec<&str>) -> web::Json<Vec<String>> {
    web::Json(titles.into_iter().map(str::to_owned).collect())
}

fn song_field(
    catalog: &Catalog,
    title: &str,
    field: fn(&SongRecord) -> &str,
) -> web::Json<String> {
    let value = catalog.find_song(title).map_or(SONG_NOT_FOUND, field);
    web::Json(value.to_owned())
}

#[get("/albums")]
async fn albums(catalog: web::Data<Catalog>) -> web::Json<Vec<String>> {
    owned(catalog.albums())
}

#[get("/albums/{album_name}")]
async fn album_songs(
    catalog: web::Data<Catalog>,
    album_name: web::Path<String>,
) -> web::Json<Vec<String>> {
    owned(catalog.album_songs(&album_name))
}

#[get("/songs/{song_name}/duration")]
async fn song_duration(
    catalog: web::Data<Catalog>,
    song_name: web::Path<String>,
) -> web::Json<String> {
    song_field(&catalog, &song_name, SongRecord::duration)
}

#[get("/songs/{song_name}/lyrics")]
async fn song_lyrics(
    catalog: web::Data<Catalog>,
    song_name: web::Path<String>,
) -> web::Json<String> {
    song_field(&catalog, &song_name, SongRecord::lyrics)
}

#[get("/songs/{song_name}/album")]
async fn song_album(
    catalog: web::Data<Catalog>,
    song_name: web::Path<String>,
) -> web::Json<String> {
    song_field(&catalog, &song_name, SongRecord::album)
}

#[get("/search/title")]
async fn search_title(
    catalog: web::Data<Catalog>,
    query: web::Query<SearchQuery>,
) -> web::Json<Vec<String>> {
    debug!(word = %query.word, "title search");
    owned(catalog.search_titles(&query.word))
}

#[get("/search/lyrics")]
async fn search_lyrics(
    catalog: web::Data<Catalog>,
    query: web::Query<SearchQuery>,
) -> web::Json<Vec<String>> {
    debug!(word = %query.word, "lyrics search");
    owned(catalog.search_lyrics(&query.word))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(albums)
        .service(album_songs)
        .service(song_duration)
        .service(song_lyrics)
        .service(song_album)
        .service(search_title)
        .service(search_lyrics);
}

/// Browsers may call the API from any origin, with any method and headers.
/// Preflight `OPTIONS` requests are answered by the middleware itself.
pub fn cors() -> Cors {
    Cors::permissive()
}

#[instrument(skip(catalog))]
pub async fn serve(catalog: Arc<Catalog>, host: &str, port: u16) -> std::io::Result<()> {
    let catalog = web::Data::from(catalog);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(catalog.clone())
            .wrap(cors())
            .configure(routes)
    })
    .bind((host, port))?;

    info!(host, port, "serving catalog");
    server.run().await
}
