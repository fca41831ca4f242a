use crate::error::{Result, StorageError};
use crate::types::{CreateSong, Song};
use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sqlx::{FromRow, SqlitePool};
use std::path::Path;
use tracing::{debug, info};

/// Artist recorded for seeded files
pub const SEED_ARTIST: &str = "Unknown Artist";

/// File extensions picked up by [`seed_from_dir`]
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "oga", "wav", "m4a", "aac", "opus"];

#[derive(FromRow)]
struct SongRow {
    id: i64,
    title: String,
    artist: String,
    file_url: String,
    created_at: i64,
}

impl TryFrom<SongRow> for Song {
    type Error = StorageError;

    fn try_from(row: SongRow) -> Result<Self> {
        let created_at: DateTime<Utc> = DateTime::from_timestamp(row.created_at, 0)
            .ok_or(StorageError::InvalidTimestamp(row.created_at))?;

        Ok(Song {
            id: row.id,
            title: row.title,
            artist: row.artist,
            file_url: row.file_url,
            created_at,
        })
    }
}

/// Get all songs in insertion order
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Song>> {
    let rows = sqlx::query_as::<_, SongRow>(
        "SELECT id, title, artist, file_url, created_at FROM songs ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(Song::try_from).collect()
}

/// Get a song by ID
pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Song>> {
    let row = sqlx::query_as::<_, SongRow>(
        "SELECT id, title, artist, file_url, created_at FROM songs WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(Song::try_from).transpose()
}

/// Check whether a song with this file URL exists
pub async fn exists_by_file_url(pool: &SqlitePool, file_url: &str) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs WHERE file_url = ?")
        .bind(file_url)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

/// Insert a song
pub async fn create(pool: &SqlitePool, song: CreateSong) -> Result<Song> {
    let now = Utc::now().timestamp();

    let result = sqlx::query(
        "INSERT INTO songs (title, artist, file_url, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(&song.title)
    .bind(&song.artist)
    .bind(&song.file_url)
    .bind(now)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    debug!(id, file_url = %song.file_url, "Song created");

    get_by_id(pool, id)
        .await?
        .ok_or(StorageError::Database(sqlx::Error::RowNotFound))
}

/// Count songs
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Outcome of a seeding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Insert a row for every audio file in `dir` that is not in the table yet
///
/// Files are visited in name order (not recursively). The title is the file
/// stem, the artist [`SEED_ARTIST`], and the URL `{url_prefix}/{file name}` with
/// the name percent-encoded.
pub async fn seed_from_dir(pool: &SqlitePool, dir: &Path, url_prefix: &str) -> Result<SeedReport> {
    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if is_audio_file(name) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();

    let prefix = url_prefix.trim_end_matches('/');
    let mut report = SeedReport::default();

    for name in names {
        let file_url = format!("{}/{}", prefix, encode_path_segment(&name));
        if exists_by_file_url(pool, &file_url).await? {
            report.skipped += 1;
            continue;
        }

        let title = Path::new(&name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(&name)
            .to_string();
        create(pool, CreateSong::new(title, SEED_ARTIST, file_url)).await?;
        report.inserted += 1;
    }

    info!(
        dir = %dir.display(),
        inserted = report.inserted,
        skipped = report.skipped,
        "Seeded songs"
    );
    Ok(report)
}

/// Everything outside the RFC 3986 unreserved set
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn encode_path_segment(name: &str) -> String {
    utf8_percent_encode(name, PATH_SEGMENT).to_string()
}

fn is_audio_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            AUDIO_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_file_detection() {
        assert!(is_audio_file("song.mp3"));
        assert!(is_audio_file("SONG.FLAC"));
        assert!(!is_audio_file("cover.jpg"));
        assert!(!is_audio_file("README"));
        assert!(!is_audio_file(".mp3"));
    }

    #[tokio::test]
    async fn create_and_list() {
        let pool = crate::create_memory_pool().await.unwrap();

        let song = create(&pool, CreateSong::new("Title", "Artist", "/music/t.mp3"))
            .await
            .unwrap();
        assert_eq!(song.title, "Title");

        let all = get_all(&pool).await.unwrap();
        assert_eq!(all, vec![song]);
    }
}
