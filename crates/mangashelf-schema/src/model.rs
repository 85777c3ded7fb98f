use serde::{Deserialize, Deserializer, Serialize};

pub const UNKNOWN_ARTIST: &str = "Unknown";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manga {
    pub id: i64,
    pub manga_id: String,
    pub title: String,
    pub cover_image: String,
    pub first_page: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub page_count: i64,
    pub description: Option<String>,
    pub artist: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    pub language: Option<String>,
    pub status: Option<String>,
    pub uploaded_by: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub views: i64,
    pub last_viewed: Option<String>,
    pub created_at: Option<String>,
}

impl Manga {
    pub fn artist_or_unknown(&self) -> &str {
        self.artist
            .as_deref()
            .filter(|artist| !artist.trim().is_empty())
            .unwrap_or(UNKNOWN_ARTIST)
    }
}

/// Row sent back after a view is recorded. Unlike the list and detail
/// endpoints, `genres` and `tags` are left as comma-joined text here, so only
/// the counters are read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ViewedManga {
    pub id: i64,
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub views: i64,
    pub last_viewed: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub username: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MangaImage {
    pub filename: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub description: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_manga_from_list_row() {
        let manga: Manga = serde_json::from_value(json!({
            "id": 7,
            "manga_id": "yotsuba",
            "title": "Yotsuba&!",
            "cover_image": "/manga/yotsuba/001.jpg",
            "first_page": "/manga/yotsuba/001.jpg",
            "page_count": 212,
            "description": "",
            "artist": "Kiyohiko Azuma",
            "genres": ["Comedy", "Slice of Life"],
            "tags": [],
            "language": "Japanese",
            "status": "activo",
            "uploaded_by": "admin",
            "views": 42,
            "last_viewed": null,
            "created_at": "2024-03-01 10:00:00"
        }))
        .unwrap();

        assert_eq!(manga.id, 7);
        assert_eq!(manga.page_count, 212);
        assert_eq!(manga.genres, vec!["Comedy", "Slice of Life"]);
        assert_eq!(manga.artist_or_unknown(), "Kiyohiko Azuma");
    }

    #[test]
    fn test_manga_with_nulls() {
        let manga: Manga = serde_json::from_value(json!({
            "id": 1,
            "title": "Untitled",
            "cover_image": "/manga/untitled/cover.png",
            "views": null,
            "page_count": null,
            "genres": null,
            "artist": null
        }))
        .unwrap();

        assert_eq!(manga.views, 0);
        assert_eq!(manga.page_count, 0);
        assert!(manga.genres.is_empty());
        assert_eq!(manga.artist_or_unknown(), UNKNOWN_ARTIST);
    }

    #[test]
    fn test_blank_artist_is_unknown() {
        let manga = Manga {
            artist: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(manga.artist_or_unknown(), UNKNOWN_ARTIST);
    }

    #[test]
    fn test_viewed_manga_from_raw_row() {
        let viewed: ViewedManga = serde_json::from_value(json!({
            "id": 7,
            "manga_id": "yotsuba",
            "title": "Yotsuba&!",
            "cover_image": "/manga/yotsuba/001.jpg",
            "page_count": 212,
            "artist": "Kiyohiko Azuma",
            "genres": "Comedy,Slice of Life",
            "tags": "",
            "views": 43,
            "last_viewed": "2024-03-02 21:14:05"
        }))
        .unwrap();

        assert_eq!(viewed.id, 7);
        assert_eq!(viewed.views, 43);
        assert_eq!(viewed.last_viewed.as_deref(), Some("2024-03-02 21:14:05"));
    }
}
