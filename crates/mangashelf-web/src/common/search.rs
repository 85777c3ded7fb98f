use mangashelf_schema::Manga;

/// `term` must already be trimmed and lowercased.
pub fn matches(manga: &Manga, term: &str) -> bool {
    manga.title.to_lowercase().contains(term)
        || manga
            .artist
            .as_ref()
            .is_some_and(|artist| artist.to_lowercase().contains(term))
        || manga
            .genres
            .iter()
            .any(|genre| genre.to_lowercase().contains(term))
}

pub fn filter(mangas: &[Manga], keyword: &str) -> Vec<Manga> {
    let term = keyword.trim().to_lowercase();
    if term.is_empty() {
        return mangas.to_vec();
    }

    mangas
        .iter()
        .filter(|manga| matches(manga, &term))
        .cloned()
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn manga(title: &str, artist: Option<&str>, genres: &[&str]) -> Manga {
        Manga {
            title: title.to_string(),
            artist: artist.map(str::to_string),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            ..Default::default()
        }
    }

    fn library() -> Vec<Manga> {
        vec![
            manga("Berserk", Some("Kentaro Miura"), &["Dark Fantasy", "Action"]),
            manga("Yotsuba&!", Some("Kiyohiko Azuma"), &["Comedy"]),
            manga("Azumanga Daioh", Some("Kiyohiko Azuma"), &["Comedy", "School"]),
            manga("Untitled Doujin", None, &[]),
        ]
    }

    fn titles(mangas: &[Manga]) -> Vec<&str> {
        mangas.iter().map(|m| m.title.as_str()).collect()
    }

    #[test]
    fn test_empty_keyword_returns_everything() {
        assert_eq!(filter(&library(), "").len(), 4);
        assert_eq!(filter(&library(), "   ").len(), 4);
    }

    #[test]
    fn test_title_is_case_insensitive() {
        assert_eq!(titles(&filter(&library(), "BERSERK")), vec!["Berserk"]);
    }

    #[test]
    fn test_keyword_is_trimmed() {
        assert_eq!(titles(&filter(&library(), "  yotsuba ")), vec!["Yotsuba&!"]);
    }

    #[test]
    fn test_artist_match() {
        assert_eq!(
            titles(&filter(&library(), "azuma")),
            vec!["Yotsuba&!", "Azumanga Daioh"]
        );
    }

    #[test]
    fn test_genre_match() {
        assert_eq!(titles(&filter(&library(), "fantasy")), vec!["Berserk"]);
        assert_eq!(
            titles(&filter(&library(), "comedy")),
            vec!["Yotsuba&!", "Azumanga Daioh"]
        );
    }

    #[test]
    fn test_missing_artist_does_not_match() {
        assert!(filter(&library(), "miura").iter().all(|m| m.artist.is_some()));
        assert!(filter(&library(), "nobody").is_empty());
    }
}
