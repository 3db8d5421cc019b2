use async_trait::async_trait;
use log::{debug, trace};
use serde::Deserialize;

use super::{read_json, CatalogApi};
use crate::config::Config;
use crate::error::ApiError;
use crate::models::{Book, BookId, Genre};

/// Client for the public volumes search.
///
/// ```text
/// GET {base}/volumes?q=subject:fiction&maxResults=12
/// { "items": [ { "id": "...", "volumeInfo": { "title": "...", "authors": [...],
///                "imageLinks": { "thumbnail": "..." } } } ] }
/// ```
pub struct BooksCatalog {
    client: reqwest::Client,
    base_url: String,
    max_results: u32,
}

#[derive(Deserialize, Debug)]
struct Volumes {
    #[serde(default)]
    items: Option<Vec<Volume>>,
}

#[derive(Deserialize, Debug)]
struct Volume {
    id: String,
    #[serde(rename = "volumeInfo", default)]
    volume_info: VolumeInfo,
}

#[derive(Deserialize, Debug, Default)]
struct VolumeInfo {
    #[serde(default)]
    title: String,
    #[serde(default)]
    authors: Vec<String>,
    #[serde(rename = "imageLinks", default)]
    image_links: Option<ImageLinks>,
}

#[derive(Deserialize, Debug)]
struct ImageLinks {
    thumbnail: Option<String>,
}

impl From<Volume> for Book {
    fn from(volume: Volume) -> Self {
        let info = volume.volume_info;

        Book {
            id: BookId::new(volume.id),
            title: info.title,
            authors: info.authors,
            thumbnail: info.image_links.and_then(|links| links.thumbnail),
        }
    }
}

impl BooksCatalog {
    pub fn new(cfg: &Config) -> Result<BooksCatalog, ApiError> {
        let client = reqwest::Client::builder().build()?;

        Ok(BooksCatalog {
            client,
            base_url: cfg.catalog_base_url.clone(),
            max_results: cfg.max_results,
        })
    }

    pub fn url(&self, genre: Genre) -> String {
        format!(
            "{}/volumes?q=subject:{}&maxResults={}",
            self.base_url, genre, self.max_results
        )
    }
}

#[async_trait]
impl CatalogApi for BooksCatalog {
    async fn search(&self, genre: Genre) -> Result<Vec<Book>, ApiError> {
        trace!("BooksCatalog::search({})", genre);
        let url = self.url(genre);

        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let volumes: Volumes = read_json(response).await?;

        Ok(volumes
            .items
            .unwrap_or_default()
            .into_iter()
            .map(Book::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{Book, BooksCatalog, Volumes};
    use crate::config::Config;
    use crate::models::Genre;

    #[test]
    fn search_url() -> anyhow::Result<()> {
        let cfg = Config {
            catalog_base_url: "http://localhost:9000".to_string(),
            ..Config::default()
        };
        let catalog = BooksCatalog::new(&cfg)?;

        assert_eq!(
            "http://localhost:9000/volumes?q=subject:thriller&maxResults=12",
            catalog.url(Genre::Thriller)
        );

        Ok(())
    }

    #[test]
    fn missing_items_is_empty() -> anyhow::Result<()> {
        let volumes: Volumes = serde_json::from_str(r#"{"kind": "books#volumes", "totalItems": 0}"#)?;

        assert!(volumes.items.unwrap_or_default().is_empty());

        Ok(())
    }

    #[test]
    fn volume_with_optional_fields_missing() -> anyhow::Result<()> {
        let raw = r#"{"items": [
            {"id": "b1", "volumeInfo": {"title": "Open Water", "authors": ["A. Swimmer"],
                "imageLinks": {"thumbnail": "http://img/b1.jpg"}}},
            {"id": "b2", "volumeInfo": {"title": "No Cover"}}
        ]}"#;

        let volumes: Volumes = serde_json::from_str(raw)?;
        let books: Vec<Book> = volumes
            .items
            .unwrap_or_default()
            .into_iter()
            .map(Book::from)
            .collect();

        assert_eq!(2, books.len());
        assert_eq!("b1", books[0].id.as_str());
        assert_eq!(Some("http://img/b1.jpg".to_string()), books[0].thumbnail);
        assert_eq!(vec!["A. Swimmer".to_string()], books[0].authors);
        assert!(books[1].authors.is_empty());
        assert_eq!(None, books[1].thumbnail);

        Ok(())
    }
}
