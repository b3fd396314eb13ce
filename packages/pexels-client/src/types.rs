//! Pexels API response types.

use serde::Deserialize;

/// A single photo object as returned by the search and curated endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Photo {
    pub id: u64,
    pub photographer: String,
    #[serde(default)]
    pub photographer_url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    pub src: PhotoSrc,
}

/// Nested per-resolution URLs for one photo.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSrc {
    pub original: String,
    #[serde(default)]
    pub large: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub small: Option<String>,
    pub tiny: String,
}

/// Envelope for photo list responses.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoPage {
    pub page: u32,
    pub per_page: u32,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub total_results: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_search_response() {
        let json = r#"{
            "page": 7,
            "per_page": 1,
            "total_results": 8000,
            "photos": [{
                "id": 2014422,
                "photographer": "Joey Farina",
                "photographer_url": "https://www.pexels.com/@joey",
                "alt": "Brown rocks during golden hour",
                "src": {
                    "original": "https://images.pexels.com/photos/2014422/original.jpg",
                    "large": "https://images.pexels.com/photos/2014422/large.jpg",
                    "medium": "https://images.pexels.com/photos/2014422/medium.jpg",
                    "small": "https://images.pexels.com/photos/2014422/small.jpg",
                    "tiny": "https://images.pexels.com/photos/2014422/tiny.jpg"
                }
            }]
        }"#;

        let page: PhotoPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, 7);
        assert_eq!(page.photos.len(), 1);
        assert_eq!(page.photos[0].id, 2014422);
        assert_eq!(page.photos[0].photographer, "Joey Farina");
        assert!(page.photos[0].src.tiny.ends_with("tiny.jpg"));
    }

    #[test]
    fn test_deserialize_empty_page() {
        let json = r#"{"page": 99, "per_page": 1, "photos": []}"#;
        let page: PhotoPage = serde_json::from_str(json).unwrap();
        assert!(page.photos.is_empty());
        assert!(page.total_results.is_none());
    }
}
