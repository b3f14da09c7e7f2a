// API client module: contains a small blocking HTTP client that talks to
// the Masterblog REST backend. It is intentionally small and synchronous
// to keep the learning curve low for beginners.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

/// Simple API client that holds a reqwest blocking client and the base URL
/// of the posts API. The base URL is injected explicitly (restored from the
/// session store or typed by the user), never read from a hidden global.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// A blog post as returned by the backend. `id` and `date` are
/// server-assigned; the client never modifies them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub content: String,
    pub date: String,
}

/// Request body for creating or updating a post. Fields mirror the backend
/// expectations; `id` and `date` are assigned server-side.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub author: String,
    pub content: String,
}

/// Fields the backend accepts for sorting the post listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Content,
    Author,
    Date,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Content => "content",
            SortField::Author => "author",
            SortField::Date => "date",
        }
    }
}

/// Sort direction for the post listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Free-text filters for the search endpoint. Empty fields are omitted from
/// the query string entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
}

impl SearchQuery {
    /// Query pairs for the non-empty fields, in the order the backend
    /// documents them.
    fn params(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(t) = self.title.as_deref() {
            pairs.push(("title", t));
        }
        if let Some(c) = self.content.as_deref() {
            pairs.push(("content", c));
        }
        if let Some(a) = self.author.as_deref() {
            pairs.push(("author", a));
        }
        if let Some(d) = self.date.as_deref() {
            pairs.push(("date", d));
        }
        pairs
    }

    pub fn is_empty(&self) -> bool {
        self.params().is_empty()
    }
}

impl ApiClient {
    /// Create an ApiClient for the given base URL. Trailing slashes are
    /// trimmed so `{base}/posts` composes cleanly.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL currently in use.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Point the client at a different backend.
    pub fn set_base_url(&mut self, base_url: &str) {
        self.base_url = base_url.trim_end_matches('/').to_string();
    }

    fn posts_url(&self) -> String {
        format!("{}/posts", &self.base_url)
    }

    fn post_url(&self, id: u64) -> String {
        format!("{}/posts/{}", &self.base_url, id)
    }

    fn search_url(&self) -> String {
        format!("{}/posts/search", &self.base_url)
    }

    /// Fetch all posts, optionally sorted server-side.
    pub fn list_posts(&self, sort: Option<(SortField, SortDirection)>) -> Result<Vec<Post>> {
        let mut req = self.client.get(self.posts_url());
        if let Some((field, direction)) = sort {
            req = req.query(&[("sort", field.as_str()), ("direction", direction.as_str())]);
        }
        let res = req.send().context("Failed to send list request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Listing posts failed: {} - {}", status, txt);
        }
        let posts: Vec<Post> = res.json().context("Parsing posts json")?;
        Ok(posts)
    }

    /// Search posts by title, content, author or date substrings.
    pub fn search_posts(&self, query: &SearchQuery) -> Result<Vec<Post>> {
        let res = self
            .client
            .get(self.search_url())
            .query(&query.params())
            .send()
            .context("Failed to send search request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Search failed: {} - {}", status, txt);
        }
        let posts: Vec<Post> = res.json().context("Parsing search results json")?;
        Ok(posts)
    }

    /// Create a post by POSTing the draft to /posts. Returns the created
    /// post with its server-assigned id and date.
    pub fn create_post(&self, draft: &PostDraft) -> Result<Post> {
        let res = self
            .client
            .post(self.posts_url())
            .json(draft)
            .send()
            .context("Failed to send create request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Creating post failed: {} - {}", status, txt);
        }
        let post: Post = res.json().context("Parsing created post json")?;
        Ok(post)
    }

    /// Update a post by PUTting the draft to /posts/{id}. The response body
    /// is kept as a serde_json::Value because backends vary between echoing
    /// the updated post and returning an acknowledgement message.
    pub fn update_post(&self, id: u64, draft: &PostDraft) -> Result<serde_json::Value> {
        let res = self
            .client
            .put(self.post_url(id))
            .json(draft)
            .send()
            .context("Failed to send update request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Updating post {} failed: {} - {}", id, status, txt);
        }
        let body: serde_json::Value = res.json().context("Parsing update response json")?;
        Ok(body)
    }

    /// Delete a post by id. The response body is ignored.
    pub fn delete_post(&self, id: u64) -> Result<()> {
        let res = self
            .client
            .delete(self.post_url(id))
            .send()
            .context("Failed to send delete request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Deleting post {} failed: {} - {}", id, status, txt);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = ApiClient::new("http://localhost:5002/api/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:5002/api");
        assert_eq!(api.posts_url(), "http://localhost:5002/api/posts");
    }

    #[test]
    fn post_urls_compose_from_base_and_id() {
        let api = ApiClient::new("http://localhost:5002/api").unwrap();
        assert_eq!(api.post_url(42), "http://localhost:5002/api/posts/42");
        assert_eq!(api.search_url(), "http://localhost:5002/api/posts/search");
    }

    #[test]
    fn set_base_url_replaces_the_target() {
        let mut api = ApiClient::new("http://localhost:5002/api").unwrap();
        api.set_base_url("https://blog.example.com/api/");
        assert_eq!(api.posts_url(), "https://blog.example.com/api/posts");
    }

    #[test]
    fn posts_deserialize_from_backend_shape() {
        let body = r#"[
            {"id": 1, "title": "First post", "author": "Robert",
             "content": "This is the first post.", "date": "2023-06-07"},
            {"id": 2, "title": "Second post", "author": "Robert",
             "content": "This is the second post.", "date": "2023-06-07"}
        ]"#;
        let posts: Vec<Post> = serde_json::from_str(body).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, 1);
        assert_eq!(posts[1].title, "Second post");
        assert_eq!(posts[1].date, "2023-06-07");
    }

    #[test]
    fn draft_serializes_only_client_fields() {
        let draft = PostDraft {
            title: "A title".into(),
            author: "An author".into(),
            content: "Some content".into(),
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "A title",
                "author": "An author",
                "content": "Some content"
            })
        );
    }

    #[test]
    fn search_params_skip_empty_fields() {
        let query = SearchQuery {
            title: Some("flask".into()),
            date: Some("2023".into()),
            ..Default::default()
        };
        assert_eq!(query.params(), vec![("title", "flask"), ("date", "2023")]);
        assert!(!query.is_empty());
        assert!(SearchQuery::default().is_empty());
    }

    #[test]
    fn sort_values_match_backend_vocabulary() {
        assert_eq!(SortField::Author.as_str(), "author");
        assert_eq!(SortField::Date.as_str(), "date");
        assert_eq!(SortDirection::Desc.as_str(), "desc");
    }
}
