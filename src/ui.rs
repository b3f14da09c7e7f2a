// UI layer: provides a simple interactive menu using `dialoguer`.
// The functions are small and synchronous to make the flow easy to follow.

use crate::api::{ApiClient, Post, PostDraft, SearchQuery, SortDirection, SortField};
use crate::store;
use anyhow::Result;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};

/// Main interactive menu. Receives an `ApiClient` instance and runs a
/// simple select loop until the user chooses "Exit".
///
/// Note: `Select::interact()` is keyboard-driven: you can use arrow keys
/// and Enter to choose an option.
///
/// API errors never leave this loop: each action prints its failure and the
/// previously rendered listing stays on screen unchanged.
pub fn main_menu(mut api: ApiClient) -> Result<()> {
    loop {
        let items = vec![
            "List posts",
            "List posts sorted",
            "Search posts",
            "Add post",
            "Update post",
            "Delete post",
            "Change API base URL",
            "Exit",
        ];
        // `Select` shows a keyboard-navigable list in the terminal.
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => refresh_posts(&api),
            1 => handle_sorted_list(&api)?,
            2 => handle_search(&api)?,
            3 => handle_add(&api)?,
            4 => handle_update(&api)?,
            5 => handle_delete(&api)?,
            6 => {
                // Re-pointing the client also refreshes the listing, so the
                // user immediately sees what the new backend holds.
                let url = prompt_base_url()?;
                api.set_base_url(&url);
                refresh_posts(&api);
            }
            7 => break,
            _ => {}
        }
    }
    Ok(())
}

/// Ask the user for the API base URL.
pub fn prompt_base_url() -> Result<String> {
    let url: String = Input::new()
        .with_prompt("API base URL")
        .default("http://localhost:5002/api".into())
        .interact_text()?;
    Ok(url.trim().to_string())
}

/// Persist the active base URL, fetch all posts and re-render the listing.
/// Failures are printed and swallowed: the previous listing stays as-is.
pub fn refresh_posts(api: &ApiClient) {
    if let Err(e) = store::save_base_url(api.base_url()) {
        eprintln!("Could not save API base URL: {}", e);
    }
    let spinner = request_spinner("Loading posts...");
    let result = api.list_posts(None);
    spinner.finish_and_clear();
    match result {
        Ok(posts) => render_posts(&posts),
        Err(e) => eprintln!("Could not load posts: {}", e),
    }
}

/// Print the post listing, one block per post, mirroring the layout of the
/// original page: header line with title, author and date, then the body.
fn render_posts(posts: &[Post]) {
    println!();
    if posts.is_empty() {
        println!("(no posts)");
        return;
    }
    for post in posts {
        println!("[{}] {} - {} - {}", post.id, post.title, post.author, post.date);
        println!("    {}", post.content);
    }
    println!();
}

/// Listing flow with server-side sorting: pick a field and a direction.
fn handle_sorted_list(api: &ApiClient) -> Result<()> {
    let fields = [
        SortField::Title,
        SortField::Content,
        SortField::Author,
        SortField::Date,
    ];
    let field_names: Vec<&str> = fields.iter().map(|f| f.as_str()).collect();
    let field = fields[Select::new()
        .with_prompt("Sort by")
        .items(&field_names)
        .default(0)
        .interact()?];
    let directions = [SortDirection::Asc, SortDirection::Desc];
    let direction = directions[Select::new()
        .with_prompt("Direction")
        .items(&["ascending", "descending"])
        .default(0)
        .interact()?];

    let spinner = request_spinner("Loading posts...");
    let result = api.list_posts(Some((field, direction)));
    spinner.finish_and_clear();
    match result {
        Ok(posts) => render_posts(&posts),
        Err(e) => eprintln!("Could not load posts: {}", e),
    }
    Ok(())
}

/// Search flow: collect up to four filters (empty means "don't filter on
/// this") and show whatever the backend matches.
fn handle_search(api: &ApiClient) -> Result<()> {
    let query = SearchQuery {
        title: optional_field("Title contains")?,
        content: optional_field("Content contains")?,
        author: optional_field("Author contains")?,
        date: optional_field("Date contains")?,
    };
    if query.is_empty() {
        println!("No filters given; listing everything instead.");
    }
    let spinner = request_spinner("Searching...");
    let result = api.search_posts(&query);
    spinner.finish_and_clear();
    match result {
        Ok(posts) => render_posts(&posts),
        Err(e) => eprintln!("Search failed: {}", e),
    }
    Ok(())
}

/// Collect input fields for a new post and call `ApiClient::create_post`.
/// The backend owns validation here; empty fields are sent as-is.
fn handle_add(api: &ApiClient) -> Result<()> {
    // `Input::interact_text()` prompts the user for input and returns it.
    let title: String = Input::new()
        .with_prompt("Title")
        .allow_empty(true)
        .interact_text()?;
    let author: String = Input::new()
        .with_prompt("Author")
        .allow_empty(true)
        .interact_text()?;
    let content: String = Input::new()
        .with_prompt("Content")
        .allow_empty(true)
        .interact_text()?;
    let draft = PostDraft { title, author, content };

    let spinner = request_spinner("Adding post...");
    let result = api.create_post(&draft);
    spinner.finish_and_clear();
    match result {
        Ok(post) => {
            println!("Post added: [{}] {}", post.id, post.title);
            refresh_posts(api);
        }
        Err(e) => eprintln!("Adding post failed: {}", e),
    }
    Ok(())
}

/// Update flow: pick an id, then collect the three replacement fields as an
/// explicit step. If any field is empty the whole update is abandoned and
/// no request goes out.
fn handle_update(api: &ApiClient) -> Result<()> {
    let id: u64 = Input::new().with_prompt("Post id to update").interact_text()?;

    let title: String = Input::new()
        .with_prompt("New title")
        .allow_empty(true)
        .interact_text()?;
    let author: String = Input::new()
        .with_prompt("New author")
        .allow_empty(true)
        .interact_text()?;
    let content: String = Input::new()
        .with_prompt("New content")
        .allow_empty(true)
        .interact_text()?;

    let draft = match draft_from_fields(&title, &author, &content) {
        Some(d) => d,
        None => {
            println!("All fields are required!");
            return Ok(());
        }
    };

    let spinner = request_spinner("Updating post...");
    let result = api.update_post(id, &draft);
    spinner.finish_and_clear();
    match result {
        Ok(_) => {
            println!("Post {} updated.", id);
            refresh_posts(api);
        }
        Err(e) => eprintln!("Updating post failed: {}", e),
    }
    Ok(())
}

/// Delete flow: pick an id, fire the request, re-list on success.
fn handle_delete(api: &ApiClient) -> Result<()> {
    let id: u64 = Input::new().with_prompt("Post id to delete").interact_text()?;

    let spinner = request_spinner("Deleting post...");
    let result = api.delete_post(id);
    spinner.finish_and_clear();
    match result {
        Ok(()) => {
            println!("Post {} deleted.", id);
            refresh_posts(api);
        }
        Err(e) => eprintln!("Deleting post failed: {}", e),
    }
    Ok(())
}

/// Validate the update fields: all three must be non-blank, otherwise the
/// update is cancelled before any request is built.
fn draft_from_fields(title: &str, author: &str, content: &str) -> Option<PostDraft> {
    if title.trim().is_empty() || author.trim().is_empty() || content.trim().is_empty() {
        return None;
    }
    Some(PostDraft {
        title: title.to_string(),
        author: author.to_string(),
        content: content.to_string(),
    })
}

/// Prompt for an optional search filter; blank input means "unfiltered".
fn optional_field(prompt: &str) -> Result<Option<String>> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    let value = value.trim().to_string();
    Ok(if value.is_empty() { None } else { Some(value) })
}

/// indicatif spinner shown while a request is in flight.
fn request_spinner(msg: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message(msg);
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_draft_requires_all_fields() {
        assert!(draft_from_fields("", "Robert", "body").is_none());
        assert!(draft_from_fields("Title", "", "body").is_none());
        assert!(draft_from_fields("Title", "Robert", "").is_none());
        assert!(draft_from_fields("Title", "Robert", "   ").is_none());
    }

    #[test]
    fn update_draft_keeps_the_given_values() {
        let draft = draft_from_fields("Title", "Robert", "body").unwrap();
        assert_eq!(draft.title, "Title");
        assert_eq!(draft.author, "Robert");
        assert_eq!(draft.content, "body");
    }
}
