// Entrypoint for the CLI application.
// - Keeps `main` small: restore the session, create an API client and hand
//   it to the UI loop.
// - Returns `anyhow::Result` to simplify error handling for the prototype.

use masterblog_cli::{api::ApiClient, store, ui};

fn main() -> anyhow::Result<()> {
    // Restore the base URL saved by a previous run. If there is none, ask
    // the user once and save it for next time.
    let restored = store::load_base_url();
    let base_url = match &restored {
        Some(url) => url.clone(),
        None => {
            let url = ui::prompt_base_url()?;
            store::save_base_url(&url)?;
            url
        }
    };

    let api = ApiClient::new(&base_url)?;

    // A restored session shows the posts right away, like reopening the page.
    if restored.is_some() {
        ui::refresh_posts(&api);
    }

    // Start the interactive menu. This call blocks until the user exits.
    ui::main_menu(api)?;
    Ok(())
}
