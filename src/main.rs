use std::io;

use anyhow::Result;

use opent::config::EditorConfig;
use opent::model::AppModel;

mod runtime;

use runtime::{App, RfdDialogs};

fn main() -> Result<()> {
    opent::tracing::init();

    let config = EditorConfig::load();
    tracing::debug!("Starting with {:?}", config);

    let mut app = App::new(AppModel::new(config), RfdDialogs);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    app.run(stdin.lock(), &mut stdout)?;

    if !app.should_quit() {
        tracing::info!(
            "Input ended with {} tab(s) still open",
            app.model().tabs.len()
        );
    }

    Ok(())
}
