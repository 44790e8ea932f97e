mod api;
mod app;
mod board;
mod config;
mod logging;
mod model;
mod notice;
mod state;

use app::{App, AppProps};
use config::BoardConfig;

fn main() {
    let config = BoardConfig::from_document();
    logging::init(config.log_level);
    log::info!("activity board starting (api base {:?})", config.api_base);
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
