mod app;
mod config;
mod debounce;
mod format;
mod poster_cache;
mod screen;
mod style;
mod theme;
mod widgets;

use clap::Parser;

/// Desktop TV-series explorer.
#[derive(Debug, Parser)]
#[command(name = "terebi", version)]
struct Cli {
    /// Override the configured API server base URL for this run.
    #[arg(long, value_name = "URL")]
    server: Option<String>,
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter("terebi=debug")
        .init();

    let cli = Cli::parse();

    let mut config = config::AppConfig::load();
    if let Some(server) = cli.server {
        config.server.base_url = server;
    }

    let win = iced::window::Settings {
        size: iced::Size::new(1000.0, 720.0),
        position: iced::window::Position::Centered,
        ..Default::default()
    };

    iced::application(
        move || app::Terebi::new(config.clone()),
        app::Terebi::update,
        app::Terebi::view,
    )
    .title(app::Terebi::title)
    .theme(app::Terebi::theme)
    .window(win)
    .run()
}
