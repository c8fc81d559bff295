use anyhow::{Context, Result};
use gallery_viewer::config::Settings;
use gallery_viewer::session::{self, Action, GalleryEvent, Session, SimulatedElement};
use gallery_viewer::{logging, source, Gallery};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(config_path.as_deref())?;
    logging::init(&settings.log_level)?;

    let client = reqwest::Client::new();
    let page = source::load_props(&settings.props_source(), &client).await?;
    tracing::info!(
        "Gallery has {} images and {} videos",
        page.gallery.images.len(),
        page.gallery.videos.len()
    );

    if let Some(details) = &page.details {
        for row in details.rows(&settings.brand_fields()) {
            println!("{}: {}", row.label, row.value);
        }
    }

    let element = Arc::new(SimulatedElement::new(
        settings.simulation.play_delay(),
        settings.simulation.reject_playback,
    ));
    let (tx, mut rx) = session::channel();
    let mut session = Session::new(Gallery::new(&page.gallery), element, tx);
    let labels = &settings.labels;

    println!("{}", session.gallery().view(labels));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read command")? else {
                    break;
                };
                let line = line.trim();
                match line {
                    "" => continue,
                    "quit" | "exit" => break,
                    "show" => {}
                    _ => match line.parse::<Action>() {
                        Ok(action) => session.handle(GalleryEvent::Action(action)),
                        Err(e) => {
                            eprintln!("{:#}", e);
                            continue;
                        }
                    },
                }
                println!("{}", session.gallery().view(labels));
            }
            Some(event) = rx.recv() => {
                session.handle(event);
                println!("{}", session.gallery().view(labels));
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    Ok(())
}
