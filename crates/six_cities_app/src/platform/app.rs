use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use six_cities_core::{AppViewModel, Msg, SelectorCache, Store};
use six_cities_engine::{FileTokenStore, TokenStore};
use six_cities_logging::{sc_info, sc_warn};

use super::config::{self, AppConfig, ConfigError, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::logging;
use super::ui::commands::{self, Command, HELP};
use super::ui::render::render;

/// Everything the main loop reacts to: parsed stdin lines and engine completions.
pub enum Inbound {
    Command(Command),
    Msg(Msg),
    Invalid(String),
    Closed,
}

pub fn run_app() -> anyhow::Result<()> {
    let loaded = config::load(Path::new(CONFIG_FILENAME));
    let config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => AppConfig::default(),
    };
    logging::initialize(config.log_destination);
    match loaded {
        Ok(_) => sc_info!("Loaded {}", CONFIG_FILENAME),
        Err(ConfigError::Missing(path)) => sc_warn!("No config at {:?}; using defaults", path),
        Err(err) => sc_warn!("{}; using defaults", err),
    }

    let tokens = Arc::new(FileTokenStore::new(config.data_dir.clone()));
    let persisted_token = match tokens.load() {
        Ok(token) => token,
        Err(err) => {
            sc_warn!("Could not read stored token: {}", err);
            None
        }
    };

    let (inbound_tx, inbound_rx) = mpsc::channel::<Inbound>();
    let runner = EffectRunner::new(config.api_settings(), tokens, inbound_tx.clone())
        .context("starting the request engine")?;
    spawn_stdin_reader(inbound_tx);

    let mut store = Store::new();
    let mut cache = SelectorCache::new();
    runner.enqueue(store.mount(persisted_token));
    println!("{HELP}\n");
    show(&mut store, &mut cache);

    while let Ok(inbound) = inbound_rx.recv() {
        match inbound {
            Inbound::Command(Command::Dispatch(msg)) | Inbound::Msg(msg) => {
                runner.enqueue(store.dispatch(msg));
                if store.consume_dirty() {
                    show(&mut store, &mut cache);
                }
            }
            Inbound::Command(Command::Show) => show(&mut store, &mut cache),
            Inbound::Command(Command::Help) => println!("{HELP}"),
            Inbound::Invalid(message) => println!("{message}"),
            Inbound::Command(Command::Quit) | Inbound::Closed => break,
        }
        let _ = io::stdout().flush();
    }

    sc_info!("Shutting down");
    Ok(())
}

fn show(store: &mut Store, cache: &mut SelectorCache) {
    let _ = store.consume_dirty();
    let view = AppViewModel::build(store.state(), cache);
    println!("{}", render(&view));
}

fn spawn_stdin_reader(inbound: mpsc::Sender<Inbound>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    sc_warn!("stdin read failed: {}", err);
                    break;
                }
            };
            let item = match commands::parse(&line) {
                Ok(Some(command)) => Inbound::Command(command),
                Ok(None) => continue,
                Err(err) => Inbound::Invalid(err.to_string()),
            };
            if inbound.send(item).is_err() {
                return;
            }
        }
        let _ = inbound.send(Inbound::Closed);
    });
}
