use std::io::{self, BufRead};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use shelf_core::SessionView;
use shelf_engine::{EngineConfig, EngineEvent, EngineHandle};
use shelf_logging::shelf_info;

use super::input::{parse_input, Input, HELP};
use super::logging::{self, LogDestination};
use super::settings::load_settings;
use super::ui;
use super::wedge::WedgeDecoder;

const POLL_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app() -> anyhow::Result<()> {
    let working_dir = std::env::current_dir().context("resolving working directory")?;
    let settings = load_settings(&working_dir);
    logging::initialize(LogDestination::from_terminal_flag(settings.log_to_terminal));

    let mut config = EngineConfig::default_with_output(settings.output_dir(&working_dir));
    settings.apply(&mut config);
    config.generated_utc = Arc::new(|| Utc::now().to_rfc3339());
    shelf_info!("Starting shelf scanner with {:?}", config);

    let wedge = WedgeDecoder::default();
    let engine = EngineHandle::new(config, wedge.clone());
    let lines = spawn_stdin_reader();

    println!("{HELP}");
    let mut last_view: Option<SessionView> = None;
    loop {
        while let Some(event) = engine.try_recv() {
            match event {
                EngineEvent::ViewChanged(view) => {
                    if last_view.as_ref() != Some(&view) {
                        print!("{}", ui::render::render(&view));
                        last_view = Some(view);
                    }
                }
                EngineEvent::Stopped => {
                    shelf_info!("Engine stopped");
                    return Ok(());
                }
            }
        }

        match lines.recv_timeout(POLL_INTERVAL) {
            Ok(line) => match parse_input(&line) {
                Input::Code(code) => {
                    if !wedge.publish(&code) {
                        println!("Scanner is off; type `toggle` to turn it on.");
                    }
                }
                Input::Toggle => engine.toggle(),
                Input::Export(format) => engine.export(format),
                Input::Help => println!("{HELP}"),
                Input::Quit => break,
                Input::Empty => {}
                Input::Unknown(text) => println!("Unknown input {text:?}; type `help`."),
            },
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    engine.shutdown();
    Ok(())
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
