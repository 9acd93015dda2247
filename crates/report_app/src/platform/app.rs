use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use report_core::{update, AppState, Msg, Stage};
use report_logging::{report_debug, report_info};

use super::effects::{EffectRunner, HostAction};
use super::settings::AppSettings;
use super::ui::commands::{self, Command, HELP};
use super::ui::render;

const TICK_INTERVAL: Duration = Duration::from_millis(75);

/// Everything the main loop reacts to.
#[derive(Debug)]
pub enum HostEvent {
    Msg(Msg),
    Line(String),
    InputClosed,
}

pub fn run_app(settings: AppSettings) -> anyhow::Result<()> {
    let (host_tx, host_rx) = mpsc::channel::<HostEvent>();
    let runner = EffectRunner::new(&settings, host_tx.clone()).context("starting the engine")?;

    spawn_input_reader(host_tx.clone());
    // Background tick to coalesce rendering.
    thread::spawn(move || {
        while host_tx.send(HostEvent::Msg(Msg::Tick)).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    let mut shell = Shell::new(runner);
    println!("{}", render::catalog_text());
    println!("Type 'help' for commands.");
    shell.prompt();

    for event in host_rx {
        match event {
            HostEvent::Msg(msg) => shell.dispatch(msg),
            HostEvent::Line(line) => {
                if !shell.handle_line(&line) {
                    break;
                }
                shell.prompt();
            }
            HostEvent::InputClosed => break,
        }
    }
    report_info!("Report studio shutting down");
    Ok(())
}

fn spawn_input_reader(host_tx: mpsc::Sender<HostEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if host_tx.send(HostEvent::Line(line)).is_err() {
                return;
            }
        }
        let _ = host_tx.send(HostEvent::InputClosed);
    });
}

struct Shell {
    state: AppState,
    runner: EffectRunner,
    shown_stage: Option<Stage>,
}

impl Shell {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
            shown_stage: Some(Stage::Catalog),
        }
    }

    fn prompt(&self) {
        print!("> ");
        let _ = io::stdout().flush();
    }

    /// Returns `false` when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> bool {
        let view = self.state.view();
        match commands::parse(line, &view) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => return false,
            Ok(Some(Command::Help)) => println!("{HELP}"),
            Ok(Some(Command::List)) => print!("{}", render::catalog_text()),
            Ok(Some(Command::Toc)) => print!("{}", render::toc_text(&view)),
            Ok(Some(Command::Msg(msg))) => {
                report_debug!("Input: {:?}", msg);
                self.dispatch(msg);
            }
            Err(err) => println!("{err}"),
        }
        true
    }

    fn dispatch(&mut self, msg: Msg) {
        let is_tick = matches!(msg, Msg::Tick);
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        for action in self.runner.run(effects) {
            self.show_action(action);
        }
        for notice in self.state.take_notices() {
            println!("{}", render::notice_line(&notice));
        }
        if is_tick && self.state.consume_dirty() {
            self.render();
        }
    }

    fn show_action(&mut self, action: HostAction) {
        match action {
            HostAction::Notice(notice) => println!("{}", render::notice_line(&notice)),
            HostAction::ShowSection(section_id) => {
                let text = self
                    .state
                    .report()
                    .and_then(|report| render::section_text(report, &section_id));
                match text {
                    Some(text) => print!("{text}"),
                    None => println!("No section '{section_id}' in this report"),
                }
            }
        }
    }

    fn render(&mut self) {
        let view = self.state.view();
        let text = render::view_text(&view, self.shown_stage);
        self.shown_stage = Some(view.stage);
        if !text.is_empty() {
            print!("\n{text}");
            self.prompt();
        }
    }
}
