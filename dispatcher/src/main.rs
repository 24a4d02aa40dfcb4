use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::unbounded;
use log::{error, info, warn};

use dispatcher::console::ConsoleCommand;
use dispatcher::debug::TerminalSink;
use dispatcher::report::{LogSink, StatusSink};
use dispatcher::{scheduler, Dispatcher};
use shared_resources::config::Config;

fn print_status(dispatcher: &Dispatcher) -> io::Result<()> {
    let status = dispatcher.display_status();
    let json = serde_json::to_string_pretty(&status).map_err(io::Error::from)?;
    println!("{}", json);
    Ok(())
}

/// Applies every command on stdin, then ticks until all work is served.
fn run_batch(dispatcher: &Dispatcher) -> io::Result<()> {
    for line in io::stdin().lock().lines() {
        let line = line?;
        match ConsoleCommand::parse(&line) {
            Ok(Some(ConsoleCommand::Quit)) => break,
            Ok(Some(ConsoleCommand::Status)) => print_status(dispatcher)?,
            Ok(Some(command)) => {
                if let Err(e) = command.execute(dispatcher) {
                    warn!("{}: {}", line.trim(), e);
                }
            },
            Ok(None) => {},
            Err(e) => warn!("{}", e),
        }
    }
    dispatcher.run_until_quiescent();
    LogSink.report(&dispatcher.display_status())?;
    print_status(dispatcher)
}

/// Ticks on a background thread while stdin is read for commands.
fn run_service(dispatcher: Arc<Dispatcher>, config: &Config, dashboard: bool) -> io::Result<()> {
    let (stop_tx, stop_rx) = unbounded::<()>();
    let mut sink: Box<dyn StatusSink + Send> = if dashboard {
        Box::new(TerminalSink::new())
    } else {
        Box::new(LogSink)
    };

    // INITIALIZE THREAD FOR SCHEDULER
    let scheduler_thread = {
        let dispatcher = Arc::clone(&dispatcher);
        let period = config.scheduler.period();
        thread::Builder::new()
            .name(String::from("scheduler"))
            .spawn(move || scheduler::run(&dispatcher, period, &stop_rx, sink.as_mut()))?
    };

    for line in io::stdin().lock().lines() {
        let line = line?;
        match ConsoleCommand::parse(&line) {
            Ok(Some(ConsoleCommand::Quit)) => break,
            Ok(Some(ConsoleCommand::Status)) => print_status(&dispatcher)?,
            Ok(Some(command)) => {
                if let Err(e) = command.execute(&dispatcher) {
                    warn!("{}: {}", line.trim(), e);
                }
            },
            Ok(None) => {},
            Err(e) => warn!("{}", e),
        }
    }

    info!("STOPPING PROGRAM...");
    stop_tx.send(()).ok();
    match scheduler_thread.join() {
        Ok(ticks) => info!("scheduler ran {} tick(s)", ticks),
        Err(_) => error!("scheduler thread panicked"),
    }
    Ok(())
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut batch = false;
    let mut dashboard = false;
    let mut args: Vec<String> = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--batch" => batch = true,
            "--dashboard" => dashboard = true,
            _ => args.push(arg),
        }
    }

    // READ CONFIGURATION
    let config = Config::get(&args).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let dispatcher = Arc::new(Dispatcher::new(&config.building)?);

    if batch {
        run_batch(&dispatcher)
    } else {
        run_service(dispatcher, &config, dashboard)
    }
}
