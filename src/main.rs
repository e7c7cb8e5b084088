use anyhow::{Context, Result};
use log::*;
use taskboard::app::App;
use taskboard::board::Board;
use taskboard::cli::{self, Command, StdinConfirm};
use taskboard::config::Config;
use taskboard::logger::{CustomLogger, LogBuffer};
use taskboard::storage::{FileSlot, Gateway};

fn main() {
    let matches = cli::build_cli().get_matches();
    if let Err(e) = run(&matches) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(matches: &clap::ArgMatches) -> Result<()> {
    let command = Command::from_matches(matches)?;

    let logs = LogBuffer::new();
    let logger = match (&command, matches.is_present("verbose")) {
        (None, _) => CustomLogger::new(LevelFilter::Debug, logs.clone()),
        (Some(_), true) => CustomLogger::new(LevelFilter::Debug, logs.clone()).with_stderr(),
        (Some(_), false) => CustomLogger::new(LevelFilter::Off, logs.clone()),
    };
    logger.init().context("Failed to initialize logger")?;

    let mut config = Config::new();
    config
        .load(matches.value_of("config"))
        .context("Failed to load configuration")?;

    let slot = match matches.value_of("data") {
        Some(dir) => FileSlot::new(dir, &config.storage_key)?,
        None => config.storage_slot()?,
    };
    let mut board = Board::open(Gateway::new(Box::new(slot))).context("Failed to open board")?;

    match command {
        None => App::start(config, board, logs),
        Some(command) => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            cli::execute(&mut board, command, &mut out, &mut StdinConfirm)?;
            Ok(())
        }
    }
}
