use mastermind::cli::{CliInterface, parse_cli};
use mastermind::logging::init_logging;
use mastermind::tui::TuiInterface;
use mastermind::{FixedSecretGenerator, GameEngine, RandomSecretGenerator, game_loop};
use std::io;

fn main() -> io::Result<()> {
    let cli = parse_cli();

    match init_logging(cli.log_file.as_deref()) {
        Ok(Some(path)) => log::info!("Logging to {}", path.display()),
        Ok(None) => {}
        Err(e) => eprintln!("Failed to set up logging: {e}"),
    }

    let mut engine = match (cli.secret, cli.seed) {
        (Some(secret), _) => GameEngine::new(FixedSecretGenerator::new(secret)),
        (None, Some(seed)) => GameEngine::new(RandomSecretGenerator::seeded(seed)),
        (None, None) => GameEngine::new(RandomSecretGenerator::new()),
    };

    if cli.plain {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        game_loop(&mut engine, &mut interface);
    } else {
        let mut interface = TuiInterface::new()?;
        // Terminal is restored when the interface drops
        game_loop(&mut engine, &mut interface);
    }

    Ok(())
}
