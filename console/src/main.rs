use std::io::{self, BufRead, Write};

use clap::Parser;
use tictactoe_engine::config::load_engine_config;
use tictactoe_engine::tictactoe::{FirstMover, ScoreTally};
use tictactoe_engine::{GameSession, SessionState, Verdict, log, logger};

#[derive(Parser)]
#[command(name = "tictactoe_console", about = "Play tic-tac-toe against the engine")]
struct Args {
    /// YAML engine config; defaults are used when the file is missing
    #[arg(long, default_value = "tictactoe_engine.yaml")]
    config: String,

    #[arg(long)]
    seed: Option<u64>,

    /// Let the engine open every game
    #[arg(long)]
    automated_first: bool,

    #[arg(long)]
    use_log_prefix: bool,

    /// Log search details
    #[arg(long)]
    verbose: bool,
}

enum Command {
    Place(usize, usize),
    Reset,
    Tally,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        ["quit"] | ["q"] => Ok(Command::Quit),
        ["reset"] => Ok(Command::Reset),
        ["tally"] => Ok(Command::Tally),
        [row, col] => {
            let row = row.parse().map_err(|_| format!("Bad row: {}", row))?;
            let col = col.parse().map_err(|_| format!("Bad column: {}", col))?;
            Ok(Command::Place(row, col))
        }
        _ => Err("Expected `row col`, `reset`, `tally` or `quit`".to_string()),
    }
}

fn print_board(session: &GameSession) {
    println!("{}", session.current_board());
    match session.state() {
        SessionState::AwaitingMove(mark) => println!("{:?} to move", mark),
        SessionState::Terminal(Verdict::Win(mark)) => println!("{:?} wins. Type `reset` to play again.", mark),
        SessionState::Terminal(_) => println!("Draw. Type `reset` to play again."),
    }
}

fn print_tally(tally: ScoreTally) {
    println!("Tally: {}", tally);
}

/// Lets the engine move while it is due, so an automated opener plays first.
fn play_pending_automated_move(session: &mut GameSession) {
    if session.state() == SessionState::AwaitingMove(tictactoe_engine::tictactoe::AUTOMATED_MARK)
        && let Ok(reply) = session.request_automated_move()
    {
        println!("Engine plays {}", reply.position);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Console".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    let mut config = load_engine_config(&args.config)?;
    if args.seed.is_some() {
        config.session.seed = args.seed;
    }
    if args.automated_first {
        config.session.first_mover = FirstMover::Automated;
    }
    config.session.auto_reply = true;

    let mut session = GameSession::new(config)?;
    log!("Console session started with config {}", args.config);

    play_pending_automated_move(&mut session);
    print_board(&session);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let command = match parse_command(line.trim()) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Tally => print_tally(session.tally()),
            Command::Reset => {
                session.reset_session();
                play_pending_automated_move(&mut session);
                print_board(&session);
            }
            Command::Place(row, col) => match session.submit_human_move(row, col) {
                Ok(outcome) => {
                    if let Some(reply) = outcome.automated_reply {
                        println!("Engine plays {}", reply.position);
                    }
                    print_board(&session);
                    if outcome.verdict.is_terminal() {
                        print_tally(session.tally());
                    }
                }
                Err(e) => println!("{}", e),
            },
        }
    }

    log!("Console session finished: {}", session.tally());
    Ok(())
}
