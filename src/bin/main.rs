use std::io::{self, BufRead, Write};
use std::time::{self, Duration};

use board_game_traits::Color;
use clap::{Arg, Command};
use rand::rngs::StdRng;
use rand::SeedableRng;

use tablut::evaluation;
use tablut::position::{parse_side, Move, Position};
use tablut::search::{self, SearchSettings};

/// Plies after which selfplay games are abandoned
const MAX_GAME_LENGTH: usize = 300;

fn main() -> io::Result<()> {
    let matches = Command::new("Tablut engine")
        .version("0.1")
        .arg(
            Arg::new("depth")
                .short('d')
                .long("depth")
                .env("TABLUT_DEPTH")
                .help("Maximum search depth, in plies")
                .num_args(1)
                .default_value("4")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("moveTime")
                .short('t')
                .long("move-time")
                .env("TABLUT_MOVE_TIME")
                .help("Seconds the engine may spend on each move")
                .num_args(1)
                .default_value("55")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("safetyMargin")
                .long("safety-margin")
                .env("TABLUT_SAFETY_MARGIN")
                .help("Seconds of the move time reserved for returning the move")
                .num_args(1)
                .default_value("5")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("humanColor")
                .long("human-color")
                .env("TABLUT_HUMAN_COLOR")
                .help("Side played by the human in play mode, or by the random player in random mode")
                .num_args(1)
                .value_parser(["white", "black"])
                .default_value("black"),
        )
        .arg(
            Arg::new("logfile")
                .short('l')
                .long("logfile")
                .env("LOGFILE")
                .value_name("tablut.log")
                .help("Name of debug logfile")
                .num_args(1),
        )
        .get_matches();

    let log_dispatcher = fern::Dispatch::new().format(|out, message, record| {
        out.finish(format_args!(
            "{}[{}][{}] {}",
            chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
            record.target(),
            record.level(),
            message
        ))
    });

    if let Some(log_file) = matches.get_one::<String>("logfile") {
        log_dispatcher
            .chain(
                fern::Dispatch::new()
                    .level(log::LevelFilter::Debug)
                    .chain(fern::log_file(log_file)?),
            )
            .chain(
                fern::Dispatch::new()
                    .level(log::LevelFilter::Warn)
                    .chain(io::stderr()),
            )
            .apply()
            .unwrap()
    } else {
        log_dispatcher
            .level(log::LevelFilter::Warn)
            .chain(io::stderr())
            .apply()
            .unwrap()
    }

    let settings = SearchSettings::default()
        .max_depth(*matches.get_one::<u16>("depth").unwrap())
        .time_budget(Duration::from_secs(*matches.get_one::<u64>("moveTime").unwrap()))
        .safety_margin(Duration::from_secs(
            *matches.get_one::<u64>("safetyMargin").unwrap(),
        ));
    if let Err(err) = settings.validate() {
        eprintln!("{}", err);
        return Ok(());
    }
    // Restricted to "white" and "black" by clap
    let human_color = parse_side(matches.get_one::<String>("humanColor").unwrap()).unwrap();

    println!("play: Play against the engine through the command line");
    println!("selfplay: Watch the engine play against itself");
    println!("random: Watch the engine play against a random mover");
    println!("perft <depth>: Generate perft numbers of the start position");
    println!("eval: Show the static evaluation of a position, provided as a diagram");
    loop {
        let mut input = String::new();
        let bytes_read = io::stdin().read_line(&mut input)?;
        if bytes_read == 0 {
            break;
        }
        let words = input.split_whitespace().collect::<Vec<_>>();
        if words.is_empty() {
            continue;
        }
        match words[0] {
            "play" => play_human(Position::start_position(), human_color, &settings)?,
            "selfplay" => selfplay(&settings),
            "random" => play_random(human_color, &settings),
            "perft" => match words.get(1).map(|depth| depth.parse::<u16>()) {
                Some(Ok(depth)) => perft(&Position::start_position(), depth),
                Some(Err(err)) => println!("Bad depth: {}", err),
                None => perft(&Position::start_position(), 4),
            },
            "eval" => eval_diagram()?,
            "quit" | "exit" => break,
            s => println!("Unknown option \"{}\"", s),
        }
    }
    Ok(())
}

fn engine_move(position: &Position, settings: &SearchSettings) -> Option<Move> {
    match search::play_move_time(position, settings) {
        Ok(result) => {
            println!(
                "{} plays {} with score {:.3} (depth {}, {} nodes)",
                side_name(position.side_to_move()),
                result.best_move,
                result.score,
                result.depth,
                result.nodes
            );
            Some(result.best_move)
        }
        Err(err) => {
            println!("Engine could not move: {}", err);
            None
        }
    }
}

fn play_human(
    mut position: Position,
    human_color: Color,
    settings: &SearchSettings,
) -> io::Result<()> {
    let stdin = io::stdin();
    while !position.is_terminal() {
        println!("Position:\n{:?}", position);
        let mv = if position.side_to_move() == human_color {
            println!("Type your move, for example E3-F3:");
            // Loop until user enters a valid move
            loop {
                let mut input = String::new();
                if stdin.lock().read_line(&mut input)? == 0 {
                    return Ok(());
                }
                match Move::from_string(&input) {
                    Ok(mv) if position.is_legal(mv) => break mv,
                    Ok(mv) => {
                        let legal_moves = position.legal_moves();
                        println!(
                            "Move {} is illegal! Legal moves: {}",
                            mv,
                            legal_moves
                                .iter()
                                .map(|mv| mv.to_string())
                                .collect::<Vec<_>>()
                                .join(" ")
                        );
                        println!("Try again: ");
                    }
                    Err(error) => println!("{}, try again.", error),
                }
            }
        } else {
            match engine_move(&position, settings) {
                Some(mv) => mv,
                None => return Ok(()),
            }
        };
        position = position.result(mv);
    }
    println!("{}! Board:\n{:?}", position.outcome(), position);
    Ok(())
}

fn selfplay(settings: &SearchSettings) {
    let mut position = Position::start_position();
    let mut moves = vec![];
    while !position.is_terminal() && moves.len() < MAX_GAME_LENGTH {
        match engine_move(&position, settings) {
            Some(mv) => {
                moves.push(mv);
                position = position.result(mv);
            }
            None => break,
        }
        io::stdout().flush().unwrap();
    }
    println!(
        "{}\n{:?}\nResult: {}",
        moves
            .iter()
            .map(|mv| mv.to_string())
            .collect::<Vec<_>>()
            .join(" "),
        position,
        position.outcome()
    );
}

fn play_random(random_color: Color, settings: &SearchSettings) {
    let mut rng = StdRng::from_entropy();
    let mut position = Position::start_position();
    let mut plies = 0;
    while !position.is_terminal() && plies < MAX_GAME_LENGTH {
        let mv = if position.side_to_move() == random_color {
            match search::random_move(&position, &mut rng) {
                Ok(mv) => {
                    println!("Random player plays {}", mv);
                    mv
                }
                Err(_) => break,
            }
        } else {
            match engine_move(&position, settings) {
                Some(mv) => mv,
                None => break,
            }
        };
        position = position.result(mv);
        plies += 1;
    }
    println!("{:?}\nResult after {} plies: {}", position, plies, position.outcome());
}

fn perft(position: &Position, max_depth: u16) {
    for depth in 0..=max_depth {
        let start_time = time::Instant::now();
        let result = position.perft(depth);
        println!(
            "{}: {}, {:.2}s, {:.1} Mnps",
            depth,
            result,
            start_time.elapsed().as_secs_f32(),
            result as f32 / start_time.elapsed().as_micros().max(1) as f32
        );
    }
}

fn eval_diagram() -> io::Result<()> {
    println!("Enter side to move and a 9-line diagram (or leave empty for the start position)");
    let stdin = io::stdin();
    let mut first_line = String::new();
    stdin.lock().read_line(&mut first_line)?;
    let position = if first_line.trim().is_empty() {
        Position::start_position()
    } else {
        let side = match parse_side(&first_line) {
            Ok(side) => side,
            Err(err) => {
                println!("{}", err);
                return Ok(());
            }
        };
        let mut diagram = String::new();
        for _ in 0..9 {
            stdin.lock().read_line(&mut diagram)?;
        }
        match Position::from_diagram(&diagram, side) {
            Ok(position) => position,
            Err(err) => {
                println!("{}", err);
                return Ok(());
            }
        }
    };
    println!("{:?}", position);
    for side in [Color::White, Color::Black] {
        println!(
            "{}: {:.3}, features {:?}",
            side_name(side),
            evaluation::evaluate(&position, side),
            evaluation::features(&position, side)
        );
    }
    Ok(())
}

fn side_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}
