use std::env;

use chess_core::{Game, STARTING_FEN as START};
use log::warn;

const BANNER: &str = "========================================";

enum Step {
    Move(&'static str, &'static str),
    Print,
}

struct Scenario {
    title: &'static str,
    fen: &'static str,
    steps: &'static [Step],
}

use Step::{Move, Print};

const SCENARIOS: &[Scenario] = &[
    Scenario {
        title: "Pawn Movement (No Obstacle)",
        fen: START,
        steps: &[Move("E2", "E4"), Move("E7", "E5")],
    },
    Scenario {
        title: "Bishop Diagonal Movement (Valid Move)",
        fen: START,
        steps: &[Move("E2", "E4"), Move("E7", "E5"), Move("F1", "C4")],
    },
    Scenario {
        title: "Bishop Diagonal Movement (with Obstacle)",
        fen: START,
        steps: &[Move("F1", "C4")],
    },
    Scenario {
        title: "King Movement (Valid Move)",
        fen: START,
        steps: &[Move("E2", "E4"), Move("E7", "E5"), Move("E1", "E2")],
    },
    Scenario {
        title: "Queen Movement (Valid Move)",
        fen: START,
        steps: &[Move("E2", "E4"), Move("D7", "D5"), Move("D1", "F3")],
    },
    Scenario {
        title: "Queen Movement (Invalid Move)",
        fen: START,
        steps: &[Print, Move("E2", "E4"), Move("D7", "D5"), Move("D1", "D3"), Print],
    },
    Scenario {
        title: "Rook Movement (Invalid Move)",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq",
        steps: &[Move("A8", "B4"), Print],
    },
    Scenario {
        title: "Rook Movement (Capture Opponent)",
        fen: "rnbqkbnr/pp1pp1pp/4p2p/6P1/8/2P5/PPP1PPP1/RNBQKBNR w KQkq",
        steps: &[Print, Move("H3", "G4"), Move("H1", "H6"), Print],
    },
    Scenario {
        title: "Check Mate Test (Legals Mate)",
        fen: "r2qkbnr/ppp1pppp/3p4/4N3/2B1P3/2N5/PPPP1PPP/R1BbK2R w KQkq",
        steps: &[Print, Move("C4", "F7")],
    },
    Scenario {
        title: "Check Mate Test (Anastasias Mate)",
        fen: "5r1k/pbrnNpp1/1pp5/2P1p2q/3P4/1P5R/P4PPP/5RK1 w KQkq",
        steps: &[Print, Move("H3", "H5")],
    },
    Scenario {
        title: "Check Mate Test (Grecos Mate)",
        fen: "k3r3/pp1r2p1/7p/2p2p2/2Np4/3R2BP/PPP3P1/6K1 w KQkq",
        steps: &[Print, Move("C4", "B6"), Move("A7", "B6"), Move("D3", "A3")],
    },
    Scenario {
        title: "Check Mate Test (Hooks Mate)",
        fen: "2b1Q3/1kp5/p1Nb4/3P4/1P5p/p6P/K3R1P1/5q2 w KQkq",
        steps: &[
            Print,
            Move("E8", "C8"),
            Move("B7", "C8"),
            Move("E2", "E8"),
            Move("C8", "D7"),
            Move("E8", "D8"),
        ],
    },
    Scenario {
        title: "Stale Mate Test (Stale Mate)",
        fen: "8/8/8/8/6p1/8/5k2/7K b KQkq",
        steps: &[Print, Move("G4", "G3"), Print],
    },
];

fn run(game: &mut Game, scenario: &Scenario) {
    println!("{BANNER}");
    println!("{}", scenario.title);
    println!("{BANNER}");

    if let Err(err) = game.load(scenario.fen) {
        warn!("skipping '{}': {}", scenario.title, err);
        println!("{err}");
        return;
    }
    println!("A new board state is loaded!");

    for step in scenario.steps {
        match step {
            Move(from, to) => match game.submit_move(from, to) {
                Ok(report) => println!("{report}"),
                Err(err) => println!("{err}"),
            },
            Print => print!("{game}"),
        }
    }
    println!();
}

fn main() {
    let filter = env::args().nth(1);

    if filter.as_deref() == Some("--list") {
        for scenario in SCENARIOS {
            println!("{}", scenario.title);
        }
        return;
    }

    let filter = filter.map(|f| f.to_lowercase());
    let mut game = Game::new();
    let mut ran = 0;
    for scenario in SCENARIOS {
        let selected = filter
            .as_deref()
            .map_or(true, |f| scenario.title.to_lowercase().contains(f));
        if selected {
            run(&mut game, scenario);
            ran += 1;
        }
    }

    if ran == 0 {
        warn!("no scenario matches {:?}", filter);
        eprintln!("No scenario matches; use --list to see the available titles");
    }
}
