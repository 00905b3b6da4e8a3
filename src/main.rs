use std::{io::Write as _, path::PathBuf};

use kmaze::{
    error::AppError,
    logging,
    render::{self, Style},
    settings::{MazeTermination, SetsVariant, Settings},
};
use mazecore::{maze::Generator, solver::Solver};

use clap::Parser;
use rand::{thread_rng, Rng as _};

#[derive(Parser, Debug)]
#[clap(version, author, about, name = "kmaze")]
struct Args {
    #[clap(help = "Maze width in cells")]
    width: Option<usize>,
    #[clap(help = "Maze height in cells")]
    height: Option<usize>,
    #[clap(long, help = "Seed for the random generator, printed with --stats")]
    seed: Option<u64>,
    #[clap(long, action, help = "Draw the path from the entrance to the exit")]
    solve: bool,
    #[clap(long, value_enum, help = "Disjoint-set implementation used while carving")]
    sets: Option<SetsVariant>,
    #[clap(long, action, help = "Stop carving once the entrance reaches the exit")]
    imperfect: bool,
    #[clap(long, action, help = "Disable colors")]
    plain: bool,
    #[clap(long, action, help = "Print generation and solving statistics")]
    stats: bool,
    #[clap(short, long, action = clap::ArgAction::Count, help = "Log more, can be repeated")]
    verbose: u8,
    #[clap(long, help = "Use this settings file instead of the default one")]
    config: Option<PathBuf>,
    #[clap(short, long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, help = "Show config in debug format and quit")]
    debug_config: bool,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let config_path = args.config.clone().unwrap_or_else(Settings::default_path);

    if args.reset_config {
        Settings::reset_config(config_path)?;
        return Ok(());
    }

    if args.show_config_path {
        if let Some(s) = config_path.to_str() {
            println!("{}", s);
        } else {
            println!("{:?}", config_path);
        }
        return Ok(());
    }

    let settings = Settings::load(config_path)?;

    if args.debug_config {
        println!("{:#?}", settings);
        return Ok(());
    }

    if args.plain {
        colored::control::set_override(false);
    }
    logging::init(logging::raise_level(
        settings.get_log_level(),
        args.verbose,
    ))?;

    let width = args.width.unwrap_or_else(|| settings.get_width());
    let height = args.height.unwrap_or_else(|| settings.get_height());
    let termination = if args.imperfect {
        MazeTermination::EntranceToExit
    } else {
        settings.get_termination()
    };
    let seed = args.seed.unwrap_or_else(|| thread_rng().gen());

    let generator = Generator::new()
        .sets(args.sets.unwrap_or_else(|| settings.get_sets()).into())
        .termination(termination.into())
        .seed(Some(seed));
    let (maze, gen_stats) = generator.generate_stats(width, height)?;
    let grid = maze.to_grid();

    let solution = if args.solve || settings.get_solve() {
        Some(Solver::new().find_path(&grid)?)
    } else {
        None
    };
    let shown = match &solution {
        Some(solution) => solution.paint(&grid),
        None => grid,
    };

    let mut stdout = std::io::stdout().lock();
    write!(
        stdout,
        "{}",
        render::render(&shown, &Style::from_settings(&settings, args.plain))
    )?;

    if args.stats {
        writeln!(stdout, "seed: {}", seed)?;
        writeln!(
            stdout,
            "samples: {} ({} out of bounds, {} cycles)",
            gen_stats.samples, gen_stats.out_of_bounds, gen_stats.cycles
        )?;
        writeln!(stdout, "walls cleared: {}", gen_stats.walls_cleared)?;
        writeln!(stdout, "sets left: {}", gen_stats.sets_left)?;
        writeln!(stdout, "average depth: {:.3}", gen_stats.average_depth)?;
        if let Some(solution) = &solution {
            writeln!(
                stdout,
                "path: {} steps, {} nodes expanded",
                solution.cost, solution.expanded
            )?;
        }
    }

    Ok(())
}
