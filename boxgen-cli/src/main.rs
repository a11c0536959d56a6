//! Command line front-end for the boxgen generators, prints generated boxes
//! as plain text, one per line.

pub mod config;

use std::process::ExitCode;

use boxgen::gen::{self, Container, FigureGenerator};
use boxgen::geom::{Debuff, Material, PuzzleBox};
use boxgen::rand::{self, MixRandom};


const USAGE: &str = "\
usage:
  boxgen-cli tile <WIDTH> <HEIGHT> <DEPTH> <CUTS> [SEED]
  boxgen-cli figure <COUNT> [SEED]

Omitting SEED picks a non-reproducible one. See BOXGEN_* environment
variables for debuff and material options.";


pub fn main() -> ExitCode {

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("{USAGE}");
            ExitCode::FAILURE
        }
    }

}

fn run(args: &[String]) -> Result<(), String> {
    match args.first().map(String::as_str) {
        Some("tile") => run_tile(&args[1..]),
        Some("figure") => run_figure(&args[1..]),
        Some(other) => Err(format!("unknown command: {other}")),
        None => Err("missing command".to_string()),
    }
}

fn run_tile(args: &[String]) -> Result<(), String> {

    if !(4..=5).contains(&args.len()) {
        return Err("tile expects <WIDTH> <HEIGHT> <DEPTH> <CUTS> [SEED]".to_string());
    }

    let width = parse_arg::<u32>(&args[0], "WIDTH")?;
    let height = parse_arg::<u32>(&args[1], "HEIGHT")?;
    let depth = parse_arg::<u32>(&args[2], "DEPTH")?;
    let cuts = parse_arg::<u32>(&args[3], "CUTS")?;
    let seed = parse_seed(args.get(4))?;

    let container = Container::new(width, height, depth);
    let distribution = config::debuff_distribution();
    let boxes = gen::generate_boxes_with_distribution(seed, cuts, container, &distribution)
        .map_err(|e| e.to_string())?;

    println!("tiled {width}x{height}x{depth} with seed {seed}: {} boxes", boxes.len());
    for b in &boxes {
        print_box(b);
    }

    Ok(())

}

fn run_figure(args: &[String]) -> Result<(), String> {

    if !(1..=2).contains(&args.len()) {
        return Err("figure expects <COUNT> [SEED]".to_string());
    }

    let count = parse_arg::<usize>(&args[0], "COUNT")?;
    let seed = parse_seed(args.get(1))?;

    let mut rand = MixRandom::new(seed);
    let boxes = FigureGenerator::new(count)
        .with_glass_chance(config::glass_chance())
        .generate(&mut rand);

    println!("figure with seed {seed}: {} of {count} boxes", boxes.len());
    for b in &boxes {
        print_box(b);
    }

    Ok(())

}

fn print_box(b: &PuzzleBox) {
    print!("  center {} size {}", b.center, b.size);
    if b.material == Material::Glass {
        print!(" glass");
    }
    for debuff in Debuff::ALL {
        if b.debuffs.contains(debuff) {
            print!(" {debuff:?}");
        }
    }
    println!();
}

fn parse_arg<T: std::str::FromStr>(raw: &str, name: &str) -> Result<T, String> {
    raw.parse::<T>().map_err(|_| format!("invalid {name}: {raw}"))
}

fn parse_seed(raw: Option<&String>) -> Result<u32, String> {
    match raw {
        Some(raw) => parse_arg::<u32>(raw, "SEED"),
        None => Ok(rand::gen_seed()),
    }
}
