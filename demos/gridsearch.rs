//! Terminal demo: animate one search strategy on a grid.
//!
//! Run: cargo run --bin gridsearch -- bfs --size 10x10 --start 0,0 --target 9,9

use std::io::{self, Write};
use std::thread;

use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use clap::Parser;
use gridsearch_core::{Coord, Grid};
use gridsearch_demos::{DemoArgs, Mark, mark_frame, pick_endpoints};
use gridsearch_paths::{SearchRequest, Snapshot, path_cost};

fn mark_color(m: Mark) -> Color {
    match m {
        Mark::Start => Color::Green,
        Mark::Target => Color::Blue,
        Mark::Path => Color::Magenta,
        Mark::Explored => Color::DarkGrey,
        Mark::Frontier => Color::Yellow,
        Mark::Empty => Color::Reset,
    }
}

fn draw(
    out: &mut impl Write,
    grid: Grid,
    start: Coord,
    target: Coord,
    snapshot: &Snapshot,
) -> io::Result<()> {
    queue!(out, cursor::MoveTo(0, 0), terminal::Clear(ClearType::All))?;
    for (row, marks) in mark_frame(grid, start, target, snapshot).into_iter().enumerate() {
        queue!(out, cursor::MoveTo(0, row as u16))?;
        for m in marks {
            queue!(out, SetForegroundColor(mark_color(m)), Print(m.glyph()), Print(' '))?;
        }
    }
    queue!(out, ResetColor)?;
    out.flush()
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = DemoArgs::parse();
    args.validate()?;
    let (start, target) = pick_endpoints(args.grid, &mut rand::rng(), args.start, args.target);
    let req = SearchRequest::new(args.grid, start, target);
    req.validate()?;

    let algorithm = args.algorithm;
    let mut stdout = io::stdout();
    let mut frames = 0usize;
    let mut last = None;

    execute!(stdout, cursor::Hide)?;
    for snapshot in args.config().start(req) {
        frames += 1;
        if !args.final_only {
            draw(&mut stdout, args.grid, start, target, &snapshot)?;
            thread::sleep(args.delay());
        }
        last = Some(snapshot);
    }
    if args.final_only {
        if let Some(snapshot) = &last {
            draw(&mut stdout, args.grid, start, target, snapshot)?;
        }
    }
    execute!(
        stdout,
        cursor::MoveTo(0, args.grid.rows() as u16 + 1),
        cursor::Show
    )?;

    match last.and_then(|s| s.path) {
        Some(path) => {
            let cost = path_cost(&path).unwrap_or_default();
            println!(
                "{algorithm}: {start} -> {target} in {} steps, cost {cost} ({frames} frames)",
                path.len() - 1
            );
        }
        None => println!("{algorithm}: {target} unreachable from {start} ({frames} frames)"),
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        let _ = execute!(io::stdout(), cursor::Show);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
