//! Resolve command - replay a chain reaction step by step

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output::{print_grid, print_kv, print_section, print_subsection},
    game::{Grid, OverflowRecord, resolve_recorded},
};

#[derive(Parser, Debug)]
#[command(about = "Resolve the chain reaction on a grid")]
pub struct ResolveArgs {
    /// Grid with rows separated by '/', e.g. "2 1 / 0 -1"
    #[arg(allow_hyphen_values = true)]
    pub grid: String,
}

pub fn execute(args: ResolveArgs) -> Result<()> {
    let mut grid: Grid = args.grid.parse()?;

    print_section("Initial Grid");
    print_grid(&grid);

    let mut record = OverflowRecord::new();
    let steps = resolve_recorded(&mut grid, &mut record);

    for (index, snapshot) in record.iter().enumerate() {
        print_subsection(&format!("Step {}", index + 1));
        print_grid(snapshot);
    }

    print_section("Result");
    print_kv("Cascade steps", &steps.to_string());
    let owner = match grid.sole_owner() {
        Some(player) => player.to_string(),
        None => "contested".to_string(),
    };
    print_kv("Board owner", &owner);

    Ok(())
}
