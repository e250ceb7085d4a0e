use docopt::Docopt;
use gridmaze::{
    generators,
    grid::GridGraph,
    pathing,
    units::{ColumnsCount, RowsCount},
};
use log::info;
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Grid maze

Usage:
    gridmaze_driver -h | --help
    gridmaze_driver [--rows=<r>] [--cols=<c>] [--seed=<s>] [--save-edges=<path>] [--show-path]

Options:
    -h --help              Show this screen.
    --rows=<r>             Number of rows in the grid [default: 10].
    --cols=<c>             Number of columns in the grid [default: 10].
    --seed=<s>             Seed for the random number generator. Random if not given.
    --save-edges=<path>    Write the maze to a text file instead of stdout: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --show-path            Also print the longest path through the maze as 0-based vertex indices.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_rows: usize,
    flag_cols: usize,
    flag_seed: Option<u64>,
    flag_save_edges: String,
    flag_show_path: bool,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::gridmaze::errors::Error, ::gridmaze::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let maze_grid: GridGraph = generators::perfect_maze(RowsCount(args.flag_rows),
                                                       ColumnsCount(args.flag_cols),
                                                       args.flag_seed)?;
    info!("generated {:?}", maze_grid);

    let graph_data = edge_list(&maze_grid);
    if args.flag_save_edges.is_empty() {
        print!("{}", graph_data);
    } else {
        write_text_to_file(&graph_data, &args.flag_save_edges)
            .chain_err(|| format!("Failed to write maze graph to text file {}", args.flag_save_edges))?;
        info!("saved maze edges to {}", args.flag_save_edges);
    }

    if args.flag_show_path {
        let path = pathing::longest_path(&maze_grid)?;
        let path_text = path.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(" ");
        println!("{}", path_text);
    }

    Ok(())
}

/// The vertex count and passage count on the first line, then one passage per line.
fn edge_list(maze_grid: &GridGraph) -> String {
    let mut graph_data = String::new();
    graph_data.push_str(maze_grid.size().to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(maze_grid.links_count().to_string().as_ref());
    graph_data.push('\n');

    for edge in maze_grid.iter_links() {
        let src_as_1_based_index = edge.source + 1;
        let dst_as_1_based_index = edge.destination + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }
    graph_data
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
