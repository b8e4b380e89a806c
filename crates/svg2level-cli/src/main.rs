//! svg2level - SVG level compiler for the nothing game
//!
//! Converts levels drawn in an SVG editor into the text format the game
//! loads, resolves the script files they reference, and compiles whole
//! level folders with a meta.txt listing.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use svg2level_core::{convert, list_scripts, ConvertOptions};

#[derive(Parser, Debug)]
#[command(
    name = "svg2level",
    about = "Compile SVG levels into the nothing game's level format",
    long_about = "Compile SVG levels into the nothing game's level format.\n\
                  \n\
                  Levels are drawn in any SVG editor and tagged through element ids:\n\
                  background, player, rect*, backrect*, goal*, lava*, box*, label*\n\
                  and script*. Script regions name their script file and arguments\n\
                  in a <title> child; the file's contents are inlined into the\n\
                  compiled level.",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert one SVG file into a level file
    Convert {
        /// Input SVG file
        #[arg(value_name = "SVG_FILE")]
        input: Option<PathBuf>,

        /// Output level file
        #[arg(value_name = "OUTPUT_FILE")]
        output: Option<PathBuf>,

        /// Directory script paths resolve against (default: the SVG's directory)
        #[arg(long, value_name = "DIR")]
        script_root: Option<PathBuf>,
    },

    /// Compile several SVG files into a level folder
    #[command(long_about = "Compile several SVG files into a level folder.\n\
                      \n\
                      Each input produces <stem>.txt in the output folder. After all\n\
                      inputs compile, meta.txt lists the produced files in input order.\n\
                      \n\
                      Examples:\n\
                        svg2level batch levels/*.svg -o assets/levels/")]
    Batch {
        /// Input SVG files
        #[arg(value_name = "SVG_FILES")]
        inputs: Vec<PathBuf>,

        /// Output folder for compiled levels and meta.txt
        #[arg(short, long, value_name = "OUTPUT_DIR")]
        output: Option<PathBuf>,

        /// Directory script paths resolve against (default: each SVG's directory)
        #[arg(long, value_name = "DIR")]
        script_root: Option<PathBuf>,
    },

    /// List the script files a level references
    ListScripts {
        /// Input SVG file
        #[arg(value_name = "SVG_FILE")]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Convert {
            input,
            output,
            script_root,
        } => convert_command(input, output, script_root),
        Commands::Batch {
            inputs,
            output,
            script_root,
        } => batch_command(&inputs, output, script_root),
        Commands::ListScripts { input } => list_scripts_command(input),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
    Ok(())
}

/// Build conversion options from the shared CLI flags
fn options_from(script_root: Option<PathBuf>) -> ConvertOptions {
    match script_root {
        Some(root) => ConvertOptions::default().with_script_root(root),
        None => ConvertOptions::default(),
    }
}

fn convert_command(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    script_root: Option<PathBuf>,
) -> Result<()> {
    let (Some(input), Some(output)) = (input, output) else {
        eprintln!("Usage: svg2level convert <SVG_FILE> <OUTPUT_FILE>");
        std::process::exit(1);
    };

    let options = options_from(script_root);
    convert(&input, &output, &options)
        .with_context(|| format!("Failed to convert {}", input.display()))?;
    Ok(())
}

fn batch_command(
    inputs: &[PathBuf],
    output: Option<PathBuf>,
    script_root: Option<PathBuf>,
) -> Result<()> {
    let Some(output) = output else {
        eprintln!("Usage: svg2level batch <SVG_FILES>... -o <OUTPUT_DIR>");
        std::process::exit(1);
    };
    if inputs.is_empty() {
        eprintln!("Usage: svg2level batch <SVG_FILES>... -o <OUTPUT_DIR>");
        std::process::exit(1);
    }

    fs::create_dir_all(&output)
        .with_context(|| format!("Failed to create output folder {}", output.display()))?;
    let options = options_from(script_root);

    // meta.txt is written only after every input compiled
    let mut meta = String::new();
    for input in inputs {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        let file_name = format!("{stem}.txt");
        let target = output.join(&file_name);
        println!("Compiling {} into {}", input.display(), target.display());
        convert(input, &target, &options)
            .with_context(|| format!("Failed to convert {}", input.display()))?;
        meta.push_str(&file_name);
        meta.push('\n');
    }

    let meta_path = output.join("meta.txt");
    fs::write(&meta_path, meta)
        .with_context(|| format!("Failed to write {}", meta_path.display()))?;
    Ok(())
}

fn list_scripts_command(input: Option<PathBuf>) -> Result<()> {
    let Some(input) = input else {
        println!("Usage: svg2level list-scripts <SVG_FILE>");
        return Ok(());
    };

    let scripts = list_scripts(&input)
        .with_context(|| format!("Failed to read scripts of {}", input.display()))?;
    println!("{}", scripts.join(" "));
    Ok(())
}
