//! unzboot - extract a kernel image from an EFI zboot container.
//!
//! Reads an EFI zboot image (or an already-bare kernel image), unpacks
//! and decompresses the embedded payload if present, verifies the
//! result carries a recognized kernel architecture signature, and
//! writes the image out.

use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use unzboot_image::extract;

#[derive(Parser)]
#[command(name = "unzboot")]
#[command(
    author,
    version,
    about = "Extract a kernel image from an EFI zboot container"
)]
struct Cli {
    /// EFI zboot image (or bare kernel image) to read
    input: PathBuf,

    /// Where to write the extracted kernel image ("-" for stdout)
    output: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(&cli.input)
        .map_err(|e| format!("{}: cannot load input file: {}", cli.input.display(), e))?;

    let image = extract(data)?;

    // Keep the note off stdout so "-" output stays a clean byte stream.
    eprintln!("{}: found {} kernel image", cli.input.display(), image.arch);

    if cli.output.as_os_str() == "-" {
        io::stdout().write_all(&image.data)?;
    } else {
        fs::write(&cli.output, &image.data)
            .map_err(|e| format!("{}: cannot write output file: {}", cli.output.display(), e))?;
    }

    Ok(())
}
