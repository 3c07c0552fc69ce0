/// Model directory packager for the JSON-only storage host
mod packager;

use packager::ModelPackager;
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <model-dir>", args[0]);
        std::process::exit(1);
    }

    let mut packager = ModelPackager::new(&args[1])?;
    packager.run()?;

    Ok(())
}
