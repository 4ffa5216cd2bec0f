use std::{env, fs::read_to_string, process::ExitCode, time::Instant};

use scriptc::{
    display_error,
    session::{
        prelude::{PRELUDE_PATH, PRELUDE_SOURCE},
        session::{Session, SessionOptions, SourceFile},
    },
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let paths: Vec<String> = env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: scriptc FILE...");
        return ExitCode::FAILURE;
    }

    let start = Instant::now();

    let mut sources = Vec::with_capacity(paths.len());
    for path in &paths {
        match read_to_string(path) {
            Ok(text) => sources.push(SourceFile {
                path: path.clone(),
                text,
            }),
            Err(error) => {
                eprintln!("Failed to read {}: {}", path, error);
                return ExitCode::FAILURE;
            }
        }
    }

    println!("Read {} files in {:?}", sources.len(), start.elapsed());

    let compile_start = Instant::now();
    let result = Session::new(SessionOptions::default()).compile(&sources);

    println!("Checked in {:?}", compile_start.elapsed());

    match result {
        Ok(program) => {
            println!(
                "Checked {} expressions across {} files",
                program.types.len(),
                program.files.len()
            );
            println!("Total time: {:?}", start.elapsed());
            ExitCode::SUCCESS
        }
        Err(error) => {
            let file = error.get_position().file.as_str();
            let source = if file == PRELUDE_PATH {
                PRELUDE_SOURCE
            } else {
                sources
                    .iter()
                    .find(|source| source.path == file)
                    .map(|source| source.text.as_str())
                    .unwrap_or("")
            };

            display_error(&error, source);
            ExitCode::FAILURE
        }
    }
}
