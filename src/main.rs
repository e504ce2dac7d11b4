use clap::{CommandFactory, Parser};
use covid19_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // No subcommand: show help and exit cleanly
    if args.command.is_none() {
        if let Err(e) = Args::command().print_long_help() {
            eprintln!("Failed to print help: {}", e);
            process::exit(1);
        }
        show_examples();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    eprintln!("Failed to listen for CTRL+C: {}", e);
                }
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(covid19_processor::Error::processing_interrupted(
                    "Processing interrupted by user",
                )
                .into())
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn show_examples() {
    println!();
    println!("EXAMPLES:");
    println!("    # Worldwide report from a CSSE checkout:");
    println!("    covid19-processor --data-path ./COVID-19/csse_covid_19_data global");
    println!();
    println!("    # Ten US counties as JSON:");
    println!("    covid19-processor us --top 10 --format json");
    println!();
    println!("    # Lookup table entries for one country:");
    println!("    covid19-processor locations --country Canada");
    println!();
    println!("    # Check which input files are present:");
    println!("    covid19-processor sources");
}
