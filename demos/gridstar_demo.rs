//! Generates an obstacle grid, searches it and prints the path.
//!
//! Run: cargo run --bin gridstar-demo -- [--config demo.toml]

use std::io::Write;

use gridstar_demos::{load_config, parse_args, run, write_path};

fn print_help() {
    println!("gridstar-demo - A* search over a randomly generated obstacle grid");
    println!();
    println!("USAGE:");
    println!("    gridstar-demo [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <FILE>    TOML config (grid size, obstacles, seed, endpoints)");
    println!("    -h, --help             Print this help");
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            print_help();
            std::process::exit(1);
        }
    };
    if args.help {
        print_help();
        return;
    }

    let report = load_config(args.config_path.as_deref()).and_then(|cfg| run(&cfg));
    let report = match report {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    log::info!(
        "{} cells blocked, {} expanded, {} discovered",
        report.grid.blocked_count(),
        report.stats.expanded,
        report.stats.discovered
    );

    let stdout = std::io::stdout();
    if let Err(e) = write_path(&mut stdout.lock(), &report.path) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
