use clap::Parser;

use commands::rewrite::RewriteArgs;
use commands::GlobalArgs;

mod commands;
mod output;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const USAGE: &str = "Usage: logmigrate <file1> [file2] ...";

#[derive(Parser)]
#[command(name = "logmigrate")]
#[command(version = VERSION)]
#[command(about = "Rewrite console.log/warn/error calls into structured logger calls")]
struct Cli {
    #[command(flatten)]
    args: RewriteArgs,

    /// Print the result as a JSON envelope
    #[arg(long)]
    json: bool,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs { json: cli.json };

    if cli.args.files.is_empty() {
        if global.json {
            output::print_json_result(Err(logmigrate::Error::validation_missing_argument(
                vec!["files".to_string()],
            )));
        } else {
            println!("{}", USAGE);
        }
        return std::process::ExitCode::from(1);
    }

    let result = commands::rewrite::run(&cli.args, &global);
    let (json_result, exit_code) = output::map_cmd_result_to_json(result);

    if global.json {
        output::print_json_result(json_result);
    } else if let Err(err) = json_result {
        eprintln!("Error: {}", err.describe());
        for hint in &err.hints {
            eprintln!("  hint: {}", hint.message);
        }
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
