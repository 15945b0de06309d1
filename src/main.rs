use anyhow::{anyhow, Result};
use clap::Parser;
use std::process::ExitCode;

use md2html::cli::{self, Args};

fn main() -> Result<ExitCode> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            // Argument errors exit with 1 rather than clap's 2
            e.print()?;
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            e.print()?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    if args.license {
        println!("{}", Args::license_text());
        return Ok(ExitCode::SUCCESS);
    }

    cli::init_logging(args.verbose, args.quiet)
        .map_err(|e| anyhow!("failed to set up logging: {}", e))?;

    let (Some(config_path), Some(htdocs)) = (&args.config, &args.htdocs) else {
        return Err(anyhow!("expected a json configuration filename and htdocs path"));
    };

    match cli::run(&args, config_path, htdocs) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            cli::handle_error(&e);
            Ok(ExitCode::FAILURE)
        }
    }
}
