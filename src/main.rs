use std::process::ExitCode;

use asb_tracker::application::{Application, Args};
use asb_tracker::readers::http::HttpReader;
use clap::Parser;
use log::error;
use simple_logger::SimpleLogger;

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = SimpleLogger::new().with_level(args.log_level).init() {
        eprintln!("Unable to initialize the logger: {}", e);
    }

    let config = args.to_config();
    let result = HttpReader::new(&config.user_agent)
        .and_then(|reader| Application::new(config, Box::new(reader)))
        .and_then(|application| application.run(args.writer.create().as_ref(), args.newest_only));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
