//! Command line entry point (native).

#[cfg(feature = "native")]
fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match sigpad_app::parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}\n\n{}", e, sigpad_app::USAGE);
            std::process::exit(2);
        }
    };
    if options.help {
        println!("{}", sigpad_app::USAGE);
        return;
    }

    log::info!("Starting SigPad");
    if let Err(e) = sigpad_app::run(&options, std::io::stdin().lock(), std::io::stdout().lock()) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
