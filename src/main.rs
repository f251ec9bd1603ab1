use ip_range_match::config::Config;
use ip_range_match::output::format_match_row;
use log4rs;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default()).expect("Error initializing log4rs");
    dotenv::dotenv().ok();
    //
    log::info!("#Start main()");

    let config = Config::from_env()?;
    log::info!("# Loaded {} range spec(s)", config.ranges.len());

    let addresses: Vec<String> = std::env::args().skip(1).collect();
    if addresses.is_empty() {
        return Err("usage: ip-range-match <address>...".into());
    }

    for raw in &addresses {
        let result = config.ranges.is_in_range(raw);
        println!("{}", format_match_row(raw, &result, &config.ranges));
    }

    Ok(())
}
