use std::path::PathBuf;

fn main() {
    env_logger::init();

    let db_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var("TRAFFICDASH_DB").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("database/traffic_data.db"));

    log::info!("watching {}", db_path.display());

    if let Err(err) = trafficdash::run(&db_path) {
        eprintln!("trafficdash: {err}");
        std::process::exit(1);
    }
}
