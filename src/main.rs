use clap::Parser;
use log::error;

use multidrop_patch::cli::Args;

fn main() {
    // Cargar .env si existe (DATABASE_URL, RUST_LOG)
    multidrop_persistence::init_dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).format_timestamp(None)
                                                                                       .init();

    let args = Args::parse();
    match multidrop_patch::run(&args) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            error!("patch aborted: {e}");
            eprintln!("❌ Migration failed: {e}");
            std::process::exit(1);
        }
    }
}
