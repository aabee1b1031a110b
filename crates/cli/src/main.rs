// CLI modules
mod cli;
mod logging;
mod state;

use clap::{Parser, Subcommand};
use cli::{
    args::Args, op::Op, Connect, Create, Delete, Edit, Explore, Init, List, Networks, Price,
    Switch, Tip, Verify, Version, View,
};

command_enum! {
    (Connect, Connect),
    (Create, Create),
    (Delete, Delete),
    (Edit, Edit),
    (Explore, Explore),
    (Init, Init),
    (List, List),
    (Networks, Networks),
    (Price, Price),
    (Switch, Switch),
    (Tip, Tip),
    (Verify, Verify),
    (Version, Version),
    (View, View),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Missing config falls back to defaults; a broken one is fatal
    let ctx = match cli::op::OpContext::new(args.config_path, args.network, args.wallet) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let guards = logging::init_logging(&ctx.state.config, args.log_level);

    let code = match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            tracing::debug!("command failed: {:?}", e);
            eprintln!("Error: {}", e);
            1
        }
    };

    // Flush pending log lines before exiting
    drop(guards);
    std::process::exit(code);
}
