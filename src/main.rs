use appointy::{Config, Server, app, logging};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), appointy::Error> {
    let config = Config::load()?;
    logging::init(&config.log);

    let addr = config.addr()?;
    info!(%addr, "starting appointy");

    // Bind failure ends the process with a non-zero exit.
    Server::bind(addr).serve(app()).await.inspect_err(|e| {
        error!(error = %e, "server failed");
    })
}
