use anyhow::Result;
use rover_core::bank::ActuatorBank;

/// Run the HTTP control daemon until Ctrl-C, then shut the actuation worker
/// down so the bank is left quiescent even if a command was mid-flight.
pub fn run(port: u16, simulate: bool) -> Result<()> {
    let bank = super::open_bank(simulate)?;
    let lines = bank.probe();
    let (worker, client) = rover_core::worker::spawn(bank);

    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(async move {
        tokio::select! {
            res = rover_server::serve(client, lines, port) => res,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                Ok(())
            }
        }
    });

    worker.shutdown();
    result
}
