use snap_bridge::{
    BackgroundTasks, Config, PrintDispatcher, ReceiptRenderer, SocketIntake, TaskKind,
    init_logger_with_file, print_banner,
};
use std::time::Duration;
use tokio::sync::mpsc;

const HEALTH_CHECK_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env) and configuration
    dotenv::dotenv().ok();
    let config = Config::from_env()?;

    // 2. Logging
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    print_banner();

    tracing::info!(
        backend = %config.backend_url,
        restaurant_id = config.restaurant_id,
        printer = %config.destination(),
        "Snap printer bridge starting..."
    );

    // 3. Intake → dispatcher channel
    let (order_tx, order_rx) = mpsc::unbounded_channel();

    let mut tasks = BackgroundTasks::new();
    let shutdown = tasks.shutdown_token();

    let dispatcher = PrintDispatcher::new(
        ReceiptRenderer::new(config.renderer_config()),
        config.destination(),
        config.print_timeout(),
        shutdown.clone(),
    );
    tasks.spawn("print_dispatcher", TaskKind::Worker, dispatcher.run(order_rx));

    let intake = SocketIntake::new(&config, order_tx);
    tasks.spawn("backend_intake", TaskKind::Listener, intake.run(shutdown));

    tasks.log_summary();

    // 4. Run until Ctrl-C, reporting tasks that exit early
    let mut health = tokio::time::interval(HEALTH_CHECK_INTERVAL);
    health.tick().await;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            result = &mut ctrl_c => {
                result?;
                break;
            }
            _ = health.tick() => {
                tasks.check_health();
            }
        }
    }
    tracing::info!("Shutdown requested");
    tasks.shutdown().await;

    Ok(())
}
