use clap::Parser;

#[tokio::main]
async fn main() {
    let args = storefront::arguments::Arguments::parse();
    observe::tracing::initialize(args.log_filter.as_str(), args.log_stderr_threshold);
    observe::metrics::setup_registry(Some("storefront".into()), None);
    tracing::info!("running storefront with validated arguments:\n{}", args);
    if let Err(err) = storefront::run(args).await {
        tracing::error!(?err, "storefront exited");
        std::process::exit(1);
    }
}
