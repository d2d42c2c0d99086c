#[tokio::main]
async fn main() -> anyhow::Result<()> {
    audit_report::logging::init_logging();
    let args: Vec<String> = std::env::args().collect();
    audit_report::run::run(args, None).await
}
