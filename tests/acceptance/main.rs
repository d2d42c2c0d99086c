use audit_report::filter::FilterSpecification;
use cucumber::World;

mod fake_github;
mod steps;

#[derive(Debug, Default, World)]
pub struct ReportWorld {
    pub github: fake_github::FakeGitHub,
    pub config: serde_json::Map<String, serde_json::Value>,
    pub filter_result: Option<Result<FilterSpecification, String>>,
}

#[tokio::main]
async fn main() {
    ReportWorld::run("features").await;
}
