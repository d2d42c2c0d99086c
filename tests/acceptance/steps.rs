use crate::ReportWorld;
use audit_report::config;
use audit_report::filter;
use audit_report::github::queries;
use cucumber::{given, then, when};
use serde_json::{Value, json};

#[given(regex = r#"^the organization "([^"]+)" owns project (\d+)$"#)]
async fn given_organization_owns_project(world: &mut ReportWorld, login: String, number: i64) {
    world.github.add_organization_project(&login, number);
}

#[given(regex = r#"^the user "([^"]+)" owns project (\d+)$"#)]
async fn given_user_owns_project(world: &mut ReportWorld, login: String, number: i64) {
    world.github.add_user_project(&login, number);
}

#[given(regex = r#"^project (\d+) has a single-select field "([^"]+)" with options "([^"]*)"$"#)]
async fn given_single_select_field(
    world: &mut ReportWorld,
    number: i64,
    name: String,
    options: String,
) {
    let options: Vec<&str> = options.split(',').map(str::trim).collect();
    world.github.add_single_select_field(number, &name, &options);
}

#[given(regex = r#"^project (\d+) has a text field$"#)]
async fn given_text_field(world: &mut ReportWorld, number: i64) {
    world.github.add_text_field(number);
}

#[given(regex = r#"^issue #(\d+) of repository "([^"]+)" is in column "([^"]+)" of project (\d+)$"#)]
async fn given_issue_in_column(
    world: &mut ReportWorld,
    issue_number: u64,
    repository: String,
    column: String,
    number: i64,
) {
    world.github.add_item(
        number,
        &column,
        json!({"number": issue_number, "repository": {"name": repository}}),
    );
}

#[given(regex = r#"^a draft item is in column "([^"]+)" of project (\d+)$"#)]
async fn given_draft_in_column(world: &mut ReportWorld, column: String, number: i64) {
    world.github.add_item(number, &column, json!({}));
}

#[given(regex = r#"^the config targets "([^"]+)" with project number "([^"]*)"$"#)]
async fn given_config_targets(world: &mut ReportWorld, repository: String, project_number: String) {
    world
        .config
        .insert("private_github".to_string(), Value::String(repository));
    world
        .config
        .insert("project_number".to_string(), Value::String(project_number));
}

#[given(regex = r#"^the config filters on column "([^"]*)"$"#)]
async fn given_config_column(world: &mut ReportWorld, column: String) {
    world
        .config
        .insert("filter_issue_column".to_string(), Value::String(column));
}

#[given(regex = r#"^the config lists issue ids "([^"]*)"$"#)]
async fn given_config_issue_ids(world: &mut ReportWorld, ids: String) {
    let ids: Vec<Value> = ids
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| Value::String(id.to_string()))
        .collect();
    world
        .config
        .insert("filter_issue_id_list".to_string(), Value::Array(ids));
}

#[given(regex = r#"^the config labels issues with "([^"]*)"$"#)]
async fn given_config_label(world: &mut ReportWorld, label: String) {
    world
        .config
        .insert("filter_issue_label".to_string(), Value::String(label));
}

#[when("I collect the issue filter")]
async fn when_collect_issue_filter(world: &mut ReportWorld) {
    let content = serde_json::to_vec(&Value::Object(world.config.clone()))
        .expect("config should serialize");
    let config_map = config::parse_config(&content).expect("config should parse");
    let settings = config::report_settings(&config_map).expect("settings should be valid");

    let result = filter::collect_filter(&world.github, &settings)
        .await
        .map_err(|err| err.to_string());
    world.filter_result = Some(result);
}

fn collected(world: &ReportWorld) -> &filter::FilterSpecification {
    match &world.filter_result {
        Some(Ok(spec)) => spec,
        Some(Err(err)) => panic!("collecting the filter failed: {err}"),
        None => panic!("the filter was never collected"),
    }
}

#[then(regex = r#"^the issue filter should be "([^"]*)"$"#)]
async fn then_issue_filter_should_be(world: &mut ReportWorld, expected: String) {
    let spec = collected(world);
    let actual = match &spec.issue_ids {
        None => "all".to_string(),
        Some(ids) if ids.is_empty() => "none".to_string(),
        Some(ids) => ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    };
    assert_eq!(actual, expected, "unexpected issue filter: {spec:?}");
}

#[then(regex = r#"^the label filter should be "([^"]*)"$"#)]
async fn then_label_filter_should_be(world: &mut ReportWorld, expected: String) {
    let spec = collected(world);
    assert_eq!(spec.label.as_deref(), Some(expected.as_str()));
}

#[then(regex = r#"^collecting the filter should fail with "([^"]*)"$"#)]
async fn then_collecting_should_fail(world: &mut ReportWorld, expected: String) {
    match &world.filter_result {
        Some(Err(err)) => assert!(
            err.contains(&expected),
            "expected error containing '{expected}', got '{err}'"
        ),
        other => panic!("expected a failure, got {other:?}"),
    }
}

#[then("no user lookup should have been made")]
async fn then_no_user_lookup(world: &mut ReportWorld) {
    assert!(!world.github.requests().contains(&queries::USER));
}

#[then("the owner should have been looked up as organization then user")]
async fn then_org_then_user(world: &mut ReportWorld) {
    let requests = world.github.requests();
    assert_eq!(&requests[..2], &[queries::ORGANIZATION, queries::USER]);
}

#[then("no GraphQL request should have been made")]
async fn then_no_requests(world: &mut ReportWorld) {
    assert!(world.github.requests().is_empty());
}
