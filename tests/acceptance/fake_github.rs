use audit_report::github::graphql::{GraphQlError, GraphQlExecutor, GraphQlRequest, check_response};
use audit_report::github::queries;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory GitHub answering the fixed project-board queries.
#[derive(Debug, Default)]
pub struct FakeGitHub {
    organizations: HashMap<String, String>,
    users: HashMap<String, String>,
    /// owner node id -> project numbers
    projects: HashMap<String, Vec<i64>>,
    fields: HashMap<i64, Vec<Value>>,
    items: HashMap<i64, Vec<Value>>,
    requests: Mutex<Vec<&'static str>>,
}

fn project_id(number: i64) -> String {
    format!("PVT_{number}")
}

impl FakeGitHub {
    pub fn add_organization_project(&mut self, login: &str, number: i64) {
        let owner_id = format!("O_{login}");
        self.organizations.insert(login.to_string(), owner_id.clone());
        self.projects.entry(owner_id).or_default().push(number);
    }

    pub fn add_user_project(&mut self, login: &str, number: i64) {
        let owner_id = format!("U_{login}");
        self.users.insert(login.to_string(), owner_id.clone());
        self.projects.entry(owner_id).or_default().push(number);
    }

    pub fn add_single_select_field(&mut self, number: i64, name: &str, options: &[&str]) {
        let fields = self.fields.entry(number).or_default();
        let field_id = format!("F_{number}_{}", fields.len());
        let options: Vec<Value> = options
            .iter()
            .enumerate()
            .map(|(i, option)| json!({"id": format!("{field_id}_{i}"), "name": option}))
            .collect();
        fields.push(json!({"id": field_id, "name": name, "options": options}));
    }

    pub fn add_text_field(&mut self, number: i64) {
        self.fields.entry(number).or_default().push(json!({}));
    }

    /// Places an item in `column`; `content` is the linked issue (or `{}` for drafts).
    pub fn add_item(&mut self, number: i64, column: &str, content: Value) {
        let (field_id, option_id) = self
            .fields
            .get(&number)
            .into_iter()
            .flatten()
            .find_map(|field| {
                let option = field["options"]
                    .as_array()?
                    .iter()
                    .find(|option| option["name"] == column)?;
                Some((field["id"].clone(), option["id"].clone()))
            })
            .unwrap_or_else(|| panic!("column '{column}' does not exist in project {number}"));

        self.items.entry(number).or_default().push(json!({
            "fieldValues": {"nodes": [
                {},
                {"name": column, "optionId": option_id, "field": {"id": field_id}}
            ]},
            "content": content
        }));
    }

    pub fn requests(&self) -> Vec<&'static str> {
        self.requests.lock().expect("request log poisoned").clone()
    }

    fn answer(&self, request: &GraphQlRequest) -> Value {
        let variables = request.variables.clone().unwrap_or_default();
        let query = request.query;

        if query == queries::ORGANIZATION || query == queries::USER {
            let login = variables["login"].as_str().unwrap_or_default();
            let (key, kind, accounts) = if query == queries::ORGANIZATION {
                ("organization", "an Organization", &self.organizations)
            } else {
                ("user", "a User", &self.users)
            };
            return match accounts.get(login) {
                Some(id) => json!({"data": {key: {"id": id}}}),
                None => json!({
                    "data": {key: null},
                    "errors": [{
                        "type": "NOT_FOUND",
                        "message": format!("Could not resolve to {kind} with the login of '{login}'.")
                    }]
                }),
            };
        }

        if query == queries::PROJECT {
            let owner_id = variables["ownerId"].as_str().unwrap_or_default();
            let number = variables["number"].as_i64().unwrap_or_default();
            return match self.projects.get(owner_id) {
                Some(numbers) if numbers.contains(&number) => {
                    json!({"data": {"node": {"projectV2": {"id": project_id(number)}}}})
                }
                Some(_) => json!({"data": {"node": {"projectV2": null}}}),
                None => json!({"data": {"node": null}}),
            };
        }

        let number = variables["projectId"]
            .as_str()
            .and_then(|id| id.strip_prefix("PVT_"))
            .and_then(|n| n.parse::<i64>().ok())
            .unwrap_or_default();

        if query == queries::PROJECT_FIELDS {
            let fields = self.fields.get(&number).cloned().unwrap_or_default();
            return json!({"data": {"node": {"fields": {"nodes": fields}}}});
        }

        if query == queries::PROJECT_ITEMS {
            let items = self.items.get(&number).cloned().unwrap_or_default();
            return json!({"data": {"node": {"items": {"nodes": items}}}});
        }

        json!({"errors": [{"message": "unexpected query"}]})
    }
}

impl GraphQlExecutor for FakeGitHub {
    async fn execute(&self, request: &GraphQlRequest) -> Result<Value, GraphQlError> {
        self.requests
            .lock()
            .expect("request log poisoned")
            .push(request.query);
        check_response(self.answer(request))
    }
}
