//! Fixed GraphQL documents sent to the GitHub API.
//!
//! Page sizes are hard limits: nothing beyond the first page of fields, items
//! or field values is ever requested.

pub const FIELDS_PAGE_SIZE: u32 = 20;
pub const ITEMS_PAGE_SIZE: u32 = 100;
pub const FIELD_VALUES_PAGE_SIZE: u32 = 100;

pub const ORGANIZATION: &str = r#"
query($login: String!) {
    organization(login: $login) {
        id
    }
}
"#;

pub const USER: &str = r#"
query($login: String!) {
    user(login: $login) {
        id
    }
}
"#;

pub const PROJECT: &str = r#"
query($ownerId: ID!, $number: Int!) {
    node(id: $ownerId) {
        ... on Organization {
            projectV2(number: $number) {
                id
            }
        }
        ... on User {
            projectV2(number: $number) {
                id
            }
        }
    }
}
"#;

pub const PROJECT_FIELDS: &str = r#"
query($projectId: ID!) {
    node(id: $projectId) {
        ... on ProjectV2 {
            fields(first: 20) {
                nodes {
                    ... on ProjectV2SingleSelectField {
                        id
                        name
                        options {
                            id
                            name
                        }
                    }
                }
            }
        }
    }
}
"#;

pub const PROJECT_ITEMS: &str = r#"
query($projectId: ID!) {
    node(id: $projectId) {
        ... on ProjectV2 {
            items(first: 100) {
                nodes {
                    id
                    fieldValues(first: 100) {
                        nodes {
                            ... on ProjectV2ItemFieldSingleSelectValue {
                                name
                                optionId
                                field {
                                    ... on ProjectV2FieldCommon {
                                        id
                                        name
                                    }
                                }
                            }
                        }
                    }
                    content {
                        ... on Issue {
                            number
                            repository {
                                name
                            }
                        }
                    }
                }
            }
        }
    }
}
"#;
