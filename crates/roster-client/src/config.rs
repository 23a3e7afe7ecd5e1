use serde::Deserialize;

/// `[student_api]` section of the console config.
#[derive(Deserialize, Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default)]
    pub paths: EndpointPaths,
}

/// Request paths relative to `base_url`. A `{id}` placeholder is replaced
/// by the percent-encoded student id.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct EndpointPaths {
    pub login: String,
    pub register: String,
    pub list: String,
    pub create: String,
    pub update: String,
    pub delete: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://student-api.acpt.lk".into(),
            paths: EndpointPaths::default(),
        }
    }
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            login: "/api/login".into(),
            register: "/api/register".into(),
            list: "/api/student/getAll".into(),
            create: "/api/student/save".into(),
            update: "/api/student/{id}".into(),
            delete: "/api/student/{id}".into(),
        }
    }
}
