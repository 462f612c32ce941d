use crate::config::{GeneratorConfig, COLLECTION_SCHEMA};
use crate::context::RunContext;
use crate::extractor::{MethodFact, ServiceFact};
use crate::template::body_template;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z][a-z]*").unwrap());

/// Postman collection (schema v2.1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionDocument {
    pub info: Info,
    pub item: Vec<Item>,
    pub auth: Auth,
    pub variable: Vec<Variable>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub name: String,
    #[serde(rename = "_postman_id")]
    pub postman_id: String,
    pub description: String,
    pub schema: String,
}

/// Entry of an `item` array: a request or a folder of further entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Item {
    Request(RequestItem),
    Folder(Folder),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub name: String,
    pub item: Vec<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestItem {
    pub name: String,
    pub request: Request,
    pub response: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub auth: Auth,
    pub method: String,
    pub header: Vec<Header>,
    pub url: Url,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub header_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Url {
    pub raw: String,
    pub host: Vec<String>,
    pub path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Vec<QueryParam>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub mode: String,
    pub raw: String,
    pub options: BodyOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyOptions {
    pub raw: RawOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOptions {
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Auth {
    #[serde(rename = "type")]
    pub auth_type: String,
    pub bearer: Vec<Variable>,
}

/// Key/value pair used for collection variables and bearer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub value_type: String,
}

impl Variable {
    fn string(key: &str, value: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            value: value.into(),
            value_type: "string".to_string(),
        }
    }
}

impl Header {
    fn text(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
            header_type: "text".to_string(),
        }
    }
}

impl Auth {
    /// Bearer auth reading its token from the configured collection variable.
    pub fn bearer(config: &GeneratorConfig) -> Self {
        Self {
            auth_type: "bearer".to_string(),
            bearer: vec![Variable::string("token", config.token_reference())],
        }
    }
}

impl CollectionDocument {
    /// Empty collection with a fresh `_postman_id` and bearer auth.
    ///
    /// Only `baseUrl` is declared as a variable; see [`Self::with_token_variable`].
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        config: &GeneratorConfig,
    ) -> Self {
        Self {
            info: Info {
                name: name.into(),
                postman_id: Uuid::new_v4().to_string(),
                description: description.into(),
                schema: COLLECTION_SCHEMA.to_string(),
            },
            item: Vec::new(),
            auth: Auth::bearer(config),
            variable: vec![Variable::string("baseUrl", config.base_url.clone())],
        }
    }

    /// Declares the token variable (empty) next to `baseUrl`.
    pub fn with_token_variable(mut self, config: &GeneratorConfig) -> Self {
        self.variable
            .push(Variable::string(&config.token_variable, String::new()));
        self
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.item = items;
        self
    }
}

impl Folder {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            item: Vec::new(),
            description,
        }
    }
}

/// Turns service facts into collection documents.
pub struct CollectionAssembler<'a> {
    ctx: &'a RunContext,
}

impl<'a> CollectionAssembler<'a> {
    pub fn new(ctx: &'a RunContext) -> Self {
        Self { ctx }
    }

    /// Builds the collection of one service, one request per method.
    pub fn assemble(&self, service: &ServiceFact, project_name: &str) -> CollectionDocument {
        debug!(
            "Assembling {} for project {}",
            service.interface_name, project_name
        );
        let config = &self.ctx.config;
        let items = service
            .methods
            .iter()
            .map(|method| Item::Request(self.request_item(service, method, project_name)))
            .collect();

        CollectionDocument::new(
            service.collection_name(),
            format!("Collection for {}", service.interface_name),
            config,
        )
        .with_items(items)
    }

    /// Builds the request for one method.
    pub fn request_item(
        &self,
        service: &ServiceFact,
        method: &MethodFact,
        project_name: &str,
    ) -> RequestItem {
        let config = &self.ctx.config;
        let path = url_path(project_name, &service.base_path, &method.sub_path);
        let base = format!("{{{{baseUrl}}}}/{}", path.join("/"));

        let (raw, query) = if method.query_params.is_empty() {
            (base, None)
        } else {
            let query_string = method
                .query_params
                .iter()
                .map(|key| format!("{}=", key))
                .collect::<Vec<_>>()
                .join("&");
            let query = method
                .query_params
                .iter()
                .map(|key| QueryParam {
                    key: key.clone(),
                    value: String::new(),
                    description: String::new(),
                })
                .collect();
            (format!("{}?{}", base, query_string), Some(query))
        };

        let mut header = vec![Header::text("Accept", "application/json")];
        let body = if method.http_method.carries_body() {
            header.push(Header::text("Content-Type", "application/json"));
            Some(self.body_for(method))
        } else {
            None
        };

        RequestItem {
            name: display_name(&method.name),
            request: Request {
                auth: Auth::bearer(config),
                method: method.http_method.as_str().to_string(),
                header,
                url: Url {
                    raw,
                    host: vec!["{{baseUrl}}".to_string()],
                    path,
                    query,
                },
                description: method.description.clone(),
                body,
            },
            response: Vec::new(),
        }
    }

    fn body_for(&self, method: &MethodFact) -> Body {
        let template = method
            .body_model
            .as_deref()
            .and_then(|name| self.ctx.models.get(name))
            .map(body_template)
            .unwrap_or_default();

        Body {
            mode: "raw".to_string(),
            raw: render_template(&template),
            options: BodyOptions {
                raw: RawOptions {
                    language: "json".to_string(),
                },
            },
        }
    }
}

/// Request name: the capitalised words of the method name joined by spaces,
/// or the method name itself when it has none.
///
/// `getOrderById` becomes `Order By Id`.
pub fn display_name(method_name: &str) -> String {
    let words: Vec<&str> = WORD.find_iter(method_name).map(|m| m.as_str()).collect();
    if words.is_empty() {
        method_name.to_string()
    } else {
        words.join(" ")
    }
}

/// URL path segments: project, `api`, base path, then the method path with
/// `{param}` rewritten to `{{param}}`. Empty segments never survive.
pub fn url_path(project_name: &str, base_path: &str, sub_path: &str) -> Vec<String> {
    let base = base_path.split('/').map(str::to_string);
    let sub = sub_path.split('/').map(|segment| {
        if segment.contains('{') {
            segment.replace('{', "{{").replace('}', "}}")
        } else {
            segment.to_string()
        }
    });

    [project_name.to_string(), "api".to_string()]
        .into_iter()
        .chain(base)
        .chain(sub)
        .filter(|segment| !segment.is_empty())
        .collect()
}

fn render_template(template: &Map<String, Value>) -> String {
    // Serializing a map of JSON values does not fail.
    serde_json::to_string_pretty(template).unwrap_or_else(|_| "{}".to_string())
}
