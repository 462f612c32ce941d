use crate::context::ModelRegistry;
use crate::error::ExtractError;
use crate::extractor::matchers::{self, MethodMatch};
use crate::extractor::{Extraction, HttpMethod, MethodFact, ServiceFact};
use crate::parser::{SourceFile, SourceParser};
use log::{debug, error};
use std::collections::BTreeSet;
use std::path::Path;

/// Recovers the HTTP surface of a JAX-RS style service interface.
///
/// The base path is the first `@Path` that appears before the first annotated
/// method, so a method route is never mistaken for the interface prefix. A
/// method whose parameter list cannot be split makes the whole file degraded:
/// the fact is named after the file and carries no methods.
pub fn extract_service(source: &SourceFile, models: &ModelRegistry) -> Extraction<ServiceFact> {
    let content = source.content.as_str();
    let interface_name = matchers::interface_declaration(content)
        .map(str::to_string)
        .unwrap_or_else(|| source.stem());

    let declarations: Vec<MethodMatch<'_>> = matchers::method_declarations(content).collect();
    let prefix_region = declarations
        .first()
        .map(|m| &content[..m.start])
        .unwrap_or(content);
    let base_path = matchers::route_path(prefix_region)
        .unwrap_or_default()
        .to_string();

    let mut methods = Vec::with_capacity(declarations.len());
    for declaration in &declarations {
        match method_fact(content, declaration, models) {
            Ok(method) => methods.push(method),
            Err(reason) => {
                error!(
                    "Error parsing service file {}: {}",
                    source.path.display(),
                    reason
                );
                return Extraction::Degraded {
                    fact: ServiceFact::empty(source.stem(), source.path.clone()),
                    reason,
                };
            }
        }
    }

    debug!(
        "Service {} (base path '{}') with {} methods",
        interface_name,
        base_path,
        methods.len()
    );

    Extraction::Parsed(ServiceFact {
        interface_name,
        base_path,
        methods,
        source_path: source.path.clone(),
    })
}

/// Reads and extracts a service file; a read failure degrades to an empty fact
/// named after the file.
pub fn extract_service_file(path: &Path, models: &ModelRegistry) -> Extraction<ServiceFact> {
    match SourceParser::read_file(path) {
        Ok(source) => extract_service(&source, models),
        Err(e) => {
            error!("Error parsing service file {}: {:#}", path.display(), e);
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            Extraction::Degraded {
                fact: ServiceFact::empty(stem, path.to_path_buf()),
                reason: ExtractError::unreadable(path, &e),
            }
        }
    }
}

fn method_fact(
    content: &str,
    declaration: &MethodMatch<'_>,
    models: &ModelRegistry,
) -> Result<MethodFact, ExtractError> {
    // The method pattern only admits the four verbs, so this never falls through.
    let http_method = HttpMethod::from_annotation(declaration.verb).unwrap_or(HttpMethod::Get);

    let segments = matchers::split_parameters(declaration.params).ok_or_else(|| {
        ExtractError::UnbalancedParameters {
            method: declaration.name.to_string(),
        }
    })?;

    let mut path_params: BTreeSet<String> = matchers::path_placeholders(declaration.path)
        .map(str::to_string)
        .collect();
    let mut query_params = Vec::new();
    let mut body_model = None;

    for segment in segments {
        if let Some(name) = matchers::query_param(segment) {
            query_params.push(name.to_string());
        }
        if let Some(name) = matchers::path_param(segment) {
            path_params.insert(name.to_string());
        }
        if http_method.carries_body() && body_model.is_none() {
            body_model = body_model_of(segment, models);
        }
    }

    let description =
        matchers::preceding_doc_comment(content, declaration.start).unwrap_or_default();

    Ok(MethodFact {
        name: declaration.name.to_string(),
        http_method,
        sub_path: declaration.path.to_string(),
        description,
        return_type: declaration.return_type.to_string(),
        path_params: path_params.into_iter().collect(),
        query_params,
        body_model,
    })
}

/// First registered model whose name occurs in the annotation-free segment.
///
/// This is plain substring containment: `Item` also matches `ItemRequest`.
fn body_model_of(segment: &str, models: &ModelRegistry) -> Option<String> {
    let bare = matchers::strip_annotations(segment);
    models
        .names()
        .find(|name| bare.contains(name))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{FieldFact, ModelFact};
    use pretty_assertions::assert_eq;

    const ORDER_SERVICE: &str = r#"
package com.example.orders;

import javax.ws.rs.*;

@Path("/v1/orders")
@Produces(MediaType.APPLICATION_JSON)
public interface IOrderService {

    /**
     * Lists orders for a customer. Results are paged.
     * @param customer the customer id
     */
    @GET
    @Path("/")
    List<OrderDto> listOrders(@QueryParam("customer") String customer,
                              @QueryParam("page") int page,
                              @QueryParam("size") int size);

    /** Fetches one order. */
    @GET
    @Path("/{orderId}/lines/{lineId}")
    OrderLine getOrderLine(@PathParam("orderId") String orderId,
                           @PathParam("lineId") String lineId);

    @POST
    @Path("/")
    @Consumes(MediaType.APPLICATION_JSON)
    Response createOrder(@HeaderParam("X-Trace") String trace, @Valid OrderRequest request);

    @PUT
    @Path("/{id}")
    Response updateOrder(@PathParam("id") long id, Order order);

    @DELETE
    @Path("/{id}")
    void deleteOrder(@PathParam("orderNo") long id);
}
"#;

    fn registry(names: &[&str]) -> ModelRegistry {
        let mut registry = ModelRegistry::new();
        for name in names {
            registry.insert(ModelFact {
                name: name.to_string(),
                fields: vec![FieldFact {
                    name: "id".to_string(),
                    declared_type: "Long".to_string(),
                }],
            });
        }
        registry
    }

    fn extract(content: &str, models: &ModelRegistry) -> ServiceFact {
        let source = SourceFile::new("/ws/orders-client/IOrderService.java", content);
        extract_service(&source, models).parsed().unwrap()
    }

    #[test]
    fn test_interface_and_base_path() {
        let fact = extract(ORDER_SERVICE, &registry(&[]));
        assert_eq!(fact.interface_name, "IOrderService");
        assert_eq!(fact.base_path, "/v1/orders");
        assert_eq!(fact.methods.len(), 5);
    }

    #[test]
    fn test_query_params_keep_declaration_order() {
        let fact = extract(ORDER_SERVICE, &registry(&[]));
        let list = &fact.methods[0];
        assert_eq!(list.name, "listOrders");
        assert_eq!(list.http_method, HttpMethod::Get);
        assert_eq!(list.query_params, vec!["customer", "page", "size"]);
        assert!(list.path_params.is_empty());
        assert_eq!(list.return_type, "List<OrderDto>");
        assert_eq!(list.description, "Lists orders for a customer");
    }

    #[test]
    fn test_path_params_are_sorted_union() {
        let fact = extract(ORDER_SERVICE, &registry(&[]));
        assert_eq!(fact.methods[1].path_params, vec!["lineId", "orderId"]);
        assert_eq!(fact.methods[1].description, "Fetches one order");
        // Annotation-only names are folded in alongside the route placeholder.
        assert_eq!(fact.methods[4].path_params, vec!["id", "orderNo"]);
    }

    #[test]
    fn test_body_model_first_containing_parameter() {
        let fact = extract(ORDER_SERVICE, &registry(&["Order", "OrderRequest"]));
        let create = &fact.methods[2];
        assert_eq!(create.http_method, HttpMethod::Post);
        // `Order` is registered first and is contained in `OrderRequest`.
        assert_eq!(create.body_model.as_deref(), Some("Order"));
        assert_eq!(fact.methods[3].body_model.as_deref(), Some("Order"));
    }

    #[test]
    fn test_body_model_only_for_post_and_put() {
        let fact = extract(ORDER_SERVICE, &registry(&["OrderLine", "String"]));
        assert_eq!(fact.methods[1].body_model, None);
        assert_eq!(fact.methods[4].body_model, None);
        // The header parameter is the first segment and mentions `String`.
        assert_eq!(fact.methods[2].body_model.as_deref(), Some("String"));
    }

    #[test]
    fn test_unknown_body_model_is_none() {
        let fact = extract(ORDER_SERVICE, &registry(&["Invoice"]));
        assert_eq!(fact.methods[2].body_model, None);
    }

    #[test]
    fn test_missing_interface_falls_back_to_file_stem() {
        let content = r#"
@GET
@Path("/ping")
String ping();
"#;
        let source = SourceFile::new("/ws/x-client/HealthService.java", content);
        let fact = extract_service(&source, &registry(&[])).parsed().unwrap();
        assert_eq!(fact.interface_name, "HealthService");
        assert_eq!(fact.base_path, "");
        assert_eq!(fact.methods[0].sub_path, "/ping");
        assert_eq!(fact.methods[0].description, "");
    }

    #[test]
    fn test_unbalanced_parameters_degrade_file() {
        let content = r#"
public interface IBrokenService {
    @GET
    @Path("/ok")
    String ok();

    @POST
    @Path("/broken")
    Response broken(@QueryParam("a" String a);
}
"#;
        let source = SourceFile::new("/ws/x-client/BrokenService.java", content);
        let extraction = extract_service(&source, &registry(&[]));
        match extraction {
            Extraction::Degraded { fact, reason } => {
                assert_eq!(fact.interface_name, "BrokenService");
                assert!(fact.methods.is_empty());
                assert!(matches!(reason, ExtractError::UnbalancedParameters { .. }));
            }
            other => panic!("expected degraded extraction, got {:?}", other),
        }
    }

    #[test]
    fn test_unreadable_service_degrades_to_stem() {
        let path = Path::new("/definitely/not/here/GoneService.java");
        let extraction = extract_service_file(path, &registry(&[]));
        let fact = extraction.fact().unwrap();
        assert_eq!(fact.interface_name, "GoneService");
        assert!(!extraction.is_parsed());
    }
}
